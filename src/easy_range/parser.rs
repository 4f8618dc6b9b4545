//! Tokenizer for easy ranges.
//!
//! At every position each grammar alternative is tried and the longest match wins, the earlier
//! alternative on a tie. Alternatives are the mnemonic groups (by arity, then family), the
//! operators `, : ! ( )` and `*`. Whitespace before any component is skipped.

use super::syntax::{group, SyntaxEntry};
use super::EasyRangeError;
use crate::explorer::Family;

const FAMILIES: [Family; 4] = [Family::MadeHand, Family::StraightDraw, Family::FlushDraw, Family::Blocker];
const OPERATORS: [char; 5] = [',', ':', '!', '(', ')'];

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Token {
    Hand {
        entry: &'static SyntaxEntry,
        relative_rank: Option<Vec<u8>>,
        and_better: bool,
    },
    /// Operator or `*`, copied to the output unchanged.
    Literal(char),
}

/// End position and token, or the position where matching failed.
type Attempt = Result<(usize, Token), usize>;

enum Alternative {
    Hand { arity: u8, entries: Vec<&'static SyntaxEntry> },
    Operator,
    Any,
}

fn alternatives() -> Vec<Alternative> {
    let mut alternatives: Vec<Alternative> = (0..=2)
        .flat_map(|arity| FAMILIES.iter().map(move |&family| (arity, group(arity, family))))
        .filter(|(_, entries)| !entries.is_empty())
        .map(|(arity, entries)| Alternative::Hand { arity, entries })
        .collect();
    alternatives.push(Alternative::Operator);
    alternatives.push(Alternative::Any);
    alternatives
}

fn skip_whitespace(chars: &[char], mut pos: usize) -> usize {
    while chars.get(pos).is_some_and(|c| matches!(c, ' ' | '\t' | '\n' | '\r')) {
        pos += 1;
    }
    pos
}

fn matches_caseless(chars: &[char], pos: usize, word: &str) -> bool {
    let mut at = pos;
    for expected in word.chars() {
        match chars.get(at) {
            Some(c) if c.eq_ignore_ascii_case(&expected) => at += 1,
            _ => return false,
        }
    }
    true
}

fn char_at(chars: &[char], pos: usize, wanted: char) -> Result<usize, usize> {
    let pos = skip_whitespace(chars, pos);
    if chars.get(pos) == Some(&wanted) {
        Ok(pos + 1)
    } else {
        Err(pos)
    }
}

/// One or two digits.
fn number(chars: &[char], pos: usize) -> Result<(u8, usize), usize> {
    let start = skip_whitespace(chars, pos);
    let mut value = 0u8;
    let mut end = start;
    while end - start < 2 {
        match chars.get(end).and_then(|c| c.to_digit(10)) {
            Some(digit) => value = value * 10 + digit as u8,
            None => break,
        }
        end += 1;
    }
    if end == start {
        Err(start)
    } else {
        Ok((value, end))
    }
}

/// Mnemonic, then `arity` numbers (`n` or `n_m`), an optional `K` and an optional `+`.
fn hand(chars: &[char], pos: usize, arity: u8, entries: &[&'static SyntaxEntry]) -> Attempt {
    let start = skip_whitespace(chars, pos);
    let entry = entries
        .iter()
        .copied()
        .filter(|e| matches_caseless(chars, start, e.mnemonic))
        .max_by_key(|e| e.mnemonic.len())
        .ok_or(start)?;
    let mut pos = start + entry.mnemonic.chars().count();

    let relative_rank = match arity {
        0 => None,
        1 => {
            let (rank, end) = number(chars, pos)?;
            pos = end;
            Some(vec![rank])
        }
        _ => {
            let (first, end) = number(chars, pos)?;
            let end = char_at(chars, end, '_')?;
            let (second, end) = number(chars, end)?;
            pos = end;
            Some(vec![first, second])
        }
    };
    if arity > 0 {
        if let Ok(end) = char_at(chars, pos, 'K') {
            pos = end;
        }
    }
    let and_better = match char_at(chars, pos, '+') {
        Ok(end) => {
            pos = end;
            true
        }
        Err(_) => false,
    };
    Ok((pos, Token::Hand { entry, relative_rank, and_better }))
}

fn literal(chars: &[char], pos: usize, allowed: &[char]) -> Attempt {
    let pos = skip_whitespace(chars, pos);
    match chars.get(pos) {
        Some(&c) if allowed.contains(&c) => Ok((pos + 1, Token::Literal(c))),
        _ => Err(pos),
    }
}

fn next_token(chars: &[char], pos: usize, alternatives: &[Alternative]) -> Attempt {
    let mut best: Option<(usize, Token)> = None;
    let mut furthest = pos;
    for alternative in alternatives {
        let attempt = match alternative {
            Alternative::Hand { arity, entries } => hand(chars, pos, *arity, entries),
            Alternative::Operator => literal(chars, pos, &OPERATORS),
            Alternative::Any => literal(chars, pos, &['*']),
        };
        match attempt {
            Ok((end, token)) => {
                if best.as_ref().map_or(true, |(best_end, _)| end > *best_end) {
                    best = Some((end, token));
                }
            }
            Err(at) => furthest = furthest.max(at),
        }
    }
    best.ok_or(furthest)
}

/// Error for a failure at char index `pos`, with a 1-based column inside its line.
fn error_at(chars: &[char], pos: usize) -> EasyRangeError {
    let line_start = chars[..pos.min(chars.len())].iter().rposition(|&c| c == '\n').map_or(0, |i| i + 1);
    let line_end = chars[line_start..].iter().position(|&c| c == '\n').map_or(chars.len(), |i| line_start + i);
    let line: String = chars[line_start..line_end].iter().collect();
    let column = pos - line_start + 1;
    match chars.get(pos) {
        Some(&symbol) => EasyRangeError::UnexpectedSymbol { symbol, column, line },
        None => EasyRangeError::UnexpectedEnd { column, line },
    }
}

/// Splits an easy range into tokens; the whole input must be consumed.
pub(crate) fn parse(input: &str) -> Result<Vec<Token>, EasyRangeError> {
    let chars: Vec<char> = input.chars().collect();
    if skip_whitespace(&chars, 0) == chars.len() {
        return Err(EasyRangeError::Empty);
    }
    let alternatives = alternatives();
    let mut tokens = Vec::new();
    let mut pos = 0;
    loop {
        match next_token(&chars, pos, &alternatives) {
            Ok((end, token)) => {
                tokens.push(token);
                pos = end;
            }
            Err(at) if tokens.is_empty() => return Err(error_at(&chars, at)),
            Err(_) => break,
        }
    }
    let end = skip_whitespace(&chars, pos);
    if end < chars.len() {
        return Err(error_at(&chars, end));
    }
    Ok(tokens)
}
