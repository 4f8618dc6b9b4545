//! Easy ranges: short mnemonics (`TS+`, `NFD`, `SD12+`) compiled into range-language text.
//!
//! A mnemonic is optionally followed by numbers (`SD9`, `2P3_4`), a `K` kicker marker that is
//! ignored, and a `+` asking for the hand and everything better. The operators `, : ! ( )` and
//! `*` pass through unchanged.
//!
//! ```
//! use easy_range::easy_range::{check_range, compile};
//! use easy_range::explorer::BoardExplorer;
//!
//! let explorer: BoardExplorer = "AdKc7h8s3s".parse().unwrap();
//! assert_eq!(compile(&explorer, "S3+").unwrap(), "(AA,KK,88)");
//! assert_eq!(compile(&explorer, "(TS,MS)!BS").unwrap(), "(AA,KK)!33");
//! assert!(check_range("TS+,YB").is_err());
//! ```

mod parser;
pub mod syntax;

use crate::explorer::{BoardExplorer, Hand, Strictness};
use parser::Token;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum EasyRangeError {
    #[error("Unexpected symbol '{symbol}' at column {column}: {line}")]
    UnexpectedSymbol { symbol: char, column: usize, line: String },
    #[error("Unexpected end of range at column {column}: {line}")]
    UnexpectedEnd { column: usize, line: String },
    #[error("empty range")]
    Empty,
}

impl EasyRangeError {
    /// 1-based column of the failure within its line.
    pub fn column(&self) -> Option<usize> {
        match self {
            EasyRangeError::UnexpectedSymbol { column, .. } | EasyRangeError::UnexpectedEnd { column, .. } => {
                Some(*column)
            }
            EasyRangeError::Empty => None,
        }
    }
}

/// Compiles `easy_range` against the board of `explorer`.
///
/// Each mnemonic becomes the hole cards of the hands it selects: nothing when there are none,
/// the bare hand for one, a parenthesized list for several.
pub fn compile(explorer: &BoardExplorer, easy_range: &str) -> Result<String, EasyRangeError> {
    if easy_range.trim() == "*" {
        return Ok("*".to_string());
    }
    let mut range = String::new();
    for token in parser::parse(easy_range)? {
        match token {
            Token::Literal(c) => range.push(c),
            Token::Hand { entry, relative_rank, and_better } => {
                let rank = entry.resolve_rank(relative_rank.as_deref());
                let strictness = if entry.and_better || and_better {
                    Strictness::ThatAndBetter
                } else {
                    Strictness::OnlyThat
                };
                let hands = explorer.find(entry.target, rank.as_deref(), strictness);
                log::trace!(
                    "{:<24}{:?} {:?} -> {} hands",
                    entry.mnemonic,
                    rank.unwrap_or_default(),
                    strictness,
                    hands.len()
                );
                render(&mut range, &hands);
            }
        }
    }
    Ok(range)
}

fn render(range: &mut String, hands: &[Hand]) {
    let holes: Vec<String> = hands.iter().map(ToString::to_string).collect();
    if holes.len() > 1 {
        range.push('(');
        range.push_str(&holes.join(","));
        range.push(')');
    } else {
        range.push_str(&holes.concat());
    }
}

/// Checks the syntax of an easy range without a board.
///
/// ```
/// use easy_range::easy_range::{check_range, EasyRangeError};
///
/// assert!(check_range("(T2P+,NFD,SD9+)").is_ok());
/// let err = check_range("MS+,YB").unwrap_err();
/// assert_eq!(err.to_string(), "Unexpected symbol 'Y' at column 5: MS+,YB");
/// assert_eq!(check_range(""), Err(EasyRangeError::Empty));
/// ```
pub fn check_range(easy_range: &str) -> Result<(), EasyRangeError> {
    parser::parse(easy_range).map(|_| ())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ppt(board: &str, easy_range: &str) -> String {
        let explorer: BoardExplorer = board.parse().unwrap();
        compile(&explorer, easy_range).unwrap()
    }

    #[test]
    fn test_star_short_circuits() {
        assert_eq!(ppt("AdKc7h", " * "), "*");
        assert_eq!(ppt("AdKc7h", "*!TS"), "*!AA");
    }

    #[test]
    fn test_empty_result_renders_nothing() {
        assert_eq!(ppt("AdKc7h8s3s", "Str1"), "");
        assert_eq!(ppt("AdKc7h8s3s", "(FD)"), "()");
    }

    #[test]
    fn test_kicker_marker_is_ignored() {
        assert_eq!(ppt("AdKc7h8s3s", "MP1K"), ppt("AdKc7h8s3s", "MP1"));
    }

    #[test]
    fn test_wrap_includes_better_draws() {
        assert_eq!(ppt("Js9h4h", "WRAP"), ppt("Js9h4h", "SD13+"));
        assert_eq!(ppt("Js9h4h", "WRAP"), "(QT8,KQT,T87)");
    }

    #[test]
    fn test_column_accessor() {
        assert_eq!(check_range("TSK").unwrap_err().column(), Some(3));
        assert_eq!(EasyRangeError::Empty.column(), None);
    }
}
