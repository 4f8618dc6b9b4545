//! Helpers for range-language text, used to prepare sub-ranges for an equity query.

/// Wraps `range` in parentheses unless it already is one parenthesized group.
///
/// Empty or unbalanced text is returned unchanged, so applying this twice is the same as
/// applying it once.
///
/// ```
/// use easy_range::range_text::close_parenthesis;
///
/// assert_eq!(close_parenthesis("77,KK"), "(77,KK)");
/// assert_eq!(close_parenthesis("(77,KK)"), "(77,KK)");
/// assert_eq!(close_parenthesis("(77,KK):(ss)"), "((77,KK):(ss))");
/// ```
pub fn close_parenthesis(range: &str) -> String {
    if range.is_empty() || is_single_group(range) || !is_balanced(range) {
        range.to_string()
    } else {
        format!("({range})")
    }
}

fn is_balanced(range: &str) -> bool {
    let mut depth = 0i32;
    for c in range.chars() {
        match c {
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth < 0 {
                    return false;
                }
            }
            _ => {}
        }
    }
    depth == 0
}

/// The opening parenthesis at the start closes at the very end.
fn is_single_group(range: &str) -> bool {
    if !range.starts_with('(') {
        return false;
    }
    let mut depth = 0i32;
    let last = range.chars().count() - 1;
    for (index, c) in range.chars().enumerate() {
        match c {
            '(' => depth += 1,
            ')' => depth -= 1,
            _ => {}
        }
        if depth == 0 {
            return index == last;
        }
    }
    false
}

/// Each range excluding all ranges before it: `[r1, r2, r3]` becomes `[r1, r2!r1, r3!r2!r1]`.
///
/// ```
/// use easy_range::range_text::cumulative_ranges;
///
/// let ranges = cumulative_ranges(["(77,KK)", "(74,K4)", "*"]);
/// assert_eq!(ranges, ["(77,KK)", "(74,K4)!(77,KK)", "*!(74,K4)!(77,KK)"]);
/// ```
pub fn cumulative_ranges<I, S>(ranges: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut cumulative: Vec<String> = Vec::new();
    for range in ranges {
        let next = match cumulative.last() {
            Some(previous) => format!("{}!{}", range.as_ref(), previous),
            None => range.as_ref().to_string(),
        };
        cumulative.push(next);
    }
    cumulative
}

/// Closes every range and optionally makes the list cumulative.
pub fn sub_ranges<I, S>(ranges: I, cumulative: bool) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let closed = ranges.into_iter().map(|r| close_parenthesis(r.as_ref()));
    if cumulative {
        cumulative_ranges(closed)
    } else {
        closed.collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn close_parenthesis_cases() {
        assert_eq!(close_parenthesis("*"), "(*)");
        assert_eq!(close_parenthesis("(AA,KK)!(QQ)"), "((AA,KK)!(QQ))");
        assert_eq!(close_parenthesis("((AA,KK)!(QQ))"), "((AA,KK)!(QQ))");
        assert_eq!(close_parenthesis(""), "");
        assert_eq!(close_parenthesis("(77"), "(77");
        assert_eq!(close_parenthesis("77)"), "77)");
    }

    #[test]
    fn close_parenthesis_is_idempotent() {
        for range in ["77,KK", "(77,KK)", "(77,KK):(ss)", "AA!(KK,QQ)", ")(", "((x)"] {
            let once = close_parenthesis(range);
            assert_eq!(close_parenthesis(&once), once, "{range}");
        }
    }

    #[test]
    fn cumulative_of_three() {
        let ranges = cumulative_ranges(["(77,KK)", "(74,K4,K7,44,77,KK)", "*"]);
        assert_eq!(
            ranges,
            vec![
                "(77,KK)".to_string(),
                "(74,K4,K7,44,77,KK)!(77,KK)".to_string(),
                "*!(74,K4,K7,44,77,KK)!(77,KK)".to_string(),
            ]
        );
        assert!(cumulative_ranges(Vec::<String>::new()).is_empty());
    }

    #[test]
    fn sub_ranges_close_then_accumulate() {
        assert_eq!(sub_ranges(["AA,KK", "QQ"], false), vec!["(AA,KK)", "(QQ)"]);
        assert_eq!(sub_ranges(["AA,KK", "QQ"], true), vec!["(AA,KK)", "(QQ)!(AA,KK)"]);
    }
}
