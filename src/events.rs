//! Event selection expression parsing
//!
//! Expressions name events by id and accept comma-separated numbers
//! and inclusive ranges, e.g. `1,3-5`.

use crate::error::{Error, Result};
use regex::Regex;
use std::collections::HashSet;
use std::sync::OnceLock;

/// Upper bound on how many events one expression may select
const MAX_SELECTED_EVENTS: usize = 1000;

/// Characters outside the expression alphabet
static INVALID_CHARS: OnceLock<Regex> = OnceLock::new();

/// A single inclusive range piece like `3-5`
static RANGE: OnceLock<Regex> = OnceLock::new();

/// Initialize INVALID_CHARS on first use
fn invalid_chars() -> &'static Regex {
    INVALID_CHARS.get_or_init(|| Regex::new(r"[^0-9,\-]").unwrap())
}

/// Initialize RANGE on first use
fn range_pattern() -> &'static Regex {
    RANGE.get_or_init(|| Regex::new(r"^(\d+)-(\d+)$").unwrap())
}

/// Parse an event selection expression into a list of event ids.
///
/// Duplicates are dropped while the first occurrence keeps its
/// position, so `3,1,3` yields `[3, 1]`. Ranges must be ascending and
/// event ids start at 1. One expression may select at most 1000
/// events.
pub fn parse_event_expr(expr: &str) -> Result<Vec<u32>> {
    if expr.is_empty() {
        return Err(expr_error(expr, "expression is empty"));
    }
    if invalid_chars().is_match(expr) {
        return Err(expr_error(
            expr,
            "allowed forms are 1,2,5-7 (digits, commas and ranges)",
        ));
    }

    let mut numbers = Vec::new();
    let mut seen = HashSet::new();
    for piece in expr.split(',') {
        if piece.is_empty() {
            return Err(expr_error(expr, "empty entry between commas"));
        }
        if let Some(captures) = range_pattern().captures(piece) {
            let start = parse_number(&captures[1], expr)?;
            let end = parse_number(&captures[2], expr)?;
            if start > end {
                return Err(expr_error(
                    expr,
                    format!("range {piece} is descending"),
                ));
            }
            if (end - start) as usize >= MAX_SELECTED_EVENTS {
                return Err(expr_error(
                    expr,
                    format!("range {piece} selects more than {MAX_SELECTED_EVENTS} events"),
                ));
            }
            for n in start..=end {
                push_unique(&mut numbers, &mut seen, n, expr)?;
            }
        } else if piece.contains('-') {
            return Err(expr_error(expr, format!("malformed range '{piece}'")));
        } else {
            push_unique(&mut numbers, &mut seen, parse_number(piece, expr)?, expr)?;
        }
    }

    Ok(numbers)
}

fn parse_number(digits: &str, expr: &str) -> Result<u32> {
    let n: u32 = digits
        .parse()
        .map_err(|_| expr_error(expr, format!("number '{digits}' is out of range")))?;
    if n == 0 {
        return Err(expr_error(expr, "event numbers start at 1"));
    }
    Ok(n)
}

fn push_unique(
    numbers: &mut Vec<u32>,
    seen: &mut HashSet<u32>,
    n: u32,
    expr: &str,
) -> Result<()> {
    if seen.insert(n) {
        if numbers.len() >= MAX_SELECTED_EVENTS {
            return Err(expr_error(
                expr,
                format!("selects more than {MAX_SELECTED_EVENTS} events"),
            ));
        }
        numbers.push(n);
    }
    Ok(())
}

fn expr_error(expr: &str, message: impl Into<String>) -> Error {
    Error::EventExpression {
        expr: expr.to_string(),
        message: message.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_single_numbers() {
        assert_eq!(parse_event_expr("1").unwrap(), vec![1]);
        assert_eq!(parse_event_expr("2,4,7").unwrap(), vec![2, 4, 7]);
    }

    #[test]
    fn test_parse_mixed_numbers_and_ranges() {
        assert_eq!(parse_event_expr("1,3-5").unwrap(), vec![1, 3, 4, 5]);
        assert_eq!(parse_event_expr("2,4-6").unwrap(), vec![2, 4, 5, 6]);
    }

    #[test]
    fn test_parse_multi_digit_range() {
        assert_eq!(parse_event_expr("10-12").unwrap(), vec![10, 11, 12]);
    }

    #[test]
    fn test_duplicates_keep_first_occurrence() {
        assert_eq!(parse_event_expr("3,1,3").unwrap(), vec![3, 1]);
        assert_eq!(parse_event_expr("2-4,3").unwrap(), vec![2, 3, 4]);
    }

    #[test]
    fn test_invalid_characters_rejected() {
        assert!(parse_event_expr("abc").is_err());
        assert!(parse_event_expr("1;2").is_err());
        assert!(parse_event_expr("1, 2").is_err());
    }

    #[test]
    fn test_descending_range_rejected() {
        assert!(parse_event_expr("5-3").is_err());
    }

    #[test]
    fn test_zero_rejected() {
        assert!(parse_event_expr("0").is_err());
        assert!(parse_event_expr("0-2").is_err());
    }

    #[test]
    fn test_empty_pieces_rejected() {
        assert!(parse_event_expr("").is_err());
        assert!(parse_event_expr("1,,2").is_err());
        assert!(parse_event_expr(",1").is_err());
        assert!(parse_event_expr("1,").is_err());
    }

    #[test]
    fn test_malformed_ranges_rejected() {
        assert!(parse_event_expr("1-2-3").is_err());
        assert!(parse_event_expr("-2").is_err());
        assert!(parse_event_expr("2-").is_err());
    }

    #[test]
    fn test_oversized_selections_rejected() {
        assert!(parse_event_expr("1-999999999").is_err());
        assert!(parse_event_expr("1-1001").is_err());
        assert!(parse_event_expr("1-1000,1001").is_err());
        assert_eq!(parse_event_expr("1-1000").unwrap().len(), 1000);
    }

    #[test]
    fn test_error_carries_expression() {
        let err = parse_event_expr("x").unwrap_err();

        match err {
            Error::EventExpression { expr, .. } => assert_eq!(expr, "x"),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
