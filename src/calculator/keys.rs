//! Tokenizing a line of typed key labels into engine commands.
//!
//! Lets a terminal stand in for the keypad: `12 + 3 =` or `2x^y10=`
//! become the same button presses a GUI would send. Whitespace between
//! labels is optional. A double-quoted token is direct text entry.

use lazy_static::lazy_static;
use regex::Regex;

use super::command::{Command, KeyError};

lazy_static! {
    /// One key label per match. Longer labels come first so `10^x` wins
    /// over the digit `1` and `CE` over `C`. Anything else lands in `bad`.
    static ref KEY_TOKEN: Regex = Regex::new(
        r#"(?x)
          "(?P<paste>[^"]*)"
        | (?P<key>
              CE | C
            | x\^y | x\^2 | 10\^x | 1/x | \|x\| | 2√x | n!
            | \+/- | ±
            | sin | cos | tg | log | ln | sqrt | abs | pi | π | e
            | [0-9] | [.+\-*/^()=]
          )
        | (?P<bad>\S+)
        "#
    ).unwrap();
}

/// Parse every key label on `line`, in order.
///
/// Fails on the first label that does not name a button; no commands
/// are returned in that case.
pub fn parse_keys(line: &str) -> Result<Vec<Command>, KeyError> {
    KEY_TOKEN
        .captures_iter(line)
        .map(|caps| {
            if let Some(text) = caps.name("paste") {
                return Ok(Command::Paste(text.as_str().to_string()));
            }
            if let Some(key) = caps.name("key") {
                return key.as_str().parse();
            }
            let bad = caps.name("bad").map_or("", |m| m.as_str());
            Err(KeyError::Unknown(bad.to_string()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculator::command::{BinaryOperator, Function, UnaryFunction};

    #[test]
    fn test_compact_and_spaced_input_agree() {
        let compact = parse_keys("12+3=").unwrap();
        let spaced = parse_keys("1 2 + 3 =").unwrap();
        assert_eq!(compact, spaced);
        assert_eq!(
            compact,
            vec![
                Command::Digit(1),
                Command::Digit(2),
                Command::Operator(BinaryOperator::Add),
                Command::Digit(3),
                Command::Equals,
            ]
        );
    }

    #[test]
    fn test_multi_character_labels() {
        assert_eq!(
            parse_keys("2x^y10=").unwrap(),
            vec![
                Command::Digit(2),
                Command::Function(Function::PowerStart),
                Command::Digit(1),
                Command::Digit(0),
                Command::Equals,
            ]
        );
        assert_eq!(
            parse_keys("10^x").unwrap(),
            vec![Command::Function(Function::Unary(UnaryFunction::Pow10))]
        );
        assert_eq!(
            parse_keys("10^2").unwrap(),
            vec![
                Command::Digit(1),
                Command::Digit(0),
                Command::Operator(BinaryOperator::Power),
                Command::Digit(2),
            ]
        );
    }

    #[test]
    fn test_clear_and_sign_labels() {
        assert_eq!(
            parse_keys("CE C ± +/-").unwrap(),
            vec![
                Command::ClearEntry,
                Command::ClearAll,
                Command::SignChange,
                Command::SignChange,
            ]
        );
    }

    #[test]
    fn test_ascii_aliases() {
        assert_eq!(
            parse_keys("pi sqrt abs").unwrap(),
            vec![
                Command::Function(Function::Unary(UnaryFunction::Pi)),
                Command::Function(Function::Unary(UnaryFunction::Sqrt)),
                Command::Function(Function::Unary(UnaryFunction::Abs)),
            ]
        );
    }

    #[test]
    fn test_quoted_direct_entry() {
        assert_eq!(
            parse_keys(r#""1.5E+3" n!"#).unwrap(),
            vec![
                Command::Paste("1.5E+3".to_string()),
                Command::Function(Function::Factorial),
            ]
        );
    }

    #[test]
    fn test_unknown_label_rejects_line() {
        assert_eq!(
            parse_keys("2 + tan"),
            Err(KeyError::Unknown("tan".to_string()))
        );
        assert_eq!(
            parse_keys(r#""12"#),
            Err(KeyError::Unknown(r#""12"#.to_string()))
        );
    }

    #[test]
    fn test_blank_line() {
        assert!(parse_keys("   ").unwrap().is_empty());
    }
}
