//! Pre-flight checks on raw input

use std::borrow::Cow;
use std::sync::OnceLock;

use regex::Regex;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::model::ColumnKind;

use super::tokenize;

/// Characters rejected anywhere in the input
pub const ILLEGAL_CHARACTERS: &[char] = &['<', '>', '{', '}', '\\'];

fn number_re() -> &'static Regex {
    static NUMBER_RE: OnceLock<Regex> = OnceLock::new();
    NUMBER_RE.get_or_init(|| Regex::new(r"^-?[0-9]*\.?[0-9]+$").expect("valid regex"))
}

/// Replace fullwidth digits (U+FF10..U+FF19) with their ASCII forms
pub(crate) fn normalize_digits(token: &str) -> Cow<'_, str> {
    if !token.chars().any(|c| ('０'..='９').contains(&c)) {
        return Cow::Borrowed(token);
    }
    token
        .chars()
        .map(|c| match c {
            '０'..='９' => char::from(b'0' + (c as u32 - '０' as u32) as u8),
            other => other,
        })
        .collect()
}

/// Check `raw` against the declared kind.
///
/// Numeric bounds are checked again by [`convert`](super::convert), which is
/// the authoritative gate; this catches bad input before anything is touched.
pub fn validate(raw: &str, kind: ColumnKind, config: &Config) -> Result<()> {
    if raw.trim().is_empty() {
        return Err(Error::EmptyInput);
    }

    if let Some(c) = raw.chars().find(|c| ILLEGAL_CHARACTERS.contains(c)) {
        return Err(Error::IllegalCharacter(c));
    }

    let tokens = tokenize(raw);
    if tokens.is_empty() {
        return Err(Error::EmptyInput);
    }

    if kind == ColumnKind::Number {
        for token in &tokens {
            let digits = normalize_digits(token);
            if !number_re().is_match(&digits) {
                return Err(Error::NotANumber(token.clone()));
            }
            let value: f64 = digits
                .parse()
                .map_err(|_| Error::NotANumber(token.clone()))?;
            if value.abs() > config.number_limit {
                return Err(Error::OutOfRange(token.clone()));
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check(raw: &str, kind: ColumnKind) -> Result<()> {
        validate(raw, kind, &Config::default())
    }

    #[test]
    fn test_empty() {
        assert!(matches!(check("", ColumnKind::Text), Err(Error::EmptyInput)));
        assert!(matches!(check("   ", ColumnKind::Number), Err(Error::EmptyInput)));
        assert!(matches!(check(" , ;", ColumnKind::Text), Err(Error::EmptyInput)));
    }

    #[test]
    fn test_illegal_characters() {
        assert!(matches!(
            check("a<b", ColumnKind::Text),
            Err(Error::IllegalCharacter('<'))
        ));
        assert!(matches!(
            check("C:\\path", ColumnKind::Text),
            Err(Error::IllegalCharacter('\\'))
        ));
        assert!(matches!(
            check("{1}", ColumnKind::Number),
            Err(Error::IllegalCharacter('{'))
        ));
    }

    #[test]
    fn test_numbers() {
        assert!(check("-3.5", ColumnKind::Number).is_ok());
        assert!(check("1, 2.25; .5", ColumnKind::Number).is_ok());
        assert!(check("10000000000", ColumnKind::Number).is_ok());

        assert!(matches!(
            check("12x", ColumnKind::Number),
            Err(Error::NotANumber(t)) if t == "12x"
        ));
        assert!(matches!(check("1e5", ColumnKind::Number), Err(Error::NotANumber(_))));
        assert!(matches!(check("1,000.5.2", ColumnKind::Number), Err(Error::NotANumber(_))));
        assert!(matches!(check("+4", ColumnKind::Number), Err(Error::NotANumber(_))));
        assert!(matches!(check("5.", ColumnKind::Number), Err(Error::NotANumber(_))));
        // Other scripts' digits are not numbers here
        assert!(matches!(check("١٢", ColumnKind::Number), Err(Error::NotANumber(_))));
    }

    #[test]
    fn test_fullwidth_digits() {
        assert!(check("１２, ３.５；-７", ColumnKind::Number).is_ok());
        assert!(matches!(
            check("２００００００００００", ColumnKind::Number),
            Err(Error::OutOfRange(_))
        ));
        assert_eq!(normalize_digits("１２.5"), "12.5");
        assert!(matches!(normalize_digits("12"), Cow::Borrowed("12")));
    }

    #[test]
    fn test_out_of_range() {
        assert!(matches!(
            check("10000000001", ColumnKind::Number),
            Err(Error::OutOfRange(_))
        ));
        let huge = format!("-{}", "9".repeat(300));
        assert!(matches!(check(&huge, ColumnKind::Number), Err(Error::OutOfRange(_))));
    }

    #[test]
    fn test_text_is_not_checked_for_shape() {
        assert!(check("12x, hello world", ColumnKind::Text).is_ok());
        assert!(check(&"a".repeat(5000), ColumnKind::Text).is_ok());
    }
}
