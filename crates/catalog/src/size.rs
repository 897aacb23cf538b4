use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

static SINGLE_DIGIT_SIZE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"^([0-9])"?$"#).expect("size regex"));

static SIZE_IN_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(?:^|\s)([0-9]{1,2})""#).expect("name size regex"));

/// A normalized size string, `N"` for plain inch sizes or the trimmed raw
/// text for anything the normalizer does not recognize.
///
/// Absence of a size is modeled as `Option<SizeToken>` = `None`, which is a
/// distinct state from any token value: an unspecified size loosens
/// matching instead of failing it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SizeToken(String);

impl SizeToken {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SizeToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Normalize a free-text size field.
///
/// Blank input is `None`. A lone digit with an optional inch mark becomes
/// `N"`. Anything else passes through trimmed but otherwise verbatim, so
/// future multi-digit sizes keep working without re-deriving this logic.
#[must_use]
pub fn normalize_size(raw: &str) -> Option<SizeToken> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }
    if let Some(caps) = SINGLE_DIGIT_SIZE.captures(s) {
        return Some(SizeToken(format!("{}\"", &caps[1])));
    }
    Some(SizeToken(s.to_string()))
}

/// Extract an inch size from display-name text.
///
/// Matches one or two digits immediately followed by an inch mark, anchored
/// to start-of-string or preceded by whitespace so digits embedded in other
/// tokens are not picked up.
#[must_use]
pub fn size_from_name(name: &str) -> Option<SizeToken> {
    SIZE_IN_NAME
        .captures(name)
        .map(|caps| SizeToken(format!("{}\"", &caps[1])))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn single_digit_sizes_gain_an_inch_mark() {
        assert_eq!(normalize_size("5").unwrap().as_str(), "5\"");
        assert_eq!(normalize_size("5\"").unwrap().as_str(), "5\"");
        assert_eq!(normalize_size(" 5 ").unwrap().as_str(), "5\"");
    }

    #[test]
    fn blank_is_absent_not_zero() {
        assert_eq!(normalize_size(""), None);
        assert_eq!(normalize_size("   "), None);
    }

    #[test]
    fn unrecognized_sizes_pass_through_trimmed() {
        assert_eq!(normalize_size(" 12\" ").unwrap().as_str(), "12\"");
        assert_eq!(normalize_size("3x4").unwrap().as_str(), "3x4");
    }

    #[test]
    fn non_ascii_digits_pass_through_without_panicking() {
        // The size field is free text; an Arabic-Indic digit is not an inch
        // size but must not abort the computation.
        assert_eq!(normalize_size("٥").unwrap().as_str(), "٥");
        assert_eq!(normalize_size("٥\"").unwrap().as_str(), "٥\"");
    }

    #[test]
    fn extracts_size_from_names() {
        assert_eq!(size_from_name("5\" K-Style End Cap").unwrap().as_str(), "5\"");
        assert_eq!(
            size_from_name("Gutter 12\" Straight Face").unwrap().as_str(),
            "12\""
        );
        assert_eq!(size_from_name("Box End Cap"), None);
        // Digits embedded in another token do not count.
        assert_eq!(size_from_name("Type-5\" bracket"), None);
    }
}
