use regex::bytes::Regex;

use crate::ConfigErr;

#[derive(Debug, Clone)]
/// Acceptance filter: a message passes iff the pattern matches somewhere in its payload.
///
/// Matching runs on raw bytes, so a payload that is not valid UTF-8 simply does not match
/// patterns that require text.
pub struct Filter {
    regex: Regex,
}

impl Filter {
    pub fn new(pattern: &str) -> Result<Self, ConfigErr> {
        let regex = Regex::new(pattern).map_err(ConfigErr::InvalidFilter)?;
        Ok(Self { regex })
    }

    pub fn pattern(&self) -> &str {
        self.regex.as_str()
    }

    pub fn is_match(&self, payload: &[u8]) -> bool {
        self.regex.is_match(payload)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_filter() {
        let filter = Filter::new("^(ERROR|WARN) ").unwrap();
        assert_eq!(filter.pattern(), "^(ERROR|WARN) ");
        assert!(filter.is_match(b"ERROR disk full"));
        assert!(filter.is_match(b"WARN retrying"));
        assert!(!filter.is_match(b"INFO started"));
        assert!(!filter.is_match(b"xERROR "));
        assert!(!filter.is_match(b""));
    }

    #[test]
    fn test_unanchored() {
        let filter = Filter::new("timeout").unwrap();
        assert!(filter.is_match(b"request 42: timeout after 30s"));
    }

    #[test]
    fn test_non_utf8_payload() {
        let filter = Filter::new("abc").unwrap();
        assert!(!filter.is_match(&[0xff, 0xfe, 0x00]));
        assert!(filter.is_match(&[0xff, b'a', b'b', b'c']));
    }

    #[test]
    fn test_invalid_pattern() {
        assert!(matches!(Filter::new("(unclosed"), Err(ConfigErr::InvalidFilter(_))));
    }
}
