//! Decoded SVG markup type.

use std::borrow::Borrow;
use std::sync::Arc;

/// Decoded SVG markup (trusted passthrough).
///
/// Invariants:
/// - Always the verbatim result of a successful percent-decode
/// - Never re-encoded or validated as XML
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SvgMarkup(Arc<str>);

impl SvgMarkup {
    /// Get the markup as a string slice.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Get the markup as raw bytes (what download writes to disk).
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }

    /// Markup length in bytes.
    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check whether the markup is empty (decoded from an empty payload).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Display for SvgMarkup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for SvgMarkup {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for SvgMarkup {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for SvgMarkup {
    fn from(s: &str) -> Self {
        Self(Arc::from(s))
    }
}

impl From<String> for SvgMarkup {
    fn from(s: String) -> Self {
        Self(Arc::from(s))
    }
}

impl PartialEq<str> for SvgMarkup {
    fn eq(&self, other: &str) -> bool {
        self.0.as_ref() == other
    }
}

impl PartialEq<&str> for SvgMarkup {
    fn eq(&self, other: &&str) -> bool {
        self.0.as_ref() == *other
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_is_verbatim() {
        let markup = SvgMarkup::from("<svg viewBox='0 0 1 1'/>");
        assert_eq!(format!("{}", markup), "<svg viewBox='0 0 1 1'/>");
    }

    #[test]
    fn test_bytes_match_str() {
        let markup = SvgMarkup::from("<svg/>");
        assert_eq!(markup.as_bytes(), markup.as_str().as_bytes());
        assert_eq!(markup.len(), 6);
        assert!(!markup.is_empty());
    }

    #[test]
    fn test_clone_is_cheap_and_equal() {
        let markup = SvgMarkup::from("<svg/>");
        let clone = markup.clone();
        assert_eq!(markup, clone);
        assert_eq!(clone, "<svg/>");
    }
}
