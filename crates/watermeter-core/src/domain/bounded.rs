//! Fixed-capacity text storage.
//!
//! The device keeps every configuration field in a statically sized buffer.
//! [`BoundedText`] models such a buffer: it holds at most `N` bytes of UTF-8
//! and every write truncates to that capacity instead of overflowing.
//!
//! Truncation always stops on a character boundary, so a multi-byte
//! character that does not fit entirely is dropped rather than split.  A
//! stored value never contains a NUL: copying stops at the first one.

use std::fmt;
use std::ops::Deref;

/// UTF-8 text with a hard capacity of `N` bytes.
#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub struct BoundedText<const N: usize>(heapless::String<N>);

impl<const N: usize> BoundedText<N> {
    /// Maximum number of bytes this field can hold.
    pub const CAPACITY: usize = N;

    /// Creates an empty field.
    pub const fn new() -> Self {
        Self(heapless::String::new())
    }

    /// Creates a field holding the longest prefix of `text` that fits.
    ///
    /// Returns the field and `true` when `text` had to be truncated.
    pub fn truncating(text: &str) -> (Self, bool) {
        let mut field = Self::new();
        let truncated = field.set(text);
        (field, truncated)
    }

    /// Replaces the content with the longest prefix of `text` that fits.
    ///
    /// Text after an embedded NUL is ignored, so the stored value is always
    /// what the device reads back as a C string.
    ///
    /// Returns `true` when `text` had to be truncated to fit the capacity.
    pub fn set(&mut self, text: &str) -> bool {
        self.0.clear();
        for ch in text.chars().take_while(|&ch| ch != '\0') {
            // heapless checks capacity before copying, so a rejected
            // multi-byte char leaves the buffer on a char boundary.
            if self.0.push(ch).is_err() {
                return true;
            }
        }
        false
    }

    /// Empties the field.
    pub fn clear(&mut self) {
        self.0.clear();
    }

    /// Returns the stored text.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl<const N: usize> Deref for BoundedText<N> {
    type Target = str;

    fn deref(&self) -> &str {
        self.as_str()
    }
}

impl<const N: usize> AsRef<str> for BoundedText<N> {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl<const N: usize> PartialEq<str> for BoundedText<N> {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other
    }
}

impl<const N: usize> PartialEq<&str> for BoundedText<N> {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

impl<const N: usize> fmt::Debug for BoundedText<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self.as_str(), f)
    }
}

impl<const N: usize> fmt::Display for BoundedText<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_field_is_empty() {
        let field = BoundedText::<8>::new();
        assert!(field.is_empty());
        assert_eq!(field, "");
    }

    #[test]
    fn test_set_within_capacity_stores_text_verbatim() {
        // Arrange
        let mut field = BoundedText::<8>::new();

        // Act
        let truncated = field.set("broker");

        // Assert
        assert!(!truncated);
        assert_eq!(field.as_str(), "broker");
    }

    #[test]
    fn test_set_exactly_capacity_is_not_truncated() {
        let mut field = BoundedText::<4>::new();
        assert!(!field.set("abcd"));
        assert_eq!(field, "abcd");
    }

    #[test]
    fn test_set_over_capacity_truncates_to_prefix() {
        // Arrange
        let mut field = BoundedText::<4>::new();

        // Act
        let truncated = field.set("abcdefgh");

        // Assert
        assert!(truncated);
        assert_eq!(field, "abcd");
        assert_eq!(field.len(), BoundedText::<4>::CAPACITY);
    }

    #[test]
    fn test_truncation_never_splits_a_multibyte_char() {
        // "é" is two bytes; only one byte of room remains after "abc".
        let (field, truncated) = BoundedText::<4>::truncating("abcé");
        assert!(truncated);
        assert_eq!(field, "abc");
    }

    #[test]
    fn test_set_stops_at_embedded_nul() {
        // Arrange
        let mut field = BoundedText::<8>::new();

        // Act
        let truncated = field.set("a\0b");

        // Assert
        assert!(!truncated);
        assert_eq!(field, "a");
        assert_eq!(field.len(), 1);
    }

    #[test]
    fn test_nul_beyond_capacity_still_reports_truncation() {
        let (field, truncated) = BoundedText::<2>::truncating("abc\0d");
        assert!(truncated);
        assert_eq!(field, "ab");
    }

    #[test]
    fn test_set_replaces_previous_content() {
        let mut field = BoundedText::<16>::new();
        field.set("first-value");
        field.set("x");
        assert_eq!(field, "x");
    }

    #[test]
    fn test_clear_empties_field() {
        let (mut field, _) = BoundedText::<8>::truncating("abc");
        field.clear();
        assert!(field.is_empty());
    }

    #[test]
    fn test_display_and_debug_render_the_text() {
        let (field, _) = BoundedText::<16>::truncating("host.tld");
        assert_eq!(field.to_string(), "host.tld");
        assert_eq!(format!("{field:?}"), "\"host.tld\"");
    }
}
