//! Character alphabets for random selection.
//!
//! A [`Charset`] is an ordered sequence of characters eligible for uniform
//! sampling. Flag-built charsets are deterministic for a given flag set, so
//! output is reproducible under an injected seeded entropy source. Custom
//! literal charsets keep duplicates: repeated characters bias the distribution
//! toward themselves, which is intentional passthrough.

use std::collections::HashSet;

use crate::error::{GenError, Result};

const UPPERCASE: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const LOWERCASE: &str = "abcdefghijklmnopqrstuvwxyz";
const DIGITS: &str = "0123456789";
const HEX: &str = "0123456789abcdef";

/// An ordered character alphabet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Charset {
    chars: Vec<char>,
}

impl Charset {
    /// Build a charset from semantic flags and an exclusion set.
    ///
    /// The base alphabet is 26 Latin letters in a single case per `uppercase`;
    /// digits 0-9 are appended when `include_digits` is set. Excluded
    /// characters are removed with the relative order of the remainder
    /// preserved.
    ///
    /// # Errors
    ///
    /// Returns [`GenError::EmptyCharset`] if nothing remains after exclusion.
    pub fn build(uppercase: bool, include_digits: bool, exclude: &HashSet<char>) -> Result<Self> {
        let mut base = String::from(if uppercase { UPPERCASE } else { LOWERCASE });
        if include_digits {
            base.push_str(DIGITS);
        }

        let chars: Vec<char> = base.chars().filter(|c| !exclude.contains(c)).collect();

        if chars.is_empty() {
            return Err(GenError::EmptyCharset);
        }

        Ok(Self { chars })
    }

    /// Resolve a named preset or treat the argument as a literal alphabet.
    ///
    /// Presets: `alnum` (A-Z a-z 0-9), `alpha` (A-Z a-z), `numeric` (0-9),
    /// `hex` (0-9 a-f). Anything else is a custom alphabet used verbatim,
    /// duplicates included.
    ///
    /// # Errors
    ///
    /// Returns [`GenError::EmptyCharset`] for an empty custom literal.
    pub fn resolve(name_or_literal: &str) -> Result<Self> {
        let chars: Vec<char> = match name_or_literal {
            "alnum" => format!("{UPPERCASE}{LOWERCASE}{DIGITS}").chars().collect(),
            "alpha" => format!("{UPPERCASE}{LOWERCASE}").chars().collect(),
            "numeric" => DIGITS.chars().collect(),
            "hex" => HEX.chars().collect(),
            custom => custom.chars().collect(),
        };

        if chars.is_empty() {
            return Err(GenError::EmptyCharset);
        }

        Ok(Self { chars })
    }

    /// Number of characters (counting duplicates) in this charset.
    #[must_use]
    pub fn len(&self) -> usize {
        self.chars.len()
    }

    /// Check whether the charset is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    /// Get the character at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= self.len()`; callers sample indices from
    /// `[0, len)`.
    #[must_use]
    pub fn char_at(&self, index: usize) -> char {
        self.chars[index]
    }

    /// Check membership.
    #[must_use]
    pub fn contains(&self, c: char) -> bool {
        self.chars.contains(&c)
    }

    /// The characters in order.
    #[must_use]
    pub fn as_slice(&self) -> &[char] {
        &self.chars
    }
}

impl std::fmt::Display for Charset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for c in &self.chars {
            write!(f, "{c}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn exclude(chars: &[char]) -> HashSet<char> {
        chars.iter().copied().collect()
    }

    #[test]
    fn test_build_confusable_exclusion() {
        // Uppercase + digits minus the classic confusables.
        let charset = Charset::build(true, true, &exclude(&['0', 'O', '1', 'I'])).unwrap();
        assert_eq!(charset.to_string(), "ABCDEFGHJKLMNPQRSTUVWXYZ23456789");
        assert_eq!(charset.len(), 32);
    }

    #[test]
    fn test_build_lowercase_without_digits() {
        let charset = Charset::build(false, false, &HashSet::new()).unwrap();
        assert_eq!(charset.to_string(), "abcdefghijklmnopqrstuvwxyz");
    }

    #[test]
    fn test_build_preserves_order_after_exclusion() {
        let charset = Charset::build(false, true, &exclude(&['b', '5'])).unwrap();
        assert_eq!(charset.to_string(), "acdefghijklmnopqrstuvwxyz012346789");
    }

    #[test]
    fn test_build_empty_after_exclusion() {
        let all_lower: HashSet<char> = LOWERCASE.chars().collect();
        let result = Charset::build(false, false, &all_lower);
        assert!(matches!(result, Err(GenError::EmptyCharset)));
    }

    #[test]
    fn test_resolve_presets() {
        assert_eq!(Charset::resolve("alnum").unwrap().len(), 62);
        assert_eq!(Charset::resolve("alpha").unwrap().len(), 52);
        assert_eq!(Charset::resolve("numeric").unwrap().to_string(), "0123456789");
        assert_eq!(Charset::resolve("hex").unwrap().to_string(), "0123456789abcdef");
    }

    #[test]
    fn test_resolve_alnum_order() {
        let alnum = Charset::resolve("alnum").unwrap();
        assert_eq!(alnum.char_at(0), 'A');
        assert_eq!(alnum.char_at(26), 'a');
        assert_eq!(alnum.char_at(52), '0');
    }

    #[test]
    fn test_resolve_custom_literal_keeps_duplicates() {
        let charset = Charset::resolve("aab").unwrap();
        assert_eq!(charset.len(), 3);
        assert_eq!(charset.to_string(), "aab");
    }

    #[test]
    fn test_resolve_empty_custom_literal() {
        assert!(matches!(Charset::resolve(""), Err(GenError::EmptyCharset)));
    }
}
