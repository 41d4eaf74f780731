//! Code composition options.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::{GenError, Result};

/// Configuration for one [`code`](crate::service::CodeComposer::code) call.
///
/// Immutable value object with every default enumerated: a single 4-character
/// uppercase alphanumeric segment with the confusable characters `0 O 1 I`
/// excluded, no separator, no prefix/suffix.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CodeOptions {
    /// Characters per segment.
    #[serde(default = "default_length")]
    pub length: usize,

    /// Number of segments.
    #[serde(default = "default_segments")]
    pub segments: usize,

    /// Text joined between segments; empty concatenates directly.
    #[serde(default)]
    pub separator: String,

    /// Use uppercase letters in the working charset.
    #[serde(default = "default_flag")]
    pub uppercase: bool,

    /// Include digits 0-9 in the working charset.
    #[serde(default = "default_flag")]
    pub numbers: bool,

    /// Characters removed from the working charset.
    #[serde(default = "default_exclude")]
    pub exclude: HashSet<char>,

    /// Literal text prepended to the code; never charset-filtered.
    #[serde(default)]
    pub prefix: String,

    /// Literal text appended to the code; never charset-filtered.
    #[serde(default)]
    pub suffix: String,
}

const fn default_length() -> usize {
    4
}

const fn default_segments() -> usize {
    1
}

const fn default_flag() -> bool {
    true
}

fn default_exclude() -> HashSet<char> {
    ['0', 'O', '1', 'I'].into_iter().collect()
}

impl Default for CodeOptions {
    fn default() -> Self {
        Self {
            length: default_length(),
            segments: default_segments(),
            separator: String::new(),
            uppercase: true,
            numbers: true,
            exclude: default_exclude(),
            prefix: String::new(),
            suffix: String::new(),
        }
    }
}

impl CodeOptions {
    /// Validate the options.
    ///
    /// # Errors
    ///
    /// Returns [`GenError::InvalidRange`] for zero `length` or `segments`.
    pub fn validate(&self) -> Result<()> {
        if self.length == 0 {
            return Err(GenError::InvalidRange(
                "length must be at least 1".to_string(),
            ));
        }
        if self.segments == 0 {
            return Err(GenError::InvalidRange(
                "segments must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = CodeOptions::default();
        assert_eq!(options.length, 4);
        assert_eq!(options.segments, 1);
        assert_eq!(options.separator, "");
        assert!(options.uppercase);
        assert!(options.numbers);
        assert_eq!(
            options.exclude,
            ['0', 'O', '1', 'I'].into_iter().collect::<HashSet<char>>()
        );
        assert!(options.validate().is_ok());
    }

    #[test]
    fn test_validation_rejects_zero_fields() {
        let options = CodeOptions {
            length: 0,
            ..Default::default()
        };
        assert!(matches!(options.validate(), Err(GenError::InvalidRange(_))));

        let options = CodeOptions {
            segments: 0,
            ..Default::default()
        };
        assert!(matches!(options.validate(), Err(GenError::InvalidRange(_))));
    }

    #[test]
    fn test_deserialize_fills_defaults() {
        let options: CodeOptions = serde_json::from_str("{}").unwrap();
        assert_eq!(options.length, 4);
        assert!(options.exclude.contains(&'O'));

        let options: CodeOptions =
            serde_json::from_str(r#"{"length": 6, "segments": 3, "separator": "-"}"#).unwrap();
        assert_eq!(options.length, 6);
        assert_eq!(options.segments, 3);
        assert_eq!(options.separator, "-");
    }
}
