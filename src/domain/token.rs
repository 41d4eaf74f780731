//! Token formats and records.

use serde::{Deserialize, Serialize};

/// Output format for security tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenFormat {
    /// Mixed-case alphanumeric characters.
    #[default]
    Alnum,
    /// Lowercase hexadecimal characters.
    Hex,
}

impl std::fmt::Display for TokenFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Alnum => write!(f, "alnum"),
            Self::Hex => write!(f, "hex"),
        }
    }
}

/// Result of a `magic_token` call.
///
/// Created fresh per call and never mutated; the caller owns persistence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenRecord {
    /// The token string (hex, `2 * length` characters on the secure path).
    pub token: String,

    /// Expiration formatted as UTC `YYYY-MM-DD HH:MM:SS`.
    pub expires: String,

    /// Expiration as a unix timestamp (UTC seconds).
    pub expires_at: i64,

    /// Caller-supplied context label, passed through unvalidated.
    pub context: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_format_serde() {
        assert_eq!(serde_json::to_string(&TokenFormat::Alnum).unwrap(), r#""alnum""#);
        assert_eq!(serde_json::to_string(&TokenFormat::Hex).unwrap(), r#""hex""#);

        let format: TokenFormat = serde_json::from_str(r#""hex""#).unwrap();
        assert_eq!(format, TokenFormat::Hex);
    }

    #[test]
    fn test_token_record_roundtrip() {
        let record = TokenRecord {
            token: "ab12".to_string(),
            expires: "2026-08-07 12:00:00".to_string(),
            expires_at: 1_786_449_600,
            context: "login".to_string(),
        };

        let json = serde_json::to_string(&record).unwrap();
        let back: TokenRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back.token, record.token);
        assert_eq!(back.expires_at, record.expires_at);
        assert_eq!(back.context, "login");
    }
}
