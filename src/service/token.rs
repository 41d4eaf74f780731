//! Security token issuance.
//!
//! Two surfaces: `token` for alphanumeric/hex security tokens (optionally
//! bound to an action context through a one-way hash) and `magic_token` for
//! magic-link records with expiration metadata.
//!
//! Token material comes from the secure entropy source; when that source
//! reports unavailability, issuance degrades to weak password-style material
//! pushed through SHA-256. The degraded path keeps the output format but not
//! the entropy guarantee, and is logged on every engagement.

use std::sync::Arc;

use chrono::Utc;
use sha2::{Digest, Sha256};
use tracing::warn;

use crate::config::TokenConfig;
use crate::domain::{TokenFormat, TokenRecord};
use crate::error::{GenError, Result};
use crate::random::RandomSource;
use crate::service::nonce::BindingProvider;
use crate::service::strings::StringGenerator;

/// Minimum security token length in characters.
pub const MIN_TOKEN_LENGTH: usize = 8;

/// Weak material drawn for the degraded derivation, in characters.
const FALLBACK_MATERIAL_LENGTH: usize = 64;

/// Issues security tokens and magic-link records.
pub struct TokenIssuer {
    strings: StringGenerator,
    random: RandomSource,
    /// Binding collaborator for action-bound tokens.
    nonces: Arc<dyn BindingProvider>,
    /// Process-wide secret mixed into bound tokens.
    secret: String,
    /// Default random byte count for magic tokens.
    magic_token_length: usize,
}

impl TokenIssuer {
    /// Create a new token issuer.
    #[must_use]
    pub fn new(
        random: RandomSource,
        nonces: Arc<dyn BindingProvider>,
        config: &TokenConfig,
    ) -> Self {
        Self {
            strings: StringGenerator::new(random.clone()),
            random,
            nonces,
            secret: config.secret.clone(),
            magic_token_length: config.magic_token_length,
        }
    }

    /// Generate a security token of `length` characters.
    ///
    /// - `TokenFormat::Hex`: lowercase hex over secure random bytes.
    /// - `TokenFormat::Alnum` without `binding_key`: a secure alphanumeric
    ///   string.
    /// - `TokenFormat::Alnum` with `binding_key`: a secure alphanumeric base
    ///   mixed with a one-time nonce for the key, the current time, and the
    ///   process secret through SHA-256, so the token cannot be replayed
    ///   against a different action. The result is the first `length`
    ///   characters of the digest stream.
    ///
    /// # Errors
    ///
    /// Returns [`GenError::InvalidRange`] for `length < 8`.
    pub fn token(
        &self,
        length: usize,
        binding_key: Option<&str>,
        format: TokenFormat,
    ) -> Result<String> {
        if length < MIN_TOKEN_LENGTH {
            return Err(GenError::InvalidRange(format!(
                "token length must be at least {MIN_TOKEN_LENGTH}"
            )));
        }

        match format {
            TokenFormat::Hex => self.hex_token(length),
            TokenFormat::Alnum => match binding_key {
                Some(key) => self.bound_token(length, key),
                None => self.strings.generate(length, "alnum", true),
            },
        }
    }

    /// Generate a magic-link token record with the configured byte length.
    ///
    /// # Errors
    ///
    /// Propagates generation failures; see [`Self::magic_token_with_length`].
    pub fn magic_token(&self, expires_in: u64, context: &str) -> Result<TokenRecord> {
        self.magic_token_with_length(expires_in, context, self.magic_token_length)
    }

    /// Generate a magic-link token record.
    ///
    /// The token is `length` secure random bytes hex-encoded (`2 * length`
    /// characters). `expires_at` is `now + expires_in` as a UTC unix
    /// timestamp; `expires` is the same instant formatted
    /// `YYYY-MM-DD HH:MM:SS`. `context` is passed through unvalidated.
    ///
    /// # Errors
    ///
    /// Returns [`GenError::InvalidRange`] for zero `length`.
    pub fn magic_token_with_length(
        &self,
        expires_in: u64,
        context: &str,
        length: usize,
    ) -> Result<TokenRecord> {
        if length == 0 {
            return Err(GenError::InvalidRange(
                "token byte length must be at least 1".to_string(),
            ));
        }

        let token = match self.random.bytes(length) {
            Ok(bytes) => hex_encode(&bytes),
            Err(GenError::SecureSourceUnavailable) => {
                warn!(context, "secure byte generation unavailable, deriving magic token from weak material");
                let material = self
                    .strings
                    .generate(FALLBACK_MATERIAL_LENGTH, "alnum", false)?;
                digest_chain(material.as_bytes(), length * 2)
            }
            Err(e) => return Err(e),
        };

        let now = Utc::now();
        let expires_dt = now
            + chrono::Duration::from_std(std::time::Duration::from_secs(expires_in))
                .unwrap_or_default();

        Ok(TokenRecord {
            token,
            expires: expires_dt.format("%Y-%m-%d %H:%M:%S").to_string(),
            expires_at: expires_dt.timestamp(),
            context: context.to_string(),
        })
    }

    /// Hex token over secure random bytes.
    fn hex_token(&self, length: usize) -> Result<String> {
        match self.random.bytes(length.div_ceil(2)) {
            Ok(bytes) => {
                let mut token = hex_encode(&bytes);
                token.truncate(length);
                Ok(token)
            }
            Err(GenError::SecureSourceUnavailable) => {
                warn!(length, "secure byte generation unavailable, deriving hex token from weak material");
                let material = self
                    .strings
                    .generate(FALLBACK_MATERIAL_LENGTH, "alnum", false)?;
                Ok(digest_chain(material.as_bytes(), length))
            }
            Err(e) => Err(e),
        }
    }

    /// Token bound to an action context.
    fn bound_token(&self, length: usize, binding_key: &str) -> Result<String> {
        let base = self.strings.generate(length, "alnum", true)?;
        let nonce = self.nonces.create_binding(binding_key)?;
        let issued_at = Utc::now().timestamp();

        let mut hasher = Sha256::new();
        hasher.update(base.as_bytes());
        hasher.update(nonce.as_bytes());
        hasher.update(issued_at.to_le_bytes());
        hasher.update(self.secret.as_bytes());
        let seed = hasher.finalize();

        Ok(digest_chain(&seed, length))
    }
}

/// Lowercase-hex encode a byte slice.
fn hex_encode(bytes: &[u8]) -> String {
    use std::fmt::Write;

    bytes.iter().fold(String::with_capacity(bytes.len() * 2), |mut out, b| {
        let _ = write!(out, "{b:02x}");
        out
    })
}

/// Hex digest stream of arbitrary length.
///
/// SHA-256 over `seed || block index`, concatenated until `length` hex
/// characters are available, then truncated. Extends the one-way derivation
/// past a single digest without reusing output.
fn digest_chain(seed: &[u8], length: usize) -> String {
    let mut out = String::with_capacity(length + 64);
    let mut block: u32 = 0;

    while out.len() < length {
        let mut hasher = Sha256::new();
        hasher.update(seed);
        hasher.update(block.to_le_bytes());
        out.push_str(&hex_encode(&hasher.finalize()));
        block += 1;
    }

    out.truncate(length);
    out
}
