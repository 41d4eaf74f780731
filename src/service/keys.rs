//! Key assembly: UUIDs, prefixed keys, URL-safe short IDs.
//!
//! Thin string assembly over the generation engine, kept together so the
//! branded surfaces (API keys, short links) share one home.

use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use tracing::warn;
use uuid::Uuid;

use crate::error::{GenError, Result};
use crate::random::RandomSource;
use crate::service::strings::StringGenerator;

/// URL-safe base64 alphabet, for the degraded short-id path.
const URL_SAFE_CHARSET: &str =
    "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789-_";

/// Assembles UUIDs, prefixed keys, and short IDs.
#[derive(Clone)]
pub struct KeyMinter {
    strings: StringGenerator,
    random: RandomSource,
}

impl KeyMinter {
    /// Create a new key minter.
    #[must_use]
    pub fn new(random: RandomSource) -> Self {
        Self {
            strings: StringGenerator::new(random.clone()),
            random,
        }
    }

    /// A hyphenated UUID v4.
    #[must_use]
    pub fn uuid(&self) -> String {
        Uuid::new_v4().to_string()
    }

    /// A UUID v4 as 32 hex characters without hyphens.
    #[must_use]
    pub fn uuid_compact(&self) -> String {
        Uuid::new_v4().simple().to_string()
    }

    /// A key assembled as `prefix` + `length` secure alphanumeric characters.
    ///
    /// The prefix is opaque literal text (e.g. `sk_`), never charset-filtered.
    ///
    /// # Errors
    ///
    /// Returns [`GenError::InvalidRange`] for zero `length`.
    pub fn prefixed(&self, prefix: &str, length: usize) -> Result<String> {
        let body = self.strings.generate(length, "alnum", true)?;
        Ok(format!("{prefix}{body}"))
    }

    /// A URL-safe short ID of `length` characters.
    ///
    /// Secure random bytes encoded as unpadded URL-safe base64 and truncated;
    /// degrades to uniform draws from the same alphabet if the entropy source
    /// is unavailable.
    ///
    /// # Errors
    ///
    /// Returns [`GenError::InvalidRange`] for zero `length`.
    pub fn short_id(&self, length: usize) -> Result<String> {
        if length == 0 {
            return Err(GenError::InvalidRange(
                "length must be at least 1".to_string(),
            ));
        }

        // 3 bytes encode to 4 characters; over-provision and trim.
        match self.random.bytes(length.div_ceil(4) * 3) {
            Ok(bytes) => {
                let mut id = URL_SAFE_NO_PAD.encode(bytes);
                id.truncate(length);
                Ok(id)
            }
            Err(GenError::SecureSourceUnavailable) => {
                warn!(length, "secure byte generation unavailable, drawing short id from weak sampler");
                self.strings.generate(length, URL_SAFE_CHARSET, false)
            }
            Err(e) => Err(e),
        }
    }
}
