//! One-time action-binding nonces.
//!
//! The binding collaborator consumed by bound-token issuance: each
//! `create_binding` call mints an opaque one-time value tied to an action
//! label, and `consume` redeems it exactly once.

use std::collections::HashSet;

use dashmap::DashMap;

use crate::error::Result;
use crate::random::RandomSource;
use crate::service::strings::StringGenerator;

/// Nonce length in hex characters.
const NONCE_LENGTH: usize = 32;

/// One-time value provider keyed by action label.
pub trait BindingProvider: Send + Sync {
    /// Mint an opaque one-time value for `action`.
    ///
    /// # Errors
    ///
    /// Returns an error if nonce material cannot be generated.
    fn create_binding(&self, action: &str) -> Result<String>;

    /// Redeem a previously minted value. Returns `true` exactly once per
    /// issued nonce.
    fn consume(&self, action: &str, nonce: &str) -> bool;
}

/// In-memory nonce service.
pub struct NonceService {
    strings: StringGenerator,
    /// Outstanding nonces by action label.
    issued: DashMap<String, HashSet<String>>,
}

impl NonceService {
    /// Create a new nonce service.
    #[must_use]
    pub fn new(random: RandomSource) -> Self {
        Self {
            strings: StringGenerator::new(random),
            issued: DashMap::new(),
        }
    }

    /// Number of outstanding nonces for an action.
    #[must_use]
    pub fn outstanding(&self, action: &str) -> usize {
        self.issued.get(action).map_or(0, |set| set.len())
    }
}

impl BindingProvider for NonceService {
    fn create_binding(&self, action: &str) -> Result<String> {
        let nonce = self.strings.generate(NONCE_LENGTH, "hex", true)?;
        self.issued
            .entry(action.to_string())
            .or_default()
            .insert(nonce.clone());
        Ok(nonce)
    }

    fn consume(&self, action: &str, nonce: &str) -> bool {
        self.issued
            .get_mut(action)
            .is_some_and(|mut set| set.remove(nonce))
    }
}
