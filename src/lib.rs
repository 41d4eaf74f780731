//! # Codemint
//!
//! A generation toolkit producing identifiers, codes, tokens, and slugs for
//! application use:
//!
//! - **Codes**: multi-segment professional codes like `SAVE-K3QF-9XNM`
//! - **Strings**: uniform random strings over named or custom charsets
//! - **Tokens**: alphanumeric/hex security tokens, action-bound tokens, and
//!   magic-link records with expiration metadata
//! - **Sequences**: monotonic per-context counters behind a storage trait
//! - **Slugs & keys**: uniqueness-probed slugs, UUIDs, prefixed keys, and
//!   URL-safe short IDs
//!
//! Generation is stateless and safe to call concurrently from any number of
//! tasks; randomness comes from the platform CSPRNG with an availability
//! fallback. The sequence counter is the one piece of shared mutable state
//! and lives behind [`storage::CounterStore`], whose atomic
//! fetch-and-increment contract keeps concurrent callers duplicate-free.
//!
//! ## Usage
//!
//! ```no_run
//! use codemint::config::MintConfig;
//! use codemint::{Codemint, CodeOptions, TokenFormat};
//!
//! # async fn demo() -> codemint::Result<()> {
//! let mint = Codemint::from_config(MintConfig::default()).await?;
//!
//! let coupon = mint.codes.code(&CodeOptions {
//!     segments: 3,
//!     separator: "-".to_string(),
//!     ..Default::default()
//! })?;
//! let session = mint.tokens.token(32, None, TokenFormat::Hex)?;
//! let invoice = mint.sequences.sequential_id("invoices", "INV-", 6).await?;
//! # Ok(())
//! # }
//! ```

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![forbid(unsafe_code)]

pub mod charset;
pub mod config;
pub mod domain;
pub mod error;
pub mod random;
pub mod service;
pub mod storage;

use std::sync::Arc;

use tracing::debug;

use crate::config::MintConfig;
use crate::random::RandomSource;
use crate::service::{
    BindingProvider, CodeComposer, KeyMinter, NonceService, SequenceService, SlugService,
    StringGenerator, TokenIssuer,
};
use crate::storage::create_store;
use crate::storage::traits::CounterStore;

pub use crate::charset::Charset;
pub use crate::domain::{CodeOptions, TokenFormat, TokenRecord};
pub use crate::error::{GenError, Result};

/// The assembled toolkit: every generation service wired over one shared
/// random source and counter store.
pub struct Codemint {
    /// Toolkit configuration.
    config: Arc<MintConfig>,
    /// Counter store backend.
    store: Arc<dyn CounterStore>,
    /// Random string generation.
    pub strings: StringGenerator,
    /// Multi-segment code composition.
    pub codes: CodeComposer,
    /// Security token issuance.
    pub tokens: TokenIssuer,
    /// Monotonic sequence identifiers.
    pub sequences: SequenceService,
    /// Slug normalization and uniqueness probing.
    pub slugs: SlugService,
    /// UUIDs, prefixed keys, short IDs.
    pub keys: KeyMinter,
    /// One-time binding nonces (shared with `tokens`).
    pub nonces: Arc<NonceService>,
}

impl Codemint {
    /// Assemble the toolkit over an existing counter store.
    #[must_use]
    pub fn new(config: Arc<MintConfig>, store: Arc<dyn CounterStore>) -> Self {
        Self::with_random(config, store, RandomSource::new())
    }

    /// Assemble the toolkit with a custom random source.
    ///
    /// Tests inject seeded or failing entropy here; production callers use
    /// [`Codemint::new`].
    #[must_use]
    pub fn with_random(
        config: Arc<MintConfig>,
        store: Arc<dyn CounterStore>,
        random: RandomSource,
    ) -> Self {
        let strings = StringGenerator::new(random.clone());
        let codes = CodeComposer::new(strings.clone());
        let nonces = Arc::new(NonceService::new(random.clone()));
        let binding: Arc<dyn BindingProvider> = nonces.clone();
        let tokens = TokenIssuer::new(random.clone(), binding, &config.token);
        let sequences = SequenceService::new(Arc::clone(&store), &config.sequence);
        let keys = KeyMinter::new(random);

        Self {
            config,
            store,
            strings,
            codes,
            tokens,
            sequences,
            slugs: SlugService::new(),
            keys,
            nonces,
        }
    }

    /// Load the counter store described by `config` and assemble the toolkit.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be initialized or fails its
    /// health check.
    pub async fn from_config(config: MintConfig) -> Result<Self> {
        let config = Arc::new(config);
        let store = create_store(&config.storage).await?;
        debug!(backend = store.backend_name(), "Counter store initialized");

        Ok(Self::new(config, store))
    }

    /// The toolkit configuration.
    #[must_use]
    pub fn config(&self) -> &MintConfig {
        &self.config
    }

    /// The counter store backing the sequence service.
    #[must_use]
    pub fn store(&self) -> Arc<dyn CounterStore> {
        Arc::clone(&self.store)
    }
}
