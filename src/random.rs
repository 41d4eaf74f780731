//! Two-tier uniform random sampling.
//!
//! [`RandomSource`] draws unbiased values in `[0, n)` from an injectable
//! [`EntropySource`] (the platform CSPRNG by default). If the entropy source
//! reports a hard failure, sampling falls back to the always-available weak
//! generator: uniform, but not entropy-source backed. The fallback exists
//! purely for availability and every engagement is logged.
//!
//! The secure path uses rejection sampling over 32-bit draws, so there is no
//! modulo bias for ranges that do not divide the draw space.

use std::sync::Arc;

use rand::Rng;
use rand::TryRngCore;
use rand::rngs::OsRng;
use tracing::warn;

use crate::error::{GenError, Result};

/// Abstraction over a cryptographically secure byte source.
///
/// Implementations must either fill the buffer completely or report
/// [`GenError::SecureSourceUnavailable`]. Tests inject failing or seeded
/// sources to exercise the fallback and reproducibility paths.
pub trait EntropySource: Send + Sync {
    /// Fill `buf` with cryptographically secure random bytes.
    ///
    /// # Errors
    ///
    /// Returns [`GenError::SecureSourceUnavailable`] on platform entropy
    /// failure.
    fn fill(&self, buf: &mut [u8]) -> Result<()>;
}

/// Operating-system entropy source.
pub struct OsEntropy;

impl EntropySource for OsEntropy {
    fn fill(&self, buf: &mut [u8]) -> Result<()> {
        let mut rng = OsRng;
        rng.try_fill_bytes(buf)
            .map_err(|_| GenError::SecureSourceUnavailable)
    }
}

/// Uniform sampler over an injectable entropy source.
#[derive(Clone)]
pub struct RandomSource {
    entropy: Arc<dyn EntropySource>,
}

impl Default for RandomSource {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomSource {
    /// Number of values representable by one 32-bit draw.
    const DRAW_SPACE: u64 = 1 << 32;

    /// Create a sampler backed by the operating-system CSPRNG.
    #[must_use]
    pub fn new() -> Self {
        Self::with_entropy(Arc::new(OsEntropy))
    }

    /// Create a sampler over a custom entropy source.
    #[must_use]
    pub fn with_entropy(entropy: Arc<dyn EntropySource>) -> Self {
        Self { entropy }
    }

    /// Draw a uniformly distributed value in `[0, n)`.
    ///
    /// Prefers the secure entropy source; switches to the weak sampler only
    /// when the source reports unavailability.
    ///
    /// # Errors
    ///
    /// Returns [`GenError::InvalidRange`] if `n` is zero or exceeds the
    /// 32-bit draw space.
    pub fn uniform(&self, n: usize) -> Result<usize> {
        validate_range(n)?;

        match self.uniform_secure(n) {
            Err(GenError::SecureSourceUnavailable) => {
                warn!(n, "secure entropy source unavailable, using weak sampler");
                self.uniform_weak(n)
            }
            other => other,
        }
    }

    /// Draw from the weak sampler directly.
    ///
    /// Uniform over `[0, n)` but not entropy-source backed. This is the
    /// caller-opt-in `secure = false` path, not an error path.
    ///
    /// # Errors
    ///
    /// Returns [`GenError::InvalidRange`] if `n` is zero or exceeds the
    /// 32-bit draw space.
    pub fn uniform_weak(&self, n: usize) -> Result<usize> {
        validate_range(n)?;
        Ok(rand::rng().random_range(0..n))
    }

    /// Fill a fresh buffer with `n` secure random bytes.
    ///
    /// No fallback: callers that can degrade (token issuance) choose their
    /// own derivation on failure.
    ///
    /// # Errors
    ///
    /// Returns [`GenError::InvalidRange`] for `n == 0` and
    /// [`GenError::SecureSourceUnavailable`] on entropy failure.
    pub fn bytes(&self, n: usize) -> Result<Vec<u8>> {
        if n == 0 {
            return Err(GenError::InvalidRange(
                "byte count must be at least 1".to_string(),
            ));
        }

        let mut buf = vec![0u8; n];
        self.entropy.fill(&mut buf)?;
        Ok(buf)
    }

    /// Rejection-sampled draw from the entropy source.
    fn uniform_secure(&self, n: usize) -> Result<usize> {
        let n = n as u64;
        // Largest multiple of n within the draw space; draws at or above it
        // would bias the low residues and are rejected.
        let limit = Self::DRAW_SPACE - (Self::DRAW_SPACE % n);

        loop {
            let mut buf = [0u8; 4];
            self.entropy.fill(&mut buf)?;
            let draw = u64::from(u32::from_le_bytes(buf));

            if draw < limit {
                #[allow(clippy::cast_possible_truncation)]
                return Ok((draw % n) as usize);
            }
        }
    }
}

fn validate_range(n: usize) -> Result<()> {
    if n == 0 {
        return Err(GenError::InvalidRange(
            "range must be at least 1".to_string(),
        ));
    }
    if n as u64 > RandomSource::DRAW_SPACE {
        return Err(GenError::InvalidRange(format!(
            "range {n} exceeds the 32-bit draw space"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use parking_lot::Mutex;
    use rand::rngs::StdRng;
    use rand::{RngCore, SeedableRng};

    /// Entropy source that always reports unavailability.
    pub struct FailingEntropy;

    impl EntropySource for FailingEntropy {
        fn fill(&self, _buf: &mut [u8]) -> Result<()> {
            Err(GenError::SecureSourceUnavailable)
        }
    }

    /// Deterministic entropy source for reproducibility tests.
    pub struct SeededEntropy(Mutex<StdRng>);

    impl SeededEntropy {
        pub fn new(seed: u64) -> Self {
            Self(Mutex::new(StdRng::seed_from_u64(seed)))
        }
    }

    impl EntropySource for SeededEntropy {
        fn fill(&self, buf: &mut [u8]) -> Result<()> {
            self.0.lock().fill_bytes(buf);
            Ok(())
        }
    }

    #[test]
    fn test_uniform_stays_in_range() {
        let random = RandomSource::new();

        for _ in 0..1_000 {
            let value = random.uniform(10).unwrap();
            assert!(value < 10);
        }
    }

    #[test]
    fn test_uniform_zero_range() {
        let random = RandomSource::new();
        assert!(matches!(random.uniform(0), Err(GenError::InvalidRange(_))));
        assert!(matches!(
            random.uniform_weak(0),
            Err(GenError::InvalidRange(_))
        ));
    }

    #[test]
    fn test_uniform_covers_all_outcomes() {
        let random = RandomSource::new();
        let mut counts = [0u32; 10];

        for _ in 0..20_000 {
            counts[random.uniform(10).unwrap()] += 1;
        }

        // Expected 2000 per bucket; bounds are > 5 standard deviations wide.
        for (outcome, count) in counts.iter().enumerate() {
            assert!(
                (1700..=2300).contains(count),
                "outcome {outcome} occurred {count} times"
            );
        }
    }

    #[test]
    fn test_fallback_on_unavailable_source() {
        let random = RandomSource::with_entropy(Arc::new(FailingEntropy));

        // Sampling must still succeed, via the weak path.
        for _ in 0..100 {
            let value = random.uniform(32).unwrap();
            assert!(value < 32);
        }

        // Raw byte requests surface the failure instead.
        assert!(matches!(
            random.bytes(16),
            Err(GenError::SecureSourceUnavailable)
        ));
    }

    #[test]
    fn test_seeded_source_is_reproducible() {
        let a = RandomSource::with_entropy(Arc::new(SeededEntropy::new(42)));
        let b = RandomSource::with_entropy(Arc::new(SeededEntropy::new(42)));

        let draws_a: Vec<usize> = (0..50).map(|_| a.uniform(97).unwrap()).collect();
        let draws_b: Vec<usize> = (0..50).map(|_| b.uniform(97).unwrap()).collect();
        assert_eq!(draws_a, draws_b);
    }

    #[test]
    fn test_bytes_length_and_validation() {
        let random = RandomSource::new();

        assert_eq!(random.bytes(32).unwrap().len(), 32);
        assert!(matches!(random.bytes(0), Err(GenError::InvalidRange(_))));
    }
}
