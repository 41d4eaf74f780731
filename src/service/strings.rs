//! Random string generation.

use crate::charset::Charset;
use crate::error::{GenError, Result};
use crate::random::RandomSource;

/// Produces random strings drawn uniformly from a charset.
#[derive(Clone)]
pub struct StringGenerator {
    random: RandomSource,
}

impl StringGenerator {
    /// Create a new string generator.
    #[must_use]
    pub const fn new(random: RandomSource) -> Self {
        Self { random }
    }

    /// Generate a random string of `length` characters.
    ///
    /// `charset` is a preset name (`alnum`, `alpha`, `numeric`, `hex`) or a
    /// literal custom alphabet. Each character is an independent uniform draw
    /// with replacement, so repeats within the output are normal.
    /// `secure = false` opts into the weak sampler directly, a deliberate
    /// quality/performance tradeoff rather than an error path.
    ///
    /// # Errors
    ///
    /// Returns [`GenError::InvalidRange`] for zero `length` and
    /// [`GenError::EmptyCharset`] for an empty custom alphabet.
    pub fn generate(&self, length: usize, charset: &str, secure: bool) -> Result<String> {
        let charset = Charset::resolve(charset)?;
        self.from_charset(length, &charset, secure)
    }

    /// Generate a random string from an already-built charset.
    ///
    /// # Errors
    ///
    /// Returns [`GenError::InvalidRange`] for zero `length` and
    /// [`GenError::EmptyCharset`] for an empty charset.
    pub fn from_charset(&self, length: usize, charset: &Charset, secure: bool) -> Result<String> {
        if length == 0 {
            return Err(GenError::InvalidRange(
                "length must be at least 1".to_string(),
            ));
        }
        if charset.is_empty() {
            return Err(GenError::EmptyCharset);
        }

        let mut out = String::with_capacity(length);
        for _ in 0..length {
            let index = if secure {
                self.random.uniform(charset.len())?
            } else {
                self.random.uniform_weak(charset.len())?
            };
            out.push(charset.char_at(index));
        }

        Ok(out)
    }
}
