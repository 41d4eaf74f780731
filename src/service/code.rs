//! Professional code composition.
//!
//! Builds multi-segment codes like `SAVE-K3QF-9XNM` from a working charset,
//! segment layout, and opaque branding text.

use crate::charset::Charset;
use crate::domain::CodeOptions;
use crate::error::Result;
use crate::service::strings::StringGenerator;

/// Composes multi-segment codes over [`CodeOptions`].
#[derive(Clone)]
pub struct CodeComposer {
    strings: StringGenerator,
}

impl CodeComposer {
    /// Create a new code composer.
    #[must_use]
    pub const fn new(strings: StringGenerator) -> Self {
        Self { strings }
    }

    /// Generate a code.
    ///
    /// The working charset is letters (case per `uppercase`) plus digits when
    /// `numbers` is set, minus the `exclude` set. Each of the `segments`
    /// substrings is `length` independent uniform draws; segments are joined
    /// with `separator` and wrapped in `prefix`/`suffix`, which are opaque
    /// literal text and never charset-filtered.
    ///
    /// Output length is always
    /// `prefix + segments * length + (segments - 1) * separator + suffix`.
    ///
    /// # Errors
    ///
    /// Returns [`GenError::InvalidRange`](crate::error::GenError::InvalidRange)
    /// for zero length/segments and
    /// [`GenError::EmptyCharset`](crate::error::GenError::EmptyCharset) when
    /// the exclusions empty the working charset.
    pub fn code(&self, options: &CodeOptions) -> Result<String> {
        options.validate()?;

        let charset = Charset::build(options.uppercase, options.numbers, &options.exclude)?;

        let mut segments = Vec::with_capacity(options.segments);
        for _ in 0..options.segments {
            segments.push(self.strings.from_charset(options.length, &charset, true)?);
        }

        Ok(format!(
            "{}{}{}",
            options.prefix,
            segments.join(options.separator.as_str()),
            options.suffix
        ))
    }
}
