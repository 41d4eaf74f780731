//! Slug generation and uniqueness probing.
//!
//! Slug uniqueness is owned by the external content store; this service only
//! normalizes text and probes candidates through the [`ExistenceProbe`]
//! collaborator (post paths, taxonomy terms, usernames all sit behind the one
//! trait) until it finds a free one.

use async_trait::async_trait;

use crate::error::{GenError, Result, StorageResult};

/// Content-store uniqueness predicate.
#[async_trait]
pub trait ExistenceProbe: Send + Sync {
    /// Check whether `candidate` is already taken.
    async fn exists(&self, candidate: &str) -> StorageResult<bool>;
}

/// Slug normalization and uniqueness probing.
#[derive(Debug, Clone, Copy, Default)]
pub struct SlugService;

impl SlugService {
    /// Create a new slug service.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Normalize text into a slug.
    ///
    /// ASCII alphanumerics are kept lowercased; every other run of
    /// characters collapses to a single `-`; no leading or trailing dashes.
    #[must_use]
    pub fn slugify(text: &str) -> String {
        let mut slug = String::with_capacity(text.len());
        let mut pending_dash = false;

        for c in text.chars() {
            if c.is_ascii_alphanumeric() {
                if pending_dash && !slug.is_empty() {
                    slug.push('-');
                }
                pending_dash = false;
                slug.push(c.to_ascii_lowercase());
            } else {
                pending_dash = true;
            }
        }

        slug
    }

    /// Produce a slug for `text` that the probe reports as free.
    ///
    /// Probes the normalized base first, then `base-2`, `base-3`, … until a
    /// candidate is unclaimed.
    ///
    /// # Errors
    ///
    /// Returns [`GenError::InvalidRange`] when `text` normalizes to nothing,
    /// and propagates probe failures as [`GenError::Storage`].
    pub async fn unique_slug(&self, text: &str, probe: &dyn ExistenceProbe) -> Result<String> {
        let base = Self::slugify(text);
        if base.is_empty() {
            return Err(GenError::InvalidRange(
                "slug source text has no usable characters".to_string(),
            ));
        }

        if !probe.exists(&base).await? {
            return Ok(base);
        }

        let mut n: u64 = 2;
        loop {
            let candidate = format!("{base}-{n}");
            if !probe.exists(&candidate).await? {
                return Ok(candidate);
            }
            n += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use parking_lot::RwLock;
    use std::collections::HashSet;

    /// Probe backed by a set of taken slugs.
    struct TakenSet(RwLock<HashSet<String>>);

    impl TakenSet {
        fn new(taken: &[&str]) -> Self {
            Self(RwLock::new(taken.iter().map(ToString::to_string).collect()))
        }
    }

    #[async_trait]
    impl ExistenceProbe for TakenSet {
        async fn exists(&self, candidate: &str) -> StorageResult<bool> {
            Ok(self.0.read().contains(candidate))
        }
    }

    #[test]
    fn test_slugify() {
        assert_eq!(SlugService::slugify("Hello, World!"), "hello-world");
        assert_eq!(SlugService::slugify("  spaced   out  "), "spaced-out");
        assert_eq!(SlugService::slugify("Already-Slugged"), "already-slugged");
        assert_eq!(SlugService::slugify("50% Off Sale"), "50-off-sale");
        assert_eq!(SlugService::slugify("!!!"), "");
    }

    #[tokio::test]
    async fn test_unique_slug_free_base() {
        let probe = TakenSet::new(&[]);
        let slug = SlugService::new()
            .unique_slug("My First Post", &probe)
            .await
            .unwrap();
        assert_eq!(slug, "my-first-post");
    }

    #[tokio::test]
    async fn test_unique_slug_appends_suffix() {
        let probe = TakenSet::new(&["my-post", "my-post-2"]);
        let slug = SlugService::new().unique_slug("My Post", &probe).await.unwrap();
        assert_eq!(slug, "my-post-3");
    }

    #[tokio::test]
    async fn test_unique_slug_rejects_empty_base() {
        let probe = TakenSet::new(&[]);
        let result = SlugService::new().unique_slug("!!!", &probe).await;
        assert!(matches!(result, Err(GenError::InvalidRange(_))));
    }
}
