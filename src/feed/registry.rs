use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::util::{validate_feed_url, UrlValidationError};

/// Why a single feed descriptor was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FeedValidationError {
    #[error("feed name is empty")]
    EmptyName,
    #[error(transparent)]
    Url(#[from] UrlValidationError),
}

/// Errors raised while constructing a [`FeedRegistry`].
///
/// Both are fatal at startup; there is no partially valid registry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("feed registry is empty")]
    Empty,
    #[error("feed #{index} is invalid: {source}")]
    InvalidFeed {
        index: usize,
        #[source]
        source: FeedValidationError,
    },
}

/// A feed descriptor. Its identity is its position in the registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feed {
    pub name: String,
    pub url: String,
}

impl Feed {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
        }
    }

    /// Checks the name and url contract for a single feed.
    ///
    /// # Errors
    ///
    /// [`FeedValidationError::EmptyName`] for a blank name, or
    /// [`FeedValidationError::Url`] when the url fails [`validate_feed_url`].
    pub fn validate(&self) -> Result<(), FeedValidationError> {
        if self.name.trim().is_empty() {
            return Err(FeedValidationError::EmptyName);
        }
        validate_feed_url(&self.url)?;
        Ok(())
    }
}

/// Built-in feed list used when no configuration overrides it.
const DEFAULT_FEEDS: &[(&str, &str)] = &[
    ("Udacity Blog", "http://blog.udacity.com/feed"),
    ("CSS Tricks", "http://feeds.feedburner.com/CssTricks"),
    ("HTML5 Rocks", "http://feeds.feedburner.com/html5rocks"),
    (
        "Linear Digressions",
        "http://feeds.feedburner.com/udacity-linear-digressions",
    ),
];

/// Ordered, validated, read-only list of feeds.
///
/// Construction is the only place validation happens; after that the
/// registry is never empty and every feed satisfies [`Feed::validate`].
#[derive(Debug, Clone)]
pub struct FeedRegistry {
    feeds: Vec<Feed>,
}

impl FeedRegistry {
    /// Validates and wraps a feed list.
    ///
    /// # Errors
    ///
    /// [`RegistryError::Empty`] for an empty list, or
    /// [`RegistryError::InvalidFeed`] naming the first offending index.
    pub fn new(feeds: Vec<Feed>) -> Result<Self, RegistryError> {
        if feeds.is_empty() {
            return Err(RegistryError::Empty);
        }

        for (index, feed) in feeds.iter().enumerate() {
            feed.validate()
                .map_err(|source| RegistryError::InvalidFeed { index, source })?;
        }

        tracing::debug!(feeds = feeds.len(), "Feed registry constructed");
        Ok(Self { feeds })
    }

    pub fn feeds(&self) -> &[Feed] {
        &self.feeds
    }

    pub fn get(&self, index: usize) -> Option<&Feed> {
        self.feeds.get(index)
    }

    pub fn len(&self) -> usize {
        self.feeds.len()
    }

    /// Always false; kept for the `len`/`is_empty` pairing.
    pub fn is_empty(&self) -> bool {
        self.feeds.is_empty()
    }
}

impl Default for FeedRegistry {
    fn default() -> Self {
        Self {
            feeds: DEFAULT_FEEDS
                .iter()
                .map(|(name, url)| Feed::new(*name, *url))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_default_registry_is_valid() {
        let registry = FeedRegistry::default();
        assert!(!registry.is_empty());
        // Round-trip through the validating constructor
        let rebuilt = FeedRegistry::new(registry.feeds().to_vec()).unwrap();
        assert_eq!(rebuilt.len(), registry.len());
    }

    #[test]
    fn test_each_default_feed_has_http_url_and_name() {
        for feed in FeedRegistry::default().feeds() {
            assert!(!feed.url.is_empty());
            assert!(feed.url.starts_with("http://"));
            assert!(!feed.name.is_empty());
        }
    }

    #[test]
    fn test_empty_registry_rejected() {
        assert_eq!(FeedRegistry::new(Vec::new()).unwrap_err(), RegistryError::Empty);
    }

    #[test]
    fn test_empty_name_rejected_with_index() {
        let feeds = vec![
            Feed::new("Good", "http://example.com/a"),
            Feed::new("  ", "http://example.com/b"),
        ];
        match FeedRegistry::new(feeds).unwrap_err() {
            RegistryError::InvalidFeed {
                index: 1,
                source: FeedValidationError::EmptyName,
            } => {}
            e => panic!("Expected InvalidFeed at index 1, got {:?}", e),
        }
    }

    #[test]
    fn test_empty_url_rejected() {
        let err = FeedRegistry::new(vec![Feed::new("Feed", "")]).unwrap_err();
        assert_eq!(
            err,
            RegistryError::InvalidFeed {
                index: 0,
                source: FeedValidationError::Url(UrlValidationError::Empty),
            }
        );
    }

    #[test]
    fn test_https_url_rejected() {
        let err = FeedRegistry::new(vec![Feed::new("Feed", "https://example.com/rss")]).unwrap_err();
        assert!(err.to_string().contains("feed #0 is invalid"));
    }

    #[test]
    fn test_get_out_of_range_is_none() {
        let registry = FeedRegistry::default();
        assert!(registry.get(registry.len()).is_none());
        assert_eq!(registry.get(0).map(|f| f.name.as_str()), Some("Udacity Blog"));
    }

    proptest! {
        #[test]
        fn prop_accepted_registries_satisfy_contract(
            names in proptest::collection::vec("[A-Za-z ]{0,12}", 0..6),
            hosts in proptest::collection::vec("[a-z]{1,8}", 0..6),
            use_https in any::<bool>(),
        ) {
            let scheme = if use_https { "https://" } else { "http://" };
            let feeds: Vec<Feed> = names
                .iter()
                .zip(hosts.iter())
                .map(|(n, h)| Feed::new(n.clone(), format!("{scheme}{h}.example.com/feed")))
                .collect();

            if let Ok(registry) = FeedRegistry::new(feeds) {
                prop_assert!(registry.len() >= 1);
                for feed in registry.feeds() {
                    prop_assert!(feed.url.starts_with("http://"));
                    prop_assert!(!feed.name.trim().is_empty());
                }
            }
        }
    }
}
