//! Feed registry, fetching and loading.
//!
//! - [`registry`] - the validated, read-only feed list
//! - [`parser`] - RSS/Atom bytes to [`EntryContent`] via the `feed-rs` crate
//! - [`source`] - the [`FeedSource`] fetch seam and its HTTP implementation
//! - [`loader`] - fetch-and-render cycles with stale-result suppression
//!
//! # Example
//!
//! ```ignore
//! use feedreader::feed::{FeedLoader, FeedRegistry, HttpFeedSource};
//!
//! let loader = FeedLoader::new(registry, HttpFeedSource::new(timeout)?, renderer);
//! let first = loader.load_feed(0)?;
//! let second = loader.load_feed(1)?;
//! // Only `second` renders; `first` resolves to `None`.
//! assert!(first.await.is_none());
//! ```

mod loader;
mod parser;
mod registry;
mod source;

pub use loader::{
    FeedLoader, LoadError, LoadFailure, LoadHandle, LoadReport, LoadRequest, LoadResult,
};
pub use parser::{parse_entries, EntryContent};
pub use registry::{Feed, FeedRegistry, FeedValidationError, RegistryError};
pub use source::{FeedSource, FetchError, HttpFeedSource};
