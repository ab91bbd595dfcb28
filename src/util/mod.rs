//! Utility functions shared by the registry and the CLI.
//!
//! - **URL validation**: the `http://` feed-url contract enforced at registry construction
//! - **Text processing**: Unicode-aware truncation and terminal sanitising for printed entries
//!
//! # Examples
//!
//! ```
//! use feedreader::util::{validate_feed_url, display_width, truncate_to_width};
//!
//! let url = validate_feed_url("http://feeds.feedburner.com/html5rocks").unwrap();
//! assert_eq!(url.scheme(), "http");
//!
//! assert_eq!(display_width("Hello"), 5);
//! assert_eq!(truncate_to_width("Long entry title", 10), "Long en...");
//! ```

mod text;
mod url_validator;

pub use text::{display_width, strip_control_chars, truncate_to_width};
pub use url_validator::{validate_feed_url, UrlValidationError, REQUIRED_SCHEME_PREFIX};
