use thiserror::Error;
use url::Url;

/// The only scheme prefix a registered feed url may carry.
pub const REQUIRED_SCHEME_PREFIX: &str = "http://";

/// Errors that can occur while validating a feed url.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UrlValidationError {
    /// The url is empty or whitespace.
    #[error("url is empty")]
    Empty,
    /// The url does not start with `http://`.
    #[error("url must start with \"http://\": {0}")]
    UnsupportedScheme(String),
    /// The url could not be parsed.
    #[error("invalid url: {0}")]
    InvalidUrl(#[from] url::ParseError),
    /// The url parsed but names no host.
    #[error("url has no host: {0}")]
    MissingHost(String),
}

/// Validates a url string for use as a registered feed source.
///
/// The prefix check is literal (case-sensitive), matching how the widget's
/// feed list is written; `https://` urls are rejected.
///
/// # Errors
///
/// - [`UrlValidationError::Empty`] for an empty or whitespace-only string
/// - [`UrlValidationError::UnsupportedScheme`] when the `http://` prefix is missing
/// - [`UrlValidationError::InvalidUrl`] when the string does not parse
/// - [`UrlValidationError::MissingHost`] when no host is present
///
/// # Examples
///
/// ```
/// use feedreader::util::validate_feed_url;
///
/// let url = validate_feed_url("http://blog.udacity.com/feed").unwrap();
/// assert_eq!(url.host_str(), Some("blog.udacity.com"));
///
/// assert!(validate_feed_url("").is_err());
/// assert!(validate_feed_url("https://example.com/feed").is_err());
/// assert!(validate_feed_url("ftp://example.com").is_err());
/// ```
pub fn validate_feed_url(url_str: &str) -> Result<Url, UrlValidationError> {
    if url_str.trim().is_empty() {
        return Err(UrlValidationError::Empty);
    }
    if !url_str.starts_with(REQUIRED_SCHEME_PREFIX) {
        return Err(UrlValidationError::UnsupportedScheme(url_str.to_owned()));
    }

    let url = Url::parse(url_str)?;
    match url.host_str() {
        Some(host) if !host.is_empty() => Ok(url),
        _ => Err(UrlValidationError::MissingHost(url_str.to_owned())),
    }
}
