//! Feed-reading widget core.
//!
//! A validated feed registry, a click-driven menu whose visibility lives in a
//! root class flag, and an asynchronous loader that renders only the most
//! recently requested feed.

pub mod config;
pub mod feed;
pub mod session;
pub mod ui;
pub mod util;

pub use session::Session;
