//! Fetch-and-render cycles with stale-result suppression.
//!
//! Every [`FeedLoader::load_feed`] call takes a fresh sequence number. When
//! its fetch resolves, the result is applied only if that number is still the
//! latest one issued; otherwise it is dropped without rendering and without
//! completing the handle. Superseded fetches are left to finish in the
//! background.

use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::pin::Pin;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::task::{Context, Poll};
use std::time::Duration;

use futures::FutureExt;
use thiserror::Error;
use tokio::sync::oneshot;

use crate::feed::parser::EntryContent;
use crate::feed::registry::{Feed, FeedRegistry};
use crate::feed::source::{FeedSource, FetchError};
use crate::ui::{EntryRenderer, RenderError};

/// Errors returned to the caller of `load_feed` or `wait_timeout`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoadError {
    /// Rejected before any fetch; rendered state untouched.
    #[error("feed index {index} out of range (registry has {len} feeds)")]
    IndexOutOfRange { index: usize, len: usize },
    /// The caller's bound elapsed before completion.
    #[error("feed load did not complete within {0:?}")]
    TimedOut(Duration),
}

/// Why a non-stale load finished without rendering.
#[derive(Debug, Error)]
pub enum LoadFailure {
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error(transparent)]
    Render(#[from] RenderError),
}

/// Identifies one load request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadRequest {
    pub index: usize,
    pub sequence: u64,
}

/// What a completed, rendered load produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadReport {
    pub request: LoadRequest,
    pub feed_name: String,
    pub entries: usize,
}

pub type LoadResult = Result<LoadReport, LoadFailure>;

/// Single-shot completion handle for one `load_feed` call.
///
/// Resolves to `Some(result)` once the load is applied or fails, and to
/// `None` if a newer request superseded it (its completion never fires).
pub struct LoadHandle {
    request: LoadRequest,
    rx: oneshot::Receiver<LoadResult>,
}

impl LoadHandle {
    pub fn request(&self) -> LoadRequest {
        self.request
    }

    /// Waits at most `limit` for completion.
    ///
    /// # Errors
    ///
    /// [`LoadError::TimedOut`] when `limit` elapses first.
    pub async fn wait_timeout(self, limit: Duration) -> Result<Option<LoadResult>, LoadError> {
        tokio::time::timeout(limit, self)
            .await
            .map_err(|_| LoadError::TimedOut(limit))
    }
}

impl Future for LoadHandle {
    type Output = Option<LoadResult>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        Pin::new(&mut self.rx).poll(cx).map(Result::ok)
    }
}

struct LoaderInner<S> {
    registry: Arc<FeedRegistry>,
    source: S,
    renderer: EntryRenderer,
    latest: AtomicU64,
    /// Held while checking staleness and swapping entries in.
    commit: Mutex<()>,
}

impl<S> LoaderInner<S> {
    fn is_latest(&self, sequence: u64) -> bool {
        self.latest.load(Ordering::SeqCst) == sequence
    }

    /// Applies a resolved fetch. `None` means the request was stale.
    fn apply(
        &self,
        request: LoadRequest,
        feed: &Feed,
        fetched: Result<Vec<EntryContent>, FetchError>,
    ) -> Option<LoadResult> {
        let _guard = self.commit.lock().unwrap_or_else(PoisonError::into_inner);

        if !self.is_latest(request.sequence) {
            tracing::debug!(
                index = request.index,
                sequence = request.sequence,
                latest = self.latest.load(Ordering::SeqCst),
                "Ignoring stale feed load (sequence mismatch)"
            );
            return None;
        }

        let outcome = fetched
            .map_err(LoadFailure::from)
            .and_then(|entries| self.renderer.render(entries).map_err(LoadFailure::from));

        match outcome {
            Ok(entries) => {
                self.renderer.set_title(&feed.name);
                tracing::debug!(
                    index = request.index,
                    sequence = request.sequence,
                    entries,
                    "Feed loaded"
                );
                Some(Ok(LoadReport {
                    request,
                    feed_name: feed.name.clone(),
                    entries,
                }))
            }
            Err(e) => {
                tracing::warn!(
                    index = request.index,
                    feed = %feed.url,
                    error = %e,
                    "Feed load failed, keeping previous entries"
                );
                Some(Err(e))
            }
        }
    }
}

/// Issues feed loads against a registry and renders the latest result.
pub struct FeedLoader<S> {
    inner: Arc<LoaderInner<S>>,
}

impl<S> Clone for FeedLoader<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S: FeedSource> FeedLoader<S> {
    pub fn new(registry: Arc<FeedRegistry>, source: S, renderer: EntryRenderer) -> Self {
        Self {
            inner: Arc::new(LoaderInner {
                registry,
                source,
                renderer,
                latest: AtomicU64::new(0),
                commit: Mutex::new(()),
            }),
        }
    }

    pub fn registry(&self) -> &FeedRegistry {
        &self.inner.registry
    }

    /// Sequence number of the most recent request (0 before the first).
    pub fn latest_sequence(&self) -> u64 {
        self.inner.latest.load(Ordering::SeqCst)
    }

    /// Starts loading the feed at `index` and returns its completion handle.
    ///
    /// Must be called from within a tokio runtime; the fetch runs on a
    /// spawned task.
    ///
    /// # Errors
    ///
    /// [`LoadError::IndexOutOfRange`] when `index` is not in the registry. No
    /// fetch is issued and no sequence number is consumed.
    pub fn load_feed(&self, index: usize) -> Result<LoadHandle, LoadError> {
        let feed = self
            .inner
            .registry
            .get(index)
            .cloned()
            .ok_or(LoadError::IndexOutOfRange {
                index,
                len: self.inner.registry.len(),
            })?;

        let sequence = self.inner.latest.fetch_add(1, Ordering::SeqCst).wrapping_add(1);
        let request = LoadRequest { index, sequence };
        tracing::debug!(index, sequence, feed = %feed.url, "Starting feed load");

        let (tx, rx) = oneshot::channel();
        let inner = Arc::clone(&self.inner);
        tokio::spawn(async move {
            let fetched = match AssertUnwindSafe(inner.source.fetch(&feed))
                .catch_unwind()
                .await
            {
                Ok(fetched) => fetched,
                Err(panic) => {
                    let msg = panic_message(panic.as_ref());
                    tracing::error!(task = "feed_load", index, error = %msg, "Fetch task panicked");
                    Err(FetchError::Other(format!("fetch task panicked: {msg}")))
                }
            };

            if let Some(outcome) = inner.apply(request, &feed, fetched) {
                if tx.send(outcome).is_err() {
                    tracing::debug!(index, sequence, "Load handle dropped before completion");
                }
            }
        });

        Ok(LoadHandle { request, rx })
    }
}

fn panic_message(panic: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = panic.downcast_ref::<&'static str>() {
        s.to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_string()
    }
}
