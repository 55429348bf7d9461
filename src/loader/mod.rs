//! Cursor-based collection loader.
//!
//! Fetches pages through a [`PageSource`], merges them into the shared
//! [`CollectionCache`] and tracks loading/error/exhaustion state. Only one
//! load runs at a time; an overlapping request is rejected, not queued.

mod error;
mod intent;
mod reducer;
mod state;

use std::sync::Arc;

use parking_lot::Mutex;

pub use error::LoadError;
pub use intent::{LoadIntent, LoadKind};
pub use reducer::LoadReducer;
pub use state::{CollectionState, LoadActivity, LoaderState};

use crate::api::PageSource;
use crate::cache::{CollectionCache, PageWriter, GALLERY_COLLECTION};
use crate::model::{Cursor, Page};
use crate::mvi::Reducer;
use crate::surface::CancelToken;

pub struct CollectionLoader {
    source: Arc<dyn PageSource>,
    pages: PageWriter,
    state: Mutex<LoaderState>,
    cancel: CancelToken,
}

impl CollectionLoader {
    /// Loader for the gallery collection, tied to the surface behind `cancel`.
    pub fn new(source: Arc<dyn PageSource>, cache: &CollectionCache, cancel: CancelToken) -> Self {
        Self::for_collection(source, cache, GALLERY_COLLECTION, cancel)
    }

    pub fn for_collection(
        source: Arc<dyn PageSource>,
        cache: &CollectionCache,
        key: &str,
        cancel: CancelToken,
    ) -> Self {
        Self {
            source,
            pages: cache.page_writer(key),
            state: Mutex::new(LoaderState::default()),
            cancel,
        }
    }

    pub fn state(&self) -> CollectionState {
        let loader = self.state.lock().clone();
        CollectionState::compose(&loader, self.pages.snapshot())
    }

    /// Fetch the first page and replace the collection with it.
    pub async fn load_initial(&self) -> Result<Page, LoadError> {
        let (flight, _) = self.begin(LoadKind::Initial)?;
        self.run(flight, None).await
    }

    /// Fetch the page after the stored cursor and append it.
    pub async fn load_more(&self) -> Result<Page, LoadError> {
        let (flight, cursor) = self.begin(LoadKind::More)?;
        self.run(flight, cursor).await
    }

    fn dispatch(&self, intent: LoadIntent) {
        let mut state = self.state.lock();
        *state = LoadReducer::reduce(std::mem::take(&mut *state), intent);
    }

    /// Check the guards and mark the load as started, atomically.
    fn begin(&self, kind: LoadKind) -> Result<(InFlight<'_>, Option<Cursor>), LoadError> {
        if self.cancel.is_cancelled() {
            return Err(LoadError::Cancelled);
        }

        let mut state = self.state.lock();
        if !state.is_idle() {
            tracing::debug!(?kind, activity = ?state.activity, "load rejected, already in flight");
            return Err(LoadError::InFlight);
        }

        let cursor = match kind {
            LoadKind::Initial => None,
            LoadKind::More => match self.pages.snapshot().cursor {
                Some(cursor) => Some(cursor),
                None => return Err(LoadError::Exhausted),
            },
        };

        *state = LoadReducer::reduce(std::mem::take(&mut *state), LoadIntent::Started(kind));
        let flight = InFlight {
            loader: self,
            kind,
            resolved: false,
        };
        Ok((flight, cursor))
    }

    async fn run(&self, flight: InFlight<'_>, after: Option<Cursor>) -> Result<Page, LoadError> {
        let kind = flight.kind;
        tracing::debug!(?kind, after = ?after.as_ref().map(Cursor::as_str), "loading page");

        let fetched = self.cancel.run(self.source.fetch_page(after.as_ref())).await;
        let page = match fetched {
            None => {
                tracing::debug!(?kind, "load cancelled, discarding response");
                flight.resolve(LoadIntent::Cancelled);
                return Err(LoadError::Cancelled);
            }
            Some(Err(cause)) => {
                if cause.is_transport() {
                    tracing::warn!(?kind, error = %cause, "page fetch failed, backend unreachable");
                } else {
                    tracing::error!(?kind, error = %cause, "page fetch failed");
                }
                flight.resolve(LoadIntent::Failed {
                    cause: cause.to_string(),
                });
                return Err(LoadError::FetchFailed { cause });
            }
            Some(Ok(page)) => page,
        };

        match kind {
            LoadKind::Initial => {
                self.pages
                    .replace(page.items.clone(), page.next_cursor.clone());
            }
            LoadKind::More => {
                let added = self
                    .pages
                    .append(page.items.clone(), page.next_cursor.clone());
                if added < page.items.len() {
                    tracing::debug!(
                        duplicates = page.items.len() - added,
                        "dropped already known images from page"
                    );
                }
            }
        }
        flight.resolve(LoadIntent::Succeeded);

        tracing::info!(
            ?kind,
            received = page.items.len(),
            has_more = !page.is_last(),
            "page loaded"
        );
        Ok(page)
    }
}

/// An unresolved load. Dropping it unresolved (the caller gave up on the
/// future) puts the loader back to idle so the load can be retried.
struct InFlight<'a> {
    loader: &'a CollectionLoader,
    kind: LoadKind,
    resolved: bool,
}

impl InFlight<'_> {
    fn resolve(mut self, intent: LoadIntent) {
        self.resolved = true;
        self.loader.dispatch(intent);
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if !self.resolved {
            tracing::debug!(kind = ?self.kind, "load abandoned before it resolved");
            self.loader.dispatch(LoadIntent::Cancelled);
        }
    }
}
