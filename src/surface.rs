//! Cancellation tied to the lifetime of a UI surface.
//!
//! The gallery view and the submission dialog each own a
//! [`SurfaceLifetime`]. Work started on behalf of the surface holds a
//! [`CancelToken`]; once the surface closes (explicitly or by drop) any
//! late response is discarded locally instead of reaching the cache.

use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::sync::Notify;

pub struct SurfaceLifetime {
    closed: Arc<AtomicBool>,
    notify: Arc<Notify>,
}

impl SurfaceLifetime {
    pub fn new() -> Self {
        Self {
            closed: Arc::new(AtomicBool::new(false)),
            notify: Arc::new(Notify::new()),
        }
    }

    /// Close the surface, cancelling everything holding one of its tokens.
    pub fn close(&self) {
        if !self.closed.swap(true, Ordering::SeqCst) {
            tracing::debug!("surface closed, cancelling in-flight work");
            self.notify.notify_waiters();
        }
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }

    pub fn token(&self) -> CancelToken {
        CancelToken {
            closed: Arc::clone(&self.closed),
            notify: Arc::clone(&self.notify),
        }
    }
}

impl Default for SurfaceLifetime {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for SurfaceLifetime {
    fn drop(&mut self) {
        self.close();
    }
}

/// Lightweight handle for observing a surface's lifetime.
#[derive(Clone)]
pub struct CancelToken {
    closed: Arc<AtomicBool>,
    notify: Arc<Notify>,
}

impl CancelToken {
    /// A token with no owning surface; it is never cancelled.
    pub fn detached() -> Self {
        Self {
            closed: Arc::new(AtomicBool::new(false)),
            notify: Arc::new(Notify::new()),
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }

    pub async fn cancelled(&self) {
        // Register with Notify before checking the flag, otherwise a close()
        // between the check and the await would be missed.
        let notified = self.notify.notified();
        tokio::pin!(notified);
        notified.as_mut().enable();
        if self.is_cancelled() {
            return;
        }
        notified.await;
    }

    /// Drive `fut` unless the surface closes first.
    ///
    /// Returns `None` when cancelled, including when the future completed
    /// but the surface closed in the meantime.
    pub async fn run<F: Future>(&self, fut: F) -> Option<F::Output> {
        if self.is_cancelled() {
            return None;
        }
        tokio::select! {
            biased;
            _ = self.cancelled() => None,
            out = fut => (!self.is_cancelled()).then_some(out),
        }
    }
}
