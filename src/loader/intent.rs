use crate::mvi::Intent;

/// Kind of load being started.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadKind {
    Initial,
    More,
}

#[derive(Debug, Clone)]
pub enum LoadIntent {
    /// A fetch was issued.
    Started(LoadKind),
    /// The page was merged into the cache.
    Succeeded,
    /// The fetch failed; prior items and cursor are untouched.
    Failed { cause: String },
    /// The owning surface went away before the page arrived.
    Cancelled,
}

impl Intent for LoadIntent {}
