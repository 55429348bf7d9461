//! State for the collection loader.

use crate::cache::CachedCollection;
use crate::model::{Cursor, ImageResource};
use crate::mvi::UiState;

/// Which load, if any, is currently in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadActivity {
    #[default]
    Idle,
    LoadingInitial,
    LoadingMore,
}

/// Reducer-owned part of the loader: in-flight flag and last failure.
///
/// Items and cursor live in the collection cache so that head inserts
/// from the submission pipeline show up in the same sequence.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LoaderState {
    pub activity: LoadActivity,
    pub last_error: Option<String>,
}

impl UiState for LoaderState {}

impl LoaderState {
    pub fn is_idle(&self) -> bool {
        self.activity == LoadActivity::Idle
    }
}

/// Snapshot handed to the display layer.
///
/// `has_more` always equals `cursor.is_some()`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CollectionState {
    pub items: Vec<ImageResource>,
    pub cursor: Option<Cursor>,
    pub is_loading_initial: bool,
    pub is_loading_more: bool,
    pub has_more: bool,
    pub last_error: Option<String>,
}

impl CollectionState {
    pub(crate) fn compose(loader: &LoaderState, collection: CachedCollection) -> Self {
        Self {
            has_more: collection.has_more(),
            items: collection.items,
            cursor: collection.cursor,
            is_loading_initial: loader.activity == LoadActivity::LoadingInitial,
            is_loading_more: loader.activity == LoadActivity::LoadingMore,
            last_error: loader.last_error.clone(),
        }
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading_initial || self.is_loading_more
    }

    /// Whether a "load more" action would currently be accepted.
    pub fn can_load_more(&self) -> bool {
        self.has_more && !self.is_loading()
    }
}
