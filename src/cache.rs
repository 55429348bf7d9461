//! Session-scoped collection cache.
//!
//! One store shared by the loader and the submission pipeline. Readers get
//! cloned snapshots; writers go through typed handles so the loader can
//! only replace/append and the pipeline can only prepend.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use parking_lot::RwLock;

use crate::model::{Cursor, ImageResource};

/// Well-known key of the gallery's single collection.
pub const GALLERY_COLLECTION: &str = "images";

/// Merged page sequence plus pagination position for one collection.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CachedCollection {
    pub items: Vec<ImageResource>,
    pub cursor: Option<Cursor>,
    /// Set once a page without a cursor has been seen; never cleared.
    pub exhausted: bool,
}

impl CachedCollection {
    pub fn has_more(&self) -> bool {
        self.cursor.is_some()
    }

    pub fn contains(&self, identifier: &str) -> bool {
        self.items.iter().any(|item| item.identifier == identifier)
    }

    fn set_cursor(&mut self, cursor: Option<Cursor>) {
        if cursor.is_none() {
            self.exhausted = true;
        }
        self.cursor = if self.exhausted { None } else { cursor };
    }
}

/// Append `incoming` to `items`, skipping identifiers already present.
///
/// Existing entries are never moved or removed. Returns the number of
/// items actually added.
pub fn merge_page(items: &mut Vec<ImageResource>, incoming: Vec<ImageResource>) -> usize {
    let mut seen: HashSet<String> = items.iter().map(|i| i.identifier.clone()).collect();
    let before = items.len();
    for item in incoming {
        if seen.insert(item.identifier.clone()) {
            items.push(item);
        }
    }
    items.len() - before
}

/// Thread-safe collection store. Cloning shares the same underlying map.
#[derive(Clone, Default)]
pub struct CollectionCache {
    inner: Arc<RwLock<HashMap<String, CachedCollection>>>,
}

impl CollectionCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of a collection; empty if nothing was ever written.
    pub fn get(&self, key: &str) -> CachedCollection {
        self.inner.read().get(key).cloned().unwrap_or_default()
    }

    /// Writer for the page loader: wholesale replace and append.
    pub fn page_writer(&self, key: impl Into<String>) -> PageWriter {
        PageWriter {
            cache: self.clone(),
            key: key.into(),
        }
    }

    /// Writer for the submission pipeline: head insertion only.
    pub fn head_writer(&self, key: impl Into<String>) -> HeadWriter {
        HeadWriter {
            cache: self.clone(),
            key: key.into(),
        }
    }

    fn update<R>(&self, key: &str, f: impl FnOnce(&mut CachedCollection) -> R) -> R {
        let mut map = self.inner.write();
        f(map.entry(key.to_string()).or_default())
    }
}

/// Replace/append access to one collection.
#[derive(Clone)]
pub struct PageWriter {
    cache: CollectionCache,
    key: String,
}

impl PageWriter {
    pub fn snapshot(&self) -> CachedCollection {
        self.cache.get(&self.key)
    }

    /// Swap the whole sequence for a freshly fetched first page.
    pub fn replace(&self, items: Vec<ImageResource>, cursor: Option<Cursor>) {
        self.cache.update(&self.key, |entry| {
            entry.items.clear();
            merge_page(&mut entry.items, items);
            entry.set_cursor(cursor);
        });
    }

    /// Append a follow-up page and advance the cursor.
    pub fn append(&self, items: Vec<ImageResource>, cursor: Option<Cursor>) -> usize {
        self.cache.update(&self.key, |entry| {
            let added = merge_page(&mut entry.items, items);
            entry.set_cursor(cursor);
            added
        })
    }
}

/// Head-insert access to one collection.
#[derive(Clone)]
pub struct HeadWriter {
    cache: CollectionCache,
    key: String,
}

impl HeadWriter {
    /// Put a newly created image first. No-op if it is already present.
    pub fn prepend(&self, item: ImageResource) -> bool {
        self.cache.update(&self.key, |entry| {
            if entry.contains(&item.identifier) {
                return false;
            }
            entry.items.insert(0, item);
            true
        })
    }
}
