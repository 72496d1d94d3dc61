//! Navigation seam for the page address
//!
//! The address is the only durable store for filter state. Reads go through
//! [`Navigator::search_params`] every time and writes go through
//! [`Navigator::navigate`], so nothing caches the current filters.

use crate::search_params::SearchParams;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

/// Access to the current page address
#[cfg_attr(test, mockall::automock)]
pub trait Navigator {
    /// Current query component of the address
    fn search_params(&self) -> SearchParams;

    /// Navigate to the same page with a new query component
    fn navigate(&self, params: SearchParams);
}

// =============================================================================
// History
// =============================================================================

/// One entry in the address history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Query component at this point in history
    pub params: SearchParams,
    /// Unique key for this entry
    pub key: String,
}

impl HistoryEntry {
    /// Create a new history entry
    pub fn new(params: SearchParams) -> Self {
        Self {
            params,
            key: uuid::Uuid::new_v4().to_string(),
        }
    }
}

#[derive(Debug, Clone)]
struct History {
    path: String,
    entries: Vec<HistoryEntry>,
}

/// In-memory navigator backed by a history stack
///
/// Every navigation pushes an entry; [`MemoryNavigator::back`] pops one. The
/// stack never becomes empty.
#[derive(Debug)]
pub struct MemoryNavigator {
    history: RwLock<History>,
}

impl MemoryNavigator {
    /// Create a navigator positioned at `location` (`/path?query`)
    pub fn new(location: &str) -> Self {
        let (path, query) = match location.split_once('?') {
            Some((path, query)) => (path, query),
            None => (location, ""),
        };

        Self {
            history: RwLock::new(History {
                path: path.to_string(),
                entries: vec![HistoryEntry::new(SearchParams::parse(query))],
            }),
        }
    }

    /// Path component of the address
    pub fn path(&self) -> String {
        self.history.read().path.clone()
    }

    /// Full location (`/path` or `/path?query`)
    pub fn location(&self) -> String {
        let history = self.history.read();
        let query = history
            .entries
            .last()
            .map(|entry| entry.params.to_query_string())
            .unwrap_or_default();

        if query.is_empty() {
            history.path.clone()
        } else {
            format!("{}?{}", history.path, query)
        }
    }

    /// Replace the current entry without growing the history
    pub fn replace(&self, params: SearchParams) {
        let mut history = self.history.write();
        if let Some(last) = history.entries.last_mut() {
            *last = HistoryEntry::new(params);
        }
    }

    /// Go back one entry (returns false when already at the first entry)
    pub fn back(&self) -> bool {
        let mut history = self.history.write();
        if history.entries.len() > 1 {
            history.entries.pop();
            true
        } else {
            false
        }
    }

    /// Check if we can go back
    pub fn can_go_back(&self) -> bool {
        self.history.read().entries.len() > 1
    }

    /// History depth
    pub fn depth(&self) -> usize {
        self.history.read().entries.len()
    }

    /// Snapshot of every history entry, oldest first
    pub fn entries(&self) -> Vec<HistoryEntry> {
        self.history.read().entries.clone()
    }
}

impl Default for MemoryNavigator {
    fn default() -> Self {
        Self::new("/")
    }
}

impl Navigator for MemoryNavigator {
    fn search_params(&self) -> SearchParams {
        self.history
            .read()
            .entries
            .last()
            .map(|entry| entry.params.clone())
            .unwrap_or_default()
    }

    fn navigate(&self, params: SearchParams) {
        self.history.write().entries.push(HistoryEntry::new(params));
    }
}

impl<N: Navigator + ?Sized> Navigator for std::sync::Arc<N> {
    fn search_params(&self) -> SearchParams {
        (**self).search_params()
    }

    fn navigate(&self, params: SearchParams) {
        (**self).navigate(params)
    }
}

impl<N: Navigator + ?Sized> Navigator for &N {
    fn search_params(&self) -> SearchParams {
        (**self).search_params()
    }

    fn navigate(&self, params: SearchParams) {
        (**self).navigate(params)
    }
}
