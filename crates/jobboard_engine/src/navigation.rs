use std::sync::{mpsc, Arc, Mutex, MutexGuard, PoisonError};

use jobboard_logging::jobboard_debug;

/// Access to the address bar's query string and its history.
///
/// Query strings are passed without the leading `?`.
pub trait NavigationPort: Send {
    fn current_query(&self) -> String;

    /// Pushes a history entry for `query` unless it equals the current one.
    /// Returns whether an entry was pushed.
    fn push_query(&self, query: &str) -> bool;

    /// Delivers the query string of every back/forward traversal to `listener`.
    fn subscribe(&self, listener: mpsc::Sender<String>);
}

/// A browser-like history stack kept in memory. Clones share one history.
#[derive(Debug, Clone)]
pub struct MemoryHistory {
    inner: Arc<Mutex<HistoryInner>>,
}

#[derive(Debug)]
struct HistoryInner {
    entries: Vec<String>,
    cursor: usize,
    listeners: Vec<mpsc::Sender<String>>,
}

impl MemoryHistory {
    pub fn new(initial_query: &str) -> Self {
        Self {
            inner: Arc::new(Mutex::new(HistoryInner {
                entries: vec![strip(initial_query).to_string()],
                cursor: 0,
                listeners: Vec::new(),
            })),
        }
    }

    /// Steps back one entry and notifies subscribers. `false` at the oldest entry.
    pub fn back(&self) -> bool {
        self.traverse(-1)
    }

    /// Steps forward one entry and notifies subscribers. `false` at the newest entry.
    pub fn forward(&self) -> bool {
        self.traverse(1)
    }

    pub fn entries(&self) -> Vec<String> {
        self.lock().entries.clone()
    }

    fn traverse(&self, step: isize) -> bool {
        let mut inner = self.lock();
        let Some(target) = inner.cursor.checked_add_signed(step) else {
            return false;
        };
        if target >= inner.entries.len() {
            return false;
        }
        inner.cursor = target;
        let query = inner.entries[target].clone();
        jobboard_debug!("History traversal to entry {}: {:?}", target, query);
        inner
            .listeners
            .retain(|listener| listener.send(query.clone()).is_ok());
        true
    }

    fn lock(&self) -> MutexGuard<'_, HistoryInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for MemoryHistory {
    fn default() -> Self {
        Self::new("")
    }
}

impl NavigationPort for MemoryHistory {
    fn current_query(&self) -> String {
        let inner = self.lock();
        inner.entries[inner.cursor].clone()
    }

    fn push_query(&self, query: &str) -> bool {
        let query = strip(query);
        let mut inner = self.lock();
        if inner.entries[inner.cursor] == query {
            return false;
        }
        // Pushing drops any forward entries, as a browser does.
        let keep = inner.cursor + 1;
        inner.entries.truncate(keep);
        inner.entries.push(query.to_string());
        inner.cursor = keep;
        true
    }

    fn subscribe(&self, listener: mpsc::Sender<String>) {
        self.lock().listeners.push(listener);
    }
}

fn strip(query: &str) -> &str {
    query.strip_prefix('?').unwrap_or(query)
}
