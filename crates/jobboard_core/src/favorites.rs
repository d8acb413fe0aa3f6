use std::collections::BTreeSet;

use crate::JobId;

/// In-memory favorites. Authoritative for the session; the store only mirrors it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Favorites {
    ids: BTreeSet<JobId>,
}

impl Favorites {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, id: JobId) -> bool {
        self.ids.contains(&id)
    }

    /// Flips membership. Returns `true` if `id` is a favorite afterwards.
    pub fn toggle(&mut self, id: JobId) -> bool {
        if self.ids.remove(&id) {
            false
        } else {
            self.ids.insert(id);
            true
        }
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Ascending ids, the shape written back to storage.
    pub fn to_vec(&self) -> Vec<JobId> {
        self.ids.iter().copied().collect()
    }
}

impl FromIterator<JobId> for Favorites {
    fn from_iter<I: IntoIterator<Item = JobId>>(iter: I) -> Self {
        Self {
            ids: iter.into_iter().collect(),
        }
    }
}
