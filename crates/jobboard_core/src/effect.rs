use crate::{FilterCriteria, JobId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Ask the listing source for one page. Only the latest generation may commit.
    FetchListing {
        generation: u64,
        filters: FilterCriteria,
        page: u32,
    },
    LoadFilterOptions,
    /// Write the canonical query string to the address bar.
    PushQuery { query: String },
    /// Write the full favorites set back to storage.
    PersistFavorites { ids: Vec<JobId> },
}
