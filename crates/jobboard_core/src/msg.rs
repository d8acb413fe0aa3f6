use std::time::Instant;

use crate::{FilterKey, FilterOptions, JobId, ListingPage};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// Controller finished initialization; kick off the first fetches.
    Started,
    /// User edited a filter. Search edits are debounced, the rest commit now.
    FilterChanged {
        key: FilterKey,
        value: String,
        at: Instant,
    },
    /// User removed a single active filter.
    FilterCleared(FilterKey),
    /// User clicked "Clear All Filters".
    AllFiltersCleared,
    /// User asked for a specific page.
    PageRequested(u32),
    /// User flipped the "Show Favorites Only" switch.
    ShowFavoritesOnlyChanged(bool),
    /// User starred or unstarred a job.
    FavoriteToggled(JobId),
    /// User asked to retry after a failed fetch.
    RetryRequested,
    /// Back/forward traversal landed on this query string.
    Navigated { query: String },
    /// Timer tick; commits debounced search input whose quiet period is over.
    Tick { now: Instant },
    /// Listing source completion for the fetch tagged `generation`.
    ListingLoaded {
        generation: u64,
        result: Result<ListingPage, String>,
    },
    /// Filter facets arrived (or failed to).
    FilterOptionsLoaded(Result<FilterOptions, String>),
}
