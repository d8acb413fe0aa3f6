use crate::{FetchStatus, FilterCriteria, FilterKey, FilterOptions, JobListing};

/// Read-only snapshot handed to the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    /// Search box contents, including text not yet committed.
    pub search_text: String,
    pub filters: FilterCriteria,
    pub active_filters: Vec<ActiveFilterChip>,
    pub has_active_filters: bool,
    pub show_favorites_only: bool,
    pub favorites_count: usize,
    pub status: FetchStatus,
    pub current_page: u32,
    pub total_pages: u32,
    /// `None` when the pager should not be shown at all.
    pub pagination: Option<PaginationView>,
    pub jobs: Vec<JobCardView>,
    pub filter_options: FilterOptions,
    pub query: String,
    pub dirty: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveFilterChip {
    pub key: FilterKey,
    pub label: &'static str,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobCardView {
    pub job: JobListing,
    pub is_favorite: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationView {
    pub current_page: u32,
    pub total_pages: u32,
    /// Target of "Previous"; `None` disables the button.
    pub previous_page: Option<u32>,
    /// Target of "Next"; `None` disables the button.
    pub next_page: Option<u32>,
}
