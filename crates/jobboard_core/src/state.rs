use std::time::Duration;

use crate::url_codec::{self, CanonicalState};
use crate::view_model::{ActiveFilterChip, AppViewModel, JobCardView, PaginationView};
use crate::{
    DebouncedInputBuffer, Effect, Favorites, FilterCriteria, FilterOptions, JobListing,
    ListingPage, Pagination,
};

pub type JobId = u64;

/// Where the listing fetch currently stands.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FetchStatus {
    #[default]
    Idle,
    Loading,
    Ready,
    /// Carries the listing source's message verbatim.
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    filters: FilterCriteria,
    search: DebouncedInputBuffer,
    pagination: Pagination,
    show_favorites_only: bool,
    favorites: Favorites,
    fetch: FetchStatus,
    generation: u64,
    /// Last committed page of results, before the favorites-only filter.
    jobs: Vec<JobListing>,
    filter_options: FilterOptions,
    /// Query string the address bar is known to hold (no leading `?`).
    synced_query: String,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the start-up state from the address bar and the persisted favorites.
    pub fn restore(query: &str, favorites: Favorites, quiet_period: Duration) -> Self {
        let canonical = url_codec::decode(query);
        let mut search = DebouncedInputBuffer::new(quiet_period);
        search.reset_to(canonical.filters.search_query.clone().unwrap_or_default());
        Self {
            filters: canonical.filters,
            search,
            pagination: Pagination::starting_at(canonical.page),
            show_favorites_only: canonical.show_favorites_only,
            favorites,
            synced_query: strip_question_mark(query).to_string(),
            dirty: true,
            ..Self::default()
        }
    }

    pub fn canonical(&self) -> CanonicalState {
        CanonicalState {
            filters: self.filters.clone(),
            page: self.pagination.current_page(),
            show_favorites_only: self.show_favorites_only,
        }
    }

    pub fn filters(&self) -> &FilterCriteria {
        &self.filters
    }

    pub fn search(&self) -> &DebouncedInputBuffer {
        &self.search
    }

    pub fn pagination(&self) -> &Pagination {
        &self.pagination
    }

    pub fn show_favorites_only(&self) -> bool {
        self.show_favorites_only
    }

    pub fn favorites(&self) -> &Favorites {
        &self.favorites
    }

    pub fn fetch_status(&self) -> &FetchStatus {
        &self.fetch
    }

    /// Generation of the most recently issued fetch; 0 before the first one.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn synced_query(&self) -> &str {
        &self.synced_query
    }

    /// Jobs as the user sees them: narrowed to favorites when that switch is on.
    pub fn displayed_jobs(&self) -> impl Iterator<Item = &JobListing> + '_ {
        self.jobs
            .iter()
            .filter(|job| !self.show_favorites_only || self.favorites.contains(job.id))
    }

    pub fn view(&self) -> AppViewModel {
        let jobs: Vec<JobCardView> = self
            .displayed_jobs()
            .map(|job| JobCardView {
                is_favorite: self.favorites.contains(job.id),
                job: job.clone(),
            })
            .collect();
        let pagination = (!jobs.is_empty() && self.pagination.total_pages() > 1).then(|| {
            PaginationView {
                current_page: self.pagination.current_page(),
                total_pages: self.pagination.total_pages(),
                previous_page: self.pagination.previous_page(),
                next_page: self.pagination.next_page(),
            }
        });
        let active_filters = self
            .filters
            .active()
            .map(|(key, value)| ActiveFilterChip {
                key,
                label: key.label(),
                value: value.to_string(),
            })
            .collect();

        AppViewModel {
            search_text: self.search.text().to_string(),
            filters: self.filters.clone(),
            active_filters,
            has_active_filters: !self.filters.is_empty() || self.show_favorites_only,
            show_favorites_only: self.show_favorites_only,
            favorites_count: self.favorites.len(),
            status: self.fetch.clone(),
            current_page: self.pagination.current_page(),
            total_pages: self.pagination.total_pages(),
            pagination,
            jobs,
            filter_options: self.filter_options.clone(),
            query: url_codec::encode(&self.canonical()),
            dirty: self.dirty,
        }
    }

    /// Returns whether anything visible changed since the last call, and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn filters_mut(&mut self) -> &mut FilterCriteria {
        &mut self.filters
    }

    pub(crate) fn search_mut(&mut self) -> &mut DebouncedInputBuffer {
        &mut self.search
    }

    pub(crate) fn pagination_mut(&mut self) -> &mut Pagination {
        &mut self.pagination
    }

    pub(crate) fn set_show_favorites_only(&mut self, value: bool) {
        self.show_favorites_only = value;
    }

    pub(crate) fn favorites_mut(&mut self) -> &mut Favorites {
        &mut self.favorites
    }

    pub(crate) fn set_filter_options(&mut self, options: FilterOptions) {
        self.filter_options = options;
    }

    /// Overwrites the canonical triple wholesale, as traversal does.
    pub(crate) fn apply_canonical(&mut self, canonical: CanonicalState) {
        self.search
            .reset_to(canonical.filters.search_query.clone().unwrap_or_default());
        self.filters = canonical.filters;
        self.pagination.restore(canonical.page);
        self.show_favorites_only = canonical.show_favorites_only;
    }

    pub(crate) fn set_synced_query(&mut self, query: &str) {
        self.synced_query = strip_question_mark(query).to_string();
    }

    /// Encodes the canonical state and returns a push only when it differs
    /// from what the address bar already shows.
    pub(crate) fn sync_query(&mut self) -> Option<Effect> {
        let query = url_codec::encode(&self.canonical());
        if query == self.synced_query {
            return None;
        }
        self.synced_query.clone_from(&query);
        Some(Effect::PushQuery { query })
    }

    /// Enters `Loading` under a fresh generation and describes the fetch to run.
    pub(crate) fn begin_fetch(&mut self) -> Effect {
        self.generation += 1;
        self.fetch = FetchStatus::Loading;
        self.dirty = true;
        Effect::FetchListing {
            generation: self.generation,
            filters: self.filters.clone(),
            page: self.pagination.current_page(),
        }
    }

    /// True when a completion tagged `generation` may still commit.
    pub(crate) fn accepts(&self, generation: u64) -> bool {
        generation == self.generation && self.fetch == FetchStatus::Loading
    }

    pub(crate) fn commit_listing(&mut self, page: ListingPage) {
        self.jobs = page.jobs;
        self.pagination.set_total_pages(page.total_pages);
        self.fetch = FetchStatus::Ready;
        self.dirty = true;
    }

    pub(crate) fn fail_listing(&mut self, message: String) {
        self.fetch = FetchStatus::Failed(message);
        self.dirty = true;
    }
}

fn strip_question_mark(query: &str) -> &str {
    query.strip_prefix('?').unwrap_or(query)
}
