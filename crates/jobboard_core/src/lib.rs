//! Job board core: pure state machine, URL codec and view-model helpers.
mod debounce;
mod effect;
mod favorites;
mod filters;
mod listing;
mod msg;
mod pagination;
mod state;
mod update;
pub mod url_codec;
mod view_model;

pub use debounce::{DebouncedInputBuffer, DEFAULT_QUIET_PERIOD};
pub use effect::Effect;
pub use favorites::Favorites;
pub use filters::{FilterCriteria, FilterKey};
pub use listing::{FilterOptions, JobListing, ListingPage, LocationModel};
pub use msg::Msg;
pub use pagination::{PageOutOfRange, Pagination};
pub use state::{AppState, FetchStatus, JobId};
pub use update::update;
pub use url_codec::CanonicalState;
pub use view_model::{ActiveFilterChip, AppViewModel, JobCardView, PaginationView};
