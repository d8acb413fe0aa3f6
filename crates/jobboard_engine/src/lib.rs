//! Job board engine: listing source IO and the ports the controller talks through.
mod engine;
mod navigation;
mod persist;
mod source;
mod store;
mod types;

pub use engine::EngineHandle;
pub use navigation::{MemoryHistory, NavigationPort};
pub use persist::{ensure_state_dir, AtomicFileWriter, PersistError};
pub use source::{FetchSettings, HttpListingSource, ListingSource, DEFAULT_PAGE_SIZE};
pub use store::{FileKeyValueStore, KeyValueStore, MemoryKeyValueStore, StoreError};
pub use types::{EngineEvent, FailureKind, ListingError};
