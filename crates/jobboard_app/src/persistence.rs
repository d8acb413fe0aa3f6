use jobboard_core::{Favorites, JobId};
use jobboard_engine::KeyValueStore;
use jobboard_logging::{jobboard_error, jobboard_info, jobboard_warn};

/// Reads the persisted favorites. Missing, unreadable or malformed data all
/// yield an empty set; none of them stop the controller from starting.
pub fn load_favorites(store: &dyn KeyValueStore, key: &str) -> Favorites {
    let raw = match store.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return Favorites::new(),
        Err(err) => {
            jobboard_warn!("Could not read favorites from store: {}", err);
            return Favorites::new();
        }
    };

    match serde_json::from_str::<Vec<JobId>>(&raw) {
        Ok(ids) => {
            let favorites: Favorites = ids.into_iter().collect();
            jobboard_info!("Loaded {} favorites", favorites.len());
            favorites
        }
        Err(err) => {
            jobboard_warn!("Ignoring malformed favorites under {:?}: {}", key, err);
            Favorites::new()
        }
    }
}

/// Writes the full set as a JSON array. Failures are logged only; the
/// in-memory set stays authoritative for the session.
pub fn save_favorites(store: &dyn KeyValueStore, key: &str, ids: &[JobId]) {
    let content = match serde_json::to_string(ids) {
        Ok(text) => text,
        Err(err) => {
            jobboard_error!("Failed to serialize favorites: {}", err);
            return;
        }
    };

    if let Err(err) = store.set(key, &content) {
        jobboard_error!("Could not save favorites to store: {}", err);
    }
}
