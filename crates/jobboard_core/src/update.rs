use jobboard_logging::{jobboard_debug, jobboard_warn};

use crate::url_codec::{self, CanonicalState};
use crate::{AppState, Effect, FilterCriteria, FilterKey, Msg};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let before = state.canonical();
    let effects = match msg {
        Msg::Started => {
            state.mark_dirty();
            let mut effects = vec![Effect::LoadFilterOptions];
            effects.extend(state.sync_query());
            effects.push(state.begin_fetch());
            effects
        }
        Msg::FilterChanged {
            key: FilterKey::Search,
            value,
            at,
        } => {
            // Committed later by `Tick` once the quiet period is over.
            state.search_mut().set(value, at);
            state.mark_dirty();
            Vec::new()
        }
        Msg::FilterChanged { key, value, .. } => {
            state.filters_mut().set(key, Some(value));
            state.pagination_mut().reset();
            commit(&mut state, &before)
        }
        Msg::FilterCleared(key) => {
            if key == FilterKey::Search {
                state.search_mut().reset_to("");
                state.mark_dirty();
            }
            state.filters_mut().clear(key);
            state.pagination_mut().reset();
            commit(&mut state, &before)
        }
        Msg::AllFiltersCleared => {
            *state.filters_mut() = FilterCriteria::default();
            state.search_mut().reset_to("");
            state.set_show_favorites_only(false);
            state.pagination_mut().reset();
            state.mark_dirty();
            commit(&mut state, &before)
        }
        Msg::PageRequested(page) => match state.pagination_mut().set_page(page) {
            Ok(()) => commit(&mut state, &before),
            Err(err) => {
                jobboard_warn!("Rejected page request: {}", err);
                Vec::new()
            }
        },
        Msg::ShowFavoritesOnlyChanged(value) => {
            state.set_show_favorites_only(value);
            state.pagination_mut().reset();
            commit(&mut state, &before)
        }
        Msg::FavoriteToggled(job_id) => {
            state.favorites_mut().toggle(job_id);
            state.mark_dirty();
            vec![Effect::PersistFavorites {
                ids: state.favorites().to_vec(),
            }]
        }
        Msg::RetryRequested => vec![state.begin_fetch()],
        Msg::Navigated { query } => {
            // The address bar already shows `query`; nothing is written back.
            state.set_synced_query(&query);
            state.apply_canonical(url_codec::decode(&query));
            state.mark_dirty();
            if state.canonical() == before {
                Vec::new()
            } else {
                vec![state.begin_fetch()]
            }
        }
        Msg::Tick { now } => match state.search_mut().poll(now) {
            Some(text) => {
                if state.filters_mut().set(FilterKey::Search, Some(text)) {
                    state.pagination_mut().reset();
                }
                commit(&mut state, &before)
            }
            None => Vec::new(),
        },
        Msg::ListingLoaded { generation, result } => {
            if !state.accepts(generation) {
                jobboard_debug!(
                    "Dropping stale listing result generation={} current={}",
                    generation,
                    state.generation()
                );
                return (state, Vec::new());
            }
            match result {
                Ok(page) => state.commit_listing(page),
                Err(message) => state.fail_listing(message),
            }
            Vec::new()
        }
        Msg::FilterOptionsLoaded(result) => {
            match result {
                Ok(options) => {
                    state.set_filter_options(options);
                    state.mark_dirty();
                }
                Err(message) => jobboard_warn!("Failed to load filter options: {}", message),
            }
            Vec::new()
        }
    };

    (state, effects)
}

/// Emits the URL write and the fetch for a canonical change, both at once.
fn commit(state: &mut AppState, before: &CanonicalState) -> Vec<Effect> {
    if state.canonical() == *before {
        return Vec::new();
    }
    let mut effects = Vec::with_capacity(2);
    effects.extend(state.sync_query());
    effects.push(state.begin_fetch());
    effects
}
