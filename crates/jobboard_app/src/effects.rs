use std::sync::Arc;
use std::time::Duration;

use jobboard_core::Effect;
use jobboard_engine::{EngineEvent, EngineHandle, KeyValueStore, NavigationPort};
use jobboard_logging::{jobboard_debug, jobboard_trace};

use crate::persistence;

/// Executes the effects returned by `update` against the engine and the ports.
pub struct EffectRunner {
    engine: EngineHandle,
    navigation: Box<dyn NavigationPort>,
    store: Arc<dyn KeyValueStore>,
    favorites_key: String,
}

impl EffectRunner {
    pub fn new(
        engine: EngineHandle,
        navigation: Box<dyn NavigationPort>,
        store: Arc<dyn KeyValueStore>,
        favorites_key: impl Into<String>,
    ) -> Self {
        Self {
            engine,
            navigation,
            store,
            favorites_key: favorites_key.into(),
        }
    }

    pub fn run(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::FetchListing {
                    generation,
                    filters,
                    page,
                } => {
                    self.engine.fetch_listing(generation, filters, page);
                }
                Effect::LoadFilterOptions => {
                    self.engine.load_filter_options();
                }
                Effect::PushQuery { query } => {
                    if self.navigation.push_query(&query) {
                        jobboard_debug!("Pushed history entry ?{}", query);
                    } else {
                        jobboard_trace!("History already at ?{}", query);
                    }
                }
                Effect::PersistFavorites { ids } => {
                    persistence::save_favorites(self.store.as_ref(), &self.favorites_key, &ids);
                }
            }
        }
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.engine.try_recv()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<EngineEvent> {
        self.engine.recv_timeout(timeout)
    }
}
