use std::sync::{mpsc, Arc};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use jobboard_core::{update, AppState, AppViewModel, FilterKey, JobId, Msg};
use jobboard_engine::{
    EngineEvent, EngineHandle, HttpListingSource, KeyValueStore, ListingSource, NavigationPort,
};
use jobboard_logging::jobboard_info;

use crate::config::ControllerConfig;
use crate::effects::EffectRunner;
use crate::persistence;

/// Owns the job board state and keeps it in step with the listing source,
/// the address bar and the favorites store.
///
/// All transitions happen on the caller's thread. Engine completions and
/// history traversals queue up until [`Controller::process_pending`] drains
/// them, one message at a time.
pub struct Controller {
    state: AppState,
    runner: EffectRunner,
    traversal_rx: mpsc::Receiver<String>,
    tick_interval: Duration,
}

impl Controller {
    /// Restores state from the current query string and the persisted
    /// favorites, then issues the first fetches.
    pub fn start(
        config: &ControllerConfig,
        source: Arc<dyn ListingSource>,
        navigation: Box<dyn NavigationPort>,
        store: Arc<dyn KeyValueStore>,
    ) -> Result<Self> {
        let engine =
            EngineHandle::new(source, config.page_size).context("Failed to start listing engine")?;

        let (traversal_tx, traversal_rx) = mpsc::channel();
        navigation.subscribe(traversal_tx);

        let favorites = persistence::load_favorites(store.as_ref(), &config.favorites_key);
        let query = navigation.current_query();
        jobboard_info!("Starting controller at ?{}", query);
        let state = AppState::restore(&query, favorites, config.search_debounce());

        let runner = EffectRunner::new(engine, navigation, store, config.favorites_key.clone());
        let mut controller = Self {
            state,
            runner,
            traversal_rx,
            tick_interval: config.tick_interval(),
        };
        controller.dispatch(Msg::Started);
        Ok(controller)
    }

    /// Same as [`Controller::start`], talking HTTP to `config.api_base_url`.
    pub fn start_http(
        config: &ControllerConfig,
        navigation: Box<dyn NavigationPort>,
        store: Arc<dyn KeyValueStore>,
    ) -> Result<Self> {
        let source = HttpListingSource::new(config.fetch_settings())
            .context("Failed to build HTTP listing source")?;
        Self::start(config, Arc::new(source), navigation, store)
    }

    pub fn dispatch(&mut self, msg: Msg) {
        let state = std::mem::take(&mut self.state);
        let (state, effects) = update(state, msg);
        self.state = state;
        self.runner.run(effects);
    }

    /// Drains traversals and engine completions, then lets the debounce
    /// buffer commit if its quiet period has passed by `now`.
    pub fn process_pending(&mut self, now: Instant) {
        while let Ok(query) = self.traversal_rx.try_recv() {
            self.dispatch(Msg::Navigated { query });
        }
        while let Some(event) = self.runner.try_recv() {
            self.dispatch(msg_from_engine(event));
        }
        self.dispatch(Msg::Tick { now });
    }

    /// Waits up to `timeout` for one engine completion and applies it.
    /// Returns `false` if nothing arrived.
    pub fn wait_for_engine(&mut self, timeout: Duration) -> bool {
        match self.runner.recv_timeout(timeout) {
            Some(event) => {
                self.dispatch(msg_from_engine(event));
                true
            }
            None => false,
        }
    }

    /// Ticks at the configured interval for `duration`, processing as it goes.
    pub fn run_for(&mut self, duration: Duration) {
        let deadline = Instant::now() + duration;
        loop {
            let now = Instant::now();
            self.process_pending(now);
            if now >= deadline {
                break;
            }
            thread::sleep(self.tick_interval.min(deadline - now));
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn view(&self) -> AppViewModel {
        self.state.view()
    }

    /// The view, if anything changed since the last render.
    pub fn take_render(&mut self) -> Option<AppViewModel> {
        let view = self.state.view();
        self.state.consume_dirty().then_some(view)
    }

    pub fn type_search(&mut self, text: impl Into<String>, at: Instant) {
        self.dispatch(Msg::FilterChanged {
            key: FilterKey::Search,
            value: text.into(),
            at,
        });
    }

    pub fn select_filter(&mut self, key: FilterKey, value: impl Into<String>) {
        self.dispatch(Msg::FilterChanged {
            key,
            value: value.into(),
            at: Instant::now(),
        });
    }

    pub fn clear_filter(&mut self, key: FilterKey) {
        self.dispatch(Msg::FilterCleared(key));
    }

    pub fn clear_all(&mut self) {
        self.dispatch(Msg::AllFiltersCleared);
    }

    pub fn request_page(&mut self, page: u32) {
        self.dispatch(Msg::PageRequested(page));
    }

    pub fn set_show_favorites_only(&mut self, value: bool) {
        self.dispatch(Msg::ShowFavoritesOnlyChanged(value));
    }

    pub fn toggle_favorite(&mut self, job_id: JobId) {
        self.dispatch(Msg::FavoriteToggled(job_id));
    }

    pub fn retry(&mut self) {
        self.dispatch(Msg::RetryRequested);
    }
}

fn msg_from_engine(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::ListingCompleted { generation, result } => Msg::ListingLoaded {
            generation,
            result: result.map_err(|err| err.message),
        },
        EngineEvent::FilterOptionsCompleted(result) => {
            Msg::FilterOptionsLoaded(result.map_err(|err| err.to_string()))
        }
    }
}
