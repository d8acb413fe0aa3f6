//! Mapping between [`CanonicalState`] and the address bar's query string.
//!
//! Encoding is minimal: default values are omitted, so the empty string is the
//! encoding of the initial state. Decoding never fails; anything it cannot
//! make sense of falls back to the default for that field.

use url::form_urlencoded;

use crate::{FilterCriteria, FilterKey};

const FAVORITES_PARAM: &str = "favorites";
const PAGE_PARAM: &str = "page";

/// The URL-representable part of the controller state.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CanonicalState {
    pub filters: FilterCriteria,
    pub page: u32,
    pub show_favorites_only: bool,
}

impl Default for CanonicalState {
    fn default() -> Self {
        Self {
            filters: FilterCriteria::default(),
            page: 1,
            show_favorites_only: false,
        }
    }
}

/// Encodes without a leading `?`.
pub fn encode(state: &CanonicalState) -> String {
    let mut serializer = form_urlencoded::Serializer::new(String::new());
    for (key, value) in state.filters.active() {
        serializer.append_pair(key.param_name(), value);
    }
    if state.show_favorites_only {
        serializer.append_pair(FAVORITES_PARAM, "true");
    }
    if state.page > 1 {
        serializer.append_pair(PAGE_PARAM, &state.page.to_string());
    }
    serializer.finish()
}

/// Accepts the query with or without its leading `?`.
pub fn decode(query: &str) -> CanonicalState {
    let query = query.strip_prefix('?').unwrap_or(query);
    let mut state = CanonicalState::default();
    let mut seen_filters = Vec::with_capacity(FilterKey::ALL.len());
    let mut seen_favorites = false;
    let mut seen_page = false;

    for (name, value) in form_urlencoded::parse(query.as_bytes()) {
        if let Some(key) = FilterKey::ALL
            .into_iter()
            .find(|key| key.param_name() == name)
        {
            if !seen_filters.contains(&key) {
                seen_filters.push(key);
                state.filters.set(key, Some(value.into_owned()));
            }
        } else if name == FAVORITES_PARAM && !seen_favorites {
            seen_favorites = true;
            state.show_favorites_only = value == "true";
        } else if name == PAGE_PARAM && !seen_page {
            seen_page = true;
            state.page = parse_page(&value);
        }
    }

    state
}

fn parse_page(raw: &str) -> u32 {
    raw.trim()
        .parse::<u32>()
        .ok()
        .filter(|page| *page >= 1)
        .unwrap_or(1)
}
