use serde::{Deserialize, Serialize};

/// One of the three user-facing filter fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FilterKey {
    Search,
    Location,
    Company,
}

impl FilterKey {
    pub const ALL: [FilterKey; 3] = [FilterKey::Search, FilterKey::Location, FilterKey::Company];

    /// Query parameter name used both in the address bar and by the listing API.
    pub fn param_name(self) -> &'static str {
        match self {
            FilterKey::Search => "search_query",
            FilterKey::Location => "location",
            FilterKey::Company => "company_name",
        }
    }

    /// Human-facing label for active filter chips.
    pub fn label(self) -> &'static str {
        match self {
            FilterKey::Search => "Search",
            FilterKey::Location => "Location",
            FilterKey::Company => "Company",
        }
    }
}

/// Committed filter constraints. `None` means "no constraint".
///
/// Empty strings never make it in: every setter normalizes them to `None`,
/// so field-wise equality is also semantic equality.
#[derive(Debug, Clone, PartialEq, Eq, Default, Hash, Serialize, Deserialize)]
pub struct FilterCriteria {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search_query: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
}

impl FilterCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: FilterKey, value: impl Into<String>) -> Self {
        self.set(key, Some(value.into()));
        self
    }

    pub fn get(&self, key: FilterKey) -> Option<&str> {
        match key {
            FilterKey::Search => self.search_query.as_deref(),
            FilterKey::Location => self.location.as_deref(),
            FilterKey::Company => self.company_name.as_deref(),
        }
    }

    /// Sets or clears one field. Returns `true` when the stored value changed.
    pub fn set(&mut self, key: FilterKey, value: Option<String>) -> bool {
        let value = normalize(value);
        let slot = match key {
            FilterKey::Search => &mut self.search_query,
            FilterKey::Location => &mut self.location,
            FilterKey::Company => &mut self.company_name,
        };
        if *slot == value {
            return false;
        }
        *slot = value;
        true
    }

    pub fn clear(&mut self, key: FilterKey) -> bool {
        self.set(key, None)
    }

    pub fn is_empty(&self) -> bool {
        FilterKey::ALL.iter().all(|key| self.get(*key).is_none())
    }

    /// Active fields in display order.
    pub fn active(&self) -> impl Iterator<Item = (FilterKey, &str)> + '_ {
        FilterKey::ALL
            .into_iter()
            .filter_map(move |key| self.get(key).map(|value| (key, value)))
    }
}

fn normalize(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}
