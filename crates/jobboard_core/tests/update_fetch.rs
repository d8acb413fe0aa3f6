use std::time::Instant;

use jobboard_core::{
    update, AppState, Effect, Favorites, FetchStatus, FilterKey, JobListing, ListingPage, Msg,
    DEFAULT_QUIET_PERIOD,
};
use pretty_assertions::assert_eq;

fn init_logging() {
    jobboard_logging::initialize_for_tests();
}

fn job(id: u64) -> JobListing {
    JobListing {
        id,
        title: format!("Job {id}"),
        company: None,
        location: Default::default(),
        description: None,
        url: format!("https://jobs.example.com/{id}"),
        source: None,
        date_scraped: None,
        salary_range: None,
        employment_type: None,
        experience_level: None,
    }
}

fn page_of(ids: &[u64], total_pages: u32) -> ListingPage {
    ListingPage {
        jobs: ids.iter().copied().map(job).collect(),
        total_pages,
    }
}

fn generation_of(effects: &[Effect]) -> u64 {
    effects
        .iter()
        .find_map(|effect| match effect {
            Effect::FetchListing { generation, .. } => Some(*generation),
            _ => None,
        })
        .expect("fetch effect")
}

fn displayed_ids(state: &AppState) -> Vec<u64> {
    state.view().jobs.iter().map(|card| card.job.id).collect()
}

#[test]
fn fetch_moves_through_loading_to_ready() {
    init_logging();
    let state = AppState::new();
    assert_eq!(state.fetch_status(), &FetchStatus::Idle);

    let (state, effects) = update(state, Msg::Started);
    assert_eq!(state.fetch_status(), &FetchStatus::Loading);

    let (state, effects) = update(
        state,
        Msg::ListingLoaded {
            generation: generation_of(&effects),
            result: Ok(page_of(&[1, 2, 3], 4)),
        },
    );
    assert!(effects.is_empty());
    assert_eq!(state.fetch_status(), &FetchStatus::Ready);
    assert_eq!(displayed_ids(&state), vec![1, 2, 3]);
    assert_eq!(state.pagination().total_pages(), 4);
}

#[test]
fn failure_keeps_previous_jobs_and_surfaces_message() {
    init_logging();
    let (state, effects) = update(AppState::new(), Msg::Started);
    let (state, _) = update(
        state,
        Msg::ListingLoaded {
            generation: generation_of(&effects),
            result: Ok(page_of(&[7, 8], 2)),
        },
    );

    let (state, effects) = update(state, Msg::PageRequested(2));
    let (state, _) = update(
        state,
        Msg::ListingLoaded {
            generation: generation_of(&effects),
            result: Err("Request failed with status: 502".to_string()),
        },
    );

    assert_eq!(
        state.view().status,
        FetchStatus::Failed("Request failed with status: 502".to_string())
    );
    assert_eq!(displayed_ids(&state), vec![7, 8]);
}

#[test]
fn stale_completion_cannot_overwrite_newer_fetch() {
    init_logging();
    let (state, first) = update(AppState::new(), Msg::Started);
    let (state, second) = update(
        state,
        Msg::FilterChanged {
            key: FilterKey::Location,
            value: "Berlin".to_string(),
            at: Instant::now(),
        },
    );
    let stale = generation_of(&first);
    let current = generation_of(&second);
    assert!(current > stale);

    let (mut state, effects) = update(
        state,
        Msg::ListingLoaded {
            generation: stale,
            result: Ok(page_of(&[99], 9)),
        },
    );
    assert!(effects.is_empty());
    state.consume_dirty();
    assert_eq!(state.fetch_status(), &FetchStatus::Loading);
    assert!(displayed_ids(&state).is_empty());

    let (state, _) = update(
        state,
        Msg::ListingLoaded {
            generation: current,
            result: Ok(page_of(&[3], 1)),
        },
    );
    assert_eq!(state.fetch_status(), &FetchStatus::Ready);
    assert_eq!(displayed_ids(&state), vec![3]);
}

#[test]
fn stale_failure_is_dropped_too() {
    init_logging();
    let (state, first) = update(AppState::new(), Msg::Started);
    let (state, _) = update(state, Msg::ShowFavoritesOnlyChanged(true));

    let (state, _) = update(
        state,
        Msg::ListingLoaded {
            generation: generation_of(&first),
            result: Err("boom".to_string()),
        },
    );
    assert_eq!(state.fetch_status(), &FetchStatus::Loading);
}

#[test]
fn duplicate_completion_for_settled_generation_is_ignored() {
    init_logging();
    let (state, effects) = update(AppState::new(), Msg::Started);
    let generation = generation_of(&effects);
    let (state, _) = update(
        state,
        Msg::ListingLoaded {
            generation,
            result: Ok(page_of(&[1], 1)),
        },
    );
    let (state, _) = update(
        state,
        Msg::ListingLoaded {
            generation,
            result: Err("late".to_string()),
        },
    );
    assert_eq!(state.fetch_status(), &FetchStatus::Ready);
}

#[test]
fn retry_issues_fresh_generation_with_same_inputs() {
    init_logging();
    let state = AppState::restore("location=Oslo&page=2", Favorites::new(), DEFAULT_QUIET_PERIOD);
    let (state, effects) = update(state, Msg::Started);
    let (state, _) = update(
        state,
        Msg::ListingLoaded {
            generation: generation_of(&effects),
            result: Err("offline".to_string()),
        },
    );

    let (state, effects) = update(state, Msg::RetryRequested);
    match effects.as_slice() {
        [Effect::FetchListing {
            generation,
            filters,
            page,
        }] => {
            assert_eq!(*generation, 2);
            assert_eq!(filters.location.as_deref(), Some("Oslo"));
            assert_eq!(*page, 2);
        }
        other => panic!("unexpected effects {other:?}"),
    }
    assert_eq!(state.fetch_status(), &FetchStatus::Loading);
}

#[test]
fn favorites_only_shows_just_favorited_ids() {
    init_logging();
    let favorites: Favorites = [5, 9].into_iter().collect();
    let state = AppState::restore("favorites=true", favorites, DEFAULT_QUIET_PERIOD);
    let (state, effects) = update(state, Msg::Started);

    let (state, _) = update(
        state,
        Msg::ListingLoaded {
            generation: generation_of(&effects),
            result: Ok(page_of(&[1, 5, 9, 12], 1)),
        },
    );

    assert_eq!(displayed_ids(&state), vec![5, 9]);
    assert!(state.view().jobs.iter().all(|card| card.is_favorite));
}

#[test]
fn unfavoriting_in_favorites_only_mode_hides_the_card() {
    init_logging();
    let favorites: Favorites = [5, 9].into_iter().collect();
    let state = AppState::restore("favorites=true", favorites, DEFAULT_QUIET_PERIOD);
    let (state, effects) = update(state, Msg::Started);
    let (state, _) = update(
        state,
        Msg::ListingLoaded {
            generation: generation_of(&effects),
            result: Ok(page_of(&[1, 5, 9], 1)),
        },
    );

    let (state, _) = update(state, Msg::FavoriteToggled(5));
    assert_eq!(displayed_ids(&state), vec![9]);

    let (state, _) = update(state, Msg::ShowFavoritesOnlyChanged(false));
    assert_eq!(displayed_ids(&state), vec![1, 5, 9]);
}

#[test]
fn pager_hidden_for_single_page_or_empty_list() {
    init_logging();
    let (state, effects) = update(AppState::new(), Msg::Started);
    let (state, _) = update(
        state,
        Msg::ListingLoaded {
            generation: generation_of(&effects),
            result: Ok(page_of(&[1], 1)),
        },
    );
    assert_eq!(state.view().pagination, None);

    let (state, effects) = update(state, Msg::ShowFavoritesOnlyChanged(true));
    let (state, _) = update(
        state,
        Msg::ListingLoaded {
            generation: generation_of(&effects),
            result: Ok(page_of(&[1, 2], 6)),
        },
    );
    assert!(state.view().jobs.is_empty());
    assert_eq!(state.view().pagination, None);
}

#[test]
fn zero_total_pages_is_stored_as_one() {
    init_logging();
    let (state, effects) = update(AppState::new(), Msg::Started);
    let (state, _) = update(
        state,
        Msg::ListingLoaded {
            generation: generation_of(&effects),
            result: Ok(page_of(&[], 0)),
        },
    );
    assert_eq!(state.pagination().total_pages(), 1);
}

#[test]
fn filter_options_failure_is_not_surfaced() {
    init_logging();
    let (state, _) = update(AppState::new(), Msg::Started);
    let (state, effects) = update(
        state,
        Msg::FilterOptionsLoaded(Err("unreachable".to_string())),
    );
    assert!(effects.is_empty());
    assert_eq!(state.fetch_status(), &FetchStatus::Loading);
    assert!(state.view().filter_options.locations.is_empty());
}
