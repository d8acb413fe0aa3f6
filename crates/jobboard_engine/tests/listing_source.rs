use std::time::Duration;

use jobboard_core::{FilterCriteria, FilterKey};
use jobboard_engine::{FailureKind, FetchSettings, HttpListingSource, ListingSource};
use pretty_assertions::assert_eq;
use wiremock::matchers::{method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn source_for(server: &MockServer) -> HttpListingSource {
    HttpListingSource::new(FetchSettings {
        base_url: format!("{}/api/v1/", server.uri()),
        ..FetchSettings::default()
    })
    .expect("client")
}

const PAGE_BODY: &str = r#"{
    "jobs": [
        {
            "id": 5,
            "title": "Rust Engineer",
            "company": "Acme",
            "location": {"city": "Berlin", "country": "DE"},
            "description": null,
            "url": "https://jobs.example.com/5",
            "source": "board",
            "date_scraped": "2024-05-01",
            "employment_type": "Full-time"
        },
        {
            "id": 9,
            "title": "Backend Developer",
            "company": null,
            "location": {"city": "Oslo", "country": "NO"},
            "description": "Services",
            "url": "https://jobs.example.com/9",
            "source": null,
            "date_scraped": null
        }
    ],
    "totalPages": 3
}"#;

#[tokio::test]
async fn list_sends_filters_and_parses_page() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/jobs"))
        .and(query_param("page", "2"))
        .and(query_param("limit", "12"))
        .and(query_param("location", "Berlin"))
        .and(query_param("search_query", "rust dev"))
        .and(query_param_is_missing("company_name"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(PAGE_BODY, "application/json"))
        .expect(1)
        .mount(&server)
        .await;

    let filters = FilterCriteria::new()
        .with(FilterKey::Location, "Berlin")
        .with(FilterKey::Search, "rust dev");
    let page = source_for(&server)
        .list(&filters, 2, 12)
        .await
        .expect("list ok");

    assert_eq!(page.total_pages, 3);
    let ids: Vec<_> = page.jobs.iter().map(|job| job.id).collect();
    assert_eq!(ids, vec![5, 9]);
    assert_eq!(page.jobs[0].location.city, "Berlin");
    assert_eq!(page.jobs[0].employment_type.as_deref(), Some("Full-time"));
    assert_eq!(page.jobs[1].company, None);
}

#[tokio::test]
async fn filter_options_are_parsed() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/jobs/filters"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            r#"{"locations":["Berlin","Oslo"],"company_names":["Acme"],"employment_types":[]}"#,
            "application/json",
        ))
        .mount(&server)
        .await;

    let options = source_for(&server).filter_options().await.expect("options");
    assert_eq!(options.locations, vec!["Berlin", "Oslo"]);
    assert_eq!(options.company_names, vec!["Acme"]);
    assert!(options.employment_types.is_empty());
}

#[tokio::test]
async fn error_detail_is_used_as_message() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/jobs"))
        .respond_with(
            ResponseTemplate::new(422)
                .set_body_raw(r#"{"detail":"page must be positive"}"#, "application/json"),
        )
        .mount(&server)
        .await;

    let err = source_for(&server)
        .list(&FilterCriteria::new(), 1, 12)
        .await
        .unwrap_err();
    assert_eq!(err.kind, FailureKind::HttpStatus(422));
    assert_eq!(err.to_string(), "page must be positive");
    assert!(!err.is_parse());
}

#[tokio::test]
async fn json_error_without_detail_is_reserialized() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/jobs"))
        .respond_with(
            ResponseTemplate::new(500).set_body_raw(r#"{"error":"db down"}"#, "application/json"),
        )
        .mount(&server)
        .await;

    let err = source_for(&server)
        .list(&FilterCriteria::new(), 1, 12)
        .await
        .unwrap_err();
    assert_eq!(err.message, r#"{"error":"db down"}"#);
}

#[tokio::test]
async fn text_error_is_truncated() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/jobs"))
        .respond_with(ResponseTemplate::new(503).set_body_string("x".repeat(800)))
        .mount(&server)
        .await;

    let err = source_for(&server)
        .list(&FilterCriteria::new(), 1, 12)
        .await
        .unwrap_err();
    assert_eq!(err.kind, FailureKind::HttpStatus(503));
    assert_eq!(err.message.len(), 500);
}

#[tokio::test]
async fn empty_error_body_falls_back_to_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/jobs"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let err = source_for(&server)
        .list(&FilterCriteria::new(), 1, 12)
        .await
        .unwrap_err();
    assert_eq!(err.kind, FailureKind::HttpStatus(404));
    assert_eq!(err.message, "Request failed with status: 404");
}

#[tokio::test]
async fn malformed_success_body_is_a_parse_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/jobs"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let err = source_for(&server)
        .list(&FilterCriteria::new(), 1, 12)
        .await
        .unwrap_err();
    assert!(err.is_parse());
    assert_eq!(err.message, "Received an invalid response from the server.");
}

#[tokio::test]
async fn slow_response_times_out_when_limit_configured() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/jobs"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_millis(250))
                .set_body_raw(PAGE_BODY, "application/json"),
        )
        .mount(&server)
        .await;

    let source = HttpListingSource::new(FetchSettings {
        base_url: format!("{}/api/v1", server.uri()),
        request_timeout: Some(Duration::from_millis(50)),
        ..FetchSettings::default()
    })
    .expect("client");

    let err = source
        .list(&FilterCriteria::new(), 1, 12)
        .await
        .unwrap_err();
    assert_eq!(err.kind, FailureKind::Timeout);
}

#[tokio::test]
async fn oversized_response_is_rejected() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/jobs"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(PAGE_BODY, "application/json"))
        .mount(&server)
        .await;

    let source = HttpListingSource::new(FetchSettings {
        base_url: format!("{}/api/v1", server.uri()),
        max_bytes: 10,
        ..FetchSettings::default()
    })
    .expect("client");

    let err = source
        .list(&FilterCriteria::new(), 1, 12)
        .await
        .unwrap_err();
    assert!(matches!(err.kind, FailureKind::TooLarge { max_bytes: 10, .. }));
}

#[tokio::test]
async fn oversized_error_body_still_yields_status_message() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/jobs"))
        .respond_with(ResponseTemplate::new(503).set_body_string("e".repeat(2000)))
        .mount(&server)
        .await;

    let source = HttpListingSource::new(FetchSettings {
        base_url: format!("{}/api/v1", server.uri()),
        max_bytes: 1000,
        ..FetchSettings::default()
    })
    .expect("client");

    let err = source
        .list(&FilterCriteria::new(), 1, 12)
        .await
        .unwrap_err();
    assert_eq!(err.kind, FailureKind::HttpStatus(503));
    assert_eq!(err.message, "e".repeat(500));
}

#[tokio::test]
async fn zero_detail_reserializes_whole_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/jobs"))
        .respond_with(
            ResponseTemplate::new(400).set_body_raw(r#"{"detail":0}"#, "application/json"),
        )
        .mount(&server)
        .await;

    let err = source_for(&server)
        .list(&FilterCriteria::new(), 1, 12)
        .await
        .unwrap_err();
    assert_eq!(err.message, r#"{"detail":0}"#);
}

#[tokio::test]
async fn numeric_detail_is_used_as_message() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/jobs"))
        .respond_with(
            ResponseTemplate::new(400).set_body_raw(r#"{"detail":42}"#, "application/json"),
        )
        .mount(&server)
        .await;

    let err = source_for(&server)
        .list(&FilterCriteria::new(), 1, 12)
        .await
        .unwrap_err();
    assert_eq!(err.message, "42");
}

#[test]
fn listing_url_omits_absent_filters() {
    let source = HttpListingSource::new(FetchSettings {
        base_url: "http://api.example.com/api/v1".to_string(),
        ..FetchSettings::default()
    })
    .expect("client");

    let url = source
        .listing_url(
            &FilterCriteria::new().with(FilterKey::Company, "Acme & Co"),
            1,
            12,
        )
        .expect("url");
    assert_eq!(
        url.as_str(),
        "http://api.example.com/api/v1/jobs?page=1&limit=12&company_name=Acme+%26+Co"
    );
}
