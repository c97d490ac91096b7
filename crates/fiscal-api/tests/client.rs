//! Client behavior against a mock financials API.

use std::time::Duration;

use fiscal_api::{ClientConfig, FinancialsClient, RemoteCacheState};
use fiscal_core::{FinancialRowSource, FiscalError, StatementKind, Symbol};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const ACME_ROWS: &str = r#"[
  {"ticker": "ACME", "company_name": "Acme Corp", "listed_exchange": "NYSE", "year": 2021, "quarter": 0,
   "income_statement": "[{\"periodEndDate\":\"31-12-2021\",\"facts\":{}}]",
   "balance_sheet": null, "cash_flow": ""},
  {"ticker": "ACME", "year": 2021, "quarter": 3,
   "income_statement": null, "balance_sheet": null, "cash_flow": null}
]"#;

const REFRESHED_ROWS: &str = r#"[{"ticker": "ACME", "year": 2022, "quarter": 0}]"#;

fn json(status: u16, body: &str) -> ResponseTemplate {
    ResponseTemplate::new(status).set_body_raw(body, "application/json")
}

async fn mount_get(server: &MockServer, route: &str, response: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(response)
        .mount(server)
        .await;
}

/// Starts a server answering the financials API routes; anything else is 404.
async fn mock_api() -> MockServer {
    let server = MockServer::start().await;

    mount_get(&server, "/api/financials/ACME", json(200, ACME_ROWS)).await;
    mount_get(
        &server,
        "/api/financials/BUSY",
        json(429, r#"{"detail":"slow down"}"#).insert_header("Retry-After", "7"),
    )
    .await;
    mount_get(&server, "/api/financials/BROKEN", json(500, r#"{"detail":"boom"}"#)).await;

    Mock::given(method("GET"))
        .and(path("/api/financials"))
        .and(query_param("force_refresh", "true"))
        .respond_with(json(200, REFRESHED_ROWS))
        .mount(&server)
        .await;
    mount_get(&server, "/api/financials", json(200, ACME_ROWS)).await;

    mount_get(
        &server,
        "/api/cache/status",
        json(
            200,
            r#"{"status":"valid","records":2,"age_minutes":3.5,"ttl_minutes":1440}"#,
        ),
    )
    .await;
    Mock::given(method("POST"))
        .and(path("/api/cache/clear"))
        .respond_with(json(200, r#"{"message":"Cache cleared"}"#))
        .mount(&server)
        .await;

    server
}

fn client(server: &MockServer) -> FinancialsClient {
    FinancialsClient::new(
        ClientConfig::new(server.uri())
            .with_timeout(Duration::from_secs(5))
            .with_min_request_interval(Duration::ZERO),
    )
    .unwrap()
}

#[tokio::test]
async fn test_fetch_rows() {
    let server = mock_api().await;
    let client = client(&server);
    let rows = client.fetch_rows(&Symbol::new("acme")).await.unwrap();

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].ticker.as_str(), "ACME");
    assert_eq!(rows[0].company_name.as_deref(), Some("Acme Corp"));
    assert_eq!(rows[0].listed_exchange.as_deref(), Some("NYSE"));
    assert!(rows[0].statement(StatementKind::Income).is_string());
    assert!(rows[0].statement(StatementKind::Balance).is_null());

    let annual = client.fetch_annual_rows(&Symbol::new("ACME")).await.unwrap();
    assert_eq!(annual.len(), 1);
    assert_eq!(annual[0].year, 2021);
}

#[tokio::test]
async fn test_fetch_all() {
    let server = mock_api().await;
    let client = client(&server);

    assert_eq!(client.fetch_all().await.unwrap().len(), 2);

    let refreshed = client.fetch_all_with(true).await.unwrap();
    assert_eq!(refreshed.len(), 1);
    assert_eq!(refreshed[0].year, 2022);
}

#[tokio::test]
async fn test_status_errors() {
    let server = mock_api().await;
    let client = client(&server);

    let err = client.fetch_rows(&Symbol::new("NOPE")).await.unwrap_err();
    assert!(matches!(err, FiscalError::SymbolNotFound(ref s) if s == "NOPE"));

    let err = client.fetch_rows(&Symbol::new("BUSY")).await.unwrap_err();
    assert!(matches!(
        err,
        FiscalError::RateLimited {
            retry_after: Some(d),
            ..
        } if d == Duration::from_secs(7)
    ));

    let err = client.fetch_rows(&Symbol::new("BROKEN")).await.unwrap_err();
    assert!(matches!(err, FiscalError::Network(ref msg) if msg.contains("500")));
}

#[tokio::test]
async fn test_remote_cache_endpoints() {
    let server = mock_api().await;
    let client = client(&server);

    let status = client.cache_status().await.unwrap();
    assert_eq!(status.status, RemoteCacheState::Valid);
    assert_eq!(status.records, 2);
    assert_eq!(status.age_minutes, Some(3.5));

    client.clear_remote_cache().await.unwrap();
}

#[tokio::test]
async fn test_unreachable_api() {
    let client = FinancialsClient::new(
        ClientConfig::new("http://127.0.0.1:9").with_timeout(Duration::from_secs(2)),
    )
    .unwrap();
    let err = client.fetch_rows(&Symbol::new("ACME")).await.unwrap_err();
    assert!(matches!(err, FiscalError::Network(_)));
}
