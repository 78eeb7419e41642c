//! Tests for the provider module

use super::*;
use crate::config::Config;
use crate::error::Error;
use crate::http::{BackoffType, HttpClient, HttpClientConfig};
use async_trait::async_trait;
use pretty_assertions::assert_eq;
use serde_json::json;
use std::path::PathBuf;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn record(id: u64, name: &str) -> RawRecord {
    let mut map = RawRecord::new();
    map.insert("id".into(), json!(id));
    map.insert("name".into(), json!(name));
    map
}

fn page(success: bool, records: Vec<RawRecord>) -> PageResponse {
    PageResponse {
        success,
        response: PageBody {
            employers: records,
            total_pages: None,
        },
    }
}

/// Stub provider that reports `success: false` on every attempt
struct AlwaysFailingApi {
    calls: AtomicU32,
    records: Vec<RawRecord>,
}

#[async_trait]
impl EmployerApi for AlwaysFailingApi {
    async fn fetch_page(&self, _action: &str, _page: u32) -> crate::Result<PageResponse> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(page(false, self.records.clone()))
    }
}

/// Stub provider that succeeds starting from the nth attempt
struct EventuallySucceedingApi {
    calls: AtomicU32,
    succeed_on: u32,
}

#[async_trait]
impl EmployerApi for EventuallySucceedingApi {
    async fn fetch_page(&self, _action: &str, _page: u32) -> crate::Result<PageResponse> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(page(call >= self.succeed_on, vec![record(1, "Acme")]))
    }
}

struct TransportFailingApi;

#[async_trait]
impl EmployerApi for TransportFailingApi {
    async fn fetch_page(&self, _action: &str, _page: u32) -> crate::Result<PageResponse> {
        Err(Error::TransportUnavailable {
            attempts: 6,
            last_error: "HTTP 503".into(),
        })
    }
}

#[tokio::test]
async fn test_retrier_stops_after_five_attempts_and_keeps_last_records() {
    let api = Arc::new(AlwaysFailingApi {
        calls: AtomicU32::new(0),
        records: vec![record(9, "Last")],
    });
    let retrier = PageRetrier::new(api.clone(), EMPLOYERS_ACTION);

    let records = retrier.get_page(3).await.unwrap();

    assert_eq!(api.calls.load(Ordering::SeqCst), MAX_PAGE_ATTEMPTS);
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["name"], json!("Last"));
}

#[tokio::test]
async fn test_retrier_empty_page_is_not_fatal() {
    let api = Arc::new(AlwaysFailingApi {
        calls: AtomicU32::new(0),
        records: vec![],
    });
    let retrier = PageRetrier::new(api, EMPLOYERS_ACTION);

    let records = retrier.get_page(1).await.unwrap();
    assert!(records.is_empty());
}

#[tokio::test]
async fn test_retrier_stops_early_on_success() {
    let api = Arc::new(EventuallySucceedingApi {
        calls: AtomicU32::new(0),
        succeed_on: 3,
    });
    let retrier = PageRetrier::new(api.clone(), EMPLOYERS_ACTION);

    let records = retrier.get_page(1).await.unwrap();

    assert_eq!(api.calls.load(Ordering::SeqCst), 3);
    assert_eq!(records.len(), 1);
}

#[tokio::test]
async fn test_retrier_single_attempt_on_immediate_success() {
    let api = Arc::new(EventuallySucceedingApi {
        calls: AtomicU32::new(0),
        succeed_on: 1,
    });
    let retrier = PageRetrier::new(api.clone(), EMPLOYERS_ACTION);

    retrier.get_page(1).await.unwrap();
    assert_eq!(api.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_retrier_propagates_transport_errors() {
    let retrier = PageRetrier::new(Arc::new(TransportFailingApi), EMPLOYERS_ACTION);

    let err = retrier.get_page(1).await.unwrap_err();
    assert!(matches!(err, Error::TransportUnavailable { .. }));
}

#[test]
fn test_page_response_tolerant_deserialization() {
    // Provider omits `response` entirely on failures
    let parsed: PageResponse = serde_json::from_str(r#"{"success": false}"#).unwrap();
    assert!(!parsed.success);
    assert!(parsed.response.employers.is_empty());
    assert!(parsed.response.total_pages.is_none());

    // Missing success flag defaults to false
    let parsed: PageResponse = serde_json::from_str(r#"{}"#).unwrap();
    assert!(!parsed.success);
}

#[test]
fn test_page_response_full_deserialization() {
    let parsed: PageResponse = serde_json::from_value(json!({
        "success": true,
        "response": {
            "employers": [{"id": 1, "name": "Acme"}],
            "totalNumberOfPages": 42
        }
    }))
    .unwrap();

    assert!(parsed.success);
    assert_eq!(parsed.record_count(), 1);
    assert_eq!(parsed.response.total_pages, Some(42));
}

fn test_config(base_url: String) -> Config {
    Config {
        partner_id: "12345".into(),
        partner_key: "secret".into(),
        base_url,
        client_ip: "10.0.0.1".into(),
        user_agent: "Mozilla/5.0".into(),
        store_path: PathBuf::from(":memory:"),
        output_path: PathBuf::from("employers.parquet"),
        workers: 2,
    }
}

fn fast_http() -> HttpClient {
    let config = HttpClientConfig::builder()
        .backoff(
            BackoffType::Constant,
            Duration::from_millis(10),
            Duration::from_millis(10),
        )
        .no_rate_limit()
        .build();
    HttpClient::with_config(config).unwrap()
}

#[tokio::test]
async fn test_client_sends_credentials_and_page_number() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .and(query_param("v", "1"))
        .and(query_param("format", "json"))
        .and(query_param("t.p", "12345"))
        .and(query_param("t.k", "secret"))
        .and(query_param("userip", "10.0.0.1"))
        .and(query_param("useragent", "Mozilla/5.0"))
        .and(query_param("action", "employers"))
        .and(query_param("pn", "7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "response": {"employers": [{"id": 1}], "totalNumberOfPages": 9}
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = GlassdoorClient::new(fast_http(), &test_config(mock_server.uri()));
    let response = client.fetch_page(EMPLOYERS_ACTION, 7).await.unwrap();

    assert!(response.success);
    assert_eq!(response.record_count(), 1);
}

#[tokio::test]
async fn test_client_surfaces_transport_exhaustion() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let http = {
        let config = HttpClientConfig::builder()
            .max_retries(1)
            .backoff(
                BackoffType::Constant,
                Duration::from_millis(10),
                Duration::from_millis(10),
            )
            .no_rate_limit()
            .build();
        HttpClient::with_config(config).unwrap()
    };
    let client = GlassdoorClient::new(http, &test_config(mock_server.uri()));

    let err = client.fetch_page(EMPLOYERS_ACTION, 1).await.unwrap_err();
    assert!(matches!(err, Error::TransportUnavailable { attempts: 2, .. }));
}
