//! HTTP behaviour of the generation fetcher and the chat classifier against a
//! mock server.
//!
//! Both clients are blocking, so each call runs on the blocking pool while the
//! mock server keeps serving on the test runtime.

use gencf_algo::{apply_ai_pass, flag_records, AiPassConfig};
use gencf_core::{
    BatchClassifier, ClassificationFailure, DataSource, EnrichedPlantRecord, FetchError,
    PlantSummary, ReportingPeriod,
};
use gencf_io::{ChatClassifier, ChatClassifierConfig, EiaGenerationFetcher};
use indexmap::IndexMap;
use serde_json::json;
use std::net::TcpListener;
use std::time::Duration;
use tokio::task::spawn_blocking;
use wiremock::matchers::{body_partial_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const FACILITY_FUEL_PATH: &str = "/v2/electricity/facility-fuel/data/";
const CHAT_PATH: &str = "/v1/chat/completions";

fn classifier_for(endpoint: String) -> ChatClassifier {
    ChatClassifier::new(
        "test-key",
        "February 2025",
        ChatClassifierConfig {
            endpoint,
            timeout: Duration::from_secs(5),
            ..ChatClassifierConfig::default()
        },
    )
}

fn summary(name: &str) -> PlantSummary {
    PlantSummary {
        plant_name: name.into(),
        fuel_type: "Nuclear".into(),
        capacity_factor: 45.0,
        capacity: Some(1000.0),
        state: "IL".into(),
    }
}

fn nuclear_record(name: &str) -> EnrichedPlantRecord {
    EnrichedPlantRecord {
        plant_code: name.into(),
        plant_name: Some(name.into()),
        utility_name: None,
        address: None,
        longitude: None,
        latitude: None,
        state: Some("IL".into()),
        state_description: Some("Illinois".into()),
        period: Some("2025-02".into()),
        gross_generation: Some(1.0),
        gross_generation_units: None,
        fuel_type_description: Some("Nuclear".into()),
        fuel_types: vec![],
        total_capacity_mw: Some(1000.0),
        capacity_by_type: IndexMap::new(),
        capacity_factor_percent: Some(45.0),
        primary_source: None,
        source_description: None,
        tech_description: None,
        sector_name: None,
        data_source: DataSource::ApiCsvMerged,
    }
}

fn chat_reply(content: &str) -> serde_json::Value {
    json!({"choices": [{"message": {"role": "assistant", "content": content}}]})
}

#[tokio::test]
async fn test_fetcher_sends_monthly_query_and_decodes_rows() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(FACILITY_FUEL_PATH))
        .and(query_param("api_key", "secret"))
        .and(query_param("frequency", "monthly"))
        .and(query_param("data[0]", "gross-generation"))
        .and(query_param("start", "2025-02"))
        .and(query_param("end", "2025-02"))
        .and(query_param("sort[0][direction]", "desc"))
        .and(query_param("length", "5000"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "response": {"total": "1", "data": [
                {"period": "2025-02", "plantCode": "3", "plantName": "Barry", "fuel2002": "NG",
                 "fuelTypeDescription": "Natural Gas", "state": "AL",
                 "stateDescription": "Alabama", "primeMover": "CT",
                 "gross-generation": "812.5", "gross-generation-units": "megawatthours"}
            ]}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let fetcher = EiaGenerationFetcher::new("secret").with_base_url(format!("{}/v2", server.uri()));
    let period: ReportingPeriod = "2025-02".parse().unwrap();
    let rows = spawn_blocking(move || fetcher.fetch_generation(&period))
        .await
        .unwrap()
        .unwrap();

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].plant_code, "3");
    assert_eq!(rows[0].generation_mwh(), Some(812.5));
}

#[tokio::test]
async fn test_fetcher_maps_http_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({"error": "invalid api_key"})))
        .mount(&server)
        .await;

    let fetcher = EiaGenerationFetcher::new("bad").with_base_url(server.uri());
    let period: ReportingPeriod = "2025-02".parse().unwrap();
    let result = spawn_blocking(move || fetcher.fetch_generation(&period))
        .await
        .unwrap();

    assert_eq!(result, Err(FetchError::Status(403)));
}

#[tokio::test]
async fn test_fetcher_empty_data_is_empty_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"response": {"data": []}})),
        )
        .mount(&server)
        .await;

    let fetcher = EiaGenerationFetcher::new("k").with_base_url(server.uri());
    let period: ReportingPeriod = "2025-02".parse().unwrap();
    let result = spawn_blocking(move || fetcher.fetch_generation(&period))
        .await
        .unwrap();

    assert_eq!(result, Err(FetchError::Empty));
}

#[tokio::test]
async fn test_classifier_parses_noisy_reply() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(CHAT_PATH))
        .and(header("authorization", "Bearer test-key"))
        .and(body_partial_json(json!({"model": "deepseek-chat", "max_tokens": 1000})))
        .respond_with(ResponseTemplate::new(200).set_body_json(chat_reply(
            "Here is the analysis:\n{\"Byron\": \"Low_Nuclear\"}\nLet me know.",
        )))
        .expect(1)
        .mount(&server)
        .await;

    let classifier = classifier_for(format!("{}{CHAT_PATH}", server.uri()));
    let labels = spawn_blocking(move || classifier.classify_batch(&[summary("Byron")]))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(labels["Byron"].to_string(), "Low_Nuclear");

    let requests = server.received_requests().await.unwrap();
    let sent: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
    let prompt = sent["messages"][0]["content"].as_str().unwrap();
    assert!(prompt.contains("February 2025"));
    assert!(prompt.contains("\"plantName\": \"Byron\""));
}

#[tokio::test]
async fn test_classifier_reports_server_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({"error": "overloaded"})))
        .mount(&server)
        .await;

    let classifier = classifier_for(format!("{}{CHAT_PATH}", server.uri()));
    let outcome = spawn_blocking(move || classifier.classify_batch(&[summary("Byron")]))
        .await
        .unwrap();

    assert_eq!(outcome, Err(ClassificationFailure::Status(500)));
}

/// An HTTP 500 from the classifier leaves the batch on deterministic flags.
#[tokio::test]
async fn test_server_error_falls_back_to_deterministic_flags() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(CHAT_PATH))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    let classifier = classifier_for(format!("{}{CHAT_PATH}", server.uri()));
    let flagged = flag_records(vec![nuclear_record("Byron"), nuclear_record("Braidwood")]);
    let before = flagged.clone();

    let (flagged, pass) = spawn_blocking(move || {
        let mut flagged = flagged;
        let pass = apply_ai_pass(
            &mut flagged,
            &classifier,
            &AiPassConfig {
                batch_size: 25,
                pacing: Duration::ZERO,
            },
        );
        (flagged, pass)
    })
    .await
    .unwrap();

    assert_eq!(pass.failed, 2);
    assert_eq!(flagged, before);
    assert!(flagged
        .iter()
        .all(|r| r.capacity_factor_flag.to_string() == "Unusual_Nuclear"));
}

#[test]
fn test_unreachable_classifier_is_transport_failure() {
    // bind then drop to get a port nothing listens on
    let port = TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port();
    let classifier = classifier_for(format!("http://127.0.0.1:{port}{CHAT_PATH}"));

    let outcome = classifier.classify_batch(&[summary("Byron")]);
    assert!(matches!(outcome, Err(ClassificationFailure::Transport(_))));
}
