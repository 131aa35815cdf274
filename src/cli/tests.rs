//! Tests for the CLI

use super::*;
use crate::error::Error;
use crate::message::MessageWriter;
use crate::stream::USAGE_EXPORT_PATH;
use clap::Parser;
use serde_json::{json, Value};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn config_json(api_url: &str) -> String {
    json!({
        "auth_token": "sk-test",
        "start_date": "2023-08-01T00:00:00Z",
        "end_date": "2023-08-31T00:00:00Z",
        "exclude_project_costs": false,
        "file_format": "json",
        "group_by": "user_id",
        "api_url": api_url
    })
    .to_string()
}

async fn run_cli(args: &[&str]) -> (crate::error::Result<()>, Vec<Value>) {
    let cli = Cli::try_parse_from(args).unwrap();
    let mut out = MessageWriter::new(Vec::new());
    let result = Runner::new(cli).run_with(&mut out).await;
    let text = String::from_utf8(out.into_inner()).unwrap();
    let messages = text
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();
    (result, messages)
}

async fn mount_two_pages(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path(USAGE_EXPORT_PATH))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{"name": "c", "user_id": "u", "date": "2023-08-02", "timestamp": "1690934400"}]
        })))
        .with_priority(1)
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path(USAGE_EXPORT_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [
                {"name": "a", "user_id": "u", "date": "2023-08-01", "timestamp": "1690848000"},
                {"name": "b", "user_id": "u", "date": "2023-08-01", "timestamp": 1690848000}
            ],
            "next_page": 2
        })))
        .mount(server)
        .await;
}

#[test]
fn test_parse_commands() {
    let cli = Cli::try_parse_from(["tap-openai", "read", "--config", "c.json", "--max-records", "5"])
        .unwrap();
    assert_eq!(cli.command, Commands::Read { max_records: Some(5) });
    assert_eq!(cli.config.unwrap().to_str(), Some("c.json"));

    let cli = Cli::try_parse_from(["tap-openai", "-v", "--pretty", "discover"]).unwrap();
    assert!(cli.verbose);
    assert!(cli.pretty);
    assert_eq!(cli.command, Commands::Discover);

    assert!(Cli::try_parse_from(["tap-openai"]).is_err());
    assert!(Cli::try_parse_from(["tap-openai", "serve"]).is_err());
}

#[tokio::test]
async fn test_spec_prints_config_schema() {
    let (result, messages) = run_cli(&["tap-openai", "spec"]).await;
    result.unwrap();
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0]["properties"]["auth_token"]["secret"], json!(true));
    assert!(messages[0]["required"]
        .as_array()
        .unwrap()
        .contains(&json!("start_date")));
}

#[tokio::test]
async fn test_discover_prints_catalog() {
    let config = config_json("http://localhost:1");
    let (result, messages) = run_cli(&["tap-openai", "discover", "--config-json", &config]).await;
    result.unwrap();
    assert_eq!(messages[0]["streams"][0]["stream"], "billing_usage");
}

#[tokio::test]
async fn test_discover_rejects_bad_config() {
    let (result, messages) = run_cli(&[
        "tap-openai",
        "discover",
        "--config-json",
        r#"{"auth_token": "sk"}"#,
    ])
    .await;
    assert!(result.unwrap_err().is_config());
    assert!(messages.is_empty());
}

#[tokio::test]
async fn test_check_succeeds() {
    let server = MockServer::start().await;
    mount_two_pages(&server).await;

    let config = config_json(&server.uri());
    let (result, messages) = run_cli(&["tap-openai", "check", "--config-json", &config]).await;
    result.unwrap();
    assert_eq!(messages[0]["type"], "CONNECTION_STATUS");
    assert_eq!(messages[0]["connectionStatus"]["status"], "SUCCEEDED");
    assert_eq!(server.received_requests().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_check_reports_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(401).set_body_string("bad key"))
        .mount(&server)
        .await;

    let config = config_json(&server.uri());
    let (result, messages) = run_cli(&["tap-openai", "check", "--config-json", &config]).await;
    result.unwrap();
    assert_eq!(messages[0]["connectionStatus"]["status"], "FAILED");
    assert!(messages[0]["connectionStatus"]["message"]
        .as_str()
        .unwrap()
        .contains("401"));
}

#[tokio::test]
async fn test_read_emits_schema_records_state() {
    let server = MockServer::start().await;
    mount_two_pages(&server).await;

    let config = config_json(&server.uri());
    let (result, messages) = run_cli(&["tap-openai", "read", "--config-json", &config]).await;
    result.unwrap();

    let types: Vec<&str> = messages.iter().map(|m| m["type"].as_str().unwrap()).collect();
    assert_eq!(types, vec!["SCHEMA", "RECORD", "RECORD", "RECORD", "STATE"]);
    assert_eq!(messages[1]["record"]["timestamp"], json!(1_690_848_000));
    assert_eq!(messages[3]["record"]["name"], "c");
    assert_eq!(messages[4]["value"], json!({}));
}

#[tokio::test]
async fn test_read_max_records_stops_early() {
    let server = MockServer::start().await;
    mount_two_pages(&server).await;

    let config = config_json(&server.uri());
    let (result, messages) = run_cli(&[
        "tap-openai",
        "read",
        "--max-records",
        "2",
        "--config-json",
        &config,
    ])
    .await;
    result.unwrap();

    let records = messages.iter().filter(|m| m["type"] == "RECORD").count();
    assert_eq!(records, 2);
    // Page two is never requested
    assert_eq!(server.received_requests().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_read_propagates_http_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let config = config_json(&server.uri());
    let (result, messages) = run_cli(&["tap-openai", "read", "--config-json", &config]).await;
    assert!(matches!(result.unwrap_err(), Error::HttpStatus { status: 500, .. }));
    // Schema went out before the failure, state did not
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0]["type"], "SCHEMA");
}
