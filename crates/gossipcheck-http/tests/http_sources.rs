/// HTTP collaborator tests against an in-process fake node.
use std::collections::HashMap;
use std::time::Duration;

use axum::Router;
use axum::extract::{Path, Query};
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;

use gossipcheck_core::{DocumentFormat, Status, StreamStatus, ValidationConfig, parse, validate};
use gossipcheck_http::{GossipSource, HttpNodeClient, StreamSource, count_streams};

const GOSSIP_JSON: &str = r#"{"members": [
    {"state": "Master", "isAlive": true, "internalHttpIp": "10.0.0.1", "epochPosition": 100},
    {"state": "Slave", "isAlive": true, "internalHttpIp": "10.0.0.2", "epochPosition": 100},
    {"state": "Slave", "isAlive": true, "internalHttpIp": "10.0.0.3", "epochPosition": 100}
], "serverIp": "10.0.0.2", "serverPort": 2113}"#;

const GOSSIP_XML: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<ClusterInfoDto xmlns:i="http://www.w3.org/2001/XMLSchema-instance">
  <Members>
    <MemberInfoDto><State>Master</State><IsAlive>true</IsAlive><InternalHttpIp>10.0.0.1</InternalHttpIp><EpochPosition>100</EpochPosition></MemberInfoDto>
    <MemberInfoDto><State>Slave</State><IsAlive>false</IsAlive><InternalHttpIp>10.0.0.2</InternalHttpIp><EpochPosition>100</EpochPosition></MemberInfoDto>
    <MemberInfoDto><State>Slave</State><IsAlive>true</IsAlive><InternalHttpIp>10.0.0.3</InternalHttpIp><EpochPosition>100</EpochPosition></MemberInfoDto>
  </Members>
  <ServerIp>10.0.0.1</ServerIp>
  <ServerPort>2113</ServerPort>
</ClusterInfoDto>"#;

async fn gossip(Query(params): Query<HashMap<String, String>>) -> impl IntoResponse {
    match params.get("format").map(String::as_str) {
        Some("xml") => (StatusCode::OK, GOSSIP_XML),
        _ => (StatusCode::OK, GOSSIP_JSON),
    }
}

async fn stream(Path(name): Path<String>, headers: HeaderMap) -> impl IntoResponse {
    match name.as_str() {
        "orders" => (StatusCode::OK, r#"{"eTag": "41;-2060438500"}"#.to_string()),
        "with space" => (StatusCode::OK, r#"{"eTag": "2;1"}"#.to_string()),
        "secret" if headers.contains_key("authorization") => {
            (StatusCode::OK, r#"{"eTag": "4;1"}"#.to_string())
        }
        "secret" => (StatusCode::UNAUTHORIZED, String::new()),
        "broken" => (StatusCode::INTERNAL_SERVER_ERROR, String::new()),
        _ => (StatusCode::NOT_FOUND, String::new()),
    }
}

async fn spawn_node() -> String {
    let app = Router::new()
        .route("/gossip", get(gossip))
        .route("/streams/{name}", get(stream));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

fn client(base: &str, format: DocumentFormat) -> HttpNodeClient {
    HttpNodeClient::new(base, format, Duration::from_secs(5)).unwrap()
}

#[tokio::test]
async fn fetch_and_validate_json_gossip() {
    let base = spawn_node().await;
    let raw = client(&base, DocumentFormat::Json).fetch_gossip().await.unwrap();
    let snapshot = parse(&raw).unwrap();
    let verdict = validate(&snapshot, &ValidationConfig::new(3, 0).unwrap());
    assert_eq!(verdict.status, Status::Ok, "{verdict}");
}

#[tokio::test]
async fn fetch_and_validate_xml_gossip() {
    let base = spawn_node().await;
    let raw = client(&base, DocumentFormat::Xml).fetch_gossip().await.unwrap();
    let snapshot = parse(&raw).unwrap();
    let verdict = validate(&snapshot, &ValidationConfig::new(3, 0).unwrap());
    assert_eq!(verdict.status, Status::Critical);
    assert!(verdict.detail.contains("2 alive"), "{verdict}");
}

#[tokio::test]
async fn stream_found_and_missing() {
    let base = spawn_node().await;
    let node = client(&base, DocumentFormat::Json);
    assert!(matches!(
        node.fetch_stream("orders").await.unwrap(),
        StreamStatus::Found(_)
    ));
    assert_eq!(
        node.fetch_stream("never-written").await.unwrap(),
        StreamStatus::NotFound
    );
}

#[tokio::test]
async fn server_error_is_not_a_zero_count() {
    let base = spawn_node().await;
    let node = client(&base, DocumentFormat::Json);
    assert!(node.fetch_stream("broken").await.is_err());
}

#[tokio::test]
async fn basic_auth_is_sent() {
    let base = spawn_node().await;
    assert!(
        client(&base, DocumentFormat::Json)
            .fetch_stream("secret")
            .await
            .is_err()
    );
    let authed = client(&base, DocumentFormat::Json).with_basic_auth("admin", "changeit");
    assert!(authed.fetch_stream("secret").await.is_ok());
}

#[tokio::test]
async fn count_streams_over_http() {
    let base = spawn_node().await;
    let node = client(&base, DocumentFormat::Json);
    let names: Vec<String> = ["orders", "with space", "missing"]
        .iter()
        .map(|s| s.to_string())
        .collect();
    let mut counts = count_streams(&node, &names, 2).await.unwrap();
    counts.sort();
    assert_eq!(
        counts,
        vec![
            ("missing".to_string(), 0),
            ("orders".to_string(), 42),
            ("with space".to_string(), 3),
        ]
    );
}

#[tokio::test]
async fn unreachable_node_fails() {
    let node = HttpNodeClient::new(
        "http://127.0.0.1:1",
        DocumentFormat::Json,
        Duration::from_millis(500),
    )
    .unwrap();
    assert!(node.fetch_gossip().await.is_err());
}
