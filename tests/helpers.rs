// Shared test helpers for mocking a DNS-over-HTTPS JSON endpoint.
//
// This module provides common utilities used across multiple test files to reduce duplication.

#![allow(dead_code)] // Not every test file uses every helper

use serde_json::{json, Value};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use mailauth_check::DohResolver;

/// Path the mock endpoint serves queries on.
pub const RESOLVE_PATH: &str = "/resolve";

/// Starts a mock server that answers NXDOMAIN for any unmocked question.
pub async fn start_doh_server() -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(RESOLVE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"Status": 3})))
        .with_priority(10)
        .mount(&server)
        .await;
    server
}

/// A resolver pointed at `server`.
pub fn resolver_for(server: &MockServer) -> DohResolver {
    DohResolver::new(
        reqwest::Client::new(),
        format!("{}{}", server.uri(), RESOLVE_PATH),
    )
}

/// Mounts a successful answer for `name`/`record_type` with the given record data.
pub async fn mount_answers(server: &MockServer, name: &str, record_type: &str, data: &[&str]) {
    let type_code = if record_type == "MX" { 15 } else { 16 };
    let answers: Vec<Value> = data
        .iter()
        .map(|d| json!({"name": format!("{name}."), "type": type_code, "TTL": 300, "data": d}))
        .collect();
    mount_body(server, name, record_type, json!({"Status": 0, "Answer": answers})).await;
}

/// Mounts an arbitrary JSON body for `name`/`record_type`.
pub async fn mount_body(server: &MockServer, name: &str, record_type: &str, body: Value) {
    Mock::given(method("GET"))
        .and(path(RESOLVE_PATH))
        .and(query_param("name", name))
        .and(query_param("type", record_type))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .with_priority(1)
        .mount(server)
        .await;
}

/// Makes `name`/`record_type` fail with an HTTP status.
pub async fn mount_http_error(server: &MockServer, name: &str, record_type: &str, status: u16) {
    Mock::given(method("GET"))
        .and(path(RESOLVE_PATH))
        .and(query_param("name", name))
        .and(query_param("type", record_type))
        .respond_with(ResponseTemplate::new(status))
        .with_priority(1)
        .mount(server)
        .await;
}
