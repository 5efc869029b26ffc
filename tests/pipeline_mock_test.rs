//! Pipeline behavior against a mock server: hook ordering, the shared
//! error path, and recovery semantics.

use async_trait::async_trait;
use kb_client::prelude::*;
use kb_client::request::RequestConfig;
use reqwest::header::{HeaderName, HeaderValue};
use serde_json::json;
use std::sync::{Arc, Mutex};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Records every hook invocation as `"<hook>:<name>"`.
struct Recorder {
    name: &'static str,
    calls: Arc<Mutex<Vec<String>>>,
}

#[async_trait]
impl Plugin for Recorder {
    fn name(&self) -> &str {
        self.name
    }

    async fn before_request(&self, mut config: RequestConfig) -> Result<RequestConfig, KbError> {
        self.calls
            .lock()
            .unwrap()
            .push(format!("before:{}", self.name));
        // Leave a trace the server can see, proving the hook ran pre-send.
        config.headers.append(
            HeaderName::from_static("x-hook-order"),
            HeaderValue::from_str(self.name).unwrap(),
        );
        Ok(config)
    }

    async fn after_response(
        &self,
        response: ResponseEnvelope,
    ) -> Result<ResponseEnvelope, KbError> {
        self.calls
            .lock()
            .unwrap()
            .push(format!("after:{}", self.name));
        Ok(response)
    }

    async fn on_error(&self, error: KbError) -> ErrorFlow {
        self.calls
            .lock()
            .unwrap()
            .push(format!("error:{}", self.name));
        ErrorFlow::Propagate(error)
    }
}

struct FailingBefore;

#[async_trait]
impl Plugin for FailingBefore {
    fn name(&self) -> &str {
        "failing-before"
    }

    async fn before_request(&self, _config: RequestConfig) -> Result<RequestConfig, KbError> {
        Err(KbError::PreSend("malformed config".to_string()))
    }
}

struct Recovering;

#[async_trait]
impl Plugin for Recovering {
    fn name(&self) -> &str {
        "recovering"
    }

    async fn on_error(&self, _error: KbError) -> ErrorFlow {
        ErrorFlow::Recover(ResponseEnvelope::json_value(
            reqwest::StatusCode::OK,
            reqwest::header::HeaderMap::new(),
            json!({"recovered": true}),
        ))
    }
}

fn client_with_recorders(
    server: &MockServer,
    calls: &Arc<Mutex<Vec<String>>>,
) -> kb_client::Client {
    Client::builder(ClientConfig::new(server.uri()))
        .with_plugin(Recorder {
            name: "first",
            calls: calls.clone(),
        })
        .with_plugin(Recorder {
            name: "second",
            calls: calls.clone(),
        })
        .build()
        .unwrap()
}

#[tokio::test]
async fn test_hooks_run_in_registration_order_exactly_once() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/kb/space/list"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"code": 200000, "msg": "success", "data": []})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let calls = Arc::new(Mutex::new(Vec::new()));
    let client = client_with_recorders(&server, &calls);

    client.get("/kb/space/list").await.unwrap();

    assert_eq!(
        *calls.lock().unwrap(),
        ["before:first", "before:second", "after:first", "after:second"]
    );

    // Both before hooks stamped the outgoing request, in order.
    let requests = server.received_requests().await.unwrap();
    let stamps: Vec<&str> = requests[0]
        .headers
        .get_all("x-hook-order")
        .iter()
        .map(|v| v.to_str().unwrap())
        .collect();
    assert_eq!(stamps, ["first", "second"]);
}

#[tokio::test]
async fn test_http_failure_runs_error_chain_not_after_chain() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/kb/space/list"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({"detail": "boom"})))
        .mount(&server)
        .await;

    let calls = Arc::new(Mutex::new(Vec::new()));
    let client = client_with_recorders(&server, &calls);

    let err = client.get("/kb/space/list").await.expect_err("should fail");
    assert_eq!(err.status(), Some(500));

    assert_eq!(
        *calls.lock().unwrap(),
        ["before:first", "before:second", "error:first", "error:second"]
    );
}

#[tokio::test]
async fn test_before_failure_skips_transport_and_shares_error_path() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(0)
        .mount(&server)
        .await;

    let calls = Arc::new(Mutex::new(Vec::new()));
    let client = Client::builder(ClientConfig::new(server.uri()))
        .with_plugin(FailingBefore)
        .with_plugin(Recorder {
            name: "observer",
            calls: calls.clone(),
        })
        .build()
        .unwrap();

    let err = client.get("/kb/space/list").await.expect_err("should fail");
    assert!(matches!(err, KbError::PreSend(_)));

    // The observer's before hook never ran (the chain aborted first), but
    // its on-error hook saw the pre-send failure.
    assert_eq!(*calls.lock().unwrap(), ["error:observer"]);
}

#[tokio::test]
async fn test_recovery_resolves_without_after_chain() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/kb/space/list"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({"detail": "boom"})))
        .mount(&server)
        .await;

    let calls = Arc::new(Mutex::new(Vec::new()));
    let client = Client::builder(ClientConfig::new(server.uri()))
        .with_plugin(Recovering)
        .with_plugin(Recorder {
            name: "late",
            calls: calls.clone(),
        })
        .build()
        .unwrap();

    let envelope = client.get("/kb/space/list").await.expect("recovered");
    assert_eq!(envelope.body().unwrap()["recovered"], true);

    // The later plugin saw the before stage but neither the error (the
    // recovery short-circuited it) nor an after-response pass.
    assert_eq!(*calls.lock().unwrap(), ["before:late"]);
}

#[tokio::test]
async fn test_concurrent_requests_are_independent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/kb/space/list"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"code": 200000, "msg": "success", "data": []})),
        )
        .expect(8)
        .mount(&server)
        .await;

    let calls = Arc::new(Mutex::new(Vec::new()));
    let client = client_with_recorders(&server, &calls);

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let client = client.clone();
            tokio::spawn(async move { client.get("/kb/space/list").await })
        })
        .collect();
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    // 8 requests, 4 hook invocations each, no cross-request interleaving
    // anomalies (every request ran its full chain).
    assert_eq!(calls.lock().unwrap().len(), 32);
}
