// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Test utilities for mocking Kubernetes API responses.

use bytes::Bytes;
use http::{Request, Response};
use http_body_util::BodyExt;
use kube::client::Body;
use kube::Client;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use std::task::{Context, Poll};
use tower::Service;

#[derive(Clone, Debug)]
enum MockResponse {
    Fixed(u16, String),
    /// Answer with the request body, as a successful update would
    Echo,
    /// Never answer
    Stall,
}

/// A request the mock received
#[derive(Clone, Debug)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub body: String,
}

/// A mock HTTP service that returns predefined responses based on request paths.
///
/// Several responses registered for the same method and path are served in
/// order; the last one is repeated once the others are used up.
#[derive(Clone)]
pub struct MockService {
    responses: Arc<Mutex<HashMap<(String, String), VecDeque<MockResponse>>>>,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl MockService {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(HashMap::new())),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    fn push(self, method: &str, path: &str, response: MockResponse) -> Self {
        self.responses
            .lock()
            .unwrap()
            .entry((method.to_string(), path.to_string()))
            .or_default()
            .push_back(response);
        self
    }

    /// Add a response for GET requests matching the exact path
    pub fn on_get(self, path: &str, status: u16, body: &str) -> Self {
        self.push("GET", path, MockResponse::Fixed(status, body.to_string()))
    }

    /// Add a response for POST requests matching the exact path
    pub fn on_post(self, path: &str, status: u16, body: &str) -> Self {
        self.push("POST", path, MockResponse::Fixed(status, body.to_string()))
    }

    /// Add a response for PUT requests matching the exact path
    pub fn on_put(self, path: &str, status: u16, body: &str) -> Self {
        self.push("PUT", path, MockResponse::Fixed(status, body.to_string()))
    }

    /// Answer PUT requests on the path with the submitted object
    pub fn on_put_echo(self, path: &str) -> Self {
        self.push("PUT", path, MockResponse::Echo)
    }

    /// Leave GET requests on the path unanswered
    pub fn on_get_stalled(self, path: &str) -> Self {
        self.push("GET", path, MockResponse::Stall)
    }

    /// Build a kube Client from this mock service
    pub fn into_client(self) -> Client {
        Client::new(self, "default")
    }

    /// Requests received so far
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Requests received so far for the given method
    pub fn requests_with_method(&self, method: &str) -> Vec<RecordedRequest> {
        self.requests()
            .into_iter()
            .filter(|r| r.method == method)
            .collect()
    }

    fn find_response(&self, method: &str, path: &str) -> Option<MockResponse> {
        let mut responses = self.responses.lock().unwrap();
        let queue = responses.get_mut(&(method.to_string(), path.to_string()))?;

        if queue.len() > 1 {
            queue.pop_front()
        } else {
            queue.front().cloned()
        }
    }
}

impl Default for MockService {
    fn default() -> Self {
        Self::new()
    }
}

fn json_response(status: u16, body: impl Into<Bytes>) -> Response<Body> {
    Response::builder()
        .status(status)
        .header("content-type", "application/json")
        .body(Body::from(body.into().to_vec()))
        .unwrap()
}

impl Service<Request<Body>> for MockService {
    type Response = Response<Body>;
    type Error = tower::BoxError;
    type Future = std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self::Response, Self::Error>> + Send>,
    >;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: Request<Body>) -> Self::Future {
        let method = req.method().to_string();
        let path = req.uri().path().to_string();
        let response = self.find_response(&method, &path);
        let requests = self.requests.clone();

        Box::pin(async move {
            let body = req.into_body().collect().await?.to_bytes();
            requests.lock().unwrap().push(RecordedRequest {
                method,
                path,
                body: String::from_utf8_lossy(&body).into_owned(),
            });

            match response {
                Some(MockResponse::Fixed(status, body)) => Ok(json_response(status, body)),
                Some(MockResponse::Echo) => Ok(json_response(200, body)),
                Some(MockResponse::Stall) => std::future::pending().await,
                None => Ok(json_response(
                    404,
                    r#"{"kind":"Status","apiVersion":"v1","status":"Failure","message":"not found","reason":"NotFound","code":404}"#,
                )),
            }
        })
    }
}

/// Create a Kubernetes Status failure body
pub fn status_json(code: u16, reason: &str, message: &str) -> String {
    serde_json::json!({
        "kind": "Status",
        "apiVersion": "v1",
        "status": "Failure",
        "message": message,
        "reason": reason,
        "code": code
    })
    .to_string()
}

/// Create a pod JSON response with an optional phase
pub fn pod_json(name: &str, namespace: &str, phase: Option<&str>) -> String {
    let mut pod = serde_json::json!({
        "apiVersion": "v1",
        "kind": "Pod",
        "metadata": {
            "name": name,
            "namespace": namespace,
            "uid": "test-uid"
        }
    });
    if let Some(phase) = phase {
        pod["status"] = serde_json::json!({ "phase": phase });
    }
    pod.to_string()
}

/// Create a node JSON response.
///
/// `taints` are `(key, value, effect)` triples; `None` leaves the
/// collections out entirely.
pub fn node_json(
    name: &str,
    taints: Option<&[(&str, Option<&str>, &str)]>,
    labels: Option<&[(&str, &str)]>,
) -> String {
    let mut node = serde_json::json!({
        "apiVersion": "v1",
        "kind": "Node",
        "metadata": {
            "name": name,
            "uid": "test-uid",
            "resourceVersion": "1"
        },
        "spec": {}
    });
    if let Some(taints) = taints {
        node["spec"]["taints"] = taints
            .iter()
            .map(|(key, value, effect)| {
                let mut taint = serde_json::json!({ "key": key, "effect": effect });
                if let Some(value) = value {
                    taint["value"] = serde_json::json!(value);
                }
                taint
            })
            .collect();
    }
    if let Some(labels) = labels {
        node["metadata"]["labels"] = labels
            .iter()
            .map(|(k, v)| (k.to_string(), serde_json::json!(v)))
            .collect::<serde_json::Map<_, _>>()
            .into();
    }
    node.to_string()
}
