//! Shared fixtures for router tests.

#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use labelkit_axum::{CorsConfig, build_context, create_router};
use labelkit_core::{
    Classification, ClassificationRequest, ClassifierError, ClassifierPort, EvaluationConfig,
};
use labelkit_db::TestDb;
use labelkit_storage::{FsObjectStore, UrlSigner};
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

pub const BOUNDARY: &str = "labelkit-test-boundary";

/// Answers with the label written in the image bytes as `answer:<label>`.
pub struct EchoClassifier;

#[async_trait]
impl ClassifierPort for EchoClassifier {
    async fn classify(
        &self,
        request: ClassificationRequest,
    ) -> Result<Classification, ClassifierError> {
        let text = String::from_utf8_lossy(&request.image);
        text.strip_prefix("answer:")
            .map(|label| Classification {
                classification: label.to_string(),
                explanation: "echoed".to_string(),
            })
            .ok_or_else(|| ClassifierError::MalformedResponse(text.to_string()))
    }
}

pub struct TestApp {
    pub router: Router,
    // Keeps the object directory alive for the test's duration.
    _objects: TempDir,
}

impl TestApp {
    pub async fn new() -> Self {
        let objects = TempDir::new().unwrap();
        let db = TestDb::new().await.unwrap();
        let signer = Arc::new(UrlSigner::new("router-test-secret", "http://localhost:3000"));
        let store = Arc::new(FsObjectStore::new(objects.path(), Arc::clone(&signer)));
        let ctx = build_context(
            db.repos(),
            store,
            signer,
            Arc::new(EchoClassifier),
            EvaluationConfig::default().with_max_concurrency(2),
        );
        Self {
            router: create_router(ctx, &CorsConfig::AllowAll),
            _objects: objects,
        }
    }

    pub async fn send(&self, request: Request<Body>) -> (StatusCode, Vec<u8>) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let body = response.into_body().collect().await.unwrap().to_bytes();
        (status, body.to_vec())
    }

    pub async fn json(&self, request: Request<Body>) -> (StatusCode, Value) {
        let (status, body) = self.send(request).await;
        let value = if body.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&body).unwrap_or_else(|_| {
                panic!("expected JSON, got {}", String::from_utf8_lossy(&body))
            })
        };
        (status, value)
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.json(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
    }

    pub async fn delete(&self, uri: &str) -> StatusCode {
        self.send(
            Request::builder()
                .method("DELETE")
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .0
    }

    pub async fn post_json(&self, uri: &str, body: &Value) -> (StatusCode, Value) {
        self.json(json_request("POST", uri, body)).await
    }

    pub async fn put_json(&self, uri: &str, body: &Value) -> (StatusCode, Value) {
        self.json(json_request("PUT", uri, body)).await
    }

    /// Create a project and return its id.
    pub async fn project(&self, name: &str) -> i64 {
        let (status, body) = self
            .post_json("/api/projects", &serde_json::json!({ "name": name }))
            .await;
        assert_eq!(status, StatusCode::CREATED);
        body["id"].as_i64().unwrap()
    }

    /// Upload files as `(file name, bytes)` with an optional shared label.
    pub async fn upload(
        &self,
        project_id: i64,
        files: &[(&str, &[u8])],
        label: Option<&str>,
    ) -> (StatusCode, Value) {
        self.json(
            Request::builder()
                .method("POST")
                .uri(format!("/api/projects/{project_id}/files"))
                .header(
                    "content-type",
                    format!("multipart/form-data; boundary={BOUNDARY}"),
                )
                .body(Body::from(multipart_body(files, label)))
                .unwrap(),
        )
        .await
    }
}

pub fn json_request(method: &str, uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn multipart_body(files: &[(&str, &[u8])], label: Option<&str>) -> Vec<u8> {
    let mut body = Vec::new();
    for (name, bytes) in files {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{name}\"\r\nContent-Type: image/png\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(bytes);
        body.extend_from_slice(b"\r\n");
    }
    if let Some(label) = label {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"label\"\r\n\r\n{label}\r\n"
            )
            .as_bytes(),
        );
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}
