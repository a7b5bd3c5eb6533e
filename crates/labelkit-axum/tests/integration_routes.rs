//! Integration tests for the Axum web server.
//!
//! These tests drive the router with `oneshot` against an in-memory
//! database, a temporary object directory and an echoing classifier.

mod common;

use std::time::Duration;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::{Value, json};

use common::TestApp;

async fn wait_for_terminal(app: &TestApp, run_id: i64) -> Value {
    for _ in 0..200 {
        let (status, run) = app.get(&format!("/api/evaluations/{run_id}")).await;
        assert_eq!(status, StatusCode::OK);
        if run["state"] != "running" {
            return run;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("run {run_id} did not reach a terminal state");
}

/// Create a spec and a prompt in the project, returning `(prompt_id, spec_id)`.
async fn prompt_and_spec(app: &TestApp, project_id: i64) -> (i64, i64) {
    let (status, spec) = app
        .post_json(
            &format!("/api/projects/{project_id}/specs"),
            &json!({ "name": "round", "text": "must be round" }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, prompt) = app
        .post_json(
            &format!("/api/projects/{project_id}/prompts"),
            &json!({ "name": "basic", "text": "Classify: {{LABELS}}. Spec: {{INSPECTION_SPEC}}" }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);

    (prompt["id"].as_i64().unwrap(), spec["id"].as_i64().unwrap())
}

#[tokio::test]
async fn health_endpoint_returns_ok() {
    let app = TestApp::new().await;
    let (status, body) = app
        .send(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(&body[..], b"OK");
}

#[tokio::test]
async fn new_project_has_default_labels_and_stats() {
    let app = TestApp::new().await;
    let id = app.project("Metal nuts").await;

    let (status, labels) = app.get(&format!("/api/projects/{id}/labels")).await;
    assert_eq!(status, StatusCode::OK);
    let names: Vec<&str> = labels
        .as_array()
        .unwrap()
        .iter()
        .map(|l| l["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, ["pass", "fail"]);

    let (status, project) = app.get(&format!("/api/projects/{id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(project["name"], "Metal nuts");
    assert_eq!(project["stats"]["files"], 0);
}

#[tokio::test]
async fn project_update_and_delete() {
    let app = TestApp::new().await;
    let id = app.project("Draft").await;

    let (status, updated) = app
        .put_json(
            &format!("/api/projects/{id}"),
            &json!({ "name": "Final", "description": "M8 nuts" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["name"], "Final");
    assert_eq!(updated["description"], "M8 nuts");

    assert_eq!(
        app.delete(&format!("/api/projects/{id}")).await,
        StatusCode::NO_CONTENT
    );
    let (status, _) = app.get(&format!("/api/projects/{id}")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn missing_project_is_json_404() {
    let app = TestApp::new().await;
    let (status, body) = app.get("/api/projects/999").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["status"], 404);
    assert!(body["error"].as_str().unwrap().contains("999"));
}

#[tokio::test]
async fn duplicate_label_is_conflict() {
    let app = TestApp::new().await;
    let id = app.project("Labels").await;
    let (status, _) = app
        .post_json(&format!("/api/projects/{id}/labels"), &json!({ "name": "PASS" }))
        .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _) = app
        .post_json(&format!("/api/projects/{id}/labels"), &json!({ "name": "  " }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn label_in_use_is_conflict() {
    let app = TestApp::new().await;
    let id = app.project("In use").await;
    let (status, _) = app
        .upload(id, &[("a.png", b"answer:pass")], Some("pass"))
        .await;
    assert_eq!(status, StatusCode::CREATED);

    let (_, labels) = app.get(&format!("/api/projects/{id}/labels")).await;
    let pass = labels
        .as_array()
        .unwrap()
        .iter()
        .find(|l| l["name"] == "pass")
        .unwrap()["id"]
        .as_i64()
        .unwrap();

    assert_eq!(
        app.delete(&format!("/api/labels/{pass}")).await,
        StatusCode::CONFLICT
    );
    let (status, body) = app
        .put_json(&format!("/api/labels/{pass}"), &json!({ "name": "ok" }))
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["status"], 409);
}

#[tokio::test]
async fn upload_label_and_presigned_download() {
    let app = TestApp::new().await;
    let id = app.project("Uploads").await;

    let (status, files) = app
        .upload(id, &[("nut one.png", b"answer:pass")], Some("Pass"))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    let file = &files[0];
    assert_eq!(file["original_name"], "nut one.png");
    assert_eq!(file["human_label"], "pass");
    assert!(file["file_name"].as_str().unwrap().ends_with("-nut_one.png"));
    let file_id = file["id"].as_i64().unwrap();

    let (status, cleared) = app
        .put_json(&format!("/api/files/{file_id}/label"), &json!({ "label": null }))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert!(cleared["human_label"].is_null());

    let (status, _) = app
        .put_json(&format!("/api/files/{file_id}/label"), &json!({ "label": "maybe" }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, url) = app.get(&format!("/api/files/{file_id}/url")).await;
    assert_eq!(status, StatusCode::OK);
    let url = url["url"].as_str().unwrap();
    let path = &url[url.find("/objects/").unwrap()..];

    let (status, bytes) = app
        .send(Request::builder().uri(path).body(Body::empty()).unwrap())
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(&bytes[..], b"answer:pass");

    let (head, last) = path.split_at(path.len() - 1);
    let tampered = format!("{head}{}", if last == "0" { "1" } else { "0" });
    let (status, _) = app
        .send(Request::builder().uri(tampered).body(Body::empty()).unwrap())
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    assert_eq!(
        app.delete(&format!("/api/files/{file_id}")).await,
        StatusCode::NO_CONTENT
    );
    let (status, _) = app
        .send(Request::builder().uri(path).body(Body::empty()).unwrap())
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn upload_without_file_part_is_rejected() {
    let app = TestApp::new().await;
    let id = app.project("Empty upload").await;
    let (status, _) = app.upload(id, &[], Some("pass")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn criteria_examples_round_trip() {
    let app = TestApp::new().await;
    let id = app.project("Criterias").await;
    let (_, files) = app.upload(id, &[("a.png", b"x")], None).await;
    let file_id = files[0]["id"].as_i64().unwrap();

    let (status, criteria) = app
        .post_json(
            &format!("/api/projects/{id}/criterias"),
            &json!({ "name": "Scratches", "description": "visible scratches" }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    let criteria_id = criteria["id"].as_i64().unwrap();

    let (status, example) = app
        .put_json(
            &format!("/api/files/{file_id}/criterias/{criteria_id}"),
            &json!({ "isFail": true, "reason": "deep scratch" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(example["is_fail"], true);

    let (status, examples) = app.get(&format!("/api/files/{file_id}/criterias")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(examples.as_array().unwrap().len(), 1);
    assert_eq!(examples[0]["reason"], "deep scratch");
}

#[tokio::test]
async fn evaluation_runs_in_background_and_finishes() {
    let app = TestApp::new().await;
    let id = app.project("Evaluate").await;
    let (prompt_id, spec_id) = prompt_and_spec(&app, id).await;

    app.upload(id, &[("ok.png", b"answer:PASS")], Some("pass")).await;
    app.upload(id, &[("bad.png", b"answer:pass")], Some("fail")).await;
    app.upload(id, &[("unlabeled.png", b"answer:pass")], None).await;

    let (status, started) = app
        .post_json(
            &format!("/api/projects/{id}/evaluations"),
            &json!({ "promptId": prompt_id, "specId": spec_id }),
        )
        .await;
    assert_eq!(status, StatusCode::ACCEPTED);
    let run_id = started["id"].as_i64().unwrap();

    let run = wait_for_terminal(&app, run_id).await;
    assert_eq!(run["state"], "finished");
    assert_eq!(run["score"], 50.0);
    assert_eq!(run["num_dataset"], 2);
    assert_eq!(run["final_prompt"], "Classify: pass, fail. Spec: must be round");

    let (status, with_details) = app.get(&format!("/api/evaluations/{run_id}/details")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(with_details["details"].as_array().unwrap().len(), 2);

    let (_, runs) = app.get(&format!("/api/projects/{id}/evaluations")).await;
    assert_eq!(runs.as_array().unwrap().len(), 1);

    assert_eq!(
        app.delete(&format!("/api/evaluations/{run_id}")).await,
        StatusCode::NO_CONTENT
    );
    let (status, _) = app.get(&format!("/api/evaluations/{run_id}")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn evaluate_endpoint_accepts_query_and_form() {
    let app = TestApp::new().await;
    let id = app.project("Query").await;
    let (prompt_id, spec_id) = prompt_and_spec(&app, id).await;

    let (status, started) = app
        .json(
            Request::builder()
                .method("POST")
                .uri(format!(
                    "/api/evaluate?projectId={id}&promptId={prompt_id}&specId={spec_id}"
                ))
                .body(Body::empty())
                .unwrap(),
        )
        .await;
    assert_eq!(status, StatusCode::ACCEPTED);
    let run = wait_for_terminal(&app, started["id"].as_i64().unwrap()).await;
    // No labeled files in the project.
    assert_eq!(run["state"], "failed");
    assert!(run["score"].is_null());

    let (status, _) = app
        .json(
            Request::builder()
                .method("POST")
                .uri("/api/evaluate")
                .header("content-type", "application/x-www-form-urlencoded")
                .body(Body::from(format!(
                    "projectId={id}&promptId={prompt_id}&specId={spec_id}"
                )))
                .unwrap(),
        )
        .await;
    assert_eq!(status, StatusCode::ACCEPTED);

    let (status, body) = app
        .json(
            Request::builder()
                .method("POST")
                .uri(format!("/api/evaluate?projectId={id}&promptId={prompt_id}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("specId"));
}

#[tokio::test]
async fn spec_from_another_project_is_not_found() {
    let app = TestApp::new().await;
    let first = app.project("First").await;
    let second = app.project("Second").await;
    let (prompt_id, _) = prompt_and_spec(&app, first).await;
    let (_, foreign_spec) = prompt_and_spec(&app, second).await;

    let (status, _) = app
        .post_json(
            &format!("/api/projects/{first}/evaluations"),
            &json!({ "promptId": prompt_id, "specId": foreign_spec }),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, runs) = app.get(&format!("/api/projects/{first}/evaluations")).await;
    assert!(runs.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn templates_expose_both_placeholders() {
    let app = TestApp::new().await;
    let (status, body) = app.get("/api/templates").await;
    assert_eq!(status, StatusCode::OK);
    let prompt = body["promptTemplate"].as_str().unwrap();
    assert!(prompt.contains("{{LABELS}}"));
    assert!(prompt.contains("{{INSPECTION_SPEC}}"));
    assert!(!body["inspectionSpec"].as_str().unwrap().is_empty());
}
