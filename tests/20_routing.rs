mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::{json, Value};

#[tokio::test]
async fn root_redirects_to_health() -> Result<()> {
    let server = common::ensure_server().await?;

    let res = common::get(server, "/").send().await?;

    assert_eq!(res.status(), StatusCode::FOUND);
    assert_eq!(
        res.headers().get("location").and_then(|v| v.to_str().ok()),
        Some("/api/v1/health")
    );
    Ok(())
}

#[tokio::test]
async fn health_reports_missing_database() -> Result<()> {
    let server = common::ensure_server().await?;

    let res = common::get(server, "/api/v1/health").send().await?;

    assert_eq!(res.status(), StatusCode::OK);
    let body = res.json::<Value>().await?;
    assert_eq!(body, json!({"status": 200, "data": "Online Not connected to DB"}));
    Ok(())
}

#[tokio::test]
async fn unknown_path_is_not_found() -> Result<()> {
    let server = common::ensure_server().await?;

    let res = common::get(server, "/api/v1/does_not_exist").send().await?;

    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let body = res.json::<Value>().await?;
    assert_eq!(body["status"], 404);
    assert!(body["data"]
        .as_str()
        .unwrap_or_default()
        .starts_with("404 Not Found: The requested URL was not found on the server."));
    Ok(())
}

#[tokio::test]
async fn wrong_verb_is_method_not_allowed() -> Result<()> {
    let server = common::ensure_server().await?;

    let res = common::client()
        .delete(server.url("/api/v1/get_tags"))
        .basic_auth(common::USERNAME, Some(common::PASSWORD))
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::METHOD_NOT_ALLOWED);
    let body = res.json::<Value>().await?;
    assert_eq!(body["status"], 405);
    Ok(())
}

#[tokio::test]
async fn incomplete_body_is_rejected_before_the_database() -> Result<()> {
    let server = common::ensure_server().await?;

    let res = common::client()
        .put(server.url("/api/v1/update_task?user_id=1&task_id=3"))
        .basic_auth(common::USERNAME, Some(common::PASSWORD))
        .json(&json!({
            "task_name": "Buy milk",
            "created_at": "2024-01-02 08:00:00",
            "task_desc": "2 litres",
            "completed_at": null,
            "today_tag": 1,
            "repeat_f": 0,
            "repeat_interval": null,
            "category_id": 3
        }))
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body = res.json::<Value>().await?;
    assert_eq!(body, json!({"status": 400, "data": "400 Bad Request: missing field `tag_id`"}));
    Ok(())
}
