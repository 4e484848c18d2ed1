mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::{json, Value};

use campus_access_api::models::User;
use campus_access_api::store::DocumentStore;

async fn add_user(base_url: &str, student_id: &str, role: &str) -> Result<reqwest::Response> {
    let res = reqwest::Client::new()
        .post(format!("{}/api/addUser", base_url))
        .json(&json!({ "studentId": student_id, "role": role }))
        .send()
        .await?;
    Ok(res)
}

#[tokio::test]
async fn added_users_start_active() -> Result<()> {
    let server = common::spawn_server().await?;

    let res = add_user(&server.base_url, "S1001", "student").await?;
    assert_eq!(res.status(), StatusCode::CREATED);

    let body = res.json::<Value>().await?;
    assert_eq!(body["message"], "User added successfully");

    let docs = server.store.find_eq(User::COLLECTION, "studentId", "S1001").await?;
    assert_eq!(docs.len(), 1);
    assert_eq!(docs[0].fields["status"], "active");
    assert_eq!(docs[0].fields["role"], "student");

    Ok(())
}

#[tokio::test]
async fn adding_the_same_student_twice_keeps_two_records() -> Result<()> {
    let server = common::spawn_server().await?;

    assert_eq!(add_user(&server.base_url, "S1001", "student").await?.status(), StatusCode::CREATED);
    assert_eq!(add_user(&server.base_url, "S1001", "student").await?.status(), StatusCode::CREATED);

    // Not deduplicated: both writes land as independent documents
    let docs = server.store.find_eq(User::COLLECTION, "studentId", "S1001").await?;
    assert_eq!(docs.len(), 2);

    Ok(())
}

#[tokio::test]
async fn add_user_rejects_bad_payloads() -> Result<()> {
    let server = common::spawn_server().await?;
    let client = reqwest::Client::new();

    for payload in [
        json!({ "studentId": "", "role": "student" }),
        json!({ "role": "student" }),
        json!({ "studentId": "S1001" }),
        json!({ "studentId": "S1001", "role": 7 }),
    ] {
        let res = client
            .post(format!("{}/api/addUser", server.base_url))
            .json(&payload)
            .send()
            .await?;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST, "payload: {}", payload);

        let body = res.json::<Value>().await?;
        assert_eq!(body["error"], "Valid Student ID and role are required");
    }

    assert!(server.store.list(User::COLLECTION).await?.is_empty());

    Ok(())
}

#[tokio::test]
async fn update_status_applies_to_every_matching_record() -> Result<()> {
    let server = common::spawn_server().await?;
    let client = reqwest::Client::new();

    add_user(&server.base_url, "S1001", "student").await?;
    add_user(&server.base_url, "S1001", "assistant").await?;
    add_user(&server.base_url, "S2002", "student").await?;

    let res = client
        .post(format!("{}/api/updateStatus", server.base_url))
        .json(&json!({ "studentId": "S1001", "status": "suspended" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);

    let body = res.json::<Value>().await?;
    assert_eq!(body["message"], "User ID S1001 updated to suspended");

    // Both documents sharing the studentId were patched, the third untouched
    let docs = server.store.find_eq(User::COLLECTION, "studentId", "S1001").await?;
    assert_eq!(docs.len(), 2);
    assert!(docs.iter().all(|d| d.fields["status"] == "suspended"));

    let others = server.store.find_eq(User::COLLECTION, "studentId", "S2002").await?;
    assert_eq!(others[0].fields["status"], "active");

    Ok(())
}

#[tokio::test]
async fn update_status_rejects_unknown_status_values() -> Result<()> {
    let server = common::spawn_server().await?;
    let client = reqwest::Client::new();

    add_user(&server.base_url, "S1001", "student").await?;

    let res = client
        .post(format!("{}/api/updateStatus", server.base_url))
        .json(&json!({ "studentId": "S1001", "status": "banned" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let body = res.json::<Value>().await?;
    assert_eq!(body["error"], "Valid Student ID and status are required");

    // The roster entry is left as it was
    let docs = server.store.find_eq(User::COLLECTION, "studentId", "S1001").await?;
    assert_eq!(docs[0].fields["status"], "active");

    Ok(())
}

#[tokio::test]
async fn update_status_for_unknown_student_is_404() -> Result<()> {
    let server = common::spawn_server().await?;
    let client = reqwest::Client::new();

    let res = client
        .post(format!("{}/api/updateStatus", server.base_url))
        .json(&json!({ "studentId": "S9999", "status": "suspended" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let body = res.json::<Value>().await?;
    assert_eq!(body["error"], "User not found");

    Ok(())
}

#[tokio::test]
async fn any_status_may_move_to_any_other() -> Result<()> {
    let server = common::spawn_server().await?;
    let client = reqwest::Client::new();

    add_user(&server.base_url, "S1001", "student").await?;

    // suspended -> active directly, with no reactivated step in between
    for status in ["suspended", "active"] {
        let res = client
            .post(format!("{}/api/updateStatus", server.base_url))
            .json(&json!({ "studentId": "S1001", "status": status }))
            .send()
            .await?;
        assert_eq!(res.status(), StatusCode::OK);
    }

    let docs = server.store.find_eq(User::COLLECTION, "studentId", "S1001").await?;
    assert_eq!(docs[0].fields["status"], "active");

    Ok(())
}
