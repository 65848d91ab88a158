mod common;

use axum::http::{Method, StatusCode};
use serde_json::json;

use common::{body_json, TestApp};

#[tokio::test]
async fn project_crud_round_trip() {
    let app = TestApp::new().await;

    let create = app
        .request_authenticated(
            Method::POST,
            "/project/",
            Some(json!({
                "project_code": "WH-EXT",
                "project_name": "Warehouse extension",
                "project_worktype": "construction",
            })),
        )
        .await;
    assert_eq!(create.status(), StatusCode::CREATED);
    let created = body_json(create).await;
    assert_eq!(created["message"], "Project created successfully");
    let project_id = created["project_id"].as_i64().unwrap();

    let get = app
        .request_authenticated(Method::GET, &format!("/project/{}", project_id), None)
        .await;
    assert_eq!(get.status(), StatusCode::OK);
    let fetched = body_json(get).await;
    assert_eq!(fetched["project_name"], "Warehouse extension");
    assert_eq!(fetched["project_code"], "WH-EXT");

    let update = app
        .request_authenticated(
            Method::PUT,
            &format!("/project/{}", project_id),
            Some(json!({"project_name": "Warehouse extension phase 2"})),
        )
        .await;
    assert_eq!(update.status(), StatusCode::OK);
    assert_eq!(
        body_json(update).await["message"],
        "Project updated successfully"
    );

    let get = app
        .request_authenticated(Method::GET, &format!("/project/{}", project_id), None)
        .await;
    let fetched = body_json(get).await;
    assert_eq!(fetched["project_name"], "Warehouse extension phase 2");
    // The project code never changes after creation.
    assert_eq!(fetched["project_code"], "WH-EXT");

    let delete = app
        .request_authenticated(Method::DELETE, &format!("/project/{}", project_id), None)
        .await;
    assert_eq!(delete.status(), StatusCode::OK);
    assert_eq!(
        body_json(delete).await["message"],
        "Project deleted successfully"
    );

    let missing = app
        .request_authenticated(Method::GET, &format!("/project/{}", project_id), None)
        .await;
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn projects_list_in_insertion_order() {
    let app = TestApp::new().await;

    for name in ["Office tower", "Service depot"] {
        let response = app
            .request_authenticated(
                Method::POST,
                "/project/",
                Some(json!({"project_name": name})),
            )
            .await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let list = app
        .request_authenticated(Method::GET, "/project/projects/", None)
        .await;
    assert_eq!(list.status(), StatusCode::OK);
    let rows = body_json(list).await;
    assert_eq!(rows.as_array().map(|a| a.len()), Some(2));
}

#[tokio::test]
async fn project_create_requires_a_name() {
    let app = TestApp::new().await;

    let response = app
        .request_authenticated(Method::POST, "/project/", Some(json!({"project_name": ""})))
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

fn user_payload(email: &str) -> serde_json::Value {
    json!({
        "m_code": "EMP-042",
        "m_firstname": "Wilai",
        "m_lastname": "Boonmee",
        "m_user": "wilai.b",
        "m_pass": "s3cr3t-pass",
        "m_email": email,
        "m_position": "Purchasing Officer",
        "m_department": "Procurement",
    })
}

#[tokio::test]
async fn user_crud_round_trip_never_exposes_credentials() {
    let app = TestApp::new().await;

    let create = app
        .request_authenticated(
            Method::POST,
            "/user/",
            Some(user_payload("wilai@example.co.th")),
        )
        .await;
    assert_eq!(create.status(), StatusCode::CREATED);
    let created = body_json(create).await;
    assert_eq!(created["message"], "User created successfully");
    let user_id = created["user_id"].as_i64().unwrap();

    let get = app
        .request_authenticated(Method::GET, &format!("/user/{}", user_id), None)
        .await;
    assert_eq!(get.status(), StatusCode::OK);
    let fetched = body_json(get).await;
    assert_eq!(fetched["m_email"], "wilai@example.co.th");
    assert_eq!(fetched["m_firstname"], "Wilai");
    // Neither the login name nor the password hash leave the service.
    assert!(fetched.get("m_user").is_none());
    assert!(fetched.get("m_pass").is_none());

    let update = app
        .request_authenticated(
            Method::PUT,
            &format!("/user/{}", user_id),
            Some(json!({"m_position": "Senior Purchasing Officer"})),
        )
        .await;
    assert_eq!(update.status(), StatusCode::OK);
    assert_eq!(
        body_json(update).await["message"],
        "User updated successfully"
    );

    let get = app
        .request_authenticated(Method::GET, &format!("/user/{}", user_id), None)
        .await;
    let fetched = body_json(get).await;
    assert_eq!(fetched["m_position"], "Senior Purchasing Officer");
    assert_eq!(fetched["m_department"], "Procurement");

    let delete = app
        .request_authenticated(Method::DELETE, &format!("/user/{}", user_id), None)
        .await;
    assert_eq!(delete.status(), StatusCode::OK);
    assert_eq!(
        body_json(delete).await["message"],
        "User deleted successfully"
    );

    let missing = app
        .request_authenticated(Method::GET, &format!("/user/{}", user_id), None)
        .await;
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn duplicate_user_emails_are_rejected() {
    let app = TestApp::new().await;

    let first = app
        .request_authenticated(
            Method::POST,
            "/user/",
            Some(user_payload("somsak@example.co.th")),
        )
        .await;
    assert_eq!(first.status(), StatusCode::CREATED);

    let second = app
        .request_authenticated(
            Method::POST,
            "/user/",
            Some(user_payload("somsak@example.co.th")),
        )
        .await;
    assert_eq!(second.status(), StatusCode::BAD_REQUEST);
    let body = body_json(second).await;
    assert_eq!(body["message"], "Email already registered");
}

#[tokio::test]
async fn user_create_validates_the_email_address() {
    let app = TestApp::new().await;

    let response = app
        .request_authenticated(
            Method::POST,
            "/user/",
            Some(user_payload("not-an-email-address")),
        )
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn user_listing_never_carries_password_hashes() {
    let app = TestApp::new().await;

    let create = app
        .request_authenticated(
            Method::POST,
            "/user/",
            Some(user_payload("somsak@example.co.th")),
        )
        .await;
    assert_eq!(create.status(), StatusCode::CREATED);

    let list = app
        .request_authenticated(Method::GET, "/user/users/", None)
        .await;
    assert_eq!(list.status(), StatusCode::OK);
    let rows = body_json(list).await;
    let rows = rows.as_array().expect("user array");
    assert_eq!(rows.len(), 1);
    assert!(rows[0].get("m_pass").is_none());
    assert!(rows[0].get("m_user").is_none());
}
