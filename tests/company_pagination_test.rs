mod common;

use axum::http::{Method, StatusCode};
use serde_json::json;

use common::{body_json, TestApp};

async fn seed_companies(app: &TestApp, count: usize) {
    for i in 1..=count {
        let response = app
            .request_authenticated(
                Method::POST,
                "/company/",
                Some(json!({
                    "company_name": format!("Company {:02}", i),
                    "company_tel": "02-123-4567",
                })),
            )
            .await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }
}

#[tokio::test]
async fn filter_pages_through_records_with_legacy_window_arithmetic() {
    let app = TestApp::new().await;
    seed_companies(&app, 25).await;

    let first = app
        .request_authenticated(
            Method::POST,
            "/company/companies/filter",
            Some(json!({"page": {"skip": 1, "limit": 10}})),
        )
        .await;
    assert_eq!(first.status(), StatusCode::OK);
    let body = body_json(first).await;
    assert_eq!(body["totalRecords"], 25);
    assert_eq!(body["totalPage"], 3);
    assert_eq!(body["currentPage"], 1);
    assert_eq!(body["recordsPerPage"], 10);
    assert_eq!(body["recordStart"], 1);
    assert_eq!(body["recordEnd"], 10);
    assert_eq!(body["resultLists"].as_array().map(|a| a.len()), Some(10));
    assert_eq!(body["status"], "success");

    let last = app
        .request_authenticated(
            Method::POST,
            "/company/companies/filter",
            Some(json!({"page": {"skip": 3, "limit": 10}})),
        )
        .await;
    let body = body_json(last).await;
    assert_eq!(body["recordStart"], 21);
    assert_eq!(body["recordEnd"], 25);
    assert_eq!(body["resultLists"].as_array().map(|a| a.len()), Some(5));
}

#[tokio::test]
async fn filter_with_no_matching_records_reports_an_empty_window() {
    let app = TestApp::new().await;

    let response = app
        .request_authenticated(
            Method::POST,
            "/company/companies/filter",
            Some(json!({"search": "nothing matches this"})),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["totalRecords"], 0);
    assert_eq!(body["totalPage"], 0);
    assert_eq!(body["recordStart"], 0);
    assert_eq!(body["recordEnd"], 0);
    assert_eq!(body["resultLists"].as_array().map(|a| a.len()), Some(0));
    assert_eq!(body["status"], "success");
}

#[tokio::test]
async fn page_zero_is_treated_as_the_first_page() {
    let app = TestApp::new().await;
    seed_companies(&app, 3).await;

    let response = app
        .request_authenticated(
            Method::POST,
            "/company/companies/filter",
            Some(json!({"page": {"skip": 0, "limit": 10}})),
        )
        .await;
    let body = body_json(response).await;
    assert_eq!(body["currentPage"], 1);
    assert_eq!(body["recordStart"], 1);
    assert_eq!(body["recordEnd"], 3);
}

#[tokio::test]
async fn search_matches_case_insensitively() {
    let app = TestApp::new().await;

    for name in ["Bangkok Cement Works", "Chiang Mai Steel", "Phuket Marine Supply"] {
        let response = app
            .request_authenticated(
                Method::POST,
                "/company/",
                Some(json!({"company_name": name})),
            )
            .await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let response = app
        .request_authenticated(
            Method::POST,
            "/company/companies/filter",
            Some(json!({"search": "BANGKOK"})),
        )
        .await;
    let body = body_json(response).await;
    assert_eq!(body["totalRecords"], 1);
    assert_eq!(
        body["resultLists"][0]["company_name"],
        "Bangkok Cement Works"
    );
}

#[tokio::test]
async fn company_crud_round_trip() {
    let app = TestApp::new().await;

    let create = app
        .request_authenticated(
            Method::POST,
            "/company/",
            Some(json!({
                "company_name": "Bangkok Cement Works",
                "company_taxnum": "0105534001234",
            })),
        )
        .await;
    assert_eq!(create.status(), StatusCode::CREATED);
    let created = body_json(create).await;
    assert_eq!(created["message"], "Company created successfully");
    let company_id = created["company_id"].as_i64().unwrap();

    let get = app
        .request_authenticated(Method::GET, &format!("/company/{}", company_id), None)
        .await;
    assert_eq!(get.status(), StatusCode::OK);
    let fetched = body_json(get).await;
    assert_eq!(fetched["company_name"], "Bangkok Cement Works");
    // Costing method defaults when not supplied.
    assert_eq!(fetched["ic_type"], "fifo");

    let update = app
        .request_authenticated(
            Method::PUT,
            &format!("/company/{}", company_id),
            Some(json!({"company_tel": "02-987-6543"})),
        )
        .await;
    assert_eq!(update.status(), StatusCode::OK);
    assert_eq!(
        body_json(update).await["message"],
        "Company updated successfully"
    );

    let get = app
        .request_authenticated(Method::GET, &format!("/company/{}", company_id), None)
        .await;
    let fetched = body_json(get).await;
    assert_eq!(fetched["company_tel"], "02-987-6543");
    assert_eq!(fetched["company_taxnum"], "0105534001234");

    let delete = app
        .request_authenticated(Method::DELETE, &format!("/company/{}", company_id), None)
        .await;
    assert_eq!(delete.status(), StatusCode::OK);
    assert_eq!(
        body_json(delete).await["message"],
        "Company deleted successfully"
    );

    let missing = app
        .request_authenticated(Method::GET, &format!("/company/{}", company_id), None)
        .await;
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn create_requires_a_company_name() {
    let app = TestApp::new().await;

    let response = app
        .request_authenticated(Method::POST, "/company/", Some(json!({"company_name": ""})))
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
