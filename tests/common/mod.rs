#![allow(dead_code)]

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode};
use serde_json::{Value, json};
use std::path::PathBuf;
use tempfile::TempDir;
use tower::ServiceExt;

use portal_gateway::db::{self, PortalStorage};
use portal_gateway::router::{GatewayState, gateway_router};
use portal_gateway::service::files::FileStore;

pub struct TestGateway {
    pub app: Router,
    pub storage: PortalStorage,
    pub upload_root: PathBuf,
    // Holds the sqlite file and upload dir for the test's lifetime.
    _tmp: TempDir,
}

pub async fn spawn_gateway() -> TestGateway {
    let tmp = TempDir::new().expect("failed to create temp dir");
    let database_url = format!("sqlite:{}", tmp.path().join("portal.sqlite").display());
    let pool = db::connect(&database_url)
        .await
        .expect("failed to open test database");
    let storage = PortalStorage::new(pool);
    storage.init_schema().await.expect("failed to init schema");

    let upload_root = tmp.path().join("files");
    let files = FileStore::new(&upload_root);
    let state = GatewayState::new(storage.clone(), files);

    TestGateway {
        app: gateway_router(state),
        storage,
        upload_root,
        _tmp: tmp,
    }
}

pub async fn seed_client(storage: &PortalStorage, id: i64, email: &str, password: &str) {
    let hash = bcrypt::hash(password, 4).expect("bcrypt hash failed");
    sqlx::query(
        r#"INSERT INTO tblclients
           (id, firstname, lastname, email, password, phonenumber, address1, status, datecreated)
           VALUES (?, 'Test', 'Client', ?, ?, '0800000000', '1 Main St', 'Active', '2024-01-01')"#,
    )
    .bind(id)
    .bind(email)
    .bind(hash)
    .execute(storage.pool())
    .await
    .expect("failed to seed client");
}

pub async fn seed_invoice(
    storage: &PortalStorage,
    id: i64,
    userid: i64,
    date: &str,
    total: f64,
    status: &str,
) {
    sqlx::query(
        r#"INSERT INTO tblinvoices (id, userid, invoicenum, date, duedate, subtotal, total, status)
           VALUES (?, ?, ?, ?, ?, ?, ?, ?)"#,
    )
    .bind(id)
    .bind(userid)
    .bind(format!("INV-{id}"))
    .bind(date)
    .bind(date)
    .bind(total)
    .bind(total)
    .bind(status)
    .execute(storage.pool())
    .await
    .expect("failed to seed invoice");
}

pub async fn seed_invoice_item(storage: &PortalStorage, invoiceid: i64, description: &str, amount: f64) {
    sqlx::query("INSERT INTO tblinvoiceitems (invoiceid, description, amount) VALUES (?, ?, ?)")
        .bind(invoiceid)
        .bind(description)
        .bind(amount)
        .execute(storage.pool())
        .await
        .expect("failed to seed invoice item");
}

pub async fn login(app: &Router, identifier: &str, password: &str) -> (StatusCode, Value) {
    let payload = json!({ "identifier": identifier, "password": password });
    let resp = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v2/auth/login")
                .header("content-type", "application/json")
                .body(Body::from(payload.to_string()))
                .expect("failed to build request"),
        )
        .await
        .expect("request failed");
    let status = resp.status();
    (status, read_json(resp).await)
}

/// Convenience: seed-independent login that unwraps the token.
pub async fn login_token(app: &Router, identifier: &str, password: &str) -> String {
    let (status, body) = login(app, identifier, password).await;
    assert_eq!(status, StatusCode::OK, "login failed: {body}");
    body["data"]["token"]
        .as_str()
        .expect("token missing from login response")
        .to_string()
}

pub async fn get_with_auth(app: &Router, uri: &str, auth: Option<&str>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(header) = auth {
        builder = builder.header("authorization", header);
    }
    let resp = app
        .clone()
        .oneshot(builder.body(Body::empty()).expect("failed to build request"))
        .await
        .expect("request failed");
    let status = resp.status();
    (status, read_json(resp).await)
}

pub async fn read_json(resp: axum::response::Response) -> Value {
    let bytes = to_bytes(resp.into_body(), usize::MAX)
        .await
        .expect("failed to read response body");
    serde_json::from_slice(&bytes).expect("response body was not JSON")
}
