use std::net::SocketAddr;

use axum::Router;
use employee::routes::{self, AppState};
use models::Employee;
use reqwest::StatusCode;
use serde_json::json;
use service::EntityStore;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;

struct TestApp {
    base_url: String,
}

async fn start_server() -> anyhow::Result<TestApp> {
    let state = AppState { store: EntityStore::<Employee>::new() };
    let app: Router = routes::build_router(state, CorsLayer::very_permissive());

    let listener = TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0)).await?;
    let addr: SocketAddr = listener.local_addr()?;
    let base_url = format!("http://{}:{}", addr.ip(), addr.port());

    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            eprintln!("server error: {}", e);
        }
    });

    Ok(TestApp { base_url })
}

fn client() -> reqwest::Client {
    reqwest::Client::new()
}

async fn create(app: &TestApp, name: &str, department_id: u64) -> anyhow::Result<Employee> {
    let res = client()
        .post(format!("{}/api/employee/create", app.base_url))
        .json(&json!({"name": name, "departmentId": department_id}))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    Ok(res.json().await?)
}

#[tokio::test]
async fn health_is_public() -> anyhow::Result<()> {
    let app = start_server().await?;
    let res = client().get(format!("{}/health", app.base_url)).send().await?;
    assert_eq!(res.status(), StatusCode::OK);
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["status"], "ok");
    Ok(())
}

#[tokio::test]
async fn create_then_list_preserves_order_and_ids() -> anyhow::Result<()> {
    let app = start_server().await?;
    let a = create(&app, "Ana", 1).await?;
    let b = create(&app, "Bo", 2).await?;
    assert_eq!(a.id, 1);
    assert_eq!(b.id, 2);

    let res = client().get(format!("{}/api/employee/all", app.base_url)).send().await?;
    assert_eq!(res.status(), StatusCode::OK);
    let all: Vec<Employee> = res.json().await?;
    assert_eq!(all, vec![a, b]);
    Ok(())
}

#[tokio::test]
async fn search_hits_and_misses() -> anyhow::Result<()> {
    let app = start_server().await?;
    let created = create(&app, "Ana", 1).await?;

    let res = client()
        .get(format!("{}/api/employee/search/{}", app.base_url, created.id))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let found: Employee = res.json().await?;
    assert_eq!(found, created);

    let res = client().get(format!("{}/api/employee/search/999", app.base_url)).send().await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let body = res.json::<serde_json::Value>().await?;
    assert!(body["error"].as_str().expect("error body").contains("not found"));
    Ok(())
}

#[tokio::test]
async fn department_filter_returns_subset_or_empty() -> anyhow::Result<()> {
    let app = start_server().await?;
    create(&app, "Ana", 1).await?;
    create(&app, "Bo", 2).await?;
    create(&app, "Cy", 1).await?;

    let res =
        client().get(format!("{}/api/employee/department/1", app.base_url)).send().await?;
    let dept1: Vec<Employee> = res.json().await?;
    assert_eq!(dept1.iter().map(|e| e.name.as_str()).collect::<Vec<_>>(), vec!["Ana", "Cy"]);

    let res =
        client().get(format!("{}/api/employee/department/42", app.base_url)).send().await?;
    assert_eq!(res.status(), StatusCode::OK);
    let empty: Vec<Employee> = res.json().await?;
    assert!(empty.is_empty());
    Ok(())
}

#[tokio::test]
async fn dangling_department_id_is_accepted_and_queryable() -> anyhow::Result<()> {
    let app = start_server().await?;
    // No department service exists here at all; creation must still work.
    let ghost = create(&app, "Ghost", 777).await?;

    let res =
        client().get(format!("{}/api/employee/department/777", app.base_url)).send().await?;
    let found: Vec<Employee> = res.json().await?;
    assert_eq!(found, vec![ghost]);
    Ok(())
}

#[tokio::test]
async fn malformed_payload_is_rejected_before_the_store() -> anyhow::Result<()> {
    let app = start_server().await?;
    let res = client()
        .post(format!("{}/api/employee/create", app.base_url))
        .header("content-type", "application/json")
        .body(r#"{"name": "NoDept"}"#)
        .send()
        .await?;
    assert!(res.status().is_client_error());

    let res = client().get(format!("{}/api/employee/all", app.base_url)).send().await?;
    let all: Vec<Employee> = res.json().await?;
    assert!(all.is_empty());
    Ok(())
}
