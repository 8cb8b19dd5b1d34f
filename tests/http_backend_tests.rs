use axum::{
    extract::{Path, Query},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use finview::api::types::Market;
use finview::report::{ReportController, StatementType};
use finview::{Backend, FetchError, HttpBackend, ViewerConfig};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::Arc;
use url::Url;

async fn financial_report(Json(body): Json<Value>) -> Json<Value> {
    let company = body["company"].as_str().unwrap_or_default();
    if company != "Moutai" {
        return Json(json!({
            "success": false,
            "message": format!("Company not found: {}", company)
        }));
    }
    Json(json!({
        "success": true,
        "data": {
            "stock_info": {"name": "Kweichow Moutai", "code": "600519", "market": body["market"], "symbol": ""},
            "financial": {
                "balance_sheet": [{"Z_FIRST": "1.00亿", "A_SECOND": "2.00亿"}],
                "cash_flow_error": "timeout"
            }
        }
    }))
}

async fn markdown_list() -> Json<Value> {
    Json(json!({
        "files": [
            {"name": "a.md", "path": "docs/a.md", "size": 1024},
            {"name": "b c.md", "path": "docs/b c.md", "size": 10}
        ]
    }))
}

async fn markdown_content(Query(query): Query<HashMap<String, String>>) -> Result<Json<Value>, StatusCode> {
    match query.get("path").map(String::as_str) {
        Some("docs/b c.md") => Ok(Json(json!({
            "filename": "b c.md",
            "path": "docs/b c.md",
            "size": 10,
            "content": "# B&C"
        }))),
        _ => Err(StatusCode::NOT_FOUND),
    }
}

async fn mindmaps() -> Json<Value> {
    Json(json!({"mindmaps": [{"name": "Cement", "filename": "cement.md", "size": 2048}]}))
}

async fn mindmap(Path(filename): Path<String>) -> Result<Json<Value>, StatusCode> {
    if filename == "cement.md" {
        Ok(Json(json!({"content": "# Cement"})))
    } else {
        Err(StatusCode::INTERNAL_SERVER_ERROR)
    }
}

async fn spawn_server() -> Url {
    let app = Router::new()
        .route("/api/financial-report", post(financial_report))
        .route("/api/markdown/list", get(markdown_list))
        .route("/api/markdown/content", get(markdown_content))
        .route("/api/mindmaps", get(mindmaps))
        .route("/api/mindmap/:filename", get(mindmap));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    Url::parse(&format!("http://{}", addr)).unwrap()
}

async fn backend() -> HttpBackend {
    HttpBackend::new(&ViewerConfig::new(spawn_server().await)).unwrap()
}

#[tokio::test]
async fn test_financial_report_success_keeps_column_order() {
    let backend = backend().await;
    let record = backend
        .financial_report("Moutai", Some(Market::HongKong))
        .await
        .unwrap();

    assert_eq!(record.stock_info.market, "HK");
    assert_eq!(record.stock_info.trading_symbol(), "600519");
    let columns: Vec<&String> = record.financial.balance_sheet[0].keys().collect();
    assert_eq!(columns, vec!["Z_FIRST", "A_SECOND"]);
    assert_eq!(
        StatementType::CashFlow.error(&record.financial),
        Some("timeout")
    );
}

#[tokio::test]
async fn test_financial_report_logical_failure() {
    let backend = backend().await;
    let err = backend.financial_report("Nobody", None).await.unwrap_err();
    match err {
        FetchError::Backend(message) => assert_eq!(message, "Company not found: Nobody"),
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn test_report_controller_over_http() {
    let backend: Arc<dyn Backend> = Arc::new(backend().await);
    let mut controller = ReportController::new(backend);
    controller.search("Moutai", Some(Market::AShare)).await;

    assert!(controller.view().result_visible);
    assert!(controller
        .view()
        .report_html
        .contains("<th>Z_FIRST</th><th>A_SECOND</th>"));
}

#[tokio::test]
async fn test_markdown_endpoints() {
    let backend = backend().await;

    let files = backend.markdown_files().await.unwrap();
    assert_eq!(files.len(), 2);
    assert_eq!(files[0].size, 1024);

    let record = backend.markdown_content("docs/b c.md").await.unwrap();
    assert_eq!(record.content, "# B&C");

    let err = backend.markdown_content("docs/missing.md").await.unwrap_err();
    assert!(matches!(err, FetchError::Status(404)));
}

#[tokio::test]
async fn test_mindmap_endpoints() {
    let backend = backend().await;

    let entries = backend.mindmaps().await.unwrap();
    assert_eq!(entries[0].filename, "cement.md");
    assert_eq!(backend.mindmap("cement.md").await.unwrap(), "# Cement");

    let err = backend.mindmap("other.md").await.unwrap_err();
    assert!(matches!(err, FetchError::Status(500)));
}

#[tokio::test]
async fn test_unreachable_backend_is_a_transport_error() {
    // Bind then drop to get a port with nothing listening.
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let backend = HttpBackend::new(&ViewerConfig::new(
        Url::parse(&format!("http://{}", addr)).unwrap(),
    ))
    .unwrap();
    let err = backend.markdown_files().await.unwrap_err();
    assert!(matches!(err, FetchError::Transport(_)));
    assert!(err.to_string().starts_with("request failed"));
}
