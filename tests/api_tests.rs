mod common;

use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use common::{add_investment, add_startup, add_user, seed_reports, test_db, ymd};
use investhub::entities::Stage;
use investhub::{create_app, AppState};
use serde_json::Value;
use tower::ServiceExt;

async fn app() -> Router {
    let db = test_db().await;
    seed_reports(&db).await;
    create_app(AppState::new(db))
}

fn get(uri: &str, viewer: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().uri(uri);
    if let Some(username) = viewer {
        builder = builder.header("x-remote-user", username);
    }
    builder.body(Body::empty()).unwrap()
}

async fn body_text(response: axum::response::Response) -> String {
    let body = to_bytes(response.into_body(), 1024 * 1024).await.unwrap();
    String::from_utf8(body.to_vec()).unwrap()
}

/// Cells of the report table, six per row.
fn table_rows(html: &str, table_id: &str) -> Vec<Vec<String>> {
    let start = html.find(&format!("<table id=\"{}\">", table_id)).unwrap();
    let table = &html[start..];
    let table = &table[..table.find("</table>").unwrap()];
    let cells: Vec<String> = table
        .split("<td>")
        .skip(1)
        .map(|cell| cell[..cell.find("</td>").unwrap()].trim().to_string())
        .collect();
    cells.chunks(6).map(|chunk| chunk.to_vec()).collect()
}

fn csv_rows(text: &str) -> Vec<Vec<String>> {
    text.split("\r\n")
        .skip(1)
        .filter(|line| !line.is_empty())
        .map(|line| line.split(',').map(str::to_string).collect())
        .collect()
}

#[tokio::test]
async fn test_health_check() {
    let app = app().await;

    let response = app.oneshot(get("/health", None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = to_bytes(response.into_body(), 1024 * 1024).await.unwrap();
    let json: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["status"], "ok");
}

#[tokio::test]
async fn test_reports_require_a_viewer() {
    let app = app().await;

    for uri in ["/reports/investments", "/reports/startups?export=csv", "/dashboard"] {
        let response = app.clone().oneshot(get(uri, None)).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "{}", uri);
    }

    let response = app
        .oneshot(get("/reports/investments", Some("mallory")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = to_bytes(response.into_body(), 1024 * 1024).await.unwrap();
    let json: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["error"], "Unauthorized: unknown user mallory");
}

#[tokio::test]
async fn test_investments_page_shows_rows_and_aggregates() {
    let app = app().await;

    let response = app
        .oneshot(get("/reports/investments?q=beta&order=amount", Some("dana")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;

    assert!(html.contains(r#"<dd id="total-investment">350.00</dd>"#));
    assert!(html.contains(r#"<dd id="investments-count">2</dd>"#));
    assert!(html.contains(r#"<dd id="distinct-startups">1</dd>"#));
    assert!(html.contains("<li>Beta Labs: 350.00</li>"));
    // filters are echoed back into the form
    assert!(html.contains(r#"name="q" value="beta""#));
    assert!(html.contains(r#"name="order" value="amount""#));

    let rows = table_rows(&html, "investments");
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0], ["2024-02-01", "alpha99", "Beta Labs", "Seed", "50.00", "2.50"]);
    assert_eq!(rows[1], ["2024-01-31", "dana", "Beta Labs", "Series A", "300.00", "2.50"]);
}

#[tokio::test]
async fn test_investments_csv_matches_page() {
    let app = app().await;
    let uri = "/reports/investments?start_date=2024-01-01&order=-startup__name";

    let page = app.clone().oneshot(get(uri, Some("dana"))).await.unwrap();
    let html = body_text(page).await;

    let response = app
        .oneshot(get(&format!("{}&export=csv", uri), Some("dana")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::CONTENT_TYPE], "text/csv");
    assert_eq!(
        response.headers()[header::CONTENT_DISPOSITION],
        "attachment; filename=\"investments_report.csv\""
    );
    let text = body_text(response).await;

    assert!(text.starts_with("Date,Investor,Startup,Stage,Amount,Equity %\r\n"));
    let exported = csv_rows(&text);
    assert_eq!(exported.len(), 3);
    assert_eq!(exported, table_rows(&html, "investments"));
}

#[tokio::test]
async fn test_empty_export_is_header_only() {
    let app = app().await;

    let response = app
        .oneshot(get("/reports/investments?q=zzz&export=csv", Some("dana")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_text(response).await,
        "Date,Investor,Startup,Stage,Amount,Equity %\r\n"
    );
}

#[tokio::test]
async fn test_blank_params_are_ignored() {
    let app = app().await;

    let response = app
        .oneshot(get(
            "/reports/investments?q=&stage=&start_date=&end_date=&order=&export=csv",
            Some("dana"),
        ))
        .await
        .unwrap();
    let text = body_text(response).await;
    assert_eq!(csv_rows(&text).len(), 4);
}

#[tokio::test]
async fn test_startups_report_and_export() {
    let app = app().await;

    let response = app
        .clone()
        .oneshot(get("/reports/startups?industry=fintech", Some("alpha99")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains(r#"<dd id="total-startups">1</dd>"#));
    assert!(html.contains(r#"<dd id="distinct-industries">1</dd>"#));
    assert!(html.contains("Alpha Corp"));
    assert!(!html.contains("Gamma Bio"));

    let response = app
        .oneshot(get("/reports/startups?order=name&export=csv", Some("alpha99")))
        .await
        .unwrap();
    assert_eq!(
        response.headers()[header::CONTENT_DISPOSITION],
        "attachment; filename=\"startups_report.csv\""
    );
    let text = body_text(response).await;
    let names: Vec<String> = csv_rows(&text).into_iter().map(|row| row[0].clone()).collect();
    assert_eq!(names, ["Alpha Corp", "Beta Labs", "Gamma Bio"]);
}

#[tokio::test]
async fn test_overview_is_public() {
    let app = app().await;

    let response = app.oneshot(get("/reports", None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("650.00"));
    assert!(html.contains(r#"id="total-startups">3<"#));
}

#[tokio::test]
async fn test_dashboard_only_counts_own_investments() {
    let app = app().await;

    let response = app.oneshot(get("/dashboard", Some("dana"))).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("400.00"));
    assert!(!html.contains("Gamma Bio"));
}

#[tokio::test]
async fn test_unknown_route_is_404() {
    let app = app().await;

    let response = app.oneshot(get("/reports/unknown", Some("dana"))).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = to_bytes(response.into_body(), 1024 * 1024).await.unwrap();
    let json: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["error"], "Not found: /reports/unknown");
}

#[tokio::test]
async fn test_malformed_query_string_is_400_json() {
    let app = app().await;

    let response = app
        .oneshot(get("/reports/investments?q=alpha&q=beta", Some("dana")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = to_bytes(response.into_body(), 1024 * 1024).await.unwrap();
    let json: Value = serde_json::from_slice(&body).unwrap();
    assert!(json["error"].as_str().unwrap().starts_with("Invalid request: "));
}

#[tokio::test]
async fn test_padded_export_flag_renders_the_page() {
    let app = app().await;

    let response = app
        .oneshot(get("/reports/investments?export=%20csv%20", Some("dana")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().get(header::CONTENT_DISPOSITION).is_none());
    assert!(body_text(response).await.contains("<table id=\"investments\">"));
}

#[tokio::test]
async fn test_overview_lists_ten_latest() {
    let db = test_db().await;
    let dana = add_user(&db, "dana").await;
    let alpha = add_startup(&db, "Alpha Corp", "Ada Park", "Fintech", 1).await;
    for day in 1..=12 {
        add_investment(&db, &dana, &alpha, 10, ymd(2024, 3, day), Stage::Seed).await;
    }
    let app = create_app(AppState::new(db));

    let response = app.oneshot(get("/reports", None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains(r#"<dd id="total-investment">120.00</dd>"#));

    let table = &html[html.find("<table id=\"recent-investments\">").unwrap()..];
    assert_eq!(table.matches("<tr>").count(), 1 + 10);
    assert!(table.contains("2024-03-12"));
    assert!(!table.contains("2024-03-02"));
}
