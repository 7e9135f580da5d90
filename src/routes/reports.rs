use askama::Template;
use axum::{
    extract::{rejection::QueryRejection, Query, State},
    response::{Html, IntoResponse, Response},
};

use crate::entities::Stage;
use crate::error::AppError;
use crate::reports::export::{investments_csv, startups_csv};
use crate::reports::{
    fetch_investments, fetch_startups, InvestmentQuery, InvestmentReportParams, InvestmentSummary,
    StartupQuery, StartupReportParams, StartupSummary,
};
use crate::viewer::Viewer;
use crate::views::{InvestmentFilterState, InvestmentsReportPage, StartupFilterState, StartupsReportPage};
use crate::AppState;

/// Investments report as an HTML table, or as a CSV download with `export=csv`
#[utoipa::path(
    get,
    path = "/reports/investments",
    params(
        InvestmentReportParams,
        ("x-remote-user" = String, Header, description = "Username forwarded by the auth proxy")
    ),
    responses(
        (status = 200, description = "Report page; with export=csv a text/csv attachment named investments_report.csv", content_type = "text/html", body = String),
        (status = 400, description = "Malformed query string"),
        (status = 401, description = "No authenticated viewer")
    ),
    tag = "reports"
)]
#[tracing::instrument(skip(state, viewer, params), fields(viewer = %viewer.username()))]
pub async fn investments_report(
    State(state): State<AppState>,
    viewer: Viewer,
    params: Result<Query<InvestmentReportParams>, QueryRejection>,
) -> Result<Response, AppError> {
    let Query(params) = params?;
    let query = InvestmentQuery::from_params(&params);
    let rows = fetch_investments(&state.db, query.clone()).await?;

    // The page and the download share `rows`, so they can never disagree
    if params.wants_csv() {
        tracing::info!(rows = rows.len(), "exporting investments report");
        return Ok(investments_csv(&rows)?.into_response());
    }

    let summary = InvestmentSummary::from_rows(&rows);
    let page = InvestmentsReportPage {
        viewer: viewer.username(),
        rows: &rows,
        summary: &summary,
        filters: InvestmentFilterState::new(&params, &query),
        stages: &Stage::LABELS,
    };
    Ok(Html(page.render()?).into_response())
}

/// Startups report as an HTML table, or as a CSV download with `export=csv`
#[utoipa::path(
    get,
    path = "/reports/startups",
    params(
        StartupReportParams,
        ("x-remote-user" = String, Header, description = "Username forwarded by the auth proxy")
    ),
    responses(
        (status = 200, description = "Report page; with export=csv a text/csv attachment named startups_report.csv", content_type = "text/html", body = String),
        (status = 400, description = "Malformed query string"),
        (status = 401, description = "No authenticated viewer")
    ),
    tag = "reports"
)]
#[tracing::instrument(skip(state, viewer, params), fields(viewer = %viewer.username()))]
pub async fn startups_report(
    State(state): State<AppState>,
    viewer: Viewer,
    params: Result<Query<StartupReportParams>, QueryRejection>,
) -> Result<Response, AppError> {
    let Query(params) = params?;
    let query = StartupQuery::from_params(&params);
    let rows = fetch_startups(&state.db, query.clone()).await?;

    if params.wants_csv() {
        tracing::info!(rows = rows.len(), "exporting startups report");
        return Ok(startups_csv(&rows)?.into_response());
    }

    let summary = StartupSummary::from_rows(&rows);
    let page = StartupsReportPage {
        viewer: viewer.username(),
        rows: &rows,
        summary: &summary,
        filters: StartupFilterState::new(&query),
    };
    Ok(Html(page.render()?).into_response())
}
