use askama::Template;
use axum::{extract::State, response::Html};
use sea_orm::{EntityTrait, PaginatorTrait};

use crate::entities::startup;
use crate::error::AppError;
use crate::reports::{fetch_investments, total_invested, InvestmentQuery, InvestmentSummary};
use crate::viewer::Viewer;
use crate::views::{DashboardPage, OverviewPage};
use crate::AppState;

pub const OVERVIEW_RECENT: usize = 10;
pub const DASHBOARD_RECENT: usize = 5;

/// Public overview: grand total invested, startup count and the latest investments
#[utoipa::path(
    get,
    path = "/reports",
    responses(
        (status = 200, description = "Overview page", content_type = "text/html", body = String)
    ),
    tag = "reports"
)]
#[tracing::instrument(skip(state))]
pub async fn reports_overview(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let total_investment = total_invested(&state.db).await?;
    let total_startups = startup::Entity::find().count(&state.db).await?;
    let recent_query = InvestmentQuery::default().limit(OVERVIEW_RECENT as u64);
    let recent = fetch_investments(&state.db, recent_query).await?;

    let page = OverviewPage {
        total_investment,
        total_startups,
        recent: &recent,
    };
    Ok(Html(page.render()?))
}

/// The viewer's own holdings: total invested, startups backed, latest investments
#[utoipa::path(
    get,
    path = "/dashboard",
    params(
        ("x-remote-user" = String, Header, description = "Username forwarded by the auth proxy")
    ),
    responses(
        (status = 200, description = "Dashboard page", content_type = "text/html", body = String),
        (status = 401, description = "No authenticated viewer")
    ),
    tag = "reports"
)]
#[tracing::instrument(skip(state, viewer), fields(viewer = %viewer.username()))]
pub async fn dashboard(State(state): State<AppState>, viewer: Viewer) -> Result<Html<String>, AppError> {
    let query = InvestmentQuery::default().for_investor(viewer.id());
    let rows = fetch_investments(&state.db, query).await?;
    let summary = InvestmentSummary::from_rows(&rows);

    let page = DashboardPage {
        viewer: viewer.username(),
        summary: &summary,
        recent: &rows[..rows.len().min(DASHBOARD_RECENT)],
    };
    Ok(Html(page.render()?))
}
