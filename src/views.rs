//! askama pages for the report endpoints.

use askama::Template;
use rust_decimal::Decimal;

use crate::reports::query::{clean, InvestmentQuery, InvestmentReportParams, StartupQuery};
use crate::reports::{InvestmentRow, InvestmentSummary, StartupRow, StartupSummary};

/// Filter values echoed back into the investments form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InvestmentFilterState {
    pub q: String,
    pub stage: String,
    pub start_date: String,
    pub end_date: String,
    pub order: String,
}

impl InvestmentFilterState {
    pub fn new(params: &InvestmentReportParams, query: &InvestmentQuery) -> Self {
        Self {
            q: query.search.clone().unwrap_or_default(),
            stage: query.stage.clone().unwrap_or_default(),
            start_date: clean(params.start_date.as_deref()).unwrap_or_default(),
            end_date: clean(params.end_date.as_deref()).unwrap_or_default(),
            order: query.order.as_param(),
        }
    }
}

/// Filter values echoed back into the startups form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StartupFilterState {
    pub q: String,
    pub industry: String,
    pub order: String,
}

impl StartupFilterState {
    pub fn new(query: &StartupQuery) -> Self {
        Self {
            q: query.search.clone().unwrap_or_default(),
            industry: query.industry.clone().unwrap_or_default(),
            order: query.order.as_param(),
        }
    }
}

#[derive(Template)]
#[template(path = "reports/investments.html")]
pub struct InvestmentsReportPage<'a> {
    pub viewer: &'a str,
    pub rows: &'a [InvestmentRow],
    pub summary: &'a InvestmentSummary,
    pub filters: InvestmentFilterState,
    pub stages: &'static [&'static str],
}

#[derive(Template)]
#[template(path = "reports/startups.html")]
pub struct StartupsReportPage<'a> {
    pub viewer: &'a str,
    pub rows: &'a [StartupRow],
    pub summary: &'a StartupSummary,
    pub filters: StartupFilterState,
}

#[derive(Template)]
#[template(path = "reports/overview.html")]
pub struct OverviewPage<'a> {
    pub total_investment: Decimal,
    pub total_startups: u64,
    pub recent: &'a [InvestmentRow],
}

#[derive(Template)]
#[template(path = "dashboard.html")]
pub struct DashboardPage<'a> {
    pub viewer: &'a str,
    pub summary: &'a InvestmentSummary,
    pub recent: &'a [InvestmentRow],
}
