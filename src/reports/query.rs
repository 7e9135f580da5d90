//! Request parameters and the query specifications built from them.
//!
//! A specification is a plain value: trimmed filters, parsed date bounds
//! and a resolved sort order. The store evaluates it in one pass.

use chrono::NaiveDate;
use serde::Deserialize;
use utoipa::IntoParams;

/// Query parameters accepted by `GET /reports/investments`.
#[derive(Debug, Default, Clone, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct InvestmentReportParams {
    /// Case-insensitive text matched against the startup name or the investor username
    pub q: Option<String>,
    /// Funding stage (Seed, Series A, Series B, Series C, IPO), matched case-insensitively
    pub stage: Option<String>,
    /// Inclusive lower bound on the investment date (YYYY-MM-DD)
    pub start_date: Option<String>,
    /// Inclusive upper bound on the investment date (YYYY-MM-DD)
    pub end_date: Option<String>,
    /// Sort key, `-` prefix for descending. Defaults to `-date`
    pub order: Option<String>,
    /// Set to `csv` to download the rows instead of the page
    pub export: Option<String>,
}

/// Query parameters accepted by `GET /reports/startups`.
#[derive(Debug, Default, Clone, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct StartupReportParams {
    /// Case-insensitive text matched against name, founder or industry
    pub q: Option<String>,
    /// Case-insensitive substring of the industry
    pub industry: Option<String>,
    /// Sort key, `-` prefix for descending. Defaults to `-created_at`
    pub order: Option<String>,
    /// Set to `csv` to download the rows instead of the page
    pub export: Option<String>,
}

impl InvestmentReportParams {
    pub fn wants_csv(&self) -> bool {
        wants_csv(self.export.as_deref())
    }
}

impl StartupReportParams {
    pub fn wants_csv(&self) -> bool {
        wants_csv(self.export.as_deref())
    }
}

fn wants_csv(export: Option<&str>) -> bool {
    export == Some("csv")
}

/// Trims a parameter; blank values count as absent.
pub fn clean(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_owned)
}

/// Parses an ISO date; anything malformed is treated as no bound.
pub fn parse_date(value: Option<&str>) -> Option<NaiveDate> {
    let raw = clean(value)?;
    match NaiveDate::parse_from_str(&raw, "%Y-%m-%d") {
        Ok(date) => Some(date),
        Err(e) => {
            tracing::debug!(value = %raw, error = %e, "ignoring malformed date bound");
            None
        }
    }
}

/// A column a report can be sorted by, addressed by its request key.
pub trait SortField: Copy + Sized {
    fn from_key(key: &str) -> Option<Self>;
    fn key(self) -> &'static str;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortOrder<F> {
    pub field: F,
    pub descending: bool,
}

impl<F: SortField> SortOrder<F> {
    pub const fn asc(field: F) -> Self {
        Self { field, descending: false }
    }

    pub const fn desc(field: F) -> Self {
        Self { field, descending: true }
    }

    /// Resolves a raw `order` value such as `-amount`. Unknown keys fall back
    /// to `default` instead of failing the request.
    pub fn parse(raw: Option<&str>, default: Self) -> Self {
        let Some(raw) = clean(raw) else {
            return default;
        };
        let (descending, key) = match raw.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, raw.as_str()),
        };
        match F::from_key(key) {
            Some(field) => Self { field, descending },
            None => {
                tracing::debug!(order = %raw, fallback = %default.as_param(), "unrecognized order key");
                default
            }
        }
    }

    /// The request form of this order, e.g. `-date`.
    pub fn as_param(&self) -> String {
        if self.descending {
            format!("-{}", self.field.key())
        } else {
            self.field.key().to_string()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvestmentField {
    Id,
    Date,
    Amount,
    Stage,
    EquityPercentage,
    Startup,
    StartupName,
    Investor,
    InvestorUsername,
}

impl SortField for InvestmentField {
    fn from_key(key: &str) -> Option<Self> {
        Some(match key {
            "id" => Self::Id,
            "date" => Self::Date,
            "amount" => Self::Amount,
            "stage" => Self::Stage,
            "equity_percentage" => Self::EquityPercentage,
            "startup" => Self::Startup,
            "startup__name" => Self::StartupName,
            "investor" => Self::Investor,
            "investor__username" => Self::InvestorUsername,
            _ => return None,
        })
    }

    fn key(self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::Date => "date",
            Self::Amount => "amount",
            Self::Stage => "stage",
            Self::EquityPercentage => "equity_percentage",
            Self::Startup => "startup",
            Self::StartupName => "startup__name",
            Self::Investor => "investor",
            Self::InvestorUsername => "investor__username",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartupField {
    Id,
    Name,
    Description,
    Industry,
    Founder,
    FoundedDate,
    CreatedAt,
    ContactEmail,
    Website,
}

impl SortField for StartupField {
    fn from_key(key: &str) -> Option<Self> {
        Some(match key {
            "id" => Self::Id,
            "name" => Self::Name,
            "description" => Self::Description,
            "industry" => Self::Industry,
            "founder" => Self::Founder,
            "founded_date" => Self::FoundedDate,
            "created_at" => Self::CreatedAt,
            "contact_email" => Self::ContactEmail,
            "website" => Self::Website,
            _ => return None,
        })
    }

    fn key(self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::Name => "name",
            Self::Description => "description",
            Self::Industry => "industry",
            Self::Founder => "founder",
            Self::FoundedDate => "founded_date",
            Self::CreatedAt => "created_at",
            Self::ContactEmail => "contact_email",
            Self::Website => "website",
        }
    }
}

/// Filter and ordering over investments joined with their startup and investor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvestmentQuery {
    pub search: Option<String>,
    pub stage: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub investor_id: Option<i32>,
    pub order: SortOrder<InvestmentField>,
    pub limit: Option<u64>,
}

impl InvestmentQuery {
    pub const DEFAULT_ORDER: SortOrder<InvestmentField> = SortOrder::desc(InvestmentField::Date);

    pub fn from_params(params: &InvestmentReportParams) -> Self {
        Self {
            search: clean(params.q.as_deref()),
            stage: clean(params.stage.as_deref()),
            start_date: parse_date(params.start_date.as_deref()),
            end_date: parse_date(params.end_date.as_deref()),
            investor_id: None,
            order: SortOrder::parse(params.order.as_deref(), Self::DEFAULT_ORDER),
            limit: None,
        }
    }

    /// Restricts the rows to one investor's holdings.
    pub fn for_investor(mut self, investor_id: i32) -> Self {
        self.investor_id = Some(investor_id);
        self
    }

    pub fn limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }
}

impl Default for InvestmentQuery {
    fn default() -> Self {
        Self::from_params(&InvestmentReportParams::default())
    }
}

/// Filter and ordering over startups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartupQuery {
    pub search: Option<String>,
    pub industry: Option<String>,
    pub order: SortOrder<StartupField>,
}

impl StartupQuery {
    pub const DEFAULT_ORDER: SortOrder<StartupField> = SortOrder::desc(StartupField::CreatedAt);

    pub fn from_params(params: &StartupReportParams) -> Self {
        Self {
            search: clean(params.q.as_deref()),
            industry: clean(params.industry.as_deref()),
            order: SortOrder::parse(params.order.as_deref(), Self::DEFAULT_ORDER),
        }
    }
}

impl Default for StartupQuery {
    fn default() -> Self {
        Self::from_params(&StartupReportParams::default())
    }
}
