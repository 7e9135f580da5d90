//! Filtered investment and startup reports.
//!
//! Request parameters become a query specification (`query`), the store
//! evaluates it once into ordered rows (`store`), and both the summary
//! figures (`aggregate`) and the CSV download (`export`) read those same rows.

pub mod aggregate;
pub mod export;
pub mod query;
pub mod store;

pub use aggregate::{GroupTotal, InvestmentSummary, StartupSummary};
pub use export::CsvAttachment;
pub use query::{InvestmentQuery, InvestmentReportParams, StartupQuery, StartupReportParams};
pub use store::{fetch_investments, fetch_startups, total_invested, InvestmentRow, StartupRow};
