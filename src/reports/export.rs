//! CSV payloads for the report downloads.

use axum::{
    http::header,
    response::{IntoResponse, Response},
};
use csv::{Terminator, WriterBuilder};

use super::store::{InvestmentRow, StartupRow};

pub const INVESTMENTS_FILENAME: &str = "investments_report.csv";
pub const STARTUPS_FILENAME: &str = "startups_report.csv";
pub const CSV_CONTENT_TYPE: &str = "text/csv";

pub const INVESTMENT_COLUMNS: [&str; 6] = ["Date", "Investor", "Startup", "Stage", "Amount", "Equity %"];
pub const STARTUP_COLUMNS: [&str; 6] = ["Name", "Founder", "Industry", "Founded Date", "Contact Email", "Website"];

/// A rendered CSV body plus the filename it is served under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvAttachment {
    pub filename: &'static str,
    pub body: Vec<u8>,
}

impl IntoResponse for CsvAttachment {
    fn into_response(self) -> Response {
        let disposition = format!("attachment; filename=\"{}\"", self.filename);
        (
            [
                (header::CONTENT_TYPE, CSV_CONTENT_TYPE.to_string()),
                (header::CONTENT_DISPOSITION, disposition),
            ],
            self.body,
        )
            .into_response()
    }
}

pub fn investments_csv(rows: &[InvestmentRow]) -> Result<CsvAttachment, csv::Error> {
    let body = write_csv(
        INVESTMENT_COLUMNS,
        rows.iter().map(|row| {
            [
                row.date.format("%Y-%m-%d").to_string(),
                row.investor_username.clone(),
                row.startup_name.clone(),
                row.stage.label().to_string(),
                format!("{:.2}", row.amount),
                format!("{:.2}", row.equity_percentage),
            ]
        }),
    )?;
    Ok(CsvAttachment { filename: INVESTMENTS_FILENAME, body })
}

pub fn startups_csv(rows: &[StartupRow]) -> Result<CsvAttachment, csv::Error> {
    let body = write_csv(
        STARTUP_COLUMNS,
        rows.iter().map(|row| {
            [
                row.name.clone(),
                row.founder.clone(),
                row.industry.clone(),
                row.founded_date.format("%Y-%m-%d").to_string(),
                row.contact_email.clone().unwrap_or_default(),
                row.website.clone().unwrap_or_default(),
            ]
        }),
    )?;
    Ok(CsvAttachment { filename: STARTUPS_FILENAME, body })
}

fn write_csv<I>(header: [&str; 6], records: I) -> Result<Vec<u8>, csv::Error>
where
    I: IntoIterator<Item = [String; 6]>,
{
    let mut writer = WriterBuilder::new()
        .terminator(Terminator::CRLF)
        .from_writer(Vec::new());
    writer.write_record(header)?;
    for record in records {
        writer.write_record(&record)?;
    }
    writer.into_inner().map_err(|e| csv::Error::from(e.into_error()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::Stage;
    use chrono::{NaiveDate, TimeZone, Utc};
    use rust_decimal_macros::dec;

    #[test]
    fn test_empty_investments_export_is_header_only() {
        let attachment = investments_csv(&[]).unwrap();
        assert_eq!(attachment.filename, "investments_report.csv");
        assert_eq!(
            String::from_utf8(attachment.body).unwrap(),
            "Date,Investor,Startup,Stage,Amount,Equity %\r\n"
        );
    }

    #[test]
    fn test_investment_row_formatting() {
        let row = InvestmentRow {
            id: 1,
            date: NaiveDate::from_ymd_opt(2024, 3, 9).unwrap(),
            amount: dec!(1500),
            stage: Stage::SeriesA,
            equity_percentage: dec!(2.5),
            startup_id: 1,
            startup_name: "Alpha, Inc.".to_string(),
            investor_id: 1,
            investor_username: "alpha99".to_string(),
        };
        let text = String::from_utf8(investments_csv(&[row]).unwrap().body).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1], "2024-03-09,alpha99,\"Alpha, Inc.\",Series A,1500.00,2.50");
    }

    #[test]
    fn test_startup_optional_fields_render_empty() {
        let row = StartupRow {
            id: 1,
            name: "Beta".to_string(),
            description: "Payments".to_string(),
            industry: "Fintech".to_string(),
            founder: "Dana".to_string(),
            founded_date: NaiveDate::from_ymd_opt(2019, 5, 1).unwrap(),
            contact_email: None,
            website: Some("https://beta.example".to_string()),
            image_path: None,
            created_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        };
        let attachment = startups_csv(&[row]).unwrap();
        assert_eq!(attachment.filename, "startups_report.csv");
        let text = String::from_utf8(attachment.body).unwrap();
        assert_eq!(
            text,
            "Name,Founder,Industry,Founded Date,Contact Email,Website\r\n\
             Beta,Dana,Fintech,2019-05-01,,https://beta.example\r\n"
        );
    }

    #[test]
    fn test_attachment_headers() {
        let response = CsvAttachment { filename: STARTUPS_FILENAME, body: Vec::new() }.into_response();
        let headers = response.headers();
        assert_eq!(headers[header::CONTENT_TYPE], "text/csv");
        assert_eq!(
            headers[header::CONTENT_DISPOSITION],
            "attachment; filename=\"startups_report.csv\""
        );
    }
}
