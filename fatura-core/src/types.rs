//! Output records handed to the OFX writer.
//!
//! Field names serialize as the OFX tags they feed (`DTPOSTED`, `TRNAMT`, ...)
//! so the writer can map them one to one.

use chrono::{DateTime, FixedOffset, NaiveDate};
use serde::{Deserialize, Serialize};

/// One `STMTTRN` entry scraped from a transaction row group
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatementTransaction {
    /// Civil date the charge was posted; no time of day
    #[serde(rename = "DTPOSTED")]
    pub dt_posted: NaiveDate,
    /// Trimmed description cell text
    #[serde(rename = "MEMO")]
    pub memo: String,
    /// Positive number means charge; negative means payment/credit.
    #[serde(rename = "TRNAMT")]
    pub trn_amt: f64,
}

impl StatementTransaction {
    pub fn is_credit(&self) -> bool {
        self.trn_amt < 0.0
    }
}

/// Everything the OFX writer needs for one statement page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OfxData {
    /// Wall-clock time of the scrape, not read from the page
    #[serde(rename = "DTSERVER")]
    pub dt_server: DateTime<FixedOffset>,
    #[serde(rename = "dueDate")]
    pub due_date: NaiveDate,
    #[serde(rename = "BANKTRANLIST")]
    pub bank_tran_list: Vec<StatementTransaction>,
}

impl OfxData {
    /// Sum of all charges minus credits, rounded to cents.
    pub fn balance(&self) -> f64 {
        let cents: f64 = self
            .bank_tran_list
            .iter()
            .map(|t| (t.trn_amt * 100.0).round())
            .sum();
        cents / 100.0
    }
}
