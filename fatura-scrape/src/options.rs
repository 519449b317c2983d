//! Scrape options: where the markers live on the page and how strict to be.

use serde::{Deserialize, Serialize};

use crate::layout::{ContainerKind, DateFormat};

/// CSS selectors for the page's structural markers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Markers {
    /// Value element nested inside the "due" status container
    pub due_date: String,
    pub date_cell: String,
    pub description_cell: String,
    pub amount_cell: String,
    /// Attribute marking a duplicate value hidden from assistive technology
    pub hidden_attr: String,
    pub hidden_value: String,
}

impl Default for Markers {
    fn default() -> Self {
        Self {
            due_date: ".due .value".to_string(),
            date_cell: ".date".to_string(),
            description_cell: ".description".to_string(),
            amount_cell: ".amount".to_string(),
            hidden_attr: "aria-hidden".to_string(),
            hidden_value: "true".to_string(),
        }
    }
}

impl Markers {
    /// Spans inside an amount cell that are not themselves hidden.
    pub fn visible_span_selector(&self) -> String {
        format!(
            r#"span:not([{}="{}"])"#,
            self.hidden_attr, self.hidden_value
        )
    }
}

/// What to do with a transaction row that fails to parse.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RowPolicy {
    /// Fail the whole scrape.
    #[default]
    Abort,
    /// Drop the row and log a warning.
    Skip,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrapeOptions {
    /// `None` probes the document.
    pub container: Option<ContainerKind>,
    /// `None` probes the document.
    pub dates: Option<DateFormat>,
    pub row_policy: RowPolicy,
    pub markers: Markers,
}
