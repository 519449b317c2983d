//! Page layout variants.
//!
//! Two statement page generations are in the wild: one `<table>` per
//! transaction, and one `<table>` with a `<tbody>` per transaction. Rows carry
//! either a `dd / mmm` date or a full `dd/mm/yy` date. Both axes are probed
//! once per document unless pinned in `ScrapeOptions`.

use fatura_core::{ScrapeError, first_occurrences, parse_due_date};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::options::{Markers, ScrapeOptions};
use crate::tree::{DocumentTree, TreeNode};

/// Element that groups the cells of one transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ContainerKind {
    Table,
    TableBody,
}

impl ContainerKind {
    pub fn tag(&self) -> &'static str {
        match self {
            ContainerKind::Table => "table",
            ContainerKind::TableBody => "tbody",
        }
    }
}

/// How the posted date is written in each row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DateFormat {
    /// `24 / abr`, year taken from the due date
    DayMonthName,
    /// `24/04/21`
    Full,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageLayout {
    pub container: ContainerKind,
    pub dates: DateFormat,
}

impl PageLayout {
    /// Resolve the layout, probing the document for anything not pinned.
    pub fn resolve<D: DocumentTree>(doc: &D, opts: &ScrapeOptions) -> Result<Self, ScrapeError> {
        let container = match opts.container {
            Some(kind) => kind,
            None => probe_container(doc, &opts.markers)?,
        };
        let dates = match opts.dates {
            Some(format) => format,
            None => probe_dates(doc, &opts.markers)?,
        };
        debug!(?container, ?dates, "resolved page layout");
        Ok(Self { container, dates })
    }
}

/// More description-bearing tbody groups than tables means one tbody per
/// transaction, even when the page splits them over several tables.
fn probe_container<D: DocumentTree>(doc: &D, markers: &Markers) -> Result<ContainerKind, ScrapeError> {
    let descriptions = doc.query(&markers.description_cell)?;
    let tables = first_occurrences(descriptions.iter().filter_map(|d| d.closest("table")));
    let bodies = first_occurrences(descriptions.iter().filter_map(|d| d.closest("tbody")));

    if bodies.len() > tables.len() {
        Ok(ContainerKind::TableBody)
    } else {
        Ok(ContainerKind::Table)
    }
}

fn probe_dates<D: DocumentTree>(doc: &D, markers: &Markers) -> Result<DateFormat, ScrapeError> {
    let first = doc.query(&markers.date_cell)?.into_iter().next();
    match first {
        Some(cell) if parse_due_date(&cell.text_content()).is_ok() => Ok(DateFormat::Full),
        _ => Ok(DateFormat::DayMonthName),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::html::HtmlDocument;

    const TABLE_PER_TXN: &str = r#"
<table><tr><td class="date">17 / jun</td><td class="description">A</td><td class="amount">1,00</td></tr></table>
<table><tr><td class="date">18 / jun</td><td class="description">B</td><td class="amount">2,00</td></tr></table>
"#;

    const BODY_PER_TXN: &str = r#"
<table>
  <tbody><tr><td class="date">17/06/20</td><td class="description">A</td><td class="amount">1,00</td></tr></tbody>
  <tbody><tr><td class="date">18/06/20</td><td class="description">B</td><td class="amount">2,00</td></tr></tbody>
</table>
"#;

    #[test]
    fn test_probe_table_per_transaction() {
        let doc = HtmlDocument::parse(TABLE_PER_TXN);
        let layout = PageLayout::resolve(&doc, &ScrapeOptions::default()).unwrap();
        assert_eq!(
            layout,
            PageLayout {
                container: ContainerKind::Table,
                dates: DateFormat::DayMonthName,
            }
        );
    }

    #[test]
    fn test_probe_body_per_transaction() {
        let doc = HtmlDocument::parse(BODY_PER_TXN);
        let layout = PageLayout::resolve(&doc, &ScrapeOptions::default()).unwrap();
        assert_eq!(layout.container, ContainerKind::TableBody);
        assert_eq!(layout.dates, DateFormat::Full);
    }

    #[test]
    fn test_pinned_layout_skips_probe() {
        let doc = HtmlDocument::parse(BODY_PER_TXN);
        let opts = ScrapeOptions {
            container: Some(ContainerKind::Table),
            dates: Some(DateFormat::DayMonthName),
            ..Default::default()
        };
        let layout = PageLayout::resolve(&doc, &opts).unwrap();
        assert_eq!(layout.container, ContainerKind::Table);
        assert_eq!(layout.dates, DateFormat::DayMonthName);
    }
}
