//! Statement page -> `OfxData`.

use chrono::{Datelike, NaiveDate};
use fatura_core::{
    Clock, OfxData, ScrapeError, StatementTransaction, first_occurrences, parse_day_month_name,
    parse_decimal_comma, parse_due_date,
};
use tracing::{debug, warn};

use crate::layout::{DateFormat, PageLayout};
use crate::options::{Markers, RowPolicy, ScrapeOptions};
use crate::tree::{DocumentTree, TreeNode};

/// Scrape the whole statement: due date, transactions, and a `DTSERVER`
/// stamp from `clock`.
pub fn scrape_ofx_data<D: DocumentTree>(
    doc: &D,
    opts: &ScrapeOptions,
    clock: &dyn Clock,
) -> Result<OfxData, ScrapeError> {
    let dt_server = clock.now();
    let due_date = scrape_due_date(doc, &opts.markers)?;
    let bank_tran_list = scrape_bank_tran_list(doc, due_date, opts)?;

    Ok(OfxData {
        dt_server,
        due_date,
        bank_tran_list,
    })
}

/// Read the `dd/mm/yy` due date from the "due" status element.
pub fn scrape_due_date<D: DocumentTree>(doc: &D, markers: &Markers) -> Result<NaiveDate, ScrapeError> {
    let matches = doc.query(&markers.due_date)?;
    if matches.len() > 1 {
        debug!(count = matches.len(), "several due-date elements, using the first");
    }
    let node = matches
        .into_iter()
        .next()
        .ok_or_else(|| ScrapeError::not_found("due date"))?;

    parse_due_date(&node.text_content())
}

/// Every distinct transaction container, in order of first appearance.
///
/// Transaction dates without a year get `due_date`'s year.
pub fn scrape_bank_tran_list<D: DocumentTree>(
    doc: &D,
    due_date: NaiveDate,
    opts: &ScrapeOptions,
) -> Result<Vec<StatementTransaction>, ScrapeError> {
    let layout = PageLayout::resolve(doc, opts)?;
    let tag = layout.container.tag();

    let descriptions = doc.query(&opts.markers.description_cell)?;
    let containers = first_occurrences(descriptions.iter().filter_map(|d| d.closest(tag)));
    debug!(
        descriptions = descriptions.len(),
        containers = containers.len(),
        "found transaction containers"
    );

    let mut out = Vec::with_capacity(containers.len());
    for (index, container) in containers.into_iter().enumerate() {
        match scrape_stmt_trn_from_node(container, due_date.year(), &opts.markers, layout.dates) {
            Ok(txn) => out.push(txn),
            Err(err) => match opts.row_policy {
                RowPolicy::Abort => return Err(err),
                RowPolicy::Skip => warn!(index, error = %err, "skipping transaction row"),
            },
        }
    }

    Ok(out)
}

/// Extract amount, memo and posted date from one transaction container.
pub fn scrape_stmt_trn_from_node<'a, N: TreeNode<'a>>(
    node: N,
    year: i32,
    markers: &Markers,
    dates: DateFormat,
) -> Result<StatementTransaction, ScrapeError> {
    let trn_amt = scrape_amount(node, markers)?;
    let memo = first_text(node, &markers.description_cell, "description cell")?
        .trim()
        .to_string();

    let date_text = first_text(node, &markers.date_cell, "date cell")?;
    let dt_posted = match dates {
        DateFormat::DayMonthName => parse_day_month_name(&date_text, year)?,
        DateFormat::Full => parse_due_date(&date_text)?,
    };

    Ok(StatementTransaction {
        dt_posted,
        memo,
        trn_amt,
    })
}

fn first_text<'a, N: TreeNode<'a>>(
    node: N,
    selector: &str,
    what: &str,
) -> Result<String, ScrapeError> {
    node.query(selector)?
        .into_iter()
        .next()
        .map(|n| n.text_content())
        .ok_or_else(|| ScrapeError::not_found(what))
}

/// First visible decimal-comma value among the amount cells.
///
/// Foreign-currency rows show the original amount in a span hidden from
/// assistive technology next to the converted one; only visible spans count.
/// A cell without spans is read directly.
fn scrape_amount<'a, N: TreeNode<'a>>(node: N, markers: &Markers) -> Result<f64, ScrapeError> {
    let cells = node.query(&markers.amount_cell)?;
    if cells.is_empty() {
        return Err(ScrapeError::not_found("amount cell"));
    }

    let visible_selector = markers.visible_span_selector();
    let mut candidates = Vec::new();
    let mut hidden_spans = 0;
    for cell in &cells {
        let spans = cell.query("span")?;
        if spans.is_empty() {
            candidates.push(cell.text_excluding(&markers.hidden_attr, &markers.hidden_value));
            continue;
        }
        let mut visible_spans = 0;
        for span in cell.query(&visible_selector)? {
            if hidden_within(span, *cell, markers) {
                continue;
            }
            visible_spans += 1;
            candidates.push(span.text_excluding(&markers.hidden_attr, &markers.hidden_value));
        }
        hidden_spans += spans.len() - visible_spans;
    }

    let visible: Vec<&str> = candidates
        .iter()
        .map(|text| text.trim())
        .filter(|text| !text.is_empty())
        .collect();
    let values: Vec<f64> = visible
        .iter()
        .filter_map(|text| parse_decimal_comma(text).ok())
        .collect();

    match values.split_first() {
        Some((&first, rest)) => {
            let others: Vec<f64> = first_occurrences(rest.iter().copied().filter(|v| *v != first));
            if !others.is_empty() {
                debug!(amount = first, ?others, "several visible amounts, using the first");
            }
            Ok(first)
        }
        None if visible.is_empty() && hidden_spans > 1 => Err(ScrapeError::AmbiguousMatch {
            what: "amount".to_string(),
            candidates: hidden_spans,
        }),
        None => Err(ScrapeError::parse("amount", visible.concat())),
    }
}

/// True when an element between `node` and `cell` is hidden.
fn hidden_within<'a, N: TreeNode<'a>>(node: N, cell: N, markers: &Markers) -> bool {
    let mut current = node.parent_element();
    while let Some(n) = current {
        if n == cell {
            return false;
        }
        if n.attr(&markers.hidden_attr) == Some(markers.hidden_value.as_str()) {
            return true;
        }
        current = n.parent_element();
    }
    false
}
