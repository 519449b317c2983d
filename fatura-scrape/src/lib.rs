//! fatura-scrape: pull the due date and transaction list out of a rendered
//! card-statement page.

pub mod html;
pub mod layout;
pub mod options;
pub mod statement;
pub mod tree;

pub use html::HtmlDocument;
pub use layout::{ContainerKind, DateFormat, PageLayout};
pub use options::{Markers, RowPolicy, ScrapeOptions};
pub use statement::{
    scrape_bank_tran_list, scrape_due_date, scrape_ofx_data, scrape_stmt_trn_from_node,
};
pub use tree::{DocumentTree, TreeNode};
