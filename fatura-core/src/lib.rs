//! fatura-core: statement data model and the text parsers behind the card-statement scraper

pub mod amount;
pub mod dates;
pub mod dedup;
pub mod error;
pub mod time;
pub mod types;

pub use amount::{extract_decimal_comma, parse_decimal_comma};
pub use dates::{month_from_abbrev, parse_day_month_name, parse_due_date};
pub use dedup::first_occurrences;
pub use error::ScrapeError;
pub use time::{Clock, FixedClock, SystemClock};
pub use types::{OfxData, StatementTransaction};
