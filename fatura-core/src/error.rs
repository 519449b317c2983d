use thiserror::Error;

/// Why a statement page could not be turned into `OfxData`.
///
/// Every extraction failure surfaces here instead of producing a
/// plausible-looking wrong value.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ScrapeError {
    #[error("{what} not found in document")]
    NotFound { what: String },

    #[error("could not parse {what} from {input:?}")]
    Parse { what: String, input: String },

    #[error("{what}: {candidates} candidates but none usable")]
    AmbiguousMatch { what: String, candidates: usize },

    #[error("invalid selector {selector:?}: {reason}")]
    Selector { selector: String, reason: String },
}

impl ScrapeError {
    pub fn not_found(what: impl Into<String>) -> Self {
        ScrapeError::NotFound { what: what.into() }
    }

    pub fn parse(what: impl Into<String>, input: impl Into<String>) -> Self {
        ScrapeError::Parse {
            what: what.into(),
            input: input.into(),
        }
    }
}
