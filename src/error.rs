//! Errors raised by the buoy parser and the network fetchers.
//!
//! Both propagate to the caller untouched; nothing in this crate retries or
//! recovers locally. Unreadable numeric readings are not errors at all, they
//! simply come back as `None`.

use thiserror::Error;

/// The buoy text was malformed or incomplete.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ParseError {
    /// Header, units and at least one data row are required
    #[error("buoy report needs at least 3 lines, found {found}")]
    TooFewLines { found: usize },

    /// A timestamp column was missing from the header or the data row
    #[error("buoy report is missing the {0} field")]
    MissingField(&'static str),
}

/// A network request failed or returned nothing usable.
#[derive(Error, Debug)]
pub enum FetchError {
    /// HTTP request failed (network, timeout, or non-success status)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Response body was not the JSON shape we expect
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Buoy feed downloaded but could not be parsed
    #[error("buoy feed: {0}")]
    Parse(#[from] ParseError),

    /// The tide API answered with an error message instead of data
    #[error("tide API error: {0}")]
    Api(String),

    /// The response carried no predictions collection, or an empty one
    #[error("no tide predictions returned")]
    NoPredictions,

    /// A prediction's height was not a decimal number
    #[error("invalid prediction height {0:?}")]
    InvalidPrediction(String),

    /// A prediction's type code was neither `H` nor `L`
    #[error("unknown tide type code {0:?}")]
    UnknownTideType(String),
}
