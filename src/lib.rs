//! # Marine Conditions Core Library
//!
//! This library provides the data structures and computations behind a marine
//! conditions dashboard for anglers: the latest buoy observation, the day's tide
//! turns, the moon phase, and a heuristic fishing score that blends them.
//!
//! ## Design Philosophy
//!
//! ### Independent Components
//! Each module is a stateless function (or pair of functions) with no shared state:
//! - [`buoy`]: parse the realtime buoy text feed into a [`buoy::BuoyObservation`]
//! - [`tide_data`]: fetch and normalize high/low tide predictions
//! - [`lunar`]: compute the moon phase for an injected instant
//! - [`scoring`]: combine the above into a [`scoring::FishingScoreResult`]
//!
//! A caller invokes each and merges the results; [`report`] is that caller for the
//! bundled command-line dashboard.
//!
//! ### Explicit Time
//! Nothing below `main` reads the wall clock. Every time-dependent function takes
//! the instant or date it should compute for, so results are reproducible in tests.
//!
//! ### Missing Data
//! The buoy feed marks missing readings with `MM`. Those become `None`, never NaN,
//! so absent readings cannot leak into score arithmetic.
//!
//! ## Core Types
//!
//! Tide predictions are shared by the fetcher, the score engine, and the report,
//! so they live at the crate root:
//! - [`TidePrediction`]: a single high or low water event
//! - [`TideType`]: which of the two it is

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

// Module declarations
pub mod buoy;
pub mod config;
pub mod error;
pub mod lunar;
pub mod report;
pub mod scoring;
pub mod tide_data;
pub mod units;

/// Format of prediction times returned by the tide API (station-local clock).
pub const PREDICTION_TIME_FORMAT: &str = "%Y-%m-%d %H:%M";

/// High or low water.
///
/// The tide API reports these as the single-letter codes `H` and `L`; they are
/// serialized the same way so a report round-trips through JSON unchanged.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TideType {
    #[serde(rename = "H")]
    High,
    #[serde(rename = "L")]
    Low,
}

impl TideType {
    /// Map an API type code to a tide type. Only `H` and `L` are recognized.
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim() {
            "H" => Some(TideType::High),
            "L" => Some(TideType::Low),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TideType::High => "High",
            TideType::Low => "Low",
        }
    }
}

/// A single predicted high or low water event.
///
/// `time` is kept exactly as the API reports it (station-local, `YYYY-MM-DD HH:MM`),
/// since the local clock is what an angler plans around.
///
/// # Example
/// ```
/// use marine_conditions_lib::{TidePrediction, TideType};
///
/// let high = TidePrediction {
///     time: "2024-06-01 05:00".to_string(),
///     height: 3.2,
///     tide_type: TideType::High,
/// };
///
/// assert_eq!(high.local_time().unwrap().to_string(), "2024-06-01 05:00:00");
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TidePrediction {
    /// Station-local time of the event
    pub time: String,
    /// Height above MLLW in feet
    pub height: f64,
    /// High or low water
    #[serde(rename = "type")]
    pub tide_type: TideType,
}

impl TidePrediction {
    /// Parse [`TidePrediction::time`] into a naive local datetime.
    pub fn local_time(&self) -> Option<NaiveDateTime> {
        NaiveDateTime::parse_from_str(&self.time, PREDICTION_TIME_FORMAT).ok()
    }
}

/// First prediction at or after `now` (station-local), if any.
///
/// Predictions whose time cannot be parsed are skipped.
pub fn next_tide(predictions: &[TidePrediction], now: NaiveDateTime) -> Option<&TidePrediction> {
    predictions
        .iter()
        .find(|p| p.local_time().is_some_and(|t| t >= now))
}
