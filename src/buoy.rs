//! # Realtime Buoy Observations
//!
//! Parses the NDBC "realtime2" standard meteorological text feed into a typed
//! [`BuoyObservation`].
//!
//! ## Feed Format
//!
//! ```text
//! #YY  MM DD hh mm WDIR WSPD GST  WVHT   DPD   APD MWD   PRES  ATMP  WTMP  DEWP  VIS PTDY  TIDE
//! #yr  mo dy hr mn degT m/s  m/s     m   sec   sec degT   hPa  degC  degC  degC  nmi  hPa    ft
//! 2024 06 01 12 50 200  5.0  6.0   0.8     7   5.1 190 1015.2  16.1  15.2  12.3   MM -0.4    MM
//! 2024 06 01 12 40 210  4.0  5.0    MM    MM    MM  MM 1015.3  16.0  15.2  12.2   MM   MM    MM
//! ```
//!
//! - Row 1 names the columns, row 2 gives units (ignored)
//! - Rows 3+ are observations, newest first; only the newest is read
//! - Columns are separated by runs of spaces, and `MM` marks a missing reading
//!
//! Missing or unreadable readings become `None`. Only a short file or an absent
//! timestamp column is an error.

use crate::config::Config;
use crate::error::{FetchError, ParseError};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Newest observation from a buoy's realtime feed.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct BuoyObservation {
    /// Observation time, `YYYY-MM-DDThh:mm:00Z`
    pub timestamp: String,
    /// Sea surface temperature (`WTMP`), °C
    pub water_temp_c: Option<f64>,
    /// Air temperature (`ATMP`), °C
    pub air_temp_c: Option<f64>,
    /// Sea level pressure (`PRES`), hPa
    pub pressure_hpa: Option<f64>,
    /// Average wind speed (`WSPD`), m/s
    pub wind_speed_mps: Option<f64>,
    /// Direction the wind is coming from (`WDIR`), degrees true
    pub wind_direction_deg: Option<f64>,
    /// Peak gust (`GST`), m/s
    pub wind_gust_mps: Option<f64>,
    /// Significant wave height (`WVHT`), m
    pub wave_height_m: Option<f64>,
    /// Dominant wave period (`DPD`), s
    pub dominant_period_s: Option<f64>,
}

/// Parse a realtime buoy report, returning the newest observation.
///
/// # Errors
/// - [`ParseError::TooFewLines`] if the text lacks a header, units row and data row
/// - [`ParseError::MissingField`] if any of `YY`, `MM`, `DD`, `hh`, `mm` is absent
///
/// # Example
/// ```
/// use marine_conditions_lib::buoy::parse_buoy_report;
///
/// let text = "#YY MM DD hh mm WTMP\n#yr mo dy hr mn degC\n2024 6 1 9 5 MM\n";
/// let obs = parse_buoy_report(text).unwrap();
///
/// assert_eq!(obs.timestamp, "2024-06-01T09:05:00Z");
/// assert_eq!(obs.water_temp_c, None);
/// ```
pub fn parse_buoy_report(text: &str) -> Result<BuoyObservation, ParseError> {
    let lines: Vec<&str> = text.lines().filter(|l| !l.trim().is_empty()).collect();
    if lines.len() < 3 {
        return Err(ParseError::TooFewLines { found: lines.len() });
    }

    // Header and first data row correspond positionally
    let fields: HashMap<&str, &str> = lines[0]
        .split_whitespace()
        .map(|name| name.trim_start_matches('#'))
        .zip(lines[2].split_whitespace())
        .collect();

    let field = |name: &'static str| fields.get(name).copied().ok_or(ParseError::MissingField(name));
    let timestamp = format!(
        "{:0>4}-{:0>2}-{:0>2}T{:0>2}:{:0>2}:00Z",
        field("YY")?,
        field("MM")?,
        field("DD")?,
        field("hh")?,
        field("mm")?,
    );

    let reading = |name: &str| fields.get(name).and_then(|raw| parse_reading(raw));

    Ok(BuoyObservation {
        timestamp,
        water_temp_c: reading("WTMP"),
        air_temp_c: reading("ATMP"),
        pressure_hpa: reading("PRES"),
        wind_speed_mps: reading("WSPD"),
        wind_direction_deg: reading("WDIR"),
        wind_gust_mps: reading("GST"),
        wave_height_m: reading("WVHT"),
        dominant_period_s: reading("DPD"),
    })
}

/// A finite number, or `None` for `MM` and anything else unreadable.
fn parse_reading(raw: &str) -> Option<f64> {
    raw.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Realtime feed URL for a station.
pub fn report_url(base_url: &str, station_id: &str) -> String {
    format!("{}/{}.txt", base_url.trim_end_matches('/'), station_id)
}

/// Download the configured buoy's realtime feed and parse its newest row.
///
/// One GET per call; the client's timeout applies. A non-success status is
/// reported as [`FetchError::Http`].
pub async fn fetch_latest(
    client: &reqwest::Client,
    config: &Config,
) -> Result<BuoyObservation, FetchError> {
    let url = report_url(&config.endpoints.buoy_base_url, &config.station.buoy_id);
    tracing::debug!(%url, "fetching buoy report");

    let text = client
        .get(&url)
        .send()
        .await?
        .error_for_status()?
        .text()
        .await?;

    let observation = parse_buoy_report(&text)?;
    tracing::debug!(timestamp = %observation.timestamp, "parsed buoy observation");
    Ok(observation)
}
