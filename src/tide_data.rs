//! # NOAA Tide Prediction Fetching
//!
//! This module handles the network request for high/low tide predictions from
//! NOAA's Tides and Currents data API, and normalizes the response into
//! [`TidePrediction`]s.
//!
//! ## Data Source
//!
//! ### NOAA CO-OPS Data API
//! - **URL**: https://api.tidesandcurrents.noaa.gov/api/prod/datagetter
//! - **Station**: configurable (`station.tide_station_id`)
//! - **Format**: JSON, `{ "predictions": [{ "t": ..., "v": ..., "type": "H" }, ...] }`
//! - **Window**: today and tomorrow, station-local standard/daylight time
//! - **Datum**: MLLW, heights in feet (`units=english`)
//!
//! ### Data Processing Pipeline
//! 1. **Window**: compute `begin_date`/`end_date` from the caller's date
//! 2. **Fetch**: one HTTP GET, no retry
//! 3. **Parse**: decode JSON, surface API error bodies, reject unknown type codes
//! 4. **Return**: chronologically ordered predictions
//!
//! ## Error Handling
//!
//! All failures are reported through [`FetchError`]. An empty or absent
//! `predictions` collection is an error rather than an empty list, since the
//! API only omits it when the station or window is invalid.

use crate::config::Config;
use crate::error::FetchError;
use crate::{TidePrediction, TideType};
use chrono::{Days, NaiveDate};
use serde::Deserialize;

/// Identifies this client to the API, as NOAA requests.
const APPLICATION: &str = "marine_conditions";

/// Raw API response. Either `predictions` or `error` is present.
#[derive(Debug, Deserialize)]
struct PredictionsResponse {
    predictions: Option<Vec<RawPrediction>>,
    error: Option<ApiError>,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    message: String,
}

/// One entry as the API reports it: all strings.
#[derive(Debug, Deserialize)]
struct RawPrediction {
    t: String,
    v: String,
    #[serde(rename = "type")]
    kind: String,
}

/// `(begin_date, end_date)` in `YYYYMMDD` form: `today` through tomorrow.
pub fn prediction_window(today: NaiveDate) -> (String, String) {
    let tomorrow = today.checked_add_days(Days::new(1)).unwrap_or(today);
    (
        today.format("%Y%m%d").to_string(),
        tomorrow.format("%Y%m%d").to_string(),
    )
}

/// Full request URL for a station's high/low predictions around `today`.
pub fn predictions_url(base_url: &str, station_id: &str, today: NaiveDate) -> String {
    let (begin, end) = prediction_window(today);
    format!(
        "{base_url}?product=predictions&application={APPLICATION}\
         &begin_date={begin}&end_date={end}&datum=MLLW&station={station_id}\
         &time_zone=lst_ldt&units=english&interval=hilo&format=json"
    )
}

/// Decode a predictions response body.
///
/// # Errors
/// - [`FetchError::Json`] if the body is not a JSON object of the expected shape
/// - [`FetchError::Api`] if the API answered with an error message
/// - [`FetchError::NoPredictions`] if the predictions list is missing or empty
/// - [`FetchError::InvalidPrediction`] if a height is not a number
/// - [`FetchError::UnknownTideType`] if a type code is neither `H` nor `L`
pub fn parse_predictions(body: &str) -> Result<Vec<TidePrediction>, FetchError> {
    let response: PredictionsResponse = serde_json::from_str(body)?;

    if let Some(error) = response.error {
        return Err(FetchError::Api(error.message));
    }

    let raw = response.predictions.unwrap_or_default();
    if raw.is_empty() {
        return Err(FetchError::NoPredictions);
    }

    let mut predictions = raw
        .into_iter()
        .map(|entry| -> Result<TidePrediction, FetchError> {
            let height = entry
                .v
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|h| h.is_finite())
                .ok_or_else(|| FetchError::InvalidPrediction(entry.v.clone()))?;
            let tide_type = TideType::from_code(&entry.kind)
                .ok_or_else(|| FetchError::UnknownTideType(entry.kind.clone()))?;
            Ok(TidePrediction {
                time: entry.t,
                height,
                tide_type,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    // "YYYY-MM-DD HH:MM" sorts lexically; the API already returns this order
    predictions.sort_by(|a, b| a.time.cmp(&b.time));
    Ok(predictions)
}

/// Fetch today's and tomorrow's high/low predictions for the configured station.
///
/// `today` is the station-local date; the caller decides which clock that is.
///
/// # Example
/// ```no_run
/// use marine_conditions_lib::{config::Config, tide_data};
///
/// # async fn run() -> Result<(), Box<dyn std::error::Error>> {
/// let config = Config::default();
/// let client = config.http_client()?;
/// let today = chrono::Local::now().date_naive();
/// let tides = tide_data::fetch_predictions(&client, &config, today).await?;
/// println!("{} tide turns", tides.len());
/// # Ok(())
/// # }
/// ```
pub async fn fetch_predictions(
    client: &reqwest::Client,
    config: &Config,
    today: NaiveDate,
) -> Result<Vec<TidePrediction>, FetchError> {
    let url = predictions_url(
        &config.endpoints.tide_base_url,
        &config.station.tide_station_id,
        today,
    );
    tracing::debug!(%url, "fetching tide predictions");

    let body = client
        .get(&url)
        .send()
        .await?
        .error_for_status()?
        .text()
        .await?;

    let predictions = parse_predictions(&body)?;
    tracing::debug!(count = predictions.len(), "parsed tide predictions");
    Ok(predictions)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prediction_window_spans_two_days() {
        let today = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        assert_eq!(
            prediction_window(today),
            ("20240601".to_string(), "20240602".to_string())
        );

        // Month and year rollover
        let new_years_eve = NaiveDate::from_ymd_opt(2024, 12, 31).unwrap();
        assert_eq!(
            prediction_window(new_years_eve),
            ("20241231".to_string(), "20250101".to_string())
        );
    }

    #[test]
    fn test_predictions_url_parameters() {
        let today = NaiveDate::from_ymd_opt(2024, 2, 28).unwrap();
        let url = predictions_url("https://example.test/datagetter", "8443970", today);

        assert!(url.starts_with("https://example.test/datagetter?product=predictions"));
        for param in [
            "begin_date=20240228",
            "end_date=20240229",
            "datum=MLLW",
            "station=8443970",
            "time_zone=lst_ldt",
            "units=english",
            "interval=hilo",
            "format=json",
        ] {
            assert!(url.contains(param), "missing {param} in {url}");
        }
    }

    #[test]
    fn test_single_prediction() {
        let body = r#"{"predictions":[{"t":"2024-06-01 05:00","v":"3.2","type":"H"}]}"#;
        let predictions = parse_predictions(body).unwrap();

        assert_eq!(
            predictions,
            vec![TidePrediction {
                time: "2024-06-01 05:00".to_string(),
                height: 3.2,
                tide_type: TideType::High,
            }]
        );
    }

    #[test]
    fn test_predictions_are_chronological() {
        let body = r#"{"predictions":[
            {"t":"2024-06-01 11:14","v":"-0.41","type":"L"},
            {"t":"2024-06-01 05:00","v":"9.87","type":"H"},
            {"t":"2024-06-02 00:02","v":" 10.1 ","type":"H"}
        ]}"#;
        let predictions = parse_predictions(body).unwrap();

        let times: Vec<_> = predictions.iter().map(|p| p.time.as_str()).collect();
        assert_eq!(
            times,
            ["2024-06-01 05:00", "2024-06-01 11:14", "2024-06-02 00:02"]
        );
        assert_eq!(predictions[1].height, -0.41);
        assert_eq!(predictions[1].tide_type, TideType::Low);
        assert_eq!(predictions[2].height, 10.1);
    }

    #[test]
    fn test_empty_predictions_is_error() {
        let err = parse_predictions(r#"{"predictions":[]}"#).unwrap_err();
        assert!(matches!(err, FetchError::NoPredictions));

        let err = parse_predictions("{}").unwrap_err();
        assert!(matches!(err, FetchError::NoPredictions));
    }

    #[test]
    fn test_api_error_is_surfaced() {
        let body = r#"{"error":{"message":"No Predictions data was found. Please make sure the Datum input is valid."}}"#;
        match parse_predictions(body).unwrap_err() {
            FetchError::Api(message) => assert!(message.starts_with("No Predictions")),
            other => panic!("expected API error, got {other:?}"),
        }
    }

    #[test]
    fn test_unknown_tide_type_is_rejected() {
        let body = r#"{"predictions":[{"t":"2024-06-01 05:00","v":"3.2","type":"X"}]}"#;
        match parse_predictions(body).unwrap_err() {
            FetchError::UnknownTideType(code) => assert_eq!(code, "X"),
            other => panic!("expected unknown tide type, got {other:?}"),
        }
    }

    #[test]
    fn test_invalid_height_is_rejected() {
        let body = r#"{"predictions":[{"t":"2024-06-01 05:00","v":"high","type":"H"}]}"#;
        assert!(matches!(
            parse_predictions(body).unwrap_err(),
            FetchError::InvalidPrediction(v) if v == "high"
        ));
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(
            parse_predictions("<html>").unwrap_err(),
            FetchError::Json(_)
        ));
    }
}
