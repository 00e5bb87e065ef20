//! Unit conversions for display.

const MPH_PER_MPS: f64 = 2.236_94;
const KNOTS_PER_MPS: f64 = 1.943_84;
const INHG_PER_HPA: f64 = 0.029_53;

const COMPASS_POINTS: [&str; 16] = [
    "N", "NNE", "NE", "ENE", "E", "ESE", "SE", "SSE", "S", "SSW", "SW", "WSW", "W", "WNW", "NW",
    "NNW",
];

/// Metres per second to whole miles per hour.
pub fn mps_to_mph(mps: f64) -> i64 {
    (mps * MPH_PER_MPS).round() as i64
}

/// Metres per second to knots, one decimal place.
pub fn mps_to_knots(mps: f64) -> f64 {
    (mps * KNOTS_PER_MPS * 10.0).round() / 10.0
}

pub fn celsius_to_fahrenheit(c: f64) -> f64 {
    c * 9.0 / 5.0 + 32.0
}

/// Hectopascals to inches of mercury, two decimal places.
pub fn hpa_to_inhg(hpa: f64) -> f64 {
    (hpa * INHG_PER_HPA * 100.0).round() / 100.0
}

/// 16-point compass label for a bearing in degrees. Wraps past 360 and below 0.
pub fn get_wind_direction(degrees: f64) -> &'static str {
    let index = (degrees / 22.5).round() as i64;
    COMPASS_POINTS[index.rem_euclid(16) as usize]
}
