//! # Fishing Score
//!
//! A heuristic 0–100 score from barometric pressure, wind, moon phase, tide and
//! time of day. Each factor adds or subtracts a fixed amount from a baseline of
//! 50; the total is clamped and bucketed into a rating.
//!
//! | Factor | Condition | Δ | Reason |
//! |---|---|---|---|
//! | Pressure | 1015–1020 hPa | +15 | Ideal pressure |
//! | Pressure | > 1020 hPa | +5 | High pressure |
//! | Pressure | < 1000 hPa | −10 | Low pressure |
//! | Wind | < 5 | +10 | Calm winds |
//! | Wind | 5–10 | +15 | Perfect wind |
//! | Wind | > 20 | −15 | Strong winds |
//! | Moon | new or full | +15 | Major lunar phase |
//! | Moon | first or last quarter | +8 | Minor lunar phase |
//! | Tide | high | +10 | High tide incoming |
//! | Time | dawn or dusk | +10 | Prime feeding time |
//!
//! Wind is in whatever unit the caller displays; the dashboard passes mph.
//! Absent inputs skip their factor.

use crate::lunar::PhaseName;
use crate::TideType;
use serde::{Deserialize, Serialize};

const BASELINE: i32 = 50;

/// Inputs to [`calculate_fishing_score`]. Every field is optional.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FishingConditions {
    pub pressure_hpa: Option<f64>,
    pub wind_speed: Option<f64>,
    pub moon_phase: Option<PhaseName>,
    pub tide_type: Option<TideType>,
    pub time_of_day: Option<TimeOfDay>,
}

/// Coarse time-of-day bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimeOfDay {
    Dawn,
    Day,
    Dusk,
    Night,
}

impl TimeOfDay {
    /// Bucket a local hour (0–23): 5–7 dawn, 8–16 day, 17–19 dusk, else night.
    pub fn from_hour(hour: u32) -> Self {
        match hour {
            5..=7 => TimeOfDay::Dawn,
            8..=16 => TimeOfDay::Day,
            17..=19 => TimeOfDay::Dusk,
            _ => TimeOfDay::Night,
        }
    }

    pub fn is_feeding_time(self) -> bool {
        matches!(self, TimeOfDay::Dawn | TimeOfDay::Dusk)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Rating {
    Poor,
    Fair,
    Good,
    Excellent,
}

impl Rating {
    pub fn from_score(score: u8) -> Self {
        match score {
            80.. => Rating::Excellent,
            65..=79 => Rating::Good,
            0..=39 => Rating::Poor,
            _ => Rating::Fair,
        }
    }

    /// Display color as a hex string.
    pub fn color(self) -> &'static str {
        match self {
            Rating::Excellent => "#72E5A2",
            Rating::Good => "#90EE90",
            Rating::Fair => "#FFB84D",
            Rating::Poor => "#FF8A8A",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Rating::Excellent => "Excellent",
            Rating::Good => "Good",
            Rating::Fair => "Fair",
            Rating::Poor => "Poor",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FishingScoreResult {
    /// 0–100
    pub score: u8,
    pub rating: Rating,
    pub color: &'static str,
    /// Labels of the factors that fired, in evaluation order
    pub reasons: Vec<String>,
}

/// Score fishing conditions.
///
/// # Example
/// ```
/// use marine_conditions_lib::scoring::{calculate_fishing_score, FishingConditions, Rating};
///
/// let result = calculate_fishing_score(&FishingConditions {
///     pressure_hpa: Some(1018.0),
///     ..Default::default()
/// });
///
/// assert_eq!(result.score, 65);
/// assert_eq!(result.rating, Rating::Good);
/// assert_eq!(result.reasons, ["Ideal pressure"]);
/// ```
pub fn calculate_fishing_score(conditions: &FishingConditions) -> FishingScoreResult {
    let mut score = BASELINE;
    let mut reasons = Vec::new();
    let mut apply = |delta: i32, reason: &str| {
        score += delta;
        reasons.push(reason.to_string());
    };

    if let Some(pressure) = conditions.pressure_hpa {
        if (1015.0..=1020.0).contains(&pressure) {
            apply(15, "Ideal pressure");
        } else if pressure > 1020.0 {
            apply(5, "High pressure");
        } else if pressure < 1000.0 {
            apply(-10, "Low pressure");
        }
    }

    // First matching branch wins, so exactly 5 counts as perfect
    if let Some(wind) = conditions.wind_speed {
        if wind < 5.0 {
            apply(10, "Calm winds");
        } else if wind <= 10.0 {
            apply(15, "Perfect wind");
        } else if wind > 20.0 {
            apply(-15, "Strong winds");
        }
    }

    if let Some(phase) = conditions.moon_phase {
        if phase.is_major() {
            apply(15, "Major lunar phase");
        } else if phase.is_quarter() {
            apply(8, "Minor lunar phase");
        }
    }

    if conditions.tide_type == Some(TideType::High) {
        apply(10, "High tide incoming");
    }

    if conditions.time_of_day.is_some_and(TimeOfDay::is_feeding_time) {
        apply(10, "Prime feeding time");
    }

    let score = score.clamp(0, 100) as u8;
    let rating = Rating::from_score(score);
    FishingScoreResult {
        score,
        rating,
        color: rating.color(),
        reasons,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_inputs_is_fair_baseline() {
        let result = calculate_fishing_score(&FishingConditions::default());
        assert_eq!(result.score, 50);
        assert_eq!(result.rating, Rating::Fair);
        assert_eq!(result.color, "#FFB84D");
        assert!(result.reasons.is_empty());
    }

    #[test]
    fn test_ideal_pressure_only() {
        let result = calculate_fishing_score(&FishingConditions {
            pressure_hpa: Some(1018.0),
            ..Default::default()
        });
        assert_eq!(result.score, 65);
        assert_eq!(result.rating, Rating::Good);
        assert_eq!(result.color, "#90EE90");
        assert_eq!(result.reasons, ["Ideal pressure"]);
    }

    #[test]
    fn test_everything_lines_up_is_clamped() {
        let result = calculate_fishing_score(&FishingConditions {
            pressure_hpa: Some(1018.0),
            wind_speed: Some(7.0),
            moon_phase: Some(PhaseName::FullMoon),
            tide_type: Some(TideType::High),
            time_of_day: None,
        });
        assert_eq!(result.score, 100);
        assert_eq!(result.rating, Rating::Excellent);
        assert_eq!(result.color, "#72E5A2");
        assert_eq!(
            result.reasons,
            [
                "Ideal pressure",
                "Perfect wind",
                "Major lunar phase",
                "High tide incoming"
            ]
        );
    }

    #[test]
    fn test_bad_conditions_are_poor() {
        let result = calculate_fishing_score(&FishingConditions {
            pressure_hpa: Some(995.0),
            wind_speed: Some(25.0),
            tide_type: Some(TideType::Low),
            ..Default::default()
        });
        assert_eq!(result.score, 25);
        assert_eq!(result.rating, Rating::Poor);
        assert_eq!(result.color, "#FF8A8A");
        assert_eq!(result.reasons, ["Low pressure", "Strong winds"]);
    }

    #[test]
    fn test_pressure_bands() {
        let score_for = |p: f64| {
            calculate_fishing_score(&FishingConditions {
                pressure_hpa: Some(p),
                ..Default::default()
            })
            .score
        };
        assert_eq!(score_for(1015.0), 65);
        assert_eq!(score_for(1020.0), 65);
        assert_eq!(score_for(1020.5), 55);
        assert_eq!(score_for(1010.0), 50);
        assert_eq!(score_for(1000.0), 50);
        assert_eq!(score_for(999.9), 40);
    }

    #[test]
    fn test_wind_bands() {
        let reasons_for = |w: f64| {
            calculate_fishing_score(&FishingConditions {
                wind_speed: Some(w),
                ..Default::default()
            })
            .reasons
        };
        assert_eq!(reasons_for(4.9), ["Calm winds"]);
        // Boundary value belongs to the second band
        assert_eq!(reasons_for(5.0), ["Perfect wind"]);
        assert_eq!(reasons_for(10.0), ["Perfect wind"]);
        assert!(reasons_for(15.0).is_empty());
        assert!(reasons_for(20.0).is_empty());
        assert_eq!(reasons_for(20.1), ["Strong winds"]);
    }

    #[test]
    fn test_minor_lunar_phase() {
        for phase in [PhaseName::FirstQuarter, PhaseName::LastQuarter] {
            let result = calculate_fishing_score(&FishingConditions {
                moon_phase: Some(phase),
                ..Default::default()
            });
            assert_eq!(result.score, 58);
            assert_eq!(result.reasons, ["Minor lunar phase"]);
        }

        let result = calculate_fishing_score(&FishingConditions {
            moon_phase: Some(PhaseName::WaningGibbous),
            ..Default::default()
        });
        assert_eq!(result.score, 50);
    }

    #[test]
    fn test_feeding_time_is_last_reason() {
        let result = calculate_fishing_score(&FishingConditions {
            time_of_day: Some(TimeOfDay::Dusk),
            tide_type: Some(TideType::High),
            ..Default::default()
        });
        assert_eq!(result.score, 70);
        assert_eq!(result.reasons, ["High tide incoming", "Prime feeding time"]);

        let midday = calculate_fishing_score(&FishingConditions {
            time_of_day: Some(TimeOfDay::Day),
            ..Default::default()
        });
        assert_eq!(midday.score, 50);
    }

    #[test]
    fn test_rating_thresholds() {
        assert_eq!(Rating::from_score(100), Rating::Excellent);
        assert_eq!(Rating::from_score(80), Rating::Excellent);
        assert_eq!(Rating::from_score(79), Rating::Good);
        assert_eq!(Rating::from_score(65), Rating::Good);
        assert_eq!(Rating::from_score(64), Rating::Fair);
        assert_eq!(Rating::from_score(40), Rating::Fair);
        assert_eq!(Rating::from_score(39), Rating::Poor);
        assert_eq!(Rating::from_score(0), Rating::Poor);
    }

    #[test]
    fn test_time_of_day_buckets() {
        assert_eq!(TimeOfDay::from_hour(4), TimeOfDay::Night);
        assert_eq!(TimeOfDay::from_hour(5), TimeOfDay::Dawn);
        assert_eq!(TimeOfDay::from_hour(12), TimeOfDay::Day);
        assert_eq!(TimeOfDay::from_hour(18), TimeOfDay::Dusk);
        assert_eq!(TimeOfDay::from_hour(23), TimeOfDay::Night);
    }
}
