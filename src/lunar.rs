//! Moon phase from a mean synodic month.
//!
//! Anchored on the new moon of 2024-01-11 00:00 UTC and stepped forward (or
//! back) by the mean synodic month. Accuracy is about ±1 day for the phase,
//! which is all a fishing forecast needs. Illumination is a piecewise-linear
//! proxy per phase band, not an ephemeris value.

use chrono::{DateTime, Duration, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Mean length of a lunation in days.
pub const SYNODIC_MONTH_DAYS: f64 = 29.530_588_67;

const SECONDS_PER_DAY: f64 = 86_400.0;

/// Reference new moon, 2024-01-11T00:00:00Z.
pub fn new_moon_epoch() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 11, 0, 0, 0)
        .single()
        .unwrap_or_default()
}

/// The eight named phases, in cycle order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PhaseName {
    #[serde(rename = "New Moon")]
    NewMoon,
    #[serde(rename = "Waxing Crescent")]
    WaxingCrescent,
    #[serde(rename = "First Quarter")]
    FirstQuarter,
    #[serde(rename = "Waxing Gibbous")]
    WaxingGibbous,
    #[serde(rename = "Full Moon")]
    FullMoon,
    #[serde(rename = "Waning Gibbous")]
    WaningGibbous,
    #[serde(rename = "Last Quarter")]
    LastQuarter,
    #[serde(rename = "Waning Crescent")]
    WaningCrescent,
}

impl PhaseName {
    /// Phase band containing `age` whole days since new moon.
    pub fn from_age(age: u32) -> Self {
        match age {
            0 => PhaseName::NewMoon,
            1..=6 => PhaseName::WaxingCrescent,
            7..=8 => PhaseName::FirstQuarter,
            9..=13 => PhaseName::WaxingGibbous,
            14..=15 => PhaseName::FullMoon,
            16..=21 => PhaseName::WaningGibbous,
            22..=23 => PhaseName::LastQuarter,
            _ => PhaseName::WaningCrescent,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PhaseName::NewMoon => "New Moon",
            PhaseName::WaxingCrescent => "Waxing Crescent",
            PhaseName::FirstQuarter => "First Quarter",
            PhaseName::WaxingGibbous => "Waxing Gibbous",
            PhaseName::FullMoon => "Full Moon",
            PhaseName::WaningGibbous => "Waning Gibbous",
            PhaseName::LastQuarter => "Last Quarter",
            PhaseName::WaningCrescent => "Waning Crescent",
        }
    }

    /// New or full: strongest tidal pull.
    pub fn is_major(self) -> bool {
        matches!(self, PhaseName::NewMoon | PhaseName::FullMoon)
    }

    /// First or last quarter.
    pub fn is_quarter(self) -> bool {
        matches!(self, PhaseName::FirstQuarter | PhaseName::LastQuarter)
    }
}

impl fmt::Display for PhaseName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lunar state at an instant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MoonPhase {
    pub phase: PhaseName,
    /// Illuminated fraction (0–1), approximate
    pub illumination: f64,
    /// Whole days since the last new moon
    pub age: u32,
    pub next_new: DateTime<Utc>,
    pub next_full: DateTime<Utc>,
}

/// Compute the moon phase at `now`.
///
/// Instants before the epoch work too: the cycle position is taken modulo the
/// synodic month and is never negative.
pub fn calculate_moon_phase(now: DateTime<Utc>) -> MoonPhase {
    let elapsed_days = (now - new_moon_epoch()).num_milliseconds() as f64 / 1000.0 / SECONDS_PER_DAY;
    let cycle_position = elapsed_days.rem_euclid(SYNODIC_MONTH_DAYS);
    let age = cycle_position.floor() as u32;
    let phase = PhaseName::from_age(age);

    let days_to_new = SYNODIC_MONTH_DAYS - cycle_position;
    // Counts from the whole-day age; at age 15 this jumps to almost a full cycle
    let days_to_full = if age < 15 {
        15.0 - age as f64
    } else {
        SYNODIC_MONTH_DAYS - age as f64 + 15.0
    };

    MoonPhase {
        phase,
        illumination: illumination(phase, age),
        age,
        next_new: now + days(days_to_new),
        next_full: now + days(days_to_full),
    }
}

/// [`calculate_moon_phase`] at the current wall-clock time.
pub fn calculate_moon_phase_now() -> MoonPhase {
    calculate_moon_phase(Utc::now())
}

/// Piecewise-linear illuminated fraction for a phase band.
fn illumination(phase: PhaseName, age: u32) -> f64 {
    let age = age as f64;
    let fraction = match phase {
        PhaseName::NewMoon => 0.0,
        PhaseName::WaxingCrescent => age / 14.0,
        PhaseName::FirstQuarter => 0.5,
        PhaseName::WaxingGibbous => 0.5 + (age - 7.0) / 14.0,
        PhaseName::FullMoon => 1.0,
        PhaseName::WaningGibbous => 1.0 - (age - 15.0) / 14.0,
        PhaseName::LastQuarter => 0.5,
        PhaseName::WaningCrescent => 0.5 - (age - 22.0) / 14.0,
    };
    fraction.clamp(0.0, 1.0)
}

fn days(d: f64) -> Duration {
    Duration::milliseconds((d * SECONDS_PER_DAY * 1000.0).round() as i64)
}
