//! # Conditions Report
//!
//! Merges the independent components into one snapshot for display. This is the
//! "caller" the rest of the library is written for: it decides which clock to use,
//! tolerates a failed fetch by leaving that section empty, and feeds whatever is
//! available into the fishing score.
//!
//! Rendering targets plain text for a terminal; the binary also offers JSON via
//! serde.

use crate::buoy::BuoyObservation;
use crate::error::FetchError;
use crate::lunar::{calculate_moon_phase, MoonPhase};
use crate::scoring::{calculate_fishing_score, FishingConditions, FishingScoreResult, TimeOfDay};
use crate::units::{celsius_to_fahrenheit, get_wind_direction, hpa_to_inhg, mps_to_mph};
use crate::{next_tide, TidePrediction};
use chrono::{DateTime, NaiveDateTime, Timelike, Utc};
use serde::Serialize;
use std::fmt::Write;

/// Shown in place of an absent reading.
const MISSING: &str = "—";

/// Everything the dashboard shows, computed once.
#[derive(Debug, Clone, Serialize)]
pub struct ConditionsReport {
    pub station: String,
    pub generated_at: DateTime<Utc>,
    pub buoy: Option<BuoyObservation>,
    pub tides: Vec<TidePrediction>,
    pub next_tide: Option<TidePrediction>,
    pub moon: MoonPhase,
    pub score: FishingScoreResult,
    /// One line per section that could not be fetched
    pub warnings: Vec<String>,
}

impl ConditionsReport {
    /// Build a report from fetch results.
    ///
    /// `now` drives the moon phase; `local_now` is the station-local wall clock used
    /// to pick the next tide and the time-of-day bucket. Failed fetches become
    /// warnings rather than errors.
    pub fn assemble(
        station: impl Into<String>,
        now: DateTime<Utc>,
        local_now: NaiveDateTime,
        buoy: Result<BuoyObservation, FetchError>,
        tides: Result<Vec<TidePrediction>, FetchError>,
    ) -> Self {
        let mut warnings = Vec::new();

        let buoy = buoy
            .map_err(|e| {
                tracing::warn!(error = %e, "buoy observation unavailable");
                warnings.push(format!("Buoy data unavailable: {e}"));
            })
            .ok();
        let tides = tides
            .map_err(|e| {
                tracing::warn!(error = %e, "tide predictions unavailable");
                warnings.push(format!("Tide data unavailable: {e}"));
            })
            .unwrap_or_default();

        let moon = calculate_moon_phase(now);
        let next_tide = next_tide(&tides, local_now).cloned();

        let conditions = FishingConditions {
            pressure_hpa: buoy.as_ref().and_then(|b| b.pressure_hpa),
            wind_speed: buoy
                .as_ref()
                .and_then(|b| b.wind_speed_mps)
                .map(|mps| mps_to_mph(mps) as f64),
            moon_phase: Some(moon.phase),
            tide_type: next_tide.as_ref().map(|t| t.tide_type),
            time_of_day: Some(TimeOfDay::from_hour(local_now.hour())),
        };
        let score = calculate_fishing_score(&conditions);
        tracing::debug!(score = score.score, rating = score.rating.label(), "scored conditions");

        ConditionsReport {
            station: station.into(),
            generated_at: now,
            buoy,
            tides,
            next_tide,
            moon,
            score,
            warnings,
        }
    }

    /// Render as a plain-text dashboard.
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        // Writing to a String cannot fail
        let _ = self.write_text(&mut out);
        out
    }

    fn write_text(&self, out: &mut String) -> std::fmt::Result {
        writeln!(out, "Marine conditions: {}", self.station)?;
        writeln!(out, "Generated {}", self.generated_at.format("%Y-%m-%d %H:%M UTC"))?;
        for warning in &self.warnings {
            writeln!(out, "⚠ {warning}")?;
        }
        writeln!(out)?;

        writeln!(out, "Buoy")?;
        match &self.buoy {
            Some(obs) => {
                writeln!(out, "  Observed     {}", obs.timestamp)?;
                writeln!(out, "  Water        {}", temperature(obs.water_temp_c))?;
                writeln!(out, "  Air          {}", temperature(obs.air_temp_c))?;
                writeln!(out, "  Pressure     {}", pressure(obs.pressure_hpa))?;
                writeln!(out, "  Wind         {}", wind(obs))?;
                writeln!(out, "  Waves        {}", waves(obs))?;
            }
            None => writeln!(out, "  {MISSING}")?,
        }
        writeln!(out)?;

        writeln!(out, "Tides (MLLW)")?;
        if self.tides.is_empty() {
            writeln!(out, "  {MISSING}")?;
        }
        for tide in &self.tides {
            let marker = if self.next_tide.as_ref() == Some(tide) { "→" } else { " " };
            writeln!(
                out,
                "{marker} {}  {:<4}  {:>5.1} ft",
                tide.time,
                tide.tide_type.label(),
                tide.height
            )?;
        }
        writeln!(out)?;

        writeln!(out, "Moon")?;
        writeln!(
            out,
            "  {} ({:.0}% lit, day {})",
            self.moon.phase,
            self.moon.illumination * 100.0,
            self.moon.age
        )?;
        writeln!(out, "  Next new     {}", self.moon.next_new.format("%Y-%m-%d"))?;
        writeln!(out, "  Next full    {}", self.moon.next_full.format("%Y-%m-%d"))?;
        writeln!(out)?;

        writeln!(
            out,
            "Fishing score: {} ({})",
            self.score.score,
            self.score.rating.label()
        )?;
        for reason in &self.score.reasons {
            writeln!(out, "  + {reason}")?;
        }
        Ok(())
    }
}

fn temperature(c: Option<f64>) -> String {
    c.map(|c| format!("{:.1}°C / {:.0}°F", c, celsius_to_fahrenheit(c)))
        .unwrap_or_else(|| MISSING.to_string())
}

fn pressure(hpa: Option<f64>) -> String {
    hpa.map(|p| format!("{:.1} hPa / {:.2} inHg", p, hpa_to_inhg(p)))
        .unwrap_or_else(|| MISSING.to_string())
}

fn wind(obs: &BuoyObservation) -> String {
    let Some(speed) = obs.wind_speed_mps else {
        return MISSING.to_string();
    };
    let mut text = format!("{} mph", mps_to_mph(speed));
    if let Some(deg) = obs.wind_direction_deg {
        text = format!("{} {text}", get_wind_direction(deg));
    }
    if let Some(gust) = obs.wind_gust_mps {
        let _ = write!(text, ", gusts {} mph", mps_to_mph(gust));
    }
    text
}

fn waves(obs: &BuoyObservation) -> String {
    match (obs.wave_height_m, obs.dominant_period_s) {
        (Some(h), Some(p)) => format!("{h:.1} m @ {p:.0} s"),
        (Some(h), None) => format!("{h:.1} m"),
        _ => MISSING.to_string(),
    }
}
