//! # Marine Conditions Dashboard
//!
//! This binary crate fetches the latest buoy observation and tide predictions for the
//! configured stations, computes the moon phase and fishing score, and prints the
//! merged report to stdout as text (default) or JSON (`--json`).
//!
//! ```text
//! marine-conditions [--json] [--config <path>]
//! ```


use anyhow::Context;
use chrono::{Local, Utc};
use marine_conditions_lib::{buoy, config::Config, report::ConditionsReport, tide_data};
use std::env;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Command-line options.
#[derive(Debug, Default, PartialEq)]
struct Options {
    json: bool,
    config_path: Option<PathBuf>,
}

impl Options {
    fn parse<I: IntoIterator<Item = String>>(args: I) -> anyhow::Result<Self> {
        let mut options = Options::default();
        let mut args = args.into_iter();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--json" => options.json = true,
                "--config" => {
                    let path = args.next().context("--config needs a path")?;
                    options.config_path = Some(PathBuf::from(path));
                }
                other => anyhow::bail!("unrecognized argument: {other}"),
            }
        }
        Ok(options)
    }
}

/// Main application entry point.
fn main() -> anyhow::Result<()> {
    // Logs go to stderr so `--json` output stays clean
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let options = Options::parse(env::args().skip(1))?;
    let config = match &options.config_path {
        Some(path) => Config::load_from_path(path),
        None => Config::load(),
    };

    let client = config.http_client().context("building HTTP client")?;

    // Create Tokio runtime for the two fetches
    let rt = tokio::runtime::Runtime::new()?;

    let now = Utc::now();
    let local_now = Local::now();

    // Fetch failures are carried into the report as warnings, not fatal
    let (observation, predictions) = rt.block_on(async {
        tokio::join!(
            buoy::fetch_latest(&client, &config),
            tide_data::fetch_predictions(&client, &config, local_now.date_naive()),
        )
    });

    let report = ConditionsReport::assemble(
        config.station.name.clone(),
        now,
        local_now.naive_local(),
        observation,
        predictions,
    );

    if options.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", report.render_text());
    }

    Ok(())
}
