//! `venue-hours`: command-line front end for the hours engine.

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::{ArgAction, Args, Parser, Subcommand};
use hours_engine::cache::DEFAULT_CAPACITY;
use hours_engine::clock::parse_civil_date;
use hours_engine::solar::AFTER_SHABBAT_OFFSET_MINUTES;
use hours_engine::{
    parse_schedule, resolve_after_shabbat, AvailabilityEngine, AvailabilityVerdict, Coordinates,
    EngineOptions, TimeValue, VenueHours,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, Level};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{filter, fmt};

#[derive(Parser)]
#[command(
    name = "venue-hours",
    version,
    about = "Check venue operating hours, including after-Shabbat times"
)]
struct Cli {
    /// Log verbosity on stderr (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Parse hours text and print the weekly schedule as JSON
    Parse {
        /// Hours text, e.g. "Mon-Fri 9am-5pm; Sat closed"
        text: String,
    },
    /// Check whether one venue is open
    Check {
        /// Hours text
        #[arg(long)]
        hours: String,
        /// Venue latitude in degrees
        #[arg(long, allow_negative_numbers = true)]
        lat: Option<f64>,
        /// Venue longitude in degrees
        #[arg(long, allow_negative_numbers = true)]
        lng: Option<f64>,
        /// Venue IANA timezone (UTC if omitted)
        #[arg(long)]
        tz: Option<String>,
        /// Instant to check, RFC 3339 (defaults to now)
        #[arg(long)]
        at: Option<String>,
        /// Print a JSON object instead of the bare verdict
        #[arg(long)]
        json: bool,
        #[command(flatten)]
        engine: EngineArgs,
    },
    /// Check every venue in a JSON array of venue records ("-" reads stdin)
    Batch {
        file: PathBuf,
        /// Instant to check, RFC 3339 (defaults to now)
        #[arg(long)]
        at: Option<String>,
        #[command(flatten)]
        engine: EngineArgs,
    },
    /// Print the after-Shabbat time for a date and place
    AfterShabbat {
        /// Civil date, YYYY-MM-DD
        #[arg(long)]
        date: String,
        #[arg(long, allow_negative_numbers = true)]
        lat: f64,
        #[arg(long, allow_negative_numbers = true)]
        lng: f64,
        /// IANA timezone for the local time (UTC if omitted)
        #[arg(long)]
        tz: Option<String>,
        /// Minutes after sunset
        #[arg(long, default_value_t = AFTER_SHABBAT_OFFSET_MINUTES, allow_negative_numbers = true)]
        offset_minutes: i64,
    },
}

#[derive(Args)]
struct EngineArgs {
    /// Minutes after sunset at which "after Shabbat" begins
    #[arg(long, default_value_t = AFTER_SHABBAT_OFFSET_MINUTES, allow_negative_numbers = true)]
    offset_minutes: i64,
    /// Number of distinct hours texts kept parsed
    #[arg(long, default_value_t = DEFAULT_CAPACITY)]
    cache_capacity: usize,
    /// Timezone for venues that do not specify one
    #[arg(long)]
    default_tz: Option<String>,
}

impl From<EngineArgs> for EngineOptions {
    fn from(args: EngineArgs) -> Self {
        EngineOptions {
            after_shabbat_offset_minutes: args.offset_minutes,
            cache_capacity: args.cache_capacity,
            default_timezone: args.default_tz,
        }
    }
}

/// One entry of a batch file: a venue record plus an optional display name.
#[derive(Deserialize)]
struct BatchVenue {
    #[serde(default)]
    name: Option<String>,
    #[serde(flatten)]
    hours: VenueHours,
}

#[derive(Serialize)]
struct BatchResult {
    name: Option<String>,
    verdict: AvailabilityVerdict,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CheckReport {
    verdict: AvailabilityVerdict,
    at: DateTime<Utc>,
    timezone: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AfterShabbatReport {
    date: String,
    time: String,
    minutes_from_midnight: u16,
    sunset: DateTime<Utc>,
    instant: DateTime<Utc>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Command::Parse { text } => {
            let schedule = parse_schedule(&text);
            debug!(days = schedule.len(), "parsed schedule");
            println!("{}", serde_json::to_string_pretty(&schedule)?);
        }
        Command::Check {
            hours,
            lat,
            lng,
            tz,
            at,
            json,
            engine,
        } => {
            let at = parse_at(at.as_deref())?;
            let options = EngineOptions::from(engine);
            let timezone = tz
                .clone()
                .or_else(|| options.default_timezone.clone())
                .unwrap_or_else(|| "UTC".to_string());
            let engine = AvailabilityEngine::new(options);
            let venue = VenueHours {
                hours_of_operation: hours,
                latitude: lat,
                longitude: lng,
                timezone_id: tz,
            };
            let verdict = engine.verdict_at(&venue, at);

            if json {
                let report = CheckReport {
                    verdict,
                    at,
                    timezone,
                };
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                println!("{verdict}");
            }
        }
        Command::Batch { file, at, engine } => {
            let at = parse_at(at.as_deref())?;
            let raw = read_input(&file)?;
            let venues: Vec<BatchVenue> = serde_json::from_str(&raw)
                .with_context(|| format!("invalid venue JSON in {}", file.display()))?;

            let engine = AvailabilityEngine::new(EngineOptions::from(engine));
            let results: Vec<BatchResult> = venues
                .into_iter()
                .map(|venue| BatchResult {
                    verdict: engine.verdict_at(&venue.hours, at),
                    name: venue.name,
                })
                .collect();
            debug!(
                venues = results.len(),
                cached = engine.cache().len(),
                "batch evaluated"
            );

            println!("{}", serde_json::to_string_pretty(&results)?);
        }
        Command::AfterShabbat {
            date,
            lat,
            lng,
            tz,
            offset_minutes,
        } => {
            let date = parse_civil_date(&date)?;
            let coords = Coordinates::new(lat, lng)?;
            let offset = chrono::Duration::try_minutes(offset_minutes)
                .with_context(|| format!("--offset-minutes {offset_minutes} is out of range"))?;
            let resolved = resolve_after_shabbat(date, coords, tz.as_deref(), offset)?;

            let report = AfterShabbatReport {
                date: resolved.date.to_string(),
                time: TimeValue::Minutes(resolved.minutes_from_midnight).to_string(),
                minutes_from_midnight: resolved.minutes_from_midnight,
                sunset: resolved.sunset,
                instant: resolved.instant,
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }

    Ok(())
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    let filter = filter::Targets::new()
        .with_target("hours_engine", level)
        .with_target("venue_hours", level)
        .with_default(Level::WARN);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(io::stderr))
        .init();
}

/// Parse `--at` as RFC 3339, defaulting to the current instant.
fn parse_at(at: Option<&str>) -> Result<DateTime<Utc>> {
    match at {
        None => Ok(Utc::now()),
        Some(s) => DateTime::parse_from_rfc3339(s)
            .map(|dt| dt.with_timezone(&Utc))
            .with_context(|| format!("invalid --at '{s}', expected RFC 3339")),
    }
}

fn read_input(file: &Path) -> Result<String> {
    if file.as_os_str() == "-" {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .context("failed to read venues from stdin")?;
        Ok(buf)
    } else {
        fs::read_to_string(file).with_context(|| format!("failed to read {}", file.display()))
    }
}
