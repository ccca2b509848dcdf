//! `salon` CLI: replay booking scenarios and inspect master calendars.
//!
//! ## Usage
//!
//! ```sh
//! # Replay every request in a scenario and print one outcome per line
//! salon run -i scenario.toml
//!
//! # Same, as JSON, with "today" pinned for the past-date check
//! salon run -i scenario.toml --today 2024-05-01 --json
//!
//! # Open slots for master 1 on a date, for a 60-minute service
//! salon slots -i scenario.toml --master 1 --date 2024-06-01 --duration 60
//!
//! # Open slots sized by a service from the scenario
//! salon slots -i scenario.toml --master 1 --date 2024-06-01 --service 2
//!
//! # Bookings and free windows for master 1 after replaying the requests
//! salon schedule -i scenario.toml --master 1 --date 2024-06-01
//!
//! # ...plus the first free window that fits a 90-minute service
//! salon schedule -i scenario.toml --master 1 --date 2024-06-01 --min 90
//!
//! # Override the scenario's working hours from a settings file
//! salon slots -i scenario.toml -c settings.toml --master 1 --date 2024-06-01 --duration 30
//! ```

mod logging;
mod scenario;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use salon_engine::{MasterId, Salon, SalonConfig, ServiceId};
use tracing::info;

use crate::scenario::Scenario;

#[derive(Parser)]
#[command(name = "salon", version, about = "Salon appointment booking CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log booking decisions to stderr
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Args)]
struct ScenarioArgs {
    /// Scenario file (TOML)
    #[arg(short, long)]
    input: String,
    /// Treat this date (YYYY-MM-DD) as today instead of the local date
    #[arg(long)]
    today: Option<NaiveDate>,
    /// Salon settings file (TOML) replacing the scenario's [settings]
    #[arg(short, long)]
    config: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay the scenario's requests and report each outcome
    Run {
        #[command(flatten)]
        scenario: ScenarioArgs,
        /// Print outcomes as a JSON array
        #[arg(long)]
        json: bool,
    },
    /// List open start times for a master on a date
    Slots {
        #[command(flatten)]
        scenario: ScenarioArgs,
        /// Master id
        #[arg(long)]
        master: u32,
        /// Date (YYYY-MM-DD)
        #[arg(long)]
        date: String,
        /// Service length in minutes
        #[arg(long, conflicts_with = "service", required_unless_present = "service")]
        duration: Option<u32>,
        /// Take the length from this service id
        #[arg(long)]
        service: Option<u32>,
    },
    /// Show a master's bookings and free windows on a date
    Schedule {
        #[command(flatten)]
        scenario: ScenarioArgs,
        /// Master id
        #[arg(long)]
        master: u32,
        /// Date (YYYY-MM-DD)
        #[arg(long)]
        date: String,
        /// Also report the first free window of at least this many minutes
        #[arg(long)]
        min: Option<u32>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_cli_logger(cli.verbose);

    match cli.command {
        Commands::Run { scenario, json } => {
            let (scenario, mut salon) = load(&scenario)?;
            let outcomes = scenario.replay(&mut salon);
            info!(
                requests = outcomes.len(),
                failed = outcomes.iter().filter(|o| !o.ok).count(),
                "scenario replayed"
            );

            if json {
                let out = serde_json::to_string_pretty(&outcomes)
                    .context("Failed to serialize outcomes")?;
                println!("{}", out);
            } else {
                for outcome in &outcomes {
                    let status = if outcome.ok { "ok" } else { "failed" };
                    println!(
                        "{}. {} {}: {}",
                        outcome.index,
                        outcome.request.action(),
                        status,
                        outcome.message
                    );
                }
            }
        }
        Commands::Slots {
            scenario,
            master,
            date,
            duration,
            service,
        } => {
            let (scenario, mut salon) = load(&scenario)?;
            scenario.replay(&mut salon);

            let duration = resolve_duration(&salon, duration, service)?;
            let slots = salon
                .available_slots(MasterId(master), &date, duration)
                .context("Failed to list available slots")?;

            if slots.is_empty() {
                println!("No available slots");
            }
            for slot in slots {
                println!("{}", slot);
            }
        }
        Commands::Schedule {
            scenario,
            master,
            date,
            min,
        } => {
            let (scenario, mut salon) = load(&scenario)?;
            scenario.replay(&mut salon);

            let master_id = MasterId(master);
            let lines = salon
                .master_schedule(master_id, &date)
                .context("Failed to read schedule")?;
            let windows = salon
                .free_windows(master_id, &date)
                .context("Failed to compute free windows")?;
            let name = salon.master(master_id).map_or("?", |m| m.name.as_str());

            println!("{} on {}", name, date);
            if lines.is_empty() {
                println!("  (no bookings)");
            }
            for line in &lines {
                println!("  {}", line);
            }
            println!("Free:");
            for window in &windows {
                println!(
                    "  {}-{} ({} min)",
                    window.start, window.end, window.duration_minutes
                );
            }
            if let Some(min) = min {
                let first = salon
                    .first_free_window(master_id, &date, min)
                    .context("Failed to compute free windows")?;
                match first {
                    Some(window) => println!(
                        "First fit ({} min): {}-{}",
                        min, window.start, window.end
                    ),
                    None => println!("First fit ({} min): none", min),
                }
            }
        }
    }

    Ok(())
}

fn load(args: &ScenarioArgs) -> Result<(Scenario, Salon)> {
    let mut scenario = Scenario::load(&args.input)?;
    if let Some(path) = &args.config {
        scenario.settings = SalonConfig::load(path)
            .with_context(|| format!("Failed to load settings: {}", path))?;
    }
    let salon = scenario.build(args.today)?;
    Ok((scenario, salon))
}

/// Pick the service length from `--duration` or from the `--service` record.
fn resolve_duration(salon: &Salon, duration: Option<u32>, service: Option<u32>) -> Result<u32> {
    match (duration, service) {
        (Some(minutes), _) => Ok(minutes),
        (None, Some(id)) => salon
            .service(ServiceId(id))
            .map(|s| s.duration)
            .with_context(|| format!("Service #{} not found", id)),
        (None, None) => anyhow::bail!("Either --duration or --service is required"),
    }
}
