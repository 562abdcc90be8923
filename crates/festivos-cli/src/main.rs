use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use festivos_engine::{
    DateCheckResponse, ErrorResponse, FestivosError, HolidayService, HolyWeekResponse,
    JsonFileStore, MemoryStore, RuleGroupsResponse, RuleStore,
};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

/// Holiday lookups against a set of holiday rules.
#[derive(Parser, Debug)]
#[command(name = "festivos", version, about, long_about = None)]
struct Cli {
    /// JSON file holding the rule groups. The built-in Colombian rules are used when omitted.
    #[arg(long, global = true, env = "FESTIVOS_RULES")]
    rules: Option<PathBuf>,

    /// Do not fail date checks when the Easter-relative group is missing.
    #[arg(long, global = true)]
    no_require_easter: bool,

    /// Pretty-print JSON output.
    #[arg(long, global = true)]
    pretty: bool,

    /// Log filter directive written to stderr (e.g. "debug", "festivos_engine=trace").
    #[arg(long, global = true, env = "FESTIVOS_LOG", default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Check whether a date is a holiday
    Check {
        #[arg(allow_hyphen_values = true)]
        year: String,
        #[arg(allow_hyphen_values = true)]
        month: String,
        #[arg(allow_hyphen_values = true)]
        day: String,
    },
    /// Print the Sunday that opens Holy Week
    HolyWeek {
        #[arg(allow_hyphen_values = true)]
        year: String,

        /// Print every Holy Week date instead of only its start
        #[arg(long)]
        detail: bool,
    },
    /// Print the stored rule groups
    Groups,
}

/// Exit status for a failure, mirroring the HTTP status classes.
fn exit_code(err: &anyhow::Error) -> u8 {
    match err.downcast_ref::<FestivosError>().map(FestivosError::status_code) {
        Some(400) => 2,
        Some(404) => 3,
        _ => 1,
    }
}

fn init_tracing(directive: &str) {
    let filter = EnvFilter::try_new(directive).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn open_store(rules: Option<&PathBuf>) -> Result<Box<dyn RuleStore>> {
    match rules {
        Some(path) => {
            let store = JsonFileStore::new(path);
            tracing::info!(path = %store.path().display(), "using rule file");
            Ok(Box::new(store))
        }
        None => {
            let store = MemoryStore::builtin().context("loading built-in rules")?;
            Ok(Box::new(store))
        }
    }
}

fn print_json<T: Serialize>(value: &T, pretty: bool) -> Result<()> {
    let json = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    }
    .context("serializing output")?;
    println!("{json}");
    Ok(())
}

fn run(cli: &Cli) -> Result<()> {
    let mut service = HolidayService::new(open_store(cli.rules.as_ref())?);
    if cli.no_require_easter {
        service = service.without_required_groups();
    }

    match &cli.command {
        Command::Check { year, month, day } => {
            let check = service.check_date(year, month, day)?;
            print_json(&DateCheckResponse::from(&check), cli.pretty)
        }
        Command::HolyWeek { year, detail: false } => {
            let start = service.holy_week_start(year)?;
            print_json(&HolyWeekResponse::from(start), cli.pretty)
        }
        Command::HolyWeek { year, detail: true } => {
            let week = service.holy_week(year)?;
            print_json(&week, cli.pretty)
        }
        Command::Groups => {
            let groups = service.list_groups()?;
            print_json(&RuleGroupsResponse { groups }, cli.pretty)
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(&cli.log_level);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let body = match err.downcast_ref::<FestivosError>() {
                Some(festivos) => ErrorResponse::from(festivos),
                None => ErrorResponse {
                    error: "Error interno del servidor".to_string(),
                    message: Some(format!("{err:#}")),
                },
            };
            tracing::debug!(error = %format!("{err:#}"), "command failed");
            match serde_json::to_string(&body) {
                Ok(json) => eprintln!("{json}"),
                Err(_) => eprintln!("{err:#}"),
            }
            ExitCode::from(exit_code(&err))
        }
    }
}
