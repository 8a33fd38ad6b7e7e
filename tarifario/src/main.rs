use std::path::PathBuf;

use anyhow::Context;
use chrono::{Local, NaiveDate, NaiveDateTime, NaiveTime};
use clap::{Parser, Subcommand, ValueEnum};
use shared::models::{QuickQuoteRequest, Season};
use tarifario::pricing::StayRequest;
use tarifario::pricing::calculator::{DEFAULT_CHECK_IN, DEFAULT_CHECK_OUT};
use tarifario::rendering::{
    build_price_table, build_rotation, render_charging_message, render_comparison,
    render_rotation_text,
};
use tarifario::services::{self, FileSink, ImportRequest, StdoutSink, TextSink};
use tarifario::utils::time::{parse_date, parse_datetime};
use tarifario::{AppState, setup_environment};

/// Hotel pricing and quoting
///
/// Dates are YYYY-MM-DD (check-in 14:00, check-out 11:00) or YYYY-MM-DDTHH:MM.
#[derive(Debug, Parser)]
#[command(name = "tarifario", version, about)]
struct Cli {
    /// Directory holding the stored documents
    #[arg(long, env = "WORK_DIR", global = true)]
    work_dir: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Quick quote for one category, recorded in the history
    Quote {
        category_id: String,
        #[arg(value_parser = check_in)]
        check_in: NaiveDateTime,
        #[arg(value_parser = check_out)]
        check_out: NaiveDateTime,
        /// Number of rooms
        #[arg(default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
        qty: u32,
    },
    /// Compare categories side by side (all active ones when none given)
    Compare {
        #[arg(value_parser = check_in)]
        check_in: NaiveDateTime,
        #[arg(value_parser = check_out)]
        check_out: NaiveDateTime,
        category_ids: Vec<String>,
    },
    /// Season price table of the active categories
    Table {
        #[arg(value_enum)]
        season: SeasonArg,
    },
    /// Night shift rotation between two dates
    Shifts {
        #[arg(value_parser = calendar_date)]
        start: NaiveDate,
        #[arg(value_parser = calendar_date)]
        end: NaiveDate,
    },
    /// EV charging message for the configured kWh rate
    Charge {
        #[arg(value_parser = kwh)]
        kwh: f64,
    },
    /// Write a signed backup
    Export { file: PathBuf },
    /// Restore a backup (current or legacy format)
    Import { file: PathBuf },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum SeasonArg {
    #[value(alias = "alta")]
    High,
    #[value(alias = "baixa")]
    Low,
}

impl From<SeasonArg> for Season {
    fn from(arg: SeasonArg) -> Self {
        match arg {
            SeasonArg::High => Season::High,
            SeasonArg::Low => Season::Low,
        }
    }
}

/// A bare date takes the default time of that end of the stay
fn stay_bound(value: &str, default_time: NaiveTime) -> Result<NaiveDateTime, String> {
    if let Ok(date) = parse_date(value) {
        return Ok(date.and_time(default_time));
    }
    parse_datetime(value).map_err(|e| e.message)
}

fn check_in(value: &str) -> Result<NaiveDateTime, String> {
    stay_bound(value, DEFAULT_CHECK_IN)
}

fn check_out(value: &str) -> Result<NaiveDateTime, String> {
    stay_bound(value, DEFAULT_CHECK_OUT)
}

fn calendar_date(value: &str) -> Result<NaiveDate, String> {
    parse_date(value).map_err(|e| e.message)
}

/// Accepts a decimal comma (`12,5`)
fn kwh(value: &str) -> Result<f64, String> {
    let kwh: f64 = value
        .trim()
        .replace(',', ".")
        .parse()
        .map_err(|_| format!("'{}' is not a number", value))?;
    if !kwh.is_finite() || kwh <= 0.0 {
        return Err("kWh must be greater than zero".to_string());
    }
    Ok(kwh)
}

async fn run(state: &AppState, command: Command) -> anyhow::Result<()> {
    let out = StdoutSink;

    match command {
        Command::Quote {
            category_id,
            check_in,
            check_out,
            qty,
        } => {
            let request = QuickQuoteRequest {
                category_id,
                check_in,
                check_out,
                quantity: qty,
                meals: Default::default(),
                season_mode: Default::default(),
            };
            let quote = services::quick_quote::generate(state, &request)?;
            out.deliver(&quote.text).await?;
        }
        Command::Compare {
            check_in,
            check_out,
            category_ids,
        } => {
            let stay = StayRequest::new(check_in, check_out);
            let catalog = state.catalog()?;
            let selected: Vec<_> = if category_ids.is_empty() {
                catalog.into_iter().filter(|c| c.is_active).collect()
            } else {
                let mut picked = Vec::with_capacity(category_ids.len());
                for id in &category_ids {
                    picked.push(tarifario::pricing::engine::find_category(&catalog, id)?.clone());
                }
                picked
            };
            let text = render_comparison(&selected, &stay, &state.settings()?)?;
            out.deliver(&text).await?;
        }
        Command::Table { season } => {
            let catalog = tarifario::db::repository::category::find_active(state.storage())?;
            out.deliver(&build_price_table(&catalog, season.into()).to_text())
                .await?;
        }
        Command::Shifts { start, end } => {
            let config = tarifario::db::repository::shift::load(state.storage())?;
            let rotation = build_rotation(&config, start, end)?;
            out.deliver(&render_rotation_text(&rotation)).await?;
        }
        Command::Charge { kwh } => {
            let rate = state.settings()?.kwh_rate;
            let text = render_charging_message(kwh, rate, Local::now().naive_local())?;
            out.deliver(&text).await?;
        }
        Command::Export { file } => {
            let sink = FileSink::new(file);
            let document = services::backup::export(state)?;
            sink.deliver(&document.to_json_pretty()?).await?;
            out.deliver(&format!("Backup written to {}", sink.path().display()))
                .await?;
        }
        Command::Import { file } => {
            let json = ImportRequest::from_path(file).await?;
            let summary = services::backup::import(state, &json)?;
            out.deliver(&format!("Imported: {:?}", summary)).await?;
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env first, so clap sees WORK_DIR from it
    let mut config = setup_environment();
    let cli = Cli::parse();
    if let Some(work_dir) = cli.work_dir {
        config.work_dir = work_dir;
    }
    let state = AppState::open(config).context("cannot open the data directory")?;

    if let Err(e) = run(&state, cli.command).await {
        tracing::error!("{:#}", e);
        return Err(e);
    }
    Ok(())
}
