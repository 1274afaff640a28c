mod host;
mod logging;
mod scenario;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::debug;
use daterange_core::normalize::parse_flexible_date;
use daterange_core::range::expand_range;
use daterange_core::{DateRangeError, DateRangeWidget, FieldType, HostPayload};

use host::StdoutHost;
use scenario::{Scenario, Step};

/// Host message used when no payload file is given.
const MOCK_MESSAGE: &str = include_str!("mock_message.json");

#[derive(Parser)]
#[command(name = "daterange")]
#[command(about = "Preview the daterange cross-filter picker against a local mock host")]
struct Cli {
    /// Log level used when RUST_LOG is not set (e.g. "debug", "daterange_core=debug")
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render once and print the view plus any directive sent after render
    Preview {
        /// Host payload JSON (defaults to the built-in mock message)
        #[arg(short, long)]
        payload: Option<PathBuf>,

        /// Print the view as HTML instead of JSON
        #[arg(long)]
        html: bool,
    },
    /// Render, then type a start and end date as a user would
    Select {
        /// Start date (e.g. "2023-01-01", "01/15/2023", "15.01.2023")
        #[arg(short, long)]
        start: String,

        /// End date
        #[arg(short, long)]
        end: String,

        /// Host payload JSON (defaults to the built-in mock message)
        #[arg(short, long)]
        payload: Option<PathBuf>,
    },
    /// Print the encoded keys a range expands to
    Expand {
        #[arg(short, long)]
        start: String,

        #[arg(short, long)]
        end: String,

        /// Host field type (e.g. YEAR_MONTH_DAY, YEAR_MONTH, YEAR_QUARTER)
        #[arg(short = 't', long, default_value = "YEAR_MONTH_DAY")]
        field_type: String,
    },
    /// Replay a TOML scenario of renders and input events
    Run {
        scenario: PathBuf,

        /// Initial host payload JSON (defaults to the built-in mock message)
        #[arg(short, long)]
        payload: Option<PathBuf>,

        /// Also print every mounted view
        #[arg(short, long)]
        verbose: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(&cli.log_level);

    match cli.command {
        Commands::Preview { payload, html } => cmd_preview(payload.as_deref(), html),
        Commands::Select {
            start,
            end,
            payload,
        } => cmd_select(&start, &end, payload.as_deref()),
        Commands::Expand {
            start,
            end,
            field_type,
        } => cmd_expand(&start, &end, &field_type),
        Commands::Run {
            scenario,
            payload,
            verbose,
        } => cmd_run(&scenario, payload.as_deref(), verbose),
    }
}

fn load_payload(path: Option<&Path>) -> Result<HostPayload> {
    match path {
        Some(path) => {
            debug!(path = %path.display(), "loading payload");
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read payload: {}", path.display()))?;
            HostPayload::from_json(&json)
                .with_context(|| format!("Failed to parse payload: {}", path.display()))
        }
        None => {
            debug!("using built-in mock message");
            HostPayload::from_json(MOCK_MESSAGE).context("Built-in mock message is invalid")
        }
    }
}

fn parse_date_arg(text: &str) -> Result<chrono::NaiveDate> {
    parse_flexible_date(text).ok_or_else(|| DateRangeError::InvalidDate(text.to_string()).into())
}

fn cmd_preview(payload: Option<&Path>, html: bool) -> Result<()> {
    let payload = load_payload(payload)?;
    let mut widget = DateRangeWidget::new(StdoutHost {
        html,
        show_views: true,
    });
    widget.draw(payload);
    Ok(())
}

fn cmd_select(start: &str, end: &str, payload: Option<&Path>) -> Result<()> {
    let payload = load_payload(payload)?;
    let mut widget = DateRangeWidget::new(StdoutHost {
        html: false,
        show_views: false,
    });
    widget.draw(payload);
    widget.on_start_change(start);
    if widget.on_end_change(end).is_none() {
        println!("(no filter sent)");
    }
    Ok(())
}

fn cmd_expand(start: &str, end: &str, field_type: &str) -> Result<()> {
    let start = parse_date_arg(start)?;
    let end = parse_date_arg(end)?;
    let field_type: FieldType = field_type.parse()?;

    let keys = expand_range(start, end, field_type);
    if keys.is_empty() {
        anyhow::bail!("Start date {} is after end date {}", start, end);
    }
    for key in keys {
        println!("{}", key);
    }
    Ok(())
}

fn cmd_run(path: &Path, payload: Option<&Path>, verbose: bool) -> Result<()> {
    let scenario = Scenario::load(path)?;
    debug!(path = %path.display(), steps = scenario.steps.len(), "loaded scenario");
    let mut current = load_payload(payload)?;
    let mut widget = DateRangeWidget::new(StdoutHost {
        html: false,
        show_views: verbose,
    });

    for (i, step) in scenario.steps.into_iter().enumerate() {
        println!("# step {}: {:?}", i + 1, step);
        match step {
            Step::Render { payload } => {
                if let Some(p) = payload {
                    current = load_payload(Some(&p))?;
                }
                widget.draw(current.clone());
            }
            Step::Start { value } => {
                widget.on_start_change(&value);
            }
            Step::End { value } => {
                widget.on_end_change(&value);
            }
            Step::Clear => {
                widget.on_clear();
            }
        }
    }

    let selection = widget.session().selection();
    println!(
        "# final: phase={:?} start={:?} end={:?}",
        widget.session().phase(),
        selection.start_date,
        selection.end_date
    );
    Ok(())
}
