//! VINScout - command-line VIN decoder
//!
//! ## Commands
//!
//! - `lookup`: validate a VIN, decode it through NHTSA vPIC and record it
//! - `validate`: run the local ISO 3779 checks only
//! - `history`: list or clear recent lookups

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::{debug, Level};

use vinscout_core::{
    compute_check_digit, forbidden_letters, normalize_input, validate, DecodeOutcome,
    FsHistoryStore, HistoryCache, HistoryStore, LookupConfig, LookupError, ReqwestTransport,
    Session, Vehicle, VehicleService, METRICS,
};

/// Exit status for a lookup or validation failure.
const EXIT_LOOKUP_FAILED: i32 = 2;

#[derive(Parser)]
#[command(name = "vinscout")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Decode Vehicle Identification Numbers", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit JSON-formatted log lines
    #[arg(long, global = true)]
    json: bool,

    /// History file
    #[arg(
        long,
        global = true,
        env = "VINSCOUT_HISTORY",
        default_value = ".vinscout/history.json"
    )]
    history_file: PathBuf,

    /// Decoding API endpoint (the VIN is appended as a path segment).
    /// Overrides VINSCOUT_API_BASE.
    #[arg(long, global = true)]
    api_base: Option<String>,

    /// Request timeout in seconds. Overrides VINSCOUT_TIMEOUT_SECS.
    #[arg(long, global = true, value_parser = clap::value_parser!(u64).range(1..))]
    timeout_secs: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Decode a VIN and record it in history
    Lookup {
        /// The 17-character VIN (case-insensitive, surrounding spaces ignored)
        vin: String,

        /// List history after the lookup
        #[arg(long)]
        history: bool,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        output: OutputFormat,
    },

    /// Validate a VIN locally without calling the API
    Validate {
        /// The VIN to check
        vin: String,
    },

    /// Manage lookup history
    History {
        #[command(subcommand)]
        action: HistoryAction,
    },
}

#[derive(Subcommand)]
enum HistoryAction {
    /// Show recent lookups, newest first
    List {
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        output: OutputFormat,
    },

    /// Remove every entry
    Clear,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

/// Environment settings first, then command-line flags on top.
fn lookup_config(cli: &Cli) -> LookupConfig {
    let mut config = LookupConfig::from_env();
    if let Some(base) = &cli.api_base {
        config = config.with_base_url(base);
    }
    if let Some(secs) = cli.timeout_secs {
        config = config.with_timeout(Duration::from_secs(secs));
    }
    config
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::WARN
    };
    vinscout_core::init_tracing(cli.json, level);

    let history = HistoryCache::new(FsHistoryStore::new(&cli.history_file));
    debug!(path = %cli.history_file.display(), "using history file");

    let code = match &cli.command {
        Commands::Lookup {
            vin,
            history: show_history,
            output,
        } => {
            let config = lookup_config(&cli);
            let transport =
                ReqwestTransport::new(&config).context("Failed to create HTTP client")?;
            let session = Session::new(VehicleService::with_config(transport, config), history);
            cmd_lookup(&session, vin, *show_history, *output).await?
        }
        Commands::Validate { vin } => cmd_validate(vin),
        Commands::History { action } => match action {
            HistoryAction::List { output } => cmd_history_list(&history, *output)?,
            HistoryAction::Clear => cmd_history_clear(&history),
        },
    };

    METRICS.flush();

    if code != 0 {
        std::process::exit(code);
    }
    Ok(())
}

async fn cmd_lookup<T, S>(
    session: &Session<T, S>,
    input: &str,
    show_history: bool,
    output: OutputFormat,
) -> Result<i32>
where
    T: vinscout_core::HttpTransport,
    S: HistoryStore,
{
    let vin = normalize_input(input).unwrap_or_default();
    if output == OutputFormat::Text {
        println!("Looking up VIN: {}", vin);
        println!();
    }

    let vehicle = match session.decode(input).await {
        Ok(DecodeOutcome::Decoded(vehicle)) => vehicle,
        Ok(DecodeOutcome::Empty) => {
            eprintln!("Error: {}", LookupError::InvalidLength);
            return Ok(EXIT_LOOKUP_FAILED);
        }
        Ok(DecodeOutcome::Superseded) => {
            anyhow::bail!("lookup for {} was superseded", vin)
        }
        Err(err) => {
            eprintln!("Error: {}", err);
            eprintln!();
            eprintln!("   {}", failure_tip(&err, &vin));
            return Ok(EXIT_LOOKUP_FAILED);
        }
    };

    match output {
        OutputFormat::Json => {
            if show_history {
                let payload = serde_json::json!({
                    "vehicle": vehicle,
                    "history": session.recent(),
                });
                println!("{}", serde_json::to_string_pretty(&payload)?);
            } else {
                println!("{}", serde_json::to_string_pretty(&vehicle)?);
            }
        }
        OutputFormat::Text => {
            println!("{}", vehicle);
            if show_history {
                println!();
                println!("Lookup History:");
                print!("{}", render_history(&session.recent()));
            }
        }
    }

    Ok(0)
}

fn cmd_validate(input: &str) -> i32 {
    let vin = normalize_input(input).unwrap_or_default();

    match validate(&vin) {
        Ok(()) => {
            println!("{} is a valid VIN", vin);
            if let Ok(digit) = compute_check_digit(&vin) {
                println!("Check digit: {}", digit);
            }
            0
        }
        Err(err) => {
            let err = LookupError::from(err);
            eprintln!("Error: {}", err);
            if let Some(letters) = forbidden_letters(&vin) {
                eprintln!("   VINs cannot contain {}", letters);
            }
            if err == LookupError::InvalidCheckDigit {
                if let Ok(digit) = compute_check_digit(&vin) {
                    eprintln!("   Expected check digit '{}' at position 9.", digit);
                }
            } else {
                eprintln!("   {}", failure_tip(&err, &vin));
            }
            EXIT_LOOKUP_FAILED
        }
    }
}

fn cmd_history_list<S: HistoryStore>(
    history: &HistoryCache<S>,
    output: OutputFormat,
) -> Result<i32> {
    let entries = history.history();
    match output {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&entries)?),
        OutputFormat::Text => print!("{}", render_history(&entries)),
    }
    Ok(0)
}

fn cmd_history_clear<S: HistoryStore>(history: &HistoryCache<S>) -> i32 {
    history.clear();
    println!("History cleared");
    0
}

/// Numbered history listing, one vehicle per line.
fn render_history(entries: &[Vehicle]) -> String {
    if entries.is_empty() {
        return "  (empty)\n".to_string();
    }
    entries
        .iter()
        .enumerate()
        .map(|(index, vehicle)| format!("  {}. {}\n", index + 1, vehicle.summary_line()))
        .collect()
}

fn failure_tip(err: &LookupError, vin: &str) -> String {
    match err {
        LookupError::InvalidLength => format!(
            "Tip: A VIN must be exactly 17 characters. Yours had {}.",
            vin.chars().count()
        ),
        LookupError::InvalidCharacters => {
            "Tip: VINs use only A-Z (excluding I, O, Q) and digits 0-9.".to_string()
        }
        LookupError::InvalidCheckDigit => {
            "Tip: The 9th character is a check digit. A typo elsewhere often causes this."
                .to_string()
        }
        LookupError::Timeout => "Tip: Check your internet connection.".to_string(),
        LookupError::ApiError(text) => format!("API said: {}", text),
        LookupError::NetworkIssue(detail) => format!("Network detail: {}", detail),
        LookupError::DecodingError(detail) => format!("Decode detail: {}", detail),
    }
}
