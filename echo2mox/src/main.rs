//! echo2mox - EchoMTG to Moxfield inventory conversion
//!
//! Converts a saved export offline, fetches one from the EchoMTG API, or
//! serves a one-button web page that does the fetch and returns the CSV.

use clap::{Parser, Subcommand};
use echo2mox::export::{OUTPUT_FILE_NAME, SUMMARY_FILE_NAME};
use echo2mox::web::{self, AppState};
use echo2mox::{convert, default_output_dir, write_outputs, Credentials, EchoClient};
use echo2mox_core::{read_csv_path, RuleTables};
use std::path::{Path, PathBuf};

/// Convert EchoMTG inventory exports into Moxfield-ready CSV files
#[derive(Parser, Debug)]
#[command(name = "echo2mox")]
#[command(version, about, long_about = None)]
struct Args {
    /// JSON rule file replacing the built-in correction rules
    #[arg(long, global = true)]
    rules: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Convert a previously downloaded export
    Convert {
        /// EchoMTG export CSV
        #[arg(short, long)]
        input: PathBuf,

        /// Output CSV (default: ./readyformox.csv)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Audit record (default: summary.txt next to the output)
        #[arg(long)]
        summary: Option<PathBuf>,
    },
    /// Fetch the export from EchoMTG and convert it
    Fetch {
        /// File containing an API token (default: read from the environment)
        #[arg(long)]
        token_file: Option<PathBuf>,

        /// Directory for readyformox.csv and summary.txt
        #[arg(long)]
        output_dir: Option<PathBuf>,
    },
    /// Serve the web UI that runs a fetch on demand
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value_t = 5000)]
        port: u16,

        /// File containing an API token (default: read from the environment)
        #[arg(long)]
        token_file: Option<PathBuf>,
    },
    /// Print the effective rule tables as JSON
    Rules,
}

fn load_rules(path: Option<&Path>) -> echo2mox_core::Result<RuleTables> {
    match path {
        Some(path) => RuleTables::load(path),
        None => Ok(RuleTables::default()),
    }
}

fn summary_path_for(output: &Path) -> PathBuf {
    output.with_file_name(SUMMARY_FILE_NAME)
}

async fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    let rules = load_rules(args.rules.as_deref())?;

    match args.command {
        Command::Convert {
            input,
            output,
            summary,
        } => {
            log::info!("Reading export: {}", input.display());
            let raw = read_csv_path(&input)?;
            let result = convert(&raw, &rules)?;

            let output = output.unwrap_or_else(|| PathBuf::from(OUTPUT_FILE_NAME));
            let summary = summary.unwrap_or_else(|| summary_path_for(&output));
            write_outputs(&result, &output, &summary)?;
        }
        Command::Fetch {
            token_file,
            output_dir,
        } => {
            let credentials = Credentials::resolve(token_file.as_deref())?;
            let raw = EchoClient::new().fetch_table(&credentials).await?;
            let result = convert(&raw, &rules)?;

            let output_dir = output_dir.unwrap_or_else(default_output_dir);
            write_outputs(
                &result,
                &output_dir.join(OUTPUT_FILE_NAME),
                &output_dir.join(SUMMARY_FILE_NAME),
            )?;
        }
        Command::Serve { port, token_file } => {
            let credentials = Credentials::resolve(token_file.as_deref())?;
            let state = AppState::new(EchoClient::new(), credentials, rules);
            web::serve(state, port).await?;
        }
        Command::Rules => {
            println!("{}", rules.to_json_pretty()?);
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() {
    // Initialize logging. Set RUST_LOG to control the level (e.g. RUST_LOG=debug)
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    log::info!("Starting echo2mox...");

    if let Err(e) = run(args).await {
        log::error!("{}", e);
        std::process::exit(1);
    }
}
