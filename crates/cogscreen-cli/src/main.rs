//! cogscreen CLI: interactive cognitive screening in the terminal.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use cogscreen_core::model::PartialScores;

mod commands;

#[derive(Parser)]
#[command(name = "cogscreen", version, about = "Self-administered cognitive screening")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Take an interactive screening session
    Run {
        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,

        /// Seed for reproducible words, digits and Stroop trials
        #[arg(long)]
        seed: Option<u64>,

        /// Newline-separated word list to draw the five words from
        #[arg(long)]
        word_bank: Option<PathBuf>,

        /// Print the session report as JSON when the session ends
        #[arg(long)]
        json: bool,

        /// Save the session report to a JSON file
        #[arg(long)]
        report: Option<PathBuf>,
    },

    /// Aggregate partial scores into a final result
    Score {
        /// Orientation (0-5)
        #[arg(long, default_value_t = 0)]
        orientation: u8,

        /// Immediate recall (0-5)
        #[arg(long, default_value_t = 0)]
        immediate_recall: u8,

        /// Serial 7s (0-5)
        #[arg(long, default_value_t = 0)]
        serial7s: u8,

        /// Digit span forward (0-2)
        #[arg(long, default_value_t = 0)]
        digit_forward: u8,

        /// Digit span backward (0-2)
        #[arg(long, default_value_t = 0)]
        digit_backward: u8,

        /// Category fluency (0-3)
        #[arg(long, default_value_t = 0)]
        fluency: u8,

        /// Stroop (0-5)
        #[arg(long, default_value_t = 0)]
        stroop: u8,

        /// Delayed recall (0-5)
        #[arg(long, default_value_t = 0)]
        delayed_recall: u8,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Check a config file and its word bank
    Validate {
        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Create a starter config and word list
    Init,
}

#[tokio::main]
async fn main() {
    // RUST_LOG replaces the defaults entirely when set.
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("cogscreen=warn,cogscreen_core=warn"));
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Run {
            config,
            seed,
            word_bank,
            json,
            report,
        } => commands::run::execute(config, seed, word_bank, json, report).await,
        Commands::Score {
            orientation,
            immediate_recall,
            serial7s,
            digit_forward,
            digit_backward,
            fluency,
            stroop,
            delayed_recall,
            json,
        } => {
            let scores = PartialScores {
                orientation,
                immediate_recall,
                serial7s,
                digit_forward,
                digit_backward,
                fluency,
                stroop,
                delayed_recall,
            };
            commands::score::execute(scores, json)
        }
        Commands::Validate { config } => commands::validate::execute(config),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
