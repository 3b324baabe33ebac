//! datesift command-line entry point

use clap::{Parser, Subcommand};
use datesift::{Config, Correction, Locale};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod cli;

/// datesift: find dates and times in natural-language text
#[derive(Parser, Debug)]
#[command(name = "datesift")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Emit logs as JSON lines on stderr
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Extract dates and times from text
    Parse {
        /// Text to parse (read from stdin when omitted)
        text: Option<String>,
        /// Reference moment, YYYY-MM-DD[THH:MM[:SS]] (default: now)
        #[arg(short, long)]
        reference: Option<String>,
        /// Language pack: en, ja, zh, de, fr
        #[arg(short, long)]
        locale: Option<Locale>,
        /// Disable casual expressions (weekday names, "tomorrow", "tonight")
        #[arg(long)]
        strict: bool,
        /// Resolve open-ended dates: none, forward, backward
        #[arg(long)]
        correction: Option<Correction>,
    },
    /// Show the matchers and refinement stages of a mode
    Stages {
        /// Language pack: en, ja, zh, de, fr
        #[arg(short, long)]
        locale: Option<Locale>,
        /// Disable casual expressions
        #[arg(long)]
        strict: bool,
        /// Resolve open-ended dates: none, forward, backward
        #[arg(long)]
        correction: Option<Correction>,
    },
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let config = if let Some(path) = &args.config {
        Config::from_file(path)?
    } else {
        Config::load()?
    };

    init_logging(&config, args.json_logs);

    match args.command {
        Command::Parse {
            text,
            reference,
            locale,
            strict,
            correction,
        } => {
            let overrides = cli::ParserOverrides {
                locale,
                strict,
                correction,
            };
            cli::run_parse(config, overrides, text, reference, args.json)
        }
        Command::Stages {
            locale,
            strict,
            correction,
        } => {
            let overrides = cli::ParserOverrides {
                locale,
                strict,
                correction,
            };
            cli::run_stages(config, overrides, args.json)
        }
    }
}

/// Install the global subscriber. Logs go to stderr.
fn init_logging(config: &Config, json_logs: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.logging.level.as_str()));

    if json_logs || config.logging.json {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}
