//! Command line interface for finding PubMed papers with industry-affiliated authors.
//!
//! `get-papers-list` searches PubMed, fetches the details of every match in one request and lists,
//! per paper, its authors and any affiliations that look like pharmaceutical or biotech
//! companies.
//!
//! # Usage
//!
//! ```bash
//! # Print results to the terminal
//! get-papers-list "cancer immunotherapy"
//!
//! # Write a CSV file instead
//! get-papers-list "cancer immunotherapy" --file results.csv
//!
//! # Debug output, more results, per-author affiliation matching
//! get-papers-list "crispr" -d --max-results 200 --affiliation-scope author
//! ```
//!
//! Logging goes to stderr and is controlled with `-v` (repeatable), `--debug`, or `RUST_LOG`.

#![warn(missing_docs, clippy::missing_docs_in_private_items)]

use std::{num::NonZeroUsize, path::PathBuf, process::ExitCode};

use clap::{builder::ArgAction, Parser};
use console::style;
use pubfinder::{
  error::PubfinderError, export, AffiliationScope, Config, PaperRecord, PubmedClient,
};
use tracing::{debug, trace};
use tracing_subscriber::EnvFilter;

pub mod error;
pub mod interaction;

use crate::{error::*, interaction::*};

/// Command line interface configuration and argument parsing
#[derive(Parser, Debug)]
#[command(
  author,
  version,
  about = "Fetch PubMed papers with authors affiliated to pharmaceutical or biotech companies"
)]
pub struct Cli {
  /// Search query for PubMed, using full PubMed query syntax
  query: String,

  /// Print debug information during execution
  #[arg(short, long)]
  debug: bool,

  /// Verbose mode (-v, -vv, -vvv) for different levels of logging detail
  #[arg(short, long, action = ArgAction::Count, help = "Increase logging verbosity")]
  verbose: u8,

  /// CSV file to write results to. Results are printed to the console when omitted.
  #[arg(short, long, value_name = "FILE")]
  file: Option<PathBuf>,

  /// Maximum number of papers to retrieve [default: 50]
  #[arg(short, long, value_name = "N")]
  max_results: Option<NonZeroUsize>,

  /// Which affiliation each author is matched against: the first one in the article
  /// (`article`) or the author's own (`author`) [default: article]
  #[arg(long, value_name = "SCOPE")]
  affiliation_scope: Option<AffiliationScope>,

  /// Fill the email column from company affiliations that contain an address
  #[arg(long)]
  extract_emails: bool,

  /// TOML file with endpoint, keyword and request settings
  #[arg(short, long, value_name = "PATH")]
  config: Option<PathBuf>,
}

impl Cli {
  /// Builds the run configuration: the config file (or defaults) overridden by flags.
  fn config(&self) -> Result<Config> {
    let mut config = match &self.config {
      Some(path) => Config::from_file(path)?,
      None => Config::default(),
    };
    if let Some(max_results) = self.max_results {
      config = config.with_max_results(max_results.get());
    }
    if let Some(scope) = self.affiliation_scope {
      config = config.with_affiliation_scope(scope);
    }
    if self.extract_emails {
      config = config.with_extract_emails(true);
    }
    trace!("Using configuration: {:?}", config);
    Ok(config)
  }
}

/// Configures the logging system based on the verbosity level
///
/// The verbosity levels are:
/// - 0: error (default)
/// - 1: warn
/// - 2: info
/// - 3: debug, also selected by `--debug`
/// - 4+: trace
fn setup_logging(verbosity: u8, debug: bool) {
  let verbosity = if debug { verbosity.max(3) } else { verbosity };
  let filter = match verbosity {
    0 => "error",
    1 => "warn",
    2 => "info",
    3 => "debug",
    _ => "trace",
  };

  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .with_file(true)
    .with_line_number(true)
    .with_target(true)
    .init();
}

/// Searches, fetches and extracts papers, then prints them or writes them to a CSV file.
///
/// Nothing is written unless every stage succeeded.
async fn run<I: UserInteraction>(interaction: &I, cli: &Cli) -> Result<()> {
  let client = PubmedClient::new(cli.config()?)?;

  if cli.debug {
    interaction
      .reply(ResponseContent::Info(&format!("Fetching PubMed papers for query: {}", cli.query)))?;
  }

  let papers: Vec<PaperRecord> = client.find_papers(&client.query(&cli.query)).await?;
  debug!("Pipeline produced {} records", papers.len());

  match &cli.file {
    Some(path) => {
      let path = export::write_csv_file(&papers, path)?;
      interaction.reply(ResponseContent::Success(&format!("Results saved to {}", path.display())))
    },
    None => interaction.reply(ResponseContent::Papers(&papers)),
  }
}

/// Entry point for the `get-papers-list` binary
///
/// Any error ends the run with a message on stderr and a non-zero exit status.
#[tokio::main]
async fn main() -> ExitCode {
  let cli = Cli::parse();
  setup_logging(cli.verbose, cli.debug);

  match run(&cli, &cli).await {
    Ok(()) => ExitCode::SUCCESS,
    Err(e) => {
      eprintln!("{}{}", style(ERROR_PREFIX).red(), e);
      ExitCode::FAILURE
    },
  }
}
