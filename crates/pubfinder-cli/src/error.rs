//! Error type for the `get-papers-list` binary.

use thiserror::Error;

use super::*;

/// Error type alias used throughout the CLI.
pub type Result<T> = core::result::Result<T, CliError>;

/// Errors that end a CLI run.
///
/// Library failures are carried through unchanged so the message shown to the user is the one the
/// failing stage produced.
#[derive(Error, Debug)]
pub enum CliError {
  /// Search, fetch, extraction, configuration or export failed.
  #[error(transparent)]
  Pubfinder(#[from] PubfinderError),

  /// Writing to the terminal failed.
  #[error(transparent)]
  Io(#[from] std::io::Error),
}
