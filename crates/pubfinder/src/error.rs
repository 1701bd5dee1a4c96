//! Error types for the pubfinder library.
//!
//! Every stage of the pipeline reports failures through [`PubfinderError`].
//! Nothing is retried or swallowed internally: an error from any stage
//! discards the run and is handed back to the caller unchanged.
//!
//! # Examples
//!
//! ```no_run
//! use pubfinder::{prelude::*, Config, PubmedClient, Query};
//!
//! # async fn example() -> Result<()> {
//! let client = PubmedClient::new(Config::default())?;
//! match client.find_papers(&Query::new("cancer")).await {
//!   Err(PubfinderError::RemoteRequest(e)) => println!("PubMed request failed: {e}"),
//!   Err(PubfinderError::MalformedDocument(msg)) => println!("Bad efetch payload: {msg}"),
//!   Err(e) => println!("Other error: {e}"),
//!   Ok(papers) => println!("Found {} papers", papers.len()),
//! }
//! # Ok(())
//! # }
//! ```

use thiserror::Error;

/// Error type alias used for the [`pubfinder`](crate) crate.
pub type Result<T> = core::result::Result<T, PubfinderError>;

/// Errors that can occur while searching, fetching or extracting papers.
#[derive(Error, Debug)]
pub enum PubfinderError {
  /// A request to one of the remote endpoints failed.
  ///
  /// This covers both transport failures (DNS, TLS, connection resets) and
  /// responses with a non-success HTTP status from either the search or the
  /// fetch endpoint.
  #[error("remote request failed: {0}")]
  RemoteRequest(#[from] reqwest::Error),

  /// A non-empty detail payload could not be parsed as an XML document.
  ///
  /// The string carries the parser message, including the position of the
  /// offending markup where available.
  #[error("malformed document: {0}")]
  MalformedDocument(String),

  /// The search endpoint answered with a body that is not valid JSON.
  #[error("invalid search response: {0}")]
  InvalidResponse(String),

  /// A configuration value is invalid.
  #[error("invalid configuration: {0}")]
  Config(String),

  /// A configuration file could not be deserialized.
  #[error(transparent)]
  TomlDe(#[from] toml::de::Error),

  /// Writing CSV output failed.
  #[error(transparent)]
  Csv(#[from] csv::Error),

  /// A file system operation failed.
  #[error(transparent)]
  Io(#[from] std::io::Error),
}

impl From<quick_xml::Error> for PubfinderError {
  fn from(err: quick_xml::Error) -> Self { Self::MalformedDocument(err.to_string()) }
}

impl From<quick_xml::events::attributes::AttrError> for PubfinderError {
  fn from(err: quick_xml::events::attributes::AttrError) -> Self {
    Self::MalformedDocument(err.to_string())
  }
}
