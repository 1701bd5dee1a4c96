//! PubMed search and industry-affiliation extraction library.
//!
//! `pubfinder` queries the NCBI E-utilities API for papers matching a search
//! term and flags authors whose affiliation looks like a company rather than
//! an academic institution. It provides:
//!
//! - Identifier search against `esearch`
//! - A single batched detail fetch against `efetch`
//! - Parsing of the returned `PubmedArticleSet` document into [`PaperRecord`]s
//! - CSV export of the resulting records
//!
//! # Getting Started
//!
//! ```no_run
//! use pubfinder::{prelude::*, Config, PubmedClient, Query};
//!
//! # async fn example() -> Result<()> {
//! let client = PubmedClient::new(Config::default())?;
//!
//! // Search, fetch and extract in one call
//! let papers = client.find_papers(&Query::new("cancer immunotherapy")).await?;
//! for paper in &papers {
//!   println!("{}: {}", paper.pubmed_id, paper.company_affiliations.join("; "));
//! }
//!
//! // Or persist them
//! pubfinder::export::write_csv_file(&papers, "results.csv")?;
//! # Ok(())
//! # }
//! ```
//!
//! # Module Organization
//!
//! - [`client`]: HTTP access to the search and fetch endpoints
//! - [`config`]: Endpoint, keyword and extraction settings
//! - [`document`]: Minimal owned XML element tree used for extraction
//! - [`extract`]: Turning a fetched document into [`PaperRecord`]s
//! - [`record`]: The output record type
//! - [`export`]: CSV output
//! - [`prelude`]: Common traits and types for ergonomic imports

#![warn(missing_docs, clippy::missing_docs_in_private_items)]

use std::{
  fmt::Display,
  path::{Path, PathBuf},
};

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};
#[cfg(test)] use tracing_test::traced_test;

pub mod client;
pub mod config;
pub mod document;
pub mod error;
pub mod export;
pub mod extract;
pub mod record;

pub use crate::{
  client::{PubmedClient, Query},
  config::{AffiliationScope, Config},
  extract::Extractor,
  record::PaperRecord,
};
use crate::{document::Element, error::*};

/// Common traits and types for ergonomic imports.
///
/// ```no_run
/// use pubfinder::{prelude::*, Config, PubmedClient};
///
/// fn example() -> Result<()> {
///   let _client = PubmedClient::new(Config::default())?;
///   Ok(())
/// }
/// ```
pub mod prelude {
  pub use crate::error::{PubfinderError, Result};
}
