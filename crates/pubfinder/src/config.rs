//! Settings for the search, fetch and extraction stages.
//!
//! A [`Config`] is built once at startup, either from [`Config::default`] or a
//! TOML file, and never mutated while a run is in progress. Every field has a
//! default, so a configuration file only needs to name what it overrides:
//!
//! ```toml
//! max_results = 100
//! affiliation_scope = "author"
//! keywords = ["pharma", "biotech", "inc", "ltd", "gmbh", "llc"]
//! email = "me@example.org"
//! ```

use std::{str::FromStr, time::Duration};

use super::*;

/// Endpoint used to search PubMed for identifiers.
pub const DEFAULT_SEARCH_URL: &str = "https://eutils.ncbi.nlm.nih.gov/entrez/eutils/esearch.fcgi";

/// Endpoint used to fetch article details for a batch of identifiers.
pub const DEFAULT_FETCH_URL: &str = "https://eutils.ncbi.nlm.nih.gov/entrez/eutils/efetch.fcgi";

/// Upper bound on the number of identifiers requested from the search endpoint.
pub const DEFAULT_MAX_RESULTS: usize = 50;

/// Affiliation substrings that mark an author as non-academic.
pub const DEFAULT_KEYWORDS: [&str; 5] = ["pharma", "biotech", "inc", "ltd", "gmbh"];

/// Where the affiliation of an author is looked up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AffiliationScope {
  /// The first `AffiliationInfo/Affiliation` anywhere under the article is used for every
  /// author. In multi-author articles this attributes the first affiliation to everyone.
  #[default]
  Article,
  /// Each author is checked against the `AffiliationInfo/Affiliation` nested in its own
  /// `Author` element.
  Author,
}

impl Display for AffiliationScope {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      Self::Article => write!(f, "article"),
      Self::Author => write!(f, "author"),
    }
  }
}

impl FromStr for AffiliationScope {
  type Err = PubfinderError;

  fn from_str(s: &str) -> Result<Self> {
    match s.to_lowercase().as_str() {
      "article" | "loose" => Ok(Self::Article),
      "author" | "strict" => Ok(Self::Author),
      other => Err(PubfinderError::Config(format!(
        "unknown affiliation scope `{other}`, expected `article` or `author`"
      ))),
    }
  }
}

/// Runtime configuration shared by [`PubmedClient`] and [`Extractor`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
  /// Search (`esearch`) endpoint
  pub search_url:        String,
  /// Detail (`efetch`) endpoint
  pub fetch_url:         String,
  /// Maximum number of identifiers requested per search
  pub max_results:       usize,
  /// Case-insensitive substrings that flag a company affiliation
  pub keywords:          Vec<String>,
  /// How affiliations are attributed to authors
  pub affiliation_scope: AffiliationScope,
  /// Fill the corresponding author email from flagged affiliations
  pub extract_emails:    bool,
  /// NCBI API key, sent as `api_key` when present
  pub api_key:           Option<String>,
  /// Tool name, sent as `tool` when present
  pub tool:              Option<String>,
  /// Contact address, sent as `email` when present
  pub email:             Option<String>,
  /// Per-request timeout in seconds; transport defaults apply when unset
  pub timeout_secs:      Option<u64>,
}

impl Default for Config {
  fn default() -> Self {
    Self {
      search_url:        DEFAULT_SEARCH_URL.to_string(),
      fetch_url:         DEFAULT_FETCH_URL.to_string(),
      max_results:       DEFAULT_MAX_RESULTS,
      keywords:          DEFAULT_KEYWORDS.iter().map(|k| k.to_string()).collect(),
      affiliation_scope: AffiliationScope::default(),
      extract_emails:    false,
      api_key:           None,
      tool:              None,
      email:             None,
      timeout_secs:      None,
    }
  }
}

impl Config {
  /// Parses a configuration from TOML, filling absent fields with defaults.
  pub fn from_toml_str(toml_str: &str) -> Result<Self> {
    let config: Config = toml::from_str(toml_str)?;
    config.validate()?;
    Ok(config)
  }

  /// Reads and parses a TOML configuration file.
  pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
    let path = path.as_ref();
    debug!("Loading configuration from {}", path.display());
    let content = std::fs::read_to_string(path)?;
    Self::from_toml_str(&content)
  }

  /// Checks that the endpoints are absolute URLs and the result bound is positive.
  pub fn validate(&self) -> Result<()> {
    if self.max_results == 0 {
      return Err(PubfinderError::Config("max_results must be a positive integer".to_string()));
    }
    for (name, value) in [("search_url", &self.search_url), ("fetch_url", &self.fetch_url)] {
      url::Url::parse(value)
        .map_err(|e| PubfinderError::Config(format!("{name} `{value}` is not a valid URL: {e}")))?;
    }
    if self.keywords.iter().any(|k| k.trim().is_empty()) {
      return Err(PubfinderError::Config("keywords must not contain empty entries".to_string()));
    }
    Ok(())
  }

  /// The request timeout, if one is configured.
  pub fn timeout(&self) -> Option<Duration> { self.timeout_secs.map(Duration::from_secs) }

  /// Overrides the search endpoint.
  pub fn with_search_url(mut self, url: impl Into<String>) -> Self {
    self.search_url = url.into();
    self
  }

  /// Overrides the fetch endpoint.
  pub fn with_fetch_url(mut self, url: impl Into<String>) -> Self {
    self.fetch_url = url.into();
    self
  }

  /// Sets the maximum number of identifiers requested.
  pub fn with_max_results(mut self, max_results: usize) -> Self {
    self.max_results = max_results;
    self
  }

  /// Replaces the company keyword set.
  pub fn with_keywords<I, S>(mut self, keywords: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: Into<String>, {
    self.keywords = keywords.into_iter().map(Into::into).collect();
    self
  }

  /// Sets how affiliations are attributed to authors.
  pub fn with_affiliation_scope(mut self, scope: AffiliationScope) -> Self {
    self.affiliation_scope = scope;
    self
  }

  /// Enables or disables email extraction.
  pub fn with_extract_emails(mut self, extract_emails: bool) -> Self {
    self.extract_emails = extract_emails;
    self
  }

  /// Sets the NCBI API key.
  pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
    self.api_key = Some(api_key.into());
    self
  }
}
