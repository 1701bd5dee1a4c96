//! HTTP access to the PubMed E-utilities search and fetch endpoints.
//!
//! A run makes at most two requests: one `esearch` call returning the identifiers that match a
//! query, and one batched `efetch` call returning the details of all of them as a single XML
//! document. Requests are issued one after the other and are never retried; a transport failure
//! or a non-success status ends the run with [`PubfinderError::RemoteRequest`].
//!
//! # Examples
//!
//! ```no_run
//! use pubfinder::{Config, PubmedClient, Query};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = PubmedClient::new(Config::default())?;
//!
//! let ids = client.search_ids(&Query::new("crispr").with_max_results(10)).await?;
//! let xml = client.fetch_details(&ids).await?;
//! let papers = client.extract(&xml)?;
//! println!("{} of {} papers have company authors", papers.iter().filter(|p| p.has_company_affiliation()).count(), papers.len());
//! # Ok(())
//! # }
//! ```

use super::*;

/// A free-text PubMed search with an upper bound on the number of results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
  /// Search term, passed through to PubMed unchanged
  pub term:        String,
  /// Maximum number of identifiers to request
  pub max_results: usize,
}

impl Query {
  /// Creates a query bounded by [`DEFAULT_MAX_RESULTS`](config::DEFAULT_MAX_RESULTS).
  pub fn new(term: impl Into<String>) -> Self {
    Self { term: term.into(), max_results: config::DEFAULT_MAX_RESULTS }
  }

  /// Sets the maximum number of identifiers to request.
  pub fn with_max_results(mut self, max_results: usize) -> Self {
    self.max_results = max_results;
    self
  }
}

/// Body of an `esearch` response with `retmode=json`.
#[derive(Debug, Default, Deserialize)]
struct SearchResponse {
  /// Absent when PubMed reports nothing at all
  #[serde(default)]
  esearchresult: Option<SearchResult>,
}

/// The `esearchresult` object of a search response.
#[derive(Debug, Default, Deserialize)]
struct SearchResult {
  /// Matching identifiers in PubMed's order
  #[serde(default)]
  idlist: Vec<String>,
  /// Error message PubMed reports with a success status, e.g. for an invalid term
  #[serde(rename = "ERROR", default)]
  error:  Option<String>,
}

/// Client for the search, fetch and extraction pipeline.
#[derive(Debug, Clone)]
pub struct PubmedClient {
  /// Underlying HTTP client
  http:      reqwest::Client,
  /// Endpoints and request parameters
  config:    Config,
  /// Document extractor built from the same configuration
  extractor: Extractor,
}

impl PubmedClient {
  /// Creates a client from a validated configuration.
  ///
  /// # Errors
  ///
  /// Returns [`PubfinderError::Config`] if the configuration is invalid, or
  /// [`PubfinderError::RemoteRequest`] if the HTTP client cannot be built.
  pub fn new(config: Config) -> Result<Self> {
    config.validate()?;

    let mut builder = reqwest::Client::builder();
    if let Some(timeout) = config.timeout() {
      builder = builder.timeout(timeout);
    }
    let http = builder.build()?;
    let extractor = Extractor::new(&config);

    Ok(Self { http, config, extractor })
  }

  /// The configuration this client was built with.
  pub fn config(&self) -> &Config { &self.config }

  /// A query for `term` bounded by the configured `max_results`.
  pub fn query(&self, term: impl Into<String>) -> Query {
    Query::new(term).with_max_results(self.config.max_results)
  }

  /// Identification parameters sent with every request when configured.
  fn identity_params(&self) -> Vec<(&'static str, String)> {
    [("api_key", &self.config.api_key), ("tool", &self.config.tool), ("email", &self.config.email)]
      .into_iter()
      .filter_map(|(name, value)| value.clone().map(|v| (name, v)))
      .collect()
  }

  /// Searches PubMed and returns the matching identifiers in the order PubMed ranks them.
  ///
  /// A response without an `esearchresult.idlist` is treated as "no results".
  ///
  /// # Errors
  ///
  /// - [`PubfinderError::Config`] if `query.max_results` is zero
  /// - [`PubfinderError::RemoteRequest`] on transport failure or a non-success status
  /// - [`PubfinderError::InvalidResponse`] if the body is not JSON
  pub async fn search_ids(&self, query: &Query) -> Result<Vec<String>> {
    if query.max_results == 0 {
      return Err(PubfinderError::Config("max_results must be a positive integer".to_string()));
    }

    debug!("Searching {} for {:?} (retmax {})", self.config.search_url, query.term, query.max_results);

    let response = self
      .http
      .get(&self.config.search_url)
      .query(&[
        ("db", "pubmed"),
        ("term", query.term.as_str()),
        ("retmode", "json"),
        ("retmax", query.max_results.to_string().as_str()),
      ])
      .query(&self.identity_params())
      .send()
      .await?
      .error_for_status()?;
    let data = response.bytes().await?;

    trace!("esearch response: {}", String::from_utf8_lossy(&data));

    let parsed: SearchResponse = serde_json::from_slice(&data)
      .map_err(|e| PubfinderError::InvalidResponse(format!("failed to parse JSON: {e}")))?;
    let result = parsed.esearchresult.unwrap_or_default();
    if let Some(error) = &result.error {
      warn!("PubMed reported an error for {:?}: {}", query.term, error);
    }

    debug!("Search returned {} identifiers", result.idlist.len());
    Ok(result.idlist)
  }

  /// Fetches the details of all `ids` in one request and returns the XML body.
  ///
  /// With no identifiers this returns an empty string without touching the network.
  ///
  /// # Errors
  ///
  /// Returns [`PubfinderError::RemoteRequest`] on transport failure or a non-success status.
  pub async fn fetch_details(&self, ids: &[String]) -> Result<String> {
    if ids.is_empty() {
      debug!("No identifiers to fetch");
      return Ok(String::new());
    }

    debug!("Fetching {} records from {}", ids.len(), self.config.fetch_url);

    let id = ids.join(",");
    let body = self
      .http
      .get(&self.config.fetch_url)
      .query(&[("db", "pubmed"), ("id", id.as_str()), ("retmode", "xml")])
      .query(&self.identity_params())
      .send()
      .await?
      .error_for_status()?
      .text()
      .await?;

    trace!("efetch response: {body}");
    Ok(body)
  }

  /// Extracts records from a fetched document using this client's configuration.
  pub fn extract(&self, xml: &str) -> Result<Vec<PaperRecord>> { self.extractor.extract(xml) }

  /// Runs search, fetch and extraction in sequence.
  ///
  /// Any failure discards the whole run; there are no partial results.
  pub async fn find_papers(&self, query: &Query) -> Result<Vec<PaperRecord>> {
    let ids = self.search_ids(query).await?;
    let xml = self.fetch_details(&ids).await?;
    self.extract(&xml)
  }
}
