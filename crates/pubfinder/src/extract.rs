//! Extraction of [`PaperRecord`]s from an efetch `PubmedArticleSet` document.
//!
//! For every `PubmedArticle` the extractor reads the identifier, title and publication year, then
//! walks the article's `Author` elements. An author with both a `LastName` and a `ForeName` is
//! listed by full name, and the affiliation attributed to that author (see [`AffiliationScope`])
//! is checked case-insensitively against the configured company keywords. Matching affiliations
//! are collected once each, in the order they were first seen.
//!
//! # Examples
//!
//! ```
//! use pubfinder::Extractor;
//!
//! let xml = r#"<PubmedArticleSet><PubmedArticle><MedlineCitation>
//!   <PMID>1</PMID>
//!   <Article>
//!     <ArticleTitle>Kinase inhibitors</ArticleTitle>
//!     <AuthorList><Author>
//!       <LastName>Doe</LastName><ForeName>Jane</ForeName>
//!       <AffiliationInfo><Affiliation>XYZ Pharma, Basel</Affiliation></AffiliationInfo>
//!     </Author></AuthorList>
//!   </Article>
//! </MedlineCitation></PubmedArticle></PubmedArticleSet>"#;
//!
//! let records = Extractor::default().extract(xml)?;
//! assert_eq!(records[0].non_academic_authors, ["Jane Doe"]);
//! assert_eq!(records[0].company_affiliations, ["XYZ Pharma, Basel"]);
//! # Ok::<(), pubfinder::error::PubfinderError>(())
//! ```

use super::*;

lazy_static! {
  /// Loose e-mail address matcher for affiliation text such as `Electronic address: a@b.org.`
  static ref EMAIL_PATTERN: Regex =
    Regex::new(r"[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}").unwrap();
}

/// Path to an affiliation, relative to either an article or an author.
const AFFILIATION_PATH: &str = "AffiliationInfo/Affiliation";

/// Turns efetch documents into [`PaperRecord`]s.
#[derive(Debug, Clone)]
pub struct Extractor {
  /// Lower-cased company keywords
  keywords:       Vec<String>,
  /// How affiliations are attributed to authors
  scope:          AffiliationScope,
  /// Whether to fill the corresponding author email
  extract_emails: bool,
}

impl Default for Extractor {
  fn default() -> Self { Self::new(&Config::default()) }
}

impl From<&Config> for Extractor {
  fn from(config: &Config) -> Self { Self::new(config) }
}

impl Extractor {
  /// Creates an extractor using the keyword, scope and email settings of `config`.
  pub fn new(config: &Config) -> Self {
    Self {
      keywords:       config.keywords.iter().map(|k| k.to_lowercase()).collect(),
      scope:          config.affiliation_scope,
      extract_emails: config.extract_emails,
    }
  }

  /// Parses an efetch payload into one record per `PubmedArticle`.
  ///
  /// An empty payload yields no records without being parsed, which is what
  /// [`PubmedClient::fetch_details`] returns when there was nothing to fetch. Anything else,
  /// whitespace included, must be a complete document.
  ///
  /// # Errors
  ///
  /// Returns [`PubfinderError::MalformedDocument`] if a non-empty payload is not well-formed XML.
  pub fn extract(&self, xml: &str) -> Result<Vec<PaperRecord>> {
    if xml.is_empty() {
      debug!("Empty detail document, nothing to extract");
      return Ok(Vec::new());
    }

    let root = Element::parse(xml)?;
    let records: Vec<PaperRecord> =
      root.find_all("PubmedArticle").map(|article| self.extract_article(article)).collect();

    debug!(
      "Extracted {} records, {} with company affiliations",
      records.len(),
      records.iter().filter(|r| r.has_company_affiliation()).count()
    );
    Ok(records)
  }

  /// Builds the record for a single `PubmedArticle` element.
  fn extract_article(&self, article: &Element) -> PaperRecord {
    let field = |path: &str| article.find(path).map(Element::text).unwrap_or_default();

    let mut record = PaperRecord {
      pubmed_id: field("PMID"),
      title: field("ArticleTitle"),
      publication_date: field("PubDate/Year"),
      ..PaperRecord::default()
    };

    let article_affiliation = article.find(AFFILIATION_PATH);

    for author in article.find_all("Author") {
      let (Some(last_name), Some(fore_name)) = (author.child("LastName"), author.child("ForeName"))
      else {
        trace!("Skipping author without both names in PMID {}", record.pubmed_id);
        continue;
      };
      record.non_academic_authors.push(format!("{} {}", fore_name.text(), last_name.text()));

      let affiliation = match self.scope {
        AffiliationScope::Article => article_affiliation,
        AffiliationScope::Author => author.find(AFFILIATION_PATH),
      };
      let Some(affiliation) = affiliation.map(Element::text) else {
        continue;
      };
      if !self.is_company(&affiliation) {
        continue;
      }

      if self.extract_emails && record.corresponding_author_email.is_empty() {
        if let Some(email) = EMAIL_PATTERN.find(&affiliation) {
          record.corresponding_author_email = email.as_str().to_string();
        }
      }
      if !record.company_affiliations.contains(&affiliation) {
        record.company_affiliations.push(affiliation);
      }
    }

    record
  }

  /// Whether the affiliation contains any company keyword, ignoring case.
  pub fn is_company(&self, affiliation: &str) -> bool {
    let affiliation = affiliation.to_lowercase();
    self.keywords.iter().any(|keyword| affiliation.contains(keyword.as_str()))
  }
}
