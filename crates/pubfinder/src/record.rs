//! The per-article output of the pipeline.

use super::*;

/// CSV column headers, in the order [`PaperRecord::to_row`] produces values.
pub const CSV_HEADERS: [&str; 6] = [
  "PubmedID",
  "Title",
  "Publication Date",
  "Non-academic Author(s)",
  "Company Affiliation(s)",
  "Corresponding Author Email",
];

/// Metadata extracted for one `PubmedArticle`.
///
/// Fields that were absent from the document are empty rather than missing, so a record exists
/// for every article even when nothing could be extracted from it.
///
/// # Examples
///
/// ```
/// use pubfinder::PaperRecord;
///
/// let record = PaperRecord {
///   pubmed_id:                  "12345678".to_string(),
///   title:                      "A trial".to_string(),
///   publication_date:           "2023".to_string(),
///   non_academic_authors:       vec!["Jane Doe".to_string(), "John Roe".to_string()],
///   company_affiliations:       vec!["XYZ Pharma".to_string()],
///   corresponding_author_email: String::new(),
/// };
/// assert_eq!(record.to_row()[3], "Jane Doe, John Roe");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PaperRecord {
  /// PubMed identifier (`PMID`)
  pub pubmed_id:                  String,
  /// Article title
  pub title:                      String,
  /// Publication year from `PubDate/Year`
  pub publication_date:           String,
  /// Full names of the article's authors
  pub non_academic_authors:       Vec<String>,
  /// Distinct affiliations that matched a company keyword, in first-seen order
  pub company_affiliations:       Vec<String>,
  /// Corresponding author email, empty unless extraction is enabled and an address was found
  pub corresponding_author_email: String,
}

impl PaperRecord {
  /// The record as a flat row matching [`CSV_HEADERS`], list fields joined with `", "`.
  pub fn to_row(&self) -> [String; 6] {
    [
      self.pubmed_id.clone(),
      self.title.clone(),
      self.publication_date.clone(),
      self.non_academic_authors.join(", "),
      self.company_affiliations.join(", "),
      self.corresponding_author_email.clone(),
    ]
  }

  /// Whether any author of this paper was flagged with a company affiliation.
  pub fn has_company_affiliation(&self) -> bool { !self.company_affiliations.is_empty() }
}
