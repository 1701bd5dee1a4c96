//! Console presentation of results and status messages.

use std::io::Write;

use console::style;

use super::*;

pub static INFO_PREFIX: &str = "ℹ ";
pub static SUCCESS_PREFIX: &str = "✓ ";
pub static ERROR_PREFIX: &str = "✗ ";
pub static ITEM_PREFIX: &str = "├─";
pub static LAST_ITEM_PREFIX: &str = "└─";
pub static CONTINUE_PREFIX: &str = "│  ";

#[derive(Debug)]
pub enum ResponseContent<'a> {
  Papers(&'a [PaperRecord]),
  Success(&'a str),
  Info(&'a str),
}

pub trait UserInteraction {
  fn reply(&self, content: ResponseContent) -> Result<()>;
}

impl UserInteraction for Cli {
  fn reply(&self, content: ResponseContent) -> Result<()> {
    let mut out = std::io::stdout().lock();
    match content {
      ResponseContent::Papers(papers) => {
        if papers.is_empty() {
          writeln!(out, "{}No papers found", style(INFO_PREFIX).blue())?;
        } else {
          writeln!(
            out,
            "{}Found {} papers, {} with company-affiliated authors",
            style(SUCCESS_PREFIX).green(),
            style(papers.len()).yellow(),
            style(papers.iter().filter(|p| p.has_company_affiliation()).count()).yellow()
          )?;
          for paper in papers {
            write_paper(&mut out, paper)?;
          }
        }
      },
      ResponseContent::Success(message) =>
        writeln!(out, "{}{}", style(SUCCESS_PREFIX).green(), message)?,
      ResponseContent::Info(message) => writeln!(out, "{}{}", style(INFO_PREFIX).blue(), message)?,
    }
    Ok(())
  }
}

/// Prints one record as a small tree, one field per line.
fn write_paper(out: &mut impl Write, paper: &PaperRecord) -> std::io::Result<()> {
  let list = |items: &[String]| {
    if items.is_empty() {
      style("none".to_string()).dim()
    } else {
      style(items.join(", ")).white()
    }
  };

  writeln!(out)?;
  writeln!(
    out,
    "{} {} {}",
    style(ITEM_PREFIX).dim(),
    style(format!("PMID {}", paper.pubmed_id)).cyan().bold(),
    style(&paper.title).white().bold()
  )?;
  writeln!(out, "{}{} {}", CONTINUE_PREFIX, style("Published:").green(), paper.publication_date)?;
  writeln!(out, "{}{} {}", CONTINUE_PREFIX, style("Authors:").green(), list(&paper.non_academic_authors))?;
  writeln!(
    out,
    "{}{} {}",
    CONTINUE_PREFIX,
    style("Company affiliations:").green(),
    list(&paper.company_affiliations)
  )?;
  writeln!(
    out,
    "{} {} {}",
    style(LAST_ITEM_PREFIX).dim(),
    style("Corresponding author email:").green(),
    paper.corresponding_author_email
  )
}
