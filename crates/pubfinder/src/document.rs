//! Owned XML element tree for efetch documents.
//!
//! The efetch payload is small enough (a bounded batch of articles) to be held
//! in memory as a whole, so it is read once with [`quick_xml`] into an
//! [`Element`] tree and then queried with a handful of path lookups. Every
//! lookup returns an [`Option`]: a missing element and an element with no text
//! are different things, and callers branch on presence.
//!
//! ```
//! use pubfinder::document::Element;
//!
//! let doc = Element::parse("<Set><Article><Title>On <i>mice</i></Title></Article></Set>")?;
//! let title = doc.find("Article/Title").map(|t| t.text());
//! assert_eq!(title.as_deref(), Some("On mice"));
//! assert!(doc.find("Article/Year").is_none());
//! # Ok::<(), pubfinder::error::PubfinderError>(())
//! ```

use quick_xml::{
  events::{BytesStart, Event},
  Reader,
};

use super::*;

/// A node in the content of an [`Element`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
  /// A nested element
  Element(Element),
  /// Unescaped character data
  Text(String),
}

/// An XML element with its name and ordered content.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Element {
  /// Tag name, including any namespace prefix
  pub name:    String,
  /// Child elements and text in document order
  pub content: Vec<Node>,
}

impl Element {
  /// Creates an empty element with the given tag name.
  pub fn new(name: impl Into<String>) -> Self { Self { name: name.into(), content: Vec::new() } }

  /// Parses a complete XML document and returns its root element.
  ///
  /// # Errors
  ///
  /// Returns [`PubfinderError::MalformedDocument`] if the markup is not well formed: mismatched
  /// or unclosed tags, invalid tag names, bad attributes (no value, unquoted, repeated), a missing
  /// root element, more than one root element, or non-whitespace text outside the root.
  pub fn parse(xml: &str) -> Result<Self> {
    let mut reader = Reader::from_str(xml);
    let mut stack: Vec<Element> = Vec::new();
    let mut root: Option<Element> = None;

    loop {
      match reader.read_event()? {
        Event::Start(e) => stack.push(open_element(&e)?),
        Event::Empty(e) => {
          let element = open_element(&e)?;
          attach(&mut stack, &mut root, element)?;
        },
        Event::End(e) => {
          let element = stack.pop().ok_or_else(|| {
            PubfinderError::MalformedDocument(format!(
              "unexpected closing tag </{}>",
              String::from_utf8_lossy(e.name().as_ref())
            ))
          })?;
          attach(&mut stack, &mut root, element)?;
        },
        Event::Text(e) => push_text(&mut stack, &e.unescape()?)?,
        Event::CData(e) => push_text(&mut stack, &String::from_utf8_lossy(&e.into_inner()))?,
        Event::Eof => break,
        _ => (),
      }
    }

    if let Some(open) = stack.last() {
      return Err(PubfinderError::MalformedDocument(format!(
        "unclosed element <{}> at end of document",
        open.name
      )));
    }
    root.ok_or_else(|| PubfinderError::MalformedDocument("document has no root element".into()))
  }

  /// Iterates over the direct child elements.
  pub fn children(&self) -> impl Iterator<Item = &Element> {
    self.content.iter().filter_map(|node| match node {
      Node::Element(element) => Some(element),
      Node::Text(_) => None,
    })
  }

  /// Returns the first direct child with the given name.
  pub fn child(&self, name: &str) -> Option<&Element> {
    self.children().find(|child| child.name == name)
  }

  /// Iterates over every element below this one in document order, excluding `self`.
  pub fn descendants(&self) -> Descendants<'_> {
    Descendants { stack: self.children().collect::<Vec<_>>().into_iter().rev().collect() }
  }

  /// Iterates over all descendants with the given name in document order.
  pub fn find_all<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Element> + 'a {
    self.descendants().filter(move |element| element.name == name)
  }

  /// Returns the first element matching a `/`-separated path.
  ///
  /// The first step may match at any depth below `self`; every following step must be a direct
  /// child of the previous one. `find("PubDate/Year")` therefore finds the first `Year` whose
  /// parent is a `PubDate` anywhere in the tree.
  pub fn find(&self, path: &str) -> Option<&Element> {
    let steps: Vec<&str> = path.split('/').filter(|step| !step.is_empty()).collect();
    let (first, rest) = steps.split_first()?;
    self
      .descendants()
      .filter(|element| element.name == *first)
      .find_map(|candidate| candidate.follow(rest))
  }

  /// Walks `steps` through direct children, backtracking across siblings with the same name.
  fn follow(&self, steps: &[&str]) -> Option<&Element> {
    match steps.split_first() {
      None => Some(self),
      Some((step, rest)) =>
        self.children().filter(|child| child.name == *step).find_map(|child| child.follow(rest)),
    }
  }

  /// The text of this element and all of its descendants, concatenated and trimmed.
  pub fn text(&self) -> String {
    let mut text = String::new();
    self.collect_text(&mut text);
    text.trim().to_string()
  }

  /// Appends all character data under this element to `buf`.
  fn collect_text(&self, buf: &mut String) {
    for node in &self.content {
      match node {
        Node::Text(t) => buf.push_str(t),
        Node::Element(element) => element.collect_text(buf),
      }
    }
  }
}

/// Pre-order iterator over the descendants of an [`Element`].
pub struct Descendants<'a> {
  /// Pending elements, next one on top
  stack: Vec<&'a Element>,
}

impl<'a> Iterator for Descendants<'a> {
  type Item = &'a Element;

  fn next(&mut self) -> Option<Self::Item> {
    let next = self.stack.pop()?;
    let mark = self.stack.len();
    self.stack.extend(next.children());
    self.stack[mark..].reverse();
    Some(next)
  }
}

/// Creates the element for a start tag after checking its name and attributes.
///
/// Attribute values are not kept, but every attribute must still be well formed.
fn open_element(start: &BytesStart) -> Result<Element> {
  let name = String::from_utf8_lossy(start.name().as_ref()).into_owned();
  if !is_valid_name(&name) {
    return Err(PubfinderError::MalformedDocument(format!("invalid element name <{name}>")));
  }
  for attribute in start.attributes() {
    attribute?;
  }
  Ok(Element::new(name))
}

/// Whether `name` is an XML name: a letter, `_` or `:` followed by letters, digits, `-`, `.`,
/// `_` or `:`.
fn is_valid_name(name: &str) -> bool {
  let mut chars = name.chars();
  chars.next().is_some_and(|c| c.is_alphabetic() || c == '_' || c == ':')
    && chars.all(|c| c.is_alphanumeric() || matches!(c, '-' | '.' | '_' | ':'))
}

/// Places a completed element under its parent, or makes it the document root.
fn attach(stack: &mut [Element], root: &mut Option<Element>, element: Element) -> Result<()> {
  if let Some(parent) = stack.last_mut() {
    parent.content.push(Node::Element(element));
  } else if root.is_some() {
    return Err(PubfinderError::MalformedDocument(format!(
      "second root element <{}>",
      element.name
    )));
  } else {
    *root = Some(element);
  }
  Ok(())
}

/// Adds character data to the innermost open element.
fn push_text(stack: &mut [Element], text: &str) -> Result<()> {
  match stack.last_mut() {
    Some(parent) => {
      parent.content.push(Node::Text(text.to_string()));
      Ok(())
    },
    None if text.trim().is_empty() => Ok(()),
    None => Err(PubfinderError::MalformedDocument("text outside of the root element".into())),
  }
}
