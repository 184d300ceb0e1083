//! Tree view of a recorded run document.
//!
//! The simulator writes its run log as a nested XML tree. This module turns
//! that text into an owned [`LogNode`] tree with named-field lookup, so the
//! loader never touches the XML parser directly.

use crate::error::{DocumentError, FieldError};

/// One element of the run document.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LogNode {
    /// Element tag name.
    pub tag: String,
    /// Concatenated direct text content, untrimmed.
    pub text: String,
    /// Child elements in document order.
    pub children: Vec<LogNode>,
}

impl LogNode {
    /// Parses an XML document and returns its root element.
    pub fn parse_xml(source: &str) -> Result<Self, DocumentError> {
        let document = roxmltree::Document::parse(source)?;
        Ok(Self::from_xml(document.root_element()))
    }

    fn from_xml(node: roxmltree::Node<'_, '_>) -> Self {
        let mut text = String::new();
        let mut children = Vec::new();

        for child in node.children() {
            if child.is_element() {
                children.push(Self::from_xml(child));
            } else if let Some(fragment) = child.text().filter(|_| child.is_text()) {
                text.push_str(fragment);
            }
        }

        Self {
            tag: node.tag_name().name().to_string(),
            text,
            children,
        }
    }

    /// First descendant with the given tag, in document order.
    pub fn find(&self, tag: &str) -> Option<&LogNode> {
        for child in &self.children {
            if child.tag == tag {
                return Some(child);
            }
            if let Some(found) = child.find(tag) {
                return Some(found);
            }
        }
        None
    }

    /// All descendants with the given tag, in document order.
    pub fn find_all<'a>(&'a self, tag: &str) -> Vec<&'a LogNode> {
        let mut found = Vec::new();
        self.collect(tag, &mut found);
        found
    }

    fn collect<'a>(&'a self, tag: &str, found: &mut Vec<&'a LogNode>) {
        for child in &self.children {
            if child.tag == tag {
                found.push(child);
            }
            child.collect(tag, found);
        }
    }

    /// Text of the named field, trimmed.
    pub fn field(&self, name: &str) -> Option<&str> {
        self.find(name).map(|node| node.text.trim())
    }

    /// Reads the named field as a finite decimal number.
    pub fn number(&self, name: &str) -> Result<f64, FieldError> {
        let text = self.field(name).ok_or(FieldError::Missing)?;
        match text.parse::<f64>() {
            Ok(value) if value.is_finite() => Ok(value),
            _ => Err(FieldError::Invalid(text.to_string())),
        }
    }

    /// Reads an optional field; absent is `Ok(None)`, present but bad is an error.
    pub fn optional_number(&self, name: &str) -> Result<Option<f64>, FieldError> {
        match self.number(name) {
            Ok(value) => Ok(Some(value)),
            Err(FieldError::Missing) => Ok(None),
            Err(e) => Err(e),
        }
    }
}
