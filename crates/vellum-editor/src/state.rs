//! Persisted editor state as an XML-like element tree.
//!
//! Editor session state is stored as nested named nodes with string
//! attributes. Absent children and attributes are legitimate absence,
//! not errors; only a document that fails to parse is an error. Node
//! and attribute names are fixed identifiers chosen by providers, so
//! the writer only escapes attribute values.

use std::fmt::Write as _;
use std::path::Path;

use anyhow::Context;
use smol_str::SmolStr;
use thiserror::Error;

/// Errors produced when decoding a persisted state document.
#[derive(Debug, Error)]
pub enum StateError {
    /// The document is not well-formed XML.
    #[error("malformed state document: {0}")]
    Malformed(#[from] roxmltree::Error),
}

/// An XML-like element in persisted editor state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateNode {
    name: SmolStr,
    attributes: Vec<(SmolStr, String)>,
    children: Vec<StateNode>,
}

impl StateNode {
    /// Creates an empty node with the given name.
    #[must_use]
    pub fn new(name: impl Into<SmolStr>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// The node's name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The value of an attribute, if present.
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Sets an attribute, replacing an existing value.
    pub fn set_attribute(&mut self, name: impl Into<SmolStr>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        if let Some(entry) = self.attributes.iter_mut().find(|(key, _)| *key == name) {
            entry.1 = value;
        } else {
            self.attributes.push((name, value));
        }
    }

    /// The first child with the given name, if present.
    #[must_use]
    pub fn child(&self, name: &str) -> Option<&StateNode> {
        self.children.iter().find(|child| child.name == name)
    }

    /// Appends a child node.
    pub fn add_child(&mut self, child: StateNode) {
        self.children.push(child);
    }

    /// The node's children in document order.
    #[must_use]
    pub fn children(&self) -> &[StateNode] {
        &self.children
    }

    /// Whether the node carries no attributes and no children.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty() && self.children.is_empty()
    }

    /// Serializes the node and its subtree to XML, without a document
    /// declaration.
    #[must_use]
    pub fn to_xml(&self) -> String {
        let mut out = String::new();
        self.write_into(&mut out, 0);
        out
    }

    fn write_into(&self, out: &mut String, depth: usize) {
        for _ in 0..depth {
            out.push_str("  ");
        }
        out.push('<');
        out.push_str(&self.name);
        for (key, value) in &self.attributes {
            let _ = write!(out, " {key}=\"{}\"", escape_attribute(value));
        }
        if self.children.is_empty() {
            out.push_str("/>\n");
            return;
        }
        out.push_str(">\n");
        for child in &self.children {
            child.write_into(out, depth + 1);
        }
        for _ in 0..depth {
            out.push_str("  ");
        }
        out.push_str("</");
        out.push_str(&self.name);
        out.push_str(">\n");
    }

    /// Parses a state document, taking its root element.
    ///
    /// # Errors
    ///
    /// Returns [`StateError::Malformed`] when the text is not
    /// well-formed XML.
    pub fn parse(text: &str) -> Result<Self, StateError> {
        let document = roxmltree::Document::parse(text)?;
        Ok(Self::from_node(document.root_element()))
    }

    fn from_node(node: roxmltree::Node<'_, '_>) -> Self {
        let mut result = StateNode::new(node.tag_name().name());
        for attribute in node.attributes() {
            result.set_attribute(attribute.name(), attribute.value());
        }
        for child in node.children().filter(roxmltree::Node::is_element) {
            result.add_child(Self::from_node(child));
        }
        result
    }
}

fn escape_attribute(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('"', "&quot;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('\'', "&apos;")
}

/// Reads a persisted state document from disk.
///
/// # Errors
///
/// Fails when the file cannot be read or does not parse.
pub fn read_state_file(path: &Path) -> anyhow::Result<StateNode> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read state file '{}'", path.display()))?;
    let node = StateNode::parse(&text)
        .with_context(|| format!("failed to decode state file '{}'", path.display()))?;
    Ok(node)
}

/// Writes a state document to disk with an XML declaration.
///
/// # Errors
///
/// Fails when the target directory cannot be created or the file cannot
/// be written.
pub fn write_state_file(path: &Path, node: &StateNode) -> anyhow::Result<()> {
    let mut xml = String::from("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    xml.push_str(&node.to_xml());

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create state directory '{}'", parent.display()))?;
    }
    std::fs::write(path, xml)
        .with_context(|| format!("failed to write state file '{}'", path.display()))?;
    Ok(())
}
