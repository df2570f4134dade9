//! Declaration and reference index.
//!
//! The index records where named elements are declared and where they
//! are referenced, keyed by kind and name. It is populated by the host
//! parser when documents are analyzed; the IDE layer only reads it.

use rustc_hash::FxHashMap;
use smol_str::SmolStr;
use text_size::TextRange;

use crate::element::{Element, ElementKind, FileId};

/// A reference site pointing at a named element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reference {
    /// The file containing the reference.
    pub file: FileId,
    /// The range covering the referenced name.
    pub range: TextRange,
}

/// Declarations and reference sites for a workspace.
#[derive(Debug, Default)]
pub struct ElementIndex {
    declarations: FxHashMap<(ElementKind, SmolStr), Element>,
    references: FxHashMap<(ElementKind, SmolStr), Vec<Reference>>,
}

impl ElementIndex {
    /// Creates an empty index.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a declaration. A later declaration with the same kind and
    /// name replaces the earlier one, matching redefinition semantics of
    /// attribute declarations.
    pub fn add_declaration(&mut self, element: Element) {
        self.declarations
            .insert((element.kind, element.name.clone()), element);
    }

    /// Records a reference site for a declared name.
    pub fn add_reference(&mut self, kind: ElementKind, name: impl Into<SmolStr>, site: Reference) {
        self.references
            .entry((kind, name.into()))
            .or_default()
            .push(site);
    }

    /// Looks up the declaration for a kind and name.
    #[must_use]
    pub fn declaration_of(&self, kind: ElementKind, name: &str) -> Option<&Element> {
        self.declarations.get(&(kind, SmolStr::new(name)))
    }

    /// All reference sites recorded for a kind and name.
    #[must_use]
    pub fn references_to(&self, kind: ElementKind, name: &str) -> &[Reference] {
        self.references
            .get(&(kind, SmolStr::new(name)))
            .map_or(&[], Vec::as_slice)
    }

    /// The number of recorded declarations.
    #[must_use]
    pub fn declaration_count(&self) -> usize {
        self.declarations.len()
    }
}
