//! Structural elements and element patterns.

use smol_str::SmolStr;
use text_size::TextRange;

/// Identifies a file in the workspace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FileId(pub u32);

/// The structural kind of an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    /// The name of an attribute declaration (`:name: value`).
    AttributeDeclarationName,
    /// An attribute reference in document text (`{name}`).
    AttributeReference,
    /// The name of an include tag opening or closing a tagged region.
    IncludeTagName,
    /// A reference to a tagged region from an include directive.
    IncludeTagReference,
    /// A section title.
    SectionTitle,
    /// A cross reference to an anchor or section.
    CrossReference,
}

/// A resolved structural node in a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    /// The structural kind.
    pub kind: ElementKind,
    /// The element's name as written in the source.
    pub name: SmolStr,
    /// The source range covering the name.
    pub range: TextRange,
    /// The file the element appears in.
    pub file: FileId,
}

impl Element {
    /// Creates an element.
    #[must_use]
    pub fn new(kind: ElementKind, name: impl Into<SmolStr>, range: TextRange, file: FileId) -> Self {
        Self {
            kind,
            name: name.into(),
            range,
            file,
        }
    }
}

/// A matcher over element kinds.
///
/// Patterns are or-sets: a pattern built with [`ElementPattern::of`] and
/// extended with [`ElementPattern::or`] matches an element whose kind is
/// any of the collected kinds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementPattern {
    kinds: Vec<ElementKind>,
}

impl ElementPattern {
    /// Creates a pattern matching a single kind.
    #[must_use]
    pub fn of(kind: ElementKind) -> Self {
        Self { kinds: vec![kind] }
    }

    /// Extends the pattern with another kind.
    #[must_use]
    pub fn or(mut self, kind: ElementKind) -> Self {
        if !self.kinds.contains(&kind) {
            self.kinds.push(kind);
        }
        self
    }

    /// Returns true if the element's kind is one of the pattern's kinds.
    #[must_use]
    pub fn matches(&self, element: &Element) -> bool {
        self.kinds.contains(&element.kind)
    }

    /// The kinds this pattern matches, in insertion order.
    #[must_use]
    pub fn kinds(&self) -> &[ElementKind] {
        &self.kinds
    }
}
