//! Rename for Vellum markup.
//!
//! Renameable constructs are attribute declaration names and include
//! tag names. Both travel through attribute references and include
//! directives unescaped, so a rename only accepts names that cannot
//! change how the surrounding markup parses.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use text_size::TextRange;
use tracing::debug;

use crate::references::{find_references, FindReferencesOptions};
use vellum_model::{is_safe_name, Element, ElementIndex, ElementKind, ElementPattern, FileId};

/// A text edit representing a change to the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextEdit {
    /// The range to replace.
    pub range: TextRange,
    /// The new text.
    pub new_text: String,
}

/// Result of a rename operation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenameResult {
    /// Edits grouped by file.
    pub edits: HashMap<FileId, Vec<TextEdit>>,
}

impl RenameResult {
    /// Creates an empty rename result.
    #[must_use]
    pub fn new() -> Self {
        Self {
            edits: HashMap::new(),
        }
    }

    /// Adds an edit for a file.
    pub fn add_edit(&mut self, file_id: FileId, edit: TextEdit) {
        self.edits.entry(file_id).or_default().push(edit);
    }

    /// Returns the total number of edits.
    #[must_use]
    pub fn edit_count(&self) -> usize {
        self.edits.values().map(Vec::len).sum()
    }
}

static RENAME_TARGETS: Lazy<ElementPattern> = Lazy::new(|| {
    ElementPattern::of(ElementKind::AttributeDeclarationName).or(ElementKind::IncludeTagName)
});

/// The pattern of elements whose names can be renamed.
#[must_use]
pub fn rename_target_pattern() -> &'static ElementPattern {
    &RENAME_TARGETS
}

/// Returns true if `new_name` is acceptable input for renaming
/// `element`.
///
/// Acceptable means: the element is a rename target, and every
/// character of `new_name` is an ASCII letter, digit, underscore, or
/// hyphen. The empty string is acceptable input (the user may still be
/// typing); committing a rename additionally requires a non-empty name.
#[must_use]
pub fn is_input_valid(new_name: &str, element: &Element) -> bool {
    rename_target_pattern().matches(element) && is_safe_name(new_name)
}

/// Prepares a rename, returning the name range when the element can be
/// renamed.
pub fn prepare_rename(element: &Element) -> Option<TextRange> {
    rename_target_pattern()
        .matches(element)
        .then_some(element.range)
}

/// Renames a declaration and every reference recorded for it.
///
/// Returns `None` when the element is not a rename target, the new
/// name is empty or unsafe, or another declaration of the same kind
/// already uses the new name.
pub fn rename(index: &ElementIndex, element: &Element, new_name: &str) -> Option<RenameResult> {
    if !rename_target_pattern().matches(element) {
        return None;
    }
    if !is_safe_name(new_name) {
        debug!("rename rejected: '{new_name}' contains unsafe characters");
        return None;
    }
    if new_name.is_empty() {
        return None;
    }
    if has_conflict(index, element, new_name) {
        debug!("rename rejected: '{new_name}' is already declared");
        return None;
    }

    let mut result = RenameResult::new();
    result.add_edit(
        element.file,
        TextEdit {
            range: element.range,
            new_text: new_name.to_string(),
        },
    );
    for site in find_references(index, element, FindReferencesOptions::default()) {
        result.add_edit(
            site.file,
            TextEdit {
                range: site.range,
                new_text: new_name.to_string(),
            },
        );
    }

    Some(result)
}

/// Checks whether renaming to `new_name` would collide with a different
/// declaration of the same kind.
fn has_conflict(index: &ElementIndex, element: &Element, new_name: &str) -> bool {
    match index.declaration_of(element.kind, new_name) {
        Some(existing) => existing != element,
        None => false,
    }
}
