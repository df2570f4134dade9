//! Reference search over the element index.

use vellum_model::{Element, ElementIndex, Reference};

/// Options controlling reference search.
#[derive(Debug, Clone, Copy, Default)]
pub struct FindReferencesOptions {
    /// Include the declaration site itself in the results.
    pub include_declaration: bool,
}

/// Finds all recorded reference sites for an element's name.
///
/// Results keep index order: the declaration (when requested) first,
/// then reference sites in the order they were recorded.
pub fn find_references(
    index: &ElementIndex,
    element: &Element,
    options: FindReferencesOptions,
) -> Vec<Reference> {
    let mut results = Vec::new();
    if options.include_declaration {
        if let Some(declaration) = index.declaration_of(element.kind, &element.name) {
            results.push(Reference {
                file: declaration.file,
                range: declaration.range,
            });
        }
    }
    results.extend(
        index
            .references_to(element.kind, &element.name)
            .iter()
            .copied(),
    );
    results
}
