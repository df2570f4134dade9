//! Provider registry and selection.

use std::sync::Arc;

use parking_lot::RwLock;

use crate::provider::{EditorPolicy, EditorProvider, VirtualFile};

/// Editor providers known to the host, in registration order.
#[derive(Default)]
pub struct ProviderRegistry {
    providers: RwLock<Vec<Arc<dyn EditorProvider>>>,
}

impl ProviderRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a provider.
    pub fn register(&self, provider: Arc<dyn EditorProvider>) {
        self.providers.write().push(provider);
    }

    /// All providers accepting the file, in registration order.
    #[must_use]
    pub fn accepting_providers(&self, file: &VirtualFile) -> Vec<Arc<dyn EditorProvider>> {
        self.providers
            .read()
            .iter()
            .filter(|provider| provider.accept(file))
            .cloned()
            .collect()
    }

    /// Selects the provider that should open the file: the first
    /// accepting provider that hides the default editor wins, otherwise
    /// the first accepting provider.
    #[must_use]
    pub fn select_provider(&self, file: &VirtualFile) -> Option<Arc<dyn EditorProvider>> {
        let accepting = self.accepting_providers(file);
        accepting
            .iter()
            .find(|provider| provider.policy() == EditorPolicy::HideDefaultEditor)
            .cloned()
            .or_else(|| accepting.first().cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::split::SplitEditorProvider;
    use crate::text_editor::TextEditorProvider;

    #[test]
    fn split_provider_outranks_plain_provider() {
        let registry = ProviderRegistry::new();
        let text: Arc<dyn EditorProvider> = Arc::new(TextEditorProvider);
        registry.register(text.clone());
        registry.register(Arc::new(SplitEditorProvider::new(text.clone(), text)));

        let file = VirtualFile::new("guide.vlm");
        let selected = registry.select_provider(&file).unwrap();
        assert_eq!(selected.policy(), EditorPolicy::HideDefaultEditor);
        assert_eq!(
            selected.editor_type_id(),
            "split-provider[text-editor;text-editor]"
        );
    }

    #[test]
    fn no_provider_for_unaccepted_file() {
        let registry = ProviderRegistry::new();
        registry.register(Arc::new(TextEditorProvider));

        assert!(registry.select_provider(&VirtualFile::new("image.png")).is_none());
        assert!(registry
            .accepting_providers(&VirtualFile::new("image.png"))
            .is_empty());
    }
}
