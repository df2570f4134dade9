//! Plain text sub-editor.
//!
//! The text editor is the source pane of a split Vellum editor. It
//! holds the document text and a caret offset; the caret is the only
//! state it persists.

use std::any::Any;

use text_size::TextSize;
use tracing::warn;

use crate::provider::{EditorBuilder, EditorProvider, EditorState, FileEditor, VirtualFile};
use crate::state::StateNode;

const CARET: &str = "caret";

/// Caret position state for a text editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TextEditorState {
    /// Caret offset in the document.
    pub caret: TextSize,
}

impl EditorState for TextEditorState {
    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// A minimal text editor over a file's contents.
pub struct TextEditor {
    file: VirtualFile,
    text: String,
    caret: TextSize,
}

impl TextEditor {
    /// Opens the file from disk. An unreadable file opens empty.
    #[must_use]
    pub fn open(file: VirtualFile) -> Self {
        let text = match std::fs::read_to_string(file.path()) {
            Ok(text) => text,
            Err(err) => {
                warn!("failed to read {}: {err}", file.path().display());
                String::new()
            }
        };
        Self::with_text(file, text)
    }

    /// Creates an editor over already loaded text.
    #[must_use]
    pub fn with_text(file: VirtualFile, text: impl Into<String>) -> Self {
        Self {
            file,
            text: text.into(),
            caret: TextSize::default(),
        }
    }

    /// The document text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The caret offset.
    #[must_use]
    pub fn caret(&self) -> TextSize {
        self.caret
    }

    /// Moves the caret, clamping to the end of the document.
    pub fn set_caret(&mut self, caret: TextSize) {
        self.caret = caret.min(TextSize::of(self.text.as_str()));
    }
}

impl FileEditor for TextEditor {
    fn name(&self) -> &str {
        "text"
    }

    fn file(&self) -> &VirtualFile {
        &self.file
    }

    fn state(&self) -> Option<Box<dyn EditorState>> {
        Some(Box::new(TextEditorState { caret: self.caret }))
    }

    fn set_state(&mut self, state: &dyn EditorState) {
        if let Some(state) = state.as_any().downcast_ref::<TextEditorState>() {
            self.set_caret(state.caret);
        }
    }
}

/// Provider for plain text editors over Vellum sources.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextEditorProvider;

impl TextEditorProvider {
    /// The provider's editor type identifier.
    pub const TYPE_ID: &'static str = "text-editor";
}

impl EditorProvider for TextEditorProvider {
    fn editor_type_id(&self) -> &str {
        Self::TYPE_ID
    }

    fn accept(&self, file: &VirtualFile) -> bool {
        matches!(file.extension(), Some("vlm" | "txt"))
    }

    fn create_editor_async(&self, file: &VirtualFile) -> EditorBuilder {
        let file = file.clone();
        EditorBuilder::new(move |_ui| Box::new(TextEditor::open(file)))
    }

    fn read_state(&self, source: &StateNode) -> Option<Box<dyn EditorState>> {
        let caret = source
            .attribute(CARET)
            .and_then(|value| value.parse::<u32>().ok())
            .map(TextSize::from)
            .unwrap_or_default();
        Some(Box::new(TextEditorState { caret }))
    }

    fn write_state(&self, state: &dyn EditorState, target: &mut StateNode) {
        let Some(state) = state.as_any().downcast_ref::<TextEditorState>() else {
            return;
        };
        target.set_attribute(CARET, u32::from(state.caret).to_string());
    }
}
