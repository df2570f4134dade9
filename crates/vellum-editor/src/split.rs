//! Split editor composition: two sub-editors over the same file.

use std::any::Any;
use std::sync::Arc;

use smol_str::SmolStr;

use crate::provider::{
    EditorBuilder, EditorPolicy, EditorProvider, EditorState, FileEditor, VirtualFile,
};
use crate::state::StateNode;

const FIRST_EDITOR: &str = "first_editor";
const SECOND_EDITOR: &str = "second_editor";
const SPLIT_LAYOUT: &str = "split_layout";

/// Which panes of a split editor are visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SplitLayout {
    /// Only the first sub-editor.
    FirstOnly,
    /// Only the second sub-editor.
    SecondOnly,
    /// Both sub-editors side by side.
    #[default]
    Split,
}

impl SplitLayout {
    /// The layout name as persisted in editor state.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            SplitLayout::FirstOnly => "first",
            SplitLayout::SecondOnly => "second",
            SplitLayout::Split => "split",
        }
    }

    /// Parses a persisted layout name.
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "first" => Some(SplitLayout::FirstOnly),
            "second" => Some(SplitLayout::SecondOnly),
            "split" => Some(SplitLayout::Split),
            _ => None,
        }
    }
}

/// Composite state for a split editor.
///
/// The layout is kept as the persisted string so unknown names survive
/// a read/write cycle unchanged.
#[derive(Debug, Default)]
pub struct SplitEditorState {
    /// The persisted layout name, if any.
    pub layout: Option<SmolStr>,
    /// The first sub-editor's state, if any.
    pub first: Option<Box<dyn EditorState>>,
    /// The second sub-editor's state, if any.
    pub second: Option<Box<dyn EditorState>>,
}

impl EditorState for SplitEditorState {
    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Composes two editor providers into a dual-pane editor provider.
///
/// The composite accepts a file only when both delegates accept it, and
/// it persists each delegate's state under its own child node so the
/// delegates never see each other's data.
pub struct SplitEditorProvider {
    first: Arc<dyn EditorProvider>,
    second: Arc<dyn EditorProvider>,
    editor_type_id: String,
    default_layout: SplitLayout,
}

impl SplitEditorProvider {
    /// Composes two providers.
    #[must_use]
    pub fn new(first: Arc<dyn EditorProvider>, second: Arc<dyn EditorProvider>) -> Self {
        let editor_type_id = format!(
            "split-provider[{};{}]",
            first.editor_type_id(),
            second.editor_type_id()
        );
        Self {
            first,
            second,
            editor_type_id,
            default_layout: SplitLayout::default(),
        }
    }

    /// Overrides the layout used when no persisted layout is present.
    #[must_use]
    pub fn with_default_layout(mut self, layout: SplitLayout) -> Self {
        self.default_layout = layout;
        self
    }
}

impl EditorProvider for SplitEditorProvider {
    fn editor_type_id(&self) -> &str {
        &self.editor_type_id
    }

    fn accept(&self, file: &VirtualFile) -> bool {
        self.first.accept(file) && self.second.accept(file)
    }

    fn create_editor_async(&self, file: &VirtualFile) -> EditorBuilder {
        // Obtain the delegates' builders eagerly; only construction is
        // deferred to the UI thread.
        let first_builder = self.first.create_editor_async(file);
        let second_builder = self.second.create_editor_async(file);
        let layout = self.default_layout;
        EditorBuilder::new(move |ui| {
            let first = first_builder.build(ui);
            let second = second_builder.build(ui);
            Box::new(SplitEditor::new(first, second, layout))
        })
    }

    fn read_state(&self, source: &StateNode) -> Option<Box<dyn EditorState>> {
        let first = source
            .child(FIRST_EDITOR)
            .and_then(|child| self.first.read_state(child));
        let second = source
            .child(SECOND_EDITOR)
            .and_then(|child| self.second.read_state(child));
        let layout = source.attribute(SPLIT_LAYOUT).map(SmolStr::new);

        Some(Box::new(SplitEditorState {
            layout,
            first,
            second,
        }))
    }

    fn write_state(&self, state: &dyn EditorState, target: &mut StateNode) {
        let Some(composite) = state.as_any().downcast_ref::<SplitEditorState>() else {
            return;
        };

        if let Some(first) = &composite.first {
            let mut child = StateNode::new(FIRST_EDITOR);
            self.first.write_state(first.as_ref(), &mut child);
            target.add_child(child);
        }
        if let Some(second) = &composite.second {
            let mut child = StateNode::new(SECOND_EDITOR);
            self.second.write_state(second.as_ref(), &mut child);
            target.add_child(child);
        }
        if let Some(layout) = &composite.layout {
            target.set_attribute(SPLIT_LAYOUT, layout.as_str());
        }
    }

    fn policy(&self) -> EditorPolicy {
        EditorPolicy::HideDefaultEditor
    }
}

/// A dual-pane editor presenting two sub-editors simultaneously.
pub struct SplitEditor {
    first: Box<dyn FileEditor>,
    second: Box<dyn FileEditor>,
    layout: SplitLayout,
    name: String,
}

impl SplitEditor {
    /// Builds the composite from two constructed sub-editors.
    #[must_use]
    pub fn new(first: Box<dyn FileEditor>, second: Box<dyn FileEditor>, layout: SplitLayout) -> Self {
        let name = format!("{} and {}", first.name(), second.name());
        Self {
            first,
            second,
            layout,
            name,
        }
    }

    /// The active layout.
    #[must_use]
    pub fn layout(&self) -> SplitLayout {
        self.layout
    }

    /// Changes the active layout.
    pub fn set_layout(&mut self, layout: SplitLayout) {
        self.layout = layout;
    }

    /// The first sub-editor.
    #[must_use]
    pub fn first(&self) -> &dyn FileEditor {
        self.first.as_ref()
    }

    /// The second sub-editor.
    #[must_use]
    pub fn second(&self) -> &dyn FileEditor {
        self.second.as_ref()
    }
}

impl FileEditor for SplitEditor {
    fn name(&self) -> &str {
        &self.name
    }

    fn file(&self) -> &VirtualFile {
        self.first.file()
    }

    fn state(&self) -> Option<Box<dyn EditorState>> {
        Some(Box::new(SplitEditorState {
            layout: Some(SmolStr::new(self.layout.as_str())),
            first: self.first.state(),
            second: self.second.state(),
        }))
    }

    fn set_state(&mut self, state: &dyn EditorState) {
        let Some(composite) = state.as_any().downcast_ref::<SplitEditorState>() else {
            return;
        };

        if let Some(first) = &composite.first {
            self.first.set_state(first.as_ref());
        }
        if let Some(second) = &composite.second {
            self.second.set_state(second.as_ref());
        }
        if let Some(layout) = composite.layout.as_deref().and_then(SplitLayout::parse) {
            self.layout = layout;
        }
    }
}
