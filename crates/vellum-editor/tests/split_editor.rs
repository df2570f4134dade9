//! Integration tests for split editor composition and state persistence.

use std::any::Any;
use std::sync::Arc;
use std::thread::{self, ThreadId};

use smol_str::SmolStr;
use text_size::TextSize;

use vellum_editor::{
    EditorBuilder, EditorPolicy, EditorProvider, EditorState, FileEditor, SplitEditor,
    SplitEditorProvider, SplitEditorState, SplitLayout, StateNode, TextEditorProvider,
    TextEditorState, UiExecutor, VirtualFile,
};

fn split_provider() -> SplitEditorProvider {
    let text: Arc<dyn EditorProvider> = Arc::new(TextEditorProvider);
    SplitEditorProvider::new(text.clone(), text)
}

fn caret_state(offset: u32) -> Box<dyn EditorState> {
    Box::new(TextEditorState {
        caret: TextSize::from(offset),
    })
}

fn caret_of(state: &dyn EditorState) -> TextSize {
    state
        .as_any()
        .downcast_ref::<TextEditorState>()
        .expect("text editor state")
        .caret
}

fn read_composite(provider: &SplitEditorProvider, node: &StateNode) -> SplitEditorState {
    let state = provider.read_state(node).expect("composite state");
    let state = state
        .as_any()
        .downcast_ref::<SplitEditorState>()
        .expect("split state");
    SplitEditorState {
        layout: state.layout.clone(),
        first: state.first.as_ref().map(|s| {
            caret_state(u32::from(caret_of(s.as_ref())))
        }),
        second: state.second.as_ref().map(|s| {
            caret_state(u32::from(caret_of(s.as_ref())))
        }),
    }
}

#[test]
fn editor_type_id_concatenates_delegate_ids() {
    assert_eq!(
        split_provider().editor_type_id(),
        "split-provider[text-editor;text-editor]"
    );
}

#[test]
fn accept_requires_both_delegates() {
    struct NeverProvider;
    impl EditorProvider for NeverProvider {
        fn editor_type_id(&self) -> &str {
            "never"
        }
        fn accept(&self, _file: &VirtualFile) -> bool {
            false
        }
        fn create_editor_async(&self, _file: &VirtualFile) -> EditorBuilder {
            unreachable!("never accepts")
        }
        fn read_state(&self, _source: &StateNode) -> Option<Box<dyn EditorState>> {
            None
        }
        fn write_state(&self, _state: &dyn EditorState, _target: &mut StateNode) {}
    }

    let file = VirtualFile::new("guide.vlm");
    assert!(split_provider().accept(&file));

    let text: Arc<dyn EditorProvider> = Arc::new(TextEditorProvider);
    let half = SplitEditorProvider::new(text, Arc::new(NeverProvider));
    assert!(!half.accept(&file));
}

#[test]
fn split_provider_hides_default_editor() {
    assert_eq!(split_provider().policy(), EditorPolicy::HideDefaultEditor);
}

#[test]
fn state_round_trips_for_every_presence_combination() {
    let provider = split_provider();

    let combinations: &[(Option<u32>, Option<u32>, Option<&str>)] = &[
        (Some(3), Some(14), Some("split")),
        (Some(3), None, Some("first")),
        (None, Some(14), None),
        (None, None, Some("second")),
        (None, None, None),
    ];

    for &(first, second, layout) in combinations {
        let state = SplitEditorState {
            layout: layout.map(SmolStr::new),
            first: first.map(caret_state),
            second: second.map(caret_state),
        };

        let mut node = StateNode::new("split_state");
        provider.write_state(&state, &mut node);

        // Absent sub-states must produce no child node at all.
        assert_eq!(node.child("first_editor").is_some(), first.is_some());
        assert_eq!(node.child("second_editor").is_some(), second.is_some());
        assert_eq!(node.attribute("split_layout"), layout);

        let read_back = read_composite(&provider, &node);
        assert_eq!(read_back.layout.as_deref(), layout);
        assert_eq!(
            read_back.first.as_ref().map(|s| caret_of(s.as_ref())),
            first.map(TextSize::from)
        );
        assert_eq!(
            read_back.second.as_ref().map(|s| caret_of(s.as_ref())),
            second.map(TextSize::from)
        );
    }
}

#[test]
fn state_survives_serialization_to_xml_text() {
    let provider = split_provider();
    let state = SplitEditorState {
        layout: Some(SmolStr::new("split")),
        first: Some(caret_state(7)),
        second: Some(caret_state(0)),
    };

    let mut node = StateNode::new("split_state");
    provider.write_state(&state, &mut node);

    let reparsed = StateNode::parse(&node.to_xml()).expect("well-formed state");
    let read_back = read_composite(&provider, &reparsed);
    assert_eq!(read_back.layout.as_deref(), Some("split"));
    assert_eq!(
        read_back.first.map(|s| caret_of(s.as_ref())),
        Some(TextSize::from(7))
    );
    assert_eq!(
        read_back.second.map(|s| caret_of(s.as_ref())),
        Some(TextSize::from(0))
    );
}

#[test]
fn unknown_layout_names_round_trip_opaquely() {
    let provider = split_provider();
    let state = SplitEditorState {
        layout: Some(SmolStr::new("diagonal")),
        first: None,
        second: None,
    };

    let mut node = StateNode::new("split_state");
    provider.write_state(&state, &mut node);

    let read_back = read_composite(&provider, &node);
    assert_eq!(read_back.layout.as_deref(), Some("diagonal"));
}

#[test]
fn foreign_state_leaves_target_untouched() {
    let provider = split_provider();
    let mut node = StateNode::new("split_state");
    provider.write_state(
        &TextEditorState {
            caret: TextSize::from(5),
        },
        &mut node,
    );
    assert!(node.is_empty());
}

#[derive(Debug)]
struct RecordedState {
    built_on: ThreadId,
}

impl EditorState for RecordedState {
    fn as_any(&self) -> &dyn Any {
        self
    }
}

struct RecordingEditor {
    file: VirtualFile,
    built_on: ThreadId,
}

impl FileEditor for RecordingEditor {
    fn name(&self) -> &str {
        "recording"
    }
    fn file(&self) -> &VirtualFile {
        &self.file
    }
    fn state(&self) -> Option<Box<dyn EditorState>> {
        Some(Box::new(RecordedState {
            built_on: self.built_on,
        }))
    }
    fn set_state(&mut self, _state: &dyn EditorState) {}
}

struct RecordingProvider;

impl EditorProvider for RecordingProvider {
    fn editor_type_id(&self) -> &str {
        "recording"
    }
    fn accept(&self, _file: &VirtualFile) -> bool {
        true
    }
    fn create_editor_async(&self, file: &VirtualFile) -> EditorBuilder {
        let file = file.clone();
        EditorBuilder::new(move |_ui| {
            Box::new(RecordingEditor {
                file,
                built_on: thread::current().id(),
            })
        })
    }
    fn read_state(&self, _source: &StateNode) -> Option<Box<dyn EditorState>> {
        None
    }
    fn write_state(&self, _state: &dyn EditorState, _target: &mut StateNode) {}
}

fn built_on_of(editor: &dyn FileEditor) -> ThreadId {
    let state = editor.state().expect("composite state");
    let state = state
        .as_any()
        .downcast_ref::<SplitEditorState>()
        .expect("split state");
    state
        .first
        .as_ref()
        .expect("first sub-state")
        .as_any()
        .downcast_ref::<RecordedState>()
        .expect("recorded state")
        .built_on
}

#[test]
fn construction_is_marshalled_onto_the_ui_thread() {
    let ui = UiExecutor::new().unwrap();
    let recording: Arc<dyn EditorProvider> = Arc::new(RecordingProvider);
    let provider = SplitEditorProvider::new(recording.clone(), recording);
    let file = VirtualFile::new("guide.vlm");

    // Calling from a non-UI thread blocks and constructs over there.
    let editor = provider.create_editor(&file, &ui);
    let ui_thread = ui.invoke_and_wait(thread_id);
    assert_eq!(built_on_of(editor.as_ref()), ui_thread);
    assert_ne!(built_on_of(editor.as_ref()), thread::current().id());
    assert_eq!(editor.name(), "recording and recording");
}

#[test]
fn construction_on_the_ui_thread_runs_inline() {
    let ui = UiExecutor::new().unwrap();
    let recording: Arc<dyn EditorProvider> = Arc::new(RecordingProvider);
    let provider = SplitEditorProvider::new(recording.clone(), recording);
    let file = VirtualFile::new("guide.vlm");

    let ui_handle = ui.clone();
    let built_on = ui.invoke_and_wait(move || {
        let editor = provider.create_editor(&file, &ui_handle);
        built_on_of(editor.as_ref())
    });
    assert_eq!(built_on, ui.invoke_and_wait(thread_id));
}

fn thread_id() -> ThreadId {
    thread::current().id()
}

#[test]
fn configured_default_layout_applies_to_new_editors() {
    let config = vellum_editor::WorkspaceConfig::from_contents(
        std::path::Path::new("/workspace"),
        None,
        "[editor]\ndefault_layout = \"first\"\n",
    );
    let ui = UiExecutor::new().unwrap();
    let provider = split_provider().with_default_layout(config.editor.default_layout);
    let editor = provider.create_editor(&VirtualFile::new("guide.vlm"), &ui);

    let state = editor.state().expect("composite state");
    let state = state
        .as_any()
        .downcast_ref::<SplitEditorState>()
        .expect("split state");
    assert_eq!(state.layout.as_deref(), Some("first"));
}

#[test]
fn split_editor_applies_composite_state() {
    let ui = UiExecutor::new().unwrap();
    let provider = split_provider();
    let file = VirtualFile::new("guide.vlm");
    let mut editor = provider.create_editor(&file, &ui);

    editor.set_state(&SplitEditorState {
        layout: Some(SmolStr::new("second")),
        first: Some(caret_state(0)),
        second: Some(caret_state(0)),
    });

    let state = editor.state().expect("composite state");
    let state = state
        .as_any()
        .downcast_ref::<SplitEditorState>()
        .expect("split state");
    assert_eq!(state.layout.as_deref(), Some("second"));
}

#[test]
fn split_editor_keeps_layout_on_unknown_name() {
    let first: Box<dyn FileEditor> = Box::new(RecordingEditor {
        file: VirtualFile::new("guide.vlm"),
        built_on: thread::current().id(),
    });
    let second: Box<dyn FileEditor> = Box::new(RecordingEditor {
        file: VirtualFile::new("guide.vlm"),
        built_on: thread::current().id(),
    });
    let mut editor = SplitEditor::new(first, second, SplitLayout::Split);

    editor.set_state(&SplitEditorState {
        layout: Some(SmolStr::new("diagonal")),
        first: None,
        second: None,
    });
    assert_eq!(editor.layout(), SplitLayout::Split);

    editor.set_state(&SplitEditorState {
        layout: Some(SmolStr::new("first")),
        first: None,
        second: None,
    });
    assert_eq!(editor.layout(), SplitLayout::FirstOnly);
}
