//! `vellum-editor` - editor composition framework for Vellum documents.
//!
//! This crate provides the host-facing editor plumbing for Vellum
//! markup support:
//!
//! - **Providers**: the [`EditorProvider`] capability trait implemented
//!   polymorphically by variant editor kinds
//! - **Split editors**: [`SplitEditorProvider`] composes two providers
//!   into a dual-pane editor (e.g. source next to a rendered preview)
//! - **State persistence**: editor session state as an XML-like
//!   [`StateNode`] tree with a round-trippable codec
//! - **UI-thread affinity**: [`UiExecutor`] marshals editor construction
//!   onto the thread that owns the UI
//! - **Configuration**: workspace settings from `vellum.toml`
//!
//! # Architecture
//!
//! Providers are narrow trait objects so hosts and tests can inject
//! lightweight implementations. Editor construction is deferred through
//! [`EditorBuilder`]; `build` is the only place editors come to life,
//! and it always completes on the UI thread.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod provider;
pub mod registry;
pub mod split;
pub mod state;
pub mod text_editor;
pub mod ui_executor;

pub use config::{EditorSettings, WorkspaceConfig};
pub use provider::{
    EditorBuilder, EditorPolicy, EditorProvider, EditorState, FileEditor, VirtualFile,
};
pub use registry::ProviderRegistry;
pub use split::{SplitEditor, SplitEditorProvider, SplitEditorState, SplitLayout};
pub use state::{read_state_file, write_state_file, StateError, StateNode};
pub use text_editor::{TextEditor, TextEditorProvider, TextEditorState};
pub use ui_executor::UiExecutor;
