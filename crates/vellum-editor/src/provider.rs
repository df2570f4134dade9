//! Editor provider capability trait and supporting types.

use std::any::Any;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::state::StateNode;
use crate::ui_executor::UiExecutor;

/// A file known to the host platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VirtualFile {
    path: PathBuf,
}

impl VirtualFile {
    /// Creates a file handle for a path.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The file's path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The file name without its directory.
    #[must_use]
    pub fn name(&self) -> &str {
        self.path
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or_default()
    }

    /// The file extension, if any.
    #[must_use]
    pub fn extension(&self) -> Option<&str> {
        self.path.extension().and_then(|extension| extension.to_str())
    }
}

/// Placement of a provider's editor relative to the host's default editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditorPolicy {
    /// No placement preference.
    #[default]
    Default,
    /// Show before the default editor.
    PlaceBeforeDefault,
    /// Show after the default editor.
    PlaceAfterDefault,
    /// Replace the default editor entirely.
    HideDefaultEditor,
}

/// Opaque per-provider editor state.
///
/// Providers own the shape of their state; peers interact with it only
/// through the provider that produced it. Implementations expose
/// themselves through [`EditorState::as_any`] so owning providers can
/// recover their concrete type, and everyone else ignores states they
/// do not recognize.
pub trait EditorState: fmt::Debug + Send {
    /// The state as `Any`, for downcasting by the owning provider.
    fn as_any(&self) -> &dyn Any;
}

/// A constructed editor view over a file.
pub trait FileEditor: Send {
    /// Display name of the editor.
    fn name(&self) -> &str;

    /// The file this editor presents.
    fn file(&self) -> &VirtualFile;

    /// Captures the editor's current state, if it has any.
    fn state(&self) -> Option<Box<dyn EditorState>>;

    /// Applies previously captured state. Unrecognized state types are
    /// ignored.
    fn set_state(&mut self, state: &dyn EditorState);
}

/// A deferred, single-shot editor constructor.
///
/// Builders capture everything needed to construct an editor without
/// touching the UI; [`EditorBuilder::build`] performs the construction
/// on the UI thread, marshalling there first when the caller is on some
/// other thread.
pub struct EditorBuilder {
    construct: Box<dyn FnOnce(&UiExecutor) -> Box<dyn FileEditor> + Send>,
}

impl EditorBuilder {
    /// Wraps a construction closure. The closure receives the executor
    /// so composite builders can build their sub-editors in place.
    #[must_use]
    pub fn new<F>(construct: F) -> Self
    where
        F: FnOnce(&UiExecutor) -> Box<dyn FileEditor> + Send + 'static,
    {
        Self {
            construct: Box::new(construct),
        }
    }

    /// Constructs the editor on the UI thread, blocking the caller until
    /// construction completes.
    #[must_use]
    pub fn build(self, ui: &UiExecutor) -> Box<dyn FileEditor> {
        let construct = self.construct;
        let ui_handle = ui.clone();
        ui.invoke_and_wait(move || construct(&ui_handle))
    }
}

impl fmt::Debug for EditorBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EditorBuilder").finish_non_exhaustive()
    }
}

/// A factory recognized by the host platform that decides whether it
/// can open a file and constructs an editor view for it.
pub trait EditorProvider: Send + Sync {
    /// Stable identifier for this provider's editor kind.
    fn editor_type_id(&self) -> &str;

    /// Whether this provider can open the file.
    fn accept(&self, file: &VirtualFile) -> bool;

    /// Deferred editor construction.
    fn create_editor_async(&self, file: &VirtualFile) -> EditorBuilder;

    /// Constructs an editor for the file on the UI thread.
    fn create_editor(&self, file: &VirtualFile, ui: &UiExecutor) -> Box<dyn FileEditor> {
        self.create_editor_async(file).build(ui)
    }

    /// Decodes this provider's state from a persisted node.
    fn read_state(&self, source: &StateNode) -> Option<Box<dyn EditorState>>;

    /// Serializes this provider's state into a persisted node. States of
    /// a foreign type leave the target untouched.
    fn write_state(&self, state: &dyn EditorState, target: &mut StateNode);

    /// Placement relative to the host's default editor.
    fn policy(&self) -> EditorPolicy {
        EditorPolicy::Default
    }
}
