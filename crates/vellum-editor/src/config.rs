//! Workspace configuration for Vellum editor support.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::warn;

use crate::split::SplitLayout;

pub(crate) const CONFIG_FILES: &[&str] = &["vellum.toml", ".vellum.toml"];

/// Workspace configuration loaded from `vellum.toml`.
#[derive(Debug, Clone)]
pub struct WorkspaceConfig {
    /// Root directory for the workspace.
    pub root: PathBuf,
    /// Config file path (if found).
    pub config_path: Option<PathBuf>,
    /// Editor settings.
    pub editor: EditorSettings,
}

/// Settings from the `[editor]` section.
#[derive(Debug, Clone)]
pub struct EditorSettings {
    /// Layout used when a split editor has no persisted layout.
    pub default_layout: SplitLayout,
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            default_layout: SplitLayout::Split,
        }
    }
}

impl WorkspaceConfig {
    /// Loads configuration for a workspace root. Missing, unreadable,
    /// or unparsable config files fall back to defaults with a warning.
    #[must_use]
    pub fn load(root: &Path) -> Self {
        let config_path = find_config_file(root);
        let Some(path) = config_path.clone() else {
            return WorkspaceConfig::base(root, None);
        };
        let Ok(contents) = std::fs::read_to_string(&path) else {
            warn!("failed to read vellum config at {}", path.display());
            return WorkspaceConfig::base(root, config_path);
        };
        WorkspaceConfig::from_contents(root, config_path, &contents)
    }

    /// Parses configuration from already loaded contents.
    #[must_use]
    pub fn from_contents(root: &Path, config_path: Option<PathBuf>, contents: &str) -> Self {
        let mut config = WorkspaceConfig::base(root, config_path);
        let parsed: ConfigFile = match toml::from_str(contents) {
            Ok(parsed) => parsed,
            Err(err) => {
                if let Some(path) = &config.config_path {
                    warn!("failed to parse vellum config at {}: {err}", path.display());
                } else {
                    warn!("failed to parse vellum config: {err}");
                }
                return config;
            }
        };

        if let Some(layout_name) = &parsed.editor.default_layout {
            match SplitLayout::parse(layout_name) {
                Some(layout) => config.editor.default_layout = layout,
                None => warn!("unknown split layout '{layout_name}' in vellum config"),
            }
        }

        config
    }

    fn base(root: &Path, config_path: Option<PathBuf>) -> Self {
        Self {
            root: root.to_path_buf(),
            config_path,
            editor: EditorSettings::default(),
        }
    }
}

fn find_config_file(root: &Path) -> Option<PathBuf> {
    CONFIG_FILES
        .iter()
        .map(|name| root.join(name))
        .find(|candidate| candidate.is_file())
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ConfigFile {
    editor: EditorSection,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct EditorSection {
    default_layout: Option<String>,
}
