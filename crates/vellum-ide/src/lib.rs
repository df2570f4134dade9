//! `vellum-ide` - IDE features for Vellum markup documents.
//!
//! This crate provides IDE functionality built on top of
//! `vellum-model`:
//!
//! - **Rename**: safe renaming of attribute declarations and include
//!   tags, with input validation
//! - **Find References**: all usages of a declared name
//!
//! # Architecture
//!
//! All IDE features are implemented as pure functions that take the
//! element index and element parameters, making them easy to test and
//! compose.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![allow(clippy::module_name_repetitions)]

pub mod references;
pub mod rename;

pub use references::{find_references, FindReferencesOptions};
pub use rename::{
    is_input_valid, prepare_rename, rename, rename_target_pattern, RenameResult, TextEdit,
};
