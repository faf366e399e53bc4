//! deckpack library.
//!
//! This crate provides the core functionality for scaffolding, validating,
//! and packing Stream Deck plugins. It is used by the `deckpack` CLI binary
//! and can be consumed programmatically for testing or custom packaging
//! workflows.
//!
//! # Modules
//!
//! - [`archive`] - Zip archive construction with ignore filtering
//! - [`autoversion`] - Versioned output directory resolution
//! - [`cli`] - Command-line argument definitions
//! - [`error`] - Semantic error types and exit-code mapping
//! - [`ignorefile`] - `.packignore` loading and match testing
//! - [`manifest`] - Manifest model and validation
//! - [`output`] - User-facing message formatting
//! - [`pipeline`] - Pack pipeline orchestration
//! - [`plugin_uuid`] - Validated plugin identifier newtype
//! - [`plugin_version`] - Validated plugin version newtype
//! - [`scaffold`] - Project scaffolding from the template repository
//! - [`walk`] - Ignore-filtered directory traversal

pub mod archive;
pub mod autoversion;
pub mod cli;
pub mod error;
pub mod ignorefile;
pub mod manifest;
pub mod output;
pub mod pipeline;
pub mod plugin_uuid;
pub mod plugin_version;
pub mod scaffold;
pub mod walk;
