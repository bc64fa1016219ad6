//! construe library
//!
//! Obsidian vault context loading via frontmatter filtering.
//!
//! # Modules
//!
//! - `core`: Frontmatter parsing, query matching, context resolution, vault scanning
//! - `config`: Configuration file loading and vault validation
//! - `error`: Error types

pub mod config;
pub mod core;
pub mod error;

// Re-exports for convenience
pub use config::{ensure_vault, Config};
pub use core::frontmatter::NoteMetadata;
pub use core::matcher::{Query, TagMatch};
pub use core::scanner::{concatenate, scan_vault, vault_info, MatchedNote, ScanOutcome, VaultInfo};
pub use core::value::PropertyValue;
pub use error::{ConstrueError, Result};
