//! Core frontmatter filtering engine.
//!
//! Everything here is pure vault logic with no knowledge of the CLI or MCP
//! surfaces: property values, frontmatter parsing, query matching, context
//! resolution, and the vault scan itself.

pub mod context;
pub mod frontmatter;
pub mod matcher;
pub mod scanner;
pub mod value;

pub use context::{resolve_context, ContextMapping};
pub use frontmatter::NoteMetadata;
pub use matcher::{Query, TagMatch};
pub use scanner::{concatenate, scan_vault, vault_info, MatchedNote, ScanOutcome, VaultInfo};
pub use value::PropertyValue;
