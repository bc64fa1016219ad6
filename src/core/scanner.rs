//! Recursive vault scanning and result rendering.
//!
//! Every scan reads the filesystem fresh. Nothing is cached between calls,
//! so concurrent or repeated invocations are independent by construction.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use walkdir::WalkDir;

use crate::error::{ConstrueError, Result};

use super::frontmatter::NoteMetadata;
use super::matcher::Query;

const SEPARATOR_WIDTH: usize = 80;

/// One note that satisfied the query, with its full content retained.
#[derive(Debug, Clone, Serialize)]
pub struct MatchedNote {
    pub path: PathBuf,
    pub content: String,
}

/// Result of a single vault scan.
///
/// `scanned` counts candidate notes that were read and evaluated; `skipped`
/// counts candidates (and walk entries) that could not be read. Skips never
/// fail the scan.
#[derive(Debug, Default)]
pub struct ScanOutcome {
    pub matches: Vec<MatchedNote>,
    pub scanned: usize,
    pub skipped: usize,
}

/// Basic statistics about a vault root, independent of any query.
#[derive(Debug, Serialize)]
pub struct VaultInfo {
    pub path: PathBuf,
    pub exists: bool,
    pub is_directory: bool,
    pub note_count: usize,
}

/// Walk `root` and collect every Markdown note whose metadata satisfies
/// `query`, in deterministic traversal order (entries sorted by file name,
/// directories descended in place).
///
/// Fails only when the request itself is broken: `root` missing or not a
/// directory. Per-file problems are counted and skipped.
pub fn scan_vault(root: &Path, query: &Query) -> Result<ScanOutcome> {
    if !root.exists() {
        return Err(ConstrueError::VaultNotFound(root.to_path_buf()));
    }
    if !root.is_dir() {
        return Err(ConstrueError::NotADirectory(root.to_path_buf()));
    }
    let root = root.canonicalize()?;

    let mut outcome = ScanOutcome::default();
    for entry in WalkDir::new(&root).sort_by_file_name() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(_) => {
                outcome.skipped += 1;
                continue;
            }
        };

        if !entry.file_type().is_file() || !is_markdown(entry.path()) {
            continue;
        }

        let content = match fs::read_to_string(entry.path()) {
            Ok(content) => content,
            Err(_) => {
                outcome.skipped += 1;
                continue;
            }
        };
        outcome.scanned += 1;

        let metadata = NoteMetadata::parse(&content);
        if query.matches(&metadata) {
            outcome.matches.push(MatchedNote {
                path: entry.into_path(),
                content,
            });
        }
    }

    Ok(outcome)
}

fn is_markdown(path: &Path) -> bool {
    path.extension().and_then(|ext| ext.to_str()) == Some("md")
}

/// Render matched notes as a single text block: an `=` rule, the file path,
/// another rule, then the content, for each match in order.
pub fn concatenate(matches: &[MatchedNote]) -> String {
    if matches.is_empty() {
        return "No matching files found.".to_string();
    }

    let rule = "=".repeat(SEPARATOR_WIDTH);
    let mut sections = Vec::with_capacity(matches.len() * 4);
    for note in matches {
        sections.push(rule.clone());
        sections.push(note.path.display().to_string());
        sections.push(rule.clone());
        sections.push(note.content.clone());
    }
    sections.join("\n")
}

/// Gather statistics about a vault root without applying any query.
pub fn vault_info(root: &Path) -> VaultInfo {
    let exists = root.exists();
    let is_directory = root.is_dir();
    let note_count = if is_directory {
        WalkDir::new(root)
            .into_iter()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().is_file() && is_markdown(entry.path()))
            .count()
    } else {
        0
    };

    VaultInfo {
        path: root.to_path_buf(),
        exists,
        is_directory,
        note_count,
    }
}
