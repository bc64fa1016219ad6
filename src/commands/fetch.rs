use std::path::{Path, PathBuf};

use anyhow::Result;
use colored::*;

use crate::config::Config;
use crate::core::{concatenate, resolve_context, scan_vault, ContextMapping, PropertyValue, Query, TagMatch};

pub fn run(
    config_path: &Path,
    context: Option<String>,
    properties: Vec<String>,
    tags: Vec<String>,
    all_tags: bool,
    vault: Option<PathBuf>,
    dry_run: bool,
    json: bool,
) -> Result<()> {
    let config = Config::load(config_path)?;
    let vault_path = vault.unwrap_or_else(|| config.vault_path.clone());

    let query = build_query(
        context.as_deref(),
        &config.contexts,
        &properties,
        &tags,
        all_tags,
    );
    let outcome = scan_vault(&vault_path, &query)?;

    if outcome.skipped > 0 {
        eprintln!(
            "{} {} file(s) could not be read and were skipped",
            "Warning:".yellow(),
            outcome.skipped
        );
    }

    if dry_run {
        let paths: Vec<String> = outcome
            .matches
            .iter()
            .map(|m| m.path.display().to_string())
            .collect();

        if json {
            println!("{}", serde_json::to_string_pretty(&paths)?);
        } else {
            println!("{}", "Matching Files".bold());
            println!("{}", "=".repeat(60));
            for path in &paths {
                println!("{}", path);
            }
            println!();
            println!(
                "Found: {} of {} notes scanned",
                outcome.matches.len(),
                outcome.scanned
            );
        }
    } else if json {
        println!("{}", serde_json::to_string_pretty(&outcome.matches)?);
    } else {
        println!("{}", concatenate(&outcome.matches));
    }

    Ok(())
}

/// Assemble the query for one fetch invocation. A named context takes the
/// configured mapping; otherwise explicit flags are combined. `-p` values
/// stay text (typed values come in through the MCP tools); a flag without
/// `key=value` shape is warned about and ignored.
fn build_query(
    context: Option<&str>,
    contexts: &ContextMapping,
    properties: &[String],
    tags: &[String],
    all_tags: bool,
) -> Query {
    if let Some(name) = context {
        return resolve_context(name, contexts);
    }

    let mut query = Query::default();
    for pair in properties {
        match pair.split_once('=') {
            Some((key, value)) if !key.is_empty() => {
                query
                    .properties
                    .insert(key.to_string(), PropertyValue::Text(value.to_string()));
            }
            _ => {
                eprintln!(
                    "{} ignoring invalid property '{}', expected key=value",
                    "Warning:".yellow(),
                    pair
                );
            }
        }
    }
    query.tags = tags.iter().map(|t| t.to_string()).collect();
    query.tag_match = if all_tags { TagMatch::All } else { TagMatch::Any };
    query
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_query_from_flags() {
        let query = build_query(
            None,
            &ContextMapping::new(),
            &["type=journal".to_string(), "year=2024".to_string()],
            &["personal".to_string()],
            true,
        );

        assert_eq!(
            query.properties.get("type"),
            Some(&PropertyValue::Text("journal".to_string()))
        );
        assert_eq!(
            query.properties.get("year"),
            Some(&PropertyValue::Text("2024".to_string()))
        );
        assert!(query.tags.contains("personal"));
        assert_eq!(query.tag_match, TagMatch::All);
    }

    #[test]
    fn test_build_query_ignores_malformed_pairs() {
        let query = build_query(
            None,
            &ContextMapping::new(),
            &["no-equals-sign".to_string(), "=empty-key".to_string()],
            &[],
            false,
        );

        assert!(query.is_empty());
    }

    #[test]
    fn test_build_query_value_may_contain_equals() {
        let query = build_query(
            None,
            &ContextMapping::new(),
            &["formula=a=b".to_string()],
            &[],
            false,
        );

        assert_eq!(
            query.properties.get("formula"),
            Some(&PropertyValue::Text("a=b".to_string()))
        );
    }

    #[test]
    fn test_build_query_from_context_name() {
        let mut contexts = ContextMapping::new();
        let mut personal = Query::default();
        personal
            .properties
            .insert("context".to_string(), PropertyValue::Text("personal".to_string()));
        contexts.insert("personal".to_string(), personal);

        let query = build_query(Some("personal"), &contexts, &[], &[], false);
        assert_eq!(
            query.properties.get("context"),
            Some(&PropertyValue::Text("personal".to_string()))
        );

        let query = build_query(Some("unknown"), &contexts, &[], &[], false);
        assert!(query.is_empty());
    }
}
