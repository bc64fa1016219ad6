//! Frontmatter extraction and metadata parsing.
//!
//! A note's metadata lives in a YAML block delimited by `---` lines at the
//! very top of the file. Anything that deviates from that shape (no block,
//! delimiter not on the first line, unterminated block, YAML that fails to
//! parse or is not a mapping) degrades to empty metadata rather than an
//! error. Empty metadata still matches the empty query.

use std::collections::{BTreeMap, BTreeSet};

use lazy_static::lazy_static;
use regex::Regex;

use super::value::PropertyValue;

lazy_static! {
    static ref FRONTMATTER_RE: Regex =
        Regex::new(r"(?s)^---[ \t]*\r?\n(.*?)\r?\n---[ \t]*\r?(?:\n|$)").unwrap();
}

/// Parsed metadata of a single note: named properties plus the tag set.
///
/// The `tags` key is pulled out of the property map entirely. A scalar
/// string under `tags` becomes a single-element set; list elements that are
/// not strings are dropped.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct NoteMetadata {
    pub properties: BTreeMap<String, PropertyValue>,
    pub tags: BTreeSet<String>,
}

impl NoteMetadata {
    /// Parse metadata out of full note content.
    ///
    /// Never fails: every malformed shape yields `NoteMetadata::default()`.
    /// Properties whose values fall outside the supported set (null, nested
    /// mappings) are absent from the result, as are non-string keys.
    pub fn parse(content: &str) -> Self {
        let caps = match FRONTMATTER_RE.captures(content) {
            Some(caps) => caps,
            None => return Self::default(),
        };
        let raw = match caps.get(1) {
            Some(m) => m.as_str(),
            None => return Self::default(),
        };

        let mapping = match serde_yaml::from_str::<serde_yaml::Value>(raw) {
            Ok(serde_yaml::Value::Mapping(mapping)) => mapping,
            _ => return Self::default(),
        };

        let mut metadata = Self::default();
        for (key, value) in &mapping {
            let key = match key.as_str() {
                Some(key) => key,
                None => continue,
            };

            if key == "tags" {
                metadata.tags = Self::extract_tags(value);
                continue;
            }

            if let Some(converted) = PropertyValue::from_yaml(value) {
                metadata.properties.insert(key.to_string(), converted);
            }
        }

        metadata
    }

    fn extract_tags(value: &serde_yaml::Value) -> BTreeSet<String> {
        match value {
            serde_yaml::Value::String(tag) => {
                let mut tags = BTreeSet::new();
                tags.insert(tag.clone());
                tags
            }
            serde_yaml::Value::Sequence(items) => items
                .iter()
                .filter_map(|item| item.as_str().map(|tag| tag.to_string()))
                .collect(),
            _ => BTreeSet::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_properties_and_tags() {
        let content = "---\ntype: journal\nrating: 5\ntags:\n  - personal\n  - health\n---\n# Note body\n";
        let metadata = NoteMetadata::parse(content);

        assert_eq!(
            metadata.properties.get("type"),
            Some(&PropertyValue::Text("journal".to_string()))
        );
        assert_eq!(
            metadata.properties.get("rating"),
            Some(&PropertyValue::Integer(5))
        );
        assert!(metadata.tags.contains("personal"));
        assert!(metadata.tags.contains("health"));
        assert_eq!(metadata.tags.len(), 2);
    }

    #[test]
    fn test_tags_never_appear_as_property() {
        let content = "---\ntags: [a, b]\n---\n";
        let metadata = NoteMetadata::parse(content);

        assert!(metadata.properties.get("tags").is_none());
        assert_eq!(metadata.tags.len(), 2);
    }

    #[test]
    fn test_scalar_tags_coerce_to_single_element_set() {
        let content = "---\ntags: personal\n---\nbody\n";
        let metadata = NoteMetadata::parse(content);

        assert_eq!(metadata.tags.len(), 1);
        assert!(metadata.tags.contains("personal"));
    }

    #[test]
    fn test_non_string_tag_elements_are_dropped() {
        let content = "---\ntags: [personal, 3, true]\n---\n";
        let metadata = NoteMetadata::parse(content);

        assert_eq!(metadata.tags.len(), 1);
        assert!(metadata.tags.contains("personal"));
    }

    #[test]
    fn test_no_frontmatter_is_empty() {
        let metadata = NoteMetadata::parse("# Just a heading\n\nSome text.\n");
        assert!(metadata.properties.is_empty());
        assert!(metadata.tags.is_empty());
    }

    #[test]
    fn test_delimiter_must_open_the_file() {
        let metadata = NoteMetadata::parse("\n---\ntype: journal\n---\n");
        assert!(metadata.properties.is_empty());

        let metadata = NoteMetadata::parse("intro\n---\ntype: journal\n---\n");
        assert!(metadata.properties.is_empty());
    }

    #[test]
    fn test_unterminated_block_is_empty() {
        let metadata = NoteMetadata::parse("---\ntype: journal\n# body without close\n");
        assert!(metadata.properties.is_empty());
    }

    #[test]
    fn test_close_delimiter_at_end_of_file() {
        let metadata = NoteMetadata::parse("---\ntype: journal\n---");
        assert_eq!(
            metadata.properties.get("type"),
            Some(&PropertyValue::Text("journal".to_string()))
        );
    }

    #[test]
    fn test_crlf_line_endings() {
        let metadata = NoteMetadata::parse("---\r\ntype: journal\r\n---\r\nbody\r\n");
        assert_eq!(
            metadata.properties.get("type"),
            Some(&PropertyValue::Text("journal".to_string()))
        );
    }

    #[test]
    fn test_malformed_yaml_degrades_to_empty() {
        let metadata = NoteMetadata::parse("---\ntype: [unclosed\n---\n");
        assert!(metadata.properties.is_empty());
        assert!(metadata.tags.is_empty());
    }

    #[test]
    fn test_non_mapping_body_degrades_to_empty() {
        let metadata = NoteMetadata::parse("---\njust a scalar\n---\n");
        assert!(metadata.properties.is_empty());

        let metadata = NoteMetadata::parse("---\n- a\n- b\n---\n");
        assert!(metadata.properties.is_empty());
    }

    #[test]
    fn test_first_close_delimiter_wins() {
        let content = "---\ntype: journal\n---\nbody\n---\nmore: stuff\n---\n";
        let metadata = NoteMetadata::parse(content);

        assert_eq!(metadata.properties.len(), 1);
        assert_eq!(
            metadata.properties.get("type"),
            Some(&PropertyValue::Text("journal".to_string()))
        );
    }

    #[test]
    fn test_null_and_nested_values_are_absent() {
        let content = "---\nempty:\nnested:\n  inner: 1\nkept: true\n---\n";
        let metadata = NoteMetadata::parse(content);

        assert!(metadata.properties.get("empty").is_none());
        assert!(metadata.properties.get("nested").is_none());
        assert_eq!(
            metadata.properties.get("kept"),
            Some(&PropertyValue::Boolean(true))
        );
    }
}
