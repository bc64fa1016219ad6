//! Query model and matching against parsed note metadata.

use std::collections::{BTreeMap, BTreeSet};

use super::frontmatter::NoteMetadata;
use super::value::PropertyValue;

/// How a query's tag set is applied to a note's tags.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum TagMatch {
    All,
    #[default]
    Any,
}

/// A filter over note metadata: exact property requirements plus a tag set.
///
/// All property requirements must hold, and the tag requirement must hold,
/// for a note to match. An empty query matches every note.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Query {
    pub properties: BTreeMap<String, PropertyValue>,
    pub tags: BTreeSet<String>,
    pub tag_match: TagMatch,
}

impl Query {
    pub fn is_empty(&self) -> bool {
        self.properties.is_empty() && self.tags.is_empty()
    }

    /// Decide whether a note's metadata satisfies this query.
    ///
    /// A property requirement is satisfied only when the key is present and
    /// the values compare equal; a key that is absent never matches, whatever
    /// the requested value.
    pub fn matches(&self, metadata: &NoteMetadata) -> bool {
        for (key, expected) in &self.properties {
            match metadata.properties.get(key) {
                Some(actual) if actual == expected => {}
                _ => return false,
            }
        }

        if self.tags.is_empty() {
            return true;
        }

        match self.tag_match {
            TagMatch::All => self.tags.iter().all(|tag| metadata.tags.contains(tag)),
            TagMatch::Any => self.tags.iter().any(|tag| metadata.tags.contains(tag)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metadata(content: &str) -> NoteMetadata {
        NoteMetadata::parse(content)
    }

    fn property_query(key: &str, value: PropertyValue) -> Query {
        let mut query = Query::default();
        query.properties.insert(key.to_string(), value);
        query
    }

    fn tag_query(tags: &[&str], tag_match: TagMatch) -> Query {
        Query {
            tags: tags.iter().map(|t| t.to_string()).collect(),
            tag_match,
            ..Query::default()
        }
    }

    #[test]
    fn test_empty_query_matches_everything() {
        let query = Query::default();
        assert!(query.matches(&metadata("no frontmatter here")));
        assert!(query.matches(&metadata("---\ntype: journal\n---\n")));
    }

    #[test]
    fn test_property_equality() {
        let note = metadata("---\ntype: journal\nrating: 3\n---\n");

        assert!(property_query("type", PropertyValue::Text("journal".to_string())).matches(&note));
        assert!(!property_query("type", PropertyValue::Text("daily".to_string())).matches(&note));
        assert!(!property_query("missing", PropertyValue::Text("journal".to_string())).matches(&note));
    }

    #[test]
    fn test_no_coercion_between_string_and_number() {
        let note = metadata("---\nrating: 3\n---\n");

        assert!(property_query("rating", PropertyValue::Integer(3)).matches(&note));
        assert!(property_query("rating", PropertyValue::Float(3.0)).matches(&note));
        assert!(!property_query("rating", PropertyValue::Text("3".to_string())).matches(&note));
    }

    #[test]
    fn test_all_properties_must_hold() {
        let note = metadata("---\ntype: journal\nstatus: open\n---\n");

        let mut query = property_query("type", PropertyValue::Text("journal".to_string()));
        query
            .properties
            .insert("status".to_string(), PropertyValue::Text("open".to_string()));
        assert!(query.matches(&note));

        query
            .properties
            .insert("status".to_string(), PropertyValue::Text("done".to_string()));
        assert!(!query.matches(&note));
    }

    #[test]
    fn test_tag_any_mode() {
        let note = metadata("---\ntags: [personal, health]\n---\n");

        assert!(tag_query(&["personal"], TagMatch::Any).matches(&note));
        assert!(tag_query(&["work", "health"], TagMatch::Any).matches(&note));
        assert!(!tag_query(&["work", "finance"], TagMatch::Any).matches(&note));
    }

    #[test]
    fn test_tag_all_mode() {
        let note = metadata("---\ntags: [personal, health]\n---\n");

        assert!(tag_query(&["personal", "health"], TagMatch::All).matches(&note));
        assert!(!tag_query(&["personal", "work"], TagMatch::All).matches(&note));
    }

    #[test]
    fn test_tag_query_against_untagged_note() {
        let note = metadata("---\ntype: journal\n---\n");
        assert!(!tag_query(&["personal"], TagMatch::Any).matches(&note));

        let empty = metadata("plain text");
        assert!(!tag_query(&["personal"], TagMatch::Any).matches(&empty));
    }

    #[test]
    fn test_properties_and_tags_are_conjunctive() {
        let note = metadata("---\ntype: journal\ntags: [personal]\n---\n");

        let mut query = tag_query(&["personal"], TagMatch::Any);
        query
            .properties
            .insert("type".to_string(), PropertyValue::Text("journal".to_string()));
        assert!(query.matches(&note));

        query
            .properties
            .insert("type".to_string(), PropertyValue::Text("daily".to_string()));
        assert!(!query.matches(&note));
    }

    #[test]
    fn test_list_property_requires_exact_list() {
        let note = metadata("---\naliases: [a, b]\n---\n");

        let exact = property_query(
            "aliases",
            PropertyValue::List(vec![
                PropertyValue::Text("a".to_string()),
                PropertyValue::Text("b".to_string()),
            ]),
        );
        assert!(exact.matches(&note));

        let scalar = property_query("aliases", PropertyValue::Text("a".to_string()));
        assert!(!scalar.matches(&note));
    }
}
