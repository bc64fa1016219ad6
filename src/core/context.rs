//! Resolution of named context types into queries.

use std::collections::BTreeMap;

use super::matcher::Query;

/// Named context types and the queries they stand for, built once from
/// configuration and read-only afterwards.
pub type ContextMapping = BTreeMap<String, Query>;

/// Look up a context type in the configured mapping.
///
/// An unrecognized name resolves to the empty query, which matches every
/// note. A caller asking for a context the configuration does not know
/// gets the whole vault rather than an error.
pub fn resolve_context(context_type: &str, mapping: &ContextMapping) -> Query {
    mapping
        .get(context_type)
        .cloned()
        .unwrap_or_default()
}
