//! JSON Schema generation for the schema document and command output.
//!
//! Schemas are generated using the schemars crate and can be exported via the
//! `schema` subcommand.

use schemars::{schema_for, Schema};
use std::collections::BTreeMap;

/// Returns all JSON schemas, keyed by name.
/// Uses BTreeMap for deterministic ordering (important for diffable output).
pub fn all_schemas() -> BTreeMap<&'static str, Schema> {
    let mut schemas = BTreeMap::new();

    // the document written by extract and read by render
    schemas.insert("document", schema_for!(crate::schema::Schema));

    // extract --json
    schemas.insert("extract", schema_for!(crate::cmd::ExtractJsonOutput));

    // render --json
    schemas.insert("render", schema_for!(crate::cmd::RenderJsonOutput));

    schemas
}

/// Generate a single schema by name.
pub fn get_schema(name: &str) -> Option<Schema> {
    all_schemas().remove(name)
}

/// List all available schema names.
pub fn schema_names() -> Vec<&'static str> {
    all_schemas().keys().copied().collect()
}
