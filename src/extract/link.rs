//! Link metadata normalization.
//!
//! Upstream reports the target of a `link_row` field either as an object
//! carrying the table id and name, as a bare table id, or not at all. The
//! raw shape is decoded once into [`RawLinkTarget`] and resolved here into a
//! [`LinkTarget`]; nothing downstream looks at the raw value again.

use super::client::RawField;
use crate::error::MetadataError;
use crate::schema::{Field, FieldType, LinkTarget, Relationship};
use ahash::AHashMap;
use serde::Deserialize;

/// `link_row_table` as it appears on the wire
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RawLinkTarget {
    Table {
        id: u64,
        #[serde(default)]
        name: Option<String>,
    },
    Id(u64),
    Unrecognized(serde_json::Value),
}

/// Table id to name index for the database being extracted
#[derive(Debug, Default)]
pub struct KnownTables {
    names: AHashMap<u64, String>,
}

impl KnownTables {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, id: u64, name: impl Into<String>) {
        self.names.insert(id, name.into());
    }

    pub fn get(&self, id: u64) -> Option<&str> {
        self.names.get(&id).map(String::as_str)
    }

    /// Resolve a table name, synthesizing `Table_<id>` for unknown ids
    pub fn name_or_placeholder(&self, id: u64) -> String {
        self.get(id)
            .map(str::to_string)
            .unwrap_or_else(|| format!("Table_{id}"))
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl<'a> FromIterator<(u64, &'a str)> for KnownTables {
    fn from_iter<I: IntoIterator<Item = (u64, &'a str)>>(iter: I) -> Self {
        let mut known = KnownTables::new();
        for (id, name) in iter {
            known.insert(id, name);
        }
        known
    }
}

/// Result of normalizing one upstream field
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedField {
    pub field: Field,
    /// Set when the field is a link that resolved to a target
    pub relationship: Option<Relationship>,
    /// Set when a link field had unusable metadata
    pub issue: Option<MetadataError>,
}

/// Normalize a raw field belonging to `table_name`.
///
/// Only `link_row` fields get a link. For those:
/// - an object target uses its embedded id and name
/// - a bare id (or an object without a name) is resolved against `known`,
///   falling back to `Table_<id>`
/// - an absent, null or unrecognized target leaves the field unlinked and
///   reports a [`MetadataError`]
pub fn normalize_link_field(
    table_name: &str,
    raw: RawField,
    known: &KnownTables,
) -> NormalizedField {
    let field_type = FieldType::from(raw.field_type);
    let mut field = Field {
        id: raw.id,
        name: raw.name,
        field_type,
        link: None,
    };

    if !field.field_type.is_link() {
        return NormalizedField {
            field,
            relationship: None,
            issue: None,
        };
    }

    let resolved = match raw.link_row_table {
        Some(RawLinkTarget::Table {
            id,
            name: Some(name),
        }) => Ok(LinkTarget {
            target_table_id: id,
            target_table_name: name,
        }),
        Some(RawLinkTarget::Table { id, name: None }) | Some(RawLinkTarget::Id(id)) => {
            Ok(LinkTarget {
                target_table_id: id,
                target_table_name: known.name_or_placeholder(id),
            })
        }
        Some(RawLinkTarget::Unrecognized(value)) => {
            Err(format!("unrecognized link_row_table value {value}"))
        }
        None => Err("link_row field has no link_row_table".to_string()),
    };

    match resolved {
        Ok(target) => {
            let relationship = Relationship {
                from_table: table_name.to_string(),
                from_field: field.name.clone(),
                to_table: target.target_table_name.clone(),
            };
            field.link = Some(target);
            NormalizedField {
                field,
                relationship: Some(relationship),
                issue: None,
            }
        }
        Err(reason) => {
            let issue = MetadataError {
                table: table_name.to_string(),
                field: field.name.clone(),
                reason,
            };
            NormalizedField {
                field,
                relationship: None,
                issue: Some(issue),
            }
        }
    }
}
