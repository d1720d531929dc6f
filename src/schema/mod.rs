//! Schema document model.
//!
//! This module provides:
//! - The normalized document written by `extract` and read by `render`
//! - Field type classification for the upstream type vocabulary
//! - Atomic load/store of the document as pretty-printed JSON

mod store;

pub use store::{load_schema, save_schema, write_atomic};

use ahash::AHashSet;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Upstream field type tag.
///
/// Unknown tags are kept verbatim in `Other` so documents round-trip.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FieldType {
    Text,
    LongText,
    Number,
    Boolean,
    Date,
    DateTime,
    LinkRow,
    Other(String),
}

impl FieldType {
    pub fn as_str(&self) -> &str {
        match self {
            FieldType::Text => "text",
            FieldType::LongText => "long_text",
            FieldType::Number => "number",
            FieldType::Boolean => "boolean",
            FieldType::Date => "date",
            FieldType::DateTime => "datetime",
            FieldType::LinkRow => "link_row",
            FieldType::Other(s) => s,
        }
    }

    pub fn is_link(&self) -> bool {
        matches!(self, FieldType::LinkRow)
    }
}

impl From<&str> for FieldType {
    fn from(s: &str) -> Self {
        match s {
            "text" => FieldType::Text,
            "long_text" => FieldType::LongText,
            "number" => FieldType::Number,
            "boolean" => FieldType::Boolean,
            "date" => FieldType::Date,
            "datetime" => FieldType::DateTime,
            "link_row" => FieldType::LinkRow,
            other => FieldType::Other(other.to_string()),
        }
    }
}

impl From<String> for FieldType {
    fn from(s: String) -> Self {
        match FieldType::from(s.as_str()) {
            FieldType::Other(_) => FieldType::Other(s),
            known => known,
        }
    }
}

impl From<FieldType> for String {
    fn from(t: FieldType) -> Self {
        match t {
            FieldType::Other(s) => s,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resolved target of a link field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct LinkTarget {
    pub target_table_id: u64,
    /// May be synthesized as `Table_<id>` when upstream omitted the name
    pub target_table_name: String,
}

/// A field (column) of a table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Field {
    pub id: u64,
    pub name: String,
    #[serde(rename = "type")]
    #[schemars(with = "String")]
    pub field_type: FieldType,
    /// Present only on resolved `link_row` fields
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<LinkTarget>,
}

impl Field {
    pub fn new(id: u64, name: impl Into<String>, field_type: impl Into<FieldType>) -> Self {
        Self {
            id,
            name: name.into(),
            field_type: field_type.into(),
            link: None,
        }
    }
}

/// A table with its fields in upstream order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Table {
    pub id: u64,
    pub name: String,
    pub fields: Vec<Field>,
}

/// Edge derived from a resolved link field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Relationship {
    pub from_table: String,
    pub from_field: String,
    pub to_table: String,
}

/// Root of the schema document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Schema {
    pub database_id: u64,
    pub tables: Vec<Table>,
    /// In discovery order
    #[serde(default)]
    pub relationships: Vec<Relationship>,
}

impl Schema {
    pub fn new(database_id: u64) -> Self {
        Self {
            database_id,
            tables: Vec::new(),
            relationships: Vec::new(),
        }
    }

    pub fn field_count(&self) -> usize {
        self.tables.iter().map(|t| t.fields.len()).sum()
    }

    /// Relationships whose source table or field does not exist in this schema.
    ///
    /// Documents produced by the extractor never have any; hand-edited ones might.
    pub fn dangling_relationships(&self) -> Vec<&Relationship> {
        let known: AHashSet<(&str, &str)> = self
            .tables
            .iter()
            .flat_map(|t| t.fields.iter().map(move |f| (t.name.as_str(), f.name.as_str())))
            .collect();

        self.relationships
            .iter()
            .filter(|r| !known.contains(&(r.from_table.as_str(), r.from_field.as_str())))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_type_parsing() {
        assert_eq!(FieldType::from("text"), FieldType::Text);
        assert_eq!(FieldType::from("long_text"), FieldType::LongText);
        assert_eq!(FieldType::from("link_row"), FieldType::LinkRow);
        assert_eq!(
            FieldType::from("formula"),
            FieldType::Other("formula".to_string())
        );
        assert!(FieldType::LinkRow.is_link());
        assert!(!FieldType::Number.is_link());
    }

    #[test]
    fn test_field_type_serializes_as_tag() {
        let field = Field::new(3, "notes", "rich_text");
        let json = serde_json::to_value(&field).unwrap();
        assert_eq!(json["type"], "rich_text");
        assert!(json.get("link").is_none());
    }

    #[test]
    fn test_dangling_relationships() {
        let mut schema = Schema::new(1);
        schema.tables.push(Table {
            id: 1,
            name: "orders".to_string(),
            fields: vec![Field::new(10, "customer", "link_row")],
        });
        schema.relationships.push(Relationship {
            from_table: "orders".to_string(),
            from_field: "customer".to_string(),
            to_table: "customers".to_string(),
        });
        schema.relationships.push(Relationship {
            from_table: "invoices".to_string(),
            from_field: "order".to_string(),
            to_table: "orders".to_string(),
        });

        let dangling = schema.dangling_relationships();
        assert_eq!(dangling.len(), 1);
        assert_eq!(dangling[0].from_table, "invoices");
    }

    #[test]
    fn test_relationships_default_to_empty() {
        let schema: Schema =
            serde_json::from_str(r#"{"database_id": 5, "tables": []}"#).unwrap();
        assert!(schema.relationships.is_empty());
    }
}
