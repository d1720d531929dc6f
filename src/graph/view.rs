//! Renamed view of a schema document for ERD rendering.

use super::naming::{to_camel_case, to_pascal_case};
use crate::schema::{FieldType, Schema};
use ahash::AHashMap;
use std::fmt;

/// Diagram-notation attribute type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagramType {
    String,
    Int,
    Bool,
    Date,
    DateTime,
}

impl DiagramType {
    /// Map an upstream field type; anything unrecognized renders as a string
    pub fn from_field_type(field_type: &FieldType) -> Self {
        match field_type {
            FieldType::Text | FieldType::LongText => DiagramType::String,
            FieldType::Number | FieldType::LinkRow => DiagramType::Int,
            FieldType::Boolean => DiagramType::Bool,
            FieldType::Date => DiagramType::Date,
            FieldType::DateTime => DiagramType::DateTime,
            FieldType::Other(_) => DiagramType::String,
        }
    }

    pub fn as_mermaid(self) -> &'static str {
        match self {
            DiagramType::String => "string",
            DiagramType::Int => "int",
            DiagramType::Bool => "bool",
            DiagramType::Date => "date",
            DiagramType::DateTime => "datetime",
        }
    }

    /// Column type used by DBML output
    pub fn as_sql(self) -> &'static str {
        match self {
            DiagramType::String => "varchar",
            DiagramType::Int => "int",
            DiagramType::Bool => "boolean",
            DiagramType::Date => "date",
            DiagramType::DateTime => "timestamp",
        }
    }
}

impl fmt::Display for DiagramType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_mermaid())
    }
}

/// A field ready for rendering
#[derive(Debug, Clone)]
pub struct AttributeInfo {
    /// Name as stored in the schema document
    pub source_name: String,
    /// camelCase name
    pub name: String,
    pub diagram_type: DiagramType,
}

/// A table ready for rendering
#[derive(Debug, Clone)]
pub struct EntityInfo {
    pub source_name: String,
    /// PascalCase name
    pub name: String,
    pub attributes: Vec<AttributeInfo>,
}

/// A relationship ready for rendering
#[derive(Debug, Clone)]
pub struct EdgeInfo {
    pub from_entity: String,
    pub from_attribute: String,
    pub to_entity: String,
    /// Original names, for notations that keep them
    pub source: (String, String, String),
}

/// Two source tables that rename to the same entity name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameCollision {
    pub entity: String,
    /// Table that claimed the entity name first
    pub first: String,
    /// Later table rendered under the same name
    pub second: String,
}

/// Renamed view of a [`Schema`], in document order
#[derive(Debug)]
pub struct ErdView {
    pub entities: Vec<EntityInfo>,
    pub edges: Vec<EdgeInfo>,
    pub collisions: Vec<NameCollision>,
}

impl ErdView {
    pub fn from_schema(schema: &Schema) -> Self {
        let mut lookup: AHashMap<&str, String> = AHashMap::new();
        let mut owners: AHashMap<String, &str> = AHashMap::new();
        let mut collisions = Vec::new();

        for table in &schema.tables {
            let entity = to_pascal_case(&table.name);
            if let Some(previous) = owners.insert(entity.clone(), &table.name) {
                if previous != table.name {
                    tracing::warn!(
                        entity = %entity,
                        first = previous,
                        second = %table.name,
                        "table names collide after renaming"
                    );
                    collisions.push(NameCollision {
                        entity: entity.clone(),
                        first: previous.to_string(),
                        second: table.name.clone(),
                    });
                }
            }
            lookup.insert(&table.name, entity);
        }

        let entities = schema
            .tables
            .iter()
            .map(|table| EntityInfo {
                source_name: table.name.clone(),
                name: lookup
                    .get(table.name.as_str())
                    .cloned()
                    .unwrap_or_else(|| to_pascal_case(&table.name)),
                attributes: table
                    .fields
                    .iter()
                    .map(|field| AttributeInfo {
                        source_name: field.name.clone(),
                        name: to_camel_case(&field.name),
                        diagram_type: DiagramType::from_field_type(&field.field_type),
                    })
                    .collect(),
            })
            .collect();

        for rel in schema.dangling_relationships() {
            tracing::warn!(
                from_table = %rel.from_table,
                from_field = %rel.from_field,
                "relationship references a field missing from the schema"
            );
        }

        let resolve = |name: &str| lookup.get(name).cloned().unwrap_or_else(|| name.to_string());

        let edges = schema
            .relationships
            .iter()
            .map(|rel| EdgeInfo {
                from_entity: resolve(&rel.from_table),
                from_attribute: to_camel_case(&rel.from_field),
                to_entity: resolve(&rel.to_table),
                source: (
                    rel.from_table.clone(),
                    rel.from_field.clone(),
                    rel.to_table.clone(),
                ),
            })
            .collect();

        Self {
            entities,
            edges,
            collisions,
        }
    }

    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    pub fn attribute_count(&self) -> usize {
        self.entities.iter().map(|e| e.attributes.len()).sum()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}
