//! Schema extraction from the upstream API.
//!
//! Lists the tables of a database, fetches each table's fields, normalizes
//! link metadata and assembles a [`Schema`]. The run is all-or-nothing: the
//! first upstream failure is returned and no partial schema escapes.

mod client;
mod link;

pub use client::{BaserowClient, RawField, RawTable, SchemaSource};
pub use link::{normalize_link_field, KnownTables, NormalizedField, RawLinkTarget};

use crate::error::{MetadataError, Result};
use crate::schema::{Schema, Table};

/// Progress events emitted while extracting
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtractProgress {
    /// Table listing returned `count` tables
    TablesListed { count: usize },
    /// About to fetch fields of the `index`-th table (0-based)
    TableStarted { index: usize, id: u64, name: String },
    /// Fields of a table were fetched and normalized
    TableFinished {
        index: usize,
        name: String,
        field_count: usize,
    },
}

/// Outcome of a successful extraction
#[derive(Debug)]
pub struct Extraction {
    pub schema: Schema,
    /// Link fields that could not be resolved, in discovery order
    pub warnings: Vec<MetadataError>,
}

/// Builds a [`Schema`] from a [`SchemaSource`]
pub struct Extractor<S: SchemaSource> {
    source: S,
}

impl<S: SchemaSource> Extractor<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    pub fn extract(&self, database_id: u64) -> Result<Extraction> {
        self.extract_with_progress(database_id, |_| {})
    }

    pub fn extract_with_progress<F>(&self, database_id: u64, mut progress: F) -> Result<Extraction>
    where
        F: FnMut(ExtractProgress),
    {
        let raw_tables = self.source.list_tables(database_id)?;
        tracing::debug!(database_id, tables = raw_tables.len(), "listed tables");
        progress(ExtractProgress::TablesListed {
            count: raw_tables.len(),
        });

        let known: KnownTables = raw_tables
            .iter()
            .map(|t| (t.id, t.name.as_str()))
            .collect();

        let mut schema = Schema::new(database_id);
        let mut warnings = Vec::new();

        for (index, raw_table) in raw_tables.into_iter().enumerate() {
            progress(ExtractProgress::TableStarted {
                index,
                id: raw_table.id,
                name: raw_table.name.clone(),
            });

            let raw_fields = self.source.list_fields(raw_table.id)?;
            let mut fields = Vec::with_capacity(raw_fields.len());

            for raw_field in raw_fields {
                let normalized = normalize_link_field(&raw_table.name, raw_field, &known);

                if let Some(rel) = normalized.relationship {
                    schema.relationships.push(rel);
                }
                if let Some(issue) = normalized.issue {
                    tracing::warn!(%issue, "link field left unresolved");
                    warnings.push(issue);
                }
                fields.push(normalized.field);
            }

            tracing::debug!(table = %raw_table.name, fields = fields.len(), "fetched fields");
            progress(ExtractProgress::TableFinished {
                index,
                name: raw_table.name.clone(),
                field_count: fields.len(),
            });

            schema.tables.push(Table {
                id: raw_table.id,
                name: raw_table.name,
                fields,
            });
        }

        Ok(Extraction { schema, warnings })
    }
}
