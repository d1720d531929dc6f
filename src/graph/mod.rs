//! ERD (Entity-Relationship Diagram) rendering module.
//!
//! This module provides:
//! - Naming-convention transforms (PascalCase entities, camelCase attributes)
//! - A renamed view of a schema document with field types mapped to diagram types
//! - Output formats: Mermaid erDiagram and DBML

pub mod format;
pub mod naming;
pub mod view;

pub use format::{to_dbml, to_mermaid, OutputFormat, MANY_TO_ONE};
pub use naming::{to_camel_case, to_pascal_case};
pub use view::{DiagramType, ErdView, NameCollision};
// Re-export for tests and external use
#[allow(unused_imports)]
pub use view::{AttributeInfo, EdgeInfo, EntityInfo};
