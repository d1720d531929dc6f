//! Mermaid erDiagram format output.

use crate::graph::view::ErdView;

/// Relationship marker: many-to-one, optional-to-required.
///
/// Cardinality is not inferred from the data.
pub const MANY_TO_ONE: &str = "}o--||";

/// Generate Mermaid erDiagram from an ERD view
pub fn to_mermaid(view: &ErdView) -> String {
    let mut output = String::new();

    output.push_str("erDiagram\n");

    for entity in &view.entities {
        output.push_str(&format!("    {} {{\n", entity.name));

        for attr in &entity.attributes {
            output.push_str(&format!(
                "        {} {}\n",
                attr.diagram_type.as_mermaid(),
                attr.name
            ));
        }

        output.push_str("    }\n");
    }

    if !view.edges.is_empty() {
        output.push('\n');
    }

    for edge in &view.edges {
        output.push_str(&format!(
            "    {} {} {} : {}\n",
            edge.from_entity, MANY_TO_ONE, edge.to_entity, edge.from_attribute
        ));
    }

    output
}
