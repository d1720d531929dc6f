//! DBML (dbdiagram.io) format output.
//!
//! Unlike Mermaid output this keeps the original table and field names.

use crate::graph::view::ErdView;

/// Generate DBML from an ERD view
pub fn to_dbml(view: &ErdView) -> String {
    let mut output = String::new();

    for entity in &view.entities {
        output.push_str(&format!("Table {} {{\n", quote_ident(&entity.source_name)));

        for attr in &entity.attributes {
            let pk = if attr.source_name.eq_ignore_ascii_case("id") {
                " [pk]"
            } else {
                ""
            };
            output.push_str(&format!(
                "  {} {}{}\n",
                quote_ident(&attr.source_name),
                attr.diagram_type.as_sql(),
                pk
            ));
        }

        output.push_str("}\n\n");
    }

    for edge in &view.edges {
        let (from_table, from_field, to_table) = &edge.source;
        output.push_str(&format!(
            "Ref: {}.{} > {}.id\n",
            quote_ident(from_table),
            quote_ident(from_field),
            quote_ident(to_table)
        ));
    }

    output
}

/// Quote an identifier unless it is a plain `[A-Za-z0-9_]` word
fn quote_ident(s: &str) -> String {
    let plain = !s.is_empty()
        && s.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
        && !s.starts_with(|c: char| c.is_ascii_digit());
    if plain {
        s.to_string()
    } else {
        format!("\"{}\"", s.replace('"', "\\\""))
    }
}
