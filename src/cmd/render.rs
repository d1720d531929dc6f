use crate::config::RenderConfig;
use crate::graph::ErdView;
use crate::schema::{load_schema, write_atomic};
use schemars::JsonSchema;
use serde::Serialize;
use std::io::Write;

/// JSON output for render
#[derive(Serialize, JsonSchema)]
pub(crate) struct RenderJsonOutput {
    input_file: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    output_file: Option<String>,
    format: String,
    entities: usize,
    attributes: usize,
    relationships: usize,
    collisions: Vec<CollisionJson>,
}

#[derive(Serialize, JsonSchema)]
pub(crate) struct CollisionJson {
    entity: String,
    tables: Vec<String>,
}

pub fn run(config: RenderConfig, json: bool) -> anyhow::Result<()> {
    let schema = load_schema(&config.input)?;
    let view = ErdView::from_schema(&schema);
    let content = config.format.render(&view);

    match &config.output {
        Some(path) => write_atomic(path, |writer| writer.write_all(content.as_bytes()))?,
        None => print!("{}", content),
    }

    if json {
        let summary = RenderJsonOutput {
            input_file: config.input.display().to_string(),
            output_file: config.output.as_ref().map(|p| p.display().to_string()),
            format: config.format.to_string(),
            entities: view.entity_count(),
            attributes: view.attribute_count(),
            relationships: view.edge_count(),
            collisions: view
                .collisions
                .iter()
                .map(|c| CollisionJson {
                    entity: c.entity.clone(),
                    tables: vec![c.first.clone(), c.second.clone()],
                })
                .collect(),
        };
        eprintln!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    for collision in &view.collisions {
        eprintln!(
            "warning: tables '{}' and '{}' both render as {}",
            collision.first, collision.second, collision.entity
        );
    }

    if let Some(path) = &config.output {
        eprintln!(
            "ERD ({}) written to: {}",
            config.format,
            path.display()
        );
    }
    eprintln!(
        "ERD: {} tables, {} fields, {} relationships",
        view.entity_count(),
        view.attribute_count(),
        view.edge_count()
    );

    Ok(())
}
