use crate::error::ErdError;
use crate::json_schema::{get_schema, schema_names};
use std::fs;
use std::path::PathBuf;

pub fn run(name: &str, output: Option<PathBuf>, list: bool) -> anyhow::Result<()> {
    if list {
        for name in schema_names() {
            println!("{}", name);
        }
        return Ok(());
    }

    let schema = get_schema(name).ok_or_else(|| {
        anyhow::anyhow!(
            "Unknown schema: {}. Valid options: {}",
            name,
            schema_names().join(", ")
        )
    })?;
    let content = serde_json::to_string_pretty(&schema)?;

    match output {
        Some(path) => {
            fs::write(&path, format!("{}\n", content)).map_err(|e| ErdError::io(&path, e))?;
            eprintln!("Schema written to: {}", path.display());
        }
        None => println!("{}", content),
    }

    Ok(())
}
