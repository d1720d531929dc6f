use crate::config::ExtractConfig;
use crate::extract::{BaserowClient, ExtractProgress, Extraction, Extractor};
use crate::schema::save_schema;
use anyhow::Context;
use indicatif::{ProgressBar, ProgressStyle};
use schemars::JsonSchema;
use serde::Serialize;
use std::time::Instant;

/// JSON output for extract
#[derive(Serialize, JsonSchema)]
pub(crate) struct ExtractJsonOutput {
    database_id: u64,
    output_file: String,
    statistics: ExtractStatistics,
    tables: Vec<String>,
    warnings: Vec<ExtractWarning>,
}

#[derive(Serialize, JsonSchema)]
pub(crate) struct ExtractStatistics {
    tables: usize,
    fields: usize,
    relationships: usize,
    elapsed_secs: f64,
}

#[derive(Serialize, JsonSchema)]
pub(crate) struct ExtractWarning {
    kind: String,
    table: String,
    field: String,
    reason: String,
}

pub fn run(config: ExtractConfig, verbose: bool, progress: bool, json: bool) -> anyhow::Result<()> {
    if !json {
        eprintln!(
            "Fetching tables and fields for database {} from {}",
            config.database_id, config.base_url
        );
    }

    let start_time = Instant::now();
    let extractor = Extractor::new(BaserowClient::new(&config)?);

    let extraction = if progress && !json {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg}")
                .unwrap(),
        );
        pb.enable_steady_tick(std::time::Duration::from_millis(100));
        pb.set_message("Listing tables...");

        let mut total = 0;
        let result = extractor.extract_with_progress(config.database_id, |event| match event {
            ExtractProgress::TablesListed { count } => total = count,
            ExtractProgress::TableStarted { index, name, .. } => {
                pb.set_message(format!("[{}/{}] {}", index + 1, total, name));
            }
            ExtractProgress::TableFinished { .. } => {}
        });
        pb.finish_and_clear();
        result?
    } else {
        extractor.extract(config.database_id)?
    };

    let elapsed = start_time.elapsed();

    save_schema(&extraction.schema, &config.output)
        .with_context(|| format!("failed to write {}", config.output.display()))?;

    if json {
        let output = build_json_output(&config, &extraction, elapsed.as_secs_f64());
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    if verbose {
        print_tables(&extraction);
    }

    for warning in &extraction.warnings {
        eprintln!("warning: {}: {}", warning.kind(), warning);
    }

    let schema = &extraction.schema;
    eprintln!(
        "✓ Extracted {} tables, {} fields, {} relationships in {:.3?}",
        schema.tables.len(),
        schema.field_count(),
        schema.relationships.len(),
        elapsed
    );
    eprintln!("Schema saved to: {}", config.output.display());

    Ok(())
}

fn print_tables(extraction: &Extraction) {
    for table in &extraction.schema.tables {
        eprintln!("=== Table: {} (ID: {}) ===", table.name, table.id);
        for field in &table.fields {
            match &field.link {
                Some(link) => eprintln!(
                    "  - Field: {} | Type: {} | ID: {} -> {}",
                    field.name, field.field_type, field.id, link.target_table_name
                ),
                None => eprintln!(
                    "  - Field: {} | Type: {} | ID: {}",
                    field.name, field.field_type, field.id
                ),
            }
        }
        eprintln!();
    }
}

fn build_json_output(
    config: &ExtractConfig,
    extraction: &Extraction,
    elapsed_secs: f64,
) -> ExtractJsonOutput {
    let schema = &extraction.schema;
    ExtractJsonOutput {
        database_id: schema.database_id,
        output_file: config.output.display().to_string(),
        statistics: ExtractStatistics {
            tables: schema.tables.len(),
            fields: schema.field_count(),
            relationships: schema.relationships.len(),
            elapsed_secs,
        },
        tables: schema.tables.iter().map(|t| t.name.clone()).collect(),
        warnings: extraction
            .warnings
            .iter()
            .map(|w| ExtractWarning {
                kind: w.kind().to_string(),
                table: w.table.clone(),
                field: w.field.clone(),
                reason: w.reason.clone(),
            })
            .collect(),
    }
}
