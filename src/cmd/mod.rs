mod extract;
mod render;
mod schema;

pub(crate) use extract::ExtractJsonOutput;
pub(crate) use render::RenderJsonOutput;

use crate::config::{ExtractConfig, RenderConfig, DEFAULT_BASE_URL, DEFAULT_SCHEMA_FILE};
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use std::io;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "baserow-erd")]
#[command(author = "Helge Sverre <helge.sverre@gmail.com>")]
#[command(version)]
#[command(
    about = "Extract a Baserow database schema and render it as an ER diagram",
    long_about = None
)]
pub struct Cli {
    /// Debug logging (overridden by BASEROW_ERD_LOG)
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only log errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fetch tables and fields from the API and write the schema document
    Extract {
        /// Database to extract
        #[arg(short, long, env = "DATABASE_ID")]
        database_id: Option<u64>,

        /// API token (sent as `Authorization: Token <token>`)
        #[arg(long, env = "BASEROW_API_TOKEN", hide_env_values = true)]
        token: Option<String>,

        /// API base URL
        #[arg(long, env = "BASE_URL", default_value = DEFAULT_BASE_URL)]
        base_url: String,

        /// Schema document to write
        #[arg(short, long, env = "OUTPUT_FILE", default_value = DEFAULT_SCHEMA_FILE)]
        output: PathBuf,

        /// Show a spinner while fetching
        #[arg(short, long)]
        progress: bool,

        /// Print a JSON summary instead of human-readable text
        #[arg(long)]
        json: bool,
    },

    /// Render a schema document as an ER diagram
    Render {
        /// Schema document to read
        #[arg(short, long, env = "SCHEMA_FILE", default_value = DEFAULT_SCHEMA_FILE)]
        input: PathBuf,

        /// Diagram file to write (default: stdout)
        #[arg(short, long, env = "DIAGRAM_FILE")]
        output: Option<PathBuf>,

        /// Notation: mermaid, dbml (default: from output extension, else mermaid)
        #[arg(short, long)]
        format: Option<String>,

        /// Print a JSON summary to stderr instead of human-readable text
        #[arg(long)]
        json: bool,
    },

    /// Print the JSON Schema of the schema document or a command's --json output
    Schema {
        /// Which schema: document, extract, render (default: document)
        #[arg(default_value = "document")]
        name: String,

        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// List available schema names
        #[arg(long)]
        list: bool,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

pub fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Extract {
            database_id,
            token,
            base_url,
            output,
            progress,
            json,
        } => {
            let config = ExtractConfig::new(token, database_id, &base_url, output)?;
            extract::run(config, cli.verbose, progress, json)
        }
        Commands::Render {
            input,
            output,
            format,
            json,
        } => {
            let config = RenderConfig::new(input, output, format.as_deref())?;
            render::run(config, json)
        }
        Commands::Schema { name, output, list } => schema::run(&name, output, list),
        Commands::Completions { shell } => {
            generate(
                shell,
                &mut Cli::command(),
                "baserow-erd",
                &mut io::stdout(),
            );
            Ok(())
        }
    }
}
