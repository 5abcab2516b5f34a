//! Schema Validate CLI
//!
//! Validates an instance document against a schema document.
//!
//! Usage:
//!   schema-validate schema/boundary_object.json record.json
//!   schema-validate --descriptor catalogs/cfbo-v1.json - < record.json

use std::path::PathBuf;
use anyhow::{Context, Result};
use clap::Parser;
use contract_schemas::document::{self, Source};
use contract_schemas::{Diagnostics, OutputFormat, SchemaError, Validator, ValidatorConfig};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "schema-validate")]
#[command(version, about = "Validate a JSON document against a JSON Schema contract")]
struct Cli {
    /// Schema document
    schema: PathBuf,

    /// Instance document ("-" reads stdin)
    instance: PathBuf,

    /// Report format (overrides config)
    #[arg(short, long, value_enum)]
    format: Option<OutputFormat>,

    /// Treat the schema file as a descriptor (inline `schema` or `schema_path`)
    #[arg(long)]
    descriptor: bool,

    /// Print at most this many diagnostics
    #[arg(long)]
    max_reported: Option<usize>,

    /// Explicit config file
    #[arg(short, long)]
    config: Option<PathBuf>,
}

/// Settings after merging CLI flags over config
struct Settings {
    format: OutputFormat,
    descriptor: bool,
    max_reported: Option<usize>,
}

impl Settings {
    fn resolve(cli: &Cli, config: ValidatorConfig) -> Self {
        Self {
            format: cli.format.unwrap_or(config.output.format),
            descriptor: cli.descriptor || config.schema.descriptor,
            max_reported: cli.max_reported.or(config.output.max_reported),
        }
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    // Usage errors exit 1, not clap's default of 2
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let code = if e.use_stderr() { 1 } else { 0 };
            let _ = e.print();
            std::process::exit(code);
        }
    };

    match run(cli) {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            match e.downcast_ref::<SchemaError>() {
                Some(schema_err) if schema_err.is_structural() => {
                    eprintln!("schema error: {}", schema_err)
                }
                _ => eprintln!("Error: {:#}", e),
            }
            std::process::exit(1);
        }
    }
}

/// Returns whether the instance is valid
fn run(cli: Cli) -> Result<bool> {
    let config_path = cli.config.as_ref().map(|p| p.to_string_lossy().into_owned());
    let config = ValidatorConfig::load_from(config_path.as_deref()).context("loading configuration")?;
    let settings = Settings::resolve(&cli, config);

    let schema = document::load_schema(&cli.schema, settings.descriptor)
        .with_context(|| format!("loading schema {}", cli.schema.display()))?;

    let source = Source::from_arg(&cli.instance);
    let instance = source
        .read_json()
        .with_context(|| format!("reading instance {}", source.display_name()))?;

    let diagnostics = Validator::new(&schema).validate(&instance)?;

    match settings.format {
        OutputFormat::Text => report_text(&diagnostics, settings.max_reported),
        OutputFormat::Json => report_json(&diagnostics, &cli, &source, settings.max_reported)?,
    }

    Ok(diagnostics.is_empty())
}

fn report_text(diagnostics: &Diagnostics, max_reported: Option<usize>) {
    let shown = max_reported.unwrap_or(usize::MAX).min(diagnostics.len());
    for diagnostic in &diagnostics.all()[..shown] {
        eprintln!("schema validation error: {}", diagnostic);
    }
    let hidden = diagnostics.len() - shown;
    if hidden > 0 {
        eprintln!("({} more diagnostics not shown)", hidden);
    }
}

fn report_json(
    diagnostics: &Diagnostics,
    cli: &Cli,
    source: &Source,
    max_reported: Option<usize>,
) -> Result<()> {
    let shown = max_reported.unwrap_or(usize::MAX).min(diagnostics.len());
    let report = serde_json::json!({
        "valid": diagnostics.is_empty(),
        "generated_at": chrono::Utc::now().to_rfc3339(),
        "schema": cli.schema.display().to_string(),
        "instance": source.display_name(),
        "error_count": diagnostics.len(),
        "errors": &diagnostics.all()[..shown],
    });
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
