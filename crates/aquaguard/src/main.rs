use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use chrono::Local;
use clap::{Parser, Subcommand, ValueEnum};
use tracing::debug;

use aquaguard_core::{
    lint_catalog, read_document, render_document, render_ui, validate_then_evaluate, CatalogStore,
    DocumentOptions, ReportContext,
};
use aquaguard_types::{ComplianceStatus, MeasurementInput};

#[derive(Parser)]
#[command(name = "aquaguard")]
#[command(about = "Water-quality compliance checker", long_about = None)]
struct Cli {
    /// Enable verbose (info-level) logging to stderr.
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    /// Enable debug-level logging to stderr.
    #[arg(long, global = true)]
    debug: bool,

    /// Path to the standards catalog source.
    #[arg(long, global = true, default_value = "standards.json")]
    catalog: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a measurement batch and classify it against the catalog.
    Analyze(AnalyzeArgs),

    /// Render the downloadable report document for a measurement batch.
    Report(ReportArgs),

    /// List the catalog's parameters, for selector UIs.
    Parameters(ParametersArgs),

    /// Check the catalog source for hygiene issues.
    Validate,
}

#[derive(Parser, Debug)]
struct AnalyzeArgs {
    /// Batch input file, or '-' for stdin.
    ///
    /// Accepts {"batch": [{"name": ..., "value": ...}, ...]} or a bare array.
    #[arg(long, default_value = "-")]
    input: PathBuf,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Parser, Debug)]
struct ReportArgs {
    /// Batch input file, or '-' for stdin. Same shape as for analyze.
    #[arg(long, default_value = "-")]
    input: PathBuf,

    /// Where to write the report. Defaults to a timestamped file under
    /// reports/; the directory is created if needed.
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct ParametersArgs {
    /// Also print the catalog version label, when available.
    #[arg(long)]
    show_version: bool,
}

fn main() -> std::process::ExitCode {
    match run_with_args(std::env::args_os()) {
        Ok(code) => std::process::ExitCode::from(code as u8),
        Err(err) => {
            eprintln!("{err:?}");
            std::process::ExitCode::from(1)
        }
    }
}

fn run_with_args<I, T>(args: I) -> Result<i32>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let cli = Cli::parse_from(args);

    init_logging(cli.verbose, cli.debug);

    let store = CatalogStore::new(&cli.catalog);

    match cli.command {
        Commands::Analyze(args) => cmd_analyze(&store, args),
        Commands::Report(args) => cmd_report(&store, args),
        Commands::Parameters(args) => cmd_parameters(&store, args),
        Commands::Validate => cmd_validate(&cli.catalog),
    }
}

fn init_logging(verbose: bool, debug: bool) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let level = if debug {
        "debug"
    } else if verbose {
        "info"
    } else {
        "warn"
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .try_init();

    debug!("Logging initialized at level: {}", level);
}

fn cmd_analyze(store: &CatalogStore, args: AnalyzeArgs) -> Result<i32> {
    let batch = read_batch(&args.input)?;
    let catalog = store.load();
    let outcome = validate_then_evaluate(&batch, &catalog);

    if !outcome.errors.is_empty() {
        match args.format {
            OutputFormat::Json => {
                let payload = serde_json::json!({ "validation_errors": &outcome.errors });
                println!("{}", serde_json::to_string_pretty(&payload).context("render json")?);
            }
            OutputFormat::Text => {
                for error in &outcome.errors {
                    eprintln!("ERROR: {error}");
                }
            }
        }
        return Ok(1);
    }

    match args.format {
        OutputFormat::Json => {
            let results: Vec<serde_json::Value> = outcome
                .results
                .iter()
                .map(|result| {
                    serde_json::json!({
                        "parameter": &result.parameter,
                        "value": result.value,
                        "unit": &result.unit,
                        "status": result.overall_status().as_str(),
                        "standards": &result.standards,
                    })
                })
                .collect();

            let payload = serde_json::json!({
                "results": results,
                "warnings": &outcome.warnings,
            });
            println!("{}", serde_json::to_string_pretty(&payload).context("render json")?);
        }
        OutputFormat::Text => {
            let ctx = report_context(store, "%Y-%m-%d %H:%M");
            for line in render_ui(&outcome.results, &outcome.warnings, &ctx) {
                println!("{}", line.text);
            }
        }
    }

    let flagged = outcome
        .results
        .iter()
        .any(|r| r.overall_status() == ComplianceStatus::Fail);
    Ok(if flagged { 2 } else { 0 })
}

fn cmd_report(store: &CatalogStore, args: ReportArgs) -> Result<i32> {
    let batch = read_batch(&args.input)?;
    let catalog = store.load();
    let outcome = validate_then_evaluate(&batch, &catalog);

    if !outcome.errors.is_empty() {
        for error in &outcome.errors {
            eprintln!("ERROR: {error}");
        }
        return Ok(1);
    }

    let ctx = report_context(store, "%Y-%m-%d %H:%M:%S");
    let bytes = match render_document(
        &outcome.results,
        &outcome.warnings,
        &ctx,
        DocumentOptions::default(),
    ) {
        Ok(bytes) => bytes,
        Err(err) => {
            // Not an input problem: surface distinctly from validation
            // errors so callers can tell the two apart.
            eprintln!("report rendering failed: {err}");
            return Ok(3);
        }
    };

    let out = match args.out {
        Some(path) => path,
        None => {
            let stamp = Local::now().format("%Y%m%d_%H%M%S");
            PathBuf::from("reports").join(format!("Analysis_Report_{stamp}.txt"))
        }
    };

    if let Some(parent) = out.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create report directory '{}'", parent.display()))?;
        }
    }
    std::fs::write(&out, bytes).with_context(|| format!("write report '{}'", out.display()))?;

    println!("{}", out.display());
    Ok(0)
}

fn cmd_parameters(store: &CatalogStore, args: ParametersArgs) -> Result<i32> {
    let catalog = store.load();

    for name in catalog.parameter_names() {
        if let Some(record) = catalog.get(&name) {
            println!("{} ({})", record.name, record.unit);
        }
    }

    if args.show_version {
        let label = store.version_label();
        if !label.is_empty() {
            println!("Standards database: {label}");
        }
    }

    Ok(0)
}

fn cmd_validate(path: &Path) -> Result<i32> {
    let catalog = read_document(path)?;
    let issues = lint_catalog(&catalog);

    if issues.is_empty() {
        println!("catalog OK: {} parameter(s)", catalog.parameters.len());
        return Ok(0);
    }

    for issue in &issues {
        println!("{issue}");
    }
    Ok(1)
}

/// Read a measurement batch from a file or stdin.
fn read_batch(path: &Path) -> Result<Vec<MeasurementInput>> {
    let text = if path.as_os_str() == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("read batch from stdin")?;
        buf
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("read batch '{}'", path.display()))?
    };

    let value: serde_json::Value = serde_json::from_str(&text).context("parse batch JSON")?;
    let items = match value {
        serde_json::Value::Array(_) => value,
        serde_json::Value::Object(ref map) => map
            .get("batch")
            .cloned()
            .context("batch object must contain a 'batch' array")?,
        _ => bail!("batch must be an array or an object with a 'batch' array"),
    };

    let batch: Vec<MeasurementInput> =
        serde_json::from_value(items).context("parse batch items")?;
    if batch.is_empty() {
        bail!("batch must be a non-empty array");
    }
    Ok(batch)
}

fn report_context(store: &CatalogStore, timestamp_format: &str) -> ReportContext {
    ReportContext {
        catalog_version: store.version_label(),
        generated_at: Local::now().format(timestamp_format).to_string(),
    }
}
