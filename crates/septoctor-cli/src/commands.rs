use std::fs;

use anyhow::{Context, Result};
use tracing::info;

use septoctor_cli::settings::resolve_config;
use septoctor_cli::summary::{print_decision, print_rejection, print_report, print_schema};
use septoctor_core::IntakePipeline;

use crate::cli::{CheckArgs, Cli, IngestArgs};

/// Runs the full pipeline. Returns whether the file was accepted.
pub fn run_ingest(cli: &Cli, args: &IngestArgs) -> Result<bool> {
    let config = resolve_config(&cli.overrides())?;
    let schema = config.load_schema().context("load canonical schema")?;
    let pipeline =
        IntakePipeline::from_config(&schema, &config).context("configure intake pipeline")?;

    let report = match pipeline.ingest_path(&args.file) {
        Ok(report) => report,
        Err(rejection) => {
            print_rejection(&rejection);
            return Ok(false);
        }
    };

    if args.json || args.output.is_some() {
        let json = serde_json::to_string_pretty(&report.output).context("serialize output")?;
        match &args.output {
            Some(path) => {
                fs::write(path, format!("{json}\n"))
                    .with_context(|| format!("write {}", path.display()))?;
                info!(path = %path.display(), "output written");
                println!("{}", report.message);
            }
            None => println!("{json}"),
        }
    } else {
        print_report(&report, &schema);
    }
    Ok(true)
}

/// Runs the intake gate and relevance screen. Returns whether the file passed.
pub fn run_check(cli: &Cli, args: &CheckArgs) -> Result<bool> {
    let config = resolve_config(&cli.overrides())?;
    let schema = config.load_schema().context("load canonical schema")?;
    let pipeline = IntakePipeline::new(&schema)
        .with_limits(config.limits)
        .with_relevance(config.relevance.clone());

    let metadata = fs::metadata(&args.file)
        .with_context(|| format!("read metadata of {}", args.file.display()))?;
    let filename = args
        .file
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| args.file.display().to_string());

    let decision = pipeline.check(&filename, metadata.len());
    print_decision(&decision);
    Ok(decision.accepted)
}

pub fn run_schema(cli: &Cli) -> Result<()> {
    let config = resolve_config(&cli.overrides())?;
    let schema = config.load_schema().context("load canonical schema")?;
    print_schema(&schema);
    Ok(())
}
