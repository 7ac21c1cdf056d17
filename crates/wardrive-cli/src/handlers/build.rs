use crate::args::BuildArgs;
use crate::presentation::{ConsoleReporter, RunSummary, stdout_supports_color};
use crate::types::OutputFormat;
use anyhow::{Context, Result};
use std::path::Path;
use wardrive_runtime::{Config, Pipeline, write_geojson};

pub fn handle(
    data_dir: &Path,
    mut config: Config,
    args: BuildArgs,
    format: OutputFormat,
) -> Result<()> {
    if let Some(output) = args.output {
        config.output = Some(output);
    }
    if args.no_jitter {
        config.jitter_degrees = 0.0;
    }
    if args.offline {
        config.oui.offline = true;
    }

    let output_path = config.output_path(data_dir);
    let color = stdout_supports_color();
    let mut reporter = ConsoleReporter::new(format == OutputFormat::Plain, color);

    let outcome = Pipeline::new(data_dir, config)
        .with_seed(args.seed)
        .run(&mut reporter)?;

    let size = write_geojson(&output_path, &outcome.document)
        .with_context(|| format!("Failed to write {}", output_path.display()))?;

    let summary = RunSummary::new(&outcome, &output_path, size);
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&summary)?),
        OutputFormat::Plain => print!("{}", summary.render(color)),
    }

    Ok(())
}
