//! CLI command handlers
//!
//! Handlers overlay CLI flags on the environment-derived configuration, run
//! the pipeline, and emit the report. Pipeline failures are not crashes: the
//! report is still emitted with `error_message` set and the process exits 0,
//! because the calling pipeline branches on outputs, not exit codes. Only
//! invalid configuration exits non-zero (that is caller error).

use crate::cli::commands::{ConvertArgs, DetectArgs};
use crate::cli::output::{OutputFormat, OutputFormatter};
use crate::config::{split_page_paths, PackmorphConfig};
use crate::error::PipelineError;
use crate::output::ConversionReport;
use crate::pipeline::ConversionService;
use std::env;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;
use tracing::error;

/// Handles the `detect` subcommand
pub async fn handle_detect(args: &DetectArgs) -> i32 {
    let mut config = PackmorphConfig::default();
    if let Some(dir) = &args.contents_dir {
        config.contents_dir = dir.clone();
    }
    apply_shared_overrides(&mut config, args.page_paths.as_deref(), args.policy);

    if let Err(err) = config.validate() {
        eprintln!("{}", err);
        return 2;
    }

    let service = ConversionService::new(config);
    let report = into_report(service.detect().await);

    emit(&report, args.format.into(), args.output.as_deref())
}

/// Handles the `convert` subcommand
pub async fn handle_convert(args: &ConvertArgs) -> i32 {
    let mut config = PackmorphConfig::default();
    if let Some(dir) = &args.contents_dir {
        config.contents_dir = dir.clone();
    }
    if let Some(name) = &args.repo_name {
        config.repo_name = Some(name.clone());
    }
    apply_shared_overrides(&mut config, args.page_paths.as_deref(), args.policy);

    if let Err(err) = config.validate() {
        eprintln!("{}", err);
        return 2;
    }

    let service = ConversionService::new(config);
    let report = into_report(service.convert().await);

    emit(&report, args.format.into(), args.output.as_deref())
}

fn apply_shared_overrides(
    config: &mut PackmorphConfig,
    page_paths: Option<&str>,
    policy: Option<crate::cli::commands::PolicyArg>,
) {
    if let Some(raw) = page_paths {
        let parsed = split_page_paths(raw);
        config.page_paths = if parsed.is_empty() { None } else { Some(parsed) };
    }
    if let Some(policy) = policy {
        config.policy = policy.into();
    }
}

/// Converts a pipeline result to a report, folding errors into
/// `error_message`
fn into_report(result: Result<ConversionReport, PipelineError>) -> ConversionReport {
    match result {
        Ok(report) => report,
        Err(err) => {
            error!("{}", err.help_message());
            ConversionReport::failed(err.to_string())
        }
    }
}

/// Formats and writes the report, returning the process exit code
fn emit(report: &ConversionReport, format: OutputFormat, output_path: Option<&Path>) -> i32 {
    let formatter = OutputFormatter::new(format);
    let formatted = match formatter.format(report) {
        Ok(formatted) => formatted,
        Err(err) => {
            eprintln!("Failed to format output: {}", err);
            return 1;
        }
    };

    if let Some(path) = output_path {
        if let Err(err) = std::fs::write(path, &formatted) {
            eprintln!("Failed to write output to {}: {}", path.display(), err);
            return 1;
        }
    } else {
        print!("{}", formatted);
    }

    // GitHub Actions picks outputs up from the file named by GITHUB_OUTPUT.
    if format == OutputFormat::Github {
        if let Ok(github_output) = env::var("GITHUB_OUTPUT") {
            if let Err(err) = append_github_outputs(Path::new(&github_output), report) {
                eprintln!("Failed to write GITHUB_OUTPUT: {}", err);
                return 1;
            }
        }
    }

    0
}

fn append_github_outputs(path: &Path, report: &ConversionReport) -> std::io::Result<()> {
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    for (key, value) in report.ci_outputs() {
        writeln!(file, "{}={}", key, value)?;
    }
    Ok(())
}
