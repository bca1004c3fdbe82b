//! inclint CLI - include-what-you-use checks for C/C++ build targets.
//!
//! Two subcommands:
//! - `analyze`: evaluates preprocessed include lists against the direct
//!   dependencies of a target and writes a JSON report
//! - `extract`: produces include lists without a preprocessor by scanning
//!   source files and resolving their includes via include paths

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::fs;
use std::path::PathBuf;

use inclint_core::{
    init_structured_logging, log_error, log_event, log_info, log_warn, print_plain,
    scan_source_files, write_json_report, Inclint, InclintError, IncludePathResolver,
};

#[derive(Parser, Debug)]
#[command(author, version, about = "Include-what-you-use checker for C/C++ targets")]
pub struct Cli {
    /// Enable debug logging on stderr
    #[arg(long, global = true)]
    verbose: bool,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Check the includes of a target against its direct dependencies
    Analyze(AnalyzeArgs),
    /// Extract and resolve includes of source files without preprocessing
    Extract(ExtractArgs),
}

#[derive(Args, Debug)]
struct AnalyzeArgs {
    /// Where to write the JSON report
    #[arg(long, value_name = "FILE")]
    output: PathBuf,

    /// Descriptor of the target under inspection
    #[arg(long, value_name = "FILE")]
    target_under_inspection: PathBuf,

    /// Include lists of the public files
    #[arg(long, num_args = 0.., value_name = "FILE")]
    preprocessed_public_files: Vec<PathBuf>,

    /// Include lists of the private files
    #[arg(long, num_args = 0.., value_name = "FILE")]
    preprocessed_private_files: Vec<PathBuf>,

    /// Descriptors of the public dependencies
    #[arg(long, num_args = 0.., value_name = "FILE")]
    deps: Vec<PathBuf>,

    /// Descriptors of the implementation dependencies
    #[arg(long, num_args = 0.., value_name = "FILE")]
    implementation_deps: Vec<PathBuf>,

    /// Configuration of includes which are ignored
    #[arg(long, value_name = "FILE")]
    ignored_includes_config: Option<PathBuf>,

    /// Report public dependencies which are only used by private files
    #[arg(long)]
    optimize_implementation_deps: bool,
}

#[derive(Args, Debug)]
struct ExtractArgs {
    /// Source files to scan
    #[arg(long, num_args = 1.., required = true, value_name = "FILE")]
    files: Vec<PathBuf>,

    /// Directories searched for includes
    #[arg(long, num_args = 0.., value_name = "DIR")]
    include_paths: Vec<PathBuf>,

    /// Directories searched for includes after the include paths
    #[arg(long, num_args = 0.., value_name = "DIR")]
    system_include_paths: Vec<PathBuf>,

    /// Where to write the include list
    #[arg(long, value_name = "FILE")]
    output: PathBuf,
}

fn main() -> Result<()> {
    std::panic::set_hook(Box::new(|info| {
        eprintln!("[PANIC] inclint internal error: {}", info);
        eprintln!("[PANIC] The analysis result is unknown, treat the check as failed.");
    }));

    let cli = Cli::parse();

    init_structured_logging(cli.json_logs, cli.verbose);

    let outcome = match &cli.command {
        Command::Analyze(args) => run_analyze(args),
        Command::Extract(args) => run_extract(args),
    };

    let success = match outcome {
        Ok(success) => success,
        Err(err) => {
            let input_error = err.downcast_ref::<InclintError>();
            let detail = match input_error.and_then(InclintError::path) {
                Some(path) => format!("failed on input {}: {:#}", path.display(), err),
                None => format!("{:#}", err),
            };
            if input_error.is_some_and(InclintError::is_recoverable) {
                log_warn(&detail);
            } else {
                log_error(&detail);
            }
            return Err(err);
        }
    };

    std::process::exit(if success { 0 } else { 1 });
}

fn analyzer_for(args: &AnalyzeArgs) -> Inclint {
    let mut analyzer = Inclint::new(&args.target_under_inspection)
        .deps(&args.deps)
        .implementation_deps(&args.implementation_deps)
        .public_include_files(&args.preprocessed_public_files)
        .private_include_files(&args.preprocessed_private_files)
        .optimize_implementation_deps(args.optimize_implementation_deps);

    if let Some(config) = &args.ignored_includes_config {
        if !config.exists() {
            log_warn(&format!(
                "ignored includes config {} does not exist, nothing is ignored",
                config.display()
            ));
        }
        analyzer = analyzer.ignored_includes_config(config);
    }

    analyzer
}

fn run_analyze(args: &AnalyzeArgs) -> Result<bool> {
    let result = analyzer_for(args).analyze()?;

    write_json_report(&result, &args.output)
        .with_context(|| format!("Failed to write report to {}", args.output.display()))?;

    log_event(
        "analysis",
        &format!("{} findings for {}", result.finding_count(), result.target()),
    );

    if !result.is_ok() {
        print_plain(&result, &args.output.to_string_lossy());
    }

    Ok(result.is_ok())
}

fn run_extract(args: &ExtractArgs) -> Result<bool> {
    let resolver =
        IncludePathResolver::new(args.include_paths.clone(), args.system_include_paths.clone());

    let scanned = scan_source_files(&args.files, &resolver)?;

    let json = serde_json::to_string_pretty(&scanned)?;
    fs::write(&args.output, json)
        .with_context(|| format!("Failed to write include list to {}", args.output.display()))?;

    log_info(&format!(
        "extracted includes of {} files into {}",
        scanned.len(),
        args.output.display()
    ));

    Ok(true)
}
