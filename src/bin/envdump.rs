//! envdump: write every match-environment value to its own file
//!
//! Usage:
//!   # One file per variable, named <uuid>.txt, under ./corpus
//!   some-matcher --json-lines | envdump ./corpus .txt
//!
//!   # Show a summary (-v) or every file written (-vv) on stderr
//!   envdump -vv ./corpus .seed < matches.jsonl
//!
//! Stdout stays silent on success. The first line that is not valid JSON is
//! echoed as `issue: <line>` and the process exits with status 1.

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use anyhow::{Context, Result};
use clap::Parser;
use envdump::{ExtractConfig, LineExtractor};
use std::io::stdin;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::Level;

#[derive(Parser, Debug)]
#[command(name = "envdump")]
#[command(about = "Dump match environment values into one file each", long_about = None)]
struct Args {
    /// Existing directory to write files into
    #[arg(value_name = "OUTPUT_DIR")]
    output_dir: PathBuf,

    /// Appended to each generated file name (include the leading dot)
    #[arg(value_name = "EXTENSION", allow_hyphen_values = true)]
    extension: String,

    /// Log to stderr: -v for a summary, -vv per file, -vvv per line
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<ExitCode> {
    let args = Args::parse();
    init_logging(args.verbose);

    let config = ExtractConfig::new(args.output_dir, args.extension);
    let mut extractor = LineExtractor::new(config.clone())
        .with_context(|| format!("Cannot write to {}", config.output_dir.display()))?;

    match extractor.run(stdin().lock()) {
        Ok(_) => Ok(ExitCode::SUCCESS),
        Err(err) => match err.malformed_line() {
            Some(line) => {
                println!("issue: {}", line);
                tracing::info!(processed = extractor.summary().lines, "aborting on malformed line");
                Ok(ExitCode::FAILURE)
            }
            None => Err(err).context("Extraction failed"),
        },
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
