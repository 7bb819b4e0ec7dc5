use clap::Parser;
use anyhow::Result;
use dotenvy::dotenv;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

mod extract;
mod output;
mod telemetry;
mod util;

use extract::{ErrorRecord, ExtractError, ExtractOptions, PageExtractor};
use telemetry::trace::JsonlTrace;

#[derive(Parser)]
#[command(name = "scrape_single_site", about = "Fetch one web page and print title, text, links and meta description as JSON")]
struct Cli {
    /// Page to fetch; https:// is assumed when no scheme is given
    url: Option<String>,
    /// Append debug checkpoints as JSON lines to this file
    #[arg(long, env = "SCRAPE_TRACE_FILE")]
    trace_file: Option<PathBuf>,
    /// Run identifier stamped on every trace line
    #[arg(long, default_value = "run1")]
    trace_run: String,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    dotenv().ok();
    let cli = Cli::parse();

    // logs go to stderr; stdout carries only the record
    telemetry::config::init_tracing();
    let opts = ExtractOptions::from_env();

    let code = run(cli, opts, &mut io::stdout(), &mut io::stderr()).await?;
    Ok(ExitCode::from(code))
}

/// Failures are reported as data with status 0; only a missing URL exits 1.
async fn run(cli: Cli, opts: ExtractOptions, out: &mut dyn Write, err: &mut dyn Write) -> Result<u8> {
    let Some(url) = cli.url else {
        let record = ErrorRecord::new(&ExtractError::missing_input(), None);
        output::print_error_line(&record, err)?;
        return Ok(1);
    };

    let mut extractor = PageExtractor::new(&opts);
    if let Some(path) = cli.trace_file {
        let trace = JsonlTrace::new(path, cli.trace_run);
        tracing::info!(session = %trace.session_id(), "debug trace enabled");
        extractor = extractor.with_trace(Arc::new(trace));
    }

    let outcome = extractor.extract(&url).await;
    output::print_record(&outcome, out)?;
    Ok(0)
}
