// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments using clap (prompting for missing inputs)
// 2. Set up logging
// 3. Build the HTTP transport and the pipeline coordinator
// 4. Run the pipeline and print a summary
// 5. Exit with proper code (0 = success, 1 = run failed, 2 = bad input)
// =============================================================================

mod cli;           // src/cli.rs - command-line parsing and prompts
mod config;        // src/config.rs - run configuration
mod error;         // src/error.rs - typed pipeline errors
mod extract;       // src/extract/ - pulling links and emails out of HTML
mod fetch;         // src/fetch/ - HTTP transport and worker pool
mod output;        // src/output/ - CSV sink
mod pagination;    // src/pagination.rs - listing page requests
mod pipeline;      // src/pipeline/ - the coordinator

use anyhow::{Context, Result};
use clap::Parser;
use std::sync::Arc;
use tracing::error;
use tracing_subscriber::EnvFilter;

use cli::Cli;
use error::ScrapeError;
use fetch::HttpTransport;
use pipeline::{Coordinator, RunSummary};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let exit_code = match run(cli).await {
        Ok(()) => 0,
        Err(e) => {
            error!("run failed: {:#}", e);
            eprintln!("Error: {:#}", e);
            exit_code_for(&e)
        }
    };

    std::process::exit(exit_code);
}

async fn run(cli: Cli) -> Result<()> {
    let json = cli.json;
    let config = cli.into_config().context("reading run inputs")?;

    let transport = HttpTransport::new(config.request_timeout, &config.user_agent)
        .context("setting up the HTTP client")?;

    println!("🔍 Scraping collection: {}", config.collection_url);
    println!("📄 Writing contacts to: {}", config.output_path.display());

    let coordinator = Coordinator::new(config, Arc::new(transport)).context("invalid configuration")?;
    let summary = coordinator.run().await.context("scrape aborted")?;

    print_summary(&summary, json)
}

// RUST_LOG wins; otherwise info, or debug with --verbose
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn exit_code_for(error: &anyhow::Error) -> i32 {
    match error.downcast_ref::<ScrapeError>() {
        Some(e) if e.is_configuration() => 2,
        _ => 1,
    }
}

fn print_summary(summary: &RunSummary, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(summary)?);
    } else {
        println!();
        println!("📊 Summary:");
        println!("   📄 Listing pages: {}", summary.pages);
        println!("   🔗 App links: {}", summary.links);
        println!("   ✅ Rows written: {}", summary.rows);
        println!("   💾 Output: {}", summary.output.display());
    }
    Ok(())
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why does logging go to stderr?
//    - stdout carries the summary (and the JSON with --json)
//    - Keeping logs on stderr means the JSON can be piped to another tool
//
// 2. What does downcast_ref do?
//    - anyhow::Error can wrap any error type
//    - downcast_ref::<ScrapeError>() looks through the context layers and
//      gives us back our own error type if that's what is inside
//
// 3. Why Arc<HttpTransport>?
//    - The transport is shared by every spawned fetch task
//    - Arc is a thread-safe reference counter, so each task can hold a handle
// -----------------------------------------------------------------------------
