// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// The two inputs a run needs are the collection URL and the output name.
// Both can be given as positional arguments; whichever is missing is asked
// for interactively, so the tool can still be run by double-click / bare
// invocation and answered at the prompt.
//
// Everything else (pagination, concurrency, origin, timeout) has a default
// and can be tuned with flags.
// =============================================================================

use clap::Parser;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::time::Duration;

use crate::config::{
    PipelineConfig, DEFAULT_CONCURRENCY, DEFAULT_ORIGIN, DEFAULT_PAGE_SIZE, DEFAULT_TIMEOUT_SECS,
    DEFAULT_TOTAL,
};
use crate::error::{Result, ScrapeError};

#[derive(Parser, Debug)]
#[command(
    name = "app-contacts",
    version,
    about = "Export developer contact emails for every app in a store collection",
    long_about = "app-contacts pages through an app-store collection listing, visits each app's \
                  details page, and writes the app name and developer email to a CSV file."
)]
pub struct Cli {
    /// Collection listing URL (prompted for if omitted)
    pub collection_url: Option<String>,

    /// Output file name without extension; ".csv" is appended (prompted for if omitted)
    pub output: Option<String>,

    /// Number of listing items to cover
    #[arg(long, default_value_t = DEFAULT_TOTAL)]
    pub total: usize,

    /// Items requested per listing page
    #[arg(long, default_value_t = DEFAULT_PAGE_SIZE)]
    pub page_size: usize,

    /// Batch size for the detail-fetch and write stages
    #[arg(long, default_value_t = DEFAULT_CONCURRENCY)]
    pub concurrency: usize,

    /// Maximum requests in flight at once
    #[arg(long, default_value_t = DEFAULT_CONCURRENCY)]
    pub workers: usize,

    /// Origin that relative app links are resolved against
    #[arg(long, default_value = DEFAULT_ORIGIN)]
    pub origin: String,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout_secs: u64,

    /// Print the run summary as JSON
    #[arg(long)]
    pub json: bool,

    /// Log at debug level (RUST_LOG overrides this)
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Builds the run config, prompting on stdin for missing inputs.
    pub fn into_config(self) -> Result<PipelineConfig> {
        let collection_url = match self.collection_url {
            Some(url) => url,
            None => prompt("Enter PlayStore Collection URL")?,
        };
        let output = match self.output {
            Some(name) => name,
            None => prompt("Enter File Name")?,
        };

        let mut config = PipelineConfig::new(collection_url, output_path(&output)?);
        config.origin = self.origin;
        config.total_estimate = self.total;
        config.page_size = self.page_size;
        config.concurrency = self.concurrency;
        config.workers = self.workers;
        config.request_timeout = Duration::from_secs(self.timeout_secs);
        Ok(config)
    }
}

// "contacts" -> "contacts.csv"
fn output_path(name: &str) -> Result<PathBuf> {
    let name = name.trim();
    if name.is_empty() {
        return Err(ScrapeError::Configuration("output file name is empty".to_string()));
    }
    Ok(PathBuf::from(format!("{name}.csv")))
}

fn prompt(label: &str) -> Result<String> {
    print!("{label}: ");
    io::stdout().flush()?;

    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    let answer = line.trim().to_string();
    if answer.is_empty() {
        return Err(ScrapeError::Configuration(format!("no answer given for '{label}'")));
    }
    Ok(answer)
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why Option<String> for the positional arguments?
//    - clap treats Option fields as optional positionals
//    - None means "not on the command line", so we fall back to the prompt
//
// 2. What is default_value_t?
//    - Sets a typed default (usize, u64, ...) shown in --help
//    - default_value (without _t) takes a string instead, used for --origin
//
// 3. Why flush stdout before reading?
//    - print! doesn't end with a newline, and stdout is line-buffered
//    - Without flush the prompt may not appear before we block on stdin
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positional_inputs_and_defaults() {
        let cli = Cli::parse_from(["app-contacts", "https://example.com/collection", "report"]);
        let config = cli.into_config().unwrap();
        assert_eq!(config.collection_url, "https://example.com/collection");
        assert_eq!(config.output_path, PathBuf::from("report.csv"));
        assert_eq!(config.total_estimate, 540);
        assert_eq!(config.page_size, 120);
        assert_eq!(config.concurrency, 10);
        assert_eq!(config.origin, "https://play.google.com");
    }

    #[test]
    fn test_flags_override_defaults() {
        let cli = Cli::parse_from([
            "app-contacts",
            "https://example.com/c",
            "out",
            "--total",
            "50",
            "--page-size",
            "20",
            "--concurrency",
            "3",
            "--timeout-secs",
            "5",
        ]);
        let config = cli.into_config().unwrap();
        assert_eq!(config.total_estimate, 50);
        assert_eq!(config.page_size, 20);
        assert_eq!(config.concurrency, 3);
        assert_eq!(config.request_timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_blank_output_name_rejected() {
        assert!(output_path("   ").unwrap_err().is_configuration());
        assert_eq!(output_path(" data ").unwrap(), PathBuf::from("data.csv"));
    }
}
