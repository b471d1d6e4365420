// src/output/sink.rs
// =============================================================================
// The CSV sink for contact records.
//
// Rules:
// - write_header() creates or truncates the file and writes the header row
// - append() adds exactly one row to the end of the file
// - rows are comma-delimited, double-quoted only when needed
// - every row ends with \r\n, the usual CSV line ending
//
// Appends arrive concurrently from a whole batch of apps. Each row is first
// serialized into its own buffer, then written with a single write_all while
// holding the sink's lock, so two rows can never interleave.
// =============================================================================

use csv::{QuoteStyle, Terminator, WriterBuilder};
use std::path::{Path, PathBuf};
use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;
use tracing::debug;

use super::escape::escape_unicode;
use crate::error::Result;
use crate::extract::ContactRecord;

pub const HEADER: [&str; 2] = ["APP NAME", "DEVELOPER EMAIL"];

pub struct ContactSink {
    path: PathBuf,
    lock: Mutex<()>,
}

impl ContactSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        ContactSink {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Truncates the sink and writes the header row. Calling it again resets
    /// the file.
    pub async fn write_header(&self) -> Result<()> {
        let row = encode_row(&HEADER)?;
        let _guard = self.lock.lock().await;
        tokio::fs::write(&self.path, row).await?;
        debug!(path = %self.path.display(), "header written");
        Ok(())
    }

    /// Appends one record. The display name is escaped first.
    pub async fn append(&self, record: &ContactRecord) -> Result<()> {
        let name = escape_unicode(&record.display_name);
        let row = encode_row(&[name.as_str(), record.email.as_str()])?;

        let _guard = self.lock.lock().await;
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await?;
        file.write_all(&row).await?;
        file.flush().await?;
        Ok(())
    }
}

// Serializes one complete line, terminator included
fn encode_row(fields: &[&str]) -> Result<Vec<u8>> {
    let mut writer = WriterBuilder::new()
        .delimiter(b',')
        .quote(b'"')
        .quote_style(QuoteStyle::Necessary)
        .terminator(Terminator::CRLF)
        .from_writer(Vec::new());
    writer.write_record(fields)?;
    let row = writer.into_inner().map_err(|e| e.into_error())?;
    Ok(row)
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why tokio::sync::Mutex<()> instead of std::sync::Mutex?
//    - We hold the lock across .await points (open, write_all, flush)
//    - A std MutexGuard must not be held across an await; tokio's can
//    - The lock guards no data (the ()), only the right to touch the file
//
// 2. Why serialize into a Vec<u8> first?
//    - csv::Writer may write a record in several small pieces
//    - Building the whole line in memory, then one write_all, keeps each row
//      in one piece even with many appends queued up
//
// 3. What does QuoteStyle::Necessary do?
//    - Only quotes a field if it contains the delimiter, a quote, or a newline
//    - Plain stays as-is; Notes, Lists is written wrapped in double quotes
// -----------------------------------------------------------------------------
