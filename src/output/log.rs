//! Prune log
//!
//! Every pruning decision is recorded here with enough context (artist name
//! or record id) to locate the cause. The log is overwritten at the start of
//! each run.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::Result;

/// Append-only log of pruning decisions for one run
pub struct PruneLog {
    writer: BufWriter<File>,
}

impl PruneLog {
    /// Creates the log file, truncating any previous run's log
    pub fn create(path: &Path) -> Result<Self> {
        Ok(Self {
            writer: BufWriter::new(File::create(path)?),
        })
    }

    /// Records one pruning decision
    pub fn record(&mut self, context: &str, reason: &str) -> Result<()> {
        writeln!(self.writer, "Download unsuccessful for {}: {}", context, reason)?;
        self.writer.flush()?;
        Ok(())
    }
}
