//! Gene summary table parser with gzip support.
//!
//! Reads tab-separated gene summaries whose third column holds a location
//! such as `TGME49_chrVIII:6,631,349..6,636,865(+)`. Rows that cannot be
//! parsed are skipped.

use anyhow::{Context, Result};
use log::debug;
use std::fs::File;
use std::io::BufRead;
use std::path::Path;

use crate::config::Config;
use crate::parser::util::create_buffered_reader;
use crate::types::{GeneIndex, Interval};

/// Parse a single gene summary line into `(gene_id, interval)`.
///
/// Returns `None` for blank lines, lines with fewer than 3 columns and lines
/// whose location column is malformed.
pub fn parse_gene_line(line: &str) -> Option<(String, Interval)> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return None;
    }

    let fields: Vec<&str> = trimmed.split('\t').collect();
    if fields.len() < 3 {
        return None;
    }

    let interval: Interval = fields[2].parse().ok()?;
    Some((fields[0].to_string(), interval))
}

/// Parse a gene summary file.
///
/// Supports both plain text and gzip-compressed tables.
pub fn parse_genes(path: &Path, config: &Config) -> Result<GeneIndex> {
    let file = File::open(path).context("Failed to open gene summary file")?;
    let reader = create_buffered_reader(file, path);

    parse_gene_reader(reader, config)
}

/// Parse a gene summary table from a reader.
pub fn parse_gene_reader<R: BufRead>(reader: R, config: &Config) -> Result<GeneIndex> {
    let mut genes = GeneIndex::new();
    let mut skipped = 0usize;

    for (line_no, line_result) in reader.lines().enumerate() {
        let line = line_result.context("Failed to read gene summary line")?;

        if line_no == 0 && config.is_header_line(&line) {
            debug!("Skipping gene summary header: {}", line.trim_end());
            continue;
        }

        match parse_gene_line(&line) {
            Some((gene_id, interval)) => genes.insert(gene_id, interval),
            None if line.trim().is_empty() => {}
            None => skipped += 1,
        }
    }

    debug!(
        "Gene summary: {} genes loaded, {} malformed lines skipped",
        genes.len(),
        skipped
    );

    Ok(genes)
}
