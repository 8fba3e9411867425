//! SAM alignment parsing and junction counting.
//!
//! Streams SAM text line by line, keeps uniquely mapped spliced reads and
//! counts the junctions their CIGAR strings describe.

use anyhow::{Context, Result};
use log::debug;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::parser::cigar::extract_junctions;
use crate::types::JunctionCounts;

const NH_TAG: &str = "NH:i:";

/// Extract the value of the first `NH:i:<digits>` tag found anywhere in a line.
pub fn parse_nh_tag(line: &str) -> Option<u64> {
    line.match_indices(NH_TAG).find_map(|(idx, _)| {
        let rest = &line[idx + NH_TAG.len()..];
        let digits_len = rest.bytes().take_while(|b| b.is_ascii_digit()).count();
        if digits_len == 0 {
            return None;
        }
        // An overflowing count can never be 1
        Some(rest[..digits_len].parse().unwrap_or(u64::MAX))
    })
}

/// The fields of a SAM alignment line needed for junction extraction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SamRecord<'a> {
    /// Reference name (column 3).
    pub chrom: &'a str,
    /// Leftmost mapping position (column 4).
    pub pos: i64,
    /// CIGAR string (column 6).
    pub cigar: &'a str,
    /// Value of the NH tag, if present.
    pub nh: Option<u64>,
}

impl<'a> SamRecord<'a> {
    /// Parse a SAM line.
    ///
    /// Returns `None` for header lines, lines with fewer than 6 columns and
    /// lines whose position is not an integer.
    pub fn parse(line: &'a str) -> Option<Self> {
        if line.starts_with('@') {
            return None;
        }

        let fields: Vec<&str> = line.trim().split('\t').collect();
        if fields.len() < 6 {
            return None;
        }

        let pos: i64 = fields[3].trim().parse().ok()?;

        Some(SamRecord {
            chrom: fields[2],
            pos,
            cigar: fields[5],
            nh: parse_nh_tag(line),
        })
    }

    /// Uniquely mapped (`NH:i:1`) with at least one skip in the CIGAR.
    pub fn is_eligible(&self) -> bool {
        self.nh == Some(1) && self.cigar.contains('N')
    }
}

/// Decide whether a SAM line contributes junctions.
pub fn is_eligible(line: &str) -> bool {
    SamRecord::parse(line).is_some_and(|record| record.is_eligible())
}

/// Add the junctions of one SAM line to `counts`.
///
/// Returns whether the line was eligible. A record whose coordinates overflow
/// is skipped as a whole.
fn count_line(line: &str, counts: &mut JunctionCounts) -> bool {
    let record = match SamRecord::parse(line) {
        Some(r) if r.is_eligible() => r,
        _ => return false,
    };

    let Some(junctions) = extract_junctions(record.cigar, record.pos, record.chrom) else {
        debug!(
            "Skipping alignment on {} at {}: CIGAR {} overflows coordinates",
            record.chrom, record.pos, record.cigar
        );
        return false;
    };

    for junction in junctions {
        *counts.entry(junction).or_insert(0) += 1;
    }
    true
}

/// Count junctions over in-memory SAM lines.
pub fn count_junctions<I, S>(lines: I) -> JunctionCounts
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut counts = JunctionCounts::default();
    for line in lines {
        count_line(line.as_ref(), &mut counts);
    }
    counts
}

/// Count junctions from a SAM stream.
///
/// Fails only if the stream itself cannot be read.
pub fn count_junctions_reader<R: BufRead>(reader: R) -> Result<JunctionCounts> {
    let mut counts = JunctionCounts::default();
    let mut lines_read = 0usize;
    let mut eligible = 0usize;

    for line_result in reader.lines() {
        let line = line_result.context("Failed to read SAM line")?;
        lines_read += 1;

        if count_line(&line, &mut counts) {
            eligible += 1;
        }
    }

    debug!(
        "SAM: {} lines read, {} uniquely mapped spliced alignments, {} distinct junctions",
        lines_read,
        eligible,
        counts.len()
    );

    Ok(counts)
}

/// Count junctions in a SAM file.
pub fn parse_sam(path: &Path) -> Result<JunctionCounts> {
    let file = File::open(path).context("Failed to open SAM file")?;
    count_junctions_reader(BufReader::new(file))
}
