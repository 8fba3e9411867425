//! Core data structures for sjcount.
//!
//! This module contains the genomic interval type shared by junctions and
//! genes, the junction count table and the ordered gene index.

use ahash::AHashMap;
use indexmap::IndexMap;
use std::fmt;
use std::str::FromStr;

/// A genomic interval on one chromosome.
///
/// Coordinates are taken verbatim from the input (1-based, inclusive);
/// `start <= end` is not enforced.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Interval {
    pub chrom: String,
    pub start: i64,
    pub end: i64,
}

impl Interval {
    /// Create a new interval.
    pub fn new(chrom: impl Into<String>, start: i64, end: i64) -> Self {
        Interval {
            chrom: chrom.into(),
            start,
            end,
        }
    }

    /// Check whether `pos` lies within `[start, end]`.
    pub fn contains_pos(&self, pos: i64) -> bool {
        self.start <= pos && pos <= self.end
    }

    /// Check whether `other` lies entirely within this interval on the same chromosome.
    pub fn contains(&self, other: &Interval) -> bool {
        self.chrom == other.chrom && self.contains_pos(other.start) && self.contains_pos(other.end)
    }

    /// Get the interval length (end - start).
    pub fn length(&self) -> i64 {
        self.end - self.start
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}..{}", self.chrom, self.start, self.end)
    }
}

/// A skipped reference region inferred from a single alignment.
pub type Junction = Interval;

/// Occurrence count per distinct junction.
pub type JunctionCounts = AHashMap<Junction, u64>;

/// Error type for parsing a gene location string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseLocationError {
    /// No `:` between chromosome and coordinates.
    MissingColon,
    /// Coordinates are not exactly `<start>..<end>`.
    MissingRange,
    /// A coordinate is not an integer.
    InvalidCoordinate(String),
}

impl fmt::Display for ParseLocationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseLocationError::MissingColon => {
                write!(f, "invalid location: expected '<chrom>:<start>..<end>'")
            }
            ParseLocationError::MissingRange => {
                write!(f, "invalid location: expected '<start>..<end>' range")
            }
            ParseLocationError::InvalidCoordinate(s) => {
                write!(f, "invalid location coordinate: '{}'", s)
            }
        }
    }
}

impl std::error::Error for ParseLocationError {}

fn parse_coordinate(s: &str) -> Result<i64, ParseLocationError> {
    let cleaned: String = s.chars().filter(|&c| c != ',').collect();
    cleaned
        .trim()
        .parse()
        .map_err(|_| ParseLocationError::InvalidCoordinate(s.to_string()))
}

/// Parses gene-summary locations such as `chrVIII:6,631,349..6,636,865(+)`.
///
/// The strand annotation is dropped and thousands separators are allowed.
impl FromStr for Interval {
    type Err = ParseLocationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if !s.contains("..") {
            return Err(ParseLocationError::MissingRange);
        }
        let (chrom, coords) = s.split_once(':').ok_or(ParseLocationError::MissingColon)?;
        let coords = coords.split('(').next().unwrap_or_default();

        let mut halves = coords.split("..");
        let (start, end) = match (halves.next(), halves.next(), halves.next()) {
            (Some(start), Some(end), None) => (start, end),
            _ => return Err(ParseLocationError::MissingRange),
        };

        Ok(Interval::new(
            chrom,
            parse_coordinate(start)?,
            parse_coordinate(end)?,
        ))
    }
}

/// Gene intervals keyed by gene identifier, in file order.
///
/// Re-inserting an identifier replaces its interval but keeps its original
/// position, so iteration order is the order in which ids first appeared.
#[derive(Debug, Clone, Default)]
pub struct GeneIndex {
    genes: IndexMap<String, Interval>,
}

impl GeneIndex {
    /// Create an empty gene index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a gene.
    pub fn insert(&mut self, gene_id: String, interval: Interval) {
        self.genes.insert(gene_id, interval);
    }

    /// Look up a gene interval by identifier.
    pub fn get(&self, gene_id: &str) -> Option<&Interval> {
        self.genes.get(gene_id)
    }

    /// Iterate genes in index order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Interval)> {
        self.genes.iter().map(|(id, interval)| (id.as_str(), interval))
    }

    pub fn len(&self) -> usize {
        self.genes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.genes.is_empty()
    }
}

impl FromIterator<(String, Interval)> for GeneIndex {
    fn from_iter<T: IntoIterator<Item = (String, Interval)>>(iter: T) -> Self {
        let mut index = GeneIndex::new();
        for (gene_id, interval) in iter {
            index.insert(gene_id, interval);
        }
        index
    }
}

/// How the first line of a gene-summary table is recognised as a header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderPolicy {
    /// First line is a header unless it starts with the gene id prefix.
    Prefix,
    /// First line is parsed like any other; a header falls out because its
    /// location column does not parse.
    Shape,
}

/// Error type for parsing header policy from string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseHeaderPolicyError;

impl fmt::Display for ParseHeaderPolicyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid header policy: expected 'prefix' or 'shape'")
    }
}

impl std::error::Error for ParseHeaderPolicyError {}

impl FromStr for HeaderPolicy {
    type Err = ParseHeaderPolicyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "prefix" => Ok(HeaderPolicy::Prefix),
            "shape" => Ok(HeaderPolicy::Shape),
            _ => Err(ParseHeaderPolicyError),
        }
    }
}
