//! sjcount - Splice junction counting library.
//!
//! This library extracts intron junctions from SAM alignments, counts how
//! often each junction occurs and assigns junctions to the genes that
//! contain them.
//!
//! # Features
//!
//! - Interpret CIGAR strings (`M`, `D`, `N`) into junction intervals
//! - Keep only uniquely mapped (`NH:i:1`) spliced alignments
//! - Parse gene summary tables (with gzip support) tolerantly
//! - Assign each junction to the first gene that contains it
//! - Write a per-gene report sorted by gene and junction start
//!
//! # Example
//!
//! ```ignore
//! use sjcount::config::Config;
//! use sjcount::parser::{parse_genes, parse_sam};
//! use sjcount::output::analyze_junctions;
//! use std::path::Path;
//!
//! let config = Config::default();
//! let counts = parse_sam(Path::new("sample.sam"))?;
//! let genes = parse_genes(Path::new("genes.txt"), &config)?;
//!
//! let mut out = std::io::stdout();
//! let num_genes = analyze_junctions(&counts, &genes, &mut out, &config)?;
//! ```

pub mod config;
pub mod matcher;
pub mod output;
pub mod parser;
pub mod types;

pub use config::Config;
pub use output::{GeneJunctionReport, ReportEntry};
pub use types::{GeneIndex, HeaderPolicy, Interval, Junction, JunctionCounts};
