//! Configuration and defaults for sjcount.
//!
//! This module contains the configuration structure and default values
//! that control gene-table parsing and report layout.

use crate::types::HeaderPolicy;

/// Gene identifier prefix of the ToxoDB (`Toxoplasma gondii` ME49) gene summaries.
pub const DEFAULT_GENE_ID_PREFIX: &str = "TGME49_";

/// Fixed header row of the junction report.
pub const REPORT_HEADER: &str = "Gene_ID\tJunction_Start\tJunction_End\tCount";

/// Suffix appended to the SAM file stem to derive the default output path.
pub const DEFAULT_OUTPUT_SUFFIX: &str = "_junctions.txt";

/// Configuration for gene-table parsing and report rendering.
#[derive(Debug, Clone)]
pub struct Config {
    /// How the first line of the gene table is recognised as a header.
    pub header_policy: HeaderPolicy,
    /// Identifier prefix marking a data row under [`HeaderPolicy::Prefix`].
    pub gene_id_prefix: String,
    /// Write a blank line between gene groups in the report.
    pub separate_genes: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            header_policy: HeaderPolicy::Prefix,
            gene_id_prefix: DEFAULT_GENE_ID_PREFIX.to_string(),
            separate_genes: true,
        }
    }
}

impl Config {
    /// Create a new config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Decide whether the first line of a gene table should be discarded.
    pub fn is_header_line(&self, first_line: &str) -> bool {
        match self.header_policy {
            HeaderPolicy::Prefix => !first_line.starts_with(&self.gene_id_prefix),
            HeaderPolicy::Shape => false,
        }
    }
}
