//! Parsers for alignment and annotation inputs.

pub mod cigar;
pub mod genes;
pub mod sam;
pub mod util;

pub use cigar::extract_junctions;
pub use genes::{parse_gene_line, parse_gene_reader, parse_genes};
pub use sam::{count_junctions, count_junctions_reader, is_eligible, parse_sam, SamRecord};
