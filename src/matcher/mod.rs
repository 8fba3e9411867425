//! Matching logic for junctions to gene intervals.

pub mod containment;

pub use containment::{find_gene, GeneLookup};
