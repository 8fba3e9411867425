//! Junction-to-gene containment matching.
//!
//! A junction belongs to the first gene, in gene index order, whose interval
//! contains both junction endpoints on the same chromosome. Overlapping genes
//! are never ranked by size or position.

use ahash::AHashMap;

use crate::types::{GeneIndex, Interval, Junction};

/// Find the gene containing a junction by scanning the whole index.
pub fn find_gene<'a>(junction: &Junction, genes: &'a GeneIndex) -> Option<&'a str> {
    genes
        .iter()
        .find(|(_, interval)| interval.contains(junction))
        .map(|(gene_id, _)| gene_id)
}

/// Gene index bucketed by chromosome.
///
/// Each bucket keeps gene index order, so [`GeneLookup::find`] returns the
/// same gene as [`find_gene`] while only scanning one chromosome.
pub struct GeneLookup<'a> {
    by_chrom: AHashMap<&'a str, Vec<(&'a str, &'a Interval)>>,
}

impl<'a> GeneLookup<'a> {
    /// Build the lookup from a gene index.
    pub fn new(genes: &'a GeneIndex) -> Self {
        let mut by_chrom: AHashMap<&'a str, Vec<(&'a str, &'a Interval)>> = AHashMap::new();
        for (gene_id, interval) in genes.iter() {
            by_chrom
                .entry(interval.chrom.as_str())
                .or_default()
                .push((gene_id, interval));
        }
        GeneLookup { by_chrom }
    }

    /// Find the gene containing a junction.
    pub fn find(&self, junction: &Junction) -> Option<&'a str> {
        self.by_chrom
            .get(junction.chrom.as_str())?
            .iter()
            .find(|(_, interval)| interval.contains(junction))
            .map(|&(gene_id, _)| gene_id)
    }

    /// Number of chromosomes with at least one gene.
    pub fn num_chroms(&self) -> usize {
        self.by_chrom.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn genes() -> GeneIndex {
        [
            ("GENE1", Interval::new("chr1", 1000, 2000)),
            ("GENE2", Interval::new("chr1", 3000, 4000)),
            ("GENE3", Interval::new("chr2", 1000, 2000)),
        ]
        .into_iter()
        .map(|(id, iv)| (id.to_string(), iv))
        .collect()
    }

    #[test]
    fn test_find_gene_inside() {
        let genes = genes();
        assert_eq!(find_gene(&Junction::new("chr1", 1100, 1200), &genes), Some("GENE1"));
        assert_eq!(find_gene(&Junction::new("chr1", 3000, 4000), &genes), Some("GENE2"));
        assert_eq!(find_gene(&Junction::new("chr2", 1100, 1200), &genes), Some("GENE3"));
    }

    #[test]
    fn test_find_gene_no_match() {
        let genes = genes();
        // Between genes
        assert_eq!(find_gene(&Junction::new("chr1", 2500, 2600), &genes), None);
        // Different chromosome
        assert_eq!(find_gene(&Junction::new("chr3", 1100, 1200), &genes), None);
        // Straddles a gene boundary
        assert_eq!(find_gene(&Junction::new("chr1", 1900, 2100), &genes), None);
        assert_eq!(find_gene(&Junction::new("chr1", 900, 1100), &genes), None);
    }

    #[test]
    fn test_first_gene_wins() {
        let genes: GeneIndex = [
            ("WIDE", Interval::new("chr1", 100, 10000)),
            ("NARROW", Interval::new("chr1", 1000, 2000)),
        ]
        .into_iter()
        .map(|(id, iv)| (id.to_string(), iv))
        .collect();

        let junction = Junction::new("chr1", 1100, 1200);
        assert_eq!(find_gene(&junction, &genes), Some("WIDE"));
        assert_eq!(GeneLookup::new(&genes).find(&junction), Some("WIDE"));
    }

    #[test]
    fn test_lookup_matches_linear_scan() {
        let genes: GeneIndex = [
            ("B", Interval::new("chr1", 500, 900)),
            ("A", Interval::new("chr2", 0, 5000)),
            ("C", Interval::new("chr1", 0, 1000)),
            ("D", Interval::new("chr1", 800, 1200)),
        ]
        .into_iter()
        .map(|(id, iv)| (id.to_string(), iv))
        .collect();
        let lookup = GeneLookup::new(&genes);
        assert_eq!(lookup.num_chroms(), 2);

        for chrom in ["chr1", "chr2", "chr3"] {
            for start in (0..1300).step_by(50) {
                for len in [0, 10, 150, 400] {
                    let junction = Junction::new(chrom, start, start + len);
                    assert_eq!(lookup.find(&junction), find_gene(&junction, &genes));
                }
            }
        }
    }
}
