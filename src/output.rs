//! Junction report building and formatting.
//!
//! Junctions are grouped under the gene that contains them and written as a
//! tab-separated table, genes in lexicographic order and junctions by start.

use anyhow::Result;
use log::{debug, trace};
use std::collections::BTreeMap;
use std::io::Write;

use crate::config::{Config, REPORT_HEADER};
use crate::matcher::GeneLookup;
use crate::types::{GeneIndex, JunctionCounts};

/// One junction row of the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportEntry {
    pub start: i64,
    pub end: i64,
    pub count: u64,
}

/// Junctions grouped by gene, each list sorted by start.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GeneJunctionReport {
    genes: BTreeMap<String, Vec<ReportEntry>>,
}

impl GeneJunctionReport {
    /// Number of genes with at least one junction.
    pub fn num_genes(&self) -> usize {
        self.genes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.genes.is_empty()
    }

    /// Junction rows for one gene.
    pub fn junctions(&self, gene_id: &str) -> Option<&[ReportEntry]> {
        self.genes.get(gene_id).map(Vec::as_slice)
    }

    /// Iterate genes in lexicographic order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[ReportEntry])> {
        self.genes
            .iter()
            .map(|(gene_id, entries)| (gene_id.as_str(), entries.as_slice()))
    }
}

/// Group counted junctions by containing gene.
///
/// Junctions outside every gene are dropped.
pub fn build_report(counts: &JunctionCounts, genes: &GeneIndex) -> GeneJunctionReport {
    let lookup = GeneLookup::new(genes);
    debug!(
        "Matching {} junctions against {} genes on {} chromosomes",
        counts.len(),
        genes.len(),
        lookup.num_chroms()
    );

    let mut grouped: BTreeMap<String, Vec<ReportEntry>> = BTreeMap::new();
    let mut unmatched = 0usize;

    for (junction, &count) in counts.iter() {
        match lookup.find(junction) {
            Some(gene_id) => grouped.entry(gene_id.to_string()).or_default().push(ReportEntry {
                start: junction.start,
                end: junction.end,
                count,
            }),
            None => {
                trace!("No gene contains junction {}", junction);
                unmatched += 1;
            }
        }
    }
    debug!("{} junctions outside every gene dropped", unmatched);

    // Count-map iteration order is arbitrary; the end tiebreak keeps output stable
    for entries in grouped.values_mut() {
        entries.sort_by_key(|e| (e.start, e.end));
    }

    GeneJunctionReport { genes: grouped }
}

/// Format a single report row.
pub fn format_report_line(gene_id: &str, entry: &ReportEntry) -> String {
    format!("{}\t{}\t{}\t{}", gene_id, entry.start, entry.end, entry.count)
}

/// Write the report and return the number of genes written.
pub fn write_report<W: Write>(
    writer: &mut W,
    report: &GeneJunctionReport,
    config: &Config,
) -> Result<usize> {
    writeln!(writer, "{}", REPORT_HEADER)?;

    for (i, (gene_id, entries)) in report.iter().enumerate() {
        if i > 0 && config.separate_genes {
            writeln!(writer)?;
        }
        for entry in entries {
            writeln!(writer, "{}", format_report_line(gene_id, entry))?;
        }
    }

    Ok(report.num_genes())
}

/// Render the report to a string.
pub fn render_report(report: &GeneJunctionReport, config: &Config) -> Result<String> {
    let mut buf = Vec::new();
    write_report(&mut buf, report, config)?;
    Ok(String::from_utf8(buf)?)
}

/// Build the report and write it in one step.
pub fn analyze_junctions<W: Write>(
    counts: &JunctionCounts,
    genes: &GeneIndex,
    writer: &mut W,
    config: &Config,
) -> Result<usize> {
    let report = build_report(counts, genes);
    write_report(writer, &report, config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Interval, Junction};

    fn genes() -> GeneIndex {
        [
            ("GENE_B", Interval::new("chr1", 5000, 9000)),
            ("GENE_A", Interval::new("chr1", 100, 1000)),
        ]
        .into_iter()
        .map(|(id, iv)| (id.to_string(), iv))
        .collect()
    }

    fn counts() -> JunctionCounts {
        let mut counts = JunctionCounts::default();
        counts.insert(Junction::new("chr1", 600, 700), 3);
        counts.insert(Junction::new("chr1", 200, 400), 1);
        counts.insert(Junction::new("chr1", 6000, 6500), 5);
        counts.insert(Junction::new("chr1", 2000, 2100), 9);
        counts.insert(Junction::new("chr2", 200, 400), 4);
        counts
    }

    #[test]
    fn test_build_report() {
        let report = build_report(&counts(), &genes());

        assert_eq!(report.num_genes(), 2);
        assert_eq!(
            report.junctions("GENE_A").unwrap(),
            &[
                ReportEntry { start: 200, end: 400, count: 1 },
                ReportEntry { start: 600, end: 700, count: 3 },
            ]
        );
        assert_eq!(
            report.junctions("GENE_B").unwrap(),
            &[ReportEntry { start: 6000, end: 6500, count: 5 }]
        );
    }

    #[test]
    fn test_render_report() {
        let report = build_report(&counts(), &genes());
        let text = render_report(&report, &Config::new()).unwrap();

        assert_eq!(
            text,
            "Gene_ID\tJunction_Start\tJunction_End\tCount\n\
             GENE_A\t200\t400\t1\n\
             GENE_A\t600\t700\t3\n\
             \n\
             GENE_B\t6000\t6500\t5\n"
        );
    }

    #[test]
    fn test_render_without_separator() {
        let mut config = Config::new();
        config.separate_genes = false;
        let report = build_report(&counts(), &genes());
        let text = render_report(&report, &config).unwrap();

        assert!(!text.contains("\n\n"));
        assert_eq!(text.lines().count(), 4);
    }

    #[test]
    fn test_render_empty_report() {
        let report = build_report(&JunctionCounts::default(), &genes());
        assert!(report.is_empty());
        assert_eq!(
            render_report(&report, &Config::new()).unwrap(),
            "Gene_ID\tJunction_Start\tJunction_End\tCount\n"
        );
    }

    #[test]
    fn test_same_start_sorted_by_end() {
        let mut counts = JunctionCounts::default();
        counts.insert(Junction::new("chr1", 200, 900), 1);
        counts.insert(Junction::new("chr1", 200, 300), 2);
        let report = build_report(&counts, &genes());
        let ends: Vec<i64> = report.junctions("GENE_A").unwrap().iter().map(|e| e.end).collect();
        assert_eq!(ends, vec![300, 900]);
    }

    #[test]
    fn test_render_is_idempotent() {
        let counts = counts();
        let genes = genes();
        let first = render_report(&build_report(&counts, &genes), &Config::new()).unwrap();
        let second = render_report(&build_report(&counts, &genes), &Config::new()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_analyze_junctions_returns_gene_count() {
        let mut out = Vec::new();
        let n = analyze_junctions(&counts(), &genes(), &mut out, &Config::new()).unwrap();
        assert_eq!(n, 2);
        assert!(String::from_utf8(out).unwrap().starts_with(REPORT_HEADER));
    }

    #[test]
    fn test_format_report_line() {
        let entry = ReportEntry { start: 108, end: 384, count: 1 };
        assert_eq!(format_report_line("GENE1", &entry), "GENE1\t108\t384\t1");
    }
}
