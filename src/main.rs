//! CLI entry point for sjcount.

use anyhow::{bail, Context, Result};
use clap::Parser;
use log::{info, LevelFilter};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use sjcount::config::{Config, DEFAULT_GENE_ID_PREFIX, DEFAULT_OUTPUT_SUFFIX};
use sjcount::output::analyze_junctions;
use sjcount::parser::{parse_genes, parse_sam};
use sjcount::types::HeaderPolicy;

/// Splice junction counting tool.
///
/// Parses a SAM file and writes a table of intron junction locations and
/// counts, grouped by the gene containing each junction.
#[derive(Parser, Debug)]
#[command(name = "sjcount")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Input SAM file
    sam_file: PathBuf,

    /// Gene summary file (tab-separated, location in column 3)
    genes_file: PathBuf,

    /// Output file (default: <SAM stem>_junctions.txt)
    #[arg(short = 'o', long = "output")]
    output: Option<PathBuf>,

    /// Print progress information
    #[arg(long = "verbose")]
    verbose: bool,

    /// Gene table header detection: prefix or shape
    #[arg(long = "header-policy", default_value = "prefix")]
    header_policy: String,

    /// Gene id prefix marking a data row under the prefix policy
    #[arg(long = "gene-prefix", default_value = DEFAULT_GENE_ID_PREFIX)]
    gene_prefix: String,

    /// Do not write blank lines between genes
    #[arg(long = "no-gene-separator")]
    no_gene_separator: bool,
}

/// Derive `<stem>_junctions.txt` in the working directory.
fn default_output_path(sam_file: &Path) -> PathBuf {
    let stem = sam_file
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    PathBuf::from(format!("{}{}", stem, DEFAULT_OUTPUT_SUFFIX))
}

fn main() -> Result<()> {
    let args = Args::parse();

    let level = if args.verbose {
        LevelFilter::Info
    } else {
        LevelFilter::Warn
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_target(false)
        .init();

    // Validate inputs
    if !args.sam_file.exists() {
        bail!("File not found: {}", args.sam_file.display());
    }
    if !args.genes_file.exists() {
        bail!("File not found: {}", args.genes_file.display());
    }

    // Build configuration
    let mut config = Config::new();
    config.header_policy = HeaderPolicy::from_str(&args.header_policy)
        .context("Header policy can only be one of the following: prefix or shape")?;
    config.gene_id_prefix = args.gene_prefix.clone();
    config.separate_genes = !args.no_gene_separator;

    let output = args
        .output
        .clone()
        .unwrap_or_else(|| default_output_path(&args.sam_file));

    info!("Processing SAM file: {}", args.sam_file.display());
    let counts = parse_sam(&args.sam_file)
        .with_context(|| format!("Failed to process {}", args.sam_file.display()))?;
    info!("Found {} unique junctions", counts.len());

    info!("Processing genes file: {}", args.genes_file.display());
    let genes = parse_genes(&args.genes_file, &config)
        .with_context(|| format!("Failed to process {}", args.genes_file.display()))?;
    info!("Loaded {} genes", genes.len());

    info!("Writing results to: {}", output.display());
    let file = File::create(&output).context("Failed to create output file")?;
    let mut writer = BufWriter::new(file);
    let num_genes = analyze_junctions(&counts, &genes, &mut writer, &config)?;
    writer.flush()?;
    info!("{} genes with junctions", num_genes);

    println!("Analysis complete. Results written to {}", output.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_output_path() {
        assert_eq!(
            default_output_path(Path::new("/data/run1/sample.sam")),
            PathBuf::from("sample_junctions.txt")
        );
        assert_eq!(
            default_output_path(Path::new("reads.sorted.sam")),
            PathBuf::from("reads.sorted_junctions.txt")
        );
    }

    #[test]
    fn test_args_parse() {
        let args = Args::parse_from(["sjcount", "a.sam", "genes.txt", "-o", "out.txt", "--verbose"]);
        assert_eq!(args.sam_file, PathBuf::from("a.sam"));
        assert_eq!(args.output, Some(PathBuf::from("out.txt")));
        assert!(args.verbose);
        assert_eq!(args.header_policy, "prefix");
        assert_eq!(args.gene_prefix, "TGME49_");
        assert!(!args.no_gene_separator);
    }
}
