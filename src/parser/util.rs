//! Reader helpers for annotation inputs.

use flate2::read::MultiGzDecoder;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Whether a path names a gzip-compressed file (`.gz` extension).
pub fn is_gzip_path(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "gz")
}

/// Wrap an opened file in a buffered reader, decompressing `.gz` inputs.
///
/// Multi-member archives (as written by `bgzip`) are read to the end.
pub fn create_buffered_reader(file: File, path: &Path) -> Box<dyn BufRead + Send> {
    if is_gzip_path(path) {
        Box::new(BufReader::new(MultiGzDecoder::new(file)))
    } else {
        Box::new(BufReader::new(file))
    }
}
