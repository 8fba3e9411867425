//! CIGAR interpretation for splice junction extraction.
//!
//! Only the reference-consuming operations `M`, `D` and `N` are recognised;
//! every other operation code is skipped without moving the cursor.

use crate::types::Junction;

/// A recognised CIGAR operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CigarOp {
    /// `M`: alignment match.
    Match,
    /// `D`: deletion from the reference.
    Deletion,
    /// `N`: skipped reference region (intron).
    Skip,
}

impl CigarOp {
    fn from_byte(b: u8) -> Option<Self> {
        match b {
            b'M' => Some(CigarOp::Match),
            b'D' => Some(CigarOp::Deletion),
            b'N' => Some(CigarOp::Skip),
            _ => None,
        }
    }
}

/// One `<length><op>` run of a CIGAR string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CigarToken {
    pub len: i64,
    pub op: CigarOp,
}

/// Iterator over the recognised tokens of a CIGAR string.
pub struct CigarTokens<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl Iterator for CigarTokens<'_> {
    type Item = CigarToken;

    fn next(&mut self) -> Option<CigarToken> {
        while self.pos < self.bytes.len() {
            if !self.bytes[self.pos].is_ascii_digit() {
                self.pos += 1;
                continue;
            }

            let digits_start = self.pos;
            while self.pos < self.bytes.len() && self.bytes[self.pos].is_ascii_digit() {
                self.pos += 1;
            }
            let digits = &self.bytes[digits_start..self.pos];

            let Some(op) = self.bytes.get(self.pos).copied().and_then(CigarOp::from_byte) else {
                continue;
            };
            self.pos += 1;

            // Digits are ASCII, so the slice is valid UTF-8
            let len = std::str::from_utf8(digits).ok().and_then(|s| s.parse().ok());
            if let Some(len) = len {
                return Some(CigarToken { len, op });
            }
        }
        None
    }
}

/// Tokenize a CIGAR string, skipping anything that is not `<digits>` followed by M, D or N.
pub fn cigar_tokens(cigar: &str) -> CigarTokens<'_> {
    CigarTokens {
        bytes: cigar.as_bytes(),
        pos: 0,
    }
}

/// Number of reference bases consumed by the recognised operations.
///
/// Returns `None` if the total does not fit in `i64`.
pub fn reference_span(cigar: &str) -> Option<i64> {
    cigar_tokens(cigar).try_fold(0i64, |span, t| span.checked_add(t.len))
}

/// Extract the junctions described by a CIGAR string.
///
/// The reference cursor starts at `start`; `M` and `D` advance it, and each
/// `N` emits `(chrom, cursor, cursor + len)` before advancing. Junctions are
/// returned left to right.
///
/// Returns `None` if the cursor would overflow `i64`; the whole alignment is
/// then unusable.
pub fn extract_junctions(cigar: &str, start: i64, chrom: &str) -> Option<Vec<Junction>> {
    let mut junctions = Vec::new();
    let mut cursor = start;

    for token in cigar_tokens(cigar) {
        let next = cursor.checked_add(token.len)?;
        if token.op == CigarOp::Skip {
            junctions.push(Junction::new(chrom, cursor, next));
        }
        cursor = next;
    }

    Some(junctions)
}
