//! Error types for the three codec entry points. Split by component rather
//! than one shared enum: each is an independent failure domain, and every
//! variant carries the strand index it failed on.

use snafu::Snafu;

#[derive(Debug, Snafu, Clone, Copy, PartialEq)]
pub enum EncodeError {
    /// The encoder's available-nucleotide set became empty: no nucleotide
    /// in the mapping keeps the current prefix valid under the oracle.
    #[snafu(display("strand {strand}: constraint blocked encoding, no nucleotide keeps the prefix valid"))]
    ConstraintBlocked { strand: u64 },
}

#[derive(Debug, Snafu, Clone, Copy, PartialEq)]
pub enum DecodeError {
    /// The decoder's available-nucleotide set became empty before the
    /// received string was fully consumed: the string is not a valid
    /// codeword under this oracle/mapping/strand combination.
    #[snafu(display("strand {strand}: decode constraint violated at position {at}"))]
    ConstraintViolation { strand: u64, at: usize },
}

#[derive(Debug, Snafu, Clone, Copy, PartialEq)]
pub enum RepairError {
    /// The A* frontier exceeded `heap_limit` before any vertex reached the
    /// target bit length. Soft failure: the caller may raise `heap_limit`
    /// or accept the (possibly empty) candidate list directly instead of
    /// routing through this error.
    #[snafu(display("strand {strand}: repair budget exhausted at heap size {heap_size}"))]
    BudgetExhausted { strand: u64, heap_size: usize },
}
