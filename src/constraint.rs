//! The local constraint oracle interface.
//!
//! The oracle's own biochemical logic (GC-content windows, homopolymer run
//! limits, motif blacklists, ...) is an external collaborator and out of
//! scope for this crate: callers bring their own `ConstraintOracle`. What
//! lives here is the thin adapter the encoder/decoder/repair share to turn
//! a prefix plus a mapping into the ordered available-nucleotide set.

use crate::nucleotide::{Mapping, Nucleotide};

/// A local biochemical validity predicate.
///
/// `valid(prefix, only_last)` returns true iff `prefix` is acceptable.
/// When `only_last` is true the oracle is guaranteed to examine only a
/// trailing window bounded by its own configured length (the constraint
/// is local). Implementations must be referentially transparent: calling
/// `valid` twice with the same arguments must return the same answer.
pub trait ConstraintOracle {
    fn valid(&self, prefix: &[Nucleotide], only_last: bool) -> bool;
}

/// Computes the available-nucleotide set: the subset of `mapping` for
/// which appending that nucleotide keeps `prefix` valid, in mapping order.
/// Cardinality is 0, 1, 2, 3 or 4.
pub fn available_nucleotides(
    prefix: &[Nucleotide],
    mapping: &Mapping,
    oracle: &dyn ConstraintOracle,
) -> Vec<Nucleotide> {
    let mut candidate = Vec::with_capacity(prefix.len() + 1);
    candidate.extend_from_slice(prefix);
    candidate.push(Nucleotide::A); // placeholder, overwritten below

    let mut available = Vec::with_capacity(4);
    for &n in mapping {
        *candidate.last_mut().unwrap() = n;
        if oracle.valid(&candidate, true) {
            available.push(n);
        }
    }
    available
}

/// An oracle that accepts every prefix. Useful for tests and as the
/// encoder's initial state (the empty prefix is trivially valid).
pub struct AcceptAll;

impl ConstraintOracle for AcceptAll {
    fn valid(&self, _prefix: &[Nucleotide], _only_last: bool) -> bool {
        true
    }
}
