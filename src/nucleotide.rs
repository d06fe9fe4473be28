//! The four-symbol DNA alphabet and the ordered mapping between bit patterns
//! and nucleotides.

use std::fmt;

/// A single DNA base.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum Nucleotide {
    A = 0,
    C = 1,
    G = 2,
    T = 3,
}

impl Nucleotide {
    /// All four bases in their canonical lexical order.
    pub const ALL: [Nucleotide; 4] = [Nucleotide::A, Nucleotide::C, Nucleotide::G, Nucleotide::T];
}

impl fmt::Display for Nucleotide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let c = match self {
            Nucleotide::A => 'A',
            Nucleotide::C => 'C',
            Nucleotide::G => 'G',
            Nucleotide::T => 'T',
        };
        write!(f, "{c}")
    }
}

/// An ordered permutation of the alphabet. Index 0..3 defines the lexical
/// order used to resolve a hash into a concrete nucleotide.
pub type Mapping = [Nucleotide; 4];

/// Returns the identity mapping `[A, C, G, T]`, convenient for tests and
/// demos.
pub fn canonical_mapping() -> Mapping {
    Nucleotide::ALL
}

/// Render a nucleotide sequence as a plain string, e.g. for logging or
/// comparing against fixture strings.
pub fn to_string(seq: &[Nucleotide]) -> String {
    seq.iter().map(|n| n.to_string()).collect()
}

/// Parse a string of `A`/`C`/`G`/`T` characters into a nucleotide sequence.
/// Returns `None` if any character is not one of the four bases.
pub fn from_str(s: &str) -> Option<Vec<Nucleotide>> {
    s.chars()
        .map(|c| match c {
            'A' => Some(Nucleotide::A),
            'C' => Some(Nucleotide::C),
            'G' => Some(Nucleotide::G),
            'T' => Some(Nucleotide::T),
            _ => None,
        })
        .collect()
}
