//! Shared test-only constraint oracles, not part of the public crate (the
//! oracle's own biochemical logic is explicitly out of scope for the core).

use hedges_codec::{ConstraintOracle, Nucleotide};

/// A homopolymer-run cap + GC-content window + motif blacklist oracle:
/// `observed_length`, `max_homopolymer_runs`, `gc_range`, `undesired_motifs`.
pub struct LocalBioFilter {
    pub observed_length: usize,
    pub max_homopolymer_runs: Option<usize>,
    pub gc_range: Option<(f64, f64)>,
    pub undesired_motifs: Vec<Vec<Nucleotide>>,
}

impl LocalBioFilter {
    pub fn new(observed_length: usize) -> Self {
        Self {
            observed_length,
            max_homopolymer_runs: None,
            gc_range: None,
            undesired_motifs: Vec::new(),
        }
    }

    pub fn with_max_homopolymer_runs(mut self, n: usize) -> Self {
        self.max_homopolymer_runs = Some(n);
        self
    }

    pub fn with_gc_range(mut self, low: f64, high: f64) -> Self {
        self.gc_range = Some((low, high));
        self
    }

    pub fn with_undesired_motifs(mut self, motifs: Vec<Vec<Nucleotide>>) -> Self {
        self.undesired_motifs = motifs;
        self
    }

    fn window(prefix: &[Nucleotide], len: usize) -> &[Nucleotide] {
        let start = prefix.len().saturating_sub(len);
        &prefix[start..]
    }

    fn homopolymer_ok(&self, window: &[Nucleotide]) -> bool {
        let Some(limit) = self.max_homopolymer_runs else { return true };
        if window.is_empty() {
            return true;
        }
        let mut run = 1;
        for pair in window.windows(2) {
            if pair[0] == pair[1] {
                run += 1;
                if run > limit {
                    return false;
                }
            } else {
                run = 1;
            }
        }
        true
    }

    fn gc_ok(&self, window: &[Nucleotide]) -> bool {
        let Some((low, high)) = self.gc_range else { return true };
        if window.is_empty() {
            return true;
        }
        let gc = window.iter().filter(|n| matches!(n, Nucleotide::G | Nucleotide::C)).count();
        let frac = gc as f64 / window.len() as f64;
        frac >= low && frac <= high
    }

    fn motifs_ok(&self, window: &[Nucleotide]) -> bool {
        self.undesired_motifs.iter().all(|motif| !window.windows(motif.len()).any(|w| w == motif.as_slice()))
    }
}

impl ConstraintOracle for LocalBioFilter {
    fn valid(&self, prefix: &[Nucleotide], _only_last: bool) -> bool {
        let window = Self::window(prefix, self.observed_length);
        self.homopolymer_ok(window) && self.gc_ok(window) && self.motifs_ok(window)
    }
}
