//! A*-based repair search: recovers a candidate message (or a small
//! candidate set) from a nucleotide string corrupted by substitutions,
//! insertions and deletions, by expanding edit hypotheses over the same
//! state machine the encoder and decoder walk.

use rayon::prelude::*;
use tracing::{debug, instrument, trace};

use crate::constraint::{available_nucleotides, ConstraintOracle};
use crate::error::RepairError;
use crate::hash::{hash_input, mix_mod2, mix_mod4};
use crate::nucleotide::{Mapping, Nucleotide};
use crate::params::{CodecParams, Penalties};
use crate::progress::{ProgressMonitor, RepairProgress};

/// A single hypothesis in the repair search: the rolling previous-bits
/// register, the number of message bits produced so far (doubling as the
/// frontier's "produced_bit_count"), and the nucleotide string this vertex
/// has committed to.
#[derive(Debug, Clone)]
struct Vertex {
    prev: u64,
    bit_index: usize,
    string: Vec<Nucleotide>,
}

/// The result of a repair search. Budget exhaustion is a soft condition:
/// `candidates` may be non-empty, empty, or the caller may prefer to route
/// `exhausted` through [`RepairOutcome::into_result`] as a typed error.
#[derive(Debug, Clone)]
pub struct RepairOutcome {
    /// Unique nucleotide strings carried by every frontier vertex whose
    /// produced-bit-count equals the target bit length at termination.
    pub candidates: Vec<Vec<Nucleotide>>,
    /// Total number of vertices ever created (the frontier's final size).
    pub heap_size: usize,
    /// True if termination was triggered by exceeding `heap_limit` rather
    /// than (only) by reaching the target bit length.
    pub exhausted: bool,
}

impl RepairOutcome {
    /// Surfaces budget exhaustion as a typed [`RepairError`], for callers
    /// who prefer `Result`-based control flow over inspecting `exhausted`
    /// directly. A non-empty candidate list is always returned as `Ok`,
    /// even if the search also happened to exceed `heap_limit` in the same
    /// terminating batch.
    pub fn into_result(self, strand_idx: u64) -> Result<Vec<Vec<Nucleotide>>, RepairError> {
        if !self.candidates.is_empty() || !self.exhausted {
            Ok(self.candidates)
        } else {
            Err(RepairError::BudgetExhausted { strand: strand_idx, heap_size: self.heap_size })
        }
    }
}

/// Repairs `received` against the target `bit_length`, returning every
/// distinct re-encoded string reached by a minimum-score path.
pub fn repair(
    received: &[Nucleotide],
    strand_idx: u64,
    initial_score: f64,
    bit_length: usize,
    mapping: &Mapping,
    oracle: &dyn ConstraintOracle,
    params: &CodecParams,
    heap_limit: usize,
    penalties: &Penalties,
) -> RepairOutcome {
    repair_inner(
        received,
        strand_idx,
        initial_score,
        bit_length,
        mapping,
        oracle,
        params,
        heap_limit,
        penalties,
        None,
    )
}

/// As [`repair`], but reports `(current, total, extra)` once per expanded
/// batch through `monitor`. Absence of a monitor (the plain `repair` entry
/// point) changes nothing about the search itself.
pub fn repair_with_progress(
    received: &[Nucleotide],
    strand_idx: u64,
    initial_score: f64,
    bit_length: usize,
    mapping: &Mapping,
    oracle: &dyn ConstraintOracle,
    params: &CodecParams,
    heap_limit: usize,
    penalties: &Penalties,
    monitor: &mut dyn ProgressMonitor,
) -> RepairOutcome {
    repair_inner(
        received,
        strand_idx,
        initial_score,
        bit_length,
        mapping,
        oracle,
        params,
        heap_limit,
        penalties,
        Some(monitor),
    )
}

#[instrument(
    skip(received, mapping, oracle, params, penalties, monitor),
    fields(strand_idx, received_len = received.len(), bit_length, heap_limit)
)]
#[allow(clippy::too_many_arguments)]
fn repair_inner(
    received: &[Nucleotide],
    strand_idx: u64,
    initial_score: f64,
    bit_length: usize,
    mapping: &Mapping,
    oracle: &dyn ConstraintOracle,
    params: &CodecParams,
    heap_limit: usize,
    penalties: &Penalties,
    mut monitor: Option<&mut dyn ProgressMonitor>,
) -> RepairOutcome {
    let salt = params.salt(strand_idx);

    // Parallel arrays keyed by score: O(n) per selection, retirement by a
    // `retired` flag rather than splicing entries out of the frontier.
    let mut vertices: Vec<Vertex> = vec![Vertex { prev: 0, bit_index: 0, string: Vec::new() }];
    let mut scores: Vec<f64> = vec![initial_score];
    let mut consumed: Vec<usize> = vec![0];
    let mut retired: Vec<bool> = vec![false];

    loop {
        let min_score = (0..vertices.len())
            .filter(|&i| !retired[i])
            .map(|i| scores[i])
            .fold(f64::INFINITY, f64::min);

        if !min_score.is_finite() {
            // Every hypothesis dead-ended before reaching the target
            // length or the heap limit: treat the same as a budget
            // exhaustion with whatever (possibly empty) candidates exist.
            debug!(strand_idx, frontier = vertices.len(), "frontier exhausted with no live vertex");
            return terminal_outcome(&vertices, bit_length, true);
        }

        let batch: Vec<usize> = (0..vertices.len())
            .filter(|&i| !retired[i] && scores[i] == min_score)
            .collect();

        trace!(strand_idx, batch_size = batch.len(), min_score, frontier = vertices.len(), "expanding batch");

        for idx in batch {
            retired[idx] = true;
            let j = consumed[idx];
            let base_score = scores[idx];

            if let Some(m) = monitor.as_deref_mut() {
                m.report(j, received.len(), RepairProgress { size: vertices.len(), score: base_score });
            }

            let children = expand(&vertices[idx], j, base_score, mapping, oracle, params, received, salt, penalties);
            for (child, child_score, child_consumed) in children {
                vertices.push(child);
                scores.push(child_score);
                consumed.push(child_consumed);
                retired.push(false);
            }
        }

        let max_produced = vertices.iter().map(|v| v.bit_index).max().unwrap_or(0);
        let over_budget = vertices.len() > heap_limit;
        if max_produced >= bit_length || over_budget {
            debug!(strand_idx, frontier = vertices.len(), over_budget, "repair terminated");
            return terminal_outcome(&vertices, bit_length, over_budget);
        }
    }
}

fn terminal_outcome(vertices: &[Vertex], bit_length: usize, exhausted: bool) -> RepairOutcome {
    let mut candidates: Vec<Vec<Nucleotide>> = vertices
        .iter()
        .filter(|v| v.bit_index == bit_length)
        .map(|v| v.string.clone())
        .collect();
    candidates.sort();
    candidates.dedup();
    RepairOutcome { candidates, heap_size: vertices.len(), exhausted }
}

/// Expands one frontier vertex under the match/mutate, insertion and
/// deletion edit hypotheses.
#[allow(clippy::too_many_arguments)]
fn expand(
    vertex: &Vertex,
    j: usize,
    current_score: f64,
    mapping: &Mapping,
    oracle: &dyn ConstraintOracle,
    params: &CodecParams,
    received: &[Nucleotide],
    salt: u64,
    penalties: &Penalties,
) -> Vec<(Vertex, f64, usize)> {
    let mut children = Vec::new();

    if j >= received.len() {
        return children;
    }

    let available = available_nucleotides(&vertex.string, mapping, oracle);
    if available.is_empty() {
        return children;
    }

    let k = available.len();
    let w = match k {
        1 => 0,
        2 | 3 => 1,
        _ => 2,
    };
    let bit_idx = params.low_order(vertex.bit_index);
    let append = |n: Nucleotide| {
        let mut s = vertex.string.clone();
        s.push(n);
        s
    };

    // 1. Match / mutate: the received nucleotide at j is assumed correct
    //    or substituted.
    let n = received[j];
    if available.contains(&n) {
        match w {
            0 => {
                children.push((
                    Vertex { prev: vertex.prev, bit_index: vertex.bit_index, string: append(n) },
                    current_score + penalties.correct,
                    j + 1,
                ));
            }
            1 => {
                let h = mix_mod2(hash_input(bit_idx, vertex.prev, salt));
                for b in 0u64..2 {
                    let expected = available[((h + b) % 2) as usize];
                    let prev = params.mask_prev(vertex.prev.wrapping_mul(2).wrapping_add(b));
                    let delta = if expected == n { penalties.correct } else { penalties.mutate };
                    children.push((
                        Vertex { prev, bit_index: vertex.bit_index + 1, string: append(n) },
                        current_score + delta,
                        j + 1,
                    ));
                }
            }
            _ => {
                let h = mix_mod4(hash_input(bit_idx, vertex.prev, salt));
                for b in 0u64..4 {
                    let expected = available[((h + b) % 4) as usize];
                    let prev = params.mask_prev(vertex.prev.wrapping_mul(4).wrapping_add(b));
                    let delta = if expected == n { penalties.correct } else { penalties.mutate };
                    children.push((
                        Vertex { prev, bit_index: vertex.bit_index + 2, string: append(n) },
                        current_score + delta,
                        j + 1,
                    ));
                }
            }
        }
    }

    // 2. Insertion: the received nucleotide at j is a stray extra symbol;
    //    the "real" one is at j+1.
    if j + 1 < received.len() {
        let n2 = received[j + 1];
        if available.contains(&n2) {
            match w {
                0 => {
                    children.push((
                        Vertex { prev: vertex.prev, bit_index: vertex.bit_index, string: append(n2) },
                        current_score + penalties.insert,
                        j + 2,
                    ));
                }
                1 => {
                    let h = mix_mod2(hash_input(bit_idx, vertex.prev, salt));
                    for b in 0u64..2 {
                        if available[((h + b) % 2) as usize] == n2 {
                            let prev = params.mask_prev(vertex.prev.wrapping_mul(2).wrapping_add(b));
                            children.push((
                                Vertex { prev, bit_index: vertex.bit_index + 1, string: append(n2) },
                                current_score + penalties.insert,
                                j + 2,
                            ));
                        }
                    }
                }
                _ => {
                    let h = mix_mod4(hash_input(bit_idx, vertex.prev, salt));
                    for b in 0u64..4 {
                        if available[((h + b) % 4) as usize] == n2 {
                            let prev = params.mask_prev(vertex.prev.wrapping_mul(4).wrapping_add(b));
                            children.push((
                                Vertex { prev, bit_index: vertex.bit_index + 2, string: append(n2) },
                                current_score + penalties.insert,
                                j + 2,
                            ));
                        }
                    }
                }
            }
        }
    }

    // 3. Deletion: the nucleotide at j in `received` doesn't exist in the
    //    message at all; consumed index does not advance.
    match w {
        0 => {
            for &cand in &available {
                children.push((
                    Vertex { prev: vertex.prev, bit_index: vertex.bit_index, string: append(cand) },
                    current_score + penalties.delete,
                    j,
                ));
            }
        }
        1 => {
            let h = mix_mod2(hash_input(bit_idx, vertex.prev, salt));
            for b in 0u64..2 {
                let cand = available[((h + b) % 2) as usize];
                let prev = params.mask_prev(vertex.prev.wrapping_mul(2).wrapping_add(b));
                children.push((
                    Vertex { prev, bit_index: vertex.bit_index + 1, string: append(cand) },
                    current_score + penalties.delete,
                    j,
                ));
            }
        }
        _ => {
            let h = mix_mod4(hash_input(bit_idx, vertex.prev, salt));
            // The emitted nucleotide uses only the first message bit of the
            // pair, not the full 2-bit value, asymmetric with the
            // match/mutate branch above. Intentional, not a bug to fix.
            for m0 in 0u64..2 {
                for m1 in 0u64..2 {
                    let b = 2 * m0 + m1;
                    let cand = available[((h + m0) % 4) as usize];
                    let prev = params.mask_prev(vertex.prev.wrapping_mul(4).wrapping_add(b));
                    children.push((
                        Vertex { prev, bit_index: vertex.bit_index + 2, string: append(cand) },
                        current_score + penalties.delete,
                        j,
                    ));
                }
            }
        }
    }

    children
}

/// Repairs many independent strands in parallel with `rayon`.
pub fn repair_many<O>(
    jobs: &[(u64, Vec<Nucleotide>, usize)],
    mapping: &Mapping,
    oracle: &O,
    params: &CodecParams,
    heap_limit: usize,
    penalties: &Penalties,
) -> Vec<RepairOutcome>
where
    O: ConstraintOracle + Sync,
{
    jobs.par_iter()
        .map(|(strand_idx, received, bit_length)| {
            repair(received, *strand_idx, 0.0, *bit_length, mapping, oracle, params, heap_limit, penalties)
        })
        .collect()
}
