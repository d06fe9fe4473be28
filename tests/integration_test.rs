//! End-to-end scenarios exercising encode, decode and repair together under
//! a non-trivial constraint oracle.

mod support;

use bitvec::prelude::*;
use hedges_codec::{canonical_mapping, decode, encode, repair, AcceptAll, CodecParams, Nucleotide, Penalties};
use rstest::rstest;
use support::LocalBioFilter;

/// Round-trip holds across every permutation of the alphabet as the
/// mapping, not just the canonical `[A, C, G, T]` order used elsewhere.
#[rstest]
#[case::canonical([Nucleotide::A, Nucleotide::C, Nucleotide::G, Nucleotide::T])]
#[case::reversed([Nucleotide::T, Nucleotide::G, Nucleotide::C, Nucleotide::A])]
#[case::rotated([Nucleotide::C, Nucleotide::G, Nucleotide::T, Nucleotide::A])]
#[case::swapped_pairs([Nucleotide::G, Nucleotide::T, Nucleotide::A, Nucleotide::C])]
fn round_trip_holds_under_any_mapping_permutation(#[case] mapping: [Nucleotide; 4]) {
    let params = CodecParams::default();
    let bits: BitVec<u8, Msb0> = (0..90).map(|i| (i * 5 + 2) % 3 == 0).collect();

    let strand = encode(&bits, 11, &mapping, &AcceptAll, &params).unwrap();
    let decoded = decode(&strand, 11, bits.len(), &mapping, &AcceptAll, &params).unwrap();
    assert_eq!(decoded, bits);
}

/// Repair agreement holds across several independent strand indices sharing
/// one oracle, exercising the salt term's decorrelation.
#[rstest]
#[case::strand_zero(0)]
#[case::strand_small(3)]
#[case::strand_large(1_000_000)]
fn repair_agreement_holds_across_strand_indices(#[case] strand_idx: u64) {
    let mapping = canonical_mapping();
    let params = CodecParams::default();
    let penalties = Penalties::default();
    let oracle = LocalBioFilter::new(10).with_max_homopolymer_runs(2).with_gc_range(0.3, 0.7);
    let bits: BitVec<u8, Msb0> = (0..100).map(|i| (i * 13 + 1) % 4 < 2).collect();

    let strand = encode(&bits, strand_idx, &mapping, &oracle, &params).unwrap();
    let outcome = repair(&strand, strand_idx, 0.0, bits.len(), &mapping, &oracle, &params, 1_000_000, &penalties);
    assert!(outcome.candidates.contains(&strand));
}

fn bits_from(pattern: &[u8]) -> BitVec<u8, Msb0> {
    pattern.iter().map(|&b| b != 0).collect()
}

#[test]
fn trivial_encode_then_decode_round_trips() {
    let mapping = canonical_mapping();
    let params = CodecParams::default();
    let bits = bits_from(&[1, 0, 1, 1, 0, 0, 1, 0]);

    let strand = encode(&bits, 0, &mapping, &AcceptAll, &params).unwrap();
    let decoded = decode(&strand, 0, bits.len(), &mapping, &AcceptAll, &params).unwrap();
    assert_eq!(decoded, bits);
}

#[test]
fn homopolymer_constraint_shapes_the_encoded_strand() {
    let mapping = canonical_mapping();
    let params = CodecParams::default();
    let oracle = LocalBioFilter::new(10).with_max_homopolymer_runs(2);
    let bits: BitVec<u8, Msb0> = (0..120).map(|i| i % 6 < 3).collect();

    let strand = encode(&bits, 1, &mapping, &oracle, &params).unwrap();
    assert!(strand.windows(3).all(|w| !(w[0] == w[1] && w[1] == w[2])));

    let decoded = decode(&strand, 1, bits.len(), &mapping, &oracle, &params).unwrap();
    assert_eq!(decoded, bits);
}

#[test]
fn gc_content_window_is_respected_by_encoding() {
    let mapping = canonical_mapping();
    let params = CodecParams::default();
    let oracle = LocalBioFilter::new(10).with_gc_range(0.4, 0.6);
    let bits: BitVec<u8, Msb0> = (0..160).map(|i| (i * 5 + 1) % 3 == 0).collect();

    let strand = encode(&bits, 2, &mapping, &oracle, &params).unwrap();
    for window in strand.windows(10) {
        let gc = window.iter().filter(|n| matches!(n, Nucleotide::G | Nucleotide::C)).count();
        let frac = gc as f64 / window.len() as f64;
        assert!((0.4..=0.6).contains(&frac), "window {window:?} gc fraction {frac}");
    }
}

#[test]
fn single_substitution_is_recovered_under_a_motif_blacklist() {
    let mapping = canonical_mapping();
    let params = CodecParams::default();
    let penalties = Penalties::default();
    let oracle = LocalBioFilter::new(10).with_undesired_motifs(vec![
        vec![Nucleotide::G, Nucleotide::A, Nucleotide::A, Nucleotide::T, Nucleotide::C],
    ]);
    let bits: BitVec<u8, Msb0> = (0..80).map(|i| (i * 3) % 5 < 2).collect();

    let strand = encode(&bits, 3, &mapping, &oracle, &params).unwrap();
    let mut corrupted = strand.clone();
    let mid = corrupted.len() / 2;
    corrupted[mid] = match corrupted[mid] {
        Nucleotide::A => Nucleotide::C,
        Nucleotide::C => Nucleotide::G,
        Nucleotide::G => Nucleotide::T,
        Nucleotide::T => Nucleotide::A,
    };

    let outcome = repair(&corrupted, 3, 0.0, bits.len(), &mapping, &oracle, &params, 1_000_000, &penalties);
    assert!(outcome.candidates.contains(&strand));
}

#[test]
fn single_insertion_is_recovered() {
    let mapping = canonical_mapping();
    let params = CodecParams::default();
    let penalties = Penalties::default();
    let bits: BitVec<u8, Msb0> = (0..64).map(|i| (i * 7) % 4 < 2).collect();

    let strand = encode(&bits, 4, &mapping, &AcceptAll, &params).unwrap();
    let mut corrupted = strand.clone();
    corrupted.insert(corrupted.len() / 4, Nucleotide::T);

    let outcome = repair(&corrupted, 4, 0.0, bits.len(), &mapping, &AcceptAll, &params, 1_000_000, &penalties);
    assert!(outcome.candidates.contains(&strand));
}

#[test]
fn single_deletion_is_recovered() {
    let mapping = canonical_mapping();
    let params = CodecParams::default();
    let penalties = Penalties::default();
    let bits: BitVec<u8, Msb0> = (0..64).map(|i| (i * 11) % 4 < 2).collect();

    let strand = encode(&bits, 5, &mapping, &AcceptAll, &params).unwrap();
    let mut corrupted = strand.clone();
    corrupted.remove(corrupted.len() / 3);

    let outcome = repair(&corrupted, 5, 0.0, bits.len(), &mapping, &AcceptAll, &params, 1_000_000, &penalties);
    assert!(outcome.candidates.contains(&strand));
}

#[test]
fn an_unreasonably_small_heap_limit_exhausts_the_budget() {
    let mapping = canonical_mapping();
    let params = CodecParams::default();
    let penalties = Penalties::default();
    let bits: BitVec<u8, Msb0> = (0..300).map(|i| i % 7 == 0).collect();

    let strand = encode(&bits, 6, &mapping, &AcceptAll, &params).unwrap();
    let outcome = repair(&strand, 6, 0.0, bits.len(), &mapping, &AcceptAll, &params, 2, &penalties);
    assert!(outcome.exhausted);
    assert!(outcome.into_result(6).is_err());
}
