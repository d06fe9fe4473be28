//! Encodes a message, corrupts it with a substitution, an insertion and a
//! deletion, then repairs it and prints the recovered candidate set and
//! final heap size. A small runnable walkthrough, not a test.

use bitvec::prelude::*;
use hedges_codec::{canonical_mapping, encode, nucleotide, repair, AcceptAll, CodecParams, Nucleotide, Penalties};

fn flip(n: Nucleotide) -> Nucleotide {
    match n {
        Nucleotide::A => Nucleotide::C,
        Nucleotide::C => Nucleotide::G,
        Nucleotide::G => Nucleotide::T,
        Nucleotide::T => Nucleotide::A,
    }
}

fn main() {
    let mapping = canonical_mapping();
    let params = CodecParams::default();
    let penalties = Penalties::default();

    let bits: BitVec<u8, Msb0> = (0..150).map(|i| (i * 11 + 5) % 4 < 2).collect();
    let strand = encode(&bits, 9, &mapping, &AcceptAll, &params).expect("encode should succeed with no constraints");

    let mut corrupted = strand.clone();
    let sub_at = corrupted.len() / 4;
    corrupted[sub_at] = flip(corrupted[sub_at]);
    let ins_at = corrupted.len() / 2;
    corrupted.insert(ins_at, Nucleotide::A);
    let del_at = corrupted.len() * 3 / 4;
    corrupted.remove(del_at);

    println!("original:  {}", nucleotide::to_string(&strand));
    println!("corrupted: {}", nucleotide::to_string(&corrupted));

    let outcome = repair(&corrupted, 9, 0.0, bits.len(), &mapping, &AcceptAll, &params, 1_000_000, &penalties);

    println!("candidates found: {}", outcome.candidates.len());
    println!("heap size at termination: {}", outcome.heap_size);
    println!("original string recovered: {}", outcome.candidates.contains(&strand));
}
