//! HEDGES DNA-storage codec: a hash-driven bit-to-nucleotide state machine,
//! its symmetric decoder, and an A*-based repair search that recovers a
//! message from a nucleotide string corrupted by substitutions, insertions
//! or deletions.

pub mod constraint;
pub mod decode;
pub mod encode;
pub mod error;
pub mod hash;
pub mod nucleotide;
pub mod params;
pub mod progress;
pub mod repair;
pub mod tracing_init;

pub use constraint::{AcceptAll, ConstraintOracle};
pub use decode::{decode, decode_many};
pub use encode::{encode, encode_many};
pub use error::{DecodeError, EncodeError, RepairError};
pub use nucleotide::{canonical_mapping, Mapping, Nucleotide};
pub use params::{CodecParams, Penalties};
pub use progress::{ProgressMonitor, RepairProgress};
pub use repair::{repair, repair_many, repair_with_progress, RepairOutcome};
