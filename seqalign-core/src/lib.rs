//! seqalign core library
//!
//! Linear-memory pairwise alignment in three topologies (local, global,
//! glocal), an aligner façade binding a fixed sequence, and FASTA/FASTQ
//! input helpers.

pub mod scoring;
pub mod types;
pub mod align;
pub mod aligner;
pub mod error;
pub mod io;

// Re-export commonly used types and functions
pub use align::{align, align_global, align_glocal, align_local, try_align_global, AlignmentMode};
pub use aligner::Aligner;
pub use error::{AlignError, ConfigResult};
pub use scoring::{ScoringParams, WildcardPolicy, WILDCARD_BASE};
pub use types::AlignResult;

/// Version information for the seqalign core library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
