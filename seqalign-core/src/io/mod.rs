//! Sequence file input for seqalign
//!
//! The alignment engine only sees byte slices; this module turns
//! FASTA/FASTQ files into whole in-memory records for it.

pub mod fastx;

pub use fastx::{FastxError, FastxReader, SeqRecord};
