//! Aligner façade
//!
//! Binds one sequence, a topology and scoring parameters so the same
//! pattern (an adapter, a primer, a barcode) can be aligned against many
//! reads. Holds only immutable state and is safe to share across threads.

use crate::align::{align, AlignmentMode};
use crate::error::{AlignError, ConfigResult};
use crate::scoring::{percent_to_rate, ScoringParams, WildcardPolicy};
use crate::types::AlignResult;
use std::fmt;

const MAX_POSITIONAL_ARGS: usize = 5;

#[derive(Debug, Clone, PartialEq)]
pub struct Aligner {
    mode: AlignmentMode,
    sequence: Vec<u8>,
    params: ScoringParams,
}

impl Aligner {
    /// Create an aligner with the default scoring (1, -1, -2, query
    /// wildcards, 1% error rate).
    pub fn new(mode: &str, sequence: &[u8]) -> ConfigResult<Self> {
        Self::with_args(mode, sequence, &[])
    }

    /// Create an aligner overriding defaults positionally, in the order
    /// match, mismatch, gap, wildcard policy, error rate percent.
    ///
    /// ```
    /// use seqalign_core::Aligner;
    ///
    /// let aligner = Aligner::with_args("glocal", b"AGATCGGAAG", &[2, -3, -5]).unwrap();
    /// assert_eq!(aligner.params().gap_score, -5);
    /// assert_eq!(aligner.params().error_rate, 0.01);
    /// ```
    pub fn with_args(mode: &str, sequence: &[u8], args: &[i32]) -> ConfigResult<Self> {
        if sequence.is_empty() {
            return Err(AlignError::EmptySequence);
        }
        if args.len() > MAX_POSITIONAL_ARGS {
            return Err(AlignError::TooManyArguments(args.len()));
        }
        let mode: AlignmentMode = mode.parse()?;

        let mut params = ScoringParams::default();
        if let Some(&score) = args.first() {
            params.match_score = score;
        }
        if let Some(&score) = args.get(1) {
            params.mismatch_score = score;
        }
        if let Some(&score) = args.get(2) {
            params.gap_score = score;
        }
        if let Some(&bits) = args.get(3) {
            params.wildcard =
                WildcardPolicy::from_bits(bits).ok_or(AlignError::InvalidWildcard(bits))?;
        }
        if let Some(&percent) = args.get(4) {
            if !(0..=100).contains(&percent) {
                return Err(AlignError::InvalidErrorRate(percent));
            }
            params.error_rate = percent_to_rate(percent);
        }

        Self::from_params(mode, sequence, params)
    }

    /// Create an aligner from already typed parameters
    pub fn from_params(
        mode: AlignmentMode,
        sequence: &[u8],
        params: ScoringParams,
    ) -> ConfigResult<Self> {
        if sequence.is_empty() {
            return Err(AlignError::EmptySequence);
        }
        let aligner = Self {
            mode,
            sequence: sequence.to_vec(),
            params,
        };
        log::debug!("Created {}", aligner);
        Ok(aligner)
    }

    /// Align with the bound sequence as query and `target` as target
    pub fn align_against(&self, target: &[u8]) -> AlignResult {
        align(self.mode, &self.sequence, target, &self.params)
    }

    /// Align `query` against the bound sequence as target
    pub fn align_from(&self, query: &[u8]) -> AlignResult {
        align(self.mode, query, &self.sequence, &self.params)
    }

    pub fn mode(&self) -> AlignmentMode {
        self.mode
    }

    pub fn sequence(&self) -> &[u8] {
        &self.sequence
    }

    pub fn params(&self) -> &ScoringParams {
        &self.params
    }
}

impl fmt::Display for Aligner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prefix = match self.mode {
            AlignmentMode::Local => "LocalAligner",
            AlignmentMode::Global => "GlobalAligner",
            AlignmentMode::Glocal => "GlocalAligner",
        };
        write!(
            f,
            "{}(seq: {}, match: {}, mismatch: {}, gap: {}, wild: {}, error_rate: {:.3})",
            prefix,
            String::from_utf8_lossy(&self.sequence),
            self.params.match_score,
            self.params.mismatch_score,
            self.params.gap_score,
            self.params.wildcard.bits(),
            self.params.error_rate
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let aligner = Aligner::new("local", b"ACGT").unwrap();
        assert_eq!(aligner.mode(), AlignmentMode::Local);
        assert_eq!(aligner.sequence(), b"ACGT");
        assert_eq!(*aligner.params(), ScoringParams::default());
    }

    #[test]
    fn test_positional_overrides() {
        let aligner = Aligner::with_args("GLOBAL", b"ACGT", &[2, -3, -4, 3, 10]).unwrap();
        let params = aligner.params();
        assert_eq!(params.match_score, 2);
        assert_eq!(params.mismatch_score, -3);
        assert_eq!(params.gap_score, -4);
        assert_eq!(params.wildcard, WildcardPolicy::Both);
        assert!((params.error_rate - 0.1).abs() < 1e-12);

        let partial = Aligner::with_args("glocal", b"ACGT", &[3]).unwrap();
        assert_eq!(partial.params().match_score, 3);
        assert_eq!(partial.params().mismatch_score, -1);
    }

    #[test]
    fn test_construction_errors() {
        assert_eq!(Aligner::new("local", b""), Err(AlignError::EmptySequence));
        assert_eq!(
            Aligner::new("banded", b"ACGT"),
            Err(AlignError::UnknownMode("banded".to_string()))
        );
        assert_eq!(
            Aligner::with_args("local", b"ACGT", &[1, -1, -2, 4]),
            Err(AlignError::InvalidWildcard(4))
        );
        assert_eq!(
            Aligner::with_args("local", b"ACGT", &[1, -1, -2, 1, 101]),
            Err(AlignError::InvalidErrorRate(101))
        );
        assert_eq!(
            Aligner::with_args("local", b"ACGT", &[1, -1, -2, 1, 1, 0]),
            Err(AlignError::TooManyArguments(6))
        );
    }

    #[test]
    fn test_display() {
        let aligner = Aligner::new("glocal", b"ACGT").unwrap();
        assert_eq!(
            aligner.to_string(),
            "GlocalAligner(seq: ACGT, match: 1, mismatch: -1, gap: -2, wild: 1, error_rate: 0.010)"
        );
    }

    #[test]
    fn test_against_and_from_swap_roles() {
        let aligner = Aligner::new("glocal", b"ACGT").unwrap();
        let against = aligner.align_against(b"TTTACGTTTT");
        assert_eq!((against.qstart, against.qend), (0, 4));
        assert_eq!((against.tstart, against.tend), (3, 7));

        let local = Aligner::new("local", b"TTTACGTTTT").unwrap();
        let from = local.align_from(b"ACGT");
        assert_eq!((from.qstart, from.qend), (0, 4));
        assert_eq!((from.tstart, from.tend), (3, 7));
        assert_eq!(from.score, 4);
    }

    #[test]
    fn test_shared_across_threads() {
        let aligner = std::sync::Arc::new(Aligner::new("local", b"GATTACA").unwrap());
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let aligner = aligner.clone();
                std::thread::spawn(move || aligner.align_against(b"CCGATTACAGG"))
            })
            .collect();
        let results: Vec<AlignResult> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert!(results.windows(2).all(|w| w[0] == w[1]));
        assert_eq!(results[0].score, 7);
    }
}
