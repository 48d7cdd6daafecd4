//! Scoring parameters for the alignment engine
//!
//! Linear gap model: every inserted or deleted residue costs `gap_score`,
//! there is no separate open/extend penalty.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Ambiguity code that can be configured to match any opposing base
pub const WILDCARD_BASE: u8 = b'N';

pub const DEFAULT_MATCH: i32 = 1;
pub const DEFAULT_MISMATCH: i32 = -1;
pub const DEFAULT_GAP: i32 = -2;
pub const DEFAULT_ERROR_RATE_PERCENT: i32 = 1;

/// Which side of the alignment treats [`WILDCARD_BASE`] as a universal match.
///
/// The discriminants form a bitmask: bit 0 enables query wildcards,
/// bit 1 enables target wildcards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WildcardPolicy {
    None = 0,
    Query = 1,
    Target = 2,
    Both = 3,
}

impl WildcardPolicy {
    /// Decode the bitmask form. Returns `None` for values outside `0..=3`.
    pub fn from_bits(bits: i32) -> Option<Self> {
        match bits {
            0 => Some(Self::None),
            1 => Some(Self::Query),
            2 => Some(Self::Target),
            3 => Some(Self::Both),
            _ => None,
        }
    }

    pub fn bits(self) -> i32 {
        self as i32
    }

    pub fn query_enabled(self) -> bool {
        self.bits() & Self::Query.bits() != 0
    }

    pub fn target_enabled(self) -> bool {
        self.bits() & Self::Target.bits() != 0
    }
}

impl Default for WildcardPolicy {
    fn default() -> Self {
        Self::Query
    }
}

impl fmt::Display for WildcardPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::None => "none",
            Self::Query => "query",
            Self::Target => "target",
            Self::Both => "both",
        };
        f.write_str(name)
    }
}

/// Parameters controlling the DP recurrence
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoringParams {
    /// Reward for an identity (or wildcard hit)
    pub match_score: i32,
    /// Score of a substitution, usually negative
    pub mismatch_score: i32,
    /// Per-residue insertion/deletion score, usually negative
    pub gap_score: i32,
    /// Wildcard handling for [`WILDCARD_BASE`]
    pub wildcard: WildcardPolicy,
    /// Maximum tolerated (mismatches + gaps) / aligned length, in `[0, 1]`
    pub error_rate: f64,
}

impl Default for ScoringParams {
    fn default() -> Self {
        Self {
            match_score: DEFAULT_MATCH,
            mismatch_score: DEFAULT_MISMATCH,
            gap_score: DEFAULT_GAP,
            wildcard: WildcardPolicy::default(),
            error_rate: percent_to_rate(DEFAULT_ERROR_RATE_PERCENT),
        }
    }
}

impl ScoringParams {
    pub fn new(match_score: i32, mismatch_score: i32, gap_score: i32) -> Self {
        Self {
            match_score,
            mismatch_score,
            gap_score,
            ..Self::default()
        }
    }

    pub fn with_wildcard(mut self, wildcard: WildcardPolicy) -> Self {
        self.wildcard = wildcard;
        self
    }

    pub fn with_error_rate(mut self, error_rate: f64) -> Self {
        self.error_rate = error_rate;
        self
    }

    /// Whether `q` (query base) and `t` (target base) count as a match
    #[inline]
    pub fn is_match(&self, q: u8, t: u8) -> bool {
        q == t
            || (self.wildcard.query_enabled() && q == WILDCARD_BASE)
            || (self.wildcard.target_enabled() && t == WILDCARD_BASE)
    }
}

/// Convert an integer percentage into the fractional error rate
pub fn percent_to_rate(percent: i32) -> f64 {
    0.01 * percent as f64
}
