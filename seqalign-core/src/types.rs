use serde::{Deserialize, Serialize};
use std::fmt;

/// Working DP state for one cell of the live row.
///
/// Each cell carries the origin of the best path ending at it, so the
/// alignment span is known without a traceback matrix.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct Cell {
    pub qstart: usize,
    pub tstart: usize,
    pub score: i64,
    pub match_count: usize,
    pub error_count: usize,
}

impl Cell {
    /// Boundary cell with a fixed origin and no consumed residues
    pub fn origin(qstart: usize, tstart: usize, score: i64) -> Self {
        Self {
            qstart,
            tstart,
            score,
            match_count: 0,
            error_count: 0,
        }
    }
}

/// Best alignment found by one engine call.
///
/// Spans are half-open: `qend` and `tend` point one past the last aligned
/// residue. The all-zero value (see [`Default`]) doubles as the "nothing
/// accepted" sentinel of the plain entry points.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AlignResult {
    pub qstart: usize,
    pub qend: usize,
    pub tstart: usize,
    pub tend: usize,
    pub score: i64,
    pub match_count: usize,
    pub error_count: usize,
}

impl AlignResult {
    pub(crate) fn from_cell(cell: &Cell, qend: usize, tend: usize) -> Self {
        Self {
            qstart: cell.qstart,
            qend,
            tstart: cell.tstart,
            tend,
            score: cell.score,
            match_count: cell.match_count,
            error_count: cell.error_count,
        }
    }

    pub fn query_len(&self) -> usize {
        self.qend - self.qstart
    }

    pub fn target_len(&self) -> usize {
        self.tend - self.tstart
    }

    /// True for the all-zero sentinel
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Fraction of alignment operations that are matches
    pub fn identity(&self) -> f64 {
        let total = self.match_count + self.error_count;
        if total == 0 {
            return 0.0;
        }
        self.match_count as f64 / total as f64
    }

    /// Would `cell` replace this result under the score-then-matches rule?
    ///
    /// Equal score and match count still wins, so the last cell scanned
    /// among full ties is the one reported.
    pub(crate) fn is_improved_by(&self, cell: &Cell) -> bool {
        cell.score > self.score
            || (cell.score == self.score && cell.match_count >= self.match_count)
    }
}

impl fmt::Display for AlignResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "AlignResult(qstart:{}, qend:{}, tstart:{}, tend:{}, score:{}, matches:{}, errors:{})",
            self.qstart,
            self.qend,
            self.tstart,
            self.tend,
            self.score,
            self.match_count,
            self.error_count
        )
    }
}
