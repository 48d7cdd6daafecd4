//! Pairwise alignment engine
//!
//! Linear gap-cost Smith-Waterman / Needleman-Wunsch family with three
//! topologies. All modes share one recurrence and differ only in boundary
//! setup, zero-floor reset and which cells are eligible results.
//!
//! ```text
//!                 target (j)
//!             -----------------> n
//!            |
//! query (i)  |
//!            V
//!            m
//! ```
//!
//! Only one row of `m + 1` cells is kept. The target is swept column by
//! column; before `row[i]` is overwritten its previous-column value is held
//! as the diagonal predecessor of `row[i + 1]`. Every cell carries the
//! origin and match/error counts of its path, so no traceback is needed.

use crate::error::AlignError;
use crate::scoring::ScoringParams;
use crate::types::{AlignResult, Cell};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Alignment topology
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlignmentMode {
    /// Best-scoring substring pair, scores floored at zero (Smith-Waterman)
    Local,
    /// Both sequences end to end (Needleman-Wunsch)
    Global,
    /// Query consumed from its start, target overhangs free
    Glocal,
}

impl AlignmentMode {
    pub fn name(self) -> &'static str {
        match self {
            Self::Local => "local",
            Self::Global => "global",
            Self::Glocal => "glocal",
        }
    }

    pub fn all() -> [AlignmentMode; 3] {
        [Self::Local, Self::Global, Self::Glocal]
    }

    /// Column-0 value of `row[i]`
    fn row_origin(self, i: usize, gap: i64) -> Cell {
        match self {
            Self::Local => Cell::origin(i, 0, 0),
            Self::Global | Self::Glocal => Cell::origin(i, 0, i as i64 * gap),
        }
    }

    /// Value of `row[0]` while computing column `j`
    fn column_origin(self, j: usize, gap: i64) -> Cell {
        match self {
            Self::Global => Cell::origin(0, j, j as i64 * gap),
            Self::Local | Self::Glocal => Cell::origin(0, j, 0),
        }
    }

    fn floors_at_zero(self) -> bool {
        matches!(self, Self::Local)
    }
}

impl fmt::Display for AlignmentMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for AlignmentMode {
    type Err = AlignError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "local" => Ok(Self::Local),
            "global" => Ok(Self::Global),
            "glocal" => Ok(Self::Glocal),
            _ => Err(AlignError::UnknownMode(s.to_string())),
        }
    }
}

/// Align `query` against `target` with the given topology
pub fn align(
    mode: AlignmentMode,
    query: &[u8],
    target: &[u8],
    params: &ScoringParams,
) -> AlignResult {
    let result = match mode {
        AlignmentMode::Local => align_local(query, target, params),
        AlignmentMode::Global => align_global(query, target, params),
        AlignmentMode::Glocal => align_glocal(query, target, params),
    };
    log::trace!(
        "{} alignment of {}bp query against {}bp target: {}",
        mode,
        query.len(),
        target.len(),
        result
    );
    result
}

/// Smith-Waterman style local alignment.
///
/// Returns the all-zero result when nothing passes the error-rate filter,
/// including for empty input.
pub fn align_local(query: &[u8], target: &[u8], params: &ScoringParams) -> AlignResult {
    let mut best = AlignResult::default();
    sweep(
        AlignmentMode::Local,
        query,
        target,
        params,
        |i, j, cell| {
            if within_error_rate(cell, j, params.error_rate) && best.is_improved_by(cell) {
                best = AlignResult::from_cell(cell, i, j);
            }
        },
        |_, _| {},
    );
    best
}

/// End-to-end alignment, all-zero result when not accepted.
///
/// See [`try_align_global`] to tell a rejected alignment apart from the
/// accepted alignment of two empty sequences.
pub fn align_global(query: &[u8], target: &[u8], params: &ScoringParams) -> AlignResult {
    try_align_global(query, target, params).unwrap_or_default()
}

/// End-to-end alignment.
///
/// Accepted when the error count of the final cell is at most
/// `target.len() * error_rate`. `None` when rejected, or when exactly one
/// of the sequences is empty.
pub fn try_align_global(
    query: &[u8],
    target: &[u8],
    params: &ScoringParams,
) -> Option<AlignResult> {
    let (qlen, tlen) = (query.len(), target.len());
    if (qlen == 0) != (tlen == 0) {
        return None;
    }

    let row = sweep(AlignmentMode::Global, query, target, params, |_, _, _| {}, |_, _| {});
    let last = &row[qlen];
    if last.error_count as f64 <= tlen as f64 * params.error_rate {
        Some(AlignResult {
            qstart: 0,
            qend: qlen,
            tstart: 0,
            tend: tlen,
            score: last.score,
            match_count: last.match_count,
            error_count: last.error_count,
        })
    } else {
        None
    }
}

/// Semi-global alignment: the query start is anchored (leading query gaps
/// are penalised) while leading and trailing target overhang is free.
///
/// Candidates are the bottom cell of every column (query fully consumed)
/// and every row of the last column (target fully consumed).
pub fn align_glocal(query: &[u8], target: &[u8], params: &ScoringParams) -> AlignResult {
    let (qlen, tlen) = (query.len(), target.len());
    if qlen == 0 || tlen == 0 {
        return AlignResult::default();
    }

    let mut best = AlignResult::default();
    let row = sweep(
        AlignmentMode::Glocal,
        query,
        target,
        params,
        |_, _, _| {},
        |j, row| {
            let bottom = &row[qlen];
            if within_error_rate(bottom, j, params.error_rate) && best.is_improved_by(bottom) {
                best = AlignResult::from_cell(bottom, qlen, j);
            }
        },
    );

    for (i, cell) in row.iter().enumerate().take(qlen).skip(1) {
        if within_error_rate(cell, tlen, params.error_rate) && best.is_improved_by(cell) {
            best = AlignResult::from_cell(cell, i, tlen);
        }
    }
    best
}

#[inline]
fn within_error_rate(cell: &Cell, tend: usize, error_rate: f64) -> bool {
    cell.error_count as f64 <= error_rate * (tend - cell.tstart) as f64
}

/// Run the shared recurrence over the whole matrix and return the last column.
///
/// `on_cell(i, j, cell)` sees every updated cell that was not reset to zero;
/// `on_column(j, row)` sees the row after column `j` is complete.
fn sweep<F, G>(
    mode: AlignmentMode,
    query: &[u8],
    target: &[u8],
    params: &ScoringParams,
    mut on_cell: F,
    mut on_column: G,
) -> Vec<Cell>
where
    F: FnMut(usize, usize, &Cell),
    G: FnMut(usize, &[Cell]),
{
    let gap = i64::from(params.gap_score);
    let match_score = i64::from(params.match_score);
    let mismatch_score = i64::from(params.mismatch_score);

    let mut row: Vec<Cell> = (0..=query.len()).map(|i| mode.row_origin(i, gap)).collect();

    for (j, &t) in target.iter().enumerate().map(|(idx, t)| (idx + 1, t)) {
        let mut diag = std::mem::replace(&mut row[0], mode.column_origin(j, gap));

        for (i, &q) in query.iter().enumerate().map(|(idx, q)| (idx + 1, q)) {
            let is_match = params.is_match(q, t);
            let diag_score = diag.score + if is_match { match_score } else { mismatch_score };
            let up_score = row[i - 1].score + gap;
            let left_score = row[i].score + gap;

            let next = if diag_score >= up_score && diag_score >= left_score {
                Cell {
                    score: diag_score,
                    match_count: diag.match_count + usize::from(is_match),
                    error_count: diag.error_count + usize::from(!is_match),
                    ..diag
                }
            } else if up_score >= left_score {
                Cell {
                    score: up_score,
                    error_count: row[i - 1].error_count + 1,
                    ..row[i - 1]
                }
            } else {
                Cell {
                    score: left_score,
                    error_count: row[i].error_count + 1,
                    ..row[i]
                }
            };

            diag = row[i];

            if mode.floors_at_zero() && next.score < 0 {
                row[i] = Cell::origin(i, j, 0);
            } else {
                row[i] = next;
                on_cell(i, j, &row[i]);
            }
        }

        on_column(j, &row);
    }

    row
}
