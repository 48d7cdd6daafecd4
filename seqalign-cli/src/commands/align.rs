//! Align command implementation - align two literal sequences

use anyhow::Result;
use seqalign_core::{align, AlignmentMode};
use std::io::Write;

use super::{write_result, ScoringArgs};
use crate::config::{Config, OutputFormat};

pub fn execute(
    config: &Config,
    out: &mut dyn Write,
    mode: AlignmentMode,
    query: &str,
    target: &str,
    scoring: &ScoringArgs,
    format: Option<OutputFormat>,
) -> Result<()> {
    let params = scoring.resolve(&config.scoring)?;
    let query = query.to_ascii_uppercase();
    let target = target.to_ascii_uppercase();

    log::debug!(
        "Aligning {}bp query against {}bp target in {} mode with {:?}",
        query.len(),
        target.len(),
        mode,
        params
    );

    let result = align(mode, query.as_bytes(), target.as_bytes(), &params);
    if result.is_empty() {
        log::warn!("No alignment passed the {:.1}% error rate filter", params.error_rate * 100.0);
    }

    write_result(out, format.unwrap_or(config.output.format), "query", &result)
}
