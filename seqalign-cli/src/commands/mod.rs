//! Command implementations for seqalign CLI

pub mod align;
pub mod scan;

use clap::{Args, ValueEnum};
use seqalign_core::{AlignResult, ScoringParams, WildcardPolicy};
use serde::Serialize;
use std::io::Write;

use crate::config::{OutputFormat, ScoringConfig};
use crate::error::CliResult;

/// Scoring flags shared by every aligning command; unset flags fall back
/// to the configuration file.
#[derive(Args, Debug, Clone, Default)]
pub struct ScoringArgs {
    /// Match score
    #[arg(long = "match", allow_hyphen_values = true)]
    pub match_score: Option<i32>,

    /// Mismatch score
    #[arg(long = "mismatch", allow_hyphen_values = true)]
    pub mismatch_score: Option<i32>,

    /// Per-residue gap score
    #[arg(long = "gap", allow_hyphen_values = true)]
    pub gap_score: Option<i32>,

    /// Which side treats N as matching anything
    #[arg(long)]
    pub wildcard: Option<WildcardArg>,

    /// Maximum errors per 100 aligned target bases (0-100)
    #[arg(long = "error-rate")]
    pub error_rate_percent: Option<i32>,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum WildcardArg {
    None,
    Query,
    Target,
    Both,
}

impl From<WildcardArg> for WildcardPolicy {
    fn from(arg: WildcardArg) -> Self {
        match arg {
            WildcardArg::None => WildcardPolicy::None,
            WildcardArg::Query => WildcardPolicy::Query,
            WildcardArg::Target => WildcardPolicy::Target,
            WildcardArg::Both => WildcardPolicy::Both,
        }
    }
}

impl ScoringArgs {
    /// Overlay the command line flags on the configured scoring
    pub fn resolve(&self, base: &ScoringConfig) -> CliResult<ScoringParams> {
        let merged = ScoringConfig {
            match_score: self.match_score.unwrap_or(base.match_score),
            mismatch_score: self.mismatch_score.unwrap_or(base.mismatch_score),
            gap_score: self.gap_score.unwrap_or(base.gap_score),
            wildcard: self.wildcard.map(Into::into).unwrap_or(base.wildcard),
            error_rate_percent: self.error_rate_percent.unwrap_or(base.error_rate_percent),
        };
        merged.to_params()
    }
}

#[derive(Serialize)]
struct ResultLine<'a> {
    id: &'a str,
    aligned: bool,
    #[serde(flatten)]
    result: &'a AlignResult,
}

/// Write one result line in the requested format
pub fn write_result(
    out: &mut dyn Write,
    format: OutputFormat,
    id: &str,
    result: &AlignResult,
) -> anyhow::Result<()> {
    match format {
        OutputFormat::Tsv => writeln!(
            out,
            "{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}",
            id,
            result.qstart,
            result.qend,
            result.tstart,
            result.tend,
            result.score,
            result.match_count,
            result.error_count
        )?,
        OutputFormat::Json => {
            let line = ResultLine {
                id,
                aligned: !result.is_empty(),
                result,
            };
            serde_json::to_writer(&mut *out, &line)?;
            writeln!(out)?;
        }
    }
    Ok(())
}

pub fn write_header(out: &mut dyn Write, format: OutputFormat) -> anyhow::Result<()> {
    if format == OutputFormat::Tsv {
        writeln!(out, "#id\tqstart\tqend\ttstart\ttend\tscore\tmatches\terrors")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> AlignResult {
        AlignResult {
            qstart: 0,
            qend: 4,
            tstart: 2,
            tend: 6,
            score: 4,
            match_count: 4,
            error_count: 0,
        }
    }

    #[test]
    fn test_tsv_line() {
        let mut out = Vec::new();
        write_result(&mut out, OutputFormat::Tsv, "r1", &sample()).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "r1\t0\t4\t2\t6\t4\t4\t0\n");
    }

    #[test]
    fn test_json_line() {
        let mut out = Vec::new();
        write_result(&mut out, OutputFormat::Json, "r1", &sample()).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["id"], "r1");
        assert_eq!(value["aligned"], true);
        assert_eq!(value["tstart"], 2);
        assert_eq!(value["match_count"], 4);
    }

    #[test]
    fn test_flags_override_config() {
        let args = ScoringArgs {
            gap_score: Some(-5),
            wildcard: Some(WildcardArg::Both),
            error_rate_percent: Some(10),
            ..Default::default()
        };
        let params = args.resolve(&ScoringConfig::default()).unwrap();
        assert_eq!(params.match_score, 1);
        assert_eq!(params.gap_score, -5);
        assert_eq!(params.wildcard, WildcardPolicy::Both);
        assert!((params.error_rate - 0.1).abs() < 1e-12);
    }

    #[test]
    fn test_out_of_range_error_rate_is_rejected() {
        let args = ScoringArgs {
            error_rate_percent: Some(-3),
            ..Default::default()
        };
        assert!(args.resolve(&ScoringConfig::default()).is_err());
    }
}
