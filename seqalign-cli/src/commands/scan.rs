//! Scan command implementation - align one pattern against every record of a FASTA/FASTQ file

use anyhow::Result;
use rayon::prelude::*;
use seqalign_core::io::FastxReader;
use seqalign_core::{AlignResult, Aligner, AlignmentMode};
use std::io::Write;
use std::path::Path;

use super::{write_header, write_result, ScoringArgs};
use crate::config::{Config, OutputFormat};
use crate::error::CliError;

#[allow(clippy::too_many_arguments)]
pub fn execute(
    config: &Config,
    out: &mut dyn Write,
    mode: AlignmentMode,
    pattern: &str,
    reads: &Path,
    reverse: bool,
    scoring: &ScoringArgs,
    format: Option<OutputFormat>,
    all: bool,
) -> Result<()> {
    if !reads.exists() {
        return Err(CliError::file_not_found(reads.to_path_buf()).into());
    }

    let params = scoring.resolve(&config.scoring)?;
    let pattern = pattern.to_ascii_uppercase();
    let aligner = Aligner::from_params(mode, pattern.as_bytes(), params).map_err(CliError::from)?;

    log::info!("Reading records from: {}", reads.display());
    let mut records = FastxReader::read_file(reads)?;
    log::info!("Scanning {} records with {}", records.len(), aligner);

    let results: Vec<AlignResult> = records
        .par_iter_mut()
        .map(|record| {
            record.to_uppercase();
            if reverse {
                aligner.align_from(&record.seq)
            } else {
                aligner.align_against(&record.seq)
            }
        })
        .collect();

    let format = format.unwrap_or(config.output.format);
    let report_unaligned = all || config.output.report_unaligned;

    write_header(out, format)?;
    let mut aligned = 0usize;
    for (record, result) in records.iter().zip(&results) {
        if result.is_empty() {
            log::trace!("{}: no alignment", record.id);
            if !report_unaligned {
                continue;
            }
        } else {
            aligned += 1;
        }
        write_result(out, format, &record.id, result)?;
    }

    log::info!("{} of {} records aligned", aligned, records.len());
    Ok(())
}
