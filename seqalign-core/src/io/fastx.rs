//! FASTA/FASTQ record reader
//!
//! Materialises whole records with the needletail parser so they can be
//! handed to the alignment engine as contiguous byte slices. Gzipped input
//! (`.gz`) is decoded with flate2. Quality strings are dropped.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use anyhow::Result;
use thiserror::Error;
use flate2::read::GzDecoder;

use needletail::{parse_fastx_file, parse_fastx_reader};

#[derive(Debug, Error)]
pub enum FastxError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(String),
    #[error("Empty file or no sequences found")]
    EmptyFile,
}

/// One sequence record: header split into id and description, plus bases
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeqRecord {
    pub id: String,
    pub description: Option<String>,
    pub seq: Vec<u8>,
}

impl SeqRecord {
    pub fn new(id: impl Into<String>, seq: impl Into<Vec<u8>>) -> Self {
        Self {
            id: id.into(),
            description: None,
            seq: seq.into(),
        }
    }

    pub fn len(&self) -> usize {
        self.seq.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seq.is_empty()
    }

    /// Upper-case the bases in place so soft-masked input meets the `N` wildcard
    pub fn to_uppercase(&mut self) {
        self.seq.make_ascii_uppercase();
    }

    fn from_header(header: &[u8], seq: Vec<u8>) -> Self {
        let header = String::from_utf8_lossy(header);
        let mut parts = header.splitn(2, char::is_whitespace);
        let id = parts.next().unwrap_or_default().to_string();
        let description = parts
            .next()
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .map(str::to_string);
        Self { id, description, seq }
    }
}

/// FASTA/FASTQ reader
pub struct FastxReader;

impl FastxReader {
    /// Read every record of a FASTA/FASTQ file, plain or gzipped
    pub fn read_file<P: AsRef<Path>>(path: P) -> Result<Vec<SeqRecord>> {
        let path_str = path.as_ref().to_string_lossy();

        if path_str.ends_with(".gz") {
            let file = File::open(&path).map_err(FastxError::Io)?;
            Self::read_reader(BufReader::new(GzDecoder::new(file)))
        } else {
            let mut reader = parse_fastx_file(&path)
                .map_err(|e| FastxError::Parse(e.to_string()))?;
            let mut records = Vec::new();
            while let Some(record) = reader.next() {
                let record = record.map_err(|e| FastxError::Parse(e.to_string()))?;
                records.push(SeqRecord::from_header(record.id(), record.seq().to_vec()));
            }
            Self::non_empty(records)
        }
    }

    /// Read FASTA/FASTQ records from any readable source
    pub fn read_reader<R: std::io::Read + Send>(reader: R) -> Result<Vec<SeqRecord>> {
        let mut fastx_reader = parse_fastx_reader(reader)
            .map_err(|e| FastxError::Parse(e.to_string()))?;

        let mut records = Vec::new();
        while let Some(record) = fastx_reader.next() {
            let record = record.map_err(|e| FastxError::Parse(e.to_string()))?;
            records.push(SeqRecord::from_header(record.id(), record.seq().to_vec()));
        }
        Self::non_empty(records)
    }

    fn non_empty(records: Vec<SeqRecord>) -> Result<Vec<SeqRecord>> {
        if records.is_empty() {
            Err(FastxError::EmptyFile.into())
        } else {
            log::debug!("Read {} sequence records", records.len());
            Ok(records)
        }
    }
}
