// ==============================================================================
// genome23andme.rs - 23andMe Raw Data Loader
// ==============================================================================
// Description: Reads 23andMe raw genome files into lines and typed records
// Author: Matt Barham
// Created: 2025-11-04
// Modified: 2026-10-16
// Version: 2.0.0
// ==============================================================================
// Format: Tab-delimited text with header comments
// Example:
//   # rsid    chromosome    position    genotype
//   rs548049170    1    69869    TT
//   rs13328684    1    74792    --
//   i713057    1    1425512    TT
// ==============================================================================
// Loading is lenient: rows that cannot be typed are reported back, not fatal.
// Strict structural checks live in validator.rs.
// ==============================================================================

use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use thiserror::Error;
use tracing::debug;

/// 23andMe genome record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Genome23Record {
    /// SNP identifier (e.g., "rs548049170") or internal id (e.g., "i713057")
    pub rsid: String,
    /// Chromosome ("1"-"22", "X", "Y", "MT")
    pub chromosome: String,
    /// Base pair position (GRCh37/hg19)
    pub position: u64,
    /// Genotype call (e.g., "TT", "AG", "--" for no-call, "DI" for indels)
    pub genotype: String,
}

impl Genome23Record {
    /// True for provider-internal markers (`i` prefix) rather than dbSNP rsids
    pub fn is_internal_id(&self) -> bool {
        self.rsid.starts_with('i')
    }
}

/// Errors that can occur while loading a 23andMe file
#[derive(Error, Debug)]
pub enum Genome23ParseError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Invalid line format at line {line}: {details}")]
    InvalidFormat { line: usize, details: String },

    #[error("Invalid position value at line {line}: {value}")]
    InvalidPosition { line: usize, value: String },
}

/// Records typed from a file plus the rows that could not be typed
#[derive(Debug, Default)]
pub struct ParsedGenome {
    pub records: Vec<Genome23Record>,
    pub rejected: Vec<Genome23ParseError>,
}

/// Loader for 23andMe raw genome files
#[derive(Debug, Clone, Default)]
pub struct Genome23Parser;

impl Genome23Parser {
    pub fn new() -> Self {
        Self
    }

    /// Read every line of the file, `\n` / `\r\n` stripped
    ///
    /// Bytes that are not valid UTF-8 become U+FFFD so the row fails
    /// validation instead of aborting the read.
    pub fn read_lines(&self, path: impl AsRef<Path>) -> Result<Vec<String>, Genome23ParseError> {
        let file = File::open(path.as_ref())?;
        let mut reader = BufReader::new(file);

        let mut lines = Vec::new();
        let mut buf = Vec::new();
        while reader.read_until(b'\n', &mut buf)? > 0 {
            if buf.last() == Some(&b'\n') {
                buf.pop();
                if buf.last() == Some(&b'\r') {
                    buf.pop();
                }
            }
            lines.push(String::from_utf8_lossy(&buf).into_owned());
            buf.clear();
        }

        debug!("Read {} lines from {:?}", lines.len(), path.as_ref());
        Ok(lines)
    }

    /// Type all data rows, skipping comments and blank lines
    ///
    /// Rows without four tab-separated fields or with a non-numeric position
    /// are collected in `rejected`; the rest land in `records` in file order.
    pub fn parse_lines<S: AsRef<str>>(&self, lines: &[S]) -> ParsedGenome {
        let mut parsed = ParsedGenome::default();

        for (idx, line) in lines.iter().enumerate() {
            let line = line.as_ref();
            let trimmed = line.trim();

            // Skip comment lines (start with '#')
            if trimmed.starts_with('#') || trimmed.is_empty() {
                continue;
            }

            match self.parse_line(line, idx + 1) {
                Ok(record) => parsed.records.push(record),
                Err(e) => {
                    debug!("Skipping row: {}", e);
                    parsed.rejected.push(e);
                }
            }
        }

        parsed
    }

    /// Parse a single line from the 23andMe file
    fn parse_line(&self, line: &str, line_number: usize) -> Result<Genome23Record, Genome23ParseError> {
        let fields: Vec<&str> = line.split('\t').collect();

        if fields.len() != 4 {
            return Err(Genome23ParseError::InvalidFormat {
                line: line_number,
                details: format!("Expected 4 tab-delimited fields, found {}", fields.len()),
            });
        }

        let rsid = fields[0].trim().to_string();
        let chromosome = fields[1].trim().to_string();
        let position_str = fields[2].trim();
        let genotype = fields[3].trim().to_string();

        let position = position_str.parse::<u64>().map_err(|_| {
            Genome23ParseError::InvalidPosition {
                line: line_number,
                value: position_str.to_string(),
            }
        })?;

        Ok(Genome23Record {
            rsid,
            chromosome,
            position,
            genotype,
        })
    }
}
