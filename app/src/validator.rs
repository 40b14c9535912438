// ==============================================================================
// validator.rs - 23andMe Format Validation
// ==============================================================================
// Description: Header template and per-row checks for raw 23andMe files
// Author: Matt Barham
// Created: 2025-10-31
// Modified: 2026-10-16
// Version: 2.0.0
// Security: Fail-closed; any deviation from the canonical format rejects
// ==============================================================================

use std::collections::HashSet;
use tracing::{debug, warn};

/// Canonical 23andMe header, minus the generation timestamp line
const HEADER_TEMPLATE: &str = "
# This file contains raw genotype data, including data that is not used in 23andMe reports.
# This data has undergone a general quality review however only a subset of markers have been
# individually validated for accuracy. As such, this data is suitable only for research,
# educational, and informational use and not for medical or other use.
#
# Below is a text version of your data.  Fields are TAB-separated
# Each line corresponds to a single SNP.  For each SNP, we provide its identifier
# (an rsid or an internal id), its location on the reference human genome, and the
# genotype call oriented with respect to the plus strand on the human reference sequence.
# We are using reference human assembly build 37 (also known as Annotation Release 104).
# Note that it is possible that data downloaded at different times may be different due to ongoing
# improvements in our ability to call genotypes. More information about these changes can be found at:
#
# More information on reference human assembly builds:
# https://www.ncbi.nlm.nih.gov/assembly/GCF_000001405.13/
#
# rsid\tchromosome\tposition\tgenotype
";

/// Per-file variable lines, excluded before comparison
const TIMESTAMP_LINE_PREFIX: &str = "# This data file generated by 23andMe at:";
const PROFILE_URL_LINE_PREFIX: &str = "# https://you.23andme.com/p/";
const PROFILE_URL_MARKER: &str = "https://you.23andme.com";

const VALID_GENOTYPE_CHARS: &str = "ATCG-ID";

/// Which field of a data row failed its check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViolationKind {
    Rsid,
    Chromosome,
    Genotype,
}

/// A data row that failed a content check
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordViolation {
    /// 1-based count of data rows, comments excluded
    pub line: usize,
    pub kind: ViolationKind,
    pub value: String,
}

/// Why the data section was rejected
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordCheckFailure {
    /// Blank line where a record was expected
    UnexpectedEnd { line: usize },
    /// Row does not split into exactly four tab-separated fields
    ColumnCount { line: usize, found: usize },
    /// One or more rows with invalid field content
    InvalidRecords(Vec<RecordViolation>),
}

pub struct FormatValidator {
    valid_chromosomes: HashSet<String>,
    valid_genotype_chars: HashSet<char>,
}

impl FormatValidator {
    pub fn new() -> Self {
        let valid_chromosomes = (1..=22)
            .map(|n| n.to_string())
            .chain(["X", "Y", "MT"].iter().map(|s| s.to_string()))
            .collect();

        Self {
            valid_chromosomes,
            valid_genotype_chars: VALID_GENOTYPE_CHARS.chars().collect(),
        }
    }

    /// Normalized header block of the file
    ///
    /// Collects the leading `#`/`rsid` lines, drops the timestamp and
    /// profile-URL lines, trims each line and discards the first kept one
    /// (the `#` spacer that follows the timestamp).
    pub fn read_header<S: AsRef<str>>(&self, lines: &[S]) -> String {
        let mut header_lines = Vec::new();

        for line in lines {
            let line = line.as_ref();
            if !(line.starts_with('#') || line.starts_with("rsid")) {
                break;
            }
            if line.starts_with(TIMESTAMP_LINE_PREFIX) || line.starts_with(PROFILE_URL_LINE_PREFIX) {
                continue;
            }
            header_lines.push(line.trim());
        }

        header_lines.into_iter().skip(1).collect::<Vec<_>>().join("\n")
    }

    /// Exact match of the file header against the canonical template
    pub fn check_header<S: AsRef<str>>(&self, lines: &[S]) -> bool {
        let file_header = self.read_header(lines);
        let matches = canonical_header() == file_header.trim();

        if !matches {
            warn!("File header does not match the 23andMe template");
        }
        matches
    }

    /// Structural and content checks over every data row
    ///
    /// Returns the first structural failure, or all content violations.
    pub fn validate_records<S: AsRef<str>>(&self, lines: &[S]) -> Result<(), RecordCheckFailure> {
        let mut violations = Vec::new();
        let mut line_number = 1;

        for line in lines {
            let line = line.as_ref().trim();
            if line.starts_with('#') {
                continue;
            }
            if line.is_empty() {
                return Err(RecordCheckFailure::UnexpectedEnd { line: line_number });
            }

            let columns: Vec<&str> = line.split('\t').collect();
            if columns.len() != 4 {
                return Err(RecordCheckFailure::ColumnCount {
                    line: line_number,
                    found: columns.len(),
                });
            }

            let (rsid, chromosome, genotype) = (columns[0], columns[1], columns[3]);

            if !is_valid_rsid(rsid) {
                violations.push(RecordViolation {
                    line: line_number,
                    kind: ViolationKind::Rsid,
                    value: rsid.to_string(),
                });
            }
            if !self.valid_chromosomes.contains(chromosome) {
                violations.push(RecordViolation {
                    line: line_number,
                    kind: ViolationKind::Chromosome,
                    value: chromosome.to_string(),
                });
            }
            if genotype.chars().any(|c| !self.valid_genotype_chars.contains(&c)) {
                violations.push(RecordViolation {
                    line: line_number,
                    kind: ViolationKind::Genotype,
                    value: genotype.to_string(),
                });
            }

            line_number += 1;
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(RecordCheckFailure::InvalidRecords(violations))
        }
    }

    /// True only if every data row is well-formed
    pub fn check_record_lines<S: AsRef<str>>(&self, lines: &[S]) -> bool {
        match self.validate_records(lines) {
            Ok(()) => true,
            Err(RecordCheckFailure::UnexpectedEnd { line }) => {
                warn!("File ended unexpectedly at line {}", line);
                false
            }
            Err(RecordCheckFailure::ColumnCount { line, found }) => {
                warn!("Line {} does not have exactly 4 columns (found {})", line, found);
                false
            }
            Err(RecordCheckFailure::InvalidRecords(violations)) => {
                for v in violations.iter().take(20) {
                    debug!("Line {}: invalid {:?} value: {}", v.line, v.kind, v.value);
                }
                warn!("{} invalid record fields found", violations.len());
                false
            }
        }
    }
}

impl Default for FormatValidator {
    fn default() -> Self {
        Self::new()
    }
}

fn canonical_header() -> String {
    HEADER_TEMPLATE
        .trim()
        .lines()
        .filter(|line| !line.contains(PROFILE_URL_MARKER))
        .map(str::trim)
        .collect::<Vec<_>>()
        .join("\n")
}

/// `^(rs|i)\d+$`
fn is_valid_rsid(rsid: &str) -> bool {
    let digits = rsid
        .strip_prefix("rs")
        .or_else(|| rsid.strip_prefix('i'))
        .unwrap_or("");
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}
