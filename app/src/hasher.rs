// ==============================================================================
// hasher.rs - Canonical Genome Content Hash
// ==============================================================================
// Description: Order-independent SHA-256 over the dbSNP records of a genome
// Author: Matt Barham
// Created: 2026-10-16
// Modified: 2026-10-16
// Version: 1.0.0
// ==============================================================================
// Canonical form: internal-id records removed, remaining records sorted by
// rsid (byte order), each rendered `rsid:chromosome:position:genotype`,
// joined with `|`.
// ==============================================================================

use sha2::{Digest, Sha256};
use tracing::debug;

use crate::parsers::Genome23Record;

/// Canonical byte string the hash is computed over
pub fn canonical_content(records: &[Genome23Record]) -> String {
    let mut kept: Vec<&Genome23Record> = records.iter().filter(|r| !r.is_internal_id()).collect();

    // Ties on rsid fall back to the other fields so duplicates hash stably
    kept.sort_by(|a, b| {
        a.rsid
            .cmp(&b.rsid)
            .then_with(|| a.chromosome.cmp(&b.chromosome))
            .then_with(|| a.position.cmp(&b.position))
            .then_with(|| a.genotype.cmp(&b.genotype))
    });

    kept.iter()
        .map(|r| format!("{}:{}:{}:{}", r.rsid, r.chromosome, r.position, r.genotype))
        .collect::<Vec<_>>()
        .join("|")
}

/// Lowercase hex SHA-256 of the canonical content
pub fn hash_records(records: &[Genome23Record]) -> String {
    let content = canonical_content(records);

    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    let hash = format!("{:x}", hasher.finalize());

    debug!("Genome hash over {} bytes: {}", content.len(), hash);
    hash
}
