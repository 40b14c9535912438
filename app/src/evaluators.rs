// ==============================================================================
// evaluators.rs - Proof Sub-score Evaluators
// ==============================================================================
// Description: Authenticity, ownership, uniqueness and quality scoring
// Author: Matt Barham
// Created: 2026-10-16
// Modified: 2026-10-16
// Version: 1.0.0
// ==============================================================================

use std::path::PathBuf;
use tracing::{debug, info, warn};

use crate::collaborators::Collaborators;
use crate::curves::{
    indel_score, internal_id_rsid_score, invalid_genotype_score, percent_verified_score,
    QualityCurves,
};
use crate::error::ProofResult;
use crate::hasher::hash_records;
use crate::identity::extract_profile_id;
use crate::parsers::{Genome23Parser, Genome23Record};
use crate::validator::FormatValidator;

const INVALID_GENOTYPE_WEIGHT: f64 = 0.4;
const PERCENT_VERIFIED_WEIGHT: f64 = 0.3;
const INDEL_WEIGHT: f64 = 0.2;
const INTERNAL_ID_WEIGHT: f64 = 0.1;

/// Scoring context for a single genome file
///
/// Built once per run: the profile id, typed records and content hash are
/// derived up front and never change afterwards.
pub struct GenomeScorer<'a, C: Collaborators + ?Sized> {
    collaborators: &'a C,
    validator: FormatValidator,
    curves: QualityCurves,
    file_path: PathBuf,
    lines: Vec<String>,
    records: Vec<Genome23Record>,
    profile_id: Option<String>,
    sender_address: String,
    genome_hash: String,
}

impl<'a, C: Collaborators + ?Sized> GenomeScorer<'a, C> {
    pub fn new(
        collaborators: &'a C,
        file_path: PathBuf,
        lines: Vec<String>,
        sender_address: String,
    ) -> Self {
        let profile_id = extract_profile_id(&lines);
        let parsed = Genome23Parser::new().parse_lines(&lines);
        if !parsed.rejected.is_empty() {
            warn!(
                "{} rows could not be typed and are excluded from hashing",
                parsed.rejected.len()
            );
        }
        let genome_hash = hash_records(&parsed.records);

        debug!(
            "Scorer ready: {} records, profile id present: {}",
            parsed.records.len(),
            profile_id.is_some()
        );

        Self {
            collaborators,
            validator: FormatValidator::new(),
            curves: QualityCurves::default(),
            file_path,
            lines,
            records: parsed.records,
            profile_id,
            sender_address,
            genome_hash,
        }
    }

    pub fn profile_id(&self) -> Option<&str> {
        self.profile_id.as_deref()
    }

    pub fn genome_hash(&self) -> &str {
        &self.genome_hash
    }

    pub fn sender_address(&self) -> &str {
        &self.sender_address
    }

    /// 1.0 if the verification service approves the profile, else 0.0
    pub async fn proof_of_ownership(&self) -> ProofResult<f64> {
        let Some(profile_id) = self.profile_id.as_deref() else {
            warn!("No profile id in file header, ownership cannot be verified");
            return Ok(0.0);
        };

        let approved = self
            .collaborators
            .verify_profile(&self.sender_address, profile_id)
            .await?;

        info!("Profile verification: approved={}", approved);
        Ok(if approved { 1.0 } else { 0.0 })
    }

    /// 1.0 if both the header and every data row are well-formed, else 0.0
    pub fn proof_of_authenticity(&self) -> f64 {
        let header_ok = self.validator.check_header(&self.lines);
        let rsids_ok = self.validator.check_record_lines(&self.lines);

        info!("Authenticity: header_ok={}, records_ok={}", header_ok, rsids_ok);
        if header_ok && rsids_ok {
            1.0
        } else {
            0.0
        }
    }

    /// 1.0 if the registry has not seen this genome hash, else 0.0
    pub async fn proof_of_uniqueness(&self) -> ProofResult<f64> {
        let unique = self.collaborators.check_hash_unique(&self.genome_hash).await?;

        info!("Hash uniqueness: unique={}", unique);
        Ok(if unique { 1.0 } else { 0.0 })
    }

    /// Weighted blend of the four quality curves over dbSNP counts
    pub async fn proof_of_quality(&self) -> ProofResult<f64> {
        let counts = self
            .collaborators
            .lookup_verification_counts(&self.file_path, &self.records)
            .await?;
        counts.validate()?;

        let invalid = invalid_genotype_score(counts.invalid_genotypes, &self.curves.invalid_genotypes);
        let indel = indel_score(counts.indels, &self.curves.indels);
        let internal_id = internal_id_rsid_score(counts.internal_id_rsids, &self.curves.internal_ids);
        let percent_verified = percent_verified_score(
            counts.database_verified,
            counts.total,
            &self.curves.percent_verified,
        )?;

        debug!(
            "Quality components: invalid={}, percent_verified={}, indel={}, internal_id={}",
            invalid, percent_verified, indel, internal_id
        );

        let quality = INVALID_GENOTYPE_WEIGHT * invalid
            + PERCENT_VERIFIED_WEIGHT * percent_verified
            + INDEL_WEIGHT * indel
            + INTERNAL_ID_WEIGHT * internal_id;

        info!("Quality score: {:.4}", quality);
        Ok(quality)
    }
}
