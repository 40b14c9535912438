// ==============================================================================
// models.rs - Proof Data Models
// ==============================================================================
// Description: Verification counts, sub-scores and the public proof response
// Author: Matt Barham
// Created: 2025-11-12
// Modified: 2026-10-16
// Version: 3.0.0
// ==============================================================================

use serde::{Deserialize, Serialize};

use crate::error::{ProofError, ProofResult};

/// Aggregate counts from the reference SNP lookup service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationCounts {
    /// Records whose genotype call is not a valid allele pair
    pub invalid_genotypes: u64,
    /// Records with insertion/deletion calls (I/D)
    pub indels: u64,
    /// Records keyed by a provider-internal id (`i...`)
    #[serde(rename = "i_rsids")]
    pub internal_id_rsids: u64,
    /// Records matched against dbSNP
    #[serde(rename = "dbsnp_verified")]
    pub database_verified: u64,
    /// All records checked
    #[serde(rename = "all")]
    pub total: u64,
}

impl VerificationCounts {
    /// Reject counts that cannot produce a verified ratio
    pub fn validate(&self) -> ProofResult<()> {
        if self.total == 0 {
            return Err(ProofError::InvalidVerificationCounts(
                "total record count is zero".to_string(),
            ));
        }
        if self.database_verified > self.total {
            return Err(ProofError::InvalidVerificationCounts(format!(
                "verified count {} exceeds total {}",
                self.database_verified, self.total
            )));
        }
        Ok(())
    }
}

/// The four independent sub-scores, each in [0, 1]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreVector {
    pub authenticity: f64,
    pub ownership: f64,
    pub uniqueness: f64,
    pub quality: f64,
}

impl ScoreVector {
    /// Equal-weight composite
    pub fn total(&self) -> f64 {
        0.25 * (self.quality + self.ownership + self.authenticity + self.uniqueness)
    }
}

/// Public attributes of a proof
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProofAttributes {
    pub total_score: f64,
    pub score_threshold: f64,
}

/// Metadata written alongside the proof
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProofMetadata {
    pub dlp_id: u64,
}

/// Result of one proof run, written to `results.json`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProofResponse {
    pub dlp_id: u64,
    pub valid: bool,
    pub score: f64,
    pub authenticity: f64,
    pub ownership: f64,
    pub uniqueness: f64,
    pub quality: f64,
    pub attributes: ProofAttributes,
    pub metadata: ProofMetadata,
}

impl ProofResponse {
    pub fn new(dlp_id: u64, scores: ScoreVector, score_threshold: f64) -> Self {
        let total_score = scores.total();

        Self {
            dlp_id,
            valid: total_score >= score_threshold,
            score: total_score,
            authenticity: scores.authenticity,
            ownership: scores.ownership,
            uniqueness: scores.uniqueness,
            quality: scores.quality,
            attributes: ProofAttributes {
                total_score,
                score_threshold,
            },
            metadata: ProofMetadata { dlp_id },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scores(a: f64, o: f64, u: f64, q: f64) -> ScoreVector {
        ScoreVector {
            authenticity: a,
            ownership: o,
            uniqueness: u,
            quality: q,
        }
    }

    #[test]
    fn test_counts_wire_names() {
        let json = r#"{"invalid_genotypes":1,"indels":3,"i_rsids":5,"dbsnp_verified":90,"all":100}"#;
        let counts: VerificationCounts = serde_json::from_str(json).unwrap();

        assert_eq!(counts.internal_id_rsids, 5);
        assert_eq!(counts.database_verified, 90);
        assert_eq!(counts.total, 100);
        assert!(counts.validate().is_ok());
    }

    #[test]
    fn test_counts_missing_field_rejected() {
        let json = r#"{"invalid_genotypes":1,"indels":3,"i_rsids":5,"dbsnp_verified":90}"#;
        assert!(serde_json::from_str::<VerificationCounts>(json).is_err());
    }

    #[test]
    fn test_counts_validate() {
        let mut counts = VerificationCounts {
            invalid_genotypes: 0,
            indels: 0,
            internal_id_rsids: 0,
            database_verified: 0,
            total: 0,
        };
        assert!(matches!(
            counts.validate(),
            Err(ProofError::InvalidVerificationCounts(_))
        ));

        counts.total = 10;
        counts.database_verified = 11;
        assert!(counts.validate().is_err());

        counts.database_verified = 10;
        assert!(counts.validate().is_ok());
    }

    #[test]
    fn test_total_is_equal_weighted() {
        assert_eq!(scores(1.0, 1.0, 1.0, 1.0).total(), 1.0);
        assert_eq!(scores(0.5, 0.5, 0.5, 0.5).total(), 0.5);
        assert_eq!(scores(1.0, 0.0, 1.0, 0.0).total(), 0.5);
    }

    #[test]
    fn test_proof_response_validity() {
        let response = ProofResponse::new(1234, scores(1.0, 1.0, 1.0, 1.0), 0.9);
        assert!(response.valid);
        assert_eq!(response.attributes.total_score, 1.0);
        assert_eq!(response.attributes.score_threshold, 0.9);
        assert_eq!(response.metadata.dlp_id, 1234);

        let response = ProofResponse::new(1234, scores(0.5, 0.5, 0.5, 0.5), 0.9);
        assert!(!response.valid);
        assert_eq!(response.score, 0.5);
    }
}
