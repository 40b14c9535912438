// ==============================================================================
// curves.rs - Quality Scoring Curves
// ==============================================================================
// Description: Piecewise scoring functions mapping verification counts to [0,1]
// Author: Matt Barham
// Created: 2026-10-16
// Modified: 2026-10-16
// Version: 1.0.0
// ==============================================================================

use serde::{Deserialize, Serialize};

use crate::error::{ProofError, ProofResult};

/// Breakpoints for the invalid-genotype curve (linear fall-off)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InvalidGenotypeCurve {
    pub low: u64,
    pub high: u64,
}

impl Default for InvalidGenotypeCurve {
    fn default() -> Self {
        Self { low: 1, high: 3 }
    }
}

/// Breakpoints for the indel trapezoid
///
/// Too few indels suggests truncated data, too many suggests noise.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IndelCurve {
    pub ultra_low: u64,
    pub low: u64,
    pub high: u64,
    pub ultra_high: u64,
}

impl Default for IndelCurve {
    fn default() -> Self {
        Self {
            ultra_low: 1,
            low: 3,
            high: 13,
            ultra_high: 22,
        }
    }
}

/// Breakpoints for the internal-id step function
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InternalIdCurve {
    pub low: u64,
    pub high: u64,
}

impl Default for InternalIdCurve {
    fn default() -> Self {
        Self { low: 5, high: 25 }
    }
}

/// Breakpoints on the dbSNP-verified ratio
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PercentVerifiedCurve {
    pub ultra_low: f64,
    pub low: f64,
    pub high: f64,
    pub ultra_high: f64,
}

impl Default for PercentVerifiedCurve {
    fn default() -> Self {
        Self {
            ultra_low: 0.85,
            low: 0.90,
            high: 0.96,
            ultra_high: 0.98,
        }
    }
}

/// All four quality curves, defaulting to the production breakpoints
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct QualityCurves {
    pub invalid_genotypes: InvalidGenotypeCurve,
    pub indels: IndelCurve,
    pub internal_ids: InternalIdCurve,
    pub percent_verified: PercentVerifiedCurve,
}

/// 1.0 up to `low`, 0.0 from `high`, linear in between
pub fn invalid_genotype_score(count: u64, curve: &InvalidGenotypeCurve) -> f64 {
    if count <= curve.low {
        1.0
    } else if count >= curve.high {
        0.0
    } else {
        1.0 - (count - curve.low) as f64 / (curve.high - curve.low) as f64
    }
}

/// Trapezoid: ramp up over (ultra_low, low], plateau over (low, high],
/// ramp down over (high, ultra_high], zero elsewhere
pub fn indel_score(count: u64, curve: &IndelCurve) -> f64 {
    if count <= curve.ultra_low {
        0.0
    } else if count <= curve.low {
        (count - curve.ultra_low) as f64 / (curve.low - curve.ultra_low) as f64
    } else if count <= curve.high {
        1.0
    } else if count <= curve.ultra_high {
        (curve.ultra_high - count) as f64 / (curve.ultra_high - curve.high) as f64
    } else {
        0.0
    }
}

/// Step function: 1.0 up to `low`, 0.0 from `high`, flat 0.5 strictly between
pub fn internal_id_rsid_score(count: u64, curve: &InternalIdCurve) -> f64 {
    if count <= curve.low {
        1.0
    } else if count >= curve.high {
        0.0
    } else {
        0.5
    }
}

/// Score the fraction of records verified against dbSNP
///
/// `total == 0` has no defined ratio and is rejected.
pub fn percent_verified_score(
    verified: u64,
    total: u64,
    curve: &PercentVerifiedCurve,
) -> ProofResult<f64> {
    if total == 0 {
        return Err(ProofError::InvalidVerificationCounts(
            "total record count is zero".to_string(),
        ));
    }

    let ratio = verified as f64 / total as f64;

    let score = if curve.low <= ratio && ratio <= curve.high {
        1.0
    } else if curve.ultra_low < ratio && ratio < curve.low {
        (ratio - curve.ultra_low) / (curve.low - curve.ultra_low)
    } else if curve.high < ratio && ratio <= curve.ultra_high {
        (curve.ultra_high - ratio) / (curve.ultra_high - curve.high)
    } else {
        0.0
    };

    Ok(score)
}
