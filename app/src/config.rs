// ==============================================================================
// config.rs - Proof Run Configuration
// ==============================================================================
// Description: Endpoints, identifiers and thresholds for one proof run
// Author: Matt Barham
// Created: 2026-10-16
// Modified: 2026-10-16
// Version: 1.0.0
// ==============================================================================

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_SCORE_THRESHOLD: f64 = 0.90;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProofConfig {
    /// Directory holding the uploaded genome file
    pub input_dir: PathBuf,

    /// Directory receiving results.json
    pub output_dir: PathBuf,

    /// Data liquidity pool the proof is issued for
    pub dlp_id: u64,

    /// Profile verification URL, query string ends with `address=<sender>`
    pub verify_endpoint: String,

    /// Hash registry URL, used for uniqueness checks and record persistence
    pub registry_endpoint: String,

    /// Reference SNP lookup URL
    pub reference_endpoint: String,

    /// Bearer token for the reference lookup service
    #[serde(default)]
    pub reference_token: Option<String>,

    #[serde(default = "default_score_threshold")]
    pub score_threshold: f64,

    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_score_threshold() -> f64 {
    DEFAULT_SCORE_THRESHOLD
}

fn default_request_timeout_secs() -> u64 {
    DEFAULT_REQUEST_TIMEOUT_SECS
}

impl ProofConfig {
    /// Sender address carried in the verify endpoint's `address=` parameter
    ///
    /// Falls back to the whole endpoint string when no `address=` is present.
    pub fn sender_address(&self) -> &str {
        self.verify_endpoint
            .rsplit("address=")
            .next()
            .unwrap_or(&self.verify_endpoint)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
