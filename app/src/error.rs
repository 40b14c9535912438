// ==============================================================================
// error.rs - Proof Generation Errors
// ==============================================================================
// Description: Run-level fatal errors for proof-of-contribution scoring
// Author: Matt Barham
// Created: 2026-10-16
// Modified: 2026-10-16
// Version: 1.0.0
// ==============================================================================
// Structural problems in the genome file are NOT errors: they lower the
// authenticity score and the run continues. Everything here aborts the run.
// ==============================================================================

use std::path::PathBuf;
use thiserror::Error;

use crate::parsers::Genome23ParseError;

/// Errors that abort a proof run
#[derive(Error, Debug)]
pub enum ProofError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Genome file error: {0}")]
    Genome(#[from] Genome23ParseError),

    #[error("No .txt genome file found in {dir:?}")]
    NoInputFile { dir: PathBuf },

    /// Remote service unreachable, non-success status, or malformed body
    #[error("{service} service error: {message}")]
    Collaborator {
        service: &'static str,
        message: String,
    },

    #[error("Invalid verification counts: {0}")]
    InvalidVerificationCounts(String),

    #[error("Hash data saving failed: registry reported success=false")]
    PersistenceFailed,
}

impl ProofError {
    pub fn collaborator(service: &'static str, message: impl Into<String>) -> Self {
        ProofError::Collaborator {
            service,
            message: message.into(),
        }
    }

    /// True for errors raised by a remote collaborator rather than locally
    pub fn is_remote(&self) -> bool {
        matches!(
            self,
            ProofError::Collaborator { .. } | ProofError::PersistenceFailed
        )
    }
}

pub type ProofResult<T> = Result<T, ProofError>;
