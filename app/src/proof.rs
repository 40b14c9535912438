// ==============================================================================
// proof.rs - Proof-of-Contribution Orchestration
// ==============================================================================
// Description: Selects the genome file, runs the four evaluators, persists
//              the audit record and returns the proof
// Author: Matt Barham
// Created: 2025-10-31
// Modified: 2026-10-16
// Version: 3.0.0
// ==============================================================================

use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::audit::{self, AuditEventType, AuditRecord};
use crate::collaborators::Collaborators;
use crate::config::ProofConfig;
use crate::error::{ProofError, ProofResult};
use crate::evaluators::GenomeScorer;
use crate::models::{ProofResponse, ScoreVector};
use crate::parsers::Genome23Parser;

/// Lifecycle of a single proof run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProofStage {
    Idle,
    FileSelected,
    Scored,
    Persisted,
    Done,
    Failed,
}

/// Everything a successful run produces
#[derive(Debug, Clone)]
pub struct ProofOutcome {
    pub response: ProofResponse,
    pub record: AuditRecord,
}

pub struct ProofGenerator<C: Collaborators> {
    config: ProofConfig,
    collaborators: C,
    stage: ProofStage,
}

impl<C: Collaborators> ProofGenerator<C> {
    pub fn new(config: ProofConfig, collaborators: C) -> Self {
        Self {
            config,
            collaborators,
            stage: ProofStage::Idle,
        }
    }

    pub fn stage(&self) -> ProofStage {
        self.stage
    }

    /// Main proof pipeline over the configured input directory
    pub async fn generate(&mut self) -> ProofResult<ProofOutcome> {
        let input_file = locate_input_file(&self.config.input_dir)?;
        self.generate_for_file(&input_file).await
    }

    /// Run the pipeline for one genome file
    pub async fn generate_for_file(&mut self, path: &Path) -> ProofResult<ProofOutcome> {
        self.stage = ProofStage::FileSelected;
        audit::log_event(
            AuditEventType::FileSelected,
            Some(path.display().to_string()),
            serde_json::json!({ "dlp_id": self.config.dlp_id }),
        );

        match self.run(path).await {
            Ok(outcome) => {
                self.stage = ProofStage::Done;
                audit::log_event(
                    AuditEventType::ProofCompleted,
                    Some(path.display().to_string()),
                    serde_json::json!({
                        "total_score": outcome.response.score,
                        "valid": outcome.response.valid,
                    }),
                );
                Ok(outcome)
            }
            Err(e) => {
                warn!("Proof generation failed at {:?}: {}", self.stage, e);
                self.stage = ProofStage::Failed;
                audit::log_event(
                    AuditEventType::ProofFailed,
                    Some(path.display().to_string()),
                    serde_json::json!({ "error": e.to_string() }),
                );
                Err(e)
            }
        }
    }

    async fn run(&mut self, path: &Path) -> ProofResult<ProofOutcome> {
        info!("Starting proof generation for {:?}", path);
        audit::log_event(
            AuditEventType::ProofStarted,
            Some(path.display().to_string()),
            serde_json::json!({ "sender_address": self.config.sender_address() }),
        );

        // 1. Load file and build scoring context
        let lines = Genome23Parser::new().read_lines(path)?;
        let sender_address = self.config.sender_address().to_string();
        let scorer = GenomeScorer::new(&self.collaborators, path.to_path_buf(), lines, sender_address);

        // 2. Sub-scores, fixed order
        let uniqueness = scorer.proof_of_uniqueness().await?;
        let ownership = scorer.proof_of_ownership().await?;
        let authenticity = scorer.proof_of_authenticity();
        let quality = scorer.proof_of_quality().await?;

        let scores = ScoreVector {
            authenticity,
            ownership,
            uniqueness,
            quality,
        };

        // 3. Composite score and validity
        let response = ProofResponse::new(self.config.dlp_id, scores, self.config.score_threshold);
        self.stage = ProofStage::Scored;
        info!(
            "Scores: uniqueness={}, ownership={}, authenticity={}, quality={:.4}, total={:.4}, valid={}",
            uniqueness, ownership, authenticity, quality, response.score, response.valid
        );
        audit::log_event(
            AuditEventType::ProofScored,
            Some(path.display().to_string()),
            serde_json::to_value(scores).unwrap_or_default(),
        );

        // 4. Persist the audit record
        let record = AuditRecord::new(
            scorer.sender_address(),
            scorer.profile_id(),
            scorer.genome_hash(),
            &response,
        );

        if !self.collaborators.persist_record(&record).await? {
            return Err(ProofError::PersistenceFailed);
        }
        self.stage = ProofStage::Persisted;
        info!("Hash data saved successfully");
        audit::log_event(
            AuditEventType::HashPersisted,
            None,
            serde_json::json!({ "genome_hash": record.genome_hash }),
        );

        Ok(ProofOutcome { response, record })
    }
}

/// First `.txt` file in the directory, by file name
pub fn locate_input_file(dir: &Path) -> ProofResult<PathBuf> {
    debug!("Locating input file in {:?}", dir);

    let mut candidates = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "txt") {
            candidates.push(path);
        }
    }
    candidates.sort();

    candidates
        .into_iter()
        .next()
        .ok_or_else(|| ProofError::NoInputFile {
            dir: dir.to_path_buf(),
        })
}
