// ==============================================================================
// audit.rs - Proof Audit Record and Audit Trail
// ==============================================================================
// Description: Persisted proof record plus structured lifecycle audit events
// Author: Matt Barham
// Created: 2025-10-31
// Modified: 2026-10-16
// Version: 2.0.0
// ==============================================================================

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{error, info};
use uuid::Uuid;

use crate::models::ProofResponse;

/// Proof record saved to the hash registry, one per run
///
/// Field names are the registry's wire format. `attestor_address`,
/// `tee_url`, `job_id` and `file_id` are sent empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditRecord {
    pub sender_address: String,
    pub attestor_address: String,
    pub tee_url: String,
    pub job_id: String,
    pub file_id: String,
    pub profile_id: Option<String>,
    pub genome_hash: String,
    pub authenticity_score: f64,
    pub ownership_score: f64,
    pub uniqueness_score: f64,
    pub quality_score: f64,
    pub total_score: f64,
    pub score_threshold: f64,
    pub is_valid: bool,
}

impl AuditRecord {
    pub fn new(
        sender_address: &str,
        profile_id: Option<&str>,
        genome_hash: &str,
        proof: &ProofResponse,
    ) -> Self {
        Self {
            sender_address: sender_address.to_string(),
            attestor_address: String::new(),
            tee_url: String::new(),
            job_id: String::new(),
            file_id: String::new(),
            profile_id: profile_id.map(str::to_string),
            genome_hash: genome_hash.to_string(),
            authenticity_score: proof.authenticity,
            ownership_score: proof.ownership,
            uniqueness_score: proof.uniqueness,
            quality_score: proof.quality,
            total_score: proof.attributes.total_score,
            score_threshold: proof.attributes.score_threshold,
            is_valid: proof.valid,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum AuditEventType {
    FileSelected,
    ProofStarted,
    ProofScored,
    HashPersisted,
    ProofCompleted,
    ProofFailed,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum LogSeverity {
    Info,
    Error,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AuditEvent {
    pub id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub event_type: AuditEventType,
    pub resource: Option<String>,
    pub details: serde_json::Value,
    pub severity: LogSeverity,
}

impl AuditEvent {
    pub fn new(
        event_type: AuditEventType,
        resource: Option<String>,
        details: serde_json::Value,
    ) -> Self {
        let severity = match event_type {
            AuditEventType::ProofFailed => LogSeverity::Error,
            _ => LogSeverity::Info,
        };

        Self {
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            event_type,
            resource,
            details,
            severity,
        }
    }

    /// Emit the event on the `audit` tracing target
    pub fn log(&self) {
        let payload = serde_json::to_string(self).unwrap_or_else(|_| self.details.to_string());

        match self.severity {
            LogSeverity::Info => info!(target: "audit", "{}", payload),
            LogSeverity::Error => error!(target: "audit", "{}", payload),
        }
    }
}

/// Convenience function to log an audit event
pub fn log_event(event_type: AuditEventType, resource: Option<String>, details: serde_json::Value) {
    AuditEvent::new(event_type, resource, details).log();
}
