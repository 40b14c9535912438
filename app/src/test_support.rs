// ==============================================================================
// test_support.rs - Shared Test Fixtures
// ==============================================================================
// Description: Genome file fixtures and an in-memory collaborator double
// Author: Matt Barham
// Created: 2026-10-16
// Modified: 2026-10-16
// Version: 1.0.0
// ==============================================================================

use async_trait::async_trait;
use std::path::Path;
use std::sync::Mutex;

use crate::audit::AuditRecord;
use crate::collaborators::Collaborators;
use crate::error::{ProofError, ProofResult};
use crate::models::VerificationCounts;
use crate::parsers::Genome23Record;

pub const PROFILE_ID: &str = "alda223kl32siadkn";

/// Header exactly as 23andMe emits it (trailing spaces included)
pub fn header_lines() -> Vec<String> {
    [
        "# This data file generated by 23andMe at: Wed Sep 11 21:58:51 2024",
        "#",
        "# This file contains raw genotype data, including data that is not used in 23andMe reports.",
        "# This data has undergone a general quality review however only a subset of markers have been ",
        "# individually validated for accuracy. As such, this data is suitable only for research, ",
        "# educational, and informational use and not for medical or other use.",
        "#",
        "# Below is a text version of your data.  Fields are TAB-separated",
        "# Each line corresponds to a single SNP.  For each SNP, we provide its identifier ",
        "# (an rsid or an internal id), its location on the reference human genome, and the ",
        "# genotype call oriented with respect to the plus strand on the human reference sequence.",
        "# We are using reference human assembly build 37 (also known as Annotation Release 104).",
        "# Note that it is possible that data downloaded at different times may be different due to ongoing ",
        "# improvements in our ability to call genotypes. More information about these changes can be found at:",
        "# https://you.23andme.com/p/alda223kl32siadkn/tools/data/download/",
        "#",
        "# More information on reference human assembly builds:",
        "# https://www.ncbi.nlm.nih.gov/assembly/GCF_000001405.13/",
        "#",
        "# rsid\tchromosome\tposition\tgenotype",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

pub fn record_lines() -> Vec<String> {
    [
        "rs137900170\t1\t1392325\tGG",
        "rs138988486\t1\t1394069\tCC",
        "rs182336567\t1\t1404796\t--",
        "i713057\t1\t1425512\tTT",
        "rs145313947\t1\t1425753\tTT",
        "rs6669795\tX\t1450947\tAA",
        "i4000755\tMT\t1465382\tDI",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

/// Complete, well-formed genome file
pub fn genome_lines() -> Vec<String> {
    let mut lines = header_lines();
    lines.extend(record_lines());
    lines
}

pub fn genome_text() -> String {
    let mut text = genome_lines().join("\n");
    text.push('\n');
    text
}

pub fn good_counts() -> VerificationCounts {
    VerificationCounts {
        invalid_genotypes: 0,
        indels: 5,
        internal_id_rsids: 2,
        database_verified: 93,
        total: 100,
    }
}

/// Scripted collaborator replies; `None` simulates an unreachable service
pub struct MockCollaborators {
    pub approved: Option<bool>,
    pub unique: Option<bool>,
    pub counts: Option<VerificationCounts>,
    pub persisted: Option<bool>,
    pub calls: Mutex<Vec<String>>,
    pub saved: Mutex<Option<AuditRecord>>,
}

impl MockCollaborators {
    pub fn accepting() -> Self {
        Self {
            approved: Some(true),
            unique: Some(true),
            counts: Some(good_counts()),
            persisted: Some(true),
            calls: Mutex::new(Vec::new()),
            saved: Mutex::new(None),
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn saved(&self) -> Option<AuditRecord> {
        self.saved.lock().unwrap().clone()
    }

    fn record_call(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl Collaborators for MockCollaborators {
    async fn verify_profile(&self, sender_address: &str, profile_id: &str) -> ProofResult<bool> {
        self.record_call(format!("verify_profile:{}:{}", sender_address, profile_id));
        self.approved
            .ok_or_else(|| ProofError::collaborator("profile verification", "unreachable"))
    }

    async fn check_hash_unique(&self, genome_hash: &str) -> ProofResult<bool> {
        self.record_call(format!("check_hash_unique:{}", genome_hash));
        self.unique
            .ok_or_else(|| ProofError::collaborator("hash registry", "unreachable"))
    }

    async fn lookup_verification_counts(
        &self,
        _path: &Path,
        records: &[Genome23Record],
    ) -> ProofResult<VerificationCounts> {
        self.record_call(format!("lookup_verification_counts:{}", records.len()));
        self.counts
            .clone()
            .ok_or_else(|| ProofError::collaborator("reference lookup", "unreachable"))
    }

    async fn persist_record(&self, record: &AuditRecord) -> ProofResult<bool> {
        self.record_call("persist_record".to_string());
        *self.saved.lock().unwrap() = Some(record.clone());
        self.persisted
            .ok_or_else(|| ProofError::collaborator("hash registry", "unreachable"))
    }
}
