// ==============================================================================
// lib.rs - Genome Proof Library
// ==============================================================================
// Description: Proof-of-contribution scoring for 23andMe raw genome files
// Author: Matt Barham
// Created: 2025-11-03
// Modified: 2026-10-16
// Version: 2.0.0
// ==============================================================================

pub mod parsers;
pub mod audit;
pub mod validator;
pub mod identity;
pub mod curves;
pub mod hasher;
pub mod models;
pub mod config;
pub mod error;
pub mod collaborators;
pub mod evaluators;
pub mod proof;

#[cfg(test)]
mod test_support;

pub use collaborators::{Collaborators, HttpCollaborators};
pub use config::ProofConfig;
pub use error::{ProofError, ProofResult};
pub use proof::{ProofGenerator, ProofOutcome, ProofStage};
