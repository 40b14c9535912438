// ==============================================================================
// parsers/mod.rs - File parser modules
// ==============================================================================
// Description: Loaders for genetic data file formats
// Author: Matt Barham
// Created: 2025-11-03
// Modified: 2026-10-16
// Version: 2.0.0
// ==============================================================================

pub mod genome23andme;

pub use genome23andme::{Genome23ParseError, Genome23Parser, Genome23Record, ParsedGenome};
