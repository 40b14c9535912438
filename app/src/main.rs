// ==============================================================================
// main.rs - Genome Proof Entry Point
// ==============================================================================
// Description: Scores one uploaded 23andMe file and writes results.json
// Author: Matt Barham
// Created: 2025-10-31
// Modified: 2026-10-16
// Version: 2.0.0
// ==============================================================================

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use genome_proof::config::{DEFAULT_REQUEST_TIMEOUT_SECS, DEFAULT_SCORE_THRESHOLD};
use genome_proof::{HttpCollaborators, ProofConfig, ProofGenerator};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Directory containing the uploaded genome file
    #[arg(long, env = "INPUT_DIR", default_value = "/input")]
    input_dir: PathBuf,

    /// Directory receiving results.json
    #[arg(long, env = "OUTPUT_DIR", default_value = "/output")]
    output_dir: PathBuf,

    /// Data liquidity pool id
    #[arg(long, env = "DLP_ID")]
    dlp_id: u64,

    /// Profile verification URL (ends with address=<sender>)
    #[arg(long, env = "VERIFY_ENDPOINT")]
    verify_endpoint: String,

    /// Hash registry URL
    #[arg(long, env = "REGISTRY_ENDPOINT")]
    registry_endpoint: String,

    /// Reference SNP lookup URL
    #[arg(long, env = "REFERENCE_ENDPOINT")]
    reference_endpoint: String,

    /// Bearer token for the reference lookup service
    #[arg(long, env = "REFERENCE_TOKEN")]
    reference_token: Option<String>,

    /// Minimum total score for a valid proof
    #[arg(long, env = "SCORE_THRESHOLD", default_value_t = DEFAULT_SCORE_THRESHOLD)]
    score_threshold: f64,

    /// Per-request timeout for remote services (seconds)
    #[arg(long, env = "REQUEST_TIMEOUT_SECS", default_value_t = DEFAULT_REQUEST_TIMEOUT_SECS)]
    request_timeout_secs: u64,

    /// Emit logs as JSON
    #[arg(long, env = "LOG_JSON")]
    log_json: bool,
}

impl From<Args> for ProofConfig {
    fn from(args: Args) -> Self {
        ProofConfig {
            input_dir: args.input_dir,
            output_dir: args.output_dir,
            dlp_id: args.dlp_id,
            verify_endpoint: args.verify_endpoint,
            registry_endpoint: args.registry_endpoint,
            reference_endpoint: args.reference_endpoint,
            reference_token: args.reference_token,
            score_threshold: args.score_threshold,
            request_timeout_secs: args.request_timeout_secs,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables before clap reads them
    dotenvy::dotenv().ok();

    let args = Args::parse();

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "genome_proof=info,audit=info".into());
    let json_layer = args.log_json.then(|| tracing_subscriber::fmt::layer().json());
    let text_layer = (!args.log_json).then(|| tracing_subscriber::fmt::layer());
    tracing_subscriber::registry()
        .with(filter)
        .with(json_layer)
        .with(text_layer)
        .init();

    info!("Genome Proof starting...");

    let config = ProofConfig::from(args);
    let output_dir = config.output_dir.clone();

    let collaborators =
        HttpCollaborators::new(&config).context("Failed to create HTTP client")?;
    let mut generator = ProofGenerator::new(config, collaborators);

    let outcome = match generator.generate().await {
        Ok(outcome) => outcome,
        Err(e) => {
            error!(remote = e.is_remote(), "Proof generation failed: {}", e);
            return Err(e).context("Proof generation failed");
        }
    };

    std::fs::create_dir_all(&output_dir)
        .with_context(|| format!("Failed to create output directory {:?}", output_dir))?;
    let output_path = output_dir.join("results.json");
    let json = serde_json::to_string_pretty(&outcome.response)?;
    std::fs::write(&output_path, json)
        .with_context(|| format!("Failed to write {:?}", output_path))?;

    info!(
        "Proof complete: score={:.4}, valid={}, written to {:?}",
        outcome.response.score, outcome.response.valid, output_path
    );

    Ok(())
}
