// ==============================================================================
// collaborators.rs - Remote Verification Services
// ==============================================================================
// Description: Injected interface to the profile, registry and dbSNP services
// Author: Matt Barham
// Created: 2026-10-16
// Modified: 2026-10-16
// Version: 1.0.0
// ==============================================================================
// Every call is a single request with no retry. A transport failure, a
// non-success status or a body missing the expected field is a
// ProofError::Collaborator, never a silent `false`.
// ==============================================================================

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info};

use crate::audit::AuditRecord;
use crate::config::ProofConfig;
use crate::error::{ProofError, ProofResult};
use crate::models::VerificationCounts;
use crate::parsers::Genome23Record;

const PROFILE_SERVICE: &str = "profile verification";
const REGISTRY_SERVICE: &str = "hash registry";
const REFERENCE_SERVICE: &str = "reference lookup";

/// External services a proof run depends on
#[async_trait]
pub trait Collaborators: Send + Sync {
    /// Whether the profile belongs to the sender
    async fn verify_profile(&self, sender_address: &str, profile_id: &str) -> ProofResult<bool>;

    /// Whether the genome hash has not been registered before
    async fn check_hash_unique(&self, genome_hash: &str) -> ProofResult<bool>;

    /// Aggregate dbSNP verification counts for the file's records
    async fn lookup_verification_counts(
        &self,
        path: &Path,
        records: &[Genome23Record],
    ) -> ProofResult<VerificationCounts>;

    /// Save the proof record; `Ok(false)` means the registry refused it
    async fn persist_record(&self, record: &AuditRecord) -> ProofResult<bool>;
}

#[derive(Debug, Deserialize)]
struct ProfileVerification {
    is_approved: bool,
}

#[derive(Debug, Deserialize)]
struct HashVerification {
    is_unique: bool,
}

#[derive(Debug, Deserialize)]
struct SaveResponse {
    success: bool,
}

#[derive(Debug, Serialize)]
struct ReferenceLookupRequest<'a> {
    file_name: String,
    records: &'a [Genome23Record],
}

/// HTTP/JSON implementation of [`Collaborators`]
pub struct HttpCollaborators {
    http_client: Client,
    verify_endpoint: String,
    registry_endpoint: String,
    reference_endpoint: String,
    reference_token: Option<String>,
}

impl HttpCollaborators {
    pub fn new(config: &ProofConfig) -> ProofResult<Self> {
        let http_client = Client::builder()
            .timeout(config.request_timeout())
            .build()
            .map_err(|e| ProofError::collaborator("http client", e.to_string()))?;

        Ok(Self {
            http_client,
            verify_endpoint: config.verify_endpoint.clone(),
            registry_endpoint: config.registry_endpoint.clone(),
            reference_endpoint: config.reference_endpoint.clone(),
            reference_token: config.reference_token.clone(),
        })
    }

    async fn send_json<T: DeserializeOwned>(
        &self,
        service: &'static str,
        request: RequestBuilder,
    ) -> ProofResult<T> {
        let response = request
            .send()
            .await
            .map_err(|e| ProofError::collaborator(service, e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProofError::collaborator(
                service,
                format!("unexpected status {}", status.as_u16()),
            ));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| ProofError::collaborator(service, format!("malformed response: {}", e)))
    }
}

#[async_trait]
impl Collaborators for HttpCollaborators {
    /// `verify_endpoint` already carries `address=<sender>`, so only the
    /// profile id is added to the query.
    async fn verify_profile(&self, sender_address: &str, profile_id: &str) -> ProofResult<bool> {
        debug!("Verifying profile {} for sender {}", profile_id, sender_address);

        let request = self
            .http_client
            .get(&self.verify_endpoint)
            .query(&[("profile_id", profile_id)]);

        let reply: ProfileVerification = self.send_json(PROFILE_SERVICE, request).await?;
        Ok(reply.is_approved)
    }

    async fn check_hash_unique(&self, genome_hash: &str) -> ProofResult<bool> {
        let request = self
            .http_client
            .get(&self.registry_endpoint)
            .query(&[("genome_hash", genome_hash)]);

        let reply: HashVerification = self.send_json(REGISTRY_SERVICE, request).await?;
        Ok(reply.is_unique)
    }

    async fn lookup_verification_counts(
        &self,
        path: &Path,
        records: &[Genome23Record],
    ) -> ProofResult<VerificationCounts> {
        let body = ReferenceLookupRequest {
            file_name: path
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_default(),
            records,
        };

        info!("Requesting dbSNP verification for {} records", records.len());

        let mut request = self.http_client.post(&self.reference_endpoint).json(&body);
        if let Some(token) = &self.reference_token {
            request = request.bearer_auth(token);
        }

        self.send_json(REFERENCE_SERVICE, request).await
    }

    async fn persist_record(&self, record: &AuditRecord) -> ProofResult<bool> {
        let request = self.http_client.post(&self.registry_endpoint).form(record);

        let reply: SaveResponse = self.send_json(REGISTRY_SERVICE, request).await?;
        Ok(reply.success)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::{TcpListener, TcpStream};

    fn config() -> ProofConfig {
        ProofConfig {
            input_dir: PathBuf::from("/input"),
            output_dir: PathBuf::from("/output"),
            dlp_id: 1234,
            verify_endpoint: "http://127.0.0.1:9/verify?address=abc".to_string(),
            registry_endpoint: "http://127.0.0.1:9/key?token=k".to_string(),
            reference_endpoint: "http://127.0.0.1:9/dbsnp".to_string(),
            reference_token: Some("test-token".to_string()),
            score_threshold: 0.9,
            request_timeout_secs: 2,
        }
    }

    fn config_for(base: &str) -> ProofConfig {
        ProofConfig {
            verify_endpoint: format!("{}/verify?address=abc", base),
            registry_endpoint: format!("{}/key?token=k", base),
            reference_endpoint: format!("{}/dbsnp", base),
            ..config()
        }
    }

    fn record() -> AuditRecord {
        AuditRecord {
            sender_address: "abc".to_string(),
            attestor_address: String::new(),
            tee_url: String::new(),
            job_id: String::new(),
            file_id: String::new(),
            profile_id: None,
            genome_hash: "hash".to_string(),
            authenticity_score: 1.0,
            ownership_score: 0.0,
            uniqueness_score: 1.0,
            quality_score: 0.5,
            total_score: 0.625,
            score_threshold: 0.9,
            is_valid: false,
        }
    }

    /// Consume one HTTP request: headers, then `Content-Length` bytes of body
    async fn read_request(socket: &mut TcpStream) {
        let mut data = Vec::new();
        let mut chunk = [0u8; 1024];
        loop {
            let n = socket.read(&mut chunk).await.unwrap();
            if n == 0 {
                return;
            }
            data.extend_from_slice(&chunk[..n]);

            if let Some(end) = data.windows(4).position(|w| w == b"\r\n\r\n") {
                let head = String::from_utf8_lossy(&data[..end]).to_lowercase();
                let body_len = head
                    .lines()
                    .find_map(|l| l.strip_prefix("content-length:"))
                    .and_then(|v| v.trim().parse::<usize>().ok())
                    .unwrap_or(0);
                if data.len() >= end + 4 + body_len {
                    return;
                }
            }
        }
    }

    /// Local server answering every request with the same canned reply
    async fn serve(status: &'static str, body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            loop {
                let (mut socket, _) = listener.accept().await.unwrap();
                read_request(&mut socket).await;
                let reply = format!(
                    "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                    status,
                    body.len(),
                    body
                );
                socket.write_all(reply.as_bytes()).await.unwrap();
                let _ = socket.shutdown().await;
            }
        });

        format!("http://{}", addr)
    }

    fn assert_collaborator_error(result: ProofResult<bool>, expected_service: &str, needle: &str) {
        match result {
            Err(ProofError::Collaborator { service, message }) => {
                assert_eq!(service, expected_service);
                assert!(message.contains(needle), "unexpected message: {}", message);
            }
            other => panic!("Expected Collaborator error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_error_status_is_an_error() {
        let base = serve("500 Internal Server Error", r#"{"success": true}"#).await;
        let collaborators = HttpCollaborators::new(&config_for(&base)).unwrap();

        let status = "unexpected status 500";
        assert_collaborator_error(collaborators.verify_profile("abc", "p1").await, PROFILE_SERVICE, status);
        assert_collaborator_error(collaborators.check_hash_unique("hash").await, REGISTRY_SERVICE, status);
        assert_collaborator_error(collaborators.persist_record(&record()).await, REGISTRY_SERVICE, status);
    }

    #[tokio::test]
    async fn test_reply_missing_field_is_an_error() {
        let base = serve("200 OK", "{}").await;
        let collaborators = HttpCollaborators::new(&config_for(&base)).unwrap();

        let malformed = "malformed response";
        assert_collaborator_error(collaborators.verify_profile("abc", "p1").await, PROFILE_SERVICE, malformed);
        assert_collaborator_error(collaborators.check_hash_unique("hash").await, REGISTRY_SERVICE, malformed);
        assert_collaborator_error(collaborators.persist_record(&record()).await, REGISTRY_SERVICE, malformed);
    }

    #[tokio::test]
    async fn test_non_json_reply_is_an_error() {
        let base = serve("200 OK", "<html>maintenance</html>").await;
        let collaborators = HttpCollaborators::new(&config_for(&base)).unwrap();

        let malformed = "malformed response";
        assert_collaborator_error(collaborators.verify_profile("abc", "p1").await, PROFILE_SERVICE, malformed);
        assert_collaborator_error(collaborators.check_hash_unique("hash").await, REGISTRY_SERVICE, malformed);
        assert_collaborator_error(collaborators.persist_record(&record()).await, REGISTRY_SERVICE, malformed);

        let counts = collaborators
            .lookup_verification_counts(Path::new("/input/genome.txt"), &[])
            .await;
        assert!(matches!(counts, Err(ProofError::Collaborator { service: REFERENCE_SERVICE, .. })));
    }

    #[tokio::test]
    async fn test_well_formed_replies_are_read() {
        let base = serve("200 OK", r#"{"is_approved": true, "is_unique": false, "success": true}"#).await;
        let collaborators = HttpCollaborators::new(&config_for(&base)).unwrap();

        assert!(collaborators.verify_profile("abc", "p1").await.unwrap());
        assert!(!collaborators.check_hash_unique("hash").await.unwrap());
        assert!(collaborators.persist_record(&record()).await.unwrap());
    }

    #[test]
    fn test_reply_requires_field() {
        assert!(serde_json::from_str::<ProfileVerification>(r#"{"is_approved": true}"#).unwrap().is_approved);
        assert!(serde_json::from_str::<ProfileVerification>(r#"{}"#).is_err());
        assert!(serde_json::from_str::<HashVerification>(r#"{"is_unique": "yes"}"#).is_err());
        assert!(!serde_json::from_str::<SaveResponse>(r#"{"success": false}"#).unwrap().success);
    }

    #[tokio::test]
    async fn test_unreachable_service_is_an_error() {
        let collaborators = HttpCollaborators::new(&config()).unwrap();

        let err = collaborators.check_hash_unique("abc").await.unwrap_err();
        match err {
            ProofError::Collaborator { service, .. } => assert_eq!(service, REGISTRY_SERVICE),
            other => panic!("Expected Collaborator error, got {:?}", other),
        }
    }
}
