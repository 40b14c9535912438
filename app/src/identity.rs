// ==============================================================================
// identity.rs - Profile Identity Extraction
// ==============================================================================
// Description: Pulls the 23andMe profile id out of the header download URL
// Author: Matt Barham
// Created: 2026-10-16
// Modified: 2026-10-16
// Version: 1.0.0
// ==============================================================================

const PROFILE_URL_PREFIX: &str = "https://you.23andme.com/p/";
const PROFILE_URL_SUFFIX: &str = "/tools/data/download/";

/// Only the first lines of a file can carry the header URL
const HEADER_SCAN_LINES: usize = 50;

/// Extract the profile id embedded in the header's download link
///
/// Scans the first 50 lines for `https://you.23andme.com/p/<id>/tools/data/download/`.
/// Returns `None` when either anchor is missing or the id is empty.
pub fn extract_profile_id<S: AsRef<str>>(lines: &[S]) -> Option<String> {
    let content = lines
        .iter()
        .take(HEADER_SCAN_LINES)
        .map(|l| l.as_ref())
        .collect::<Vec<_>>()
        .join("\n");

    let start = content.find(PROFILE_URL_PREFIX)? + PROFILE_URL_PREFIX.len();
    let end = start + content[start..].find(PROFILE_URL_SUFFIX)?;

    let profile_id = &content[start..end];
    if profile_id.is_empty() {
        None
    } else {
        Some(profile_id.to_string())
    }
}
