//! Request fingerprinting for content-addressed caching
//!
//! Same normalized request = same fingerprint. Each field is length-prefixed
//! before hashing so values containing the separator cannot collide.

use crate::error::{WagecastError, WagecastResult};
use crate::predict::PredictionRequest;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;

/// Length of a fingerprint in hex characters
pub const FINGERPRINT_LEN: usize = 64;

/// SHA256 fingerprint of a normalized prediction request
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Fingerprint(String);

impl Fingerprint {
    /// Parse a fingerprint given on the command line
    pub fn parse(value: &str) -> WagecastResult<Self> {
        let value = value.trim().to_ascii_lowercase();
        if value.len() != FINGERPRINT_LEN || !value.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(WagecastError::User(format!(
                "Invalid fingerprint '{}': expected {} hex characters",
                value, FINGERPRINT_LEN
            )));
        }
        Ok(Self(value))
    }

    /// Wrap a value read back from the store
    pub(crate) fn from_stored(value: String) -> Self {
        Self(value)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// First 12 characters, for display
    pub fn short(&self) -> &str {
        self.0.get(..12).unwrap_or(&self.0)
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Fingerprint a prediction request
pub fn fingerprint(request: &PredictionRequest) -> Fingerprint {
    let mut hasher = Sha256::new();
    for (_, value) in request.canonical_fields() {
        hasher.update(value.len().to_string().as_bytes());
        hasher.update(b":");
        hasher.update(value.as_bytes());
        hasher.update(b";");
    }
    Fingerprint(hex::encode(hasher.finalize()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::predict::request::sample_request;
    use crate::predict::PredictionRequestBuilder;

    fn sample_builder() -> PredictionRequestBuilder {
        PredictionRequest::builder()
            .job_title("Software Engineer")
            .employment_type("Full-time")
            .industry("IT")
            .company_size("Large")
            .years_experience(3.0)
            .remote("Yes")
            .location("Bangalore")
            .education_level("Bachelor's")
    }

    #[test]
    fn fingerprint_deterministic() {
        let first = fingerprint(&sample_request());
        let second = fingerprint(&sample_request());

        assert_eq!(first, second);
        assert_eq!(first.as_str().len(), FINGERPRINT_LEN);
        assert!(first.as_str().chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn fingerprint_sensitive_to_each_field() {
        let base = fingerprint(&sample_request());
        let variants = [
            sample_builder().job_title("Data Scientist"),
            sample_builder().employment_type("Part-time"),
            sample_builder().industry("Healthcare"),
            sample_builder().company_size("Small"),
            sample_builder().years_experience(3.5),
            sample_builder().remote("No"),
            sample_builder().location("Chennai"),
            sample_builder().education_level("Master's"),
        ];

        for variant in variants {
            let request = variant.build().unwrap();
            assert_ne!(fingerprint(&request), base, "{:?}", request);
        }
    }

    #[test]
    fn fingerprint_normalizes_years_and_whitespace() {
        let base = fingerprint(&sample_request());

        let padded = sample_builder()
            .job_title("  Software Engineer  ")
            .years_experience(3.04)
            .build()
            .unwrap();
        assert_eq!(fingerprint(&padded), base);
    }

    #[test]
    fn fingerprint_no_separator_collision() {
        let left = sample_builder()
            .job_title("Engineer;3:x")
            .industry("IT")
            .build()
            .unwrap();
        let right = sample_builder()
            .job_title("Engineer")
            .industry("3:x;IT")
            .build()
            .unwrap();

        assert_ne!(fingerprint(&left), fingerprint(&right));
    }

    #[test]
    fn parse_accepts_only_full_hex() {
        let fp = fingerprint(&sample_request());
        assert_eq!(Fingerprint::parse(&fp.as_str().to_uppercase()).unwrap(), fp);
        assert!(Fingerprint::parse("abc123").is_err());
        assert!(Fingerprint::parse(&"z".repeat(FINGERPRINT_LEN)).is_err());
        assert_eq!(fp.short().len(), 12);
    }
}
