//! Prediction request value and its builder
//!
//! A `PredictionRequest` can only be obtained through the builder, which
//! trims every text field, rejects blanks, and keeps years of experience
//! within `0..=50`.
//! Everything downstream (fingerprint, prompt) reads the normalized form.

use crate::dataset::contribute::MAX_YEARS;
use crate::error::{WagecastError, WagecastResult};
use serde::Serialize;

/// Fully populated, normalized salary prediction request
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictionRequest {
    job_title: String,
    employment_type: String,
    industry: String,
    company_size: String,
    years_experience: f64,
    remote: String,
    location: String,
    education_level: String,
}

impl PredictionRequest {
    /// Start building a request
    pub fn builder() -> PredictionRequestBuilder {
        PredictionRequestBuilder::default()
    }

    pub fn job_title(&self) -> &str {
        &self.job_title
    }

    pub fn employment_type(&self) -> &str {
        &self.employment_type
    }

    pub fn industry(&self) -> &str {
        &self.industry
    }

    pub fn company_size(&self) -> &str {
        &self.company_size
    }

    pub fn years_experience(&self) -> f64 {
        self.years_experience
    }

    pub fn remote(&self) -> &str {
        &self.remote
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn education_level(&self) -> &str {
        &self.education_level
    }

    /// Years of experience in canonical text form: one decimal digit
    pub fn years_experience_text(&self) -> String {
        format_years(self.years_experience)
    }

    /// Normalized fields in canonical order, as (label, value) pairs
    pub fn canonical_fields(&self) -> [(&'static str, String); 8] {
        [
            ("Job Title", self.job_title.clone()),
            ("Employment Type", self.employment_type.clone()),
            ("Industry", self.industry.clone()),
            ("Company Size", self.company_size.clone()),
            ("Years of Experience", self.years_experience_text()),
            ("Remote", self.remote.clone()),
            ("Location", self.location.clone()),
            ("Education Level", self.education_level.clone()),
        ]
    }
}

/// Render years rounded half away from zero to one decimal
fn format_years(years: f64) -> String {
    let rounded = (years * 10.0).round() / 10.0 + 0.0;
    format!("{:.1}", rounded)
}

/// Builder collecting request fields from flags or prompts
#[derive(Debug, Clone, Default)]
pub struct PredictionRequestBuilder {
    pub job_title: Option<String>,
    pub employment_type: Option<String>,
    pub industry: Option<String>,
    pub company_size: Option<String>,
    pub years_experience: Option<f64>,
    pub remote: Option<String>,
    pub location: Option<String>,
    pub education_level: Option<String>,
}

impl PredictionRequestBuilder {
    pub fn job_title(mut self, value: impl Into<String>) -> Self {
        self.job_title = Some(value.into());
        self
    }

    pub fn employment_type(mut self, value: impl Into<String>) -> Self {
        self.employment_type = Some(value.into());
        self
    }

    pub fn industry(mut self, value: impl Into<String>) -> Self {
        self.industry = Some(value.into());
        self
    }

    pub fn company_size(mut self, value: impl Into<String>) -> Self {
        self.company_size = Some(value.into());
        self
    }

    pub fn years_experience(mut self, value: f64) -> Self {
        self.years_experience = Some(value);
        self
    }

    pub fn remote(mut self, value: impl Into<String>) -> Self {
        self.remote = Some(value.into());
        self
    }

    pub fn location(mut self, value: impl Into<String>) -> Self {
        self.location = Some(value.into());
        self
    }

    pub fn education_level(mut self, value: impl Into<String>) -> Self {
        self.education_level = Some(value.into());
        self
    }

    /// Names of the fields not yet provided, in canonical order
    pub fn missing(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        let text_fields = [
            ("job title", &self.job_title),
            ("employment type", &self.employment_type),
            ("industry", &self.industry),
            ("company size", &self.company_size),
        ];
        for (name, value) in text_fields {
            if is_blank(value) {
                missing.push(name);
            }
        }
        if self.years_experience.is_none() {
            missing.push("years of experience");
        }
        let text_fields = [
            ("remote", &self.remote),
            ("location", &self.location),
            ("education level", &self.education_level),
        ];
        for (name, value) in text_fields {
            if is_blank(value) {
                missing.push(name);
            }
        }
        missing
    }

    /// Validate and normalize into an immutable request
    pub fn build(self) -> WagecastResult<PredictionRequest> {
        let missing = self.missing();
        if !missing.is_empty() {
            return Err(WagecastError::IncompleteRequest(missing.join(", ")));
        }

        let years = self.years_experience.unwrap_or_default();
        if !(0.0..=MAX_YEARS).contains(&years) {
            return Err(WagecastError::InvalidRequest {
                field: "years of experience".to_string(),
                reason: format!("expected a number between 0 and {}, got {}", MAX_YEARS, years),
            });
        }

        Ok(PredictionRequest {
            job_title: normalize(self.job_title),
            employment_type: normalize(self.employment_type),
            industry: normalize(self.industry),
            company_size: normalize(self.company_size),
            years_experience: years,
            remote: normalize(self.remote),
            location: normalize(self.location),
            education_level: normalize(self.education_level),
        })
    }
}

fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().map_or(true, |v| v.trim().is_empty())
}

fn normalize(value: Option<String>) -> String {
    value.map(|v| v.trim().to_string()).unwrap_or_default()
}

#[cfg(test)]
pub(crate) fn sample_request() -> PredictionRequest {
    PredictionRequest::builder()
        .job_title("Software Engineer")
        .employment_type("Full-time")
        .industry("IT")
        .company_size("Large")
        .years_experience(3.0)
        .remote("Yes")
        .location("Bangalore")
        .education_level("Bachelor's")
        .build()
        .unwrap()
}
