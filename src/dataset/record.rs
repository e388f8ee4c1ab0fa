//! Employee records and the categorical fields they expose

use crate::error::WagecastError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// CSV header for years of experience
pub const YEARS_HEADER: &str = "YearsExperience";
/// CSV header for annual salary
pub const SALARY_HEADER: &str = "Salary (in INR)";

/// One row of the salary dataset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployeeRecord {
    #[serde(rename = "Job Title")]
    pub job_title: String,

    #[serde(rename = "Industry")]
    pub industry: String,

    #[serde(rename = "Education Level")]
    pub education_level: String,

    #[serde(rename = "Location")]
    pub location: String,

    #[serde(rename = "Employment Type")]
    pub employment_type: String,

    #[serde(rename = "Company Size")]
    pub company_size: String,

    #[serde(rename = "Remote")]
    pub remote: String,

    /// Unparseable cells load as `None`
    #[serde(rename = "YearsExperience", default, deserialize_with = "csv::invalid_option")]
    pub years_experience: Option<f64>,

    #[serde(rename = "Salary (in INR)", default, deserialize_with = "csv::invalid_option")]
    pub salary: Option<f64>,
}

impl EmployeeRecord {
    /// Value of a categorical field
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::JobTitle => &self.job_title,
            Field::Industry => &self.industry,
            Field::EducationLevel => &self.education_level,
            Field::Location => &self.location,
            Field::EmploymentType => &self.employment_type,
            Field::CompanySize => &self.company_size,
            Field::Remote => &self.remote,
        }
    }

    /// Value of any column by its CSV header, formatted for display
    pub fn column(&self, header: &str) -> Option<String> {
        if let Some(field) = Field::all().iter().find(|f| f.header() == header) {
            return Some(self.get(*field).to_string());
        }
        match header {
            YEARS_HEADER => Some(self.years_experience.map(format_number).unwrap_or_default()),
            SALARY_HEADER => Some(self.salary.map(format_number).unwrap_or_default()),
            _ => None,
        }
    }
}

/// Categorical dataset fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Field {
    JobTitle,
    Industry,
    EducationLevel,
    Location,
    EmploymentType,
    CompanySize,
    Remote,
}

impl Field {
    /// All categorical fields in display order
    pub fn all() -> &'static [Self] {
        &[
            Self::JobTitle,
            Self::Industry,
            Self::EducationLevel,
            Self::Location,
            Self::EmploymentType,
            Self::CompanySize,
            Self::Remote,
        ]
    }

    /// Fields that can optionally be added to a range grouping
    pub fn optional_groupings() -> &'static [Self] {
        &[
            Self::EducationLevel,
            Self::Location,
            Self::EmploymentType,
            Self::CompanySize,
            Self::Remote,
        ]
    }

    /// CSV column header
    pub fn header(&self) -> &'static str {
        match self {
            Self::JobTitle => "Job Title",
            Self::Industry => "Industry",
            Self::EducationLevel => "Education Level",
            Self::Location => "Location",
            Self::EmploymentType => "Employment Type",
            Self::CompanySize => "Company Size",
            Self::Remote => "Remote",
        }
    }

    /// Command-line name
    pub fn slug(&self) -> &'static str {
        match self {
            Self::JobTitle => "job-title",
            Self::Industry => "industry",
            Self::EducationLevel => "education-level",
            Self::Location => "location",
            Self::EmploymentType => "employment-type",
            Self::CompanySize => "company-size",
            Self::Remote => "remote",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.header())
    }
}

impl FromStr for Field {
    type Err = WagecastError;

    /// Accepts the slug, the CSV header, or snake_case, case-insensitively
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace(['_', ' '], "-");
        Self::all()
            .iter()
            .copied()
            .find(|f| f.slug() == wanted)
            .ok_or_else(|| WagecastError::UnknownField(s.to_string()))
    }
}

/// Round to one decimal and drop a trailing `.0`
pub fn format_number(value: f64) -> String {
    let rounded = (value * 10.0).round() / 10.0 + 0.0;
    if rounded.fract() == 0.0 {
        format!("{:.0}", rounded)
    } else {
        format!("{:.1}", rounded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_parses_many_spellings() {
        assert_eq!("job-title".parse::<Field>().unwrap(), Field::JobTitle);
        assert_eq!("Job Title".parse::<Field>().unwrap(), Field::JobTitle);
        assert_eq!("company_size".parse::<Field>().unwrap(), Field::CompanySize);
        assert_eq!("REMOTE".parse::<Field>().unwrap(), Field::Remote);
        assert!("salary".parse::<Field>().is_err());
    }

    #[test]
    fn field_display_is_header() {
        assert_eq!(Field::EducationLevel.to_string(), "Education Level");
    }

    #[test]
    fn numbers_drop_trailing_zero() {
        assert_eq!(format_number(3.0), "3");
        assert_eq!(format_number(2.50), "2.5");
        assert_eq!(format_number(4.26), "4.3");
        assert_eq!(format_number(850000.0), "850000");
        assert_eq!(format_number(-0.0), "0");
    }
}
