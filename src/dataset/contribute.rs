//! Appending contributed rows to the dataset
//!
//! Columns are written in the order of the existing header, so a file with
//! reordered columns stays consistent. A new file gets the default header.

use super::record::{EmployeeRecord, Field, SALARY_HEADER, YEARS_HEADER};
use crate::error::{WagecastError, WagecastResult};
use std::fs::OpenOptions;
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::Path;
use tracing::info;

/// Upper bound on contributed years of experience
pub const MAX_YEARS: f64 = 50.0;
/// Upper bound on contributed annual salary
pub const MAX_SALARY: f64 = 100_000_000.0;

/// A salary data point submitted by a user
#[derive(Debug, Clone)]
pub struct Contribution {
    pub job_title: String,
    pub industry: String,
    pub education_level: String,
    pub location: String,
    pub employment_type: String,
    pub company_size: String,
    pub remote: String,
    pub years_experience: f64,
    pub salary: f64,
}

impl Contribution {
    /// Trim text, check ranges, and produce the row to store
    pub fn into_record(self) -> WagecastResult<EmployeeRecord> {
        let record = EmployeeRecord {
            job_title: self.job_title.trim().to_string(),
            industry: self.industry.trim().to_string(),
            education_level: self.education_level.trim().to_string(),
            location: self.location.trim().to_string(),
            employment_type: self.employment_type.trim().to_string(),
            company_size: self.company_size.trim().to_string(),
            remote: self.remote.trim().to_string(),
            years_experience: Some(self.years_experience),
            salary: Some(self.salary),
        };

        if let Some(field) = Field::all().iter().find(|f| record.get(**f).is_empty()) {
            return Err(WagecastError::InvalidContribution(format!(
                "{} must not be empty",
                field
            )));
        }
        if !(0.0..=MAX_YEARS).contains(&self.years_experience) {
            return Err(WagecastError::InvalidContribution(format!(
                "years of experience must be between 0 and {}",
                MAX_YEARS
            )));
        }
        if !(0.0..=MAX_SALARY).contains(&self.salary) {
            return Err(WagecastError::InvalidContribution(format!(
                "salary must be between 0 and {}",
                MAX_SALARY
            )));
        }

        Ok(record)
    }
}

/// Default column order for a new dataset file
fn default_headers() -> Vec<String> {
    Field::all()
        .iter()
        .map(|f| f.header().to_string())
        .chain([YEARS_HEADER.to_string(), SALARY_HEADER.to_string()])
        .collect()
}

/// Append one validated contribution to the CSV at `path`
pub fn append_record(path: &Path, contribution: Contribution) -> WagecastResult<EmployeeRecord> {
    let record = contribution.into_record()?;
    let io_err = |e: std::io::Error| WagecastError::io(format!("appending to {}", path.display()), e);
    let csv_err = |e: csv::Error| WagecastError::DatasetRead {
        path: path.to_path_buf(),
        reason: e.to_string(),
    };

    let mut file = OpenOptions::new()
        .read(true)
        .append(true)
        .create(true)
        .open(path)
        .map_err(io_err)?;

    let len = file.metadata().map_err(io_err)?.len();
    let headers = if len == 0 {
        None
    } else {
        let mut reader = csv::Reader::from_path(path).map_err(csv_err)?;
        let headers: Vec<String> = reader.headers().map_err(csv_err)?.iter().map(String::from).collect();
        Some(headers)
    };

    // Keep the new row on its own line if the file lacks a final newline
    if len > 0 {
        let mut last = [0u8; 1];
        file.seek(SeekFrom::End(-1)).map_err(io_err)?;
        file.read_exact(&mut last).map_err(io_err)?;
        if last[0] != b'\n' {
            file.write_all(b"\n").map_err(io_err)?;
        }
    }

    let mut writer = csv::WriterBuilder::new().has_headers(false).from_writer(file);
    let columns = match headers {
        Some(headers) => headers,
        None => {
            let headers = default_headers();
            writer.write_record(&headers).map_err(csv_err)?;
            headers
        }
    };

    let row: Vec<String> = columns
        .iter()
        .map(|h| record.column(h).unwrap_or_default())
        .collect();
    writer.write_record(&row).map_err(csv_err)?;
    writer.flush().map_err(io_err)?;

    info!("Appended contribution to {}", path.display());
    Ok(record)
}
