//! Employee salary dataset
//!
//! Loads the CSV, exposes selectable values per field, filters rows and
//! groups them into experience ranges of a chosen width. New rows are appended by
//! [`contribute`].

pub mod contribute;
pub mod record;

pub use contribute::{append_record, Contribution};
pub use record::{format_number, EmployeeRecord, Field, SALARY_HEADER, YEARS_HEADER};

use crate::error::{WagecastError, WagecastResult};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Filter value that matches every row
pub const MATCH_ALL: &str = "All";

/// In-memory copy of the dataset
#[derive(Debug, Clone)]
pub struct Dataset {
    path: PathBuf,
    records: Vec<EmployeeRecord>,
}

/// One experience-range group
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RangeGroup {
    /// Label such as "3-4 Years"
    pub range: String,
    /// Grouping field values, in grouping order
    pub key: Vec<(Field, String)>,
    /// Mean salary rounded to one decimal
    pub average_salary: f64,
    /// Rows in the group
    pub count: usize,
}

impl Dataset {
    /// Load every row of a CSV file
    pub fn load(path: &Path) -> WagecastResult<Self> {
        if !path.is_file() {
            return Err(WagecastError::DatasetNotFound(path.to_path_buf()));
        }

        let read_err = |reason: String| WagecastError::DatasetRead {
            path: path.to_path_buf(),
            reason,
        };

        let mut reader = csv::Reader::from_path(path).map_err(|e| read_err(e.to_string()))?;
        let mut records = Vec::new();
        for row in reader.deserialize::<EmployeeRecord>() {
            records.push(row.map_err(|e| read_err(e.to_string()))?);
        }

        debug!("Loaded {} records from {}", records.len(), path.display());
        Ok(Self::from_records(path, records))
    }

    /// Build a dataset from already parsed rows
    pub fn from_records(path: &Path, records: Vec<EmployeeRecord>) -> Self {
        Self {
            path: path.to_path_buf(),
            records,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn records(&self) -> &[EmployeeRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Sorted distinct non-empty values of a field
    pub fn options(&self, field: Field) -> Vec<String> {
        self.records
            .iter()
            .map(|r| r.get(field).trim())
            .filter(|v| !v.is_empty())
            .map(str::to_string)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Largest known years of experience
    pub fn max_experience(&self) -> Option<f64> {
        self.records
            .iter()
            .filter_map(|r| r.years_experience)
            .fold(None, |max, y| Some(max.map_or(y, |m: f64| m.max(y))))
    }

    /// Widest experience bucket, in whole years, that `ranges` accepts
    pub fn max_bucket(&self) -> u32 {
        self.max_experience()
            .map_or(1, |max| max.max(0.0).floor() as u32 + 1)
    }

    /// Rows matching every (field, value) pair; "All" matches anything
    pub fn filter(&self, filters: &[(Field, String)]) -> Vec<&EmployeeRecord> {
        self.records
            .iter()
            .filter(|r| {
                filters
                    .iter()
                    .all(|(field, value)| value == MATCH_ALL || r.get(*field) == value)
            })
            .collect()
    }

    /// Group rows by experience range, job title, industry and `extra` fields
    ///
    /// Ranges are `bucket` years wide and start at multiples of `bucket`.
    /// Rows without a parseable experience or salary are left out. Groups are
    /// ordered by range start, then by key.
    pub fn ranges(&self, extra: &[Field], bucket: u32) -> WagecastResult<Vec<RangeGroup>> {
        let max = self.max_bucket();
        if bucket == 0 || bucket > max {
            return Err(WagecastError::InvalidBucket { bucket, max });
        }
        let width = f64::from(bucket);

        let mut fields = vec![Field::JobTitle, Field::Industry];
        for field in Field::optional_groupings() {
            if extra.contains(field) {
                fields.push(*field);
            }
        }

        let mut groups: BTreeMap<(i64, Vec<String>), (f64, usize)> = BTreeMap::new();
        for record in &self.records {
            let (Some(years), Some(salary)) = (record.years_experience, record.salary) else {
                continue;
            };
            let lower = ((years / width).floor() * width) as i64;
            let key: Vec<String> = fields.iter().map(|f| record.get(*f).to_string()).collect();
            let entry = groups.entry((lower, key)).or_insert((0.0, 0));
            entry.0 += salary;
            entry.1 += 1;
        }

        let groups = groups
            .into_iter()
            .map(|((lower, values), (sum, count))| RangeGroup {
                range: format!("{}-{} Years", lower, lower + i64::from(bucket)),
                key: fields.iter().copied().zip(values).collect(),
                average_salary: (sum / count as f64 * 10.0).round() / 10.0,
                count,
            })
            .collect();
        Ok(groups)
    }
}
