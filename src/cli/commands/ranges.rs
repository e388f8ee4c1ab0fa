//! Ranges command - average salary per experience range

use super::print_json;
use crate::cli::args::{OutputFormat, RangesArgs};
use crate::config::Config;
use crate::dataset::{format_number, Dataset, Field, RangeGroup};
use crate::error::WagecastResult;
use crate::ui;
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Serialize)]
struct RangeRow<'a> {
    range: &'a str,
    #[serde(flatten)]
    key: BTreeMap<&'static str, &'a str>,
    average_salary: f64,
    count: usize,
}

impl<'a> From<&'a RangeGroup> for RangeRow<'a> {
    fn from(group: &'a RangeGroup) -> Self {
        Self {
            range: &group.range,
            key: group
                .key
                .iter()
                .map(|(field, value)| (field.slug(), value.as_str()))
                .collect(),
            average_salary: group.average_salary,
            count: group.count,
        }
    }
}

/// Execute the ranges command
pub async fn execute(args: RangesArgs, config: &Config) -> WagecastResult<()> {
    let dataset = Dataset::load(&config.dataset.path)?;
    let group_by: &[Field] = if args.group_by.is_empty() {
        Field::optional_groupings()
    } else {
        &args.group_by
    };
    let groups = dataset.ranges(group_by, args.bucket)?;

    match args.format {
        OutputFormat::Json => {
            let rows: Vec<RangeRow> = groups.iter().map(RangeRow::from).collect();
            print_json(&rows)?;
        }
        OutputFormat::Plain => {
            for group in &groups {
                let key: Vec<&str> = group.key.iter().map(|(_, v)| v.as_str()).collect();
                println!(
                    "{}\t{}\t{}\t{}",
                    group.range,
                    key.join("\t"),
                    format_number(group.average_salary),
                    group.count
                );
            }
        }
        OutputFormat::Table => {
            let mut headers = vec!["Experience Range"];
            if let Some(first) = groups.first() {
                headers.extend(first.key.iter().map(|(field, _)| field.header()));
            }
            headers.extend(["Average Salary", "Count"]);

            let rows: Vec<Vec<String>> = groups
                .iter()
                .map(|group| {
                    let mut row = vec![group.range.clone()];
                    row.extend(group.key.iter().map(|(_, v)| v.clone()));
                    row.push(format_number(group.average_salary));
                    row.push(group.count.to_string());
                    row
                })
                .collect();
            ui::table(&headers, &rows);
        }
    }

    Ok(())
}
