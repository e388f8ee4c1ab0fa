//! Data command - dataset rows matching filters

use super::print_json;
use crate::cli::args::{DataArgs, OutputFormat};
use crate::config::Config;
use crate::dataset::{Dataset, EmployeeRecord, Field, SALARY_HEADER, YEARS_HEADER};
use crate::error::WagecastResult;
use crate::ui;

/// Execute the data command
pub async fn execute(args: DataArgs, config: &Config) -> WagecastResult<()> {
    let dataset = Dataset::load(&config.dataset.path)?;
    let rows = dataset.filter(&args.filters);

    match args.format {
        OutputFormat::Json => print_json(&rows)?,
        OutputFormat::Plain => {
            for record in &rows {
                println!("{}", cells(record).join("\t"));
            }
        }
        OutputFormat::Table => {
            let headers: Vec<&str> = Field::all()
                .iter()
                .map(|f| f.header())
                .chain([YEARS_HEADER, SALARY_HEADER])
                .collect();
            let table: Vec<Vec<String>> = rows.iter().map(|r| cells(r)).collect();
            ui::table(&headers, &table);
            println!("\n{} of {} rows", rows.len(), dataset.len());
        }
    }

    Ok(())
}

fn cells(record: &EmployeeRecord) -> Vec<String> {
    Field::all()
        .iter()
        .map(|f| record.get(*f).to_string())
        .chain([YEARS_HEADER, SALARY_HEADER].map(|h| record.column(h).unwrap_or_default()))
        .collect()
}
