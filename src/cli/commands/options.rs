//! Options command - selectable values per dataset field

use super::print_json;
use crate::cli::args::{OptionsArgs, OutputFormat};
use crate::config::Config;
use crate::dataset::{Dataset, Field};
use crate::error::WagecastResult;
use crate::ui::{self, UiContext};
use serde::Serialize;

#[derive(Serialize)]
struct FieldOptions {
    field: Field,
    values: Vec<String>,
}

/// Execute the options command
pub async fn execute(args: OptionsArgs, config: &Config) -> WagecastResult<()> {
    let dataset = Dataset::load(&config.dataset.path)?;
    let fields: Vec<Field> = match args.field {
        Some(field) => vec![field],
        None => Field::all().to_vec(),
    };

    let options: Vec<FieldOptions> = fields
        .into_iter()
        .map(|field| FieldOptions {
            field,
            values: dataset.options(field),
        })
        .collect();

    match args.format {
        OutputFormat::Json => print_json(&options)?,
        OutputFormat::Plain => {
            for entry in &options {
                for value in &entry.values {
                    println!("{}\t{}", entry.field.slug(), value);
                }
            }
        }
        OutputFormat::Table => {
            let ctx = UiContext::detect();
            for entry in &options {
                ui::section(&ctx, entry.field.header());
                for value in &entry.values {
                    println!("  {}", value);
                }
            }
            if let Some(max) = dataset.max_experience() {
                ui::section(&ctx, "Years of experience");
                println!("  0 to {}", crate::dataset::format_number(max));
            }
        }
    }

    Ok(())
}
