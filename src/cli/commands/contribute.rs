//! Contribute command - append a salary data point to the dataset

use super::request::complete_fields;
use crate::cli::args::ContributeArgs;
use crate::config::Config;
use crate::dataset::contribute::MAX_SALARY;
use crate::dataset::{append_record, format_number, Contribution};
use crate::error::{WagecastError, WagecastResult};
use crate::predict::PredictionRequest;
use crate::ui::{self, UiContext};

/// Execute the contribute command
pub async fn execute(args: ContributeArgs, config: &Config) -> WagecastResult<()> {
    let ctx = UiContext::detect().with_auto_yes(args.yes);
    let path = &config.dataset.path;

    let fields = complete_fields(&ctx, args.fields, path).await?;
    let request = super::request::builder(&fields)
        .build()
        .map_err(|e| WagecastError::InvalidContribution(e.to_string()))?;

    let salary = match args.salary {
        Some(salary) => salary,
        None => ui::input_number(&ctx, "Annual salary (INR)", 0.0, MAX_SALARY)
            .await?
            .ok_or_else(|| WagecastError::InvalidContribution("missing salary".to_string()))?,
    };

    let contribution = contribution(&request, salary);
    if !ui::confirm(
        &ctx,
        &format!("Add {} INR for {} to {}?", format_number(salary), request.job_title(), path.display()),
        true,
    )
    .await?
    {
        ui::step_warn(&ctx, "Nothing written");
        return Ok(());
    }

    append_record(path, contribution)?;
    ui::step_ok(&ctx, &format!("Added to {}", path.display()));
    Ok(())
}

fn contribution(request: &PredictionRequest, salary: f64) -> Contribution {
    Contribution {
        job_title: request.job_title().to_string(),
        industry: request.industry().to_string(),
        education_level: request.education_level().to_string(),
        location: request.location().to_string(),
        employment_type: request.employment_type().to_string(),
        company_size: request.company_size().to_string(),
        remote: request.remote().to_string(),
        years_experience: request.years_experience(),
        salary,
    }
}
