//! Filling in request fields from flags, dataset options and prompts

use crate::cli::args::RequestFields;
use crate::dataset::contribute::MAX_YEARS;
use crate::dataset::{Dataset, Field};
use crate::error::{WagecastError, WagecastResult};
use crate::predict::PredictionRequestBuilder;
use crate::ui::{self, UiContext};
use std::path::Path;
use tracing::debug;

/// Prompt order for the categorical fields around years of experience
const BEFORE_YEARS: [Field; 4] = [
    Field::JobTitle,
    Field::EmploymentType,
    Field::Industry,
    Field::CompanySize,
];
const AFTER_YEARS: [Field; 3] = [Field::Remote, Field::Location, Field::EducationLevel];

/// Ask for each missing field in a terminal
///
/// Choices come from the dataset. Without a terminal or without a dataset the
/// fields are returned unchanged and validation reports what is missing.
pub(crate) async fn complete_fields(
    ctx: &UiContext,
    mut fields: RequestFields,
    dataset_path: &Path,
) -> WagecastResult<RequestFields> {
    if !ctx.is_interactive() || is_complete(&fields) {
        return Ok(fields);
    }

    let dataset = match Dataset::load(dataset_path) {
        Ok(dataset) => dataset,
        Err(WagecastError::DatasetNotFound(path)) => {
            debug!("No dataset at {}, skipping prompts", path.display());
            return Ok(fields);
        }
        Err(e) => return Err(e),
    };

    for field in BEFORE_YEARS {
        prompt_field(ctx, &dataset, &mut fields, field).await?;
    }
    if fields.years_experience.is_none() {
        let max = dataset
            .max_experience()
            .map_or(MAX_YEARS, |m| m.ceil().min(MAX_YEARS));
        fields.years_experience = ui::input_number(ctx, "Years of experience", 0.0, max).await?;
    }
    for field in AFTER_YEARS {
        prompt_field(ctx, &dataset, &mut fields, field).await?;
    }

    Ok(fields)
}

async fn prompt_field(
    ctx: &UiContext,
    dataset: &Dataset,
    fields: &mut RequestFields,
    field: Field,
) -> WagecastResult<()> {
    if fields.get(field).is_some_and(|v| !v.trim().is_empty()) {
        return Ok(());
    }
    if let Some(value) = ui::select_value(ctx, field.header(), &dataset.options(field)).await? {
        fields.set(field, value);
    }
    Ok(())
}

fn is_complete(fields: &RequestFields) -> bool {
    builder(fields).missing().is_empty()
}

/// Request builder seeded from the given fields
pub(crate) fn builder(fields: &RequestFields) -> PredictionRequestBuilder {
    PredictionRequestBuilder {
        job_title: fields.job_title.clone(),
        employment_type: fields.employment_type.clone(),
        industry: fields.industry.clone(),
        company_size: fields.company_size.clone(),
        years_experience: fields.years_experience,
        remote: fields.remote.clone(),
        location: fields.location.clone(),
        education_level: fields.education_level.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn full_fields() -> RequestFields {
        RequestFields {
            job_title: Some("Software Engineer".to_string()),
            employment_type: Some("Full-time".to_string()),
            industry: Some("IT".to_string()),
            company_size: Some("Large".to_string()),
            years_experience: Some(3.0),
            remote: Some("Yes".to_string()),
            location: Some("Bangalore".to_string()),
            education_level: Some("Bachelor's".to_string()),
        }
    }

    #[test]
    fn builder_builds_complete_request() {
        let request = builder(&full_fields()).build().unwrap();
        assert_eq!(request.job_title(), "Software Engineer");
        assert_eq!(request.years_experience(), 3.0);
    }

    #[tokio::test]
    async fn non_interactive_leaves_fields_alone() {
        let dir = TempDir::new().unwrap();
        let mut fields = full_fields();
        fields.location = None;

        let ctx = UiContext::non_interactive();
        let completed = complete_fields(&ctx, fields, &dir.path().join("none.csv"))
            .await
            .unwrap();

        assert_eq!(completed.location, None);
        let err = builder(&completed).build().unwrap_err();
        assert!(matches!(err, WagecastError::IncompleteRequest(_)));
    }
}
