//! Predict command - cached salary estimate for one profile

use super::print_json;
use super::request::{builder, complete_fields};
use crate::cache::SqliteStore;
use crate::cli::args::{PredictArgs, PredictFormat};
use crate::config::{Config, ConfigManager};
use crate::error::WagecastResult;
use crate::estimator::create_estimator;
use crate::predict::{
    lookup, Prediction, PredictionRequest, PredictionSource, Predictor, ProgressSchedule,
};
use crate::ui::{self, EstimateProgress, UiContext};
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

#[derive(Serialize)]
struct PredictOutput<'a> {
    fingerprint: &'a str,
    source: PredictionSource,
    estimate: &'a str,
}

/// Execute the predict command
pub async fn execute(args: PredictArgs, config: &Config) -> WagecastResult<()> {
    let ctx = UiContext::detect().with_interactive(args.format == PredictFormat::Text);

    let fields = complete_fields(&ctx, args.fields, &config.dataset.path).await?;
    let request = builder(&fields).build()?;

    let store = Arc::new(SqliteStore::open(&ConfigManager::cache_db_path(config)).await?);

    let estimator = match create_estimator(&config.estimator) {
        Ok(estimator) => estimator,
        Err(e) => {
            // A cached answer needs no estimator
            return match lookup(store.as_ref(), &request).await? {
                Some(prediction) => render(&ctx, args.format, &request, &prediction),
                None => Err(e),
            };
        }
    };

    let timeout = args
        .timeout
        .map(Duration::from_secs)
        .unwrap_or_else(|| config.estimator.timeout());
    debug!("Estimate timeout {:?}", timeout);

    let predictor = Predictor::new(store, estimator)
        .with_schedule(ProgressSchedule::from_config(&config.progress))
        .with_timeout(timeout);

    let mut progress = EstimateProgress::new(&ctx, "Estimating salary");
    let prediction = predictor.predict(&request, &mut progress).await?;
    drop(progress);

    render(&ctx, args.format, &request, &prediction)
}

fn render(
    ctx: &UiContext,
    format: PredictFormat,
    request: &PredictionRequest,
    prediction: &Prediction,
) -> WagecastResult<()> {
    match format {
        PredictFormat::Json => print_json(&PredictOutput {
            fingerprint: prediction.fingerprint.as_str(),
            source: prediction.source,
            estimate: &prediction.text,
        }),
        PredictFormat::Text => {
            if ctx.use_fancy_output() {
                ui::section(ctx, "Request");
                for (label, value) in request.canonical_fields() {
                    ui::key_value(ctx, label, &value);
                }
                ui::note(ctx, "Estimated salary", &prediction.text);
                match prediction.source {
                    PredictionSource::Cache => ui::remark(ctx, "Served from cache"),
                    PredictionSource::Fresh => ui::remark(ctx, "Saved to cache"),
                }
            } else {
                println!("{}", prediction.text);
                eprintln!("source: {}", prediction.source);
            }
            Ok(())
        }
    }
}
