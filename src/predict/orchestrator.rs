//! Prediction orchestrator
//!
//! Request lifecycle:
//!
//! | State | Next |
//! |-------|------|
//! | Hashing | CacheLookup |
//! | CacheLookup | Done on hit, Computing on miss |
//! | Computing | CacheWrite once the estimator task finishes |
//! | CacheWrite | Done |
//!
//! A hit never touches the estimator or the progress sink. A miss spawns the
//! estimator call as its own task and presents progress in the foreground
//! until that task has finished or the timeout fires.

use super::progress::{present, ProgressSchedule, ProgressSink};
use super::prompt::build_prompt;
use super::request::PredictionRequest;
use crate::cache::{fingerprint, Fingerprint, ResultStore};
use crate::error::{WagecastError, WagecastResult};
use crate::estimator::Estimator;
use serde::Serialize;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Default limit on a single estimation call
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Where a prediction came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PredictionSource {
    /// Served from the result store
    Cache,
    /// Freshly computed by the estimator
    Fresh,
}

impl fmt::Display for PredictionSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Cache => "cache",
            Self::Fresh => "fresh",
        };
        write!(f, "{}", name)
    }
}

/// Outcome of a successful prediction
#[derive(Debug, Clone, Serialize)]
pub struct Prediction {
    pub fingerprint: Fingerprint,
    pub text: String,
    pub source: PredictionSource,
}

/// Cached estimate for a request; a miss is `None` and never estimates
pub async fn lookup(
    store: &dyn ResultStore,
    request: &PredictionRequest,
) -> WagecastResult<Option<Prediction>> {
    let fingerprint = fingerprint(request);
    debug!(fingerprint = fingerprint.short(), "Looking up cached estimate");
    let cached = store.get(&fingerprint).await?;
    Ok(cached.map(|text| Prediction {
        fingerprint,
        text,
        source: PredictionSource::Cache,
    }))
}

/// Coordinates fingerprinting, cache lookup, estimation and cache write
pub struct Predictor {
    store: Arc<dyn ResultStore>,
    estimator: Arc<dyn Estimator>,
    schedule: ProgressSchedule,
    timeout: Duration,
}

impl Predictor {
    pub fn new(store: Arc<dyn ResultStore>, estimator: Arc<dyn Estimator>) -> Self {
        Self {
            store,
            estimator,
            schedule: ProgressSchedule::default(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_schedule(mut self, schedule: ProgressSchedule) -> Self {
        self.schedule = schedule;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Serve a request from cache, or estimate, store and return it
    pub async fn predict(
        &self,
        request: &PredictionRequest,
        progress: &mut dyn ProgressSink,
    ) -> WagecastResult<Prediction> {
        if let Some(hit) = lookup(self.store.as_ref(), request).await? {
            info!(fingerprint = hit.fingerprint.short(), "Cache hit");
            return Ok(hit);
        }

        let fingerprint = fingerprint(request);

        info!(
            fingerprint = fingerprint.short(),
            provider = self.estimator.name(),
            "Cache miss, requesting estimate"
        );
        let reply = self.estimate(build_prompt(request), progress).await?;

        let text = reply.trim();
        if text.is_empty() {
            warn!(fingerprint = fingerprint.short(), "Estimator returned empty text");
            return Err(WagecastError::EmptyEstimate);
        }

        debug!(fingerprint = fingerprint.short(), "Writing estimate to cache");
        self.store.put(&fingerprint, text).await?;

        Ok(Prediction {
            fingerprint,
            text: text.to_string(),
            source: PredictionSource::Fresh,
        })
    }

    /// Run the estimator in the background while presenting progress
    async fn estimate(
        &self,
        prompt: String,
        progress: &mut dyn ProgressSink,
    ) -> WagecastResult<String> {
        let estimator = Arc::clone(&self.estimator);
        let task = tokio::spawn(async move { estimator.generate(&prompt).await });

        let presentation = present(&self.schedule, progress, || task.is_finished());
        if tokio::time::timeout(self.timeout, presentation).await.is_err() {
            task.abort();
            progress.abandon();
            warn!("Estimator did not finish within {:?}", self.timeout);
            return Err(WagecastError::EstimationTimeout(self.timeout));
        }

        match task.await {
            Ok(reply) => reply,
            Err(e) => Err(WagecastError::estimation(
                self.estimator.name(),
                format!("estimation task failed: {}", e),
            )),
        }
    }
}
