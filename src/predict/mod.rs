//! Salary prediction with cached results
//!
//! Requests are fingerprinted and served from the result store when
//! possible; otherwise the estimator is called once and its trimmed reply is
//! stored for next time.

mod orchestrator;
pub mod progress;
pub mod prompt;
pub mod request;

pub use orchestrator::{lookup, Prediction, PredictionSource, Predictor, DEFAULT_TIMEOUT};
pub use progress::{NoProgress, ProgressSchedule, ProgressSink};
pub use prompt::build_prompt;
pub use request::{PredictionRequest, PredictionRequestBuilder};
