//! Estimator factory
//!
//! Picks the configured provider and resolves its credentials from the
//! environment.

use super::{CommandEstimator, Estimator, GeminiEstimator};
use crate::config::schema::EstimatorConfig;
use crate::error::{WagecastError, WagecastResult};
use std::sync::Arc;
use tracing::debug;

/// Create the estimator described by config
pub fn create_estimator(config: &EstimatorConfig) -> WagecastResult<Arc<dyn Estimator>> {
    match config.provider.as_str() {
        "gemini" => {
            let api_key = std::env::var(&config.api_key_env)
                .ok()
                .filter(|v| !v.trim().is_empty())
                .ok_or_else(|| WagecastError::EstimatorNotConfigured(config.api_key_env.clone()))?;

            let model = std::env::var(&config.model_env)
                .ok()
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| config.model.clone());

            debug!("Using Gemini model {}", model);
            Ok(Arc::new(GeminiEstimator::new(
                api_key,
                model,
                config.endpoint.clone(),
                config.timeout(),
            )))
        }
        "command" => Ok(Arc::new(CommandEstimator::new(&config.command)?)),
        other => Err(WagecastError::ConfigInvalid {
            path: "estimator.provider".into(),
            reason: format!("unknown provider '{}', expected gemini or command", other),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn gemini_requires_api_key() {
        let config = EstimatorConfig {
            api_key_env: "WAGECAST_TEST_MISSING_KEY".to_string(),
            ..EstimatorConfig::default()
        };
        std::env::remove_var("WAGECAST_TEST_MISSING_KEY");

        let err = create_estimator(&config).err().unwrap();
        assert!(matches!(err, WagecastError::EstimatorNotConfigured(_)));
    }

    #[test]
    #[serial]
    fn gemini_with_key_is_created() {
        let config = EstimatorConfig {
            api_key_env: "WAGECAST_TEST_KEY".to_string(),
            model_env: "WAGECAST_TEST_MODEL".to_string(),
            ..EstimatorConfig::default()
        };
        std::env::set_var("WAGECAST_TEST_KEY", "secret");

        let estimator = create_estimator(&config).unwrap();
        assert_eq!(estimator.name(), "gemini");

        std::env::remove_var("WAGECAST_TEST_KEY");
    }

    #[test]
    fn command_provider_needs_program() {
        let mut config = EstimatorConfig {
            provider: "command".to_string(),
            ..EstimatorConfig::default()
        };
        assert!(create_estimator(&config).is_err());

        config.command = vec!["cat".to_string()];
        assert_eq!(create_estimator(&config).unwrap().name(), "command");
    }

    #[test]
    fn unknown_provider_rejected() {
        let config = EstimatorConfig {
            provider: "crystal-ball".to_string(),
            ..EstimatorConfig::default()
        };
        assert!(matches!(
            create_estimator(&config).err().unwrap(),
            WagecastError::ConfigInvalid { .. }
        ));
    }
}
