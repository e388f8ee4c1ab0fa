//! Init command - prepare the prediction cache and configuration

use super::config::init_config;
use crate::cache::SqliteStore;
use crate::cli::args::InitArgs;
use crate::config::{Config, ConfigManager};
use crate::error::WagecastResult;
use crate::ui::{self, UiContext};

/// Execute the init command
pub async fn execute(args: InitArgs, manager: &ConfigManager, config: &Config) -> WagecastResult<()> {
    let ctx = UiContext::detect();
    ui::intro(&ctx, "Wagecast setup");

    init_config(&ctx, manager, args.force).await?;

    let db_path = ConfigManager::cache_db_path(config);
    let store = SqliteStore::open(&db_path).await?;
    let cached = store.count().await?;
    ui::step_ok(
        &ctx,
        &format!("Prediction cache ready at {} ({} entries)", db_path.display(), cached),
    );

    if config.dataset.path.is_file() {
        ui::step_ok(&ctx, &format!("Dataset found at {}", config.dataset.path.display()));
    } else {
        ui::step_warn(
            &ctx,
            &format!("Dataset not found at {}", config.dataset.path.display()),
        );
        ui::remark(&ctx, "Run: wagecast config set dataset.path <file.csv>");
    }

    ui::outro_success(&ctx, "Ready");
    Ok(())
}
