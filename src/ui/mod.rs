//! Terminal presentation
//!
//! Uses `cliclack` for prompts and `indicatif` for the estimate progress bar,
//! falling back to plain line output when not attached to a terminal.
//!
//! # Example
//!
//! ```rust,ignore
//! use wagecast::ui::{self, EstimateProgress, UiContext};
//!
//! let ctx = UiContext::detect();
//! ui::intro(&ctx, "Salary estimate");
//!
//! let title = ui::select_value(&ctx, "Job title", &titles).await?;
//! let mut progress = EstimateProgress::new(&ctx, "Estimating salary");
//! let prediction = predictor.predict(&request, &mut progress).await?;
//!
//! ui::outro_success(&ctx, &prediction.text);
//! ```

mod context;
mod output;
mod progress;
mod prompts;
mod theme;

pub use context::UiContext;
pub use output::{
    intro, key_value, note, outro_success, remark, section, step_ok, step_warn, table,
};
pub use progress::EstimateProgress;
pub use prompts::{confirm, input_number, select_value};
pub use theme::{init_theme, WagecastTheme};
