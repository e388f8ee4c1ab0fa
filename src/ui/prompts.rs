//! Interactive prompts with non-interactive fallback

use super::context::UiContext;
use crate::error::{WagecastError, WagecastResult};

fn prompt_failed(kind: &str, e: impl std::fmt::Display) -> WagecastError {
    WagecastError::User(format!("{} failed: {}", kind, e))
}

/// Ask for confirmation; returns `default` without a terminal
pub async fn confirm(ctx: &UiContext, message: &str, default: bool) -> WagecastResult<bool> {
    if ctx.auto_yes() {
        return Ok(true);
    }
    if !ctx.is_interactive() {
        return Ok(default);
    }

    let message = message.to_string();
    tokio::task::spawn_blocking(move || {
        cliclack::confirm(&message)
            .initial_value(default)
            .interact()
    })
    .await
    .map_err(|e| prompt_failed("Prompt task", e))?
    .map_err(|e| prompt_failed("Prompt", e))
}

/// Pick one of `options`; returns `None` without a terminal or with no options
pub async fn select_value(
    ctx: &UiContext,
    message: &str,
    options: &[String],
) -> WagecastResult<Option<String>> {
    if !ctx.is_interactive() || options.is_empty() {
        return Ok(None);
    }

    let message = message.to_string();
    let items = options.to_vec();
    let value = tokio::task::spawn_blocking(move || {
        let mut select = cliclack::select(&message);
        for item in items {
            select = select.item(item.clone(), item, "");
        }
        select.max_rows(12).filter_mode().interact()
    })
    .await
    .map_err(|e| prompt_failed("Select task", e))?
    .map_err(|e| prompt_failed("Select", e))?;

    Ok(Some(value))
}

/// Read a number in `min..=max`; returns `None` without a terminal
pub async fn input_number(
    ctx: &UiContext,
    message: &str,
    min: f64,
    max: f64,
) -> WagecastResult<Option<f64>> {
    if !ctx.is_interactive() {
        return Ok(None);
    }

    let message = message.to_string();
    let raw: String = tokio::task::spawn_blocking(move || {
        cliclack::input(&message)
            .validate(move |value: &String| match value.trim().parse::<f64>() {
                Ok(n) if n.is_finite() && (min..=max).contains(&n) => Ok(()),
                _ => Err(format!("Enter a number between {} and {}", min, max)),
            })
            .interact()
    })
    .await
    .map_err(|e| prompt_failed("Input task", e))?
    .map_err(|e| prompt_failed("Input", e))?;

    raw.trim()
        .parse()
        .map(Some)
        .map_err(|e| prompt_failed("Input", e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn confirm_auto_yes() {
        let ctx = UiContext::non_interactive().with_auto_yes(true);
        assert!(confirm(&ctx, "Append?", false).await.unwrap());
    }

    #[tokio::test]
    async fn confirm_non_interactive_default() {
        let ctx = UiContext::non_interactive();
        assert!(confirm(&ctx, "Append?", true).await.unwrap());
        assert!(!confirm(&ctx, "Append?", false).await.unwrap());
    }

    #[tokio::test]
    async fn select_non_interactive_is_none() {
        let ctx = UiContext::non_interactive();
        let options = vec!["IT".to_string(), "Finance".to_string()];
        assert_eq!(select_value(&ctx, "Industry", &options).await.unwrap(), None);
    }

    #[tokio::test]
    async fn input_non_interactive_is_none() {
        let ctx = UiContext::non_interactive();
        assert_eq!(input_number(&ctx, "Years", 0.0, 50.0).await.unwrap(), None);
    }
}
