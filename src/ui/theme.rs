//! Shared look for prompts and the estimate progress bar
//!
//! cliclack reads the theme globally once [`init_theme`] has run. The
//! estimate bar is drawn with indicatif directly, so it asks the same theme
//! for its template and glyphs through [`WagecastTheme::estimate_style`].

use cliclack::{Theme, ThemeState};
use console::{style, Style};
use indicatif::ProgressStyle;

/// Green for money, yellow for input that needs another try
#[derive(Debug, Clone, Default)]
pub struct WagecastTheme;

impl WagecastTheme {
    /// indicatif style for the estimate bar, labelled through its prefix
    pub fn estimate_style(&self) -> ProgressStyle {
        let template = format!("  {}", self.default_progress_template());
        ProgressStyle::default_bar()
            .template(&template)
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .tick_chars(&self.spinner_chars())
            .progress_chars(&self.progress_chars())
    }
}

impl Theme for WagecastTheme {
    fn bar_color(&self, state: &ThemeState) -> Style {
        match state {
            ThemeState::Active => Style::new().green(),
            // Validation errors, such as an out-of-range years value
            ThemeState::Error(_) => Style::new().yellow(),
            ThemeState::Cancel => Style::new().red(),
            ThemeState::Submit => Style::new().dim(),
        }
    }

    fn state_symbol_color(&self, state: &ThemeState) -> Style {
        match state {
            ThemeState::Submit => Style::new().green(),
            _ => self.bar_color(state),
        }
    }

    /// Marks section headers such as "Request"
    fn info_symbol(&self) -> String {
        style("₹").green().bold().to_string()
    }

    fn default_progress_template(&self) -> String {
        "{spinner:.green} {prefix}  {bar:30.green/dim} {pos:>3}%  {elapsed:.dim}".into()
    }

    fn spinner_chars(&self) -> String {
        "⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏ ".into()
    }

    fn progress_chars(&self) -> String {
        "━╸─".into()
    }
}

/// Initialize the global theme
pub fn init_theme() {
    cliclack::set_theme(WagecastTheme);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn submitted_prompts_turn_green() {
        let theme = WagecastTheme;
        assert_eq!(
            theme.state_symbol_color(&ThemeState::Submit),
            Style::new().green()
        );
        assert_eq!(
            theme.state_symbol_color(&ThemeState::Error("too many years".into())),
            Style::new().yellow()
        );
    }

    #[test]
    fn estimate_template_parses() {
        let theme = WagecastTheme;
        assert!(ProgressStyle::default_bar()
            .template(&theme.default_progress_template())
            .is_ok());
        assert!(theme.default_progress_template().contains("{prefix}"));
        assert_eq!(theme.progress_chars().chars().count(), 3);
        let _ = theme.estimate_style();
    }
}
