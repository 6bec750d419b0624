//! Console styling helpers

use indicatif::ProgressStyle;
use owo_colors::{OwoColorize, Stream, Style};

/// Check mark used in status lines
pub const CHECK: &str = "✓";

/// Cross used in failure lines
pub const CROSS: &str = "✗";

/// Semantic styles for console output.
///
/// Colors are dropped automatically when stdout is not a terminal.
pub trait Stylize {
    /// Secondary information
    fn muted(&self) -> String;
    /// Headings and names that should stand out
    fn emphasis(&self) -> String;
    /// Branch names, counts, URLs
    fn accent(&self) -> String;
    /// Successful outcome
    fn success(&self) -> String;
    /// Failures
    fn error(&self) -> String;
}

fn styled<T: std::fmt::Display>(value: &T, style: Style) -> String {
    value
        .if_supports_color(Stream::Stdout, move |v| v.style(style))
        .to_string()
}

impl<T: std::fmt::Display> Stylize for T {
    fn muted(&self) -> String {
        styled(self, Style::new().dimmed())
    }

    fn emphasis(&self) -> String {
        styled(self, Style::new().bold())
    }

    fn accent(&self) -> String {
        styled(self, Style::new().cyan())
    }

    fn success(&self) -> String {
        styled(self, Style::new().green())
    }

    fn error(&self) -> String {
        styled(self, Style::new().red().bold())
    }
}

/// Styled check mark
pub fn check() -> String {
    CHECK.success()
}

/// Styled cross
pub fn cross() -> String {
    CROSS.error()
}

/// Spinner style for network waits
pub fn spinner_style() -> ProgressStyle {
    ProgressStyle::with_template("{spinner:.cyan} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
        .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏ ")
}
