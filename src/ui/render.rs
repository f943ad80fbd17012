use crossterm::style::ContentStyle;
use crossterm::tty::IsTty;
use std::io;

use crate::config::ColorChoice;
use crate::models::DnsRecord;
use crate::reconcile::Outcome;

use super::theme::Theme;

/// Whether output should carry ANSI colors for the given choice.
///
/// `Auto` colors only when stdout is a terminal and `NO_COLOR` is unset.
pub fn color_enabled(choice: ColorChoice) -> bool {
    match choice {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => std::env::var_os("NO_COLOR").is_none() && io::stdout().is_tty(),
    }
}

/// Formats outcome and error lines for stdout
pub struct Printer {
    theme: Theme,
    color: bool,
}

impl Printer {
    pub fn new(color: bool) -> Self {
        if color {
            crossterm::style::force_color_output(true);
        }

        Self {
            theme: Theme::new(),
            color,
        }
    }

    pub fn outcome(&self, outcome: &Outcome) -> String {
        let style = match outcome {
            Outcome::Found(_) => self.theme.primary_style(),
            Outcome::Created(_) | Outcome::Updated(_) => self.theme.success_style(),
            Outcome::Deleted(_) => self.theme.warning_style(),
            Outcome::UpToDate { .. } | Outcome::Absent { .. } => self.theme.muted_style(),
        };

        self.paint(style, &outcome.summary())
    }

    pub fn record_json(&self, record: &DnsRecord) -> serde_json::Result<String> {
        serde_json::to_string_pretty(record)
    }

    pub fn error(&self, message: &str) -> String {
        format!("{} {}", self.paint(self.theme.error_style(), "Error:"), message)
    }

    fn paint(&self, style: ContentStyle, text: &str) -> String {
        if self.color {
            style.apply(text).to_string()
        } else {
            text.to_string()
        }
    }
}
