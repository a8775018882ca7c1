//! Output formatting for the CLI.

use std::time::Duration;

use console::{style, Term};
use foody_commerce::cart::OrderSummary;
use foody_commerce::notify::{Notification, NotificationKind};
use indicatif::{ProgressBar, ProgressStyle};

/// Output handler for CLI messages.
#[derive(Clone)]
pub struct Output {
    verbose: bool,
    json: bool,
    term: Term,
}

impl Output {
    /// Create a new output handler.
    pub fn new(verbose: bool, json: bool) -> Self {
        Self {
            verbose,
            json,
            term: Term::stderr(),
        }
    }

    /// Print an info message.
    pub fn info(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("{} {}", style("ℹ").blue(), msg);
    }

    /// Print a success message.
    pub fn success(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("{} {}", style("✓").green(), msg);
    }

    /// Print a warning message.
    pub fn warn(&self, msg: &str) {
        if self.json {
            return;
        }
        eprintln!("{} {}", style("⚠").yellow(), msg);
    }

    /// Print an error message.
    pub fn error(&self, msg: &str) {
        if self.json {
            eprintln!("{}", serde_json::json!({ "error": msg }));
            return;
        }
        eprintln!("{} {}", style("✗").red(), style(msg).red());
    }

    /// Print a debug message (only in verbose mode).
    pub fn debug(&self, msg: &str) {
        if !self.verbose || self.json {
            return;
        }
        eprintln!("{} {}", style("→").dim(), style(msg).dim());
    }

    /// Print a header/title.
    pub fn header(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("\n{}", style(msg).bold().underlined());
    }

    /// Print JSON output.
    pub fn json<T: serde::Serialize>(&self, value: &T) {
        if let Ok(json) = serde_json::to_string_pretty(value) {
            println!("{}", json);
        }
    }

    /// Print a key-value pair.
    pub fn kv(&self, key: &str, value: &str) {
        if self.json {
            return;
        }
        println!("  {}: {}", style(key).dim(), value);
    }

    /// Print a list item.
    pub fn list_item(&self, item: &str) {
        if self.json {
            return;
        }
        println!("  {} {}", style("•").dim(), item);
    }

    /// Print a table row.
    pub fn table_row(&self, cols: &[&str], widths: &[usize]) {
        if self.json {
            return;
        }
        let formatted: Vec<String> = cols
            .iter()
            .zip(widths.iter())
            .map(|(col, width)| format!("{:width$}", col, width = width))
            .collect();
        println!("  {}", formatted.join("  "));
    }

    /// Render a toast. In JSON mode toasts go to stderr as JSON lines so
    /// stdout stays a single document.
    pub fn toast(&self, notification: &Notification) {
        if self.json {
            eprintln!("{}", notification.to_json());
            return;
        }
        let text = notification.to_human();
        match notification.kind {
            NotificationKind::Success => eprintln!("{}", style(text).green()),
            NotificationKind::Error => eprintln!("{}", style(text).red()),
        }
    }

    /// Print the subtotal / tax / delivery / total block.
    pub fn summary(&self, summary: &OrderSummary, tax_rate: f64) {
        if self.json {
            return;
        }
        let width = self.label_width();
        let row = |label: &str, value: String| {
            println!("  {:width$} {:>10}", label, value, width = width);
        };
        row(&format!("Subtotal ({} items)", summary.item_count), summary.subtotal.display());
        row(&format!("Tax ({:.0}%)", tax_rate * 100.0), summary.tax.display());
        row("Delivery Fee", summary.delivery_fee.display());
        println!(
            "  {:width$} {:>10}",
            style("Total").bold(),
            style(summary.total.display()).bold(),
            width = width
        );
    }

    /// Create a spinner for indeterminate progress.
    pub fn spinner(&self, msg: &str) -> ProgressBar {
        if self.json {
            return ProgressBar::hidden();
        }

        let pb = ProgressBar::new_spinner();
        let style = ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg} [{elapsed}]")
            .unwrap_or_else(|_| ProgressStyle::default_spinner());
        pb.set_style(style);
        pb.set_message(msg.to_string());
        pb.enable_steady_tick(Duration::from_millis(100));
        pb
    }

    /// Check if JSON mode is enabled.
    pub fn is_json(&self) -> bool {
        self.json
    }

    /// Whether prompts can be shown.
    pub fn is_interactive(&self) -> bool {
        !self.json && self.term.is_term()
    }

    fn label_width(&self) -> usize {
        let (_, cols) = self.term.size();
        usize::from(cols).clamp(40, 60) - 14
    }
}

/// Format a duration in seconds, e.g. `3s` or `1.5s`.
pub fn format_secs(duration: Duration) -> String {
    let secs = duration.as_secs_f64();
    if secs.fract() == 0.0 {
        format!("{}s", secs as u64)
    } else {
        format!("{:.1}s", secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_secs() {
        assert_eq!(format_secs(Duration::from_secs(3)), "3s");
        assert_eq!(format_secs(Duration::from_millis(1500)), "1.5s");
    }
}
