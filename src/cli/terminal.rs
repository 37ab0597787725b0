//! Terminal capability detection and colouring

use owo_colors::{OwoColorize, colors::css};
use srindex::Priority;

/// Detects whether colored output should be enabled
pub fn supports_color() -> bool {
    supports_color::on(supports_color::Stream::Stdout).is_some()
}

/// Extension trait for colorizing output
pub trait Colorize {
    /// Color as success (green)
    fn success(&self) -> String;
    /// Color as warning (amber)
    fn warning(&self) -> String;
    /// Color as urgent (red)
    fn urgent(&self) -> String;
    /// Dim the text
    fn dim(&self) -> String;
}

impl Colorize for str {
    fn success(&self) -> String {
        if supports_color() {
            self.fg::<css::Green>().to_string()
        } else {
            self.to_string()
        }
    }

    fn warning(&self) -> String {
        if supports_color() {
            self.fg::<css::Orange>().to_string()
        } else {
            self.to_string()
        }
    }

    fn urgent(&self) -> String {
        if supports_color() {
            self.fg::<css::Red>().bold().to_string()
        } else {
            self.to_string()
        }
    }

    fn dim(&self) -> String {
        if supports_color() {
            self.dimmed().to_string()
        } else {
            self.to_string()
        }
    }
}

impl Colorize for String {
    fn success(&self) -> String {
        self.as_str().success()
    }

    fn warning(&self) -> String {
        self.as_str().warning()
    }

    fn urgent(&self) -> String {
        self.as_str().urgent()
    }

    fn dim(&self) -> String {
        self.as_str().dim()
    }
}

/// Renders a priority level, coloured by urgency.
pub fn priority_label(priority: Priority) -> String {
    let label = format!("P{priority}");
    match priority.get() {
        1 => label.urgent(),
        2 => label.warning(),
        _ => label,
    }
}
