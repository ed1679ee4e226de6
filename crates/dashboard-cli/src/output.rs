//! Output formatting utilities

use clap::ValueEnum;
use colored::Colorize;
use serde::Serialize;
use tabled::{settings::Style, Table, Tabled};

/// Output format for CLI commands
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    /// Table format (default)
    #[default]
    Table,
    /// JSON format
    Json,
}

/// Print a table from a list of items
pub fn print_table<T: Tabled + Serialize>(items: &[T], format: OutputFormat) {
    match format {
        OutputFormat::Table => {
            if items.is_empty() {
                println!("{}", "No data".yellow());
                return;
            }
            let table = Table::new(items).with(Style::rounded()).to_string();
            println!("{}", table);
        }
        OutputFormat::Json => {
            if let Ok(json) = serde_json::to_string_pretty(&items) {
                println!("{}", json);
            }
        }
    }
}

/// Print a success message
pub fn print_success(message: &str) {
    println!("{} {}", "✓".green().bold(), message);
}

/// Print an error message
pub fn print_error(message: &str) {
    eprintln!("{} {}", "✗".red().bold(), message);
}

/// Print a warning message
pub fn print_warning(message: &str) {
    println!("{} {}", "⚠".yellow().bold(), message);
}

/// Print an info message
pub fn print_info(message: &str) {
    println!("{} {}", "ℹ".blue().bold(), message);
}

/// Format a parameter count as an approximate model size, assuming float32
pub fn format_model_size(param_count: u64) -> String {
    let size_mb = (param_count * 4) as f64 / (1024.0 * 1024.0);
    if size_mb < 1.0 {
        format!("{:.0}KB", size_mb * 1024.0)
    } else {
        format!("{size_mb:.1}MB")
    }
}

/// Format confidence as percentage
pub fn format_confidence(confidence: f64) -> String {
    format!("{:.1}%", confidence * 100.0)
}

/// Color a correct/incorrect marker
pub fn color_correct(correct: bool) -> String {
    if correct {
        "correct".green().to_string()
    } else {
        "incorrect".red().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn model_size_scales_units() {
        // 1000 params * 4 bytes is well under a megabyte
        assert_eq!(format_model_size(1_000), "4KB");
        assert_eq!(format_model_size(1_000_000), "3.8MB");
    }

    #[test]
    fn confidence_formats_as_percent() {
        assert_eq!(format_confidence(0.875), "87.5%");
    }
}
