//! CLI output formatting for all pipeline tasks.
//!
//! Output is information-centric: the primary display for every entity is
//! its semantic identity — what was produced and how big it is — with
//! filesystem paths shown as secondary context via indented `Source:` and
//! `Dest:` lines.
//!
//! Each task has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure — no I/O, no side effects.
//!
//! ```text
//! Styles
//! 001 main.css (2.1 KB)
//!     Source: sass/main.scss
//!     Dest: assets/css/main.css
//!     Dest: _site/assets/css/main.css
//!
//! Images
//! 001 header.jpg (encoded, 184.2 KB → 96.0 KB)
//! 002 icons/dot.png (cached, 1.1 KB)
//! Cache: 1 hits, 1 misses
//! ```

use crate::images::ImageReport;
use crate::scripts::ScriptReport;
use crate::styles::{StyleReport, css_filename};

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Human-readable byte count: `512 B`, `2.1 KB`, `3.4 MB`.
fn format_bytes(bytes: u64) -> String {
    const KB: f64 = 1024.0;
    const MB: f64 = KB * 1024.0;
    let b = bytes as f64;
    if b >= MB {
        format!("{:.1} MB", b / MB)
    } else if b >= KB {
        format!("{:.1} KB", b / KB)
    } else {
        format!("{bytes} B")
    }
}

// ============================================================================
// Styles
// ============================================================================

pub fn format_style_report(report: &StyleReport) -> Vec<String> {
    let mut lines = vec!["Styles".to_string()];
    lines.push(format!(
        "{} {} ({}{})",
        format_index(1),
        css_filename(&report.entry),
        format_bytes(report.css_bytes as u64),
        if report.compressed { ", compressed" } else { "" },
    ));
    lines.push(format!("    Source: {}", report.entry.display()));
    for dest in &report.dests {
        lines.push(format!("    Dest: {}", dest.display()));
    }
    lines
}

pub fn print_style_report(report: &StyleReport) {
    for line in format_style_report(report) {
        println!("{line}");
    }
}

// ============================================================================
// Scripts
// ============================================================================

pub fn format_script_report(report: &ScriptReport) -> Vec<String> {
    let mut lines = vec!["Scripts".to_string()];
    let detail = if report.minified {
        format!(
            "minified, {} from {}",
            format_bytes(report.bundled_bytes as u64),
            format_bytes(report.raw_bytes as u64),
        )
    } else {
        format_bytes(report.bundled_bytes as u64)
    };
    lines.push(format!(
        "{} {} sources → 1 bundle ({detail})",
        format_index(1),
        report.sources.len(),
    ));
    for source in &report.sources {
        lines.push(format!("    Source: {}", source.display()));
    }
    for dest in &report.dests {
        lines.push(format!("    Dest: {}", dest.display()));
    }
    lines
}

pub fn print_script_report(report: &ScriptReport) {
    for line in format_script_report(report) {
        println!("{line}");
    }
}

// ============================================================================
// Images
// ============================================================================

pub fn format_image_report(report: &ImageReport) -> Vec<String> {
    let mut lines = vec!["Images".to_string()];
    if report.outcomes.is_empty() && report.failures.is_empty() {
        lines.push("    (no image sources)".to_string());
        return lines;
    }

    for (i, outcome) in report.outcomes.iter().enumerate() {
        let sizes = if outcome.bytes_out == outcome.bytes_in {
            format_bytes(outcome.bytes_in)
        } else {
            format!(
                "{} → {}",
                format_bytes(outcome.bytes_in),
                format_bytes(outcome.bytes_out),
            )
        };
        lines.push(format!(
            "{} {} ({}, {sizes})",
            format_index(i + 1),
            outcome.path.display(),
            outcome.action.label(),
        ));
    }

    if !report.failures.is_empty() {
        lines.push("Failures".to_string());
        for (i, failure) in report.failures.iter().enumerate() {
            lines.push(format!(
                "{} {}: {}",
                format_index(i + 1),
                failure.path.display(),
                failure.message,
            ));
        }
    }

    lines.push(format!("Cache: {}", report.cache));
    lines
}

pub fn print_image_report(report: &ImageReport) {
    for line in format_image_report(report) {
        println!("{line}");
    }
}

// ============================================================================
// Check
// ============================================================================

/// Summary data for the `check` command.
#[derive(Debug)]
pub struct CheckSummary {
    pub styles_entry_found: bool,
    pub script_count: usize,
    pub image_count: usize,
    pub generator_command: String,
}

pub fn format_check_summary(summary: &CheckSummary) -> Vec<String> {
    vec![
        format!(
            "Styles: entrypoint {}",
            if summary.styles_entry_found {
                "found"
            } else {
                "MISSING"
            }
        ),
        format!("Scripts: {} sources", summary.script_count),
        format!("Images: {} sources", summary.image_count),
        format!("Generator: {}", summary.generator_command),
    ]
}

pub fn print_check_summary(summary: &CheckSummary) {
    for line in format_check_summary(summary) {
        println!("{line}");
    }
}
