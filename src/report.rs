//! Report formatting and printing utilities.
//!
//! Displays the failures of a filtered batch in cargo-style format. Kept
//! apart from the driver so the checks can run without printing anything.

use std::io::{self, Write};

use colored::Colorize;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::filter::{FilterSummary, FlaggedUnit};
use crate::issues::{Failure, Severity};

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

/// Failure mark for consistent output formatting.
pub const FAILURE_MARK: &str = "\u{2718}"; // ✘

/// Strings wider than this are cut in the note lines.
const MAX_TEXT_WIDTH: usize = 60;

/// Print the failures of a batch in cargo-style format to stdout.
///
/// # Example
///
/// ```ignore
/// use pofilter::report::report;
///
/// let summary = filter.filter_units(&mut units)?;
/// report(&summary);
/// ```
pub fn report(summary: &FilterSummary) {
    report_to(summary, &mut io::stdout().lock());
}

/// Print the failures of a batch to a custom writer.
///
/// Useful for testing or redirecting output.
pub fn report_to<W: Write>(summary: &FilterSummary, writer: &mut W) {
    if summary.is_clean() {
        return;
    }

    for unit in &summary.flagged {
        for failure in &unit.failures {
            print_failure(unit, failure, writer);
        }
    }

    print_summary(summary, writer);
}

/// Print a success message when no unit failed.
pub fn print_success(units_checked: usize) {
    print_success_to(units_checked, &mut io::stdout().lock());
}

/// Print a success message to a custom writer.
pub fn print_success_to<W: Write>(units_checked: usize, writer: &mut W) {
    let msg = format!(
        "{} {}",
        SUCCESS_MARK.green(),
        format!(
            "Checked {} {} - no issues found",
            units_checked,
            if units_checked == 1 { "unit" } else { "units" }
        )
        .green()
    );
    let _ = writeln!(writer, "{}", msg);
}

// ============================================================
// Internal Functions
// ============================================================

fn print_failure<W: Write>(unit: &FlaggedUnit, failure: &Failure, writer: &mut W) {
    let severity_str = match failure.severity {
        Severity::Error => "error".bold().red(),
        Severity::Warning => "warning".bold().yellow(),
    };

    let _ = writeln!(
        writer,
        "{}: \"{}\"  {}",
        severity_str,
        failure.message,
        failure.rule.dimmed().cyan()
    );
    let _ = writeln!(writer, "  {} unit #{}", "-->".blue(), unit.index);
    let _ = writeln!(writer, "   {}", "|".blue());
    let _ = writeln!(
        writer,
        "   {} {} source: \"{}\"",
        "=".blue(),
        "note:".bold(),
        truncate(&unit.source, MAX_TEXT_WIDTH)
    );
    let _ = writeln!(
        writer,
        "   {} {} target: \"{}\"",
        "=".blue(),
        "note:".bold(),
        truncate(&unit.target, MAX_TEXT_WIDTH)
    );

    let _ = writeln!(writer); // Empty line between failures
}

fn print_summary<W: Write>(summary: &FilterSummary, writer: &mut W) {
    let total_errors = summary.serious_count();
    let total_warnings = summary.failure_count() - total_errors;
    let total_problems = total_errors + total_warnings;

    if total_problems > 0 {
        let _ = writeln!(
            writer,
            "{} {} problems ({} {}, {} {}) in {} of {} units",
            FAILURE_MARK.red(),
            total_problems,
            total_errors,
            if total_errors == 1 { "error" } else { "errors" }.red(),
            total_warnings,
            if total_warnings == 1 {
                "warning"
            } else {
                "warnings"
            }
            .yellow(),
            summary.flagged.len(),
            summary.units_checked
        );
    }
}

/// Cuts `text` to at most `max_width` display columns, ending in `…` when cut.
/// Newlines and tabs are shown escaped so each note stays on one line.
fn truncate(text: &str, max_width: usize) -> String {
    let escaped = text.replace('\n', "\\n").replace('\t', "\\t");
    if UnicodeWidthStr::width(escaped.as_str()) <= max_width {
        return escaped;
    }

    let mut result = String::new();
    let mut width = 0;
    for c in escaped.chars() {
        let char_width = c.width().unwrap_or(0);
        if width + char_width + 1 > max_width {
            break;
        }
        width += char_width;
        result.push(c);
    }
    result.push('…');
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strip_ansi(s: &str) -> String {
        let mut result = String::new();
        let mut chars = s.chars().peekable();
        while let Some(c) = chars.next() {
            if c == '\x1b' {
                // Skip until 'm'
                while let Some(&next) = chars.peek() {
                    chars.next();
                    if next == 'm' {
                        break;
                    }
                }
            } else {
                result.push(c);
            }
        }
        result
    }

    fn render(summary: &FilterSummary) -> String {
        let mut output = Vec::new();
        report_to(summary, &mut output);
        strip_ansi(&String::from_utf8(output).unwrap())
    }

    fn flagged(index: usize, source: &str, target: &str, failures: Vec<Failure>) -> FlaggedUnit {
        FlaggedUnit {
            index,
            source: source.to_string(),
            target: target.to_string(),
            failures,
        }
    }

    #[test]
    fn test_report_clean_summary_prints_nothing() {
        let summary = FilterSummary {
            units_checked: 4,
            flagged: Vec::new(),
        };
        assert!(render(&summary).is_empty());
    }

    #[test]
    fn test_report_warning() {
        let summary = FilterSummary {
            units_checked: 3,
            flagged: vec![flagged(
                2,
                "test",
                "REST",
                vec![Failure::new("simplecaps", "different capitalization")],
            )],
        };

        let output = render(&summary);
        assert!(output.contains("warning: \"different capitalization\"  simplecaps"));
        assert!(output.contains("--> unit #2"));
        assert!(output.contains("note: source: \"test\""));
        assert!(output.contains("note: target: \"REST\""));
        assert!(output.contains("1 problems (0 errors, 1 warning) in 1 of 3 units"));
    }

    #[test]
    fn test_report_serious_failure_is_error() {
        let summary = FilterSummary {
            units_checked: 1,
            flagged: vec![flagged(
                0,
                "Open %s",
                "Maak oop",
                vec![
                    Failure::serious("variables", "do not translate: s"),
                    Failure::new("printf", "original has 1 format specifier(s), translation has 0"),
                ],
            )],
        };

        let output = render(&summary);
        assert!(output.contains("error: \"do not translate: s\"  variables"));
        assert!(output.contains("warning: \"original has 1"));
        assert!(output.contains("2 problems (1 error, 1 warning)"));
    }

    #[test]
    fn test_report_escapes_newlines_in_notes() {
        let summary = FilterSummary {
            units_checked: 1,
            flagged: vec![flagged(
                0,
                "One\nTwo",
                "Een Twee",
                vec![Failure::new("newlines", "line endings differ")],
            )],
        };
        assert!(render(&summary).contains("source: \"One\\nTwo\""));
    }

    #[test]
    fn test_truncate_by_display_width() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("abcdefghijkl", 5), "abcd…");
        // Each CJK character is two columns wide.
        assert_eq!(truncate("日本語のテキスト", 7), "日本語…");
    }

    #[test]
    fn test_print_success() {
        let mut output = Vec::new();
        print_success_to(5, &mut output);
        let output = strip_ansi(&String::from_utf8(output).unwrap());
        assert!(output.contains(SUCCESS_MARK));
        assert!(output.contains("Checked 5 units - no issues found"));

        let mut output = Vec::new();
        print_success_to(1, &mut output);
        assert!(strip_ansi(&String::from_utf8(output).unwrap()).contains("Checked 1 unit -"));
    }
}
