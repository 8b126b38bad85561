//! Format generation reports and sanitizer output as text or JSON.

use crate::error::ApiError;
use crate::generate::GenerationReport;
use comfy_table::presets::UTF8_BORDERS_ONLY;
use comfy_table::Table;
use owo_colors::OwoColorize;

/// Format a section heading with bold/underline.
pub fn format_section_heading(title: &str) -> String {
    format!("{}", title.bold().underline())
}

/// Human-readable summary of one generation run.
pub fn format_report_text(title: &str, report: &GenerationReport) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}\n\n", format_section_heading(title)));
    out.push_str(&format!("  Class: {}\n", report.class_name));
    out.push_str(&format!("  Output: {}\n", report.output_file.display()));
    out.push_str(&format!("  Fields: {}\n", report.field_count));
    out.push_str(&format!("  Classes: {}\n", report.class_count));
    out.push_str(&format!("  Duration: {} ms\n", report.duration_ms));

    if report.skipped.is_empty() {
        return out;
    }
    out.push_str(&format!(
        "\n{}\n\n",
        format_section_heading("Skipped names")
    ));
    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_header(vec!["Scope", "Name", "Reason"]);
    for skipped in &report.skipped {
        table.add_row(vec![
            skipped.scope.clone(),
            skipped.name.clone(),
            skipped.reason.as_str().to_string(),
        ]);
    }
    out.push_str(&format!("{}\n", table));
    out
}

pub fn format_report_json(report: &GenerationReport) -> Result<String, ApiError> {
    serde_json::to_string_pretty(report).map_err(|e| ApiError::Serialization(e.to_string()))
}

/// One line per input: `input -> identifier`, or `<none>` when it cannot be fixed.
pub fn format_sanitized_text(results: &[(String, Option<String>)]) -> String {
    results
        .iter()
        .map(|(input, output)| {
            format!("{} -> {}", input, output.as_deref().unwrap_or("<none>"))
        })
        .collect::<Vec<_>>()
        .join("\n")
}
