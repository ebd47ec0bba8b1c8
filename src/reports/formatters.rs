use crate::types::CousinReport;
use anyhow::Result;

/// Trait for report formatters
pub trait ReportFormatter {
    fn format(&self, reports: &[CousinReport]) -> Result<String>;
}

/// One sentence per classified pair
pub struct TextFormatter;

impl ReportFormatter for TextFormatter {
    fn format(&self, reports: &[CousinReport]) -> Result<String> {
        Ok(reports
            .iter()
            .map(CousinReport::sentence)
            .collect::<Vec<_>>()
            .join("\n"))
    }
}

/// JSON formatter
pub struct JsonFormatter;

impl ReportFormatter for JsonFormatter {
    fn format(&self, reports: &[CousinReport]) -> Result<String> {
        Ok(serde_json::to_string_pretty(reports)?)
    }
}

/// Markdown table formatter
pub struct MarkdownFormatter;

impl ReportFormatter for MarkdownFormatter {
    fn format(&self, reports: &[CousinReport]) -> Result<String> {
        let mut table = String::from("| A | B | Degree | Removed | Relationship |\n");
        table.push_str("|---|---|---|---|---|\n");

        for report in reports {
            table.push_str(&format!(
                "| {} | {} | {} | {} | {} cousin {} removed |\n",
                report.a, report.b, report.degree, report.removed, report.ordinal, report.removed
            ));
        }

        Ok(table)
    }
}
