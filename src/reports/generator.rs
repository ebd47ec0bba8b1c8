use crate::reports::formatters::{JsonFormatter, MarkdownFormatter, ReportFormatter, TextFormatter};
use crate::types::CousinReport;
use anyhow::Result;
use std::str::FromStr;

/// Output formats understood by the report generator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    Text,
    Json,
    Markdown,
}

impl FromStr for ReportFormat {
    type Err = anyhow::Error;

    fn from_str(format: &str) -> Result<Self> {
        match format.to_lowercase().as_str() {
            "text" => Ok(ReportFormat::Text),
            "json" => Ok(ReportFormat::Json),
            "markdown" | "md" => Ok(ReportFormat::Markdown),
            _ => Err(anyhow::anyhow!("Unsupported format: {}", format)),
        }
    }
}

/// Report generator for cousin classifications
pub struct ReportGenerator;

impl ReportGenerator {
    pub fn new() -> Self {
        Self
    }

    /// Generate report in the specified format
    pub fn generate(&self, reports: &[CousinReport], format: &str) -> Result<String> {
        self.generate_as(reports, format.parse()?)
    }

    pub fn generate_as(&self, reports: &[CousinReport], format: ReportFormat) -> Result<String> {
        let formatter: &dyn ReportFormatter = match format {
            ReportFormat::Text => &TextFormatter,
            ReportFormat::Json => &JsonFormatter,
            ReportFormat::Markdown => &MarkdownFormatter,
        };
        formatter.format(reports)
    }
}

impl Default for ReportGenerator {
    fn default() -> Self {
        Self::new()
    }
}
