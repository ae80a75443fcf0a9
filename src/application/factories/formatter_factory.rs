use crate::adapters::outbound::formatters::{JsonReportFormatter, TextReportFormatter};
use crate::application::dto::OutputFormat;
use crate::ports::outbound::ReportFormatter;

/// Factory for creating report formatters
pub struct FormatterFactory;

impl FormatterFactory {
    /// Creates a formatter instance for the specified output format
    ///
    /// # Arguments
    /// * `format` - The output format
    /// * `color` - Whether the text report may use ANSI colors (ignored for JSON)
    ///
    /// # Examples
    /// ```
    /// use platform_audit::application::dto::OutputFormat;
    /// use platform_audit::application::factories::FormatterFactory;
    ///
    /// let formatter = FormatterFactory::create(OutputFormat::Json, false);
    /// ```
    pub fn create(format: OutputFormat, color: bool) -> Box<dyn ReportFormatter> {
        match format {
            OutputFormat::Json => Box::new(JsonReportFormatter::new()),
            OutputFormat::Text => Box::new(TextReportFormatter::with_color(color)),
        }
    }

    /// Returns the progress message for the specified output format
    ///
    /// # Examples
    /// ```
    /// use platform_audit::application::dto::OutputFormat;
    /// use platform_audit::application::factories::FormatterFactory;
    ///
    /// let message = FormatterFactory::progress_message(OutputFormat::Json);
    /// assert_eq!(message, "📝 Generating JSON report...");
    /// ```
    pub fn progress_message(format: OutputFormat) -> &'static str {
        match format {
            OutputFormat::Json => "📝 Generating JSON report...",
            OutputFormat::Text => "📝 Generating text report...",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::dto::AuditResponse;
    use std::collections::BTreeMap;

    fn empty_response() -> AuditResponse {
        AuditResponse {
            project_name: None,
            package_count: 0,
            ownership: BTreeMap::new(),
            platform_roots: vec![],
            direct_requires: vec![],
            missing_platform_roots: vec![],
            advisory_outcome: None,
            ignore_reasons: BTreeMap::new(),
        }
    }

    #[test]
    fn test_create_json_formatter() {
        let output = FormatterFactory::create(OutputFormat::Json, true)
            .format(&empty_response())
            .unwrap();
        assert!(output.trim_start().starts_with('{'));
    }

    #[test]
    fn test_create_text_formatter() {
        let output = FormatterFactory::create(OutputFormat::Text, false)
            .format(&empty_response())
            .unwrap();
        assert!(output.contains("Ownership"));
    }

    #[test]
    fn test_progress_messages() {
        assert_eq!(
            FormatterFactory::progress_message(OutputFormat::Json),
            "📝 Generating JSON report..."
        );
        assert_eq!(
            FormatterFactory::progress_message(OutputFormat::Text),
            "📝 Generating text report..."
        );
    }
}
