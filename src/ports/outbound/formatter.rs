use crate::application::dto::AuditResponse;
use crate::shared::Result;

/// ReportFormatter port for rendering an audit result
pub trait ReportFormatter {
    /// Formats the audit response
    ///
    /// # Errors
    /// Returns an error if serialization fails
    fn format(&self, response: &AuditResponse) -> Result<String>;
}
