use crate::application::dto::AuditResponse;
use crate::ownership::domain::{AdvisoryOutcome, Ownership, TriagedAdvisory};
use crate::ports::outbound::ReportFormatter;
use crate::shared::Result;
use owo_colors::OwoColorize;
use std::fmt::Write;

/// TextReportFormatter adapter producing a human-readable report
///
/// Colors are opt-in so that reports written to files stay plain text.
pub struct TextReportFormatter {
    color: bool,
}

impl TextReportFormatter {
    pub fn new() -> Self {
        Self { color: false }
    }

    pub fn with_color(color: bool) -> Self {
        Self { color }
    }

    fn heading(&self, text: &str) -> String {
        if self.color {
            text.bold().to_string()
        } else {
            text.to_string()
        }
    }

    fn danger(&self, text: &str) -> String {
        if self.color {
            text.red().bold().to_string()
        } else {
            text.to_string()
        }
    }

    fn success(&self, text: &str) -> String {
        if self.color {
            text.green().bold().to_string()
        } else {
            text.to_string()
        }
    }

    fn muted(&self, text: &str) -> String {
        if self.color {
            text.dimmed().to_string()
        } else {
            text.to_string()
        }
    }

    fn render_overview(&self, out: &mut String, response: &AuditResponse) -> std::fmt::Result {
        let title = match &response.project_name {
            Some(name) => format!("Platform audit report: {}", name),
            None => "Platform audit report".to_string(),
        };
        writeln!(out, "{}", self.heading(&title))?;
        writeln!(out, "{}", "=".repeat(title.chars().count()))?;
        writeln!(out)?;

        writeln!(
            out,
            "Packages: {} installed, {} classified, {} unreachable from any root",
            response.package_count,
            response.ownership.len(),
            response.unclassified_count()
        )?;

        let roots = if response.platform_roots.is_empty() {
            self.muted("(none)")
        } else {
            response.platform_roots.join(", ")
        };
        writeln!(out, "Platform roots: {}", roots)?;

        if !response.missing_platform_roots.is_empty() {
            writeln!(
                out,
                "Missing platform roots: {}",
                response.missing_platform_roots.join(", ")
            )?;
        }
        writeln!(out)
    }

    fn render_ownership(&self, out: &mut String, response: &AuditResponse) -> std::fmt::Result {
        writeln!(out, "{}", self.heading("Ownership"))?;
        for (ownership, count) in response.ownership_counts() {
            writeln!(out, "  {:<18}{:>5}", ownership.as_str(), count)?;
        }
        writeln!(out)?;

        let platform_only = response.packages_with(Ownership::PlatformOnly);
        if !platform_only.is_empty() {
            writeln!(
                out,
                "{}",
                self.heading("Platform-only packages (advisories do not block)")
            )?;
            for name in platform_only {
                writeln!(out, "  - {}", name)?;
            }
            writeln!(out)?;
        }
        Ok(())
    }

    fn render_advisory(
        &self,
        out: &mut String,
        advisory: &TriagedAdvisory,
        note: Option<&str>,
    ) -> std::fmt::Result {
        let ownership = advisory
            .ownership
            .map_or("unclassified", Ownership::as_str);
        write!(
            out,
            "    - {}  {} {} [{}] {}",
            advisory.id, advisory.package_name, advisory.version, ownership, advisory.reason
        )?;
        if let Some(note) = note {
            write!(out, " {}", self.muted(&format!("(ignored: {})", note)))?;
        }
        writeln!(out)
    }

    fn render_advisories(&self, out: &mut String, response: &AuditResponse) -> std::fmt::Result {
        writeln!(out, "{}", self.heading("Advisories"))?;

        let Some(outcome) = &response.advisory_outcome else {
            writeln!(out, "  {}", self.muted("not checked"))?;
            return Ok(());
        };

        if outcome.total() == 0 {
            writeln!(out, "  No known advisories affect the installed packages.")?;
        }

        let AdvisoryOutcome {
            blocking,
            accepted,
            ignored,
        } = outcome;

        if !blocking.is_empty() {
            let label = format!("  Blocking ({}):", blocking.len());
            writeln!(out, "{}", self.danger(&label))?;
            for advisory in blocking {
                self.render_advisory(out, advisory, None)?;
            }
        }

        if !accepted.is_empty() {
            writeln!(out, "  Accepted risk, platform-only ({}):", accepted.len())?;
            for advisory in accepted {
                self.render_advisory(out, advisory, None)?;
            }
        }

        if !ignored.is_empty() {
            writeln!(out, "  Ignored ({}):", ignored.len())?;
            for advisory in ignored {
                let reason = response.ignore_reasons.get(&advisory.id).map(String::as_str);
                self.render_advisory(out, advisory, reason)?;
            }
        }

        writeln!(out)?;
        if outcome.is_blocking() {
            writeln!(out, "Result: {}", self.danger("BLOCKED"))
        } else {
            writeln!(out, "Result: {}", self.success("OK"))
        }
    }
}

impl Default for TextReportFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportFormatter for TextReportFormatter {
    fn format(&self, response: &AuditResponse) -> Result<String> {
        let mut out = String::new();
        self.render_overview(&mut out, response)?;
        self.render_ownership(&mut out, response)?;
        self.render_advisories(&mut out, response)?;
        Ok(out)
    }
}
