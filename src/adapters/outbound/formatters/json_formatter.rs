use crate::application::dto::AuditResponse;
use crate::ownership::domain::{AdvisoryOutcome, Ownership, TriagedAdvisory};
use crate::ports::outbound::ReportFormatter;
use crate::shared::Result;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Serialize)]
struct Report<'a> {
    tool: Tool,
    generated_at: String,
    project: Option<&'a str>,
    summary: Summary,
    platform_roots: &'a [String],
    missing_platform_roots: &'a [String],
    direct_requires: &'a [String],
    packages: &'a BTreeMap<String, Ownership>,
    #[serde(skip_serializing_if = "Option::is_none")]
    advisories: Option<Advisories<'a>>,
}

#[derive(Debug, Serialize)]
struct Tool {
    name: &'static str,
    version: &'static str,
}

#[derive(Debug, Serialize)]
struct Summary {
    packages: usize,
    unclassified: usize,
    ownership: BTreeMap<&'static str, usize>,
    advisories_checked: bool,
    blocking: bool,
}

#[derive(Debug, Serialize)]
struct Advisories<'a> {
    blocking: &'a [TriagedAdvisory],
    accepted: &'a [TriagedAdvisory],
    ignored: Vec<IgnoredAdvisory<'a>>,
}

#[derive(Debug, Serialize)]
struct IgnoredAdvisory<'a> {
    #[serde(flatten)]
    advisory: &'a TriagedAdvisory,
    #[serde(skip_serializing_if = "Option::is_none")]
    ignore_reason: Option<&'a str>,
}

/// JsonReportFormatter adapter producing a pretty-printed JSON report
pub struct JsonReportFormatter {
    timestamp: Option<DateTime<Utc>>,
}

impl JsonReportFormatter {
    pub fn new() -> Self {
        Self { timestamp: None }
    }

    /// Pins `generated_at` instead of using the current time
    pub fn with_timestamp(timestamp: DateTime<Utc>) -> Self {
        Self {
            timestamp: Some(timestamp),
        }
    }

    fn advisories<'a>(
        outcome: &'a AdvisoryOutcome,
        reasons: &'a BTreeMap<String, String>,
    ) -> Advisories<'a> {
        Advisories {
            blocking: &outcome.blocking,
            accepted: &outcome.accepted,
            ignored: outcome
                .ignored
                .iter()
                .map(|advisory| IgnoredAdvisory {
                    advisory,
                    ignore_reason: reasons.get(&advisory.id).map(String::as_str),
                })
                .collect(),
        }
    }
}

impl Default for JsonReportFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportFormatter for JsonReportFormatter {
    fn format(&self, response: &AuditResponse) -> Result<String> {
        let generated_at = self
            .timestamp
            .unwrap_or_else(Utc::now)
            .to_rfc3339_opts(SecondsFormat::Secs, true);

        let report = Report {
            tool: Tool {
                name: env!("CARGO_PKG_NAME"),
                version: env!("CARGO_PKG_VERSION"),
            },
            generated_at,
            project: response.project_name.as_deref(),
            summary: Summary {
                packages: response.package_count,
                unclassified: response.unclassified_count(),
                ownership: response
                    .ownership_counts()
                    .into_iter()
                    .map(|(ownership, count)| (ownership.as_str(), count))
                    .collect(),
                advisories_checked: response.advisory_outcome.is_some(),
                blocking: response.is_blocking(),
            },
            platform_roots: &response.platform_roots,
            missing_platform_roots: &response.missing_platform_roots,
            direct_requires: &response.direct_requires,
            packages: &response.ownership,
            advisories: response
                .advisory_outcome
                .as_ref()
                .map(|outcome| Self::advisories(outcome, &response.ignore_reasons)),
        };

        let mut json = serde_json::to_string_pretty(&report)?;
        json.push('\n');
        Ok(json)
    }
}
