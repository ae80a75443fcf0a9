use crate::shared::Result;
use std::cmp::Ordering;

/// Release stability, ordered from least to most mature
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Stability {
    Dev,
    Alpha,
    Beta,
    ReleaseCandidate,
    Stable,
    Patch,
}

impl Stability {
    /// Parses a suffix such as `beta2`, `RC.1` or `p3` into stability and number
    fn parse(suffix: &str) -> Option<(Self, u64)> {
        if suffix.is_empty() {
            return Some((Stability::Stable, 0));
        }

        let lower = suffix.to_ascii_lowercase();
        let letters: String = lower.chars().take_while(|c| c.is_ascii_alphabetic()).collect();
        let rest = lower[letters.len()..].trim_start_matches(['.', '-', '_']);
        let digits: String = rest.chars().take_while(|c| c.is_ascii_digit()).collect();
        let number = if digits.is_empty() { 0 } else { digits.parse().ok()? };

        let stability = match letters.as_str() {
            "dev" => Stability::Dev,
            "alpha" | "a" => Stability::Alpha,
            "beta" | "b" => Stability::Beta,
            "rc" => Stability::ReleaseCandidate,
            "stable" => Stability::Stable,
            "patch" | "pl" | "p" => Stability::Patch,
            _ => return None,
        };

        Some((stability, number))
    }
}

/// A locked Composer version, comparable against advisory ranges
///
/// Up to four numeric components (missing ones are zero) followed by an
/// optional stability suffix. Branch versions (`dev-main`, `1.x-dev`) have
/// no position on the version line and do not parse.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct ComposerVersion {
    parts: [u64; 4],
    stability: Stability,
    stability_number: u64,
}

impl ComposerVersion {
    pub fn parse(input: &str) -> Option<Self> {
        let trimmed = input.trim();
        let s = trimmed.strip_prefix(['v', 'V']).unwrap_or(trimmed);

        if s.is_empty() || s.starts_with("dev-") || s.contains(['x', 'X', '*']) {
            return None;
        }

        let (numeric, suffix) = match s.find(|c: char| !(c.is_ascii_digit() || c == '.')) {
            Some(idx) => (&s[..idx], &s[idx..]),
            None => (s, ""),
        };

        let numeric = numeric.trim_end_matches('.');
        if numeric.is_empty() {
            return None;
        }

        let components: Vec<&str> = numeric.split('.').collect();
        if components.len() > 4 {
            return None;
        }

        let mut parts = [0u64; 4];
        for (slot, component) in parts.iter_mut().zip(&components) {
            *slot = component.parse().ok()?;
        }

        // build metadata never affects precedence
        let suffix = suffix.split('+').next().unwrap_or("");
        let suffix = suffix.trim_start_matches(['-', '.', '_']);
        let (stability, stability_number) = Stability::parse(suffix)?;

        Some(Self {
            parts,
            stability,
            stability_number,
        })
    }

    fn lowest() -> Self {
        Self {
            parts: [0; 4],
            stability: Stability::Dev,
            stability_number: 0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Operator {
    GreaterThan,
    GreaterOrEqual,
    LessThan,
    LessOrEqual,
    Equal,
    NotEqual,
}

impl Operator {
    /// Splits a leading operator off a token; bare versions mean equality
    fn split(token: &str) -> (Self, &str) {
        const OPERATORS: [(&str, Operator); 8] = [
            (">=", Operator::GreaterOrEqual),
            ("<=", Operator::LessOrEqual),
            ("==", Operator::Equal),
            ("!=", Operator::NotEqual),
            ("<>", Operator::NotEqual),
            (">", Operator::GreaterThan),
            ("<", Operator::LessThan),
            ("=", Operator::Equal),
        ];

        OPERATORS
            .iter()
            .find_map(|(prefix, op)| token.strip_prefix(prefix).map(|rest| (*op, rest)))
            .unwrap_or((Operator::Equal, token))
    }

    fn accepts(self, ordering: Ordering) -> bool {
        match self {
            Operator::GreaterThan => ordering == Ordering::Greater,
            Operator::GreaterOrEqual => ordering != Ordering::Less,
            Operator::LessThan => ordering == Ordering::Less,
            Operator::LessOrEqual => ordering != Ordering::Greater,
            Operator::Equal => ordering == Ordering::Equal,
            Operator::NotEqual => ordering != Ordering::Equal,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Comparison {
    operator: Operator,
    version: ComposerVersion,
}

impl Comparison {
    fn parse(token: &str) -> Result<Self> {
        if token == "*" {
            return Ok(Self {
                operator: Operator::GreaterOrEqual,
                version: ComposerVersion::lowest(),
            });
        }

        let (operator, version) = Operator::split(token);
        let version = ComposerVersion::parse(version).ok_or_else(|| {
            anyhow::anyhow!("Invalid version '{}' in constraint term '{}'", version, token)
        })?;

        Ok(Self { operator, version })
    }

    fn matches(&self, version: &ComposerVersion) -> bool {
        self.operator.accepts(version.cmp(&self.version))
    }
}

/// An affected-versions range as published in security advisories
///
/// Grammar: alternatives separated by `|` (or `||`), each a conjunction of
/// comparisons separated by `,` or whitespace, e.g.
/// `>=8.0.0,<8.9.20|>=9.0.0,<9.0.5`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionConstraint {
    alternatives: Vec<Vec<Comparison>>,
}

impl VersionConstraint {
    pub fn parse(input: &str) -> Result<Self> {
        let alternatives = input
            .split('|')
            .map(str::trim)
            .filter(|group| !group.is_empty())
            .map(Self::parse_conjunction)
            .collect::<Result<Vec<_>>>()?;

        if alternatives.is_empty() {
            anyhow::bail!("Version constraint '{}' is empty", input);
        }

        Ok(Self { alternatives })
    }

    fn parse_conjunction(group: &str) -> Result<Vec<Comparison>> {
        let normalized = group.replace(',', " ");
        let mut tokens: Vec<String> = Vec::new();
        let mut pending_operator: Option<&str> = None;

        // re-attach operators written with a space (">= 1.0")
        for token in normalized.split_whitespace() {
            if token.chars().all(|c| matches!(c, '<' | '>' | '=' | '!')) {
                pending_operator = Some(token);
                continue;
            }
            match pending_operator.take() {
                Some(op) => tokens.push(format!("{}{}", op, token)),
                None => tokens.push(token.to_string()),
            }
        }

        if let Some(op) = pending_operator {
            anyhow::bail!("Dangling operator '{}' in constraint '{}'", op, group);
        }

        tokens.iter().map(|t| Comparison::parse(t)).collect()
    }

    /// Whether the installed `version` lies inside this range
    ///
    /// Versions that cannot be placed on the version line never match.
    pub fn satisfied_by(&self, version: &str) -> bool {
        let Some(version) = ComposerVersion::parse(version) else {
            return false;
        };

        self.alternatives
            .iter()
            .any(|conjunction| conjunction.iter().all(|c| c.matches(&version)))
    }
}
