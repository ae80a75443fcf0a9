use crate::ownership::domain::PackageGraph;
use crate::shared::Result;
use std::collections::BTreeSet;

/// Maximum number of platform patterns to prevent DoS attacks
const MAX_PLATFORM_PATTERNS: usize = 64;

/// Maximum length of a single platform pattern
const MAX_PATTERN_LENGTH: usize = 255;

/// Result of platform detection over an installed graph
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformDetection {
    /// Installed packages identified as platform roots, sorted
    pub roots: Vec<String>,
    /// Patterns that matched no installed package
    pub unmatched_patterns: Vec<String>,
}

/// PlatformDetector - identifies platform (framework) packages
///
/// A package is a platform root when its name matches one of the glob
/// patterns (`*` matches zero or more characters) or its Composer package
/// type is one of the configured platform types (e.g. `drupal-core`).
/// Matching is case-insensitive.
#[derive(Debug)]
pub struct PlatformDetector {
    patterns: Vec<PlatformPattern>,
    types: BTreeSet<String>,
}

impl PlatformDetector {
    /// Creates a detector from raw pattern strings and package types
    ///
    /// # Errors
    /// - Too many patterns (> MAX_PLATFORM_PATTERNS)
    /// - Invalid pattern format (empty, too long, bad characters, only wildcards)
    pub fn new(patterns: Vec<String>, types: Vec<String>) -> Result<Self> {
        if patterns.len() > MAX_PLATFORM_PATTERNS {
            anyhow::bail!(
                "Too many platform patterns: {} (maximum: {})",
                patterns.len(),
                MAX_PLATFORM_PATTERNS
            );
        }

        let patterns = patterns
            .into_iter()
            .map(PlatformPattern::new)
            .collect::<Result<Vec<_>>>()?;

        let types = types
            .into_iter()
            .map(|t| t.trim().to_lowercase())
            .filter(|t| !t.is_empty())
            .collect();

        Ok(Self { patterns, types })
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty() && self.types.is_empty()
    }

    /// Finds the platform roots among the installed packages
    pub fn detect(&self, graph: &PackageGraph) -> PlatformDetection {
        let mut roots: BTreeSet<String> = BTreeSet::new();
        let mut matched = vec![false; self.patterns.len()];

        for package in graph.packages() {
            let name = package.name();
            let mut is_platform = self.types.contains(&package.package_type().to_lowercase());

            for (index, pattern) in self.patterns.iter().enumerate() {
                if pattern.matches(name) {
                    matched[index] = true;
                    is_platform = true;
                }
            }

            if is_platform {
                roots.insert(name.to_string());
            }
        }

        let unmatched_patterns = self
            .patterns
            .iter()
            .zip(matched)
            .filter(|(_, was_matched)| !was_matched)
            .map(|(pattern, _)| pattern.original.clone())
            .collect();

        PlatformDetection {
            roots: roots.into_iter().collect(),
            unmatched_patterns,
        }
    }
}

/// A single validated platform pattern with its compiled matcher
#[derive(Debug)]
struct PlatformPattern {
    original: String,
    matcher: PatternMatcher,
}

impl PlatformPattern {
    fn new(pattern: String) -> Result<Self> {
        validate_pattern(&pattern)?;
        let matcher = compile_pattern(&pattern.to_lowercase());

        Ok(Self {
            original: pattern,
            matcher,
        })
    }

    fn matches(&self, package_name: &str) -> bool {
        self.matcher.matches(&package_name.to_lowercase())
    }
}

/// Pattern matcher types for efficient matching
#[derive(Debug)]
enum PatternMatcher {
    /// "drupal/core"
    Exact(String),
    /// "drupal/*"
    StartsWith(String),
    /// "*/core"
    EndsWith(String),
    /// "*core*"
    Contains(String),
    /// "drupal/core-*-dev" and other multi-wildcard shapes
    Glob {
        parts: Vec<String>,
        anchored_start: bool,
        anchored_end: bool,
    },
}

impl PatternMatcher {
    fn matches(&self, name: &str) -> bool {
        match self {
            PatternMatcher::Exact(s) => name == s,
            PatternMatcher::StartsWith(prefix) => name.starts_with(prefix.as_str()),
            PatternMatcher::EndsWith(suffix) => name.ends_with(suffix.as_str()),
            PatternMatcher::Contains(middle) => name.contains(middle.as_str()),
            PatternMatcher::Glob {
                parts,
                anchored_start,
                anchored_end,
            } => glob_matches(name, parts, *anchored_start, *anchored_end),
        }
    }
}

/// Matches the literal `parts` in order, honouring anchoring at both ends
fn glob_matches(name: &str, parts: &[String], anchored_start: bool, anchored_end: bool) -> bool {
    let mut remaining = name;

    for (index, part) in parts.iter().enumerate() {
        let is_first = index == 0;
        let is_last = index == parts.len() - 1;

        if is_first && anchored_start {
            match remaining.strip_prefix(part.as_str()) {
                Some(rest) => remaining = rest,
                None => return false,
            }
        } else if is_last && anchored_end {
            return remaining.len() >= part.len() && remaining.ends_with(part.as_str());
        } else {
            match remaining.find(part.as_str()) {
                Some(pos) => remaining = &remaining[pos + part.len()..],
                None => return false,
            }
        }
    }

    !anchored_end || remaining.is_empty()
}

fn validate_pattern(pattern: &str) -> Result<()> {
    if pattern.is_empty() {
        anyhow::bail!("Platform pattern cannot be empty");
    }

    if pattern.len() > MAX_PATTERN_LENGTH {
        anyhow::bail!(
            "Platform pattern is too long: '{}' ({} chars). Maximum: {} chars",
            pattern,
            pattern.len(),
            MAX_PATTERN_LENGTH
        );
    }

    if let Some(ch) = pattern.chars().find(|c| !is_valid_pattern_char(*c)) {
        anyhow::bail!(
            "Platform pattern contains invalid character '{}' in pattern '{}'. \
             Only alphanumeric, hyphens, underscores, dots, slashes, and asterisks (*) are allowed.",
            ch,
            pattern
        );
    }

    if pattern.chars().all(|c| c == '*') {
        anyhow::bail!(
            "Platform pattern cannot contain only wildcards: '{}'",
            pattern
        );
    }

    Ok(())
}

fn is_valid_pattern_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | '/' | '*')
}

fn compile_pattern(pattern: &str) -> PatternMatcher {
    let wildcard_count = pattern.matches('*').count();
    let starts_wild = pattern.starts_with('*');
    let ends_wild = pattern.ends_with('*');

    match wildcard_count {
        0 => PatternMatcher::Exact(pattern.to_string()),
        1 if ends_wild => PatternMatcher::StartsWith(pattern[..pattern.len() - 1].to_string()),
        1 if starts_wild => PatternMatcher::EndsWith(pattern[1..].to_string()),
        2 if starts_wild && ends_wild => {
            PatternMatcher::Contains(pattern[1..pattern.len() - 1].to_string())
        }
        _ => PatternMatcher::Glob {
            parts: pattern
                .split('*')
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect(),
            anchored_start: !starts_wild,
            anchored_end: !ends_wild,
        },
    }
}
