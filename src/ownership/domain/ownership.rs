use serde::Serialize;
use std::fmt;

/// Who is accountable for the security posture of an installed package
///
/// Variants are declared in precedence order: when several labels could
/// apply, the classifier picks the earliest one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Ownership {
    /// Declared directly by the root project
    Direct,
    /// Reachable from both platform roots and the user's own dependencies
    Shared,
    /// Reachable only through platform (framework) packages
    PlatformOnly,
    /// Reachable only through the user's own dependencies
    UserTransitive,
}

impl Ownership {
    pub const ALL: [Ownership; 4] = [
        Ownership::Direct,
        Ownership::Shared,
        Ownership::PlatformOnly,
        Ownership::UserTransitive,
    ];

    /// Whether an advisory on a package with this ownership halts the operation
    ///
    /// Only platform-only packages are non-blocking: the user cannot change
    /// which versions the platform pins.
    pub fn should_block(self) -> bool {
        !matches!(self, Ownership::PlatformOnly)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Ownership::Direct => "direct",
            Ownership::Shared => "shared",
            Ownership::PlatformOnly => "platform_only",
            Ownership::UserTransitive => "user_transitive",
        }
    }
}

impl fmt::Display for Ownership {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_should_block_only_platform_only_is_non_blocking() {
        let non_blocking: Vec<Ownership> = Ownership::ALL
            .iter()
            .copied()
            .filter(|o| !o.should_block())
            .collect();
        assert_eq!(non_blocking, vec![Ownership::PlatformOnly]);
    }

    #[test]
    fn test_should_block_each_variant() {
        assert!(Ownership::Direct.should_block());
        assert!(Ownership::Shared.should_block());
        assert!(Ownership::UserTransitive.should_block());
        assert!(!Ownership::PlatformOnly.should_block());
    }

    #[test]
    fn test_precedence_order() {
        assert!(Ownership::Direct < Ownership::Shared);
        assert!(Ownership::Shared < Ownership::PlatformOnly);
        assert!(Ownership::PlatformOnly < Ownership::UserTransitive);
    }

    #[test]
    fn test_display_and_serialize_agree() {
        for ownership in Ownership::ALL {
            let json = serde_json::to_string(&ownership).unwrap();
            assert_eq!(json, format!("\"{}\"", ownership));
        }
    }
}
