//! Lenient version parsing and ordering for feed and probe output

use std::cmp::Ordering;

/// A version parsed from a raw feed entry or tool probe string.
///
/// Parsing never fails: input with no usable numeric major collapses to
/// `Unparseable`, which sorts below every valid version and is dropped
/// by the release matcher before candidate selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuntimeVersion {
    Unparseable,
    Valid {
        major: u64,
        minor: u64,
        patch: u64,
        pre_release: bool,
    },
}

/// Strip surrounding whitespace and one leading marker character
/// (`v22.1.0`, `=22.1.0`).
pub fn strip_marker(raw: &str) -> &str {
    let trimmed = raw.trim();
    match trimmed.chars().next() {
        Some(c) if !c.is_ascii_digit() => &trimmed[c.len_utf8()..],
        _ => trimmed,
    }
}

impl RuntimeVersion {
    /// Parse a raw version string.
    ///
    /// Accepts an optional single leading marker character (`v20.1.0`),
    /// bare majors (`"22"`), and partial triples (`"22.1"`). Numeric
    /// components come only from the substring before the first `-`; a
    /// `-` suffix marks the version as pre-release. Missing or
    /// non-numeric minor/patch components default to 0.
    pub fn parse(raw: &str) -> Self {
        let cleaned = strip_marker(raw);

        // Well-formed versions go through semver directly
        if let Ok(v) = semver::Version::parse(cleaned) {
            return Self::Valid {
                major: v.major,
                minor: v.minor,
                patch: v.patch,
                pre_release: !v.pre.is_empty(),
            };
        }

        // Lenient fallback for bare forms like "22" or "22.1"
        let (numeric, pre_release) = match cleaned.split_once('-') {
            Some((head, _)) => (head, true),
            None => (cleaned, false),
        };

        let mut parts = numeric.split('.');
        let major = match parts.next().and_then(|p| p.parse::<u64>().ok()) {
            Some(major) => major,
            None => return Self::Unparseable,
        };
        let minor = parts.next().and_then(|p| p.parse().ok()).unwrap_or(0);
        let patch = parts.next().and_then(|p| p.parse().ok()).unwrap_or(0);

        Self::Valid {
            major,
            minor,
            patch,
            pre_release,
        }
    }

    /// Major component, when the version parsed at all.
    pub fn major(&self) -> Option<u64> {
        match self {
            Self::Valid { major, .. } => Some(*major),
            Self::Unparseable => None,
        }
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid { .. })
    }

    pub fn is_pre_release(&self) -> bool {
        matches!(
            self,
            Self::Valid {
                pre_release: true,
                ..
            }
        )
    }
}

impl Ord for RuntimeVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Unparseable, Self::Unparseable) => Ordering::Equal,
            (Self::Unparseable, Self::Valid { .. }) => Ordering::Less,
            (Self::Valid { .. }, Self::Unparseable) => Ordering::Greater,
            (
                Self::Valid {
                    major: a_major,
                    minor: a_minor,
                    patch: a_patch,
                    pre_release: a_pre,
                },
                Self::Valid {
                    major: b_major,
                    minor: b_minor,
                    patch: b_patch,
                    pre_release: b_pre,
                },
            ) => {
                // Stable sorts above an otherwise-equal pre-release
                (a_major, a_minor, a_patch, !a_pre).cmp(&(b_major, b_minor, b_patch, !b_pre))
            }
        }
    }
}

impl PartialOrd for RuntimeVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid(major: u64, minor: u64, patch: u64) -> RuntimeVersion {
        RuntimeVersion::Valid {
            major,
            minor,
            patch,
            pre_release: false,
        }
    }

    #[test]
    fn test_parse_full_triple() {
        assert_eq!(RuntimeVersion::parse("20.15.1"), valid(20, 15, 1));
    }

    #[test]
    fn test_parse_strips_leading_marker() {
        assert_eq!(RuntimeVersion::parse("v31.3.0"), valid(31, 3, 0));
        assert_eq!(RuntimeVersion::parse("=31.3.0"), valid(31, 3, 0));
    }

    #[test]
    fn test_parse_bare_major_and_partial() {
        assert_eq!(RuntimeVersion::parse("22"), valid(22, 0, 0));
        assert_eq!(RuntimeVersion::parse("22.1"), valid(22, 1, 0));
    }

    #[test]
    fn test_parse_non_numeric_components_default_to_zero() {
        assert_eq!(RuntimeVersion::parse("5.x"), valid(5, 0, 0));
    }

    #[test]
    fn test_parse_pre_release() {
        let v = RuntimeVersion::parse("25.0.0-beta.3");
        assert!(v.is_pre_release());
        assert_eq!(v.major(), Some(25));

        let bare = RuntimeVersion::parse("25-nightly");
        assert!(bare.is_pre_release());
        assert_eq!(bare.major(), Some(25));
    }

    #[test]
    fn test_parse_garbage_is_unparseable() {
        assert_eq!(RuntimeVersion::parse(""), RuntimeVersion::Unparseable);
        assert_eq!(RuntimeVersion::parse("main"), RuntimeVersion::Unparseable);
        assert_eq!(RuntimeVersion::parse("vv"), RuntimeVersion::Unparseable);
        assert_eq!(RuntimeVersion::parse("main").major(), None);
    }

    #[test]
    fn test_order_is_numeric_not_lexicographic() {
        assert!(RuntimeVersion::parse("2.10.0") > RuntimeVersion::parse("2.9.9"));
        assert!(RuntimeVersion::parse("10.0.0") > RuntimeVersion::parse("9.99.99"));
    }

    #[test]
    fn test_unparseable_sorts_below_everything() {
        assert!(RuntimeVersion::Unparseable < RuntimeVersion::parse("0.0.1"));
        assert!(RuntimeVersion::Unparseable < valid(0, 0, 0));
    }

    #[test]
    fn test_strip_marker() {
        assert_eq!(strip_marker("v1.2.3"), "1.2.3");
        assert_eq!(strip_marker("1.2.3"), "1.2.3");
        assert_eq!(strip_marker(" v1.2.3 "), "1.2.3");
    }
}
