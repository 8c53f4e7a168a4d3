//! Best-compatible release selection against the local Node.js major

use super::feed::ReleaseEntry;
use super::version::{strip_marker, RuntimeVersion};

/// How a picked release relates to the locally installed Node major.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchKind {
    /// The bundled Node major equals the local major.
    Exact,
    /// Newest release whose bundled Node major is strictly below the
    /// local major.
    Lower,
    /// No major relationship could be established; the globally newest
    /// release was taken.
    Any,
}

/// A release selected for pinning into the generated root manifest.
#[derive(Debug, Clone)]
pub struct RuntimeMatch {
    /// Exact feed version string with any leading marker stripped. This
    /// string is written verbatim into the generated manifest.
    pub version_string: String,
    pub version: RuntimeVersion,
    pub bundled_node_major: u64,
    pub kind: MatchKind,
}

struct Candidate {
    version_string: String,
    version: RuntimeVersion,
    bundled_node_major: u64,
}

impl Candidate {
    fn to_match(&self, kind: MatchKind) -> RuntimeMatch {
        RuntimeMatch {
            version_string: self.version_string.clone(),
            version: self.version,
            bundled_node_major: self.bundled_node_major,
            kind,
        }
    }
}

/// Pick the best release for the local Node major.
///
/// Preference order: a release bundling exactly the local Node major,
/// then the newest release built against an older major, then the newest
/// release overall. Pre-releases and entries without a resolvable
/// version or bundled Node major never become candidates.
///
/// Returns `None` when no candidate survives; the caller falls back to a
/// manually supplied version. An unknown local major (`None`) skips the
/// exact/lower pools entirely.
pub fn pick_version(releases: &[ReleaseEntry], local_major: Option<u64>) -> Option<RuntimeMatch> {
    let candidates: Vec<Candidate> = releases
        .iter()
        .filter_map(|entry| {
            let version = RuntimeVersion::parse(&entry.version);
            if !version.is_valid() || version.is_pre_release() {
                return None;
            }
            let bundled_node_major = entry
                .node
                .as_deref()
                .map(RuntimeVersion::parse)
                .and_then(|v| v.major())?;
            Some(Candidate {
                version_string: strip_marker(&entry.version).to_string(),
                version,
                bundled_node_major,
            })
        })
        .collect();

    let exact: Vec<&Candidate> = candidates
        .iter()
        .filter(|c| Some(c.bundled_node_major) == local_major)
        .collect();
    if let Some(best) = newest(&exact) {
        return Some(best.to_match(MatchKind::Exact));
    }

    let lower: Vec<&Candidate> = candidates
        .iter()
        .filter(|c| local_major.is_some_and(|local| c.bundled_node_major < local))
        .collect();
    if let Some(best) = newest(&lower) {
        return Some(best.to_match(MatchKind::Lower));
    }

    let all: Vec<&Candidate> = candidates.iter().collect();
    newest(&all).map(|c| c.to_match(MatchKind::Any))
}

fn newest<'a>(pool: &[&'a Candidate]) -> Option<&'a Candidate> {
    pool.iter().copied().max_by(|a, b| a.version.cmp(&b.version))
}
