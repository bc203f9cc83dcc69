//! Owner denylist.
//!
//! # Design Decisions
//! - Loaded once during single-threaded startup, then frozen: the type
//!   exposes no mutating methods, so it is safe to share by `Arc` across
//!   every in-flight request without synchronization
//! - Membership is a case-sensitive exact match on the extracted owner
//! - A missing file is a warning, not an error: the proxy starts with an
//!   empty denylist rather than refusing to serve

use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// Immutable set of blocked owner identifiers.
#[derive(Debug, Default)]
pub struct Denylist {
    owners: HashSet<String>,
}

impl Denylist {
    /// Load the denylist from a line-oriented text file.
    ///
    /// Each line is trimmed of surrounding whitespace; blank lines and lines
    /// starting with `#` are skipped. An unreadable file logs a warning and
    /// yields an empty denylist.
    pub fn load(path: &Path) -> Self {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(error) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %error,
                    "Could not load denylist file, starting with empty denylist"
                );
                return Self::default();
            }
        };

        let denylist: Self = content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .map(str::to_string)
            .collect();

        tracing::info!(
            path = %path.display(),
            entries = denylist.len(),
            "Denylist loaded"
        );
        denylist
    }

    /// Check whether an extracted owner is blocked.
    ///
    /// An absent owner always passes (API requests and families without an
    /// owner capture are never gated).
    pub fn is_blocked(&self, owner: Option<&str>) -> bool {
        owner.is_some_and(|owner| self.owners.contains(owner))
    }

    /// Number of blocked owners.
    pub fn len(&self) -> usize {
        self.owners.len()
    }

    /// True when no owners are blocked.
    pub fn is_empty(&self) -> bool {
        self.owners.is_empty()
    }
}

impl FromIterator<String> for Denylist {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self {
            owners: iter.into_iter().collect(),
        }
    }
}
