//! Path normalization and classification.

use crate::classify::pattern::UrlFamily;

/// Substring that marks an inbound path as an API call.
pub const API_HOST_MARKER: &str = "api.github.com";

/// Error produced for paths that cannot be normalized.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ClassifyError {
    #[error("Empty path")]
    EmptyPath,
}

/// Outcome of classifying an inbound path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    /// API host marker present: forward opaquely, skipping the denylist
    /// gate, rewrite, size fallback, and cache overlay.
    Api { url: String },

    /// A recognized resource family, with the extracted owner segment.
    Resource {
        family: UrlFamily,
        owner: Option<String>,
        url: String,
    },

    /// Well-formed but not a recognized GitHub URL shape (maps to 403,
    /// deliberately distinct from the 400 for malformed input).
    Unmatched { url: String },
}

impl Classification {
    /// The normalized URL the classification was derived from.
    pub fn url(&self) -> &str {
        match self {
            Classification::Api { url }
            | Classification::Resource { url, .. }
            | Classification::Unmatched { url } => url,
        }
    }
}

/// Classify a raw inbound path (leading `/` already stripped).
///
/// The path is normalized into an `https://` URL, checked for the API host
/// marker, then matched against the ordered URL families. Pure function of
/// its input: no I/O, deterministic, and stable when re-applied to its own
/// normalized output.
pub fn classify(raw_path: &str) -> Result<Classification, ClassifyError> {
    if raw_path.is_empty() {
        return Err(ClassifyError::EmptyPath);
    }

    let url = normalize(raw_path);

    // Substring match, not host-exact: any path mentioning the API host is
    // treated as an API call and forwarded verbatim.
    if url.contains(API_HOST_MARKER) {
        return Ok(Classification::Api { url });
    }

    for family in UrlFamily::ORDERED {
        if let Some(owner) = family.match_owner(&url) {
            let owner = Some(owner.to_string());
            return Ok(Classification::Resource { family, owner, url });
        }
    }

    Ok(Classification::Unmatched { url })
}

/// Normalize a raw path into the upstream URL.
///
/// Strips one optional `http:`/`https:` scheme prefix and up to two leading
/// slashes, then re-prefixes with `https://`. Outbound traffic is HTTPS
/// regardless of the scheme the caller spelled out.
fn normalize(raw_path: &str) -> String {
    let rest = raw_path
        .strip_prefix("https:")
        .or_else(|| raw_path.strip_prefix("http:"))
        .unwrap_or(raw_path);
    let rest = rest.strip_prefix('/').unwrap_or(rest);
    let rest = rest.strip_prefix('/').unwrap_or(rest);
    format!("https://{rest}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_path_is_an_error() {
        assert_eq!(classify(""), Err(ClassifyError::EmptyPath));
    }

    #[test]
    fn scheme_variants_normalize_identically() {
        let expected = "https://github.com/o/r/blob/main/f.txt";
        for raw in [
            "github.com/o/r/blob/main/f.txt",
            "http://github.com/o/r/blob/main/f.txt",
            "https://github.com/o/r/blob/main/f.txt",
            "https:/github.com/o/r/blob/main/f.txt",
            "https:github.com/o/r/blob/main/f.txt",
        ] {
            let classification = classify(raw).unwrap();
            assert_eq!(classification.url(), expected, "raw = {raw}");
        }
    }

    #[test]
    fn classification_is_idempotent_over_its_own_output() {
        let first = classify("github.com/o/r/blob/main/f.txt").unwrap();
        let again = classify(first.url()).unwrap();
        assert_eq!(first, again);
    }

    #[test]
    fn first_match_wins_in_family_order() {
        match classify("github.com/o/r/releases/download/v1/x").unwrap() {
            Classification::Resource { family, owner, .. } => {
                assert_eq!(family, UrlFamily::ReleaseArchive);
                assert_eq!(owner.as_deref(), Some("o"));
            }
            other => panic!("unexpected classification: {other:?}"),
        }
    }

    #[test]
    fn api_marker_anywhere_short_circuits_matching() {
        assert!(matches!(
            classify("api.github.com/repos/o/r").unwrap(),
            Classification::Api { .. }
        ));
        // even embedded in an otherwise-recognizable path
        assert!(matches!(
            classify("github.com/o/api.github.com/blob/main/x").unwrap(),
            Classification::Api { .. }
        ));
    }

    #[test]
    fn unrecognized_host_is_unmatched_not_an_error() {
        assert!(matches!(
            classify("evil.com/x").unwrap(),
            Classification::Unmatched { .. }
        ));
        assert!(matches!(
            classify("github.com/only-owner").unwrap(),
            Classification::Unmatched { .. }
        ));
    }

    #[test]
    fn query_string_is_carried_through() {
        match classify("github.com/o/r/info/refs?service=git-upload-pack").unwrap() {
            Classification::Resource { family, url, .. } => {
                assert_eq!(family, UrlFamily::GitProtocol);
                assert!(url.ends_with("?service=git-upload-pack"));
            }
            other => panic!("unexpected classification: {other:?}"),
        }
    }
}
