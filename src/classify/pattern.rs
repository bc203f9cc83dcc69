//! URL family matching and rewriting.
//!
//! Each recognized GitHub URL shape is one variant of [`UrlFamily`]. The
//! variants are evaluated in the fixed order of [`UrlFamily::ORDERED`] and
//! evaluation stops at the first match, so priority between overlapping
//! shapes is part of the contract, not an accident of rule layout.

/// One family of proxiable GitHub resource URLs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UrlFamily {
    /// `github.com/{owner}/{repo}/releases/…` and `…/archive/…` downloads.
    ReleaseArchive,
    /// `github.com/{owner}/{repo}/blob/…` views and `…/raw/…` content.
    BlobRaw,
    /// `github.com/{owner}/{repo}/info…` and `…/git-…` protocol endpoints.
    GitProtocol,
    /// `raw.githubusercontent.com` / `raw.github.com` CDN paths.
    RawContent,
    /// `gist.github.com/{owner}/…` gist paths.
    Gist,
}

impl UrlFamily {
    /// Evaluation order; first match wins.
    pub const ORDERED: [UrlFamily; 5] = [
        UrlFamily::ReleaseArchive,
        UrlFamily::BlobRaw,
        UrlFamily::GitProtocol,
        UrlFamily::RawContent,
        UrlFamily::Gist,
    ];

    /// Match a normalized URL against this family, extracting the owner
    /// segment on success. `None` means the URL does not belong to this
    /// family.
    pub fn match_owner<'a>(&self, url: &'a str) -> Option<&'a str> {
        let target = strip_scheme(url);
        match self {
            UrlFamily::ReleaseArchive => {
                let rest = target.strip_prefix("github.com/")?;
                let (owner, rest) = segment(rest)?;
                let (_repo, rest) = segment(rest)?;
                let (kind, _) = segment(rest)?;
                matches!(kind, "releases" | "archive").then_some(owner)
            }
            UrlFamily::BlobRaw => {
                let rest = target.strip_prefix("github.com/")?;
                let (owner, rest) = segment(rest)?;
                let (_repo, rest) = segment(rest)?;
                let (kind, _) = segment(rest)?;
                matches!(kind, "blob" | "raw").then_some(owner)
            }
            UrlFamily::GitProtocol => {
                let rest = target.strip_prefix("github.com/")?;
                let (owner, rest) = segment(rest)?;
                let (_repo, rest) = segment(rest)?;
                (rest.starts_with("info") || rest.starts_with("git-")).then_some(owner)
            }
            UrlFamily::RawContent => {
                let rest = target
                    .strip_prefix("raw.githubusercontent.com/")
                    .or_else(|| target.strip_prefix("raw.github.com/"))?;
                let (owner, rest) = segment(rest)?;
                let (_repo, rest) = segment(rest)?;
                has_interior_slash(rest).then_some(owner)
            }
            UrlFamily::Gist => {
                let rest = target.strip_prefix("gist.github.com/")?;
                let (owner, rest) = segment(rest)?;
                has_interior_slash(rest).then_some(owner)
            }
        }
    }

    /// Apply the family-specific rewrite before dispatch.
    ///
    /// Only `BlobRaw` transforms: the first `/blob/` occurrence in the URL
    /// becomes `/raw/`, turning the HTML view path into its raw-content
    /// equivalent. Every other family passes the URL through unchanged.
    pub fn rewrite(&self, url: String) -> String {
        match self {
            UrlFamily::BlobRaw => url.replacen("/blob/", "/raw/", 1),
            _ => url,
        }
    }

    /// Family name for logs and metrics labels.
    pub fn name(&self) -> &'static str {
        match self {
            UrlFamily::ReleaseArchive => "release_archive",
            UrlFamily::BlobRaw => "blob_raw",
            UrlFamily::GitProtocol => "git_protocol",
            UrlFamily::RawContent => "raw_content",
            UrlFamily::Gist => "gist",
        }
    }
}

fn strip_scheme(url: &str) -> &str {
    url.strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"))
        .unwrap_or(url)
}

/// Split one non-empty path segment off the front of `s`, consuming the
/// `/` that terminates it.
fn segment(s: &str) -> Option<(&str, &str)> {
    match s.find('/') {
        Some(idx) if idx > 0 => Some((&s[..idx], &s[idx + 1..])),
        _ => None,
    }
}

/// True when `s` contains a `/` with at least one character on both sides.
fn has_interior_slash(s: &str) -> bool {
    s.match_indices('/').any(|(i, _)| i > 0 && i + 1 < s.len())
}
