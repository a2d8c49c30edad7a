//! Candidate locations for the bibliography file.

use std::path::PathBuf;
use url::Url;

use super::SourceError;

/// A resolved candidate: something to download or something to read
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Location {
    Http(Url),
    File(PathBuf),
}

/// Ordered list of places to look for the bibliography.
///
/// 1. `bib_path` as given
/// 2. `bib_path` with its leading `./` removed, or with `./` added
/// 3. `bib_path` resolved against `page_url`
/// 4. `asset_dir` followed by `bib_path`
/// 5. `asset_dir` followed by `bib_path` minus its first `./`
/// 6. `default_location`
///
/// Entries 3 to 5 are left out when their base is not configured. The list
/// is not deduplicated; an unreachable duplicate just fails again.
pub fn candidate_locations(
    bib_path: &str,
    page_url: Option<&Url>,
    asset_dir: Option<&str>,
    default_location: &str,
) -> Vec<String> {
    let mut candidates = vec![bib_path.to_string()];

    match bib_path.strip_prefix("./") {
        Some(stripped) => candidates.push(stripped.to_string()),
        None => candidates.push(format!("./{}", bib_path)),
    }

    if let Some(resolved) = page_url.and_then(|base| base.join(bib_path).ok()) {
        candidates.push(resolved.to_string());
    }

    if let Some(dir) = asset_dir.filter(|d| !d.is_empty()) {
        candidates.push(format!("{}{}", dir, bib_path));
        candidates.push(format!("{}{}", dir, bib_path.replacen("./", "", 1)));
    }

    candidates.push(default_location.to_string());
    candidates
}

/// Append `v=<token>` to a location, respecting an existing query string
pub fn with_cache_bust(location: &str, token: &str) -> String {
    if location.contains('?') {
        format!("{}&v={}", location, token)
    } else {
        format!("{}?v={}", location, token)
    }
}

/// Current time in milliseconds, unique enough to defeat caches
pub fn cache_bust_token() -> String {
    chrono::Utc::now().timestamp_millis().to_string()
}

/// Decide whether a candidate is fetched over HTTP or read from disk.
///
/// Absolute `http(s)` URLs are used as they are. Anything else is resolved
/// against `page_url` when one is configured, and is a filesystem path
/// otherwise.
pub fn resolve_location(raw: &str, page_url: Option<&Url>) -> Result<Location, SourceError> {
    if raw.starts_with("http://") || raw.starts_with("https://") {
        return Ok(Location::Http(Url::parse(raw)?));
    }

    match page_url {
        Some(base) => {
            let url = base.join(raw)?;
            match url.scheme() {
                "http" | "https" => Ok(Location::Http(url)),
                "file" => url
                    .to_file_path()
                    .map(Location::File)
                    .map_err(|_| SourceError::InvalidLocation(url.to_string())),
                other => Err(SourceError::InvalidLocation(format!(
                    "unsupported scheme '{}' in {}",
                    other, url
                ))),
            }
        }
        None => Ok(Location::File(PathBuf::from(raw))),
    }
}
