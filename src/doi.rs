//! DOI normalization and resolver URL construction for the detail view.

use std::sync::LazyLock;

use regex::Regex;
use tracing::trace;
use url::Url;

/// Canonical DOI resolver used for bare identifiers.
pub const DOI_RESOLVER: &str = "https://doi.org/";

/// Matches `doi:` / `DOI:` prefixes with optional whitespace.
#[allow(clippy::expect_used)]
static DOI_PREFIX_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^doi:\s*").expect("DOI prefix regex is valid") // Static pattern, safe to panic
});

/// Hosts that serve as DOI resolvers.
const RESOLVER_HOSTS: [&str; 3] = ["doi.org", "dx.doi.org", "www.doi.org"];

/// Returns the identifier part of an `http(s)` DOI resolver URL, or `None`
/// when `value` is not one. Scheme and host compare case-insensitively.
fn resolver_identifier(value: &str) -> Option<String> {
    let url = Url::parse(value).ok()?;
    if !matches!(url.scheme(), "http" | "https") {
        return None;
    }
    let host = url.host_str()?.to_ascii_lowercase();
    if !RESOLVER_HOSTS.contains(&host.as_str()) {
        return None;
    }

    let mut identifier = url.path().trim_start_matches('/').to_string();
    if let Some(query) = url.query() {
        identifier.push('?');
        identifier.push_str(query);
    }
    Some(identifier)
}

/// Normalizes a DOI by stripping resolver URL and `doi:` prefixes and
/// URL-decoding the remainder.
///
/// Returns `None` for blank input.
#[must_use]
pub fn normalize_doi(input: &str) -> Option<String> {
    let trimmed = input.trim();
    let from_url = resolver_identifier(trimmed);
    let doi = from_url.as_deref().unwrap_or(trimmed);

    let doi = DOI_PREFIX_PATTERN.replace(doi, "");
    let decoded = match urlencoding::decode(&doi) {
        Ok(decoded) => decoded.trim().to_string(),
        Err(_) => doi.trim().to_string(),
    };

    if decoded.is_empty() { None } else { Some(decoded) }
}

/// Resolves a stored DOI value to a clickable URL.
///
/// Resolver URLs on any of the DOI hosts are rewritten to [`DOI_RESOLVER`];
/// other `http(s)` URLs are kept verbatim. Bare identifiers and
/// `doi:`-prefixed values resolve through [`DOI_RESOLVER`].
#[must_use]
pub fn doi_url(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    let is_web_url =
        Url::parse(trimmed).is_ok_and(|url| matches!(url.scheme(), "http" | "https"));
    if is_web_url && resolver_identifier(trimmed).is_none() {
        trace!(url = %trimmed, "DOI value is already a URL");
        return Some(trimmed.to_string());
    }

    let doi = normalize_doi(trimmed)?;
    Some(format!("{DOI_RESOLVER}{doi}"))
}
