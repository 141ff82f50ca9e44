//! User-Agent string for data source requests.

/// Product token suffix identifying what the requests are for.
const UA_COMMENT: &str = "publication-shelf";

/// Default User-Agent for publication list requests.
#[must_use]
pub(crate) fn default_user_agent() -> String {
    let version = env!("CARGO_PKG_VERSION");
    format!("pubshelf/{version} ({UA_COMMENT})")
}
