//! Base URL parsing and per-request URL assembly.

use reqwest::Url;

use crate::error::{Result, SdkError};
use crate::path::normalize;

/// Parse an API provider base URL. Only absolute URLs that can carry a path
/// are accepted.
pub fn parse_base_url(raw: &str) -> Result<Url> {
    let url = Url::parse(raw).map_err(|e| SdkError::invalid_url(raw, e))?;
    if url.cannot_be_a_base() {
        return Err(SdkError::invalid_url(raw, "URL cannot be used as a base"));
    }
    Ok(url)
}

/// Resolve `path` against `base`.
///
/// The normalized path is made relative to the base directory (`.` before a
/// leading slash, `./` otherwise) so that leading slashes stay below the base
/// path instead of replacing it, then any `./` left in the joined URL is
/// removed.
///
/// URL parsing also resolves `%2e%2e` and, for http(s), `\` separators, which
/// `normalize` leaves alone. A result that ends up outside the base directory
/// or on another origin is rejected, as is a leading `..` that `normalize`
/// could not cancel.
pub fn build_api_url(base: &Url, path: &str) -> Result<String> {
    let normalized = normalize(path);
    let relative = if normalized.is_empty() || normalized.starts_with('/') {
        format!(".{normalized}")
    } else {
        format!("./{normalized}")
    };
    let joined = base
        .join(&relative)
        .map_err(|e| SdkError::invalid_url(relative.as_str(), e))?;
    let api_url = joined.as_str().replace("./", "");
    let parsed = Url::parse(&api_url).map_err(|e| SdkError::invalid_url(api_url.as_str(), e))?;

    let prefix = base_directory(base);
    let same_origin = parsed.scheme() == base.scheme()
        && parsed.host_str() == base.host_str()
        && parsed.port_or_known_default() == base.port_or_known_default();
    if !same_origin || !parsed.path().starts_with(prefix) {
        return Err(SdkError::invalid_url(
            api_url.as_str(),
            format!("resolves outside of base path {prefix}"),
        ));
    }
    Ok(api_url)
}

/// Path of `base` up to and including its last `/`.
fn base_directory(base: &Url) -> &str {
    let path = base.path();
    match path.rfind('/') {
        Some(end) => &path[..=end],
        None => "/",
    }
}
