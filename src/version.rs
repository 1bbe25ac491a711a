/// Placeholder used when the package version is not available.
pub const UNKNOWN_VERSION: &str = "UNKNOWN";

/// Package version stamped in at build time.
pub fn version() -> &'static str {
    resolve_version(option_env!("CARGO_PKG_VERSION"))
}

fn resolve_version(raw: Option<&'static str>) -> &'static str {
    raw.map(str::trim)
        .filter(|v| !v.is_empty())
        .unwrap_or(UNKNOWN_VERSION)
}

/// Value of the `User-Agent` header sent with every request.
pub fn user_agent() -> String {
    format!("laposte-sdk/{}", version())
}
