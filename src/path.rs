//! Path normalization for API request paths.
//!
//! Leading slashes are counted and re-emitted as-is, `.` and empty segments
//! are dropped, and `..` cancels the previous real segment. A `..` that has
//! nothing to cancel (start of the path, or another unresolved `..`) is kept
//! literally.

/// Normalize a request path.
///
/// A trailing `/` is kept when the input ends with one, and is added when the
/// final token is a `..` that cancelled a segment (`a/b/..` becomes `a/`).
pub fn normalize(path: &str) -> String {
    if path.is_empty() {
        return String::new();
    }

    let leading = path.bytes().take_while(|&b| b == b'/').count();
    let mut ends_as_directory = path.ends_with('/');

    let mut tokens = path.split('/').filter(|t| !t.is_empty()).peekable();
    let mut segments: Vec<&str> = Vec::new();
    while let Some(token) = tokens.next() {
        match token {
            ".." if segments.last().is_some_and(|&last| last != "..") => {
                segments.pop();
                if tokens.peek().is_none() {
                    ends_as_directory = true;
                }
            }
            ".." => segments.push(".."),
            "." => {}
            _ => segments.push(token),
        }
    }

    let mut normalized = "/".repeat(leading);
    normalized.push_str(&segments.join("/"));
    if ends_as_directory && !normalized.is_empty() && !normalized.ends_with('/') {
        normalized.push('/');
    }
    normalized
}
