//! Internal link rewriting for exported pages.
//!
//! Rendered pages carry server-relative URLs (`/`, `/task/<slug>`, ...).
//! The export rewrites each one to a relative file path valid from the
//! page's own location, so the tree works without a server.

use std::collections::BTreeMap;

/// Relative href from one exported file to another.
///
/// Both paths are relative to the export root and use forward slashes.
pub fn relative_href(from_file: &str, to_file: &str) -> String {
    let from_dirs: Vec<&str> = match from_file.rsplit_once('/') {
        Some((dir, _)) => dir.split('/').collect(),
        None => Vec::new(),
    };
    let to_parts: Vec<&str> = to_file.split('/').collect();

    let common = from_dirs
        .iter()
        .zip(to_parts.iter())
        .take_while(|(a, b)| a == b)
        .count();

    let mut parts: Vec<&str> = Vec::new();
    for _ in common..from_dirs.len() {
        parts.push("..");
    }
    parts.extend(&to_parts[common..]);
    parts.join("/")
}

/// Rewrite every `href`/`src` attribute whose value appears in `url_map`
/// (server URL -> output path) to the corresponding relative path as seen
/// from `page_output_path`. URLs not in the map are left untouched.
pub fn rewrite_links(
    html: &str,
    page_output_path: &str,
    url_map: &BTreeMap<String, String>,
) -> String {
    let mut result = html.to_string();
    for (url, target_path) in url_map {
        let rel = relative_href(page_output_path, target_path);
        for attr in ["href", "src"] {
            let needle = format!("{attr}=\"{url}\"");
            let replacement = format!("{attr}=\"{rel}\"");
            result = result.replace(&needle, &replacement);
        }
    }
    result
}
