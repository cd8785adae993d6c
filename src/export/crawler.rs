//! Static export crawler.
//!
//! Drives a `RenderPage` implementation through every planned route, rewrites
//! internal links to relative file paths, copies referenced assets once, and
//! writes the output tree. A failed render skips that one file; failed routes
//! are collected, listed on a fallback page, and reported to the caller.
//! Write errors are fatal for the whole export.

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::Path;

use serde::Serialize;
use tracing::{info, warn};

use crate::export::links::rewrite_links;
use crate::export::routes::{PlannedRoute, RoutePlan};
use crate::render::{RenderPage, RenderedPage, html_escape};
use crate::{ViewerError, ViewerResult};

/// Fallback page listing routes that failed to render. Links that targeted
/// a failed route are rewritten to point here instead of dangling.
pub const FAILURES_PAGE: &str = "render-failures.html";

/// Manifest written after all routes were processed. Its presence is the
/// completion marker: an interrupted export never produces one.
pub const MANIFEST_FILE: &str = "export-manifest.json";

/// One route whose render failed during export.
#[derive(Debug, Clone, Serialize)]
pub struct FailedRoute {
    pub url: String,
    pub reason: String,
}

/// Outcome of a completed export run.
#[derive(Debug, Clone)]
pub struct ExportSummary {
    pub pages_written: usize,
    pub assets_written: usize,
    pub failures: Vec<FailedRoute>,
}

#[derive(Debug, Serialize)]
struct ManifestRoute {
    url: String,
    path: String,
}

#[derive(Debug, Serialize)]
struct ExportManifest {
    routes: Vec<ManifestRoute>,
    failures: Vec<FailedRoute>,
    assets: Vec<String>,
}

fn write_error(path: &Path, e: impl std::fmt::Display) -> ViewerError {
    ViewerError::ExportWrite {
        path: path.to_path_buf(),
        reason: e.to_string(),
    }
}

fn write_file(out_dir: &Path, rel_path: &str, contents: &[u8]) -> ViewerResult<()> {
    let path = out_dir.join(rel_path);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| write_error(&path, e))?;
    }
    fs::write(&path, contents).map_err(|e| write_error(&path, e))
}

/// Copy one asset into the tree, deduplicated by content hash. Re-writing
/// identical content is skipped; differing content for an already-written
/// path would corrupt the tree and is a fatal write error.
fn write_asset(out_dir: &Path, asset: &str, contents: &[u8]) -> ViewerResult<bool> {
    let path = out_dir.join(asset);
    if path.exists() {
        let existing = fs::read(&path).map_err(|e| write_error(&path, e))?;
        if sha256::digest(existing.as_slice()) == sha256::digest(contents) {
            return Ok(false);
        }
        return Err(write_error(
            &path,
            "asset already exists with different content",
        ));
    }
    write_file(out_dir, asset, contents)?;
    Ok(true)
}

fn render_failures_page(failures: &[FailedRoute]) -> String {
    let mut items = String::new();
    for failure in failures {
        items.push_str(&format!(
            "<li><span class=\"mono\">{}</span>: {}</li>\n",
            html_escape(&failure.url),
            html_escape(&failure.reason),
        ));
    }
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="UTF-8">
<title>Render failures</title>
</head>
<body>
<nav><a href="index.html">Back to index</a></nav>
<h1>Render failures</h1>
<p>{count} route(s) could not be rendered and are missing from this export.</p>
<ul>
{items}</ul>
</body>
</html>"#,
        count = failures.len(),
    )
}

/// Export every planned route into `out_dir`.
///
/// Rendering happens before any page is written, so the link map knows which
/// routes failed and can redirect their inbound links to the fallback page.
/// The manifest is written last, only after all routes were processed.
pub fn export_site(
    plan: &RoutePlan,
    renderer: &impl RenderPage,
    out_dir: &Path,
) -> ViewerResult<ExportSummary> {
    fs::create_dir_all(out_dir).map_err(|e| write_error(out_dir, e))?;

    // Phase 1: render everything, collecting failures and the asset set.
    let mut rendered: Vec<(&PlannedRoute, RenderedPage)> = Vec::new();
    let mut failures: Vec<FailedRoute> = Vec::new();
    let mut assets: BTreeSet<String> = BTreeSet::new();

    for planned in &plan.routes {
        match renderer.render(&planned.route) {
            Ok(page) => {
                assets.extend(page.assets.iter().cloned());
                rendered.push((planned, page));
            }
            Err(e) => {
                warn!(url = %planned.url, error = %e, "route failed to render, skipping");
                failures.push(FailedRoute {
                    url: planned.url.clone(),
                    reason: e.to_string(),
                });
            }
        }
    }

    // URL map for link rewriting: successful routes point at their files,
    // failed routes at the fallback page, assets at their copied paths.
    let mut url_map: BTreeMap<String, String> = BTreeMap::new();
    for (planned, _) in &rendered {
        url_map.insert(planned.url.clone(), planned.output_path.clone());
    }
    for failure in &failures {
        url_map.insert(failure.url.clone(), FAILURES_PAGE.to_string());
    }
    for asset in &assets {
        url_map.insert(format!("/{asset}"), asset.clone());
    }

    // Phase 2: write assets once each, then the rewritten pages.
    let mut assets_written = 0;
    for asset in &assets {
        let contents = renderer.asset_contents(asset)?;
        if write_asset(out_dir, asset, &contents)? {
            assets_written += 1;
        }
    }

    let mut pages_written = 0;
    for (planned, page) in &rendered {
        let html = rewrite_links(&page.html, &planned.output_path, &url_map);
        write_file(out_dir, &planned.output_path, html.as_bytes())?;
        pages_written += 1;
    }

    if !failures.is_empty() {
        write_file(
            out_dir,
            FAILURES_PAGE,
            render_failures_page(&failures).as_bytes(),
        )?;
    }

    // Completion marker: written only after every route was processed.
    let manifest = ExportManifest {
        routes: rendered
            .iter()
            .map(|(planned, _)| ManifestRoute {
                url: planned.url.clone(),
                path: planned.output_path.clone(),
            })
            .collect(),
        failures: failures.clone(),
        assets: assets.iter().cloned().collect(),
    };
    let manifest_json = serde_json::to_string(&manifest)
        .map_err(|e| ViewerError::Message(format!("failed to serialize manifest: {e}")))?;
    write_file(out_dir, MANIFEST_FILE, manifest_json.as_bytes())?;

    info!(
        pages = pages_written,
        assets = assets_written,
        failures = failures.len(),
        "export complete"
    );

    Ok(ExportSummary {
        pages_written,
        assets_written,
        failures,
    })
}
