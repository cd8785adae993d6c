//! Built-in presentation layer for the static exporter.
//!
//! The crawler only depends on the `RenderPage` trait; `HtmlRenderer` is
//! the bundled implementation. Pages are static HTML with no JavaScript,
//! all dynamic strings HTML-escaped, and one shared stylesheet asset.

pub mod pages;

use std::collections::BTreeSet;

use crate::export::routes::{Route, RoutePlan, ViewKind};
use crate::ingest::scanner::ScannedRoot;
use crate::{ViewerError, ViewerResult};

/// Output of rendering one route: the page body plus the set of static
/// assets it references (output-relative paths).
#[derive(Debug, Clone)]
pub struct RenderedPage {
    pub html: String,
    pub assets: BTreeSet<String>,
}

/// Rendering contract consumed by the static export crawler.
pub trait RenderPage {
    /// Render one route to HTML. Links inside the page use server-relative
    /// URLs; the crawler rewrites them to relative file paths.
    fn render(&self, route: &Route) -> ViewerResult<RenderedPage>;

    /// Contents of a static asset referenced by a rendered page.
    fn asset_contents(&self, asset: &str) -> ViewerResult<Vec<u8>>;
}

/// HTML-escape a string for safe insertion into HTML content.
///
/// Escapes: & < > " '
pub fn html_escape(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#x27;"),
            _ => result.push(c),
        }
    }
    result
}

/// Shared stylesheet, exported once per site.
pub const STYLE_ASSET_PATH: &str = "static/style.css";
pub const STYLE_ASSET_URL: &str = "/static/style.css";

const STYLE_CSS: &str = r#"* { box-sizing: border-box; margin: 0; padding: 0; }
body {
  font-family: system-ui, -apple-system, sans-serif;
  background: #1a1a2e;
  color: #e8e8e8;
  padding: 24px;
}
h1 { font-size: 1.5rem; margin-bottom: 16px; }
h2 { font-size: 1.125rem; margin: 24px 0 12px 0; color: #9a9a9a; }
table { width: 100%; border-collapse: collapse; font-size: 0.875rem; background: #16213e; }
th, td { padding: 10px 12px; text-align: left; border-bottom: 1px solid #2d3a5c; }
th { background: #1a1a2e; color: #9a9a9a; font-weight: 600; font-size: 0.75rem; text-transform: uppercase; }
tr:hover { background: #1f2b47; }
.mono { font-family: monospace; }
.num { text-align: right; }
.success { color: #4ecdc4; }
.failure { color: #ff6b6b; }
.unfinished { color: #f0c674; }
a { color: #4ecdc4; text-decoration: none; }
a:hover { text-decoration: underline; }
nav { margin-bottom: 16px; }
nav a { margin-right: 12px; }
details { margin: 12px 0; }
summary { cursor: pointer; color: #9a9a9a; }
pre { background: #16213e; padding: 12px; border-radius: 4px; overflow-x: auto; font-size: 0.8125rem; }
.warn { color: #f0c674; }
"#;

/// Static-HTML renderer over one scanned log root.
pub struct HtmlRenderer<'a> {
    scanned: &'a ScannedRoot,
    plan: &'a RoutePlan,
}

impl<'a> HtmlRenderer<'a> {
    pub fn new(scanned: &'a ScannedRoot, plan: &'a RoutePlan) -> Self {
        HtmlRenderer { scanned, plan }
    }
}

impl RenderPage for HtmlRenderer<'_> {
    fn render(&self, route: &Route) -> ViewerResult<RenderedPage> {
        let html = match route.kind {
            ViewKind::Index => pages::render_index(self.scanned, self.plan),
            ViewKind::CategoryListing => {
                let category = route.category.ok_or_else(|| ViewerError::RenderFailure {
                    url: "/category".to_string(),
                    reason: "category-listing route without a category".to_string(),
                })?;
                pages::render_category(self.scanned, self.plan, category)
            }
            ViewKind::TaskDetail => {
                let task_id = route.task_id.as_deref().unwrap_or_default();
                let record = self
                    .scanned
                    .records
                    .iter()
                    .find(|r| r.task_id == task_id)
                    .ok_or_else(|| ViewerError::RenderFailure {
                        url: format!("/task/{task_id}"),
                        reason: "no such task in scanned root".to_string(),
                    })?;
                pages::render_task_detail(record)?
            }
        };

        let mut assets = BTreeSet::new();
        assets.insert(STYLE_ASSET_PATH.to_string());
        Ok(RenderedPage { html, assets })
    }

    fn asset_contents(&self, asset: &str) -> ViewerResult<Vec<u8>> {
        match asset {
            STYLE_ASSET_PATH => Ok(STYLE_CSS.as_bytes().to_vec()),
            other => Err(ViewerError::Message(format!("unknown asset: {other}"))),
        }
    }
}
