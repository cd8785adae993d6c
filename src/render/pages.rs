//! Page builders for the static HTML presentation layer.
//!
//! Every page is a complete document sharing one stylesheet. Links use
//! server-relative URLs; the crawler rewrites them at export time.

use crate::ViewerResult;
use crate::core::record::{TaskRecord, TaskStatus};
use crate::export::routes::{CategoryKind, RoutePlan};
use crate::ingest::scanner::ScannedRoot;
use crate::render::{STYLE_ASSET_URL, html_escape};
use crate::stats::aggregate;

fn page_shell(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="UTF-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<title>{title}</title>
<link rel="stylesheet" href="{STYLE_ASSET_URL}">
</head>
<body>
{body}
</body>
</html>"#,
        title = html_escape(title),
        body = body,
    )
}

fn status_label(status: TaskStatus) -> (&'static str, &'static str) {
    match status {
        TaskStatus::Success => ("success", "success"),
        TaskStatus::Failure => ("failure", "failure"),
        TaskStatus::Unfinished => ("unfinished", "unfinished"),
    }
}

fn category_labels(record: &TaskRecord) -> String {
    let mut labels = Vec::new();
    if record.categories.is_standard() {
        labels.push("standard");
    }
    if record.categories.mcp {
        labels.push("mcp");
    }
    if record.categories.ui_interaction {
        labels.push("ui-interaction");
    }
    labels.join(", ")
}

fn fmt_uiq(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{v:.3}"),
        None => "-".to_string(),
    }
}

fn task_table(records: &[&TaskRecord], plan: &RoutePlan) -> String {
    let mut rows = String::new();
    for record in records {
        let (label, class) = status_label(record.status);
        let url = plan
            .task_url(&record.task_id)
            .unwrap_or_else(|| "#".to_string());
        rows.push_str(&format!(
            r#"<tr>
<td class="mono"><a href="{url}">{id}</a></td>
<td class="{class}">{label}</td>
<td>{categories}</td>
<td class="num">{steps}</td>
<td class="num">{queries}</td>
<td class="num">{mcp_calls}</td>
<td class="num mono">{uiq}</td>
</tr>
"#,
            url = url,
            id = html_escape(&record.task_id),
            class = class,
            label = label,
            categories = category_labels(record),
            steps = record.step_count,
            queries = record.query_count,
            mcp_calls = record.mcp_call_count,
            uiq = fmt_uiq(record.ui_interaction_quality),
        ));
    }

    format!(
        r#"<table>
<thead>
<tr>
<th>Task</th>
<th>Status</th>
<th>Categories</th>
<th class="num">Steps</th>
<th class="num">Queries</th>
<th class="num">MCP Calls</th>
<th class="num">UIQ</th>
</tr>
</thead>
<tbody>
{rows}</tbody>
</table>"#
    )
}

fn stats_table(scanned: &ScannedRoot) -> String {
    let stats = aggregate(&scanned.records);
    format!(
        r#"<table>
<thead>
<tr>
<th class="num">Total</th>
<th class="num">Finished</th>
<th class="num">Success</th>
<th class="num">SR%</th>
<th class="num">Std SR%</th>
<th class="num">MCP SR%</th>
<th class="num">UI SR%</th>
<th class="num">UIQ</th>
<th class="num">Avg Steps</th>
<th class="num">Avg Queries</th>
<th class="num">Avg MCP</th>
</tr>
</thead>
<tbody>
<tr>
<td class="num">{total}</td>
<td class="num">{finished}</td>
<td class="num">{success}</td>
<td class="num">{sr:.1}</td>
<td class="num">{std_sr:.1}</td>
<td class="num">{mcp_sr:.1}</td>
<td class="num">{ui_sr:.1}</td>
<td class="num mono">{uiq:.3}</td>
<td class="num">{avg_steps:.1}</td>
<td class="num">{avg_queries:.2}</td>
<td class="num">{avg_mcp:.2}</td>
</tr>
</tbody>
</table>"#,
        total = stats.total,
        finished = stats.finished,
        success = stats.success,
        sr = stats.success_rate,
        std_sr = stats.standard_success_rate,
        mcp_sr = stats.mcp_success_rate,
        ui_sr = stats.user_interaction_success_rate,
        uiq = stats.uiq,
        avg_steps = stats.avg_steps,
        avg_queries = stats.avg_queries,
        avg_mcp = stats.avg_mcp_calls,
    )
}

fn category_nav(plan: &RoutePlan) -> String {
    let mut links = String::new();
    for planned in &plan.routes {
        if let Some(category) = planned.route.category {
            links.push_str(&format!(
                r#"<a href="{url}">{title}</a>"#,
                url = planned.url,
                title = category.title(),
            ));
        }
    }
    if links.is_empty() {
        String::new()
    } else {
        format!("<nav>{links}</nav>")
    }
}

fn skipped_section(scanned: &ScannedRoot) -> String {
    if scanned.skipped.is_empty() {
        return String::new();
    }
    let mut items = String::new();
    for skipped in &scanned.skipped {
        items.push_str(&format!(
            "<li class=\"mono\">{}</li>\n",
            html_escape(&skipped.reason)
        ));
    }
    format!(
        "<h2>Skipped logs</h2>\n<p class=\"warn\">{count} task log(s) could not be parsed and are excluded from all counts.</p>\n<ul>\n{items}</ul>",
        count = scanned.skipped.len(),
    )
}

/// Index page: per-root summary stats, category navigation, full task table.
pub fn render_index(scanned: &ScannedRoot, plan: &RoutePlan) -> String {
    let records: Vec<&TaskRecord> = scanned.records.iter().collect();
    let body = format!(
        "<h1>{name}</h1>\n{nav}\n<h2>Summary</h2>\n{stats}\n<h2>Tasks</h2>\n{table}\n{skipped}",
        name = html_escape(&scanned.display_name),
        nav = category_nav(plan),
        stats = stats_table(scanned),
        table = task_table(&records, plan),
        skipped = skipped_section(scanned),
    );
    page_shell(&scanned.display_name, &body)
}

/// Category listing page: tasks restricted to one category, plus a back link.
pub fn render_category(scanned: &ScannedRoot, plan: &RoutePlan, category: CategoryKind) -> String {
    let records: Vec<&TaskRecord> = scanned
        .records
        .iter()
        .filter(|r| match category {
            CategoryKind::Standard => r.categories.is_standard(),
            CategoryKind::Mcp => r.categories.mcp,
            CategoryKind::UiInteraction => r.categories.ui_interaction,
        })
        .collect();

    let title = format!("{} - {}", scanned.display_name, category.title());
    let body = format!(
        "<nav><a href=\"/\">Back to index</a></nav>\n<h1>{title}</h1>\n{table}",
        title = html_escape(&title),
        table = task_table(&records, plan),
    );
    page_shell(&title, &body)
}

/// Task detail page: every parsed field plus the raw record JSON in a
/// collapsible section. No JavaScript.
pub fn render_task_detail(record: &TaskRecord) -> ViewerResult<String> {
    let (label, class) = status_label(record.status);
    let raw_json = serde_json::to_string_pretty(record)
        .map_err(|e| crate::ViewerError::Message(format!("failed to serialize record: {e}")))?;

    let body = format!(
        r#"<nav><a href="/">Back to index</a></nav>
<h1>{id}</h1>
<table>
<tbody>
<tr><td>Status</td><td class="{class}">{label}</td></tr>
<tr><td>Categories</td><td>{categories}</td></tr>
<tr><td>Steps</td><td class="num">{steps}</td></tr>
<tr><td>Queries</td><td class="num">{queries}</td></tr>
<tr><td>MCP calls</td><td class="num">{mcp_calls}</td></tr>
<tr><td>UI interaction quality</td><td class="num mono">{uiq}</td></tr>
</tbody>
</table>
<details>
<summary>Raw record</summary>
<pre>{raw}</pre>
</details>"#,
        id = html_escape(&record.task_id),
        class = class,
        label = label,
        categories = category_labels(record),
        steps = record.step_count,
        queries = record.query_count,
        mcp_calls = record.mcp_call_count,
        uiq = fmt_uiq(record.ui_interaction_quality),
        raw = html_escape(&raw_json),
    );
    Ok(page_shell(&record.task_id, &body))
}
