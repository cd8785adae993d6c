//! Route enumeration for static export.
//!
//! A route identifies one renderable view. The plan assigns every route a
//! server URL (what rendered pages link to) and an output file path (where
//! the crawler writes it). Slug assignment happens after sorting, so two
//! enumerations over the same on-disk state produce identical plans.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::ingest::scanner::ScannedRoot;

/// Kind of view a route addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ViewKind {
    Index,
    TaskDetail,
    CategoryListing,
}

/// Category axis for listing pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CategoryKind {
    Standard,
    Mcp,
    UiInteraction,
}

impl CategoryKind {
    /// Fixed enumeration order for listing pages.
    pub const ALL: [CategoryKind; 3] = [
        CategoryKind::Standard,
        CategoryKind::Mcp,
        CategoryKind::UiInteraction,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CategoryKind::Standard => "standard",
            CategoryKind::Mcp => "mcp",
            CategoryKind::UiInteraction => "ui-interaction",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            CategoryKind::Standard => "Standard",
            CategoryKind::Mcp => "MCP",
            CategoryKind::UiInteraction => "UI Interaction",
        }
    }
}

/// One logical, addressable view over the log data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Route {
    pub kind: ViewKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub task_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<CategoryKind>,
}

impl Route {
    pub fn index() -> Self {
        Route {
            kind: ViewKind::Index,
            task_id: None,
            category: None,
        }
    }

    pub fn task(task_id: impl Into<String>) -> Self {
        Route {
            kind: ViewKind::TaskDetail,
            task_id: Some(task_id.into()),
            category: None,
        }
    }

    pub fn category(category: CategoryKind) -> Self {
        Route {
            kind: ViewKind::CategoryListing,
            task_id: None,
            category: Some(category),
        }
    }
}

/// A route together with its assigned server URL and output file path
/// (relative to the export root, forward slashes).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlannedRoute {
    pub route: Route,
    pub url: String,
    pub output_path: String,
}

/// The exhaustive, deterministically ordered route set for one log root.
#[derive(Debug, Clone)]
pub struct RoutePlan {
    pub routes: Vec<PlannedRoute>,
    task_slugs: BTreeMap<String, String>,
}

/// Reduce a task id to a path-safe slug: `[A-Za-z0-9._-]` kept, everything
/// else replaced with `_`.
fn sanitize_slug(task_id: &str) -> String {
    let slug: String = task_id
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '.' || c == '_' || c == '-' {
                c
            } else {
                '_'
            }
        })
        .collect();
    if slug.is_empty() { "_".to_string() } else { slug }
}

impl RoutePlan {
    /// Enumerate the complete route set reachable from the index page:
    /// the index itself, one listing per non-empty category, and one
    /// detail page per task, sorted by task id.
    pub fn build(scanned: &ScannedRoot) -> RoutePlan {
        let mut routes = Vec::new();

        routes.push(PlannedRoute {
            route: Route::index(),
            url: "/".to_string(),
            output_path: "index.html".to_string(),
        });

        for category in CategoryKind::ALL {
            let has_member = scanned.records.iter().any(|r| match category {
                CategoryKind::Standard => r.categories.is_standard(),
                CategoryKind::Mcp => r.categories.mcp,
                CategoryKind::UiInteraction => r.categories.ui_interaction,
            });
            if has_member {
                routes.push(PlannedRoute {
                    route: Route::category(category),
                    url: format!("/category/{}", category.as_str()),
                    output_path: format!("categories/{}.html", category.as_str()),
                });
            }
        }

        let mut task_ids: Vec<&str> = scanned.records.iter().map(|r| r.task_id.as_str()).collect();
        task_ids.sort_unstable();
        task_ids.dedup();

        // Slugs are assigned in sorted order; collisions get a deterministic
        // numeric suffix.
        let mut task_slugs = BTreeMap::new();
        let mut taken: std::collections::HashSet<String> = std::collections::HashSet::new();
        for task_id in task_ids {
            let base = sanitize_slug(task_id);
            let mut slug = base.clone();
            let mut n = 1;
            while !taken.insert(slug.clone()) {
                n += 1;
                slug = format!("{base}-{n}");
            }
            routes.push(PlannedRoute {
                route: Route::task(task_id),
                url: format!("/task/{slug}"),
                output_path: format!("tasks/{slug}.html"),
            });
            task_slugs.insert(task_id.to_string(), slug);
        }

        RoutePlan { routes, task_slugs }
    }

    /// Server URL for a task's detail page, if the task is in the plan.
    pub fn task_url(&self, task_id: &str) -> Option<String> {
        self.task_slugs.get(task_id).map(|slug| format!("/task/{slug}"))
    }

    /// Look up the planned route for a server URL.
    pub fn route_for_url(&self, url: &str) -> Option<&PlannedRoute> {
        self.routes.iter().find(|p| p.url == url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::record::{Categories, TaskRecord, TaskStatus};

    fn scanned_with(records: Vec<TaskRecord>) -> ScannedRoot {
        ScannedRoot {
            root: std::path::PathBuf::from("logs_x"),
            display_name: "logs_x".to_string(),
            records,
            skipped: Vec::new(),
        }
    }

    fn record(task_id: &str, categories: Categories) -> TaskRecord {
        TaskRecord {
            task_id: task_id.to_string(),
            status: TaskStatus::Success,
            categories,
            step_count: 0,
            query_count: 0,
            mcp_call_count: 0,
            ui_interaction_quality: None,
        }
    }

    #[test]
    fn test_empty_root_has_only_index() {
        let plan = RoutePlan::build(&scanned_with(vec![]));
        assert_eq!(plan.routes.len(), 1);
        assert_eq!(plan.routes[0].route, Route::index());
        assert_eq!(plan.routes[0].output_path, "index.html");
    }

    #[test]
    fn test_category_listing_only_when_nonempty() {
        let mcp = Categories {
            mcp: true,
            ui_interaction: false,
        };
        let plan = RoutePlan::build(&scanned_with(vec![record("t1", mcp)]));

        let categories: Vec<CategoryKind> = plan
            .routes
            .iter()
            .filter_map(|p| p.route.category)
            .collect();
        assert_eq!(categories, vec![CategoryKind::Mcp]);
    }

    #[test]
    fn test_tasks_sorted_by_id() {
        let plan = RoutePlan::build(&scanned_with(vec![
            record("zeta", Categories::default()),
            record("alpha", Categories::default()),
        ]));

        let tasks: Vec<&str> = plan
            .routes
            .iter()
            .filter_map(|p| p.route.task_id.as_deref())
            .collect();
        assert_eq!(tasks, vec!["alpha", "zeta"]);
    }

    #[test]
    fn test_slug_sanitization_and_collision() {
        let plan = RoutePlan::build(&scanned_with(vec![
            record("a b", Categories::default()),
            record("a/b", Categories::default()),
        ]));

        // Both sanitize to "a_b"; the second in sorted order gets a suffix.
        // "a b" < "a/b" in byte order.
        assert_eq!(plan.task_url("a b").unwrap(), "/task/a_b");
        assert_eq!(plan.task_url("a/b").unwrap(), "/task/a_b-2");
    }

    #[test]
    fn test_enumeration_deterministic() {
        let records = vec![
            record("b", Categories::default()),
            record(
                "a",
                Categories {
                    mcp: true,
                    ui_interaction: true,
                },
            ),
        ];
        let plan1 = RoutePlan::build(&scanned_with(records.clone()));
        let plan2 = RoutePlan::build(&scanned_with(records));
        assert_eq!(plan1.routes, plan2.routes);
    }

    #[test]
    fn test_url_and_path_pairing() {
        let plan = RoutePlan::build(&scanned_with(vec![record("t1", Categories::default())]));

        let planned = plan.route_for_url("/task/t1").unwrap();
        assert_eq!(planned.output_path, "tasks/t1.html");
        let index = plan.route_for_url("/").unwrap();
        assert_eq!(index.output_path, "index.html");
    }
}
