//! Static export pipeline: enumerate routes, render, rewrite links, write.
//!
//! The pipeline is decoupled from any live server process: the Route
//! Enumerator computes every reachable view up front and the crawler drives
//! a `RenderPage` implementation through them, one output file per route.

pub mod crawler;
pub mod links;
pub mod routes;

pub use crawler::{ExportSummary, FailedRoute, export_site};
pub use links::{relative_href, rewrite_links};
pub use routes::{CategoryKind, PlannedRoute, Route, RoutePlan, ViewKind};
