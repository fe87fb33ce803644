//! Courtside Core Library
//!
//! Shared functionality for the league admin audit log viewer:
//! - Query builder mapping filter state to the admin API's query string
//! - Admin API client with session-scoped credentials
//! - Action and target taxonomy classification
//! - Before/after diff rendering of recorded values
//! - Pagination window and page summaries
//! - Entity deep links
//! - CSV and JSON export of the loaded page
//! - List-view state machine with last-request-wins fetching

pub mod client;
pub mod config;
pub mod diff;
pub mod error;
pub mod export;
pub mod links;
pub mod models;
pub mod pagination;
pub mod query;
pub mod taxonomy;
pub mod time;
pub mod viewer;

/// Test utilities including a mock admin API server
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use client::{fetch_taxonomies, AuditLogApi, HttpAuditLogApi, Session, Taxonomies};
pub use config::ClientConfig;
pub use diff::{render_diff, render_metadata, DiffPanel, DiffView, FieldChange};
pub use error::{Error, FetchError, Result};
pub use export::{default_columns, export_rows, ColumnSpec, ExportFormat, ExportTable};
pub use links::resolve_link;
pub use models::{
    ActionType, AdminRef, AuditLogEntry, FilterOption, LogPage, PaginationMetadata, TargetType,
};
pub use pagination::{visible_pages, PageSummary, PAGE_WINDOW};
pub use query::{build_query, DateRange, FilterChange, FilterState, DEFAULT_PAGE_LIMIT};
pub use taxonomy::{classify_action, classify_target, humanize, ActionCategory, TargetCategory};
pub use viewer::{Effect, LogController, LogViewer, RequestToken, ViewEvent, ViewStatus};
