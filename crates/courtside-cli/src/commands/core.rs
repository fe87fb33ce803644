//! Shared command utilities
//!
//! This module contains:
//! - `load_config` - Resolve config file, environment and flags
//! - `build_api` - Create the admin API client
//! - `filter_state` - Turn filter flags into a `FilterState`
//! - `load_page` - Run one fetch through the list view

use std::path::Path;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use courtside_core::{
    AuditLogApi, ClientConfig, DateRange, FilterChange, FilterState, HttpAuditLogApi,
    LogController, LogViewer, ViewEvent,
};

use crate::cli::FilterArgs;

/// Resolve configuration; command-line flags win over file and environment
pub fn load_config(
    path: Option<&Path>,
    base_url: Option<&str>,
    session: Option<&str>,
) -> Result<ClientConfig> {
    let mut config = ClientConfig::load(path).context("Failed to load configuration")?;

    if let Some(url) = base_url {
        config.base_url = url.to_string();
    }
    if let Some(session) = session {
        config.session = Some(session.to_string());
    }
    config.validate()?;

    Ok(config)
}

pub fn build_api(config: &ClientConfig) -> Result<Arc<HttpAuditLogApi>> {
    let api = HttpAuditLogApi::new(config).context("Failed to create API client")?;
    if !api.session().is_authenticated() {
        tracing::warn!("No session configured; the admin API will likely answer 401");
    }
    Ok(Arc::new(api))
}

/// Build the filter state the same way the list view applies user input
pub fn filter_state(args: &FilterArgs, default_limit: u32) -> Result<FilterState> {
    let limit = args.limit.unwrap_or(default_limit);
    if limit == 0 {
        bail!("--limit must be at least 1");
    }
    if args.page == 0 {
        bail!("--page must be at least 1");
    }

    let mut filters = FilterState::with_limit(limit);
    if let Some(search) = &args.search {
        filters.apply(FilterChange::Search(search.clone()));
    }
    filters.apply(FilterChange::ActionType(args.action.clone()));
    filters.apply(FilterChange::TargetType(args.target.clone()));

    let range = DateRange::parse_days(args.from.as_deref(), args.to.as_deref())
        .context("Invalid --from/--to (use YYYY-MM-DD)")?;
    filters.apply(FilterChange::DateRange(Some(range)));

    // Filter changes reset to page 1, so the page goes last
    filters.page = args.page;
    Ok(filters)
}

/// Fetch one page through the list view and return its final state
pub async fn load_page<A: AuditLogApi + 'static>(
    api: Arc<A>,
    filters: FilterState,
) -> Result<LogViewer> {
    let controller = LogController::new(api, LogViewer::with_filters(filters));
    controller
        .dispatch_and_wait(ViewEvent::RefreshRequested)
        .await;

    let viewer = controller.snapshot();
    if let Some(err) = viewer.error() {
        bail!("Failed to load audit logs: {}", err);
    }
    Ok(viewer)
}
