//! Integration tests for courtside-core
//!
//! These tests drive the list view through `LogController` against an API
//! whose responses are released by hand, so arrival order is under test
//! control.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use serde_json::json;
use tokio::sync::oneshot;

use courtside_core::{
    build_query, default_columns, export_rows, render_diff, AuditLogApi, AuditLogEntry,
    ActionType, Error, ExportFormat, FilterChange, FilterOption, FilterState, LogController,
    LogPage, LogViewer, PaginationMetadata, Result, TargetType, ViewEvent, ViewStatus,
};

type Gate = oneshot::Receiver<Result<LogPage>>;

/// API whose `list_logs` calls block until the test releases them.
///
/// Each call is keyed by the query string it would send, so concurrent
/// fetches are told apart regardless of task scheduling.
#[derive(Default)]
struct GatedApi {
    gates: Mutex<HashMap<String, Gate>>,
    issued: Mutex<Vec<String>>,
    fail_taxonomies: bool,
}

impl GatedApi {
    /// Register a pending response for the given filters
    fn gate(&self, filters: &FilterState) -> oneshot::Sender<Result<LogPage>> {
        let (tx, rx) = oneshot::channel();
        self.gates.lock().unwrap().insert(build_query(filters), rx);
        tx
    }

    fn issued(&self) -> Vec<String> {
        self.issued.lock().unwrap().clone()
    }
}

#[async_trait]
impl AuditLogApi for GatedApi {
    async fn list_logs(&self, filters: &FilterState) -> Result<LogPage> {
        let key = build_query(filters);
        self.issued.lock().unwrap().push(key.clone());
        let gate = self.gates.lock().unwrap().remove(&key);
        match gate {
            Some(rx) => rx
                .await
                .unwrap_or_else(|_| Err(Error::InvalidData("gate dropped".into()))),
            None => Err(Error::InvalidData(format!("no response registered for {}", key))),
        }
    }

    async fn action_types(&self) -> Result<Vec<FilterOption>> {
        if self.fail_taxonomies {
            return Err(Error::Api {
                status: Some(500),
                message: "taxonomy lookup failed".into(),
            });
        }
        Ok(vec![FilterOption {
            value: "PLAYER_BAN".into(),
            label: String::new(),
        }])
    }

    async fn target_types(&self) -> Result<Vec<FilterOption>> {
        if self.fail_taxonomies {
            return Err(Error::Api {
                status: Some(500),
                message: "taxonomy lookup failed".into(),
            });
        }
        Ok(vec![FilterOption {
            value: "PLAYER".into(),
            label: "Players".into(),
        }])
    }
}

fn entry(id: &str, action: &str) -> AuditLogEntry {
    AuditLogEntry {
        id: id.to_string(),
        action_type: ActionType::new(action),
        target_type: TargetType::new("PLAYER"),
        target_id: Some(format!("player_{}", id)),
        description: format!("{} on {}", action, id),
        old_value: Some(json!({"status": "ACTIVE"})),
        new_value: Some(json!({"status": "BANNED"})),
        metadata: None,
        created_at: Utc.with_ymd_and_hms(2024, 4, 2, 8, 15, 0).unwrap(),
        admin: None,
    }
}

fn page(ids: &[&str], page: u32, total_pages: u32) -> LogPage {
    LogPage {
        entries: ids.iter().map(|id| entry(id, "PLAYER_BAN")).collect(),
        pagination: PaginationMetadata {
            page,
            limit: 50,
            total: u64::from(total_pages) * 50,
            total_pages,
        },
    }
}

fn filters_with_search(search: &str) -> FilterState {
    FilterState {
        search_query: search.into(),
        ..Default::default()
    }
}

fn ids(viewer: &LogViewer) -> Vec<String> {
    viewer.entries().iter().map(|e| e.id.clone()).collect()
}

// =============================================================================
// Last-request-wins
// =============================================================================

#[tokio::test]
async fn test_out_of_order_responses_keep_latest() {
    let api = Arc::new(GatedApi::default());
    let release_a = api.gate(&filters_with_search("alpha"));
    let release_b = api.gate(&filters_with_search("beta"));

    let controller = LogController::new(api.clone(), LogViewer::new(50));
    let task_a = controller
        .dispatch(ViewEvent::FilterChanged(FilterChange::Search("alpha".into())))
        .expect("search change should fetch");
    let task_b = controller
        .dispatch(ViewEvent::FilterChanged(FilterChange::Search("beta".into())))
        .expect("search change should fetch");

    // Newer request answers first
    release_b.send(Ok(page(&["b1", "b2"], 1, 1))).unwrap();
    task_b.await.unwrap();
    let state = controller.snapshot();
    assert_eq!(state.status(), &ViewStatus::Success);
    assert_eq!(ids(&state), vec!["b1", "b2"]);

    // Older request answers late and is dropped
    release_a.send(Ok(page(&["a1"], 1, 1))).unwrap();
    task_a.await.unwrap();
    let state = controller.snapshot();
    assert_eq!(state.status(), &ViewStatus::Success);
    assert_eq!(ids(&state), vec!["b1", "b2"]);
    assert_eq!(state.filters().search_query, "beta");
    assert_eq!(api.issued().len(), 2);
}

#[tokio::test]
async fn test_stale_failure_does_not_clobber_success() {
    let api = Arc::new(GatedApi::default());
    let release_a = api.gate(&filters_with_search("alpha"));
    let release_b = api.gate(&filters_with_search("beta"));

    let controller = LogController::new(api.clone(), LogViewer::new(50));
    let task_a = controller
        .dispatch(ViewEvent::FilterChanged(FilterChange::Search("alpha".into())))
        .unwrap();
    let task_b = controller
        .dispatch(ViewEvent::FilterChanged(FilterChange::Search("beta".into())))
        .unwrap();

    release_a
        .send(Err(Error::Api {
            status: Some(500),
            message: "Internal error".into(),
        }))
        .unwrap();
    task_a.await.unwrap();
    // Still waiting on the latest request
    assert!(controller.with_viewer(|v| v.is_loading()));

    release_b.send(Ok(page(&["b1"], 1, 1))).unwrap();
    task_b.await.unwrap();
    let state = controller.snapshot();
    assert!(state.error().is_none());
    assert_eq!(ids(&state), vec!["b1"]);
}

// =============================================================================
// Error handling
// =============================================================================

#[tokio::test]
async fn test_error_keeps_last_good_entries_and_retry_recovers() {
    let api = Arc::new(GatedApi::default());
    let controller = LogController::new(api.clone(), LogViewer::new(50));

    let first = api.gate(&FilterState::default());
    first.send(Ok(page(&["e1", "e2"], 1, 1))).unwrap();
    controller
        .dispatch_and_wait(ViewEvent::RefreshRequested)
        .await;
    assert_eq!(ids(&controller.snapshot()), vec!["e1", "e2"]);

    let failing = api.gate(&FilterState::default());
    failing
        .send(Err(Error::Api {
            status: Some(401),
            message: "Unauthorized".into(),
        }))
        .unwrap();
    controller
        .dispatch_and_wait(ViewEvent::RefreshRequested)
        .await;
    let state = controller.snapshot();
    assert_eq!(state.error().map(|e| e.message.as_str()), Some("Unauthorized"));
    assert_eq!(ids(&state), vec!["e1", "e2"]);

    let retry = api.gate(&FilterState::default());
    retry.send(Ok(page(&["e3"], 1, 1))).unwrap();
    controller.dispatch_and_wait(ViewEvent::RetryRequested).await;
    let state = controller.snapshot();
    assert_eq!(state.status(), &ViewStatus::Success);
    assert_eq!(ids(&state), vec!["e3"]);

    // Retry reissues the same query as the failed request
    let issued = api.issued();
    assert_eq!(issued[1], issued[2]);
}

// =============================================================================
// Filters and pagination
// =============================================================================

#[tokio::test]
async fn test_filter_change_resets_to_first_page() {
    let api = Arc::new(GatedApi::default());
    let controller = LogController::new(api.clone(), LogViewer::new(50));

    api.gate(&FilterState::default())
        .send(Ok(page(&["p1"], 1, 4)))
        .unwrap();
    controller
        .dispatch_and_wait(ViewEvent::RefreshRequested)
        .await;

    let page_three = FilterState {
        page: 3,
        ..Default::default()
    };
    api.gate(&page_three).send(Ok(page(&["p3"], 3, 4))).unwrap();
    controller.dispatch_and_wait(ViewEvent::PageChanged(3)).await;
    assert_eq!(controller.with_viewer(|v| v.filters().page), 3);
    assert_eq!(controller.with_viewer(|v| v.page_buttons()), vec![1, 2, 3, 4]);

    let banned = FilterState {
        action_type: Some("PLAYER_BAN".into()),
        ..Default::default()
    };
    api.gate(&banned).send(Ok(page(&["x1"], 1, 1))).unwrap();
    controller
        .dispatch_and_wait(ViewEvent::FilterChanged(FilterChange::ActionType(Some(
            "PLAYER_BAN".into(),
        ))))
        .await;

    assert_eq!(
        api.issued(),
        vec![
            "page=1&limit=50",
            "page=3&limit=50",
            "page=1&limit=50&actionType=PLAYER_BAN",
        ]
    );
    let state = controller.snapshot();
    assert_eq!(state.filters().page, 1);
    assert_eq!(ids(&state), vec!["x1"]);
}

#[tokio::test]
async fn test_page_request_beyond_total_is_clamped() {
    let api = Arc::new(GatedApi::default());
    let controller = LogController::new(api.clone(), LogViewer::new(50));

    api.gate(&FilterState::default())
        .send(Ok(page(&["p1"], 1, 2)))
        .unwrap();
    controller
        .dispatch_and_wait(ViewEvent::RefreshRequested)
        .await;

    let last = FilterState {
        page: 2,
        ..Default::default()
    };
    api.gate(&last).send(Ok(page(&["p2"], 2, 2))).unwrap();
    controller.dispatch_and_wait(ViewEvent::PageChanged(9)).await;
    assert_eq!(api.issued().last().unwrap(), "page=2&limit=50");

    let summary = controller.with_viewer(|v| v.summary()).unwrap();
    assert_eq!(summary.to_string(), "Showing 51 to 100 of 100 entries");
}

// =============================================================================
// Taxonomies, details and export
// =============================================================================

#[tokio::test]
async fn test_taxonomy_failure_does_not_block_list() {
    let api = Arc::new(GatedApi {
        fail_taxonomies: true,
        ..Default::default()
    });
    let controller = LogController::new(api.clone(), LogViewer::new(50));

    api.gate(&FilterState::default())
        .send(Ok(page(&["e1"], 1, 1)))
        .unwrap();
    let fetch = controller.dispatch(ViewEvent::RefreshRequested).unwrap();
    controller.load_taxonomies().await;
    fetch.await.unwrap();

    let state = controller.snapshot();
    assert!(state.taxonomies().action_types.is_empty());
    assert!(state.taxonomies().target_types.is_empty());
    assert_eq!(state.status(), &ViewStatus::Success);
}

#[tokio::test]
async fn test_taxonomies_loaded_into_view() {
    let api = Arc::new(GatedApi::default());
    let controller = LogController::new(api, LogViewer::new(50));
    controller.load_taxonomies().await;

    let taxonomies = controller.with_viewer(|v| v.taxonomies().clone());
    assert_eq!(taxonomies.action_types[0].display_label(), "Player Ban");
    assert_eq!(taxonomies.target_types[0].display_label(), "Players");
}

#[tokio::test]
async fn test_loaded_page_details_and_export() {
    let api = Arc::new(GatedApi::default());
    let controller = LogController::new(api.clone(), LogViewer::new(50));

    api.gate(&FilterState::default())
        .send(Ok(page(&["e1", "e2"], 1, 1)))
        .unwrap();
    controller
        .dispatch_and_wait(ViewEvent::RefreshRequested)
        .await;

    let state = controller.snapshot();
    let selected = state.find_entry("e2").unwrap();
    assert_eq!(selected.actor(), "System");
    assert_eq!(selected.link().as_deref(), Some("/players/player_e2"));

    let diff = render_diff(selected.old_value.as_ref(), selected.new_value.as_ref());
    assert_eq!(diff.changes.len(), 1);
    assert_eq!(diff.changes[0].to_string(), "~ status: \"ACTIVE\" → \"BANNED\"");

    let table = export_rows(&default_columns(), state.entries()).unwrap();
    assert_eq!(table.len(), 2);
    let csv = table.render(ExportFormat::Csv).unwrap();
    let mut lines = csv.lines();
    assert_eq!(
        lines.next().unwrap(),
        "Date,Admin,Email,Action,Target Type,Target ID,Description"
    );
    assert_eq!(
        lines.next().unwrap(),
        "2024-04-02 08:15:00 UTC,,,Player Ban,Player,player_e1,PLAYER_BAN on e1"
    );
}
