//! Test utilities for courtside-core
//!
//! This module provides a mock admin API server that serves the three audit
//! log endpoints from fixture data, for development and integration tests.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicU16, Ordering};
use std::sync::{Arc, Mutex};

use axum::{
    extract::{RawQuery, State},
    http::{header::COOKIE, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use chrono::{DateTime, TimeZone, Utc};
use serde_json::{json, Value};
use tokio::sync::oneshot;

use crate::models::{ActionType, AdminRef, AuditLogEntry, TargetType};

/// Mock admin API server for testing and development
pub struct MockAdminServer {
    addr: SocketAddr,
    state: Arc<MockState>,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

#[derive(Default)]
struct MockState {
    entries: Vec<AuditLogEntry>,
    /// Non-zero makes `/admin/logs` answer with this status
    logs_failure: AtomicU16,
    /// Non-zero makes both taxonomy endpoints answer with this status
    taxonomy_failure: AtomicU16,
    /// Raw query strings received by `/admin/logs`
    queries: Mutex<Vec<String>>,
    /// Cookie headers received by any endpoint
    cookies: Mutex<Vec<String>>,
}

impl MockAdminServer {
    /// Start the mock server with the default fixtures on an available port
    pub async fn start() -> Self {
        Self::with_entries(fixture_entries()).await
    }

    /// Start the mock server serving the given entries
    pub async fn with_entries(entries: Vec<AuditLogEntry>) -> Self {
        let state = Arc::new(MockState {
            entries,
            ..Default::default()
        });

        let app = Router::new()
            .route("/admin/logs", get(handle_logs))
            .route("/admin/logs/action-types", get(handle_action_types))
            .route("/admin/logs/target-types", get(handle_target_types))
            .with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let (shutdown_tx, shutdown_rx) = oneshot::channel();

        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    shutdown_rx.await.ok();
                })
                .await
                .unwrap();
        });

        Self {
            addr,
            state,
            shutdown_tx: Some(shutdown_tx),
        }
    }

    /// Get the base URL for this mock server
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Make `/admin/logs` fail with the given status (`None` to recover)
    pub fn fail_logs(&self, status: Option<u16>) {
        self.state
            .logs_failure
            .store(status.unwrap_or(0), Ordering::SeqCst);
    }

    /// Make both taxonomy endpoints fail with the given status (`None` to recover)
    pub fn fail_taxonomies(&self, status: Option<u16>) {
        self.state
            .taxonomy_failure
            .store(status.unwrap_or(0), Ordering::SeqCst);
    }

    /// Query strings received by `/admin/logs`, oldest first
    pub fn received_queries(&self) -> Vec<String> {
        self.state.queries.lock().unwrap().clone()
    }

    /// Cookie headers received, oldest first
    pub fn received_cookies(&self) -> Vec<String> {
        self.state.cookies.lock().unwrap().clone()
    }

    /// Stop the mock server
    pub fn stop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

impl Drop for MockAdminServer {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Sample log covering creates, bans, unbans, resolves, system actions and
/// unknown action types
pub fn fixture_entries() -> Vec<AuditLogEntry> {
    let dana = AdminRef {
        id: "admin_1".into(),
        name: Some("Dana Reyes".into()),
        email: Some("dana@league.test".into()),
        image: None,
    };
    let sam = AdminRef {
        id: "admin_2".into(),
        name: Some("Sam Okafor".into()),
        email: Some("sam@league.test".into()),
        image: Some("https://cdn.league.test/sam.png".into()),
    };

    let at = |day: u32, hour: u32| -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, day, hour, 0, 0).unwrap()
    };

    let entry = |id: &str,
                 action: &str,
                 target: &str,
                 target_id: Option<&str>,
                 description: &str,
                 created_at: DateTime<Utc>,
                 admin: Option<&AdminRef>| AuditLogEntry {
        id: id.to_string(),
        action_type: ActionType::new(action),
        target_type: TargetType::new(target),
        target_id: target_id.map(str::to_string),
        description: description.to_string(),
        old_value: None,
        new_value: None,
        metadata: None,
        created_at,
        admin: admin.cloned(),
    };

    let mut entries = vec![
        AuditLogEntry {
            new_value: Some(json!({"name": "Spring Doubles", "sport": "PICKLEBALL"})),
            ..entry(
                "log_01",
                "LEAGUE_CREATE",
                "LEAGUE",
                Some("league_7"),
                "Created league Spring Doubles",
                at(1, 9),
                Some(&dana),
            )
        },
        AuditLogEntry {
            old_value: Some(json!({"status": "ACTIVE"})),
            new_value: Some(json!({"status": "BANNED", "reason": "Repeated no-shows"})),
            ..entry(
                "log_02",
                "PLAYER_BAN",
                "PLAYER",
                Some("player_42"),
                "Banned player Alex Kim",
                at(2, 14),
                Some(&sam),
            )
        },
        AuditLogEntry {
            old_value: Some(json!({"status": "BANNED"})),
            new_value: Some(json!({"status": "ACTIVE"})),
            ..entry(
                "log_03",
                "PLAYER_UNBAN",
                "PLAYER",
                Some("player_42"),
                "Unbanned player Alex Kim",
                at(5, 10),
                Some(&dana),
            )
        },
        AuditLogEntry {
            old_value: Some(json!({"status": "OPEN"})),
            new_value: Some(json!({"status": "RESOLVED", "winner": "team_a"})),
            metadata: Some(json!({"matchId": "match_3"})),
            ..entry(
                "log_04",
                "DISPUTE_RESOLVE",
                "DISPUTE",
                Some("dispute_9"),
                "Resolved score dispute for week 3",
                at(8, 16),
                Some(&sam),
            )
        },
        AuditLogEntry {
            old_value: Some(json!({})),
            new_value: Some(json!({"maxTeams": 16})),
            ..entry(
                "log_05",
                "SETTINGS_UPDATE",
                "SETTINGS",
                None,
                "Nightly settings sync",
                at(10, 2),
                None,
            )
        },
        entry(
            "log_06",
            "MATCH_VOID",
            "MATCH",
            Some("match_3"),
            "Voided match after walkover",
            at(12, 18),
            Some(&dana),
        ),
        entry(
            "log_07",
            "BRACKET_RESEED",
            "DIVISION",
            Some("div_2"),
            "Reseeded division bracket",
            at(15, 11),
            Some(&sam),
        ),
    ];

    // A second page's worth of season edits
    for i in 0..60u32 {
        entries.push(AuditLogEntry {
            old_value: Some(json!({"week": i})),
            new_value: Some(json!({"week": i + 1})),
            ..entry(
                &format!("log_season_{:02}", i),
                "SEASON_UPDATE",
                "SEASON",
                Some("season_2024"),
                &format!("Advanced season to week {}", i + 1),
                at(20, 0) + chrono::Duration::minutes(i64::from(i)),
                Some(&dana),
            )
        });
    }

    // Newest first, as the server returns them
    entries.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    entries
}

fn record_cookie(state: &MockState, headers: &HeaderMap) {
    if let Some(cookie) = headers.get(COOKIE).and_then(|v| v.to_str().ok()) {
        state.cookies.lock().unwrap().push(cookie.to_string());
    }
}

fn failure(status: u16) -> Option<Response> {
    if status == 0 {
        return None;
    }
    let code = StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    if code == StatusCode::UNAUTHORIZED {
        // Bare rejection with no JSON body, like an auth proxy sends
        return Some(code.into_response());
    }
    let body = json!({"success": false, "message": format!("Mock failure ({})", status)});
    Some((code, Json(body)).into_response())
}

/// `GET /admin/logs`
async fn handle_logs(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
    RawQuery(query): RawQuery,
) -> Response {
    record_cookie(&state, &headers);
    let query = query.unwrap_or_default();
    state.queries.lock().unwrap().push(query.clone());

    if let Some(response) = failure(state.logs_failure.load(Ordering::SeqCst)) {
        return response;
    }

    let params: HashMap<String, String> = serde_urlencoded::from_str(&query).unwrap_or_default();
    let page: u32 = params
        .get("page")
        .and_then(|p| p.parse().ok())
        .unwrap_or(1)
        .max(1);
    let limit: u32 = params
        .get("limit")
        .and_then(|l| l.parse().ok())
        .unwrap_or(50)
        .max(1);
    let start = params
        .get("startDate")
        .and_then(|s| DateTime::parse_from_rfc3339(s).ok());
    let end = params
        .get("endDate")
        .and_then(|s| DateTime::parse_from_rfc3339(s).ok());
    let search = params.get("search").map(|s| s.to_lowercase());

    let matching: Vec<&AuditLogEntry> = state
        .entries
        .iter()
        .filter(|e| {
            params
                .get("actionType")
                .map_or(true, |a| e.action_type.as_str() == a.as_str())
        })
        .filter(|e| {
            params
                .get("targetType")
                .map_or(true, |t| e.target_type.as_str() == t.as_str())
        })
        .filter(|e| start.map_or(true, |s| e.created_at >= s))
        .filter(|e| end.map_or(true, |s| e.created_at <= s))
        .filter(|e| {
            search.as_ref().map_or(true, |q| {
                e.description.to_lowercase().contains(q)
                    || e.actor().to_lowercase().contains(q)
            })
        })
        .collect();

    let total = matching.len() as u64;
    let total_pages = total.div_ceil(u64::from(limit)) as u32;
    let data: Vec<&AuditLogEntry> = matching
        .into_iter()
        .skip(((page - 1) * limit) as usize)
        .take(limit as usize)
        .collect();

    Json(json!({
        "success": true,
        "data": data,
        "pagination": {
            "page": page,
            "limit": limit,
            "total": total,
            "totalPages": total_pages,
        }
    }))
    .into_response()
}

fn distinct_options(values: impl Iterator<Item = String>) -> Value {
    let mut values: Vec<String> = values.collect();
    values.sort();
    values.dedup();
    let options: Vec<Value> = values
        .into_iter()
        .map(|v| json!({"value": v, "label": crate::taxonomy::humanize(&v)}))
        .collect();
    json!({"success": true, "data": options})
}

/// `GET /admin/logs/action-types`
async fn handle_action_types(State(state): State<Arc<MockState>>, headers: HeaderMap) -> Response {
    record_cookie(&state, &headers);
    if let Some(response) = failure(state.taxonomy_failure.load(Ordering::SeqCst)) {
        return response;
    }
    Json(distinct_options(
        state.entries.iter().map(|e| e.action_type.as_str().to_string()),
    ))
    .into_response()
}

/// `GET /admin/logs/target-types`
async fn handle_target_types(State(state): State<Arc<MockState>>, headers: HeaderMap) -> Response {
    record_cookie(&state, &headers);
    if let Some(response) = failure(state.taxonomy_failure.load(Ordering::SeqCst)) {
        return response;
    }
    Json(distinct_options(
        state.entries.iter().map(|e| e.target_type.as_str().to_string()),
    ))
    .into_response()
}
