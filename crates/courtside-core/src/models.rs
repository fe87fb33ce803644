//! Domain models for the admin audit log
//!
//! Entries are server-owned and read-only here. Action and target types are
//! open string newtypes: the server can add new values without a client
//! release, so nothing in this crate matches on them exhaustively.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::taxonomy::{self, ActionCategory, TargetCategory};

/// Known target types
pub const TARGET_PLAYER: &str = "PLAYER";
pub const TARGET_LEAGUE: &str = "LEAGUE";
pub const TARGET_SEASON: &str = "SEASON";
pub const TARGET_DIVISION: &str = "DIVISION";
pub const TARGET_MATCH: &str = "MATCH";
pub const TARGET_DISPUTE: &str = "DISPUTE";
pub const TARGET_SETTINGS: &str = "SETTINGS";
pub const TARGET_BUG_REPORT: &str = "BUG_REPORT";
pub const TARGET_ADMIN: &str = "ADMIN";
pub const TARGET_OTHER: &str = "OTHER";

/// An admin action name such as `PLAYER_BAN` or `LEAGUE_CREATE`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActionType(pub String);

impl ActionType {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn category(&self) -> ActionCategory {
        taxonomy::classify_action(&self.0)
    }

    pub fn label(&self) -> String {
        taxonomy::humanize(&self.0)
    }
}

impl std::fmt::Display for ActionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ActionType {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// The kind of entity an action was applied to (`PLAYER`, `SEASON`, ...)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TargetType(pub String);

impl TargetType {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn category(&self) -> TargetCategory {
        taxonomy::classify_target(&self.0)
    }

    pub fn label(&self) -> String {
        taxonomy::humanize(&self.0)
    }
}

impl std::fmt::Display for TargetType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for TargetType {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// The admin who performed an action
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdminRef {
    pub id: String,
    pub name: Option<String>,
    pub email: Option<String>,
    pub image: Option<String>,
}

impl AdminRef {
    /// Name if known, otherwise the email, otherwise the id
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .filter(|n| !n.is_empty())
            .or(self.email.as_deref().filter(|e| !e.is_empty()))
            .unwrap_or(self.id.as_str())
    }
}

/// A single audit log entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditLogEntry {
    pub id: String,
    pub action_type: ActionType,
    pub target_type: TargetType,
    #[serde(default)]
    pub target_id: Option<String>,
    pub description: String,
    #[serde(default)]
    pub old_value: Option<Value>,
    #[serde(default)]
    pub new_value: Option<Value>,
    #[serde(default)]
    pub metadata: Option<Value>,
    pub created_at: DateTime<Utc>,
    /// `None` for system-originated actions
    #[serde(default)]
    pub admin: Option<AdminRef>,
}

impl AuditLogEntry {
    /// Who performed the action, "System" when no admin is attached
    pub fn actor(&self) -> &str {
        self.admin
            .as_ref()
            .map(|a| a.display_name())
            .unwrap_or("System")
    }

    pub fn is_system(&self) -> bool {
        self.admin.is_none()
    }

    /// Deep link into the rest of the dashboard, if the target is addressable
    pub fn link(&self) -> Option<String> {
        crate::links::resolve_link(self.target_type.as_str(), self.target_id.as_deref())
    }
}

/// Server-side pagination, treated as authoritative
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationMetadata {
    pub page: u32,
    pub limit: u32,
    pub total: u64,
    pub total_pages: u32,
}

/// One option of a filter dropdown
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterOption {
    pub value: String,
    #[serde(default)]
    pub label: String,
}

impl FilterOption {
    /// The label, falling back to a humanized value when the server sent none
    pub fn display_label(&self) -> String {
        if self.label.trim().is_empty() {
            taxonomy::humanize(&self.value)
        } else {
            self.label.clone()
        }
    }
}

/// A page of entries plus its pagination metadata
#[derive(Debug, Clone, PartialEq)]
pub struct LogPage {
    pub entries: Vec<AuditLogEntry>,
    pub pagination: PaginationMetadata,
}

/// Standard admin API envelope
#[derive(Debug, Deserialize)]
pub(crate) struct ApiResponse<T> {
    #[serde(default)]
    pub success: bool,
    pub data: Option<T>,
    pub pagination: Option<PaginationMetadata>,
    pub message: Option<String>,
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    /// Human-readable failure message carried by the envelope, if any
    pub fn failure_message(&self) -> Option<&str> {
        self.message
            .as_deref()
            .or(self.error.as_deref())
            .filter(|m| !m.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_json() -> &'static str {
        r#"{
            "id": "log_1",
            "actionType": "PLAYER_BAN",
            "targetType": "PLAYER",
            "targetId": "p_42",
            "description": "Banned player for repeated no-shows",
            "oldValue": {"status": "ACTIVE"},
            "newValue": {"status": "BANNED"},
            "createdAt": "2024-03-01T12:30:00.000Z",
            "admin": {"id": "a_1", "name": "Dana", "email": "dana@example.com", "image": null}
        }"#
    }

    #[test]
    fn test_entry_deserializes_from_wire_format() {
        let entry: AuditLogEntry = serde_json::from_str(sample_json()).unwrap();
        assert_eq!(entry.id, "log_1");
        assert_eq!(entry.action_type.as_str(), "PLAYER_BAN");
        assert_eq!(entry.target_id.as_deref(), Some("p_42"));
        assert!(entry.metadata.is_none());
        assert_eq!(entry.actor(), "Dana");
        assert_eq!(entry.link().as_deref(), Some("/players/p_42"));
    }

    #[test]
    fn test_system_entry_has_no_admin() {
        let json = r#"{
            "id": "log_2",
            "actionType": "SETTINGS_UPDATE",
            "targetType": "SETTINGS",
            "description": "Nightly settings sync",
            "createdAt": "2024-03-01T00:00:00Z"
        }"#;
        let entry: AuditLogEntry = serde_json::from_str(json).unwrap();
        assert!(entry.is_system());
        assert_eq!(entry.actor(), "System");
        assert!(entry.link().is_none());
    }

    #[test]
    fn test_admin_display_name_fallbacks() {
        let mut admin = AdminRef {
            id: "a_9".into(),
            name: None,
            email: Some("ops@example.com".into()),
            image: None,
        };
        assert_eq!(admin.display_name(), "ops@example.com");
        admin.email = None;
        assert_eq!(admin.display_name(), "a_9");
    }

    #[test]
    fn test_filter_option_label_fallback() {
        let opt: FilterOption = serde_json::from_str(r#"{"value":"MATCH_VOID"}"#).unwrap();
        assert_eq!(opt.display_label(), "Match Void");

        let opt = FilterOption {
            value: "MATCH_VOID".into(),
            label: "Void match".into(),
        };
        assert_eq!(opt.display_label(), "Void match");
    }

    #[test]
    fn test_pagination_wire_names() {
        let p: PaginationMetadata =
            serde_json::from_str(r#"{"page":2,"limit":50,"total":120,"totalPages":3}"#).unwrap();
        assert_eq!(p.total_pages, 3);
        assert_eq!(p.total, 120);
    }
}
