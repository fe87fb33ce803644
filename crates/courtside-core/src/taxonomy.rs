//! Presentation categories for action and target types
//!
//! The server owns both enums and can grow them at any time, so every lookup
//! here is total: unknown values land in `ActionCategory::Neutral` or
//! `TargetCategory::Other`.

use serde::Serialize;

use crate::models::{
    TARGET_ADMIN, TARGET_BUG_REPORT, TARGET_DISPUTE, TARGET_DIVISION, TARGET_LEAGUE,
    TARGET_MATCH, TARGET_PLAYER, TARGET_SEASON, TARGET_SETTINGS,
};

/// Badge category for an admin action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionCategory {
    Create,
    Update,
    Delete,
    Resolve,
    Neutral,
}

impl ActionCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Update => "update",
            Self::Delete => "delete",
            Self::Resolve => "resolve",
            Self::Neutral => "neutral",
        }
    }

    /// Badge color
    pub fn color(&self) -> &'static str {
        match self {
            Self::Create => "green",
            Self::Update => "blue",
            Self::Delete => "red",
            Self::Resolve => "purple",
            Self::Neutral => "gray",
        }
    }

    /// Icon name
    pub fn icon(&self) -> &'static str {
        match self {
            Self::Create => "plus-circle",
            Self::Update => "pencil",
            Self::Delete => "trash",
            Self::Resolve => "check-circle",
            Self::Neutral => "activity",
        }
    }

    pub fn all() -> &'static [ActionCategory] {
        &[
            Self::Create,
            Self::Update,
            Self::Delete,
            Self::Resolve,
            Self::Neutral,
        ]
    }
}

impl std::fmt::Display for ActionCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Badge category for a target type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetCategory {
    Player,
    League,
    Season,
    Division,
    Match,
    Dispute,
    Settings,
    BugReport,
    Admin,
    Other,
}

impl TargetCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Player => "player",
            Self::League => "league",
            Self::Season => "season",
            Self::Division => "division",
            Self::Match => "match",
            Self::Dispute => "dispute",
            Self::Settings => "settings",
            Self::BugReport => "bug_report",
            Self::Admin => "admin",
            Self::Other => "other",
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            Self::Player => "sky",
            Self::League => "indigo",
            Self::Season => "teal",
            Self::Division => "cyan",
            Self::Match => "amber",
            Self::Dispute => "orange",
            Self::Settings => "slate",
            Self::BugReport => "rose",
            Self::Admin => "violet",
            Self::Other => "gray",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Self::Player => "user",
            Self::League => "trophy",
            Self::Season => "calendar",
            Self::Division => "layers",
            Self::Match => "swords",
            Self::Dispute => "alert-triangle",
            Self::Settings => "settings",
            Self::BugReport => "bug",
            Self::Admin => "shield",
            Self::Other => "file",
        }
    }
}

impl std::fmt::Display for TargetCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Classify an action name into a badge category.
///
/// Works on `_`-separated segments so that `PLAYER_UNBAN` is never mistaken
/// for a ban. Positive reversals are checked before destructive verbs.
pub fn classify_action(action_type: &str) -> ActionCategory {
    let upper = action_type.trim().to_uppercase();
    let segments: Vec<&str> = upper.split('_').filter(|s| !s.is_empty()).collect();
    let has = |words: &[&str]| segments.iter().any(|s| words.contains(s));

    if has(&["UNBAN", "RESTORE", "REINSTATE", "CREATE", "ADD"]) {
        ActionCategory::Create
    } else if has(&["UPDATE", "EDIT", "CHANGE"]) {
        ActionCategory::Update
    } else if has(&["DELETE", "REMOVE", "BAN", "VOID", "SUSPEND"]) {
        ActionCategory::Delete
    } else if has(&["RESOLVE"]) {
        ActionCategory::Resolve
    } else {
        ActionCategory::Neutral
    }
}

/// Classify a target type via direct lookup
pub fn classify_target(target_type: &str) -> TargetCategory {
    match target_type.trim().to_uppercase().as_str() {
        TARGET_PLAYER => TargetCategory::Player,
        TARGET_LEAGUE => TargetCategory::League,
        TARGET_SEASON => TargetCategory::Season,
        TARGET_DIVISION => TargetCategory::Division,
        TARGET_MATCH => TargetCategory::Match,
        TARGET_DISPUTE => TargetCategory::Dispute,
        TARGET_SETTINGS => TargetCategory::Settings,
        TARGET_BUG_REPORT => TargetCategory::BugReport,
        TARGET_ADMIN => TargetCategory::Admin,
        _ => TargetCategory::Other,
    }
}

/// Turn `PLAYER_STATUS_CHANGE` into `Player Status Change`
pub fn humanize(value: &str) -> String {
    value
        .split('_')
        .filter(|w| !w.is_empty())
        .map(|word| {
            let lower = word.to_lowercase();
            let mut chars = lower.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
