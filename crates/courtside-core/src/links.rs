//! Deep links from audit log targets into the rest of the dashboard

use crate::models::{TARGET_DISPUTE, TARGET_LEAGUE, TARGET_MATCH, TARGET_PLAYER, TARGET_SEASON};

/// Dashboard path for an addressable target, `None` for everything else
pub fn resolve_link(target_type: &str, target_id: Option<&str>) -> Option<String> {
    let id = target_id.map(str::trim).filter(|id| !id.is_empty())?;
    let section = match target_type.trim().to_uppercase().as_str() {
        TARGET_PLAYER => "players",
        TARGET_LEAGUE => "leagues",
        TARGET_SEASON => "seasons",
        TARGET_MATCH => "matches",
        TARGET_DISPUTE => "disputes",
        _ => return None,
    };
    Some(format!("/{}/{}", section, id))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_addressable_targets() {
        assert_eq!(
            resolve_link("PLAYER", Some("abc")).as_deref(),
            Some("/players/abc")
        );
        assert_eq!(
            resolve_link("LEAGUE", Some("l1")).as_deref(),
            Some("/leagues/l1")
        );
        assert_eq!(
            resolve_link("SEASON", Some("s1")).as_deref(),
            Some("/seasons/s1")
        );
        assert_eq!(
            resolve_link("MATCH", Some("m1")).as_deref(),
            Some("/matches/m1")
        );
        assert_eq!(
            resolve_link("DISPUTE", Some("d1")).as_deref(),
            Some("/disputes/d1")
        );
    }

    #[test]
    fn test_non_addressable_targets() {
        assert!(resolve_link("SETTINGS", Some("abc")).is_none());
        assert!(resolve_link("DIVISION", Some("abc")).is_none());
        assert!(resolve_link("BUG_REPORT", Some("abc")).is_none());
        assert!(resolve_link("SOMETHING_NEW", Some("abc")).is_none());
    }

    #[test]
    fn test_target_type_case_and_whitespace() {
        assert_eq!(
            resolve_link("player", Some("abc")).as_deref(),
            Some("/players/abc")
        );
        assert_eq!(
            resolve_link(" Match ", Some("m1")).as_deref(),
            Some("/matches/m1")
        );
        assert!(resolve_link("settings", Some("abc")).is_none());
    }

    #[test]
    fn test_missing_id() {
        assert!(resolve_link("PLAYER", None).is_none());
        assert!(resolve_link("PLAYER", Some("")).is_none());
        assert!(resolve_link("PLAYER", Some("  ")).is_none());
    }
}
