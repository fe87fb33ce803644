//! Page-button windowing for the audit log list

use crate::models::PaginationMetadata;

/// Maximum number of page buttons shown at once
pub const PAGE_WINDOW: u32 = 5;

/// Page numbers to render as buttons.
///
/// Callers keep `current` within `1..=total`; out-of-range values are not
/// corrected here.
pub fn visible_pages(current: u32, total: u32, window: u32) -> Vec<u32> {
    if total == 0 || window == 0 {
        return Vec::new();
    }
    if total <= window {
        return (1..=total).collect();
    }

    let half = window / 2;
    let start = if current <= half + 1 {
        1
    } else if current >= total.saturating_sub(half) {
        total - window + 1
    } else {
        current - half
    };
    // Even windows lean right of the centre
    let start = start.min(total - window + 1);
    (start..start + window).collect()
}

/// "Showing X to Y of Z" plus previous/next availability
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageSummary {
    pub first_item: u64,
    pub last_item: u64,
    pub total: u64,
    pub has_previous: bool,
    pub has_next: bool,
}

impl From<&PaginationMetadata> for PageSummary {
    fn from(p: &PaginationMetadata) -> Self {
        if p.total == 0 {
            return Self {
                first_item: 0,
                last_item: 0,
                total: 0,
                has_previous: false,
                has_next: false,
            };
        }
        let limit = u64::from(p.limit.max(1));
        let first_item = u64::from(p.page.saturating_sub(1)) * limit + 1;
        let last_item = (u64::from(p.page) * limit).min(p.total);
        Self {
            first_item: first_item.min(p.total),
            last_item,
            total: p.total,
            has_previous: p.page > 1,
            has_next: p.page < p.total_pages,
        }
    }
}

impl std::fmt::Display for PageSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Showing {} to {} of {} entries",
            self.first_item, self.last_item, self.total
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_small_totals_show_everything() {
        assert_eq!(visible_pages(1, 3, PAGE_WINDOW), vec![1, 2, 3]);
        assert_eq!(visible_pages(5, 5, PAGE_WINDOW), vec![1, 2, 3, 4, 5]);
        assert!(visible_pages(1, 0, PAGE_WINDOW).is_empty());
    }

    #[test]
    fn test_window_positions() {
        assert_eq!(visible_pages(1, 20, PAGE_WINDOW), vec![1, 2, 3, 4, 5]);
        assert_eq!(visible_pages(3, 20, PAGE_WINDOW), vec![1, 2, 3, 4, 5]);
        assert_eq!(visible_pages(4, 20, PAGE_WINDOW), vec![2, 3, 4, 5, 6]);
        assert_eq!(visible_pages(10, 20, PAGE_WINDOW), vec![8, 9, 10, 11, 12]);
        assert_eq!(visible_pages(18, 20, PAGE_WINDOW), vec![16, 17, 18, 19, 20]);
        assert_eq!(visible_pages(20, 20, PAGE_WINDOW), vec![16, 17, 18, 19, 20]);
    }

    #[test]
    fn test_window_invariants_exhaustive() {
        for total in 0..=200u32 {
            for current in 1..=total {
                let pages = visible_pages(current, total, PAGE_WINDOW);
                assert_eq!(pages.len() as u32, total.min(PAGE_WINDOW));
                assert!(pages.windows(2).all(|w| w[0] < w[1]));
                assert!(pages.contains(&current), "{} of {}", current, total);
                assert!(pages.iter().all(|p| (1..=total).contains(p)));
            }
        }
    }

    #[test]
    fn test_other_window_sizes() {
        assert_eq!(visible_pages(5, 10, 3), vec![4, 5, 6]);
        assert_eq!(visible_pages(5, 10, 4), vec![3, 4, 5, 6]);
        assert_eq!(visible_pages(10, 10, 4), vec![7, 8, 9, 10]);
        assert!(visible_pages(1, 10, 0).is_empty());
    }

    #[test]
    fn test_page_summary() {
        let p = PaginationMetadata {
            page: 2,
            limit: 50,
            total: 120,
            total_pages: 3,
        };
        let summary = PageSummary::from(&p);
        assert_eq!(summary.first_item, 51);
        assert_eq!(summary.last_item, 100);
        assert!(summary.has_previous);
        assert!(summary.has_next);
        assert_eq!(summary.to_string(), "Showing 51 to 100 of 120 entries");

        let last = PaginationMetadata { page: 3, ..p };
        let summary = PageSummary::from(&last);
        assert_eq!(summary.last_item, 120);
        assert!(!summary.has_next);
    }

    #[test]
    fn test_page_summary_empty() {
        let p = PaginationMetadata {
            page: 1,
            limit: 50,
            total: 0,
            total_pages: 0,
        };
        let summary = PageSummary::from(&p);
        assert_eq!(summary.first_item, 0);
        assert!(!summary.has_next);
        assert!(!summary.has_previous);
    }
}
