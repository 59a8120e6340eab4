//! Page-number strip with ellipsis compression.

/// One entry of the pagination strip
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageSlot {
    Page(u32),
    Ellipsis,
}

/// First page, last page and `current - 1 ..= current + 1`, with every gap
/// between shown pages collapsed into one ellipsis.
pub fn visible_pages(current: u32, total_pages: u32) -> Vec<PageSlot> {
    let mut slots = Vec::new();
    let mut previous: Option<u32> = None;
    for page in 1..=total_pages {
        let near_current = page + 1 >= current && page <= current.saturating_add(1);
        if page != 1 && page != total_pages && !near_current {
            continue;
        }
        if let Some(prev) = previous {
            if page - prev > 1 {
                slots.push(PageSlot::Ellipsis);
            }
        }
        slots.push(PageSlot::Page(page));
        previous = Some(page);
    }
    slots
}

/// The strip is only rendered when there is somewhere to go
pub fn should_paginate(total_pages: u32) -> bool {
    total_pages > 1
}

pub fn can_go_previous(current: u32) -> bool {
    current > 1
}

pub fn can_go_next(current: u32, total_pages: u32) -> bool {
    current < total_pages
}

/// Parse the "go to page" box; out-of-range or non-numeric input is ignored
pub fn parse_page_input(raw: &str, total_pages: u32) -> Option<u32> {
    let page: u32 = raw.trim().parse().ok()?;
    (1..=total_pages).contains(&page).then_some(page)
}

#[cfg(test)]
mod tests {
    use super::*;
    use PageSlot::{Ellipsis, Page};

    #[test]
    fn test_small_page_counts_have_no_ellipsis() {
        assert_eq!(visible_pages(1, 1), vec![Page(1)]);
        assert_eq!(visible_pages(2, 3), vec![Page(1), Page(2), Page(3)]);
        assert!(visible_pages(1, 0).is_empty());
    }

    #[test]
    fn test_ellipsis_on_both_sides() {
        assert_eq!(
            visible_pages(5, 10),
            vec![Page(1), Ellipsis, Page(4), Page(5), Page(6), Ellipsis, Page(10)]
        );
    }

    #[test]
    fn test_single_hidden_page_still_collapses() {
        assert_eq!(visible_pages(1, 4), vec![Page(1), Page(2), Ellipsis, Page(4)]);
        assert_eq!(visible_pages(4, 4), vec![Page(1), Ellipsis, Page(3), Page(4)]);
    }

    #[test]
    fn test_navigation_bounds() {
        assert!(!can_go_previous(1));
        assert!(can_go_previous(2));
        assert!(can_go_next(2, 3));
        assert!(!can_go_next(3, 3));
        assert!(!should_paginate(1));
        assert!(should_paginate(2));
    }

    #[test]
    fn test_parse_page_input() {
        assert_eq!(parse_page_input(" 3 ", 5), Some(3));
        assert_eq!(parse_page_input("0", 5), None);
        assert_eq!(parse_page_input("6", 5), None);
        assert_eq!(parse_page_input("two", 5), None);
    }
}
