// Pagination strip computation.
//
// Builds the abbreviated page list shown under browse results: always the
// first and last page, a window of `delta` pages around the current one,
// and ellipsis markers where pages were skipped. For current=5, total=10,
// delta=2 the strip is [1, ..., 3, 4, 5, 6, 7, ..., 10].

/// One slot in the pagination strip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageItem {
    Page(usize),
    Ellipsis,
}

/// Compute the pagination strip for `current` of `total` pages, keeping
/// `delta` pages visible on each side of the current one. Zero or one
/// total pages need no strip at all.
pub fn page_window(current: usize, total: usize, delta: usize) -> Vec<PageItem> {
    let mut pages = Vec::new();
    if total <= 1 {
        return pages;
    }

    pages.push(PageItem::Page(1));

    let start = current.saturating_sub(delta).max(2);
    let end = current.saturating_add(delta).min(total - 1);

    if start > 2 {
        pages.push(PageItem::Ellipsis);
    }
    for page in start..=end {
        pages.push(PageItem::Page(page));
    }
    if end + 1 < total {
        pages.push(PageItem::Ellipsis);
    }

    pages.push(PageItem::Page(total));
    pages
}

#[cfg(test)]
mod tests {
    use super::*;
    use PageItem::{Ellipsis, Page};

    #[test]
    fn middle_page_shows_both_ellipses() {
        assert_eq!(
            page_window(5, 10, 2),
            vec![
                Page(1),
                Ellipsis,
                Page(3),
                Page(4),
                Page(5),
                Page(6),
                Page(7),
                Ellipsis,
                Page(10),
            ]
        );
    }

    #[test]
    fn first_page_has_no_leading_ellipsis() {
        assert_eq!(
            page_window(1, 10, 2),
            vec![Page(1), Page(2), Page(3), Ellipsis, Page(10)]
        );
    }

    #[test]
    fn last_page_has_no_trailing_ellipsis() {
        assert_eq!(
            page_window(10, 10, 2),
            vec![Page(1), Ellipsis, Page(8), Page(9), Page(10)]
        );
    }

    #[test]
    fn few_pages_need_no_ellipsis() {
        assert_eq!(page_window(2, 3, 2), vec![Page(1), Page(2), Page(3)]);
    }

    #[test]
    fn single_page_needs_no_strip() {
        assert!(page_window(1, 1, 2).is_empty());
        assert!(page_window(1, 0, 2).is_empty());
    }

    #[test]
    fn two_pages_show_both() {
        assert_eq!(page_window(1, 2, 2), vec![Page(1), Page(2)]);
    }

    #[test]
    fn out_of_range_current_still_brackets_the_strip() {
        assert_eq!(
            page_window(99, 5, 2),
            vec![Page(1), Ellipsis, Page(5)]
        );
    }
}
