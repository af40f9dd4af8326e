//! Splits an in-memory list into numbered pages and builds the page-link
//! strip shown under list pages.
use serde::Serialize;

use crate::constants::pagination::{
    MARGIN_PAGES_DISPLAYED, PAGE_RANGE_DISPLAYED, SHOW_FIRST_PAGE_WHEN_INVALID,
};

/// How the page-link strip is laid out and how bad page numbers are treated.
#[derive(Clone, Copy, Debug)]
pub struct PageDisplay {
    /// Number of links shown around the current page.
    pub page_range_displayed: usize,
    /// Number of links always shown at each end.
    pub margin_pages_displayed: usize,
    /// Serve page 1 instead of failing for out-of-range page numbers.
    pub show_first_page_when_invalid: bool,
}

impl PageDisplay {
    /// The display settings configured for this deployment.
    pub fn configured() -> Self {
        Self {
            page_range_displayed: *PAGE_RANGE_DISPLAYED,
            margin_pages_displayed: *MARGIN_PAGES_DISPLAYED,
            show_first_page_when_invalid: *SHOW_FIRST_PAGE_WHEN_INVALID,
        }
    }
}

/// One page of a paginated list.
#[derive(Serialize, Debug)]
pub struct Page<T> {
    /// The items on this page.
    pub object_list: Vec<T>,
    /// This page's 1-based number.
    pub number: usize,
    /// The total number of pages.
    pub num_pages: usize,
    /// The total number of items across all pages.
    pub count: usize,
    pub has_previous: bool,
    pub has_next: bool,
    pub previous_page_number: Option<usize>,
    pub next_page_number: Option<usize>,
    /// Page links to render. `None` marks an elided run of pages.
    pub pages: Vec<Option<usize>>,
}

/// Interpret the raw `page` query parameter. Anything that is not an integer
/// is page 1.
pub fn parse_page_number(raw: Option<&str>) -> i64 {
    raw.and_then(|raw| raw.trim().parse().ok()).unwrap_or(1)
}

/// Cut `items` into pages of `per_page` and return the requested one.
pub fn paginate<T>(
    items: Vec<T>,
    per_page: usize,
    raw_page: Option<&str>,
    display: PageDisplay,
) -> Result<Page<T>, errors::EmptyPage> {
    let per_page = per_page.max(1);
    let count = items.len();
    let num_pages = count.div_ceil(per_page).max(1);
    let requested = parse_page_number(raw_page);
    let number = match usize::try_from(requested) {
        Ok(number) if (1..=num_pages).contains(&number) => number,
        _ if display.show_first_page_when_invalid => 1,
        _ => return Err(errors::EmptyPage(requested)),
    };
    let object_list = items
        .into_iter()
        .skip((number - 1) * per_page)
        .take(per_page)
        .collect();
    Ok(Page {
        object_list,
        number,
        num_pages,
        count,
        has_previous: number > 1,
        has_next: number < num_pages,
        previous_page_number: (number > 1).then(|| number - 1),
        next_page_number: (number < num_pages).then(|| number + 1),
        pages: page_links(number, num_pages, display),
    })
}

/// Build the page-link strip: margins at both ends, a window around the
/// current page, and a single `None` for each gap.
fn page_links(number: usize, num_pages: usize, display: PageDisplay) -> Vec<Option<usize>> {
    let range = display.page_range_displayed;
    if num_pages <= range {
        return (1..=num_pages).map(Some).collect();
    }
    let (left_side, right_side) = if number > num_pages - range / 2 {
        let right = num_pages - number;
        (range - right, right)
    } else if number < range / 2 {
        (number, range - number)
    } else {
        (range / 2, range - range / 2)
    };
    let margin = display.margin_pages_displayed;
    let mut links: Vec<Option<usize>> = Vec::new();
    for page in 1..=num_pages {
        let in_margin = page <= margin || page > num_pages.saturating_sub(margin);
        let in_window = page + left_side >= number && page <= number + right_side;
        if in_margin || in_window {
            links.push(Some(page));
        } else if matches!(links.last(), Some(Some(_))) {
            links.push(None);
        }
    }
    links
}

pub mod errors {
    use thiserror::Error;

    /// The requested page does not exist.
    #[derive(Error, Debug, PartialEq, Eq)]
    #[error("Page {0} does not exist.")]
    pub struct EmptyPage(pub i64);
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    const STRICT: PageDisplay = PageDisplay {
        page_range_displayed: 10,
        margin_pages_displayed: 2,
        show_first_page_when_invalid: false,
    };
    const LENIENT: PageDisplay = PageDisplay {
        show_first_page_when_invalid: true,
        ..STRICT
    };

    #[test]
    fn pages_hold_at_most_per_page_items() {
        let page = paginate((1..=7).collect(), 3, Some("3"), STRICT).unwrap();
        assert_eq!(page.object_list, vec![7]);
        assert_eq!(page.num_pages, 3);
        assert_eq!(page.count, 7);
        assert!(page.has_previous);
        assert!(!page.has_next);
        assert_eq!(page.previous_page_number, Some(2));
        assert_eq!(page.next_page_number, None);
    }

    #[test]
    fn missing_or_non_numeric_page_is_first_page() {
        for raw in [None, Some("abc"), Some(""), Some("2.0")] {
            let page = paginate((1..=7).collect(), 3, raw, STRICT).unwrap();
            assert_eq!(page.number, 1);
            assert_eq!(page.object_list, vec![1, 2, 3]);
        }
    }

    #[test]
    fn empty_list_has_one_empty_page() {
        let page = paginate(Vec::<i32>::new(), 3, None, STRICT).unwrap();
        assert_eq!(page.num_pages, 1);
        assert!(page.object_list.is_empty());
        assert_eq!(page.pages, vec![Some(1)]);
    }

    #[test]
    fn out_of_range_page_fails_when_strict() {
        assert_matches!(
            paginate((1..=7).collect::<Vec<_>>(), 3, Some("4"), STRICT),
            Err(errors::EmptyPage(4))
        );
        assert_matches!(
            paginate((1..=7).collect::<Vec<_>>(), 3, Some("0"), STRICT),
            Err(errors::EmptyPage(0))
        );
        assert_matches!(
            paginate((1..=7).collect::<Vec<_>>(), 3, Some("-1"), STRICT),
            Err(errors::EmptyPage(-1))
        );
    }

    #[test]
    fn out_of_range_page_falls_back_to_first_when_lenient() {
        let page = paginate((1..=7).collect(), 3, Some("99"), LENIENT).unwrap();
        assert_eq!(page.number, 1);
    }

    #[test]
    fn short_lists_link_every_page() {
        let page = paginate((1..=5).collect(), 1, Some("3"), STRICT).unwrap();
        assert_eq!(page.pages, (1..=5).map(Some).collect::<Vec<_>>());
    }

    #[test]
    fn long_lists_elide_far_pages() {
        let first = paginate((1..=20).collect(), 1, Some("1"), STRICT).unwrap();
        let mut expected: Vec<Option<usize>> = (1..=10).map(Some).collect();
        expected.extend([None, Some(19), Some(20)]);
        assert_eq!(first.pages, expected);

        let middle = paginate((1..=20).collect(), 1, Some("10"), STRICT).unwrap();
        let mut expected = vec![Some(1), Some(2), None];
        expected.extend((5..=15).map(Some));
        expected.extend([None, Some(19), Some(20)]);
        assert_eq!(middle.pages, expected);

        let last = paginate((1..=20).collect(), 1, Some("20"), STRICT).unwrap();
        let mut expected = vec![Some(1), Some(2), None];
        expected.extend((10..=20).map(Some));
        assert_eq!(last.pages, expected);
    }
}
