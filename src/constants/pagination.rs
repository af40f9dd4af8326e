//! Constants for list pages and their pagination controls.
use std::{env::var, sync::LazyLock};

use super::api::parse_flag;

/// Organizations shown per page of the organization list.
pub const ORGS_PER_PAGE: usize = 3;
/// Teachers shown per page of the teacher list.
pub const TEACHERS_PER_PAGE: usize = 1;
/// Size of the "hot organizations" sidebar on the organization list.
pub const HOT_ORGS_COUNT: usize = 5;
/// Size of the teacher leaderboard on the teacher list.
pub const LIST_LEADERBOARD_COUNT: usize = 3;
/// Size of the teacher leaderboard on the teacher detail page.
pub const DETAIL_LEADERBOARD_COUNT: i64 = 5;
/// Courses previewed on an organization's home tab.
pub const HOME_COURSES_COUNT: i64 = 3;
/// Teachers previewed on an organization's home tab.
pub const HOME_TEACHERS_COUNT: i64 = 1;

/// How many page links to show around the current page.
pub static PAGE_RANGE_DISPLAYED: LazyLock<usize> = LazyLock::new(|| {
    var("PAGE_RANGE_DISPLAYED").map_or(10, |count| {
        count
            .parse()
            .expect("PAGE_RANGE_DISPLAYED is not a valid count")
    })
});

/// How many page links to always show at either end of the range.
pub static MARGIN_PAGES_DISPLAYED: LazyLock<usize> = LazyLock::new(|| {
    var("MARGIN_PAGES_DISPLAYED").map_or(2, |count| {
        count
            .parse()
            .expect("MARGIN_PAGES_DISPLAYED is not a valid count")
    })
});

/// Serve the first page instead of failing when a page number is out of range.
pub static SHOW_FIRST_PAGE_WHEN_INVALID: LazyLock<bool> = LazyLock::new(|| {
    var("SHOW_FIRST_PAGE_WHEN_INVALID").map_or(true, |value| {
        parse_flag(&value).expect("SHOW_FIRST_PAGE_WHEN_INVALID is not a valid boolean")
    })
});
