//! Fixed school/sex/age grouping sorts
//!
//! The student data files this tool started with have `school`, `sex` and
//! `age` as their first three columns. These sorts group on exactly those
//! positions, regardless of the header names, using the bubble and insertion
//! strategies of the sort engine.
//!
//! The grouping comparator does not generalize: a row with fewer than three
//! fields has no relation to any other row and is never swapped past it.

use std::cmp::Ordering;

use crate::compare::{compare_ignore_case, parse_integer};
use crate::sort::{bubble_sort, insertion_sort};
use crate::table::Row;

/// Number of leading fields the grouping comparator reads
pub const GROUPING_FIELDS: usize = 3;

/// Compare two rows by school, then sex, then age
///
/// # Returns
/// * `None` if either row has fewer than three fields
/// * `Some(Ordering::Equal)` when school and sex tie and either age is not an integer
/// * `Some(ordering)` otherwise
pub fn compare_grouping(a: &[String], b: &[String]) -> Option<Ordering> {
    if a.len() < GROUPING_FIELDS || b.len() < GROUPING_FIELDS {
        return None;
    }

    let ordering = compare_ignore_case(&a[0], &b[0])
        .then_with(|| compare_ignore_case(&a[1], &b[1]))
        .then_with(|| match (parse_integer(&a[2]), parse_integer(&b[2])) {
            (Some(x), Some(y)) => x.cmp(&y),
            _ => Ordering::Equal,
        });

    Some(ordering)
}

/// Strategy for the fixed school/sex/age sort
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupingSort {
    /// Adjacent swaps with early exit
    Bubble,
    /// Shift each row left past greater predecessors
    Insertion,
}

impl GroupingSort {
    /// Lower-case strategy name
    pub fn name(self) -> &'static str {
        match self {
            GroupingSort::Bubble => "bubble",
            GroupingSort::Insertion => "insertion",
        }
    }

    /// Sort rows by school, sex and age with this strategy
    pub fn sort(self, rows: &mut [Row]) {
        match self {
            GroupingSort::Bubble => bubble_sort_grouping(rows),
            GroupingSort::Insertion => insertion_sort_grouping(rows),
        }
    }
}

/// Bubble sort rows by school, sex and age
pub fn bubble_sort_grouping(rows: &mut [Row]) {
    bubble_sort(rows, &mut |a: &Row, b: &Row| grouping_or_equal(a, b));
}

/// Insertion sort rows by school, sex and age
///
/// A row moves left only while its predecessor is comparable and greater.
pub fn insertion_sort_grouping(rows: &mut [Row]) {
    insertion_sort(rows, &mut |a: &Row, b: &Row| grouping_or_equal(a, b));
}

fn grouping_or_equal(a: &Row, b: &Row) -> Ordering {
    compare_grouping(a, b).unwrap_or(Ordering::Equal)
}
