//! Sort engine for memsort
//!
//! This module implements the four classic comparison sorts that can reorder a
//! table: bubble, insertion, merge and quick. Each takes the sequence mutably
//! and a comparison closure, and reorders in place.
//!
//! Bubble, insertion and merge sort are stable. Quick sort (Lomuto partition,
//! last element as pivot) is not: rows that compare equal may come out in a
//! different relative order.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::error::MemSortError;
use crate::table::SortDirection;

/// Sort specification: column priority list plus a direction
///
/// The direction applies to every column in the list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortSpec {
    /// Column indices, primary first
    columns: Vec<usize>,
    /// Direction for all columns
    direction: SortDirection,
}

impl SortSpec {
    /// Create a new sort specification
    pub fn new(columns: Vec<usize>, direction: SortDirection) -> Self {
        SortSpec { columns, direction }
    }

    /// Get the column indices in priority order
    pub fn columns(&self) -> &[usize] {
        &self.columns
    }

    /// Get the sort direction
    pub fn direction(&self) -> SortDirection {
        self.direction
    }
}

/// The available sorting strategies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortAlgorithm {
    /// O(n²) adjacent swaps with early exit, stable
    Bubble,
    /// O(n²) insertion, stable
    Insertion,
    /// O(n log n) top-down merge, stable
    Merge,
    /// O(n log n) average Lomuto quick sort, not stable
    Quick,
}

impl SortAlgorithm {
    /// Every algorithm, in menu order
    pub const ALL: [SortAlgorithm; 4] = [
        SortAlgorithm::Bubble,
        SortAlgorithm::Insertion,
        SortAlgorithm::Merge,
        SortAlgorithm::Quick,
    ];

    /// Short lowercase name of the algorithm
    pub fn name(self) -> &'static str {
        match self {
            SortAlgorithm::Bubble => "bubble",
            SortAlgorithm::Insertion => "insertion",
            SortAlgorithm::Merge => "merge",
            SortAlgorithm::Quick => "quick",
        }
    }

    /// Whether rows that compare equal keep their input order
    pub fn is_stable(self) -> bool {
        !matches!(self, SortAlgorithm::Quick)
    }

    /// Reorder `items` with this algorithm using `cmp`
    pub fn sort_by<T, F>(self, items: &mut Vec<T>, mut cmp: F)
    where
        F: FnMut(&T, &T) -> Ordering,
    {
        match self {
            SortAlgorithm::Bubble => bubble_sort(items, &mut cmp),
            SortAlgorithm::Insertion => insertion_sort(items, &mut cmp),
            SortAlgorithm::Merge => merge_sort(items, &mut cmp),
            SortAlgorithm::Quick => quick_sort(items, &mut cmp),
        }
    }
}

/// Accepts `bubble`, `bubble_sort`, `bubble-sort` and `bubblesort`, in any
/// letter case, and likewise for the other algorithms.
impl FromStr for SortAlgorithm {
    type Err = MemSortError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| *c != '_' && *c != '-')
            .collect::<String>()
            .to_lowercase();
        let base = match normalized.strip_suffix("sort") {
            Some(stem) if !stem.is_empty() => stem,
            _ => normalized.as_str(),
        };

        SortAlgorithm::ALL
            .into_iter()
            .find(|algorithm| algorithm.name() == base)
            .ok_or_else(|| MemSortError::UnknownSortAlgorithm(s.to_string()))
    }
}

impl fmt::Display for SortAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} sort", self.name())
    }
}

/// Bubble sort with early exit
///
/// Each pass swaps adjacent out-of-order pairs and shrinks the unsorted range
/// by one. A pass without swaps ends the sort.
pub fn bubble_sort<T, F>(items: &mut [T], cmp: &mut F)
where
    F: FnMut(&T, &T) -> Ordering,
{
    let mut end = items.len();
    while end > 1 {
        let mut swapped = false;
        for j in 1..end {
            if cmp(&items[j - 1], &items[j]) == Ordering::Greater {
                items.swap(j - 1, j);
                swapped = true;
            }
        }
        if !swapped {
            break;
        }
        end -= 1;
    }
}

/// Insertion sort
///
/// Element `i` moves left while its predecessor compares greater; equal
/// elements stop the move, which keeps the sort stable.
pub fn insertion_sort<T, F>(items: &mut [T], cmp: &mut F)
where
    F: FnMut(&T, &T) -> Ordering,
{
    for i in 1..items.len() {
        let mut j = i;
        while j > 0 && cmp(&items[j - 1], &items[j]) == Ordering::Greater {
            items.swap(j - 1, j);
            j -= 1;
        }
    }
}

/// Top-down merge sort
///
/// The vector is split at its midpoint, both halves are sorted recursively and
/// merged back taking from the left run on ties.
pub fn merge_sort<T, F>(items: &mut Vec<T>, cmp: &mut F)
where
    F: FnMut(&T, &T) -> Ordering,
{
    if items.len() < 2 {
        return;
    }
    let owned = std::mem::take(items);
    *items = merge_sort_owned(owned, cmp);
}

fn merge_sort_owned<T, F>(mut left: Vec<T>, cmp: &mut F) -> Vec<T>
where
    F: FnMut(&T, &T) -> Ordering,
{
    if left.len() < 2 {
        return left;
    }

    let right = left.split_off(left.len() / 2);
    let left = merge_sort_owned(left, cmp);
    let right = merge_sort_owned(right, cmp);
    merge(left, right, cmp)
}

fn merge<T, F>(left: Vec<T>, right: Vec<T>, cmp: &mut F) -> Vec<T>
where
    F: FnMut(&T, &T) -> Ordering,
{
    let mut merged = Vec::with_capacity(left.len() + right.len());
    let mut left = left.into_iter().peekable();
    let mut right = right.into_iter().peekable();

    loop {
        let take_left = match (left.peek(), right.peek()) {
            (Some(l), Some(r)) => cmp(l, r) != Ordering::Greater,
            (Some(_), None) => true,
            (None, Some(_)) => false,
            (None, None) => break,
        };
        let next = if take_left { left.next() } else { right.next() };
        merged.extend(next);
    }

    merged
}

/// Quick sort with Lomuto partitioning
///
/// The last element is the pivot. Recursion goes into the smaller partition
/// and the larger one is handled by the loop, so stack depth stays
/// logarithmic even on already sorted input.
pub fn quick_sort<T, F>(items: &mut [T], cmp: &mut F)
where
    F: FnMut(&T, &T) -> Ordering,
{
    let mut slice = items;
    while slice.len() > 1 {
        let pivot = lomuto_partition(slice, cmp);
        let (left, right) = std::mem::take(&mut slice).split_at_mut(pivot);
        let right = &mut right[1..];

        if left.len() < right.len() {
            quick_sort(left, cmp);
            slice = right;
        } else {
            quick_sort(right, cmp);
            slice = left;
        }
    }
}

/// Partition around the last element and return the pivot's final index
fn lomuto_partition<T, F>(slice: &mut [T], cmp: &mut F) -> usize
where
    F: FnMut(&T, &T) -> Ordering,
{
    let last = slice.len() - 1;
    let mut store = 0;
    for j in 0..last {
        if cmp(&slice[j], &slice[last]) != Ordering::Greater {
            slice.swap(store, j);
            store += 1;
        }
    }
    slice.swap(store, last);
    store
}
