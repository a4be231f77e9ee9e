//! Row comparison for memsort
//!
//! Rows are compared column by column in priority order. Two fields that both
//! read as base-10 integers compare numerically, so `"9"` sorts before `"10"`;
//! anything else compares as case-insensitive text. A parse miss is never an
//! error, it just selects the text comparison.

use std::cmp::Ordering;

use crate::table::SortDirection;

/// Compare two rows over a priority list of column indices
///
/// A column past the end of a short row reads as the empty string. The
/// direction is applied to every column; the first non-equal column decides.
///
/// # Arguments
/// * `a`, `b` - The rows to compare
/// * `columns` - Column indices, primary first
/// * `direction` - Ascending or descending, applied uniformly
pub fn compare_rows<S: AsRef<str>>(
    a: &[S],
    b: &[S],
    columns: &[usize],
    direction: SortDirection,
) -> Ordering {
    for &col in columns {
        let field_a = a.get(col).map(AsRef::as_ref).unwrap_or("");
        let field_b = b.get(col).map(AsRef::as_ref).unwrap_or("");

        let ordering = compare_fields(field_a, field_b);
        if ordering != Ordering::Equal {
            return match direction {
                SortDirection::Ascending => ordering,
                SortDirection::Descending => ordering.reverse(),
            };
        }
    }

    Ordering::Equal
}

/// Compare two fields, numerically when both are integers
pub fn compare_fields(a: &str, b: &str) -> Ordering {
    match (parse_integer(a), parse_integer(b)) {
        (Some(x), Some(y)) => x.cmp(&y),
        _ => compare_ignore_case(a, b),
    }
}

/// Parse a field as a base-10 integer
///
/// Surrounding whitespace and a leading `+` or `-` are accepted. Values that
/// don't fit in an `i64` are treated as text.
pub fn parse_integer(field: &str) -> Option<i64> {
    field.trim().parse::<i64>().ok()
}

/// Ordinal comparison after lowercasing each character
///
/// No locale collation: `"apple" < "Banana" < "cherry"` but `"z" < "é"`.
pub fn compare_ignore_case(a: &str, b: &str) -> Ordering {
    a.chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase))
}
