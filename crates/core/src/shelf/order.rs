//! Date ordering for traversal results.

use std::cmp::Ordering;

use crate::compile::Record;
use crate::frontmatter::DateRef;

type DateKey<'a> = (bool, Option<&'a str>, Option<&'a str>);

fn key(date: Option<DateRef<'_>>) -> DateKey<'_> {
    match date {
        None => (false, None, None),
        Some(DateRef::Canonical(date)) => (true, Some(date), None),
        Some(DateRef::Stamps { updated, published }) => (true, updated, published),
    }
}

/// Newest first.
///
/// Dated items come before undated ones. A canonical date string and
/// `updated` share the primary slot, `published` breaks ties, and a missing
/// stamp sorts after any present one. Dates are compared as strings, so
/// ISO 8601 values order chronologically.
pub fn compare_dates(a: Option<DateRef<'_>>, b: Option<DateRef<'_>>) -> Ordering {
    key(b).cmp(&key(a))
}

/// Stable sort by [`compare_dates`]; equal dates keep listing order.
pub fn by_date<R: Record>(records: &mut [R]) {
    records.sort_by(|a, b| compare_dates(a.date(), b.date()));
}

/// Like [`by_date`], with `fallback` deciding between equal dates.
pub fn by_date_then<R, C>(records: &mut [R], mut fallback: C)
where
    R: Record,
    C: FnMut(&R, &R) -> Ordering,
{
    records.sort_by(|a, b| compare_dates(a.date(), b.date()).then_with(|| fallback(a, b)));
}
