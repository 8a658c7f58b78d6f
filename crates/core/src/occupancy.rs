//! Occupied-dates projection.
//!
//! Clients grey out calendar days that fall inside any non-cancelled
//! reservation. The projection is recomputed on every call from the raw
//! intervals; there is no caching or incremental maintenance.

use std::collections::BTreeSet;

use chrono::{Duration, NaiveDate};

use crate::types::Timestamp;

/// Expand reservation intervals into the ordered set of calendar dates they
/// touch, from the start date to the end date inclusive.
///
/// The caller is responsible for feeding only non-cancelled reservations.
pub fn occupied_dates<I>(intervals: I) -> BTreeSet<NaiveDate>
where
    I: IntoIterator<Item = (Timestamp, Timestamp)>,
{
    let mut dates = BTreeSet::new();
    for (start, end) in intervals {
        let last = end.date_naive();
        let mut current = start.date_naive();
        while current <= last {
            dates.insert(current);
            current += Duration::days(1);
        }
    }
    dates
}
