//! Expansion of a recurring event into individual occurrences.
//!
//! Every occurrence keeps the duration of the first event and shares a
//! series ID. The first occurrence is the series parent and is the only one
//! that carries the rule.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::error::SeriesError;
use super::generator::generate;
use super::types::RecurrenceRule;

/// One event of a recurring series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesOccurrence {
    pub recurrence_id: Uuid,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub is_recurrence_parent: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recurrence_rule: Option<RecurrenceRule>,
}

/// Expands an event spanning `start..end` into a series with a fresh ID.
pub fn expand_series(
    start: NaiveDateTime,
    end: NaiveDateTime,
    rule: &RecurrenceRule,
    max_occurrences: usize,
) -> Result<Vec<SeriesOccurrence>, SeriesError> {
    expand_series_with_id(Uuid::new_v4(), start, end, rule, max_occurrences)
}

/// Same as [`expand_series`] with a caller-supplied series ID.
pub fn expand_series_with_id(
    recurrence_id: Uuid,
    start: NaiveDateTime,
    end: NaiveDateTime,
    rule: &RecurrenceRule,
    max_occurrences: usize,
) -> Result<Vec<SeriesOccurrence>, SeriesError> {
    if end < start {
        return Err(SeriesError::InvalidDateRange);
    }
    let duration = end - start;

    let dates = generate(start, rule, max_occurrences)?;
    if dates.is_empty() {
        return Err(SeriesError::NoOccurrences);
    }

    dates
        .into_iter()
        .enumerate()
        .map(|(i, occurrence_start)| {
            let occurrence_end = occurrence_start
                .checked_add_signed(duration)
                .ok_or(SeriesError::OutOfRange)?;
            Ok(SeriesOccurrence {
                recurrence_id,
                start: occurrence_start,
                end: occurrence_end,
                is_recurrence_parent: i == 0,
                recurrence_rule: (i == 0).then(|| rule.clone()),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recurrence::RecurrenceError;
    use chrono::NaiveDate;

    fn at(d: u32, h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 1, d)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    fn series_id() -> Uuid {
        Uuid::parse_str("00000000-0000-0000-0000-000000000001").unwrap()
    }

    #[test]
    fn test_expand_preserves_duration() {
        let rule = RecurrenceRule::weekly(1).on_days([1, 3]).count(3);
        let series =
            expand_series_with_id(series_id(), at(6, 9, 0), at(6, 10, 30), &rule, 365).unwrap();

        assert_eq!(series.len(), 3);
        assert_eq!(series[1].start, at(8, 9, 0));
        assert_eq!(series[1].end, at(8, 10, 30));
        assert_eq!(series[2].start, at(13, 9, 0));
        assert!(series.iter().all(|o| o.recurrence_id == series_id()));
    }

    #[test]
    fn test_only_parent_carries_rule() {
        let rule = RecurrenceRule::daily(1).count(3);
        let series = expand_series(at(1, 8, 0), at(1, 9, 0), &rule, 365).unwrap();

        assert!(series[0].is_recurrence_parent);
        assert_eq!(series[0].recurrence_rule, Some(rule));
        assert!(series[1..].iter().all(|o| !o.is_recurrence_parent));
        assert!(series[1..].iter().all(|o| o.recurrence_rule.is_none()));
    }

    #[test]
    fn test_fresh_ids_differ() {
        let rule = RecurrenceRule::daily(1).count(1);
        let a = expand_series(at(1, 8, 0), at(1, 9, 0), &rule, 365).unwrap();
        let b = expand_series(at(1, 8, 0), at(1, 9, 0), &rule, 365).unwrap();
        assert_ne!(a[0].recurrence_id, b[0].recurrence_id);
    }

    #[test]
    fn test_end_before_start() {
        let rule = RecurrenceRule::daily(1);
        let result = expand_series(at(2, 9, 0), at(1, 9, 0), &rule, 365);
        assert_eq!(result, Err(SeriesError::InvalidDateRange));
    }

    #[test]
    fn test_invalid_rule() {
        let rule = RecurrenceRule::weekly(1).on_days(Vec::<u8>::new());
        let result = expand_series(at(1, 9, 0), at(1, 10, 0), &rule, 365);
        assert_eq!(
            result,
            Err(SeriesError::InvalidRule(RecurrenceError::NoDaysSelected))
        );
    }

    #[test]
    fn test_no_occurrences() {
        let rule = RecurrenceRule::daily(1);
        let result = expand_series(at(1, 9, 0), at(1, 10, 0), &rule, 0);
        assert_eq!(result, Err(SeriesError::NoOccurrences));
    }
}
