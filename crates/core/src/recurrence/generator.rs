//! Expansion of a recurrence rule into concrete dates.

use chrono::{Datelike, Days, NaiveDate, NaiveDateTime, NaiveTime};

use super::error::RecurrenceError;
use super::types::{EndCondition, Frequency, RecurrenceRule};
use super::validation::check;

/// Safety bound on the number of generated occurrences.
pub const DEFAULT_MAX_OCCURRENCES: usize = 365;

/// Generates the dates of a series, starting with `start`.
///
/// Stops at the rule's end date (inclusive of the whole day), after the
/// rule's occurrence count, or after `max_occurrences` dates, whichever
/// comes first. Invalid rules are rejected before anything is generated.
///
/// # Examples
///
/// ```
/// use campsync_core::recurrence::{generate_dates, RecurrenceRule};
/// use chrono::NaiveDate;
///
/// let monday = NaiveDate::from_ymd_opt(2025, 1, 6).unwrap();
/// let rule = RecurrenceRule::weekly(1).on_days([1, 3, 5]);
/// let dates = generate_dates(monday, &rule, 6).unwrap();
///
/// let days: Vec<u32> = dates.iter().map(|d| chrono::Datelike::day(d)).collect();
/// assert_eq!(days, vec![6, 8, 10, 13, 15, 17]);
/// ```
pub fn generate(
    start: NaiveDateTime,
    rule: &RecurrenceRule,
    max_occurrences: usize,
) -> Result<Vec<NaiveDateTime>, RecurrenceError> {
    check(rule)?;

    let limit = match rule.end {
        EndCondition::After {
            occurrences: Some(count),
        } => max_occurrences.min(count as usize),
        _ => max_occurrences,
    };
    let end_date = match rule.end {
        EndCondition::On { end_date } => end_date,
        _ => None,
    };

    if limit == 0 {
        return Ok(Vec::new());
    }

    let mut dates = Vec::with_capacity(limit.min(DEFAULT_MAX_OCCURRENCES));
    let mut current = start;
    dates.push(current);

    while dates.len() < limit {
        let Some(next) = next_occurrence(current, rule) else {
            break;
        };
        if end_date.is_some_and(|end| next.date() > end) {
            break;
        }
        dates.push(next);
        current = next;
    }

    Ok(dates)
}

/// Date-only variant of [`generate`]; occurrences start at midnight.
pub fn generate_dates(
    start: NaiveDate,
    rule: &RecurrenceRule,
    max_occurrences: usize,
) -> Result<Vec<NaiveDate>, RecurrenceError> {
    let dates = generate(start.and_time(NaiveTime::MIN), rule, max_occurrences)?;
    Ok(dates.into_iter().map(|dt| dt.date()).collect())
}

/// The occurrence following `current`, or `None` past the representable range.
fn next_occurrence(current: NaiveDateTime, rule: &RecurrenceRule) -> Option<NaiveDateTime> {
    match rule.frequency {
        Frequency::Daily => add_days(current, u64::from(rule.interval)),
        Frequency::Weekly => match rule.sorted_days() {
            Some(days) if !days.is_empty() => next_weekly(current, &days, rule.interval),
            _ => add_days(current, 7 * u64::from(rule.interval)),
        },
        Frequency::Monthly => add_months(current, rule.interval),
    }
}

/// Next selected weekday after `current`.
///
/// `days` must be sorted ascending. When no selected weekday remains in the
/// current week, skips `interval - 1` further weeks and lands on the first
/// selected weekday.
fn next_weekly(current: NaiveDateTime, days: &[u8], interval: u32) -> Option<NaiveDateTime> {
    let today = current.weekday().num_days_from_sunday() as u8;

    let offset = match days.iter().find(|&&day| day > today) {
        Some(&day) => u64::from(day - today),
        None => {
            let first = *days.first()?;
            let until_next_week = u64::from(7 - today + first);
            until_next_week + 7 * u64::from(interval.saturating_sub(1))
        }
    };

    add_days(current, offset)
}

fn add_days(current: NaiveDateTime, days: u64) -> Option<NaiveDateTime> {
    current.checked_add_days(Days::new(days))
}

/// Advances the month, rolling overflowing days into the following month
/// (Jan 31 + 1 month = Mar 3 in a non-leap year).
fn add_months(current: NaiveDateTime, months: u32) -> Option<NaiveDateTime> {
    let total = i64::from(current.year()) * 12 + i64::from(current.month0()) + i64::from(months);
    let year = i32::try_from(total.div_euclid(12)).ok()?;
    let month = u32::try_from(total.rem_euclid(12)).ok()? + 1;

    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let date = first.checked_add_days(Days::new(u64::from(current.day() - 1)))?;
    Some(date.and_time(current.time()))
}
