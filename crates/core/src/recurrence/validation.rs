use serde::Serialize;

use super::error::RecurrenceError;
use super::types::{EndCondition, Frequency, RecurrenceRule};

/// Outcome of validating a rule, shaped for inline display next to a form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationResult {
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ValidationResult {
    fn ok() -> Self {
        Self {
            valid: true,
            error: None,
        }
    }

    fn invalid(error: &RecurrenceError) -> Self {
        Self {
            valid: false,
            error: Some(error.to_string()),
        }
    }
}

/// Checks a rule, returning the first problem found.
pub fn check(rule: &RecurrenceRule) -> Result<(), RecurrenceError> {
    if rule.interval < 1 {
        return Err(RecurrenceError::InvalidInterval);
    }

    if rule.frequency == Frequency::Weekly {
        if let Some(days) = &rule.days_of_week {
            if days.is_empty() {
                return Err(RecurrenceError::NoDaysSelected);
            }
            if let Some(&day) = days.iter().find(|&&d| d > 6) {
                return Err(RecurrenceError::InvalidDayOfWeek(day));
            }
        }
    }

    match rule.end {
        EndCondition::On { end_date: None } => Err(RecurrenceError::MissingEndDate),
        EndCondition::After { occurrences } if occurrences.unwrap_or(0) < 1 => {
            Err(RecurrenceError::InvalidOccurrences)
        }
        _ => Ok(()),
    }
}

/// Validates a rule without failing, for callers that render the message.
pub fn validate(rule: &RecurrenceRule) -> ValidationResult {
    match check(rule) {
        Ok(()) => ValidationResult::ok(),
        Err(err) => ValidationResult::invalid(&err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_valid_rules() {
        let end = NaiveDate::from_ymd_opt(2025, 6, 30).unwrap();
        assert_eq!(validate(&RecurrenceRule::daily(1)), ValidationResult::ok());
        assert!(validate(&RecurrenceRule::weekly(2).on_days([1, 3])).valid);
        assert!(validate(&RecurrenceRule::weekly(1)).valid);
        assert!(validate(&RecurrenceRule::monthly(1).until(end)).valid);
        assert!(validate(&RecurrenceRule::daily(3).count(1)).valid);
    }

    #[test]
    fn test_zero_interval() {
        let result = validate(&RecurrenceRule::daily(0));
        assert!(!result.valid);
        assert_eq!(result.error.as_deref(), Some("Interval must be at least 1"));
    }

    #[test]
    fn test_weekly_with_empty_days() {
        let rule = RecurrenceRule::weekly(1).on_days(Vec::<u8>::new());
        let result = validate(&rule);
        assert!(!result.valid);
        assert!(!result.error.unwrap().is_empty());
        assert_eq!(check(&rule), Err(RecurrenceError::NoDaysSelected));
    }

    #[test]
    fn test_empty_days_ignored_for_non_weekly() {
        assert!(validate(&RecurrenceRule::daily(1).on_days(Vec::<u8>::new())).valid);
    }

    #[test]
    fn test_day_out_of_range() {
        let rule = RecurrenceRule::weekly(1).on_days([1, 7]);
        assert_eq!(check(&rule), Err(RecurrenceError::InvalidDayOfWeek(7)));
    }

    #[test]
    fn test_end_on_without_date() {
        let mut rule = RecurrenceRule::daily(1);
        rule.end = EndCondition::On { end_date: None };
        assert_eq!(check(&rule), Err(RecurrenceError::MissingEndDate));
        assert_eq!(validate(&rule).error.as_deref(), Some("End date is required"));
    }

    #[test]
    fn test_end_after_without_count() {
        let mut rule = RecurrenceRule::daily(1);
        rule.end = EndCondition::After { occurrences: None };
        assert_eq!(check(&rule), Err(RecurrenceError::InvalidOccurrences));

        let rule = RecurrenceRule::daily(1).count(0);
        assert_eq!(check(&rule), Err(RecurrenceError::InvalidOccurrences));
    }

    #[test]
    fn test_interval_checked_first() {
        let rule = RecurrenceRule::weekly(0).on_days(Vec::<u8>::new()).count(0);
        assert_eq!(check(&rule), Err(RecurrenceError::InvalidInterval));
    }

    #[test]
    fn test_serialize_result() {
        let ok = serde_json::to_value(validate(&RecurrenceRule::daily(1))).unwrap();
        assert_eq!(ok, serde_json::json!({"valid": true}));

        let bad = serde_json::to_value(validate(&RecurrenceRule::daily(0))).unwrap();
        assert_eq!(
            bad,
            serde_json::json!({"valid": false, "error": "Interval must be at least 1"})
        );
    }
}
