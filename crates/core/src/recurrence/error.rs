use thiserror::Error;

/// Reasons a recurrence rule is rejected.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RecurrenceError {
    #[error("Interval must be at least 1")]
    InvalidInterval,
    #[error("At least one day of the week must be selected for weekly recurrence")]
    NoDaysSelected,
    #[error("Day of week must be between 0 (Sunday) and 6 (Saturday), got {0}")]
    InvalidDayOfWeek(u8),
    #[error("End date is required")]
    MissingEndDate,
    #[error("Number of occurrences must be at least 1")]
    InvalidOccurrences,
}

/// Errors that can occur when expanding a recurring event into a series.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SeriesError {
    #[error("End date must be after start date")]
    InvalidDateRange,
    #[error("Invalid recurrence rule: {0}")]
    InvalidRule(#[from] RecurrenceError),
    #[error("No occurrences generated from recurrence rule")]
    NoOccurrences,
    #[error("Occurrence falls outside the supported date range")]
    OutOfRange,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recurrence_error_display() {
        assert_eq!(
            RecurrenceError::InvalidInterval.to_string(),
            "Interval must be at least 1"
        );
        assert_eq!(
            RecurrenceError::InvalidDayOfWeek(9).to_string(),
            "Day of week must be between 0 (Sunday) and 6 (Saturday), got 9"
        );
    }

    #[test]
    fn test_series_error_wraps_rule_error() {
        let error: SeriesError = RecurrenceError::MissingEndDate.into();
        assert_eq!(
            error.to_string(),
            "Invalid recurrence rule: End date is required"
        );
    }
}
