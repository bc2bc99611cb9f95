use chrono::{NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

/// How often an event repeats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    Daily,
    Weekly,
    Monthly,
}

impl Frequency {
    /// Singular adjective, e.g. "Daily".
    pub fn adjective(&self) -> &'static str {
        match self {
            Frequency::Daily => "Daily",
            Frequency::Weekly => "Weekly",
            Frequency::Monthly => "Monthly",
        }
    }

    /// Plural unit, e.g. "days".
    pub fn plural_unit(&self) -> &'static str {
        match self {
            Frequency::Daily => "days",
            Frequency::Weekly => "weeks",
            Frequency::Monthly => "months",
        }
    }
}

/// When a series stops.
///
/// The payload fields are optional because rules come from user input;
/// validation rejects `On` without a date and `After` without a positive count.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "endType", rename_all = "lowercase")]
pub enum EndCondition {
    #[default]
    Never,
    On {
        #[serde(rename = "endDate", default, skip_serializing_if = "Option::is_none")]
        end_date: Option<NaiveDate>,
    },
    After {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        occurrences: Option<u32>,
    },
}

/// A repeat rule for a calendar event.
///
/// Serialized in the camelCase shape used by the scheduling form:
///
/// ```json
/// { "frequency": "weekly", "interval": 1, "daysOfWeek": [1, 3, 5],
///   "endType": "after", "occurrences": 6 }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecurrenceRule {
    pub frequency: Frequency,
    /// Repeat every `interval` days/weeks/months.
    pub interval: u32,
    /// Weekday ordinals (Sunday = 0 ... Saturday = 6), weekly rules only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub days_of_week: Option<Vec<u8>>,
    #[serde(flatten)]
    pub end: EndCondition,
}

impl RecurrenceRule {
    /// Creates a rule with the given frequency and interval that never ends.
    pub fn new(frequency: Frequency, interval: u32) -> Self {
        Self {
            frequency,
            interval,
            days_of_week: None,
            end: EndCondition::Never,
        }
    }

    pub fn daily(interval: u32) -> Self {
        Self::new(Frequency::Daily, interval)
    }

    pub fn weekly(interval: u32) -> Self {
        Self::new(Frequency::Weekly, interval)
    }

    pub fn monthly(interval: u32) -> Self {
        Self::new(Frequency::Monthly, interval)
    }

    /// Sets the weekday ordinals for a weekly rule.
    pub fn on_days(mut self, days: impl IntoIterator<Item = u8>) -> Self {
        self.days_of_week = Some(days.into_iter().collect());
        self
    }

    /// Sets the weekdays for a weekly rule.
    pub fn on_weekdays(self, days: impl IntoIterator<Item = Weekday>) -> Self {
        self.on_days(days.into_iter().map(weekday_ordinal))
    }

    /// Ends the series on `end_date` (inclusive).
    pub fn until(mut self, end_date: NaiveDate) -> Self {
        self.end = EndCondition::On {
            end_date: Some(end_date),
        };
        self
    }

    /// Ends the series after `occurrences` dates.
    pub fn count(mut self, occurrences: u32) -> Self {
        self.end = EndCondition::After {
            occurrences: Some(occurrences),
        };
        self
    }

    /// Sorted, de-duplicated weekday ordinals, if any were supplied.
    pub fn sorted_days(&self) -> Option<Vec<u8>> {
        self.days_of_week.as_ref().map(|days| {
            let mut sorted = days.clone();
            sorted.sort_unstable();
            sorted.dedup();
            sorted
        })
    }
}

/// Weekday ordinal with Sunday = 0.
pub fn weekday_ordinal(weekday: Weekday) -> u8 {
    weekday.num_days_from_sunday() as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_builder() {
        let end = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
        let rule = RecurrenceRule::weekly(2)
            .on_weekdays([Weekday::Wed, Weekday::Mon])
            .until(end);

        assert_eq!(rule.frequency, Frequency::Weekly);
        assert_eq!(rule.interval, 2);
        assert_eq!(rule.days_of_week, Some(vec![3, 1]));
        assert_eq!(rule.sorted_days(), Some(vec![1, 3]));
        assert_eq!(rule.end, EndCondition::On { end_date: Some(end) });
    }

    #[test]
    fn test_weekday_ordinal_sunday_is_zero() {
        assert_eq!(weekday_ordinal(Weekday::Sun), 0);
        assert_eq!(weekday_ordinal(Weekday::Mon), 1);
        assert_eq!(weekday_ordinal(Weekday::Sat), 6);
    }

    #[test]
    fn test_deserialize_form_shape() {
        let rule: RecurrenceRule = serde_json::from_value(json!({
            "frequency": "weekly",
            "interval": 1,
            "daysOfWeek": [1, 3, 5],
            "endType": "after",
            "occurrences": 6
        }))
        .unwrap();

        assert_eq!(rule, RecurrenceRule::weekly(1).on_days([1, 3, 5]).count(6));
    }

    #[test]
    fn test_deserialize_end_on_without_date() {
        let rule: RecurrenceRule = serde_json::from_value(json!({
            "frequency": "daily",
            "interval": 1,
            "endType": "on"
        }))
        .unwrap();

        assert_eq!(rule.end, EndCondition::On { end_date: None });
    }

    #[test]
    fn test_serialize_never() {
        let value = serde_json::to_value(RecurrenceRule::monthly(3)).unwrap();
        assert_eq!(
            value,
            json!({"frequency": "monthly", "interval": 3, "endType": "never"})
        );
    }

    #[test]
    fn test_serialize_until() {
        let end = NaiveDate::from_ymd_opt(2025, 2, 1).unwrap();
        let value = serde_json::to_value(RecurrenceRule::daily(1).until(end)).unwrap();
        assert_eq!(
            value,
            json!({"frequency": "daily", "interval": 1, "endType": "on", "endDate": "2025-02-01"})
        );
    }
}
