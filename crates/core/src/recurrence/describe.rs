use super::types::{EndCondition, Frequency, RecurrenceRule};

const DAY_NAMES: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// Human-readable summary of a rule, e.g. `"Every 2 weeks on Mon, Wed, until Mar 1, 2025"`.
pub fn describe(rule: &RecurrenceRule) -> String {
    let mut description = if rule.interval == 1 {
        rule.frequency.adjective().to_string()
    } else {
        format!("Every {} {}", rule.interval, rule.frequency.plural_unit())
    };

    if rule.frequency == Frequency::Weekly {
        if let Some(days) = rule.sorted_days().filter(|days| !days.is_empty()) {
            let names: Vec<&str> = days
                .iter()
                .filter_map(|&day| DAY_NAMES.get(usize::from(day)).copied())
                .collect();
            description.push_str(&format!(" on {}", names.join(", ")));
        }
    }

    match rule.end {
        EndCondition::On {
            end_date: Some(end),
        } => description.push_str(&format!(", until {}", end.format("%b %-d, %Y"))),
        EndCondition::After {
            occurrences: Some(count),
        } if count > 0 => description.push_str(&format!(", {} times", count)),
        _ => {}
    }

    description
}
