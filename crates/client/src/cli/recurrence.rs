//! Recurrence CLI commands.

use campsync_core::recurrence::{Frequency as CoreFrequency, RecurrenceRule, DEFAULT_MAX_OCCURRENCES};
use chrono::{NaiveDate, NaiveDateTime};
use clap::{Args, Parser, Subcommand, ValueEnum};

/// Recurrence commands.
#[derive(Debug, Parser)]
pub struct RecurrenceCommand {
    #[command(subcommand)]
    pub action: RecurrenceAction,
}

/// CLI frequency (with clap ValueEnum).
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Frequency {
    Daily,
    Weekly,
    Monthly,
}

impl From<Frequency> for CoreFrequency {
    fn from(f: Frequency) -> Self {
        match f {
            Frequency::Daily => CoreFrequency::Daily,
            Frequency::Weekly => CoreFrequency::Weekly,
            Frequency::Monthly => CoreFrequency::Monthly,
        }
    }
}

/// Flags describing a recurrence rule.
#[derive(Debug, Clone, Args)]
pub struct RuleArgs {
    /// Repeat frequency.
    #[arg(long, value_enum)]
    pub frequency: Frequency,
    /// Repeat every N days/weeks/months.
    #[arg(long, default_value = "1")]
    pub interval: u32,
    /// Weekdays for weekly rules, Sunday = 0 (e.g. 1,3,5).
    #[arg(long, value_delimiter = ',')]
    pub days: Option<Vec<u8>>,
    /// Last date of the series (YYYY-MM-DD).
    #[arg(long, conflicts_with = "count")]
    pub until: Option<NaiveDate>,
    /// Number of occurrences.
    #[arg(long)]
    pub count: Option<u32>,
    /// Upper bound on generated occurrences.
    #[arg(long, default_value_t = DEFAULT_MAX_OCCURRENCES)]
    pub max: usize,
}

impl RuleArgs {
    /// Build the rule. Validation happens where the rule is used.
    pub fn to_rule(&self) -> RecurrenceRule {
        let mut rule = RecurrenceRule::new(self.frequency.into(), self.interval);
        if let Some(days) = &self.days {
            rule = rule.on_days(days.iter().copied());
        }
        match (self.until, self.count) {
            (Some(until), _) => rule.until(until),
            (None, Some(count)) => rule.count(count),
            (None, None) => rule,
        }
    }
}

/// Available recurrence actions.
#[derive(Debug, Subcommand)]
pub enum RecurrenceAction {
    /// Print the dates a rule generates (no network).
    Preview {
        /// First occurrence (YYYY-MM-DD).
        #[arg(long)]
        start: NaiveDate,
        #[command(flatten)]
        rule: RuleArgs,
    },
    /// Create a recurring event series.
    Create {
        /// Camp ID.
        #[arg(long)]
        camp: String,
        /// Event name.
        #[arg(long)]
        name: String,
        /// Start of the first occurrence (YYYY-MM-DDTHH:MM:SS).
        #[arg(long)]
        start: NaiveDateTime,
        /// End of the first occurrence (YYYY-MM-DDTHH:MM:SS).
        #[arg(long)]
        end: NaiveDateTime,
        /// Additional JSON fields merged into every occurrence.
        #[arg(long)]
        data: Option<String>,
        #[command(flatten)]
        rule: RuleArgs,
    },
}
