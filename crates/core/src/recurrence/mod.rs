mod describe;
mod error;
mod generator;
mod series;
mod types;
mod validation;

pub use describe::describe;
pub use error::{RecurrenceError, SeriesError};
pub use generator::{generate, generate_dates, DEFAULT_MAX_OCCURRENCES};
pub use series::{expand_series, expand_series_with_id, SeriesOccurrence};
pub use types::{weekday_ordinal, EndCondition, Frequency, RecurrenceRule};
pub use validation::{check, validate, ValidationResult};
