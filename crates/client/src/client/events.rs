//! Recurring event creation.

use campsync_core::cache::Clock;
use campsync_core::recurrence::{expand_series, RecurrenceRule, SeriesOccurrence};
use chrono::NaiveDateTime;
use serde_json::{Map, Value};

use super::resources::entity_path;
use super::CampsyncClient;
use crate::error::{ClientError, Result};

const EVENTS: &str = "events";

/// Request body for one occurrence: the template plus the series fields.
pub fn occurrence_body(template: &Map<String, Value>, occurrence: &SeriesOccurrence) -> Result<Value> {
    let mut body = template.clone();
    body.insert("startDate".to_string(), serde_json::to_value(occurrence.start)?);
    body.insert("endDate".to_string(), serde_json::to_value(occurrence.end)?);
    body.insert(
        "recurrenceId".to_string(),
        Value::String(occurrence.recurrence_id.to_string()),
    );
    body.insert(
        "isRecurrenceParent".to_string(),
        Value::Bool(occurrence.is_recurrence_parent),
    );
    if let Some(rule) = &occurrence.recurrence_rule {
        body.insert("recurrenceRule".to_string(), serde_json::to_value(rule)?);
    }
    Ok(Value::Object(body))
}

impl<C: Clock> CampsyncClient<C> {
    /// Expand `rule` into a series and create every occurrence as its own event.
    ///
    /// The rule is validated and the series expanded before anything is sent,
    /// so an invalid rule never creates a partial series. Returns the created
    /// events in occurrence order.
    pub async fn create_recurring_events(
        &self,
        camp_id: &str,
        template: &Value,
        start: NaiveDateTime,
        end: NaiveDateTime,
        rule: &RecurrenceRule,
        max_occurrences: usize,
    ) -> Result<Vec<Value>> {
        let Value::Object(template) = template else {
            return Err(ClientError::InvalidInput(
                "event template must be a JSON object".to_string(),
            ));
        };
        // Validate the path up front as well.
        entity_path(camp_id, EVENTS, None)?;

        let series = expand_series(start, end, rule, max_occurrences)?;
        let recurrence_id = series.first().map(|o| o.recurrence_id);
        tracing::info!(
            camp_id = %camp_id,
            recurrence_id = ?recurrence_id,
            count = series.len(),
            "Creating recurring event series"
        );

        let mut created = Vec::with_capacity(series.len());
        for occurrence in &series {
            let body = occurrence_body(template, occurrence)?;
            created.push(self.create(camp_id, EVENTS, &body).await?);
        }
        Ok(created)
    }
}
