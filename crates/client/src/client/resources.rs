//! Camp-scoped entity operations.
//!
//! Entities live under `/api/camps/{camp_id}/{entity}` and are exchanged as
//! plain JSON values.

use reqwest::Method;
use serde_json::Value;

use super::CampsyncClient;
use crate::error::{ClientError, Result};
use campsync_core::cache::Clock;

/// Path of an entity collection, or of one item when `id` is given.
pub fn entity_path(camp_id: &str, entity: &str, id: Option<&str>) -> Result<String> {
    for (name, value) in [("camp id", camp_id), ("entity type", entity)] {
        if value.is_empty() || value.contains('/') {
            return Err(ClientError::InvalidInput(format!("invalid {}: {:?}", name, value)));
        }
    }
    match id {
        Some(id) if id.is_empty() || id.contains('/') => {
            Err(ClientError::InvalidInput(format!("invalid id: {:?}", id)))
        }
        Some(id) => Ok(format!("/api/camps/{}/{}/{}", camp_id, entity, id)),
        None => Ok(format!("/api/camps/{}/{}", camp_id, entity)),
    }
}

impl<C: Clock> CampsyncClient<C> {
    /// List entities of a type, optionally filtered by query pairs.
    pub async fn list(
        &self,
        camp_id: &str,
        entity: &str,
        query: &[(String, String)],
    ) -> Result<Value> {
        let url = self.url(&entity_path(camp_id, entity, None)?, query)?;
        let body = self.get_cached(url).await?;
        Ok(serde_json::from_str(&body)?)
    }

    /// Get one entity by ID.
    pub async fn get(&self, camp_id: &str, entity: &str, id: &str) -> Result<Value> {
        let url = self.url(&entity_path(camp_id, entity, Some(id))?, &[])?;
        let body = self.get_cached(url).await?;
        Ok(serde_json::from_str(&body)?)
    }

    /// Create an entity.
    pub async fn create(&self, camp_id: &str, entity: &str, body: &Value) -> Result<Value> {
        let url = self.url(&entity_path(camp_id, entity, None)?, &[])?;
        let response = self.mutate(Method::POST, url, Some(body)).await?;
        parse_optional_body(&response)
    }

    /// Update an entity.
    pub async fn update(
        &self,
        camp_id: &str,
        entity: &str,
        id: &str,
        body: &Value,
    ) -> Result<Value> {
        let url = self.url(&entity_path(camp_id, entity, Some(id))?, &[])?;
        let response = self.mutate(Method::PUT, url, Some(body)).await?;
        parse_optional_body(&response)
    }

    /// Delete an entity by ID.
    pub async fn delete(&self, camp_id: &str, entity: &str, id: &str) -> Result<()> {
        let url = self.url(&entity_path(camp_id, entity, Some(id))?, &[])?;
        self.mutate(Method::DELETE, url, None).await?;
        Ok(())
    }
}

/// Empty bodies (e.g. `204 No Content`) become `null`.
fn parse_optional_body(body: &str) -> Result<Value> {
    if body.trim().is_empty() {
        return Ok(Value::Null);
    }
    Ok(serde_json::from_str(body)?)
}
