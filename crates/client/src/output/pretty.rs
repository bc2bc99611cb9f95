//! Pretty output formatting.

use campsync_core::cache::CacheStats;
use campsync_core::conflicts::{Conflict, StaffAvailability};
use chrono::NaiveDate;
use serde_json::Value;

use crate::client::account::AccessSummary;

/// Fields tried, in order, for an entity's display name.
const NAME_FIELDS: &[&str] = &["name", "title", "firstName", "email"];

fn field_str<'a>(entity: &'a Value, field: &str) -> Option<&'a str> {
    entity.get(field).and_then(Value::as_str)
}

/// One-line summary of an entity: name and ID.
pub fn format_entity_line(entity: &Value) -> String {
    let name = NAME_FIELDS
        .iter()
        .find_map(|field| field_str(entity, field))
        .unwrap_or("(unnamed)");
    match entity.get("id") {
        Some(Value::String(id)) => format!("{}\n  ID: {}", name, id),
        Some(id) if !id.is_null() => format!("{}\n  ID: {}", name, id),
        _ => name.to_string(),
    }
}

/// Format a single entity with every top-level field.
pub fn format_entity(entity: &Value) -> String {
    let Value::Object(fields) = entity else {
        return entity.to_string();
    };
    let mut output = format_entity_line(entity);
    for (key, value) in fields {
        if key == "id" {
            continue;
        }
        let rendered = match value {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        };
        output.push_str(&format!("\n  {}: {}", key, rendered));
    }
    output
}

/// Format a list response. Non-array payloads are shown as a single entity.
pub fn format_entities(entity_type: &str, payload: &Value) -> String {
    let Some(items) = payload.as_array() else {
        return format_entity(payload);
    };
    if items.is_empty() {
        return format!("No {} found.", entity_type);
    }
    let mut output = format!("{} ({})\n", entity_type.to_uppercase(), items.len());
    output.push_str(&"-".repeat(40));
    for item in items {
        output.push_str(&format!("\n{}", format_entity_line(item)));
        output.push('\n');
    }
    output
}

/// Format generated dates with the rule description.
pub fn format_dates(description: &str, dates: &[NaiveDate]) -> String {
    let mut output = format!("{} ({} occurrences)\n", description, dates.len());
    output.push_str(&"-".repeat(40));
    for date in dates {
        output.push_str(&format!("\n  {}", date.format("%a %Y-%m-%d")));
    }
    output
}

/// Format request cache statistics.
pub fn format_cache_stats(stats: &CacheStats) -> String {
    let mut output = format!(
        "Cache stats:\n  Hits: {}\n  Misses: {}\n  Invalidations: {}\n  Size: {}",
        stats.hits, stats.misses, stats.invalidations, stats.size
    );
    for key in &stats.entries {
        output.push_str(&format!("\n    {}", key));
    }
    output
}

fn yes_no(value: bool) -> &'static str {
    if value {
        "yes"
    } else {
        "no"
    }
}

/// Format the signed-in user and their access.
pub fn format_access(summary: &AccessSummary) -> String {
    let principal = &summary.principal;
    let mut output = format!("{}\n  ID: {}", principal.email, principal.id);
    if let Some(tenant) = &principal.tenant_id {
        output.push_str(&format!("\n  Tenant: {}", tenant));
    }
    output.push_str(&format!(
        "\n  System access: {}\n  Tenant access: {}",
        yes_no(summary.system_access),
        yes_no(summary.tenant_access)
    ));
    if summary.accessible_camp_ids.is_empty() {
        output.push_str("\n  Camps: all");
    } else {
        output.push_str(&format!("\n  Camps: {}", summary.accessible_camp_ids.join(", ")));
    }

    if let Some(camp) = &summary.camp {
        let role = camp
            .role
            .map_or_else(|| "none".to_string(), |role| role.to_string());
        output.push_str(&format!(
            "\n\nCamp {} (role: {})\n  view: {}  create: {}  edit: {}  delete: {}",
            camp.camp_id,
            role,
            yes_no(camp.can_view),
            yes_no(camp.can_create),
            yes_no(camp.can_edit),
            yes_no(camp.can_delete)
        ));
    }
    output
}

/// Format detected conflicts, one per line.
pub fn format_conflicts(conflicts: &[Conflict]) -> String {
    if conflicts.is_empty() {
        return "No conflicts found.".to_string();
    }
    let mut output = format!("CONFLICTS ({})\n", conflicts.len());
    output.push_str(&"-".repeat(40));
    for conflict in conflicts {
        output.push_str(&format!("\n[{}] {}", conflict.kind, conflict.message));
    }
    output
}

pub fn format_staff_availability(staff_id: &str, availability: &StaffAvailability) -> String {
    if availability.can_assign {
        return format!("{} is available", staff_id);
    }
    match &availability.reason {
        Some(reason) => format!("{} is not available: {}", staff_id, reason),
        None => format!("{} is not available", staff_id),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use campsync_core::conflicts::ConflictKind;
    use campsync_core::permissions::{AccessRule, Principal, Role};
    use serde_json::json;

    #[test]
    fn test_format_entities_empty() {
        assert_eq!(format_entities("campers", &json!([])), "No campers found.");
    }

    #[test]
    fn test_format_entities_list() {
        let output = format_entities(
            "campers",
            &json!([{"id": "c1", "firstName": "Ada"}, {"id": 2, "name": "Bo"}]),
        );
        assert!(output.starts_with("CAMPERS (2)"));
        assert!(output.contains("Ada\n  ID: c1"));
        assert!(output.contains("Bo\n  ID: 2"));
    }

    #[test]
    fn test_format_entity_fields() {
        let output = format_entity(&json!({"id": "g1", "name": "Eagles", "size": 12}));
        assert_eq!(output, "Eagles\n  ID: g1\n  name: Eagles\n  size: 12");
    }

    #[test]
    fn test_format_dates() {
        let dates = [NaiveDate::from_ymd_opt(2025, 1, 6).unwrap()];
        let output = format_dates("Weekly on Mon", &dates);
        assert!(output.starts_with("Weekly on Mon (1 occurrences)"));
        assert!(output.ends_with("Mon 2025-01-06"));
    }

    #[test]
    fn test_format_cache_stats() {
        let stats = CacheStats {
            hits: 1,
            misses: 2,
            invalidations: 0,
            size: 1,
            entries: vec!["GET:/api/camps/1/campers::no-token".to_string()],
        };
        let output = format_cache_stats(&stats);
        assert!(output.contains("Hits: 1"));
        assert!(output.contains("Misses: 2"));
        assert!(output.ends_with("GET:/api/camps/1/campers::no-token"));
    }

    #[test]
    fn test_format_access_with_camp() {
        let principal = Principal::new("u1", "mixed@example.com")
            .with_tenant("tenant-1")
            .with_rule(AccessRule::camp(Role::Admin, "camp-1"))
            .with_rule(AccessRule::camp(Role::Viewer, "camp-2"));
        let output = format_access(&AccessSummary::new(principal, Some("camp-2")));

        assert!(output.starts_with("mixed@example.com\n  ID: u1\n  Tenant: tenant-1"));
        assert!(output.contains("Camps: camp-1, camp-2"));
        assert!(output.ends_with(
            "Camp camp-2 (role: viewer)\n  view: yes  create: no  edit: no  delete: no"
        ));
    }

    #[test]
    fn test_format_access_for_admin_lists_all_camps() {
        let principal =
            Principal::new("u2", "root@example.com").with_rule(AccessRule::system(Role::Admin));
        let output = format_access(&AccessSummary::new(principal, None));
        assert!(output.contains("System access: yes"));
        assert!(output.ends_with("Camps: all"));
    }

    #[test]
    fn test_format_conflicts() {
        assert_eq!(format_conflicts(&[]), "No conflicts found.");

        let conflicts = [Conflict {
            kind: ConflictKind::EventOvercapacity,
            message: "Event \"Swim\" is full".to_string(),
            entity_id: "e1".to_string(),
            conflicting_ids: vec![],
        }];
        let output = format_conflicts(&conflicts);
        assert!(output.starts_with("CONFLICTS (1)"));
        assert!(output.ends_with("[event_overcapacity] Event \"Swim\" is full"));
    }

    #[test]
    fn test_format_staff_availability() {
        let busy = StaffAvailability {
            can_assign: false,
            reason: Some("Already assigned to \"Hike\" at 9:30 AM".to_string()),
            conflicting_event_id: Some("hike".to_string()),
        };
        assert_eq!(
            format_staff_availability("s1", &busy),
            "s1 is not available: Already assigned to \"Hike\" at 9:30 AM"
        );
    }
}
