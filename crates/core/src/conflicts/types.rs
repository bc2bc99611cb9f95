use std::collections::HashMap;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Event IDs mapped to the camper or staff IDs attached to them.
pub type Roster = HashMap<String, Vec<String>>;

/// A timed event as seen by the conflict checks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduledEvent {
    pub id: String,
    pub name: String,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    #[serde(default)]
    pub capacity: Option<u32>,
    #[serde(default)]
    pub location_id: Option<String>,
    #[serde(default)]
    pub required_certification_ids: Vec<String>,
}

impl ScheduledEvent {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            start,
            end,
            capacity: None,
            location_id: None,
            required_certification_ids: Vec::new(),
        }
    }

    pub fn with_capacity(mut self, capacity: u32) -> Self {
        self.capacity = Some(capacity);
        self
    }

    pub fn at_location(mut self, location_id: impl Into<String>) -> Self {
        self.location_id = Some(location_id.into());
        self
    }

    pub fn requiring(mut self, certification_id: impl Into<String>) -> Self {
        self.required_certification_ids.push(certification_id.into());
        self
    }

    /// Half-open interval overlap; back-to-back events do not overlap.
    pub fn overlaps(&self, other: &ScheduledEvent) -> bool {
        overlaps(self.start, self.end, other.start, other.end)
    }
}

/// Whether `[start1, end1)` and `[start2, end2)` intersect.
pub fn overlaps(
    start1: NaiveDateTime,
    end1: NaiveDateTime,
    start2: NaiveDateTime,
    end2: NaiveDateTime,
) -> bool {
    start1 < end2 && start2 < end1
}

/// A camper or staff member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Person {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub certification_ids: Vec<String>,
}

impl Person {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            certification_ids: Vec::new(),
        }
    }

    pub fn certified(mut self, certification_id: impl Into<String>) -> Self {
        self.certification_ids.push(certification_id.into());
        self
    }
}

/// A location that hosts events or houses groups.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub capacity: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Certification {
    pub id: String,
    pub name: String,
}

/// A family group and where it sleeps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HousingGroup {
    pub id: String,
    #[serde(default)]
    pub housing_room_id: Option<String>,
    #[serde(default)]
    pub session_id: Option<String>,
}

/// Everything the conflict detector looks at.
///
/// `enrolled` maps event IDs to camper IDs and `assigned` maps event IDs to
/// staff IDs. Events missing from a roster have nobody attached.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Schedule {
    pub events: Vec<ScheduledEvent>,
    pub campers: Vec<Person>,
    pub staff: Vec<Person>,
    pub rooms: Vec<Room>,
    pub certifications: Vec<Certification>,
    pub enrolled: Roster,
    pub assigned: Roster,
}

impl Schedule {
    pub(crate) fn enrolled_in(&self, event_id: &str) -> &[String] {
        self.enrolled.get(event_id).map(Vec::as_slice).unwrap_or_default()
    }

    pub(crate) fn assigned_to(&self, event_id: &str) -> &[String] {
        self.assigned.get(event_id).map(Vec::as_slice).unwrap_or_default()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConflictKind {
    EventOvercapacity,
    RoomOvercapacity,
    CamperDoubleBooked,
    StaffDoubleBooked,
    MissingCertification,
}

impl std::fmt::Display for ConflictKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::EventOvercapacity => "event_overcapacity",
            Self::RoomOvercapacity => "room_overcapacity",
            Self::CamperDoubleBooked => "camper_double_booked",
            Self::StaffDoubleBooked => "staff_double_booked",
            Self::MissingCertification => "missing_certification",
        };
        write!(f, "{}", name)
    }
}

/// A detected scheduling problem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Conflict {
    #[serde(rename = "type")]
    pub kind: ConflictKind,
    pub message: String,
    /// The event, room, camper or staff member the conflict is about.
    pub entity_id: String,
    pub conflicting_ids: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use serde_json::json;

    fn at(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 7, 1)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    #[test]
    fn test_overlap_is_half_open() {
        assert!(overlaps(at(9, 0), at(10, 0), at(9, 30), at(11, 0)));
        assert!(overlaps(at(9, 0), at(12, 0), at(10, 0), at(11, 0)));
        assert!(!overlaps(at(9, 0), at(10, 0), at(10, 0), at(11, 0)));
        assert!(!overlaps(at(11, 0), at(12, 0), at(9, 0), at(10, 0)));
    }

    #[test]
    fn test_conflict_serializes_with_type_tag() {
        let conflict = Conflict {
            kind: ConflictKind::StaffDoubleBooked,
            message: "m".to_string(),
            entity_id: "s1".to_string(),
            conflicting_ids: vec!["e1".to_string(), "e2".to_string()],
        };
        assert_eq!(
            serde_json::to_value(&conflict).unwrap(),
            json!({
                "type": "staff_double_booked",
                "message": "m",
                "entityId": "s1",
                "conflictingIds": ["e1", "e2"]
            })
        );
    }

    #[test]
    fn test_schedule_deserializes_partial_input() {
        let schedule: Schedule = serde_json::from_value(json!({
            "events": [{"id": "e1", "name": "Swim", "start": "2025-07-01T09:00:00",
                        "end": "2025-07-01T10:00:00", "capacity": 10}],
            "enrolled": {"e1": ["c1"]}
        }))
        .unwrap();

        assert_eq!(schedule.events[0].capacity, Some(10));
        assert_eq!(schedule.enrolled_in("e1"), ["c1".to_string()]);
        assert!(schedule.assigned_to("e1").is_empty());
    }
}
