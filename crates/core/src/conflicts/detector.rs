//! Schedule-wide conflict detection.
//!
//! Results are ordered by kind, then by the order of the input lists.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::types::{overlaps, Conflict, ConflictKind, Person, Schedule, ScheduledEvent};

fn format_date(at: NaiveDateTime) -> String {
    at.format("%b %-d, %Y").to_string()
}

fn format_time(at: NaiveDateTime) -> String {
    at.format("%-I:%M %p").to_string()
}

/// Runs every check over `schedule`.
pub fn detect_conflicts(schedule: &Schedule) -> Vec<Conflict> {
    let mut conflicts = event_overcapacity(schedule);
    conflicts.extend(room_overcapacity(schedule));
    conflicts.extend(double_booked(
        schedule,
        &schedule.campers,
        ConflictKind::CamperDoubleBooked,
    ));
    conflicts.extend(double_booked(
        schedule,
        &schedule.staff,
        ConflictKind::StaffDoubleBooked,
    ));
    conflicts.extend(missing_certifications(schedule));

    tracing::debug!(
        events = schedule.events.len(),
        conflicts = conflicts.len(),
        "Detected schedule conflicts"
    );
    conflicts
}

/// Events with more enrolled campers than their capacity.
///
/// An event without a capacity (or with capacity 0) has no limit.
pub fn event_overcapacity(schedule: &Schedule) -> Vec<Conflict> {
    schedule
        .events
        .iter()
        .filter_map(|event| {
            let capacity = event.capacity.filter(|c| *c > 0)?;
            let enrolled = schedule.enrolled_in(&event.id);
            (enrolled.len() > capacity as usize).then(|| Conflict {
                kind: ConflictKind::EventOvercapacity,
                message: format!(
                    "Event \"{}\" on {} has {} campers enrolled but capacity is {}",
                    event.name,
                    format_date(event.start),
                    enrolled.len(),
                    capacity
                ),
                entity_id: event.id.clone(),
                conflicting_ids: enrolled.to_vec(),
            })
        })
        .collect()
}

/// Overlapping event pairs in one room whose combined campers exceed the room.
pub fn room_overcapacity(schedule: &Schedule) -> Vec<Conflict> {
    let mut conflicts = Vec::new();
    for room in &schedule.rooms {
        let Some(capacity) = room.capacity.filter(|c| *c > 0) else {
            continue;
        };
        let events: Vec<&ScheduledEvent> = schedule
            .events
            .iter()
            .filter(|e| e.location_id.as_deref() == Some(room.id.as_str()))
            .collect();

        for (i, first) in events.iter().enumerate() {
            for second in &events[i + 1..] {
                if !first.overlaps(second) {
                    continue;
                }
                let total =
                    schedule.enrolled_in(&first.id).len() + schedule.enrolled_in(&second.id).len();
                if total > capacity as usize {
                    conflicts.push(Conflict {
                        kind: ConflictKind::RoomOvercapacity,
                        message: format!(
                            "Room \"{}\" has overlapping events exceeding capacity on {} ({}/{})",
                            room.name,
                            format_date(first.start),
                            total,
                            capacity
                        ),
                        entity_id: room.id.clone(),
                        conflicting_ids: vec![first.id.clone(), second.id.clone()],
                    });
                }
            }
        }
    }
    conflicts
}

fn double_booked(schedule: &Schedule, people: &[Person], kind: ConflictKind) -> Vec<Conflict> {
    let (roster, verb) = match kind {
        ConflictKind::CamperDoubleBooked => (&schedule.enrolled, "is enrolled in"),
        _ => (&schedule.assigned, "is assigned to"),
    };

    let mut conflicts = Vec::new();
    for person in people {
        let events: Vec<&ScheduledEvent> = schedule
            .events
            .iter()
            .filter(|e| {
                roster
                    .get(&e.id)
                    .is_some_and(|ids| ids.iter().any(|id| *id == person.id))
            })
            .collect();

        for (i, first) in events.iter().enumerate() {
            for second in &events[i + 1..] {
                if first.overlaps(second) {
                    conflicts.push(Conflict {
                        kind,
                        message: format!(
                            "{} {} overlapping events on {} (\"{}\" at {} and \"{}\" at {})",
                            person.name,
                            verb,
                            format_date(first.start),
                            first.name,
                            format_time(first.start),
                            second.name,
                            format_time(second.start)
                        ),
                        entity_id: person.id.clone(),
                        conflicting_ids: vec![first.id.clone(), second.id.clone()],
                    });
                }
            }
        }
    }
    conflicts
}

/// Events whose assigned staff do not hold every required certification.
///
/// Certifications are pooled across the assigned staff, so any one of them
/// holding a certification satisfies it.
pub fn missing_certifications(schedule: &Schedule) -> Vec<Conflict> {
    schedule
        .events
        .iter()
        .filter(|event| !event.required_certification_ids.is_empty())
        .filter_map(|event| {
            let assigned = schedule.assigned_to(&event.id);
            let held: Vec<&String> = schedule
                .staff
                .iter()
                .filter(|s| assigned.contains(&s.id))
                .flat_map(|s| &s.certification_ids)
                .collect();

            let missing: Vec<&str> = event
                .required_certification_ids
                .iter()
                .filter(|required| !held.contains(required))
                .map(|required| {
                    schedule
                        .certifications
                        .iter()
                        .find(|c| c.id == *required)
                        .map_or(required.as_str(), |c| c.name.as_str())
                })
                .collect();
            if missing.is_empty() {
                return None;
            }

            Some(Conflict {
                kind: ConflictKind::MissingCertification,
                message: format!(
                    "Event \"{}\" on {} requires certifications: {}",
                    event.name,
                    format_date(event.start),
                    missing.join(", ")
                ),
                entity_id: event.id.clone(),
                conflicting_ids: assigned.to_vec(),
            })
        })
        .collect()
}

/// Whether a staff member is free for a proposed time slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StaffAvailability {
    pub can_assign: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conflicting_event_id: Option<String>,
}

/// Checks `staff_id` against the events they are already assigned to.
///
/// `exclude_event_id` skips the event being edited so it does not clash with
/// itself.
pub fn can_assign_staff(
    schedule: &Schedule,
    staff_id: &str,
    start: NaiveDateTime,
    end: NaiveDateTime,
    exclude_event_id: Option<&str>,
) -> StaffAvailability {
    let clash = schedule.events.iter().find(|event| {
        Some(event.id.as_str()) != exclude_event_id
            && schedule.assigned_to(&event.id).iter().any(|id| id == staff_id)
            && overlaps(start, end, event.start, event.end)
    });

    match clash {
        Some(event) => StaffAvailability {
            can_assign: false,
            reason: Some(format!(
                "Already assigned to \"{}\" at {}",
                event.name,
                format_time(event.start)
            )),
            conflicting_event_id: Some(event.id.clone()),
        },
        None => StaffAvailability {
            can_assign: true,
            reason: None,
            conflicting_event_id: None,
        },
    }
}
