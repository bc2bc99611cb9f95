//! Scheduling conflict checks.
//!
//! Pure functions over a [`Schedule`] snapshot: events, campers, staff,
//! rooms and who is attached to which event. Nothing here talks to the API.

mod detector;
mod housing;
mod types;

pub use detector::{
    can_assign_staff, detect_conflicts, event_overcapacity, missing_certifications,
    room_overcapacity, StaffAvailability,
};
pub use housing::{
    available_rooms_for_session, can_assign_group_to_room, groups_in_room_for_session,
    RoomAvailability,
};
pub use types::{
    overlaps, Certification, Conflict, ConflictKind, HousingGroup, Person, Room, Roster,
    Schedule, ScheduledEvent,
};
