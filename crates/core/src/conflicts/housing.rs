//! Session-based housing checks for family groups.

use serde::{Deserialize, Serialize};

use super::types::{HousingGroup, Room};

/// Groups already sleeping in `room_id` during `session_id`.
pub fn groups_in_room_for_session<'a>(
    room_id: &str,
    session_id: &str,
    groups: &'a [HousingGroup],
    exclude_group_id: Option<&str>,
) -> Vec<&'a HousingGroup> {
    groups
        .iter()
        .filter(|g| Some(g.id.as_str()) != exclude_group_id)
        .filter(|g| g.housing_room_id.as_deref() == Some(room_id))
        .filter(|g| g.session_id.as_deref() == Some(session_id))
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomAvailability {
    pub can_assign: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub conflicting_group_ids: Vec<String>,
}

/// A sleeping room holds one family group per session.
pub fn can_assign_group_to_room(
    room_id: &str,
    session_id: &str,
    groups: &[HousingGroup],
    exclude_group_id: Option<&str>,
) -> RoomAvailability {
    let occupants = groups_in_room_for_session(room_id, session_id, groups, exclude_group_id);
    if occupants.is_empty() {
        return RoomAvailability {
            can_assign: true,
            reason: None,
            conflicting_group_ids: Vec::new(),
        };
    }

    let who = if occupants.len() == 1 {
        "another family group"
    } else {
        "other family groups"
    };
    RoomAvailability {
        can_assign: false,
        reason: Some(format!(
            "This room is already occupied by {} during this session",
            who
        )),
        conflicting_group_ids: occupants.iter().map(|g| g.id.clone()).collect(),
    }
}

/// Rooms with no other family group in `session_id`.
pub fn available_rooms_for_session<'a>(
    session_id: &str,
    rooms: &'a [Room],
    groups: &[HousingGroup],
    exclude_group_id: Option<&str>,
) -> Vec<&'a Room> {
    rooms
        .iter()
        .filter(|room| {
            groups_in_room_for_session(&room.id, session_id, groups, exclude_group_id).is_empty()
        })
        .collect()
}
