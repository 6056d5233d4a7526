//! Type aliases for entity IDs. All are UUIDs; validation happens at parse boundaries (e.g. Uuid::parse_str).
//! The activity log stores references as bare ids, so these aliases are what keeps a room id from
//! being read as a roll call id at a glance.

use uuid::Uuid;

pub type ActivityId = Uuid;
pub type CampId = Uuid;
pub type UserId = Uuid;
pub type RoomId = Uuid;
pub type RoomGroupId = Uuid;
pub type PaymentId = Uuid;
pub type RollCallId = Uuid;
pub type QuestionGroupId = Uuid;
pub type QuestionId = Uuid;

/// Parse a string into a UUID or return an error message. Use at CLI/API boundaries.
pub fn parse_uuid(id: &str, name: &str) -> Result<Uuid, String> {
    Uuid::parse_str(id).map_err(|e| format!("Invalid {}: {}", name, e))
}
