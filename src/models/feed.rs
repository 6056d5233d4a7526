//! Per-viewer feed entries. Computed on every request and never stored.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::activity::ActivityType;
use super::ids::{ActivityId, QuestionGroupId, RollCallId};

/// One feed entry. Serialises as `{"id", "time", "type", ...detail fields}`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityResponse {
    pub id: ActivityId,
    pub time: DateTime<Utc>,
    #[serde(flatten)]
    pub detail: ActivityDetail,
}

impl ActivityResponse {
    pub fn activity_type(&self) -> ActivityType {
        self.detail.activity_type()
    }
}

/// Type-specific payload, tagged on the wire by `type`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ActivityDetail {
    RoomCreated,
    PaymentCreated(PaymentCreatedDetail),
    PaymentAmountChanged(PaymentChangedDetail),
    PaymentPaidChanged(PaymentChangedDetail),
    RollCallCreated(RollCallCreatedDetail),
    QuestionCreated(QuestionCreatedDetail),
}

impl ActivityDetail {
    pub fn activity_type(&self) -> ActivityType {
        match self {
            ActivityDetail::RoomCreated => ActivityType::RoomCreated,
            ActivityDetail::PaymentCreated(_) => ActivityType::PaymentCreated,
            ActivityDetail::PaymentAmountChanged(_) => ActivityType::PaymentAmountChanged,
            ActivityDetail::PaymentPaidChanged(_) => ActivityType::PaymentPaidChanged,
            ActivityDetail::RollCallCreated(_) => ActivityType::RollCallCreated,
            ActivityDetail::QuestionCreated(_) => ActivityType::QuestionCreated,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentCreatedDetail {
    pub amount: i64,
}

/// Shared by amount-changed and paid-changed entries.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentChangedDetail {
    pub amount: i64,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollCallCreatedDetail {
    pub roll_call_id: RollCallId,
    pub name: String,
    pub is_subject: bool,
    pub answered: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionCreatedDetail {
    pub question_group_id: QuestionGroupId,
    pub name: String,
    pub due: DateTime<Utc>,
    pub needs_response: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use uuid::Uuid;

    fn entry(detail: ActivityDetail) -> ActivityResponse {
        ActivityResponse {
            id: Uuid::nil(),
            time: DateTime::parse_from_rfc3339("2026-07-01T09:30:00Z")
                .unwrap()
                .with_timezone(&Utc),
            detail,
        }
    }

    #[test]
    fn room_created_serialises_without_detail_fields() {
        let value = serde_json::to_value(entry(ActivityDetail::RoomCreated)).unwrap();
        assert_eq!(
            value,
            json!({
                "id": "00000000-0000-0000-0000-000000000000",
                "time": "2026-07-01T09:30:00Z",
                "type": "room_created",
            })
        );
    }

    #[test]
    fn payment_detail_is_flattened_next_to_type() {
        let value = serde_json::to_value(entry(ActivityDetail::PaymentPaidChanged(
            PaymentChangedDetail { amount: 5000 },
        )))
        .unwrap();
        assert_eq!(value["type"], "payment_paid_changed");
        assert_eq!(value["amount"], 5000);
        assert!(value.get("detail").is_none());
    }

    #[test]
    fn roll_call_entry_carries_only_its_own_fields() {
        let value = serde_json::to_value(entry(ActivityDetail::RollCallCreated(
            RollCallCreatedDetail {
                roll_call_id: Uuid::nil(),
                name: "Morning check".to_string(),
                is_subject: true,
                answered: false,
            },
        )))
        .unwrap();
        let mut keys: Vec<&str> = value.as_object().unwrap().keys().map(|k| k.as_str()).collect();
        keys.sort_unstable();
        assert_eq!(
            keys,
            vec!["answered", "id", "is_subject", "name", "roll_call_id", "time", "type"]
        );
    }

    #[test]
    fn wire_form_reads_back_into_the_same_variant() {
        let original = entry(ActivityDetail::QuestionCreated(QuestionCreatedDetail {
            question_group_id: Uuid::new_v4(),
            name: "Allergies".to_string(),
            due: Utc::now(),
            needs_response: true,
        }));
        let text = serde_json::to_string(&original).unwrap();
        let parsed: ActivityResponse = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed.activity_type(), ActivityType::QuestionCreated);
        assert_eq!(parsed, original);
    }
}
