//! Entities owned by neighbouring subsystems. Only the fields the activity log reads are modelled.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ids::{
    CampId, PaymentId, QuestionGroupId, QuestionId, RollCallId, RoomGroupId, RoomId, UserId,
};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    pub id: RoomId,
    pub room_group_id: RoomGroupId,
    pub name: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payment {
    pub id: PaymentId,
    pub camp_id: CampId,
    pub user_id: UserId,
    pub amount: i64,
    pub amount_paid: i64,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollCall {
    pub id: RollCallId,
    pub camp_id: CampId,
    pub name: String,
    /// Users required to respond.
    pub subjects: Vec<UserId>,
    pub reactions: Vec<RollCallReaction>,
}

impl RollCall {
    pub fn is_subject(&self, user_id: UserId) -> bool {
        self.subjects.contains(&user_id)
    }

    pub fn has_reaction_from(&self, user_id: UserId) -> bool {
        self.reactions.iter().any(|r| r.user_id == user_id)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollCallReaction {
    pub user_id: UserId,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionGroup {
    pub id: QuestionGroupId,
    pub camp_id: CampId,
    pub name: String,
    pub due: DateTime<Utc>,
    pub questions: Vec<Question>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: QuestionId,
    pub is_required: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Answer {
    pub question_id: QuestionId,
}
