//! Raw activity log rows. One row per recorded domain event; rows are never updated.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ids::{ActivityId, CampId, PaymentId, QuestionGroupId, RollCallId, RoomId, UserId};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityType {
    RoomCreated,
    PaymentCreated,
    PaymentAmountChanged,
    PaymentPaidChanged,
    RollCallCreated,
    QuestionCreated,
}

impl ActivityType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityType::RoomCreated => "room_created",
            ActivityType::PaymentCreated => "payment_created",
            ActivityType::PaymentAmountChanged => "payment_amount_changed",
            ActivityType::PaymentPaidChanged => "payment_paid_changed",
            ActivityType::RollCallCreated => "roll_call_created",
            ActivityType::QuestionCreated => "question_created",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "room_created" => Some(ActivityType::RoomCreated),
            "payment_created" => Some(ActivityType::PaymentCreated),
            "payment_amount_changed" => Some(ActivityType::PaymentAmountChanged),
            "payment_paid_changed" => Some(ActivityType::PaymentPaidChanged),
            "roll_call_created" => Some(ActivityType::RollCallCreated),
            "question_created" => Some(ActivityType::QuestionCreated),
            _ => None,
        }
    }

    /// Payment rows carry the owner and an amount; every other type carries neither.
    pub fn is_payment(&self) -> bool {
        matches!(
            self,
            ActivityType::PaymentCreated
                | ActivityType::PaymentAmountChanged
                | ActivityType::PaymentPaidChanged
        )
    }
}

impl std::fmt::Display for ActivityType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A stored activity row as read back from the log.
///
/// `user_id` and `amount` are kept as separate options because legacy rows may have only one of
/// them; readers go through [`Activity::payment_stamp`] which only answers when both are present.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Activity {
    pub id: ActivityId,
    pub activity_type: ActivityType,
    pub camp_id: CampId,
    pub user_id: Option<UserId>,
    /// Room, payment, roll call or question group id depending on `activity_type`.
    pub reference_id: uuid::Uuid,
    pub amount: Option<i64>,
    pub created_at: DateTime<Utc>,
}

impl Activity {
    pub fn payment_stamp(&self) -> Option<PaymentStamp> {
        match (self.user_id, self.amount) {
            (Some(user_id), Some(amount)) => Some(PaymentStamp { user_id, amount }),
            _ => None,
        }
    }
}

/// Owner and amount of a payment-type row.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentStamp {
    pub user_id: UserId,
    pub amount: i64,
}

/// A row about to be appended. Only the constructors below can build one, so a payment stamp
/// exists exactly for payment types.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewActivity {
    activity_type: ActivityType,
    camp_id: CampId,
    reference_id: uuid::Uuid,
    payment: Option<PaymentStamp>,
}

/// The three payment events share one row shape.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PaymentEvent {
    Created,
    AmountChanged,
    PaidChanged,
}

impl PaymentEvent {
    pub fn activity_type(self) -> ActivityType {
        match self {
            PaymentEvent::Created => ActivityType::PaymentCreated,
            PaymentEvent::AmountChanged => ActivityType::PaymentAmountChanged,
            PaymentEvent::PaidChanged => ActivityType::PaymentPaidChanged,
        }
    }
}

impl NewActivity {
    pub fn room_created(camp_id: CampId, room_id: RoomId) -> Self {
        Self {
            activity_type: ActivityType::RoomCreated,
            camp_id,
            reference_id: room_id,
            payment: None,
        }
    }

    pub fn payment(
        event: PaymentEvent,
        camp_id: CampId,
        payment_id: PaymentId,
        user_id: UserId,
        amount: i64,
    ) -> Self {
        Self {
            activity_type: event.activity_type(),
            camp_id,
            reference_id: payment_id,
            payment: Some(PaymentStamp { user_id, amount }),
        }
    }

    pub fn roll_call_created(camp_id: CampId, roll_call_id: RollCallId) -> Self {
        Self {
            activity_type: ActivityType::RollCallCreated,
            camp_id,
            reference_id: roll_call_id,
            payment: None,
        }
    }

    pub fn question_created(camp_id: CampId, question_group_id: QuestionGroupId) -> Self {
        Self {
            activity_type: ActivityType::QuestionCreated,
            camp_id,
            reference_id: question_group_id,
            payment: None,
        }
    }

    pub fn activity_type(&self) -> ActivityType {
        self.activity_type
    }

    pub fn camp_id(&self) -> CampId {
        self.camp_id
    }

    pub fn reference_id(&self) -> uuid::Uuid {
        self.reference_id
    }

    pub fn user_id(&self) -> Option<UserId> {
        self.payment.map(|p| p.user_id)
    }

    pub fn amount(&self) -> Option<i64> {
        self.payment.map(|p| p.amount)
    }

    /// Materialise the row once the store has assigned an id and timestamp.
    pub fn into_activity(self, id: ActivityId, created_at: DateTime<Utc>) -> Activity {
        Activity {
            id,
            activity_type: self.activity_type,
            camp_id: self.camp_id,
            user_id: self.user_id(),
            reference_id: self.reference_id,
            amount: self.amount(),
            created_at,
        }
    }
}
