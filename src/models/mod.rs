//! Shared types: activity rows, neighbouring entities, feed entries and ID aliases.

pub mod activity;
pub mod camp;
pub mod feed;
pub mod ids;

pub use activity::{Activity, ActivityType, NewActivity, PaymentEvent, PaymentStamp};
pub use camp::{Answer, Payment, Question, QuestionGroup, RollCall, RollCallReaction, Room};
pub use feed::{
    ActivityDetail, ActivityResponse, PaymentChangedDetail, PaymentCreatedDetail,
    QuestionCreatedDetail, RollCallCreatedDetail,
};
pub use ids::{
    ActivityId, CampId, PaymentId, QuestionGroupId, QuestionId, RollCallId, RoomGroupId, RoomId,
    UserId,
};
