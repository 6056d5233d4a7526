//! Seams between the activity feed and the rest of the camp backend.
//!
//! The feed code only ever holds `Arc<dyn ...>` of these traits. Batch methods return everything
//! for a camp (or a viewer in a camp) in one call so the aggregator never queries per row.

use async_trait::async_trait;

use crate::error::ProviderError;
use crate::models::{
    Activity, Answer, CampId, NewActivity, Payment, PaymentId, QuestionGroup, RollCall, Room,
    RoomGroupId, UserId,
};

/// Append-only activity log.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ActivityStore: Send + Sync {
    async fn append(&self, activity: NewActivity) -> Result<Activity, ProviderError>;

    /// All rows for the camp, newest first. Ties on `created_at` are broken by id, descending.
    async fn list_by_camp(&self, camp_id: CampId) -> Result<Vec<Activity>, ProviderError>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RoomProvider: Send + Sync {
    /// The room the user currently sleeps in, if any.
    async fn get_viewer_room(
        &self,
        camp_id: CampId,
        user_id: UserId,
    ) -> Result<Option<Room>, ProviderError>;

    async fn get_room_group_camp_id(
        &self,
        room_group_id: RoomGroupId,
    ) -> Result<CampId, ProviderError>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RollCallProvider: Send + Sync {
    /// Roll calls with subjects and reactions loaded.
    async fn list_by_camp(&self, camp_id: CampId) -> Result<Vec<RollCall>, ProviderError>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait QuestionGroupProvider: Send + Sync {
    /// Question groups with their questions loaded.
    async fn list_by_camp(&self, camp_id: CampId) -> Result<Vec<QuestionGroup>, ProviderError>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AnswerProvider: Send + Sync {
    async fn list_by_user(
        &self,
        camp_id: CampId,
        user_id: UserId,
        include_private: bool,
    ) -> Result<Vec<Answer>, ProviderError>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PaymentProvider: Send + Sync {
    async fn get_payment(&self, payment_id: PaymentId) -> Result<Payment, ProviderError>;
}
