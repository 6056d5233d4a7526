//! Write side of the activity log. Each `record_*` call appends exactly one row (except
//! `record_payment_updated`, which appends one per changed column).
//!
//! Writes are not transactional with the mutation that triggered them: callers record after
//! their own commit and a failed append is reported back, not retried.

use std::sync::Arc;

use tracing::{debug, info};

use crate::error::RecordError;
use crate::models::{
    Activity, NewActivity, Payment, PaymentEvent, QuestionGroup, RollCall, Room,
};
use crate::services::providers::{ActivityStore, PaymentProvider, RoomProvider};

#[derive(Clone)]
pub struct ActivityRecorder {
    store: Arc<dyn ActivityStore>,
    rooms: Arc<dyn RoomProvider>,
    payments: Arc<dyn PaymentProvider>,
}

impl ActivityRecorder {
    pub fn new(
        store: Arc<dyn ActivityStore>,
        rooms: Arc<dyn RoomProvider>,
        payments: Arc<dyn PaymentProvider>,
    ) -> Self {
        Self {
            store,
            rooms,
            payments,
        }
    }

    /// Rooms only know their room group; the camp comes from there.
    pub async fn record_room_created(&self, room: &Room) -> Result<Activity, RecordError> {
        let camp_id = self
            .rooms
            .get_room_group_camp_id(room.room_group_id)
            .await
            .map_err(|source| RecordError::CampLookup {
                room_group_id: room.room_group_id,
                source,
            })?;
        self.append(NewActivity::room_created(camp_id, room.id)).await
    }

    pub async fn record_payment_created(&self, payment: &Payment) -> Result<Activity, RecordError> {
        self.record_payment(PaymentEvent::Created, payment).await
    }

    pub async fn record_payment_amount_changed(
        &self,
        payment: &Payment,
    ) -> Result<Activity, RecordError> {
        self.record_payment(PaymentEvent::AmountChanged, payment).await
    }

    pub async fn record_payment_paid_changed(
        &self,
        payment: &Payment,
    ) -> Result<Activity, RecordError> {
        self.record_payment(PaymentEvent::PaidChanged, payment).await
    }

    /// Compare `previous` with the payment as it is now stored and record whichever of
    /// amount / amount paid changed, amount first. Returns the appended rows.
    pub async fn record_payment_updated(
        &self,
        previous: &Payment,
    ) -> Result<Vec<Activity>, RecordError> {
        let current = self
            .payments
            .get_payment(previous.id)
            .await
            .map_err(|source| RecordError::PaymentLookup {
                payment_id: previous.id,
                source,
            })?;

        let mut recorded = Vec::new();
        if current.amount != previous.amount {
            recorded.push(self.record_payment_amount_changed(&current).await?);
        }
        if current.amount_paid != previous.amount_paid {
            recorded.push(self.record_payment_paid_changed(&current).await?);
        }
        if recorded.is_empty() {
            debug!("Payment {} updated without amount changes, nothing recorded", current.id);
        }
        Ok(recorded)
    }

    pub async fn record_roll_call_created(
        &self,
        roll_call: &RollCall,
    ) -> Result<Activity, RecordError> {
        self.append(NewActivity::roll_call_created(roll_call.camp_id, roll_call.id))
            .await
    }

    pub async fn record_question_created(
        &self,
        question_group: &QuestionGroup,
    ) -> Result<Activity, RecordError> {
        self.append(NewActivity::question_created(
            question_group.camp_id,
            question_group.id,
        ))
        .await
    }

    async fn record_payment(
        &self,
        event: PaymentEvent,
        payment: &Payment,
    ) -> Result<Activity, RecordError> {
        let amount = match event {
            PaymentEvent::Created | PaymentEvent::AmountChanged => payment.amount,
            PaymentEvent::PaidChanged => payment.amount_paid,
        };
        self.append(NewActivity::payment(
            event,
            payment.camp_id,
            payment.id,
            payment.user_id,
            amount,
        ))
        .await
    }

    async fn append(&self, activity: NewActivity) -> Result<Activity, RecordError> {
        let activity = self
            .store
            .append(activity)
            .await
            .map_err(RecordError::Append)?;
        info!(
            "Recorded {} activity {} for camp {}",
            activity.activity_type, activity.id, activity.camp_id
        );
        Ok(activity)
    }
}
