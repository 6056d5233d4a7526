//! Per-viewer activity feed.
//!
//! A request loads the camp's raw log once, then four context batches concurrently (the viewer's
//! room, roll calls, question groups, the viewer's answers). Every row is then resolved against
//! those in-memory maps; nothing is fetched per row. Rows the viewer may not see, and rows whose
//! reference no longer resolves, are dropped without failing the request.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, instrument, warn};

use crate::error::{FeedError, ProviderError};
use crate::models::{
    Activity, ActivityDetail, ActivityResponse, ActivityType, CampId, PaymentChangedDetail,
    PaymentCreatedDetail, QuestionCreatedDetail, QuestionGroup, QuestionGroupId, QuestionId,
    RollCall, RollCallCreatedDetail, RollCallId, RoomId, UserId,
};
use crate::services::providers::{
    ActivityStore, AnswerProvider, QuestionGroupProvider, RollCallProvider, RoomProvider,
};

#[derive(Clone)]
pub struct ActivityAggregator {
    store: Arc<dyn ActivityStore>,
    rooms: Arc<dyn RoomProvider>,
    roll_calls: Arc<dyn RollCallProvider>,
    question_groups: Arc<dyn QuestionGroupProvider>,
    answers: Arc<dyn AnswerProvider>,
    timeout: Option<Duration>,
    include_private_answers: bool,
}

impl ActivityAggregator {
    pub fn new(
        store: Arc<dyn ActivityStore>,
        rooms: Arc<dyn RoomProvider>,
        roll_calls: Arc<dyn RollCallProvider>,
        question_groups: Arc<dyn QuestionGroupProvider>,
        answers: Arc<dyn AnswerProvider>,
    ) -> Self {
        Self {
            store,
            rooms,
            roll_calls,
            question_groups,
            answers,
            timeout: None,
            include_private_answers: true,
        }
    }

    /// Bound every `get_activities` call. `None` leaves it to the caller.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Whether answers to non-public questions count towards `needs_response`.
    pub fn with_private_answers(mut self, include_private: bool) -> Self {
        self.include_private_answers = include_private;
        self
    }

    /// The camp's feed as `viewer_id` sees it, in store order (newest first).
    ///
    /// Returns the complete feed or a single error, never part of a feed.
    #[instrument(level = "debug", skip(self))]
    pub async fn get_activities(
        &self,
        camp_id: CampId,
        viewer_id: UserId,
    ) -> Result<Vec<ActivityResponse>, FeedError> {
        match self.timeout {
            Some(limit) => tokio::time::timeout(limit, self.aggregate(camp_id, viewer_id))
                .await
                .map_err(|_| {
                    warn!("Feed for camp {} timed out after {:?}", camp_id, limit);
                    FeedError::TimedOut(limit)
                })?,
            None => self.aggregate(camp_id, viewer_id).await,
        }
    }

    async fn aggregate(
        &self,
        camp_id: CampId,
        viewer_id: UserId,
    ) -> Result<Vec<ActivityResponse>, FeedError> {
        let activities = or_empty("activities", camp_id, self.store.list_by_camp(camp_id).await)?;
        if activities.is_empty() {
            return Ok(Vec::new());
        }

        let context = self.load_context(camp_id, viewer_id).await?;
        let feed: Vec<ActivityResponse> = activities
            .iter()
            .filter_map(|activity| context.project(activity))
            .collect();

        debug!(
            "Feed for camp {}: {} of {} activities visible",
            camp_id,
            feed.len(),
            activities.len()
        );
        Ok(feed)
    }

    /// The four lookups are independent. The first hard failure drops the others.
    async fn load_context(
        &self,
        camp_id: CampId,
        viewer_id: UserId,
    ) -> Result<ViewerContext, FeedError> {
        let (room_id, roll_calls, question_groups, answered) = tokio::try_join!(
            self.viewer_room_id(camp_id, viewer_id),
            self.roll_calls_by_id(camp_id),
            self.question_groups_by_id(camp_id),
            self.answered_question_ids(camp_id, viewer_id),
        )?;

        Ok(ViewerContext {
            viewer_id,
            room_id,
            roll_calls,
            question_groups,
            answered,
        })
    }

    async fn viewer_room_id(
        &self,
        camp_id: CampId,
        viewer_id: UserId,
    ) -> Result<Option<RoomId>, FeedError> {
        match self.rooms.get_viewer_room(camp_id, viewer_id).await {
            Ok(room) => Ok(room.map(|r| r.id)),
            Err(e) if e.is_not_found() => {
                debug!("Viewer {} has no room in camp {}: {}", viewer_id, camp_id, e);
                Ok(None)
            }
            Err(e) => Err(FeedError::provider("viewer room", e)),
        }
    }

    async fn roll_calls_by_id(
        &self,
        camp_id: CampId,
    ) -> Result<HashMap<RollCallId, RollCall>, FeedError> {
        let roll_calls = or_empty(
            "roll calls",
            camp_id,
            self.roll_calls.list_by_camp(camp_id).await,
        )?;
        Ok(roll_calls.into_iter().map(|rc| (rc.id, rc)).collect())
    }

    async fn question_groups_by_id(
        &self,
        camp_id: CampId,
    ) -> Result<HashMap<QuestionGroupId, QuestionGroup>, FeedError> {
        let groups = or_empty(
            "question groups",
            camp_id,
            self.question_groups.list_by_camp(camp_id).await,
        )?;
        Ok(groups.into_iter().map(|g| (g.id, g)).collect())
    }

    async fn answered_question_ids(
        &self,
        camp_id: CampId,
        viewer_id: UserId,
    ) -> Result<HashSet<QuestionId>, FeedError> {
        let answers = or_empty(
            "answers",
            camp_id,
            self.answers
                .list_by_user(camp_id, viewer_id, self.include_private_answers)
                .await,
        )?;
        Ok(answers.into_iter().map(|a| a.question_id).collect())
    }
}

/// A camp the provider knows nothing about reads as an empty batch.
fn or_empty<T: Default>(
    source_name: &'static str,
    camp_id: CampId,
    result: Result<T, ProviderError>,
) -> Result<T, FeedError> {
    match result {
        Ok(items) => Ok(items),
        Err(ProviderError::CampNotFound(_)) => {
            debug!("No {} for camp {}, treating as empty", source_name, camp_id);
            Ok(T::default())
        }
        Err(e) => Err(FeedError::provider(source_name, e)),
    }
}

/// Everything a single request knows about its viewer.
struct ViewerContext {
    viewer_id: UserId,
    room_id: Option<RoomId>,
    roll_calls: HashMap<RollCallId, RollCall>,
    question_groups: HashMap<QuestionGroupId, QuestionGroup>,
    answered: HashSet<QuestionId>,
}

impl ViewerContext {
    /// `None` means the row is not part of this viewer's feed.
    fn project(&self, activity: &Activity) -> Option<ActivityResponse> {
        let detail = match activity.activity_type {
            ActivityType::RoomCreated => {
                if self.room_id != Some(activity.reference_id) {
                    return None;
                }
                ActivityDetail::RoomCreated
            }
            ActivityType::PaymentCreated => ActivityDetail::PaymentCreated(PaymentCreatedDetail {
                amount: self.own_payment_amount(activity)?,
            }),
            ActivityType::PaymentAmountChanged => {
                ActivityDetail::PaymentAmountChanged(PaymentChangedDetail {
                    amount: self.own_payment_amount(activity)?,
                })
            }
            ActivityType::PaymentPaidChanged => {
                ActivityDetail::PaymentPaidChanged(PaymentChangedDetail {
                    amount: self.own_payment_amount(activity)?,
                })
            }
            ActivityType::RollCallCreated => {
                let Some(roll_call) = self.roll_calls.get(&activity.reference_id) else {
                    debug!(
                        "Dropping activity {}: roll call {} not found",
                        activity.id, activity.reference_id
                    );
                    return None;
                };
                ActivityDetail::RollCallCreated(RollCallCreatedDetail {
                    roll_call_id: roll_call.id,
                    name: roll_call.name.clone(),
                    is_subject: roll_call.is_subject(self.viewer_id),
                    answered: roll_call.has_reaction_from(self.viewer_id),
                })
            }
            ActivityType::QuestionCreated => {
                let Some(group) = self.question_groups.get(&activity.reference_id) else {
                    debug!(
                        "Dropping activity {}: question group {} not found",
                        activity.id, activity.reference_id
                    );
                    return None;
                };
                ActivityDetail::QuestionCreated(QuestionCreatedDetail {
                    question_group_id: group.id,
                    name: group.name.clone(),
                    due: group.due,
                    needs_response: self.needs_response(group),
                })
            }
        };

        Some(ActivityResponse {
            id: activity.id,
            time: activity.created_at,
            detail,
        })
    }

    /// Payments are private to their owner. Rows missing owner or amount are skipped.
    fn own_payment_amount(&self, activity: &Activity) -> Option<i64> {
        let Some(stamp) = activity.payment_stamp() else {
            debug!(
                "Dropping malformed {} activity {}: owner or amount missing",
                activity.activity_type, activity.id
            );
            return None;
        };
        (stamp.user_id == self.viewer_id).then_some(stamp.amount)
    }

    fn needs_response(&self, group: &QuestionGroup) -> bool {
        group
            .questions
            .iter()
            .any(|q| q.is_required && !self.answered.contains(&q.id))
    }
}
