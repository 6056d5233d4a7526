//! Recorder writes as seen through the store and the feed.

use camp_feed::models::{ActivityDetail, ActivityType, PaymentChangedDetail};
use camp_feed::RecordError;
use pretty_assertions::assert_eq;
use uuid::Uuid;

use test_helpers::*;

#[tokio::test]
async fn test_payment_update_appends_amount_then_paid_rows() {
    let store = MemoryActivityStore::new();
    let camp = MemoryCamp::new();
    let recorder = recorder(&store, &camp);
    let camp_id = camp.add_camp();
    let owner = Uuid::new_v4();

    let before = camp.add_payment(camp_id, owner, 12000);
    let mut after = before.clone();
    after.amount = 15000;
    after.amount_paid = 4000;
    camp.update_payment(&after);

    let rows = recorder.record_payment_updated(&before).await.unwrap();
    assert_eq!(rows.len(), 2);

    let feed = aggregator(&store, &camp).get_activities(camp_id, owner).await.unwrap();
    // Newest first: the paid row was appended last.
    assert_eq!(
        feed.into_iter().map(|e| e.detail).collect::<Vec<_>>(),
        vec![
            ActivityDetail::PaymentPaidChanged(PaymentChangedDetail { amount: 4000 }),
            ActivityDetail::PaymentAmountChanged(PaymentChangedDetail { amount: 15000 }),
        ]
    );
}

#[tokio::test]
async fn test_payment_update_for_missing_payment_fails() {
    let store = MemoryActivityStore::new();
    let camp = MemoryCamp::new();
    let recorder = recorder(&store, &camp);
    let camp_id = camp.add_camp();

    let ghost = camp_feed::models::Payment {
        id: Uuid::new_v4(),
        camp_id,
        user_id: Uuid::new_v4(),
        amount: 100,
        amount_paid: 0,
    };

    let err = recorder.record_payment_updated(&ghost).await.unwrap_err();
    assert!(matches!(err, RecordError::PaymentLookup { payment_id, .. } if payment_id == ghost.id));
    assert_eq!(store.len(), 0);
}

#[tokio::test]
async fn test_room_created_row_points_at_room_and_camp() {
    let store = MemoryActivityStore::new();
    let camp = MemoryCamp::new();
    let recorder = recorder(&store, &camp);
    let camp_id = camp.add_camp();

    let room = camp.add_room(camp_id, "Cabin 9");
    let row = recorder.record_room_created(&room).await.unwrap();

    assert_eq!(row.activity_type, ActivityType::RoomCreated);
    assert_eq!(row.camp_id, camp_id);
    assert_eq!(row.reference_id, room.id);
    assert_eq!(row.payment_stamp(), None);
}

#[tokio::test]
async fn test_question_created_row_copies_group_fields() {
    let store = MemoryActivityStore::new();
    let camp = MemoryCamp::new();
    let recorder = recorder(&store, &camp);
    let camp_id = camp.add_camp();

    let group = camp.add_question_group(camp_id, "Consent forms", &[(Uuid::new_v4(), true)]);
    let row = recorder.record_question_created(&group).await.unwrap();

    assert_eq!(row.activity_type, ActivityType::QuestionCreated);
    assert_eq!(row.camp_id, camp_id);
    assert_eq!(row.reference_id, group.id);
    assert_eq!(row.user_id, None);
    assert_eq!(row.amount, None);
}
