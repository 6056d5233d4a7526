pub mod activity_aggregator;
pub mod activity_recorder;
pub mod providers;

pub use activity_aggregator::ActivityAggregator;
pub use activity_recorder::ActivityRecorder;
pub use providers::{
    ActivityStore, AnswerProvider, PaymentProvider, QuestionGroupProvider, RollCallProvider,
    RoomProvider,
};
