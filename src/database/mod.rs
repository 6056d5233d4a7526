//! Postgres implementations of the activity store and context providers.

use sqlx::PgPool;
use std::sync::Arc;

use crate::config::Config;
use crate::services::{ActivityAggregator, ActivityRecorder};

pub mod activity_store;
pub mod answers;
pub mod payments;
pub mod question_groups;
pub mod roll_calls;
pub mod rooms;

pub use activity_store::PgActivityStore;
pub use answers::PgAnswerProvider;
pub use payments::PgPaymentProvider;
pub use question_groups::PgQuestionGroupProvider;
pub use roll_calls::PgRollCallProvider;
pub use rooms::PgRoomProvider;

pub type DatabasePool = Arc<PgPool>;

pub async fn create_pool(database_url: &str) -> anyhow::Result<PgPool> {
    let pool = PgPool::connect(database_url).await?;

    if database_url.contains("sslmode=require") || database_url.contains("sslmode=prefer") {
        tracing::info!("Database connection configured to use TLS");
    } else if !database_url.contains("localhost") && !database_url.contains("127.0.0.1") {
        tracing::warn!("Connecting to remote database without explicit sslmode. Consider adding sslmode=require");
    }

    Ok(pool)
}

pub async fn new_pool(database_url: &str) -> anyhow::Result<DatabasePool> {
    let pool = create_pool(database_url).await?;
    Ok(Arc::new(pool))
}

/// Does the camp exist at all? Used to tell "no rows" from "no camp".
pub(crate) async fn camp_exists(pool: &PgPool, camp_id: uuid::Uuid) -> Result<bool, sqlx::Error> {
    sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM camps WHERE id = $1)")
        .bind(camp_id)
        .fetch_one(pool)
        .await
}

/// Feed aggregator wired to Postgres and configured from `config`.
pub fn aggregator(pool: DatabasePool, config: &Config) -> ActivityAggregator {
    ActivityAggregator::new(
        Arc::new(PgActivityStore::new(pool.clone())),
        Arc::new(PgRoomProvider::new(pool.clone())),
        Arc::new(PgRollCallProvider::new(pool.clone())),
        Arc::new(PgQuestionGroupProvider::new(pool.clone())),
        Arc::new(PgAnswerProvider::new(pool)),
    )
    .with_timeout(config.feed_timeout())
    .with_private_answers(config.include_private_answers)
}

pub fn recorder(pool: DatabasePool) -> ActivityRecorder {
    ActivityRecorder::new(
        Arc::new(PgActivityStore::new(pool.clone())),
        Arc::new(PgRoomProvider::new(pool.clone())),
        Arc::new(PgPaymentProvider::new(pool)),
    )
}
