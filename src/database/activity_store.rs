use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::DatabasePool;
use crate::error::ProviderError;
use crate::models::{Activity, ActivityType, CampId, NewActivity};
use crate::services::ActivityStore;

#[derive(Clone)]
pub struct PgActivityStore {
    pool: DatabasePool,
}

impl PgActivityStore {
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct ActivityRow {
    id: Uuid,
    camp_id: Uuid,
    #[sqlx(rename = "type")]
    activity_type: String,
    user_id: Option<Uuid>,
    reference_id: Uuid,
    amount: Option<i64>,
    created_at: DateTime<Utc>,
}

impl ActivityRow {
    fn into_activity(self, activity_type: ActivityType) -> Activity {
        Activity {
            id: self.id,
            activity_type,
            camp_id: self.camp_id,
            user_id: self.user_id,
            reference_id: self.reference_id,
            amount: self.amount,
            created_at: self.created_at,
        }
    }
}

#[async_trait]
impl ActivityStore for PgActivityStore {
    async fn append(&self, activity: NewActivity) -> Result<Activity, ProviderError> {
        let id = Uuid::new_v4();
        let created_at = sqlx::query_scalar::<_, DateTime<Utc>>(
            r#"
            INSERT INTO activities (id, camp_id, type, user_id, reference_id, amount, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, NOW())
            RETURNING created_at
            "#,
        )
        .bind(id)
        .bind(activity.camp_id())
        .bind(activity.activity_type().as_str())
        .bind(activity.user_id())
        .bind(activity.reference_id())
        .bind(activity.amount())
        .fetch_one(&*self.pool)
        .await?;

        Ok(activity.into_activity(id, created_at))
    }

    async fn list_by_camp(&self, camp_id: CampId) -> Result<Vec<Activity>, ProviderError> {
        let rows = sqlx::query_as::<_, ActivityRow>(
            r#"
            SELECT id, camp_id, type, user_id, reference_id, amount, created_at
            FROM activities
            WHERE camp_id = $1
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .bind(camp_id)
        .fetch_all(&*self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .filter_map(|row| match ActivityType::from_str(&row.activity_type) {
                Some(activity_type) => Some(row.into_activity(activity_type)),
                None => {
                    tracing::warn!(
                        "Skipping activity {} with unknown type {:?}",
                        row.id,
                        row.activity_type
                    );
                    None
                }
            })
            .collect())
    }
}
