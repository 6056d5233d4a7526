use async_trait::async_trait;
use std::collections::HashMap;
use uuid::Uuid;

use super::{camp_exists, DatabasePool};
use crate::error::ProviderError;
use crate::models::{CampId, RollCall, RollCallReaction};
use crate::services::RollCallProvider;

#[derive(Clone)]
pub struct PgRollCallProvider {
    pool: DatabasePool,
}

impl PgRollCallProvider {
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RollCallProvider for PgRollCallProvider {
    /// Three queries regardless of how many roll calls the camp has.
    async fn list_by_camp(&self, camp_id: CampId) -> Result<Vec<RollCall>, ProviderError> {
        let headers = sqlx::query_as::<_, (Uuid, String)>(
            "SELECT id, name FROM roll_calls WHERE camp_id = $1 ORDER BY created_at DESC",
        )
        .bind(camp_id)
        .fetch_all(&*self.pool)
        .await?;

        if headers.is_empty() {
            if !camp_exists(&self.pool, camp_id).await? {
                return Err(ProviderError::CampNotFound(camp_id));
            }
            return Ok(Vec::new());
        }

        let ids: Vec<Uuid> = headers.iter().map(|(id, _)| *id).collect();

        let subjects = sqlx::query_as::<_, (Uuid, Uuid)>(
            "SELECT roll_call_id, user_id FROM roll_call_subjects WHERE roll_call_id = ANY($1)",
        )
        .bind(&ids)
        .fetch_all(&*self.pool)
        .await?;

        let reactions = sqlx::query_as::<_, (Uuid, Uuid)>(
            "SELECT roll_call_id, user_id FROM roll_call_reactions WHERE roll_call_id = ANY($1)",
        )
        .bind(&ids)
        .fetch_all(&*self.pool)
        .await?;

        let mut subjects_by_roll_call: HashMap<Uuid, Vec<Uuid>> = HashMap::new();
        for (roll_call_id, user_id) in subjects {
            subjects_by_roll_call.entry(roll_call_id).or_default().push(user_id);
        }
        let mut reactions_by_roll_call: HashMap<Uuid, Vec<RollCallReaction>> = HashMap::new();
        for (roll_call_id, user_id) in reactions {
            reactions_by_roll_call
                .entry(roll_call_id)
                .or_default()
                .push(RollCallReaction { user_id });
        }

        Ok(headers
            .into_iter()
            .map(|(id, name)| RollCall {
                id,
                camp_id,
                name,
                subjects: subjects_by_roll_call.remove(&id).unwrap_or_default(),
                reactions: reactions_by_roll_call.remove(&id).unwrap_or_default(),
            })
            .collect())
    }
}
