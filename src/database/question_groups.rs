use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use uuid::Uuid;

use super::{camp_exists, DatabasePool};
use crate::error::ProviderError;
use crate::models::{CampId, Question, QuestionGroup};
use crate::services::QuestionGroupProvider;

#[derive(Clone)]
pub struct PgQuestionGroupProvider {
    pool: DatabasePool,
}

impl PgQuestionGroupProvider {
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl QuestionGroupProvider for PgQuestionGroupProvider {
    async fn list_by_camp(&self, camp_id: CampId) -> Result<Vec<QuestionGroup>, ProviderError> {
        let groups = sqlx::query_as::<_, (Uuid, String, DateTime<Utc>)>(
            "SELECT id, name, due FROM question_groups WHERE camp_id = $1 ORDER BY created_at DESC",
        )
        .bind(camp_id)
        .fetch_all(&*self.pool)
        .await?;

        if groups.is_empty() {
            if !camp_exists(&self.pool, camp_id).await? {
                return Err(ProviderError::CampNotFound(camp_id));
            }
            return Ok(Vec::new());
        }

        let ids: Vec<Uuid> = groups.iter().map(|(id, _, _)| *id).collect();
        let questions = sqlx::query_as::<_, (Uuid, Uuid, bool)>(
            "SELECT question_group_id, id, is_required FROM questions WHERE question_group_id = ANY($1)",
        )
        .bind(&ids)
        .fetch_all(&*self.pool)
        .await?;

        let mut questions_by_group: HashMap<Uuid, Vec<Question>> = HashMap::new();
        for (group_id, id, is_required) in questions {
            questions_by_group
                .entry(group_id)
                .or_default()
                .push(Question { id, is_required });
        }

        Ok(groups
            .into_iter()
            .map(|(id, name, due)| QuestionGroup {
                id,
                camp_id,
                name,
                due,
                questions: questions_by_group.remove(&id).unwrap_or_default(),
            })
            .collect())
    }
}
