use async_trait::async_trait;
use uuid::Uuid;

use super::DatabasePool;
use crate::error::ProviderError;
use crate::models::{Answer, CampId, UserId};
use crate::services::AnswerProvider;

#[derive(Clone)]
pub struct PgAnswerProvider {
    pool: DatabasePool,
}

impl PgAnswerProvider {
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AnswerProvider for PgAnswerProvider {
    async fn list_by_user(
        &self,
        camp_id: CampId,
        user_id: UserId,
        include_private: bool,
    ) -> Result<Vec<Answer>, ProviderError> {
        let question_ids: Vec<Uuid> = sqlx::query_scalar(
            r#"
            SELECT a.question_id
            FROM answers a
            JOIN questions q ON q.id = a.question_id
            JOIN question_groups qg ON qg.id = q.question_group_id
            WHERE qg.camp_id = $1
              AND a.user_id = $2
              AND ($3 OR q.is_public)
            "#,
        )
        .bind(camp_id)
        .bind(user_id)
        .bind(include_private)
        .fetch_all(&*self.pool)
        .await?;

        Ok(question_ids
            .into_iter()
            .map(|question_id| Answer { question_id })
            .collect())
    }
}
