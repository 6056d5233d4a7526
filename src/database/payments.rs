use async_trait::async_trait;
use uuid::Uuid;

use super::DatabasePool;
use crate::error::ProviderError;
use crate::models::{Payment, PaymentId};
use crate::services::PaymentProvider;

#[derive(Clone)]
pub struct PgPaymentProvider {
    pool: DatabasePool,
}

impl PgPaymentProvider {
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PaymentProvider for PgPaymentProvider {
    async fn get_payment(&self, payment_id: PaymentId) -> Result<Payment, ProviderError> {
        let row = sqlx::query_as::<_, (Uuid, Uuid, Uuid, i64, i64)>(
            "SELECT id, camp_id, user_id, amount, amount_paid FROM payments WHERE id = $1",
        )
        .bind(payment_id)
        .fetch_optional(&*self.pool)
        .await?;

        let (id, camp_id, user_id, amount, amount_paid) =
            row.ok_or_else(|| ProviderError::not_found("payment", payment_id))?;
        Ok(Payment {
            id,
            camp_id,
            user_id,
            amount,
            amount_paid,
        })
    }
}
