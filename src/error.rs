//! Error types for providers, the recorder and the feed aggregator.

use thiserror::Error;
use uuid::Uuid;

use crate::models::CampId;

/// Failure reported by a store or context provider.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// The provider has nothing for this camp at all. Readers treat it as an empty batch.
    #[error("camp {0} not found")]
    CampNotFound(CampId),

    /// A single referenced entity is missing.
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: Uuid },

    #[error("database error: {0}")]
    Storage(#[from] sqlx::Error),

    /// Non-SQL backend failure (remote service, corrupt row, ...).
    #[error("{0}")]
    Backend(String),
}

impl ProviderError {
    pub fn not_found(entity: &'static str, id: Uuid) -> Self {
        ProviderError::NotFound { entity, id }
    }

    /// True for the two cases the aggregator recovers from locally.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            ProviderError::CampNotFound(_) | ProviderError::NotFound { .. }
        )
    }
}

/// Failure of a feed request. Either the whole feed or one of these.
#[derive(Debug, Error)]
pub enum FeedError {
    #[error("failed to load {source_name}: {source}")]
    Provider {
        source_name: &'static str,
        #[source]
        source: ProviderError,
    },

    #[error("feed aggregation timed out after {0:?}")]
    TimedOut(std::time::Duration),
}

impl FeedError {
    pub fn provider(source_name: &'static str, source: ProviderError) -> Self {
        FeedError::Provider {
            source_name,
            source,
        }
    }
}

/// Failure of an activity write.
#[derive(Debug, Error)]
pub enum RecordError {
    #[error("failed to resolve camp for room group {room_group_id}: {source}")]
    CampLookup {
        room_group_id: Uuid,
        #[source]
        source: ProviderError,
    },

    #[error("failed to load payment {payment_id}: {source}")]
    PaymentLookup {
        payment_id: Uuid,
        #[source]
        source: ProviderError,
    },

    #[error("failed to append activity: {0}")]
    Append(#[source] ProviderError),
}
