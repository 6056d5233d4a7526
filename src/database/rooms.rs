use async_trait::async_trait;
use uuid::Uuid;

use super::DatabasePool;
use crate::error::ProviderError;
use crate::models::{CampId, Room, RoomGroupId, UserId};
use crate::services::RoomProvider;

#[derive(Clone)]
pub struct PgRoomProvider {
    pool: DatabasePool,
}

impl PgRoomProvider {
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RoomProvider for PgRoomProvider {
    async fn get_viewer_room(
        &self,
        camp_id: CampId,
        user_id: UserId,
    ) -> Result<Option<Room>, ProviderError> {
        let room = sqlx::query_as::<_, (Uuid, Uuid, String)>(
            r#"
            SELECT r.id, r.room_group_id, r.name
            FROM rooms r
            JOIN room_groups rg ON rg.id = r.room_group_id
            JOIN room_members rm ON rm.room_id = r.id
            WHERE rg.camp_id = $1 AND rm.user_id = $2
            LIMIT 1
            "#,
        )
        .bind(camp_id)
        .bind(user_id)
        .fetch_optional(&*self.pool)
        .await?;

        Ok(room.map(|(id, room_group_id, name)| Room {
            id,
            room_group_id,
            name,
        }))
    }

    async fn get_room_group_camp_id(
        &self,
        room_group_id: RoomGroupId,
    ) -> Result<CampId, ProviderError> {
        sqlx::query_scalar::<_, Uuid>("SELECT camp_id FROM room_groups WHERE id = $1")
            .bind(room_group_id)
            .fetch_optional(&*self.pool)
            .await?
            .ok_or_else(|| ProviderError::not_found("room group", room_group_id))
    }
}
