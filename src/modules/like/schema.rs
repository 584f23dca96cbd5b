use sqlx::prelude::FromRow;
use uuid::Uuid;

/// A like targets exactly one of `post_id` / `comment_id`.
#[derive(Debug, Clone, FromRow)]
pub struct LikeEntity {
    pub id: Uuid,
    pub user_id: Uuid,
    pub post_id: Option<Uuid>,
    pub comment_id: Option<Uuid>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}
