use uuid::Uuid;

use crate::{
    api::error,
    modules::{
        like::{repository::LikeRepository, schema::LikeEntity},
        user::model::UserSummary,
    },
};

#[derive(Clone)]
pub struct LikeRepositoryPg {
    pool: sqlx::PgPool,
}

impl LikeRepositoryPg {
    pub fn new(pool: sqlx::PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl LikeRepository for LikeRepositoryPg {
    async fn find_by_user_and_post(
        &self,
        user_id: &Uuid,
        post_id: &Uuid,
    ) -> Result<Option<LikeEntity>, error::SystemError> {
        let like = sqlx::query_as::<_, LikeEntity>(
            "SELECT * FROM likes WHERE user_id = $1 AND post_id = $2",
        )
        .bind(user_id)
        .bind(post_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(like)
    }

    async fn find_by_user_and_comment(
        &self,
        user_id: &Uuid,
        comment_id: &Uuid,
    ) -> Result<Option<LikeEntity>, error::SystemError> {
        let like = sqlx::query_as::<_, LikeEntity>(
            "SELECT * FROM likes WHERE user_id = $1 AND comment_id = $2",
        )
        .bind(user_id)
        .bind(comment_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(like)
    }

    async fn create_post_like(
        &self,
        user_id: &Uuid,
        post_id: &Uuid,
    ) -> Result<LikeEntity, error::SystemError> {
        let id = Uuid::new_v7(uuid::Timestamp::now(uuid::NoContext));
        let like = sqlx::query_as::<_, LikeEntity>(
            "INSERT INTO likes (id, user_id, post_id) VALUES ($1, $2, $3) RETURNING *",
        )
        .bind(id)
        .bind(user_id)
        .bind(post_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(like)
    }

    async fn create_comment_like(
        &self,
        user_id: &Uuid,
        comment_id: &Uuid,
    ) -> Result<LikeEntity, error::SystemError> {
        let id = Uuid::new_v7(uuid::Timestamp::now(uuid::NoContext));
        let like = sqlx::query_as::<_, LikeEntity>(
            "INSERT INTO likes (id, user_id, comment_id) VALUES ($1, $2, $3) RETURNING *",
        )
        .bind(id)
        .bind(user_id)
        .bind(comment_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(like)
    }

    async fn delete(&self, id: &Uuid) -> Result<(), error::SystemError> {
        sqlx::query("DELETE FROM likes WHERE id = $1").bind(id).execute(&self.pool).await?;
        Ok(())
    }

    async fn count_by_post(&self, post_id: &Uuid) -> Result<i64, error::SystemError> {
        let (count,): (i64,) = sqlx::query_as("SELECT count(*) FROM likes WHERE post_id = $1")
            .bind(post_id)
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    async fn count_by_comment(&self, comment_id: &Uuid) -> Result<i64, error::SystemError> {
        let (count,): (i64,) = sqlx::query_as("SELECT count(*) FROM likes WHERE comment_id = $1")
            .bind(comment_id)
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    async fn find_likers_by_post(
        &self,
        post_id: &Uuid,
    ) -> Result<Vec<UserSummary>, error::SystemError> {
        let users = sqlx::query_as::<_, UserSummary>(
            r#"
            SELECT u.id, u.first_name, u.last_name, u.profile_pic
            FROM likes l
            JOIN users u ON u.id = l.user_id
            WHERE l.post_id = $1
            ORDER BY l.created_at DESC, u.id
            "#,
        )
        .bind(post_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(users)
    }
}
