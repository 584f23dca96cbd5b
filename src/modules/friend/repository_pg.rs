use uuid::Uuid;

use crate::{
    api::error,
    modules::friend::{
        model::{FriendRequestRow, FriendResponse},
        repository::FriendRepository,
        schema::{FriendRequestEntity, FriendStatus},
    },
};

#[derive(Clone)]
pub struct FriendRepositoryPg {
    pool: sqlx::PgPool,
}

impl FriendRepositoryPg {
    pub fn new(pool: sqlx::PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl FriendRepository for FriendRepositoryPg {
    async fn find_by_id(
        &self,
        id: &Uuid,
    ) -> Result<Option<FriendRequestEntity>, error::SystemError> {
        let request = sqlx::query_as::<_, FriendRequestEntity>(
            "SELECT * FROM friend_requests WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(request)
    }

    async fn find_between(
        &self,
        user_a: &Uuid,
        user_b: &Uuid,
    ) -> Result<Option<FriendRequestEntity>, error::SystemError> {
        let request = sqlx::query_as::<_, FriendRequestEntity>(
            r#"
            SELECT * FROM friend_requests
            WHERE (sender_id = $1 AND receiver_id = $2)
               OR (sender_id = $2 AND receiver_id = $1)
            "#,
        )
        .bind(user_a)
        .bind(user_b)
        .fetch_optional(&self.pool)
        .await?;
        Ok(request)
    }

    async fn create(
        &self,
        sender_id: &Uuid,
        receiver_id: &Uuid,
    ) -> Result<FriendRequestEntity, error::SystemError> {
        let id = Uuid::new_v7(uuid::Timestamp::now(uuid::NoContext));
        let request = sqlx::query_as::<_, FriendRequestEntity>(
            r#"
            INSERT INTO friend_requests (id, sender_id, receiver_id, status)
            VALUES ($1, $2, $3, 'PENDING')
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(sender_id)
        .bind(receiver_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(request)
    }

    async fn update_status(
        &self,
        id: &Uuid,
        status: FriendStatus,
    ) -> Result<FriendRequestEntity, error::SystemError> {
        let request = sqlx::query_as::<_, FriendRequestEntity>(
            "UPDATE friend_requests SET status = $2 WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(status)
        .fetch_one(&self.pool)
        .await?;
        Ok(request)
    }

    async fn delete(&self, id: &Uuid) -> Result<(), error::SystemError> {
        sqlx::query("DELETE FROM friend_requests WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn find_received_pending(
        &self,
        user_id: &Uuid,
    ) -> Result<Vec<FriendRequestRow>, error::SystemError> {
        let rows = sqlx::query_as::<_, FriendRequestRow>(
            r#"
            SELECT f.id AS req_id, f.status, f.created_at,
                   u.id AS user_id, u.first_name, u.last_name, u.profile_pic
            FROM friend_requests f
            JOIN users u ON u.id = f.sender_id
            WHERE f.receiver_id = $1 AND f.status = 'PENDING'
            ORDER BY f.created_at DESC, f.id
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn find_sent(
        &self,
        user_id: &Uuid,
    ) -> Result<Vec<FriendRequestRow>, error::SystemError> {
        let rows = sqlx::query_as::<_, FriendRequestRow>(
            r#"
            SELECT f.id AS req_id, f.status, f.created_at,
                   u.id AS user_id, u.first_name, u.last_name, u.profile_pic
            FROM friend_requests f
            JOIN users u ON u.id = f.receiver_id
            WHERE f.sender_id = $1
            ORDER BY f.created_at DESC, f.id
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn find_friends(
        &self,
        user_id: &Uuid,
    ) -> Result<Vec<FriendResponse>, error::SystemError> {
        let friends = sqlx::query_as::<_, FriendResponse>(
            r#"
            SELECT u.id, u.first_name, u.last_name, u.profile_pic, u.bio
            FROM friend_requests f
            JOIN users u
              ON u.id = CASE WHEN f.sender_id = $1 THEN f.receiver_id ELSE f.sender_id END
            WHERE (f.sender_id = $1 OR f.receiver_id = $1) AND f.status = 'ACCEPTED'
            ORDER BY u.first_name, u.last_name, u.id
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(friends)
    }
}
