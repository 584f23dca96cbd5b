use uuid::Uuid;

use crate::{
    api::error,
    modules::message::{repository::MessageRepository, schema::MessageEntity},
};

#[derive(Clone)]
pub struct MessageRepositoryPg {
    pool: sqlx::PgPool,
}

impl MessageRepositoryPg {
    pub fn new(pool: sqlx::PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl MessageRepository for MessageRepositoryPg {
    async fn create(
        &self,
        sender_id: &Uuid,
        receiver_id: &Uuid,
        content: &str,
    ) -> Result<MessageEntity, error::SystemError> {
        let id = Uuid::new_v7(uuid::Timestamp::now(uuid::NoContext));
        let message = sqlx::query_as::<_, MessageEntity>(
            r#"
            INSERT INTO messages (id, sender_id, receiver_id, content)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(sender_id)
        .bind(receiver_id)
        .bind(content)
        .fetch_one(&self.pool)
        .await?;
        Ok(message)
    }

    async fn find_conversation_page(
        &self,
        user_a: &Uuid,
        user_b: &Uuid,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<MessageEntity>, error::SystemError> {
        let messages = sqlx::query_as::<_, MessageEntity>(
            r#"
            SELECT * FROM messages
            WHERE (sender_id = $1 AND receiver_id = $2)
               OR (sender_id = $2 AND receiver_id = $1)
            ORDER BY created_at DESC, id
            LIMIT $4 OFFSET $3
            "#,
        )
        .bind(user_a)
        .bind(user_b)
        .bind(offset)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;
        Ok(messages)
    }

    async fn count_conversation(
        &self,
        user_a: &Uuid,
        user_b: &Uuid,
    ) -> Result<i64, error::SystemError> {
        let (count,): (i64,) = sqlx::query_as(
            r#"
            SELECT count(*) FROM messages
            WHERE (sender_id = $1 AND receiver_id = $2)
               OR (sender_id = $2 AND receiver_id = $1)
            "#,
        )
        .bind(user_a)
        .bind(user_b)
        .fetch_one(&self.pool)
        .await?;
        Ok(count)
    }

    async fn mark_conversation_read(
        &self,
        sender_id: &Uuid,
        receiver_id: &Uuid,
    ) -> Result<(), error::SystemError> {
        sqlx::query(
            r#"
            UPDATE messages SET is_read = true
            WHERE sender_id = $1 AND receiver_id = $2 AND is_read = false
            "#,
        )
        .bind(sender_id)
        .bind(receiver_id)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn partner_ids(&self, user_id: &Uuid) -> Result<Vec<Uuid>, error::SystemError> {
        let ids: Vec<(Uuid,)> = sqlx::query_as(
            r#"
            SELECT DISTINCT CASE WHEN sender_id = $1 THEN receiver_id ELSE sender_id END
            FROM messages
            WHERE sender_id = $1 OR receiver_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(ids.into_iter().map(|(id,)| id).collect())
    }

    async fn latest_between(
        &self,
        user_a: &Uuid,
        user_b: &Uuid,
    ) -> Result<Option<MessageEntity>, error::SystemError> {
        let message = sqlx::query_as::<_, MessageEntity>(
            r#"
            SELECT * FROM messages
            WHERE (sender_id = $1 AND receiver_id = $2)
               OR (sender_id = $2 AND receiver_id = $1)
            ORDER BY created_at DESC, id
            LIMIT 1
            "#,
        )
        .bind(user_a)
        .bind(user_b)
        .fetch_optional(&self.pool)
        .await?;
        Ok(message)
    }

    async fn count_unread_from(
        &self,
        sender_id: &Uuid,
        receiver_id: &Uuid,
    ) -> Result<i64, error::SystemError> {
        let (count,): (i64,) = sqlx::query_as(
            r#"
            SELECT count(*) FROM messages
            WHERE sender_id = $1 AND receiver_id = $2 AND is_read = false
            "#,
        )
        .bind(sender_id)
        .bind(receiver_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(count)
    }
}
