use uuid::Uuid;

use crate::{
    api::error,
    modules::notification::{
        model::NewNotification, repository::NotificationRepository, schema::NotificationEntity,
    },
};

#[derive(Clone)]
pub struct NotificationRepositoryPg {
    pool: sqlx::PgPool,
}

impl NotificationRepositoryPg {
    pub fn new(pool: sqlx::PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl NotificationRepository for NotificationRepositoryPg {
    async fn create(
        &self,
        notification: &NewNotification,
    ) -> Result<NotificationEntity, error::SystemError> {
        let id = Uuid::new_v7(uuid::Timestamp::now(uuid::NoContext));
        let notification = sqlx::query_as::<_, NotificationEntity>(
            r#"
            INSERT INTO notifications (id, user_id, notification_type, content)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(notification.user_id)
        .bind(notification.notification_type)
        .bind(&notification.content)
        .fetch_one(&self.pool)
        .await?;
        Ok(notification)
    }

    async fn find_by_id(
        &self,
        id: &Uuid,
    ) -> Result<Option<NotificationEntity>, error::SystemError> {
        let notification =
            sqlx::query_as::<_, NotificationEntity>("SELECT * FROM notifications WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;
        Ok(notification)
    }

    async fn find_page_by_user(
        &self,
        user_id: &Uuid,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<NotificationEntity>, error::SystemError> {
        // index on (user_id, created_at DESC)
        let notifications = sqlx::query_as::<_, NotificationEntity>(
            r#"
            SELECT * FROM notifications
            WHERE user_id = $1
            ORDER BY created_at DESC, id
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(user_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;
        Ok(notifications)
    }

    async fn count_by_user(&self, user_id: &Uuid) -> Result<i64, error::SystemError> {
        let (count,): (i64,) =
            sqlx::query_as("SELECT count(*) FROM notifications WHERE user_id = $1")
                .bind(user_id)
                .fetch_one(&self.pool)
                .await?;
        Ok(count)
    }

    async fn count_unread_by_user(&self, user_id: &Uuid) -> Result<i64, error::SystemError> {
        let (count,): (i64,) = sqlx::query_as(
            "SELECT count(*) FROM notifications WHERE user_id = $1 AND is_read = false",
        )
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(count)
    }

    async fn mark_read(&self, id: &Uuid) -> Result<NotificationEntity, error::SystemError> {
        let notification = sqlx::query_as::<_, NotificationEntity>(
            "UPDATE notifications SET is_read = true WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await?;
        Ok(notification)
    }

    async fn mark_all_read(&self, user_id: &Uuid) -> Result<(), error::SystemError> {
        sqlx::query("UPDATE notifications SET is_read = true WHERE user_id = $1 AND is_read = false")
            .bind(user_id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
