use uuid::Uuid;

use crate::api::error;
use crate::modules::notification::model::NewNotification;
use crate::modules::notification::schema::NotificationEntity;

#[async_trait::async_trait]
pub trait NotificationRepository {
    async fn create(
        &self,
        notification: &NewNotification,
    ) -> Result<NotificationEntity, error::SystemError>;

    async fn find_by_id(
        &self,
        id: &Uuid,
    ) -> Result<Option<NotificationEntity>, error::SystemError>;

    async fn find_page_by_user(
        &self,
        user_id: &Uuid,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<NotificationEntity>, error::SystemError>;

    async fn count_by_user(&self, user_id: &Uuid) -> Result<i64, error::SystemError>;

    async fn count_unread_by_user(&self, user_id: &Uuid) -> Result<i64, error::SystemError>;

    async fn mark_read(&self, id: &Uuid) -> Result<NotificationEntity, error::SystemError>;

    async fn mark_all_read(&self, user_id: &Uuid) -> Result<(), error::SystemError>;
}
