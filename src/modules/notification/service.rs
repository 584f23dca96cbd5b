use std::sync::Arc;

use uuid::Uuid;

use crate::api::error;
use crate::modules::notification::model::NotificationListResponse;
use crate::modules::notification::repository::NotificationRepository;
use crate::modules::notification::schema::NotificationEntity;
use crate::utils::{Pagination, ensure_can_modify};

#[derive(Clone)]
pub struct NotificationService<N>
where
    N: NotificationRepository + Send + Sync,
{
    notification_repo: Arc<N>,
}

impl<N> NotificationService<N>
where
    N: NotificationRepository + Send + Sync,
{
    pub fn with_dependencies(notification_repo: Arc<N>) -> Self {
        NotificationService { notification_repo }
    }

    pub async fn get_notifications(
        &self,
        user_id: Uuid,
        page: u32,
        limit: u32,
    ) -> Result<NotificationListResponse, error::SystemError> {
        let offset = crate::utils::PageQuery::offset(page, limit);
        let notifications =
            self.notification_repo.find_page_by_user(&user_id, offset, limit as i64).await?;
        let total_items = self.notification_repo.count_by_user(&user_id).await?;
        let unread_count = self.notification_repo.count_unread_by_user(&user_id).await?;

        Ok(NotificationListResponse {
            notifications,
            unread_count,
            pagination: Pagination::new(page, limit, total_items),
        })
    }

    pub async fn mark_read(
        &self,
        user_id: Uuid,
        notification_id: Uuid,
    ) -> Result<NotificationEntity, error::SystemError> {
        let notification = self
            .notification_repo
            .find_by_id(&notification_id)
            .await?
            .ok_or_else(|| error::SystemError::not_found("Notification not found"))?;

        ensure_can_modify(&user_id, &notification.user_id, &[])?;

        self.notification_repo.mark_read(&notification_id).await
    }

    pub async fn mark_all_read(&self, user_id: Uuid) -> Result<(), error::SystemError> {
        self.notification_repo.mark_all_read(&user_id).await
    }
}
