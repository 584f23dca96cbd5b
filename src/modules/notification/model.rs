use serde::Serialize;
use uuid::Uuid;

use crate::modules::notification::schema::{NotificationEntity, NotificationType};
use crate::utils::Pagination;

/// Fan-out record written as the side effect of a comment, like, message or
/// accepted friend request. Callers must never address it to the actor.
#[derive(Debug, Clone)]
pub struct NewNotification {
    pub user_id: Uuid,
    pub notification_type: NotificationType,
    pub content: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationListResponse {
    pub notifications: Vec<NotificationEntity>,
    pub unread_count: i64,
    pub pagination: Pagination,
}
