use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::modules::message::schema::MessageEntity;
use crate::modules::user::model::UserSummary;
use crate::utils::Pagination;

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SendMessageBody {
    pub receiver_id: Uuid,
    #[validate(length(min = 1, max = 2000, message = "Content must be 1-2000 characters"))]
    pub content: String,
}

/// One entry per conversation partner, newest conversation first.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationSummary {
    pub user: UserSummary,
    pub latest_message: MessageEntity,
    pub unread_count: i64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationPageResponse {
    pub other_user: UserSummary,
    pub messages: Vec<MessageEntity>,
    pub pagination: Pagination,
}
