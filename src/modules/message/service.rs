use std::sync::Arc;

use uuid::Uuid;

use crate::api::error;
use crate::modules::message::model::{
    ConversationPageResponse, ConversationSummary, SendMessageBody,
};
use crate::modules::message::repository::MessageRepository;
use crate::modules::message::schema::MessageEntity;
use crate::modules::notification::model::NewNotification;
use crate::modules::notification::repository::NotificationRepository;
use crate::modules::notification::schema::NotificationType;
use crate::modules::user::model::UserSummary;
use crate::modules::user::repository::UserRepository;
use crate::utils::{PageQuery, Pagination};

#[derive(Clone)]
pub struct MessageService<M, U, N>
where
    M: MessageRepository + Send + Sync,
    U: UserRepository + Send + Sync,
    N: NotificationRepository + Send + Sync,
{
    message_repo: Arc<M>,
    user_repo: Arc<U>,
    notification_repo: Arc<N>,
}

impl<M, U, N> MessageService<M, U, N>
where
    M: MessageRepository + Send + Sync,
    U: UserRepository + Send + Sync,
    N: NotificationRepository + Send + Sync,
{
    pub fn with_dependencies(
        message_repo: Arc<M>,
        user_repo: Arc<U>,
        notification_repo: Arc<N>,
    ) -> Self {
        MessageService { message_repo, user_repo, notification_repo }
    }

    pub async fn send_message(
        &self,
        sender_id: Uuid,
        body: SendMessageBody,
    ) -> Result<MessageEntity, error::SystemError> {
        if self.user_repo.find_by_id(&body.receiver_id).await?.is_none() {
            return Err(error::SystemError::not_found("User not found"));
        }

        let message =
            self.message_repo.create(&sender_id, &body.receiver_id, &body.content).await?;

        if body.receiver_id != sender_id {
            let sender = self
                .user_repo
                .find_by_id(&sender_id)
                .await?
                .ok_or_else(|| error::SystemError::not_found("User not found"))?;
            self.notification_repo
                .create(&NewNotification {
                    user_id: body.receiver_id,
                    notification_type: NotificationType::Message,
                    content: format!("{} sent you a message", sender.full_name()),
                })
                .await?;
        }

        Ok(message)
    }

    /// Reading a conversation page marks the partner's messages to the
    /// reader as read, whatever page was requested.
    pub async fn get_conversation(
        &self,
        actor_id: Uuid,
        other_id: Uuid,
        page: u32,
        limit: u32,
    ) -> Result<ConversationPageResponse, error::SystemError> {
        let other = self
            .user_repo
            .find_by_id(&other_id)
            .await?
            .ok_or_else(|| error::SystemError::not_found("User not found"))?;

        let offset = PageQuery::offset(page, limit);
        let messages = self
            .message_repo
            .find_conversation_page(&actor_id, &other_id, offset, limit as i64)
            .await?;
        let total_items = self.message_repo.count_conversation(&actor_id, &other_id).await?;

        self.message_repo.mark_conversation_read(&other_id, &actor_id).await?;

        Ok(ConversationPageResponse {
            other_user: UserSummary::from(other),
            messages,
            pagination: Pagination::new(page, limit, total_items),
        })
    }

    pub async fn get_conversations(
        &self,
        actor_id: Uuid,
    ) -> Result<Vec<ConversationSummary>, error::SystemError> {
        let partners = self.message_repo.partner_ids(&actor_id).await?;

        let mut summaries = Vec::with_capacity(partners.len());
        for partner_id in partners {
            let latest = match self.message_repo.latest_between(&actor_id, &partner_id).await? {
                Some(message) => message,
                None => continue,
            };
            let partner = self
                .user_repo
                .find_by_id(&partner_id)
                .await?
                .ok_or_else(|| error::SystemError::not_found("User not found"))?;
            let unread_count =
                self.message_repo.count_unread_from(&partner_id, &actor_id).await?;
            summaries.push(ConversationSummary {
                user: UserSummary::from(partner),
                latest_message: latest,
                unread_count,
            });
        }

        summaries.sort_by(|a, b| {
            b.latest_message
                .created_at
                .cmp(&a.latest_message.created_at)
                .then(a.user.id.cmp(&b.user.id))
        });
        Ok(summaries)
    }
}
