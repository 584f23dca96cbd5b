use uuid::Uuid;

use crate::api::error;
use crate::modules::message::schema::MessageEntity;

#[async_trait::async_trait]
pub trait MessageRepository {
    async fn create(
        &self,
        sender_id: &Uuid,
        receiver_id: &Uuid,
        content: &str,
    ) -> Result<MessageEntity, error::SystemError>;

    /// Messages between the two users in either direction, newest first.
    async fn find_conversation_page(
        &self,
        user_a: &Uuid,
        user_b: &Uuid,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<MessageEntity>, error::SystemError>;

    async fn count_conversation(
        &self,
        user_a: &Uuid,
        user_b: &Uuid,
    ) -> Result<i64, error::SystemError>;

    /// Flags everything the sender wrote to the receiver as read.
    async fn mark_conversation_read(
        &self,
        sender_id: &Uuid,
        receiver_id: &Uuid,
    ) -> Result<(), error::SystemError>;

    /// Distinct counterparts of every message the user sent or received.
    async fn partner_ids(&self, user_id: &Uuid) -> Result<Vec<Uuid>, error::SystemError>;

    async fn latest_between(
        &self,
        user_a: &Uuid,
        user_b: &Uuid,
    ) -> Result<Option<MessageEntity>, error::SystemError>;

    async fn count_unread_from(
        &self,
        sender_id: &Uuid,
        receiver_id: &Uuid,
    ) -> Result<i64, error::SystemError>;
}
