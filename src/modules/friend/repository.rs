use uuid::Uuid;

use crate::api::error;
use crate::modules::friend::model::{FriendRequestRow, FriendResponse};
use crate::modules::friend::schema::{FriendRequestEntity, FriendStatus};

#[async_trait::async_trait]
pub trait FriendRepository {
    async fn find_by_id(
        &self,
        id: &Uuid,
    ) -> Result<Option<FriendRequestEntity>, error::SystemError>;

    /// Any request linking the two users, in either direction, any status.
    async fn find_between(
        &self,
        user_a: &Uuid,
        user_b: &Uuid,
    ) -> Result<Option<FriendRequestEntity>, error::SystemError>;

    async fn create(
        &self,
        sender_id: &Uuid,
        receiver_id: &Uuid,
    ) -> Result<FriendRequestEntity, error::SystemError>;

    async fn update_status(
        &self,
        id: &Uuid,
        status: FriendStatus,
    ) -> Result<FriendRequestEntity, error::SystemError>;

    async fn delete(&self, id: &Uuid) -> Result<(), error::SystemError>;

    /// Pending requests addressed to the user, sender columns attached.
    async fn find_received_pending(
        &self,
        user_id: &Uuid,
    ) -> Result<Vec<FriendRequestRow>, error::SystemError>;

    /// Requests the user sent, any status, receiver columns attached.
    async fn find_sent(
        &self,
        user_id: &Uuid,
    ) -> Result<Vec<FriendRequestRow>, error::SystemError>;

    /// Counterparts of every accepted request naming the user.
    async fn find_friends(
        &self,
        user_id: &Uuid,
    ) -> Result<Vec<FriendResponse>, error::SystemError>;
}
