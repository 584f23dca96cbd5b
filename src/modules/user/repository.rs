use uuid::Uuid;

use crate::api::error;
use crate::modules::user::model::{InsertUser, UpdateProfileBody};
use crate::modules::user::schema::UserEntity;

#[async_trait::async_trait]
pub trait UserRepository {
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<UserEntity>, error::SystemError>;

    async fn find_by_email(&self, email: &str)
    -> Result<Option<UserEntity>, error::SystemError>;

    async fn create(&self, user: &InsertUser) -> Result<UserEntity, error::SystemError>;

    async fn update_profile(
        &self,
        id: &Uuid,
        update: &UpdateProfileBody,
    ) -> Result<UserEntity, error::SystemError>;
}
