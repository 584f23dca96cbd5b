use uuid::Uuid;

use crate::api::error;
use crate::modules::like::schema::LikeEntity;
use crate::modules::user::model::UserSummary;

#[async_trait::async_trait]
pub trait LikeRepository {
    async fn find_by_user_and_post(
        &self,
        user_id: &Uuid,
        post_id: &Uuid,
    ) -> Result<Option<LikeEntity>, error::SystemError>;

    async fn find_by_user_and_comment(
        &self,
        user_id: &Uuid,
        comment_id: &Uuid,
    ) -> Result<Option<LikeEntity>, error::SystemError>;

    async fn create_post_like(
        &self,
        user_id: &Uuid,
        post_id: &Uuid,
    ) -> Result<LikeEntity, error::SystemError>;

    async fn create_comment_like(
        &self,
        user_id: &Uuid,
        comment_id: &Uuid,
    ) -> Result<LikeEntity, error::SystemError>;

    async fn delete(&self, id: &Uuid) -> Result<(), error::SystemError>;

    async fn count_by_post(&self, post_id: &Uuid) -> Result<i64, error::SystemError>;

    async fn count_by_comment(&self, comment_id: &Uuid) -> Result<i64, error::SystemError>;

    /// Users who liked a post, most recent like first.
    async fn find_likers_by_post(
        &self,
        post_id: &Uuid,
    ) -> Result<Vec<UserSummary>, error::SystemError>;
}
