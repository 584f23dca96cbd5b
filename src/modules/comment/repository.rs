use uuid::Uuid;

use crate::api::error;
use crate::modules::comment::model::CommentRow;
use crate::modules::comment::schema::CommentEntity;

#[async_trait::async_trait]
pub trait CommentRepository {
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<CommentEntity>, error::SystemError>;

    /// Single comment joined with its author and like count, for responses.
    async fn find_row_by_id(&self, id: &Uuid) -> Result<Option<CommentRow>, error::SystemError>;

    async fn find_page_by_post(
        &self,
        post_id: &Uuid,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<CommentRow>, error::SystemError>;

    /// Full comment list for the post detail view, newest first.
    async fn find_all_by_post(
        &self,
        post_id: &Uuid,
    ) -> Result<Vec<CommentRow>, error::SystemError>;

    async fn count_by_post(&self, post_id: &Uuid) -> Result<i64, error::SystemError>;

    async fn create(
        &self,
        author_id: &Uuid,
        post_id: &Uuid,
        content: &str,
    ) -> Result<CommentEntity, error::SystemError>;

    async fn update(
        &self,
        id: &Uuid,
        content: &str,
    ) -> Result<CommentEntity, error::SystemError>;

    async fn delete(&self, id: &Uuid) -> Result<(), error::SystemError>;
}
