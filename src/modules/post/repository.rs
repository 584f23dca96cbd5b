use uuid::Uuid;

use crate::api::error;
use crate::modules::post::model::{CreatePostBody, PostRow, UpdatePostBody};
use crate::modules::post::schema::PostEntity;

#[async_trait::async_trait]
pub trait PostRepository {
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<PostEntity>, error::SystemError>;

    /// Post with author columns and comment/like counts, for the detail view.
    async fn find_row_by_id(&self, id: &Uuid) -> Result<Option<PostRow>, error::SystemError>;

    async fn find_page(
        &self,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<PostRow>, error::SystemError>;

    async fn count_all(&self) -> Result<i64, error::SystemError>;

    async fn create(
        &self,
        author_id: &Uuid,
        post: &CreatePostBody,
    ) -> Result<PostEntity, error::SystemError>;

    async fn update(
        &self,
        id: &Uuid,
        update: &UpdatePostBody,
    ) -> Result<PostEntity, error::SystemError>;

    async fn delete(&self, id: &Uuid) -> Result<(), error::SystemError>;
}
