use std::sync::Arc;

use uuid::Uuid;

use crate::api::error;
use crate::modules::comment::model::CommentResponse;
use crate::modules::comment::repository::CommentRepository;
use crate::modules::post::model::{
    CreatePostBody, PostDetailResponse, PostListResponse, PostResponse, UpdatePostBody,
};
use crate::modules::post::repository::PostRepository;
use crate::utils::{PageQuery, Pagination, ensure_can_modify};

#[derive(Clone)]
pub struct PostService<P, C>
where
    P: PostRepository + Send + Sync,
    C: CommentRepository + Send + Sync,
{
    post_repo: Arc<P>,
    comment_repo: Arc<C>,
}

impl<P, C> PostService<P, C>
where
    P: PostRepository + Send + Sync,
    C: CommentRepository + Send + Sync,
{
    pub fn with_dependencies(post_repo: Arc<P>, comment_repo: Arc<C>) -> Self {
        PostService { post_repo, comment_repo }
    }

    pub async fn get_posts(
        &self,
        page: u32,
        limit: u32,
    ) -> Result<PostListResponse, error::SystemError> {
        let offset = PageQuery::offset(page, limit);
        let rows = self.post_repo.find_page(offset, limit as i64).await?;
        let total_items = self.post_repo.count_all().await?;

        Ok(PostListResponse {
            posts: rows.into_iter().map(PostResponse::from).collect(),
            pagination: Pagination::new(page, limit, total_items),
        })
    }

    pub async fn get_post(&self, id: Uuid) -> Result<PostDetailResponse, error::SystemError> {
        let row = self
            .post_repo
            .find_row_by_id(&id)
            .await?
            .ok_or_else(|| error::SystemError::not_found("Post not found"))?;

        let comments = self.comment_repo.find_all_by_post(&id).await?;

        let post = PostResponse::from(row);
        Ok(PostDetailResponse {
            id: post.id,
            content: post.content,
            image_url: post.image_url,
            created_at: post.created_at,
            updated_at: post.updated_at,
            author: post.author,
            comments: comments.into_iter().map(CommentResponse::from).collect(),
            like_count: post.like_count,
        })
    }

    pub async fn create_post(
        &self,
        author_id: Uuid,
        body: CreatePostBody,
    ) -> Result<PostResponse, error::SystemError> {
        let post = self.post_repo.create(&author_id, &body).await?;
        let row = self
            .post_repo
            .find_row_by_id(&post.id)
            .await?
            .ok_or_else(|| error::SystemError::not_found("Post not found"))?;
        Ok(PostResponse::from(row))
    }

    pub async fn update_post(
        &self,
        actor_id: Uuid,
        post_id: Uuid,
        body: UpdatePostBody,
    ) -> Result<PostResponse, error::SystemError> {
        let post = self
            .post_repo
            .find_by_id(&post_id)
            .await?
            .ok_or_else(|| error::SystemError::not_found("Post not found"))?;

        ensure_can_modify(&actor_id, &post.author_id, &[])?;

        self.post_repo.update(&post_id, &body).await?;
        let row = self
            .post_repo
            .find_row_by_id(&post_id)
            .await?
            .ok_or_else(|| error::SystemError::not_found("Post not found"))?;
        Ok(PostResponse::from(row))
    }

    pub async fn delete_post(
        &self,
        actor_id: Uuid,
        post_id: Uuid,
    ) -> Result<(), error::SystemError> {
        let post = self
            .post_repo
            .find_by_id(&post_id)
            .await?
            .ok_or_else(|| error::SystemError::not_found("Post not found"))?;

        ensure_can_modify(&actor_id, &post.author_id, &[])?;

        self.post_repo.delete(&post_id).await
    }
}
