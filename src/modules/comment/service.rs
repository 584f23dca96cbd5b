use std::sync::Arc;

use uuid::Uuid;

use crate::api::error;
use crate::modules::comment::model::{
    CommentListResponse, CommentResponse, CreateCommentBody, UpdateCommentBody,
};
use crate::modules::comment::repository::CommentRepository;
use crate::modules::notification::model::NewNotification;
use crate::modules::notification::repository::NotificationRepository;
use crate::modules::notification::schema::NotificationType;
use crate::modules::post::repository::PostRepository;
use crate::modules::user::repository::UserRepository;
use crate::utils::{PageQuery, Pagination, ensure_can_modify};

#[derive(Clone)]
pub struct CommentService<C, P, U, N>
where
    C: CommentRepository + Send + Sync,
    P: PostRepository + Send + Sync,
    U: UserRepository + Send + Sync,
    N: NotificationRepository + Send + Sync,
{
    comment_repo: Arc<C>,
    post_repo: Arc<P>,
    user_repo: Arc<U>,
    notification_repo: Arc<N>,
}

impl<C, P, U, N> CommentService<C, P, U, N>
where
    C: CommentRepository + Send + Sync,
    P: PostRepository + Send + Sync,
    U: UserRepository + Send + Sync,
    N: NotificationRepository + Send + Sync,
{
    pub fn with_dependencies(
        comment_repo: Arc<C>,
        post_repo: Arc<P>,
        user_repo: Arc<U>,
        notification_repo: Arc<N>,
    ) -> Self {
        CommentService { comment_repo, post_repo, user_repo, notification_repo }
    }

    pub async fn get_comments_by_post(
        &self,
        post_id: Uuid,
        page: u32,
        limit: u32,
    ) -> Result<CommentListResponse, error::SystemError> {
        if self.post_repo.find_by_id(&post_id).await?.is_none() {
            return Err(error::SystemError::not_found("Post not found"));
        }

        let offset = PageQuery::offset(page, limit);
        let rows = self.comment_repo.find_page_by_post(&post_id, offset, limit as i64).await?;
        let total_items = self.comment_repo.count_by_post(&post_id).await?;

        Ok(CommentListResponse {
            comments: rows.into_iter().map(CommentResponse::from).collect(),
            pagination: Pagination::new(page, limit, total_items),
        })
    }

    pub async fn create_comment(
        &self,
        author_id: Uuid,
        body: CreateCommentBody,
    ) -> Result<CommentResponse, error::SystemError> {
        let post = self
            .post_repo
            .find_by_id(&body.post_id)
            .await?
            .ok_or_else(|| error::SystemError::not_found("Post not found"))?;

        let comment = self.comment_repo.create(&author_id, &body.post_id, &body.content).await?;

        // Fan-out to the post author, skipped for self-comments. Runs after
        // the primary write and outside any transaction.
        if post.author_id != author_id {
            let actor = self
                .user_repo
                .find_by_id(&author_id)
                .await?
                .ok_or_else(|| error::SystemError::not_found("User not found"))?;
            self.notification_repo
                .create(&NewNotification {
                    user_id: post.author_id,
                    notification_type: NotificationType::Comment,
                    content: format!("{} commented on your post", actor.full_name()),
                })
                .await?;
        }

        self.response_for(comment.id).await
    }

    pub async fn update_comment(
        &self,
        actor_id: Uuid,
        comment_id: Uuid,
        body: UpdateCommentBody,
    ) -> Result<CommentResponse, error::SystemError> {
        let comment = self
            .comment_repo
            .find_by_id(&comment_id)
            .await?
            .ok_or_else(|| error::SystemError::not_found("Comment not found"))?;

        ensure_can_modify(&actor_id, &comment.author_id, &[])?;

        self.comment_repo.update(&comment_id, &body.content).await?;
        self.response_for(comment_id).await
    }

    /// Deletion is granted to the comment author and to the author of the
    /// hosting post.
    pub async fn delete_comment(
        &self,
        actor_id: Uuid,
        comment_id: Uuid,
    ) -> Result<(), error::SystemError> {
        let comment = self
            .comment_repo
            .find_by_id(&comment_id)
            .await?
            .ok_or_else(|| error::SystemError::not_found("Comment not found"))?;

        let post = self
            .post_repo
            .find_by_id(&comment.post_id)
            .await?
            .ok_or_else(|| error::SystemError::not_found("Post not found"))?;

        ensure_can_modify(&actor_id, &comment.author_id, &[post.author_id])?;

        self.comment_repo.delete(&comment_id).await
    }

    async fn response_for(
        &self,
        comment_id: Uuid,
    ) -> Result<CommentResponse, error::SystemError> {
        let row = self
            .comment_repo
            .find_row_by_id(&comment_id)
            .await?
            .ok_or_else(|| error::SystemError::not_found("Comment not found"))?;
        Ok(CommentResponse::from(row))
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::modules::comment::model::CommentRow;
    use crate::modules::comment::schema::CommentEntity;
    use crate::modules::notification::service::tests::MockNotificationRepo;
    use crate::modules::post::service::tests::{MockPostRepo, post_fixture};
    use crate::modules::user::service::tests::{MockUserRepo, user_fixture};
    use std::sync::Mutex;

    pub(crate) struct MockCommentRepo {
        pub comments: Mutex<Vec<CommentEntity>>,
        like_counts: Mutex<std::collections::HashMap<Uuid, i64>>,
    }

    impl MockCommentRepo {
        pub fn new() -> Self {
            Self {
                comments: Mutex::new(Vec::new()),
                like_counts: Mutex::new(std::collections::HashMap::new()),
            }
        }

        pub fn set_like_count(&self, id: Uuid, count: i64) {
            self.like_counts.lock().unwrap().insert(id, count);
        }

        fn row_from(&self, comment: &CommentEntity) -> CommentRow {
            CommentRow {
                id: comment.id,
                post_id: comment.post_id,
                content: comment.content.clone(),
                created_at: comment.created_at,
                updated_at: comment.updated_at,
                author_id: comment.author_id,
                first_name: "Test".to_string(),
                last_name: "User".to_string(),
                profile_pic: None,
                like_count: self
                    .like_counts
                    .lock()
                    .unwrap()
                    .get(&comment.id)
                    .copied()
                    .unwrap_or(0),
            }
        }
    }

    #[async_trait::async_trait]
    impl CommentRepository for MockCommentRepo {
        async fn find_by_id(
            &self,
            id: &Uuid,
        ) -> Result<Option<CommentEntity>, error::SystemError> {
            Ok(self.comments.lock().unwrap().iter().find(|c| c.id == *id).cloned())
        }

        async fn find_row_by_id(
            &self,
            id: &Uuid,
        ) -> Result<Option<CommentRow>, error::SystemError> {
            Ok(self
                .comments
                .lock()
                .unwrap()
                .iter()
                .find(|c| c.id == *id)
                .map(|c| self.row_from(c)))
        }

        async fn find_page_by_post(
            &self,
            post_id: &Uuid,
            offset: i64,
            limit: i64,
        ) -> Result<Vec<CommentRow>, error::SystemError> {
            let mut rows: Vec<_> = self
                .comments
                .lock()
                .unwrap()
                .iter()
                .filter(|c| c.post_id == *post_id)
                .map(|c| self.row_from(c))
                .collect();
            rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
            Ok(rows.into_iter().skip(offset as usize).take(limit as usize).collect())
        }

        async fn find_all_by_post(
            &self,
            post_id: &Uuid,
        ) -> Result<Vec<CommentRow>, error::SystemError> {
            self.find_page_by_post(post_id, 0, i64::MAX).await
        }

        async fn count_by_post(&self, post_id: &Uuid) -> Result<i64, error::SystemError> {
            Ok(self
                .comments
                .lock()
                .unwrap()
                .iter()
                .filter(|c| c.post_id == *post_id)
                .count() as i64)
        }

        async fn create(
            &self,
            author_id: &Uuid,
            post_id: &Uuid,
            content: &str,
        ) -> Result<CommentEntity, error::SystemError> {
            let now = chrono::Utc::now();
            let entity = CommentEntity {
                id: Uuid::new_v7(uuid::Timestamp::now(uuid::NoContext)),
                post_id: *post_id,
                author_id: *author_id,
                content: content.to_string(),
                created_at: now,
                updated_at: now,
            };
            self.comments.lock().unwrap().push(entity.clone());
            Ok(entity)
        }

        async fn update(
            &self,
            id: &Uuid,
            content: &str,
        ) -> Result<CommentEntity, error::SystemError> {
            let mut comments = self.comments.lock().unwrap();
            let comment = comments
                .iter_mut()
                .find(|c| c.id == *id)
                .ok_or_else(|| error::SystemError::not_found("Comment not found"))?;
            comment.content = content.to_string();
            comment.updated_at = chrono::Utc::now();
            Ok(comment.clone())
        }

        async fn delete(&self, id: &Uuid) -> Result<(), error::SystemError> {
            self.comments.lock().unwrap().retain(|c| c.id != *id);
            Ok(())
        }
    }

    struct Fixture {
        svc: CommentService<MockCommentRepo, MockPostRepo, MockUserRepo, MockNotificationRepo>,
        comments: Arc<MockCommentRepo>,
        notifications: Arc<MockNotificationRepo>,
        post_author: Uuid,
        commenter: Uuid,
        post_id: Uuid,
    }

    fn fixture() -> Fixture {
        let post_author = user_fixture("Post", "Author");
        let commenter = user_fixture("Com", "Menter");
        let post = post_fixture(post_author.id);
        let post_id = post.id;
        let post_author_id = post_author.id;
        let commenter_id = commenter.id;

        let comments = Arc::new(MockCommentRepo::new());
        let notifications = Arc::new(MockNotificationRepo::new());
        let svc = CommentService::with_dependencies(
            comments.clone(),
            Arc::new(MockPostRepo::with_posts(vec![post])),
            Arc::new(MockUserRepo::with_users(vec![post_author, commenter])),
            notifications.clone(),
        );

        Fixture {
            svc,
            comments,
            notifications,
            post_author: post_author_id,
            commenter: commenter_id,
            post_id,
        }
    }

    fn create_body(post_id: Uuid) -> CreateCommentBody {
        CreateCommentBody { content: "nice post".to_string(), post_id }
    }

    #[actix_web::test]
    async fn commenting_on_anothers_post_notifies_the_author() {
        let f = fixture();
        f.svc.create_comment(f.commenter, create_body(f.post_id)).await.unwrap();

        let notifications = f.notifications.all();
        assert_eq!(notifications.len(), 1);
        assert_eq!(notifications[0].user_id, f.post_author);
        assert_eq!(notifications[0].notification_type, NotificationType::Comment);
        assert!(notifications[0].content.contains("Com Menter"));
    }

    #[actix_web::test]
    async fn commenting_on_own_post_creates_no_notification() {
        let f = fixture();
        f.svc.create_comment(f.post_author, create_body(f.post_id)).await.unwrap();
        assert!(f.notifications.all().is_empty());
    }

    #[actix_web::test]
    async fn commenting_on_unknown_post_is_not_found() {
        let f = fixture();
        let err = f
            .svc
            .create_comment(
                f.commenter,
                create_body(Uuid::new_v7(uuid::Timestamp::now(uuid::NoContext))),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, error::SystemError::NotFound(_)));
    }

    #[actix_web::test]
    async fn delete_is_granted_to_author_and_post_author_only() {
        let f = fixture();
        let third_party = user_fixture("Third", "Party").id;

        let comment = f.svc.create_comment(f.commenter, create_body(f.post_id)).await.unwrap();
        let err = f.svc.delete_comment(third_party, comment.id).await.unwrap_err();
        assert!(matches!(err, error::SystemError::Forbidden(_)));

        // post author may delete someone else's comment on their post
        f.svc.delete_comment(f.post_author, comment.id).await.unwrap();

        let comment = f.svc.create_comment(f.commenter, create_body(f.post_id)).await.unwrap();
        f.svc.delete_comment(f.commenter, comment.id).await.unwrap();
    }

    #[actix_web::test]
    async fn update_is_author_only() {
        let f = fixture();
        let comment = f.svc.create_comment(f.commenter, create_body(f.post_id)).await.unwrap();

        let body = UpdateCommentBody { content: "edited".to_string() };
        let err =
            f.svc.update_comment(f.post_author, comment.id, body.clone()).await.unwrap_err();
        assert!(matches!(err, error::SystemError::Forbidden(_)));

        let updated = f.svc.update_comment(f.commenter, comment.id, body).await.unwrap();
        assert_eq!(updated.content, "edited");
    }

    #[actix_web::test]
    async fn update_response_carries_the_current_like_count() {
        let f = fixture();
        let comment = f.svc.create_comment(f.commenter, create_body(f.post_id)).await.unwrap();
        assert_eq!(comment.like_count, 0);

        f.comments.set_like_count(comment.id, 2);

        let body = UpdateCommentBody { content: "edited".to_string() };
        let updated = f.svc.update_comment(f.commenter, comment.id, body).await.unwrap();
        assert_eq!(updated.like_count, 2);
    }

    #[actix_web::test]
    async fn listing_unknown_post_is_not_found() {
        let f = fixture();
        let err = f
            .svc
            .get_comments_by_post(Uuid::new_v7(uuid::Timestamp::now(uuid::NoContext)), 1, 10)
            .await
            .unwrap_err();
        assert!(matches!(err, error::SystemError::NotFound(_)));
    }
}
