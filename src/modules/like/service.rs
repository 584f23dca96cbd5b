use std::sync::Arc;

use uuid::Uuid;

use crate::api::error;
use crate::modules::comment::repository::CommentRepository;
use crate::modules::like::model::LikeStatusResponse;
use crate::modules::like::repository::LikeRepository;
use crate::modules::notification::model::NewNotification;
use crate::modules::notification::repository::NotificationRepository;
use crate::modules::notification::schema::NotificationType;
use crate::modules::post::repository::PostRepository;
use crate::modules::user::model::UserSummary;
use crate::modules::user::repository::UserRepository;

#[derive(Clone)]
pub struct LikeService<L, P, C, U, N>
where
    L: LikeRepository + Send + Sync,
    P: PostRepository + Send + Sync,
    C: CommentRepository + Send + Sync,
    U: UserRepository + Send + Sync,
    N: NotificationRepository + Send + Sync,
{
    like_repo: Arc<L>,
    post_repo: Arc<P>,
    comment_repo: Arc<C>,
    user_repo: Arc<U>,
    notification_repo: Arc<N>,
}

impl<L, P, C, U, N> LikeService<L, P, C, U, N>
where
    L: LikeRepository + Send + Sync,
    P: PostRepository + Send + Sync,
    C: CommentRepository + Send + Sync,
    U: UserRepository + Send + Sync,
    N: NotificationRepository + Send + Sync,
{
    pub fn with_dependencies(
        like_repo: Arc<L>,
        post_repo: Arc<P>,
        comment_repo: Arc<C>,
        user_repo: Arc<U>,
        notification_repo: Arc<N>,
    ) -> Self {
        LikeService { like_repo, post_repo, comment_repo, user_repo, notification_repo }
    }

    /// Pure toggle: an existing like is removed, a missing one is created.
    /// The notification fires only on the off-to-on transition and never for
    /// the target's own author.
    pub async fn toggle_post_like(
        &self,
        actor_id: Uuid,
        post_id: Uuid,
    ) -> Result<LikeStatusResponse, error::SystemError> {
        let post = self
            .post_repo
            .find_by_id(&post_id)
            .await?
            .ok_or_else(|| error::SystemError::not_found("Post not found"))?;

        let is_liked = match self.like_repo.find_by_user_and_post(&actor_id, &post_id).await? {
            Some(existing) => {
                self.like_repo.delete(&existing.id).await?;
                false
            }
            None => {
                self.like_repo.create_post_like(&actor_id, &post_id).await?;
                if post.author_id != actor_id {
                    self.notify(actor_id, post.author_id, NotificationType::PostLike, "post")
                        .await?;
                }
                true
            }
        };

        let like_count = self.like_repo.count_by_post(&post_id).await?;
        Ok(LikeStatusResponse { is_liked, like_count })
    }

    pub async fn toggle_comment_like(
        &self,
        actor_id: Uuid,
        comment_id: Uuid,
    ) -> Result<LikeStatusResponse, error::SystemError> {
        let comment = self
            .comment_repo
            .find_by_id(&comment_id)
            .await?
            .ok_or_else(|| error::SystemError::not_found("Comment not found"))?;

        let is_liked =
            match self.like_repo.find_by_user_and_comment(&actor_id, &comment_id).await? {
                Some(existing) => {
                    self.like_repo.delete(&existing.id).await?;
                    false
                }
                None => {
                    self.like_repo.create_comment_like(&actor_id, &comment_id).await?;
                    if comment.author_id != actor_id {
                        self.notify(
                            actor_id,
                            comment.author_id,
                            NotificationType::CommentLike,
                            "comment",
                        )
                        .await?;
                    }
                    true
                }
            };

        let like_count = self.like_repo.count_by_comment(&comment_id).await?;
        Ok(LikeStatusResponse { is_liked, like_count })
    }

    pub async fn get_post_likes(
        &self,
        post_id: Uuid,
    ) -> Result<Vec<UserSummary>, error::SystemError> {
        if self.post_repo.find_by_id(&post_id).await?.is_none() {
            return Err(error::SystemError::not_found("Post not found"));
        }
        self.like_repo.find_likers_by_post(&post_id).await
    }

    async fn notify(
        &self,
        actor_id: Uuid,
        owner_id: Uuid,
        notification_type: NotificationType,
        target: &str,
    ) -> Result<(), error::SystemError> {
        let actor = self
            .user_repo
            .find_by_id(&actor_id)
            .await?
            .ok_or_else(|| error::SystemError::not_found("User not found"))?;
        self.notification_repo
            .create(&NewNotification {
                user_id: owner_id,
                notification_type,
                content: format!("{} liked your {}", actor.full_name(), target),
            })
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::comment::service::tests::MockCommentRepo;
    use crate::modules::like::schema::LikeEntity;
    use crate::modules::notification::service::tests::MockNotificationRepo;
    use crate::modules::post::service::tests::{MockPostRepo, post_fixture};
    use crate::modules::user::service::tests::{MockUserRepo, user_fixture};
    use std::sync::Mutex;

    struct MockLikeRepo {
        likes: Mutex<Vec<LikeEntity>>,
    }

    impl MockLikeRepo {
        fn new() -> Self {
            Self { likes: Mutex::new(Vec::new()) }
        }
    }

    #[async_trait::async_trait]
    impl LikeRepository for MockLikeRepo {
        async fn find_by_user_and_post(
            &self,
            user_id: &Uuid,
            post_id: &Uuid,
        ) -> Result<Option<LikeEntity>, error::SystemError> {
            Ok(self
                .likes
                .lock()
                .unwrap()
                .iter()
                .find(|l| l.user_id == *user_id && l.post_id == Some(*post_id))
                .cloned())
        }

        async fn find_by_user_and_comment(
            &self,
            user_id: &Uuid,
            comment_id: &Uuid,
        ) -> Result<Option<LikeEntity>, error::SystemError> {
            Ok(self
                .likes
                .lock()
                .unwrap()
                .iter()
                .find(|l| l.user_id == *user_id && l.comment_id == Some(*comment_id))
                .cloned())
        }

        async fn create_post_like(
            &self,
            user_id: &Uuid,
            post_id: &Uuid,
        ) -> Result<LikeEntity, error::SystemError> {
            let entity = LikeEntity {
                id: Uuid::new_v7(uuid::Timestamp::now(uuid::NoContext)),
                user_id: *user_id,
                post_id: Some(*post_id),
                comment_id: None,
                created_at: chrono::Utc::now(),
            };
            self.likes.lock().unwrap().push(entity.clone());
            Ok(entity)
        }

        async fn create_comment_like(
            &self,
            user_id: &Uuid,
            comment_id: &Uuid,
        ) -> Result<LikeEntity, error::SystemError> {
            let entity = LikeEntity {
                id: Uuid::new_v7(uuid::Timestamp::now(uuid::NoContext)),
                user_id: *user_id,
                post_id: None,
                comment_id: Some(*comment_id),
                created_at: chrono::Utc::now(),
            };
            self.likes.lock().unwrap().push(entity.clone());
            Ok(entity)
        }

        async fn delete(&self, id: &Uuid) -> Result<(), error::SystemError> {
            self.likes.lock().unwrap().retain(|l| l.id != *id);
            Ok(())
        }

        async fn count_by_post(&self, post_id: &Uuid) -> Result<i64, error::SystemError> {
            Ok(self
                .likes
                .lock()
                .unwrap()
                .iter()
                .filter(|l| l.post_id == Some(*post_id))
                .count() as i64)
        }

        async fn count_by_comment(&self, comment_id: &Uuid) -> Result<i64, error::SystemError> {
            Ok(self
                .likes
                .lock()
                .unwrap()
                .iter()
                .filter(|l| l.comment_id == Some(*comment_id))
                .count() as i64)
        }

        async fn find_likers_by_post(
            &self,
            post_id: &Uuid,
        ) -> Result<Vec<UserSummary>, error::SystemError> {
            let mut likes: Vec<_> = self
                .likes
                .lock()
                .unwrap()
                .iter()
                .filter(|l| l.post_id == Some(*post_id))
                .cloned()
                .collect();
            likes.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(a.user_id.cmp(&b.user_id)));
            Ok(likes
                .into_iter()
                .map(|l| UserSummary {
                    id: l.user_id,
                    first_name: "Test".to_string(),
                    last_name: "User".to_string(),
                    profile_pic: None,
                })
                .collect())
        }
    }

    struct Fixture {
        svc: LikeService<MockLikeRepo, MockPostRepo, MockCommentRepo, MockUserRepo, MockNotificationRepo>,
        notifications: Arc<MockNotificationRepo>,
        post_author: Uuid,
        other_user: Uuid,
        post_id: Uuid,
    }

    fn fixture() -> Fixture {
        let author = user_fixture("Post", "Author");
        let other = user_fixture("Other", "User");
        let post = post_fixture(author.id);
        let post_id = post.id;
        let author_id = author.id;
        let other_id = other.id;

        let notifications = Arc::new(MockNotificationRepo::new());
        let svc = LikeService::with_dependencies(
            Arc::new(MockLikeRepo::new()),
            Arc::new(MockPostRepo::with_posts(vec![post])),
            Arc::new(MockCommentRepo::new()),
            Arc::new(MockUserRepo::with_users(vec![author, other])),
            notifications.clone(),
        );

        Fixture { svc, notifications, post_author: author_id, other_user: other_id, post_id }
    }

    #[actix_web::test]
    async fn double_toggle_returns_to_original_state() {
        let f = fixture();

        let on = f.svc.toggle_post_like(f.other_user, f.post_id).await.unwrap();
        assert!(on.is_liked);
        assert_eq!(on.like_count, 1);

        let off = f.svc.toggle_post_like(f.other_user, f.post_id).await.unwrap();
        assert!(!off.is_liked);
        assert_eq!(off.like_count, 0);
    }

    #[actix_web::test]
    async fn second_actors_toggle_keeps_the_first_like() {
        let f = fixture();

        f.svc.toggle_post_like(f.other_user, f.post_id).await.unwrap();
        let second = f.svc.toggle_post_like(f.post_author, f.post_id).await.unwrap();
        assert!(second.is_liked);
        assert_eq!(second.like_count, 2);

        // the author un-liking leaves the other user's like in place
        let off = f.svc.toggle_post_like(f.post_author, f.post_id).await.unwrap();
        assert!(!off.is_liked);
        assert_eq!(off.like_count, 1);
    }

    #[actix_web::test]
    async fn liking_own_post_never_notifies() {
        let f = fixture();
        let status = f.svc.toggle_post_like(f.post_author, f.post_id).await.unwrap();
        assert!(status.is_liked);
        assert_eq!(status.like_count, 1);
        assert!(f.notifications.all().is_empty());
    }

    #[actix_web::test]
    async fn liking_anothers_post_notifies_exactly_once_per_on_transition() {
        let f = fixture();

        f.svc.toggle_post_like(f.other_user, f.post_id).await.unwrap();
        assert_eq!(f.notifications.all().len(), 1);
        assert_eq!(f.notifications.all()[0].user_id, f.post_author);
        assert_eq!(f.notifications.all()[0].notification_type, NotificationType::PostLike);

        // off-transition adds nothing
        f.svc.toggle_post_like(f.other_user, f.post_id).await.unwrap();
        assert_eq!(f.notifications.all().len(), 1);

        // next on-transition notifies again
        f.svc.toggle_post_like(f.other_user, f.post_id).await.unwrap();
        assert_eq!(f.notifications.all().len(), 2);
    }

    #[actix_web::test]
    async fn comment_likes_notify_the_comment_author() {
        let f = fixture();
        let comments = MockCommentRepo::new();
        let comment =
            comments.create(&f.post_author, &f.post_id, "first!").await.unwrap();

        let svc = LikeService::with_dependencies(
            Arc::new(MockLikeRepo::new()),
            Arc::new(MockPostRepo::new()),
            Arc::new(comments),
            Arc::new(MockUserRepo::with_users(vec![
                user_fixture_with_id(f.post_author),
                user_fixture_with_id(f.other_user),
            ])),
            f.notifications.clone(),
        );

        let on = svc.toggle_comment_like(f.other_user, comment.id).await.unwrap();
        assert!(on.is_liked);
        assert_eq!(on.like_count, 1);

        let notifications = f.notifications.all();
        assert_eq!(notifications.len(), 1);
        assert_eq!(notifications[0].user_id, f.post_author);
        assert_eq!(notifications[0].notification_type, NotificationType::CommentLike);
    }

    #[actix_web::test]
    async fn likers_list_follows_the_toggles() {
        let f = fixture();
        f.svc.toggle_post_like(f.other_user, f.post_id).await.unwrap();
        f.svc.toggle_post_like(f.post_author, f.post_id).await.unwrap();

        let likers = f.svc.get_post_likes(f.post_id).await.unwrap();
        let ids: Vec<Uuid> = likers.iter().map(|u| u.id).collect();
        assert_eq!(likers.len(), 2);
        assert!(ids.contains(&f.other_user));
        assert!(ids.contains(&f.post_author));

        // untoggling removes that actor from the list
        f.svc.toggle_post_like(f.other_user, f.post_id).await.unwrap();
        let likers = f.svc.get_post_likes(f.post_id).await.unwrap();
        assert_eq!(likers.len(), 1);
        assert_eq!(likers[0].id, f.post_author);
    }

    #[actix_web::test]
    async fn unknown_targets_are_not_found() {
        let f = fixture();
        let ghost = Uuid::new_v7(uuid::Timestamp::now(uuid::NoContext));

        let err = f.svc.toggle_post_like(f.other_user, ghost).await.unwrap_err();
        assert!(matches!(err, error::SystemError::NotFound(_)));

        let err = f.svc.toggle_comment_like(f.other_user, ghost).await.unwrap_err();
        assert!(matches!(err, error::SystemError::NotFound(_)));

        let err = f.svc.get_post_likes(ghost).await.unwrap_err();
        assert!(matches!(err, error::SystemError::NotFound(_)));
    }

    fn user_fixture_with_id(id: Uuid) -> crate::modules::user::schema::UserEntity {
        let mut user = user_fixture("Some", "User");
        user.id = id;
        user
    }
}
