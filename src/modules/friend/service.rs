use std::sync::Arc;

use uuid::Uuid;

use crate::api::error;
use crate::modules::friend::model::{FriendRequestsResponse, FriendResponse};
use crate::modules::friend::repository::FriendRepository;
use crate::modules::friend::schema::{FriendRequestEntity, FriendStatus};
use crate::modules::notification::model::NewNotification;
use crate::modules::notification::repository::NotificationRepository;
use crate::modules::notification::schema::NotificationType;
use crate::modules::user::repository::UserRepository;

#[derive(Clone)]
pub struct FriendService<F, U, N>
where
    F: FriendRepository + Send + Sync,
    U: UserRepository + Send + Sync,
    N: NotificationRepository + Send + Sync,
{
    friend_repo: Arc<F>,
    user_repo: Arc<U>,
    notification_repo: Arc<N>,
}

impl<F, U, N> FriendService<F, U, N>
where
    F: FriendRepository + Send + Sync,
    U: UserRepository + Send + Sync,
    N: NotificationRepository + Send + Sync,
{
    pub fn with_dependencies(
        friend_repo: Arc<F>,
        user_repo: Arc<U>,
        notification_repo: Arc<N>,
    ) -> Self {
        FriendService { friend_repo, user_repo, notification_repo }
    }

    /// A request between two users is unique regardless of direction, so a
    /// rejected or pending row in either direction blocks a new one.
    pub async fn send_request(
        &self,
        sender_id: Uuid,
        receiver_id: Uuid,
    ) -> Result<FriendRequestEntity, error::SystemError> {
        if sender_id == receiver_id {
            return Err(error::SystemError::bad_request(
                "Cannot send a friend request to yourself",
            ));
        }
        if self.user_repo.find_by_id(&receiver_id).await?.is_none() {
            return Err(error::SystemError::not_found("User not found"));
        }
        if self.friend_repo.find_between(&sender_id, &receiver_id).await?.is_some() {
            return Err(error::SystemError::conflict(
                "A friend request already exists between these users",
            ));
        }

        let request = self.friend_repo.create(&sender_id, &receiver_id).await?;
        self.notify(sender_id, receiver_id, "sent you a friend request").await?;
        Ok(request)
    }

    pub async fn respond(
        &self,
        actor_id: Uuid,
        request_id: Uuid,
        status: FriendStatus,
    ) -> Result<FriendRequestEntity, error::SystemError> {
        if status == FriendStatus::Pending {
            return Err(error::SystemError::bad_request(
                "Status must be ACCEPTED or REJECTED",
            ));
        }

        let request = self
            .friend_repo
            .find_by_id(&request_id)
            .await?
            .ok_or_else(|| error::SystemError::not_found("Friend request not found"))?;

        if request.receiver_id != actor_id {
            return Err(error::SystemError::forbidden(
                "Only the receiver can respond to this request",
            ));
        }
        if request.status != FriendStatus::Pending {
            return Err(error::SystemError::conflict(
                "This friend request has already been responded to",
            ));
        }

        let updated = self.friend_repo.update_status(&request_id, status).await?;
        if status == FriendStatus::Accepted {
            self.notify(actor_id, request.sender_id, "accepted your friend request").await?;
        }
        Ok(updated)
    }

    /// Removes whatever request links the two users, accepted or not.
    pub async fn delete_friendship(
        &self,
        actor_id: Uuid,
        other_id: Uuid,
    ) -> Result<(), error::SystemError> {
        let request = self
            .friend_repo
            .find_between(&actor_id, &other_id)
            .await?
            .ok_or_else(|| error::SystemError::not_found("Friendship not found"))?;
        self.friend_repo.delete(&request.id).await
    }

    pub async fn get_friends(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<FriendResponse>, error::SystemError> {
        self.friend_repo.find_friends(&user_id).await
    }

    pub async fn get_requests(
        &self,
        user_id: Uuid,
    ) -> Result<FriendRequestsResponse, error::SystemError> {
        let received = self.friend_repo.find_received_pending(&user_id).await?;
        let sent = self.friend_repo.find_sent(&user_id).await?;
        Ok(FriendRequestsResponse {
            received: received.into_iter().map(Into::into).collect(),
            sent: sent.into_iter().map(Into::into).collect(),
        })
    }

    async fn notify(
        &self,
        actor_id: Uuid,
        target_id: Uuid,
        verb: &str,
    ) -> Result<(), error::SystemError> {
        let actor = self
            .user_repo
            .find_by_id(&actor_id)
            .await?
            .ok_or_else(|| error::SystemError::not_found("User not found"))?;
        self.notification_repo
            .create(&NewNotification {
                user_id: target_id,
                notification_type: NotificationType::FriendRequest,
                content: format!("{} {}", actor.full_name(), verb),
            })
            .await?;
        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::modules::friend::model::FriendRequestRow;
    use crate::modules::notification::service::tests::MockNotificationRepo;
    use crate::modules::user::model::UserSummary;
    use crate::modules::user::schema::UserEntity;
    use crate::modules::user::service::tests::{MockUserRepo, user_fixture};
    use std::sync::Mutex;

    pub(crate) struct MockFriendRepo {
        pub requests: Mutex<Vec<FriendRequestEntity>>,
        users: Vec<UserEntity>,
    }

    impl MockFriendRepo {
        fn with_users(users: Vec<UserEntity>) -> Self {
            Self { requests: Mutex::new(Vec::new()), users }
        }

        fn summary_of(&self, id: &Uuid) -> UserSummary {
            let user = self.users.iter().find(|u| u.id == *id).cloned().unwrap();
            UserSummary::from(user)
        }
    }

    #[async_trait::async_trait]
    impl FriendRepository for MockFriendRepo {
        async fn find_by_id(
            &self,
            id: &Uuid,
        ) -> Result<Option<FriendRequestEntity>, error::SystemError> {
            Ok(self.requests.lock().unwrap().iter().find(|r| r.id == *id).cloned())
        }

        async fn find_between(
            &self,
            user_a: &Uuid,
            user_b: &Uuid,
        ) -> Result<Option<FriendRequestEntity>, error::SystemError> {
            Ok(self
                .requests
                .lock()
                .unwrap()
                .iter()
                .find(|r| {
                    (r.sender_id == *user_a && r.receiver_id == *user_b)
                        || (r.sender_id == *user_b && r.receiver_id == *user_a)
                })
                .cloned())
        }

        async fn create(
            &self,
            sender_id: &Uuid,
            receiver_id: &Uuid,
        ) -> Result<FriendRequestEntity, error::SystemError> {
            let entity = FriendRequestEntity {
                id: Uuid::new_v7(uuid::Timestamp::now(uuid::NoContext)),
                sender_id: *sender_id,
                receiver_id: *receiver_id,
                status: FriendStatus::Pending,
                created_at: chrono::Utc::now(),
            };
            self.requests.lock().unwrap().push(entity.clone());
            Ok(entity)
        }

        async fn update_status(
            &self,
            id: &Uuid,
            status: FriendStatus,
        ) -> Result<FriendRequestEntity, error::SystemError> {
            let mut requests = self.requests.lock().unwrap();
            let request = requests
                .iter_mut()
                .find(|r| r.id == *id)
                .ok_or_else(|| error::SystemError::not_found("Friend request not found"))?;
            request.status = status;
            Ok(request.clone())
        }

        async fn delete(&self, id: &Uuid) -> Result<(), error::SystemError> {
            self.requests.lock().unwrap().retain(|r| r.id != *id);
            Ok(())
        }

        async fn find_received_pending(
            &self,
            user_id: &Uuid,
        ) -> Result<Vec<FriendRequestRow>, error::SystemError> {
            Ok(self
                .requests
                .lock()
                .unwrap()
                .iter()
                .filter(|r| r.receiver_id == *user_id && r.status == FriendStatus::Pending)
                .map(|r| row_for(r, self.summary_of(&r.sender_id)))
                .collect())
        }

        async fn find_sent(
            &self,
            user_id: &Uuid,
        ) -> Result<Vec<FriendRequestRow>, error::SystemError> {
            Ok(self
                .requests
                .lock()
                .unwrap()
                .iter()
                .filter(|r| r.sender_id == *user_id)
                .map(|r| row_for(r, self.summary_of(&r.receiver_id)))
                .collect())
        }

        async fn find_friends(
            &self,
            user_id: &Uuid,
        ) -> Result<Vec<FriendResponse>, error::SystemError> {
            Ok(self
                .requests
                .lock()
                .unwrap()
                .iter()
                .filter(|r| {
                    r.status == FriendStatus::Accepted
                        && (r.sender_id == *user_id || r.receiver_id == *user_id)
                })
                .map(|r| {
                    let other = if r.sender_id == *user_id { r.receiver_id } else { r.sender_id };
                    let user = self.users.iter().find(|u| u.id == other).cloned().unwrap();
                    FriendResponse {
                        id: user.id,
                        first_name: user.first_name,
                        last_name: user.last_name,
                        profile_pic: user.profile_pic,
                        bio: user.bio,
                    }
                })
                .collect())
        }
    }

    fn row_for(request: &FriendRequestEntity, user: UserSummary) -> FriendRequestRow {
        FriendRequestRow {
            req_id: request.id,
            status: request.status,
            created_at: request.created_at,
            user_id: user.id,
            first_name: user.first_name,
            last_name: user.last_name,
            profile_pic: user.profile_pic,
        }
    }

    struct Fixture {
        svc: FriendService<MockFriendRepo, MockUserRepo, MockNotificationRepo>,
        notifications: Arc<MockNotificationRepo>,
        alice: Uuid,
        bob: Uuid,
    }

    fn fixture() -> Fixture {
        let alice = user_fixture("Alice", "Nguyen");
        let bob = user_fixture("Bob", "Tran");
        let alice_id = alice.id;
        let bob_id = bob.id;

        let notifications = Arc::new(MockNotificationRepo::new());
        let svc = FriendService::with_dependencies(
            Arc::new(MockFriendRepo::with_users(vec![alice.clone(), bob.clone()])),
            Arc::new(MockUserRepo::with_users(vec![alice, bob])),
            notifications.clone(),
        );

        Fixture { svc, notifications, alice: alice_id, bob: bob_id }
    }

    #[actix_web::test]
    async fn sending_creates_a_pending_request_and_notifies_the_receiver() {
        let f = fixture();
        let request = f.svc.send_request(f.alice, f.bob).await.unwrap();
        assert_eq!(request.status, FriendStatus::Pending);
        assert_eq!(request.sender_id, f.alice);
        assert_eq!(request.receiver_id, f.bob);

        let notifications = f.notifications.all();
        assert_eq!(notifications.len(), 1);
        assert_eq!(notifications[0].user_id, f.bob);
        assert_eq!(notifications[0].notification_type, NotificationType::FriendRequest);
        assert!(notifications[0].content.contains("sent you a friend request"));
    }

    #[actix_web::test]
    async fn sending_to_yourself_is_a_bad_request() {
        let f = fixture();
        let err = f.svc.send_request(f.alice, f.alice).await.unwrap_err();
        assert!(matches!(err, error::SystemError::BadRequest(_)));
    }

    #[actix_web::test]
    async fn sending_to_an_unknown_user_is_not_found() {
        let f = fixture();
        let ghost = Uuid::new_v7(uuid::Timestamp::now(uuid::NoContext));
        let err = f.svc.send_request(f.alice, ghost).await.unwrap_err();
        assert!(matches!(err, error::SystemError::NotFound(_)));
    }

    #[actix_web::test]
    async fn a_duplicate_request_conflicts_in_either_direction() {
        let f = fixture();
        f.svc.send_request(f.alice, f.bob).await.unwrap();

        let same = f.svc.send_request(f.alice, f.bob).await.unwrap_err();
        assert!(matches!(same, error::SystemError::Conflict(_)));

        let reversed = f.svc.send_request(f.bob, f.alice).await.unwrap_err();
        assert!(matches!(reversed, error::SystemError::Conflict(_)));
    }

    #[actix_web::test]
    async fn accepting_makes_both_sides_friends_and_notifies_the_sender() {
        let f = fixture();
        let request = f.svc.send_request(f.alice, f.bob).await.unwrap();

        let updated = f.svc.respond(f.bob, request.id, FriendStatus::Accepted).await.unwrap();
        assert_eq!(updated.status, FriendStatus::Accepted);

        let alices = f.svc.get_friends(f.alice).await.unwrap();
        let bobs = f.svc.get_friends(f.bob).await.unwrap();
        assert_eq!(alices.len(), 1);
        assert_eq!(alices[0].id, f.bob);
        assert_eq!(bobs.len(), 1);
        assert_eq!(bobs[0].id, f.alice);

        let notifications = f.notifications.all();
        assert_eq!(notifications.len(), 2);
        assert_eq!(notifications[1].user_id, f.alice);
        assert!(notifications[1].content.contains("accepted your friend request"));
    }

    #[actix_web::test]
    async fn rejecting_leaves_no_friendship_and_no_extra_notification() {
        let f = fixture();
        let request = f.svc.send_request(f.alice, f.bob).await.unwrap();

        let updated = f.svc.respond(f.bob, request.id, FriendStatus::Rejected).await.unwrap();
        assert_eq!(updated.status, FriendStatus::Rejected);

        assert!(f.svc.get_friends(f.alice).await.unwrap().is_empty());
        // only the send notification remains
        assert_eq!(f.notifications.all().len(), 1);
    }

    #[actix_web::test]
    async fn only_the_receiver_may_respond() {
        let f = fixture();
        let request = f.svc.send_request(f.alice, f.bob).await.unwrap();
        let err = f.svc.respond(f.alice, request.id, FriendStatus::Accepted).await.unwrap_err();
        assert!(matches!(err, error::SystemError::Forbidden(_)));
    }

    #[actix_web::test]
    async fn responding_twice_conflicts() {
        let f = fixture();
        let request = f.svc.send_request(f.alice, f.bob).await.unwrap();
        f.svc.respond(f.bob, request.id, FriendStatus::Accepted).await.unwrap();
        let err = f.svc.respond(f.bob, request.id, FriendStatus::Rejected).await.unwrap_err();
        assert!(matches!(err, error::SystemError::Conflict(_)));
    }

    #[actix_web::test]
    async fn responding_with_pending_is_a_bad_request() {
        let f = fixture();
        let request = f.svc.send_request(f.alice, f.bob).await.unwrap();
        let err = f.svc.respond(f.bob, request.id, FriendStatus::Pending).await.unwrap_err();
        assert!(matches!(err, error::SystemError::BadRequest(_)));
    }

    #[actix_web::test]
    async fn deleting_removes_the_link_whatever_its_status() {
        let f = fixture();
        let request = f.svc.send_request(f.alice, f.bob).await.unwrap();
        f.svc.respond(f.bob, request.id, FriendStatus::Accepted).await.unwrap();

        f.svc.delete_friendship(f.alice, f.bob).await.unwrap();
        assert!(f.svc.get_friends(f.bob).await.unwrap().is_empty());

        // a fresh request can now be sent again
        f.svc.send_request(f.bob, f.alice).await.unwrap();
    }

    #[actix_web::test]
    async fn deleting_a_missing_link_is_not_found() {
        let f = fixture();
        let err = f.svc.delete_friendship(f.alice, f.bob).await.unwrap_err();
        assert!(matches!(err, error::SystemError::NotFound(_)));
    }

    #[actix_web::test]
    async fn requests_listing_splits_received_pending_from_sent() {
        let f = fixture();
        let request = f.svc.send_request(f.alice, f.bob).await.unwrap();

        let bobs = f.svc.get_requests(f.bob).await.unwrap();
        assert_eq!(bobs.received.len(), 1);
        assert_eq!(bobs.received[0].id, request.id);
        assert_eq!(bobs.received[0].user.id, f.alice);
        assert!(bobs.sent.is_empty());

        let alices = f.svc.get_requests(f.alice).await.unwrap();
        assert!(alices.received.is_empty());
        assert_eq!(alices.sent.len(), 1);
        assert_eq!(alices.sent[0].user.id, f.bob);

        // once responded the request leaves the received list but stays in sent
        f.svc.respond(f.bob, request.id, FriendStatus::Rejected).await.unwrap();
        let bobs = f.svc.get_requests(f.bob).await.unwrap();
        assert!(bobs.received.is_empty());
        let alices = f.svc.get_requests(f.alice).await.unwrap();
        assert_eq!(alices.sent.len(), 1);
        assert_eq!(alices.sent[0].status, FriendStatus::Rejected);
    }
}
