use actix_web::{HttpRequest, delete, get, patch, post, web};
use uuid::Uuid;

use crate::{
    api::{error, success},
    middlewares::get_claims,
    modules::{
        friend::{
            model::{
                FriendRequestsResponse, FriendResponse, RespondFriendRequestBody,
                SendFriendRequestBody,
            },
            repository_pg::FriendRepositoryPg,
            schema::FriendRequestEntity,
            service::FriendService,
        },
        notification::repository_pg::NotificationRepositoryPg,
        user::repository_pg::UserRepositoryPg,
    },
    utils::ValidatedJson,
};

pub type FriendSvc = FriendService<FriendRepositoryPg, UserRepositoryPg, NotificationRepositoryPg>;

#[get("")]
pub async fn get_friends(
    friend_service: web::Data<FriendSvc>,
    req: HttpRequest,
) -> Result<success::Success<Vec<FriendResponse>>, error::Error> {
    let user_id = get_claims(&req)?.sub;
    let friends = friend_service.get_friends(user_id).await?;
    Ok(success::Success::ok(friends))
}

#[get("/requests")]
pub async fn get_friend_requests(
    friend_service: web::Data<FriendSvc>,
    req: HttpRequest,
) -> Result<success::Success<FriendRequestsResponse>, error::Error> {
    let user_id = get_claims(&req)?.sub;
    let requests = friend_service.get_requests(user_id).await?;
    Ok(success::Success::ok(requests))
}

#[post("/requests")]
pub async fn send_friend_request(
    friend_service: web::Data<FriendSvc>,
    body: ValidatedJson<SendFriendRequestBody>,
    req: HttpRequest,
) -> Result<success::Success<FriendRequestEntity>, error::Error> {
    let sender_id = get_claims(&req)?.sub;
    let request = friend_service.send_request(sender_id, body.0.user_id).await?;
    Ok(success::Success::created(request))
}

#[patch("/requests/{request_id}")]
pub async fn respond_friend_request(
    friend_service: web::Data<FriendSvc>,
    request_id: web::Path<Uuid>,
    body: ValidatedJson<RespondFriendRequestBody>,
    req: HttpRequest,
) -> Result<success::Success<FriendRequestEntity>, error::Error> {
    let actor_id = get_claims(&req)?.sub;
    let request = friend_service
        .respond(actor_id, request_id.into_inner(), body.0.status)
        .await?;
    Ok(success::Success::ok(request))
}

#[delete("/{user_id}")]
pub async fn delete_friendship(
    friend_service: web::Data<FriendSvc>,
    user_id: web::Path<Uuid>,
    req: HttpRequest,
) -> Result<success::Success<()>, error::Error> {
    let actor_id = get_claims(&req)?.sub;
    friend_service.delete_friendship(actor_id, user_id.into_inner()).await?;
    Ok(success::Success::empty())
}
