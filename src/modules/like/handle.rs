use actix_web::{HttpRequest, get, post, web};
use uuid::Uuid;

use crate::{
    api::{error, success},
    middlewares::get_claims,
    modules::{
        comment::repository_pg::CommentRepositoryPg,
        like::{model::LikeStatusResponse, repository_pg::LikeRepositoryPg, service::LikeService},
        notification::repository_pg::NotificationRepositoryPg,
        post::repository_pg::PostRepositoryPg,
        user::{model::UserSummary, repository_pg::UserRepositoryPg},
    },
};

pub type LikeSvc = LikeService<
    LikeRepositoryPg,
    PostRepositoryPg,
    CommentRepositoryPg,
    UserRepositoryPg,
    NotificationRepositoryPg,
>;

#[post("/post/{post_id}")]
pub async fn toggle_post_like(
    like_service: web::Data<LikeSvc>,
    post_id: web::Path<Uuid>,
    req: HttpRequest,
) -> Result<success::Success<LikeStatusResponse>, error::Error> {
    let actor_id = get_claims(&req)?.sub;
    let status = like_service.toggle_post_like(actor_id, post_id.into_inner()).await?;
    Ok(success::Success::ok(status))
}

#[post("/comment/{comment_id}")]
pub async fn toggle_comment_like(
    like_service: web::Data<LikeSvc>,
    comment_id: web::Path<Uuid>,
    req: HttpRequest,
) -> Result<success::Success<LikeStatusResponse>, error::Error> {
    let actor_id = get_claims(&req)?.sub;
    let status = like_service.toggle_comment_like(actor_id, comment_id.into_inner()).await?;
    Ok(success::Success::ok(status))
}

#[get("/post/{post_id}")]
pub async fn get_post_likes(
    like_service: web::Data<LikeSvc>,
    post_id: web::Path<Uuid>,
) -> Result<success::Success<Vec<UserSummary>>, error::Error> {
    let likers = like_service.get_post_likes(post_id.into_inner()).await?;
    Ok(success::Success::ok(likers))
}
