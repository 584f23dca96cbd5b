use actix_web::{HttpRequest, delete, get, patch, post, web};
use uuid::Uuid;

use crate::{
    api::{error, success},
    middlewares::get_claims,
    modules::{
        comment::{
            model::{
                CommentListResponse, CommentResponse, CreateCommentBody, UpdateCommentBody,
            },
            repository_pg::CommentRepositoryPg,
            service::CommentService,
        },
        notification::repository_pg::NotificationRepositoryPg,
        post::repository_pg::PostRepositoryPg,
        user::repository_pg::UserRepositoryPg,
    },
    utils::{PageQuery, ValidatedJson, ValidatedQuery},
};

pub type CommentSvc =
    CommentService<CommentRepositoryPg, PostRepositoryPg, UserRepositoryPg, NotificationRepositoryPg>;

#[get("/post/{post_id}")]
pub async fn get_comments_by_post(
    comment_service: web::Data<CommentSvc>,
    post_id: web::Path<Uuid>,
    query: ValidatedQuery<PageQuery>,
) -> Result<success::Success<CommentListResponse>, error::Error> {
    let (page, limit) = query.0.resolve(10);
    let list = comment_service.get_comments_by_post(post_id.into_inner(), page, limit).await?;
    Ok(success::Success::ok(list))
}

#[post("")]
pub async fn create_comment(
    comment_service: web::Data<CommentSvc>,
    body: ValidatedJson<CreateCommentBody>,
    req: HttpRequest,
) -> Result<success::Success<CommentResponse>, error::Error> {
    let author_id = get_claims(&req)?.sub;
    let comment = comment_service.create_comment(author_id, body.0).await?;
    Ok(success::Success::created(comment))
}

#[patch("/{id}")]
pub async fn update_comment(
    comment_service: web::Data<CommentSvc>,
    comment_id: web::Path<Uuid>,
    body: ValidatedJson<UpdateCommentBody>,
    req: HttpRequest,
) -> Result<success::Success<CommentResponse>, error::Error> {
    let actor_id = get_claims(&req)?.sub;
    let comment =
        comment_service.update_comment(actor_id, comment_id.into_inner(), body.0).await?;
    Ok(success::Success::ok(comment))
}

#[delete("/{id}")]
pub async fn delete_comment(
    comment_service: web::Data<CommentSvc>,
    comment_id: web::Path<Uuid>,
    req: HttpRequest,
) -> Result<success::Success<()>, error::Error> {
    let actor_id = get_claims(&req)?.sub;
    comment_service.delete_comment(actor_id, comment_id.into_inner()).await?;
    Ok(success::Success::empty())
}
