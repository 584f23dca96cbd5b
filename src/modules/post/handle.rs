use actix_web::{HttpRequest, delete, get, patch, post, web};
use uuid::Uuid;

use crate::{
    api::{error, success},
    middlewares::get_claims,
    modules::{
        comment::repository_pg::CommentRepositoryPg,
        post::{
            model::{
                CreatePostBody, PostDetailResponse, PostListResponse, PostResponse,
                UpdatePostBody,
            },
            repository_pg::PostRepositoryPg,
            service::PostService,
        },
    },
    utils::{PageQuery, ValidatedJson, ValidatedQuery},
};

pub type PostSvc = PostService<PostRepositoryPg, CommentRepositoryPg>;

#[get("")]
pub async fn get_posts(
    post_service: web::Data<PostSvc>,
    query: ValidatedQuery<PageQuery>,
) -> Result<success::Success<PostListResponse>, error::Error> {
    let (page, limit) = query.0.resolve(10);
    let list = post_service.get_posts(page, limit).await?;
    Ok(success::Success::ok(list))
}

#[get("/{id}")]
pub async fn get_post(
    post_service: web::Data<PostSvc>,
    post_id: web::Path<Uuid>,
) -> Result<success::Success<PostDetailResponse>, error::Error> {
    let post = post_service.get_post(post_id.into_inner()).await?;
    Ok(success::Success::ok(post))
}

#[post("")]
pub async fn create_post(
    post_service: web::Data<PostSvc>,
    body: ValidatedJson<CreatePostBody>,
    req: HttpRequest,
) -> Result<success::Success<PostResponse>, error::Error> {
    let author_id = get_claims(&req)?.sub;
    let post = post_service.create_post(author_id, body.0).await?;
    Ok(success::Success::created(post))
}

#[patch("/{id}")]
pub async fn update_post(
    post_service: web::Data<PostSvc>,
    post_id: web::Path<Uuid>,
    body: ValidatedJson<UpdatePostBody>,
    req: HttpRequest,
) -> Result<success::Success<PostResponse>, error::Error> {
    let actor_id = get_claims(&req)?.sub;
    let post = post_service.update_post(actor_id, post_id.into_inner(), body.0).await?;
    Ok(success::Success::ok(post))
}

#[delete("/{id}")]
pub async fn delete_post(
    post_service: web::Data<PostSvc>,
    post_id: web::Path<Uuid>,
    req: HttpRequest,
) -> Result<success::Success<()>, error::Error> {
    let actor_id = get_claims(&req)?.sub;
    post_service.delete_post(actor_id, post_id.into_inner()).await?;
    Ok(success::Success::empty())
}
