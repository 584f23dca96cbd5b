use actix_web::{HttpRequest, get, patch, post, web};
use uuid::Uuid;

use crate::{
    api::{error, success},
    middlewares::get_claims,
    modules::user::{
        model::{AuthResponse, LoginBody, RegisterBody, UpdateProfileBody, UserResponse},
        repository_pg::UserRepositoryPg,
        service::UserService,
    },
    utils::ValidatedJson,
};

pub type UserSvc = UserService<UserRepositoryPg>;

#[post("/register")]
pub async fn register(
    user_service: web::Data<UserSvc>,
    body: ValidatedJson<RegisterBody>,
) -> Result<success::Success<AuthResponse>, error::Error> {
    let response = user_service.register(body.0).await?;
    Ok(success::Success::created(response))
}

#[post("/login")]
pub async fn login(
    user_service: web::Data<UserSvc>,
    body: ValidatedJson<LoginBody>,
) -> Result<success::Success<AuthResponse>, error::Error> {
    let response = user_service.login(body.0).await?;
    Ok(success::Success::ok(response))
}

#[get("/me")]
pub async fn get_me(
    user_service: web::Data<UserSvc>,
    req: HttpRequest,
) -> Result<success::Success<UserResponse>, error::Error> {
    let user_id = get_claims(&req)?.sub;
    let user = user_service.get_by_id(user_id).await?;
    Ok(success::Success::ok(user))
}

#[get("/{id}")]
pub async fn get_user(
    user_service: web::Data<UserSvc>,
    user_id: web::Path<Uuid>,
) -> Result<success::Success<UserResponse>, error::Error> {
    let user = user_service.get_by_id(user_id.into_inner()).await?;
    Ok(success::Success::ok(user))
}

#[patch("/me")]
pub async fn update_me(
    user_service: web::Data<UserSvc>,
    body: ValidatedJson<UpdateProfileBody>,
    req: HttpRequest,
) -> Result<success::Success<UserResponse>, error::Error> {
    let user_id = get_claims(&req)?.sub;
    let user = user_service.update_profile(user_id, body.0).await?;
    Ok(success::Success::ok(user))
}
