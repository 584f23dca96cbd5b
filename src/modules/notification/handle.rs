use actix_web::{HttpRequest, get, patch, web};
use uuid::Uuid;

use crate::{
    api::{error, success},
    middlewares::get_claims,
    modules::notification::{
        model::NotificationListResponse, repository_pg::NotificationRepositoryPg,
        schema::NotificationEntity, service::NotificationService,
    },
    utils::{PageQuery, ValidatedQuery},
};

pub type NotificationSvc = NotificationService<NotificationRepositoryPg>;

#[get("")]
pub async fn get_notifications(
    notification_service: web::Data<NotificationSvc>,
    query: ValidatedQuery<PageQuery>,
    req: HttpRequest,
) -> Result<success::Success<NotificationListResponse>, error::Error> {
    let user_id = get_claims(&req)?.sub;
    let (page, limit) = query.0.resolve(20);
    let list = notification_service.get_notifications(user_id, page, limit).await?;
    Ok(success::Success::ok(list))
}

#[patch("/read/all")]
pub async fn mark_all_read(
    notification_service: web::Data<NotificationSvc>,
    req: HttpRequest,
) -> Result<success::Success<()>, error::Error> {
    let user_id = get_claims(&req)?.sub;
    notification_service.mark_all_read(user_id).await?;
    Ok(success::Success::empty())
}

#[patch("/{notification_id}")]
pub async fn mark_read(
    notification_service: web::Data<NotificationSvc>,
    notification_id: web::Path<Uuid>,
    req: HttpRequest,
) -> Result<success::Success<NotificationEntity>, error::Error> {
    let user_id = get_claims(&req)?.sub;
    let notification =
        notification_service.mark_read(user_id, notification_id.into_inner()).await?;
    Ok(success::Success::ok(notification))
}
