use actix_web::{HttpRequest, get, post, web};
use uuid::Uuid;

use crate::{
    api::{error, success},
    middlewares::get_claims,
    modules::{
        message::{
            model::{ConversationPageResponse, ConversationSummary, SendMessageBody},
            repository_pg::MessageRepositoryPg,
            schema::MessageEntity,
            service::MessageService,
        },
        notification::repository_pg::NotificationRepositoryPg,
        user::repository_pg::UserRepositoryPg,
    },
    utils::{PageQuery, ValidatedJson, ValidatedQuery},
};

pub type MessageSvc =
    MessageService<MessageRepositoryPg, UserRepositoryPg, NotificationRepositoryPg>;

#[get("")]
pub async fn get_conversations(
    message_service: web::Data<MessageSvc>,
    req: HttpRequest,
) -> Result<success::Success<Vec<ConversationSummary>>, error::Error> {
    let actor_id = get_claims(&req)?.sub;
    let conversations = message_service.get_conversations(actor_id).await?;
    Ok(success::Success::ok(conversations))
}

#[get("/{user_id}")]
pub async fn get_conversation(
    message_service: web::Data<MessageSvc>,
    user_id: web::Path<Uuid>,
    query: ValidatedQuery<PageQuery>,
    req: HttpRequest,
) -> Result<success::Success<ConversationPageResponse>, error::Error> {
    let actor_id = get_claims(&req)?.sub;
    let (page, limit) = query.0.resolve(20);
    let conversation =
        message_service.get_conversation(actor_id, user_id.into_inner(), page, limit).await?;
    Ok(success::Success::ok(conversation))
}

#[post("")]
pub async fn send_message(
    message_service: web::Data<MessageSvc>,
    body: ValidatedJson<SendMessageBody>,
    req: HttpRequest,
) -> Result<success::Success<MessageEntity>, error::Error> {
    let sender_id = get_claims(&req)?.sub;
    let message = message_service.send_message(sender_id, body.0).await?;
    Ok(success::Success::created(message))
}
