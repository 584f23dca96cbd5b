use actix_web::web::{ServiceConfig, scope};

use crate::modules::message::handle::*;

pub fn configure(cfg: &mut ServiceConfig) {
    cfg.service(
        scope("/messages")
            .service(get_conversations)
            .service(send_message)
            .service(get_conversation),
    );
}
