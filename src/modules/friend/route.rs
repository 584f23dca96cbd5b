use actix_web::web::{ServiceConfig, scope};

use crate::modules::friend::handle::*;

pub fn configure(cfg: &mut ServiceConfig) {
    // /requests must register before /{user_id}
    cfg.service(
        scope("/friends")
            .service(get_friend_requests)
            .service(send_friend_request)
            .service(respond_friend_request)
            .service(get_friends)
            .service(delete_friendship),
    );
}
