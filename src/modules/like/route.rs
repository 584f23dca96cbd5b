use actix_web::web::{ServiceConfig, scope};

use crate::modules::like::handle::*;

pub fn configure(cfg: &mut ServiceConfig) {
    cfg.service(
        scope("/likes")
            .service(toggle_post_like)
            .service(toggle_comment_like)
            .service(get_post_likes),
    );
}
