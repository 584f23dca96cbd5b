use actix_web::web::{ServiceConfig, scope};

use crate::modules::comment::handle::*;

pub fn configure(cfg: &mut ServiceConfig) {
    cfg.service(
        scope("/comments")
            .service(get_comments_by_post)
            .service(create_comment)
            .service(update_comment)
            .service(delete_comment),
    );
}
