use actix_web::web::{ServiceConfig, scope};

use crate::modules::post::handle::*;

pub fn configure(cfg: &mut ServiceConfig) {
    cfg.service(
        scope("/posts")
            .service(get_posts)
            .service(create_post)
            .service(get_post)
            .service(update_post)
            .service(delete_post),
    );
}
