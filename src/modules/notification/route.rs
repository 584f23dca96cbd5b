use actix_web::web::{ServiceConfig, scope};

use crate::modules::notification::handle::*;

pub fn configure(cfg: &mut ServiceConfig) {
    // /read/all before the {notification_id} matcher
    cfg.service(
        scope("/notifications")
            .service(get_notifications)
            .service(mark_all_read)
            .service(mark_read),
    );
}
