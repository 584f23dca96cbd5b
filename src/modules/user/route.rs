use actix_web::web::{ServiceConfig, scope};

use crate::modules::user::handle::*;

pub fn public_api_configure(cfg: &mut ServiceConfig) {
    cfg.service(scope("/auth").service(register).service(login));
}

pub fn configure(cfg: &mut ServiceConfig) {
    cfg.service(scope("/users").service(get_me).service(update_me).service(get_user));
}
