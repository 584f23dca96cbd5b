use actix_cors::Cors;
use actix_web::{
    self, App, HttpServer,
    middleware::{Logger, from_fn},
    web,
};
use std::sync::{Arc, LazyLock};

use crate::{
    configs::connect_database,
    middlewares::authentication,
    modules::{
        comment::{repository_pg::CommentRepositoryPg, service::CommentService},
        friend::{repository_pg::FriendRepositoryPg, service::FriendService},
        like::{repository_pg::LikeRepositoryPg, service::LikeService},
        message::{repository_pg::MessageRepositoryPg, service::MessageService},
        notification::{repository_pg::NotificationRepositoryPg, service::NotificationService},
        post::{repository_pg::PostRepositoryPg, service::PostService},
        user::{repository_pg::UserRepositoryPg, service::UserService},
    },
};

mod api;
mod configs;
mod constants;
mod middlewares;
mod modules;
mod utils;

pub static ENV: LazyLock<constants::Env> = LazyLock::new(|| {
    dotenvy::dotenv().ok();
    env_logger::init();
    log::info!("Environment variables loaded from .env file");
    constants::Env::default()
});

#[actix_web::get("/")]
async fn health_check() -> &'static str {
    "Server is running"
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let db_pool =
        connect_database().await.map_err(|_| std::io::Error::other("Database connection error"))?;

    let user_repo = Arc::new(UserRepositoryPg::new(db_pool.clone()));
    let post_repo = Arc::new(PostRepositoryPg::new(db_pool.clone()));
    let comment_repo = Arc::new(CommentRepositoryPg::new(db_pool.clone()));
    let like_repo = Arc::new(LikeRepositoryPg::new(db_pool.clone()));
    let friend_repo = Arc::new(FriendRepositoryPg::new(db_pool.clone()));
    let message_repo = Arc::new(MessageRepositoryPg::new(db_pool.clone()));
    let notification_repo = Arc::new(NotificationRepositoryPg::new(db_pool.clone()));

    let user_service = UserService::with_dependencies(user_repo.clone());
    let post_service = PostService::with_dependencies(post_repo.clone(), comment_repo.clone());
    let comment_service = CommentService::with_dependencies(
        comment_repo.clone(),
        post_repo.clone(),
        user_repo.clone(),
        notification_repo.clone(),
    );
    let like_service = LikeService::with_dependencies(
        like_repo,
        post_repo,
        comment_repo,
        user_repo.clone(),
        notification_repo.clone(),
    );
    let friend_service =
        FriendService::with_dependencies(friend_repo, user_repo.clone(), notification_repo.clone());
    let message_service =
        MessageService::with_dependencies(message_repo, user_repo, notification_repo.clone());
    let notification_service = NotificationService::with_dependencies(notification_repo);

    println!("Starting server at http://{}:{}", ENV.ip.as_str(), ENV.port);
    let pool = db_pool.clone();
    HttpServer::new(move || {
        let cors = Cors::default()
            .allowed_origin(ENV.frontend_url.as_str())
            .allowed_methods(vec!["GET", "POST", "PATCH", "DELETE", "OPTIONS"])
            .allow_any_header()
            .supports_credentials()
            .max_age(3600);

        App::new()
            .wrap(Logger::default())
            .wrap(cors)
            .app_data(web::Data::new(user_service.clone()))
            .app_data(web::Data::new(post_service.clone()))
            .app_data(web::Data::new(comment_service.clone()))
            .app_data(web::Data::new(like_service.clone()))
            .app_data(web::Data::new(friend_service.clone()))
            .app_data(web::Data::new(message_service.clone()))
            .app_data(web::Data::new(notification_service.clone()))
            .app_data(web::Data::new(db_pool.clone()))
            .service(health_check)
            .service(
                web::scope("/api").configure(modules::user::route::public_api_configure).service(
                    web::scope("")
                        .wrap(from_fn(authentication))
                        .configure(modules::user::route::configure)
                        .configure(modules::post::route::configure)
                        .configure(modules::comment::route::configure)
                        .configure(modules::like::route::configure)
                        .configure(modules::friend::route::configure)
                        .configure(modules::message::route::configure)
                        .configure(modules::notification::route::configure),
                ),
            )
    })
    .bind((ENV.ip.as_str(), ENV.port))?
    .workers(2)
    .run()
    .await?;

    pool.close().await;
    Ok(())
}
