pub mod comment;
pub mod friend;
pub mod like;
pub mod message;
pub mod notification;
pub mod post;
pub mod user;
