use serde::{Deserialize, Serialize};
use sqlx::prelude::FromRow;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::modules::comment::model::CommentResponse;
use crate::modules::user::model::UserSummary;
use crate::utils::Pagination;

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreatePostBody {
    #[validate(length(min = 1, max = 5000, message = "Content must be 1-5000 characters"))]
    pub content: String,
    #[validate(url(message = "Invalid URL"))]
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = validate_update_has_field))]
pub struct UpdatePostBody {
    #[validate(length(min = 1, max = 5000, message = "Content must be 1-5000 characters"))]
    pub content: Option<String>,
    #[validate(url(message = "Invalid URL"))]
    pub image_url: Option<String>,
}

fn validate_update_has_field(body: &UpdatePostBody) -> Result<(), ValidationError> {
    if body.content.is_some() || body.image_url.is_some() {
        return Ok(());
    }
    let mut err = ValidationError::new("empty_update");
    err.message = Some("At least one field (content or imageUrl) must be provided".into());
    Err(err)
}

/// Feed row: post columns plus the author columns and aggregate counts,
/// flattened into one SELECT.
#[derive(Debug, Clone, FromRow)]
pub struct PostRow {
    pub id: Uuid,
    pub content: String,
    pub image_url: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
    pub author_id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub profile_pic: Option<String>,
    pub comment_count: i64,
    pub like_count: i64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostResponse {
    pub id: Uuid,
    pub content: String,
    pub image_url: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
    pub author: UserSummary,
    pub comment_count: i64,
    pub like_count: i64,
}

impl From<PostRow> for PostResponse {
    fn from(row: PostRow) -> Self {
        PostResponse {
            id: row.id,
            content: row.content,
            image_url: row.image_url,
            created_at: row.created_at,
            updated_at: row.updated_at,
            author: UserSummary {
                id: row.author_id,
                first_name: row.first_name,
                last_name: row.last_name,
                profile_pic: row.profile_pic,
            },
            comment_count: row.comment_count,
            like_count: row.like_count,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostListResponse {
    pub posts: Vec<PostResponse>,
    pub pagination: Pagination,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostDetailResponse {
    pub id: Uuid,
    pub content: String,
    pub image_url: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
    pub author: UserSummary,
    pub comments: Vec<CommentResponse>,
    pub like_count: i64,
}
