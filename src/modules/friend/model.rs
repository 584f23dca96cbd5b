use serde::{Deserialize, Serialize};
use sqlx::prelude::FromRow;
use uuid::Uuid;
use validator::Validate;

use crate::modules::friend::schema::FriendStatus;
use crate::modules::user::model::UserSummary;

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SendFriendRequestBody {
    pub user_id: Uuid,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RespondFriendRequestBody {
    pub status: FriendStatus,
}

/// Request joined with the counterpart's user columns.
#[derive(Debug, Clone, FromRow)]
pub struct FriendRequestRow {
    pub req_id: Uuid,
    pub status: FriendStatus,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub user_id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub profile_pic: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FriendRequestView {
    pub id: Uuid,
    pub status: FriendStatus,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub user: UserSummary,
}

impl From<FriendRequestRow> for FriendRequestView {
    fn from(row: FriendRequestRow) -> Self {
        FriendRequestView {
            id: row.req_id,
            status: row.status,
            created_at: row.created_at,
            user: UserSummary {
                id: row.user_id,
                first_name: row.first_name,
                last_name: row.last_name,
                profile_pic: row.profile_pic,
            },
        }
    }
}

/// Pending requests addressed to the user plus everything the user sent.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FriendRequestsResponse {
    pub received: Vec<FriendRequestView>,
    pub sent: Vec<FriendRequestView>,
}

#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct FriendResponse {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub profile_pic: Option<String>,
    pub bio: Option<String>,
}
