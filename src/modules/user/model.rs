use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::prelude::FromRow;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::modules::user::schema::UserEntity;

/// Public view of a user, password hash omitted.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: Uuid,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: Option<NaiveDate>,
    pub profile_pic: Option<String>,
    pub bio: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<UserEntity> for UserResponse {
    fn from(user: UserEntity) -> Self {
        UserResponse {
            id: user.id,
            email: user.email,
            first_name: user.first_name,
            last_name: user.last_name,
            date_of_birth: user.date_of_birth,
            profile_pic: user.profile_pic,
            bio: user.bio,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

/// Short user view embedded in posts, comments, likes and conversations.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub profile_pic: Option<String>,
}

impl From<UserEntity> for UserSummary {
    fn from(user: UserEntity) -> Self {
        UserSummary {
            id: user.id,
            first_name: user.first_name,
            last_name: user.last_name,
            profile_pic: user.profile_pic,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterBody {
    #[validate(
        email(message = "Invalid email format"),
        length(min = 5, max = 255, message = "Email must be between 5 and 255 characters")
    )]
    pub email: String,
    #[validate(
        length(min = 8, max = 100, message = "Password must be between 8 and 100 characters"),
        custom(function = validate_password_strength)
    )]
    pub password: String,
    #[validate(custom(function = validate_person_name))]
    pub first_name: String,
    #[validate(custom(function = validate_person_name))]
    pub last_name: String,
    pub date_of_birth: Option<NaiveDate>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct LoginBody {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = validate_update_has_field))]
pub struct UpdateProfileBody {
    #[validate(custom(function = validate_person_name))]
    pub first_name: Option<String>,
    #[validate(custom(function = validate_person_name))]
    pub last_name: Option<String>,
    #[validate(length(max = 500, message = "Bio cannot exceed 500 characters"))]
    pub bio: Option<String>,
    #[validate(url(message = "Invalid URL"))]
    pub profile_pic: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AuthResponse {
    pub user: UserResponse,
    pub token: String,
}

#[derive(Debug, Clone)]
pub struct InsertUser {
    pub email: String,
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: Option<NaiveDate>,
}

fn validate_password_strength(password: &str) -> Result<(), ValidationError> {
    let has_lower = password.chars().any(|c| c.is_ascii_lowercase());
    let has_upper = password.chars().any(|c| c.is_ascii_uppercase());
    let has_digit = password.chars().any(|c| c.is_ascii_digit());
    if has_lower && has_upper && has_digit {
        return Ok(());
    }
    let mut err = ValidationError::new("password_strength");
    err.message = Some(
        "Password must contain at least one uppercase letter, one lowercase letter, and one number"
            .into(),
    );
    Err(err)
}

fn validate_person_name(name: &str) -> Result<(), ValidationError> {
    let len = name.chars().count();
    let charset_ok =
        name.chars().all(|c| c.is_alphabetic() || c == ' ' || c == '-' || c == '\'');
    if (2..=50).contains(&len) && charset_ok {
        return Ok(());
    }
    let mut err = ValidationError::new("person_name");
    err.message = Some(
        "Name must be 2-50 characters of letters, spaces, hyphens, and apostrophes".into(),
    );
    Err(err)
}

fn validate_update_has_field(body: &UpdateProfileBody) -> Result<(), ValidationError> {
    if body.first_name.is_some()
        || body.last_name.is_some()
        || body.bio.is_some()
        || body.profile_pic.is_some()
    {
        return Ok(());
    }
    let mut err = ValidationError::new("empty_update");
    err.message = Some("At least one field must be provided for update".into());
    Err(err)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn register_body(password: &str) -> RegisterBody {
        RegisterBody {
            email: "ada@example.com".to_string(),
            password: password.to_string(),
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            date_of_birth: None,
        }
    }

    #[test]
    fn register_accepts_strong_password() {
        assert!(register_body("Passw0rd").validate().is_ok());
    }

    #[test]
    fn register_rejects_weak_passwords() {
        assert!(register_body("alllowercase1").validate().is_err());
        assert!(register_body("NODIGITSHERE").validate().is_err());
        assert!(register_body("Sh0rt").validate().is_err());
    }

    #[test]
    fn register_rejects_bad_names() {
        let mut body = register_body("Passw0rd");
        body.first_name = "A".to_string();
        assert!(body.validate().is_err());

        let mut body = register_body("Passw0rd");
        body.last_name = "Name_123".to_string();
        assert!(body.validate().is_err());

        let mut body = register_body("Passw0rd");
        body.last_name = "O'Brien-Smith".to_string();
        assert!(body.validate().is_ok());
    }

    #[test]
    fn update_requires_at_least_one_field() {
        let empty = UpdateProfileBody {
            first_name: None,
            last_name: None,
            bio: None,
            profile_pic: None,
        };
        assert!(empty.validate().is_err());

        let some = UpdateProfileBody {
            first_name: None,
            last_name: None,
            bio: Some("hello".to_string()),
            profile_pic: None,
        };
        assert!(some.validate().is_ok());
    }
}
