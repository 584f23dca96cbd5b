use std::sync::Arc;

use uuid::Uuid;

use crate::ENV;
use crate::api::error;
use crate::modules::user::model::{
    AuthResponse, InsertUser, LoginBody, RegisterBody, UpdateProfileBody, UserResponse,
};
use crate::modules::user::repository::UserRepository;
use crate::utils::{Claims, hash_password, verify_password};

#[derive(Clone)]
pub struct UserService<U>
where
    U: UserRepository + Send + Sync,
{
    user_repo: Arc<U>,
}

impl<U> UserService<U>
where
    U: UserRepository + Send + Sync,
{
    pub fn with_dependencies(user_repo: Arc<U>) -> Self {
        UserService { user_repo }
    }

    pub async fn register(&self, body: RegisterBody) -> Result<AuthResponse, error::SystemError> {
        if self.user_repo.find_by_email(&body.email).await?.is_some() {
            return Err(error::SystemError::conflict("User with this email already exists"));
        }

        let password_hash = hash_password(&body.password)?;
        let user = self
            .user_repo
            .create(&InsertUser {
                email: body.email,
                password_hash,
                first_name: body.first_name,
                last_name: body.last_name,
                date_of_birth: body.date_of_birth,
            })
            .await?;

        let token =
            Claims::new(&user.id, &user.email, ENV.token_expiration).encode(ENV.jwt_secret.as_ref())?;

        Ok(AuthResponse { user: UserResponse::from(user), token })
    }

    pub async fn login(&self, body: LoginBody) -> Result<AuthResponse, error::SystemError> {
        let user = self
            .user_repo
            .find_by_email(&body.email)
            .await?
            .ok_or_else(|| error::SystemError::unauthorized("Invalid credentials"))?;

        if !verify_password(&user.password_hash, &body.password)? {
            return Err(error::SystemError::unauthorized("Invalid credentials"));
        }

        let token =
            Claims::new(&user.id, &user.email, ENV.token_expiration).encode(ENV.jwt_secret.as_ref())?;

        Ok(AuthResponse { user: UserResponse::from(user), token })
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<UserResponse, error::SystemError> {
        let user = self
            .user_repo
            .find_by_id(&id)
            .await?
            .ok_or_else(|| error::SystemError::not_found("User not found"))?;
        Ok(UserResponse::from(user))
    }

    pub async fn update_profile(
        &self,
        id: Uuid,
        body: UpdateProfileBody,
    ) -> Result<UserResponse, error::SystemError> {
        // Existence check first so an unknown id reads as 404, not 500
        if self.user_repo.find_by_id(&id).await?.is_none() {
            return Err(error::SystemError::not_found("User not found"));
        }
        let user = self.user_repo.update_profile(&id, &body).await?;
        Ok(UserResponse::from(user))
    }
}
