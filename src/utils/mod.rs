use actix_web::{FromRequest, web};
use argon2::{
    Argon2, PasswordVerifier,
    password_hash::{Error as PasswordHashError, PasswordHash, PasswordHasher, SaltString},
};
use futures_util::future::LocalBoxFuture;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use rand::rngs::OsRng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::api::error;

lazy_static::lazy_static! {
    static ref ARGON2: Argon2<'static> = Argon2::default();
}

pub fn hash_password(password: &str) -> Result<String, error::SystemError> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = ARGON2.hash_password(password.as_bytes(), &salt)?;
    Ok(hash.to_string())
}

pub fn verify_password(hash: &str, password: &str) -> Result<bool, error::SystemError> {
    let parsed_hash = PasswordHash::new(hash)?;
    match ARGON2.verify_password(password.as_bytes(), &parsed_hash) {
        Ok(_) => Ok(true),
        Err(PasswordHashError::Password) => Ok(false),
        Err(e) => Err(error::SystemError::HashError(e)),
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub email: String,
    pub iat: u64,
    pub exp: u64,
}

impl Claims {
    pub fn new(sub: &Uuid, email: &str, exp: u64) -> Self {
        let now = chrono::Utc::now().timestamp() as u64;
        Claims { sub: *sub, email: email.to_string(), iat: now, exp: now + exp }
    }

    pub fn encode(&self, secret: &[u8]) -> Result<String, error::SystemError> {
        let header = Header::new(Algorithm::HS256);
        let token = encode(&header, self, &EncodingKey::from_secret(secret))?;
        Ok(token)
    }

    pub fn decode(token: &str, secret: &[u8]) -> Result<Self, error::SystemError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.validate_nbf = false;
        let token_data = decode::<Self>(token, &DecodingKey::from_secret(secret), &validation)?;
        Ok(token_data.claims)
    }
}

/// Ownership policy check used by every mutate/delete path: the actor must
/// be the resource owner or one of the extra grantees.
pub fn ensure_can_modify(
    actor: &Uuid,
    owner: &Uuid,
    extra_grantees: &[Uuid],
) -> Result<(), error::SystemError> {
    if actor == owner || extra_grantees.contains(actor) {
        return Ok(());
    }
    Err(error::SystemError::forbidden("You are not authorized to perform this action"))
}

/// Page/limit query parameters shared by every list endpoint. `page` is
/// 1-based; `limit` is clamped to 1..=100 with a per-resource default.
#[derive(Debug, Clone, Copy, Deserialize, Validate)]
pub struct PageQuery {
    #[validate(range(min = 1, message = "Page must be a positive number"))]
    pub page: Option<u32>,
    #[validate(range(min = 1, max = 100, message = "Limit must be between 1 and 100"))]
    pub limit: Option<u32>,
}

impl PageQuery {
    pub fn resolve(&self, default_limit: u32) -> (u32, u32) {
        let page = self.page.unwrap_or(1).max(1);
        let limit = self.limit.unwrap_or(default_limit).clamp(1, 100);
        (page, limit)
    }

    pub fn offset(page: u32, limit: u32) -> i64 {
        (page as i64 - 1) * limit as i64
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page: u32,
    pub limit: u32,
    pub total_pages: u32,
    pub total_items: i64,
}

impl Pagination {
    pub fn new(page: u32, limit: u32, total_items: i64) -> Self {
        let total_pages = ((total_items.max(0) as u64).div_ceil(limit as u64)) as u32;
        Pagination { page, limit, total_pages, total_items }
    }
}

pub struct ValidatedJson<T>(pub T);

impl<T> FromRequest for ValidatedJson<T>
where
    T: Validate + serde::de::DeserializeOwned + 'static,
{
    type Error = error::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(
        req: &actix_web::HttpRequest,
        payload: &mut actix_web::dev::Payload,
    ) -> Self::Future {
        let fut = web::Json::<T>::from_request(req, payload);

        Box::pin(async move {
            let json = fut.await.map_err(|e| error::Error::bad_request(e.to_string()))?;
            let model = json.into_inner();
            model.validate()?;
            Ok(ValidatedJson(model))
        })
    }
}

pub struct ValidatedQuery<T>(pub T);

impl<T> FromRequest for ValidatedQuery<T>
where
    T: Validate + serde::de::DeserializeOwned + 'static,
{
    type Error = error::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(
        req: &actix_web::HttpRequest,
        payload: &mut actix_web::dev::Payload,
    ) -> Self::Future {
        let fut = web::Query::<T>::from_request(req, payload);

        Box::pin(async move {
            let query = fut.await.map_err(|e| error::Error::bad_request(e.to_string()))?;
            query.validate()?;
            Ok(ValidatedQuery(query.into_inner()))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn password_roundtrip() {
        let hash = hash_password("Sup3rSecret").unwrap();
        assert!(verify_password(&hash, "Sup3rSecret").unwrap());
        assert!(!verify_password(&hash, "wrong").unwrap());
    }

    #[test]
    fn claims_roundtrip() {
        let id = Uuid::new_v7(uuid::Timestamp::now(uuid::NoContext));
        let claims = Claims::new(&id, "a@b.com", 3600);
        let token = claims.encode(b"test-secret").unwrap();
        let decoded = Claims::decode(&token, b"test-secret").unwrap();
        assert_eq!(decoded.sub, id);
        assert_eq!(decoded.email, "a@b.com");
    }

    #[test]
    fn claims_reject_wrong_secret() {
        let id = Uuid::new_v7(uuid::Timestamp::now(uuid::NoContext));
        let token = Claims::new(&id, "a@b.com", 3600).encode(b"secret-a").unwrap();
        assert!(Claims::decode(&token, b"secret-b").is_err());
    }

    #[test]
    fn policy_check_owner_and_grantees() {
        let owner = Uuid::new_v7(uuid::Timestamp::now(uuid::NoContext));
        let grantee = Uuid::new_v7(uuid::Timestamp::now(uuid::NoContext));
        let stranger = Uuid::new_v7(uuid::Timestamp::now(uuid::NoContext));

        assert!(ensure_can_modify(&owner, &owner, &[]).is_ok());
        assert!(ensure_can_modify(&grantee, &owner, &[grantee]).is_ok());
        assert!(matches!(
            ensure_can_modify(&stranger, &owner, &[grantee]),
            Err(error::SystemError::Forbidden(_))
        ));
    }

    #[test]
    fn pagination_math() {
        assert_eq!(
            Pagination::new(1, 10, 25),
            Pagination { page: 1, limit: 10, total_pages: 3, total_items: 25 }
        );
        assert_eq!(Pagination::new(1, 10, 0).total_pages, 0);
        assert_eq!(Pagination::new(1, 20, 20).total_pages, 1);
    }

    #[test]
    fn page_query_defaults_and_clamping() {
        let q = PageQuery { page: None, limit: None };
        assert_eq!(q.resolve(10), (1, 10));

        let q = PageQuery { page: Some(3), limit: Some(500) };
        assert_eq!(q.resolve(20), (3, 100));

        assert_eq!(PageQuery::offset(3, 10), 20);
        assert_eq!(PageQuery::offset(1, 10), 0);
    }
}
