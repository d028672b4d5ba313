//! User registration and credential checking.

use hmac::{Hmac, Mac};
use sha2::Sha256;
use std::sync::Arc;

use crate::domain::entities::{NewUser, User};
use crate::domain::repositories::UserRepository;
use crate::error::AppError;
use serde_json::json;

type HmacSha256 = Hmac<Sha256>;

pub const MIN_NAME_LEN: usize = 5;
pub const MIN_PASSWORD_LEN: usize = 5;
pub const MAX_PASSWORD_LEN: usize = 16;

/// Service for user accounts and HTTP basic credentials.
///
/// Passwords are stored as HMAC-SHA256 keyed by `password_secret`. A leaked
/// `users` table is useless without the server-side secret.
///
/// A service built with [`UserService::read_only`] holds no secret: it can
/// look users up but cannot register or authenticate them.
pub struct UserService<R: UserRepository + ?Sized> {
    repository: Arc<R>,
    password_secret: Option<String>,
}

impl<R: UserRepository + ?Sized> UserService<R> {
    /// Creates a new user service.
    ///
    /// `password_secret` must match the value used when existing users registered.
    pub fn new(repository: Arc<R>, password_secret: String) -> Self {
        Self {
            repository,
            password_secret: Some(password_secret),
        }
    }

    /// Creates a service for lookups only, e.g. listing users.
    pub fn read_only(repository: Arc<R>) -> Self {
        Self {
            repository,
            password_secret: None,
        }
    }

    fn mac(&self) -> Result<HmacSha256, AppError> {
        let secret = self.password_secret.as_deref().ok_or_else(|| {
            AppError::internal("Password secret is not configured", json!({}))
        })?;
        HmacSha256::new_from_slice(secret.as_bytes()).map_err(|e| {
            AppError::internal("Password hashing failed", json!({ "reason": e.to_string() }))
        })
    }

    /// Returns the 64-character lowercase hex MAC of `password`.
    fn hash_password(&self, password: &str) -> Result<String, AppError> {
        let mut mac = self.mac()?;
        mac.update(password.as_bytes());
        Ok(hex::encode(mac.finalize().into_bytes()))
    }

    fn verify_password(&self, password: &str, stored_hash: &str) -> Result<bool, AppError> {
        let Ok(expected) = hex::decode(stored_hash) else {
            return Ok(false);
        };
        let mut mac = self.mac()?;
        mac.update(password.as_bytes());
        Ok(mac.verify_slice(&expected).is_ok())
    }

    /// Registers a new user.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the name is shorter than 5 characters
    /// or the password is not 5 to 16 characters long.
    /// Returns [`AppError::Conflict`] if the name is taken.
    /// Returns [`AppError::Internal`] on storage errors or without a secret.
    pub async fn register(&self, name: &str, password: &str) -> Result<User, AppError> {
        if name.chars().count() < MIN_NAME_LEN {
            return Err(AppError::bad_request(
                "Name is too short",
                json!({ "name": ["length"], "min": MIN_NAME_LEN }),
            ));
        }
        let password_len = password.chars().count();
        if !(MIN_PASSWORD_LEN..=MAX_PASSWORD_LEN).contains(&password_len) {
            return Err(AppError::bad_request(
                "Password length is out of range",
                json!({ "password": ["length"], "min": MIN_PASSWORD_LEN, "max": MAX_PASSWORD_LEN }),
            ));
        }

        if self.repository.find_by_name(name).await?.is_some() {
            return Err(AppError::conflict(
                "User already exists",
                json!({ "name": name }),
            ));
        }

        let new_user = NewUser {
            name: name.to_string(),
            password_hash: self.hash_password(password)?,
        };

        self.repository.create(new_user).await
    }

    /// Checks a name/password pair.
    ///
    /// Unknown names and wrong passwords are indistinguishable to the caller.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] if the credentials do not match.
    /// Returns [`AppError::Internal`] on storage errors or without a secret.
    pub async fn authenticate(&self, name: &str, password: &str) -> Result<User, AppError> {
        let invalid = || {
            AppError::unauthorized(
                "Unauthorized",
                json!({ "reason": "Invalid name or password" }),
            )
        };

        let user = self
            .repository
            .find_by_name(name)
            .await?
            .ok_or_else(invalid)?;

        if !self.verify_password(password, &user.password_hash)? {
            return Err(invalid());
        }

        Ok(user)
    }

    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no user has that id.
    /// Returns [`AppError::Internal`] on storage errors.
    pub async fn get(&self, user_id: i64) -> Result<User, AppError> {
        self.repository
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found", json!({ "id": user_id })))
    }

    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    pub async fn list(&self) -> Result<Vec<User>, AppError> {
        self.repository.list().await
    }
}
