use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::user::UserProfile;
use crate::utils::sanitize::{clean, clean_opt};
use crate::utils::validation::{validate_role, Schema};

fn default_role() -> String {
    "user".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterPayload {
    #[serde(default)]
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,
    #[serde(default)]
    #[validate(email(message = "Invalid email"))]
    pub email: String,
    #[serde(default)]
    #[validate(length(min = 6, message = "Password must contain at least 6 characters"))]
    pub password: String,
    #[serde(default = "default_role")]
    #[validate(custom(function = "validate_role"))]
    pub role: String,
}

impl Schema for RegisterPayload {
    const FIELDS: &'static [&'static str] = &["username", "email", "password", "role"];
}

impl RegisterPayload {
    /// Passwords are hashed, never stored or echoed, so they pass through as typed.
    pub fn sanitized(self) -> Self {
        Self {
            username: clean(&self.username),
            email: clean(&self.email),
            password: self.password,
            role: clean(&self.role),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginPayload {
    #[serde(default)]
    #[validate(email(message = "Invalid email"))]
    pub email: String,
    #[serde(default)]
    #[validate(length(min = 6, message = "Password must contain at least 6 characters"))]
    pub password: String,
}

impl Schema for LoginPayload {
    const FIELDS: &'static [&'static str] = &["email", "password"];
}

impl LoginPayload {
    pub fn sanitized(self) -> Self {
        Self {
            email: clean(&self.email),
            password: self.password,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateProfilePayload {
    #[validate(length(min = 1, message = "Username must not be empty"))]
    pub username: Option<String>,
    #[validate(email(message = "Invalid email"))]
    pub email: Option<String>,
    #[validate(length(min = 6, message = "Password must contain at least 6 characters"))]
    pub password: Option<String>,
    #[validate(custom(function = "validate_role"))]
    pub role: Option<String>,
}

impl Schema for UpdateProfilePayload {
    const FIELDS: &'static [&'static str] = &["username", "email", "password", "role"];
}

impl UpdateProfilePayload {
    pub fn sanitized(self) -> Self {
        Self {
            username: clean_opt(self.username),
            email: clean_opt(self.email),
            password: self.password,
            role: clean_opt(self.role),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterResponse {
    pub message: String,
    pub id: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileResponse {
    pub user: UserProfile,
}
