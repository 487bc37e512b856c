use std::sync::Arc;

use crate::database::{NewUser, UpdateSet, UserRepository};
use crate::dto::auth_dto::{LoginPayload, RegisterPayload, UpdateProfilePayload};
use crate::error::{Error, Result};
use crate::models::user::{Role, UserProfile};
use crate::utils::crypto::{hash_password, verify_password};
use crate::utils::token::{self, Claims};

#[derive(Clone)]
pub struct AuthService {
    users: Arc<dyn UserRepository>,
    jwt_secret: String,
}

impl AuthService {
    pub fn new(users: Arc<dyn UserRepository>, jwt_secret: String) -> Self {
        Self { users, jwt_secret }
    }

    /// Creates the account and returns its generated id.
    pub async fn register(&self, payload: RegisterPayload) -> Result<u64> {
        let role: Role = payload.role.parse().map_err(Error::BadRequest)?;
        let password_hash = hash_password(&payload.password).await?;
        let id = self
            .users
            .insert(NewUser {
                username: payload.username,
                email: payload.email,
                password_hash,
                role,
            })
            .await?;

        tracing::info!(user_id = id, "account created");
        Ok(id)
    }

    /// Checks credentials and returns a signed session token.
    pub async fn login(&self, payload: LoginPayload) -> Result<String> {
        let Some(user) = self.users.find_by_email(&payload.email).await? else {
            tracing::info!(email = %payload.email, "login for unknown email");
            return Err(Error::NotFound("User not found".into()));
        };

        if !verify_password(&payload.password, &user.password_hash).await? {
            tracing::warn!(user_id = user.id, "login rejected: invalid password");
            return Err(Error::Unauthorized("Invalid password".into()));
        }

        let claims = Claims::new(user.id, &user.username, &user.email);
        token::issue(&claims, &self.jwt_secret)
    }

    pub async fn profile(&self, id: u64) -> Result<UserProfile> {
        self.users
            .find_profile(id)
            .await?
            .ok_or_else(|| Error::NotFound("User not found".into()))
    }

    /// Applies whichever of username, email, role and password were supplied.
    pub async fn update_profile(&self, id: u64, payload: UpdateProfilePayload) -> Result<()> {
        let password_hash = match payload.password {
            Some(ref password) => Some(hash_password(password).await?),
            None => None,
        };

        let changes = UpdateSet::new()
            .set("username", payload.username)
            .set("email", payload.email)
            .set("role", payload.role)
            .set("password_hash", password_hash)
            .require_fields()?;
        tracing::debug!(user_id = id, columns = ?changes.columns(), "updating profile");

        self.users.update(id, changes).await?;
        Ok(())
    }

    /// Current role as stored; `None` if the user no longer exists.
    pub async fn current_role(&self, id: u64) -> Result<Option<Role>> {
        self.users.find_role(id).await
    }
}
