use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Session token lifetime.
pub const TOKEN_TTL_HOURS: i64 = 7;

/// Identity carried by a session token and attached to authenticated requests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub id: u64,
    pub username: String,
    pub email: String,
    pub iat: usize,
    pub exp: usize,
}

impl Claims {
    pub fn new(id: u64, username: &str, email: &str) -> Self {
        let now = Utc::now();
        let exp = now + Duration::hours(TOKEN_TTL_HOURS);
        Self {
            id,
            username: username.to_string(),
            email: email.to_string(),
            iat: now.timestamp() as usize,
            exp: exp.timestamp() as usize,
        }
    }
}

pub fn issue(claims: &Claims, secret: &str) -> Result<String> {
    let token = encode(
        &Header::new(Algorithm::HS256),
        claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )?;
    Ok(token)
}

/// Checks signature and expiry.
pub fn verify(token: &str, secret: &str) -> Result<Claims> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_exp = true;
    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )?;
    Ok(data.claims)
}
