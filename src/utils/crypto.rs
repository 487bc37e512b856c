use crate::error::{Error, Result};

/// Fixed bcrypt work factor for stored password hashes.
pub const HASH_COST: u32 = 10;

pub async fn hash_password(plain: &str) -> Result<String> {
    let plain = plain.to_owned();
    tokio::task::spawn_blocking(move || bcrypt::hash(plain, HASH_COST))
        .await
        .map_err(|e| Error::Internal(format!("Password hashing task failed: {}", e)))?
        .map_err(Error::from)
}

pub async fn verify_password(plain: &str, hashed: &str) -> Result<bool> {
    let plain = plain.to_owned();
    let hashed = hashed.to_owned();
    tokio::task::spawn_blocking(move || bcrypt::verify(plain, &hashed))
        .await
        .map_err(|e| Error::Internal(format!("Password verification task failed: {}", e)))?
        .map_err(Error::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn hash_and_verify() {
        let hashed = hash_password("secret1").await.unwrap();

        assert_ne!(hashed, "secret1");
        assert!(hashed.starts_with("$2b$10$"));
        assert!(verify_password("secret1", &hashed).await.unwrap());
        assert!(!verify_password("secret2", &hashed).await.unwrap());
    }

    #[tokio::test]
    async fn malformed_hash_is_an_error() {
        assert!(verify_password("secret1", "not-a-hash").await.is_err());
    }
}
