//! Password hashing with bcrypt

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PasswordError {
    #[error("Hash error: {0}")]
    HashError(String),
}

pub struct PasswordService;

impl PasswordService {
    pub fn hash(password: &str) -> Result<String, PasswordError> {
        Self::hash_with_cost(password, bcrypt::DEFAULT_COST)
    }

    pub fn hash_with_cost(password: &str, cost: u32) -> Result<String, PasswordError> {
        bcrypt::hash(password, cost).map_err(|e| PasswordError::HashError(e.to_string()))
    }

    /// `Ok(false)` on mismatch; `Err` only when the stored hash is unreadable
    pub fn verify(password: &str, hash: &str) -> Result<bool, PasswordError> {
        bcrypt::verify(password, hash).map_err(|e| PasswordError::HashError(e.to_string()))
    }
}
