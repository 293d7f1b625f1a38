//! bcrypt password digests.
//!
//! Hashing is CPU-bound; async callers run these through
//! `tokio::task::spawn_blocking`.

use bcrypt::HashParts;

use crate::errors::ClarioError;

pub const DEFAULT_PASSWORD_COST: u32 = bcrypt::DEFAULT_COST;
pub const MIN_PASSWORD_COST: u32 = 4;
/// Stored digests above this cost are refused rather than verified.
pub const MAX_PASSWORD_COST: u32 = 16;

pub fn hash_password(password: &str, cost: u32) -> Result<String, ClarioError> {
    if !(MIN_PASSWORD_COST..=MAX_PASSWORD_COST).contains(&cost) {
        return Err(ClarioError::PasswordError(format!(
            "cost {cost} outside {MIN_PASSWORD_COST}..={MAX_PASSWORD_COST}"
        )));
    }
    Ok(bcrypt::hash(password, cost)?)
}

/// Checks `password` against a stored digest.
/// Malformed or over-expensive stored values never verify.
#[must_use]
pub fn verify_password(password: &str, stored: &str) -> bool {
    let Ok(parts) = stored.parse::<HashParts>() else {
        return false;
    };
    if parts.get_cost() > MAX_PASSWORD_COST {
        return false;
    }
    bcrypt::verify(password, stored).unwrap_or(false)
}
