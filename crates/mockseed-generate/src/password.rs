//! bcrypt digests for the password hash column of mock user tables.
//!
//! Hashing is compiled in through the default `bcrypt` feature. Without it
//! every call fails with [`GenerationError::HashingUnavailable`] and callers
//! are expected to disable the hashing action instead of aborting.

use mockseed_core::validate_bounds;

use crate::errors::GenerationError;

pub const MIN_ROUNDS: u32 = 4;
pub const MAX_ROUNDS: u32 = 15;
pub const MIN_PASSWORD_LEN: usize = 8;

/// Whether this build can produce bcrypt digests.
pub fn hashing_available() -> bool {
    cfg!(feature = "bcrypt")
}

pub fn ensure_available() -> Result<(), GenerationError> {
    if hashing_available() {
        Ok(())
    } else {
        Err(GenerationError::HashingUnavailable)
    }
}

pub fn validate_rounds(rounds: u32) -> Result<(), GenerationError> {
    validate_bounds("rounds", rounds, MIN_ROUNDS, MAX_ROUNDS)?;
    Ok(())
}

/// Hash a user-supplied password with a random salt.
pub fn hash_password(password: &str, rounds: u32) -> Result<String, GenerationError> {
    ensure_available()?;
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(GenerationError::invalid_argument(format!(
            "password must be at least {MIN_PASSWORD_LEN} characters"
        )));
    }
    validate_rounds(rounds)?;
    backend::hash(password, rounds)
}

/// Hash with an explicit salt so seeded fixture runs stay reproducible.
pub fn hash_password_with_salt(
    password: &str,
    rounds: u32,
    salt: [u8; 16],
) -> Result<String, GenerationError> {
    ensure_available()?;
    validate_rounds(rounds)?;
    backend::hash_with_salt(password, rounds, salt)
}

/// Check `password` against a stored digest.
pub fn verify_password(password: &str, digest: &str) -> Result<bool, GenerationError> {
    ensure_available()?;
    backend::verify(password, digest)
}

#[cfg(feature = "bcrypt")]
mod backend {
    use crate::errors::GenerationError;

    pub fn hash(password: &str, rounds: u32) -> Result<String, GenerationError> {
        bcrypt::hash(password, rounds).map_err(|err| GenerationError::Hash(err.to_string()))
    }

    pub fn hash_with_salt(
        password: &str,
        rounds: u32,
        salt: [u8; 16],
    ) -> Result<String, GenerationError> {
        bcrypt::hash_with_salt(password, rounds, salt)
            .map(|parts| parts.format_for_version(bcrypt::Version::TwoB))
            .map_err(|err| GenerationError::Hash(err.to_string()))
    }

    pub fn verify(password: &str, digest: &str) -> Result<bool, GenerationError> {
        bcrypt::verify(password, digest).map_err(|err| GenerationError::Hash(err.to_string()))
    }
}

#[cfg(not(feature = "bcrypt"))]
mod backend {
    use crate::errors::GenerationError;

    pub fn hash(_password: &str, _rounds: u32) -> Result<String, GenerationError> {
        Err(GenerationError::HashingUnavailable)
    }

    pub fn hash_with_salt(
        _password: &str,
        _rounds: u32,
        _salt: [u8; 16],
    ) -> Result<String, GenerationError> {
        Err(GenerationError::HashingUnavailable)
    }

    pub fn verify(_password: &str, _digest: &str) -> Result<bool, GenerationError> {
        Err(GenerationError::HashingUnavailable)
    }
}
