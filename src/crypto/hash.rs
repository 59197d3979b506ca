//! Recommended hashing.
//!
//! The default digest is SHA-512/256 (FIPS 180-4): a truncated SHA-512
//! that is not open to length extension, keeps a 32-byte digest and is
//! quick on 64-bit machines. SHA-256 is offered for interoperability only.
//!
//! Passwords are hashed with bcrypt at a fixed cost.

use sha2::{Digest, Sha256, Sha512_256};

use crate::errors::{PastaError, Result};

/// Size of every digest returned here.
pub const DIGEST_SIZE: usize = 32;

/// bcrypt work factor.
pub const BCRYPT_COST: u32 = 12;

/// bcrypt silently truncates past this many bytes, so longer input is refused.
pub const MAX_PASSWORD_LEN: usize = 72;

/// Hash `data` with SHA-512/256.
pub fn hash(data: &[u8]) -> [u8; DIGEST_SIZE] {
    Sha512_256::digest(data).into()
}

/// Hash `data` with SHA-256.
///
/// Not recommended except where compatibility demands it: SHA-256 is open
/// to length-extension attacks that SHA-512/256 resists.
pub fn hash_sha256(data: &[u8]) -> [u8; DIGEST_SIZE] {
    Sha256::digest(data).into()
}

/// Hash a password with bcrypt (`$2b$12$...`).
pub fn hash_password(password: &[u8]) -> Result<String> {
    if password.len() > MAX_PASSWORD_LEN {
        return Err(PastaError::PasswordTooLong(password.len()));
    }

    tracing::debug!(cost = BCRYPT_COST, "hashing password");
    bcrypt::hash(password, BCRYPT_COST).map_err(|e| PastaError::PasswordHashing(e.to_string()))
}

/// Check `password` against a bcrypt hash string.
///
/// The comparison inside bcrypt is constant-time. A password longer than
/// bcrypt's limit can never have been produced by [`hash_password`] and
/// is reported as a mismatch.
pub fn verify_password(hashed: &str, password: &[u8]) -> Result<()> {
    if password.len() > MAX_PASSWORD_LEN {
        return Err(PastaError::PasswordMismatch);
    }

    match bcrypt::verify(password, hashed) {
        Ok(true) => Ok(()),
        Ok(false) => Err(PastaError::PasswordMismatch),
        Err(_) => Err(PastaError::InvalidPasswordHash),
    }
}
