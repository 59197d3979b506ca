//! Symmetric message authentication with HMAC-SHA512/256.
//!
//! A slight twist on HMAC-SHA256: faster on 64-bit systems and consistent
//! with the hashing recommendation in `hash`.

use hmac::{Hmac, Mac};
use sha2::Sha512_256;
use subtle::ConstantTimeEq;
use zeroize::Zeroizing;

use super::random;
use crate::errors::{PastaError, Result};

/// Size of generated HMAC keys (256 bits).
pub const HMAC_KEY_SIZE: usize = 32;

type HmacSha512_256 = Hmac<Sha512_256>;

/// Generate a random 256-bit HMAC key.
pub fn generate_hmac_key() -> Result<Zeroizing<[u8; HMAC_KEY_SIZE]>> {
    random::generate_array().map(Zeroizing::new)
}

/// Compute HMAC-SHA512/256 of `data` under `key`.
pub fn generate_hmac(data: &[u8], key: &[u8]) -> Result<Vec<u8>> {
    let mut mac = HmacSha512_256::new_from_slice(key)
        .map_err(|e| PastaError::HmacError(format!("HMAC init failed: {e}")))?;
    mac.update(data);
    Ok(mac.finalize().into_bytes().to_vec())
}

/// Check a supplied tag against `data` in constant time.
pub fn validate_hmac(data: &[u8], supplied: &[u8], key: &[u8]) -> bool {
    let Ok(expected) = generate_hmac(data, key) else {
        return false;
    };
    expected.ct_eq(supplied).into()
}
