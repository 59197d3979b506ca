//! Authenticated symmetric encryption with a random nonce.
//!
//! Two interchangeable backends share one envelope shape:
//! - AES-256-GCM (default): 12-byte nonce
//! - NaCl secretbox (XSalsa20-Poly1305): 24-byte nonce
//!
//! Each call to `encrypt` generates a fresh random nonce and prepends it
//! to the sealed data. `decrypt` splits the nonce back out before opening.
//!
//! Layout of the returned byte buffer:
//!   [ nonce | ciphertext | 16-byte auth tag ]
//!
//! The length of the plaintext is not hidden.

use std::fmt;
use std::str::FromStr;

use aes_gcm::aead::generic_array::typenum::Unsigned;
use aes_gcm::aead::{Aead, AeadCore, KeyInit, Nonce};
use aes_gcm::Aes256Gcm;
use crypto_secretbox::XSalsa20Poly1305;
use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

use super::random;
use crate::errors::{PastaError, Result};

/// Size of every symmetric key in bytes (256 bits).
pub const KEY_SIZE: usize = 32;

/// Size of the Poly1305 / GHASH authentication tag.
pub const TAG_SIZE: usize = 16;

/// AES-GCM nonce size (96 bits).
pub const AES_GCM_NONCE_SIZE: usize = 12;

/// Secretbox nonce size (192 bits).
pub const SECRETBOX_NONCE_SIZE: usize = 24;

/// Which AEAD construction seals the envelope.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CipherKind {
    #[default]
    #[serde(rename = "aes-gcm")]
    Aes256Gcm,
    #[serde(rename = "secretbox")]
    SecretBox,
}

impl CipherKind {
    /// Nonce length prepended to every envelope.
    pub fn nonce_size(self) -> usize {
        match self {
            CipherKind::Aes256Gcm => AES_GCM_NONCE_SIZE,
            CipherKind::SecretBox => SECRETBOX_NONCE_SIZE,
        }
    }

    /// Bytes an envelope adds on top of the plaintext.
    pub fn overhead(self) -> usize {
        self.nonce_size() + TAG_SIZE
    }

    /// Seal `plaintext` under a 32-byte `key`.
    ///
    /// Returns `nonce || ciphertext || tag`.
    pub fn encrypt(self, plaintext: &[u8], key: &[u8]) -> Result<Vec<u8>> {
        check_key(key)?;
        tracing::debug!(cipher = %self, len = plaintext.len(), "sealing envelope");
        match self {
            CipherKind::Aes256Gcm => seal::<Aes256Gcm>(plaintext, key),
            CipherKind::SecretBox => seal::<XSalsa20Poly1305>(plaintext, key),
        }
    }

    /// Open an envelope produced by [`CipherKind::encrypt`].
    ///
    /// A short envelope, a wrong key and a bad tag all report the same
    /// `AuthenticationFailed`.
    pub fn decrypt(self, envelope: &[u8], key: &[u8]) -> Result<Vec<u8>> {
        check_key(key)?;
        tracing::debug!(cipher = %self, len = envelope.len(), "opening envelope");
        if envelope.len() < self.overhead() {
            return Err(PastaError::AuthenticationFailed);
        }
        match self {
            CipherKind::Aes256Gcm => open::<Aes256Gcm>(envelope, key),
            CipherKind::SecretBox => open::<XSalsa20Poly1305>(envelope, key),
        }
    }
}

impl fmt::Display for CipherKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CipherKind::Aes256Gcm => f.write_str("aes-gcm"),
            CipherKind::SecretBox => f.write_str("secretbox"),
        }
    }
}

impl FromStr for CipherKind {
    type Err = PastaError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "aes-gcm" | "aes256gcm" | "gcm" => Ok(CipherKind::Aes256Gcm),
            "secretbox" | "xsalsa20poly1305" => Ok(CipherKind::SecretBox),
            other => Err(PastaError::ConfigError(format!(
                "unknown cipher '{other}' — supported: aes-gcm, secretbox"
            ))),
        }
    }
}

/// Generate a random 256-bit key for `encrypt` and `decrypt`.
pub fn generate_encryption_key() -> Result<Zeroizing<[u8; KEY_SIZE]>> {
    random::generate_array().map(Zeroizing::new)
}

/// Encrypt with the default cipher (AES-256-GCM).
pub fn encrypt(plaintext: &[u8], key: &[u8]) -> Result<Vec<u8>> {
    CipherKind::default().encrypt(plaintext, key)
}

/// Decrypt with the default cipher (AES-256-GCM).
pub fn decrypt(envelope: &[u8], key: &[u8]) -> Result<Vec<u8>> {
    CipherKind::default().decrypt(envelope, key)
}

fn check_key(key: &[u8]) -> Result<()> {
    if key.len() != KEY_SIZE {
        return Err(PastaError::InvalidKeySize(key.len()));
    }
    Ok(())
}

fn seal<A>(plaintext: &[u8], key: &[u8]) -> Result<Vec<u8>>
where
    A: Aead + AeadCore + KeyInit,
{
    let cipher = A::new_from_slice(key).map_err(|_| PastaError::InvalidKeySize(key.len()))?;

    let nonce_bytes = random::generate_bytes(<A as AeadCore>::NonceSize::USIZE)?;
    let nonce = nonce_from_slice::<A>(&nonce_bytes)?;

    let sealed = cipher
        .encrypt(nonce, plaintext)
        .map_err(|e| PastaError::EncryptionFailed(format!("seal error: {e}")))?;

    let mut output = Vec::with_capacity(nonce_bytes.len() + sealed.len());
    output.extend_from_slice(&nonce_bytes);
    output.extend_from_slice(&sealed);
    Ok(output)
}

fn open<A>(envelope: &[u8], key: &[u8]) -> Result<Vec<u8>>
where
    A: Aead + AeadCore + KeyInit,
{
    let cipher = A::new_from_slice(key).map_err(|_| PastaError::InvalidKeySize(key.len()))?;

    let (nonce_bytes, sealed) = envelope.split_at(<A as AeadCore>::NonceSize::USIZE);
    let nonce = nonce_from_slice::<A>(nonce_bytes)?;

    cipher
        .decrypt(nonce, sealed)
        .map_err(|_| PastaError::AuthenticationFailed)
}

/// `Nonce::from_slice` panics on a length mismatch, so check first.
fn nonce_from_slice<A: AeadCore>(bytes: &[u8]) -> Result<&Nonce<A>> {
    if bytes.len() != <A as AeadCore>::NonceSize::USIZE {
        return Err(PastaError::InvalidNonceSize(bytes.len()));
    }
    Ok(Nonce::<A>::from_slice(bytes))
}
