//! Cryptographic recipes for pasta.
//!
//! This module provides:
//! - Secure random bytes (`random`)
//! - AES-256-GCM / secretbox authenticated encryption (`encryption`)
//! - SHA-512/256, SHA-256 and bcrypt password hashing (`hash`)
//! - HMAC-SHA512/256 message authentication (`mac`)
//! - ECDSA P-256 signing and verification (`signing`)
//! - DER, compact and PEM encodings for signatures and keys (`marshal`)

pub mod encryption;
pub mod hash;
pub mod mac;
pub mod marshal;
pub mod random;
pub mod signing;

// Re-export the most commonly used items so callers can write:
//   use pasta::crypto::{encrypt, decrypt, sign, verify, ...};
pub use encryption::{decrypt, encrypt, generate_encryption_key, CipherKind};
pub use hash::{hash, hash_password, hash_sha256, verify_password};
pub use mac::{generate_hmac, generate_hmac_key, validate_hmac};
pub use marshal::{
    decode_private_key_pem, decode_public_key_pem, decode_signature_compact,
    decode_signature_der, encode_private_key_pem, encode_public_key_pem,
    encode_signature_compact, encode_signature_der,
};
pub use signing::{
    generate_signing_key, sign, verify, EcCurve, EcPrivateKey, EcPublicKey, EcdsaSignature,
};
