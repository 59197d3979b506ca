use thiserror::Error;

/// All errors that can occur in pasta.
///
/// Messages carry sizes, labels and library descriptions only. Key bytes,
/// plaintext and passwords never end up in an error.
#[derive(Debug, Error)]
pub enum PastaError {
    // --- Randomness ---
    #[error("secure random source failed: {0}")]
    EntropySource(String),

    // --- Symmetric encryption ---
    #[error("invalid key size {0} (expected 32 bytes)")]
    InvalidKeySize(usize),

    #[error("invalid nonce size {0}")]
    InvalidNonceSize(usize),

    #[error("Encryption failed: {0}")]
    EncryptionFailed(String),

    #[error("Authentication failed — wrong key or tampered data")]
    AuthenticationFailed,

    // --- Password hashing ---
    #[error("password is {0} bytes, bcrypt accepts at most 72")]
    PasswordTooLong(usize),

    #[error("password does not match the hash")]
    PasswordMismatch,

    #[error("not a valid bcrypt hash string")]
    InvalidPasswordHash,

    #[error("password hashing failed: {0}")]
    PasswordHashing(String),

    // --- MAC ---
    #[error("HMAC error: {0}")]
    HmacError(String),

    // --- Signatures ---
    #[error("ecdsa: invalid curve params")]
    InvalidCurveParams,

    #[error("ecdsa: signing failed")]
    SigningFailed,

    #[error("malformed ASN.1 signature")]
    MalformedSignature,

    #[error("invalid signature encoding: {0}")]
    InvalidEncoding(String),

    // --- Keys ---
    #[error("could not decode PEM block type {0}")]
    WrongPemType(String),

    #[error("data was not an ECDSA public key")]
    NotEcKey,

    #[error("unsupported elliptic curve")]
    UnsupportedCurve,

    #[error("malformed key: {0}")]
    MalformedKey(String),

    // --- Config errors ---
    #[error("Config file error: {0}")]
    ConfigError(String),

    // --- IO errors ---
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // --- CLI errors ---
    #[error("Command failed: {0}")]
    CommandFailed(String),
}

/// Convenience type alias for pasta results.
pub type Result<T> = std::result::Result<T, PastaError>;
