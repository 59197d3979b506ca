//! Command implementations, one module per subcommand group.

pub mod completions;
pub mod encrypt;
pub mod hash;
pub mod hmac;
pub mod keygen;
pub mod sign;
