//! `pasta hash`, `pasta hash-password`, `pasta verify-password`.

use crate::cli::output;
use crate::cli::{read_input, read_password};
use crate::crypto::{hash, hash_password, hash_sha256, verify_password};
use crate::errors::Result;

/// Execute the `hash` command. Digests are always printed as hex.
pub fn execute(sha256: bool, input: Option<&str>) -> Result<()> {
    let data = read_input(input)?;

    let digest = if sha256 {
        output::warning("SHA-256 is offered for compatibility only; prefer the default SHA-512/256.");
        hash_sha256(&data)
    } else {
        hash(&data)
    };

    println!("{}", hex::encode(digest));
    Ok(())
}

/// Execute the `hash-password` command.
pub fn execute_hash_password(password_stdin: bool) -> Result<()> {
    let password = read_password(password_stdin, true)?;
    let hashed = hash_password(password.as_bytes())?;
    println!("{hashed}");
    Ok(())
}

/// Execute the `verify-password` command.
pub fn execute_verify_password(hashed: &str, password_stdin: bool) -> Result<()> {
    let password = read_password(password_stdin, false)?;
    verify_password(hashed, password.as_bytes())?;
    output::success("Password matches");
    Ok(())
}
