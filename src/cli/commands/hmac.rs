//! `pasta hmac` / `pasta hmac-verify`.

use crate::cli::output;
use crate::cli::{decode_key, load_settings, read_input, Cli};
use crate::crypto::{generate_hmac, validate_hmac};
use crate::errors::{PastaError, Result};

/// Execute the `hmac` command.
pub fn execute(cli: &Cli, key: &str, input: Option<&str>) -> Result<()> {
    let settings = load_settings(cli)?;
    let key = decode_key(&settings, key)?;
    let data = read_input(input)?;

    let tag = generate_hmac(&data, &key)?;
    println!("{}", settings.encoding.encode(&tag));
    Ok(())
}

/// Execute the `hmac-verify` command.
pub fn execute_verify(cli: &Cli, key: &str, tag: &str, input: Option<&str>) -> Result<()> {
    let settings = load_settings(cli)?;
    let key = decode_key(&settings, key)?;
    let tag = settings.encoding.decode(tag)?;
    let data = read_input(input)?;

    if !validate_hmac(&data, &tag, &key) {
        return Err(PastaError::CommandFailed("HMAC verification failed".into()));
    }

    output::success("HMAC is valid");
    Ok(())
}
