//! Configuration loaded from `.pasta.toml`.

pub mod settings;

pub use settings::{OutputEncoding, Settings};
