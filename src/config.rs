//! Loads the application configuration from a TOML file.
//!
//! All fields are optional: a missing file, or a file that sets only some of
//! the fields, falls back to the defaults below. The database file is created
//! on first use if it does not exist yet.

use std::{fs, path::Path};

use serde::Deserialize;

use crate::Error;

/// The application configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// File path to the SQLite database.
    pub database_path: String,
    /// The port to serve the app from, on 127.0.0.1.
    pub port: u16,
    /// The local timezone as a canonical timezone name, e.g. "America/Sao_Paulo".
    pub timezone: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_path: "caderneta.db".to_owned(),
            port: 3000,
            timezone: "America/Sao_Paulo".to_owned(),
        }
    }
}

impl Config {
    /// Load the configuration from the TOML file at `path`.
    ///
    /// Returns the default configuration when the file does not exist.
    ///
    /// # Errors
    /// Returns [Error::ConfigError] if the file exists but cannot be read or
    /// parsed.
    pub fn load(path: &Path) -> Result<Self, Error> {
        if !path.exists() {
            tracing::info!(
                "No configuration file at {}, using the default configuration.",
                path.display()
            );
            return Ok(Self::default());
        }

        let text = fs::read_to_string(path)
            .map_err(|error| Error::ConfigError(format!("{}: {error}", path.display())))?;

        toml::from_str(&text)
            .map_err(|error| Error::ConfigError(format!("{}: {error}", path.display())))
    }
}
