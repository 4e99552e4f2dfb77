//! Host-side tester configuration


use std::{
    fs::File,
    io::prelude::*,
};

use serde::Deserialize;


/// The configuration options for a tester run
#[derive(Deserialize)]
pub struct Config {
    /// Path to the serial device where the fixture is connected
    pub device: Option<String>,

    /// Override for the per-test loop count (1..=65535)
    pub loops: Option<u32>,

    /// Override for the additional DUT output read delay, in microseconds
    pub read_delay_us: Option<f64>,
}

impl Config {
    /// Read configuration from the `ictester.toml` file
    pub fn read() -> Result<Self, ConfigReadError> {
        Self::read_inner()
            .map_err(|err| ConfigReadError(err))
    }

    fn read_inner() -> Result<Self, ConfigError> {
        let mut config = Vec::new();
        File::open("ictester.toml")?
            .read_to_end(&mut config)?;

        let config = toml::from_slice(&config)?;

        Ok(config)
    }
}


#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl From<std::io::Error> for ConfigError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        Self::Parse(err)
    }
}


/// Error reading the configuration file
#[derive(Debug)]
pub struct ConfigReadError(pub ConfigError);
