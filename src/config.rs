use std::{net::IpAddr, str::FromStr};

use thiserror::Error;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_BODY_LIMIT: usize = 1024 * 1024; // 1 MiB

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{name} must be a valid {expected}, got {value:?}.")]
    InvalidValue {
        name: &'static str,
        expected: &'static str,
        value: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: IpAddr,
    pub port: u16,
    pub body_limit: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::from([0, 0, 0, 0]),
            port: DEFAULT_PORT,
            body_limit: DEFAULT_BODY_LIMIT,
        }
    }
}

impl ServerConfig {
    /// Reads `HOST`, `PORT` and `BODY_LIMIT_BYTES`, falling back to defaults
    /// for unset variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        Ok(Self {
            host: parse_var(&lookup, "HOST", "IP address")?.unwrap_or(defaults.host),
            port: parse_var(&lookup, "PORT", "port number")?.unwrap_or(defaults.port),
            body_limit: parse_var(&lookup, "BODY_LIMIT_BYTES", "byte count")?
                .unwrap_or(defaults.body_limit),
        })
    }

    pub fn addr(&self) -> (IpAddr, u16) {
        (self.host, self.port)
    }
}

fn parse_var<T, F>(lookup: &F, name: &'static str, expected: &'static str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    let Some(value) = lookup(name) else {
        return Ok(None);
    };

    value
        .trim()
        .parse()
        .map(Some)
        .map_err(|_| ConfigError::InvalidValue {
            name,
            expected,
            value,
        })
}
