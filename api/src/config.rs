//! Sandbox configuration

use std::env;
use std::net::{IpAddr, SocketAddr};

use crate::error::ConfigError;
use crate::harness::otp::DEFAULT_OTP_CODE;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub host: IpAddr,
    pub port: u16,
    /// Passcode every sign-up receives
    pub otp_code: String,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = match lookup("HOST") {
            Some(raw) => raw.parse().map_err(|_| ConfigError::Invalid {
                key: "HOST",
                value: raw,
            })?,
            None => IpAddr::from([0, 0, 0, 0]),
        };

        let port = match lookup("PORT") {
            Some(raw) => raw.parse().map_err(|_| ConfigError::Invalid {
                key: "PORT",
                value: raw,
            })?,
            None => 8080,
        };

        let otp_code = lookup("SANDBOX_OTP_CODE").unwrap_or_else(|| DEFAULT_OTP_CODE.to_string());
        if otp_code.is_empty() || !otp_code.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ConfigError::Invalid {
                key: "SANDBOX_OTP_CODE",
                value: otp_code,
            });
        }

        Ok(Self {
            host,
            port,
            otp_code,
        })
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}
