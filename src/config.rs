//! Command-line and environment configuration

use clap::Parser;
use std::net::SocketAddr;
use std::time::Duration;
use thiserror::Error;

use crate::rsa_service::{DEFAULT_MODULUS_BITS, KeyGenLimits};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("minimum modulus length must be positive")]
    ZeroMinimum,

    #[error("minimum modulus length {min} exceeds maximum {max}")]
    InvertedLimits { min: u32, max: u32 },

    #[error("default modulus length {default} is outside {min}..={max}")]
    DefaultOutOfRange { default: u32, min: u32, max: u32 },

    #[error("at least one key generation must be allowed at a time")]
    ZeroConcurrency,
}

#[derive(Parser, Debug, Clone)]
#[command(name = "rsa-workbench")]
#[command(version, about = "HTTP service for RSA key generation and PKCS#1 v1.5 encryption", long_about = None)]
pub struct Config {
    /// Address to listen on
    #[arg(long, env = "RSA_WORKBENCH_BIND", default_value = "127.0.0.1:3000")]
    pub bind: SocketAddr,

    /// Modulus length used when /generate gets none
    #[arg(long, env = "RSA_WORKBENCH_DEFAULT_MODULUS", default_value_t = DEFAULT_MODULUS_BITS)]
    pub default_modulus_length: u32,

    /// Smallest modulus length /generate accepts
    #[arg(long, env = "RSA_WORKBENCH_MIN_MODULUS", default_value_t = 512)]
    pub min_modulus_length: u32,

    /// Largest modulus length /generate accepts
    #[arg(long, env = "RSA_WORKBENCH_MAX_MODULUS", default_value_t = 8192)]
    pub max_modulus_length: u32,

    /// Seconds before key generation is abandoned (0 = no limit)
    #[arg(long, env = "RSA_WORKBENCH_KEYGEN_TIMEOUT", default_value_t = 60)]
    pub keygen_timeout_secs: u64,

    /// Key generations allowed to run at once; further requests get a 503
    #[arg(long, env = "RSA_WORKBENCH_KEYGEN_CONCURRENCY", default_value_t = 2)]
    pub max_concurrent_keygens: usize,

    /// Log filter directive, used when RUST_LOG is unset
    #[arg(long, default_value = "info,tower_http=debug")]
    pub log_filter: String,
}

/// The part of the configuration request handlers need.
#[derive(Debug, Clone)]
pub struct ServiceSettings {
    pub default_modulus_length: u32,
    pub limits: KeyGenLimits,
    pub keygen_timeout: Option<Duration>,
    pub keygen_concurrency: usize,
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            default_modulus_length: DEFAULT_MODULUS_BITS,
            limits: KeyGenLimits::default(),
            keygen_timeout: Some(Duration::from_secs(60)),
            keygen_concurrency: 2,
        }
    }
}

impl Config {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let (min, max) = (self.min_modulus_length, self.max_modulus_length);
        if min == 0 {
            return Err(ConfigError::ZeroMinimum);
        }
        if min > max {
            return Err(ConfigError::InvertedLimits { min, max });
        }
        let default = self.default_modulus_length;
        if default < min || default > max {
            return Err(ConfigError::DefaultOutOfRange { default, min, max });
        }
        if self.max_concurrent_keygens == 0 {
            return Err(ConfigError::ZeroConcurrency);
        }
        Ok(())
    }

    pub fn settings(&self) -> Result<ServiceSettings, ConfigError> {
        self.validate()?;
        Ok(ServiceSettings {
            default_modulus_length: self.default_modulus_length,
            limits: KeyGenLimits {
                min_bits: self.min_modulus_length,
                max_bits: self.max_modulus_length,
            },
            keygen_timeout: match self.keygen_timeout_secs {
                0 => None,
                secs => Some(Duration::from_secs(secs)),
            },
            keygen_concurrency: self.max_concurrent_keygens,
        })
    }
}
