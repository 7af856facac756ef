//! Generator configuration
//!
//! Selects an algorithm, an optional seed and a number of jumps from a TOML
//! file or from environment variables, then builds a [`Generator`].
//!
//! ```toml
//! algorithm = "xoroshiro128+"
//! seed = 20240101
//! jumps = 3
//! ```
//!
//! TOML integers are signed 64-bit, so seeds above `i64::MAX` are written
//! as strings, either decimal or `0x`-prefixed hexadecimal:
//!
//! ```toml
//! seed = "0xffffffffffffffff"
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use crate::algorithm::Algorithm;
use crate::error::RngError;
use crate::generator::Generator;
use crate::traits::BitGenerator;

/// Environment variable naming the algorithm.
pub const ENV_ALGORITHM: &str = "RANDOMSTATE_ALGORITHM";
/// Environment variable holding the seed.
pub const ENV_SEED: &str = "RANDOMSTATE_SEED";
/// Environment variable holding the jump count.
pub const ENV_JUMPS: &str = "RANDOMSTATE_JUMPS";

/// Configuration error types
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    /// TOML text could not be parsed or serialised
    #[error("Failed to parse configuration: {0}")]
    Parse(String),

    /// Configuration file could not be read
    #[error("Configuration file error: {0}")]
    Io(String),

    /// Environment variable holds an invalid value
    #[error("Environment variable error: {var}={value}: {reason}")]
    Env {
        /// Variable name
        var: &'static str,
        /// Raw value
        value: String,
        /// Parse failure
        reason: String,
    },

    /// Configuration describes an unusable generator
    #[error(transparent)]
    Rng(#[from] RngError),
}

/// Generator configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Algorithm to construct
    pub algorithm: Algorithm,
    /// Seed; operating system entropy is used when absent
    #[serde(with = "seed_repr")]
    pub seed: Option<u64>,
    /// Number of jumps applied after seeding
    pub jumps: u32,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            algorithm: Algorithm::Pcg64,
            seed: None,
            jumps: 0,
        }
    }
}

impl GeneratorConfig {
    /// Create a new GeneratorConfig with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: GeneratorConfig =
            toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            ConfigError::Io(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::from_toml_str(&content)
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&'static str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(value) = lookup(ENV_ALGORITHM) {
            config.algorithm = value.parse().map_err(|e: RngError| ConfigError::Env {
                var: ENV_ALGORITHM,
                value: value.clone(),
                reason: e.to_string(),
            })?;
        }

        if let Some(value) = lookup(ENV_SEED) {
            let seed = parse_seed(&value).map_err(|e| {
                ConfigError::Env {
                    var: ENV_SEED,
                    value: value.clone(),
                    reason: e.to_string(),
                }
            })?;
            config.seed = Some(seed);
        }

        if let Some(value) = lookup(ENV_JUMPS) {
            config.jumps = value.trim().parse().map_err(|e: std::num::ParseIntError| {
                ConfigError::Env {
                    var: ENV_JUMPS,
                    value: value.clone(),
                    reason: e.to_string(),
                }
            })?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.jumps > 0 && !self.algorithm.is_jumpable() {
            return Err(RngError::no_jump(self.algorithm).into());
        }
        Ok(())
    }

    /// Render the configuration as TOML
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        toml::to_string(self).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Build the configured generator.
    ///
    /// # Errors
    ///
    /// - [`RngError::UnsupportedOperation`] if jumps are requested on a non-jumpable algorithm
    /// - [`RngError::EntropyUnavailable`] if no seed is given and the OS source fails
    pub fn build(&self) -> Result<Generator, ConfigError> {
        self.validate()?;
        let mut generator = match self.seed {
            Some(seed) => Generator::new(self.algorithm, seed)?,
            None => Generator::from_entropy(self.algorithm)?,
        };
        for _ in 0..self.jumps {
            generator.jump()?;
        }
        tracing::debug!(
            algorithm = %self.algorithm,
            seeded = self.seed.is_some(),
            jumps = self.jumps,
            "generator built from configuration"
        );
        Ok(generator)
    }
}

/// Parse a decimal or `0x`-prefixed hexadecimal seed.
pub fn parse_seed(text: &str) -> Result<u64, std::num::ParseIntError> {
    let text = text.trim();
    match text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
        Some(hex) => u64::from_str_radix(hex, 16),
        None => text.parse(),
    }
}

/// Seeds as TOML integers where they fit, as hex strings otherwise.
mod seed_repr {
    use serde::{Deserialize, Deserializer, Serializer};

    use super::parse_seed;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Int(u64),
        Text(String),
    }

    pub fn serialize<S: Serializer>(seed: &Option<u64>, s: S) -> Result<S::Ok, S::Error> {
        match seed {
            Some(v) if *v > i64::MAX as u64 => s.serialize_some(&format!("{:#x}", v)),
            Some(v) => s.serialize_some(v),
            None => s.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<u64>, D::Error> {
        match Option::<Raw>::deserialize(d)? {
            None => Ok(None),
            Some(Raw::Int(v)) => Ok(Some(v)),
            Some(Raw::Text(text)) => parse_seed(&text)
                .map(Some)
                .map_err(|e| serde::de::Error::custom(format!("invalid seed {:?}: {}", text, e))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_default_config() {
        let config = GeneratorConfig::default();
        assert_eq!(config.algorithm, Algorithm::Pcg64);
        assert_eq!(config.seed, None);
        assert_eq!(config.jumps, 0);
    }

    #[test]
    fn test_from_toml_str() {
        let config = GeneratorConfig::from_toml_str(
            r#"
            algorithm = "xoroshiro128+"
            seed = 99
            jumps = 2
            "#,
        )
        .unwrap();
        assert_eq!(config.algorithm, Algorithm::Xoroshiro128Plus);
        assert_eq!(config.seed, Some(99));
        assert_eq!(config.jumps, 2);
    }

    #[test]
    fn test_toml_defaults_missing_fields() {
        let config = GeneratorConfig::from_toml_str(r#"algorithm = "mt19937""#).unwrap();
        assert_eq!(config.algorithm, Algorithm::Mt19937);
        assert_eq!(config.jumps, 0);
    }

    #[test]
    fn test_unknown_algorithm_rejected() {
        let err = GeneratorConfig::from_toml_str(r#"algorithm = "lcg""#).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_jumps_on_non_jumpable_rejected() {
        let err = GeneratorConfig::from_toml_str(
            r#"
            algorithm = "dsfmt"
            jumps = 1
            "#,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Rng(RngError::UnsupportedOperation { .. })
        ));
    }

    #[test]
    fn test_from_lookup() {
        let vars: HashMap<&str, &str> = [
            (ENV_ALGORITHM, "MRG32K3A"),
            (ENV_SEED, "12345"),
            (ENV_JUMPS, "1"),
        ]
        .into_iter()
        .collect();
        let config =
            GeneratorConfig::from_lookup(|k| vars.get(k).map(|v| v.to_string())).unwrap();
        assert_eq!(config.algorithm, Algorithm::Mrg32k3a);
        assert_eq!(config.seed, Some(12345));
        assert_eq!(config.jumps, 1);
    }

    #[test]
    fn test_from_lookup_bad_seed() {
        let err = GeneratorConfig::from_lookup(|k| {
            (k == ENV_SEED).then(|| "not-a-number".to_string())
        })
        .unwrap_err();
        assert!(matches!(err, ConfigError::Env { var: ENV_SEED, .. }));
    }

    #[test]
    fn test_full_width_seed_from_toml() {
        let config = GeneratorConfig::from_toml_str(r#"seed = "0xffffffffffffffff""#).unwrap();
        assert_eq!(config.seed, Some(u64::MAX));

        let config = GeneratorConfig::from_toml_str(r#"seed = "18446744073709551615""#).unwrap();
        assert_eq!(config.seed, Some(u64::MAX));

        let config = GeneratorConfig::from_toml_str("seed = 0x7fffffffffffffff").unwrap();
        assert_eq!(config.seed, Some(i64::MAX as u64));
    }

    #[test]
    fn test_bad_seeds_rejected() {
        for text in [r#"seed = "0xzz""#, "seed = -1", r#"seed = "0x1ffffffffffffffff""#] {
            let err = GeneratorConfig::from_toml_str(text).unwrap_err();
            assert!(matches!(err, ConfigError::Parse(_)), "{}", text);
        }
    }

    #[test]
    fn test_full_width_seed_round_trip() {
        for seed in [u64::MAX, 1 << 63, i64::MAX as u64, 0] {
            let config = GeneratorConfig {
                algorithm: Algorithm::Xorshift1024,
                seed: Some(seed),
                jumps: 1,
            };
            let text = config.to_toml_string().unwrap();
            assert_eq!(GeneratorConfig::from_toml_str(&text).unwrap(), config, "{}", text);
        }
    }

    #[test]
    fn test_from_lookup_hex_seed() {
        let config = GeneratorConfig::from_lookup(|k| {
            (k == ENV_SEED).then(|| " 0xDEADBEEFCAFEF00D ".to_string())
        })
        .unwrap();
        assert_eq!(config.seed, Some(0xdead_beef_cafe_f00d));
    }

    #[test]
    fn test_build_applies_jumps() {
        let config = GeneratorConfig {
            algorithm: Algorithm::Pcg32,
            seed: Some(42),
            jumps: 2,
        };
        let mut built = config.build().unwrap();
        let mut manual = Generator::new(Algorithm::Pcg32, 42).unwrap();
        manual.jump().unwrap();
        manual.jump().unwrap();
        assert_eq!(built.next_uint64(), manual.next_uint64());
    }

    #[test]
    fn test_toml_round_trip() {
        let config = GeneratorConfig {
            algorithm: Algorithm::Mlfg1279861,
            seed: Some(7),
            jumps: 0,
        };
        let text = config.to_toml_string().unwrap();
        assert_eq!(GeneratorConfig::from_toml_str(&text).unwrap(), config);
    }
}
