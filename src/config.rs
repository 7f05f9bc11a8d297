use std::fs;
use std::path::Path;

use anyhow::{ensure, Context, Result};
use serde::Deserialize;

use crate::AccountNumber;

pub const DEFAULT_CAPACITY: usize = 100;
pub const DEFAULT_FIRST_ACCOUNT_NUMBER: AccountNumber = 1001;
pub const MAX_CAPACITY: usize = 100_000;

/// Environment variable naming an optional JSON config file.
pub const CONFIG_ENV: &str = "BANK_CONFIG";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RegistryConfig {
    pub capacity: usize,
    pub first_account_number: AccountNumber,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        RegistryConfig {
            capacity: DEFAULT_CAPACITY,
            first_account_number: DEFAULT_FIRST_ACCOUNT_NUMBER,
        }
    }
}

impl RegistryConfig {
    pub fn from_json(text: &str) -> Result<RegistryConfig> {
        let config: RegistryConfig =
            serde_json::from_str(text).context("malformed registry config")?;
        config.check()?;
        Ok(config)
    }

    pub fn from_path(path: &Path) -> Result<RegistryConfig> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        RegistryConfig::from_json(&text).with_context(|| format!("in {}", path.display()))
    }

    /// Reads the file named by `BANK_CONFIG`, or falls back to the defaults.
    pub fn load() -> Result<RegistryConfig> {
        match std::env::var_os(CONFIG_ENV) {
            Some(path) => RegistryConfig::from_path(Path::new(&path)),
            None => Ok(RegistryConfig::default()),
        }
    }

    fn check(&self) -> Result<()> {
        ensure!(
            (1..=MAX_CAPACITY).contains(&self.capacity),
            "capacity must be between 1 and {}",
            MAX_CAPACITY
        );
        ensure!(
            self.first_account_number > 0,
            "first_account_number must be positive"
        );
        // Every slot needs a number, and the counter must still advance after the last one.
        let fits = AccountNumber::try_from(self.capacity)
            .ok()
            .and_then(|capacity| self.first_account_number.checked_add(capacity))
            .is_some();
        ensure!(
            fits,
            "first_account_number {} leaves too few account numbers for capacity {}",
            self.first_account_number,
            self.capacity
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_gives_defaults() {
        let config = RegistryConfig::from_json("{}").unwrap();
        assert_eq!(config, RegistryConfig::default());
        assert_eq!(config.capacity, 100);
        assert_eq!(config.first_account_number, 1001);
    }

    #[test]
    fn partial_override() {
        let config = RegistryConfig::from_json(r#"{ "capacity": 3 }"#).unwrap();
        assert_eq!(config.capacity, 3);
        assert_eq!(config.first_account_number, 1001);
    }

    #[test]
    fn zero_values_are_rejected() {
        assert!(RegistryConfig::from_json(r#"{ "capacity": 0 }"#).is_err());
        assert!(RegistryConfig::from_json(r#"{ "first_account_number": 0 }"#).is_err());
    }

    #[test]
    fn capacity_above_limit_is_rejected() {
        assert!(RegistryConfig::from_json(r#"{ "capacity": 100000 }"#).is_ok());
        let err = RegistryConfig::from_json(r#"{ "capacity": 100001 }"#).unwrap_err();
        assert!(format!("{:#}", err).contains("capacity must be between 1 and 100000"));
    }

    #[test]
    fn numbering_must_not_run_past_u32() {
        let text = format!(r#"{{ "capacity": 5, "first_account_number": {} }}"#, u32::MAX);
        let err = RegistryConfig::from_json(&text).unwrap_err();
        assert!(format!("{:#}", err).contains("leaves too few account numbers"));

        let text = format!(
            r#"{{ "capacity": 5, "first_account_number": {} }}"#,
            u32::MAX - 5
        );
        let config = RegistryConfig::from_json(&text).unwrap();
        assert_eq!(config.first_account_number, u32::MAX - 5);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(RegistryConfig::from_json(r#"{ "capacty": 5 }"#).is_err());
    }

    #[test]
    fn missing_file_mentions_path() {
        let err = RegistryConfig::from_path(Path::new("/nonexistent/bank.json")).unwrap_err();
        assert!(format!("{:#}", err).contains("/nonexistent/bank.json"));
    }
}
