//! Simulation options and rc-file loading
//!
//! Options are read from `OPTIONS=` lines of an rc-style file:
//!
//! ```text
//! # comment
//! OPTIONS=wizard,!throws_affect_mimics
//! OPTIONS=slime_split_chance:25,striking_charge:single
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::DRAGONSHOT;

/// How many charges a successful striking zap costs
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum StrikingChargePolicy {
    /// The dispatcher and the melee engine each drain one charge
    #[default]
    DoubleDrain,
    /// Only the melee engine drains a charge
    SingleDrain,
}

/// User-configurable simulation options
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimOptions {
    pub striking_charge: StrikingChargePolicy,
    /// Bolts and stick targeting see through a mimic's disguise
    pub throws_affect_mimics: bool,
    /// Percent chance a wounded slime divides
    pub slime_split_chance: u32,
    /// A breathing monster in line with the hero breathes 1 time in N
    pub dragon_shot: u32,
    /// Announce wandering spawns
    pub wizard: bool,
}

impl Default for SimOptions {
    fn default() -> Self {
        Self {
            striking_charge: StrikingChargePolicy::DoubleDrain,
            throws_affect_mimics: false,
            slime_split_chance: 50,
            dragon_shot: DRAGONSHOT,
            wizard: false,
        }
    }
}

impl SimOptions {
    /// Load options from a config file
    pub fn load_from_file(path: &Path) -> Result<Self, OptionsError> {
        let contents = std::fs::read_to_string(path).map_err(|e| OptionsError::Io(e.to_string()))?;
        Self::parse_config(&contents)
    }

    /// Parse options from a config string
    pub fn parse_config(contents: &str) -> Result<Self, OptionsError> {
        let mut options = Self::default();

        for line in contents.lines() {
            let line = line.trim();

            // Skip comments and empty lines
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            if let Some(opts) = line.strip_prefix("OPTIONS=") {
                for opt in opts.split(',') {
                    let opt = opt.trim();
                    if !opt.is_empty() {
                        options.parse_option(opt)?;
                    }
                }
            }
        }

        Ok(options)
    }

    /// Parse a single option
    fn parse_option(&mut self, opt: &str) -> Result<(), OptionsError> {
        if let Some((key, value)) = opt.split_once(':').or_else(|| opt.split_once('=')) {
            return self.set_option(key.trim(), value.trim());
        }

        let (negated, name) = if let Some(name) = opt.strip_prefix('!') {
            (true, name)
        } else if let Some(name) = opt.strip_prefix("no") {
            (true, name)
        } else {
            (false, opt)
        };
        self.set_bool_option(name, !negated)
    }

    fn set_bool_option(&mut self, name: &str, value: bool) -> Result<(), OptionsError> {
        match name {
            "throws_affect_mimics" => self.throws_affect_mimics = value,
            "wizard" => self.wizard = value,
            "striking_charge" | "slime_split_chance" | "dragon_shot" => {
                return Err(OptionsError::MissingValue(name.to_string()));
            }
            _ => return Err(OptionsError::UnknownOption(name.to_string())),
        }
        Ok(())
    }

    fn set_option(&mut self, name: &str, value: &str) -> Result<(), OptionsError> {
        if value.is_empty() {
            return Err(OptionsError::MissingValue(name.to_string()));
        }
        let invalid = || OptionsError::InvalidValue(name.to_string(), value.to_string());

        match name {
            "striking_charge" => {
                self.striking_charge = match value.to_lowercase().as_str() {
                    "double" | "double_drain" => StrikingChargePolicy::DoubleDrain,
                    "single" | "single_drain" => StrikingChargePolicy::SingleDrain,
                    _ => return Err(invalid()),
                };
            }
            "slime_split_chance" => {
                let chance: u32 = value.parse().map_err(|_| invalid())?;
                if chance > 100 {
                    return Err(invalid());
                }
                self.slime_split_chance = chance;
            }
            "dragon_shot" => {
                let odds: u32 = value.parse().map_err(|_| invalid())?;
                if odds == 0 {
                    return Err(invalid());
                }
                self.dragon_shot = odds;
            }
            "throws_affect_mimics" | "wizard" => {
                let flag = match value {
                    "true" | "yes" | "on" | "1" => true,
                    "false" | "no" | "off" | "0" => false,
                    _ => return Err(invalid()),
                };
                return self.set_bool_option(name, flag);
            }
            _ => return Err(OptionsError::UnknownOption(name.to_string())),
        }
        Ok(())
    }

    /// Render options back to rc format
    pub fn to_config_string(&self) -> String {
        let flag = |on: bool, name: &str| if on { name.to_string() } else { format!("!{name}") };
        let striking = match self.striking_charge {
            StrikingChargePolicy::DoubleDrain => "double",
            StrikingChargePolicy::SingleDrain => "single",
        };
        format!(
            "OPTIONS={},{},striking_charge:{},slime_split_chance:{},dragon_shot:{}\n",
            flag(self.wizard, "wizard"),
            flag(self.throws_affect_mimics, "throws_affect_mimics"),
            striking,
            self.slime_split_chance,
            self.dragon_shot,
        )
    }
}

/// Options parsing error
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OptionsError {
    #[error("IO error: {0}")]
    Io(String),

    #[error("Unknown option: {0}")]
    UnknownOption(String),

    #[error("Invalid value '{1}' for option '{0}'")]
    InvalidValue(String, String),

    #[error("Missing value for option: {0}")]
    MissingValue(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let opts = SimOptions::default();
        assert_eq!(opts.striking_charge, StrikingChargePolicy::DoubleDrain);
        assert!(!opts.throws_affect_mimics);
        assert_eq!(opts.slime_split_chance, 50);
        assert_eq!(opts.dragon_shot, DRAGONSHOT);
    }

    #[test]
    fn test_parse_bool_option() {
        let config = "# test\nOPTIONS=wizard,!throws_affect_mimics";
        let opts = SimOptions::parse_config(config).unwrap();
        assert!(opts.wizard);
        assert!(!opts.throws_affect_mimics);

        let opts = SimOptions::parse_config("OPTIONS=throws_affect_mimics,nowizard").unwrap();
        assert!(opts.throws_affect_mimics);
        assert!(!opts.wizard);
    }

    #[test]
    fn test_parse_value_option() {
        let config = "OPTIONS=slime_split_chance:25,striking_charge:single,dragon_shot=3";
        let opts = SimOptions::parse_config(config).unwrap();
        assert_eq!(opts.slime_split_chance, 25);
        assert_eq!(opts.striking_charge, StrikingChargePolicy::SingleDrain);
        assert_eq!(opts.dragon_shot, 3);
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(
            SimOptions::parse_config("OPTIONS=color"),
            Err(OptionsError::UnknownOption("color".to_string()))
        );
        assert_eq!(
            SimOptions::parse_config("OPTIONS=slime_split_chance:lots"),
            Err(OptionsError::InvalidValue(
                "slime_split_chance".to_string(),
                "lots".to_string()
            ))
        );
        assert_eq!(
            SimOptions::parse_config("OPTIONS=dragon_shot"),
            Err(OptionsError::MissingValue("dragon_shot".to_string()))
        );
        assert!(SimOptions::parse_config("OPTIONS=dragon_shot:0").is_err());
    }

    #[test]
    fn test_roundtrip() {
        let opts = SimOptions {
            striking_charge: StrikingChargePolicy::SingleDrain,
            throws_affect_mimics: true,
            slime_split_chance: 10,
            dragon_shot: 7,
            wizard: false,
        };
        let config = opts.to_config_string();
        let parsed = SimOptions::parse_config(&config).unwrap();
        assert_eq!(parsed, opts);
    }

    #[test]
    fn test_load_missing_file() {
        let err = SimOptions::load_from_file(Path::new("/nonexistent/rgrc")).unwrap_err();
        assert!(matches!(err, OptionsError::Io(_)));
    }
}
