// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Settings for a game session.
//!
//! This module provides data structures for loading and saving host
//! settings: acceptance mode, contestant count, and key bindings.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::matching::AcceptanceMode;

/// Root settings file
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct SettingsFile {
    /// Game rules
    #[serde(default)]
    pub game: GameSettings,
    /// Key bindings
    #[serde(default)]
    pub keys: KeySettings,
}

impl SettingsFile {
    /// Load settings from a YAML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read settings file: {:?}", path.as_ref()))?;
        Self::from_yaml(&contents)
    }

    /// Parse settings from YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml).context("Failed to parse YAML settings")
    }

    /// Serialize to YAML string
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).context("Failed to serialize settings to YAML")
    }

    /// Save settings to a YAML file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let yaml = self.to_yaml()?;
        fs::write(path.as_ref(), yaml)
            .with_context(|| format!("Failed to write settings file: {:?}", path.as_ref()))
    }
}

/// Game rules
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GameSettings {
    /// Acceptance mode for grading guesses
    #[serde(default)]
    pub mode: AcceptanceMode,
    /// Number of contestants (1-3)
    #[serde(default = "default_contestants")]
    pub contestants: u8,
    /// Shuffle the play order before starting
    #[serde(default)]
    pub shuffle: bool,
}

fn default_contestants() -> u8 {
    3
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            mode: AcceptanceMode::default(),
            contestants: default_contestants(),
            shuffle: false,
        }
    }
}

/// Key bindings, as parseable key names
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct KeySettings {
    /// One buzzer key per contestant slot
    #[serde(default = "default_buzzers")]
    pub buzzers: Vec<String>,
    /// The host's pass key
    #[serde(default = "default_pass")]
    pub pass: String,
}

fn default_buzzers() -> Vec<String> {
    vec!["z".to_string(), "space".to_string(), "/".to_string()]
}

fn default_pass() -> String {
    "p".to_string()
}

impl Default for KeySettings {
    fn default() -> Self {
        Self {
            buzzers: default_buzzers(),
            pass: default_pass(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_settings() {
        let yaml = r#"
game:
  mode: inclusive
  contestants: 2
  shuffle: true

keys:
  buzzers: ["a", "g", "l"]
  pass: "q"
"#;

        let settings = SettingsFile::from_yaml(yaml).unwrap();
        assert_eq!(settings.game.mode, AcceptanceMode::Inclusive);
        assert_eq!(settings.game.contestants, 2);
        assert!(settings.game.shuffle);
        assert_eq!(settings.keys.buzzers, vec!["a", "g", "l"]);
        assert_eq!(settings.keys.pass, "q");
    }

    #[test]
    fn test_default_values() {
        let yaml = r#"
game:
  mode: loose
"#;

        let settings = SettingsFile::from_yaml(yaml).unwrap();
        assert_eq!(settings.game.mode, AcceptanceMode::Loose);
        assert_eq!(settings.game.contestants, 3);
        assert!(!settings.game.shuffle);
        assert_eq!(settings.keys.buzzers, vec!["z", "space", "/"]);
        assert_eq!(settings.keys.pass, "p");
    }

    #[test]
    fn test_empty_file_is_all_defaults() {
        let settings = SettingsFile::from_yaml("{}").unwrap();
        assert_eq!(settings, SettingsFile::default());
        assert_eq!(settings.game.mode, AcceptanceMode::Strict);
    }

    #[test]
    fn test_round_trip() {
        let original = SettingsFile {
            game: GameSettings {
                mode: AcceptanceMode::Inclusive,
                contestants: 1,
                shuffle: true,
            },
            keys: KeySettings {
                buzzers: vec!["x".to_string(), "c".to_string(), "v".to_string()],
                pass: "enter".to_string(),
            },
        };

        let yaml = original.to_yaml().unwrap();
        let parsed = SettingsFile::from_yaml(&yaml).unwrap();
        assert_eq!(original, parsed);
    }

    #[test]
    fn test_unknown_mode_rejected() {
        let yaml = r#"
game:
  mode: lenient
"#;
        assert!(SettingsFile::from_yaml(yaml).is_err());
    }
}
