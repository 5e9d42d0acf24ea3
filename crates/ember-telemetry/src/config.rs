// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Telemetry configuration, loaded from JSON.

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Configuration for the telemetry service and logging.
///
/// Every field has a default, so a partial (or empty) JSON object is valid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TelemetryConfig {
    /// Whether monitors publish at all.
    pub enabled: bool,
    /// Minimum time between two publications from `tick`, in milliseconds.
    pub update_interval_ms: u64,
    /// Default `env_logger` filter, used when `RUST_LOG` is not set.
    pub log_filter: String,
    /// Namespace the draw-call metrics are registered under.
    pub namespace: String,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            update_interval_ms: 1000,
            log_filter: "info".to_string(),
            namespace: "renderer".to_string(),
        }
    }
}

impl TelemetryConfig {
    /// Parses a configuration from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Loads a configuration from a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read telemetry config {}", path.display()))?;
        Self::from_json(&content)
            .with_context(|| format!("failed to parse telemetry config {}", path.display()))
    }

    /// Serializes the configuration as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Saves the configuration to a JSON file.
    pub fn to_file(&self, path: impl AsRef<Path>) -> anyhow::Result<()> {
        let path = path.as_ref();
        let json = self.to_json()?;
        std::fs::write(path, json)
            .with_context(|| format!("failed to write telemetry config {}", path.display()))
    }

    /// The publication interval as a [`Duration`].
    pub fn update_interval(&self) -> Duration {
        Duration::from_millis(self.update_interval_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = TelemetryConfig::default();
        assert!(config.enabled);
        assert_eq!(config.update_interval(), Duration::from_secs(1));
        assert_eq!(config.log_filter, "info");
        assert_eq!(config.namespace, "renderer");
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let config = TelemetryConfig::from_json(r#"{ "update_interval_ms": 250 }"#).unwrap();
        assert_eq!(config.update_interval_ms, 250);
        assert!(config.enabled);
        assert_eq!(config.namespace, "renderer");
    }

    #[test]
    fn test_json_round_trip() {
        let config = TelemetryConfig {
            enabled: false,
            update_interval_ms: 16,
            log_filter: "debug".to_string(),
            namespace: "gfx".to_string(),
        };
        let parsed = TelemetryConfig::from_json(&config.to_json().unwrap()).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_invalid_json() {
        assert!(TelemetryConfig::from_json(r#"{ "enabled": "yes" }"#).is_err());
    }

    #[test]
    fn test_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("telemetry.json");

        let config = TelemetryConfig {
            update_interval_ms: 500,
            ..Default::default()
        };
        config.to_file(&path).unwrap();
        assert_eq!(TelemetryConfig::from_file(&path).unwrap(), config);
    }

    #[test]
    fn test_missing_file_names_path() {
        let err = TelemetryConfig::from_file("/definitely/not/here.json").unwrap_err();
        assert!(format!("{err:#}").contains("/definitely/not/here.json"));
    }
}
