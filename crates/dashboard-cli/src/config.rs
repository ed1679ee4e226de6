//! Dashboard configuration

use anyhow::Result;
use dashboard_lib::PollerConfig;
use serde::Deserialize;
use std::time::Duration;

/// Dashboard configuration, loaded from the environment
#[derive(Debug, Clone, Deserialize)]
pub struct DashboardConfig {
    /// Training service base URL
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Refresh period for real-time updates in seconds
    #[serde(default = "default_poll_interval")]
    pub poll_interval_secs: u64,

    /// Number of retained performance samples
    #[serde(default = "default_history_capacity")]
    pub history_capacity: usize,

    /// Predictions requested per refresh
    #[serde(default = "default_prediction_sample_size")]
    pub prediction_sample_size: usize,
}

fn default_api_url() -> String {
    "http://localhost:5000".to_string()
}

fn default_poll_interval() -> u64 {
    5
}

fn default_history_capacity() -> usize {
    50
}

fn default_prediction_sample_size() -> usize {
    20
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            poll_interval_secs: default_poll_interval(),
            history_capacity: default_history_capacity(),
            prediction_sample_size: default_prediction_sample_size(),
        }
    }
}

impl DashboardConfig {
    /// Load configuration from the MLDASH_-prefixed environment
    pub fn load() -> Result<Self> {
        let config = config::Config::builder()
            .add_source(config::Environment::with_prefix("MLDASH"))
            .build()?;

        Ok(config.try_deserialize().unwrap_or_default())
    }

    pub fn poller_config(&self) -> PollerConfig {
        PollerConfig {
            interval: Duration::from_secs(self.poll_interval_secs),
            history_capacity: self.history_capacity,
            prediction_sample_size: self.prediction_sample_size,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_service_conventions() {
        let config = DashboardConfig::default();
        assert_eq!(config.api_url, "http://localhost:5000");
        assert_eq!(config.poll_interval_secs, 5);
        assert_eq!(config.history_capacity, 50);
        assert_eq!(config.prediction_sample_size, 20);
    }

    #[test]
    fn poller_config_carries_interval() {
        let config = DashboardConfig {
            poll_interval_secs: 2,
            ..DashboardConfig::default()
        };
        let poller = config.poller_config();
        assert_eq!(poller.interval, Duration::from_secs(2));
        assert_eq!(poller.history_capacity, 50);
    }
}
