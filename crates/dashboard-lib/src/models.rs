//! Core data models for the dashboard

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Category of model the training service can serve
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelKind {
    Classification,
    Regression,
}

impl ModelKind {
    /// Path segment used by the training endpoint
    pub fn as_str(&self) -> &'static str {
        match self {
            ModelKind::Classification => "classification",
            ModelKind::Regression => "regression",
        }
    }

    /// Metric plotted in the trend view for this kind
    pub fn headline_metric(&self) -> &'static str {
        match self {
            ModelKind::Classification => "accuracy",
            ModelKind::Regression => "r2_score",
        }
    }
}

impl fmt::Display for ModelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ModelKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "classification" => Ok(ModelKind::Classification),
            "regression" => Ok(ModelKind::Regression),
            other => Err(format!("unknown model kind: {other}")),
        }
    }
}

/// One timestamped performance observation. Immutable once recorded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    /// Named numeric fields (accuracy, rmse, ...) as reported by the service
    pub metrics: BTreeMap<String, f64>,
    pub timestamp: DateTime<Utc>,
}

impl Sample {
    pub fn new(metrics: BTreeMap<String, f64>, timestamp: DateTime<Utc>) -> Self {
        Self { metrics, timestamp }
    }

    /// Look up a metric by name
    pub fn metric(&self, name: &str) -> Option<f64> {
        self.metrics.get(name).copied()
    }
}

/// Parallel prediction arrays returned by the predictions endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionBatch {
    pub indices: Vec<usize>,
    pub actual: Vec<f64>,
    pub predicted: Vec<f64>,
    pub confidence: Vec<f64>,
}

impl PredictionBatch {
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// All four sequences must agree in length
    pub fn is_consistent(&self) -> bool {
        let n = self.indices.len();
        self.actual.len() == n && self.predicted.len() == n && self.confidence.len() == n
    }
}

/// Model architecture metadata, rendering only
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelInfo {
    pub model_type: ModelKind,
    pub total_params: u64,
    pub layers: Vec<LayerInfo>,
}

/// One layer entry of the model summary
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayerInfo {
    pub name: String,
    #[serde(rename = "type")]
    pub layer_type: String,
    pub output_shape: String,
    pub param_count: u64,
}
