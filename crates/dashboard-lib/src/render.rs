//! Render seam between the polling core and any presentation surface
//!
//! The core only pushes data through this trait; what the sink does with it
//! (terminal tables, JSON, nothing) is its own business.

use crate::models::{ModelInfo, ModelKind, PredictionBatch, Sample};

pub use async_trait::async_trait;

/// Severity of a transient status message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// Sink for data produced by the polling controller
#[async_trait]
pub trait RenderSink: Send + Sync {
    /// A fresh performance sample arrived
    async fn render_sample(&self, kind: ModelKind, sample: &Sample);

    /// A fresh prediction batch arrived
    async fn render_predictions(&self, kind: ModelKind, batch: &PredictionBatch);

    /// Model architecture metadata, shown once after training or on attach
    async fn render_model_info(&self, info: &ModelInfo);

    /// Transient user-visible status line
    fn status(&self, level: StatusLevel, message: &str);
}
