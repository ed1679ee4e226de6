//! Core library for the ML training dashboard
//!
//! This crate provides the non-presentational half of the dashboard:
//! - HTTP client for the training/inference service
//! - Bounded FIFO history of performance samples
//! - Real-time polling lifecycle (Idle/Polling state machine)
//! - Pure view builders behind a pluggable render seam

pub mod client;
pub mod error;
pub mod history;
pub mod models;
pub mod poller;
pub mod render;
pub mod view;

pub use client::{ApiClient, DashboardApi, TrainOutcome};
pub use error::{DashboardError, Result};
pub use history::HistoryBuffer;
pub use models::{LayerInfo, ModelInfo, ModelKind, PredictionBatch, Sample};
pub use poller::{PollerConfig, PollingController};
pub use render::{RenderSink, StatusLevel};
