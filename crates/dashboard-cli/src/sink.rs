//! Terminal implementation of the render seam
//!
//! Turns the library's pure view descriptions into tables and status lines.

use crate::output::{
    self, color_correct, format_confidence, format_model_size, OutputFormat,
};
use async_trait::async_trait;
use dashboard_lib::render::{RenderSink, StatusLevel};
use dashboard_lib::view::{metric_cards, prediction_rows, trend_points};
use dashboard_lib::{ModelInfo, ModelKind, PredictionBatch, Sample};
use serde::Serialize;
use tabled::Tabled;

pub struct TerminalSink {
    format: OutputFormat,
}

impl TerminalSink {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Print a one-line trend summary over the headline metric
    pub fn render_trend(&self, kind: ModelKind, history: &[Sample]) {
        let points = trend_points(kind, history);
        if points.len() < 2 {
            return;
        }
        let first = points.first().map(|p| p.1).unwrap_or_default();
        let last = points.last().map(|p| p.1).unwrap_or_default();
        output::print_info(&format!(
            "{} trend over {} samples: {:.3} -> {:.3}",
            kind.headline_metric(),
            points.len(),
            first,
            last
        ));
    }
}

#[derive(Tabled, Serialize)]
struct MetricRow {
    #[tabled(rename = "Metric")]
    metric: String,
    #[tabled(rename = "Value")]
    value: String,
}

#[derive(Tabled, Serialize)]
struct PredictionTableRow {
    #[tabled(rename = "Index")]
    index: usize,
    #[tabled(rename = "Actual")]
    actual: String,
    #[tabled(rename = "Predicted")]
    predicted: String,
    #[tabled(rename = "Confidence")]
    confidence: String,
    #[tabled(rename = "Status")]
    status: String,
}

#[derive(Tabled, Serialize)]
struct LayerRow {
    #[tabled(rename = "Layer")]
    name: String,
    #[tabled(rename = "Type")]
    layer_type: String,
    #[tabled(rename = "Output Shape")]
    output_shape: String,
    #[tabled(rename = "Params")]
    param_count: u64,
}

#[async_trait]
impl RenderSink for TerminalSink {
    async fn render_sample(&self, kind: ModelKind, sample: &Sample) {
        let rows: Vec<MetricRow> = metric_cards(kind, sample)
            .into_iter()
            .map(|card| MetricRow {
                metric: card.label.to_string(),
                value: card.value,
            })
            .collect();

        println!();
        output::print_info(&format!(
            "{} metrics at {}",
            kind,
            sample.timestamp.format("%H:%M:%S")
        ));
        output::print_table(&rows, self.format);
    }

    async fn render_predictions(&self, kind: ModelKind, batch: &PredictionBatch) {
        let rows: Vec<PredictionTableRow> = prediction_rows(batch)
            .into_iter()
            .map(|row| PredictionTableRow {
                index: row.index,
                actual: format!("{:.3}", row.actual),
                predicted: format!("{:.3}", row.predicted),
                confidence: format_confidence(row.confidence),
                // Correctness coloring only means something for class labels
                status: match kind {
                    ModelKind::Classification => color_correct(row.correct),
                    ModelKind::Regression => "-".to_string(),
                },
            })
            .collect();

        output::print_table(&rows, self.format);
    }

    async fn render_model_info(&self, info: &ModelInfo) {
        let rows: Vec<LayerRow> = info
            .layers
            .iter()
            .map(|layer| LayerRow {
                name: layer.name.clone(),
                layer_type: layer.layer_type.clone(),
                output_shape: layer.output_shape.clone(),
                param_count: layer.param_count,
            })
            .collect();

        output::print_info(&format!(
            "{} model, {} parameters ({})",
            info.model_type,
            info.total_params,
            format_model_size(info.total_params)
        ));
        output::print_table(&rows, self.format);
    }

    fn status(&self, level: StatusLevel, message: &str) {
        match level {
            StatusLevel::Info => output::print_info(message),
            StatusLevel::Success => output::print_success(message),
            StatusLevel::Warning => output::print_warning(message),
            StatusLevel::Error => output::print_error(message),
        }
    }
}
