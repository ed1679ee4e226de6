//! Pure view descriptions derived from dashboard data
//!
//! Builders here only shape data for presentation; they never touch a
//! terminal or any other surface.

use crate::models::{ModelKind, PredictionBatch, Sample};
use chrono::{DateTime, Utc};

/// One labelled metric value for the summary cards
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricCard {
    pub label: &'static str,
    pub value: String,
}

#[derive(Clone, Copy)]
enum Format {
    Percent,
    Raw,
}

impl Format {
    fn apply(self, value: f64) -> String {
        match self {
            Format::Percent => format!("{:.1}%", value * 100.0),
            Format::Raw => format!("{value:.3}"),
        }
    }
}

/// Summary cards for one sample. Classification shows its quality metrics as
/// percentages; regression shows error magnitudes raw. Metrics the sample
/// does not carry are skipped.
pub fn metric_cards(kind: ModelKind, sample: &Sample) -> Vec<MetricCard> {
    let layout: &[(&str, &'static str, Format)] = match kind {
        ModelKind::Classification => &[
            ("accuracy", "Accuracy", Format::Percent),
            ("precision", "Precision", Format::Percent),
            ("recall", "Recall", Format::Percent),
            ("f1_score", "F1 Score", Format::Percent),
        ],
        ModelKind::Regression => &[
            ("rmse", "RMSE", Format::Raw),
            ("mae", "MAE", Format::Raw),
            ("r2_score", "R2 Score", Format::Percent),
            ("mse", "MSE", Format::Raw),
        ],
    };

    layout
        .iter()
        .filter_map(|&(key, label, format)| {
            sample.metric(key).map(|value| MetricCard {
                label,
                value: format.apply(value),
            })
        })
        .collect()
}

/// One row of the predictions table
#[derive(Debug, Clone, PartialEq)]
pub struct PredictionRow {
    pub index: usize,
    pub actual: f64,
    pub predicted: f64,
    pub confidence: f64,
    /// Exact label match; only meaningful for classification output
    pub correct: bool,
}

/// Zip the parallel arrays into rows. Expects a consistent batch; the client
/// rejects mismatched arrays before they get here.
pub fn prediction_rows(batch: &PredictionBatch) -> Vec<PredictionRow> {
    batch
        .indices
        .iter()
        .zip(&batch.actual)
        .zip(&batch.predicted)
        .zip(&batch.confidence)
        .map(|(((&index, &actual), &predicted), &confidence)| PredictionRow {
            index,
            actual,
            predicted,
            confidence,
            correct: actual == predicted,
        })
        .collect()
}

/// Headline-metric trend over retained history, oldest first. Samples missing
/// the headline metric are skipped.
pub fn trend_points(kind: ModelKind, samples: &[Sample]) -> Vec<(DateTime<Utc>, f64)> {
    let key = kind.headline_metric();
    samples
        .iter()
        .filter_map(|s| s.metric(key).map(|v| (s.timestamp, v)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::collections::BTreeMap;

    fn classification_sample() -> Sample {
        let mut metrics = BTreeMap::new();
        metrics.insert("accuracy".to_string(), 0.912);
        metrics.insert("precision".to_string(), 0.88);
        metrics.insert("recall".to_string(), 0.9);
        metrics.insert("f1_score".to_string(), 0.89);
        Sample::new(metrics, Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap())
    }

    #[test]
    fn classification_cards_show_percentages() {
        let cards = metric_cards(ModelKind::Classification, &classification_sample());
        assert_eq!(cards.len(), 4);
        assert_eq!(cards[0].label, "Accuracy");
        assert_eq!(cards[0].value, "91.2%");
        assert_eq!(cards[3].label, "F1 Score");
        assert_eq!(cards[3].value, "89.0%");
    }

    #[test]
    fn regression_cards_mix_raw_and_percent() {
        let mut metrics = BTreeMap::new();
        metrics.insert("rmse".to_string(), 0.4567);
        metrics.insert("mae".to_string(), 0.321);
        metrics.insert("r2_score".to_string(), 0.87);
        metrics.insert("mse".to_string(), 0.2086);
        let sample = Sample::new(metrics, Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap());

        let cards = metric_cards(ModelKind::Regression, &sample);
        assert_eq!(cards.len(), 4);
        assert_eq!(cards[0].value, "0.457");
        assert_eq!(cards[2].label, "R2 Score");
        assert_eq!(cards[2].value, "87.0%");
    }

    #[test]
    fn missing_metrics_are_skipped() {
        let mut metrics = BTreeMap::new();
        metrics.insert("accuracy".to_string(), 0.5);
        let sample = Sample::new(metrics, Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap());

        let cards = metric_cards(ModelKind::Classification, &sample);
        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0].label, "Accuracy");
    }

    #[test]
    fn prediction_rows_flag_matches() {
        let batch = PredictionBatch {
            indices: vec![7, 42],
            actual: vec![1.0, 2.0],
            predicted: vec![1.0, 0.0],
            confidence: vec![0.95, 0.6],
        };
        let rows = prediction_rows(&batch);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].index, 7);
        assert!(rows[0].correct);
        assert!(!rows[1].correct);
    }

    #[test]
    fn trend_uses_headline_metric_per_kind() {
        let mut metrics = BTreeMap::new();
        metrics.insert("accuracy".to_string(), 0.9);
        metrics.insert("r2_score".to_string(), 0.7);
        let samples = vec![Sample::new(
            metrics,
            Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap(),
        )];

        let classification = trend_points(ModelKind::Classification, &samples);
        assert_eq!(classification[0].1, 0.9);
        let regression = trend_points(ModelKind::Regression, &samples);
        assert_eq!(regression[0].1, 0.7);
    }
}
