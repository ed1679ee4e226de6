//! HTTP client for the training service
//!
//! All endpoints answer a JSON envelope with a `status` field; anything other
//! than `"success"` is surfaced as an application failure carrying the
//! service's message. Transport problems are network failures. The poller
//! consumes this through the `DashboardApi` trait so it can be tested with
//! mocks.

use crate::error::{DashboardError, Result};
use crate::models::{LayerInfo, ModelInfo, ModelKind, PredictionBatch, Sample};
use async_trait::async_trait;
use chrono::{DateTime, NaiveDateTime, Utc};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::time::Duration;
use tracing::debug;
use url::Url;

/// Endpoints of the training service consumed by the dashboard
#[async_trait]
pub trait DashboardApi: Send + Sync {
    /// `POST /api/train/{kind}` - train a fresh model
    async fn train(&self, kind: ModelKind) -> Result<TrainOutcome>;

    /// `GET /api/performance` - current metrics as a timestamped sample
    async fn performance(&self) -> Result<(ModelKind, Sample)>;

    /// `GET /api/predictions?n={n}` - a sample of model predictions
    async fn predictions(&self, n: usize) -> Result<(ModelKind, PredictionBatch)>;

    /// `GET /api/model/info` - architecture metadata
    async fn model_info(&self) -> Result<ModelInfo>;

    /// `GET /api/history/performance` - server-side sample history
    async fn performance_history(&self) -> Result<Vec<Sample>>;
}

/// Result of a training request
#[derive(Debug, Clone)]
pub struct TrainOutcome {
    pub message: String,
}

/// reqwest-backed implementation of `DashboardApi`
pub struct ApiClient {
    client: Client,
    base_url: Url,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;
        let base_url = Url::parse(base_url)?;

        Ok(Self { client, base_url })
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = self.base_url.join(path)?;
        let response = self.client.get(url).send().await?;
        read_json(response).await
    }

    async fn post<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = self.base_url.join(path)?;
        let response = self.client.post(url).send().await?;
        read_json(response).await
    }
}

#[async_trait]
impl DashboardApi for ApiClient {
    async fn train(&self, kind: ModelKind) -> Result<TrainOutcome> {
        let path = format!("api/train/{}", kind.as_str());
        let resp: TrainResponse = self.post(&path).await?;
        ensure_success(&resp.status, resp.message.as_deref())?;

        Ok(TrainOutcome {
            message: resp
                .message
                .unwrap_or_else(|| format!("{kind} model trained")),
        })
    }

    async fn performance(&self) -> Result<(ModelKind, Sample)> {
        let resp: PerformanceResponse = self.get("api/performance").await?;
        ensure_success(&resp.status, resp.message.as_deref())?;

        let metrics = resp
            .metrics
            .ok_or_else(|| DashboardError::Application("performance response missing metrics".into()))?;
        let kind = resp
            .model_type
            .ok_or_else(|| DashboardError::Application("performance response missing model type".into()))?;

        Ok((kind, metrics.into_sample()))
    }

    async fn predictions(&self, n: usize) -> Result<(ModelKind, PredictionBatch)> {
        let path = format!("api/predictions?n={n}");
        let resp: PredictionsResponse = self.get(&path).await?;
        ensure_success(&resp.status, resp.message.as_deref())?;

        let batch = resp
            .predictions
            .ok_or_else(|| DashboardError::Application("predictions response missing batch".into()))?;
        if !batch.is_consistent() {
            return Err(DashboardError::Application(
                "prediction arrays disagree in length".into(),
            ));
        }
        let kind = resp
            .model_type
            .ok_or_else(|| DashboardError::Application("predictions response missing model type".into()))?;

        Ok((kind, batch))
    }

    async fn model_info(&self) -> Result<ModelInfo> {
        let resp: ModelInfoResponse = self.get("api/model/info").await?;
        ensure_success(&resp.status, resp.message.as_deref())?;

        match (resp.model_type, resp.total_params) {
            (Some(model_type), Some(total_params)) => Ok(ModelInfo {
                model_type,
                total_params,
                layers: resp.layers,
            }),
            _ => Err(DashboardError::Application(
                "model info response missing fields".into(),
            )),
        }
    }

    async fn performance_history(&self) -> Result<Vec<Sample>> {
        let resp: HistoryResponse = self.get("api/history/performance").await?;
        ensure_success(&resp.status, resp.message.as_deref())?;

        Ok(resp
            .history
            .into_iter()
            .map(WireSample::into_sample)
            .collect())
    }
}

/// Map HTTP-level failures onto the error taxonomy, then deserialize
async fn read_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorEnvelope>(&body)
            .map(|e| e.message)
            .unwrap_or_else(|_| format!("HTTP {status}"));
        return Err(DashboardError::Application(message));
    }

    Ok(response.json().await?)
}

fn ensure_success(status: &str, message: Option<&str>) -> Result<()> {
    if status == "success" {
        return Ok(());
    }
    Err(DashboardError::Application(
        message
            .filter(|m| !m.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| format!("service returned status {status}")),
    ))
}

/// The service emits naive ISO timestamps without a zone; treat them as UTC
/// and fall back to receipt time when unparseable.
fn parse_timestamp(raw: &str) -> DateTime<Utc> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return ts.with_timezone(&Utc);
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return naive.and_utc();
    }
    debug!(raw, "unparseable sample timestamp, using receipt time");
    Utc::now()
}

// Wire types

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    #[allow(dead_code)]
    status: String,
    message: String,
}

#[derive(Debug, Deserialize)]
struct TrainResponse {
    status: String,
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct WireSample {
    timestamp: String,
    #[serde(flatten)]
    values: BTreeMap<String, f64>,
}

impl WireSample {
    fn into_sample(self) -> Sample {
        let timestamp = parse_timestamp(&self.timestamp);
        Sample::new(self.values, timestamp)
    }
}

#[derive(Debug, Deserialize)]
struct PerformanceResponse {
    status: String,
    message: Option<String>,
    metrics: Option<WireSample>,
    model_type: Option<ModelKind>,
}

#[derive(Debug, Deserialize)]
struct PredictionsResponse {
    status: String,
    message: Option<String>,
    predictions: Option<PredictionBatch>,
    model_type: Option<ModelKind>,
}

#[derive(Debug, Deserialize)]
struct ModelInfoResponse {
    status: String,
    message: Option<String>,
    model_type: Option<ModelKind>,
    total_params: Option<u64>,
    #[serde(default)]
    layers: Vec<LayerInfo>,
}

#[derive(Debug, Deserialize)]
struct HistoryResponse {
    status: String,
    message: Option<String>,
    #[serde(default)]
    history: Vec<WireSample>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[tokio::test]
    async fn performance_parses_sample_and_kind() {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("GET", "/api/performance")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"status":"success","model_type":"classification",
                    "metrics":{"accuracy":0.91,"precision":0.88,
                               "timestamp":"2024-01-01T12:00:00.500000"}}"#,
            )
            .create_async()
            .await;

        let client = ApiClient::new(&server.url()).unwrap();
        let (kind, sample) = client.performance().await.unwrap();

        assert_eq!(kind, ModelKind::Classification);
        assert_eq!(sample.metric("accuracy"), Some(0.91));
        assert_eq!(
            sample.timestamp,
            Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap()
                + chrono::Duration::milliseconds(500)
        );
    }

    #[tokio::test]
    async fn error_envelope_maps_to_application_failure() {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("GET", "/api/performance")
            .with_status(400)
            .with_body(r#"{"status":"error","message":"No model trained yet"}"#)
            .create_async()
            .await;

        let client = ApiClient::new(&server.url()).unwrap();
        let err = client.performance().await.unwrap_err();

        assert!(err.is_application());
        assert!(err.to_string().contains("No model trained yet"));
    }

    #[tokio::test]
    async fn unreachable_host_maps_to_network_failure() {
        // Discard port; nothing listens there
        let client = ApiClient::new("http://127.0.0.1:9").unwrap();
        let err = client.performance().await.unwrap_err();
        assert!(err.is_network());
    }

    #[tokio::test]
    async fn mismatched_prediction_arrays_are_rejected() {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("GET", "/api/predictions?n=20")
            .with_status(200)
            .with_body(
                r#"{"status":"success","model_type":"classification",
                    "predictions":{"indices":[1,2],"actual":[1.0],
                                   "predicted":[1.0,0.0],"confidence":[0.9,0.8]}}"#,
            )
            .create_async()
            .await;

        let client = ApiClient::new(&server.url()).unwrap();
        let err = client.predictions(20).await.unwrap_err();

        assert!(err.is_application());
        assert!(err.to_string().contains("disagree in length"));
    }

    #[tokio::test]
    async fn train_posts_to_kind_path() {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("POST", "/api/train/regression")
            .with_status(200)
            .with_body(r#"{"status":"success","message":"Regression model trained successfully"}"#)
            .create_async()
            .await;

        let client = ApiClient::new(&server.url()).unwrap();
        let outcome = client.train(ModelKind::Regression).await.unwrap();
        assert!(outcome.message.contains("Regression"));
    }

    #[tokio::test]
    async fn history_endpoint_yields_samples_in_order() {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("GET", "/api/history/performance")
            .with_status(200)
            .with_body(
                r#"{"status":"success","history":[
                    {"accuracy":0.8,"timestamp":"2024-01-01T12:00:00"},
                    {"accuracy":0.9,"timestamp":"2024-01-01T12:00:05"}]}"#,
            )
            .create_async()
            .await;

        let client = ApiClient::new(&server.url()).unwrap();
        let history = client.performance_history().await.unwrap();

        assert_eq!(history.len(), 2);
        assert!(history[0].timestamp < history[1].timestamp);
        assert_eq!(history[1].metric("accuracy"), Some(0.9));
    }

    #[test]
    fn timestamp_parsing_handles_rfc3339_and_naive() {
        let naive = parse_timestamp("2024-01-01T12:00:00.250000");
        assert_eq!(
            naive,
            Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap()
                + chrono::Duration::milliseconds(250)
        );

        let zoned = parse_timestamp("2024-01-01T12:00:00+02:00");
        assert_eq!(zoned, Utc.with_ymd_and_hms(2024, 1, 1, 10, 0, 0).unwrap());
    }
}
