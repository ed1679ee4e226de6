//! Real-time update lifecycle
//!
//! The controller owns the poll timer and the bounded performance history.
//! It is either Idle or Polling: the timer task exists iff real-time updates
//! are enabled AND a model kind is known. Arming always clears the previous
//! timer first, so at most one ticker ever runs.

use crate::client::DashboardApi;
use crate::history::{HistoryBuffer, DEFAULT_CAPACITY};
use crate::models::{ModelKind, Sample};
use crate::render::{RenderSink, StatusLevel};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{debug, warn};

/// Default refresh period for real-time updates
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(5);

/// Default number of predictions requested per refresh
pub const DEFAULT_PREDICTION_SAMPLE: usize = 20;

/// Configuration for the polling controller
#[derive(Debug, Clone)]
pub struct PollerConfig {
    /// Period between refresh ticks
    pub interval: Duration,
    /// Number of retained performance samples
    pub history_capacity: usize,
    /// Predictions requested on each tick
    pub prediction_sample_size: usize,
}

impl Default for PollerConfig {
    fn default() -> Self {
        Self {
            interval: DEFAULT_POLL_INTERVAL,
            history_capacity: DEFAULT_CAPACITY,
            prediction_sample_size: DEFAULT_PREDICTION_SAMPLE,
        }
    }
}

struct PollState {
    /// Real-time toggle; starts on, like the dashboard toggle it mirrors
    enabled: bool,
    model_kind: Option<ModelKind>,
    timer: Option<JoinHandle<()>>,
}

struct Inner {
    api: Arc<dyn DashboardApi>,
    sink: Arc<dyn RenderSink>,
    config: PollerConfig,
    state: Mutex<PollState>,
    history: Mutex<HistoryBuffer>,
}

/// Drives periodic metric and prediction refreshes against the training
/// service. Cheap to clone; all clones share one state and history.
#[derive(Clone)]
pub struct PollingController {
    inner: Arc<Inner>,
}

impl PollingController {
    pub fn new(
        api: Arc<dyn DashboardApi>,
        sink: Arc<dyn RenderSink>,
        config: PollerConfig,
    ) -> Self {
        let history = HistoryBuffer::with_capacity(config.history_capacity);

        Self {
            inner: Arc::new(Inner {
                api,
                sink,
                config,
                state: Mutex::new(PollState {
                    enabled: true,
                    model_kind: None,
                    timer: None,
                }),
                history: Mutex::new(history),
            }),
        }
    }

    /// Record which trained-model category is active. Eligibility only; this
    /// never arms a timer by itself, so the controller may briefly sit idle
    /// with updates enabled and a kind set. The next `set_enabled(true)` or
    /// `on_train_success` call starts polling.
    pub async fn set_model_kind(&self, kind: ModelKind) {
        let mut state = self.inner.state.lock().await;
        state.model_kind = Some(kind);
    }

    pub async fn model_kind(&self) -> Option<ModelKind> {
        self.inner.state.lock().await.model_kind
    }

    /// Toggle real-time updates. Enabling without a known model kind leaves
    /// the controller idle; enabling while already polling replaces the
    /// timer rather than stacking a second one.
    pub async fn set_enabled(&self, enabled: bool) {
        let mut state = self.inner.state.lock().await;
        state.enabled = enabled;

        if !enabled {
            Self::clear_timer(&mut state);
            return;
        }

        if state.model_kind.is_some() {
            self.arm_timer(&mut state);
        } else {
            debug!("real-time updates requested with no trained model, staying idle");
        }
    }

    /// Transition taken when the training endpoint reports success: the new
    /// kind becomes active and, unless updates were toggled off, polling
    /// starts.
    pub async fn on_train_success(&self, kind: ModelKind) {
        let mut state = self.inner.state.lock().await;
        state.model_kind = Some(kind);
        if state.enabled {
            self.arm_timer(&mut state);
        }
    }

    /// Stop periodic refresh. Safe when already idle. Fetches already in
    /// flight are not cancelled; their results are still applied on arrival.
    pub async fn stop(&self) {
        let mut state = self.inner.state.lock().await;
        state.enabled = false;
        Self::clear_timer(&mut state);
    }

    pub async fn is_polling(&self) -> bool {
        self.inner.state.lock().await.timer.is_some()
    }

    /// One refresh cycle: kick off both fetches without awaiting them, so a
    /// slow endpoint can never delay or skip the next tick.
    pub async fn tick(&self) {
        let metrics = self.clone();
        tokio::spawn(async move { metrics.fetch_metrics().await });

        let predictions = self.clone();
        tokio::spawn(async move { predictions.fetch_predictions().await });
    }

    /// Awaited variant of `tick` for one-shot callers: both fetches complete
    /// before this returns. Detached fetches die with the runtime, so exits
    /// that follow immediately must use this instead.
    pub async fn refresh(&self) {
        tokio::join!(self.fetch_metrics(), self.fetch_predictions());
    }

    /// Append one observation, evicting the oldest once capacity is exceeded
    pub async fn record_sample(&self, sample: Sample) {
        self.inner.history.lock().await.push(sample);
    }

    /// Snapshot of retained samples, oldest first
    pub async fn history(&self) -> Vec<Sample> {
        self.inner.history.lock().await.snapshot()
    }

    async fn fetch_metrics(&self) {
        match self.inner.api.performance().await {
            Ok((kind, sample)) => {
                self.record_sample(sample.clone()).await;
                self.inner.sink.render_sample(kind, &sample).await;
            }
            Err(e) => {
                warn!(error = %e, "performance refresh failed");
                self.inner
                    .sink
                    .status(StatusLevel::Warning, &format!("performance refresh failed: {e}"));
            }
        }
    }

    async fn fetch_predictions(&self) {
        let n = self.inner.config.prediction_sample_size;
        match self.inner.api.predictions(n).await {
            Ok((kind, batch)) => {
                self.inner.sink.render_predictions(kind, &batch).await;
            }
            Err(e) => {
                warn!(error = %e, "predictions refresh failed");
                self.inner
                    .sink
                    .status(StatusLevel::Warning, &format!("predictions refresh failed: {e}"));
            }
        }
    }

    /// Replace any armed timer with a fresh one. Caller holds the state lock.
    fn arm_timer(&self, state: &mut PollState) {
        Self::clear_timer(state);

        let controller = self.clone();
        let period = self.inner.config.interval;
        state.timer = Some(tokio::spawn(async move {
            let mut ticker = interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // interval yields immediately; the first refresh belongs one full
            // period after arming
            ticker.tick().await;
            loop {
                ticker.tick().await;
                controller.tick().await;
            }
        }));
        debug!(period_ms = period.as_millis() as u64, "poll timer armed");
    }

    fn clear_timer(state: &mut PollState) {
        if let Some(timer) = state.timer.take() {
            timer.abort();
        }
    }
}
