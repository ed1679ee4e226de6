//! Dashboard CLI commands

use crate::config::DashboardConfig;
use crate::output::OutputFormat;
use crate::sink::TerminalSink;
use anyhow::{Context, Result};
use dashboard_lib::render::{RenderSink, StatusLevel};
use dashboard_lib::{
    ApiClient, DashboardApi, ModelKind, PollingController,
};
use std::sync::Arc;
use tracing::{debug, info};

fn api_client(config: &DashboardConfig) -> Result<Arc<ApiClient>> {
    let client = ApiClient::new(&config.api_url)
        .with_context(|| format!("failed to build API client for {}", config.api_url))?;
    Ok(Arc::new(client))
}

fn controller(
    config: &DashboardConfig,
    api: Arc<ApiClient>,
    sink: Arc<TerminalSink>,
) -> PollingController {
    PollingController::new(api, sink, config.poller_config())
}

/// Train a model; on success mirror the dashboard's post-training sequence:
/// model info, an immediate refresh, then real-time updates.
pub async fn train(
    config: &DashboardConfig,
    kind: ModelKind,
    watch: bool,
    format: OutputFormat,
) -> Result<()> {
    let api = api_client(config)?;
    let sink = Arc::new(TerminalSink::new(format));

    sink.status(StatusLevel::Info, &format!("Training {kind} model..."));
    let outcome = api
        .train(kind)
        .await
        .context("training request failed")?;
    sink.status(StatusLevel::Success, &outcome.message);

    match api.model_info().await {
        Ok(model) => sink.render_model_info(&model).await,
        Err(e) => debug!(error = %e, "model info unavailable after training"),
    }

    let controller = controller(config, api, sink);

    if watch {
        controller.tick().await;
        controller.on_train_success(kind).await;
        run_until_interrupt(controller).await?;
    } else {
        // Detached tick fetches would be cancelled when main returns; await
        // the one-shot refresh so the first results actually render.
        controller.refresh().await;
    }
    Ok(())
}

/// Attach to an already-trained model and poll until interrupted
pub async fn watch(config: &DashboardConfig, format: OutputFormat) -> Result<()> {
    let api = api_client(config)?;
    let sink = Arc::new(TerminalSink::new(format));

    let model = api
        .model_info()
        .await
        .context("no trained model available; run `mldash train` first")?;
    sink.render_model_info(&model).await;

    let controller = controller(config, api.clone(), sink.clone());

    // Backfill the trend from the server-side history; the buffer keeps the
    // most recent window on its own.
    match api.performance_history().await {
        Ok(history) => {
            let count = history.len();
            for sample in history {
                controller.record_sample(sample).await;
            }
            debug!(samples = count, "backfilled performance history");
            sink.render_trend(model.model_type, &controller.history().await);
        }
        Err(e) => debug!(error = %e, "no server-side history available"),
    }

    controller.set_model_kind(model.model_type).await;
    controller.set_enabled(true).await;
    controller.tick().await;

    run_until_interrupt(controller).await
}

/// One-shot fetch of current performance metrics
pub async fn performance(config: &DashboardConfig, format: OutputFormat) -> Result<()> {
    let api = api_client(config)?;
    let sink = TerminalSink::new(format);

    let (kind, sample) = api
        .performance()
        .await
        .context("failed to fetch performance metrics")?;
    sink.render_sample(kind, &sample).await;
    Ok(())
}

/// One-shot fetch of a prediction sample
pub async fn predictions(
    config: &DashboardConfig,
    count: usize,
    format: OutputFormat,
) -> Result<()> {
    let api = api_client(config)?;
    let sink = TerminalSink::new(format);

    let (kind, batch) = api
        .predictions(count)
        .await
        .context("failed to fetch predictions")?;
    sink.render_predictions(kind, &batch).await;
    Ok(())
}

/// Show model architecture
pub async fn info(config: &DashboardConfig, format: OutputFormat) -> Result<()> {
    let api = api_client(config)?;
    let sink = TerminalSink::new(format);

    let model = api
        .model_info()
        .await
        .context("failed to fetch model info")?;
    sink.render_model_info(&model).await;
    Ok(())
}

async fn run_until_interrupt(controller: PollingController) -> Result<()> {
    tokio::signal::ctrl_c()
        .await
        .context("failed to listen for ctrl-c")?;
    controller.stop().await;
    info!("polling stopped");
    Ok(())
}
