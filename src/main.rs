use std::path::PathBuf;

use anyhow::Result;
use tokio::sync::{mpsc, watch};

use okx_quant::config::Config;
use okx_quant::event::AppEvent;
use okx_quant::okx::rest::OkxRestClient;
use okx_quant::okx::types::RawTicker;
use okx_quant::okx::ws::OkxWsClient;
use okx_quant::persist;
use okx_quant::prompt::PromptGenerator;
use okx_quant::report;
use okx_quant::session::{AnalysisSession, SessionEvent};

fn now_ms() -> u64 {
    chrono::Utc::now().timestamp_millis() as u64
}

#[tokio::main]
async fn main() -> Result<()> {
    // Install rustls crypto provider (required by rustls 0.23+)
    rustls::crypto::ring::default_provider()
        .install_default()
        .expect("Failed to install rustls crypto provider");

    let config = match Config::load() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load config: {:#}", e);
            std::process::exit(1);
        }
    };

    let log_file = std::fs::File::create("okx-quant.log")?;
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                config
                    .logging
                    .level
                    .parse()
                    .unwrap_or_else(|_| "info".parse().unwrap())
            }),
        )
        .with_writer(log_file)
        .with_ansi(false)
        .json()
        .init();

    tracing::info!(
        inst_id = %config.okx.inst_id,
        rest_url = %config.okx.rest_base_url,
        ws_url = %config.okx.ws_url,
        "Starting okx-quant"
    );

    // Channels
    let (status_tx, mut status_rx) = mpsc::channel::<AppEvent>(256);
    let (ticker_tx, mut ticker_rx) = mpsc::channel::<RawTicker>(256);
    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    let ws = OkxWsClient::new(&config.okx.ws_url, &config.okx.inst_id);
    let ws_task = tokio::spawn(async move {
        if let Err(e) = ws.connect_and_run(ticker_tx, status_tx, shutdown_rx).await {
            tracing::error!(error = %e, "WebSocket task exited with error");
        }
    });

    let rest = OkxRestClient::new(&config.okx.rest_base_url);

    // Probe the instrument once before streaming so a typo in inst_id fails
    // loudly at startup instead of producing a silent, empty subscription.
    match rest.get_ticker(&config.okx.inst_id).await {
        Ok(ticker) => tracing::info!(
            inst_id = %ticker.inst_id,
            last = %ticker.last,
            "Instrument probe ok"
        ),
        Err(e) => {
            tracing::error!(error = %e, inst_id = %config.okx.inst_id, "Instrument probe failed");
            return Err(e);
        }
    }

    let started = now_ms();
    let mut session = AnalysisSession::new(
        &config.okx.inst_id,
        config.window.capacity,
        config.window.sampling_interval_ms(),
        config.window.resolved_bootstrap_threshold(),
        started,
    );
    let mut prompts = PromptGenerator::new(started);
    let snapshot_dir = PathBuf::from(&config.snapshot.output_dir);

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("Shutdown requested");
                let _ = shutdown_tx.send(true);
                break;
            }
            event = status_rx.recv() => {
                match event {
                    Some(AppEvent::WsStatus(status)) => tracing::info!(status = ?status, "WS status"),
                    Some(AppEvent::LogMessage(msg)) => tracing::info!("{msg}"),
                    None => break,
                }
            }
            ticker = ticker_rx.recv() => {
                let Some(raw) = ticker else { break };
                match session.on_ticker(&raw, now_ms()) {
                    SessionEvent::Throttled
                    | SessionEvent::Collecting { .. }
                    | SessionEvent::BootstrapComplete { .. } => {}
                    SessionEvent::Snapshot(snapshot) => {
                        let prompt = prompts.sliding_window_prompt(&snapshot);
                        tracing::debug!(chars = prompt.len(), "Sliding-window prompt ready");

                        match persist::write_snapshot(&snapshot_dir, &snapshot) {
                            Ok(path) => tracing::info!(path = %path.display(), "Snapshot persisted"),
                            Err(e) => tracing::warn!(error = %e, "Failed to persist snapshot"),
                        }

                        // Multi-timeframe context rides along with each analysis.
                        if let Err(e) = refresh_market_context(
                            &rest,
                            &config,
                            &mut prompts,
                        )
                        .await
                        {
                            tracing::warn!(error = %e, "Failed to build market context");
                        }
                    }
                }
            }
        }
    }

    let _ = ws_task.await;
    tracing::info!("okx-quant stopped");
    Ok(())
}

async fn refresh_market_context(
    rest: &OkxRestClient,
    config: &Config,
    prompts: &mut PromptGenerator,
) -> Result<()> {
    let intraday_candles = rest
        .get_candles(&config.okx.inst_id, &config.okx.bar, config.okx.candle_limit)
        .await?;
    let long_candles = rest
        .get_candles(
            &config.okx.inst_id,
            &config.okx.long_bar,
            config.okx.candle_limit,
        )
        .await?;

    let Some(intraday) = report::intraday_report(&intraday_candles, &config.indicator) else {
        tracing::warn!("Intraday candle batch was empty");
        return Ok(());
    };
    let Some(long_term) = report::long_term_report(&long_candles, &config.indicator) else {
        tracing::warn!("Long-term candle batch was empty");
        return Ok(());
    };

    let prompt = prompts.market_state_prompt(now_ms(), &config.okx.inst_id, &intraday, &long_term);
    tracing::debug!(chars = prompt.len(), "Market-state prompt ready");
    Ok(())
}
