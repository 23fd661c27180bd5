use anyhow::{Context, Result};
use futures_util::{SinkExt, StreamExt};
use std::time::Duration;
use tokio::sync::{mpsc, watch};
use tokio_tungstenite::tungstenite;

use super::types::{RawTicker, WsMessage, WsOp};
use crate::event::{AppEvent, WsConnectionStatus};

/// Exponential backoff for reconnection.
struct ExponentialBackoff {
    current: Duration,
    initial: Duration,
    max: Duration,
    factor: f64,
}

impl ExponentialBackoff {
    fn new(initial: Duration, max: Duration, factor: f64) -> Self {
        Self {
            current: initial,
            initial,
            max,
            factor,
        }
    }

    fn next_delay(&mut self) -> Duration {
        let delay = self.current;
        self.current = Duration::from_secs_f64(
            (self.current.as_secs_f64() * self.factor).min(self.max.as_secs_f64()),
        );
        delay
    }

    fn reset(&mut self) {
        self.current = self.initial;
    }
}

/// Streaming ingestion adapter for the OKX public `tickers` channel.
pub struct OkxWsClient {
    url: String,
    inst_id: String,
}

impl OkxWsClient {
    pub fn new(ws_url: &str, inst_id: &str) -> Self {
        Self {
            url: ws_url.to_string(),
            inst_id: inst_id.to_string(),
        }
    }

    /// Connect and run the WebSocket loop with automatic reconnection.
    /// Forwards raw tickers through `ticker_tx` and status through `status_tx`.
    pub async fn connect_and_run(
        &self,
        ticker_tx: mpsc::Sender<RawTicker>,
        status_tx: mpsc::Sender<AppEvent>,
        mut shutdown: watch::Receiver<bool>,
    ) -> Result<()> {
        let mut backoff =
            ExponentialBackoff::new(Duration::from_secs(1), Duration::from_secs(60), 2.0);
        let mut attempt: u32 = 0;

        loop {
            attempt += 1;
            match self
                .connect_once(&ticker_tx, &status_tx, &mut shutdown, &mut backoff)
                .await
            {
                Ok(()) => {
                    // Clean shutdown requested
                    let _ = status_tx
                        .send(AppEvent::WsStatus(WsConnectionStatus::Disconnected))
                        .await;
                    break;
                }
                Err(e) => {
                    let _ = status_tx
                        .send(AppEvent::WsStatus(WsConnectionStatus::Disconnected))
                        .await;
                    let _ = status_tx
                        .send(AppEvent::LogMessage(format!("WS error: {}", e)))
                        .await;

                    let delay = backoff.next_delay();
                    let _ = status_tx
                        .send(AppEvent::WsStatus(WsConnectionStatus::Reconnecting {
                            attempt,
                            delay_ms: delay.as_millis() as u64,
                        }))
                        .await;

                    tokio::select! {
                        _ = tokio::time::sleep(delay) => continue,
                        _ = shutdown.changed() => {
                            let _ = status_tx
                                .send(AppEvent::LogMessage("Shutdown during reconnect".to_string()))
                                .await;
                            break;
                        }
                    }
                }
            }
        }
        Ok(())
    }

    async fn connect_once(
        &self,
        ticker_tx: &mpsc::Sender<RawTicker>,
        status_tx: &mpsc::Sender<AppEvent>,
        shutdown: &mut watch::Receiver<bool>,
        backoff: &mut ExponentialBackoff,
    ) -> Result<()> {
        let _ = status_tx
            .send(AppEvent::LogMessage(format!("Connecting to {}", self.url)))
            .await;

        let (ws_stream, _resp) = tokio_tungstenite::connect_async(&self.url)
            .await
            .context("WebSocket connect failed")?;

        let (mut write, mut read) = ws_stream.split();

        // OKX requires an explicit subscribe op after the connection opens.
        let subscribe = serde_json::to_string(&WsOp::subscribe_tickers(&self.inst_id))?;
        write
            .send(tungstenite::Message::Text(subscribe))
            .await
            .context("subscribe send failed")?;

        let _ = status_tx
            .send(AppEvent::WsStatus(WsConnectionStatus::Connected))
            .await;
        backoff.reset();

        loop {
            tokio::select! {
                msg = read.next() => {
                    match msg {
                        Some(Ok(tungstenite::Message::Text(text))) => {
                            self.handle_text(&text, ticker_tx, status_tx).await;
                        }
                        Some(Ok(tungstenite::Message::Ping(_))) => {
                            // tokio-tungstenite answers pings automatically
                        }
                        Some(Ok(_)) => {}
                        Some(Err(e)) => {
                            return Err(anyhow::anyhow!("WebSocket read error: {}", e));
                        }
                        None => {
                            return Err(anyhow::anyhow!("WebSocket stream ended"));
                        }
                    }
                }
                _ = shutdown.changed() => {
                    // Unsubscribe before dropping the connection.
                    if let Ok(unsubscribe) =
                        serde_json::to_string(&WsOp::unsubscribe_tickers(&self.inst_id))
                    {
                        let _ = write.send(tungstenite::Message::Text(unsubscribe)).await;
                    }
                    return Ok(());
                }
            }
        }
    }

    async fn handle_text(
        &self,
        text: &str,
        ticker_tx: &mpsc::Sender<RawTicker>,
        status_tx: &mpsc::Sender<AppEvent>,
    ) {
        match serde_json::from_str::<WsMessage>(text) {
            Ok(msg) => {
                if let Some(event) = msg.event.as_deref() {
                    match event {
                        "subscribe" => {
                            let channel = msg
                                .arg
                                .as_ref()
                                .map(|a| a.channel.clone())
                                .unwrap_or_default();
                            let _ = status_tx
                                .send(AppEvent::LogMessage(format!(
                                    "Subscribed: {} - {}",
                                    channel, self.inst_id
                                )))
                                .await;
                        }
                        "error" => {
                            tracing::warn!(
                                msg = msg.msg.as_deref().unwrap_or(""),
                                "OKX WS error event"
                            );
                        }
                        _ => {}
                    }
                    return;
                }
                if let Some(data) = msg.data {
                    for ticker in data {
                        if ticker_tx.try_send(ticker).is_err() {
                            tracing::warn!("Ticker channel full, dropping ticker");
                        }
                    }
                }
            }
            Err(e) => {
                tracing::debug!(error = %e, "Failed to parse WS message");
            }
        }
    }
}
