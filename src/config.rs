use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub okx: OkxConfig,
    #[serde(default)]
    pub window: WindowConfig,
    #[serde(default)]
    pub indicator: IndicatorConfig,
    #[serde(default)]
    pub snapshot: SnapshotConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OkxConfig {
    pub rest_base_url: String,
    pub ws_url: String,
    pub inst_id: String,
    /// Intraday candle granularity, e.g. "3m".
    pub bar: String,
    /// Longer-term context granularity, e.g. "4H".
    pub long_bar: String,
    #[serde(default = "default_candle_limit")]
    pub candle_limit: usize,
}

/// Sliding-window sampling parameters. One window instance per instrument;
/// instances never share state.
#[derive(Debug, Clone, Deserialize)]
pub struct WindowConfig {
    #[serde(default = "default_sampling_interval_secs")]
    pub sampling_interval_secs: u64,
    #[serde(default = "default_capacity")]
    pub capacity: usize,
    /// Admissions needed to leave the bootstrap phase. The upstream behavior
    /// this reproduces switches at capacity - 1 (one short of a full ring);
    /// set explicitly to override.
    pub bootstrap_threshold: Option<usize>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct IndicatorConfig {
    #[serde(default = "default_ema_period")]
    pub ema_period: usize,
    #[serde(default = "default_ema_long_period")]
    pub ema_long_period: usize,
    #[serde(default = "default_macd_fast")]
    pub macd_fast: usize,
    #[serde(default = "default_macd_slow")]
    pub macd_slow: usize,
    #[serde(default = "default_macd_signal")]
    pub macd_signal: usize,
    #[serde(default = "default_rsi_fast")]
    pub rsi_fast: usize,
    #[serde(default = "default_rsi_slow")]
    pub rsi_slow: usize,
    #[serde(default = "default_atr_period")]
    pub atr_period: usize,
    #[serde(default = "default_atr_short_period")]
    pub atr_short_period: usize,
    /// Exposed indicator series keep only this many trailing points.
    #[serde(default = "default_series_len")]
    pub series_len: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SnapshotConfig {
    #[serde(default = "default_output_dir")]
    pub output_dir: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
}

fn default_candle_limit() -> usize {
    50
}
fn default_sampling_interval_secs() -> u64 {
    10
}
fn default_capacity() -> usize {
    20
}
fn default_ema_period() -> usize {
    20
}
fn default_ema_long_period() -> usize {
    50
}
fn default_macd_fast() -> usize {
    12
}
fn default_macd_slow() -> usize {
    26
}
fn default_macd_signal() -> usize {
    9
}
fn default_rsi_fast() -> usize {
    7
}
fn default_rsi_slow() -> usize {
    14
}
fn default_atr_period() -> usize {
    14
}
fn default_atr_short_period() -> usize {
    3
}
fn default_series_len() -> usize {
    10
}
fn default_output_dir() -> String {
    "snapshots".to_string()
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            sampling_interval_secs: default_sampling_interval_secs(),
            capacity: default_capacity(),
            bootstrap_threshold: None,
        }
    }
}

impl Default for IndicatorConfig {
    fn default() -> Self {
        Self {
            ema_period: default_ema_period(),
            ema_long_period: default_ema_long_period(),
            macd_fast: default_macd_fast(),
            macd_slow: default_macd_slow(),
            macd_signal: default_macd_signal(),
            rsi_fast: default_rsi_fast(),
            rsi_slow: default_rsi_slow(),
            atr_period: default_atr_period(),
            atr_short_period: default_atr_short_period(),
            series_len: default_series_len(),
        }
    }
}

impl Default for SnapshotConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
        }
    }
}

impl WindowConfig {
    pub fn sampling_interval_ms(&self) -> u64 {
        self.sampling_interval_secs * 1_000
    }

    pub fn resolved_bootstrap_threshold(&self) -> usize {
        self.bootstrap_threshold
            .unwrap_or_else(|| self.capacity.saturating_sub(1))
    }

    pub fn validate(&self) -> Result<()> {
        if self.sampling_interval_secs == 0 {
            bail!("window.sampling_interval_secs must be > 0");
        }
        if self.capacity < 2 {
            bail!("window.capacity must be >= 2");
        }
        let threshold = self.resolved_bootstrap_threshold();
        if threshold == 0 || threshold > self.capacity {
            bail!(
                "window.bootstrap_threshold must be in 1..={}, got {}",
                self.capacity,
                threshold
            );
        }
        Ok(())
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        dotenvy::dotenv().ok();

        let config_path = Path::new("config/default.toml");
        let config_str = std::fs::read_to_string(config_path)
            .with_context(|| format!("failed to read {}", config_path.display()))?;

        let mut config: Config =
            toml::from_str(&config_str).context("failed to parse config/default.toml")?;

        // Env override so a deployment can switch instruments without
        // editing the config file.
        if let Ok(inst_id) = std::env::var("OKX_INST_ID") {
            if !inst_id.trim().is_empty() {
                config.okx.inst_id = inst_id.trim().to_ascii_uppercase();
            }
        }

        config
            .window
            .validate()
            .context("window config is invalid")?;

        Ok(config)
    }
}
