use anyhow::{Context, Result};

use crate::error::AppError;
use crate::model::candle::Candle;

use super::types::{OkxResponse, RawCandleRow, RawTicker};

/// Client for the public OKX market-data endpoints. No credentials: these
/// endpoints are unsigned.
pub struct OkxRestClient {
    http: reqwest::Client,
    base_url: String,
}

impl OkxRestClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Fetch up to `limit` candles for `inst_id` at granularity `bar`
    /// (e.g. "3m", "4H"). The wire order (newest first) is reversed to
    /// oldest first; malformed rows are dropped individually.
    pub async fn get_candles(&self, inst_id: &str, bar: &str, limit: usize) -> Result<Vec<Candle>> {
        let url = format!(
            "{}/api/v5/market/candles?instId={}&bar={}&limit={}",
            self.base_url, inst_id, bar, limit
        );

        let resp: OkxResponse<RawCandleRow> = self
            .http
            .get(&url)
            .send()
            .await
            .context("candle request failed")?
            .json()
            .await
            .context("candle response is not valid JSON")?;

        if resp.code != "0" {
            return Err(AppError::OkxApi {
                code: resp.code,
                msg: resp.msg,
            }
            .into());
        }

        let candles = Candle::parse_rows(&resp.data);
        tracing::info!(
            inst_id,
            bar,
            rows = resp.data.len(),
            parsed = candles.len(),
            "Fetched candle history"
        );
        Ok(candles)
    }

    /// Fetch the current ticker row for one instrument.
    pub async fn get_ticker(&self, inst_id: &str) -> Result<RawTicker> {
        let url = format!("{}/api/v5/market/ticker?instId={}", self.base_url, inst_id);

        let resp: OkxResponse<RawTicker> = self
            .http
            .get(&url)
            .send()
            .await
            .context("ticker request failed")?
            .json()
            .await
            .context("ticker response is not valid JSON")?;

        if resp.code != "0" {
            return Err(AppError::OkxApi {
                code: resp.code,
                msg: resp.msg,
            }
            .into());
        }
        resp.data
            .into_iter()
            .next()
            .context("ticker response contained no data")
    }
}
