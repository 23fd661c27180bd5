use serde::{Deserialize, Serialize};

/// Parse an OKX string-encoded numeric field. The API reports missing values
/// as the literal "N/A"; those (and anything unparseable) become None so that
/// price-dependent math can skip them instead of failing.
pub fn opt_f64(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("n/a") {
        return None;
    }
    trimmed.parse::<f64>().ok()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WsChannelArg {
    pub channel: String,
    #[serde(rename = "instId")]
    pub inst_id: String,
}

/// Operation frame for the OKX public WebSocket ("subscribe"/"unsubscribe").
#[derive(Debug, Serialize)]
pub struct WsOp {
    pub op: &'static str,
    pub args: Vec<WsChannelArg>,
}

impl WsOp {
    pub fn subscribe_tickers(inst_id: &str) -> Self {
        Self::tickers("subscribe", inst_id)
    }

    pub fn unsubscribe_tickers(inst_id: &str) -> Self {
        Self::tickers("unsubscribe", inst_id)
    }

    fn tickers(op: &'static str, inst_id: &str) -> Self {
        Self {
            op,
            args: vec![WsChannelArg {
                channel: "tickers".to_string(),
                inst_id: inst_id.to_string(),
            }],
        }
    }
}

/// Inbound WebSocket frame: either an event ack or a data push.
#[derive(Debug, Deserialize)]
pub struct WsMessage {
    #[serde(default)]
    pub event: Option<String>,
    #[serde(default)]
    pub arg: Option<WsChannelArg>,
    #[serde(default)]
    pub msg: Option<String>,
    #[serde(default)]
    pub data: Option<Vec<RawTicker>>,
}

/// One row from the `tickers` channel. Every numeric field is string-encoded
/// and may carry the "N/A" sentinel.
#[derive(Debug, Clone, Deserialize)]
pub struct RawTicker {
    #[serde(rename = "instId")]
    pub inst_id: String,
    #[serde(default = "na")]
    pub last: String,
    #[serde(rename = "bidPx", default = "na")]
    pub bid_px: String,
    #[serde(rename = "askPx", default = "na")]
    pub ask_px: String,
    #[serde(rename = "high24h", default = "na")]
    pub high_24h: String,
    #[serde(rename = "low24h", default = "na")]
    pub low_24h: String,
    #[serde(rename = "vol24h", default = "na")]
    pub vol_24h: String,
}

fn na() -> String {
    "N/A".to_string()
}

/// Standard OKX REST envelope. `code` is "0" on success.
#[derive(Debug, Deserialize)]
pub struct OkxResponse<T> {
    pub code: String,
    #[serde(default)]
    pub msg: String,
    #[serde(default = "Vec::new")]
    pub data: Vec<T>,
}

/// Raw candle row: `[ts, open, high, low, close, vol, volCcy]`, all strings.
pub type RawCandleRow = Vec<String>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opt_f64_handles_sentinels() {
        assert_eq!(opt_f64("123.45"), Some(123.45));
        assert_eq!(opt_f64(" 67.8 "), Some(67.8));
        assert_eq!(opt_f64("N/A"), None);
        assert_eq!(opt_f64("n/a"), None);
        assert_eq!(opt_f64(""), None);
        assert_eq!(opt_f64("garbage"), None);
    }

    #[test]
    fn deserialize_ticker_push() {
        let payload = r#"{
            "arg": {"channel": "tickers", "instId": "BTC-USDT"},
            "data": [{
                "instId": "BTC-USDT",
                "last": "91234.5",
                "bidPx": "91234.4",
                "askPx": "91234.6",
                "high24h": "92000",
                "low24h": "90000",
                "vol24h": "12345.6"
            }]
        }"#;
        let msg: WsMessage = serde_json::from_str(payload).unwrap();
        assert!(msg.event.is_none());
        let data = msg.data.unwrap();
        assert_eq!(data.len(), 1);
        assert_eq!(data[0].inst_id, "BTC-USDT");
        assert_eq!(opt_f64(&data[0].last), Some(91234.5));
    }

    #[test]
    fn deserialize_ticker_with_missing_fields() {
        let payload = r#"{"data": [{"instId": "BTC-USDT", "last": "N/A"}]}"#;
        let msg: WsMessage = serde_json::from_str(payload).unwrap();
        let ticker = &msg.data.unwrap()[0];
        assert_eq!(opt_f64(&ticker.last), None);
        assert_eq!(ticker.bid_px, "N/A");
        assert_eq!(opt_f64(&ticker.vol_24h), None);
    }

    #[test]
    fn deserialize_subscribe_ack() {
        let payload = r#"{"event": "subscribe", "arg": {"channel": "tickers", "instId": "BTC-USDT"}}"#;
        let msg: WsMessage = serde_json::from_str(payload).unwrap();
        assert_eq!(msg.event.as_deref(), Some("subscribe"));
        assert!(msg.data.is_none());
    }

    #[test]
    fn subscribe_op_serializes_to_okx_shape() {
        let op = WsOp::subscribe_tickers("BTC-USDT");
        let json = serde_json::to_string(&op).unwrap();
        assert!(json.contains(r#""op":"subscribe""#));
        assert!(json.contains(r#""channel":"tickers""#));
        assert!(json.contains(r#""instId":"BTC-USDT""#));
    }
}
