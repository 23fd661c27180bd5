pub mod candle;
pub mod sample;
pub mod snapshot;
pub mod tick;
