pub mod analysis;
pub mod config;
pub mod error;
pub mod event;
pub mod indicator;
pub mod model;
pub mod okx;
pub mod persist;
pub mod prompt;
pub mod report;
pub mod session;
pub mod window;
