// Library root - activity log recording and per-viewer feed aggregation for camps

pub mod config;
pub mod database;
pub mod error;
pub mod models;
pub mod services;

pub use config::Config;
pub use error::{FeedError, ProviderError, RecordError};
pub use services::{ActivityAggregator, ActivityRecorder};
