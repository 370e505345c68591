//! Configuration domain module

mod app_config;

pub use app_config::{
    AppConfig, DEFAULT_POLL_INTERVAL_MS, MAX_POLL_INTERVAL_MS, MIN_POLL_INTERVAL_MS,
};
