pub mod api;
pub mod app;
pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod format;
pub mod logging;
pub mod metrics;
pub mod theme;
pub mod tui;
