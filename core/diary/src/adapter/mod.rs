//! diary 固有のアダプタ（設定の読み込み・解決、結果の表示）

pub mod config;
pub mod resolve_settings;
pub mod stdout_sink;

pub use config::StdConfigLoader;
pub use resolve_settings::{resolve_settings, Settings};
pub use stdout_sink::StdoutSink;
