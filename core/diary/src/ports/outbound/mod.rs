//! Outbound ポート: アプリが外界（設定ファイル・結果の表示先）を使うための trait

pub mod analysis_sink;
pub mod config_loader;

pub use analysis_sink::AnalysisSink;
pub use config_loader::ConfigLoader;
