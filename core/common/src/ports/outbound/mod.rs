//! Outbound ポート: アプリが外界（FS・環境変数・ログ・LLM）を使うための trait

pub mod env_resolver;
pub mod fs;
pub mod llm_provider;
pub mod log;

pub use env_resolver::EnvResolver;
pub use fs::FileSystem;
pub use llm_provider::LlmProvider;
pub use log::{now_iso8601, Log, LogLevel, LogRecord};
