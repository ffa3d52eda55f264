//! ユースケース層（ports の trait と common の部品だけに依存する）

pub mod analyze;
pub mod debounce;
pub mod rate_limit;
pub mod watch;

pub use analyze::AnalyzeUseCase;
pub use debounce::{AnalysisEvent, DebouncePolicy, DebouncedAnalyzer, PipelineState};
pub use watch::run_watch;
