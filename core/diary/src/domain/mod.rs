//! diary 固有のドメイン型（型と不変条件）

pub mod analyze_error;
pub mod command;
pub mod config;
pub mod diary_text;

pub use analyze_error::AnalyzeError;
pub use command::DiaryCommand;
pub use config::DiaryConfig;
pub use diary_text::DiaryText;
