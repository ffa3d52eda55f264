//! LLM プロバイダの実装
//!
//! 通信の失敗はすべてここで `Error` に変換し、解釈器には成功した応答のテキストだけを渡す。

pub mod echo;
pub mod factory;
pub mod gemini;
pub mod provider;

pub use factory::{create_provider, ProviderSettings, ProviderType};
pub use provider::LlmProvider;
