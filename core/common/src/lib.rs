//! 日記分析の共通ライブラリ
//!
//! LLM 応答の解釈器と、`diary` コマンドが使うドメイン型・ポート・アダプタを提供します。

/// エラーハンドリング
pub mod error;

/// ドメイン型（分析結果・感情語彙）
pub mod domain;

/// LLM 応答テキストの解釈
pub mod interpret;

/// LLMプロバイダ
pub mod llm;

/// 分析プロンプト
pub mod prompt;

/// Outbound ポート
pub mod ports;

/// ポートの標準実装
pub mod adapter;

pub use interpret::{InterpretationError, ResponseInterpreter};
