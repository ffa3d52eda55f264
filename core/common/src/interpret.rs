//! LLM 応答テキストの解釈
//!
//! モデルの自由形式テキストから `summary` / `emotion` / `solution` の 3 フィールドを取り出す。
//! 1. テキスト全体を JSON オブジェクトとしてパース
//! 2. 失敗したら最初の `{` から最後の `}` までを切り出して 1 回だけ再パース
//! 3. `emotion` を語彙でフィルタ
//!
//! I/O も共有状態の変更も行わない。どんな入力でも panic せず結果かエラーを返す。

use crate::domain::{AnalysisResult, EmotionVocabulary};
use serde_json::{Map, Value};
use std::sync::Arc;

/// 解釈の失敗
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum InterpretationError {
    /// 空、または空白のみ
    #[error("model response is empty")]
    EmptyInput,
    /// 直接パースも `{...}` の切り出しも JSON オブジェクトにならなかった
    #[error("model response is not a JSON object")]
    MalformedResponse,
}

/// LLM 応答の解釈器（語彙の共有参照だけを持つ）
#[derive(Debug, Clone)]
pub struct ResponseInterpreter {
    vocabulary: Arc<EmotionVocabulary>,
}

impl ResponseInterpreter {
    pub fn new(vocabulary: Arc<EmotionVocabulary>) -> Self {
        Self { vocabulary }
    }

    pub fn vocabulary(&self) -> &EmotionVocabulary {
        &self.vocabulary
    }

    /// 生のモデル出力を分析結果に変換する
    pub fn interpret(&self, raw_text: &str) -> Result<AnalysisResult, InterpretationError> {
        if raw_text.trim().is_empty() {
            return Err(InterpretationError::EmptyInput);
        }
        let obj = parse_object(raw_text)
            .or_else(|| extract_brace_span(raw_text).and_then(parse_object))
            .ok_or(InterpretationError::MalformedResponse)?;

        Ok(AnalysisResult {
            summary: text_field(&obj, "summary"),
            emotion: text_field(&obj, "emotion").map(|e| self.vocabulary.sanitize(&e)),
            solution: text_field(&obj, "solution"),
        })
    }
}

/// JSON オブジェクトとしてパース（配列・文字列などトップレベルがオブジェクト以外なら None）
fn parse_object(s: &str) -> Option<Map<String, Value>> {
    match serde_json::from_str::<Value>(s) {
        Ok(Value::Object(map)) => Some(map),
        _ => None,
    }
}

/// 最初の `{` から最後の `}` までを返す（改行を含んでよい）
fn extract_brace_span(s: &str) -> Option<&str> {
    let start = s.find('{')?;
    let end = s.rfind('}')?;
    if end > start {
        Some(&s[start..=end])
    } else {
        None
    }
}

/// 文字列値のフィールドだけを取り出す。型が違えば欠落扱い。
fn text_field(obj: &Map<String, Value>, key: &str) -> Option<String> {
    obj.get(key).and_then(Value::as_str).map(String::from)
}
