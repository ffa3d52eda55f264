//! Echoプロバイダの実装
//!
//! 実際の LLM API は呼ばず、プロンプト中の日記本文から決まった JSON を返す。
//! ネットワークなしで CLI やパイプライン全体を動かすために使う。

use crate::error::Error;
use crate::llm::provider::LlmProvider;
use async_trait::async_trait;
use serde_json::json;
use tokio_util::sync::CancellationToken;

const DIARY_MARKER: &str = "일기 텍스트:\n";
const SUMMARY_MAX_CHARS: usize = 40;

/// Echoプロバイダ
#[derive(Debug, Clone, Default)]
pub struct EchoProvider {
    canned: Option<String>,
}

impl EchoProvider {
    /// 新しいEchoプロバイダを作成
    pub fn new() -> Self {
        Self { canned: None }
    }

    /// 常に同じ応答テキストを返す Echo（解釈器の挙動確認用）
    pub fn with_response(response: impl Into<String>) -> Self {
        Self {
            canned: Some(response.into()),
        }
    }

    fn diary_text(prompt: &str) -> &str {
        prompt
            .rfind(DIARY_MARKER)
            .map(|i| &prompt[i + DIARY_MARKER.len()..])
            .unwrap_or(prompt)
            .trim()
    }

    fn respond(prompt: &str) -> String {
        let text = Self::diary_text(prompt);
        let first_line = text.lines().next().unwrap_or("");
        let mut summary: String = first_line.chars().take(SUMMARY_MAX_CHARS).collect();
        if first_line.chars().count() > SUMMARY_MAX_CHARS {
            summary.push('…');
        }
        json!({
            "summary": summary,
            "emotion": "중립",
            "solution": "[echo] 실제 분석은 수행되지 않았습니다."
        })
        .to_string()
    }
}

#[async_trait]
impl LlmProvider for EchoProvider {
    fn name(&self) -> &str {
        "echo"
    }

    async fn generate(&self, prompt: &str, cancel: &CancellationToken) -> Result<String, Error> {
        if cancel.is_cancelled() {
            return Err(Error::Cancelled);
        }
        Ok(match &self.canned {
            Some(s) => s.clone(),
            None => Self::respond(prompt),
        })
    }
}
