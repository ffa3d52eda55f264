//! Gemini generateContent プロバイダの実装

use crate::error::Error;
use crate::llm::provider::LlmProvider;
use async_trait::async_trait;
use serde_json::{json, Value};
use std::time::Duration;
use tokio_util::sync::CancellationToken;

pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// 日記本文はブロックされやすいので安全フィルタは全カテゴリで無効にする
const SAFETY_CATEGORIES: &[&str] = &[
    "HARM_CATEGORY_HARASSMENT",
    "HARM_CATEGORY_HATE_SPEECH",
    "HARM_CATEGORY_SEXUALLY_EXPLICIT",
    "HARM_CATEGORY_DANGEROUS_CONTENT",
];

/// Gemini プロバイダ
pub struct GeminiProvider {
    model: String,
    api_key: String,
    base_url: String,
    client: reqwest::Client,
}

impl GeminiProvider {
    /// 新しいGeminiプロバイダを作成
    ///
    /// # Arguments
    /// * `model` - モデル名（デフォルト: "gemini-2.0-flash"）
    /// * `api_key` - API キー（空はエラー）
    /// * `base_url` - API のベース URL（デフォルト: v1beta）
    /// * `timeout` - 1 リクエストのタイムアウト
    pub fn new(
        model: Option<String>,
        api_key: String,
        base_url: Option<String>,
        timeout: Duration,
    ) -> Result<Self, Error> {
        if api_key.trim().is_empty() {
            return Err(Error::env("Gemini API key is empty"));
        }
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::http(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self {
            model: model.unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            api_key,
            base_url: base_url
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
                .trim_end_matches('/')
                .to_string(),
            client,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// generateContent のエンドポイント URL
    pub fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent?key={}",
            self.base_url, self.model, self.api_key
        )
    }

    /// リクエストペイロードを生成
    pub fn make_request_payload(&self, prompt: &str) -> Value {
        let safety: Vec<Value> = SAFETY_CATEGORIES
            .iter()
            .map(|c| json!({"category": c, "threshold": "BLOCK_NONE"}))
            .collect();
        json!({
            "contents": [{
                "role": "user",
                "parts": [{"text": prompt}]
            }],
            "safetySettings": safety
        })
    }

    /// レスポンスからテキストを抽出
    ///
    /// `candidates[0].content.parts` の text をすべて連結する。
    ///
    /// # Returns
    /// * `Ok(Some(String))` - 抽出したテキスト
    /// * `Ok(None)` - text を含む part が無い
    /// * `Err(Error)` - JSON でない・`error` オブジェクトを含む・入力がブロックされた
    pub fn parse_response_text(response_json: &str) -> Result<Option<String>, Error> {
        let v: Value = serde_json::from_str(response_json)
            .map_err(|e| Error::json(format!("Failed to parse response JSON: {}", e)))?;

        if let Some(error) = v.get("error") {
            let error_msg = error["message"].as_str().unwrap_or("Unknown error");
            return Err(Error::http(format!("Gemini API error: {}", error_msg)));
        }

        if let Some(reason) = v["promptFeedback"]["blockReason"].as_str() {
            return Err(Error::http(format!("Gemini blocked the prompt: {}", reason)));
        }

        let texts: Vec<&str> = v["candidates"][0]["content"]["parts"]
            .as_array()
            .map(|parts| parts.iter().filter_map(|p| p["text"].as_str()).collect())
            .unwrap_or_default();
        if texts.is_empty() {
            return Ok(None);
        }
        Ok(Some(texts.concat()))
    }

    /// HTTP エラー時のメッセージ（`error.message` があればそれを使う）
    fn error_message(status: reqwest::StatusCode, response_text: &str) -> String {
        let msg = serde_json::from_str::<Value>(response_text)
            .ok()
            .and_then(|v| v["error"]["message"].as_str().map(|s| s.to_string()))
            .unwrap_or_else(|| format!("HTTP {}: {}", status, response_text));
        format!("Gemini API error: {}", msg)
    }

    async fn send(&self, prompt: &str) -> Result<String, Error> {
        let response = self
            .client
            .post(self.endpoint())
            .json(&self.make_request_payload(prompt))
            .send()
            .await
            .map_err(|e| Error::http(format!("HTTP request failed: {}", e.without_url())))?;

        let status = response.status();
        let response_text = response
            .text()
            .await
            .map_err(|e| Error::http(format!("Failed to read response: {}", e.without_url())))?;

        if !status.is_success() {
            return Err(Error::http_status(
                status.as_u16(),
                Self::error_message(status, &response_text),
            ));
        }

        Self::parse_response_text(&response_text)?
            .ok_or_else(|| Error::http("Gemini response contained no text"))
    }
}

#[async_trait]
impl LlmProvider for GeminiProvider {
    fn name(&self) -> &str {
        "gemini"
    }

    async fn generate(&self, prompt: &str, cancel: &CancellationToken) -> Result<String, Error> {
        if cancel.is_cancelled() {
            return Err(Error::Cancelled);
        }
        tokio::select! {
            _ = cancel.cancelled() => Err(Error::Cancelled),
            result = self.send(prompt) => result,
        }
    }
}
