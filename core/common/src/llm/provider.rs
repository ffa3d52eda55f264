//! LLMプロバイダのトレイト定義

use crate::error::Error;
use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

/// LLMプロバイダのトレイト
///
/// 各プロバイダ（Gemini、Echo）はこのトレイトを実装する。
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// プロバイダ名を返す
    fn name(&self) -> &str;

    /// プロンプトを送り、モデルが生成したテキストを返す
    ///
    /// # Returns
    /// * `Ok(String)` - 通信に成功した応答のテキスト（JSON とは限らない）
    /// * `Err(Error::Cancelled)` - `cancel` が発火した
    /// * `Err(Error)` - HTTP エラー・応答構造の不正など
    async fn generate(&self, prompt: &str, cancel: &CancellationToken) -> Result<String, Error>;
}
