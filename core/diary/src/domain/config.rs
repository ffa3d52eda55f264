//! config.json 用の設定型
//!
//! どの項目も省略可能。省略された項目は CLI 指定か組み込みの既定値で埋める。

use serde::Deserialize;

/// config.json のルート
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DiaryConfig {
    /// プロバイダ名: gemini | echo
    pub provider: Option<String>,
    /// モデル名（省略時はプロバイダのデフォルト）
    pub model: Option<String>,
    /// API のベース URL（省略時はプロバイダのデフォルト）
    pub base_url: Option<String>,
    /// API キーを読む環境変数名（省略時は GEMINI_API_KEY）
    pub api_key_env: Option<String>,
    pub request_timeout_secs: Option<u64>,
    /// 入力が止まってから分析を始めるまでの待ち時間
    pub debounce_ms: Option<u64>,
    /// 成功した分析どうしの最小間隔
    pub min_interval_ms: Option<u64>,
    /// この文字数以下の本文は分析しない
    pub min_text_chars: Option<usize>,
    /// 感情語彙の差し替え（省略時は組み込みの韓国語語彙）
    pub emotions: Option<Vec<String>>,
}

/// serde 用の内部構造（別名を受け付けるため）
#[derive(Debug, Deserialize)]
struct DiaryConfigRaw {
    #[serde(alias = "profile")]
    provider: Option<String>,
    #[serde(alias = "default_model")]
    model: Option<String>,
    base_url: Option<String>,
    api_key_env: Option<String>,
    #[serde(alias = "timeout_secs")]
    request_timeout_secs: Option<u64>,
    debounce_ms: Option<u64>,
    #[serde(alias = "min_call_interval_ms")]
    min_interval_ms: Option<u64>,
    #[serde(alias = "min_chars")]
    min_text_chars: Option<usize>,
    #[serde(alias = "allowed_emotions")]
    emotions: Option<Vec<String>>,
}

impl DiaryConfig {
    /// JSON 文字列からパース（ファイル読みは adapter で行う）
    pub fn parse(json: &str) -> Result<Self, serde_json::Error> {
        let raw: DiaryConfigRaw = serde_json::from_str(json)?;
        Ok(raw.into())
    }
}

impl From<DiaryConfigRaw> for DiaryConfig {
    fn from(r: DiaryConfigRaw) -> Self {
        DiaryConfig {
            provider: r.provider,
            model: r.model,
            base_url: r.base_url,
            api_key_env: r.api_key_env,
            request_timeout_secs: r.request_timeout_secs,
            debounce_ms: r.debounce_ms,
            min_interval_ms: r.min_interval_ms,
            min_text_chars: r.min_text_chars,
            emotions: r.emotions,
        }
    }
}
