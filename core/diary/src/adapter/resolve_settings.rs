//! CLI 指定と config.json を合成して実行時の設定を解決する
//!
//! 優先順位: CLI > config.json > 組み込みの既定値

use crate::cli::Config;
use crate::domain::diary_text::DEFAULT_MIN_CHARS;
use crate::domain::DiaryConfig;
use common::error::Error;
use common::llm::factory::DEFAULT_TIMEOUT;
use common::llm::{ProviderSettings, ProviderType};
use std::time::Duration;

pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(1500);
pub const DEFAULT_MIN_INTERVAL: Duration = Duration::from_millis(5000);

/// 解決済みの実行時設定
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub provider: ProviderSettings,
    pub debounce: Duration,
    pub min_interval: Duration,
    pub min_chars: usize,
    /// 感情語彙の差し替え（None なら組み込み語彙）
    pub emotions: Option<Vec<String>>,
}

/// 設定を解決する。不明なプロバイダは Error::invalid_argument（利用可能一覧つき）。
pub fn resolve_settings(cli: &Config, file: &DiaryConfig) -> Result<Settings, Error> {
    let provider_name = cli
        .profile
        .as_deref()
        .or(file.provider.as_deref())
        .unwrap_or(ProviderType::Gemini.as_str());
    let provider_type = ProviderType::parse(provider_name).ok_or_else(|| {
        Error::invalid_argument(format!(
            "Unknown provider '{}'. Available: {}",
            provider_name,
            ProviderType::names().join(", ")
        ))
    })?;

    let provider = ProviderSettings {
        provider_type,
        model: cli
            .model
            .as_deref()
            .or(file.model.as_deref())
            .map(str::to_string),
        base_url: file.base_url.clone(),
        api_key_env: file.api_key_env.clone(),
        timeout: file
            .request_timeout_secs
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_TIMEOUT),
    };

    Ok(Settings {
        provider,
        debounce: cli
            .debounce_ms
            .or(file.debounce_ms)
            .map(Duration::from_millis)
            .unwrap_or(DEFAULT_DEBOUNCE),
        min_interval: cli
            .min_interval_ms
            .or(file.min_interval_ms)
            .map(Duration::from_millis)
            .unwrap_or(DEFAULT_MIN_INTERVAL),
        min_chars: file.min_text_chars.unwrap_or(DEFAULT_MIN_CHARS),
        emotions: file.emotions.clone(),
    })
}
