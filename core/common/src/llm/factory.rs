//! プロバイダファクトリー
//!
//! プロバイダタイプと設定から適切なプロバイダを作成する。

use crate::error::Error;
use crate::llm::echo::EchoProvider;
use crate::llm::gemini::GeminiProvider;
use crate::llm::provider::LlmProvider;
use crate::ports::outbound::EnvResolver;
use std::sync::Arc;
use std::time::Duration;

pub const DEFAULT_API_KEY_ENV: &str = "GEMINI_API_KEY";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// プロバイダタイプ
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderType {
    /// Gemini generateContent
    Gemini,
    /// Echo（API を呼ばない）
    Echo,
}

impl ProviderType {
    /// 文字列からプロバイダタイプを解析
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "gemini" | "google" => Some(Self::Gemini),
            "echo" => Some(Self::Echo),
            _ => None,
        }
    }

    /// プロバイダタイプを文字列に変換
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Gemini => "gemini",
            Self::Echo => "echo",
        }
    }

    /// 利用可能なプロバイダ名
    pub fn names() -> &'static [&'static str] {
        &["gemini", "echo"]
    }
}

/// プロバイダ生成に必要な設定（CLI と config.json を合成した結果）
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderSettings {
    pub provider_type: ProviderType,
    pub model: Option<String>,
    pub base_url: Option<String>,
    /// API キーを読む環境変数名（省略時は GEMINI_API_KEY）
    pub api_key_env: Option<String>,
    pub timeout: Duration,
}

impl Default for ProviderSettings {
    fn default() -> Self {
        Self {
            provider_type: ProviderType::Gemini,
            model: None,
            base_url: None,
            api_key_env: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// 設定からプロバイダを作成
///
/// Gemini は API キーの環境変数が未設定なら `Error::Env`。
pub fn create_provider(
    settings: &ProviderSettings,
    env: &dyn EnvResolver,
) -> Result<Arc<dyn LlmProvider>, Error> {
    match settings.provider_type {
        ProviderType::Gemini => {
            let key_env = settings
                .api_key_env
                .as_deref()
                .unwrap_or(DEFAULT_API_KEY_ENV);
            let api_key = env
                .var(key_env)
                .ok_or_else(|| Error::env(format!("{} environment variable is not set", key_env)))?;
            Ok(Arc::new(GeminiProvider::new(
                settings.model.clone(),
                api_key,
                settings.base_url.clone(),
                settings.timeout,
            )?))
        }
        ProviderType::Echo => Ok(Arc::new(EchoProvider::new())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::HomeDir;
    use std::collections::HashMap;

    struct MapEnv(HashMap<String, String>);

    impl EnvResolver for MapEnv {
        fn resolve_home_dir(&self) -> Result<HomeDir, Error> {
            Ok(HomeDir::new("/tmp/diary"))
        }

        fn var(&self, name: &str) -> Option<String> {
            self.0.get(name).cloned()
        }
    }

    fn env(pairs: &[(&str, &str)]) -> MapEnv {
        MapEnv(
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        )
    }

    #[test]
    fn test_provider_type_parse() {
        assert_eq!(ProviderType::parse("Gemini"), Some(ProviderType::Gemini));
        assert_eq!(ProviderType::parse(" echo "), Some(ProviderType::Echo));
        assert_eq!(ProviderType::parse("gpt"), None);
        for name in ProviderType::names() {
            assert_eq!(ProviderType::parse(name).unwrap().as_str(), *name);
        }
    }

    #[test]
    fn test_create_echo_without_key() {
        let settings = ProviderSettings {
            provider_type: ProviderType::Echo,
            ..Default::default()
        };
        let p = create_provider(&settings, &env(&[])).unwrap();
        assert_eq!(p.name(), "echo");
    }

    #[test]
    fn test_create_gemini_requires_key() {
        let err = create_provider(&ProviderSettings::default(), &env(&[]))
            .err()
            .unwrap();
        assert!(matches!(err, Error::Env(_)));
        assert!(err.to_string().contains("GEMINI_API_KEY"));
    }

    #[test]
    fn test_create_gemini_with_custom_key_env() {
        let settings = ProviderSettings {
            api_key_env: Some("MY_KEY".to_string()),
            ..Default::default()
        };
        let p = create_provider(&settings, &env(&[("MY_KEY", "secret")])).unwrap();
        assert_eq!(p.name(), "gemini");
    }
}
