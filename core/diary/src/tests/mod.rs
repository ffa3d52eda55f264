//! diary バイナリの結合テスト（ユースケース・配線をまたぐもの）


use crate::domain::AnalyzeError;
use crate::ports::outbound::AnalysisSink;
use async_trait::async_trait;
use common::domain::{AnalysisResult, HomeDir};
use common::error::Error;
use common::llm::LlmProvider;
use common::ports::outbound::EnvResolver;
use serde_json::json;
use std::collections::HashMap;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

const DIARY_MARKER: &str = "일기 텍스트:\n";

/// 遅延つきのテスト用プロバイダ（キャンセルされると Error::Cancelled）
pub(crate) struct StubProvider {
    latency: Duration,
    calls: AtomicUsize,
    reply: Result<Option<String>, Error>,
}

impl StubProvider {
    /// 日記本文を summary にした JSON を返す
    pub(crate) fn new(latency: Duration) -> Self {
        Self {
            latency,
            calls: AtomicUsize::new(0),
            reply: Ok(None),
        }
    }

    pub(crate) fn with_response(latency: Duration, response: &str) -> Self {
        Self {
            reply: Ok(Some(response.to_string())),
            ..Self::new(latency)
        }
    }

    pub(crate) fn failing(latency: Duration, error: Error) -> Self {
        Self {
            reply: Err(error),
            ..Self::new(latency)
        }
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl LlmProvider for StubProvider {
    fn name(&self) -> &str {
        "stub"
    }

    async fn generate(&self, prompt: &str, cancel: &CancellationToken) -> Result<String, Error> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        tokio::select! {
            _ = cancel.cancelled() => return Err(Error::Cancelled),
            _ = tokio::time::sleep(self.latency) => {}
        }
        match &self.reply {
            Ok(Some(s)) => Ok(s.clone()),
            Ok(None) => {
                let text = prompt.rsplit(DIARY_MARKER).next().unwrap_or(prompt);
                Ok(json!({ "summary": text, "emotion": "행복, 없는감정", "solution": "쉬기" }).to_string())
            }
            Err(e) => Err(e.clone()),
        }
    }
}

/// 届いた結果を順に溜める sink
#[derive(Default)]
pub(crate) struct CollectSink(Mutex<Vec<Result<AnalysisResult, AnalyzeError>>>);

impl CollectSink {
    pub(crate) fn outcomes(&self) -> Vec<Result<AnalysisResult, AnalyzeError>> {
        self.0.lock().unwrap().clone()
    }
}

impl AnalysisSink for CollectSink {
    fn on_result(&self, result: &AnalysisResult) {
        self.0.lock().unwrap().push(Ok(result.clone()));
    }

    fn on_error(&self, error: &AnalyzeError) {
        self.0.lock().unwrap().push(Err(error.clone()));
    }
}

/// 環境変数をマップで与える EnvResolver（DIARY_HOME をホームにする）
pub(crate) struct MapEnv(HashMap<String, String>);

impl MapEnv {
    pub(crate) fn with_home(home: &Path, extra: &[(&str, &str)]) -> Self {
        let mut vars: HashMap<String, String> = extra
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        vars.insert("DIARY_HOME".to_string(), home.display().to_string());
        Self(vars)
    }
}

impl EnvResolver for MapEnv {
    fn resolve_home_dir(&self) -> Result<HomeDir, Error> {
        self.0
            .get("DIARY_HOME")
            .map(HomeDir::new)
            .ok_or_else(|| Error::env("HOME is not set"))
    }

    fn var(&self, name: &str) -> Option<String> {
        self.0.get(name).cloned()
    }
}
