//! 日記分析ユースケース: プロンプト生成 → LLM 呼び出し → 応答の解釈

use crate::domain::{AnalyzeError, DiaryText};
use common::domain::AnalysisResult;
use common::llm::LlmProvider;
use common::ports::outbound::{Log, LogRecord};
use common::prompt::build_analysis_prompt;
use common::ResponseInterpreter;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// 1 回分の分析を行うユースケース
///
/// 状態を持たないので、debounce 側から複数タスクで共有してよい。
pub struct AnalyzeUseCase {
    provider: Arc<dyn LlmProvider>,
    interpreter: ResponseInterpreter,
    logger: Arc<dyn Log>,
}

impl AnalyzeUseCase {
    pub fn new(
        provider: Arc<dyn LlmProvider>,
        interpreter: ResponseInterpreter,
        logger: Arc<dyn Log>,
    ) -> Self {
        Self {
            provider,
            interpreter,
            logger,
        }
    }

    /// 日記本文を分析する。キャンセルされたら AnalyzeError::Cancelled。
    pub async fn analyze(
        &self,
        text: &DiaryText,
        cancel: &CancellationToken,
    ) -> Result<AnalysisResult, AnalyzeError> {
        if cancel.is_cancelled() {
            return Err(AnalyzeError::Cancelled);
        }
        let prompt = build_analysis_prompt(text, Some(self.interpreter.vocabulary()));
        let _ = self.logger.log(
            &LogRecord::info("analysis started")
                .layer("usecase")
                .kind("analyze")
                .field("provider", self.provider.name())
                .field("chars", text.char_count()),
        );

        let raw = match self.provider.generate(&prompt, cancel).await {
            Ok(raw) => raw,
            Err(e) => {
                let err = AnalyzeError::from(e);
                self.log_failure(&err);
                return Err(err);
            }
        };

        let result = self.interpret_raw(&raw);
        match &result {
            Ok(r) => {
                let _ = self.logger.log(
                    &LogRecord::info("analysis finished")
                        .layer("usecase")
                        .kind("analyze")
                        .field("emotion", r.emotion.clone().unwrap_or_default())
                        .field("response_len", raw.len()),
                );
            }
            Err(e) => self.log_failure(e),
        }
        result
    }

    /// モデル出力の文字列を解釈だけする（通信しない）
    pub fn interpret_raw(&self, raw: &str) -> Result<AnalysisResult, AnalyzeError> {
        Ok(self.interpreter.interpret(raw)?)
    }

    fn log_failure(&self, err: &AnalyzeError) {
        let record = if matches!(err, AnalyzeError::Cancelled) {
            LogRecord::debug(err.to_string())
        } else {
            LogRecord::warn(err.to_string())
        };
        let _ = self
            .logger
            .log(&record.layer("usecase").kind("analyze").field("error_kind", err.kind()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::adapter::NoopLog;
    use common::domain::EmotionVocabulary;
    use common::llm::echo::EchoProvider;
    use common::InterpretationError;

    fn use_case(provider: EchoProvider) -> AnalyzeUseCase {
        AnalyzeUseCase::new(
            Arc::new(provider),
            ResponseInterpreter::new(Arc::new(EmotionVocabulary::korean())),
            Arc::new(NoopLog),
        )
    }

    fn text(s: &str) -> DiaryText {
        DiaryText::parse(s, 0).unwrap()
    }

    #[tokio::test]
    async fn test_analyze_with_echo() {
        let uc = use_case(EchoProvider::new());
        let r = uc
            .analyze(&text("오늘은 공원에서 오래 걸었다."), &CancellationToken::new())
            .await
            .unwrap();
        assert_eq!(r.summary.as_deref(), Some("오늘은 공원에서 오래 걸었다."));
        assert_eq!(r.emotion.as_deref(), Some("중립"));
    }

    #[tokio::test]
    async fn test_analyze_sanitizes_emotion() {
        let uc = use_case(EchoProvider::with_response(
            "결과입니다: {\"summary\":\"s\",\"emotion\":\"행복, 없는감정\"} 끝",
        ));
        let r = uc
            .analyze(&text("아무 내용이나 적어 본다"), &CancellationToken::new())
            .await
            .unwrap();
        assert_eq!(r.emotion.as_deref(), Some("행복"));
        assert_eq!(r.solution, None);
    }

    #[tokio::test]
    async fn test_analyze_malformed() {
        let uc = use_case(EchoProvider::with_response("not json at all"));
        let err = uc
            .analyze(&text("아무 내용이나 적어 본다"), &CancellationToken::new())
            .await
            .unwrap_err();
        assert_eq!(
            err,
            AnalyzeError::Interpretation(InterpretationError::MalformedResponse)
        );
    }

    #[tokio::test]
    async fn test_analyze_cancelled_before_start() {
        let uc = use_case(EchoProvider::new());
        let token = CancellationToken::new();
        token.cancel();
        let err = uc
            .analyze(&text("아무 내용이나 적어 본다"), &token)
            .await
            .unwrap_err();
        assert_eq!(err, AnalyzeError::Cancelled);
    }

    #[test]
    fn test_interpret_raw_empty() {
        let uc = use_case(EchoProvider::new());
        assert_eq!(
            uc.interpret_raw("  \n").unwrap_err(),
            AnalyzeError::Interpretation(InterpretationError::EmptyInput)
        );
    }
}
