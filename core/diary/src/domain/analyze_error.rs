//! 分析パイプラインのエラー

use common::error::Error;
use common::InterpretationError;
use std::time::Duration;

/// 分析 1 回分の失敗
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AnalyzeError {
    /// 本文が短すぎる（通信しない）
    #[error("diary text is too short ({actual} chars, need more than {min})")]
    TooShort { min: usize, actual: usize },
    /// 前回の成功から最小間隔が経っていない
    #[error("too many requests, try again in {:.1}s", .retry_after.as_secs_f64())]
    Throttled { retry_after: Duration },
    /// 通信・API のエラー
    #[error("analysis request failed: {0}")]
    Transport(Error),
    /// モデル出力を解釈できない
    #[error("could not interpret model response: {0}")]
    Interpretation(#[from] InterpretationError),
    /// 新しい入力や Ctrl-C でキャンセルされた
    #[error("analysis cancelled")]
    Cancelled,
}

impl From<Error> for AnalyzeError {
    fn from(e: Error) -> Self {
        match e {
            Error::Cancelled => Self::Cancelled,
            other => Self::Transport(other),
        }
    }
}

impl AnalyzeError {
    /// ログ・JSON 出力用の種別名
    pub fn kind(&self) -> &'static str {
        match self {
            Self::TooShort { .. } => "too_short",
            Self::Throttled { .. } => "throttled",
            Self::Transport(_) => "transport",
            Self::Interpretation(InterpretationError::EmptyInput) => "empty_response",
            Self::Interpretation(InterpretationError::MalformedResponse) => "malformed_response",
            Self::Cancelled => "cancelled",
        }
    }

    /// 終了コード
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::TooShort { .. } => 64,
            Self::Throttled { .. } => 75,
            Self::Transport(e) => e.exit_code(),
            Self::Interpretation(_) => 65,
            Self::Cancelled => 130,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cancelled_transport_maps_to_cancelled() {
        assert_eq!(AnalyzeError::from(Error::Cancelled), AnalyzeError::Cancelled);
        assert!(matches!(
            AnalyzeError::from(Error::http("boom")),
            AnalyzeError::Transport(_)
        ));
    }

    #[test]
    fn test_exit_codes_and_kinds() {
        let e = AnalyzeError::from(InterpretationError::MalformedResponse);
        assert_eq!(e.exit_code(), 65);
        assert_eq!(e.kind(), "malformed_response");
        assert_eq!(AnalyzeError::TooShort { min: 10, actual: 3 }.exit_code(), 64);
        assert_eq!(
            AnalyzeError::Transport(Error::http_status(503, "down")).exit_code(),
            69
        );
    }

    #[test]
    fn test_throttled_message() {
        let e = AnalyzeError::Throttled {
            retry_after: Duration::from_millis(3500),
        };
        assert_eq!(e.to_string(), "too many requests, try again in 3.5s");
    }
}
