//! エラーハンドリング
//!
//! 全レイヤー共通のエラー型。CLI では `exit_code()` で終了コード（sysexits 準拠）に変換する。

/// 共通エラー型
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// 引数不正（usage を表示する）
    #[error("{0}")]
    InvalidArgument(String),
    /// 環境変数の欠如など
    #[error("{0}")]
    Env(String),
    /// ファイル I/O
    #[error("{0}")]
    Io(String),
    /// JSON のシリアライズ・パース失敗
    #[error("{0}")]
    Json(String),
    /// HTTP 通信・LLM API のエラー
    #[error("{message}")]
    Http {
        status: Option<u16>,
        message: String,
    },
    /// 設定ファイルの不正
    #[error("{0}")]
    Config(String),
    /// キャンセルされた
    #[error("cancelled")]
    Cancelled,
}

impl Error {
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    pub fn env(msg: impl Into<String>) -> Self {
        Self::Env(msg.into())
    }

    pub fn io_msg(msg: impl Into<String>) -> Self {
        Self::Io(msg.into())
    }

    pub fn json(msg: impl Into<String>) -> Self {
        Self::Json(msg.into())
    }

    /// ステータスコードなしの HTTP エラー（接続失敗・レスポンス構造不正など）
    pub fn http(msg: impl Into<String>) -> Self {
        Self::Http {
            status: None,
            message: msg.into(),
        }
    }

    pub fn http_status(status: u16, msg: impl Into<String>) -> Self {
        Self::Http {
            status: Some(status),
            message: msg.into(),
        }
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// usage を表示すべきエラーか
    pub fn is_usage(&self) -> bool {
        matches!(self, Self::InvalidArgument(_))
    }

    /// 終了コード
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::InvalidArgument(_) => 64,
            Self::Json(_) => 65,
            Self::Http { .. } => 69,
            Self::Env(_) | Self::Config(_) => 78,
            Self::Io(_) => 74,
            Self::Cancelled => 130,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_helpers() {
        let err = Error::invalid_argument("test");
        assert_eq!(err.to_string(), "test");
        assert_eq!(err.exit_code(), 64);
        assert!(err.is_usage());

        let err = Error::http("connection refused");
        assert_eq!(err.to_string(), "connection refused");
        assert_eq!(err.exit_code(), 69);
        assert!(!err.is_usage());
    }

    #[test]
    fn test_http_status_is_kept() {
        let err = Error::http_status(429, "Gemini API error: quota");
        assert!(matches!(err, Error::Http { status: Some(429), .. }));
        assert_eq!(err.to_string(), "Gemini API error: quota");
    }

    #[test]
    fn test_cancelled_exit_code() {
        assert_eq!(Error::Cancelled.exit_code(), 130);
        assert_eq!(Error::Cancelled.to_string(), "cancelled");
    }
}
