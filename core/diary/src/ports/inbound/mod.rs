//! Inbound ポート: ドライバ（CLI）がアプリを呼び出すインターフェース

use crate::cli::Config;
use async_trait::async_trait;
use common::error::Error;

/// diary アプリケーションを実行する Inbound ポート
///
/// main はこの trait を実装した Runner の run を呼び出し、戻り値を終了コードにする。
#[async_trait]
pub trait UseCaseRunner: Send + Sync {
    async fn run(&self, config: Config) -> Result<i32, Error>;
}
