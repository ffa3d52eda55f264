//! 設定ファイル読み込みの Outbound ポート

use crate::domain::DiaryConfig;
use common::error::Error;

/// config.json を読み込む
///
/// ファイルが無ければ既定値（全項目 None）、壊れていれば Err。
pub trait ConfigLoader: Send + Sync {
    fn load(&self) -> Result<DiaryConfig, Error>;
}
