//! ドメイン型（Newtype と分析結果）
//!
//! String / PathBuf を直接運ばず、意味のある型に包んで境界を明確にする。

pub mod analysis;
pub mod emotion;

use std::path::{Path, PathBuf};

pub use analysis::AnalysisResult;
pub use emotion::EmotionVocabulary;

/// ホームディレクトリのパス（config.json / ログの置き場所）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HomeDir(PathBuf);

impl HomeDir {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self(path.into())
    }

    /// 設定ファイル config.json のパス
    pub fn config_path(&self) -> PathBuf {
        self.0.join("config.json")
    }

    /// JSONL ログファイルのパス
    pub fn log_path(&self) -> PathBuf {
        self.0.join("state").join("diary.log.jsonl")
    }
}

impl std::ops::Deref for HomeDir {
    type Target = PathBuf;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl AsRef<Path> for HomeDir {
    fn as_ref(&self) -> &Path {
        self.0.as_ref()
    }
}

impl From<PathBuf> for HomeDir {
    fn from(p: PathBuf) -> Self {
        Self(p)
    }
}

/// プロバイダ名（gemini, echo）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderName(String);

impl ProviderName {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }
}

impl std::ops::Deref for ProviderName {
    type Target = str;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl std::fmt::Display for ProviderName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// モデル名（gemini-2.0-flash 等）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelName(String);

impl ModelName {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }
}

impl std::ops::Deref for ModelName {
    type Target = str;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl std::fmt::Display for ModelName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_home_dir_paths() {
        let home = HomeDir::new("/tmp/diary-home");
        assert_eq!(home.config_path(), PathBuf::from("/tmp/diary-home/config.json"));
        assert_eq!(
            home.log_path(),
            PathBuf::from("/tmp/diary-home/state/diary.log.jsonl")
        );
    }

    #[test]
    fn test_newtypes_display() {
        assert_eq!(ProviderName::new("gemini").to_string(), "gemini");
        assert_eq!(&*ModelName::new("gemini-2.0-flash"), "gemini-2.0-flash");
    }
}
