//! config.json の読み込み（FileSystem ポート経由）

use crate::domain::DiaryConfig;
use crate::ports::outbound::ConfigLoader;
use common::error::Error;
use common::ports::outbound::FileSystem;
use std::path::PathBuf;
use std::sync::Arc;

/// 標準の設定ローダー（パスが None ならホーム未解決として既定値）
pub struct StdConfigLoader {
    fs: Arc<dyn FileSystem>,
    path: Option<PathBuf>,
}

impl StdConfigLoader {
    pub fn new(fs: Arc<dyn FileSystem>, path: Option<PathBuf>) -> Self {
        Self { fs, path }
    }
}

impl ConfigLoader for StdConfigLoader {
    fn load(&self) -> Result<DiaryConfig, Error> {
        let Some(path) = self.path.as_deref() else {
            return Ok(DiaryConfig::default());
        };
        if !self.fs.is_file(path) {
            return Ok(DiaryConfig::default());
        }
        let contents = self.fs.read_to_string(path)?;
        DiaryConfig::parse(&contents)
            .map_err(|e| Error::config(format!("{}: {}", path.display(), e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::adapter::StdFileSystem;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let loader = StdConfigLoader::new(
            Arc::new(StdFileSystem),
            Some(dir.path().join("config.json")),
        );
        assert_eq!(loader.load().unwrap(), DiaryConfig::default());
    }

    #[test]
    fn test_no_path_gives_defaults() {
        let loader = StdConfigLoader::new(Arc::new(StdFileSystem), None);
        assert_eq!(loader.load().unwrap(), DiaryConfig::default());
    }

    #[test]
    fn test_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"provider":"echo","debounce_ms":200}"#).unwrap();
        let loader = StdConfigLoader::new(Arc::new(StdFileSystem), Some(path));
        let cfg = loader.load().unwrap();
        assert_eq!(cfg.provider.as_deref(), Some("echo"));
        assert_eq!(cfg.debounce_ms, Some(200));
    }

    #[test]
    fn test_broken_file_is_config_error_with_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{ broken").unwrap();
        let loader = StdConfigLoader::new(Arc::new(StdFileSystem), Some(path));
        let err = loader.load().unwrap_err();
        assert!(matches!(err, Error::Config(_)));
        assert!(err.to_string().contains("config.json"));
    }
}
