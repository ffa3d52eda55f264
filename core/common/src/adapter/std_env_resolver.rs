//! 標準環境変数解決実装（std::env を委譲）

use crate::domain::HomeDir;
use crate::error::Error;
use crate::ports::outbound::EnvResolver;
use std::env;
use std::path::PathBuf;

/// 標準環境変数解決実装
#[derive(Debug, Clone, Default)]
pub struct StdEnvResolver;

impl EnvResolver for StdEnvResolver {
    fn resolve_home_dir(&self) -> Result<HomeDir, Error> {
        resolve_home_with(|name| self.var(name))
    }

    fn var(&self, name: &str) -> Option<String> {
        env::var(name).ok().filter(|s| !s.is_empty())
    }
}

/// 変数の参照方法を差し替え可能なホーム解決（テストでは環境変数に触れない）
pub(crate) fn resolve_home_with<F>(var: F) -> Result<HomeDir, Error>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(home) = var("DIARY_HOME") {
        return Ok(HomeDir::new(PathBuf::from(home)));
    }

    let mut path = var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .or_else(|| var("HOME").map(|h| PathBuf::from(h).join(".config")))
        .ok_or_else(|| Error::env("HOME is not set"))?;
    path.push("diary");
    Ok(HomeDir::new(path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_diary_home_wins() {
        let home = resolve_home_with(lookup(&[
            ("DIARY_HOME", "/srv/diary"),
            ("XDG_CONFIG_HOME", "/xdg"),
            ("HOME", "/home/u"),
        ]))
        .unwrap();
        assert_eq!(&*home, &PathBuf::from("/srv/diary"));
    }

    #[test]
    fn test_xdg_config_home() {
        let home = resolve_home_with(lookup(&[("XDG_CONFIG_HOME", "/xdg"), ("HOME", "/home/u")]))
            .unwrap();
        assert_eq!(&*home, &PathBuf::from("/xdg/diary"));
    }

    #[test]
    fn test_home_fallback() {
        let home = resolve_home_with(lookup(&[("HOME", "/home/u")])).unwrap();
        assert_eq!(&*home, &PathBuf::from("/home/u/.config/diary"));
    }

    #[test]
    fn test_nothing_set() {
        let err = resolve_home_with(lookup(&[])).unwrap_err();
        assert!(matches!(err, Error::Env(_)));
    }
}
