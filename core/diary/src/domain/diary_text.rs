//! 分析対象の日記本文

use crate::domain::AnalyzeError;

/// 短すぎる下書きは送らない（この文字数以下は拒否）
pub const DEFAULT_MIN_CHARS: usize = 10;

/// 検証済みの日記本文
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiaryText(String);

impl DiaryText {
    /// 前後の空白を除いた文字数が `min_chars` を超えるときだけ受け付ける
    pub fn parse(text: &str, min_chars: usize) -> Result<Self, AnalyzeError> {
        let trimmed = text.trim();
        let actual = trimmed.chars().count();
        if actual <= min_chars {
            return Err(AnalyzeError::TooShort {
                min: min_chars,
                actual,
            });
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn char_count(&self) -> usize {
        self.0.chars().count()
    }
}

impl std::ops::Deref for DiaryText {
    type Target = str;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
