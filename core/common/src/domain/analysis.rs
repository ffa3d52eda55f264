//! 日記分析の結果

use serde::{Deserialize, Serialize};

/// LLM 応答を解釈した 3 フィールドの分析結果
///
/// どのフィールドも省略可能。`emotion` は語彙でフィルタ済みの
/// `", "` 区切り文字列（該当語が 0 件なら空文字列）。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emotion: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub solution: Option<String>,
}

impl AnalysisResult {
    /// 表示・保存できる内容が何もないか
    pub fn is_empty(&self) -> bool {
        self.summary.is_none()
            && self.solution.is_none()
            && self.emotion.as_deref().map_or(true, str::is_empty)
    }

    /// フィルタ済み感情ラベルを順に返す
    pub fn emotion_terms(&self) -> impl Iterator<Item = &str> {
        self.emotion
            .as_deref()
            .unwrap_or("")
            .split(", ")
            .filter(|s| !s.is_empty())
    }
}
