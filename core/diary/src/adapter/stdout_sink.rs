//! 分析結果を標準出力へ、失敗を標準エラーへ出す AnalysisSink

use crate::domain::AnalyzeError;
use crate::ports::outbound::AnalysisSink;
use common::domain::AnalysisResult;
use serde_json::json;

/// 端末向けの表示先。`json` が true なら 1 結果 1 行の JSON を出す。
#[derive(Debug, Clone, Copy, Default)]
pub struct StdoutSink {
    json: bool,
}

impl StdoutSink {
    pub fn new(json: bool) -> Self {
        Self { json }
    }
}

/// 人間向けの表示（値が無い欄は省く）
pub fn format_result(result: &AnalysisResult) -> String {
    let rows = [
        ("요약", result.summary.as_deref()),
        ("감정", result.emotion.as_deref()),
        ("해결책", result.solution.as_deref()),
    ];
    let lines: Vec<String> = rows
        .iter()
        .filter_map(|(label, value)| value.map(|v| format!("{}: {}", label, v)))
        .collect();
    if lines.is_empty() {
        "(no analysis)".to_string()
    } else {
        lines.join("\n")
    }
}

/// JSON 1 行（結果）
pub fn result_json_line(result: &AnalysisResult) -> String {
    serde_json::to_string(result).unwrap_or_else(|_| "{}".to_string())
}

/// JSON 1 行（失敗）
pub fn error_json_line(error: &AnalyzeError) -> String {
    json!({ "error": error.to_string(), "kind": error.kind() }).to_string()
}

impl AnalysisSink for StdoutSink {
    fn on_result(&self, result: &AnalysisResult) {
        if self.json {
            println!("{}", result_json_line(result));
        } else {
            println!("{}", format_result(result));
        }
    }

    fn on_error(&self, error: &AnalyzeError) {
        if self.json {
            println!("{}", error_json_line(error));
        } else {
            eprintln!("diary: {}", error);
        }
    }
}
