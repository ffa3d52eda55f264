//! 分析結果の届け先（表示層）の Outbound ポート

use crate::domain::AnalyzeError;
use common::domain::AnalysisResult;

/// 分析結果・失敗を表示層へ届ける
///
/// 呼び出し順は分析を発行した順と一致する（置き換えられた分析は届かない）。
pub trait AnalysisSink: Send + Sync {
    fn on_result(&self, result: &AnalysisResult);
    fn on_error(&self, error: &AnalyzeError);

    /// 結果か失敗を届け、対応する終了コードを返す
    fn deliver(&self, outcome: &Result<AnalysisResult, AnalyzeError>) -> i32 {
        match outcome {
            Ok(result) => {
                self.on_result(result);
                0
            }
            Err(e) => {
                self.on_error(e);
                e.exit_code()
            }
        }
    }
}
