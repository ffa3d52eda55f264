//! diary コマンドの enum（Command Pattern）
//!
//! 単発分析・解釈のみ・監視モードの分岐を enum で明示する。

/// diary の実行モード
#[derive(Debug, Clone, PartialEq)]
pub enum DiaryCommand {
    /// ヘルプ表示
    Help,
    /// 感情語彙の一覧表示
    ListEmotions,
    /// 標準入力のモデル出力を解釈するだけ（通信なし）
    Interpret,
    /// 日記を 1 回分析する（text が None なら標準入力から読む）
    Analyze { text: Option<String> },
    /// 標準入力の行を下書きに追記しながら debounce 付きで分析する
    Watch,
}
