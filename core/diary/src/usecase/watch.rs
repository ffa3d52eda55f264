//! watch モード: 入力行を下書きに追記し続け、debounce 付きで分析する

use crate::ports::outbound::AnalysisSink;
use crate::usecase::debounce::{AnalysisEvent, DebouncedAnalyzer};
use common::error::Error;
use std::future::Future;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::sync::mpsc::UnboundedReceiver;

/// 入力が尽きるまで行を下書きへ追記して submit し、届いた結果を sink に流す。
///
/// EOF 後は残りの分析を待ってから戻る。`shutdown` が完了したら分析を取り消して 130。
/// 戻り値は最後に届いた結果の終了コード（何も届かなければ 0）。
pub async fn run_watch<R, S>(
    input: R,
    analyzer: DebouncedAnalyzer,
    mut events: UnboundedReceiver<AnalysisEvent>,
    sink: &dyn AnalysisSink,
    shutdown: S,
) -> Result<i32, Error>
where
    R: AsyncBufRead + Unpin,
    S: Future<Output = ()>,
{
    tokio::pin!(shutdown);
    let mut lines = input.lines();
    let mut draft = String::new();
    let mut code = 0;

    loop {
        tokio::select! {
            _ = &mut shutdown => {
                analyzer.cancel();
                return Ok(130);
            }
            line = lines.next_line() => {
                match line.map_err(|e| Error::io_msg(e.to_string()))? {
                    Some(line) => {
                        if !draft.is_empty() {
                            draft.push('\n');
                        }
                        draft.push_str(&line);
                        analyzer.submit(&draft);
                    }
                    None => break,
                }
            }
            Some(event) = events.recv() => {
                code = sink.deliver(&event.outcome);
            }
        }
    }

    // 分析器を手放すと、残りの分析が終わった時点で受信側が閉じる
    drop(analyzer);
    loop {
        tokio::select! {
            _ = &mut shutdown => return Ok(130),
            event = events.recv() => match event {
                Some(event) => code = sink.deliver(&event.outcome),
                None => break,
            },
        }
    }
    Ok(code)
}
