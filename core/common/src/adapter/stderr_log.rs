//! 人間向けログ（stderr へ 1 行ずつ整形して出す）と複数 Log への分配
//!
//! `--verbose` 指定時だけ使う。fields は要点のみ出す（巨大化防止）。

use crate::error::Error;
use crate::ports::outbound::{Log, LogLevel, LogRecord};
use std::sync::Arc;

const FIELDS_SUMMARY_MAX: usize = 400;

/// 1 レコードを人間向けの 1 行にする
pub fn format_human(record: &LogRecord) -> String {
    let mut line = format!("[{}] {}", record.level.as_str(), record.message);
    if let Some(layer) = &record.layer {
        line.push_str(&format!(" layer={}", layer));
    }
    if let Some(kind) = &record.kind {
        line.push_str(&format!(" kind={}", kind));
    }
    if let Some(fields) = record.fields.as_ref().filter(|f| !f.is_empty()) {
        let s = serde_json::to_string(fields).unwrap_or_default();
        if s.chars().count() > FIELDS_SUMMARY_MAX {
            let truncated: String = s.chars().take(FIELDS_SUMMARY_MAX).collect();
            line.push_str(&format!(" {}... (len={})", truncated, s.len()));
        } else {
            line.push(' ');
            line.push_str(&s);
        }
    }
    line
}

/// stderr へ出す Log 実装（`min_level` より詳細なレコードは捨てる）
#[derive(Debug, Clone)]
pub struct StderrLog {
    min_level: LogLevel,
}

impl StderrLog {
    pub fn new(min_level: LogLevel) -> Self {
        Self { min_level }
    }
}

fn severity(level: LogLevel) -> u8 {
    match level {
        LogLevel::Error => 0,
        LogLevel::Warn => 1,
        LogLevel::Info => 2,
        LogLevel::Debug => 3,
    }
}

impl Log for StderrLog {
    fn log(&self, record: &LogRecord) -> Result<(), Error> {
        if severity(record.level) <= severity(self.min_level) {
            eprintln!("{}", format_human(record));
        }
        Ok(())
    }
}

/// 複数の Log へ同じレコードを流す。最初のエラーを返すが、残りへの出力は続ける。
pub struct TeeLog {
    sinks: Vec<Arc<dyn Log>>,
}

impl TeeLog {
    pub fn new(sinks: Vec<Arc<dyn Log>>) -> Self {
        Self { sinks }
    }
}

impl Log for TeeLog {
    fn log(&self, record: &LogRecord) -> Result<(), Error> {
        let mut first_err = None;
        for sink in &self.sinks {
            if let Err(e) = sink.log(record) {
                first_err.get_or_insert(e);
            }
        }
        first_err.map_or(Ok(()), Err)
    }
}
