//! 入力が落ち着いてから分析する debounce 付きパイプライン
//!
//! 状態遷移: Idle → PendingDebounce → InFlight → (Idle | Error)
//!
//! - 新しい submit は保留中・実行中の分析をキャンセルして置き換える（生きている分析は常に 1 つ）
//! - 置き換えられた分析の結果は届かない。届く結果は submit の順に並ぶ
//! - InFlight への遷移は、前回の成功から min_interval 以内なら Throttled で拒否する

use crate::domain::{AnalyzeError, DiaryText};
use crate::usecase::analyze::AnalyzeUseCase;
use crate::usecase::rate_limit::MinIntervalGate;
use common::domain::AnalysisResult;
use common::ports::outbound::{Log, LogRecord};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

/// パイプラインの状態
#[derive(Debug, Clone, PartialEq)]
pub enum PipelineState {
    Idle,
    PendingDebounce,
    InFlight,
    /// 直近の分析が失敗した（次の submit で抜ける）
    Error(AnalyzeError),
}

/// 届けられる分析結果。`generation` は submit が返した番号。
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisEvent {
    pub generation: u64,
    pub outcome: Result<AnalysisResult, AnalyzeError>,
}

/// debounce と間隔制限の設定
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DebouncePolicy {
    pub debounce: Duration,
    pub min_interval: Duration,
    pub min_chars: usize,
}

struct Shared {
    state: PipelineState,
    generation: u64,
    current: Option<CancellationToken>,
    gate: MinIntervalGate,
}

struct Inner {
    use_case: Arc<AnalyzeUseCase>,
    logger: Arc<dyn Log>,
    debounce: Duration,
    min_chars: usize,
    shared: Mutex<Shared>,
    events: mpsc::UnboundedSender<AnalysisEvent>,
}

impl Inner {
    fn lock(&self) -> MutexGuard<'_, Shared> {
        self.shared.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn debug(&self, message: &str, generation: u64) {
        let _ = self.logger.log(
            &LogRecord::debug(message)
                .layer("usecase")
                .kind("debounce")
                .field("generation", generation),
        );
    }

    /// 現在の世代のまま結果を届ける（置き換え済みなら何もしない）
    fn finish(
        &self,
        shared: &mut Shared,
        generation: u64,
        token: &CancellationToken,
        outcome: Result<AnalysisResult, AnalyzeError>,
    ) {
        if token.is_cancelled() || shared.generation != generation {
            self.debug("analysis superseded", generation);
            return;
        }
        shared.state = match &outcome {
            Ok(_) => PipelineState::Idle,
            Err(e) => PipelineState::Error(e.clone()),
        };
        shared.current = None;
        let _ = self.events.send(AnalysisEvent {
            generation,
            outcome,
        });
    }
}

/// debounce 付きの分析器
///
/// tokio ランタイム上で使う。結果は `new` が返す受信側に届く。
/// 分析器を drop しても実行中の分析は最後まで走り、全て終わると受信側が閉じる。
pub struct DebouncedAnalyzer {
    inner: Arc<Inner>,
}

impl DebouncedAnalyzer {
    pub fn new(
        use_case: Arc<AnalyzeUseCase>,
        policy: DebouncePolicy,
        logger: Arc<dyn Log>,
    ) -> (Self, mpsc::UnboundedReceiver<AnalysisEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let inner = Inner {
            use_case,
            logger,
            debounce: policy.debounce,
            min_chars: policy.min_chars,
            shared: Mutex::new(Shared {
                state: PipelineState::Idle,
                generation: 0,
                current: None,
                gate: MinIntervalGate::new(policy.min_interval),
            }),
            events: tx,
        };
        (
            Self {
                inner: Arc::new(inner),
            },
            rx,
        )
    }

    /// 下書きを投入する。保留中・実行中の分析は置き換えられる。
    ///
    /// 短すぎる下書きは通信せず、すぐに TooShort を届ける。
    pub fn submit(&self, text: &str) -> u64 {
        let mut shared = self.inner.lock();
        if let Some(prev) = shared.current.take() {
            prev.cancel();
        }
        shared.generation += 1;
        let generation = shared.generation;

        let text = match DiaryText::parse(text, self.inner.min_chars) {
            Ok(t) => t,
            Err(e) => {
                shared.state = PipelineState::Error(e.clone());
                let _ = self.inner.events.send(AnalysisEvent {
                    generation,
                    outcome: Err(e),
                });
                return generation;
            }
        };

        let token = CancellationToken::new();
        shared.current = Some(token.clone());
        shared.state = PipelineState::PendingDebounce;
        drop(shared);

        self.inner.debug("analysis scheduled", generation);
        tokio::spawn(run_one(Arc::clone(&self.inner), generation, text, token));
        generation
    }

    /// 保留中・実行中の分析を取り消して Idle に戻す
    pub fn cancel(&self) {
        let mut shared = self.inner.lock();
        if let Some(token) = shared.current.take() {
            token.cancel();
        }
        shared.generation += 1;
        shared.state = PipelineState::Idle;
    }

    pub fn state(&self) -> PipelineState {
        self.inner.lock().state.clone()
    }
}

async fn run_one(inner: Arc<Inner>, generation: u64, text: DiaryText, token: CancellationToken) {
    tokio::select! {
        _ = token.cancelled() => return,
        _ = tokio::time::sleep(inner.debounce) => {}
    }

    {
        let mut shared = inner.lock();
        if token.is_cancelled() {
            return;
        }
        if let Err(retry_after) = shared.gate.check(Instant::now()) {
            inner.debug("analysis throttled", generation);
            inner.finish(
                &mut shared,
                generation,
                &token,
                Err(AnalyzeError::Throttled { retry_after }),
            );
            return;
        }
        shared.state = PipelineState::InFlight;
    }

    let outcome = inner.use_case.analyze(&text, &token).await;

    let mut shared = inner.lock();
    if outcome.is_ok() && !token.is_cancelled() {
        shared.gate.record_success(Instant::now());
    }
    inner.finish(&mut shared, generation, &token, outcome);
}
