//! 成功した分析どうしの最小間隔を守るゲート

use std::time::Duration;
use tokio::time::Instant;

/// 直前の成功時刻から `min_interval` 経つまで次の呼び出しを拒否する
///
/// 失敗・キャンセルされた呼び出しは記録しない（すぐ再試行できる）。
#[derive(Debug, Clone)]
pub struct MinIntervalGate {
    min_interval: Duration,
    last_success: Option<Instant>,
}

impl MinIntervalGate {
    pub fn new(min_interval: Duration) -> Self {
        Self {
            min_interval,
            last_success: None,
        }
    }

    /// 呼び出してよければ Ok、まだなら残り時間を Err で返す
    pub fn check(&self, now: Instant) -> Result<(), Duration> {
        let Some(last) = self.last_success else {
            return Ok(());
        };
        let elapsed = now.saturating_duration_since(last);
        if elapsed >= self.min_interval {
            Ok(())
        } else {
            Err(self.min_interval - elapsed)
        }
    }

    pub fn record_success(&mut self, now: Instant) {
        self.last_success = Some(now);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_call_is_allowed() {
        let gate = MinIntervalGate::new(Duration::from_secs(5));
        assert_eq!(gate.check(Instant::now()), Ok(()));
    }

    #[test]
    fn test_refuses_inside_window() {
        let mut gate = MinIntervalGate::new(Duration::from_secs(5));
        let t0 = Instant::now();
        gate.record_success(t0);
        assert_eq!(
            gate.check(t0 + Duration::from_secs(2)),
            Err(Duration::from_secs(3))
        );
        assert_eq!(gate.check(t0 + Duration::from_secs(5)), Ok(()));
    }

    #[test]
    fn test_zero_interval_never_refuses() {
        let mut gate = MinIntervalGate::new(Duration::ZERO);
        let t0 = Instant::now();
        gate.record_success(t0);
        assert_eq!(gate.check(t0), Ok(()));
    }
}
