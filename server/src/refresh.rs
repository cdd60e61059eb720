//! Periodic refresh behind the `watch` command.
//!
//! One cycle is a fetch from the provider followed by a call to the sink.
//! A cycle is awaited before the next tick is taken, and ticks missed while
//! a slow fetch was in flight are skipped rather than replayed, so at most
//! one fetch is ever outstanding.

use std::future::Future;
use std::time::Duration;

use tokio::time::MissedTickBehavior;

use chain_explorer::{ChainSnapshot, SnapshotProvider};

/// Runs refresh cycles every `period` until `shutdown` resolves.
///
/// Successful fetches are handed to `sink`. Failed ones are logged and the
/// loop carries on. A fetch still running when `shutdown` resolves is
/// dropped. Returns the number of cycles started.
pub async fn refresh_loop<S, F>(
    provider: &dyn SnapshotProvider,
    period: Duration,
    shutdown: S,
    mut sink: F,
) -> u64
where
    S: Future<Output = ()>,
    F: FnMut(&ChainSnapshot),
{
    let mut interval = tokio::time::interval(period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

    tokio::pin!(shutdown);
    let mut cycles = 0;

    loop {
        tokio::select! {
            biased;
            _ = &mut shutdown => break,
            _ = interval.tick() => {}
        }

        cycles += 1;
        let result = tokio::select! {
            biased;
            _ = &mut shutdown => break,
            result = provider.get_snapshot() => result,
        };

        match result {
            Ok(snapshot) => sink(&snapshot),
            Err(e) => tracing::warn!(
                provider = %provider.describe(),
                cycle = cycles,
                "refresh failed, keeping previous output: {}",
                e
            ),
        }
    }

    tracing::debug!(cycles, "refresh loop stopped");
    cycles
}

/// One-line summary printed above each rendering.
pub fn summary_line(snapshot: &ChainSnapshot) -> String {
    format!(
        "height {} | nodes {} | {} block(s) | {} transaction(s)",
        snapshot.height,
        snapshot.node_count,
        snapshot.blocks.len(),
        snapshot.total_transactions()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chain_explorer::{ExplorerError, ExplorerResult, StaticProvider};
    use std::sync::atomic::{AtomicU32, Ordering};

    /// Provider whose every fetch takes `fetch_time` and which records how
    /// many fetches overlapped.
    struct SlowProvider {
        fetch_time: Duration,
        started: AtomicU32,
        in_flight: AtomicU32,
        max_in_flight: AtomicU32,
    }

    impl SlowProvider {
        fn new(fetch_time: Duration) -> Self {
            Self {
                fetch_time,
                started: AtomicU32::new(0),
                in_flight: AtomicU32::new(0),
                max_in_flight: AtomicU32::new(0),
            }
        }
    }

    struct InFlight<'a>(&'a AtomicU32);

    impl Drop for InFlight<'_> {
        fn drop(&mut self) {
            self.0.fetch_sub(1, Ordering::SeqCst);
        }
    }

    #[async_trait]
    impl SnapshotProvider for SlowProvider {
        async fn get_snapshot(&self) -> ExplorerResult<ChainSnapshot> {
            self.started.fetch_add(1, Ordering::SeqCst);
            let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.max_in_flight.fetch_max(now, Ordering::SeqCst);
            let _guard = InFlight(&self.in_flight);

            tokio::time::sleep(self.fetch_time).await;
            Ok(StaticProvider::server_sample().current())
        }

        fn describe(&self) -> String {
            "slow".to_string()
        }
    }

    struct DownProvider;

    #[async_trait]
    impl SnapshotProvider for DownProvider {
        async fn get_snapshot(&self) -> ExplorerResult<ChainSnapshot> {
            Err(ExplorerError::Fetch("connection refused".to_string()))
        }

        fn describe(&self) -> String {
            "down".to_string()
        }
    }

    /// Cycles that start strictly before `elapsed` when each one takes
    /// `max(period, fetch_time)`.
    fn expected_cycles(elapsed: Duration, period: Duration, fetch_time: Duration) -> u32 {
        let step = period.max(fetch_time).as_millis();
        elapsed.as_millis().div_ceil(step) as u32
    }

    async fn run(provider: &SlowProvider, period: Duration, elapsed: Duration) -> (u64, u32) {
        let mut delivered = 0;
        let cycles = refresh_loop(provider, period, tokio::time::sleep(elapsed), |_| {
            delivered += 1
        })
        .await;
        (cycles, delivered)
    }

    #[tokio::test(start_paused = true)]
    async fn fast_fetches_follow_the_interval() {
        let period = Duration::from_secs(5);
        let fetch_time = Duration::from_secs(2);
        let elapsed = Duration::from_secs(23);
        let provider = SlowProvider::new(fetch_time);

        let (cycles, delivered) = run(&provider, period, elapsed).await;

        let expected = expected_cycles(elapsed, period, fetch_time);
        assert_eq!(expected, 5);
        assert_eq!(provider.started.load(Ordering::SeqCst), expected);
        assert_eq!(cycles, expected as u64);
        assert_eq!(delivered, 5);
        assert_eq!(provider.max_in_flight.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn slow_fetches_skip_missed_ticks_and_never_overlap() {
        let period = Duration::from_secs(5);
        let fetch_time = Duration::from_secs(12);
        let elapsed = Duration::from_secs(31);
        let provider = SlowProvider::new(fetch_time);

        let (cycles, delivered) = run(&provider, period, elapsed).await;

        // Cycles start at 0s, 12s and 24s; the third is cut off at 31s.
        let expected = expected_cycles(elapsed, period, fetch_time);
        assert_eq!(expected, 3);
        assert_eq!(provider.started.load(Ordering::SeqCst), expected);
        assert_eq!(cycles, expected as u64);
        assert_eq!(delivered, 2);
        assert_eq!(provider.max_in_flight.load(Ordering::SeqCst), 1);
        assert_eq!(provider.in_flight.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn failed_fetches_do_not_stop_the_loop() {
        let mut delivered = 0;
        let cycles = refresh_loop(
            &DownProvider,
            Duration::from_secs(1),
            tokio::time::sleep(Duration::from_millis(3500)),
            |_| delivered += 1,
        )
        .await;

        assert_eq!(cycles, 4);
        assert_eq!(delivered, 0);
    }

    #[test]
    fn summary_counts_blocks_and_transactions() {
        let snapshot = StaticProvider::page_sample().current();
        assert_eq!(
            summary_line(&snapshot),
            "height 45 | nodes 2 | 4 block(s) | 6 transaction(s)"
        );
    }
}
