use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant};

/// Countdown cadence.
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// One elapsed period, tagged with the countdown generation it belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tick {
    pub generation: u64,
}

/// Periodic tick source running on its own task.
///
/// The first tick arrives one full period after `spawn`. Dropping the ticker
/// aborts the task; ticks it already queued still arrive and must be filtered
/// by generation.
#[derive(Debug)]
pub struct Ticker {
    generation: u64,
    handle: JoinHandle<()>,
}

impl Ticker {
    pub fn spawn(generation: u64, period: Duration, tx: mpsc::UnboundedSender<Tick>) -> Self {
        let first = Instant::now() + period;
        let handle = tokio::spawn(async move {
            let mut interval = time::interval_at(first, period);
            loop {
                interval.tick().await;
                if tx.send(Tick { generation }).is_err() {
                    break;
                }
            }
        });
        Self { generation, handle }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn ticks_once_per_period() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let start = Instant::now();
        let _ticker = Ticker::spawn(7, TICK_PERIOD, tx);

        for _ in 0..3 {
            assert_eq!(rx.recv().await, Some(Tick { generation: 7 }));
        }
        assert_eq!(start.elapsed(), Duration::from_secs(3));
    }

    #[tokio::test(start_paused = true)]
    async fn dropping_stops_the_ticks() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let ticker = Ticker::spawn(1, TICK_PERIOD, tx);
        assert!(rx.recv().await.is_some());
        drop(ticker);

        // The aborted task drops its sender, closing the channel.
        time::sleep(Duration::from_secs(5)).await;
        assert_eq!(rx.recv().await, None);
    }
}
