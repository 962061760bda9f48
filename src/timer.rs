use serde::Serialize;
use std::time::Duration;
use tokio::task::AbortHandle;
use tokio::time::{self, Instant};

pub const TICK: Duration = Duration::from_secs(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerState {
    #[default]
    Stopped,
    Running,
}

/// Elapsed-seconds counter for a session.
///
/// Each run gets a new generation; ticks carrying an older generation are
/// ignored, so a ticker that was cancelled mid-flight never counts.
#[derive(Debug, Default)]
pub struct SessionTimer {
    elapsed: u64,
    state: TimerState,
    generation: u64,
    ticker: Option<AbortHandle>,
}

impl SessionTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restores an accumulated count. Counting is never restored.
    pub fn restore(elapsed: u64) -> Self {
        Self {
            elapsed,
            state: TimerState::Stopped,
            generation: 0,
            ticker: None,
        }
    }

    pub fn elapsed(&self) -> u64 {
        self.elapsed
    }

    pub fn state(&self) -> TimerState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == TimerState::Running
    }

    /// Moves to `Running` and returns the generation the ticker must carry,
    /// or `None` when already running.
    pub fn start(&mut self) -> Option<u64> {
        if self.is_running() {
            return None;
        }
        self.state = TimerState::Running;
        self.generation += 1;
        Some(self.generation)
    }

    pub fn attach(&mut self, ticker: AbortHandle) {
        if let Some(previous) = self.ticker.replace(ticker) {
            previous.abort();
        }
    }

    pub fn stop(&mut self) -> bool {
        let was_running = self.is_running();
        self.state = TimerState::Stopped;
        self.generation += 1;
        if let Some(ticker) = self.ticker.take() {
            ticker.abort();
        }
        was_running
    }

    /// Flips the state. Returns the new generation when the timer started.
    pub fn toggle(&mut self) -> Option<u64> {
        if self.is_running() {
            self.stop();
            None
        } else {
            self.start()
        }
    }

    pub fn reset(&mut self) {
        self.stop();
        self.elapsed = 0;
    }

    pub fn tick(&mut self, generation: u64) -> bool {
        if !self.is_running() || generation != self.generation {
            return false;
        }
        self.elapsed = self.elapsed.saturating_add(1);
        true
    }

    pub fn snapshot(&self) -> TimerSnapshot {
        TimerSnapshot {
            elapsed: self.elapsed,
            state: self.state,
            clock: format_clock(self.elapsed),
        }
    }
}

impl Drop for SessionTimer {
    fn drop(&mut self) {
        if let Some(ticker) = self.ticker.take() {
            ticker.abort();
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TimerSnapshot {
    pub elapsed: u64,
    pub state: TimerState,
    pub clock: String,
}

pub fn format_clock(total_seconds: u64) -> String {
    format!("{:02}:{:02}", total_seconds / 60, total_seconds % 60)
}

/// Runs `on_tick` once per `period` until it returns `false` or the returned
/// handle is aborted. The first tick fires one full period after spawning.
pub fn spawn_ticker<F, Fut>(period: Duration, mut on_tick: F) -> AbortHandle
where
    F: FnMut() -> Fut + Send + 'static,
    Fut: Future<Output = bool> + Send + 'static,
{
    let task = tokio::spawn(async move {
        let mut ticks = time::interval_at(Instant::now() + period, period);
        loop {
            ticks.tick().await;
            if !on_tick().await {
                break;
            }
        }
    });
    task.abort_handle()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicU64, Ordering};

    #[test]
    fn toggle_flips_between_states() {
        let mut timer = SessionTimer::new();
        let generation = timer.toggle().expect("timer should start");
        assert!(timer.is_running());
        assert!(timer.tick(generation));
        assert_eq!(timer.elapsed(), 1);

        assert_eq!(timer.toggle(), None);
        assert_eq!(timer.state(), TimerState::Stopped);
        assert!(!timer.tick(generation));
        assert_eq!(timer.elapsed(), 1);
    }

    #[test]
    fn stale_generation_does_not_count() {
        let mut timer = SessionTimer::new();
        let first = timer.start().unwrap();
        timer.stop();
        let second = timer.start().unwrap();

        assert_ne!(first, second);
        assert!(!timer.tick(first));
        assert!(timer.tick(second));
        assert_eq!(timer.elapsed(), 1);
    }

    #[test]
    fn reset_stops_and_zeroes() {
        let mut timer = SessionTimer::restore(42);
        let generation = timer.start().unwrap();
        timer.reset();
        assert_eq!(timer.elapsed(), 0);
        assert_eq!(timer.state(), TimerState::Stopped);
        assert!(!timer.tick(generation));
    }

    #[test]
    fn restore_keeps_elapsed_but_not_running() {
        let timer = SessionTimer::restore(125);
        assert_eq!(timer.elapsed(), 125);
        assert!(!timer.is_running());
        assert_eq!(timer.snapshot().clock, "02:05");
    }

    #[test]
    fn clock_format_pads_and_keeps_growing() {
        assert_eq!(format_clock(0), "00:00");
        assert_eq!(format_clock(59), "00:59");
        assert_eq!(format_clock(61), "01:01");
        assert_eq!(format_clock(6_000), "100:00");
    }

    #[tokio::test(start_paused = true)]
    async fn ticker_fires_once_per_period_until_aborted() {
        let count = Arc::new(AtomicU64::new(0));
        let counter = Arc::clone(&count);
        let handle = spawn_ticker(TICK, move || {
            let counter = Arc::clone(&counter);
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
                true
            }
        });

        time::sleep(Duration::from_millis(3_500)).await;
        assert_eq!(count.load(Ordering::SeqCst), 3);

        handle.abort();
        time::sleep(Duration::from_secs(5)).await;
        assert_eq!(count.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn ticker_stops_when_callback_declines() {
        let count = Arc::new(AtomicU64::new(0));
        let counter = Arc::clone(&count);
        spawn_ticker(TICK, move || {
            let counter = Arc::clone(&counter);
            async move { counter.fetch_add(1, Ordering::SeqCst) < 1 }
        });

        time::sleep(Duration::from_secs(10)).await;
        assert_eq!(count.load(Ordering::SeqCst), 2);
    }
}
