use crate::session::{SessionSnapshot, Tracker};
use crate::timer::{TICK, spawn_ticker};
use std::sync::Arc;
use tokio::sync::Mutex;

#[derive(Clone)]
pub struct AppState {
    pub base_path: Arc<str>,
    pub tracker: Arc<Mutex<Tracker>>,
}

impl AppState {
    pub fn new(tracker: Tracker, base_path: &str) -> Self {
        Self {
            base_path: Arc::from(base_path),
            tracker: Arc::new(Mutex::new(tracker)),
        }
    }

    /// Flips the session timer and, when it starts, schedules the one-second
    /// ticker. The ticker only holds a weak reference, so dropping the
    /// tracker ends it.
    pub async fn toggle_timer(&self) -> SessionSnapshot {
        let mut tracker = self.tracker.lock().await;
        if let Some(generation) = tracker.toggle_timer() {
            let weak = Arc::downgrade(&self.tracker);
            let ticker = spawn_ticker(TICK, move || {
                let weak = weak.clone();
                async move {
                    let Some(tracker) = weak.upgrade() else {
                        return false;
                    };
                    tracker.lock().await.tick(generation)
                }
            });
            tracker.attach_ticker(ticker);
        }
        tracker.snapshot()
    }
}
