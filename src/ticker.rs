use crate::app_state::AppState;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

/// Spawn the per-frame update loop.
///
/// Every tick forwards the host's `active` flag to the lifecycle hooks, so
/// pausing the host pauses timers on the next frame.
pub fn spawn_ticker(state: Arc<RwLock<AppState>>, interval_ms: u64) -> JoinHandle<()> {
    let period = Duration::from_millis(interval_ms.max(1));
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
        loop {
            interval.tick().await;
            state.write().await.tick();
        }
    })
}
