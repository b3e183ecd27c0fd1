//! Background decay driver - runs `decay_tick` on a fixed period.
//!
//! The first tick fires as soon as the task starts, then once per period.
//! Ticks run on the blocking pool because the stores do synchronous I/O.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::engine::PetEngine;

/// Handle to a running decay task. Dropping it without `stop` leaves the
/// task running until the runtime shuts down.
pub struct DecayScheduler {
    shutdown: watch::Sender<bool>,
    handle: JoinHandle<()>,
    ticks: Arc<AtomicU64>,
}

impl DecayScheduler {
    /// Spawn the decay loop on the current tokio runtime.
    pub fn start(engine: Arc<PetEngine>, period: Duration) -> Self {
        let (shutdown, mut stop_rx) = watch::channel(false);
        let ticks = Arc::new(AtomicU64::new(0));
        let counter = Arc::clone(&ticks);

        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            log::info!("decay scheduler started (every {:?})", period);

            loop {
                tokio::select! {
                    _ = interval.tick() => {
                        let engine = Arc::clone(&engine);
                        match tokio::task::spawn_blocking(move || engine.decay_tick()).await {
                            Ok(report) => {
                                counter.fetch_add(1, Ordering::Relaxed);
                                log::debug!("scheduled decay: {:?}", report);
                            }
                            Err(e) => log::warn!("decay task failed: {}", e),
                        }
                    }
                    changed = stop_rx.changed() => {
                        if changed.is_err() || *stop_rx.borrow() {
                            break;
                        }
                    }
                }
            }
            log::info!("decay scheduler stopped");
        });

        Self {
            shutdown,
            handle,
            ticks,
        }
    }

    /// Ticks completed so far.
    pub fn ticks(&self) -> u64 {
        self.ticks.load(Ordering::Relaxed)
    }

    pub fn is_running(&self) -> bool {
        !self.handle.is_finished()
    }

    /// Signal the loop and wait for it to exit. Returns the final tick count.
    pub async fn stop(self) -> u64 {
        let _ = self.shutdown.send(true);
        if let Err(e) = self.handle.await {
            log::warn!("decay scheduler join failed: {}", e);
        }
        self.ticks.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::NewPet;

    fn engine() -> Arc<PetEngine> {
        let engine = PetEngine::in_memory().unwrap();
        engine
            .create_pet(NewPet {
                id: None,
                name: "Astro".into(),
                species: "dog".into(),
                power: "flight".into(),
            })
            .unwrap();
        Arc::new(engine)
    }

    #[tokio::test]
    async fn test_first_tick_is_immediate() {
        let engine = engine();
        let scheduler = DecayScheduler::start(Arc::clone(&engine), Duration::from_secs(3600));
        tokio::time::sleep(Duration::from_millis(200)).await;

        assert_eq!(scheduler.ticks(), 1);
        assert_eq!(engine.pet_status(1).unwrap().hunger, 17);
        assert_eq!(scheduler.stop().await, 1);
    }

    #[tokio::test]
    async fn test_stop_ends_task() {
        let engine = engine();
        let scheduler = DecayScheduler::start(engine, Duration::from_millis(20));
        tokio::time::sleep(Duration::from_millis(120)).await;
        assert!(scheduler.is_running());

        let ticks = scheduler.stop().await;
        assert!(ticks >= 2, "expected several ticks, got {ticks}");
    }
}
