use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use log::{error, info};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use crate::manager_output::AutoUpdateStatus;
use crate::pipeline::Pipeline;

/// Hourly update loop gated by the persisted auto-update flag
pub struct Scheduler {
    pipeline: Arc<Pipeline>,
    status: AutoUpdateStatus,
    interval: Duration,
    control: watch::Receiver<bool>,
    running: Arc<AtomicBool>,
}

impl Scheduler {
    /// Creates a new Scheduler
    ///
    /// # Arguments
    ///
    /// * 'pipeline' - the cycle to run
    /// * 'status' - persisted auto-update flag, re-read before every cycle
    /// * 'interval' - wait between cycles
    /// * 'control' - publishes the desired auto-update state, false or a dropped sender stops the loop
    /// * 'running' - set by whoever starts the loop, cleared by the loop when it ends
    pub fn new(
        pipeline: Arc<Pipeline>,
        status: AutoUpdateStatus,
        interval: Duration,
        control: watch::Receiver<bool>,
        running: Arc<AtomicBool>,
    ) -> Self {
        Self { pipeline, status, interval, control, running }
    }

    /// Spawns the loop on the tokio runtime
    ///
    pub fn spawn(self) -> JoinHandle<usize> {
        tokio::spawn(async move { self.run().await })
    }

    /// Update loop, returns the number of cycles run
    ///
    pub async fn run(mut self) -> usize {
        let mut cycles: usize = 0;

        loop {
            self.run_cycles(&mut cycles).await;

            if !self.resume_requested() {
                break;
            }
            info!("auto update enabled again while stopping, scheduler continues");
        }

        cycles
    }

    async fn run_cycles(&mut self, cycles: &mut usize) {
        loop {
            match self.status.read() {
                Ok(true) => {},
                Ok(false) => {
                    info!("auto update disabled, scheduler stopped");
                    return;
                },
                Err(e) => {
                    error!("failed to read {}, scheduler stopped: {}", self.status.path().display(), e);
                    return;
                }
            }

            let report = self.pipeline.run_cycle().await;
            *cycles += 1;
            info!("update cycle {} done: {:?}", cycles, report);

            if !self.wait().await {
                info!("scheduler stopped by control signal");
                return;
            }
        }
    }

    /// Clears the running flag, then takes it back if an enable was published meanwhile.
    /// A starter that still saw the flag set relies on this check to not lose its enable.
    ///
    fn resume_requested(&mut self) -> bool {
        self.running.store(false, Ordering::SeqCst);

        let enabled = matches!(self.control.has_changed(), Ok(true)) && *self.control.borrow_and_update();

        enabled && self.running
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_ok()
    }

    /// Waits for the interval, returns false if a stop was signalled meanwhile
    ///
    async fn wait(&mut self) -> bool {
        let sleep = tokio::time::sleep(self.interval);
        tokio::pin!(sleep);

        loop {
            tokio::select! {
                _ = &mut sleep => return true,
                changed = self.control.changed() => {
                    if changed.is_err() || !*self.control.borrow_and_update() {
                        return false;
                    }
                }
            }
        }
    }
}
