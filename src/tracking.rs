//! Tracked world position
//!
//! A background sampler polls a `PositionSource` (e.g. the device head pose)
//! at a fixed interval and publishes into a single-slot cell. Readers take the
//! latest value without waiting; older samples are overwritten, never queued.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::thread::JoinHandle;
use std::time::Duration;

use glam::Vec3;

use crate::error::Result;

/// Last-value-wins cell shared between the sampler and the game
#[derive(Debug, Clone, Default)]
pub struct TrackedPosition {
    slot: Arc<Mutex<Option<Vec3>>>,
}

impl TrackedPosition {
    pub fn new() -> Self {
        Self::default()
    }

    fn slot(&self) -> MutexGuard<'_, Option<Vec3>> {
        // A panicking writer cannot leave a Vec3 half-written
        self.slot.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Replace the current value
    pub fn publish(&self, position: Vec3) {
        *self.slot() = Some(position);
    }

    /// Most recent value, if any sample has arrived
    pub fn latest(&self) -> Option<Vec3> {
        *self.slot()
    }

    pub fn clear(&self) {
        *self.slot() = None;
    }
}

/// Something that can report a world position on demand
pub trait PositionSource: Send + 'static {
    /// `None` when the position is momentarily unavailable
    fn sample(&mut self) -> Option<Vec3>;
}

impl<F> PositionSource for F
where
    F: FnMut() -> Option<Vec3> + Send + 'static,
{
    fn sample(&mut self) -> Option<Vec3> {
        self()
    }
}

/// Background thread feeding a `TrackedPosition`
#[derive(Debug)]
pub struct PositionSampler {
    stop: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl PositionSampler {
    /// Start sampling `source` every `interval` into `cell`
    pub fn spawn<S: PositionSource>(mut source: S, cell: TrackedPosition, interval: Duration) -> Result<Self> {
        let stop = Arc::new(AtomicBool::new(false));
        let stop_flag = stop.clone();

        let handle = std::thread::Builder::new()
            .name("position-sampler".into())
            .spawn(move || {
                log::debug!("Position sampler started ({:?} interval)", interval);
                while !stop_flag.load(Ordering::Acquire) {
                    match source.sample() {
                        Some(position) => {
                            cell.publish(position);
                            log::trace!("Tracked position: {position}");
                        }
                        None => log::warn!("Can't sample tracked position"),
                    }
                    std::thread::park_timeout(interval);
                }
                log::debug!("Position sampler stopped");
            })?;

        Ok(Self {
            stop,
            handle: Some(handle),
        })
    }

    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Stop and join the sampler thread. Safe to call repeatedly.
    pub fn stop(&mut self) {
        self.stop.store(true, Ordering::Release);
        if let Some(handle) = self.handle.take() {
            handle.thread().unpark();
            if handle.join().is_err() {
                log::error!("Position sampler thread panicked");
            }
        }
    }
}

impl Drop for PositionSampler {
    fn drop(&mut self) {
        self.stop();
    }
}
