//! Fixed timestep simulation tick
//!
//! The loop is cooperative: each `tick` does one bounded step and returns.
//! Cancellation is a poll of the current phase at the top of every tick, so
//! a phase change stops the loop at most one tick later and never mid-step.

use std::time::{Duration, Instant};

use super::state::{GamePhase, GameStateMachine};

/// Largest frame time fed to `FixedStep` (avoids a catch-up burst after a stall)
const MAX_FRAME_DT: f32 = 0.1;

/// Advance the simulation by one fixed timestep.
///
/// Returns `false` once the loop should stop: it was never armed, or the
/// phase has left `Playing` since the last tick.
pub fn tick(machine: &mut GameStateMachine, dt: f32) -> bool {
    if !machine.is_simulating() {
        return false;
    }

    if machine.phase() != GamePhase::Playing {
        log::info!("Stop game. Game state is '{}'", machine.phase());
        machine.stop_simulation();
        return false;
    }

    match machine.primary_mut() {
        Some(primary) => primary.advance(dt),
        None => log::debug!("Tick without primary object"),
    }
    machine.count_tick();
    true
}

/// Accumulates variable frame times into whole fixed ticks
#[derive(Debug, Clone)]
pub struct FixedStep {
    dt: f32,
    max_substeps: u32,
    accumulator: f32,
}

impl FixedStep {
    pub fn new(dt: f32, max_substeps: u32) -> Self {
        Self {
            dt,
            max_substeps: max_substeps.max(1),
            accumulator: 0.0,
        }
    }

    pub fn dt(&self) -> f32 {
        self.dt
    }

    /// Run as many ticks as `frame_dt` covers (capped at `max_substeps`).
    ///
    /// Returns the number of ticks that advanced the simulation. Leftover
    /// time carries into the next frame; it is dropped if the loop stops.
    pub fn run(&mut self, machine: &mut GameStateMachine, frame_dt: f32) -> u32 {
        let frame_dt = if frame_dt.is_finite() {
            frame_dt.clamp(0.0, MAX_FRAME_DT)
        } else {
            log::warn!("Ignoring non-finite frame time {}", frame_dt);
            0.0
        };
        self.accumulator += frame_dt;

        let mut substeps = 0;
        while self.accumulator >= self.dt && substeps < self.max_substeps {
            if !tick(machine, self.dt) {
                self.accumulator = 0.0;
                break;
            }
            self.accumulator -= self.dt;
            substeps += 1;
        }
        substeps
    }

    pub fn reset(&mut self) {
        self.accumulator = 0.0;
    }
}

/// Paces a loop to a fixed wall-clock interval
#[derive(Debug)]
pub struct Pacer {
    interval: Duration,
    next: Instant,
}

impl Pacer {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            next: Instant::now() + interval,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Sleep until the next slot. If we are behind, resynchronize instead of bursting.
    pub fn wait(&mut self) {
        let now = Instant::now();
        if self.next > now {
            std::thread::sleep(self.next - now);
            self.next += self.interval;
        } else {
            self.next = now + self.interval;
        }
    }
}
