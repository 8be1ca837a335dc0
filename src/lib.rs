//! Ring Flight - place rings in the room, fly a toy airplane through them
//!
//! Core modules:
//! - `mesh`: Procedural torus geometry and GPU-ready vertex buffers
//! - `math`: Angle, distance, rotation and random helpers
//! - `sim`: Game objects, game phases and the fixed-rate simulation tick
//! - `tracking`: Last-value-wins cell fed by a background position sampler
//! - `settings`: Data-driven tuning and ring dimensions

pub mod error;
pub mod math;
pub mod mesh;
pub mod settings;
pub mod sim;
pub mod tracking;

pub use error::{Error, Result};
pub use mesh::{Mesh, TorusParams, Vertex, generate_torus};
pub use settings::Settings;
pub use sim::{GameController, GameObject, GamePhase, GameStateMachine};
pub use tracking::{PositionSampler, PositionSource, TrackedPosition};

/// Game configuration constants
pub mod consts {
    /// Nominal simulation rate (ticks per second)
    pub const TICK_RATE_HZ: u32 = 60;
    /// Fixed simulation timestep (60 Hz, ~16.6 ms)
    pub const SIM_DT: f32 = 1.0 / TICK_RATE_HZ as f32;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Velocity given to the airplane on launch (units/second)
    pub const DEFAULT_VELOCITY: f32 = 0.2;
    /// Heading given to the airplane on launch (degrees, -90 = along -z)
    pub const LAUNCH_HEADING: f32 = -90.0;
    /// Heading change for a left/right button turn (degrees)
    pub const TURN_STEP: f32 = 90.0;
    /// Heading change for a pinch gesture (degrees)
    pub const GESTURE_TURN_STEP: f32 = 10.0;

    /// Objects are placed this far in front of the tracked head position
    pub const PLACEMENT_OFFSET: [f32; 3] = [0.0, 0.0, -1.0];
    /// Head pose sampling interval (milliseconds)
    pub const TRACKING_INTERVAL_MS: u64 = 100;

    /// Ring mesh defaults
    pub const RING_SEGMENTS: u32 = 128;
    pub const RING_TUBE_SEGMENTS: u32 = 32;
    pub const RING_RADIUS: f32 = 0.2;
    pub const RING_TUBE_RADIUS: f32 = 0.01;
}
