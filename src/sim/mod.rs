//! Game simulation
//!
//! Game objects, the phase register and the fixed-rate tick. Nothing in here
//! touches rendering or tracking hardware directly:
//! - Scene updates go through the `Representation` trait
//! - Tracked positions arrive through `TrackedPosition`
//! - Hand joints arrive as contact pairs and positions (see `gesture`)
//! - All mutation happens from one context (see `GameController::run_realtime`)

pub mod controller;
pub mod gesture;
pub mod object;
pub mod state;
pub mod tick;

pub use controller::{Command, GameController, Placement, RingMarker};
pub use gesture::{Hand, HandJoints, Joint, JointName, PinchClassifier, detect_heart};
pub use object::{GameObject, Representation};
pub use state::{GamePhase, GameStateMachine, ObserverId, PhaseObserver};
pub use tick::{FixedStep, Pacer, tick};
