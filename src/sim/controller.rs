//! Game controller
//!
//! Entry points the input layer calls (buttons, gestures) on top of the
//! phase register. Steering and placement without the needed collaborator
//! (no airplane yet, no tracking sample yet) are logged no-ops.

use std::sync::mpsc::Receiver;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::gesture::{Hand, Joint, PinchClassifier};
use super::object::GameObject;
use super::state::{GamePhase, GameStateMachine, ObserverId};
use super::tick::{Pacer, tick};
use crate::error::Result;
use crate::mesh::Mesh;
use crate::settings::Settings;
use crate::tracking::TrackedPosition;

/// A placed ring, numbered from 1 in placement order
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RingMarker {
    pub number: u32,
    pub position: Vec3,
}

/// Result of a placement request
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Placement {
    /// The airplane was moved here
    Primary(Vec3),
    /// A ring was placed
    Ring(RingMarker),
}

/// Mutations queued for the simulation context
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    ChangeState(GamePhase),
    Place,
    FinishPlacement,
    SetPrimaryPosition(Vec3),
    TurnLeft,
    TurnRight,
    Steer(f32),
    JointContact(Joint, Joint),
    Reset,
}

/// Owns the phase register, placed rings and the tracking handle
#[derive(Debug)]
pub struct GameController {
    machine: GameStateMachine,
    settings: Settings,
    tracked: TrackedPosition,
    rings: Vec<RingMarker>,
    pinch: PinchClassifier,
}

impl GameController {
    /// Build a controller; fails if `settings` does not validate
    pub fn new(settings: Settings, tracked: TrackedPosition) -> Result<Self> {
        settings.validate()?;
        let machine =
            GameStateMachine::new().with_launch(settings.default_velocity, settings.launch_heading);
        Ok(Self {
            machine,
            settings,
            tracked,
            rings: Vec::new(),
            pinch: PinchClassifier::new(),
        })
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn machine(&self) -> &GameStateMachine {
        &self.machine
    }

    pub fn machine_mut(&mut self) -> &mut GameStateMachine {
        &mut self.machine
    }

    pub fn phase(&self) -> GamePhase {
        self.machine.phase()
    }

    pub fn change_state(&mut self, phase: GamePhase) {
        self.machine.change_state(phase);
    }

    pub fn subscribe(&mut self, observer: impl FnMut(GamePhase, GamePhase) + Send + 'static) -> ObserverId {
        self.machine.subscribe(observer)
    }

    /// Register the airplane
    pub fn set_airplane(&mut self, airplane: GameObject) -> Option<GameObject> {
        self.machine.set_primary(airplane)
    }

    pub fn airplane(&self) -> Option<&GameObject> {
        self.machine.primary()
    }

    /// Rings placed so far, in placement order
    pub fn rings(&self) -> &[RingMarker] {
        &self.rings
    }

    /// Mesh for one ring, built from the ring settings
    pub fn ring_mesh(&self) -> Result<Mesh> {
        self.settings.ring.generate()
    }

    fn placement_position(&self) -> Option<Vec3> {
        let Some(tracked) = self.tracked.latest() else {
            log::warn!("No tracked position yet, cannot place");
            return None;
        };
        Some(tracked + self.settings.placement_offset)
    }

    /// Place the airplane or a ring in front of the tracked position.
    ///
    /// `PlaceFirstObject` places the airplane and moves on to `PlaceMarkers`;
    /// `PlaceMarkers` and `AllPlaced` add a ring. Other phases ignore the request.
    pub fn place_at_tracked_position(&mut self) -> Option<Placement> {
        match self.phase() {
            GamePhase::PlaceFirstObject => {
                if self.machine.primary().is_none() {
                    log::warn!("No airplane registered, cannot place it");
                    return None;
                }
                let position = self.placement_position()?;
                self.set_primary_position(position);
                if let Some(airplane) = self.machine.primary_mut() {
                    airplane.set_active(true);
                }
                self.machine.change_state(GamePhase::PlaceMarkers);
                Some(Placement::Primary(position))
            }
            GamePhase::PlaceMarkers | GamePhase::AllPlaced => {
                let position = self.placement_position()?;
                let marker = RingMarker {
                    number: self.rings.len() as u32 + 1,
                    position,
                };
                log::debug!("Placed ring {} at {}", marker.number, position);
                self.rings.push(marker);
                Some(Placement::Ring(marker))
            }
            phase => {
                log::debug!("Placement ignored in phase '{}'", phase);
                None
            }
        }
    }

    /// `PlaceMarkers` -> `AllPlaced`; false in any other phase
    pub fn finish_placement(&mut self) -> bool {
        if self.phase() != GamePhase::PlaceMarkers {
            return false;
        }
        self.machine.change_state(GamePhase::AllPlaced);
        true
    }

    pub fn set_primary_position(&mut self, position: Vec3) {
        let Some(airplane) = self.machine.primary_mut() else {
            return;
        };
        log::debug!("Set airplane position: {}", position);
        airplane.set_position(position);
    }

    pub fn turn_left(&mut self) {
        log::debug!("Turn airplane left");
        self.steer(-self.settings.turn_step);
    }

    pub fn turn_right(&mut self) {
        log::debug!("Turn airplane right");
        self.steer(self.settings.turn_step);
    }

    /// Pinch gesture on the left hand
    pub fn gesture_left(&mut self) {
        self.steer(-self.settings.gesture_turn_step);
    }

    /// Pinch gesture on the right hand
    pub fn gesture_right(&mut self) {
        self.steer(self.settings.gesture_turn_step);
    }

    /// Two hand joints touched. A pinch steers toward the pinching hand.
    ///
    /// Returns the hand that pinched, or `None` if the contact was not a
    /// pinch or repeated the previous contact in reverse order.
    pub fn joint_contact(&mut self, a: Joint, b: Joint) -> Option<Hand> {
        let hand = self.pinch.contact(a, b)?;
        log::debug!("Pinch on {} hand", hand.as_str());
        match hand {
            Hand::Left => self.gesture_left(),
            Hand::Right => self.gesture_right(),
        }
        Some(hand)
    }

    /// Turn the airplane by `delta` degrees
    pub fn steer(&mut self, delta: f32) {
        match self.machine.primary_mut() {
            Some(airplane) => airplane.adjust_heading(delta),
            None => log::debug!("No airplane to steer"),
        }
    }

    /// Forget placed rings, reactivate the airplane and go back to `Start`
    pub fn reset(&mut self) {
        self.rings.clear();
        self.pinch.clear();
        if let Some(airplane) = self.machine.primary_mut() {
            airplane.reset();
        }
        self.machine.change_state(GamePhase::Start);
    }

    pub fn apply(&mut self, command: Command) {
        match command {
            Command::ChangeState(phase) => self.change_state(phase),
            Command::Place => {
                self.place_at_tracked_position();
            }
            Command::FinishPlacement => {
                self.finish_placement();
            }
            Command::SetPrimaryPosition(position) => self.set_primary_position(position),
            Command::TurnLeft => self.turn_left(),
            Command::TurnRight => self.turn_right(),
            Command::Steer(delta) => self.steer(delta),
            Command::JointContact(a, b) => {
                self.joint_contact(a, b);
            }
            Command::Reset => self.reset(),
        }
    }

    /// One simulation step at the configured rate
    pub fn tick(&mut self) -> bool {
        let dt = self.settings.sim_dt();
        tick(&mut self.machine, dt)
    }

    /// Drive the simulation in real time until it stops.
    ///
    /// Queued commands are applied at the top of every tick, so all mutation
    /// happens on this thread. Returns the number of ticks run.
    pub fn run_realtime(&mut self, commands: &Receiver<Command>) -> u64 {
        let mut pacer = Pacer::new(self.settings.tick_interval());
        loop {
            while let Ok(command) = commands.try_recv() {
                self.apply(command);
            }
            if !self.tick() {
                break;
            }
            pacer.wait();
        }
        self.machine.ticks()
    }
}
