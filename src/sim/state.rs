//! Game phases and the phase register
//!
//! `GameStateMachine` is deliberately permissive: any phase may follow any
//! other. Callers decide which transitions make sense.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::object::GameObject;
use crate::consts::{DEFAULT_VELOCITY, LAUNCH_HEADING};

/// Top-level progression of a round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GamePhase {
    /// Intro dialog
    Start,
    /// Place the airplane
    PlaceFirstObject,
    /// Place rings
    PlaceMarkers,
    /// Everything placed, ready to fly
    AllPlaced,
    /// Airplane is flying
    Playing,
    /// Round over (can play again)
    Ended,
}

impl GamePhase {
    pub const ALL: [GamePhase; 6] = [
        GamePhase::Start,
        GamePhase::PlaceFirstObject,
        GamePhase::PlaceMarkers,
        GamePhase::AllPlaced,
        GamePhase::Playing,
        GamePhase::Ended,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            GamePhase::Start => "start",
            GamePhase::PlaceFirstObject => "place-first-object",
            GamePhase::PlaceMarkers => "place-markers",
            GamePhase::AllPlaced => "all-placed",
            GamePhase::Playing => "playing",
            GamePhase::Ended => "ended",
        }
    }

    /// Whether the head-locked placement cursor should be visible
    pub fn shows_placement_cursor(&self) -> bool {
        matches!(self, GamePhase::PlaceFirstObject | GamePhase::PlaceMarkers)
    }
}

impl fmt::Display for GamePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Transition observer, called with `(old, new)`
pub type PhaseObserver = Box<dyn FnMut(GamePhase, GamePhase) + Send>;

/// Handle returned by `subscribe`, used to unsubscribe
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ObserverId(u64);

/// Current phase, primary object and transition observers.
///
/// Owned by whatever drives the simulation; mutate it from one context only.
pub struct GameStateMachine {
    phase: GamePhase,
    primary: Option<GameObject>,
    observers: Vec<(ObserverId, PhaseObserver)>,
    next_observer: u64,
    /// Set when entering `Playing` with a primary object, cleared by the tick loop
    simulating: bool,
    /// Ticks run since the last start
    ticks: u64,
    /// Velocity and heading given to the primary object on launch
    launch_velocity: f32,
    launch_heading: f32,
}

impl fmt::Debug for GameStateMachine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GameStateMachine")
            .field("phase", &self.phase)
            .field("primary", &self.primary)
            .field("observers", &self.observers.len())
            .field("simulating", &self.simulating)
            .field("ticks", &self.ticks)
            .finish()
    }
}

impl Default for GameStateMachine {
    fn default() -> Self {
        Self::new()
    }
}

impl GameStateMachine {
    pub fn new() -> Self {
        Self {
            phase: GamePhase::Start,
            primary: None,
            observers: Vec::new(),
            next_observer: 1,
            simulating: false,
            ticks: 0,
            launch_velocity: DEFAULT_VELOCITY,
            launch_heading: LAUNCH_HEADING,
        }
    }

    /// Override the launch velocity (units/second) and heading (degrees)
    pub fn with_launch(mut self, velocity: f32, heading: f32) -> Self {
        self.launch_velocity = velocity;
        self.launch_heading = heading;
        self
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    /// Register the object that launches when play starts. Returns the previous one.
    pub fn set_primary(&mut self, object: GameObject) -> Option<GameObject> {
        log::debug!("Primary object set to '{}'", object.id());
        self.primary.replace(object)
    }

    pub fn take_primary(&mut self) -> Option<GameObject> {
        self.primary.take()
    }

    pub fn primary(&self) -> Option<&GameObject> {
        self.primary.as_ref()
    }

    pub fn primary_mut(&mut self) -> Option<&mut GameObject> {
        self.primary.as_mut()
    }

    /// Add a transition observer. Observers run in subscription order.
    pub fn subscribe(&mut self, observer: impl FnMut(GamePhase, GamePhase) + Send + 'static) -> ObserverId {
        let id = ObserverId(self.next_observer);
        self.next_observer += 1;
        self.observers.push((id, Box::new(observer)));
        id
    }

    /// Remove an observer; returns false if it was not registered
    pub fn unsubscribe(&mut self, id: ObserverId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(oid, _)| *oid != id);
        self.observers.len() != before
    }

    /// Switch to `new_phase`.
    ///
    /// Entering `Playing` launches the primary object and arms the tick loop;
    /// without a primary object the launch is skipped. Entering `Playing` while
    /// already playing relaunches from the launch heading with a fresh tick
    /// count. Observers are notified after the side effect. Never fails.
    pub fn change_state(&mut self, new_phase: GamePhase) {
        let old_phase = self.phase;
        self.phase = new_phase;

        if new_phase == GamePhase::Playing {
            self.start();
        }

        log::debug!("Change game state from '{}' to '{}'", old_phase, new_phase);

        for (_, observer) in self.observers.iter_mut() {
            observer(old_phase, new_phase);
        }
    }

    fn start(&mut self) {
        let Some(primary) = self.primary.as_mut() else {
            log::warn!("No primary object registered, not starting simulation");
            return;
        };

        log::info!("Start game");
        primary.start_flying_with(self.launch_velocity, self.launch_heading);
        self.simulating = true;
        self.ticks = 0;
    }

    /// True while the tick loop is armed
    pub fn is_simulating(&self) -> bool {
        self.simulating
    }

    /// Ticks run since play last started
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub(crate) fn stop_simulation(&mut self) {
        self.simulating = false;
    }

    pub(crate) fn count_tick(&mut self) {
        self.ticks += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    fn recorder(machine: &mut GameStateMachine) -> Arc<Mutex<Vec<(GamePhase, GamePhase)>>> {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        machine.subscribe(move |old, new| sink.lock().unwrap().push((old, new)));
        seen
    }

    #[test]
    fn test_starts_in_start() {
        let machine = GameStateMachine::new();
        assert_eq!(machine.phase(), GamePhase::Start);
        assert!(!machine.is_simulating());
    }

    #[test]
    fn test_any_transition_is_allowed() {
        let mut machine = GameStateMachine::new();
        let seen = recorder(&mut machine);

        machine.change_state(GamePhase::Ended);
        machine.change_state(GamePhase::PlaceMarkers);
        machine.change_state(GamePhase::PlaceMarkers);

        assert_eq!(machine.phase(), GamePhase::PlaceMarkers);
        assert_eq!(
            *seen.lock().unwrap(),
            vec![
                (GamePhase::Start, GamePhase::Ended),
                (GamePhase::Ended, GamePhase::PlaceMarkers),
                (GamePhase::PlaceMarkers, GamePhase::PlaceMarkers),
            ]
        );
    }

    #[test]
    fn test_playing_without_primary_still_notifies() {
        let mut machine = GameStateMachine::new();
        let seen = recorder(&mut machine);

        machine.change_state(GamePhase::Playing);

        assert_eq!(machine.phase(), GamePhase::Playing);
        assert!(!machine.is_simulating());
        assert_eq!(*seen.lock().unwrap(), vec![(GamePhase::Start, GamePhase::Playing)]);
    }

    #[test]
    fn test_playing_launches_primary() {
        let mut machine = GameStateMachine::new();
        machine.set_primary(GameObject::new());

        let launched = Arc::new(Mutex::new(false));
        let flag = launched.clone();
        machine.subscribe(move |_, new| {
            if new == GamePhase::Playing {
                *flag.lock().unwrap() = true;
            }
        });

        machine.change_state(GamePhase::Playing);
        assert!(*launched.lock().unwrap());
        assert!(machine.is_simulating());

        let plane = machine.primary().unwrap();
        assert_eq!(plane.velocity(), 0.2);
        assert_eq!(plane.heading(), -90.0);
    }

    #[test]
    fn test_custom_launch() {
        let mut machine = GameStateMachine::new().with_launch(0.5, 45.0);
        machine.set_primary(GameObject::new());
        machine.change_state(GamePhase::Playing);

        let plane = machine.primary().unwrap();
        assert_eq!(plane.velocity(), 0.5);
        assert_eq!(plane.heading(), 45.0);
    }

    #[test]
    fn test_reentering_playing_relaunches() {
        let mut machine = GameStateMachine::new();
        machine.set_primary(GameObject::new());
        machine.change_state(GamePhase::Playing);

        let plane = machine.primary_mut().unwrap();
        plane.adjust_heading(30.0);
        plane.set_velocity(1.0);
        machine.count_tick();
        machine.count_tick();
        assert_eq!(machine.ticks(), 2);

        machine.change_state(GamePhase::Playing);
        assert!(machine.is_simulating());
        assert_eq!(machine.ticks(), 0);
        let plane = machine.primary().unwrap();
        assert_eq!(plane.heading(), -90.0);
        assert_eq!(plane.velocity(), 0.2);
    }

    #[test]
    fn test_multiple_observers_in_order() {
        let mut machine = GameStateMachine::new();
        let order = Arc::new(Mutex::new(Vec::new()));

        let a = order.clone();
        let first = machine.subscribe(move |_, _| a.lock().unwrap().push("first"));
        let b = order.clone();
        machine.subscribe(move |_, _| b.lock().unwrap().push("second"));

        machine.change_state(GamePhase::PlaceFirstObject);
        assert_eq!(*order.lock().unwrap(), vec!["first", "second"]);

        assert!(machine.unsubscribe(first));
        assert!(!machine.unsubscribe(first));
        machine.change_state(GamePhase::PlaceMarkers);
        assert_eq!(*order.lock().unwrap(), vec!["first", "second", "second"]);
    }

    #[test]
    fn test_placement_cursor_phases() {
        let visible: Vec<GamePhase> = GamePhase::ALL
            .into_iter()
            .filter(|p| p.shows_placement_cursor())
            .collect();
        assert_eq!(visible, vec![GamePhase::PlaceFirstObject, GamePhase::PlaceMarkers]);
    }

    #[test]
    fn test_phase_serializes_by_name() {
        let json = serde_json::to_string(&GamePhase::AllPlaced).unwrap();
        assert_eq!(json, "\"AllPlaced\"");
        assert_eq!(GamePhase::Playing.to_string(), "playing");
    }
}
