//! Ring Flight native demo
//!
//! Runs a scripted round against a fixed head position: place the airplane,
//! place three rings, fly for one simulated second, end.
//!
//! Usage: `ring-flight [settings.json]`

use std::process::ExitCode;

use glam::Vec3;

use ring_flight::sim::{FixedStep, GameController, GameObject, GamePhase, Hand, Joint, JointName};
use ring_flight::{PositionSampler, Settings, TrackedPosition};

fn main() -> ExitCode {
    env_logger::init();
    log::info!("Ring Flight (native) starting...");

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> ring_flight::Result<()> {
    let settings = match std::env::args().nth(1) {
        Some(path) => Settings::load(path)?,
        None => {
            log::info!("Using default settings");
            Settings::default()
        }
    };

    let ring = settings.ring.generate()?;
    log::info!(
        "Ring mesh: {} vertices, {} triangles ({} vertex bytes)",
        ring.vertex_count(),
        ring.triangle_count(),
        ring.vertex_bytes().len()
    );

    // Head pose walks sideways so every placement lands somewhere new
    let tracked = TrackedPosition::new();
    let mut step = 0.0f32;
    let mut sampler = PositionSampler::spawn(
        move || {
            step += 0.1;
            Some(Vec3::new(step, 1.6, 0.0))
        },
        tracked.clone(),
        settings.tracking_interval(),
    )?;

    let mut controller = GameController::new(settings.clone(), tracked.clone())?;
    controller.subscribe(|old, new| {
        log::info!(
            "Phase {old} -> {new} (placement cursor {})",
            if new.shows_placement_cursor() { "on" } else { "off" }
        );
    });
    controller.set_airplane(GameObject::new());

    // Wait for the first head pose sample
    while tracked.latest().is_none() {
        std::thread::sleep(settings.tracking_interval() / 4);
    }

    controller.change_state(GamePhase::PlaceFirstObject);
    controller.place_at_tracked_position();
    for _ in 0..3 {
        std::thread::sleep(settings.tracking_interval());
        controller.place_at_tracked_position();
    }
    controller.finish_placement();
    sampler.stop();

    for marker in controller.rings() {
        log::info!("Ring {} at {}", marker.number, marker.position);
    }

    controller.change_state(GamePhase::Playing);
    let mut stepper = FixedStep::new(settings.sim_dt(), settings.max_substeps);
    let frame = settings.sim_dt();
    for i in 0..settings.tick_rate_hz {
        // Pinch the right hand halfway through the flight
        if i == settings.tick_rate_hz / 2 {
            controller.joint_contact(
                Joint::new(Hand::Right, JointName::IndexFingerTip),
                Joint::new(Hand::Right, JointName::ThumbTip),
            );
        }
        stepper.run(controller.machine_mut(), frame);
    }
    controller.change_state(GamePhase::Ended);

    if let Some(airplane) = controller.airplane() {
        log::info!(
            "Airplane flew {} ticks, now at {} heading {}",
            controller.machine().ticks(),
            airplane.position(),
            ring_flight::math::normalize_heading(airplane.heading())
        );
    }
    Ok(())
}
