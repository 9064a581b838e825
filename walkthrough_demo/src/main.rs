//! Walkthrough demo application
//!
//! Runs the locomotion core headless over a scripted desktop walk and a
//! scripted VR session, logging where the player ends up. An optional TOML or
//! RON tuning file can be given as the first argument.

mod scene;

use std::path::PathBuf;

use thiserror::Error;
use walkthrough_core::core::config::{Config, ConfigError, LocomotionConfig};
use walkthrough_core::foundation::logging;
use walkthrough_core::foundation::math::Vec3;
use walkthrough_core::foundation::time::FrameClock;
use walkthrough_core::input::{Handedness, KeyCode, KeyboardState, MouseButton, MouseLook, XrInputSource};
use walkthrough_core::locomotion::{LocomotionController, LocomotionMode, TurnMode};

use crate::scene::DemoScene;

/// Simulated frame rate for both runs
const FRAME_DELTA: f32 = 1.0 / 90.0;

/// Frames between position log lines
const LOG_EVERY: u64 = 45;

#[derive(Debug, Error)]
enum DemoError {
    #[error("failed to load config '{}': {source}", path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: ConfigError,
    },
}

/// A step of scripted input held for some number of frames
struct DesktopStep {
    label: &'static str,
    keys: &'static [KeyCode],
    /// Horizontal pointer drag in pixels, spread over the step
    drag_x: f64,
    frames: u32,
}

struct VrStep {
    label: &'static str,
    left: [f32; 4],
    right: [f32; 4],
    frames: u32,
}

const DESKTOP_SCRIPT: &[DesktopStep] = &[
    DesktopStep { label: "walk to the door", keys: &[KeyCode::W], drag_x: 0.0, frames: 120 },
    DesktopStep { label: "lean on the door", keys: &[KeyCode::W], drag_x: 0.0, frames: 90 },
    DesktopStep { label: "look right", keys: &[], drag_x: 520.0, frames: 30 },
    DesktopStep { label: "walk along the front", keys: &[KeyCode::W, KeyCode::A], drag_x: 0.0, frames: 150 },
    DesktopStep { label: "back away", keys: &[KeyCode::S], drag_x: 0.0, frames: 90 },
];

const VR_SCRIPT: &[VrStep] = &[
    VrStep { label: "stick forward", left: [0.0, 0.0, 0.0, -1.0], right: [0.0; 4], frames: 360 },
    VrStep { label: "snap right", left: [0.0; 4], right: [0.0, 0.0, 0.95, 0.0], frames: 30 },
    VrStep { label: "release", left: [0.0; 4], right: [0.0; 4], frames: 10 },
    VrStep { label: "snap right again", left: [0.0; 4], right: [0.95, 0.0, 0.0, 0.0], frames: 30 },
    VrStep { label: "strafe toward the lamp", left: [0.0, 0.0, -0.8, 0.0], right: [0.0; 4], frames: 270 },
];

struct WalkthroughApp {
    scene: DemoScene,
    controller: LocomotionController,
    clock: FrameClock,
}

impl WalkthroughApp {
    fn new(config: LocomotionConfig) -> Self {
        Self {
            scene: DemoScene::build(),
            controller: LocomotionController::new(config),
            clock: FrameClock::new(),
        }
    }

    fn run_desktop(&mut self) {
        log::info!("Desktop walk");
        let mut rig = self.controller.spawn_rig();
        let mut player = self.controller.spawn_player(Vec3::new(0.0, 0.5, 6.0));
        let mut look = MouseLook::new(self.controller.config().mouse_look.clone());
        let mut keys = KeyboardState::new();

        for step in DESKTOP_SCRIPT {
            log::info!("  {}", step.label);
            keys.clear();
            for key in step.keys {
                keys.press(*key);
            }

            let mut pointer_x = 0.0;
            if step.drag_x != 0.0 {
                look.handle_mouse_button(MouseButton::Right, true, pointer_x, 0.0);
            }
            for _ in 0..step.frames {
                if look.is_looking() {
                    pointer_x += step.drag_x / f64::from(step.frames);
                    look.handle_mouse_move(pointer_x, 0.0);
                }
                rig.camera.rotation = look.rotation();

                let frame = self.clock.advance(FRAME_DELTA);
                let world = self.scene.world();
                self.controller.update_desktop(frame, &keys, &world, &mut rig, &mut player);

                if self.clock.frame_count() % LOG_EVERY == 0 {
                    log::info!(
                        "    t={:6.2}s player=({:6.3}, {:5.3}, {:6.3}) eye={:.3}",
                        frame.elapsed,
                        player.position.x,
                        player.position.y,
                        player.position.z,
                        rig.camera.local_position.y
                    );
                }
            }
            look.handle_mouse_button(MouseButton::Right, false, pointer_x, 0.0);
        }

        log::info!("Desktop walk ended at {:?}", player.position);
    }

    fn run_vr(&mut self) {
        log::info!("VR session");
        let mut rig = self.controller.spawn_rig();
        let mut player = self.controller.spawn_player(Vec3::new(0.5, 0.5, 3.0));

        self.controller.set_turn_mode(TurnMode::Snap);
        self.controller.set_locomotion_mode(LocomotionMode::Hybrid);
        self.controller.begin_vr_session();
        self.controller.connect_controller(0, Handedness::Left);
        self.controller.connect_controller(1, Handedness::Right);

        for step in VR_SCRIPT {
            log::info!("  {}", step.label);
            let sources = [
                XrInputSource::gamepad(Handedness::Left, step.left),
                XrInputSource::gamepad(Handedness::Right, step.right),
            ];
            for _ in 0..step.frames {
                let frame = self.clock.advance(FRAME_DELTA);
                let world = self.scene.world();
                self.controller.update_vr(frame, &sources, &world, &mut rig, &mut player);

                if self.clock.frame_count() % LOG_EVERY == 0 {
                    let (front, other) = self.controller.contacts();
                    log::info!(
                        "    t={:6.2}s rig=({:6.3}, {:6.3}) yaw={:+.3} contact front={:?} other={:?}",
                        frame.elapsed,
                        rig.position.x,
                        rig.position.z,
                        rig.yaw,
                        front,
                        other
                    );
                }
            }
        }

        self.controller.end_vr_session();
        log::info!("VR session ended at {:?}, yaw {:+.3}", player.position, rig.yaw);
    }

    fn run(&mut self) {
        self.run_desktop();
        self.run_vr();

        let proxies = self.controller.proxies();
        log::info!(
            "Building proxies: {} front band, {} envelope",
            proxies.front().len(),
            proxies.other().len()
        );
    }
}

fn load_config() -> Result<LocomotionConfig, DemoError> {
    let Some(path) = std::env::args_os().nth(1).map(PathBuf::from) else {
        log::info!("No config given, using defaults");
        return Ok(LocomotionConfig::default());
    };

    let config = LocomotionConfig::load_from_file(&path)
        .and_then(|config| config.validate().map(|()| config))
        .map_err(|source| DemoError::Config { path: path.clone(), source })?;
    log::info!("Loaded config from {}", path.display());
    Ok(config)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init("info");

    log::info!("Starting walkthrough demo");
    let config = load_config()?;

    let mut app = WalkthroughApp::new(config);
    app.run();

    log::info!("Walkthrough demo completed successfully");
    Ok(())
}
