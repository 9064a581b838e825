//! Per-frame locomotion entry point
//!
//! Each update turns input into a candidate displacement and runs it through
//! a fixed pipeline:
//!
//! 1. front-band boxes (thin skin, shrunk boxes)
//! 2. the rest of the building envelope
//! 3. props and loose obstacles (soft back-off)
//! 4. ground footprint clamp
//!
//! Every stage consumes the previous stage's output. Nothing here fails:
//! missing collaborators and empty lists degrade to pass-through.

use crate::core::config::LocomotionConfig;
use crate::foundation::math::Vec3;
use crate::foundation::time::FrameTime;
use crate::input::{Handedness, KeyboardState, XrInputSource, XrSample};
use crate::locomotion::head_bob::HeadBob;
use crate::locomotion::rig::{PlayerState, ViewerRig};
use crate::locomotion::session::{ControllerSlots, SessionState};
use crate::locomotion::turn::TurnState;
use crate::locomotion::{LocomotionMode, MovementReference, TurnMode};
use crate::physics::{clamp_to_ground, follow_ground, BuildingProxies, Contact, ObstacleSweep, SphereResolver};
use crate::scene::{CollisionCube, MeshNode, WorldBounds};

/// Scene collaborators for one frame
#[derive(Debug, Clone, Copy, Default)]
pub struct WorldRefs<'a> {
    /// Building hierarchy, split into proxies on first use
    pub building: Option<&'a MeshNode>,
    /// Walkable ground
    pub ground: Option<&'a MeshNode>,
    /// Loose scenery obstacles
    pub obstacles: &'a [MeshNode],
    /// Authored prop cubes
    pub collision_cubes: &'a [CollisionCube],
}

impl<'a> WorldRefs<'a> {
    /// Obstacles followed by collision cubes, in sweep order
    fn sweep_targets(&self) -> impl Iterator<Item = &'a dyn WorldBounds> {
        let obstacles = self.obstacles.iter().map(|node| node as &dyn WorldBounds);
        let cubes = self.collision_cubes.iter().map(|cube| cube as &dyn WorldBounds);
        obstacles.chain(cubes)
    }

    /// Surfaces the desktop ground probe may land on
    fn walkable_surfaces(&self) -> Vec<&'a MeshNode> {
        self.ground.into_iter().chain(self.obstacles.iter()).collect()
    }
}

/// Owns everything locomotion carries between frames
#[derive(Debug, Clone)]
pub struct LocomotionController {
    config: LocomotionConfig,
    proxies: BuildingProxies,
    front_contact: Contact,
    other_contact: Contact,
    turn: TurnState,
    head_bob: HeadBob,
    session: SessionState,
    slots: ControllerSlots,
    locomotion_mode: LocomotionMode,
}

impl LocomotionController {
    /// Create a controller from a tuning configuration
    pub fn new(config: LocomotionConfig) -> Self {
        Self {
            proxies: BuildingProxies::new(),
            front_contact: Contact::Clear,
            other_contact: Contact::Clear,
            turn: TurnState::new(config.turn.mode),
            head_bob: HeadBob::new(),
            session: SessionState::Inactive,
            slots: ControllerSlots::default(),
            locomotion_mode: config.movement.locomotion_mode,
            config,
        }
    }

    /// A player placed at `position` using this configuration's radius and
    /// startup movement reference
    pub fn spawn_player(&self, position: Vec3) -> PlayerState {
        PlayerState {
            position,
            radius: self.config.collision.player_radius,
            reference: self.config.movement.reference,
        }
    }

    /// A rig with the camera at this configuration's eye height
    pub fn spawn_rig(&self) -> ViewerRig {
        ViewerRig::new(self.config.movement.eye_height)
    }

    /// Active configuration
    pub fn config(&self) -> &LocomotionConfig {
        &self.config
    }

    /// Building proxy sets (empty until the first update with a building)
    pub fn proxies(&self) -> &BuildingProxies {
        &self.proxies
    }

    /// Current session state
    pub fn session(&self) -> SessionState {
        self.session
    }

    /// Controller hand assignments
    pub fn controller_slots(&self) -> &ControllerSlots {
        &self.slots
    }

    /// Current locomotion mode
    pub fn locomotion_mode(&self) -> LocomotionMode {
        self.locomotion_mode
    }

    /// Turn state
    pub fn turn_state(&self) -> &TurnState {
        &self.turn
    }

    /// Contact memory for the front and other sets
    pub fn contacts(&self) -> (Contact, Contact) {
        (self.front_contact, self.other_contact)
    }

    /// Switch locomotion mode; takes effect on the next update
    pub fn set_locomotion_mode(&mut self, mode: LocomotionMode) {
        if mode != self.locomotion_mode {
            log::info!("Locomotion mode {:?} -> {:?}", self.locomotion_mode, mode);
        }
        self.locomotion_mode = mode;
    }

    /// Switch turn mode, dropping any in-progress snap deflection
    pub fn set_turn_mode(&mut self, mode: TurnMode) {
        self.turn.mode = mode;
        self.turn.reset();
    }

    /// Forget the building proxies so the next update rebuilds them
    pub fn reset_building(&mut self) {
        self.proxies.clear();
        self.front_contact = Contact::Clear;
        self.other_contact = Contact::Clear;
    }

    /// Enter VR
    pub fn begin_vr_session(&mut self) {
        if self.session.is_vr() {
            return;
        }
        log::info!("VR session started");
        self.session = SessionState::ActiveVr;
    }

    /// Leave VR, resetting turn state, contact memory and hand assignments
    pub fn end_vr_session(&mut self) {
        if !self.session.is_vr() {
            return;
        }
        log::info!("VR session ended");
        self.session = SessionState::Inactive;
        self.turn.reset();
        self.front_contact = Contact::Clear;
        self.other_contact = Contact::Clear;
        self.slots.clear();
    }

    /// Controller `index` connected in `hand`
    pub fn connect_controller(&mut self, index: usize, hand: Handedness) {
        log::debug!("Controller {} connected ({:?})", index, hand);
        self.slots.connect(index, hand);
    }

    /// Controller `index` disconnected
    pub fn disconnect_controller(&mut self, index: usize) {
        log::debug!("Controller {} disconnected", index);
        self.slots.disconnect(index);
    }

    /// Advance one VR frame. Does nothing outside a VR session.
    pub fn update_vr(
        &mut self,
        frame: FrameTime,
        sources: &[XrInputSource],
        world: &WorldRefs<'_>,
        rig: &mut ViewerRig,
        player: &mut PlayerState,
    ) {
        if !self.session.is_vr() {
            return;
        }
        self.proxies.build_once(world.building, &self.config.front_band);

        let deadzone = self.config.movement.deadzone;
        let sample = XrSample::from_sources(sources, self.locomotion_mode.allows_continuous_movement(), deadzone);

        rig.yaw += self.turn.apply(sample.turn_x, frame, &self.config.turn, deadzone);

        if sample.movement.is_idle() {
            rig.sync_to(player.position);
            return;
        }

        let step = self.config.movement.vr_move_speed * frame.delta;
        let movement = displacement(rig, player.reference, sample.movement.x, sample.movement.y, step);
        let resolved = self.resolve(player.position, movement, player.radius, world);

        player.position = resolved;
        rig.sync_to(resolved);
    }

    /// Advance one desktop frame. Does nothing during a VR session.
    ///
    /// Movement follows the camera; there is no tracked rig yaw on desktop.
    /// The rig stands on the floor under the player and the camera bobs
    /// while walking.
    pub fn update_desktop(
        &mut self,
        frame: FrameTime,
        keyboard: &KeyboardState,
        world: &WorldRefs<'_>,
        rig: &mut ViewerRig,
        player: &mut PlayerState,
    ) {
        if self.session.is_vr() {
            return;
        }
        self.proxies.build_once(world.building, &self.config.front_band);

        let axes = keyboard.move_axes();
        if axes.magnitude_squared() > 0.0 {
            let step = self.config.movement.desktop_move_speed * frame.delta;
            let movement = displacement(rig, MovementReference::Head, axes.x, axes.y, step);
            let mut resolved = self.resolve(player.position, movement, player.radius, world);

            if self.config.collision.ground_follow {
                resolved = follow_ground(resolved, player.radius, &world.walkable_surfaces());
            }
            player.position = resolved;
        }

        rig.position = Vec3::new(player.position.x, player.position.y - player.radius, player.position.z);
        rig.camera.local_position.y = self.head_bob.update(
            axes.x,
            axes.y,
            frame.delta,
            self.config.movement.eye_height,
            &self.config.head_bob,
        );
    }

    /// Run `current + movement` through every collision stage
    fn resolve(&mut self, current: Vec3, movement: Vec3, radius: f32, world: &WorldRefs<'_>) -> Vec3 {
        let collision = &self.config.collision;
        let desired = current + movement;

        let front = SphereResolver::new(radius, self.config.front_band.skin, collision.hysteresis, collision.min_gap)
            .resolve(current, desired, self.proxies.front(), self.front_contact);
        self.front_contact = front.contact;
        log::trace!("front band: {:?} (touched: {})", front.position, front.touched);

        let other = SphereResolver::new(radius, collision.skin, collision.hysteresis, collision.min_gap)
            .resolve(current, front.position, self.proxies.other(), self.other_contact);
        self.other_contact = other.contact;
        log::trace!("envelope: {:?} (touched: {})", other.position, other.touched);

        let swept = ObstacleSweep::new(radius, collision.obstacle_back_off).sweep(
            other.position,
            movement,
            world.sweep_targets(),
        );
        log::trace!("obstacles: {:?}", swept);

        clamp_to_ground(world.ground, swept, collision.ground_margin())
    }
}

impl Default for LocomotionController {
    fn default() -> Self {
        Self::new(LocomotionConfig::default())
    }
}

/// World displacement for stick-style axes (`move_y` negative is forward)
fn displacement(rig: &ViewerRig, reference: MovementReference, move_x: f32, move_y: f32, step: f32) -> Vec3 {
    let (forward, right) = rig.movement_basis(reference);
    forward * (-move_y * step) + right * (move_x * step)
}
