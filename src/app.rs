//! Tick orchestration: input → cast → composite → present.
//!
//! The loop is either `Rendering` (a tick runs every iteration) or `Idle`
//! (no casting until an input edge or a freshly loaded map wakes it). Each
//! iteration yields back to the host surface, which paces frames and pumps
//! window events.
use std::sync::Arc;

use log::{debug, trace, warn};
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::config::Config;
use crate::core::camera::{Camera, CameraLimits, MotionRates};
use crate::core::dataset::{DatasetLoader, MapId, PendingLoad};
use crate::core::input::{Command, InputController, InputEvent};
use crate::core::terrain::TerrainData;
use crate::render::casters::RayCaster;
use crate::render::framebuffer::Framebuffer;

/// Host side of the loop: event source and image target.
pub trait Surface {
    fn poll_events(&mut self, out: &mut Vec<InputEvent>);
    fn should_close(&self) -> bool;
    /// Shows a freshly rendered frame.
    fn present(&mut self, frame: &Framebuffer, camera: &Camera);
    /// Nothing new this iteration; keep the last image up.
    fn idle(&mut self);
}

/// Everything a tick reads or writes.
pub struct Simulation {
    pub camera: Camera,
    pub input: InputController,
    pub rates: MotionRates,
    pub limits: CameraLimits,
    terrain: Arc<TerrainData>,
}

impl Simulation {
    pub fn new(camera: Camera, rates: MotionRates, limits: CameraLimits) -> Self {
        Self {
            camera,
            input: InputController::new(),
            rates,
            limits,
            terrain: Arc::new(TerrainData::empty()),
        }
    }

    #[inline]
    pub fn terrain(&self) -> &TerrainData {
        &self.terrain
    }

    /// Replaces the dataset in one step. `terrain` is already complete.
    pub fn publish(&mut self, terrain: TerrainData) {
        self.terrain = Arc::new(terrain);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    Idle,
    Rendering,
}

pub struct RenderLoop {
    sim: Simulation,
    caster: RayCaster,
    frame: Framebuffer,
    state: LoopState,
    loader: DatasetLoader,
    pending: Option<PendingLoad>,
    current_map: Option<MapId>,
    requested_map: MapId,
    rng: StdRng,
    events: Vec<InputEvent>,
    ticks: u64,
}

impl RenderLoop {
    pub fn new(cfg: &Config) -> Self {
        let render = cfg.render;
        let mut frame = Framebuffer::new(render.width, render.height);
        frame.fill_background(render.background);
        Self {
            sim: Simulation::new(cfg.start, cfg.rates, cfg.limits),
            caster: RayCaster::new(render),
            frame,
            state: LoopState::Rendering,
            loader: DatasetLoader::new(cfg.data_dir.clone()),
            pending: None,
            current_map: None,
            requested_map: cfg.initial_map,
            rng: StdRng::from_entropy(),
            events: Vec::new(),
            ticks: 0,
        }
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn simulation(&self) -> &Simulation {
        &self.sim
    }

    pub fn frame(&self) -> &Framebuffer {
        &self.frame
    }

    pub fn current_map(&self) -> Option<MapId> {
        self.current_map
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    fn wake(&mut self) {
        if self.state == LoopState::Idle {
            debug!("idle -> rendering");
            self.state = LoopState::Rendering;
        }
    }

    /// Starts loading `id` in the background. A newer request supersedes an
    /// older one still in flight.
    pub fn request_map(&mut self, id: MapId) {
        debug!("requesting map {}", id.index());
        self.requested_map = id;
        self.pending = Some(self.loader.spawn(id));
    }

    /// Publishes terrain right away, bypassing the loader.
    pub fn publish_terrain(&mut self, id: Option<MapId>, terrain: TerrainData) {
        self.sim.publish(terrain);
        self.current_map = id;
        self.wake();
    }

    pub fn handle_event(&mut self, event: InputEvent) {
        match event {
            InputEvent::Command(Command::NextMap) => {
                let next = self.current_map.unwrap_or(self.requested_map).next();
                self.request_map(next);
            }
            InputEvent::Command(Command::RandomMap) => {
                let id = MapId::random(&mut self.rng);
                self.request_map(id);
            }
            ev => {
                if self.sim.input.apply(ev) {
                    self.wake();
                }
            }
        }
    }

    /// Publishes a finished background load, if any.
    pub fn poll_loader(&mut self) {
        let Some(pending) = self.pending.as_ref() else { return };
        let Some(result) = pending.poll() else { return };
        let id = pending.id();
        self.pending = None;
        match result {
            Ok(terrain) => self.publish_terrain(Some(id), terrain),
            Err(e) => warn!("keeping current terrain: {e}"),
        }
    }

    /// One atomic tick. Returns whether another tick should follow.
    pub fn tick(&mut self) -> bool {
        let sim = &mut self.sim;
        let active = sim.input.update(&mut sim.camera, &sim.rates, &sim.limits);

        self.frame.fill_background(self.caster.config().background);
        self.caster.cast_all(&self.sim.camera, self.sim.terrain(), &mut self.frame);
        self.ticks += 1;
        trace!("tick {} camera {:?}", self.ticks, self.sim.camera);

        if !active {
            debug!("rendering -> idle");
            self.state = LoopState::Idle;
        }
        active
    }

    /// One iteration of the host loop.
    pub fn step<S: Surface>(&mut self, surface: &mut S) {
        let mut events = std::mem::take(&mut self.events);
        surface.poll_events(&mut events);
        for ev in events.drain(..) {
            self.handle_event(ev);
        }
        self.events = events;
        self.poll_loader();

        match self.state {
            LoopState::Rendering => {
                self.tick();
                surface.present(&self.frame, &self.sim.camera);
            }
            LoopState::Idle => surface.idle(),
        }
    }

    pub fn run<S: Surface>(&mut self, surface: &mut S) {
        if self.pending.is_none() && self.current_map.is_none() {
            self.request_map(self.requested_map);
        }
        while !surface.should_close() {
            self.step(surface);
        }
    }
}
