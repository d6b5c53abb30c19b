//! The frame driver.
//!
//! `Engine` ties the pieces together: it drains the host's input queue
//! into registered event handlers, advances the clock, eases the camera,
//! runs updaters and per-object motion, ticks tweens, and rebuilds the
//! draw list. Handlers run before the update pass, so they observe the
//! scene as the previous frame left it.

use std::collections::HashMap;

use serde::Deserialize;

use crate::api::types::{EngineError, EntityId, MAX_USER_EVENTS};
use crate::components::object::GameObject;
use crate::core::scene::Scene;
use crate::core::time::FrameClock;
use crate::core::world::World;
use crate::extensions::tween::TweenHolder;
use crate::input::snapshot::{EventKind, InputEvent, InputQueue, InputSnapshot};
use crate::systems::behavior::BehaviorSet;
use crate::systems::motion;
use crate::systems::render::{build_draw_list, DrawList};

/// Engine configuration, loadable from JSON.
#[derive(Debug, Clone, Deserialize)]
pub struct GameConfig {
    /// Screen width in world units.
    pub screen_width: f32,
    /// Screen height in world units.
    pub screen_height: f32,
    /// Initial scene capacity.
    #[serde(default = "default_capacity")]
    pub scene_capacity: usize,
    /// Broad-phase quadtree depth.
    #[serde(default = "default_quadtree_depth")]
    pub quadtree_depth: u32,
    /// Multiplier from wall time to game time.
    #[serde(default = "default_time_scale")]
    pub time_scale: f32,
}

fn default_capacity() -> usize {
    256
}

fn default_quadtree_depth() -> u32 {
    crate::core::quadtree::DEFAULT_DEPTH
}

fn default_time_scale() -> f32 {
    1.0
}

impl GameConfig {
    pub fn new(screen_width: f32, screen_height: f32) -> Self {
        Self {
            screen_width,
            screen_height,
            scene_capacity: default_capacity(),
            quadtree_depth: default_quadtree_depth(),
            time_scale: default_time_scale(),
        }
    }

    /// Parse a config from JSON. Missing optional fields take defaults.
    pub fn from_json(json: &str) -> Result<Self, EngineError> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Per-frame values handed to updaters.
pub struct FrameContext<'a> {
    /// Scaled delta time in seconds.
    pub dt: f32,
    /// Camera scroll at the start of the update pass.
    pub scroll: glam::Vec2,
    /// Held-key and pointer state after this frame's events.
    pub input: &'a InputSnapshot,
}

/// The mutable engine state game code works against.
pub struct EngineContext {
    pub scene: Scene,
    pub world: World,
    pub behaviors: BehaviorSet,
    pub tweens: HashMap<EntityId, TweenHolder>,
}

impl EngineContext {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            scene: Scene::with_capacity(config.scene_capacity),
            world: World::new(config.screen_width, config.screen_height),
            behaviors: BehaviorSet::new(),
            tweens: HashMap::new(),
        }
    }

    /// Spawn an object, assigning it the next free ID.
    pub fn spawn(&mut self, object: GameObject) -> EntityId {
        self.scene.spawn(object)
    }

    /// Remove an object and everything attached to it: behaviors and
    /// tweens go with the object.
    pub fn despawn(&mut self, id: EntityId) -> Option<GameObject> {
        self.behaviors.clear(id);
        self.tweens.remove(&id);
        self.scene.despawn(id)
    }

    /// The tween holder for an object, created on first use.
    pub fn tweens_mut(&mut self, id: EntityId) -> &mut TweenHolder {
        self.tweens.entry(id).or_default()
    }
}

/// Handle for removing a registered event handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HandlerId(u32);

/// Handle for removing a registered updater.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpdaterId(u32);

type Handler = Box<dyn FnMut(&mut EngineContext, &InputEvent)>;
type Updater = Box<dyn FnMut(&mut EngineContext, &FrameContext)>;

pub struct Engine {
    pub ctx: EngineContext,
    /// Updates suspend while paused; event handlers still run.
    pub paused: bool,
    config: GameConfig,
    clock: FrameClock,
    input_state: InputSnapshot,
    handlers: Vec<(HandlerId, EventKind, Handler)>,
    updaters: Vec<(UpdaterId, Updater)>,
    next_handler: u32,
    next_updater: u32,
    draw_list: DrawList,
}

impl Engine {
    pub fn new(config: GameConfig) -> Self {
        let mut clock = FrameClock::new();
        clock.time_scale = config.time_scale;
        Self {
            ctx: EngineContext::new(&config),
            paused: false,
            config,
            clock,
            input_state: InputSnapshot::new(),
            handlers: Vec::new(),
            updaters: Vec::new(),
            next_handler: 1,
            next_updater: 1,
            draw_list: DrawList::new(),
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn clock_mut(&mut self) -> &mut FrameClock {
        &mut self.clock
    }

    /// The held input state as of the last frame.
    pub fn input_state(&self) -> &InputSnapshot {
        &self.input_state
    }

    /// Subscribe a handler to one event kind. Handlers for the same kind
    /// run in registration order.
    pub fn on_event(
        &mut self,
        kind: EventKind,
        handler: impl FnMut(&mut EngineContext, &InputEvent) + 'static,
    ) -> Result<HandlerId, EngineError> {
        if let EventKind::User(k) = kind {
            if k >= MAX_USER_EVENTS {
                return Err(EngineError::InvalidEventKind(k));
            }
        }
        let id = HandlerId(self.next_handler);
        self.next_handler += 1;
        self.handlers.push((id, kind, Box::new(handler)));
        Ok(id)
    }

    /// Unsubscribe a handler. Unknown IDs are harmless.
    pub fn remove_handler(&mut self, id: HandlerId) {
        self.handlers.retain(|(h, _, _)| *h != id);
    }

    /// Register a per-frame updater, run after camera follow and before
    /// object motion, in registration order.
    pub fn add_updater(
        &mut self,
        updater: impl FnMut(&mut EngineContext, &FrameContext) + 'static,
    ) -> UpdaterId {
        let id = UpdaterId(self.next_updater);
        self.next_updater += 1;
        self.updaters.push((id, Box::new(updater)));
        id
    }

    pub fn remove_updater(&mut self, id: UpdaterId) {
        self.updaters.retain(|(u, _)| *u != id);
    }

    /// Run one frame: dispatch events, update, rebuild the draw list.
    /// Returns the draw list for the host to consume.
    pub fn frame(&mut self, elapsed_ms: f32, input: &mut InputQueue) -> &DrawList {
        // Events first, against the previous frame's scene state. Paused
        // engines still listen, so an unpause key works.
        for event in input.drain() {
            self.input_state.apply(&event);
            let kind = event.kind();
            for (_, k, handler) in self.handlers.iter_mut() {
                if *k == kind {
                    handler(&mut self.ctx, &event);
                }
            }
        }

        let dt = self.clock.advance(elapsed_ms);

        if !self.paused {
            self.ctx.world.update(&self.ctx.scene, dt);

            let frame_ctx = FrameContext {
                dt,
                scroll: self.ctx.world.scroll,
                input: &self.input_state,
            };
            for (_, updater) in self.updaters.iter_mut() {
                updater(&mut self.ctx, &frame_ctx);
            }

            // Motion over a snapshot of IDs: updaters and behaviors may
            // kill or spawn mid-pass without invalidating the walk.
            let ids: Vec<EntityId> = self.ctx.scene.iter().map(|o| o.id).collect();
            for id in ids {
                let EngineContext {
                    scene,
                    world,
                    behaviors,
                    ..
                } = &mut self.ctx;
                if let Some(obj) = scene.get_mut(id) {
                    motion::update_object(obj, behaviors, world, &frame_ctx);
                    obj.tick_animation();
                }
            }

            for holder in self.ctx.tweens.values_mut() {
                holder.update(dt);
            }
        }

        build_draw_list(&mut self.ctx.scene, &self.ctx.world, &mut self.draw_list);
        &self.draw_list
    }

    /// The draw list from the most recent frame.
    pub fn draw_list(&self) -> &DrawList {
        &self.draw_list
    }
}
