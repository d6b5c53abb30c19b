//! Composable per-object behaviors.
//!
//! A `Behavior` hooks into the points of an object's frame where game
//! logic usually lives: after each axis of movement, after any movement,
//! once per update, and on each classified collision side. Behaviors are
//! stored in a `BehaviorSet` keyed by object ID, separate from the scene,
//! so a system can hold the object and its behaviors mutably at once.
//!
//! `Bouncer`, `Wrapper` and `Stopper` are the stock edge responses games
//! keep rewriting; each reacts to the world bounds in `on_move`.
//! `Clickable`, `ArrowKeys` and `Fader` cover the other recurring
//! patterns: pointer hit testing, keyboard-driven movement, and a
//! fade-out that retires the object.

use std::collections::HashMap;

use crate::api::engine::FrameContext;
use crate::api::types::EntityId;
use crate::components::object::GameObject;
use crate::core::math::Rect;
use crate::core::world::World;
use crate::input::snapshot::InputSnapshot;
use crate::systems::collision::CollisionSides;

/// Hooks a game object can carry. Every method defaults to a no-op;
/// implement only the ones the behavior cares about.
pub trait Behavior {
    /// Once per frame, after motion integration and movement hooks.
    /// `ctx` carries the frame's dt, camera scroll, and input state.
    fn on_update(&mut self, _obj: &mut GameObject, _world: &World, _ctx: &FrameContext) {}

    /// After the X axis moved this frame, before Y moves.
    fn on_move_x(&mut self, _obj: &mut GameObject, _world: &World) {}

    /// After the Y axis moved this frame.
    fn on_move_y(&mut self, _obj: &mut GameObject, _world: &World) {}

    /// After both axes moved this frame.
    fn on_move(&mut self, _obj: &mut GameObject, _world: &World) {}

    /// Collision side responses. `other` is the object collided with.
    fn hit_left(&mut self, _obj: &mut GameObject, _other: EntityId) {}
    fn hit_right(&mut self, _obj: &mut GameObject, _other: EntityId) {}
    fn hit_top(&mut self, _obj: &mut GameObject, _other: EntityId) {}
    fn hit_bottom(&mut self, _obj: &mut GameObject, _other: EntityId) {}

    /// After the side hooks, with the full side classification.
    fn on_collision(&mut self, _obj: &mut GameObject, _other: EntityId, _sides: CollisionSides) {}
}

/// Behaviors for every object, keyed by ID. Order of attachment is order
/// of dispatch.
#[derive(Default)]
pub struct BehaviorSet {
    map: HashMap<EntityId, Vec<Box<dyn Behavior>>>,
}

impl BehaviorSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a behavior to an object, after any already attached.
    pub fn attach(&mut self, id: EntityId, behavior: Box<dyn Behavior>) {
        self.map.entry(id).or_default().push(behavior);
    }

    /// Drop every behavior attached to an object.
    pub fn clear(&mut self, id: EntityId) {
        self.map.remove(&id);
    }

    pub fn has_any(&self, id: EntityId) -> bool {
        self.map.get(&id).is_some_and(|v| !v.is_empty())
    }

    /// Run `f` over each of the object's behaviors in attachment order.
    pub fn dispatch(&mut self, id: EntityId, mut f: impl FnMut(&mut dyn Behavior)) {
        if let Some(behaviors) = self.map.get_mut(&id) {
            for b in behaviors.iter_mut() {
                f(b.as_mut());
            }
        }
    }
}

// -- Stock edge behaviors --

/// Reflect off the world bounds: the object is pushed back inside and the
/// offending velocity axis reverses.
pub struct Bouncer;

impl Behavior for Bouncer {
    fn on_move(&mut self, obj: &mut GameObject, world: &World) {
        let b = world.bounds();
        let half = obj.size() / 2.0;
        if obj.left() < b.left() {
            obj.set_x(b.left() + half.x);
            obj.velocity.x = obj.velocity.x.abs();
        } else if obj.right() > b.right() {
            obj.set_x(b.right() - half.x);
            obj.velocity.x = -obj.velocity.x.abs();
        }
        if obj.top() < b.top() {
            obj.set_y(b.top() + half.y);
            obj.velocity.y = obj.velocity.y.abs();
        } else if obj.bottom() > b.bottom() {
            obj.set_y(b.bottom() - half.y);
            obj.velocity.y = -obj.velocity.y.abs();
        }
    }
}

/// Wrap around the world: once fully past one edge, reappear entering
/// from the opposite edge with velocity untouched.
pub struct Wrapper;

impl Behavior for Wrapper {
    fn on_move(&mut self, obj: &mut GameObject, world: &World) {
        let b = world.bounds();
        let half = obj.size() / 2.0;
        if obj.right() < b.left() {
            obj.set_x(b.right() + half.x);
        } else if obj.left() > b.right() {
            obj.set_x(b.left() - half.x);
        }
        if obj.bottom() < b.top() {
            obj.set_y(b.bottom() + half.y);
        } else if obj.top() > b.bottom() {
            obj.set_y(b.top() - half.y);
        }
    }
}

/// Hard stop at the world bounds: clamp inside and zero the velocity on
/// the axis that hit.
pub struct Stopper;

impl Behavior for Stopper {
    fn on_move(&mut self, obj: &mut GameObject, world: &World) {
        let b = world.bounds();
        let half = obj.size() / 2.0;
        if obj.left() < b.left() {
            obj.set_x(b.left() + half.x);
            obj.velocity.x = 0.0;
        } else if obj.right() > b.right() {
            obj.set_x(b.right() - half.x);
            obj.velocity.x = 0.0;
        }
        if obj.top() < b.top() {
            obj.set_y(b.top() + half.y);
            obj.velocity.y = 0.0;
        } else if obj.bottom() > b.bottom() {
            obj.set_y(b.bottom() - half.y);
            obj.velocity.y = 0.0;
        }
    }
}

// -- Input-driven behaviors --

/// Run a callback when the pointer presses down inside the object's
/// screen rect. Fires once per press; holding does not repeat.
pub struct Clickable {
    on_click: Box<dyn FnMut(&mut GameObject)>,
    was_down: bool,
}

impl Clickable {
    pub fn new(on_click: impl FnMut(&mut GameObject) + 'static) -> Self {
        Self {
            on_click: Box::new(on_click),
            was_down: false,
        }
    }
}

impl Behavior for Clickable {
    fn on_update(&mut self, obj: &mut GameObject, _world: &World, ctx: &FrameContext) {
        let pressed = ctx.input.pointer_down && !self.was_down;
        self.was_down = ctx.input.pointer_down;
        if !pressed {
            return;
        }
        let rect = Rect::from_center(obj.screen_position(ctx.scroll, None), obj.size());
        if rect.contains(ctx.input.pointer) {
            (self.on_click)(obj);
        }
    }
}

/// Drive velocity from four held keys. Axes with no key held stop; two
/// opposing keys cancel. Key codes default to the browser arrow keys.
pub struct ArrowKeys {
    pub speed: f32,
    pub left: u32,
    pub up: u32,
    pub right: u32,
    pub down: u32,
}

impl ArrowKeys {
    pub fn new(speed: f32) -> Self {
        Self {
            speed,
            left: 37,
            up: 38,
            right: 39,
            down: 40,
        }
    }

    /// Use a different key set, in left/up/right/down order (WASD would
    /// be 65, 87, 68, 83).
    pub fn with_keys(mut self, left: u32, up: u32, right: u32, down: u32) -> Self {
        self.left = left;
        self.up = up;
        self.right = right;
        self.down = down;
        self
    }

    fn axis(&self, input: &InputSnapshot, neg: u32, pos: u32) -> f32 {
        let mut v = 0.0;
        if input.is_down(neg) {
            v -= self.speed;
        }
        if input.is_down(pos) {
            v += self.speed;
        }
        v
    }
}

impl Behavior for ArrowKeys {
    fn on_update(&mut self, obj: &mut GameObject, _world: &World, ctx: &FrameContext) {
        obj.velocity.x = self.axis(ctx.input, self.left, self.right);
        obj.velocity.y = self.axis(ctx.input, self.up, self.down);
    }
}

/// Fade the object's alpha to zero over a duration, then kill it. The
/// starting alpha is whatever the object has on the first update, so a
/// half-faded object finishes from there.
pub struct Fader {
    duration: f32,
    elapsed: f32,
    start_alpha: Option<f32>,
}

impl Fader {
    pub fn new(duration: f32) -> Self {
        Self {
            duration,
            elapsed: 0.0,
            start_alpha: None,
        }
    }
}

impl Behavior for Fader {
    fn on_update(&mut self, obj: &mut GameObject, _world: &World, ctx: &FrameContext) {
        if !obj.alive {
            return;
        }
        let start = *self.start_alpha.get_or_insert(obj.alpha());
        self.elapsed += ctx.dt;
        let t = (self.elapsed / self.duration).min(1.0);
        obj.set_alpha(start * (1.0 - t));
        if t >= 1.0 {
            obj.kill();
        }
    }
}
