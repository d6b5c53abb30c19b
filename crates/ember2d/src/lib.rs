pub mod api;
pub mod components;
pub mod core;
pub mod extensions;
pub mod input;
pub mod systems;

// Re-export key types at crate root for convenience
pub use api::engine::{Engine, EngineContext, FrameContext, GameConfig, HandlerId, UpdaterId};
pub use api::types::{EngineError, EntityId, LifecycleEvent, MAX_USER_EVENTS};
pub use components::animation::AnimationState;
pub use components::object::GameObject;
pub use components::surface::{Frame, PixelMask, SurfaceId};
pub use core::math::{sign, vector_from_angle, Rect, Vec2Ext};
pub use core::quadtree::QuadTree;
pub use core::scene::Scene;
pub use core::time::{FrameClock, MOTION_EPSILON};
pub use core::world::{OutOfBounds, World};
pub use input::snapshot::{EventKind, InputEvent, InputQueue, InputSnapshot};
pub use systems::behavior::{
    ArrowKeys, Behavior, BehaviorSet, Bouncer, Clickable, Fader, Stopper, Wrapper,
};
pub use systems::collision::{classify_sides, collide, overlap, overlap_rect, CollisionSides};
pub use systems::motion::update_object;
pub use systems::render::{build_draw_list, DrawCommand, DrawList};

// Extensions — decoupled optional systems
pub use extensions::{CompletionPolicy, Tween, TweenFunction, TweenHolder, TweenValue};
