//! Overlap tests and collision response dispatch.
//!
//! `overlap` is the narrow-phase test: hit-box rects first, then an exact
//! pixel-mask comparison when both objects carry masks. `collide` layers
//! the response protocol on top: it classifies which of the first
//! object's sides made contact and runs that object's behavior hooks.
//!
//! Side classification is velocity-relative with a positional fallback,
//! and several sides can flag on the same contact. Game code treats the
//! flags as "pushes from this direction are plausible", not as a single
//! resolved contact normal, and the stock behaviors depend on that
//! looseness.

use crate::api::types::EntityId;
use crate::components::object::GameObject;
use crate::core::math::Rect;
use crate::core::scene::Scene;
use crate::systems::behavior::BehaviorSet;

/// Which sides of an object took part in a contact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CollisionSides {
    pub left: bool,
    pub right: bool,
    pub top: bool,
    pub bottom: bool,
}

impl CollisionSides {
    pub fn any(&self) -> bool {
        self.left || self.right || self.top || self.bottom
    }
}

/// Whether an object's hit rect overlaps an arbitrary world rect.
/// Liveness is not consulted.
pub fn overlap_rect(obj: &GameObject, rect: &Rect) -> bool {
    obj.hit_rect().overlaps(rect)
}

/// Narrow-phase overlap between two objects.
///
/// False for identity or unknown IDs. With `check_alive` set, dead
/// objects never overlap anything. The rect test uses each object's hit
/// rect; when both objects carry pixel masks the rect test is refined by
/// an exact mask intersection.
pub fn overlap(scene: &Scene, a: EntityId, b: EntityId, check_alive: bool) -> bool {
    if a == b {
        return false;
    }
    let (Some(oa), Some(ob)) = (scene.get(a), scene.get(b)) else {
        return false;
    };
    if check_alive && !(oa.alive && ob.alive) {
        return false;
    }
    if !oa.hit_rect().overlaps(&ob.hit_rect()) {
        return false;
    }

    if let (Some(ma), Some(mb)) = (&oa.pixel_mask, &ob.pixel_mask) {
        // Masks are anchored at each bounding rect's top-left corner.
        let dx = (ob.rect().left() - oa.rect().left()).round() as i32;
        let dy = (ob.rect().top() - oa.rect().top()).round() as i32;
        return ma.overlaps(mb, dx, dy);
    }

    true
}

/// Classify which of `a`'s sides contact `b`. Relative velocity decides
/// first; a position-plus-edge test catches resting contacts.
pub fn classify_sides(a: &GameObject, b: &GameObject) -> CollisionSides {
    CollisionSides {
        right: a.velocity.x > b.velocity.x || (a.x() < b.x() && a.right() > b.left()),
        left: a.velocity.x < b.velocity.x || (a.x() > b.x() && a.left() < b.right()),
        bottom: a.velocity.y > b.velocity.y || (a.y() < b.y() && a.bottom() > b.top()),
        top: a.velocity.y < b.velocity.y || (a.y() > b.y() && a.top() < b.bottom()),
    }
}

/// Full collision step between two objects.
///
/// When they overlap: classify `a`'s contact sides, optionally kill both
/// objects, then run `a`'s behavior hooks (side hooks first, then
/// `on_collision`) if `a` is still collidable and alive. Returns whether
/// the response ran.
pub fn collide(
    scene: &mut Scene,
    behaviors: &mut BehaviorSet,
    a: EntityId,
    b: EntityId,
    kill: bool,
    check_alive: bool,
) -> bool {
    if !overlap(scene, a, b, check_alive) {
        return false;
    }

    let sides = match (scene.get(a), scene.get(b)) {
        (Some(oa), Some(ob)) => classify_sides(oa, ob),
        _ => return false,
    };

    if kill {
        scene.kill(a);
        scene.kill(b);
    }

    let Some(oa) = scene.get_mut(a) else {
        return false;
    };
    let responded = oa.collidable && oa.alive;
    if responded {
        behaviors.dispatch(a, |bh| {
            if sides.right {
                bh.hit_right(oa, b);
            }
            if sides.left {
                bh.hit_left(oa, b);
            }
            if sides.bottom {
                bh.hit_bottom(oa, b);
            }
            if sides.top {
                bh.hit_top(oa, b);
            }
            bh.on_collision(oa, b, sides);
        });
    }
    responded
}
