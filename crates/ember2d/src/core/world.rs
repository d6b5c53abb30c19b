//! Scrollable game world and camera control.
//!
//! The world owns the camera scroll offset, the world bounds, and the
//! optional follow target. Scrolling is applied per object at draw time
//! through each object's parallax factor; the world itself only moves the
//! camera.

use glam::Vec2;

use crate::api::types::EntityId;
use crate::core::math::Rect;
use crate::core::scene::Scene;

/// Default world half-extent. Positions stay within f32's exact-integer
/// range, so coordinate math never silently loses pixels.
pub const DEFAULT_EXTENT: f32 = (1 << 24) as f32;

/// The four border regions just outside the world bounds, in screen
/// coordinates. Used for off-screen checks and the stock edge behaviors.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OutOfBounds {
    pub left: Rect,
    pub right: Rect,
    pub top: Rect,
    pub bottom: Rect,
}

pub struct World {
    /// Size of the visible screen in world units.
    pub screen_size: Vec2,
    /// Camera offset: the world position of the screen's top-left corner.
    pub scroll: Vec2,
    bounds: Rect,
    follow_target: Option<EntityId>,
    follow_lead: Option<Vec2>,
    follow_speed: f32,
    follow_min: Option<Vec2>,
    follow_max: Option<Vec2>,
}

impl World {
    pub fn new(screen_width: f32, screen_height: f32) -> Self {
        Self {
            screen_size: Vec2::new(screen_width, screen_height),
            scroll: Vec2::ZERO,
            bounds: Rect {
                min: Vec2::splat(-DEFAULT_EXTENT),
                max: Vec2::splat(DEFAULT_EXTENT),
            },
            follow_target: None,
            follow_lead: None,
            follow_speed: 1.0,
            follow_min: None,
            follow_max: None,
        }
    }

    // -- Camera follow --

    /// Point the camera at an object. With a `lead` factor the camera aims
    /// ahead of the target by `velocity * lead`, showing more of the space
    /// the target is moving into.
    pub fn follow(&mut self, target: EntityId, lead: Option<Vec2>) {
        self.follow_target = Some(target);
        self.follow_lead = lead;
    }

    /// Stop following; the camera stays where it is.
    pub fn unfollow(&mut self) {
        self.follow_target = None;
        self.follow_lead = None;
    }

    pub fn follow_target(&self) -> Option<EntityId> {
        self.follow_target
    }

    /// Fraction of the remaining distance the camera covers per second.
    /// 1.0 is a gentle ease, larger values snap harder.
    pub fn set_follow_speed(&mut self, speed: f32) {
        self.follow_speed = speed;
    }

    /// Constrain the camera to a world region. `min` defaults to the
    /// origin and `max` to the screen size. The region becomes the world
    /// bounds; the camera maximum is shrunk by one screen so the view
    /// never shows past the bottom-right edge.
    pub fn set_follow_bounds(&mut self, min: Option<Vec2>, max: Option<Vec2>) {
        let min = min.unwrap_or(Vec2::ZERO);
        let max = max.unwrap_or(self.screen_size);
        self.bounds = Rect { min, max };
        self.follow_min = Some(min);
        self.follow_max = Some(max - self.screen_size);
    }

    /// Ease the camera toward the follow target, then clamp to the follow
    /// bounds. Does nothing without a target or when the target is gone.
    pub fn update(&mut self, scene: &Scene, dt: f32) {
        let Some(id) = self.follow_target else { return };
        let Some(obj) = scene.get(id) else {
            log::debug!("camera follow target {:?} missing from scene", id);
            return;
        };

        let mut target = obj.position() - self.screen_size / 2.0;
        if let Some(lead) = self.follow_lead {
            target += obj.velocity * lead;
        }

        self.scroll += (target - self.scroll) * self.follow_speed * dt;

        if let Some(min) = self.follow_min {
            self.scroll = self.scroll.max(min);
        }
        if let Some(max) = self.follow_max {
            self.scroll = self.scroll.min(max);
        }
    }

    // -- Regions --

    /// The world region currently visible on screen.
    pub fn screen_rect(&self) -> Rect {
        Rect::new(self.scroll.x, self.scroll.y, self.screen_size.x, self.screen_size.y)
    }

    /// The world bounds.
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    pub fn set_bounds(&mut self, bounds: Rect) {
        self.bounds = bounds;
    }

    /// Border rects of thickness `border` hugging the outside of the world
    /// bounds, translated into screen coordinates.
    pub fn out_of_bounds(&self, border: f32) -> OutOfBounds {
        let b = self.bounds;
        let left = Rect::new(
            b.left() - border,
            b.top() - border,
            border,
            b.height() + border * 2.0,
        );
        let right = Rect::new(
            b.right(),
            b.top() - border,
            border,
            b.height() + border * 2.0,
        );
        let top = Rect::new(
            b.left() - border,
            b.top() - border,
            b.width() + border * 2.0,
            border,
        );
        let bottom = Rect::new(
            b.left() - border,
            b.bottom(),
            b.width() + border * 2.0,
            border,
        );
        let shift = -self.scroll;
        OutOfBounds {
            left: left.translated(shift),
            right: right.translated(shift),
            top: top.translated(shift),
            bottom: bottom.translated(shift),
        }
    }
}
