// components/object.rs
//
// The fat game object: one struct carrying transform, motion state,
// collision fields, animation, and parent/child links. Favors simplicity
// and rapid prototyping over ECS purity.
//
// Position and size are center-based world coordinates, before camera
// scrolling. Visual-affecting mutations go through setters so the dirty
// flag stays accurate; per-frame systems read the flag to decide what to
// recompute and the draw-list builder clears it.

use glam::Vec2;

use crate::api::types::EntityId;
use crate::components::animation::AnimationState;
use crate::components::surface::{Frame, PixelMask};
use crate::core::math::Rect;

#[derive(Debug, Clone)]
pub struct GameObject {
    /// Unique identifier.
    pub id: EntityId,
    /// Name for lookups; empty when unnamed.
    pub name: String,

    pos: Vec2,
    size: Vec2,
    angle: f32,
    alpha: f32,
    dirty: bool,
    last_screen_rect: Option<Rect>,

    /// Per-object parallax factor. (1,1) follows the camera fully, (0,0)
    /// pins the object to the screen.
    pub scroll_factor: Vec2,

    /// Whether collision response hooks run for this object.
    pub collidable: bool,
    /// Dead objects receive no physics or collision processing.
    pub alive: bool,
    /// Invisible objects are not drawn; physics may still run (pooled
    /// objects rely on this split).
    pub visible: bool,
    /// Fixed objects skip motion integration entirely.
    pub fixed: bool,
    /// Rotation transform only runs when this is set or angular motion is
    /// explicitly applied; a cheap skip for the common non-rotating case.
    pub rotating: bool,

    /// Linear velocity in units per second.
    pub velocity: Vec2,
    /// Linear acceleration in units per second squared.
    pub acceleration: Vec2,
    /// Deceleration applied per axis while that axis has no acceleration.
    pub drag: Vec2,
    /// Per-axis speed limit, applied by magnitude during integration.
    pub max_velocity: Option<Vec2>,

    /// Angular velocity in degrees per second.
    pub angular_velocity: f32,
    /// Angular acceleration in degrees per second squared.
    pub angular_acceleration: f32,
    pub max_angular_velocity: Option<f32>,

    /// Collision rect override, in local coordinates relative to the
    /// object's center. `None` means the full bounding rect is used.
    pub hit_box: Option<Rect>,
    /// Opt-in pixel-perfect collision mask, anchored at the bounding
    /// rect's top-left corner.
    pub pixel_mask: Option<PixelMask>,

    /// Frame-list animation state, when the object animates.
    pub animation: Option<AnimationState>,
    frame: Option<Frame>,

    parent: Option<EntityId>,
    children: Vec<EntityId>,
}

impl GameObject {
    pub fn new(id: EntityId) -> Self {
        Self {
            id,
            name: String::new(),
            pos: Vec2::ZERO,
            size: Vec2::ZERO,
            angle: 0.0,
            alpha: 1.0,
            dirty: true,
            last_screen_rect: None,
            scroll_factor: Vec2::ONE,
            collidable: true,
            alive: true,
            visible: true,
            fixed: false,
            rotating: false,
            velocity: Vec2::ZERO,
            acceleration: Vec2::ZERO,
            drag: Vec2::ZERO,
            max_velocity: None,
            angular_velocity: 0.0,
            angular_acceleration: 0.0,
            max_angular_velocity: None,
            hit_box: None,
            pixel_mask: None,
            animation: None,
            frame: None,
            parent: None,
            children: Vec::new(),
        }
    }

    // -- Builder pattern --

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_position(mut self, pos: Vec2) -> Self {
        self.pos = pos;
        self
    }

    pub fn with_size(mut self, size: Vec2) -> Self {
        self.size = size;
        self
    }

    pub fn with_velocity(mut self, velocity: Vec2) -> Self {
        self.velocity = velocity;
        self
    }

    pub fn with_scroll_factor(mut self, factor: Vec2) -> Self {
        self.scroll_factor = factor;
        self
    }

    pub fn with_frame(mut self, frame: Frame) -> Self {
        self.size = frame.size;
        self.frame = Some(frame);
        self
    }

    pub fn with_fixed(mut self, fixed: bool) -> Self {
        self.fixed = fixed;
        self
    }

    pub fn with_alpha(mut self, alpha: f32) -> Self {
        self.alpha = alpha.clamp(0.0, 1.0);
        self
    }

    // -- Transform accessors --

    pub fn position(&self) -> Vec2 {
        self.pos
    }

    pub fn set_position(&mut self, pos: Vec2) {
        self.pos = pos;
        self.dirty = true;
    }

    pub fn x(&self) -> f32 {
        self.pos.x
    }

    pub fn set_x(&mut self, x: f32) {
        self.pos.x = x;
        self.dirty = true;
    }

    pub fn y(&self) -> f32 {
        self.pos.y
    }

    pub fn set_y(&mut self, y: f32) {
        self.pos.y = y;
        self.dirty = true;
    }

    pub fn size(&self) -> Vec2 {
        self.size
    }

    pub fn set_size(&mut self, size: Vec2) {
        self.size = size;
        self.dirty = true;
    }

    /// Rotation from the original heading, in degrees.
    pub fn angle(&self) -> f32 {
        self.angle
    }

    pub fn set_angle(&mut self, angle: f32) {
        self.angle = angle;
        self.dirty = true;
    }

    /// Opacity: 1.0 fully opaque, 0.0 invisible.
    pub fn alpha(&self) -> f32 {
        self.alpha
    }

    pub fn set_alpha(&mut self, alpha: f32) {
        self.alpha = alpha.clamp(0.0, 1.0);
        self.dirty = true;
    }

    pub fn left(&self) -> f32 {
        self.pos.x - self.size.x / 2.0
    }

    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x / 2.0
    }

    pub fn top(&self) -> f32 {
        self.pos.y - self.size.y / 2.0
    }

    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y / 2.0
    }

    /// World-space bounding rect.
    pub fn rect(&self) -> Rect {
        Rect::from_center(self.pos, self.size)
    }

    /// The rect used for collision: the hit-box override translated to
    /// world space when present, otherwise the full bounding rect.
    pub fn hit_rect(&self) -> Rect {
        match &self.hit_box {
            Some(local) => local.translated(self.pos),
            None => self.rect(),
        }
    }

    // -- Display --

    /// The frame currently shown, either the animation's active frame or
    /// the statically assigned one.
    pub fn frame(&self) -> Option<&Frame> {
        self.animation
            .as_ref()
            .and_then(|a| a.active_frame())
            .or(self.frame.as_ref())
    }

    pub fn set_frame(&mut self, frame: Frame) {
        self.size = frame.size;
        self.frame = Some(frame);
        self.dirty = true;
    }

    /// Advance the animation one step, adopting the new frame's size.
    /// No-op for dead or non-animated objects.
    pub fn tick_animation(&mut self) {
        if !self.alive {
            return;
        }
        let Some(anim) = &mut self.animation else { return };
        if let Some(frame) = anim.advance().copied() {
            self.size = frame.size;
            self.dirty = true;
        }
    }

    // -- Lifecycle --

    /// Stop updating and drawing this object. The scene keeps it around so
    /// it can be recycled; use `Scene::despawn` to drop it entirely.
    pub fn kill(&mut self) {
        self.alive = false;
        self.visible = false;
        self.dirty = true;
    }

    /// Bring a killed object back for reuse.
    pub fn revive(&mut self) {
        self.alive = true;
        self.visible = true;
        self.dirty = true;
    }

    // -- Hierarchy (links are managed by the scene) --

    pub fn parent(&self) -> Option<EntityId> {
        self.parent
    }

    pub fn children(&self) -> &[EntityId] {
        &self.children
    }

    pub(crate) fn set_parent_link(&mut self, parent: Option<EntityId>) {
        self.parent = parent;
        self.dirty = true;
    }

    pub(crate) fn add_child_link(&mut self, child: EntityId) {
        if !self.children.contains(&child) {
            self.children.push(child);
        }
    }

    pub(crate) fn remove_child_link(&mut self, child: EntityId) {
        self.children.retain(|&c| c != child);
    }

    pub(crate) fn take_children(&mut self) -> Vec<EntityId> {
        std::mem::take(&mut self.children)
    }

    // -- Screen transform and dirty tracking --

    /// Screen-space center: world position minus the camera scroll scaled
    /// by this object's parallax factor, plus the parent's world position
    /// for attached children.
    pub fn screen_position(&self, scroll: Vec2, parent_pos: Option<Vec2>) -> Vec2 {
        let mut p = self.pos - scroll * self.scroll_factor;
        if let Some(pp) = parent_pos {
            p += pp;
        }
        p
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn clear_dirty(&mut self) {
        self.dirty = false;
    }

    /// Record the freshly computed screen rect and return the previous one,
    /// so the draw-list builder can report both regions as dirty.
    pub(crate) fn swap_screen_rect(&mut self, rect: Rect) -> Option<Rect> {
        self.last_screen_rect.replace(rect)
    }

    /// Forget the recorded screen rect, returning it. Used when the object
    /// stops being drawn.
    pub(crate) fn take_screen_rect(&mut self) -> Option<Rect> {
        self.last_screen_rect.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::surface::SurfaceId;

    #[test]
    fn edges_follow_center_and_size() {
        let obj = GameObject::new(EntityId(1))
            .with_position(Vec2::new(100.0, 50.0))
            .with_size(Vec2::new(20.0, 10.0));
        assert_eq!(obj.left(), 90.0);
        assert_eq!(obj.right(), 110.0);
        assert_eq!(obj.top(), 45.0);
        assert_eq!(obj.bottom(), 55.0);
    }

    #[test]
    fn setters_mark_dirty() {
        let mut obj = GameObject::new(EntityId(1));
        obj.clear_dirty();
        assert!(!obj.is_dirty());
        obj.set_x(5.0);
        assert!(obj.is_dirty());
        obj.clear_dirty();
        obj.set_angle(45.0);
        assert!(obj.is_dirty());
        obj.clear_dirty();
        obj.set_alpha(0.5);
        assert!(obj.is_dirty());
    }

    #[test]
    fn alpha_clamps_to_unit_range() {
        let mut obj = GameObject::new(EntityId(1));
        assert_eq!(obj.alpha(), 1.0);
        obj.set_alpha(2.0);
        assert_eq!(obj.alpha(), 1.0);
        obj.set_alpha(-0.5);
        assert_eq!(obj.alpha(), 0.0);
    }

    #[test]
    fn hit_rect_prefers_hit_box() {
        let mut obj = GameObject::new(EntityId(1))
            .with_position(Vec2::new(10.0, 10.0))
            .with_size(Vec2::new(8.0, 8.0));
        assert_eq!(obj.hit_rect(), obj.rect());

        obj.hit_box = Some(Rect::from_center(Vec2::ZERO, Vec2::new(2.0, 2.0)));
        let hr = obj.hit_rect();
        assert_eq!(hr.center(), Vec2::new(10.0, 10.0));
        assert_eq!(hr.size(), Vec2::new(2.0, 2.0));
    }

    #[test]
    fn screen_position_applies_parallax_and_parent() {
        let obj = GameObject::new(EntityId(1))
            .with_position(Vec2::new(100.0, 100.0))
            .with_scroll_factor(Vec2::new(0.5, 0.5));
        let scroll = Vec2::new(40.0, 20.0);
        assert_eq!(obj.screen_position(scroll, None), Vec2::new(80.0, 90.0));
        assert_eq!(
            obj.screen_position(scroll, Some(Vec2::new(10.0, 0.0))),
            Vec2::new(90.0, 90.0)
        );
    }

    #[test]
    fn kill_and_revive_toggle_flags() {
        let mut obj = GameObject::new(EntityId(1));
        obj.kill();
        assert!(!obj.alive && !obj.visible);
        obj.revive();
        assert!(obj.alive && obj.visible);
    }

    #[test]
    fn set_frame_adopts_size() {
        let mut obj = GameObject::new(EntityId(1));
        obj.set_frame(Frame::new(SurfaceId(3), 16.0, 24.0));
        assert_eq!(obj.size(), Vec2::new(16.0, 24.0));
        assert_eq!(obj.frame().unwrap().surface, SurfaceId(3));
    }
}
