//! Draw-list construction.
//!
//! Each frame the engine walks the scene in insertion order (back to
//! front) and emits one `DrawCommand` per visible object that has a
//! frame, already transformed into screen space. Alongside the commands
//! the list accumulates screen-space dirty rects: the union of each
//! changed object's previous and current footprint, so a blitting host
//! can repaint only what moved.

use std::collections::HashMap;

use bytemuck::{Pod, Zeroable};
use glam::Vec2;

use crate::api::types::EntityId;
use crate::core::math::Rect;
use crate::core::scene::Scene;
use crate::core::world::World;

/// One blit, in screen space. Plain floats so the whole list can be
/// handed to a host renderer as a flat buffer.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, Pod, Zeroable)]
pub struct DrawCommand {
    /// Screen-space center X.
    pub x: f32,
    /// Screen-space center Y.
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// Rotation in degrees, clockwise on a Y-down screen.
    pub rotation: f32,
    /// Surface handle, as a float for buffer uniformity.
    pub surface: f32,
    /// Opacity, 1.0 fully opaque.
    pub alpha: f32,
    /// Back-to-front draw index.
    pub layer: f32,
}

impl DrawCommand {
    pub const FLOATS: usize = 8;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;
}

/// The frame's render output: ordered commands plus the dirty regions.
pub struct DrawList {
    pub commands: Vec<DrawCommand>,
    /// Screen regions whose contents changed since the previous frame.
    pub dirty: Vec<Rect>,
}

impl DrawList {
    pub fn new() -> Self {
        Self {
            commands: Vec::with_capacity(256),
            dirty: Vec::new(),
        }
    }

    pub fn clear(&mut self) {
        self.commands.clear();
        self.dirty.clear();
    }

    pub fn command_count(&self) -> u32 {
        self.commands.len() as u32
    }

    /// Raw pointer to command data for flat-buffer consumers.
    pub fn commands_ptr(&self) -> *const f32 {
        self.commands.as_ptr() as *const f32
    }
}

impl Default for DrawList {
    fn default() -> Self {
        Self::new()
    }
}

/// Rebuild the draw list from the scene.
///
/// Commands come out in scene insertion order. Objects without a frame or
/// with `visible == false` produce no command; objects fully outside the
/// screen are tracked for dirty rects but not emitted.
pub fn build_draw_list(scene: &mut Scene, world: &World, list: &mut DrawList) {
    list.clear();

    // Parent positions resolved up front so the mutable pass below does
    // not need a second borrow of the scene.
    let positions: HashMap<EntityId, Vec2> =
        scene.iter().map(|o| (o.id, o.position())).collect();

    let screen = Rect::new(0.0, 0.0, world.screen_size.x, world.screen_size.y);
    let scroll = world.scroll;

    for obj in scene.iter_mut() {
        let frame = if obj.visible { obj.frame().copied() } else { None };
        let Some(frame) = frame else {
            // A sprite that just vanished leaves a hole to repaint.
            if let Some(old) = obj.take_screen_rect() {
                list.dirty.push(old);
            }
            obj.clear_dirty();
            continue;
        };

        let parent_pos = obj.parent().and_then(|p| positions.get(&p)).copied();
        let screen_pos = obj.screen_position(scroll, parent_pos);
        let rect = Rect::from_center(screen_pos, obj.size());

        let previous = obj.swap_screen_rect(rect);
        if obj.is_dirty() || previous != Some(rect) {
            let region = match previous {
                Some(old) => old.union(&rect),
                None => rect,
            };
            list.dirty.push(region);
        }
        obj.clear_dirty();

        if !rect.overlaps(&screen) {
            continue;
        }

        list.commands.push(DrawCommand {
            x: screen_pos.x,
            y: screen_pos.y,
            width: obj.size().x,
            height: obj.size().y,
            rotation: obj.angle(),
            surface: frame.surface.0 as f32,
            alpha: obj.alpha(),
            layer: list.commands.len() as f32,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::object::GameObject;
    use crate::components::surface::{Frame, SurfaceId};

    fn spawn_sprite(scene: &mut Scene, x: f32, y: f32, surface: u32) -> EntityId {
        let id = scene.next_id();
        scene.spawn(
            GameObject::new(id)
                .with_position(Vec2::new(x, y))
                .with_frame(Frame::new(SurfaceId(surface), 10.0, 10.0)),
        )
    }

    #[test]
    fn command_stride_is_8_floats() {
        assert_eq!(std::mem::size_of::<DrawCommand>(), DrawCommand::STRIDE_BYTES);
    }

    #[test]
    fn commands_follow_scene_order() {
        let mut scene = Scene::new();
        spawn_sprite(&mut scene, 10.0, 10.0, 1);
        spawn_sprite(&mut scene, 20.0, 20.0, 2);
        let world = World::new(100.0, 100.0);
        let mut list = DrawList::new();

        build_draw_list(&mut scene, &world, &mut list);
        assert_eq!(list.command_count(), 2);
        assert_eq!(list.commands[0].surface, 1.0);
        assert_eq!(list.commands[1].surface, 2.0);
        assert_eq!(list.commands[1].layer, 1.0);
    }

    #[test]
    fn object_alpha_reaches_the_command() {
        let mut scene = Scene::new();
        let id = spawn_sprite(&mut scene, 10.0, 10.0, 1);
        scene.get_mut(id).unwrap().set_alpha(0.25);
        let world = World::new(100.0, 100.0);
        let mut list = DrawList::new();

        build_draw_list(&mut scene, &world, &mut list);
        assert_eq!(list.commands[0].alpha, 0.25);
    }

    #[test]
    fn invisible_and_frameless_objects_emit_nothing() {
        let mut scene = Scene::new();
        let hidden = spawn_sprite(&mut scene, 10.0, 10.0, 1);
        scene.get_mut(hidden).unwrap().visible = false;
        let bare = scene.next_id();
        scene.spawn(GameObject::new(bare).with_position(Vec2::new(5.0, 5.0)));

        let world = World::new(100.0, 100.0);
        let mut list = DrawList::new();
        build_draw_list(&mut scene, &world, &mut list);
        assert_eq!(list.command_count(), 0);
    }

    #[test]
    fn scroll_and_parallax_shift_the_output() {
        let mut scene = Scene::new();
        let id = spawn_sprite(&mut scene, 100.0, 100.0, 1);
        scene.get_mut(id).unwrap().scroll_factor = Vec2::new(0.5, 1.0);
        let mut world = World::new(200.0, 200.0);
        world.scroll = Vec2::new(40.0, 40.0);

        let mut list = DrawList::new();
        build_draw_list(&mut scene, &world, &mut list);
        assert_eq!(list.commands[0].x, 80.0);
        assert_eq!(list.commands[0].y, 60.0);
    }

    #[test]
    fn child_draws_at_parent_offset() {
        let mut scene = Scene::new();
        let parent = spawn_sprite(&mut scene, 50.0, 50.0, 1);
        let child = spawn_sprite(&mut scene, 5.0, -5.0, 2);
        scene.attach(parent, child);

        let world = World::new(200.0, 200.0);
        let mut list = DrawList::new();
        build_draw_list(&mut scene, &world, &mut list);
        assert_eq!(list.commands[1].x, 55.0);
        assert_eq!(list.commands[1].y, 45.0);
    }

    #[test]
    fn static_frames_accumulate_no_dirty_rects() {
        let mut scene = Scene::new();
        spawn_sprite(&mut scene, 10.0, 10.0, 1);
        let world = World::new(100.0, 100.0);
        let mut list = DrawList::new();

        build_draw_list(&mut scene, &world, &mut list);
        assert_eq!(list.dirty.len(), 1, "first frame paints everything");

        build_draw_list(&mut scene, &world, &mut list);
        assert!(list.dirty.is_empty(), "nothing moved");
    }

    #[test]
    fn a_move_dirties_the_union_of_old_and_new() {
        let mut scene = Scene::new();
        let id = spawn_sprite(&mut scene, 10.0, 10.0, 1);
        let world = World::new(100.0, 100.0);
        let mut list = DrawList::new();
        build_draw_list(&mut scene, &world, &mut list);

        scene.get_mut(id).unwrap().set_position(Vec2::new(30.0, 10.0));
        build_draw_list(&mut scene, &world, &mut list);
        assert_eq!(list.dirty.len(), 1);
        let region = list.dirty[0];
        assert_eq!(region.left(), 5.0);
        assert_eq!(region.right(), 35.0);
    }

    #[test]
    fn camera_movement_dirties_scrolling_objects() {
        let mut scene = Scene::new();
        spawn_sprite(&mut scene, 10.0, 10.0, 1);
        let mut world = World::new(100.0, 100.0);
        let mut list = DrawList::new();
        build_draw_list(&mut scene, &world, &mut list);

        world.scroll = Vec2::new(5.0, 0.0);
        build_draw_list(&mut scene, &world, &mut list);
        assert_eq!(list.dirty.len(), 1, "screen rect changed under the camera");
    }

    #[test]
    fn a_killed_sprite_dirties_its_last_footprint_once() {
        let mut scene = Scene::new();
        let id = spawn_sprite(&mut scene, 10.0, 10.0, 1);
        let world = World::new(100.0, 100.0);
        let mut list = DrawList::new();
        build_draw_list(&mut scene, &world, &mut list);

        scene.kill(id);
        build_draw_list(&mut scene, &world, &mut list);
        assert_eq!(list.command_count(), 0);
        assert_eq!(list.dirty.len(), 1);
        assert_eq!(list.dirty[0].center(), Vec2::new(10.0, 10.0));

        build_draw_list(&mut scene, &world, &mut list);
        assert!(list.dirty.is_empty(), "hole repainted only once");
    }

    #[test]
    fn offscreen_objects_are_culled_but_tracked() {
        let mut scene = Scene::new();
        spawn_sprite(&mut scene, 500.0, 500.0, 1);
        let world = World::new(100.0, 100.0);
        let mut list = DrawList::new();
        build_draw_list(&mut scene, &world, &mut list);
        assert_eq!(list.command_count(), 0);
        assert_eq!(list.dirty.len(), 1);
    }
}
