//! Motion integration.
//!
//! One object per call, in a fixed order: drag, acceleration, velocity
//! clamp, X move, X hooks, Y move, Y hooks, combined move hooks, angular
//! motion, then the behaviors' `on_update`. The axis hooks run between
//! the two position writes so platformer-style logic can separate wall
//! contact from floor contact.

use crate::api::engine::FrameContext;
use crate::components::object::GameObject;
use crate::core::time::MOTION_EPSILON;
use crate::core::world::World;
use crate::systems::behavior::BehaviorSet;

/// Decelerate one velocity axis toward zero by `drag * dt`, never
/// crossing zero.
fn apply_drag(v: f32, drag: f32, dt: f32) -> f32 {
    if drag == 0.0 || v == 0.0 {
        return v;
    }
    let step = drag * dt;
    if v > 0.0 {
        (v - step).max(0.0)
    } else {
        (v + step).min(0.0)
    }
}

fn clamp_magnitude(v: f32, max: f32) -> f32 {
    let m = max.abs();
    v.clamp(-m, m)
}

/// Advance one object by the frame's dt. Dead objects are skipped
/// entirely; fixed objects skip linear and angular integration but still
/// run their behaviors' `on_update`.
pub fn update_object(
    obj: &mut GameObject,
    behaviors: &mut BehaviorSet,
    world: &World,
    ctx: &FrameContext,
) {
    if !obj.alive {
        return;
    }
    let dt = ctx.dt;

    if !obj.fixed && dt > MOTION_EPSILON {
        // Drag only brakes an axis that is not being driven.
        if obj.acceleration.x == 0.0 {
            obj.velocity.x = apply_drag(obj.velocity.x, obj.drag.x, dt);
        }
        if obj.acceleration.y == 0.0 {
            obj.velocity.y = apply_drag(obj.velocity.y, obj.drag.y, dt);
        }

        obj.velocity += obj.acceleration * dt;

        if let Some(max) = obj.max_velocity {
            obj.velocity.x = clamp_magnitude(obj.velocity.x, max.x);
            obj.velocity.y = clamp_magnitude(obj.velocity.y, max.y);
        }

        if obj.velocity.x != 0.0 {
            obj.set_x(obj.x() + obj.velocity.x * dt);
            behaviors.dispatch(obj.id, |b| b.on_move_x(obj, world));
        }
        if obj.velocity.y != 0.0 {
            obj.set_y(obj.y() + obj.velocity.y * dt);
            behaviors.dispatch(obj.id, |b| b.on_move_y(obj, world));
        }
        if obj.velocity != glam::Vec2::ZERO {
            behaviors.dispatch(obj.id, |b| b.on_move(obj, world));
        }

        // Angular motion only runs when something asks for it.
        let spinning = (obj.angle() != 0.0 && obj.rotating)
            || obj.angular_velocity != 0.0
            || obj.angular_acceleration != 0.0;
        if spinning {
            obj.angular_velocity += obj.angular_acceleration * dt;
            if let Some(max) = obj.max_angular_velocity {
                obj.angular_velocity = clamp_magnitude(obj.angular_velocity, max);
            }
            obj.set_angle(obj.angle() + obj.angular_velocity * dt);
        }
    }

    behaviors.dispatch(obj.id, |b| b.on_update(obj, world, ctx));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::EntityId;
    use crate::input::snapshot::InputSnapshot;
    use crate::systems::behavior::Behavior;
    use glam::Vec2;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn world() -> World {
        World::new(100.0, 100.0)
    }

    fn mover() -> GameObject {
        GameObject::new(EntityId(1)).with_size(Vec2::new(10.0, 10.0))
    }

    fn frame<'a>(input: &'a InputSnapshot, dt: f32) -> FrameContext<'a> {
        FrameContext {
            dt,
            scroll: Vec2::ZERO,
            input,
        }
    }

    #[test]
    fn velocity_moves_position() {
        let mut obj = mover().with_velocity(Vec2::new(100.0, -50.0));
        let mut bs = BehaviorSet::new();
        let input = InputSnapshot::new();
        update_object(&mut obj, &mut bs, &world(), &frame(&input, 0.1));
        assert_eq!(obj.position(), Vec2::new(10.0, -5.0));
    }

    #[test]
    fn acceleration_integrates_before_the_move() {
        let mut obj = mover();
        obj.acceleration = Vec2::new(100.0, 0.0);
        let mut bs = BehaviorSet::new();
        let input = InputSnapshot::new();
        update_object(&mut obj, &mut bs, &world(), &frame(&input, 0.5));
        assert_eq!(obj.velocity.x, 50.0);
        assert_eq!(obj.x(), 25.0);
    }

    #[test]
    fn drag_brakes_toward_zero_without_crossing() {
        let mut obj = mover().with_velocity(Vec2::new(10.0, -10.0));
        obj.drag = Vec2::new(30.0, 30.0);
        let mut bs = BehaviorSet::new();
        let input = InputSnapshot::new();
        update_object(&mut obj, &mut bs, &world(), &frame(&input, 0.5));
        // 30 * 0.5 = 15 of braking would overshoot; both axes stop at zero.
        assert_eq!(obj.velocity, Vec2::ZERO);
    }

    #[test]
    fn drag_yields_to_acceleration_on_its_axis() {
        let mut obj = mover().with_velocity(Vec2::new(10.0, 10.0));
        obj.drag = Vec2::new(100.0, 100.0);
        obj.acceleration = Vec2::new(20.0, 0.0);
        let mut bs = BehaviorSet::new();
        let input = InputSnapshot::new();
        update_object(&mut obj, &mut bs, &world(), &frame(&input, 0.1));
        // X is driven: no drag, accel adds 2. Y drags from 10 to 0.
        assert_eq!(obj.velocity.x, 12.0);
        assert_eq!(obj.velocity.y, 0.0);
    }

    #[test]
    fn max_velocity_clamps_by_magnitude() {
        let mut obj = mover().with_velocity(Vec2::new(0.0, -500.0));
        obj.max_velocity = Some(Vec2::new(50.0, 50.0));
        let mut bs = BehaviorSet::new();
        let input = InputSnapshot::new();
        update_object(&mut obj, &mut bs, &world(), &frame(&input, 0.01));
        assert_eq!(obj.velocity.y, -50.0);
    }

    #[test]
    fn fixed_and_dead_objects_do_not_move() {
        let mut bs = BehaviorSet::new();
        let input = InputSnapshot::new();

        let mut fixed = mover().with_velocity(Vec2::new(100.0, 0.0)).with_fixed(true);
        update_object(&mut fixed, &mut bs, &world(), &frame(&input, 0.1));
        assert_eq!(fixed.x(), 0.0);

        let mut dead = mover().with_velocity(Vec2::new(100.0, 0.0));
        dead.kill();
        update_object(&mut dead, &mut bs, &world(), &frame(&input, 0.1));
        assert_eq!(dead.x(), 0.0);
    }

    #[test]
    fn sub_epsilon_dt_skips_integration() {
        let mut obj = mover().with_velocity(Vec2::new(1000.0, 0.0));
        let mut bs = BehaviorSet::new();
        let input = InputSnapshot::new();
        update_object(&mut obj, &mut bs, &world(), &frame(&input, 0.0005));
        assert_eq!(obj.x(), 0.0);
    }

    #[test]
    fn angular_motion_integrates_and_clamps() {
        let mut obj = mover();
        obj.angular_acceleration = 90.0;
        obj.max_angular_velocity = Some(30.0);
        let mut bs = BehaviorSet::new();
        let input = InputSnapshot::new();
        update_object(&mut obj, &mut bs, &world(), &frame(&input, 1.0));
        assert_eq!(obj.angular_velocity, 30.0);
        assert_eq!(obj.angle(), 30.0);
    }

    #[test]
    fn static_angle_without_rotating_flag_stays_put() {
        let mut obj = mover();
        obj.set_angle(45.0);
        obj.rotating = false;
        let mut bs = BehaviorSet::new();
        let input = InputSnapshot::new();
        update_object(&mut obj, &mut bs, &world(), &frame(&input, 0.1));
        assert_eq!(obj.angle(), 45.0);
        assert_eq!(obj.angular_velocity, 0.0);
    }

    #[test]
    fn hooks_fire_in_x_y_move_update_order() {
        struct Recorder(Rc<RefCell<Vec<&'static str>>>);
        impl Behavior for Recorder {
            fn on_update(&mut self, _o: &mut GameObject, _w: &World, _ctx: &FrameContext) {
                self.0.borrow_mut().push("update");
            }
            fn on_move_x(&mut self, _o: &mut GameObject, _w: &World) {
                self.0.borrow_mut().push("x");
            }
            fn on_move_y(&mut self, _o: &mut GameObject, _w: &World) {
                self.0.borrow_mut().push("y");
            }
            fn on_move(&mut self, _o: &mut GameObject, _w: &World) {
                self.0.borrow_mut().push("move");
            }
        }

        let calls = Rc::new(RefCell::new(Vec::new()));
        let mut bs = BehaviorSet::new();
        let mut obj = mover().with_velocity(Vec2::new(10.0, 10.0));
        bs.attach(obj.id, Box::new(Recorder(calls.clone())));

        let input = InputSnapshot::new();
        update_object(&mut obj, &mut bs, &world(), &frame(&input, 0.1));
        assert_eq!(*calls.borrow(), vec!["x", "y", "move", "update"]);
    }

    #[test]
    fn still_axis_skips_its_hook() {
        struct Recorder(Rc<RefCell<Vec<&'static str>>>);
        impl Behavior for Recorder {
            fn on_move_x(&mut self, _o: &mut GameObject, _w: &World) {
                self.0.borrow_mut().push("x");
            }
            fn on_move_y(&mut self, _o: &mut GameObject, _w: &World) {
                self.0.borrow_mut().push("y");
            }
        }

        let calls = Rc::new(RefCell::new(Vec::new()));
        let mut bs = BehaviorSet::new();
        let mut obj = mover().with_velocity(Vec2::new(10.0, 0.0));
        bs.attach(obj.id, Box::new(Recorder(calls.clone())));

        let input = InputSnapshot::new();
        update_object(&mut obj, &mut bs, &world(), &frame(&input, 0.1));
        assert_eq!(*calls.borrow(), vec!["x"]);
    }
}
