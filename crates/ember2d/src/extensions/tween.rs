//! Time-based value interpolation.
//!
//! A `Tween` walks a value from start to end over a duration, through one
//! of the stock curves. A `TweenHolder` owns a set of tweens with a
//! completion policy each, so an object can run several effects at once
//! and the engine only has to call one `update`.

use crate::extensions::tweenfunc::{TweenFunction, TweenValue};

/// A single controllable interpolation.
pub struct Tween {
    pub start: TweenValue,
    pub end: TweenValue,
    /// Seconds from start to completion.
    pub duration: f32,
    pub function: TweenFunction,
    on_complete: Option<Box<dyn FnMut(TweenValue)>>,
    /// The current interpolated value.
    pub value: TweenValue,
    /// Progress from 0 to 1.
    pub percent: f32,
    pub running: bool,
}

impl Tween {
    pub fn new(start: TweenValue, end: TweenValue, duration: f32, function: TweenFunction) -> Self {
        Self {
            value: start.clone(),
            start,
            end,
            duration,
            function,
            on_complete: None,
            percent: 0.0,
            running: false,
        }
    }

    /// Register a callback for the moment the tween completes. It fires
    /// exactly once per run, with the final value.
    pub fn with_on_complete(mut self, f: impl FnMut(TweenValue) + 'static) -> Self {
        self.on_complete = Some(Box::new(f));
        self
    }

    /// Start the internal timer. A finished tween stays finished until
    /// `reset`.
    pub fn start(&mut self) {
        if !self.running && self.percent < 1.0 {
            self.running = true;
        }
    }

    /// Pause without losing progress.
    pub fn stop(&mut self) {
        self.running = false;
    }

    /// Rearm to the initial state.
    pub fn reset(&mut self) {
        self.running = false;
        self.percent = 0.0;
        self.value = self.start.clone();
    }

    pub fn is_finished(&self) -> bool {
        self.percent >= 1.0
    }

    /// Advance by `dt` seconds and return the current value. Call once
    /// per frame; a stopped tween just reports its value.
    pub fn update(&mut self, dt: f32) -> TweenValue {
        if self.running {
            self.percent += dt / self.duration;
            self.value = TweenValue::interpolate(
                self.function,
                &self.start,
                &self.end,
                self.percent.min(1.0),
            );

            if self.percent >= 1.0 {
                self.percent = 1.0;
                self.value = self.end.clone();
                self.running = false;
                if let Some(f) = &mut self.on_complete {
                    f(self.value.clone());
                }
            }
        }
        self.value.clone()
    }
}

/// What a holder does with a tween that finished this frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompletionPolicy {
    /// Remove it from the holder.
    Oneshot,
    /// Reset and start it again.
    Loop,
    /// Keep it, inert, so its final value stays readable.
    Persist,
}

/// A set of tweens with their completion policies.
#[derive(Default)]
pub struct TweenHolder {
    entries: Vec<(Tween, CompletionPolicy)>,
}

impl TweenHolder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a tween and start it immediately.
    pub fn add(&mut self, mut tween: Tween, policy: CompletionPolicy) {
        tween.start();
        self.entries.push((tween, policy));
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Tween> {
        self.entries.iter().map(|(t, _)| t)
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Tween> {
        self.entries.iter_mut().map(|(t, _)| t)
    }

    /// Advance every tween, then apply completion policies to the ones
    /// that finished. Policies run after the whole update pass, so a
    /// looping tween restarts from the next frame.
    pub fn update(&mut self, dt: f32) {
        for (tween, _) in self.entries.iter_mut() {
            tween.update(dt);
        }

        self.entries.retain_mut(|(tween, policy)| {
            if !tween.is_finished() {
                return true;
            }
            match policy {
                CompletionPolicy::Oneshot => false,
                CompletionPolicy::Loop => {
                    tween.reset();
                    tween.start();
                    true
                }
                CompletionPolicy::Persist => true,
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn scalar_tween(duration: f32) -> Tween {
        Tween::new(
            TweenValue::Scalar(0.0),
            TweenValue::Scalar(10.0),
            duration,
            TweenFunction::Linear,
        )
    }

    #[test]
    fn does_not_advance_until_started() {
        let mut t = scalar_tween(1.0);
        assert_eq!(t.update(0.5), TweenValue::Scalar(0.0));
        t.start();
        assert_eq!(t.update(0.5), TweenValue::Scalar(5.0));
    }

    #[test]
    fn clamps_at_the_end_and_stops() {
        let mut t = scalar_tween(1.0);
        t.start();
        // Overshoot: value pins to the exact end.
        assert_eq!(t.update(3.0), TweenValue::Scalar(10.0));
        assert!(!t.running);
        assert!(t.is_finished());
        // Restarting a finished tween does nothing.
        t.start();
        assert!(!t.running);
    }

    #[test]
    fn on_complete_fires_exactly_once() {
        let count = Rc::new(RefCell::new(0));
        let c = count.clone();
        let mut t = scalar_tween(1.0).with_on_complete(move |_| *c.borrow_mut() += 1);
        t.start();
        t.update(0.6);
        assert_eq!(*count.borrow(), 0);
        t.update(0.6);
        assert_eq!(*count.borrow(), 1);
        t.update(0.6);
        assert_eq!(*count.borrow(), 1);
    }

    #[test]
    fn reset_rearms_a_finished_tween() {
        let mut t = scalar_tween(1.0);
        t.start();
        t.update(2.0);
        t.reset();
        assert_eq!(t.value, TweenValue::Scalar(0.0));
        t.start();
        assert_eq!(t.update(0.5), TweenValue::Scalar(5.0));
    }

    #[test]
    fn stop_pauses_without_losing_progress() {
        let mut t = scalar_tween(1.0);
        t.start();
        t.update(0.3);
        t.stop();
        assert_eq!(t.update(5.0), TweenValue::Scalar(3.0), "frozen");
        t.start();
        t.update(0.2);
        assert_eq!(t.value, TweenValue::Scalar(5.0));
    }

    #[test]
    fn oneshot_leaves_the_holder_when_done() {
        let mut holder = TweenHolder::new();
        holder.add(scalar_tween(1.0), CompletionPolicy::Oneshot);
        holder.update(0.5);
        assert_eq!(holder.len(), 1);
        holder.update(0.6);
        assert_eq!(holder.len(), 0);
    }

    #[test]
    fn looping_tween_restarts_from_zero() {
        let mut holder = TweenHolder::new();
        holder.add(scalar_tween(1.0), CompletionPolicy::Loop);
        holder.update(1.5);
        let t = holder.iter().next().unwrap();
        assert_eq!(t.percent, 0.0);
        assert!(t.running);

        holder.update(0.5);
        assert_eq!(holder.iter().next().unwrap().value, TweenValue::Scalar(5.0));
    }

    #[test]
    fn persisting_tween_stays_readable_and_inert() {
        let mut holder = TweenHolder::new();
        holder.add(scalar_tween(1.0), CompletionPolicy::Persist);
        holder.update(2.0);
        holder.update(2.0);
        assert_eq!(holder.len(), 1);
        let t = holder.iter().next().unwrap();
        assert_eq!(t.value, TweenValue::Scalar(10.0));
        assert!(!t.running);
    }
}
