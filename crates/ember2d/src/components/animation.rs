//! Frame-list animation state.
//!
//! An object owns an ordered list of frames (opaque surfaces) and a set of
//! named animations, each a list of indices into that frame list. The
//! active animation advances one step per frame tick and wraps at the end.

use std::collections::HashMap;

use crate::api::types::EngineError;
use crate::components::surface::Frame;

/// Animation state for a game object.
#[derive(Debug, Clone, Default)]
pub struct AnimationState {
    frames: Vec<Frame>,
    animations: HashMap<String, Vec<usize>>,
    /// Name of the animation currently playing, or `None` when the whole
    /// frame list plays in order.
    pub current_animation: Option<String>,
    /// Index of the showing frame. When a named animation is active this
    /// indexes into that animation's frame list, not the global list.
    pub current_frame: usize,
    /// Whether the object changes its appearance every frame.
    pub animated: bool,
}

impl AnimationState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a frame, or insert it at `at` when given. Returns the index
    /// the frame landed at.
    pub fn add_frame(&mut self, frame: Frame, at: Option<usize>) -> usize {
        match at {
            Some(i) if i < self.frames.len() => {
                self.frames.insert(i, frame);
                i
            }
            _ => {
                self.frames.push(frame);
                self.frames.len() - 1
            }
        }
    }

    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    pub fn frame(&self, index: usize) -> Result<&Frame, EngineError> {
        self.frames.get(index).ok_or(EngineError::FrameOutOfRange {
            index,
            len: self.frames.len(),
        })
    }

    /// Register a named animation as a list of frame indices. Calling again
    /// with the same name appends to the existing list. `multiplier`
    /// repeats each entry that many times, slowing the animation down.
    pub fn add_animation(&mut self, name: impl Into<String>, frames: &[usize], multiplier: Option<usize>) {
        let list: Vec<usize> = match multiplier {
            Some(m) => frames.iter().flat_map(|&f| std::iter::repeat(f).take(m)).collect(),
            None => frames.to_vec(),
        };
        self.animations.entry(name.into()).or_default().extend(list);
    }

    /// Remove a named animation. Unknown names are harmless.
    pub fn remove_animation(&mut self, name: &str) {
        self.animations.remove(name);
    }

    /// Start playing a named animation, or the whole frame list when `name`
    /// is `None`. Re-playing the active animation is a no-op unless a
    /// specific `start_frame` is requested.
    pub fn play(&mut self, name: Option<&str>, start_frame: Option<usize>) -> Result<(), EngineError> {
        if let Some(n) = name {
            if !self.animations.contains_key(n) {
                return Err(EngineError::NoSuchAnimation(n.to_string()));
            }
        }

        self.animated = true;
        if name == self.current_animation.as_deref() {
            if let Some(start) = start_frame {
                self.current_frame = start;
            }
        } else {
            self.current_animation = name.map(String::from);
            self.current_frame = start_frame.unwrap_or(0);
        }
        Ok(())
    }

    /// Stop animating. Does not remove any animations.
    pub fn stop(&mut self) {
        self.animated = false;
        self.current_animation = None;
    }

    /// Jump to a specific frame without animating.
    pub fn show_frame(&mut self, index: usize) -> Result<&Frame, EngineError> {
        if index >= self.frames.len() {
            return Err(EngineError::FrameOutOfRange {
                index,
                len: self.frames.len(),
            });
        }
        self.current_frame = index;
        Ok(&self.frames[index])
    }

    /// The frame the object should currently display, resolving the active
    /// animation's indirection. `None` when no frames are loaded.
    pub fn active_frame(&self) -> Option<&Frame> {
        let index = match &self.current_animation {
            Some(name) => *self.animations.get(name)?.get(self.current_frame)?,
            None => self.current_frame,
        };
        self.frames.get(index)
    }

    /// Advance one animation step, wrapping modulo the active frame list.
    /// Returns the newly active frame, or `None` when there is nothing to
    /// animate.
    pub fn advance(&mut self) -> Option<&Frame> {
        if !self.animated || self.frames.is_empty() {
            return None;
        }

        self.current_frame += 1;
        match &self.current_animation {
            Some(name) => {
                let list = self.animations.get(name)?;
                if list.is_empty() {
                    return None;
                }
                self.current_frame %= list.len();
                self.frames.get(list[self.current_frame])
            }
            None => {
                self.current_frame %= self.frames.len();
                self.frames.get(self.current_frame)
            }
        }
    }
}
