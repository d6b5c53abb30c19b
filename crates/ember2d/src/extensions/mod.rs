// extensions/mod.rs
//
// Optional extension modules.
// Decoupled from the core scene and objects — games opt in by creating
// these systems and feeding them dt.

pub mod tween;
pub mod tweenfunc;

pub use tween::{CompletionPolicy, Tween, TweenHolder};
pub use tweenfunc::{lerp, TweenFunction, TweenValue};
