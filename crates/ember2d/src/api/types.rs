use thiserror::Error;

/// Unique identifier for a game object in the scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(pub u32);

/// Entity lifecycle notifications produced by the scene for external
/// bookkeeping (object counters, host-side resource cleanup, tests).
/// Emitted paired with the ID of the object concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleEvent {
    Spawned,
    Killed,
    Despawned,
}

/// Highest user-defined event kind accepted by the handler table.
pub const MAX_USER_EVENTS: u32 = 32;

/// Errors surfaced by the engine core.
///
/// Collection-style lookups (quadtree queries, tag searches) return empty
/// results instead of erroring; these variants cover the cases where a
/// single required value is missing or a caller contract is broken.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Normalizing a zero-length vector is undefined; surfaced as an error
    /// instead of propagating NaN.
    #[error("cannot normalize a zero-length vector")]
    ZeroLengthVector,
    /// An animation was requested by a name the object does not have.
    #[error("no animation named `{0}`")]
    NoSuchAnimation(String),
    /// A frame index outside the object's frame list.
    #[error("frame index {index} out of range ({len} frames loaded)")]
    FrameOutOfRange { index: usize, len: usize },
    /// A handler was registered for a user event kind beyond the table size.
    #[error("invalid user event kind {0} (limit {MAX_USER_EVENTS})")]
    InvalidEventKind(u32),
    /// Configuration could not be parsed.
    #[error("malformed config: {0}")]
    Config(#[from] serde_json::Error),
}
