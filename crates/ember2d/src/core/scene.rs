use std::collections::VecDeque;

use crate::api::types::{EntityId, LifecycleEvent};
use crate::components::object::GameObject;

/// Flat game object storage. Insertion order is draw order, so removal
/// preserves ordering instead of swapping from the back.
/// Designed for small-to-medium object counts (hundreds, not millions).
pub struct Scene {
    objects: Vec<GameObject>,
    next_id: u32,
    recycled: VecDeque<EntityId>,
    events: Vec<(EntityId, LifecycleEvent)>,
}

impl Scene {
    pub fn new() -> Self {
        Self::with_capacity(256)
    }

    /// Create a scene with a specific object capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            objects: Vec::with_capacity(capacity),
            next_id: 1,
            recycled: VecDeque::new(),
            events: Vec::new(),
        }
    }

    /// Generate the next unique object ID.
    pub fn next_id(&mut self) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Add an object to the scene, drawing on top of everything added
    /// before it. Returns its ID.
    pub fn spawn(&mut self, object: GameObject) -> EntityId {
        let id = object.id;
        self.objects.push(object);
        self.events.push((id, LifecycleEvent::Spawned));
        id
    }

    /// Remove an object entirely. Its children are detached first and stay
    /// in the scene as roots. Returns the removed object if found.
    pub fn despawn(&mut self, id: EntityId) -> Option<GameObject> {
        self.detach_children(id);
        self.detach(id);
        let idx = self.objects.iter().position(|o| o.id == id)?;
        // Keep draw order stable for everything behind the removed object.
        let removed = self.objects.remove(idx);
        self.recycled.retain(|&r| r != id);
        self.events.push((id, LifecycleEvent::Despawned));
        Some(removed)
    }

    /// Kill an object: it stops updating and drawing but stays in the scene
    /// for recycling. Children are detached and live on as roots.
    pub fn kill(&mut self, id: EntityId) {
        self.detach_children(id);
        let Some(obj) = self.get_mut(id) else { return };
        if !obj.alive {
            return;
        }
        obj.kill();
        self.recycled.push_back(id);
        self.events.push((id, LifecycleEvent::Killed));
    }

    /// Revive a previously killed object for reuse, oldest kill first.
    /// Returns the revived ID, or `None` when no dead object is available.
    pub fn acquire_recycled(&mut self) -> Option<EntityId> {
        while let Some(id) = self.recycled.pop_front() {
            if let Some(obj) = self.get_mut(id) {
                obj.revive();
                return Some(id);
            }
        }
        None
    }

    /// Get a reference to an object by ID.
    pub fn get(&self, id: EntityId) -> Option<&GameObject> {
        self.objects.iter().find(|o| o.id == id)
    }

    /// Get a mutable reference to an object by ID.
    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut GameObject> {
        self.objects.iter_mut().find(|o| o.id == id)
    }

    /// Iterate over all objects in draw order.
    pub fn iter(&self) -> impl Iterator<Item = &GameObject> {
        self.objects.iter()
    }

    /// Iterate over all objects mutably.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut GameObject> {
        self.objects.iter_mut()
    }

    /// Find the first object with the given name.
    pub fn find_by_name(&self, name: &str) -> Option<&GameObject> {
        self.objects.iter().find(|o| o.name == name)
    }

    /// Find the first object with the given name (mutable).
    pub fn find_by_name_mut(&mut self, name: &str) -> Option<&mut GameObject> {
        self.objects.iter_mut().find(|o| o.name == name)
    }

    /// Number of objects in the scene, dead ones included.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Whether the scene is empty.
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Clear all objects and pending events. ID numbering keeps counting.
    pub fn clear(&mut self) {
        self.objects.clear();
        self.recycled.clear();
        self.events.clear();
    }

    // -- Draw order --

    /// Move an object to the front of the draw order (drawn last, on top).
    pub fn to_front(&mut self, id: EntityId) {
        if let Some(idx) = self.objects.iter().position(|o| o.id == id) {
            let obj = self.objects.remove(idx);
            self.objects.push(obj);
        }
    }

    /// Move an object to the back of the draw order (drawn first). For a
    /// backdrop, also pin it with a zero scroll factor.
    pub fn to_back(&mut self, id: EntityId) {
        if let Some(idx) = self.objects.iter().position(|o| o.id == id) {
            let obj = self.objects.remove(idx);
            self.objects.insert(0, obj);
        }
    }

    // -- Hierarchy --

    /// Attach `child` to `parent`. The child's position becomes an offset
    /// from the parent at render time; its world position is unchanged.
    /// Self-attachment and unknown IDs are ignored.
    pub fn attach(&mut self, parent: EntityId, child: EntityId) {
        if parent == child || self.get(parent).is_none() || self.get(child).is_none() {
            return;
        }
        self.detach(child);
        if let Some(p) = self.get_mut(parent) {
            p.add_child_link(child);
        }
        if let Some(c) = self.get_mut(child) {
            c.set_parent_link(Some(parent));
        }
    }

    /// Detach `child` from its parent, making it a root again.
    pub fn detach(&mut self, child: EntityId) {
        let Some(parent) = self.get(child).and_then(|c| c.parent()) else {
            return;
        };
        if let Some(p) = self.get_mut(parent) {
            p.remove_child_link(child);
        }
        if let Some(c) = self.get_mut(child) {
            c.set_parent_link(None);
        }
    }

    fn detach_children(&mut self, id: EntityId) {
        let children = match self.get_mut(id) {
            Some(obj) => obj.take_children(),
            None => return,
        };
        for child in children {
            if let Some(c) = self.get_mut(child) {
                c.set_parent_link(None);
            }
        }
    }

    /// World position of an object's parent, when it has one.
    pub fn parent_position(&self, id: EntityId) -> Option<glam::Vec2> {
        let parent = self.get(id)?.parent()?;
        Some(self.get(parent)?.position())
    }

    // -- Lifecycle events --

    /// Take the lifecycle events accumulated since the last drain, in the
    /// order they happened.
    pub fn drain_events(&mut self) -> Vec<(EntityId, LifecycleEvent)> {
        std::mem::take(&mut self.events)
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}
