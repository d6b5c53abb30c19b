//! Quadtree broad-phase for collision queries.
//!
//! Built fresh from object bounding rects each time collision runs, then
//! queried once per collidable object. Items that straddle a node's center
//! on both axes stay at that node; everything else is pushed into every
//! child quadrant it touches, so a query may report the same ID through
//! several branches and `hit` deduplicates.

use std::collections::HashSet;

use glam::Vec2;

use crate::api::types::EntityId;
use crate::core::math::Rect;

/// Default subdivision depth. Eight levels is plenty for the object counts
/// the scene is designed around.
pub const DEFAULT_DEPTH: u32 = 8;

pub struct QuadTree {
    bounds: Rect,
    items: Vec<(EntityId, Rect)>,
    children: [Option<Box<QuadTree>>; 4],
}

/// Which child quadrants a rect touches, measured edge-inclusively
/// against the node's center lines.
fn quadrants(rect: &Rect, center: Vec2) -> [bool; 4] {
    let west = rect.left() <= center.x;
    let east = rect.right() >= center.x;
    let north = rect.top() <= center.y;
    let south = rect.bottom() >= center.y;
    // nw, ne, sw, se
    [west && north, east && north, west && south, east && south]
}

impl QuadTree {
    /// Build a tree over `items`. When `bounds` is `None` the tree covers
    /// the union of all item rects.
    pub fn build(items: Vec<(EntityId, Rect)>, depth: u32, bounds: Option<Rect>) -> Self {
        let bounds = bounds.unwrap_or_else(|| {
            let mut it = items.iter();
            match it.next() {
                Some((_, first)) => it.fold(*first, |acc, (_, r)| acc.union(r)),
                None => Rect::default(),
            }
        });

        let mut node = Self {
            bounds,
            items: Vec::new(),
            children: [None, None, None, None],
        };

        if depth == 0 {
            node.items = items;
            return node;
        }

        let center = bounds.center();
        let mut buckets: [Vec<(EntityId, Rect)>; 4] =
            [Vec::new(), Vec::new(), Vec::new(), Vec::new()];

        for (id, rect) in items {
            let q = quadrants(&rect, center);
            if q == [true; 4] {
                // Straddles both center lines, belongs to this node.
                node.items.push((id, rect));
            } else {
                for (i, touches) in q.iter().enumerate() {
                    if *touches {
                        buckets[i].push((id, rect));
                    }
                }
            }
        }

        let quads = [
            Rect {
                min: bounds.min,
                max: center,
            },
            Rect {
                min: Vec2::new(center.x, bounds.top()),
                max: Vec2::new(bounds.right(), center.y),
            },
            Rect {
                min: Vec2::new(bounds.left(), center.y),
                max: Vec2::new(center.x, bounds.bottom()),
            },
            Rect {
                min: center,
                max: bounds.max,
            },
        ];

        for (i, bucket) in buckets.into_iter().enumerate() {
            if !bucket.is_empty() {
                node.children[i] = Some(Box::new(Self::build(bucket, depth - 1, Some(quads[i]))));
            }
        }

        node
    }

    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// All item IDs whose rect overlaps `rect`, deduplicated and sorted.
    pub fn hit(&self, rect: &Rect) -> Vec<EntityId> {
        let mut found = HashSet::new();
        self.collect_hits(rect, &mut found);
        let mut ids: Vec<EntityId> = found.into_iter().collect();
        ids.sort();
        ids
    }

    fn collect_hits(&self, rect: &Rect, found: &mut HashSet<EntityId>) {
        for (id, item) in &self.items {
            if item.overlaps(rect) {
                found.insert(*id);
            }
        }
        let q = quadrants(rect, self.bounds.center());
        for (i, touches) in q.iter().enumerate() {
            if *touches {
                if let Some(child) = &self.children[i] {
                    child.collect_hits(rect, found);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect(x: f32, y: f32, w: f32, h: f32) -> Rect {
        Rect::new(x, y, w, h)
    }

    #[test]
    fn finds_overlapping_items() {
        let items = vec![
            (EntityId(1), rect(0.0, 0.0, 10.0, 10.0)),
            (EntityId(2), rect(50.0, 50.0, 10.0, 10.0)),
            (EntityId(3), rect(5.0, 5.0, 10.0, 10.0)),
        ];
        let tree = QuadTree::build(items, DEFAULT_DEPTH, Some(rect(0.0, 0.0, 100.0, 100.0)));

        let hits = tree.hit(&rect(2.0, 2.0, 6.0, 6.0));
        assert_eq!(hits, vec![EntityId(1), EntityId(3)]);
    }

    #[test]
    fn straddling_item_is_reported_once() {
        // Covers the center of the root node: lives at the root, touched by
        // queries into every quadrant.
        let items = vec![(EntityId(7), rect(40.0, 40.0, 20.0, 20.0))];
        let tree = QuadTree::build(items, DEFAULT_DEPTH, Some(rect(0.0, 0.0, 100.0, 100.0)));

        let hits = tree.hit(&rect(0.0, 0.0, 100.0, 100.0));
        assert_eq!(hits, vec![EntityId(7)]);
    }

    #[test]
    fn empty_tree_reports_nothing() {
        let tree = QuadTree::build(Vec::new(), DEFAULT_DEPTH, None);
        assert!(tree.hit(&rect(0.0, 0.0, 10.0, 10.0)).is_empty());
    }

    #[test]
    fn bounds_default_to_item_union() {
        let items = vec![
            (EntityId(1), rect(-20.0, 0.0, 10.0, 10.0)),
            (EntityId(2), rect(30.0, 40.0, 10.0, 10.0)),
        ];
        let tree = QuadTree::build(items, DEFAULT_DEPTH, None);
        assert_eq!(tree.bounds().left(), -20.0);
        assert_eq!(tree.bounds().bottom(), 50.0);
    }

    #[test]
    fn touching_edges_count_as_hits() {
        let items = vec![(EntityId(1), rect(10.0, 10.0, 10.0, 10.0))];
        let tree = QuadTree::build(items, DEFAULT_DEPTH, Some(rect(0.0, 0.0, 100.0, 100.0)));
        assert_eq!(tree.hit(&rect(20.0, 10.0, 5.0, 5.0)), vec![EntityId(1)]);
        assert!(tree.hit(&rect(20.1, 10.0, 5.0, 5.0)).is_empty());
    }

    // Simple xorshift so the stress test is deterministic.
    struct Rng(u64);
    impl Rng {
        fn next_f32(&mut self) -> f32 {
            self.0 ^= self.0 << 13;
            self.0 ^= self.0 >> 7;
            self.0 ^= self.0 << 17;
            (self.0 >> 40) as f32 / (1u64 << 24) as f32
        }
    }

    #[test]
    fn matches_brute_force_on_random_rects() {
        let mut rng = Rng(0x2545F4914F6CDD1D);
        let mut items = Vec::new();
        for i in 0..200 {
            let x = rng.next_f32() * 900.0;
            let y = rng.next_f32() * 900.0;
            let w = 5.0 + rng.next_f32() * 60.0;
            let h = 5.0 + rng.next_f32() * 60.0;
            items.push((EntityId(i), rect(x, y, w, h)));
        }
        let tree = QuadTree::build(items.clone(), DEFAULT_DEPTH, Some(rect(0.0, 0.0, 1000.0, 1000.0)));

        for _ in 0..50 {
            let q = rect(
                rng.next_f32() * 900.0,
                rng.next_f32() * 900.0,
                rng.next_f32() * 100.0,
                rng.next_f32() * 100.0,
            );
            let mut expected: Vec<EntityId> = items
                .iter()
                .filter(|(_, r)| r.overlaps(&q))
                .map(|(id, _)| *id)
                .collect();
            expected.sort();
            assert_eq!(tree.hit(&q), expected);
        }
    }
}
