// core/math.rs
//
// Rectangles and Y-down vector helpers over glam::Vec2.
//
// Screen coordinates grow downward, so `angle_deg`/`rotated_deg` describe
// rotations that look clockwise on screen, and `vector_from_angle` flips
// the Y component to keep "up is negative" intuitive for callers working
// in degrees.

use glam::Vec2;

use crate::api::types::EngineError;

/// An axis-aligned rectangle with Y growing downward.
///
/// Overlap tests are edge-inclusive: two rects sharing an edge count as
/// overlapping. Callers that need strict containment should shrink one side.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    /// Top-left corner.
    pub min: Vec2,
    /// Bottom-right corner.
    pub max: Vec2,
}

impl Rect {
    /// Create from a top-left corner and a size.
    pub fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            min: Vec2::new(left, top),
            max: Vec2::new(left + width, top + height),
        }
    }

    /// Create from a center point and a full size.
    pub fn from_center(center: Vec2, size: Vec2) -> Self {
        let half = size / 2.0;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    pub fn left(&self) -> f32 {
        self.min.x
    }

    pub fn right(&self) -> f32 {
        self.max.x
    }

    pub fn top(&self) -> f32 {
        self.min.y
    }

    pub fn bottom(&self) -> f32 {
        self.max.y
    }

    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }

    pub fn center(&self) -> Vec2 {
        (self.min + self.max) / 2.0
    }

    /// Edge-inclusive overlap test.
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.min.x <= other.max.x
            && self.max.x >= other.min.x
            && self.min.y <= other.max.y
            && self.max.y >= other.min.y
    }

    /// Edge-inclusive point containment.
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
    }

    /// Smallest rect covering both `self` and `other`.
    pub fn union(&self, other: &Rect) -> Rect {
        Rect {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    pub fn translated(&self, offset: Vec2) -> Rect {
        Rect {
            min: self.min + offset,
            max: self.max + offset,
        }
    }
}

/// Sign of a number: 1.0 for positive, -1.0 for negative, 0.0 for zero.
#[inline]
pub fn sign(x: f32) -> f32 {
    if x == 0.0 {
        0.0
    } else if x > 0.0 {
        1.0
    } else {
        -1.0
    }
}

/// A unit vector pointing at `deg` degrees, with Y flipped so that
/// 90 degrees points "up" on a Y-down screen.
pub fn vector_from_angle(deg: f32) -> Vec2 {
    let rad = deg.to_radians();
    Vec2::new(rad.cos(), -rad.sin())
}

/// Degree-based helpers on `Vec2` for the Y-down coordinate system.
pub trait Vec2Ext {
    /// The direction this vector points, in degrees (`atan2(y, x)`).
    fn angle_deg(self) -> f32;
    /// This vector rotated by `deg` degrees around the origin.
    /// With Y growing downward, positive rotation is visually clockwise.
    fn rotated_deg(self, deg: f32) -> Vec2;
    /// This vector rotated 90 degrees: `(-y, x)`.
    fn perpendicular(self) -> Vec2;
    /// Unit-length copy, or `EngineError::ZeroLengthVector` for the zero
    /// vector.
    fn try_normalized(self) -> Result<Vec2, EngineError>;
}

impl Vec2Ext for Vec2 {
    fn angle_deg(self) -> f32 {
        self.y.atan2(self.x).to_degrees()
    }

    fn rotated_deg(self, deg: f32) -> Vec2 {
        let r = deg.to_radians();
        let (sin, cos) = r.sin_cos();
        Vec2::new(self.x * cos - self.y * sin, self.x * sin + self.y * cos)
    }

    fn perpendicular(self) -> Vec2 {
        Vec2::new(-self.y, self.x)
    }

    fn try_normalized(self) -> Result<Vec2, EngineError> {
        let len = self.length();
        if len == 0.0 {
            return Err(EngineError::ZeroLengthVector);
        }
        Ok(self / len)
    }
}
