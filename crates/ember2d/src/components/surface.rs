//! Opaque surface handles and pixel masks.
//!
//! The core never decodes images. The host platform layer loads bitmaps,
//! hands out `SurfaceId`s, and blits them when it consumes the draw list.
//! The core only tracks which surface an object shows and how big it is.

use glam::Vec2;

/// Handle to a host-owned bitmap surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SurfaceId(pub u32);

/// One displayable frame: a surface handle plus its size in world units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    pub surface: SurfaceId,
    pub size: Vec2,
}

impl Frame {
    pub fn new(surface: SurfaceId, width: f32, height: f32) -> Self {
        Self {
            surface,
            size: Vec2::new(width, height),
        }
    }
}

/// Per-pixel opacity mask for exact collision tests.
///
/// Anchored at the top-left corner of the owning object's bounding rect.
/// The intersect test is the only operation the collision engine needs;
/// building masks from image alpha is the host's job.
#[derive(Debug, Clone, PartialEq)]
pub struct PixelMask {
    width: u32,
    height: u32,
    bits: Vec<bool>,
}

impl PixelMask {
    /// A fully opaque mask.
    pub fn filled(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            bits: vec![true; (width * height) as usize],
        }
    }

    /// Build a mask by sampling a predicate per pixel.
    pub fn from_fn(width: u32, height: u32, mut opaque: impl FnMut(u32, u32) -> bool) -> Self {
        let mut bits = Vec::with_capacity((width * height) as usize);
        for y in 0..height {
            for x in 0..width {
                bits.push(opaque(x, y));
            }
        }
        Self {
            width,
            height,
            bits,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Whether the pixel at (x, y) is opaque. Out-of-range is transparent.
    pub fn get(&self, x: i32, y: i32) -> bool {
        if x < 0 || y < 0 || x as u32 >= self.width || y as u32 >= self.height {
            return false;
        }
        self.bits[(y as u32 * self.width + x as u32) as usize]
    }

    /// Whether any opaque pixel of `self` coincides with an opaque pixel of
    /// `other`, with `other` offset by `(dx, dy)` relative to `self`.
    pub fn overlaps(&self, other: &PixelMask, dx: i32, dy: i32) -> bool {
        let x_start = dx.max(0);
        let y_start = dy.max(0);
        let x_end = (self.width as i32).min(dx + other.width as i32);
        let y_end = (self.height as i32).min(dy + other.height as i32);

        for y in y_start..y_end {
            for x in x_start..x_end {
                if self.get(x, y) && other.get(x - dx, y - dy) {
                    return true;
                }
            }
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filled_masks_overlap_when_offsets_intersect() {
        let a = PixelMask::filled(4, 4);
        let b = PixelMask::filled(4, 4);
        assert!(a.overlaps(&b, 0, 0));
        assert!(a.overlaps(&b, 3, 3));
        assert!(!a.overlaps(&b, 4, 0), "past the right edge");
        assert!(!a.overlaps(&b, 0, -4), "past the top edge");
    }

    #[test]
    fn sparse_masks_only_overlap_on_opaque_pixels() {
        // Opaque only in the top-left 2x2 corner.
        let corner = PixelMask::from_fn(4, 4, |x, y| x < 2 && y < 2);
        let full = PixelMask::filled(4, 4);
        assert!(corner.overlaps(&full, 0, 0));
        // Offset the full mask past the opaque corner.
        assert!(!corner.overlaps(&full, 2, 2));
        // Two corner masks that miss each other.
        let other = PixelMask::from_fn(4, 4, |x, y| x >= 2 && y >= 2);
        assert!(!corner.overlaps(&other, 0, 0));
    }

    #[test]
    fn out_of_range_is_transparent() {
        let m = PixelMask::filled(2, 2);
        assert!(!m.get(-1, 0));
        assert!(!m.get(0, 2));
        assert!(m.get(1, 1));
    }
}
