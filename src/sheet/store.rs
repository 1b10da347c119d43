//! Index grids and frame windowing
//!
//! [`IndexGrid`] backs both the full spritesheet store and the editable
//! canvas. Frame windowing copies one animation frame's rectangle between
//! the two; windows that overhang the sheet edge are clipped rather than
//! rejected, because hand-authored animation metadata routinely overhangs.

use super::animation::SheetAnimation;

/// A 2-D grid of palette indices, row-major
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexGrid {
    pub width: usize,
    pub height: usize,
    /// Palette index for each cell (row-major order)
    pub indices: Vec<u32>,
}

impl IndexGrid {
    /// Create a grid filled with index 0
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            indices: vec![0; width * height],
        }
    }

    /// Index at cell coordinates, 0 when out of bounds
    pub fn get(&self, x: usize, y: usize) -> u32 {
        if x < self.width && y < self.height {
            self.indices[y * self.width + x]
        } else {
            0
        }
    }

    /// Set the index at cell coordinates, ignored when out of bounds
    pub fn set(&mut self, x: usize, y: usize, index: u32) {
        if x < self.width && y < self.height {
            self.indices[y * self.width + x] = index;
        }
    }

    /// Fill every cell with a single index
    pub fn fill(&mut self, index: u32) {
        for cell in &mut self.indices {
            *cell = index;
        }
    }

    /// Copy one frame's window out of this grid
    ///
    /// The result is always frame_width x frame_height; cells whose source
    /// lies outside the grid stay at index 0.
    pub fn extract_frame(&self, anim: &SheetAnimation, frame: usize) -> IndexGrid {
        let mut out = IndexGrid::new(anim.frame_width as usize, anim.frame_height as usize);
        let origin_x = anim.pos_x as i64 + frame as i64 * anim.frame_width as i64;
        let origin_y = anim.pos_y as i64;

        for y in 0..out.height {
            for x in 0..out.width {
                let sx = origin_x + x as i64;
                let sy = origin_y + y as i64;
                if sx >= 0 && sy >= 0 && (sx as usize) < self.width && (sy as usize) < self.height {
                    out.set(x, y, self.get(sx as usize, sy as usize));
                }
            }
        }
        out
    }

    /// Copy a frame grid back into this grid's window
    ///
    /// The inverse of [`extract_frame`](Self::extract_frame), clipped
    /// identically; cells outside the window are untouched.
    pub fn commit_frame(&mut self, anim: &SheetAnimation, frame: usize, grid: &IndexGrid) {
        let origin_x = anim.pos_x as i64 + frame as i64 * anim.frame_width as i64;
        let origin_y = anim.pos_y as i64;

        for y in 0..anim.frame_height as usize {
            for x in 0..anim.frame_width as usize {
                let sx = origin_x + x as i64;
                let sy = origin_y + y as i64;
                if sx >= 0 && sy >= 0 && (sx as usize) < self.width && (sy as usize) < self.height {
                    self.set(sx as usize, sy as usize, grid.get(x, y));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn anim(pos_x: i32, pos_y: i32, w: u32, h: u32, count: usize) -> SheetAnimation {
        SheetAnimation {
            name: "test".to_string(),
            pos_x,
            pos_y,
            frame_width: w,
            frame_height: h,
            frame_count: count,
            frame_wait: 0.2,
        }
    }

    #[test]
    fn test_get_set_and_bounds() {
        let mut grid = IndexGrid::new(4, 3);
        grid.set(2, 1, 7);
        assert_eq!(grid.get(2, 1), 7);

        // Out of bounds is a silent no-op / zero read
        grid.set(10, 10, 9);
        assert_eq!(grid.get(10, 10), 0);
    }

    #[test]
    fn test_windowing_round_trip() {
        let mut store = IndexGrid::new(8, 4);
        let geom = anim(2, 1, 2, 2, 3);

        let mut frame = IndexGrid::new(2, 2);
        frame.set(0, 0, 1);
        frame.set(1, 0, 2);
        frame.set(0, 1, 3);
        frame.set(1, 1, 4);

        for i in 0..3 {
            store.commit_frame(&geom, i, &frame);
            assert_eq!(store.extract_frame(&geom, i), frame);
        }
    }

    #[test]
    fn test_frames_advance_horizontally() {
        let mut store = IndexGrid::new(6, 2);
        let geom = anim(0, 0, 2, 2, 3);

        let mut frame = IndexGrid::new(2, 2);
        frame.fill(5);
        store.commit_frame(&geom, 1, &frame);

        // Only the second frame's columns were written
        assert_eq!(store.get(1, 0), 0);
        assert_eq!(store.get(2, 0), 5);
        assert_eq!(store.get(3, 1), 5);
        assert_eq!(store.get(4, 0), 0);
    }

    #[test]
    fn test_extract_clips_at_sheet_edge() {
        let mut store = IndexGrid::new(4, 4);
        store.fill(9);
        // 3x3 window whose origin pushes it past the right edge
        let geom = anim(2, 2, 3, 3, 2);

        let frame = store.extract_frame(&geom, 0);
        assert_eq!(frame.width, 3);
        assert_eq!(frame.height, 3);
        // In-bounds corner reads through, overhang reads 0
        assert_eq!(frame.get(0, 0), 9);
        assert_eq!(frame.get(1, 1), 9);
        assert_eq!(frame.get(2, 0), 0);
        assert_eq!(frame.get(0, 2), 0);
    }

    #[test]
    fn test_commit_clips_and_preserves_outside() {
        let mut store = IndexGrid::new(4, 4);
        store.fill(1);
        let geom = anim(3, 0, 2, 2, 1);

        let mut frame = IndexGrid::new(2, 2);
        frame.fill(8);
        store.commit_frame(&geom, 0, &frame);

        // Only the single in-bounds column was written
        assert_eq!(store.get(3, 0), 8);
        assert_eq!(store.get(3, 1), 8);
        assert_eq!(store.get(2, 0), 1);
        assert_eq!(store.get(0, 0), 1);
    }

    #[test]
    fn test_negative_origin_clips() {
        let mut store = IndexGrid::new(4, 4);
        store.set(0, 0, 6);
        let geom = anim(-1, -1, 2, 2, 1);

        let frame = store.extract_frame(&geom, 0);
        assert_eq!(frame.get(0, 0), 0);
        assert_eq!(frame.get(1, 1), 6);
    }
}
