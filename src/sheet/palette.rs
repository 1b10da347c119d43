//! Palette derivation from source pixels
//!
//! A palette is rebuilt wholesale on every image load and is immutable
//! between loads. It maps small integer indices to RGBA colors and back;
//! the two mappings are exact inverses at all times.

use std::collections::HashMap;

/// An 8-bit RGBA color value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    /// Fully transparent black, the reserved color for palette index 0
    pub const TRANSPARENT: Rgba = Rgba::new(0, 0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn is_transparent(&self) -> bool {
        *self == Self::TRANSPARENT
    }
}

/// Bidirectional index <-> color mapping for one loaded sheet
///
/// Index 0 is reserved for [`Rgba::TRANSPARENT`] when that color occurs in
/// the source pixels; otherwise index 0 is an ordinary color. All other
/// indices are assigned by first occurrence over a row-major enumeration of
/// the source, which makes index assignment reproducible across loads and
/// saves of the same image.
#[derive(Debug, Clone, Default)]
pub struct Palette {
    colors: Vec<Rgba>,
    lookup: HashMap<Rgba, u32>,
}

impl Palette {
    /// Build a palette from source pixels in row-major order
    pub fn build(pixels: &[Rgba]) -> Self {
        let mut colors = Vec::new();
        let mut lookup = HashMap::new();

        // Reserve index 0 for transparent if the image uses it anywhere
        if pixels.iter().any(Rgba::is_transparent) {
            lookup.insert(Rgba::TRANSPARENT, 0);
            colors.push(Rgba::TRANSPARENT);
        }

        for &px in pixels {
            if !lookup.contains_key(&px) {
                lookup.insert(px, colors.len() as u32);
                colors.push(px);
            }
        }

        Self { colors, lookup }
    }

    /// Color for an index, transparent for unknown indices
    ///
    /// Unknown indices are not an error: stale frame windows after a sheet
    /// resize legitimately carry indices the current palette never assigned.
    pub fn color_of(&self, index: u32) -> Rgba {
        self.colors
            .get(index as usize)
            .copied()
            .unwrap_or(Rgba::TRANSPARENT)
    }

    /// Index for a color, 0 for unknown colors
    pub fn index_of(&self, color: Rgba) -> u32 {
        self.lookup.get(&color).copied().unwrap_or(0)
    }

    /// All colors in index order
    pub fn colors(&self) -> &[Rgba] {
        &self.colors
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Rgba = Rgba::new(255, 0, 0, 255);
    const GREEN: Rgba = Rgba::new(0, 255, 0, 255);
    const BLUE: Rgba = Rgba::new(0, 0, 255, 255);

    #[test]
    fn test_round_trip() {
        let pixels = vec![RED, GREEN, BLUE, GREEN, RED];
        let palette = Palette::build(&pixels);

        assert_eq!(palette.len(), 3);
        for &c in &pixels {
            assert_eq!(palette.color_of(palette.index_of(c)), c);
        }
    }

    #[test]
    fn test_injective_over_source_colors() {
        let pixels = vec![RED, GREEN, BLUE];
        let palette = Palette::build(&pixels);

        let mut seen = std::collections::HashSet::new();
        for &c in &pixels {
            assert!(seen.insert(palette.index_of(c)), "index reused");
        }
    }

    #[test]
    fn test_transparent_reserved_at_zero() {
        // Transparent appears late in the enumeration but still owns index 0
        let pixels = vec![RED, GREEN, Rgba::TRANSPARENT, BLUE];
        let palette = Palette::build(&pixels);

        assert_eq!(palette.color_of(0), Rgba::TRANSPARENT);
        assert_eq!(palette.index_of(Rgba::TRANSPARENT), 0);
        assert_eq!(palette.len(), 4);
    }

    #[test]
    fn test_no_transparent_means_index_zero_is_first_color() {
        let pixels = vec![GREEN, RED, GREEN];
        let palette = Palette::build(&pixels);

        assert_eq!(palette.color_of(0), GREEN);
        assert_eq!(palette.index_of(RED), 1);
    }

    #[test]
    fn test_first_occurrence_order_is_deterministic() {
        let pixels = vec![BLUE, RED, BLUE, GREEN, RED];
        let palette = Palette::build(&pixels);

        assert_eq!(palette.index_of(BLUE), 0);
        assert_eq!(palette.index_of(RED), 1);
        assert_eq!(palette.index_of(GREEN), 2);
    }

    #[test]
    fn test_unknown_lookups_have_defaults() {
        let palette = Palette::build(&[RED]);

        assert_eq!(palette.color_of(999), Rgba::TRANSPARENT);
        assert_eq!(palette.index_of(BLUE), 0);
    }
}
