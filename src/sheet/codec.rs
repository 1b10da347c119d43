//! Sheet image load/save through the palette
//!
//! Loading decodes a raster file to RGBA, derives the palette, and indexes
//! every pixel; everything is built into fresh values so a failed load
//! leaves the caller's state untouched. Saving reconstitutes the full
//! store back to RGBA through the palette and overwrites the source path.

use std::path::Path;

use image::RgbaImage;

use super::palette::{Palette, Rgba};
use super::store::IndexGrid;

/// Error type for sheet image I/O
#[derive(Debug)]
pub enum SheetError {
    Io(std::io::Error),
    Image(image::ImageError),
}

impl From<std::io::Error> for SheetError {
    fn from(e: std::io::Error) -> Self {
        SheetError::Io(e)
    }
}

impl From<image::ImageError> for SheetError {
    fn from(e: image::ImageError) -> Self {
        SheetError::Image(e)
    }
}

impl std::fmt::Display for SheetError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SheetError::Io(e) => write!(f, "IO error: {}", e),
            SheetError::Image(e) => write!(f, "image error: {}", e),
        }
    }
}

impl std::error::Error for SheetError {}

/// Decode an image file into a palette and an indexed store
pub fn load_sheet(path: &Path) -> Result<(Palette, IndexGrid), SheetError> {
    let img = image::open(path)?.to_rgba8();
    let (width, height) = img.dimensions();

    // Row-major pixel enumeration; palette order depends on it
    let pixels: Vec<Rgba> = img
        .pixels()
        .map(|p| Rgba::new(p[0], p[1], p[2], p[3]))
        .collect();

    let palette = Palette::build(&pixels);
    let mut store = IndexGrid::new(width as usize, height as usize);
    for (cell, px) in store.indices.iter_mut().zip(&pixels) {
        *cell = palette.index_of(*px);
    }

    Ok((palette, store))
}

/// Encode the full store back to pixels and write it to `path`
///
/// The output format follows the path's extension, same as the load side.
pub fn save_sheet(path: &Path, store: &IndexGrid, palette: &Palette) -> Result<(), SheetError> {
    let mut img = RgbaImage::new(store.width as u32, store.height as u32);
    for y in 0..store.height {
        for x in 0..store.width {
            let c = palette.color_of(store.get(x, y));
            img.put_pixel(x as u32, y as u32, image::Rgba([c.r, c.g, c.b, c.a]));
        }
    }
    img.save(path)?;
    Ok(())
}
