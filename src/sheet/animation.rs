//! Animation sequence geometry parsed from sheet metadata
//!
//! Each spritesheet ships with a metadata file describing its animations as
//! `RectAnimation` records: a named horizontal strip of fixed-size frames
//! at some position inside the sheet, plus playback timing. Metadata files
//! are third-party input, so one malformed record is skipped with a
//! diagnostic rather than failing the whole file.

use crate::nxml::Element;

/// Default seconds per frame when a record does not declare `frame_wait`
pub const DEFAULT_FRAME_WAIT: f32 = 0.2;

/// Position, frame size, frame count and timing of one named animation
#[derive(Debug, Clone, PartialEq)]
pub struct SheetAnimation {
    pub name: String,
    /// Top-left of the first frame in sheet coordinates
    pub pos_x: i32,
    pub pos_y: i32,
    pub frame_width: u32,
    pub frame_height: u32,
    pub frame_count: usize,
    /// Seconds between frames during playback
    pub frame_wait: f32,
}

impl SheetAnimation {
    /// Parse every standalone animation out of a metadata tree, in
    /// document order
    ///
    /// Records carrying a `parent` or `state` attribute are derived/meta
    /// records that define no standalone frame geometry and are excluded.
    /// Records without a usable `name` or with malformed numeric attributes
    /// are skipped individually.
    pub fn parse_all(root: &Element) -> Vec<SheetAnimation> {
        let candidates: Vec<&Element> = root
            .children
            .iter()
            .filter(|e| {
                e.name == "RectAnimation" && e.attr("parent").is_none() && e.attr("state").is_none()
            })
            .collect();

        let Some((default_w, default_h)) = default_dimensions(root, &candidates) else {
            return Vec::new();
        };

        let mut animations = Vec::new();
        for record in candidates {
            let Some(name) = record.attr("name") else {
                continue;
            };
            match parse_record(record, name, default_w, default_h) {
                Ok(anim) => animations.push(anim),
                Err(err) => {
                    eprintln!("Skipping animation record '{}': {}", name, err);
                }
            }
        }
        animations
    }
}

/// Resolve the frame dimensions used as defaults for records that omit
/// their own
///
/// Preferred source is the record named by the root's `default_animation`
/// attribute; a record that is missing or has malformed dimensions falls
/// back to the first candidate declaring both dimensions with valid values.
/// Returns None when no record can supply dimensions, which disables
/// animations for the sheet.
fn default_dimensions(root: &Element, candidates: &[&Element]) -> Option<(u32, u32)> {
    if let Some(default_name) = root.attr("default_animation") {
        if let Some(record) = candidates
            .iter()
            .find(|r| r.attr("name") == Some(default_name))
        {
            if let Some(dims) = declared_dimensions(record) {
                return Some(dims);
            }
        }
    }
    candidates.iter().find_map(|r| declared_dimensions(r))
}

fn declared_dimensions(record: &Element) -> Option<(u32, u32)> {
    let w = record.attr("frame_width")?.parse::<u32>().ok()?;
    let h = record.attr("frame_height")?.parse::<u32>().ok()?;
    if w == 0 || h == 0 {
        return None;
    }
    Some((w, h))
}

fn parse_record(
    record: &Element,
    name: &str,
    default_w: u32,
    default_h: u32,
) -> Result<SheetAnimation, String> {
    let pos_x = attr_or(record, "pos_x", 0i32)?;
    let pos_y = attr_or(record, "pos_y", 0i32)?;
    let frame_width = attr_or(record, "frame_width", default_w)?;
    let frame_height = attr_or(record, "frame_height", default_h)?;
    let frame_count = attr_or(record, "frame_count", 1usize)?;
    let frame_wait = attr_or(record, "frame_wait", DEFAULT_FRAME_WAIT)?;

    if frame_width == 0 || frame_height == 0 {
        return Err("frame dimensions must be positive".to_string());
    }
    if frame_count == 0 {
        return Err("frame_count must be at least 1".to_string());
    }
    if frame_wait <= 0.0 {
        return Err("frame_wait must be positive".to_string());
    }

    Ok(SheetAnimation {
        name: name.to_string(),
        pos_x,
        pos_y,
        frame_width,
        frame_height,
        frame_count,
        frame_wait,
    })
}

/// Read a numeric attribute, using `default` when absent and failing the
/// record when present but malformed
fn attr_or<T: std::str::FromStr>(record: &Element, key: &str, default: T) -> Result<T, String> {
    match record.attr(key) {
        None => Ok(default),
        Some(raw) => raw
            .parse::<T>()
            .map_err(|_| format!("bad {} value '{}'", key, raw)),
    }
}
