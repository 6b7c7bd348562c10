// Sprite sheet loading and slicing
//
// Every animation sheet is a horizontal strip of square cells. Slicing trims
// a transparent gutter off the left edge of each cell and scales the result
// up for display; the simulation only ever sees the per-group frame counts
// and the flattened frame list this module produces.

use std::path::{Path, PathBuf};

use image::imageops::{self, FilterType};
use image::RgbaImage;
use log::{debug, info};

use super::AssetError;

/// Source cell size of every sheet, in pixels
pub const FRAME_CELL: u32 = 128;

/// Transparent gutter trimmed from the left edge of each cell
pub const FRAME_TRIM: u32 = 4;

/// Display scale applied after slicing
pub const FRAME_SCALE: u32 = 2;

/// Width of a sliced frame after trim and scale
pub const FRAME_WIDTH: u32 = (FRAME_CELL - FRAME_TRIM) * FRAME_SCALE;

/// Height of a sliced frame after scale
pub const FRAME_HEIGHT: u32 = FRAME_CELL * FRAME_SCALE;

/// Frames sliced from a list of sheet groups.
///
/// `counts[i]` is the total number of frames the i-th group contributed;
/// `frames` is the flattened list in group order.
pub struct SlicedGroups {
    pub counts: Vec<usize>,
    pub frames: Vec<RgbaImage>,
}

/// Resolves sheet names under a base directory and slices them into frames
pub struct SheetLibrary {
    base: PathBuf,
}

impl SheetLibrary {
    pub fn new<P: AsRef<Path>>(base: P) -> Self {
        Self {
            base: base.as_ref().to_path_buf(),
        }
    }

    /// Load a whole image without slicing (backgrounds)
    pub fn load_image(&self, name: &str) -> Result<RgbaImage, AssetError> {
        let path = self.base.join(name);
        if !path.exists() {
            return Err(AssetError::NotFound(name.to_string()));
        }
        let img = image::open(&path).map_err(|source| AssetError::Decode {
            path: path.to_string_lossy().to_string(),
            source,
        })?;
        Ok(img.to_rgba8())
    }

    /// Load and slice an ordered list of sheet groups.
    ///
    /// Each group is a list of sheet names under `dir`; an empty group yields
    /// a zero count (that animation does not exist for this character class).
    pub fn slice_groups(&self, dir: &str, groups: &[&[&str]]) -> Result<SlicedGroups, AssetError> {
        let mut counts = Vec::with_capacity(groups.len());
        let mut frames = Vec::new();

        for group in groups {
            let mut group_count = 0;
            for name in *group {
                let sheet = self.load_image(&format!("{}/{}", dir, name))?;
                let sliced = slice_sheet(&sheet);
                debug!("sliced {}/{}: {} frames", dir, name, sliced.len());
                group_count += sliced.len();
                frames.extend(sliced);
            }
            counts.push(group_count);
        }

        info!("loaded {}: {} frames total", dir, frames.len());
        Ok(SlicedGroups { counts, frames })
    }
}

/// Slice one horizontal strip into trimmed, scaled frames
pub fn slice_sheet(sheet: &RgbaImage) -> Vec<RgbaImage> {
    let cells = sheet.width() / FRAME_CELL;
    let mut frames = Vec::with_capacity(cells as usize);

    for i in 0..cells {
        let cell = imageops::crop_imm(
            sheet,
            i * FRAME_CELL + FRAME_TRIM,
            0,
            FRAME_CELL - FRAME_TRIM,
            FRAME_CELL,
        )
        .to_image();
        frames.push(imageops::resize(
            &cell,
            FRAME_WIDTH,
            FRAME_HEIGHT,
            FilterType::Nearest,
        ));
    }

    frames
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strip(cells: u32) -> RgbaImage {
        RgbaImage::new(cells * FRAME_CELL, FRAME_CELL)
    }

    #[test]
    fn test_slice_counts_follow_sheet_width() {
        assert_eq!(slice_sheet(&strip(1)).len(), 1);
        assert_eq!(slice_sheet(&strip(6)).len(), 6);
    }

    #[test]
    fn test_partial_trailing_cell_is_dropped() {
        let sheet = RgbaImage::new(2 * FRAME_CELL + 60, FRAME_CELL);
        assert_eq!(slice_sheet(&sheet).len(), 2);
    }

    #[test]
    fn test_sliced_frame_dimensions() {
        let frames = slice_sheet(&strip(3));
        for frame in &frames {
            assert_eq!(frame.width(), FRAME_WIDTH);
            assert_eq!(frame.height(), FRAME_HEIGHT);
        }
        assert_eq!(FRAME_WIDTH, 248);
        assert_eq!(FRAME_HEIGHT, 256);
    }

    #[test]
    fn test_missing_sheet_is_fatal() {
        let library = SheetLibrary::new("definitely/not/a/directory");
        let err = library.load_image("ghost.png").unwrap_err();
        assert!(matches!(err, AssetError::NotFound(_)));
    }
}
