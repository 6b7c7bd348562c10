// Asset loading
//
// Sprite sheets are the only asset class in the game. They are loaded and
// sliced once at startup; a failure here is fatal, because the frame-index
// tables the simulation is built on cannot be produced from a partial load.

pub mod sheet;

pub use sheet::{SheetLibrary, SlicedGroups};

/// Asset loading errors
#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("sprite sheet not found: {0}")]
    NotFound(String),

    #[error("failed to decode {path}: {source}")]
    Decode {
        path: String,
        #[source]
        source: image::ImageError,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_asset_error_display() {
        let err = AssetError::NotFound("kunoichi/idle.png".to_string());
        assert_eq!(err.to_string(), "sprite sheet not found: kunoichi/idle.png");
    }
}
