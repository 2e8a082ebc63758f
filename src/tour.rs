use crate::error::{QvizError, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// A single board cell visited by the knight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct Square {
    pub x: u32,
    pub y: u32,
}

/// Knight's tour description as emitted by the training run.
///
/// Coordinates are assumed to lie on the board; the renderer performs no
/// bounds check on them.
#[derive(Debug, Clone, Deserialize)]
pub struct TourData {
    pub board_size: u32,
    pub start: Square,
    pub path: Vec<Square>,
    pub visited_squares: u64,
    pub total_squares: u64,
}

impl TourData {
    /// Reads and parses a tour JSON file.
    ///
    /// # Errors
    /// Returns error if the file cannot be read or does not match the schema.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| QvizError::ReadFile {
            path: path.to_path_buf(),
            source: e,
        })?;
        let data: TourData = serde_json::from_str(&content)?;
        log::debug!(
            "loaded tour: board {n}x{n}, {len} path squares",
            n = data.board_size,
            len = data.path.len()
        );
        Ok(data)
    }

    /// Board completion as a percentage (0..=100 for well-formed input).
    pub fn completion_pct(&self) -> f64 {
        self.visited_squares as f64 / self.total_squares as f64 * 100.0
    }

    /// Two-line title reporting board size and completion to one decimal.
    pub fn title(&self) -> (String, String) {
        (
            format!(
                "Knight's Tour via Q-learning ({n}x{n} board)",
                n = self.board_size
            ),
            format!(
                "Path length: {}/{} ({:.1}% complete)",
                self.visited_squares,
                self.total_squares,
                self.completion_pct()
            ),
        )
    }
}

/// Derives the high-resolution output path: `board.png` -> `board_hq.png`.
///
/// A path without the `.png` suffix is returned unchanged, so the second
/// save overwrites the first. Same behavior as the plain string replace the
/// tool always did.
pub fn hq_output_path(path: &Path) -> PathBuf {
    match path.to_str().and_then(|s| s.strip_suffix(".png")) {
        Some(stem) => PathBuf::from(format!("{stem}_hq.png")),
        None => path.to_path_buf(),
    }
}
