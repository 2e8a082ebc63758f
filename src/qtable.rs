use crate::error::{QvizError, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

/// Value stored for one state in the Q-table JSON.
///
/// Either a ready-made scalar, or the full per-action mapping from which the
/// per-state value is reduced.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum StateValue {
    Scalar(f64),
    Actions(HashMap<String, f64>),
}

impl StateValue {
    /// Reduces the value to a single scalar: the maximum over all actions,
    /// or zero for an empty action map.
    pub fn reduce(&self) -> f64 {
        match self {
            StateValue::Scalar(v) => *v,
            StateValue::Actions(m) => {
                if m.is_empty() {
                    0.0
                } else {
                    m.values().copied().fold(f64::NEG_INFINITY, f64::max)
                }
            }
        }
    }
}

/// Reads a Q-table JSON file, keeping entries in document order.
///
/// Document order matters when two different state keys resolve to the same
/// grid cell: the later entry wins, matching the insertion-order mapping the
/// training run dumped the file from.
pub fn load_qtable<P: AsRef<Path>>(path: P) -> Result<Vec<(String, StateValue)>> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|e| QvizError::ReadFile {
        path: path.to_path_buf(),
        source: e,
    })?;
    let map: serde_json::Map<String, serde_json::Value> = serde_json::from_str(&content)?;

    let mut entries = Vec::with_capacity(map.len());
    for (key, value) in map {
        let value: StateValue = serde_json::from_value(value)?;
        entries.push((key, value));
    }
    log::debug!("loaded Q-table with {} states", entries.len());
    Ok(entries)
}

/// Extracts grid coordinates from a free-form state key.
///
/// Best-effort heuristic, not a parser: the first two integer substrings
/// (with optional leading `-`) are taken as `(x, y)`. Keys like `"(3,4)"`,
/// `"3,4"` or `"s3_4"` all work; a key yielding fewer than two integers
/// returns `None` and is discarded from the grid. Keys embedding more than
/// two integers are ambiguous and resolve to the first two.
pub fn parse_state_key(key: &str) -> Option<(i64, i64)> {
    let bytes = key.as_bytes();
    let mut nums: Vec<i64> = Vec::with_capacity(2);

    let mut i = 0;
    while i < bytes.len() && nums.len() < 2 {
        if bytes[i].is_ascii_digit() {
            let start = if i > 0 && bytes[i - 1] == b'-' { i - 1 } else { i };
            let mut end = i;
            while end < bytes.len() && bytes[end].is_ascii_digit() {
                end += 1;
            }
            if let Ok(n) = key[start..end].parse::<i64>() {
                nums.push(n);
            }
            i = end;
        } else {
            i += 1;
        }
    }

    if nums.len() >= 2 {
        Some((nums[0], nums[1]))
    } else {
        None
    }
}

/// Rectangular row-major grid of per-state values.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    rows: usize,
    cols: usize,
    values: Vec<f64>,
}

impl Grid {
    /// Creates a zero-filled grid.
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            values: vec![0.0; rows * cols],
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.values[row * self.cols + col]
    }

    pub fn set(&mut self, row: usize, col: usize, value: f64) {
        self.values[row * self.cols + col] = value;
    }

    /// Minimum and maximum cell value; `(0.0, 0.0)` for an empty grid.
    pub fn value_range(&self) -> (f64, f64) {
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for &v in &self.values {
            min = min.min(v);
            max = max.max(v);
        }
        if self.values.is_empty() {
            (0.0, 0.0)
        } else {
            (min, max)
        }
    }
}

/// Builds the heatmap grid from Q-table entries.
///
/// With no explicit shape the grid spans `max parsed y + 1` rows and
/// `max parsed x + 1` columns (floored at 1x1, so an unparseable table still
/// yields a grid). Keys outside the resolved shape are silently skipped;
/// later entries overwrite earlier ones at the same cell.
pub fn build_grid(entries: &[(String, StateValue)], shape: Option<(usize, usize)>) -> Grid {
    let coords: Vec<Option<(i64, i64)>> = entries
        .iter()
        .map(|(key, _)| parse_state_key(key))
        .collect();

    let (rows, cols) = shape.unwrap_or_else(|| {
        let mut max_x: i64 = 0;
        let mut max_y: i64 = 0;
        for &(x, y) in coords.iter().flatten() {
            max_x = max_x.max(x);
            max_y = max_y.max(y);
        }
        ((max_y + 1) as usize, (max_x + 1) as usize)
    });

    let mut grid = Grid::new(rows, cols);
    let mut skipped = 0usize;
    for ((_, value), coord) in entries.iter().zip(&coords) {
        let Some((x, y)) = *coord else {
            skipped += 1;
            continue;
        };
        if x < 0 || y < 0 || y as usize >= rows || x as usize >= cols {
            skipped += 1;
            continue;
        }
        grid.set(y as usize, x as usize, value.reduce());
    }
    if skipped > 0 {
        log::debug!("skipped {skipped} state keys (unparseable or out of range)");
    }
    grid
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn scalar(v: f64) -> StateValue {
        StateValue::Scalar(v)
    }

    fn actions(pairs: &[(&str, f64)]) -> StateValue {
        StateValue::Actions(
            pairs
                .iter()
                .map(|&(k, v)| (k.to_string(), v))
                .collect(),
        )
    }

    #[test]
    fn test_parse_state_key_formats() {
        assert_eq!(parse_state_key("(0,0)"), Some((0, 0)));
        assert_eq!(parse_state_key("3,4"), Some((3, 4)));
        assert_eq!(parse_state_key("s12_34"), Some((12, 34)));
        assert_eq!(parse_state_key("(-2, 5)"), Some((-2, 5)));
    }

    #[test]
    fn test_parse_state_key_too_few_integers() {
        assert_eq!(parse_state_key("state5"), None);
        assert_eq!(parse_state_key("terminal"), None);
        assert_eq!(parse_state_key(""), None);
    }

    #[test]
    fn test_parse_state_key_takes_first_two() {
        assert_eq!(parse_state_key("(1,2,3)"), Some((1, 2)));
    }

    #[test]
    fn test_reduce_scalar() {
        assert_eq!(scalar(1.5).reduce(), 1.5);
    }

    #[test]
    fn test_reduce_action_map() {
        let v = actions(&[("up", 2.0), ("down", 0.5)]);
        assert_eq!(v.reduce(), 2.0);
    }

    #[test]
    fn test_reduce_empty_action_map() {
        assert_eq!(actions(&[]).reduce(), 0.0);
    }

    #[test]
    fn test_build_grid_inferred_shape() {
        let entries = vec![
            ("(0,0)".to_string(), scalar(1.0)),
            ("(1,0)".to_string(), actions(&[("up", 2.0), ("down", 0.5)])),
            ("(0,1)".to_string(), scalar(3.0)),
        ];
        let grid = build_grid(&entries, None);
        assert_eq!((grid.rows(), grid.cols()), (2, 2));
        assert_eq!(grid.get(0, 0), 1.0);
        assert_eq!(grid.get(0, 1), 2.0);
        assert_eq!(grid.get(1, 0), 3.0);
        assert_eq!(grid.get(1, 1), 0.0);
    }

    #[test]
    fn test_build_grid_unparseable_key_excluded() {
        let entries = vec![
            ("(0,0)".to_string(), scalar(1.0)),
            ("state5".to_string(), scalar(9.0)),
        ];
        let grid = build_grid(&entries, None);
        assert_eq!((grid.rows(), grid.cols()), (1, 1));
        assert_eq!(grid.get(0, 0), 1.0);
    }

    #[test]
    fn test_build_grid_out_of_range_skipped() {
        let entries = vec![
            ("(0,0)".to_string(), scalar(1.0)),
            ("(5,5)".to_string(), scalar(7.0)),
            ("(-1,0)".to_string(), scalar(8.0)),
        ];
        let grid = build_grid(&entries, Some((2, 2)));
        assert_eq!((grid.rows(), grid.cols()), (2, 2));
        assert_eq!(grid.get(0, 0), 1.0);
        assert_eq!(grid.get(1, 1), 0.0);
    }

    #[test]
    fn test_build_grid_last_write_wins() {
        let entries = vec![
            ("(0,0)".to_string(), scalar(1.0)),
            ("0_0".to_string(), scalar(4.0)),
        ];
        let grid = build_grid(&entries, None);
        assert_eq!(grid.get(0, 0), 4.0);
    }

    #[test]
    fn test_build_grid_empty_table() {
        let grid = build_grid(&[], None);
        assert_eq!((grid.rows(), grid.cols()), (1, 1));
        assert_eq!(grid.get(0, 0), 0.0);
    }

    #[test]
    fn test_load_qtable_preserves_order() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(br#"{"(0,0)": 1.0, "0_0": {"up": 4.0}}"#)
            .unwrap();

        let entries = load_qtable(file.path()).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].0, "(0,0)");
        assert_eq!(entries[1].0, "0_0");
        assert_eq!(entries[1].1.reduce(), 4.0);
    }

    #[test]
    fn test_load_qtable_mixed_values() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(br#"{"(0,0)": 2, "(1,0)": {"up": 2.0, "down": 0.5}}"#)
            .unwrap();

        let entries = load_qtable(file.path()).unwrap();
        assert_eq!(entries[0].1.reduce(), 2.0);
        assert_eq!(entries[1].1.reduce(), 2.0);
    }

    #[test]
    fn test_load_qtable_malformed() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"not json").unwrap();
        assert!(load_qtable(file.path()).is_err());
    }

    #[test]
    fn test_value_range() {
        let entries = vec![
            ("(0,0)".to_string(), scalar(-1.0)),
            ("(1,0)".to_string(), scalar(3.0)),
        ];
        let grid = build_grid(&entries, None);
        assert_eq!(grid.value_range(), (-1.0, 3.0));
    }
}
