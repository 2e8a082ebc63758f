use super::colors::{self, Colors};
use super::Renderer;
use crate::error::Result;
use crate::qtable::Grid;

/// Pixel geometry for the heatmap image.
#[derive(Debug, Clone, Copy)]
pub struct HeatmapRenderOptions {
    pub cell_px: u32,
    pub margin_px: u32,
    pub title_band_px: u32,
    pub colorbar_width_px: u32,
    pub colorbar_gap_px: u32,
}

impl Default for HeatmapRenderOptions {
    fn default() -> Self {
        Self {
            cell_px: 72,
            margin_px: 44,
            title_band_px: 52,
            colorbar_width_px: 26,
            colorbar_gap_px: 28,
        }
    }
}

/// Vertical pixel origin of a grid row, with row 0 at the bottom
/// (inverted axis).
fn row_top(row: usize, rows: usize, cell: f64, oy: f64) -> f64 {
    oy + (rows - 1 - row) as f64 * cell
}

/// Cell value as overlaid on the heatmap.
fn format_value(v: f64) -> String {
    format!("{v:.2}")
}

/// Renders the Q-value grid as a heatmap with per-cell labels, axis ticks
/// and a color-scale legend.
pub fn render_heatmap(grid: &Grid, title: &str, opts: &HeatmapRenderOptions) -> Result<Renderer> {
    let (rows, cols) = (grid.rows(), grid.cols());
    let cell = opts.cell_px as f64;
    let margin = opts.margin_px as f64;
    let title_band = opts.title_band_px as f64;
    let cb_width = opts.colorbar_width_px as f64;
    let cb_gap = opts.colorbar_gap_px as f64;
    let cb_label_band = 72.0;

    let grid_w = cols as f64 * cell;
    let grid_h = rows as f64 * cell;
    let (ox, oy) = (margin, title_band);

    let width = (margin + grid_w + cb_gap + cb_width + cb_label_band) as u32;
    let height = (title_band + grid_h + margin) as u32;
    let mut r = Renderer::new(width.max(1), height.max(1))?;

    let (min, max) = grid.value_range();

    // cell fills and value labels
    let value_font = (cell * 0.21).max(10.0);
    for row in 0..rows {
        for col in 0..cols {
            let v = grid.get(row, col);
            let px = ox + col as f64 * cell;
            let py = row_top(row, rows, cell, oy);
            r.draw_rect(px, py, cell, cell, colors::diverging(colors::unit_pos(v, min, max)));
            r.draw_text_centered(
                px + cell / 2.0,
                py + cell / 2.0,
                &format_value(v),
                value_font,
                Colors::BLACK,
            );
        }
    }

    // white gridlines between cells (outer border included)
    for col in 0..=cols {
        let x = ox + col as f64 * cell;
        r.draw_rect(x - 1.0, oy, 2.0, grid_h, Colors::WHITE);
    }
    for row in 0..=rows {
        let y = oy + row as f64 * cell;
        r.draw_rect(ox, y - 1.0, grid_w, 2.0, Colors::WHITE);
    }

    // integer tick labels on both axes
    let tick_font = (cell * 0.18).max(9.0);
    for col in 0..cols {
        r.draw_text_centered(
            ox + col as f64 * cell + cell / 2.0,
            oy + grid_h + margin * 0.35,
            &col.to_string(),
            tick_font,
            Colors::DARK_GRAY,
        );
    }
    for row in 0..rows {
        r.draw_text_centered(
            ox - margin * 0.35,
            row_top(row, rows, cell, oy) + cell / 2.0,
            &row.to_string(),
            tick_font,
            Colors::DARK_GRAY,
        );
    }

    // color-scale legend
    if rows > 0 && cols > 0 {
        let cb_x = ox + grid_w + cb_gap;
        let steps = grid_h as u32;
        for i in 0..steps {
            // top of the bar carries the maximum
            let t = 1.0 - i as f64 / steps.max(1) as f64;
            r.draw_rect(cb_x, oy + i as f64, cb_width, 1.0, colors::diverging(t));
        }
        r.draw_rect_outline(cb_x, oy, cb_width, grid_h, Colors::BLACK);

        let label_x = cb_x + cb_width + 6.0;
        r.draw_text(label_x, oy - 4.0, &format_value(max), tick_font, Colors::BLACK);
        r.draw_text(
            label_x,
            oy + grid_h - tick_font,
            &format_value(min),
            tick_font,
            Colors::BLACK,
        );
        r.draw_text_centered(
            cb_x + cb_width / 2.0 + 24.0,
            oy + grid_h / 2.0,
            "Q-value",
            tick_font + 2.0,
            Colors::BLACK,
        );
    }

    // title above the grid
    r.draw_text_centered(
        ox + grid_w / 2.0,
        title_band * 0.45,
        title,
        (cell * 0.25).max(14.0),
        Colors::BLACK,
    );

    Ok(r)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_top_inverts_axis() {
        // row 0 sits at the bottom of a 3-row grid
        assert_eq!(row_top(0, 3, 10.0, 100.0), 120.0);
        assert_eq!(row_top(2, 3, 10.0, 100.0), 100.0);
    }

    #[test]
    fn test_format_value_two_decimals() {
        assert_eq!(format_value(2.0), "2.00");
        assert_eq!(format_value(0.456), "0.46");
        assert_eq!(format_value(-1.0), "-1.00");
    }
}
