use super::colors::Colors;
use super::Renderer;
use crate::error::Result;
use crate::tour::{Square, TourData};

/// Pixel geometry for the board image. `high_res()` doubles everything,
/// which is how the `_hq` variant is produced.
#[derive(Debug, Clone, Copy)]
pub struct BoardRenderOptions {
    pub cell_px: u32,
    pub margin_px: u32,
    pub title_band_px: u32,
}

impl Default for BoardRenderOptions {
    fn default() -> Self {
        Self {
            cell_px: 60,
            margin_px: 36,
            title_band_px: 64,
        }
    }
}

impl BoardRenderOptions {
    pub fn high_res() -> Self {
        let std = Self::default();
        Self {
            cell_px: std.cell_px * 2,
            margin_px: std.margin_px * 2,
            title_band_px: std.title_band_px * 2,
        }
    }
}

/// Arrow segments between consecutive path cells, in cell coordinates.
///
/// A path of length 0 or 1 yields no arrows.
pub fn arrow_segments(path: &[Square]) -> Vec<(Square, Square)> {
    path.windows(2).map(|w| (w[0], w[1])).collect()
}

/// 1-based step numbers for every non-start path cell.
///
/// The start cell carries the `S` marker instead, so a path of length L
/// yields exactly L-1 annotations.
pub fn step_annotations(path: &[Square]) -> Vec<(Square, usize)> {
    path.iter()
        .enumerate()
        .skip(1)
        .map(|(i, &sq)| (sq, i + 1))
        .collect()
}

/// Renders the knight's tour board and returns the finished canvas.
pub fn render_tour(data: &TourData, opts: &BoardRenderOptions) -> Result<Renderer> {
    let n = data.board_size;
    let cell = opts.cell_px as f64;
    let margin = opts.margin_px as f64;
    let title_band = opts.title_band_px as f64;

    let width = (n as f64 * cell + margin * 2.0) as u32;
    let height = (n as f64 * cell + title_band + margin) as u32;
    let mut r = Renderer::new(width, height)?;

    // board origin; row y = 0 renders at the top (inverted vertical axis)
    let ox = margin;
    let oy = title_band;
    let center = |sq: Square| -> (f64, f64) {
        (
            ox + sq.x as f64 * cell + cell / 2.0,
            oy + sq.y as f64 * cell + cell / 2.0,
        )
    };

    // checkerboard
    for x in 0..n {
        for y in 0..n {
            let color = if (x + y) % 2 == 0 {
                Colors::BOARD_LIGHT
            } else {
                Colors::BOARD_DARK
            };
            let px = ox + x as f64 * cell;
            let py = oy + y as f64 * cell;
            r.draw_rect(px, py, cell, cell, color);
            r.draw_rect_outline(px, py, cell, cell, Colors::BLACK);
        }
    }

    // coordinate labels: columns along the bottom, rows along the left
    let tick_font = (cell * 0.24).max(9.0);
    for i in 0..n {
        let label = i.to_string();
        r.draw_text_centered(
            ox + i as f64 * cell + cell / 2.0,
            oy + n as f64 * cell + margin * 0.4,
            &label,
            tick_font,
            Colors::DARK_GRAY,
        );
        r.draw_text_centered(
            ox - margin * 0.4,
            oy + i as f64 * cell + cell / 2.0,
            &label,
            tick_font,
            Colors::DARK_GRAY,
        );
    }

    // start marker
    let (sx, sy) = center(data.start);
    r.draw_text_centered(sx, sy, "S", cell * 0.45, Colors::START_GREEN);

    // directed arrows between consecutive path cells
    for (from, to) in arrow_segments(&data.path) {
        let (x0, y0) = center(from);
        let (x1, y1) = center(to);
        draw_arrow(&mut r, (x0, y0), (x1, y1), cell);
    }

    // step numbers on every non-start cell
    let badge_radius = cell * 0.16;
    for (sq, step) in step_annotations(&data.path) {
        let px = ox + sq.x as f64 * cell;
        let py = oy + sq.y as f64 * cell;
        let (bx, by) = (px + cell * 0.22, py + cell * 0.22);
        r.draw_filled_circle(bx, by, badge_radius, Colors::STEP_BADGE);
        r.draw_text_centered(bx, by, &step.to_string(), cell * 0.22, Colors::WHITE);
    }

    // end marker, only when the path actually moved
    if data.path.len() > 1 {
        let (ex, ey) = center(data.path[data.path.len() - 1]);
        r.draw_text_centered(ex, ey, "E", cell * 0.45, Colors::END_RED);
    }

    // title
    let (line1, line2) = data.title();
    let cx = width as f64 / 2.0;
    r.draw_text_centered(cx, title_band * 0.30, &line1, cell * 0.32, Colors::BLACK);
    r.draw_text_centered(cx, title_band * 0.68, &line2, cell * 0.25, Colors::BLACK);

    Ok(r)
}

/// Arrow from `from` to `to`: a thick shaft plus a filled triangular head
/// whose tip sits on the destination cell center.
fn draw_arrow(r: &mut Renderer, from: (f64, f64), to: (f64, f64), cell: f64) {
    let (dx, dy) = (to.0 - from.0, to.1 - from.1);
    let len = (dx * dx + dy * dy).sqrt();
    if len == 0.0 {
        return;
    }
    let (ux, uy) = (dx / len, dy / len);
    let (nx, ny) = (-uy, ux);

    let head_len = cell * 0.22;
    let head_half = cell * 0.10;
    let base = (to.0 - ux * head_len, to.1 - uy * head_len);

    let stroke = (cell / 24.0).max(2.0) as u32;
    r.draw_line(from.0, from.1, base.0, base.1, stroke, Colors::ARROW_RED);
    r.draw_filled_triangle(
        [
            to,
            (base.0 + nx * head_half, base.1 + ny * head_half),
            (base.0 - nx * head_half, base.1 - ny * head_half),
        ],
        Colors::ARROW_RED,
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(x: u32, y: u32) -> Square {
        Square { x, y }
    }

    #[test]
    fn test_arrow_count_matches_path_length() {
        let path = vec![sq(0, 0), sq(2, 1), sq(4, 2), sq(3, 4)];
        assert_eq!(arrow_segments(&path).len(), 3);
        assert_eq!(arrow_segments(&path)[0], (sq(0, 0), sq(2, 1)));
    }

    #[test]
    fn test_no_arrows_for_trivial_paths() {
        assert!(arrow_segments(&[]).is_empty());
        assert!(arrow_segments(&[sq(0, 0)]).is_empty());
    }

    #[test]
    fn test_step_annotations_skip_start() {
        let path = vec![sq(0, 0), sq(2, 1), sq(4, 2)];
        let steps = step_annotations(&path);
        assert_eq!(steps.len(), 2);
        assert_eq!(steps[0], (sq(2, 1), 2));
        assert_eq!(steps[1], (sq(4, 2), 3));
    }

    #[test]
    fn test_step_annotations_trivial_paths() {
        assert!(step_annotations(&[]).is_empty());
        assert!(step_annotations(&[sq(0, 0)]).is_empty());
    }

    #[test]
    fn test_high_res_doubles_scale() {
        let std = BoardRenderOptions::default();
        let hq = BoardRenderOptions::high_res();
        assert_eq!(hq.cell_px, std.cell_px * 2);
        assert_eq!(hq.margin_px, std.margin_px * 2);
        assert_eq!(hq.title_band_px, std.title_band_px * 2);
    }
}
