use image::Rgb;

/// Named colors shared by both renderers.
pub struct Colors;

impl Colors {
    pub const WHITE: Rgb<u8> = Rgb([255, 255, 255]);
    pub const BLACK: Rgb<u8> = Rgb([0, 0, 0]);
    pub const DARK_GRAY: Rgb<u8> = Rgb([90, 90, 90]);
    // chessboard squares
    pub const BOARD_LIGHT: Rgb<u8> = Rgb([240, 217, 181]); // #F0D9B5
    pub const BOARD_DARK: Rgb<u8> = Rgb([181, 136, 99]); // #B58863
    // path markers
    pub const START_GREEN: Rgb<u8> = Rgb([0, 100, 0]);
    pub const END_RED: Rgb<u8> = Rgb([139, 0, 0]);
    pub const ARROW_RED: Rgb<u8> = Rgb([230, 60, 60]);
    pub const STEP_BADGE: Rgb<u8> = Rgb([230, 60, 60]);
}

// Diverging scale endpoints (blue -> near-white -> red).
const LOW: Rgb<u8> = Rgb([33, 102, 172]);
const MID: Rgb<u8> = Rgb([247, 247, 247]);
const HIGH: Rgb<u8> = Rgb([178, 24, 43]);

/// Maps `t` in `0.0..=1.0` onto the diverging heatmap scale.
pub fn diverging(t: f64) -> Rgb<u8> {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        lerp(LOW, MID, t * 2.0)
    } else {
        lerp(MID, HIGH, (t - 0.5) * 2.0)
    }
}

/// Positions `v` within `min..=max` as a unit fraction. A degenerate range
/// maps everything to the midpoint.
pub fn unit_pos(v: f64, min: f64, max: f64) -> f64 {
    if (max - min).abs() < f64::EPSILON {
        0.5
    } else {
        (v - min) / (max - min)
    }
}

fn lerp(a: Rgb<u8>, b: Rgb<u8>, t: f64) -> Rgb<u8> {
    let ch = |i: usize| (a.0[i] as f64 + (b.0[i] as f64 - a.0[i] as f64) * t).round() as u8;
    Rgb([ch(0), ch(1), ch(2)])
}
