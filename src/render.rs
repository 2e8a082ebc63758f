pub mod board;
pub mod colors;
pub mod heatmap;

pub use colors::Colors;

use crate::error::{QvizError, Result};

use ab_glyph::{FontVec, PxScale};
use font_kit::{family_name::FamilyName, properties::Properties, source::SystemSource};
use image::{ImageBuffer, Rgb, RgbImage};
use imageproc::{
    drawing::{
        draw_filled_circle_mut, draw_filled_rect_mut, draw_hollow_rect_mut, draw_line_segment_mut,
        draw_polygon_mut, draw_text_mut, text_size,
    },
    point::Point,
    rect::Rect,
};
use std::path::Path;

/// Raster drawing context: an RGB canvas plus a loaded font.
pub struct Renderer {
    pub image: RgbImage,
    pub width: u32,
    pub height: u32,
    pub font: FontVec,
}

impl Renderer {
    /// Creates a white canvas and loads a system font.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        let image = ImageBuffer::from_pixel(width, height, Colors::WHITE);
        let font = load_system_font()?;

        Ok(Self {
            image,
            width,
            height,
            font,
        })
    }

    /// Filled rectangle.
    pub fn draw_rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: Rgb<u8>) {
        let rect = Rect::at(x as i32, y as i32).of_size(width.max(1.0) as u32, height.max(1.0) as u32);
        draw_filled_rect_mut(&mut self.image, rect, color);
    }

    /// Rectangle border only.
    pub fn draw_rect_outline(&mut self, x: f64, y: f64, width: f64, height: f64, color: Rgb<u8>) {
        let rect = Rect::at(x as i32, y as i32).of_size(width.max(1.0) as u32, height.max(1.0) as u32);
        draw_hollow_rect_mut(&mut self.image, rect, color);
    }

    /// Line segment with the given stroke width, drawn as parallel 1-px
    /// segments offset along the normal.
    pub fn draw_line(&mut self, x0: f64, y0: f64, x1: f64, y1: f64, stroke: u32, color: Rgb<u8>) {
        let (dx, dy) = (x1 - x0, y1 - y0);
        let len = (dx * dx + dy * dy).sqrt();
        if len == 0.0 {
            return;
        }
        // unit normal
        let (nx, ny) = (-dy / len, dx / len);
        let stroke = stroke.max(1) as i32;
        for k in 0..stroke {
            let off = k as f64 - (stroke - 1) as f64 / 2.0;
            draw_line_segment_mut(
                &mut self.image,
                ((x0 + nx * off) as f32, (y0 + ny * off) as f32),
                ((x1 + nx * off) as f32, (y1 + ny * off) as f32),
                color,
            );
        }
    }

    /// Filled circle.
    pub fn draw_filled_circle(&mut self, cx: f64, cy: f64, radius: f64, color: Rgb<u8>) {
        draw_filled_circle_mut(
            &mut self.image,
            (cx as i32, cy as i32),
            radius.max(1.0) as i32,
            color,
        );
    }

    /// Filled triangle (used for arrowheads).
    pub fn draw_filled_triangle(&mut self, points: [(f64, f64); 3], color: Rgb<u8>) {
        let poly: Vec<Point<i32>> = points
            .iter()
            .map(|&(x, y)| Point::new(x as i32, y as i32))
            .collect();
        // draw_polygon_mut rejects degenerate polygons with repeated endpoints
        if poly[0] != poly[1] && poly[1] != poly[2] && poly[0] != poly[2] {
            draw_polygon_mut(&mut self.image, &poly, color);
        }
    }

    /// Text anchored at its top-left corner.
    pub fn draw_text(&mut self, x: f64, y: f64, text: &str, font_size: f64, color: Rgb<u8>) {
        let scale = PxScale::from(font_size as f32);
        draw_text_mut(
            &mut self.image,
            color,
            x as i32,
            y as i32,
            scale,
            &self.font,
            text,
        );
    }

    /// Text centered on the given point.
    pub fn draw_text_centered(
        &mut self,
        cx: f64,
        cy: f64,
        text: &str,
        font_size: f64,
        color: Rgb<u8>,
    ) {
        let (w, h) = self.text_size(text, font_size);
        self.draw_text(cx - w / 2.0, cy - h / 2.0, text, font_size, color);
    }

    /// Rendered size of a text run at the given font size.
    pub fn text_size(&self, text: &str, font_size: f64) -> (f64, f64) {
        let scale = PxScale::from(font_size as f32);
        let (w, h) = text_size(scale, &self.font, text);
        (w as f64, h as f64)
    }

    /// Writes the canvas as PNG.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        self.image.save(path)?;
        Ok(())
    }
}

/// Loads a usable sans-serif system font via font-kit.
fn load_system_font() -> Result<FontVec> {
    let source = SystemSource::new();

    let font_families = vec![
        FamilyName::Title("DejaVu Sans".to_string()),
        FamilyName::Title("Arial".to_string()),
        FamilyName::SansSerif,
        FamilyName::Title("Helvetica".to_string()),
        FamilyName::Title("Liberation Sans".to_string()),
    ];

    for family in &font_families {
        if let Ok(handle) = source.select_best_match(&[family.clone()], &Properties::new())
            && let Ok(font_kit_font) = handle.load()
            && let Some(font_bytes) = font_kit_font.copy_font_data()
            && let Ok(font) = FontVec::try_from_vec(font_bytes.to_vec())
        {
            return Ok(font);
        }
    }

    Err(QvizError::FontLookup(
        "DejaVu Sans, Arial, sans-serif, Helvetica, Liberation Sans".to_string(),
    ))
}
