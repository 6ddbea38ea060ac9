//! 5x7 bitmap glyphs for overlay labels.
//!
//! Covers note letters, digits, accidental symbols and the characters of
//! the status badge. Each row stores five pixels in its low bits, MSB left.

use image::{Rgba, RgbaImage};
use imageproc::drawing::draw_filled_rect_mut;
use imageproc::rect::Rect;

const GLYPH_W: i32 = 5;
const GLYPH_H: i32 = 7;

fn glyph(c: char) -> Option<[u8; 7]> {
    let rows = match c {
        'A' => [0x0E, 0x11, 0x11, 0x1F, 0x11, 0x11, 0x11],
        'B' => [0x1E, 0x11, 0x11, 0x1E, 0x11, 0x11, 0x1E],
        'C' => [0x0E, 0x11, 0x10, 0x10, 0x10, 0x11, 0x0E],
        'D' => [0x1E, 0x11, 0x11, 0x11, 0x11, 0x11, 0x1E],
        'E' => [0x1F, 0x10, 0x10, 0x1E, 0x10, 0x10, 0x1F],
        'F' => [0x1F, 0x10, 0x10, 0x1E, 0x10, 0x10, 0x10],
        'G' => [0x0E, 0x11, 0x10, 0x17, 0x11, 0x11, 0x0F],
        '0' => [0x0E, 0x11, 0x13, 0x15, 0x19, 0x11, 0x0E],
        '1' => [0x04, 0x0C, 0x04, 0x04, 0x04, 0x04, 0x0E],
        '2' => [0x0E, 0x11, 0x01, 0x02, 0x04, 0x08, 0x1F],
        '3' => [0x1F, 0x02, 0x04, 0x02, 0x01, 0x11, 0x0E],
        '4' => [0x02, 0x06, 0x0A, 0x12, 0x1F, 0x02, 0x02],
        '5' => [0x1F, 0x10, 0x1E, 0x01, 0x01, 0x11, 0x0E],
        '6' => [0x06, 0x08, 0x10, 0x1E, 0x11, 0x11, 0x0E],
        '7' => [0x1F, 0x01, 0x02, 0x04, 0x08, 0x08, 0x08],
        '8' => [0x0E, 0x11, 0x11, 0x0E, 0x11, 0x11, 0x0E],
        '9' => [0x0E, 0x11, 0x11, 0x0F, 0x01, 0x02, 0x0C],
        '-' => [0x00, 0x00, 0x00, 0x1F, 0x00, 0x00, 0x00],
        '#' => [0x0A, 0x0A, 0x1F, 0x0A, 0x1F, 0x0A, 0x0A],
        '♭' => [0x10, 0x10, 0x10, 0x16, 0x19, 0x12, 0x1C],
        '♮' => [0x10, 0x11, 0x1F, 0x11, 0x1F, 0x11, 0x01],
        'n' => [0x00, 0x00, 0x16, 0x19, 0x11, 0x11, 0x11],
        'o' => [0x00, 0x00, 0x0E, 0x11, 0x11, 0x11, 0x0E],
        't' => [0x08, 0x08, 0x1C, 0x08, 0x08, 0x09, 0x06],
        'e' => [0x00, 0x00, 0x0E, 0x11, 0x1F, 0x10, 0x0E],
        's' => [0x00, 0x00, 0x0F, 0x10, 0x0E, 0x01, 0x1E],
        ' ' => [0x00; 7],
        _ => return None,
    };
    Some(rows)
}

/// Text style for [`draw_text`].
#[derive(Debug, Clone, Copy)]
pub(crate) struct TextStyle {
    /// Target glyph height in pixels; rounded to a multiple of 7.
    pub size: f32,
    pub fill: Rgba<u8>,
    /// Optional outline color and width in pixels.
    pub stroke: Option<(Rgba<u8>, i32)>,
}

fn cell_size(size: f32) -> i32 {
    ((size / GLYPH_H as f32).round() as i32).max(1)
}

/// Height in pixels of a line of text at `size`.
pub(crate) fn text_height(size: f32) -> i32 {
    GLYPH_H * cell_size(size)
}

/// Width in pixels `text` occupies at `size`.
pub(crate) fn text_width(text: &str, size: f32) -> i32 {
    let cell = cell_size(size);
    let n = text.chars().filter(|&c| glyph(c).is_some()).count() as i32;
    if n == 0 {
        0
    } else {
        n * (GLYPH_W + 1) * cell - cell
    }
}

fn lit_cells(text: &str, x: i32, y: i32, cell: i32) -> Vec<(i32, i32)> {
    let mut cells = Vec::new();
    let mut pen_x = x;
    for rows in text.chars().filter_map(glyph) {
        for (r, bits) in rows.iter().enumerate() {
            for col in 0..GLYPH_W {
                if bits & (1 << (GLYPH_W - 1 - col)) != 0 {
                    cells.push((pen_x + col * cell, y + r as i32 * cell));
                }
            }
        }
        pen_x += (GLYPH_W + 1) * cell;
    }
    cells
}

/// Draw `text` with its top-left corner at `(x, y)`. Unknown characters are
/// skipped; drawing is clipped to the canvas.
pub(crate) fn draw_text(canvas: &mut RgbaImage, text: &str, x: i32, y: i32, style: TextStyle) {
    let cell = cell_size(style.size);
    let cells = lit_cells(text, x, y, cell);
    if let Some((color, width)) = style.stroke {
        let side = (cell + 2 * width).max(1) as u32;
        for &(cx, cy) in &cells {
            draw_filled_rect_mut(canvas, Rect::at(cx - width, cy - width).of_size(side, side), color);
        }
    }
    for &(cx, cy) in &cells {
        draw_filled_rect_mut(
            canvas,
            Rect::at(cx, cy).of_size(cell as u32, cell as u32),
            style.fill,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Rgba<u8> = Rgba([255, 0, 0, 255]);
    const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);

    #[test]
    fn label_characters_have_glyphs() {
        for c in "ABCDEFG0123456789#♭♮ notes".chars() {
            assert!(glyph(c).is_some(), "missing glyph for {c:?}");
        }
        assert!(glyph('?').is_none());
    }

    #[test]
    fn width_scales_with_size() {
        assert_eq!(text_width("F", 7.0), 5);
        assert_eq!(text_width("F5", 14.0), 22);
        assert_eq!(text_width("", 14.0), 0);
        assert_eq!(text_height(16.0), 14);
    }

    #[test]
    fn draws_fill_and_stroke() {
        let mut img = RgbaImage::from_pixel(20, 20, Rgba([0, 0, 0, 255]));
        let style = TextStyle {
            size: 7.0,
            fill: RED,
            stroke: Some((WHITE, 1)),
        };
        draw_text(&mut img, "F", 5, 5, style);
        // top-left pixel of 'F' is lit, its left neighbour carries the stroke
        assert_eq!(*img.get_pixel(5, 5), RED);
        assert_eq!(*img.get_pixel(4, 5), WHITE);
        // inside the F's open right side, away from any lit cell
        assert_eq!(*img.get_pixel(9, 10), Rgba([0, 0, 0, 255]));
    }

    #[test]
    fn clips_outside_canvas() {
        let mut img = RgbaImage::new(4, 4);
        let style = TextStyle {
            size: 14.0,
            fill: RED,
            stroke: None,
        };
        draw_text(&mut img, "88", -10, -10, style);
        draw_text(&mut img, "88", 100, 100, style);
    }
}
