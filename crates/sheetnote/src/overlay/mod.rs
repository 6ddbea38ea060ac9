//! Label overlay for visual verification of a recognition result.
//!
//! Labels are laid out in a horizontal band for readability, not at the
//! notes' true positions; a small marker shows where each note was found.

mod glyphs;

use image::{Rgba, RgbaImage};
use imageproc::drawing::{draw_filled_circle_mut, draw_filled_ellipse_mut, draw_filled_rect_mut};
use imageproc::rect::Rect;

use crate::config::OverlayConfig;
use crate::pipeline::OmrResult;
use glyphs::{draw_text, text_height, text_width, TextStyle};

const GREEN: Rgba<u8> = Rgba([0, 255, 0, 255]);
const BLUE: Rgba<u8> = Rgba([0, 0, 255, 255]);
const YELLOW: Rgba<u8> = Rgba([255, 255, 0, 255]);
const RED: Rgba<u8> = Rgba([255, 0, 0, 255]);
const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);

/// Letters shown when a result has no notes at all.
const PLACEHOLDER_LABELS: [&str; 5] = ["F", "E", "D", "B", "G"];

const LABEL_STROKE_PX: i32 = 2;

const BADGE_W: i32 = 50;
const BADGE_H: i32 = 30;
const BADGE_Y: i32 = 10;

/// Render the result's labels onto a copy of its original image.
pub fn render_overlay(result: &OmrResult, font_size: f32) -> RgbaImage {
    let config = OverlayConfig {
        font_size,
        ..OverlayConfig::default()
    };
    render_overlay_with(result, &config)
}

/// [`render_overlay`] with full layout control.
pub fn render_overlay_with(result: &OmrResult, config: &OverlayConfig) -> RgbaImage {
    let mut canvas = result.original_image().to_rgba8();
    let (w, h) = canvas.dimensions();
    tracing::debug!(
        "rendering overlay on {}x{} image, {} notes",
        w,
        h,
        result.detected_notes().len()
    );

    draw_status_badge(&mut canvas, result.detected_notes().len(), config);

    let label_style = TextStyle {
        size: config.font_size,
        fill: RED,
        stroke: Some((WHITE, LABEL_STROKE_PX)),
    };

    if result.detected_notes().is_empty() {
        let y = (h as f32 * 0.65) as i32;
        for (i, letter) in PLACEHOLDER_LABELS.iter().enumerate() {
            let x = 60 + i as i32 * config.label_pitch_px;
            draw_filled_circle_mut(&mut canvas, (x, y - 50), 8, BLUE);
            draw_filled_ellipse_mut(&mut canvas, (x, y), 12, 10, YELLOW);
            draw_centered(&mut canvas, letter, x, y, label_style);
        }
        return canvas;
    }

    let y = (h as f32 * config.label_band_fraction) as i32;
    for (i, note) in result.detected_notes().iter().enumerate() {
        let marker = (note.center[0].round() as i32, note.center[1].round() as i32);
        draw_filled_circle_mut(&mut canvas, marker, 3, BLUE);

        let x = 50 + i as i32 * config.label_pitch_px;
        draw_filled_ellipse_mut(&mut canvas, (x, y), 20, 15, YELLOW);
        draw_centered(&mut canvas, &note.pitch.short_label(), x, y, label_style);
    }
    canvas
}

fn draw_centered(canvas: &mut RgbaImage, text: &str, cx: i32, cy: i32, style: TextStyle) {
    let width = text_width(text, style.size);
    let height = text_height(style.size);
    draw_text(canvas, text, cx - width / 2, cy - height / 2, style);
}

/// Fixed green badge with the note count in the top-right corner. The
/// count is centered on the badge and may overhang it once it reaches
/// three digits.
fn draw_status_badge(canvas: &mut RgbaImage, count: usize, config: &OverlayConfig) {
    let x = canvas.width() as i32 - 10 - BADGE_W;
    draw_filled_rect_mut(
        canvas,
        Rect::at(x, BADGE_Y).of_size(BADGE_W as u32, BADGE_H as u32),
        GREEN,
    );
    let text = format!("{count} notes");
    let style = TextStyle {
        size: config.badge_font_size,
        fill: WHITE,
        stroke: None,
    };
    let tx = x + (BADGE_W - text_width(&text, style.size)) / 2;
    let ty = BADGE_Y + (BADGE_H - text_height(style.size)) / 2;
    draw_text(canvas, &text, tx, ty, style);
}
