//! Built-in demo page for trying the pipeline without a photo.

use image::{DynamicImage, Rgb, RgbImage};
use imageproc::drawing::{draw_filled_circle_mut, draw_filled_rect_mut};
use imageproc::rect::Rect;

const WIDTH: u32 = 400;
const HEIGHT: u32 = 300;
const NOTE_CENTERS: [(i32, i32); 4] = [(100, 70), (150, 50), (200, 90), (250, 70)];

/// A 400x300 white page with one staff (lines at y = 50, 70, .., 130 from
/// x = 20 to 380, 2 px thick) and four filled 10 px noteheads.
pub fn demo_sheet() -> DynamicImage {
    let black = Rgb([0u8, 0, 0]);
    let mut img = RgbImage::from_pixel(WIDTH, HEIGHT, Rgb([255, 255, 255]));
    for i in 0..5 {
        let y = 50 + i * 20;
        draw_filled_rect_mut(&mut img, Rect::at(20, y - 1).of_size(361, 2), black);
    }
    for &center in &NOTE_CENTERS {
        draw_filled_circle_mut(&mut img, center, 5, black);
    }
    DynamicImage::ImageRgb8(img)
}
