//! Synthetic page builders shared by unit tests.

use image::{GrayImage, Luma};
use imageproc::drawing::{draw_filled_ellipse_mut, draw_filled_rect_mut};
use imageproc::rect::Rect;

const PAPER: Luma<u8> = Luma([255]);
const INK: Luma<u8> = Luma([0]);

/// White page of the given size.
pub(crate) fn blank_page(w: u32, h: u32) -> GrayImage {
    GrayImage::from_pixel(w, h, PAPER)
}

/// Five 2 px lines starting at row `top`, `spacing` rows apart, spanning
/// columns `x0..=x1`.
pub(crate) fn draw_staff_lines(img: &mut GrayImage, top: i32, spacing: i32, x0: i32, x1: i32) {
    for i in 0..5 {
        let y = top + i * spacing;
        draw_filled_rect_mut(img, Rect::at(x0, y).of_size((x1 - x0 + 1) as u32, 2), INK);
    }
}

/// Filled dark ellipse with the given radii.
pub(crate) fn draw_notehead(img: &mut GrayImage, center: (i32, i32), rx: i32, ry: i32) {
    draw_filled_ellipse_mut(img, center, rx, ry, INK);
}
