//! Pixel to normalized-device-coordinate conversion.

use glam::Vec2;

/// The rectangle the scene is drawn into, in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub offset_x: f32,
    pub offset_y: f32,
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            offset_x: 0.0,
            offset_y: 0.0,
            width: width as f32,
            height: height as f32,
        }
    }
}

/// Map a pixel position (origin top-left, +Y down) to NDC (origin center,
/// +Y up). Returns `None` for a zero-sized viewport.
///
/// Positions outside the viewport map outside `[-1, 1]`; picking simply
/// misses there.
pub fn pointer_to_ndc(px: f32, py: f32, viewport: &Viewport) -> Option<Vec2> {
    if viewport.width <= 0.0 || viewport.height <= 0.0 {
        return None;
    }
    let x = (px - viewport.offset_x) / viewport.width * 2.0 - 1.0;
    let y = -((py - viewport.offset_y) / viewport.height) * 2.0 + 1.0;
    Some(Vec2::new(x, y))
}
