//! The drawing surface the interpreter renders against.

use image::{Rgba, RgbaImage};

use crate::foundation::error::{PixwireError, PixwireResult};

/// Default surface width, matching the display this protocol was built for.
pub const DEFAULT_WIDTH: u32 = 1280;
/// Default surface height.
pub const DEFAULT_HEIGHT: u32 = 800;

/// 24-bit RGB, the only color model on the wire.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb8 {
    pub const BLACK: Self = Self { r: 0, g: 0, b: 0 };

    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Packs into `0x00RRGGBB`.
    pub fn packed(self) -> u32 {
        u32::from(self.r) << 16 | u32::from(self.g) << 8 | u32::from(self.b)
    }
}

impl std::fmt::Display for Rgb8 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// The external drawing capability driven by the interpreter.
///
/// Drawing operations apply to the implementation's back buffer; `present`
/// is the only way pixels become visible. Coordinates arrive unvalidated
/// from the wire; edge behavior is implementation-defined.
pub trait Canvas {
    fn draw_point(&mut self, x: u16, y: u16, color: Rgb8);

    /// Endpoints included.
    fn draw_line(&mut self, x1: u16, y1: u16, x2: u16, y2: u16, color: Rgb8);

    /// Outlines the rectangle with corners `(x, y)` and `(x + w, y + h)`.
    fn draw_rect_outline(&mut self, x: u16, y: u16, w: u16, h: u16, color: Rgb8);

    /// Fills `w` by `h` pixels starting at `(x, y)`.
    fn draw_rect_filled(&mut self, x: u16, y: u16, w: u16, h: u16, color: Rgb8);

    /// Copies the back buffer to the visible surface. Idempotent when no
    /// drawing happened in between.
    fn present(&mut self) -> PixwireResult<()>;
}

/// Software canvas: two owned opaque-RGBA surfaces, back and front.
/// Out-of-range coordinates are clipped at the surface edge.
pub struct PixmapCanvas {
    back: RgbaImage,
    front: RgbaImage,
    frames_presented: u64,
}

impl PixmapCanvas {
    /// Creates a canvas with both surfaces cleared to opaque black.
    pub fn new(width: u32, height: u32) -> PixwireResult<Self> {
        if width == 0 || height == 0 {
            return Err(PixwireError::canvas(format!(
                "surface dimensions must be nonzero, got {width}x{height}"
            )));
        }
        let clear = Rgba([0, 0, 0, 255]);
        Ok(Self {
            back: RgbaImage::from_pixel(width, height, clear),
            front: RgbaImage::from_pixel(width, height, clear),
            frames_presented: 0,
        })
    }

    pub fn width(&self) -> u32 {
        self.back.width()
    }

    pub fn height(&self) -> u32 {
        self.back.height()
    }

    /// The visible surface as of the last `present`.
    pub fn front(&self) -> &RgbaImage {
        &self.front
    }

    /// The accumulation surface drawing operations apply to.
    pub fn back(&self) -> &RgbaImage {
        &self.back
    }

    /// How many times `present` has run.
    pub fn frames_presented(&self) -> u64 {
        self.frames_presented
    }

    fn put(&mut self, x: i32, y: i32, px: Rgba<u8>) {
        if x >= 0 && y >= 0 && (x as u32) < self.back.width() && (y as u32) < self.back.height() {
            self.back.put_pixel(x as u32, y as u32, px);
        }
    }

    fn opaque(color: Rgb8) -> Rgba<u8> {
        Rgba([color.r, color.g, color.b, 255])
    }
}

impl Canvas for PixmapCanvas {
    fn draw_point(&mut self, x: u16, y: u16, color: Rgb8) {
        self.put(i32::from(x), i32::from(y), Self::opaque(color));
    }

    fn draw_line(&mut self, x1: u16, y1: u16, x2: u16, y2: u16, color: Rgb8) {
        // Integer Bresenham over the full u16 coordinate range; clipping
        // happens per pixel in `put`.
        let px = Self::opaque(color);
        let (mut x, mut y) = (i32::from(x1), i32::from(y1));
        let (tx, ty) = (i32::from(x2), i32::from(y2));

        let dx = (tx - x).abs();
        let dy = -(ty - y).abs();
        let sx = if x < tx { 1 } else { -1 };
        let sy = if y < ty { 1 } else { -1 };
        let mut err = dx + dy;

        loop {
            self.put(x, y, px);
            if x == tx && y == ty {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }
    }

    fn draw_rect_outline(&mut self, x: u16, y: u16, w: u16, h: u16, color: Rgb8) {
        let px = Self::opaque(color);
        let (x0, y0) = (i32::from(x), i32::from(y));
        let (x1, y1) = (x0 + i32::from(w), y0 + i32::from(h));

        for cx in x0..=x1 {
            self.put(cx, y0, px);
            self.put(cx, y1, px);
        }
        for cy in y0..=y1 {
            self.put(x0, cy, px);
            self.put(x1, cy, px);
        }
    }

    fn draw_rect_filled(&mut self, x: u16, y: u16, w: u16, h: u16, color: Rgb8) {
        let px = Self::opaque(color);
        let (x0, y0) = (i32::from(x), i32::from(y));

        for cy in y0..y0 + i32::from(h) {
            for cx in x0..x0 + i32::from(w) {
                self.put(cx, cy, px);
            }
        }
    }

    fn present(&mut self) -> PixwireResult<()> {
        self.front.clone_from(&self.back);
        self.frames_presented += 1;
        Ok(())
    }
}
