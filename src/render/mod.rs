//! Rendering boundary.
//!
//! The resource stores and widgets never talk to a graphics library
//! directly. They go through two traits:
//!
//! - [`Renderer`] creates textures, composes textures into render targets and
//!   presents frames.
//! - [`Canvas`] is the active render context handed out by
//!   [`Renderer::present`]; it copies textures and strokes rectangles.
//!
//! Backends
//! - [`software`] – CPU backend over `image::RgbaImage`, used headless and in tests
//! - `raylib` – windowed backend (feature `window`)
//! - [`text`] – TrueType rasterization into RGBA surfaces

pub mod error;
#[cfg(feature = "window")]
pub mod raylib;
pub mod software;
pub mod text;

use image::{Rgba, RgbaImage};

pub use error::ImageError;

/// 8-bit RGBA color used for tints, outlines and text.
pub type Color = Rgba<u8>;

/// Integer rectangle in pixels, top-left anchored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    /// Closed-interval containment: both the left/top and right/bottom edges
    /// count as inside.
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x
            && point.x <= self.x + self.w
            && point.y >= self.y
            && point.y <= self.y + self.h
    }
}

/// Integer pointer/screen position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Anything that can report its pixel size.
pub trait TextureInfo {
    fn dimensions(&self) -> (u32, u32);
}

/// Active render context: either the screen during [`Renderer::present`] or
/// an off-screen target during composition.
pub trait Canvas<T> {
    /// Copy `src` of `texture` (whole texture when `None`) stretched into `dst`.
    fn copy(&mut self, texture: &T, src: Option<Rect>, dst: Rect);
    /// Stroke a one pixel border around `rect`.
    fn outline(&mut self, rect: Rect, color: Color);
}

/// Texture factory and frame presenter.
pub trait Renderer {
    type Texture: TextureInfo + 'static;

    /// Upload a decoded surface as a texture.
    fn create_texture(&mut self, surface: &RgbaImage) -> Result<Self::Texture, ImageError>;

    /// Allocate a blank, fully transparent texture that can be drawn into.
    fn create_render_target(
        &mut self,
        width: u32,
        height: u32,
    ) -> Result<Self::Texture, ImageError>;

    /// Draw the whole of `source` into `dst` of the render target `target`.
    fn draw_to_target(
        &mut self,
        target: &Self::Texture,
        source: &Self::Texture,
        dst: Rect,
    ) -> Result<(), ImageError>;

    /// Clear the screen and run `draw` against it, then show the frame.
    fn present(&mut self, clear: Color, draw: &mut dyn FnMut(&mut dyn Canvas<Self::Texture>));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_contains_is_closed_interval() {
        let rect = Rect::new(10, 10, 20, 20);
        assert!(rect.contains(Point::new(10, 10)));
        assert!(rect.contains(Point::new(30, 30)));
        assert!(rect.contains(Point::new(30, 10)));
        assert!(!rect.contains(Point::new(9, 9)));
        assert!(!rect.contains(Point::new(31, 31)));
        assert!(!rect.contains(Point::new(20, 31)));
    }

    #[test]
    fn test_rect_default_is_empty_at_origin() {
        let rect = Rect::default();
        assert_eq!(rect, Rect::new(0, 0, 0, 0));
        assert!(rect.contains(Point::new(0, 0)));
    }
}
