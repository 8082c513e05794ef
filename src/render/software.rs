//! CPU renderer over `image::RgbaImage`.
//!
//! Textures are plain pixel buffers and the "screen" is a framebuffer owned
//! by the renderer, so every draw can be checked pixel by pixel. The
//! application runs unchanged on top of it without a window.

use std::cell::RefCell;

use image::{Pixel, Rgba, RgbaImage};
use log::debug;

use super::{Canvas, Color, ImageError, Rect, Renderer, TextureInfo};

/// Largest edge the software renderer accepts, matching common GPU limits.
pub const MAX_TEXTURE_SIZE: u32 = 8192;

/// Pixel buffer texture.
///
/// Render targets are written through a shared reference while other
/// holders keep handles to them, hence the `RefCell`.
#[derive(Debug)]
pub struct SoftwareTexture {
    pixels: RefCell<RgbaImage>,
    render_target: bool,
}

impl SoftwareTexture {
    /// Read one pixel. Out of bounds reads return transparent black.
    pub fn pixel(&self, x: u32, y: u32) -> Color {
        let pixels = self.pixels.borrow();
        if x < pixels.width() && y < pixels.height() {
            *pixels.get_pixel(x, y)
        } else {
            Rgba([0, 0, 0, 0])
        }
    }

    /// Copy of the current pixels.
    pub fn snapshot(&self) -> RgbaImage {
        self.pixels.borrow().clone()
    }

    pub fn is_render_target(&self) -> bool {
        self.render_target
    }
}

impl TextureInfo for SoftwareTexture {
    fn dimensions(&self) -> (u32, u32) {
        self.pixels.borrow().dimensions()
    }
}

/// Headless renderer with an in-memory framebuffer.
pub struct SoftwareRenderer {
    framebuffer: RgbaImage,
    textures_created: usize,
    frames_presented: u64,
}

impl SoftwareRenderer {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            framebuffer: RgbaImage::new(width, height),
            textures_created: 0,
            frames_presented: 0,
        }
    }

    /// The last presented frame.
    pub fn framebuffer(&self) -> &RgbaImage {
        &self.framebuffer
    }

    /// Number of textures and render targets created so far.
    pub fn textures_created(&self) -> usize {
        self.textures_created
    }

    pub fn frames_presented(&self) -> u64 {
        self.frames_presented
    }

    fn check_size(width: u32, height: u32) -> Result<(), ImageError> {
        if width == 0 || height == 0 {
            return Err(ImageError::TextureCreation(format!(
                "invalid texture size {}x{}",
                width, height
            )));
        }
        if width > MAX_TEXTURE_SIZE || height > MAX_TEXTURE_SIZE {
            return Err(ImageError::TextureCreation(format!(
                "texture {}x{} exceeds the {} pixel limit",
                width, height, MAX_TEXTURE_SIZE
            )));
        }
        Ok(())
    }
}

impl Renderer for SoftwareRenderer {
    type Texture = SoftwareTexture;

    fn create_texture(&mut self, surface: &RgbaImage) -> Result<SoftwareTexture, ImageError> {
        Self::check_size(surface.width(), surface.height())?;
        self.textures_created += 1;
        Ok(SoftwareTexture {
            pixels: RefCell::new(surface.clone()),
            render_target: false,
        })
    }

    fn create_render_target(
        &mut self,
        width: u32,
        height: u32,
    ) -> Result<SoftwareTexture, ImageError> {
        Self::check_size(width, height)?;
        self.textures_created += 1;
        debug!("Software render target {}x{} created", width, height);
        Ok(SoftwareTexture {
            pixels: RefCell::new(RgbaImage::new(width, height)),
            render_target: true,
        })
    }

    fn draw_to_target(
        &mut self,
        target: &SoftwareTexture,
        source: &SoftwareTexture,
        dst: Rect,
    ) -> Result<(), ImageError> {
        if !target.render_target {
            return Err(ImageError::TextureCreation(
                "draw destination is not a render target".to_string(),
            ));
        }
        if std::ptr::eq(target, source) {
            return Err(ImageError::TextureCreation(
                "a render target cannot be drawn into itself".to_string(),
            ));
        }
        let source = source.pixels.borrow();
        let mut target = target.pixels.borrow_mut();
        blit(&mut target, &source, None, dst);
        Ok(())
    }

    fn present(&mut self, clear: Color, draw: &mut dyn FnMut(&mut dyn Canvas<SoftwareTexture>)) {
        for pixel in self.framebuffer.pixels_mut() {
            *pixel = clear;
        }
        let mut canvas = SoftwareCanvas {
            target: &mut self.framebuffer,
        };
        draw(&mut canvas);
        self.frames_presented += 1;
    }
}

/// Canvas drawing straight into a pixel buffer.
pub struct SoftwareCanvas<'a> {
    target: &'a mut RgbaImage,
}

impl<'a> SoftwareCanvas<'a> {
    pub fn new(target: &'a mut RgbaImage) -> Self {
        Self { target }
    }
}

impl Canvas<SoftwareTexture> for SoftwareCanvas<'_> {
    fn copy(&mut self, texture: &SoftwareTexture, src: Option<Rect>, dst: Rect) {
        let source = texture.pixels.borrow();
        blit(self.target, &source, src, dst);
    }

    fn outline(&mut self, rect: Rect, color: Color) {
        if rect.w <= 0 || rect.h <= 0 {
            return;
        }
        let right = rect.x + rect.w - 1;
        let bottom = rect.y + rect.h - 1;
        for x in rect.x..=right {
            put_pixel(self.target, x, rect.y, color);
            put_pixel(self.target, x, bottom, color);
        }
        for y in rect.y..=bottom {
            put_pixel(self.target, rect.x, y, color);
            put_pixel(self.target, right, y, color);
        }
    }
}

fn put_pixel(target: &mut RgbaImage, x: i32, y: i32, color: Color) {
    if x < 0 || y < 0 {
        return;
    }
    let (x, y) = (x as u32, y as u32);
    if x < target.width() && y < target.height() {
        blend_pixel(target.get_pixel_mut(x, y), &color);
    }
}

fn blend_pixel(dst: &mut Color, src: &Color) {
    match src[3] {
        0 => {}
        255 => *dst = *src,
        _ => dst.blend(src),
    }
}

/// Nearest-neighbour stretch of `src_rect` of `source` into `dst` of
/// `target`, alpha blended and clipped to both images.
pub fn blit(target: &mut RgbaImage, source: &RgbaImage, src_rect: Option<Rect>, dst: Rect) {
    let src = src_rect.unwrap_or(Rect::new(
        0,
        0,
        source.width() as i32,
        source.height() as i32,
    ));
    if src.w <= 0 || src.h <= 0 || dst.w <= 0 || dst.h <= 0 {
        return;
    }
    for dy in 0..dst.h {
        let ty = dst.y + dy;
        if ty < 0 || ty as u32 >= target.height() {
            continue;
        }
        let sy = src.y + (dy as i64 * src.h as i64 / dst.h as i64) as i32;
        if sy < 0 || sy as u32 >= source.height() {
            continue;
        }
        for dx in 0..dst.w {
            let tx = dst.x + dx;
            if tx < 0 || tx as u32 >= target.width() {
                continue;
            }
            let sx = src.x + (dx as i64 * src.w as i64 / dst.w as i64) as i32;
            if sx < 0 || sx as u32 >= source.width() {
                continue;
            }
            let color = *source.get_pixel(sx as u32, sy as u32);
            blend_pixel(target.get_pixel_mut(tx as u32, ty as u32), &color);
        }
    }
}
