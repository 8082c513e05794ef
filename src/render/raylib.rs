//! Windowed raylib backend.
//!
//! Textures live on the GPU. Plain textures are uploaded from decoded RGBA
//! surfaces; render targets are `RenderTexture2D`s drawn into through
//! texture mode. Render targets are stored bottom-up, so every read from one
//! uses a source rectangle with negative height.
//!
//! # Note
//! Holds the `RaylibHandle`, so the renderer is a NonSend resource and all
//! calls happen on the thread that opened the window.

use std::marker::PhantomData;

use image::RgbaImage;
use log::debug;
use raylib::ffi::{self, PixelFormat};
use raylib::prelude::*;

use super::{Canvas, Color, ImageError, Rect, Renderer, TextureInfo};

/// GPU texture: either uploaded pixels or a render target.
pub enum RaylibTexture {
    Image(Texture2D),
    Target(RenderTexture2D),
}

impl RaylibTexture {
    fn raw(&self) -> ffi::Texture2D {
        match self {
            RaylibTexture::Image(texture) => **texture,
            RaylibTexture::Target(target) => target.texture,
        }
    }

    /// Source rectangle for `src` (whole texture when `None`), flipped for
    /// render targets.
    fn source_rect(&self, src: Option<Rect>) -> ffi::Rectangle {
        let (w, h) = self.dimensions();
        let src = src.unwrap_or(Rect::new(0, 0, w as i32, h as i32));
        match self {
            RaylibTexture::Image(_) => ffi::Rectangle {
                x: src.x as f32,
                y: src.y as f32,
                width: src.w as f32,
                height: src.h as f32,
            },
            RaylibTexture::Target(_) => ffi::Rectangle {
                x: src.x as f32,
                y: (h as i32 - src.y - src.h) as f32,
                width: src.w as f32,
                height: -(src.h as f32), // Negative to flip Y
            },
        }
    }
}

impl TextureInfo for RaylibTexture {
    fn dimensions(&self) -> (u32, u32) {
        let raw = self.raw();
        (raw.width.max(0) as u32, raw.height.max(0) as u32)
    }
}

fn to_ffi_rect(rect: Rect) -> ffi::Rectangle {
    ffi::Rectangle {
        x: rect.x as f32,
        y: rect.y as f32,
        width: rect.w as f32,
        height: rect.h as f32,
    }
}

fn to_ffi_color(color: Color) -> ffi::Color {
    ffi::Color {
        r: color[0],
        g: color[1],
        b: color[2],
        a: color[3],
    }
}

fn draw_texture(texture: &RaylibTexture, src: Option<Rect>, dst: Rect) {
    let origin = ffi::Vector2 { x: 0.0, y: 0.0 };
    let tint = to_ffi_color(image::Rgba([255, 255, 255, 255]));
    unsafe {
        ffi::DrawTexturePro(
            texture.raw(),
            texture.source_rect(src),
            to_ffi_rect(dst),
            origin,
            0.0,
            tint,
        );
    }
}

/// Canvas alive while a raylib drawing mode is open.
pub struct RaylibCanvas<'a> {
    _mode: PhantomData<&'a mut ()>,
}

impl Canvas<RaylibTexture> for RaylibCanvas<'_> {
    fn copy(&mut self, texture: &RaylibTexture, src: Option<Rect>, dst: Rect) {
        draw_texture(texture, src, dst);
    }

    fn outline(&mut self, rect: Rect, color: Color) {
        unsafe {
            ffi::DrawRectangleLines(rect.x, rect.y, rect.w, rect.h, to_ffi_color(color));
        }
    }
}

/// Renderer owning the raylib window.
pub struct RaylibRenderer {
    rl: RaylibHandle,
    thread: RaylibThread,
}

impl RaylibRenderer {
    pub fn new(rl: RaylibHandle, thread: RaylibThread) -> Self {
        Self { rl, thread }
    }

    pub fn handle(&self) -> &RaylibHandle {
        &self.rl
    }

    pub fn handle_mut(&mut self) -> &mut RaylibHandle {
        &mut self.rl
    }
}

impl Renderer for RaylibRenderer {
    type Texture = RaylibTexture;

    fn create_texture(&mut self, surface: &RgbaImage) -> Result<RaylibTexture, ImageError> {
        let (width, height) = surface.dimensions();
        if width == 0 || height == 0 {
            return Err(ImageError::TextureCreation(format!(
                "invalid texture size {}x{}",
                width, height
            )));
        }
        // LoadTextureFromImage copies the pixels, the surface stays owned here
        let image = ffi::Image {
            data: surface.as_ptr() as *mut std::ffi::c_void,
            width: width as i32,
            height: height as i32,
            mipmaps: 1,
            format: PixelFormat::PIXELFORMAT_UNCOMPRESSED_R8G8B8A8 as i32,
        };
        let raw = unsafe { ffi::LoadTextureFromImage(image) };
        if raw.id == 0 {
            return Err(ImageError::TextureCreation(format!(
                "GPU upload of {}x{} texture failed",
                width, height
            )));
        }
        Ok(RaylibTexture::Image(unsafe { Texture2D::from_raw(raw) }))
    }

    fn create_render_target(
        &mut self,
        width: u32,
        height: u32,
    ) -> Result<RaylibTexture, ImageError> {
        let target = self
            .rl
            .load_render_texture(&self.thread, width, height)
            .map_err(|e| ImageError::TextureCreation(format!("render texture: {}", e)))?;
        unsafe {
            ffi::BeginTextureMode(*target);
            ffi::ClearBackground(ffi::Color {
                r: 0,
                g: 0,
                b: 0,
                a: 0,
            });
            ffi::EndTextureMode();
        }
        debug!("Render target {}x{} created", width, height);
        Ok(RaylibTexture::Target(target))
    }

    fn draw_to_target(
        &mut self,
        target: &RaylibTexture,
        source: &RaylibTexture,
        dst: Rect,
    ) -> Result<(), ImageError> {
        let RaylibTexture::Target(render_target) = target else {
            return Err(ImageError::TextureCreation(
                "draw destination is not a render target".to_string(),
            ));
        };
        if std::ptr::eq(target, source) {
            return Err(ImageError::TextureCreation(
                "a render target cannot be drawn into itself".to_string(),
            ));
        }
        unsafe {
            ffi::BeginTextureMode(**render_target);
        }
        draw_texture(source, None, dst);
        unsafe {
            ffi::EndTextureMode();
        }
        Ok(())
    }

    fn present(&mut self, clear: Color, draw: &mut dyn FnMut(&mut dyn Canvas<RaylibTexture>)) {
        let mut d = self.rl.begin_drawing(&self.thread);
        d.clear_background(to_ffi_color(clear));
        let mut canvas = RaylibCanvas { _mode: PhantomData };
        draw(&mut canvas);
    }
}
