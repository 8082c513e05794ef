//! Texture cache.
//!
//! A non-send resource that owns one reference to every texture it creates,
//! keyed by the source path. Handles are reference counted, so the same
//! texture can be held at once by the cache, an atlas entry, a widget and
//! the animation player; it is released when the last holder drops it.
//!
//! Every creation call takes the [`Renderer`] explicitly. Failures are logged
//! where they happen and returned; none of them abort the process.
//!
//! Note: This is a non-send resource because handles are `Rc` based and
//! backend textures are tied to the thread owning the render context.

use std::cell::Cell;
use std::fmt;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use image::RgbaImage;
use log::{debug, error, info, warn};
use rustc_hash::FxHashMap;

use crate::render::text;
use crate::render::{Canvas, Color, ImageError, Rect, Renderer, TextureInfo};

/// Color made transparent when loading a file, RGB only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorKey {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl ColorKey {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Text render request.
#[derive(Debug, Clone, PartialEq)]
pub struct MessageData {
    pub message: String,
    pub font_file: PathBuf,
    pub font_size: f32,
    pub color: Color,
}

impl MessageData {
    pub fn new(
        message: impl Into<String>,
        font_file: impl Into<PathBuf>,
        font_size: f32,
        color: Color,
    ) -> Self {
        Self {
            message: message.into(),
            font_file: font_file.into(),
            font_size,
            color,
        }
    }
}

struct HandleData<T> {
    texture: T,
    path: String,
    size: Cell<Option<(u32, u32)>>,
}

/// Shared reference to a texture plus its source path.
///
/// Cloning shares the texture. Width and height are read from the texture
/// the first time they are asked for and remembered afterwards.
pub struct ResourceHandle<T> {
    inner: Rc<HandleData<T>>,
}

impl<T> Clone for ResourceHandle<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T> fmt::Debug for ResourceHandle<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResourceHandle")
            .field("path", &self.inner.path)
            .field("size", &self.inner.size.get())
            .field("holders", &Rc::strong_count(&self.inner))
            .finish()
    }
}

impl<T: TextureInfo> ResourceHandle<T> {
    /// Wrap a texture created outside the cache.
    pub fn new(texture: T, path: impl Into<String>) -> Self {
        Self {
            inner: Rc::new(HandleData {
                texture,
                path: path.into(),
                size: Cell::new(None),
            }),
        }
    }

    pub fn texture(&self) -> &T {
        &self.inner.texture
    }

    /// Source path; empty for generated render targets.
    pub fn path(&self) -> &str {
        &self.inner.path
    }

    pub fn size(&self) -> (u32, u32) {
        if let Some(size) = self.inner.size.get() {
            return size;
        }
        let size = self.inner.texture.dimensions();
        self.inner.size.set(Some(size));
        size
    }

    pub fn width(&self) -> u32 {
        self.size().0
    }

    pub fn height(&self) -> u32 {
        self.size().1
    }

    /// Whether both handles share the same texture.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    /// Number of live holders of this texture.
    pub fn holders(&self) -> usize {
        Rc::strong_count(&self.inner)
    }

    /// Draw at (`x`, `y`).
    ///
    /// The destination takes the clip size when a clip is given, otherwise
    /// the texture size. Both scale factors must be non-zero for scaling to
    /// apply.
    pub fn draw(
        &self,
        canvas: &mut dyn Canvas<T>,
        x: i32,
        y: i32,
        scale_x: f32,
        scale_y: f32,
        clip: Option<Rect>,
    ) {
        let (mut w, mut h) = match clip {
            Some(clip) => (clip.w, clip.h),
            None => {
                let (w, h) = self.size();
                (w as i32, h as i32)
            }
        };
        if scale_x != 0.0 && scale_y != 0.0 {
            w = (w as f32 * scale_x).round() as i32;
            h = (h as f32 * scale_y).round() as i32;
        }
        canvas.copy(self.texture(), clip, Rect::new(x, y, w, h));
    }
}

/// Path-keyed texture store.
pub struct ImageCache<T> {
    images: FxHashMap<String, ResourceHandle<T>>,
}

impl<T: TextureInfo> Default for ImageCache<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: TextureInfo> ImageCache<T> {
    pub fn new() -> Self {
        Self {
            images: FxHashMap::default(),
        }
    }

    /// Load an image file, or return the cached handle for `path`.
    ///
    /// With a color key, pixels whose RGB matches become fully transparent.
    pub fn load_from_file<R>(
        &mut self,
        renderer: &mut R,
        path: impl AsRef<Path>,
        key: Option<ColorKey>,
    ) -> Result<ResourceHandle<T>, ImageError>
    where
        R: Renderer<Texture = T>,
    {
        let path = path.as_ref();
        let cache_key = path.to_string_lossy().into_owned();
        if let Some(existing) = self.images.get(&cache_key) {
            return Ok(existing.clone());
        }

        let mut surface = image::open(path)
            .map_err(|source| {
                error!("Failed to load file {}: {}", path.display(), source);
                ImageError::Decode {
                    path: path.to_path_buf(),
                    source,
                }
            })?
            .to_rgba8();
        if let Some(key) = key {
            apply_color_key(&mut surface, key);
        }

        let texture = renderer.create_texture(&surface).map_err(|e| {
            error!("Texture for {} failed to be created: {}", path.display(), e);
            e
        })?;
        let handle = ResourceHandle::new(texture, cache_key.clone());
        self.images.insert(cache_key, handle.clone());
        Ok(handle)
    }

    /// Allocate an anonymous, transparent render target. Not cached.
    pub fn create_render_target<R>(
        &self,
        renderer: &mut R,
        width: u32,
        height: u32,
    ) -> Result<ResourceHandle<T>, ImageError>
    where
        R: Renderer<Texture = T>,
    {
        let texture = renderer
            .create_render_target(width, height)
            .map_err(|e| {
                error!("Render target {}x{} failed to be created: {}", width, height, e);
                e
            })?;
        Ok(ResourceHandle::new(texture, String::new()))
    }

    /// Rasterize a message into a new texture.
    ///
    /// The texture is cached under the font path only when that key is
    /// still free, so two messages sharing a font keep the first one cached.
    /// The returned handle is always the freshly rendered one.
    pub fn render_text<R>(
        &mut self,
        renderer: &mut R,
        msg: &MessageData,
    ) -> Result<ResourceHandle<T>, ImageError>
    where
        R: Renderer<Texture = T>,
    {
        let surface = self.rasterize(msg)?;
        self.text_texture(renderer, msg, &surface)
    }

    /// Rasterize a message with a black outline of `outline` pixels.
    pub fn render_text_outlined<R>(
        &mut self,
        renderer: &mut R,
        msg: &MessageData,
        outline: u32,
    ) -> Result<ResourceHandle<T>, ImageError>
    where
        R: Renderer<Texture = T>,
    {
        let fill = self.rasterize(msg)?;
        let surface = text::outline_surface(&fill, outline);
        self.text_texture(renderer, msg, &surface)
    }

    fn rasterize(&self, msg: &MessageData) -> Result<RgbaImage, ImageError> {
        text::rasterize(&msg.font_file, &msg.message, msg.font_size, msg.color).map_err(|e| {
            error!("Text \"{}\" failed to render: {}", msg.message, e);
            e
        })
    }

    fn text_texture<R>(
        &mut self,
        renderer: &mut R,
        msg: &MessageData,
        surface: &RgbaImage,
    ) -> Result<ResourceHandle<T>, ImageError>
    where
        R: Renderer<Texture = T>,
    {
        let texture = renderer.create_texture(surface).map_err(|e| {
            error!("Text texture failed to be created: {}", e);
            e
        })?;
        let key = msg.font_file.to_string_lossy().into_owned();
        let handle = ResourceHandle::new(texture, key.clone());
        self.images.entry(key).or_insert_with(|| handle.clone());
        Ok(handle)
    }

    /// Store an externally built handle. Returns false, and leaves the
    /// existing entry alone, when `key` is taken.
    pub fn insert(&mut self, key: impl Into<String>, handle: &ResourceHandle<T>) -> bool {
        let key = key.into();
        if self.images.contains_key(&key) {
            warn!("Image {} already exists", key);
            return false;
        }
        self.images.insert(key, handle.clone());
        true
    }

    /// Drop the cache entry for the handle's path and the caller's reference.
    ///
    /// Only removes the entry if it holds this very texture.
    pub fn remove(&mut self, handle: ResourceHandle<T>) -> bool {
        let same = self
            .images
            .get(handle.path())
            .is_some_and(|cached| cached.ptr_eq(&handle));
        if same {
            self.images.remove(handle.path());
        }
        same
    }

    /// Remove by key.
    pub fn remove_key(&mut self, key: &str) -> Option<ResourceHandle<T>> {
        self.images.remove(key)
    }

    pub fn get(&self, key: &str) -> Option<ResourceHandle<T>> {
        self.images.get(key).cloned()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.images.contains_key(key)
    }

    pub fn count(&self) -> usize {
        self.images.len()
    }

    pub fn log_count(&self) {
        debug!("Image count: {}", self.images.len());
    }

    /// Release every cached reference.
    pub fn clear(&mut self) {
        info!("Releasing {} cached images", self.images.len());
        self.images.clear();
    }
}

/// Make every pixel matching `key` fully transparent.
pub fn apply_color_key(surface: &mut RgbaImage, key: ColorKey) {
    for pixel in surface.pixels_mut() {
        if pixel[0] == key.r && pixel[1] == key.g && pixel[2] == key.b {
            pixel[3] = 0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::software::{SoftwareRenderer, SoftwareTexture};
    use image::Rgba;

    fn write_png(dir: &Path, name: &str, w: u32, h: u32, rgba: [u8; 4]) -> PathBuf {
        let path = dir.join(name);
        RgbaImage::from_pixel(w, h, Rgba(rgba)).save(&path).unwrap();
        path
    }

    #[test]
    fn test_load_same_path_twice_reuses_texture() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_png(dir.path(), "a.png", 4, 3, [10, 20, 30, 255]);
        let mut renderer = SoftwareRenderer::new(8, 8);
        let mut cache = ImageCache::new();

        let first = cache.load_from_file(&mut renderer, &path, None).unwrap();
        let second = cache.load_from_file(&mut renderer, &path, None).unwrap();

        assert!(first.ptr_eq(&second));
        assert_eq!(renderer.textures_created(), 1);
        assert_eq!(cache.count(), 1);
        assert_eq!(first.size(), (4, 3));
        assert_eq!(first.path(), path.to_string_lossy());
    }

    #[test]
    fn test_load_missing_file_is_decode_error() {
        let mut renderer = SoftwareRenderer::new(8, 8);
        let mut cache: ImageCache<SoftwareTexture> = ImageCache::new();
        let result = cache.load_from_file(&mut renderer, "nope/missing.png", None);
        assert!(matches!(result, Err(ImageError::Decode { .. })));
        assert_eq!(cache.count(), 0);
    }

    #[test]
    fn test_color_key_makes_matching_pixels_transparent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("keyed.png");
        let mut img = RgbaImage::from_pixel(2, 1, Rgba([255, 0, 255, 255]));
        img.put_pixel(1, 0, Rgba([1, 2, 3, 255]));
        img.save(&path).unwrap();

        let mut renderer = SoftwareRenderer::new(8, 8);
        let mut cache = ImageCache::new();
        let handle = cache
            .load_from_file(&mut renderer, &path, Some(ColorKey::new(255, 0, 255)))
            .unwrap();
        assert_eq!(handle.texture().pixel(0, 0)[3], 0);
        assert_eq!(handle.texture().pixel(1, 0), Rgba([1, 2, 3, 255]));
    }

    #[test]
    fn test_render_target_is_not_cached() {
        let mut renderer = SoftwareRenderer::new(8, 8);
        let cache: ImageCache<SoftwareTexture> = ImageCache::new();
        let target = cache.create_render_target(&mut renderer, 16, 4).unwrap();
        assert_eq!(target.path(), "");
        assert_eq!(target.size(), (16, 4));
        assert_eq!(cache.count(), 0);
    }

    #[test]
    fn test_insert_existing_key_is_noop() {
        let mut renderer = SoftwareRenderer::new(8, 8);
        let mut cache = ImageCache::new();
        let a = cache.create_render_target(&mut renderer, 2, 2).unwrap();
        let b = cache.create_render_target(&mut renderer, 3, 3).unwrap();

        assert!(cache.insert("canvas", &a));
        assert!(!cache.insert("canvas", &b));
        assert!(cache.get("canvas").unwrap().ptr_eq(&a));
        assert_eq!(cache.count(), 1);
    }

    #[test]
    fn test_remove_releases_cache_reference() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_png(dir.path(), "b.png", 2, 2, [0, 0, 0, 255]);
        let mut renderer = SoftwareRenderer::new(8, 8);
        let mut cache = ImageCache::new();

        let handle = cache.load_from_file(&mut renderer, &path, None).unwrap();
        let keep = handle.clone();
        assert_eq!(keep.holders(), 3);

        assert!(cache.remove(handle));
        assert_eq!(cache.count(), 0);
        assert_eq!(keep.holders(), 1);
    }

    #[test]
    fn test_remove_foreign_handle_keeps_entry() {
        let mut renderer = SoftwareRenderer::new(8, 8);
        let mut cache = ImageCache::new();
        let cached = cache.create_render_target(&mut renderer, 2, 2).unwrap();
        cache.insert("", &cached);
        let other = cache.create_render_target(&mut renderer, 2, 2).unwrap();

        assert!(!cache.remove(other));
        assert_eq!(cache.count(), 1);
    }

    #[test]
    fn test_size_is_memoized() {
        let mut renderer = SoftwareRenderer::new(8, 8);
        let cache: ImageCache<SoftwareTexture> = ImageCache::new();
        let handle = cache.create_render_target(&mut renderer, 5, 7).unwrap();
        assert_eq!(handle.width(), 5);
        assert_eq!(handle.height(), 7);
        assert!(format!("{:?}", handle).contains("Some((5, 7))"));
    }

    #[test]
    fn test_render_text_missing_font_fails_without_caching() {
        let mut renderer = SoftwareRenderer::new(8, 8);
        let mut cache: ImageCache<SoftwareTexture> = ImageCache::new();
        let msg = MessageData::new("12:34", "missing/font.ttf", 16.0, Rgba([255; 4]));
        assert!(matches!(
            cache.render_text(&mut renderer, &msg),
            Err(ImageError::FontOpen { .. })
        ));
        assert!(matches!(
            cache.render_text_outlined(&mut renderer, &msg, 1),
            Err(ImageError::FontOpen { .. })
        ));
        assert_eq!(cache.count(), 0);
        assert_eq!(renderer.textures_created(), 0);
    }

    #[test]
    fn test_draw_uses_clip_size_and_scale() {
        let mut renderer = SoftwareRenderer::new(8, 8);
        let sheet = RgbaImage::from_fn(4, 2, |x, _| {
            if x < 2 {
                Rgba([255, 0, 0, 255])
            } else {
                Rgba([0, 255, 0, 255])
            }
        });
        let handle = ResourceHandle::new(renderer.create_texture(&sheet).unwrap(), "sheet");
        renderer.present(Rgba([0, 0, 0, 255]), &mut |canvas| {
            handle.draw(canvas, 0, 0, 2.0, 2.0, Some(Rect::new(2, 0, 2, 2)));
        });
        let fb = renderer.framebuffer();
        assert_eq!(*fb.get_pixel(0, 0), Rgba([0, 255, 0, 255]));
        assert_eq!(*fb.get_pixel(3, 3), Rgba([0, 255, 0, 255]));
        assert_eq!(*fb.get_pixel(4, 0), Rgba([0, 0, 0, 255]));
    }

    const FONT: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/DejaVuSansMono.ttf");
    const WHITE: Color = Rgba([255, 255, 255, 255]);

    #[test]
    fn test_render_text_returns_fresh_handle_and_keeps_first_cached() {
        let mut renderer = SoftwareRenderer::new(8, 8);
        let mut cache = ImageCache::new();

        let first = cache
            .render_text(&mut renderer, &MessageData::new("12:00", FONT, 16.0, WHITE))
            .unwrap();
        let second = cache
            .render_text(&mut renderer, &MessageData::new("12:01", FONT, 16.0, WHITE))
            .unwrap();

        assert!(!first.ptr_eq(&second));
        assert_eq!(renderer.textures_created(), 2);
        assert_eq!(cache.count(), 1);
        assert!(cache.get(FONT).unwrap().ptr_eq(&first));
        assert_eq!(second.path(), FONT);
        let (w, h) = first.size();
        assert!(w > 0 && h > 0);
        assert!(first.texture().snapshot().pixels().any(|p| p[3] > 0));
    }

    #[test]
    fn test_render_text_outlined_grows_by_twice_the_thickness() {
        let mut renderer = SoftwareRenderer::new(8, 8);
        let mut cache = ImageCache::new();
        let msg = MessageData::new("08:45", FONT, 24.0, WHITE);

        let (w, h) = cache.render_text(&mut renderer, &msg).unwrap().size();
        let one = cache.render_text_outlined(&mut renderer, &msg, 1).unwrap();
        let two = cache.render_text_outlined(&mut renderer, &msg, 2).unwrap();

        assert_eq!(one.size(), (w + 2, h + 2));
        assert_eq!(two.size(), (w + 4, h + 4));
        let pixels = one.texture().snapshot();
        // bright fill over a dark ring
        assert!(pixels.pixels().any(|p| p[0] > 200 && p[3] > 200));
        assert!(pixels.pixels().any(|p| p[0] == 0 && p[3] > 200));
    }
}
