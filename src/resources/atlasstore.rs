//! Sprite atlas registry.
//!
//! Packs every image of a directory into one wide texture, left to right,
//! so an [`AnimationPlayer`](crate::resources::animation::AnimationPlayer)
//! can step through the frames as sub-rectangles of a single texture.
//!
//! Inputs are sorted by file name before packing, which makes the layout
//! independent of the file system's iteration order. All inputs must share
//! the size of the first one.

use std::path::{Path, PathBuf};

use log::{error, info};
use rustc_hash::FxHashMap;

use crate::render::{ImageError, Rect, Renderer, TextureInfo};
use crate::resources::imagecache::{ImageCache, ResourceHandle};

/// One packed directory.
#[derive(Debug, Clone)]
pub struct AtlasEntry<T> {
    pub name: String,
    pub canvas: ResourceHandle<T>,
    pub frame_width: u32,
    pub frame_height: u32,
    pub frame_count: usize,
}

impl<T> AtlasEntry<T> {
    /// Total canvas width.
    pub fn width(&self) -> u32 {
        self.frame_width * self.frame_count as u32
    }

    /// Total canvas height.
    pub fn height(&self) -> u32 {
        self.frame_height
    }

    /// Sub-rectangle of frame `index`.
    pub fn frame_rect(&self, index: usize) -> Option<Rect> {
        if index >= self.frame_count {
            return None;
        }
        Some(Rect::new(
            (index as u32 * self.frame_width) as i32,
            0,
            self.frame_width as i32,
            self.frame_height as i32,
        ))
    }
}

/// Central registry of packed atlases keyed by pack name.
pub struct AtlasStore<T> {
    packs: FxHashMap<String, AtlasEntry<T>>,
}

impl<T: TextureInfo> Default for AtlasStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: TextureInfo> AtlasStore<T> {
    pub fn new() -> Self {
        Self {
            packs: FxHashMap::default(),
        }
    }

    /// Pack every file of `dir` into one texture stored as `pack_name`.
    ///
    /// A pack that already exists is returned as is. Sub-images loaded
    /// before a failure stay in the cache.
    pub fn pack_directory<R>(
        &mut self,
        renderer: &mut R,
        cache: &mut ImageCache<T>,
        pack_name: &str,
        dir: impl AsRef<Path>,
    ) -> Result<ResourceHandle<T>, ImageError>
    where
        R: Renderer<Texture = T>,
    {
        if let Some(entry) = self.packs.get(pack_name) {
            return Ok(entry.canvas.clone());
        }
        let dir = dir.as_ref();
        let paths = list_files(dir).map_err(|e| {
            error!("Pack {} failed: {}", pack_name, e);
            e
        })?;

        let mut frames = Vec::with_capacity(paths.len());
        for path in &paths {
            frames.push(cache.load_from_file(renderer, path, None)?);
        }

        let (frame_width, frame_height) = frames[0].size();
        for (path, frame) in paths.iter().zip(&frames).skip(1) {
            if frame.size() != (frame_width, frame_height) {
                let e = ImageError::DimensionMismatch {
                    path: path.clone(),
                    expected: (frame_width, frame_height),
                    found: frame.size(),
                };
                error!("Pack {} failed: {}", pack_name, e);
                return Err(e);
            }
        }

        let canvas = cache.create_render_target(
            renderer,
            frame_width * frames.len() as u32,
            frame_height,
        )?;
        for (i, frame) in frames.iter().enumerate() {
            let dst = Rect::new(
                (i as u32 * frame_width) as i32,
                0,
                frame_width as i32,
                frame_height as i32,
            );
            renderer
                .draw_to_target(canvas.texture(), frame.texture(), dst)
                .map_err(|e| {
                    error!("Pack {} failed drawing {}: {}", pack_name, frame.path(), e);
                    e
                })?;
        }

        cache.insert(pack_name, &canvas);
        let entry = AtlasEntry {
            name: pack_name.to_string(),
            canvas: canvas.clone(),
            frame_width,
            frame_height,
            frame_count: frames.len(),
        };
        info!(
            "Packed {} frames of {}x{} from {} as {}",
            entry.frame_count,
            frame_width,
            frame_height,
            dir.display(),
            pack_name
        );
        self.packs.insert(pack_name.to_string(), entry);
        Ok(canvas)
    }

    /// Total width of a pack, `None` if the name is unknown.
    pub fn pack_width(&self, name: &str) -> Option<u32> {
        self.packs.get(name).map(AtlasEntry::width)
    }

    /// Total height of a pack, `None` if the name is unknown.
    pub fn pack_height(&self, name: &str) -> Option<u32> {
        self.packs.get(name).map(AtlasEntry::height)
    }

    pub fn entry(&self, name: &str) -> Option<&AtlasEntry<T>> {
        self.packs.get(name)
    }

    /// Forget a pack and its cache entry.
    pub fn remove(&mut self, cache: &mut ImageCache<T>, name: &str) -> Option<AtlasEntry<T>> {
        let entry = self.packs.remove(name)?;
        cache.remove(entry.canvas.clone());
        Some(entry)
    }

    pub fn len(&self) -> usize {
        self.packs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.packs.is_empty()
    }
}

/// Regular files of `dir`, sorted by path.
fn list_files(dir: &Path) -> Result<Vec<PathBuf>, ImageError> {
    let read_error = |source| ImageError::DirectoryRead {
        path: dir.to_path_buf(),
        source,
    };
    let mut paths = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(read_error)? {
        let entry = entry.map_err(read_error)?;
        if entry.file_type().map_err(read_error)?.is_file() {
            paths.push(entry.path());
        }
    }
    if paths.is_empty() {
        return Err(ImageError::EmptyPack(dir.to_path_buf()));
    }
    paths.sort();
    Ok(paths)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::software::{SoftwareRenderer, SoftwareTexture};
    use image::{Rgba, RgbaImage};

    fn write_frame(dir: &Path, name: &str, w: u32, h: u32, rgba: [u8; 4]) {
        RgbaImage::from_pixel(w, h, Rgba(rgba))
            .save(dir.join(name))
            .unwrap();
    }

    #[test]
    fn test_list_files_sorted_and_skips_dirs() {
        let dir = tempfile::tempdir().unwrap();
        write_frame(dir.path(), "b.png", 1, 1, [0; 4]);
        write_frame(dir.path(), "a.png", 1, 1, [0; 4]);
        std::fs::create_dir(dir.path().join("nested")).unwrap();
        let files = list_files(dir.path()).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a.png", "b.png"]);
    }

    #[test]
    fn test_empty_directory_is_empty_pack() {
        let dir = tempfile::tempdir().unwrap();
        let mut renderer = SoftwareRenderer::new(4, 4);
        let mut cache = ImageCache::new();
        let mut store: AtlasStore<SoftwareTexture> = AtlasStore::new();
        let result = store.pack_directory(&mut renderer, &mut cache, "empty", dir.path());
        assert!(matches!(result, Err(ImageError::EmptyPack(_))));
        assert!(store.is_empty());
    }

    #[test]
    fn test_missing_directory_is_read_error() {
        let mut renderer = SoftwareRenderer::new(4, 4);
        let mut cache = ImageCache::new();
        let mut store: AtlasStore<SoftwareTexture> = AtlasStore::new();
        let result = store.pack_directory(&mut renderer, &mut cache, "gone", "no/such/dir");
        assert!(matches!(result, Err(ImageError::DirectoryRead { .. })));
    }

    #[test]
    fn test_dimension_mismatch_keeps_loaded_frames_cached() {
        let dir = tempfile::tempdir().unwrap();
        write_frame(dir.path(), "0.png", 4, 4, [255, 0, 0, 255]);
        write_frame(dir.path(), "1.png", 5, 4, [0, 255, 0, 255]);
        let mut renderer = SoftwareRenderer::new(4, 4);
        let mut cache = ImageCache::new();
        let mut store = AtlasStore::new();

        let result = store.pack_directory(&mut renderer, &mut cache, "bad", dir.path());
        match result {
            Err(ImageError::DimensionMismatch {
                expected, found, ..
            }) => {
                assert_eq!(expected, (4, 4));
                assert_eq!(found, (5, 4));
            }
            other => panic!("expected a dimension mismatch, got {:?}", other),
        }
        assert_eq!(cache.count(), 2);
        assert!(!cache.contains("bad"));
        assert_eq!(store.pack_width("bad"), None);
    }

    #[test]
    fn test_pack_twice_returns_same_canvas() {
        let dir = tempfile::tempdir().unwrap();
        write_frame(dir.path(), "0.png", 2, 2, [255, 0, 0, 255]);
        let mut renderer = SoftwareRenderer::new(4, 4);
        let mut cache = ImageCache::new();
        let mut store = AtlasStore::new();

        let a = store
            .pack_directory(&mut renderer, &mut cache, "one", dir.path())
            .unwrap();
        let created = renderer.textures_created();
        let b = store
            .pack_directory(&mut renderer, &mut cache, "one", dir.path())
            .unwrap();
        assert!(a.ptr_eq(&b));
        assert_eq!(renderer.textures_created(), created);
    }

    #[test]
    fn test_unknown_pack_dimensions_are_none() {
        let store: AtlasStore<SoftwareTexture> = AtlasStore::new();
        assert_eq!(store.pack_width("nonexistent"), None);
        assert_eq!(store.pack_height("nonexistent"), None);
    }

    #[test]
    fn test_remove_pack_drops_cache_entry() {
        let dir = tempfile::tempdir().unwrap();
        write_frame(dir.path(), "0.png", 2, 2, [255, 0, 0, 255]);
        let mut renderer = SoftwareRenderer::new(4, 4);
        let mut cache = ImageCache::new();
        let mut store = AtlasStore::new();
        store
            .pack_directory(&mut renderer, &mut cache, "one", dir.path())
            .unwrap();
        assert!(cache.contains("one"));

        let entry = store.remove(&mut cache, "one").unwrap();
        assert_eq!(entry.frame_count, 1);
        assert!(!cache.contains("one"));
        assert!(store.entry("one").is_none());
    }

    #[test]
    fn test_frame_rect_out_of_range() {
        let dir = tempfile::tempdir().unwrap();
        write_frame(dir.path(), "0.png", 3, 2, [255, 0, 0, 255]);
        write_frame(dir.path(), "1.png", 3, 2, [255, 0, 0, 255]);
        let mut renderer = SoftwareRenderer::new(4, 4);
        let mut cache = ImageCache::new();
        let mut store = AtlasStore::new();
        store
            .pack_directory(&mut renderer, &mut cache, "two", dir.path())
            .unwrap();
        let entry = store.entry("two").unwrap();
        assert_eq!(entry.frame_rect(1), Some(Rect::new(3, 0, 3, 2)));
        assert_eq!(entry.frame_rect(2), None);
    }
}
