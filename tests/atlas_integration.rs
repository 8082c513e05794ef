//! Atlas packing and playback integration tests.
//!
//! Frames are synthetic solid-color PNGs written to a temporary directory and
//! packed with the software renderer, so every pixel of the composite can be
//! checked.

use std::path::Path;

use image::{Rgba, RgbaImage};

use anya::render::Renderer;
use anya::render::software::{SoftwareRenderer, SoftwareTexture};
use anya::resources::animation::AnimationPlayer;
use anya::resources::atlasstore::AtlasStore;
use anya::resources::imagecache::ImageCache;

const COLORS: [[u8; 4]; 4] = [
    [255, 0, 0, 255],
    [0, 255, 0, 255],
    [0, 0, 255, 255],
    [255, 255, 0, 255],
];

fn write_frames(dir: &Path, names: &[&str], w: u32, h: u32) {
    for (name, color) in names.iter().zip(COLORS.iter()) {
        RgbaImage::from_pixel(w, h, Rgba(*color))
            .save(dir.join(name))
            .unwrap();
    }
}

fn pack(dir: &Path, name: &str) -> (SoftwareRenderer, ImageCache<SoftwareTexture>, AtlasStore<SoftwareTexture>) {
    let mut renderer = SoftwareRenderer::new(64, 64);
    let mut cache = ImageCache::new();
    let mut store = AtlasStore::new();
    store
        .pack_directory(&mut renderer, &mut cache, name, dir)
        .unwrap();
    (renderer, cache, store)
}

#[test]
fn atlas_places_frames_side_by_side() {
    let dir = tempfile::tempdir().unwrap();
    write_frames(dir.path(), &["0.png", "1.png", "2.png", "3.png"], 6, 5);
    let (_renderer, cache, store) = pack(dir.path(), "walk");

    assert_eq!(store.pack_width("walk"), Some(24));
    assert_eq!(store.pack_height("walk"), Some(5));

    let canvas = cache.get("walk").unwrap();
    assert_eq!(canvas.size(), (24, 5));
    for (i, color) in COLORS.iter().enumerate() {
        let x0 = i as u32 * 6;
        assert_eq!(canvas.texture().pixel(x0, 0), Rgba(*color));
        assert_eq!(canvas.texture().pixel(x0 + 5, 4), Rgba(*color));
    }
}

#[test]
fn atlas_orders_frames_by_file_name() {
    let dir = tempfile::tempdir().unwrap();
    // written in reverse so creation order differs from name order
    RgbaImage::from_pixel(2, 2, Rgba(COLORS[1]))
        .save(dir.path().join("b.png"))
        .unwrap();
    RgbaImage::from_pixel(2, 2, Rgba(COLORS[0]))
        .save(dir.path().join("a.png"))
        .unwrap();
    let (_renderer, cache, _store) = pack(dir.path(), "ab");

    let canvas = cache.get("ab").unwrap();
    assert_eq!(canvas.texture().pixel(0, 0), Rgba(COLORS[0]));
    assert_eq!(canvas.texture().pixel(2, 0), Rgba(COLORS[1]));
}

#[test]
fn atlas_frames_are_shared_with_the_cache() {
    let dir = tempfile::tempdir().unwrap();
    write_frames(dir.path(), &["0.png", "1.png"], 3, 3);
    let (mut renderer, mut cache, _store) = pack(dir.path(), "pair");

    // two frames plus the composite
    assert_eq!(cache.count(), 3);
    let created = renderer.textures_created();
    let again = cache
        .load_from_file(&mut renderer, dir.path().join("0.png"), None)
        .unwrap();
    assert_eq!(renderer.textures_created(), created);
    assert_eq!(again.size(), (3, 3));
}

#[test]
fn atlas_drives_animation_playback() {
    let dir = tempfile::tempdir().unwrap();
    write_frames(dir.path(), &["0.png", "1.png", "2.png"], 4, 4);
    let (mut renderer, _cache, store) = pack(dir.path(), "loop");
    let entry = store.entry("loop").unwrap();

    let mut player = AnimationPlayer::with_atlas(
        entry.canvas.clone(),
        entry.frame_count,
        entry.frame_width as i32,
        entry.frame_height as i32,
    );

    let mut seen = Vec::new();
    for _ in 0..4 {
        renderer.present(Rgba([0, 0, 0, 255]), &mut |canvas| {
            player.render(canvas, 10, 10, 2.0);
        });
        let fb = renderer.framebuffer();
        // scaled 2x: the frame covers (10,10)..(18,18)
        assert_eq!(fb.get_pixel(17, 17), fb.get_pixel(10, 10));
        assert_eq!(*fb.get_pixel(18, 18), Rgba([0, 0, 0, 255]));
        seen.push(*fb.get_pixel(10, 10));
        player.advance(10.0, 0.1);
    }
    assert_eq!(
        seen,
        vec![Rgba(COLORS[0]), Rgba(COLORS[1]), Rgba(COLORS[2]), Rgba(COLORS[0])]
    );
}

#[test]
fn atlas_unknown_pack_is_none() {
    let store: AtlasStore<SoftwareTexture> = AtlasStore::new();
    assert_eq!(store.pack_width("nonexistent"), None);
    assert_eq!(store.pack_height("nonexistent"), None);
}
