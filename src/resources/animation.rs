//! Sprite-sheet animation player.
//!
//! Holds a dense table of frame rectangles inside one atlas texture and a
//! current frame index advanced by elapsed time. Playback loops forever.
//!
//! # State
//!
//! - Idle: no frames defined. `advance` and `render` do nothing.
//! - Playing: frames defined. Every `advance` accumulates time and steps to
//!   the next frame once a full frame duration has passed.

use crate::render::{Canvas, Rect, TextureInfo};
use crate::resources::imagecache::ResourceHandle;

/// Frame table and playback position.
#[derive(Debug, Clone, Default, PartialEq)]
struct AnimationState {
    frames: Vec<Rect>,
    current_frame: usize,
    frame_time: f32,
}

/// Plays one row of equally sized frames out of an atlas texture.
pub struct AnimationPlayer<T> {
    atlas: Option<ResourceHandle<T>>,
    state: AnimationState,
}

impl<T: TextureInfo> Default for AnimationPlayer<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: TextureInfo> AnimationPlayer<T> {
    pub fn new() -> Self {
        Self {
            atlas: None,
            state: AnimationState::default(),
        }
    }

    /// Player bound to `atlas` with `frame_count` frames tiled from the
    /// top-left corner.
    pub fn with_atlas(
        atlas: ResourceHandle<T>,
        frame_count: usize,
        frame_width: i32,
        frame_height: i32,
    ) -> Self {
        let mut player = Self::new();
        player.bind(atlas);
        player.define_frames(frame_count, 0, 0, frame_width, frame_height);
        player
    }

    /// Bind the texture the frame rectangles index into.
    pub fn bind(&mut self, atlas: ResourceHandle<T>) {
        self.atlas = Some(atlas);
    }

    pub fn atlas(&self) -> Option<&ResourceHandle<T>> {
        self.atlas.as_ref()
    }

    /// Build the frame table: `frame_count` rectangles starting at
    /// (`frame_x`, `frame_y`), one after the other along the row.
    ///
    /// Replaces any previous definition and rewinds to frame 0.
    pub fn define_frames(
        &mut self,
        frame_count: usize,
        frame_x: i32,
        frame_y: i32,
        frame_width: i32,
        frame_height: i32,
    ) {
        self.state.frames = (0..frame_count)
            .map(|i| Rect::new(frame_x + i as i32 * frame_width, frame_y, frame_width, frame_height))
            .collect();
        self.state.current_frame = 0;
        self.state.frame_time = 0.0;
    }

    /// Step playback. `speed` is in frames per second, `delta_time` in
    /// seconds.
    pub fn advance(&mut self, speed: f32, delta_time: f32) {
        if self.state.frames.is_empty() || speed <= 0.0 {
            return;
        }
        self.state.frame_time += delta_time;
        let frame_duration = 1.0 / speed;
        if self.state.frame_time >= frame_duration {
            self.state.current_frame = (self.state.current_frame + 1) % self.state.frames.len();
            self.state.frame_time = 0.0;
        }
    }

    /// Draw the current frame at (`x`, `y`). A `scale` of 0 draws 1:1.
    pub fn render(&self, canvas: &mut dyn Canvas<T>, x: i32, y: i32, scale: f32) {
        let (Some(atlas), Some(frame)) = (self.atlas.as_ref(), self.current_rect()) else {
            return;
        };
        atlas.draw(canvas, x, y, scale, scale, Some(frame));
    }

    pub fn current_frame(&self) -> usize {
        self.state.current_frame
    }

    pub fn current_rect(&self) -> Option<Rect> {
        self.state.frames.get(self.state.current_frame).copied()
    }

    pub fn frame_count(&self) -> usize {
        self.state.frames.len()
    }

    pub fn frame(&self, index: usize) -> Option<Rect> {
        self.state.frames.get(index).copied()
    }

    pub fn is_playing(&self) -> bool {
        !self.state.frames.is_empty()
    }
}
