//! Error type shared by the renderer backends and the resource stores.

use std::path::PathBuf;

use thiserror::Error;

/// Failures raised while creating, composing or looking up textures.
///
/// None of these are fatal to the process: the operation that hits one logs
/// it and hands it back to the caller.
#[derive(Debug, Error)]
pub enum ImageError {
    /// The image file is missing, unreadable or not a supported format.
    #[error("failed to decode {}: {source}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    /// The renderer rejected the surface or the requested size.
    #[error("texture creation failed: {0}")]
    TextureCreation(String),
    /// The font file is missing or could not be parsed.
    #[error("failed to open font {}: {reason}", path.display())]
    FontOpen { path: PathBuf, reason: String },
    /// A cache key or pack name is unknown.
    #[error("no entry named {0}")]
    LookupMiss(String),
    /// An atlas input does not share the size of the first input.
    #[error("{} is {found:?}, expected {expected:?} like the other frames", path.display())]
    DimensionMismatch {
        path: PathBuf,
        expected: (u32, u32),
        found: (u32, u32),
    },
    /// The pack directory could not be enumerated.
    #[error("failed to read directory {}: {source}", path.display())]
    DirectoryRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The pack directory holds no files.
    #[error("directory {} has no images to pack", .0.display())]
    EmptyPack(PathBuf),
}
