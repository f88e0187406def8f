//! Icon resources
//!
//! Resolves resource ids to decoded images:
//! - `FileDecoder` reads SVG (resvg) and raster (image) files from the
//!   resource directory
//! - `IconCache` memoizes decodes with a single decode per id, even when
//!   several threads ask for the same icon at once
//!
//! Failures are not errors for the caller: a resource that cannot be decoded
//! is simply "no image available".

use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};

use parking_lot::Mutex;
use thiserror::Error;
use tiny_skia::{IntSize, Pixmap, Transform};

use crate::gfx::Image;

/// Path of a resource relative to the resource directory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ResourceId(&'static str);

impl ResourceId {
    pub const fn new(path: &'static str) -> Self {
        Self(path)
    }

    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// Source of decoded images for the draw path
pub trait ResourceProvider: Send + Sync {
    /// `None` when the resource is unknown or cannot be decoded
    fn get_image(&self, id: ResourceId) -> Option<Arc<Image>>;
}

#[derive(Debug, Error)]
pub enum ResourceError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse SVG {path}: {source}")]
    Svg {
        path: PathBuf,
        #[source]
        source: usvg::Error,
    },
    #[error("failed to decode image {path}: {source}")]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("image {path} has no pixels")]
    Empty { path: PathBuf },
}

/// Turns a resource id into an image
pub trait ImageDecoder: Send + Sync {
    fn decode(&self, id: ResourceId) -> Result<Image, ResourceError>;
}

/// Decodes resources from files below a root directory
pub struct FileDecoder {
    root: PathBuf,
    options: usvg::Options<'static>,
}

impl FileDecoder {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            options: usvg::Options::default(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn decode_svg(&self, path: &Path) -> Result<Image, ResourceError> {
        let data = std::fs::read(path).map_err(|source| ResourceError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let tree = usvg::Tree::from_data(&data, &self.options).map_err(|source| ResourceError::Svg {
            path: path.to_path_buf(),
            source,
        })?;

        let size = tree.size().to_int_size();
        let mut pixmap =
            Pixmap::new(size.width(), size.height()).ok_or_else(|| ResourceError::Empty {
                path: path.to_path_buf(),
            })?;
        resvg::render(&tree, Transform::identity(), &mut pixmap.as_mut());
        Ok(Image::new(pixmap))
    }

    fn decode_raster(&self, path: &Path) -> Result<Image, ResourceError> {
        let rgba = image::open(path)
            .map_err(|source| ResourceError::Image {
                path: path.to_path_buf(),
                source,
            })?
            .to_rgba8();
        let (width, height) = rgba.dimensions();

        // tiny-skia stores premultiplied alpha
        let mut data = rgba.into_raw();
        for px in data.chunks_exact_mut(4) {
            let alpha = u16::from(px[3]);
            for channel in &mut px[..3] {
                *channel = ((u16::from(*channel) * alpha + 127) / 255) as u8;
            }
        }

        IntSize::from_wh(width, height)
            .and_then(|size| Pixmap::from_vec(data, size))
            .map(Image::new)
            .ok_or_else(|| ResourceError::Empty {
                path: path.to_path_buf(),
            })
    }
}

impl ImageDecoder for FileDecoder {
    fn decode(&self, id: ResourceId) -> Result<Image, ResourceError> {
        let path = self.root.join(id.as_str());
        let is_svg = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("svg"));

        if is_svg {
            self.decode_svg(&path)
        } else {
            self.decode_raster(&path)
        }
    }
}

type Slot = Arc<OnceLock<Option<Arc<Image>>>>;

/// Memoizing resource provider
pub struct IconCache<D> {
    decoder: D,
    slots: Mutex<HashMap<ResourceId, Slot>>,
}

impl<D: ImageDecoder> IconCache<D> {
    pub fn new(decoder: D) -> Self {
        Self {
            decoder,
            slots: Mutex::new(HashMap::new()),
        }
    }

    /// Number of ids requested so far (decoded or failed)
    pub fn len(&self) -> usize {
        self.slots.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Forget everything; the next lookup decodes again
    pub fn clear(&self) {
        self.slots.lock().clear();
    }
}

impl<D: ImageDecoder> ResourceProvider for IconCache<D> {
    fn get_image(&self, id: ResourceId) -> Option<Arc<Image>> {
        // Only hold the map lock long enough to find the slot; the decode
        // itself runs inside the slot so other ids are not blocked.
        let slot = self.slots.lock().entry(id).or_default().clone();

        slot.get_or_init(|| match self.decoder.decode(id) {
            Ok(image) => {
                tracing::debug!("Decoded {} ({}x{})", id, image.width(), image.height());
                Some(Arc::new(image))
            }
            Err(e) => {
                tracing::debug!("No image for {}: {}", id, e);
                None
            }
        })
        .clone()
    }
}
