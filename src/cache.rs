//! Last-render caching for embedding layers.
//!
//! Rasterizing is the expensive step, and embedding layers tend to ask for
//! the same output size repeatedly (redundant layout passes, focus changes).
//! [`RenderCache`] memoizes exactly one rendered buffer keyed by its pixel
//! dimensions; [`SvgView`] combines a [`RenderTree`] with that cache to give
//! resize-driven consumers a render-only-on-change surface.

use std::path::Path;

use crate::backend::{Background, ResvgBackend, SceneBackend};
use crate::error::{Error, Result};
use crate::fit::{self, FitSpec};
use crate::geometry::PixelSize;
use crate::raster::RasterBuffer;
use crate::tree::RenderTree;

/// A single-entry render cache keyed by output pixel dimensions.
///
/// Holds at most one buffer: storing a buffer of a different size replaces
/// the previous entry. The cache must be invalidated wholesale whenever the
/// underlying scene changes, regardless of dimensions — a new scene makes
/// every prior raster stale.
#[derive(Debug, Default)]
pub struct RenderCache {
    entry: Option<(PixelSize, RasterBuffer)>,
}

impl RenderCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// The cached buffer, if its dimensions match exactly.
    pub fn get(&self, size: PixelSize) -> Option<&RasterBuffer> {
        self.entry
            .as_ref()
            .filter(|(key, _)| *key == size)
            .map(|(_, buffer)| buffer)
    }

    /// Remove and return the cached buffer if its dimensions match exactly.
    pub fn take(&mut self, size: PixelSize) -> Option<RasterBuffer> {
        if self.entry.as_ref().is_some_and(|(key, _)| *key == size) {
            self.entry.take().map(|(_, buffer)| buffer)
        } else {
            None
        }
    }

    /// Store a buffer keyed by its own dimensions, replacing any previous
    /// entry, and return a reference to it.
    pub fn put(&mut self, buffer: RasterBuffer) -> &RasterBuffer {
        let entry = self.entry.insert((buffer.size(), buffer));
        &entry.1
    }

    /// The cached buffer regardless of dimensions, if any.
    pub fn current(&self) -> Option<&RasterBuffer> {
        self.entry.as_ref().map(|(_, buffer)| buffer)
    }

    /// Drop the cached entry.
    pub fn invalidate(&mut self) {
        self.entry = None;
    }
}

/// A render tree with a viewport-keyed render cache.
///
/// The component-layer pattern behind drag-and-drop SVG viewers: on every
/// viewport change, fit the scene into the new bounds and render only when
/// the resolved output dimensions differ from the cached ones. Reloading the
/// scene invalidates the cache wholesale.
pub struct SvgView<B: SceneBackend = ResvgBackend> {
    tree: RenderTree<B>,
    cache: RenderCache,
    background: Background,
}

impl SvgView<ResvgBackend> {
    /// Create a view over an SVG parsed from bytes.
    pub fn from_data(data: &[u8]) -> Result<Self> {
        let mut tree = RenderTree::new();
        tree.parse_from_data(data)?;
        Ok(Self::with_tree(tree))
    }

    /// Create a view over an SVG parsed from a file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let mut tree = RenderTree::new();
        tree.parse_from_path(path)?;
        Ok(Self::with_tree(tree))
    }
}

impl<B: SceneBackend> SvgView<B> {
    /// Wrap an existing tree (loaded or empty).
    pub fn with_tree(tree: RenderTree<B>) -> Self {
        Self {
            tree,
            cache: RenderCache::new(),
            background: Background::Transparent,
        }
    }

    /// Set the background rendered under the scene.
    ///
    /// Invalidates the cache: cached pixels embed the old background.
    pub fn set_background(&mut self, background: Background) {
        if self.background != background {
            self.background = background;
            self.cache.invalidate();
        }
    }

    /// The underlying render tree.
    pub fn tree(&self) -> &RenderTree<B> {
        &self.tree
    }

    /// The most recently rendered buffer, if any viewport has been set.
    pub fn current_image(&self) -> Option<&RasterBuffer> {
        self.cache.current()
    }

    /// Replace the scene with one parsed from bytes.
    ///
    /// The cache is invalidated even if the parse fails, since the previous
    /// scene is consumed either way.
    pub fn reload_from_data(&mut self, data: &[u8]) -> Result<()> {
        self.cache.invalidate();
        self.tree.parse_from_data(data)
    }

    /// Replace the scene with one parsed from a file.
    pub fn reload_from_path(&mut self, path: impl AsRef<Path>) -> Result<()> {
        self.cache.invalidate();
        self.tree.parse_from_path(path)
    }

    /// Fit the scene into new viewport bounds and return the rendered
    /// buffer, re-rendering only when the resolved output dimensions differ
    /// from the cached ones.
    pub fn set_viewport(&mut self, width: f32, height: f32) -> Result<&RasterBuffer> {
        if !self.tree.is_valid() {
            return Err(Error::NotLoaded);
        }

        let spec = FitSpec::FitBounds { width, height };
        let fit = fit::resolve(self.tree.intrinsic_size(), spec)?;

        let buffer = match self.cache.take(fit.size) {
            Some(cached) => {
                log::debug!(
                    "viewport {}x{}: reusing cached {}x{} render",
                    width,
                    height,
                    fit.size.width,
                    fit.size.height
                );
                cached
            },
            None => self.tree.render(spec, self.background)?,
        };

        Ok(self.cache.put(buffer))
    }
}

/// An off/on pair of cached views rendered at a shared viewport, the data
/// half of a two-state SVG control.
pub struct IconPair<B: SceneBackend = ResvgBackend> {
    off: SvgView<B>,
    on: SvgView<B>,
}

impl IconPair<ResvgBackend> {
    /// Parse both states from bytes.
    pub fn from_data(off_data: &[u8], on_data: &[u8]) -> Result<Self> {
        Ok(Self::new(
            SvgView::from_data(off_data)?,
            SvgView::from_data(on_data)?,
        ))
    }
}

impl<B: SceneBackend> IconPair<B> {
    /// Pair two views.
    pub fn new(off: SvgView<B>, on: SvgView<B>) -> Self {
        Self { off, on }
    }

    /// Re-fit both states to a shared viewport.
    pub fn set_viewport(&mut self, width: f32, height: f32) -> Result<()> {
        self.off.set_viewport(width, height)?;
        self.on.set_viewport(width, height)?;
        Ok(())
    }

    /// The rendered image for one toggle state, if a viewport has been set.
    pub fn image(&self, on: bool) -> Option<&RasterBuffer> {
        if on {
            self.on.current_image()
        } else {
            self.off.current_image()
        }
    }
}
