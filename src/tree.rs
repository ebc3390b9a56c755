//! Render trees: scene ownership, lifecycle, and the render entry points.
//!
//! A [`RenderTree`] owns at most one parsed scene plus the immutable
//! [`RenderOptions`] it was built with. Parse an SVG into it once, then
//! render as many times as needed at different fit specifications.
//!
//! ## Lifecycle
//!
//! A tree is `Empty` until a parse succeeds, `Loaded` afterwards. Any
//! reparse drops the previous scene *before* attempting the new one, so a
//! tree never transiently holds two scenes — which also means a failed
//! reparse leaves the tree `Empty` rather than keeping the old scene.
//! Callers that need fallback keep the previous tree alive separately.
//!
//! Scene and options ownership is exclusive; dropping the tree releases
//! both. The tree is not internally synchronized: share it across threads
//! only behind external mutual exclusion, or confine one instance per
//! thread.

use std::ffi::OsStr;
use std::path::Path;

use crate::backend::{Background, ResvgBackend, SceneBackend};
use crate::error::{Error, Result};
use crate::fit::{self, FitSpec};
use crate::geometry::Size;
use crate::options::RenderOptions;
use crate::pixel::{AlphaMode, ChannelOrder};
use crate::raster::RasterBuffer;

/// Returns true for paths with a supported SVG suffix (`.svg` or `.svgz`,
/// case-insensitive). This is the droppable-file contract for embedding
/// layers.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use svg_oxide::tree::is_supported_path;
///
/// assert!(is_supported_path(Path::new("icon.svg")));
/// assert!(is_supported_path(Path::new("ICON.SVGZ")));
/// assert!(!is_supported_path(Path::new("photo.png")));
/// ```
pub fn is_supported_path(path: &Path) -> bool {
    let Some(ext) = path.extension().and_then(OsStr::to_str) else {
        return false;
    };
    ext.eq_ignore_ascii_case("svg") || ext.eq_ignore_ascii_case("svgz")
}

/// Owns one parsed SVG scene and renders it to raster buffers.
///
/// Generic over the [`SceneBackend`]; the default is the bundled
/// [`ResvgBackend`].
///
/// # Examples
///
/// ```no_run
/// use svg_oxide::tree::RenderTree;
/// use svg_oxide::fit::FitSpec;
/// use svg_oxide::backend::Background;
///
/// # fn main() -> svg_oxide::error::Result<()> {
/// let mut tree = RenderTree::new();
/// tree.parse_from_path("icon.svg")?;
/// let image = tree.render(FitSpec::FitWidth(64.0), Background::Transparent)?;
/// assert_eq!(image.width(), 64);
/// # Ok(())
/// # }
/// ```
pub struct RenderTree<B: SceneBackend = ResvgBackend> {
    backend: B,
    options: RenderOptions,
    scene: Option<B::Scene>,
}

impl RenderTree<ResvgBackend> {
    /// Create an empty tree with default options.
    pub fn new() -> Self {
        Self::with_options(RenderOptions::default())
    }

    /// Create an empty tree with a custom DPI preference.
    pub fn with_dpi(dpi: f32) -> Self {
        Self::with_options(RenderOptions::with_dpi(dpi))
    }

    /// Create an empty tree with custom options.
    pub fn with_options(options: RenderOptions) -> Self {
        Self::with_backend(ResvgBackend::new(), options)
    }
}

impl Default for RenderTree<ResvgBackend> {
    fn default() -> Self {
        Self::new()
    }
}

impl<B: SceneBackend> RenderTree<B> {
    /// Create an empty tree over a specific backend.
    pub fn with_backend(backend: B, options: RenderOptions) -> Self {
        Self {
            backend,
            options,
            scene: None,
        }
    }

    /// The options this tree was constructed with.
    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// The backend this tree renders through.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Parse an SVG from bytes (plain or gzip-compressed) into this tree.
    ///
    /// Drops any previously loaded scene first; on failure the tree is left
    /// empty.
    pub fn parse_from_data(&mut self, data: &[u8]) -> Result<()> {
        // A tree never holds two scenes, even transiently.
        self.scene = None;

        match self.backend.parse(data, &self.options) {
            Ok(scene) => {
                self.scene = Some(scene);
                Ok(())
            },
            Err(e) => {
                log::warn!("SVG parse failed: {}", e);
                Err(e)
            },
        }
    }

    /// Parse an SVG file into this tree.
    ///
    /// Only `.svg` and `.svgz` suffixes are accepted (case-insensitive).
    /// Like [`parse_from_data`](Self::parse_from_data), any previously
    /// loaded scene is dropped before the attempt.
    pub fn parse_from_path(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        self.scene = None;

        if !is_supported_path(path) {
            let suffix = path
                .extension()
                .and_then(OsStr::to_str)
                .unwrap_or("")
                .to_string();
            log::warn!("refusing to parse '{}': unsupported suffix", path.display());
            return Err(Error::UnsupportedSuffix(suffix));
        }

        let data = std::fs::read(path)?;
        self.parse_from_data(&data)
    }

    /// Drop the loaded scene, returning the tree to the empty state.
    pub fn reset(&mut self) {
        self.scene = None;
    }

    /// True iff a scene is currently loaded.
    pub fn is_valid(&self) -> bool {
        self.scene.is_some()
    }

    /// The intrinsic size declared by the loaded scene, or a zero size when
    /// the tree is empty.
    pub fn intrinsic_size(&self) -> Size {
        match &self.scene {
            Some(scene) => self.backend.intrinsic_size(scene),
            None => Size::default(),
        }
    }

    /// The loaded scene's width-over-height ratio.
    ///
    /// # Errors
    ///
    /// [`Error::NotLoaded`] when the tree is empty,
    /// [`Error::DegenerateAspectRatio`] when an intrinsic dimension is zero.
    pub fn aspect_ratio(&self) -> Result<f64> {
        let scene = self.scene.as_ref().ok_or(Error::NotLoaded)?;
        let size = self.backend.intrinsic_size(scene);
        size.aspect_ratio().ok_or(Error::DegenerateAspectRatio {
            width: size.width,
            height: size.height,
        })
    }

    /// Render the scene at the given fit specification.
    ///
    /// Resolves output dimensions, rasterizes through the backend, and
    /// normalizes the channel order to the tree's configured output order.
    ///
    /// # Errors
    ///
    /// [`Error::NotLoaded`] when no scene is loaded, plus any fit-resolution
    /// or backend error.
    pub fn render(&mut self, spec: FitSpec, background: Background) -> Result<RasterBuffer> {
        let scene = self.scene.as_ref().ok_or(Error::NotLoaded)?;
        let intrinsic = self.backend.intrinsic_size(scene);
        let fit = fit::resolve(intrinsic, spec)?;

        let data = self.backend.rasterize(scene, &fit, background)?;
        let buffer =
            RasterBuffer::from_vec(data, fit.size, ChannelOrder::Rgba, AlphaMode::Premultiplied)?;
        Ok(buffer.into_order(self.options.output_order))
    }

    /// Render at the scene's intrinsic size.
    pub fn render_original(&mut self, background: Background) -> Result<RasterBuffer> {
        self.render(FitSpec::Original, background)
    }

    /// Render at the intrinsic size scaled by a zoom factor.
    pub fn render_zoom(&mut self, factor: f32, background: Background) -> Result<RasterBuffer> {
        self.render(FitSpec::Zoom(factor), background)
    }

    /// Render to fit inside a bounding box, preserving the scene's aspect
    /// ratio. The result may be smaller than the box on one axis.
    pub fn render_to_bounds(
        &mut self,
        width: f32,
        height: f32,
        background: Background,
    ) -> Result<RasterBuffer> {
        self.render(FitSpec::FitBounds { width, height }, background)
    }
}
