//! Default scene engine backed by the `resvg` crate.

use resvg::tiny_skia;
use resvg::usvg;

use super::{Background, SceneBackend};
use crate::error::{Error, Result};
use crate::fit::ResolvedFit;
use crate::geometry::Size;
use crate::options::{ImageRendering, RenderOptions, ShapeRendering, TextRendering};

/// A parsed SVG scene. Opaque: the engine's types never cross this boundary.
pub struct ResvgScene {
    tree: usvg::Tree,
}

impl std::fmt::Debug for ResvgScene {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResvgScene").finish_non_exhaustive()
    }
}

/// Scene backend implemented on `resvg`/`usvg`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ResvgBackend;

impl ResvgBackend {
    /// Create a new backend.
    pub fn new() -> Self {
        Self
    }
}

impl SceneBackend for ResvgBackend {
    type Scene = ResvgScene;

    fn parse(&self, data: &[u8], options: &RenderOptions) -> Result<ResvgScene> {
        let mut opt = usvg::Options::default();
        opt.dpi = options.dpi;
        opt.shape_rendering = to_usvg_shape(options.shape_rendering);
        opt.text_rendering = to_usvg_text(options.text_rendering);
        opt.image_rendering = to_usvg_image(options.image_rendering);

        // usvg detects and inflates gzip-compressed (.svgz) data itself.
        let tree = usvg::Tree::from_data(data, &opt).map_err(map_parse_error)?;
        Ok(ResvgScene { tree })
    }

    fn intrinsic_size(&self, scene: &ResvgScene) -> Size {
        let size = scene.tree.size();
        Size::new(f64::from(size.width()), f64::from(size.height()))
    }

    fn rasterize(
        &mut self,
        scene: &ResvgScene,
        fit: &ResolvedFit,
        background: Background,
    ) -> Result<Vec<u8>> {
        let mut pixmap =
            tiny_skia::Pixmap::new(fit.size.width, fit.size.height).ok_or(Error::InvalidDimensions {
                width: fit.size.width,
                height: fit.size.height,
            })?;

        if let Background::Solid { r, g, b } = background {
            pixmap.fill(tiny_skia::Color::from_rgba8(r, g, b, 255));
        }

        log::debug!(
            "rasterizing scene at {}x{} (scale {:.3}x{:.3})",
            fit.size.width,
            fit.size.height,
            fit.scale_x,
            fit.scale_y
        );

        let transform = tiny_skia::Transform::from_scale(fit.scale_x, fit.scale_y);
        resvg::render(&scene.tree, transform, &mut pixmap.as_mut());

        Ok(pixmap.take())
    }
}

fn map_parse_error(err: usvg::Error) -> Error {
    match err {
        usvg::Error::NotAnUtf8Str => Error::NotUtf8,
        other => Error::Parse(other.to_string()),
    }
}

fn to_usvg_shape(mode: ShapeRendering) -> usvg::ShapeRendering {
    match mode {
        ShapeRendering::OptimizeSpeed => usvg::ShapeRendering::OptimizeSpeed,
        ShapeRendering::CrispEdges => usvg::ShapeRendering::CrispEdges,
        ShapeRendering::GeometricPrecision => usvg::ShapeRendering::GeometricPrecision,
    }
}

fn to_usvg_text(mode: TextRendering) -> usvg::TextRendering {
    match mode {
        TextRendering::OptimizeSpeed => usvg::TextRendering::OptimizeSpeed,
        TextRendering::OptimizeLegibility => usvg::TextRendering::OptimizeLegibility,
        TextRendering::GeometricPrecision => usvg::TextRendering::GeometricPrecision,
    }
}

fn to_usvg_image(mode: ImageRendering) -> usvg::ImageRendering {
    match mode {
        ImageRendering::OptimizeQuality => usvg::ImageRendering::OptimizeQuality,
        ImageRendering::OptimizeSpeed => usvg::ImageRendering::OptimizeSpeed,
    }
}
