//! The boundary between this crate and the scene-graph engine.
//!
//! Everything behind [`SceneBackend`] is opaque: the engine parses SVG bytes
//! into a scene it alone understands, reports the scene's intrinsic size,
//! and rasterizes it into native-layout RGBA bytes. The rest of the pipeline
//! (fit resolution, channel normalization, caching, lifecycle) never looks
//! inside a scene.
//!
//! [`ResvgBackend`] is the default engine. Tests substitute mock backends to
//! observe call patterns without rasterizing anything.

mod resvg_backend;

pub use resvg_backend::{ResvgBackend, ResvgScene};

use crate::error::Result;
use crate::fit::ResolvedFit;
use crate::geometry::Size;
use crate::options::RenderOptions;
use crate::raster::Rgba8;

/// Background for a render: either nothing, or one fully opaque color.
///
/// Partial-alpha backgrounds are not supported; this mirrors the underlying
/// rasterizer's background parameter, which accepts "no background" or a
/// solid RGB value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Background {
    /// No background: pixels not covered by the scene stay transparent.
    #[default]
    Transparent,
    /// A fully opaque background color underneath the scene.
    Solid {
        /// Red
        r: u8,
        /// Green
        g: u8,
        /// Blue
        b: u8,
    },
}

impl Background {
    /// The fill color this background paints before the scene composites
    /// over it.
    pub fn fill_color(self) -> Rgba8 {
        match self {
            Self::Transparent => Rgba8::TRANSPARENT,
            Self::Solid { r, g, b } => Rgba8::opaque(r, g, b),
        }
    }
}

/// The minimum engine surface the render pipeline needs.
///
/// A scene is exclusively owned by whoever holds it; dropping it releases
/// the engine resources. Implementations are not expected to be thread-safe
/// beyond ordinary `Send`.
pub trait SceneBackend {
    /// The engine's parsed scene-graph representation.
    type Scene;

    /// Parse SVG bytes (plain or gzip-compressed) into a scene.
    fn parse(&self, data: &[u8], options: &RenderOptions) -> Result<Self::Scene>;

    /// The intrinsic size declared by the scene.
    ///
    /// A zero or undefined size is a valid return, not an error; fit
    /// resolution decides whether it is renderable.
    fn intrinsic_size(&self, scene: &Self::Scene) -> Size;

    /// Rasterize a scene at resolved output dimensions over the given
    /// background, returning premultiplied RGBA bytes in the engine's native
    /// channel order (`width * height * 4` of them).
    fn rasterize(
        &mut self,
        scene: &Self::Scene,
        fit: &ResolvedFit,
        background: Background,
    ) -> Result<Vec<u8>>;
}
