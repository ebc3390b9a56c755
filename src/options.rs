//! Rendering options, fixed at render-tree construction.

use crate::pixel::ChannelOrder;

/// Speed/quality tradeoff for shape rasterization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ShapeRendering {
    /// Favor rendering speed.
    OptimizeSpeed,
    /// Favor crisp, unantialiased edges.
    CrispEdges,
    /// Favor geometric accuracy.
    #[default]
    GeometricPrecision,
}

/// Speed/quality tradeoff for text rasterization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextRendering {
    /// Favor rendering speed.
    OptimizeSpeed,
    /// Favor legibility.
    #[default]
    OptimizeLegibility,
    /// Favor geometric accuracy.
    GeometricPrecision,
}

/// Speed/quality tradeoff for embedded image scaling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ImageRendering {
    /// Favor output quality.
    #[default]
    OptimizeQuality,
    /// Favor rendering speed.
    OptimizeSpeed,
}

/// Options for parsing and rendering, owned by a render tree.
///
/// Immutable after construction: create a new tree for new options.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderOptions {
    /// Target DPI used to resolve physical units (default: 96)
    pub dpi: f32,
    /// Shape rasterization mode
    pub shape_rendering: ShapeRendering,
    /// Text rasterization mode
    pub text_rendering: TextRendering,
    /// Embedded image scaling mode
    pub image_rendering: ImageRendering,
    /// Channel order of the raster buffers handed back to the caller
    /// (default: BGRA, the common toolkit layout)
    pub output_order: ChannelOrder,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            dpi: 96.0,
            shape_rendering: ShapeRendering::default(),
            text_rendering: TextRendering::default(),
            image_rendering: ImageRendering::default(),
            output_order: ChannelOrder::Bgra,
        }
    }
}

impl RenderOptions {
    /// Create options with a custom DPI.
    pub fn with_dpi(dpi: f32) -> Self {
        Self {
            dpi,
            ..Default::default()
        }
    }

    /// Set the shape rasterization mode.
    pub fn shape_rendering(mut self, mode: ShapeRendering) -> Self {
        self.shape_rendering = mode;
        self
    }

    /// Set the text rasterization mode.
    pub fn text_rendering(mut self, mode: TextRendering) -> Self {
        self.text_rendering = mode;
        self
    }

    /// Set the embedded image scaling mode.
    pub fn image_rendering(mut self, mode: ImageRendering) -> Self {
        self.image_rendering = mode;
        self
    }

    /// Set the channel order of returned raster buffers.
    pub fn output_order(mut self, order: ChannelOrder) -> Self {
        self.output_order = order;
        self
    }
}
