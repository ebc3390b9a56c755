//! # SVG Oxide
//!
//! SVG rasterization toolkit: fit-to scaling, pixel-format conversion, and
//! render-tree lifecycle on top of the `resvg` scene engine.
//!
//! ## Core Features
//!
//! - **Fit resolution**: original size, zoom factor, fit-to-width/height,
//!   and aspect-preserving bounding-box fits with documented rounding
//! - **Pixel-format conversion**: RGBA/BGRA channel swap with a portable
//!   reference path and an SSSE3 fast path verified byte-for-byte against it
//! - **Render trees**: exclusive scene ownership with a well-defined
//!   empty/loaded lifecycle — a failed reparse never leaves a stale scene
//! - **Render caching**: single-entry memoization keyed by output pixel
//!   dimensions, for resize-driven embedding layers
//!
//! ## Architecture
//!
//! The rendering pipeline:
//!
//! 1. Parse SVG bytes or a file into a scene owned by a [`tree::RenderTree`]
//! 2. Resolve a [`fit::FitSpec`] against the scene's intrinsic size
//! 3. Rasterize through the [`backend::SceneBackend`] into native-layout pixels
//! 4. Normalize the channel order into a [`raster::RasterBuffer`]
//!
//! ## Quick Start
//!
//! ```no_run
//! use svg_oxide::{Background, FitSpec, RenderTree};
//!
//! # fn main() -> svg_oxide::error::Result<()> {
//! let mut tree = RenderTree::new();
//! tree.parse_from_path("logo.svg")?;
//!
//! let image = tree.render(
//!     FitSpec::FitBounds { width: 256.0, height: 256.0 },
//!     Background::Transparent,
//! )?;
//! image.save("logo.png")?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

// Error handling
pub mod error;

// Fit resolution
pub mod fit;
pub mod geometry;

// Pixel buffers and layout conversion
pub mod pixel;
pub mod raster;

// Scene engine boundary
pub mod backend;

// Render trees and caching
pub mod cache;
pub mod options;
pub mod tree;

// Re-exports
pub use backend::{Background, ResvgBackend, SceneBackend};
pub use cache::{IconPair, RenderCache, SvgView};
pub use error::{Error, Result};
pub use fit::{FitSpec, ResolvedFit};
pub use geometry::{PixelSize, Size};
pub use options::{ImageRendering, RenderOptions, ShapeRendering, TextRendering};
pub use pixel::{AlphaMode, ChannelOrder};
pub use raster::{RasterBuffer, Rgba8};
pub use tree::RenderTree;

/// Initialize the process-wide diagnostic log sink.
///
/// Routes this library's and the scene engine's `log` records to stderr via
/// `env_logger` (filterable through `RUST_LOG`, default level `warn`). Call
/// it at most once at startup; repeated calls are no-ops. Not intended to be
/// called concurrently with first use from multiple threads — the first call
/// wins and the rest wait.
pub fn init_log() {
    use std::sync::Once;

    static INIT: Once = Once::new();
    INIT.call_once(|| {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
            .init();
    });
}

// Version info
/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
