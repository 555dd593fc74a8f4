//! Capability interfaces the core consumes.
//!
//! Rasterization, image encoding, and archive bundling are injected as
//! traits so tests can substitute fakes and callers can plug in whatever
//! renderer their environment provides.

pub mod archive;
pub mod jpeg;

pub use archive::{ArchiveEntry, ZipArchiveBuilder};
pub use jpeg::JpegCodec;

use crate::error::{ArchiveError, StrategyError};
use lopdf::{Document, ObjectId};

/// Raw RGB8 pixel buffer, row-major.
#[derive(Debug, Clone)]
pub struct PixelMap {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
}

impl PixelMap {
    pub fn new(width: u32, height: u32, data: Vec<u8>) -> Self {
        debug_assert_eq!(data.len(), (width * height * 3) as usize);
        Self {
            width,
            height,
            data,
        }
    }
}

/// Renders one decoded page into pixels at a linear scale factor.
///
/// No pure-Rust rasterizer ships with this crate; the CLI runs without one
/// (the cascade then starts at the image-downsampling strategy) while
/// embedders and tests inject their own.
pub trait PageRenderer {
    fn render_page(
        &self,
        doc: &Document,
        page_id: ObjectId,
        scale: f32,
    ) -> Result<PixelMap, StrategyError>;
}

/// Encodes a pixel buffer as a lossy image. Quality is in [0, 1].
pub trait ImageCodec {
    fn encode_jpeg(&self, pixels: &PixelMap, quality: f32) -> Result<Vec<u8>, StrategyError>;
}

/// Builds a single archive from named byte buffers.
pub trait ArchiveBuilder {
    fn build(&self, entries: &[ArchiveEntry]) -> Result<Vec<u8>, ArchiveError>;
}

/// The injected capabilities one compression call runs with.
#[derive(Clone, Copy)]
pub struct Capabilities<'a> {
    pub renderer: Option<&'a dyn PageRenderer>,
    pub images: &'a dyn ImageCodec,
}

impl Default for Capabilities<'static> {
    fn default() -> Self {
        static JPEG: JpegCodec = JpegCodec;
        Capabilities {
            renderer: None,
            images: &JPEG,
        }
    }
}

impl<'a> Capabilities<'a> {
    pub fn with_renderer(renderer: &'a dyn PageRenderer) -> Self {
        static JPEG: JpegCodec = JpegCodec;
        Capabilities {
            renderer: Some(renderer),
            images: &JPEG,
        }
    }
}
