//! Render raw, unencoded pixel buffers into normalized interleaved bitmaps.
//!
//! Supports packed, semi-planar and planar layouts of RGB, YUV (4:2:0, 4:2:2, 4:4:4) and
//! luminance formats with 1 to 16 bit samples in either byte order. Every format has a
//! stateless [`ImageRenderer`] in the [`registry`].
//!
//! ```
//! use rawview::{BitmapFormat, RenderOptions, registry};
//!
//! // 2x2 I420 frame: four luma samples, one U and one V sample
//! let frame = [16u8, 16, 235, 235, 128, 128];
//!
//! let options = RenderOptions::default().with_bitmap(BitmapFormat::Rgb24);
//! let mut bitmap = vec![0u8; options.bitmap.buffer_size(2, 2).unwrap()];
//!
//! registry::I420.render_buffer(&frame, &mut bitmap, 2, 2, &options)?;
//!
//! assert_eq!(&bitmap[..3], &[0, 0, 0]);
//! assert_eq!(&bitmap[6..9], &[255, 255, 255]);
//! # Ok::<(), rawview::RenderError>(())
//! ```
//!
//! Rendering profiles (format, geometry and color hints) can be recovered from container
//! headers with a [`ProfileParser`], see [`parse_rendering_profile`].

pub use bitmap::BitmapFormat;
pub use bits::rescale;
pub use cancel::CancellationToken;
pub use color::ColorSpace;
pub use endian::ByteOrder;
pub use error::{
    Cancelled, GeometryError, InvalidNumberOfPlanesError, ParseError, RenderError,
};
#[cfg(feature = "multi-thread")]
pub use multi_thread::render_multi_thread;
pub use options::RenderOptions;
pub use orientation::Orientation;
pub use parser::{FileFormatParser, ProfileParser, Y4mParser, parse_rendering_profile};
pub use pixel_format::{FormatCategory, ImageFormat, PlaneGeometry, PlaneLayout};
pub use plane_desc::{Op, PlaneDesc};
pub use profile::RenderingProfile;
pub use renderer::ImageRenderer;
pub use source::{DataSource, FileDataSource, MemoryDataSource, StreamAccess};

pub use enough::{Stop, StopReason, Unstoppable};

mod bitmap;
mod bits;
mod cancel;
mod color;
mod endian;
mod error;
mod formats;
#[cfg(feature = "multi-thread")]
mod multi_thread;
mod options;
mod orientation;
pub mod parser;
mod pixel_format;
mod plane_desc;
mod profile;
pub mod registry;
mod renderer;
mod source;
