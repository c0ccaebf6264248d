use crate::bitmap::RowWriter;
use crate::formats::{DecodeContext, Decoder};
use crate::pixel_format::{ImageFormat, PlaneGeometry, PlaneLayout};
use crate::source::{DataSource, StreamAccess};
use crate::{BitmapFormat, GeometryError, Orientation, RenderError, RenderOptions, orientation};
use enough::{Stop, Unstoppable};
use std::io::{Read, SeekFrom};
use tokio::io::{AsyncReadExt, AsyncSeekExt};

/// Renders frames of exactly one pixel format into interleaved bitmaps.
///
/// Renderers are stateless `static`s, see [`crate::registry`]. Every render call writes the
/// display oriented frame into the beginning of `dst`, which must hold at least
/// [`BitmapFormat::buffer_size`] bytes of the [`output_dimensions`](Self::output_dimensions).
#[derive(Debug)]
pub struct ImageRenderer {
    format: &'static ImageFormat,
    decoder: Decoder,
}

/// Resolved state of a single render call
#[derive(Debug)]
pub(crate) struct Frame {
    pub(crate) ctx: DecodeContext,
    pub(crate) geometry: Vec<PlaneGeometry>,
    pub(crate) width: usize,
    pub(crate) height: usize,
    pub(crate) bitmap: BitmapFormat,
    pub(crate) orientation: Orientation,
}

impl Frame {
    pub(crate) fn out_row_bytes(&self) -> usize {
        self.width * self.bitmap.bytes_per_pixel()
    }

    pub(crate) fn out_len(&self) -> usize {
        self.out_row_bytes() * self.height
    }

    /// Bytes of all planes stored back to back
    fn source_len(&self) -> Result<usize, GeometryError> {
        self.geometry
            .iter()
            .try_fold(0usize, |len, geometry| len.checked_add(geometry.len()))
            .ok_or(GeometryError::Overflow {
                width: self.width,
                height: self.height,
            })
    }

    /// Rotate / flip the decoded bitmap into display orientation
    pub(crate) fn finish(&self, dst: &mut [u8]) {
        orientation::apply(
            self.orientation,
            dst,
            self.width,
            self.height,
            self.bitmap.bytes_per_pixel(),
        );
    }
}

impl ImageRenderer {
    pub(crate) const fn new(format: &'static ImageFormat, decoder: Decoder) -> Self {
        Self { format, decoder }
    }

    pub fn format(&self) -> &'static ImageFormat {
        self.format
    }

    /// Bit depth used when [`RenderOptions::bit_depth`] is not set
    pub fn declared_bit_depth(&self) -> u32 {
        self.decoder.declared_bits()
    }

    /// Dimensions of the rendered bitmap after applying the orientation
    pub fn output_dimensions(
        &self,
        width: usize,
        height: usize,
        options: &RenderOptions,
    ) -> (usize, usize) {
        options.orientation.display_dimensions(width, height)
    }

    /// Render a frame read sequentially from `src`.
    ///
    /// `src` must be positioned at the first byte of the frame. Packed formats are streamed
    /// row by row, planar formats read each plane once.
    pub fn render(
        &self,
        src: &mut impl Read,
        dst: &mut [u8],
        width: usize,
        height: usize,
        options: &RenderOptions,
    ) -> Result<(), RenderError> {
        let frame = self.prepare(dst.len(), width, height, options)?;
        let dst = &mut dst[..frame.out_len()];

        if self.format.layout() == PlaneLayout::Packed {
            let geometry = frame.geometry[0];
            let mut row = Vec::new();

            for (y, out_row) in dst.chunks_exact_mut(frame.out_row_bytes()).enumerate() {
                let got = read_up_to(src, geometry.stride, &mut row)?;

                if got < geometry.stride {
                    return Err(RenderError::TruncatedSource {
                        plane: 0,
                        needed: geometry.len(),
                        got: y * geometry.stride + got,
                    });
                }

                self.decoder.decode_row(
                    &frame.ctx,
                    &[&row[..geometry.row_bytes]],
                    width,
                    &mut RowWriter::new(out_row, frame.bitmap),
                );
            }
        } else {
            let mut planes = Vec::with_capacity(frame.geometry.len());

            for (i, geometry) in frame.geometry.iter().enumerate() {
                let mut plane = Vec::new();
                let got = read_up_to(src, geometry.len(), &mut plane)?;

                if got < geometry.len() {
                    return Err(RenderError::TruncatedSource {
                        plane: i,
                        needed: geometry.len(),
                        got,
                    });
                }

                planes.push(plane);
            }

            let planes: Vec<&[u8]> = planes.iter().map(Vec::as_slice).collect();
            self.decode_rows(&frame, &planes, 0, dst, &Unstoppable)?;
        }

        frame.finish(dst);

        Ok(())
    }

    /// Render a frame from one slice per plane
    pub fn render_planes(
        &self,
        planes: &[&[u8]],
        dst: &mut [u8],
        width: usize,
        height: usize,
        options: &RenderOptions,
    ) -> Result<(), RenderError> {
        self.render_with_stop(planes, dst, width, height, options, &Unstoppable)
    }

    /// Render a frame whose planes are stored back to back in `buf`
    pub fn render_buffer(
        &self,
        buf: &[u8],
        dst: &mut [u8],
        width: usize,
        height: usize,
        options: &RenderOptions,
    ) -> Result<(), RenderError> {
        let geometry = self
            .format
            .plane_geometry(width, height, options.row_strides.as_deref())?;
        let planes = split_planes(buf, &geometry)?;

        self.render_planes(&planes, dst, width, height, options)
    }

    /// Like [`render_planes`](Self::render_planes), checking `stop` before every row
    pub fn render_with_stop(
        &self,
        planes: &[&[u8]],
        dst: &mut [u8],
        width: usize,
        height: usize,
        options: &RenderOptions,
        stop: &dyn Stop,
    ) -> Result<(), RenderError> {
        let frame = self.prepare(dst.len(), width, height, options)?;
        self.format.bounds_check(planes, &frame.geometry)?;

        let dst = &mut dst[..frame.out_len()];
        self.decode_rows(&frame, planes, 0, dst, stop)?;
        frame.finish(dst);

        Ok(())
    }

    /// Open `source`, seek to `offset` and render the frame stored there.
    ///
    /// The stream is closed before this returns, on success and on error.
    pub async fn render_source(
        &self,
        source: &impl DataSource,
        offset: u64,
        dst: &mut [u8],
        width: usize,
        height: usize,
        options: &RenderOptions,
    ) -> Result<(), RenderError> {
        let frame = self.prepare(dst.len(), width, height, options)?;

        let mut stream = source.open_stream(StreamAccess::Read).await?;
        stream.seek(SeekFrom::Start(offset)).await?;

        let len = frame.source_len()?;

        let mut buf = Vec::new();
        (&mut stream).take(len as u64).read_to_end(&mut buf).await?;

        drop(stream);

        let planes = split_planes(&buf, &frame.geometry)?;

        let dst = &mut dst[..frame.out_len()];
        self.decode_rows(&frame, &planes, 0, dst, &Unstoppable)?;
        frame.finish(dst);

        log::debug!(
            "rendered {}x{} {} frame at offset {offset}",
            width,
            height,
            self.format.name()
        );

        Ok(())
    }

    /// Validate the request and resolve everything that stays the same for every row
    pub(crate) fn prepare(
        &self,
        dst_len: usize,
        width: usize,
        height: usize,
        options: &RenderOptions,
    ) -> Result<Frame, RenderError> {
        let geometry = self
            .format
            .plane_geometry(width, height, options.row_strides.as_deref())?;

        let bits = self.resolve_bit_depth(options)?;

        let needed = options
            .bitmap
            .buffer_size(width, height)
            .ok_or(GeometryError::Overflow { width, height })?;

        if dst_len < needed {
            return Err(RenderError::BufferTooSmall {
                needed,
                got: dst_len,
            });
        }

        let ctx = DecodeContext::new(
            bits,
            options.byte_order,
            options.bitmap.bits_per_channel(),
            options.color_space,
            options.full_range,
            options.yuv_passthrough || !self.decoder.is_yuv(),
        );

        Ok(Frame {
            ctx,
            geometry,
            width,
            height,
            bitmap: options.bitmap,
            orientation: options.orientation,
        })
    }

    fn resolve_bit_depth(&self, options: &RenderOptions) -> Result<u32, RenderError> {
        let declared = self.decoder.declared_bits();

        let Some(bits) = options.bit_depth else {
            return Ok(declared);
        };

        let supported = match self.decoder.max_bits() {
            Some(max) => (1..=max).contains(&bits),
            // Not byte aligned, the layout fixes the depth
            None => bits == declared,
        };

        if supported {
            Ok(bits)
        } else {
            Err(RenderError::UnsupportedBitDepth {
                format: self.format.name(),
                bits,
            })
        }
    }

    /// Decode image rows `first_row..` into `dst`, one output row per `out_row_bytes` chunk.
    ///
    /// `planes` must have passed the bounds check against `frame.geometry`.
    pub(crate) fn decode_rows(
        &self,
        frame: &Frame,
        planes: &[&[u8]],
        first_row: usize,
        dst: &mut [u8],
        stop: &dyn Stop,
    ) -> Result<(), RenderError> {
        let descs = self.format.planes();

        for (i, out_row) in dst.chunks_exact_mut(frame.out_row_bytes()).enumerate() {
            stop.check()?;

            let y = first_row + i;

            let mut rows: [&[u8]; 3] = [&[]; 3];
            for (p, plane) in planes.iter().enumerate() {
                let geometry = &frame.geometry[p];
                let start = descs[p].source_row(y) * geometry.stride;

                rows[p] = &plane[start..start + geometry.row_bytes];
            }

            self.decoder.decode_row(
                &frame.ctx,
                &rows[..planes.len()],
                frame.width,
                &mut RowWriter::new(out_row, frame.bitmap),
            );
        }

        Ok(())
    }
}

/// Cut a contiguous frame into its planes
fn split_planes<'a>(
    mut buf: &'a [u8],
    geometry: &[PlaneGeometry],
) -> Result<Vec<&'a [u8]>, RenderError> {
    let mut planes = Vec::with_capacity(geometry.len());

    for (i, geometry) in geometry.iter().enumerate() {
        if buf.len() < geometry.len() {
            return Err(RenderError::TruncatedSource {
                plane: i,
                needed: geometry.len(),
                got: buf.len(),
            });
        }

        let (plane, rest) = buf.split_at(geometry.len());
        planes.push(plane);
        buf = rest;
    }

    Ok(planes)
}

/// Read at most `len` bytes into `buf`, growing it only by what the source delivers
fn read_up_to(src: &mut impl Read, len: usize, buf: &mut Vec<u8>) -> Result<usize, RenderError> {
    buf.clear();
    Ok(src.by_ref().take(len as u64).read_to_end(buf)?)
}
