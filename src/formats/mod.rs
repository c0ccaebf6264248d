//! Decoding families, one algorithm per memory layout, parameterized by a small config

use crate::bitmap::RowWriter;
use crate::bits::{Alignment, Rescale, SampleReader};
use crate::color::YuvToRgb;
use crate::{ByteOrder, ColorSpace};

mod luminance;
mod rgb;
mod yuv_packed;
mod yuv_planar;

pub(crate) use luminance::Luminance;
pub(crate) use rgb::{PackedRgb, Rgb565};
pub(crate) use yuv_packed::YuvPacked;
pub(crate) use yuv_planar::YuvPlanar;

/// Maps the two raw chroma samples of a format, in memory order, to `(u, v)`
pub(crate) type SelectUv = fn(u16, u16) -> (u16, u16);

/// Chroma stored U first
pub(crate) fn uv(first: u16, second: u16) -> (u16, u16) {
    (first, second)
}

/// Chroma stored V first
pub(crate) fn vu(first: u16, second: u16) -> (u16, u16) {
    (second, first)
}

#[derive(Debug, Clone, Copy)]
pub(crate) enum Decoder {
    YuvPlanar(YuvPlanar),
    YuvPacked(YuvPacked),
    Rgb(PackedRgb),
    Rgb565(Rgb565),
    Luminance(Luminance),
}

impl Decoder {
    /// Bit depth of the format when the caller doesn't override it
    pub(crate) const fn declared_bits(&self) -> u32 {
        match self {
            Decoder::YuvPlanar(d) => d.bits,
            Decoder::YuvPacked(d) => d.bits,
            Decoder::Rgb(d) => d.bits,
            Decoder::Rgb565(_) => 16,
            Decoder::Luminance(d) => d.bits,
        }
    }

    /// Largest bit depth a sample can carry, `None` if the depth cannot be overridden at all
    pub(crate) const fn max_bits(&self) -> Option<u32> {
        let bytes_per_sample = match self {
            Decoder::YuvPlanar(d) => d.bytes_per_sample,
            Decoder::YuvPacked(d) => d.bytes_per_sample,
            Decoder::Rgb(d) => d.bytes_per_sample,
            Decoder::Rgb565(_) => return None,
            Decoder::Luminance(d) => d.bytes_per_sample,
        };

        Some(bytes_per_sample as u32 * 8)
    }

    pub(crate) fn is_yuv(&self) -> bool {
        matches!(self, Decoder::YuvPlanar(_) | Decoder::YuvPacked(_))
    }

    /// Decode one output row.
    ///
    /// `rows` holds, per plane, the source row that covers this output row, trimmed to its
    /// minimum row length.
    pub(crate) fn decode_row(
        &self,
        ctx: &DecodeContext,
        rows: &[&[u8]],
        width: usize,
        dst: &mut RowWriter<'_>,
    ) {
        match self {
            Decoder::YuvPlanar(d) => d.decode_row(ctx, rows, width, dst),
            Decoder::YuvPacked(d) => d.decode_row(ctx, rows[0], width, dst),
            Decoder::Rgb(d) => d.decode_row(ctx, rows[0], width, dst),
            Decoder::Rgb565(d) => d.decode_row(ctx, rows[0], width, dst),
            Decoder::Luminance(d) => d.decode_row(ctx, rows[0], width, dst),
        }
    }
}

/// Per render call state, resolved once from the options
#[derive(Debug, Clone, Copy)]
pub(crate) struct DecodeContext {
    /// Effective bit depth of the source samples
    pub(crate) bits: u32,
    pub(crate) order: ByteOrder,
    pub(crate) out_bits: u32,
    /// Source bit depth to output bit depth
    pub(crate) rescale: Rescale,
    /// `None` writes Y, U and V unconverted into R, G and B
    pub(crate) yuv: Option<YuvToRgb>,
    /// Fully opaque alpha at the output bit depth
    pub(crate) opaque: u16,
}

impl DecodeContext {
    pub(crate) fn new(
        bits: u32,
        order: ByteOrder,
        out_bits: u32,
        color_space: ColorSpace,
        full_range: bool,
        yuv_passthrough: bool,
    ) -> Self {
        Self {
            bits,
            order,
            out_bits,
            rescale: Rescale::new(bits, out_bits),
            yuv: (!yuv_passthrough).then(|| YuvToRgb::new(color_space, full_range, out_bits)),
            opaque: Rescale::new(1, out_bits).apply(1),
        }
    }

    pub(crate) fn reader(&self, bytes_per_sample: usize, alignment: Alignment) -> SampleReader {
        SampleReader::new(bytes_per_sample, self.bits, alignment, self.order)
    }

    /// Rescale and convert one set of raw YUV samples to an output pixel
    #[inline(always)]
    pub(crate) fn yuv_pixel(&self, y: u16, u: u16, v: u16) -> [u16; 4] {
        let y = self.rescale.apply(y);
        let u = self.rescale.apply(u);
        let v = self.rescale.apply(v);

        let [r, g, b] = match &self.yuv {
            Some(yuv) => yuv.convert(y, u, v),
            None => [y, u, v],
        };

        [r, g, b, self.opaque]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn select_uv_strategies() {
        assert_eq!(uv(1, 2), (1, 2));
        assert_eq!(vu(1, 2), (2, 1));
    }

    #[test]
    fn passthrough_only_rescales() {
        let ctx = DecodeContext::new(
            16,
            ByteOrder::LittleEndian,
            8,
            ColorSpace::BT601,
            false,
            true,
        );

        assert_eq!(ctx.yuv_pixel(0xFFFF, 0, 0x8080), [255, 0, 128, 255]);
    }
}
