use super::DecodeContext;
use crate::bitmap::RowWriter;
use crate::bits::{Alignment, Rescale};

/// Byte aligned interleaved RGB with optional alpha
#[derive(Debug, Clone, Copy)]
pub(crate) struct PackedRgb {
    pub(crate) channels: usize,
    pub(crate) r: usize,
    pub(crate) g: usize,
    pub(crate) b: usize,
    pub(crate) a: Option<usize>,
    pub(crate) bytes_per_sample: usize,
    pub(crate) bits: u32,
}

impl PackedRgb {
    pub(crate) const fn rgb(r: usize, g: usize, b: usize, bytes_per_sample: usize) -> Self {
        Self {
            channels: 3,
            r,
            g,
            b,
            a: None,
            bytes_per_sample,
            bits: bytes_per_sample as u32 * 8,
        }
    }

    pub(crate) const fn rgba(
        r: usize,
        g: usize,
        b: usize,
        a: usize,
        bytes_per_sample: usize,
    ) -> Self {
        Self {
            channels: 4,
            r,
            g,
            b,
            a: Some(a),
            bytes_per_sample,
            bits: bytes_per_sample as u32 * 8,
        }
    }

    pub(super) fn decode_row(
        &self,
        ctx: &DecodeContext,
        row: &[u8],
        width: usize,
        dst: &mut RowWriter<'_>,
    ) {
        let reader = ctx.reader(self.bytes_per_sample, Alignment::Low);
        let pixel_size = self.channels * self.bytes_per_sample;

        for x in 0..width {
            let base = x * pixel_size;
            let channel = |i: usize| ctx.rescale.apply(reader.read(row, base + i * self.bytes_per_sample));

            let a = match self.a {
                Some(a) => channel(a),
                None => ctx.opaque,
            };

            dst.put(x, [channel(self.r), channel(self.g), channel(self.b), a]);
        }
    }
}

/// 16 bit words holding 5 bits red, 6 bits green and 5 bits blue
#[derive(Debug, Clone, Copy)]
pub(crate) struct Rgb565 {
    /// Blue in the high bits instead of red
    pub(crate) bgr: bool,
}

impl Rgb565 {
    pub(super) fn decode_row(
        &self,
        ctx: &DecodeContext,
        row: &[u8],
        width: usize,
        dst: &mut RowWriter<'_>,
    ) {
        let five = Rescale::new(5, ctx.out_bits);
        let six = Rescale::new(6, ctx.out_bits);

        for x in 0..width {
            let word = ctx.order.read_u16([row[x * 2], row[x * 2 + 1]]);

            let high = five.apply(word >> 11);
            let g = six.apply((word >> 5) & 0x3F);
            let low = five.apply(word & 0x1F);

            let (r, b) = if self.bgr { (low, high) } else { (high, low) };

            dst.put(x, [r, g, b, ctx.opaque]);
        }
    }
}
