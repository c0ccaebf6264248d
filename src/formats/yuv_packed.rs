use super::{DecodeContext, SelectUv};
use crate::bitmap::RowWriter;
use crate::bits::Alignment;

/// Packed 4:2:2 YUV, a 4 sample macro pixel holds two luma and one chroma pair
#[derive(Debug, Clone, Copy)]
pub(crate) struct YuvPacked {
    /// Sample positions inside the macro pixel
    pub(crate) y0: usize,
    pub(crate) y1: usize,
    pub(crate) c0: usize,
    pub(crate) c1: usize,
    pub(crate) bytes_per_sample: usize,
    pub(crate) bits: u32,
    pub(crate) alignment: Alignment,
    pub(crate) select_uv: SelectUv,
}

impl YuvPacked {
    /// `order` names the sample order of a macro pixel, e.g. `*b"YUYV"`.
    ///
    /// # Panics
    ///
    /// If `order` does not contain two `Y`s and one of each `U` and `V`
    pub(crate) const fn new(
        order: [u8; 4],
        bytes_per_sample: usize,
        bits: u32,
        alignment: Alignment,
    ) -> Self {
        let mut ys = [usize::MAX; 2];
        let mut u = usize::MAX;
        let mut v = usize::MAX;

        let mut i = 0;
        while i < 4 {
            match order[i] {
                b'Y' if ys[0] == usize::MAX => ys[0] = i,
                b'Y' => ys[1] = i,
                b'U' => u = i,
                b'V' => v = i,
                _ => panic!("invalid macro pixel sample"),
            }
            i += 1;
        }

        assert!(ys[1] != usize::MAX && u != usize::MAX && v != usize::MAX);

        // Chroma positions in memory order, the strategy restores U and V
        let (c0, c1, select_uv): (usize, usize, SelectUv) = if u < v {
            (u, v, super::uv)
        } else {
            (v, u, super::vu)
        };

        Self {
            y0: ys[0],
            y1: ys[1],
            c0,
            c1,
            bytes_per_sample,
            bits,
            alignment,
            select_uv,
        }
    }

    pub(super) fn decode_row(
        &self,
        ctx: &DecodeContext,
        row: &[u8],
        width: usize,
        dst: &mut RowWriter<'_>,
    ) {
        let reader = ctx.reader(self.bytes_per_sample, self.alignment);
        let bps = self.bytes_per_sample;
        let macro_pixel = bps * 4;

        let sample = |m: usize, i: usize| reader.read(row, m * macro_pixel + i * bps);
        let chroma = |m: usize| (self.select_uv)(sample(m, self.c0), sample(m, self.c1));

        let pairs = width / 2;

        for m in 0..pairs {
            let (u, v) = chroma(m);

            dst.put(m * 2, ctx.yuv_pixel(sample(m, self.y0), u, v));
            dst.put(m * 2 + 1, ctx.yuv_pixel(sample(m, self.y1), u, v));
        }

        if width % 2 == 1 {
            // Trailing column shares the chroma of the last complete pair
            let (u, v) = chroma(pairs.saturating_sub(1));

            dst.put(width - 1, ctx.yuv_pixel(sample(pairs, self.y0), u, v));
        }
    }
}
