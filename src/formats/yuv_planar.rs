use super::{DecodeContext, SelectUv};
use crate::bitmap::RowWriter;
use crate::bits::Alignment;

/// Planar (3 planes) and semi-planar (luma + interleaved chroma) YUV
#[derive(Debug, Clone, Copy)]
pub(crate) struct YuvPlanar {
    /// Horizontal chroma subsampling, 1 or 2
    pub(crate) h_sub: usize,
    /// Chroma pairs interleaved in a single plane
    pub(crate) interleaved: bool,
    pub(crate) bytes_per_sample: usize,
    pub(crate) bits: u32,
    pub(crate) alignment: Alignment,
    pub(crate) select_uv: SelectUv,
}

impl YuvPlanar {
    pub(crate) const fn planar(
        h_sub: usize,
        bytes_per_sample: usize,
        bits: u32,
        select_uv: SelectUv,
    ) -> Self {
        Self {
            h_sub,
            interleaved: false,
            bytes_per_sample,
            bits,
            alignment: Alignment::Low,
            select_uv,
        }
    }

    pub(crate) const fn semi_planar(
        h_sub: usize,
        bytes_per_sample: usize,
        bits: u32,
        alignment: Alignment,
        select_uv: SelectUv,
    ) -> Self {
        Self {
            h_sub,
            interleaved: true,
            bytes_per_sample,
            bits,
            alignment,
            select_uv,
        }
    }

    pub(super) fn decode_row(
        &self,
        ctx: &DecodeContext,
        rows: &[&[u8]],
        width: usize,
        dst: &mut RowWriter<'_>,
    ) {
        let reader = ctx.reader(self.bytes_per_sample, self.alignment);
        let bps = self.bytes_per_sample;

        let luma = rows[0];
        let luma_at = |x: usize| reader.read(luma, x * bps);

        // Raw chroma samples in memory order at chroma column `cx`
        let chroma_at = |cx: usize| {
            if self.interleaved {
                let offset = cx * 2 * bps;
                (reader.read(rows[1], offset), reader.read(rows[1], offset + bps))
            } else {
                let offset = cx * bps;
                (reader.read(rows[1], offset), reader.read(rows[2], offset))
            }
        };

        if self.h_sub == 1 {
            for x in 0..width {
                let (c1, c2) = chroma_at(x);
                let (u, v) = (self.select_uv)(c1, c2);

                dst.put(x, ctx.yuv_pixel(luma_at(x), u, v));
            }

            return;
        }

        let pairs = width / 2;

        for cx in 0..pairs {
            let x = cx * 2;

            let (c1, c2) = chroma_at(cx);
            let (u, v) = (self.select_uv)(c1, c2);

            dst.put(x, ctx.yuv_pixel(luma_at(x), u, v));
            dst.put(x + 1, ctx.yuv_pixel(luma_at(x + 1), u, v));
        }

        if width % 2 == 1 {
            // Trailing column shares the chroma of the last complete pair
            let x = width - 1;

            let (c1, c2) = chroma_at(pairs.saturating_sub(1));
            let (u, v) = (self.select_uv)(c1, c2);

            dst.put(x, ctx.yuv_pixel(luma_at(x), u, v));
        }
    }
}
