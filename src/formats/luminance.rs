use super::DecodeContext;
use crate::bitmap::RowWriter;
use crate::bits::Alignment;

/// Single channel gray
#[derive(Debug, Clone, Copy)]
pub(crate) struct Luminance {
    pub(crate) bytes_per_sample: usize,
    pub(crate) bits: u32,
}

impl Luminance {
    pub(super) fn decode_row(
        &self,
        ctx: &DecodeContext,
        row: &[u8],
        width: usize,
        dst: &mut RowWriter<'_>,
    ) {
        let reader = ctx.reader(self.bytes_per_sample, Alignment::Low);

        for x in 0..width {
            let l = ctx.rescale.apply(reader.read(row, x * self.bytes_per_sample));
            dst.put(x, [l, l, l, ctx.opaque]);
        }
    }
}
