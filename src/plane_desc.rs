/// Description of a single memory plane, used for stride calculation, buffer sizes and bounds checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaneDesc {
    pub(crate) width_op: Op,
    pub(crate) height_op: Op,

    /// Bytes per unit counted by `width_op`, e.g. 1 for u8 samples or 4 for a YUYV macro pixel
    pub(crate) bytes_per_sample: usize,
}

impl PlaneDesc {
    pub const fn new(width_op: Op, height_op: Op, bytes_per_sample: usize) -> Self {
        assert!(bytes_per_sample >= 1, "bytes_per_sample must be at least 1");

        Self {
            width_op,
            height_op,
            bytes_per_sample,
        }
    }

    pub fn bytes_per_sample(&self) -> usize {
        self.bytes_per_sample
    }

    /// Minimum row stride in bytes for an image of the given width
    pub fn row_stride(&self, width: usize) -> Option<usize> {
        self.width_op.op(width)?.checked_mul(self.bytes_per_sample)
    }

    /// Number of rows in this plane for an image of the given height
    pub fn rows(&self, height: usize) -> Option<usize> {
        self.height_op.op(height)
    }

    /// Row of this plane that holds the samples of image row `y`
    #[inline]
    pub(crate) fn source_row(&self, y: usize) -> usize {
        match self.height_op {
            Op::Mul(n) => y * n,
            Op::DivCeil(n) => y / n,
            Op::Identity => y,
        }
    }
}

/// Plane's number of samples in relation to width / height
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    Mul(usize),
    /// Divide and round up, so a trailing odd column/row still gets its own sample
    DivCeil(usize),
    Identity,
}

impl Op {
    pub(crate) fn op(self, lhs: usize) -> Option<usize> {
        match self {
            Op::Mul(rhs) => lhs.checked_mul(rhs),
            Op::DivCeil(rhs) => Some(lhs.div_ceil(rhs)),
            Op::Identity => Some(lhs),
        }
    }
}

pub(crate) const fn full(bytes_per_sample: usize) -> PlaneDesc {
    PlaneDesc::new(Op::Identity, Op::Identity, bytes_per_sample)
}

/// Chroma plane of a planar format with the given horizontal/vertical subsampling
pub(crate) const fn chroma(h: usize, v: usize, bytes_per_sample: usize) -> PlaneDesc {
    PlaneDesc::new(sub_op(h), sub_op(v), bytes_per_sample)
}

/// Interleaved chroma plane of a semi-planar format, one sample pair per chroma position
pub(crate) const fn interleaved_chroma(h: usize, v: usize, bytes_per_sample: usize) -> PlaneDesc {
    PlaneDesc::new(sub_op(h), sub_op(v), bytes_per_sample * 2)
}

/// Single interleaved plane holding `samples` per pixel
pub(crate) const fn packed(samples: usize, bytes_per_sample: usize) -> PlaneDesc {
    PlaneDesc::new(Op::Mul(samples), Op::Identity, bytes_per_sample)
}

/// Packed 4:2:2 plane, one 4 sample macro pixel per 2 pixels
pub(crate) const fn packed_422(bytes_per_sample: usize) -> PlaneDesc {
    PlaneDesc::new(Op::DivCeil(2), Op::Identity, bytes_per_sample * 4)
}

const fn sub_op(n: usize) -> Op {
    if n == 1 { Op::Identity } else { Op::DivCeil(n) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chroma_stride_rounds_up() {
        let plane = chroma(2, 1, 2);

        assert_eq!(plane.row_stride(4), Some(4));
        assert_eq!(plane.row_stride(5), Some(6));
        assert_eq!(plane.rows(5), Some(5));

        let plane = chroma(2, 2, 1);
        assert_eq!(plane.rows(5), Some(3));
        assert_eq!(plane.source_row(4), 2);
        assert_eq!(plane.source_row(3), 1);
    }

    #[test]
    fn interleaved_strides() {
        // NV16: U and V interleaved, half width
        assert_eq!(interleaved_chroma(2, 1, 1).row_stride(6), Some(6));
        assert_eq!(interleaved_chroma(2, 1, 1).row_stride(5), Some(6));

        // NV24: full width chroma pairs
        assert_eq!(interleaved_chroma(1, 1, 1).row_stride(5), Some(10));

        // P010: 2 bytes per sample
        assert_eq!(interleaved_chroma(2, 2, 2).row_stride(6), Some(12));
    }

    #[test]
    fn packed_strides() {
        assert_eq!(packed_422(1).row_stride(4), Some(8));
        assert_eq!(packed_422(1).row_stride(3), Some(8));
        assert_eq!(packed(4, 2).row_stride(3), Some(24));
    }

    #[test]
    fn overflow_is_reported() {
        assert_eq!(packed(4, 2).row_stride(usize::MAX), None);
    }
}
