use crate::ByteOrder;

/// Largest value representable with `bits` bits
#[inline(always)]
pub(crate) const fn max_value_for_bits(bits: u32) -> u32 {
    (1u32 << bits) - 1
}

/// Linearly rescale a sample from `from_bits` to `to_bits` significant bits.
///
/// Computes `round(value * (2^to_bits - 1) / (2^from_bits - 1))` in integer arithmetic, so
/// it is exact for equal bit depths and cannot overflow in either direction. Bits of `value`
/// above `from_bits` are ignored.
///
/// # Panics
///
/// If either bit depth is outside `1..=16`.
pub fn rescale(value: u16, from_bits: u32, to_bits: u32) -> u16 {
    assert!((1..=16).contains(&from_bits), "from_bits out of range");
    assert!((1..=16).contains(&to_bits), "to_bits out of range");

    Rescale::new(from_bits, to_bits).apply(value & max_value_for_bits(from_bits) as u16)
}

/// Precomputed rescale between two bit depths
#[derive(Debug, Clone, Copy)]
pub(crate) struct Rescale {
    in_max: u64,
    out_max: u64,
}

impl Rescale {
    pub(crate) const fn new(from_bits: u32, to_bits: u32) -> Self {
        Self {
            in_max: max_value_for_bits(from_bits) as u64,
            out_max: max_value_for_bits(to_bits) as u64,
        }
    }

    /// `value` must already be masked to the input bit depth
    #[inline(always)]
    pub(crate) fn apply(&self, value: u16) -> u16 {
        if self.in_max == self.out_max {
            return value;
        }

        ((value as u64 * self.out_max + self.in_max / 2) / self.in_max) as u16
    }
}

/// Where the significant bits of a sample sit inside its storage unit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Alignment {
    /// Significant bits in the low-order bits, e.g. I010 stores 10 bits in the low bits of a u16
    Low,
    /// Significant bits in the high-order bits, e.g. P010
    High,
}

/// Reads raw samples of a single storage width out of a plane
#[derive(Debug, Clone, Copy)]
pub(crate) struct SampleReader {
    bytes_per_sample: usize,
    order: ByteOrder,
    shift: u32,
    mask: u16,
}

impl SampleReader {
    /// `bits` must not exceed the storage width of `bytes_per_sample`
    pub(crate) fn new(
        bytes_per_sample: usize,
        bits: u32,
        alignment: Alignment,
        order: ByteOrder,
    ) -> Self {
        let storage_bits = (bytes_per_sample * 8) as u32;

        debug_assert!(bytes_per_sample == 1 || bytes_per_sample == 2);
        debug_assert!(bits >= 1 && bits <= storage_bits);

        let shift = match alignment {
            Alignment::Low => 0,
            Alignment::High => storage_bits - bits,
        };

        Self {
            bytes_per_sample,
            order,
            shift,
            mask: max_value_for_bits(bits) as u16,
        }
    }

    /// Read the sample starting at byte `offset` of `plane`
    #[inline(always)]
    pub(crate) fn read(&self, plane: &[u8], offset: usize) -> u16 {
        let raw = if self.bytes_per_sample == 1 {
            plane[offset] as u16
        } else {
            self.order.read_u16([plane[offset], plane[offset + 1]])
        };

        (raw >> self.shift) & self.mask
    }
}
