/// Byte order of multi-byte samples in the source buffer
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ByteOrder {
    #[default]
    LittleEndian,
    BigEndian,
}

impl ByteOrder {
    #[inline(always)]
    pub(crate) fn read_u16(self, bytes: [u8; 2]) -> u16 {
        match self {
            ByteOrder::LittleEndian => u16::from_le_bytes(bytes),
            ByteOrder::BigEndian => u16::from_be_bytes(bytes),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::ByteOrder;

    #[test]
    fn read_u16_ignores_native_order() {
        assert_eq!(ByteOrder::LittleEndian.read_u16([0x34, 0x12]), 0x1234);
        assert_eq!(ByteOrder::BigEndian.read_u16([0x12, 0x34]), 0x1234);
    }
}
