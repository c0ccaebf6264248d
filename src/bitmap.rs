/// Layout of the rendered output bitmap
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BitmapFormat {
    /// 3 bytes per pixel in R G B order
    Rgb24,
    /// 4 bytes per pixel in R G B A order
    #[default]
    Rgba32,
    /// 4 bytes per pixel in B G R A order
    Bgra32,
    /// 4 native endian u16 per pixel in R G B A order
    Rgba64,
}

impl BitmapFormat {
    pub fn bits_per_channel(self) -> u32 {
        match self {
            BitmapFormat::Rgb24 | BitmapFormat::Rgba32 | BitmapFormat::Bgra32 => 8,
            BitmapFormat::Rgba64 => 16,
        }
    }

    pub fn bytes_per_pixel(self) -> usize {
        match self {
            BitmapFormat::Rgb24 => 3,
            BitmapFormat::Rgba32 | BitmapFormat::Bgra32 => 4,
            BitmapFormat::Rgba64 => 8,
        }
    }

    /// Required buffer size in bytes for a bitmap of the given dimensions
    pub fn buffer_size(self, width: usize, height: usize) -> Option<usize> {
        width
            .checked_mul(height)?
            .checked_mul(self.bytes_per_pixel())
    }

    /// Write one pixel, `px` holds R G B A at [`Self::bits_per_channel`] bits
    #[inline(always)]
    pub(crate) fn write(self, dst: &mut [u8], px: [u16; 4]) {
        let [r, g, b, a] = px;

        match self {
            BitmapFormat::Rgb24 => dst[..3].copy_from_slice(&[r as u8, g as u8, b as u8]),
            BitmapFormat::Rgba32 => dst[..4].copy_from_slice(&[r as u8, g as u8, b as u8, a as u8]),
            BitmapFormat::Bgra32 => dst[..4].copy_from_slice(&[b as u8, g as u8, r as u8, a as u8]),
            BitmapFormat::Rgba64 => {
                for (dst, c) in dst[..8].chunks_exact_mut(2).zip([r, g, b, a]) {
                    dst.copy_from_slice(&c.to_ne_bytes());
                }
            }
        }
    }
}

/// Writes the pixels of one output row
pub(crate) struct RowWriter<'a> {
    row: &'a mut [u8],
    format: BitmapFormat,
    bytes_per_pixel: usize,
}

impl<'a> RowWriter<'a> {
    pub(crate) fn new(row: &'a mut [u8], format: BitmapFormat) -> Self {
        Self {
            row,
            format,
            bytes_per_pixel: format.bytes_per_pixel(),
        }
    }

    #[inline(always)]
    pub(crate) fn put(&mut self, x: usize, px: [u16; 4]) {
        let offset = x * self.bytes_per_pixel;
        self.format
            .write(&mut self.row[offset..offset + self.bytes_per_pixel], px);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn channel_order() {
        let px = [1, 2, 3, 4];

        let mut rgb = [0u8; 3];
        BitmapFormat::Rgb24.write(&mut rgb, px);
        assert_eq!(rgb, [1, 2, 3]);

        let mut bgra = [0u8; 4];
        BitmapFormat::Bgra32.write(&mut bgra, px);
        assert_eq!(bgra, [3, 2, 1, 4]);

        let mut rgba64 = [0u8; 8];
        BitmapFormat::Rgba64.write(&mut rgba64, [0x1234, 0, 0, 0xFFFF]);
        assert_eq!(u16::from_ne_bytes([rgba64[0], rgba64[1]]), 0x1234);
        assert_eq!(u16::from_ne_bytes([rgba64[6], rgba64[7]]), 0xFFFF);
    }

    #[test]
    fn row_writer_offsets() {
        let mut row = [0u8; 6];
        let mut writer = RowWriter::new(&mut row, BitmapFormat::Rgb24);
        writer.put(1, [7, 8, 9, 255]);

        assert_eq!(row, [0, 0, 0, 7, 8, 9]);
    }
}
