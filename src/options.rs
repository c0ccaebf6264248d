use crate::{BitmapFormat, ByteOrder, ColorSpace, Orientation};

/// Parameters of a single render request
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    pub bitmap: BitmapFormat,
    /// Byte order of samples wider than 8 bits
    pub byte_order: ByteOrder,
    /// Effective bit depth, overrides the format's declared depth
    pub bit_depth: Option<u32>,
    pub color_space: ColorSpace,
    /// Full (PC) range instead of limited (video) range YUV
    pub full_range: bool,
    /// Write Y, U and V into R, G and B without conversion
    pub yuv_passthrough: bool,
    /// Row stride in bytes of every plane, packed strides when `None`
    pub row_strides: Option<Vec<usize>>,
    pub orientation: Orientation,
}

impl RenderOptions {
    pub fn with_bitmap(mut self, bitmap: BitmapFormat) -> Self {
        self.bitmap = bitmap;
        self
    }

    pub fn with_byte_order(mut self, byte_order: ByteOrder) -> Self {
        self.byte_order = byte_order;
        self
    }

    pub fn with_bit_depth(mut self, bits: u32) -> Self {
        self.bit_depth = Some(bits);
        self
    }

    pub fn with_color_space(mut self, color_space: ColorSpace) -> Self {
        self.color_space = color_space;
        self
    }

    pub fn with_full_range(mut self, full_range: bool) -> Self {
        self.full_range = full_range;
        self
    }

    pub fn with_yuv_passthrough(mut self, passthrough: bool) -> Self {
        self.yuv_passthrough = passthrough;
        self
    }

    pub fn with_row_strides(mut self, strides: impl Into<Vec<usize>>) -> Self {
        self.row_strides = Some(strides.into());
        self
    }

    pub fn with_orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }
}
