use crate::bits::max_value_for_bits;
use crate::color::mat_idxs::*;

/// YUV color matrix used to convert to RGB
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorSpace {
    /// YUV Rec. ITU-R BT.601-7 625
    #[default]
    BT601,

    /// YUV Rec. ITU-R BT.709-6
    BT709,

    /// YUV Rec. ITU-R BT.2020-2
    BT2020,
}

impl ColorSpace {
    pub(crate) fn yuv_to_rgb_mat(self) -> &'static [[f32; 3]; 3] {
        match self {
            ColorSpace::BT601 => &BT601_YUV_TO_RGB,
            ColorSpace::BT709 => &BT709_YUV_TO_RGB,
            ColorSpace::BT2020 => &BT2020_YUV_TO_RGB,
        }
    }
}

/// Converts YUV samples of a fixed bit depth to RGB samples of the same bit depth
#[derive(Debug, Clone, Copy)]
pub(crate) struct YuvToRgb {
    mat: &'static [[f32; 3]; 3],

    max_value: f32,

    y_offset: f32,
    y_scale: f32,
    uv_center: f32,
    uv_scale: f32,
}

impl YuvToRgb {
    pub(crate) fn new(space: ColorSpace, full_range: bool, bits: u32) -> Self {
        let max_value = max_value_for_bits(bits) as f32;

        // Range definitions are given for 8 bits and scale with the sample depth
        let unit = (1u32 << bits) as f32 / 256.0;
        let uv_center = (1u32 << (bits - 1)) as f32;

        let (y_offset, y_range, uv_range) = if full_range {
            (0.0, max_value, max_value)
        } else {
            // Y 16..=235, U & V 16..=240
            (16.0 * unit, 219.0 * unit, 224.0 * unit)
        };

        Self {
            mat: space.yuv_to_rgb_mat(),
            max_value,
            y_offset,
            y_scale: 1.0 / y_range,
            uv_center,
            uv_scale: 1.0 / uv_range,
        }
    }

    #[inline(always)]
    pub(crate) fn convert(&self, y: u16, u: u16, v: u16) -> [u16; 3] {
        let mat = self.mat;

        let y = (y as f32 - self.y_offset) * self.y_scale;
        let u = (u as f32 - self.uv_center) * self.uv_scale;
        let v = (v as f32 - self.uv_center) * self.uv_scale;

        let r = y + v * mat[V][R];
        let g = y + u * mat[U][G] + v * mat[V][G];
        let b = y + u * mat[U][B];

        [self.quantize(r), self.quantize(g), self.quantize(b)]
    }

    #[inline(always)]
    fn quantize(&self, value: f32) -> u16 {
        (value.clamp(0.0, 1.0) * self.max_value).round() as u16
    }
}

#[rustfmt::skip]
macro_rules! make_matrices {
    ($($yuv_to_rgb:ident: $kr:expr, $kg:expr, $kb:expr;)*) => {
        $(
        pub(crate) const $yuv_to_rgb: [[f32; 3]; 3] = [
            // R                 G                                  B
            [1.0,                1.0,                               1.0            ], // Y
            [0.0,               (-($kb / $kg)) * (2.0 - 2.0 * $kb), 2.0 - 2.0 * $kb], // U
            [(2.0 - 2.0 * $kr), (-($kr / $kg)) * (2.0 - 2.0 * $kr), 0.0            ], // V
        ];
        )*
    };
}

make_matrices! {
    BT601_YUV_TO_RGB: 0.299,  0.587,  0.114;
    BT709_YUV_TO_RGB: 0.2126, 0.7152, 0.0722;
    BT2020_YUV_TO_RGB: 0.2627, 0.678, 0.0593;
}
