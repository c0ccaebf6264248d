//! Catalog of the built-in renderers.
//!
//! Every supported pixel format has exactly one [`ImageRenderer`] `static`, named after the
//! format. Use [`find`] to resolve a format name at runtime.

use crate::bits::Alignment;
use crate::formats::{Decoder, Luminance, PackedRgb, Rgb565, YuvPacked, YuvPlanar, uv, vu};
use crate::pixel_format::{FormatCategory, ImageFormat, PlaneLayout};
use crate::plane_desc::{
    PlaneDesc, chroma, full, interleaved_chroma, packed, packed_422,
};
use crate::renderer::ImageRenderer;

const YUV420_U8: [PlaneDesc; 3] = [full(1), chroma(2, 2, 1), chroma(2, 2, 1)];
const YUV422_U8: [PlaneDesc; 3] = [full(1), chroma(2, 1, 1), chroma(2, 1, 1)];
const YUV444_U8: [PlaneDesc; 3] = [full(1), chroma(1, 1, 1), chroma(1, 1, 1)];
const YUV420_U16: [PlaneDesc; 3] = [full(2), chroma(2, 2, 2), chroma(2, 2, 2)];
const YUV422_U16: [PlaneDesc; 3] = [full(2), chroma(2, 1, 2), chroma(2, 1, 2)];
const YUV444_U16: [PlaneDesc; 3] = [full(2), chroma(1, 1, 2), chroma(1, 1, 2)];

const NV12_U8: [PlaneDesc; 2] = [full(1), interleaved_chroma(2, 2, 1)];
const NV16_U8: [PlaneDesc; 2] = [full(1), interleaved_chroma(2, 1, 1)];
const NV24_U8: [PlaneDesc; 2] = [full(1), interleaved_chroma(1, 1, 1)];
const NV12_U16: [PlaneDesc; 2] = [full(2), interleaved_chroma(2, 2, 2)];

const PACKED_422_U8: [PlaneDesc; 1] = [packed_422(1)];
const PACKED_422_U16: [PlaneDesc; 1] = [packed_422(2)];

const RGB_U8: [PlaneDesc; 1] = [packed(3, 1)];
const RGBA_U8: [PlaneDesc; 1] = [packed(4, 1)];
const RGB_U16: [PlaneDesc; 1] = [packed(3, 2)];
const RGBA_U16: [PlaneDesc; 1] = [packed(4, 2)];
/// One 16 bit word per pixel
const RGB_565_WORD: [PlaneDesc; 1] = [packed(1, 2)];

const LUMA_U8: [PlaneDesc; 1] = [full(1)];
const LUMA_U16: [PlaneDesc; 1] = [full(2)];

macro_rules! renderers {
    ($(
        $(#[$meta:meta])*
        $name:ident($format:ident) = $desc:expr => $decoder:expr;
    )*) => {
        $(
            static $format: ImageFormat = $desc;

            $(#[$meta])*
            pub static $name: ImageRenderer = ImageRenderer::new(&$format, $decoder);
        )*

        static ALL: [&ImageRenderer; [$(stringify!($name)),*].len()] = [$(&$name),*];
    };
}

use FormatCategory::{Luminance as Luma, Rgb, Yuv};
use PlaneLayout::{Packed, Planar, SemiPlanar};

renderers! {
    /// 8 bit YUV 4:2:0, planes Y U V
    I420(I420_FORMAT) = ImageFormat::new(Yuv, "I420", "YUV 4:2:0 planar", Planar, &YUV420_U8)
        => Decoder::YuvPlanar(YuvPlanar::planar(2, 1, 8, uv));
    /// 8 bit YUV 4:2:0, planes Y V U
    YV12(YV12_FORMAT) = ImageFormat::new(Yuv, "YV12", "YVU 4:2:0 planar", Planar, &YUV420_U8)
        => Decoder::YuvPlanar(YuvPlanar::planar(2, 1, 8, vu));
    /// 8 bit YUV 4:2:2, planes Y U V
    I422(I422_FORMAT) = ImageFormat::new(Yuv, "I422", "YUV 4:2:2 planar", Planar, &YUV422_U8)
        => Decoder::YuvPlanar(YuvPlanar::planar(2, 1, 8, uv));
    /// 8 bit YUV 4:2:2, planes Y V U
    YV16(YV16_FORMAT) = ImageFormat::new(Yuv, "YV16", "YVU 4:2:2 planar", Planar, &YUV422_U8)
        => Decoder::YuvPlanar(YuvPlanar::planar(2, 1, 8, vu));
    /// 8 bit YUV 4:4:4, planes Y U V
    I444(I444_FORMAT) = ImageFormat::new(Yuv, "I444", "YUV 4:4:4 planar", Planar, &YUV444_U8)
        => Decoder::YuvPlanar(YuvPlanar::planar(1, 1, 8, uv));
    /// 8 bit YUV 4:4:4, planes Y V U
    YV24(YV24_FORMAT) = ImageFormat::new(Yuv, "YV24", "YVU 4:4:4 planar", Planar, &YUV444_U8)
        => Decoder::YuvPlanar(YuvPlanar::planar(1, 1, 8, vu));
    /// 10 bit YUV 4:2:0 in the low bits of 16 bit samples
    I010(I010_FORMAT) = ImageFormat::new(Yuv, "I010", "YUV 4:2:0 planar 10-bit", Planar, &YUV420_U16)
        .with_multiple_byte_orderings()
        => Decoder::YuvPlanar(YuvPlanar::planar(2, 2, 10, uv));
    /// 10 bit YUV 4:2:2 in the low bits of 16 bit samples
    I210(I210_FORMAT) = ImageFormat::new(Yuv, "I210", "YUV 4:2:2 planar 10-bit", Planar, &YUV422_U16)
        .with_multiple_byte_orderings()
        => Decoder::YuvPlanar(YuvPlanar::planar(2, 2, 10, uv));
    /// 12 bit YUV 4:2:2 in the low bits of 16 bit samples
    I212(I212_FORMAT) = ImageFormat::new(Yuv, "I212", "YUV 4:2:2 planar 12-bit", Planar, &YUV422_U16)
        .with_multiple_byte_orderings()
        => Decoder::YuvPlanar(YuvPlanar::planar(2, 2, 12, uv));
    /// 10 bit YUV 4:4:4 in the low bits of 16 bit samples
    I410(I410_FORMAT) = ImageFormat::new(Yuv, "I410", "YUV 4:4:4 planar 10-bit", Planar, &YUV444_U16)
        .with_multiple_byte_orderings()
        => Decoder::YuvPlanar(YuvPlanar::planar(1, 2, 10, uv));
    /// 16 bit YUV 4:2:2, planes Y U V
    P216(P216_FORMAT) = ImageFormat::new(Yuv, "P216", "YUV 4:2:2 planar 16-bit", Planar, &YUV422_U16)
        .with_multiple_byte_orderings()
        => Decoder::YuvPlanar(YuvPlanar::planar(2, 2, 16, uv));

    /// 8 bit YUV 4:2:0, Y plane followed by interleaved U V
    NV12(NV12_FORMAT) = ImageFormat::new(Yuv, "NV12", "YUV 4:2:0 semi-planar", SemiPlanar, &NV12_U8)
        => Decoder::YuvPlanar(YuvPlanar::semi_planar(2, 1, 8, Alignment::Low, uv));
    /// 8 bit YUV 4:2:0, Y plane followed by interleaved V U
    NV21(NV21_FORMAT) = ImageFormat::new(Yuv, "NV21", "YVU 4:2:0 semi-planar", SemiPlanar, &NV12_U8)
        => Decoder::YuvPlanar(YuvPlanar::semi_planar(2, 1, 8, Alignment::Low, vu));
    NV16(NV16_FORMAT) = ImageFormat::new(Yuv, "NV16", "YUV 4:2:2 semi-planar", SemiPlanar, &NV16_U8)
        => Decoder::YuvPlanar(YuvPlanar::semi_planar(2, 1, 8, Alignment::Low, uv));
    NV61(NV61_FORMAT) = ImageFormat::new(Yuv, "NV61", "YVU 4:2:2 semi-planar", SemiPlanar, &NV16_U8)
        => Decoder::YuvPlanar(YuvPlanar::semi_planar(2, 1, 8, Alignment::Low, vu));
    NV24(NV24_FORMAT) = ImageFormat::new(Yuv, "NV24", "YUV 4:4:4 semi-planar", SemiPlanar, &NV24_U8)
        => Decoder::YuvPlanar(YuvPlanar::semi_planar(1, 1, 8, Alignment::Low, uv));
    NV42(NV42_FORMAT) = ImageFormat::new(Yuv, "NV42", "YVU 4:4:4 semi-planar", SemiPlanar, &NV24_U8)
        => Decoder::YuvPlanar(YuvPlanar::semi_planar(1, 1, 8, Alignment::Low, vu));
    /// 10 bit YUV 4:2:0 semi-planar in the high bits of 16 bit samples
    P010(P010_FORMAT) = ImageFormat::new(Yuv, "P010", "YUV 4:2:0 semi-planar 10-bit", SemiPlanar, &NV12_U16)
        .with_multiple_byte_orderings()
        => Decoder::YuvPlanar(YuvPlanar::semi_planar(2, 2, 10, Alignment::High, uv));
    P016(P016_FORMAT) = ImageFormat::new(Yuv, "P016", "YUV 4:2:0 semi-planar 16-bit", SemiPlanar, &NV12_U16)
        .with_multiple_byte_orderings()
        => Decoder::YuvPlanar(YuvPlanar::semi_planar(2, 2, 16, Alignment::High, uv));

    YUYV(YUYV_FORMAT) = ImageFormat::new(Yuv, "YUYV", "YUV 4:2:2 packed (YUYV)", Packed, &PACKED_422_U8)
        => Decoder::YuvPacked(YuvPacked::new(*b"YUYV", 1, 8, Alignment::Low));
    YVYU(YVYU_FORMAT) = ImageFormat::new(Yuv, "YVYU", "YUV 4:2:2 packed (YVYU)", Packed, &PACKED_422_U8)
        => Decoder::YuvPacked(YuvPacked::new(*b"YVYU", 1, 8, Alignment::Low));
    UYVY(UYVY_FORMAT) = ImageFormat::new(Yuv, "UYVY", "YUV 4:2:2 packed (UYVY)", Packed, &PACKED_422_U8)
        => Decoder::YuvPacked(YuvPacked::new(*b"UYVY", 1, 8, Alignment::Low));
    VYUY(VYUY_FORMAT) = ImageFormat::new(Yuv, "VYUY", "YUV 4:2:2 packed (VYUY)", Packed, &PACKED_422_U8)
        => Decoder::YuvPacked(YuvPacked::new(*b"VYUY", 1, 8, Alignment::Low));
    /// 16 bit YUYV, samples high aligned so 10 and 12 bit content renders as well
    Y216(Y216_FORMAT) = ImageFormat::new(Yuv, "Y216", "YUV 4:2:2 packed 16-bit", Packed, &PACKED_422_U16)
        .with_multiple_byte_orderings()
        => Decoder::YuvPacked(YuvPacked::new(*b"YUYV", 2, 16, Alignment::High));

    RGB_888(RGB_888_FORMAT) = ImageFormat::new(Rgb, "RGB_888", "RGB 8-8-8", Packed, &RGB_U8)
        => Decoder::Rgb(PackedRgb::rgb(0, 1, 2, 1));
    BGR_888(BGR_888_FORMAT) = ImageFormat::new(Rgb, "BGR_888", "BGR 8-8-8", Packed, &RGB_U8)
        => Decoder::Rgb(PackedRgb::rgb(2, 1, 0, 1));
    RGBA_8888(RGBA_8888_FORMAT) = ImageFormat::new(Rgb, "RGBA_8888", "RGBA 8-8-8-8", Packed, &RGBA_U8)
        .with_alpha()
        => Decoder::Rgb(PackedRgb::rgba(0, 1, 2, 3, 1));
    BGRA_8888(BGRA_8888_FORMAT) = ImageFormat::new(Rgb, "BGRA_8888", "BGRA 8-8-8-8", Packed, &RGBA_U8)
        .with_alpha()
        => Decoder::Rgb(PackedRgb::rgba(2, 1, 0, 3, 1));
    ARGB_8888(ARGB_8888_FORMAT) = ImageFormat::new(Rgb, "ARGB_8888", "ARGB 8-8-8-8", Packed, &RGBA_U8)
        .with_alpha()
        => Decoder::Rgb(PackedRgb::rgba(1, 2, 3, 0, 1));
    ABGR_8888(ABGR_8888_FORMAT) = ImageFormat::new(Rgb, "ABGR_8888", "ABGR 8-8-8-8", Packed, &RGBA_U8)
        .with_alpha()
        => Decoder::Rgb(PackedRgb::rgba(3, 2, 1, 0, 1));
    /// Red in the high 5 bits of a 16 bit word
    RGB_565(RGB_565_FORMAT) = ImageFormat::new(Rgb, "RGB_565", "RGB 5-6-5", Packed, &RGB_565_WORD)
        .with_multiple_byte_orderings()
        .compressed()
        => Decoder::Rgb565(Rgb565 { bgr: false });
    /// Blue in the high 5 bits of a 16 bit word
    BGR_565(BGR_565_FORMAT) = ImageFormat::new(Rgb, "BGR_565", "BGR 5-6-5", Packed, &RGB_565_WORD)
        .with_multiple_byte_orderings()
        .compressed()
        => Decoder::Rgb565(Rgb565 { bgr: true });
    RGB_161616(RGB_161616_FORMAT) = ImageFormat::new(Rgb, "RGB_161616", "RGB 16-16-16", Packed, &RGB_U16)
        .with_multiple_byte_orderings()
        => Decoder::Rgb(PackedRgb::rgb(0, 1, 2, 2));
    RGBA_16161616(RGBA_16161616_FORMAT) = ImageFormat::new(Rgb, "RGBA_16161616", "RGBA 16-16-16-16", Packed, &RGBA_U16)
        .with_alpha()
        .with_multiple_byte_orderings()
        => Decoder::Rgb(PackedRgb::rgba(0, 1, 2, 3, 2));

    L8(L8_FORMAT) = ImageFormat::new(Luma, "L8", "Luminance 8-bit", Packed, &LUMA_U8)
        => Decoder::Luminance(Luminance { bytes_per_sample: 1, bits: 8 });
    L16(L16_FORMAT) = ImageFormat::new(Luma, "L16", "Luminance 16-bit", Packed, &LUMA_U16)
        .with_multiple_byte_orderings()
        => Decoder::Luminance(Luminance { bytes_per_sample: 2, bits: 16 });
}

/// All built-in renderers
pub fn renderers() -> &'static [&'static ImageRenderer] {
    &ALL
}

/// Look up a renderer by format name, ignoring ASCII case
pub fn find(name: &str) -> Option<&'static ImageRenderer> {
    ALL.iter()
        .copied()
        .find(|renderer| renderer.format().name().eq_ignore_ascii_case(name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn names_are_unique() {
        let mut seen = HashSet::new();

        for renderer in renderers() {
            assert!(
                seen.insert(renderer.format().name().to_ascii_lowercase()),
                "duplicate {}",
                renderer.format().name()
            );
        }

        assert_eq!(seen.len(), 36);
    }

    #[test]
    fn find_is_case_insensitive() {
        assert!(std::ptr::eq(find("nv12").unwrap(), &NV12));
        assert!(std::ptr::eq(find("Rgba_8888").unwrap(), &RGBA_8888));
        assert!(find("H264").is_none());
    }

    #[test]
    fn renderer_binds_its_format() {
        assert_eq!(P216.format().name(), "P216");
        assert_eq!(P216.declared_bit_depth(), 16);
        assert!(P216.format().has_multiple_byte_orderings());
        assert_eq!(P216.format().plane_count(), 3);

        assert!(RGB_565.format().is_compressed());
        assert!(ARGB_8888.format().has_alpha());
        assert!(!I420.format().has_multiple_byte_orderings());
    }

    #[test]
    fn wide_formats_declare_byte_orderings() {
        for renderer in renderers() {
            let wide = renderer.declared_bit_depth() > 8;

            assert_eq!(
                wide,
                renderer.format().has_multiple_byte_orderings(),
                "{}",
                renderer.format().name()
            );
        }
    }
}
