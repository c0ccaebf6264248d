use crate::{ByteOrder, ColorSpace, ImageRenderer, Orientation, RenderOptions, registry};

/// Metadata recovered by a [`FileFormatParser`](crate::FileFormatParser) about how to render a
/// file. Every field is optional, unset fields fall back to the render defaults.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct RenderingProfile {
    /// Human readable name of the profile, usually the container format
    pub name: String,
    /// Pixel format name as understood by [`registry::find`]
    pub format_name: Option<String>,
    pub width: Option<usize>,
    pub height: Option<usize>,
    /// Offset of the first frame's pixel data from the start of the source
    pub data_offset: u64,
    pub byte_order: Option<ByteOrder>,
    pub bit_depth: Option<u32>,
    pub color_space: Option<ColorSpace>,
    pub full_range: Option<bool>,
    pub row_strides: Option<Vec<usize>>,
    pub orientation: Option<Orientation>,
    /// Frames per second as numerator / denominator
    pub frame_rate: Option<(u32, u32)>,
}

impl RenderingProfile {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Renderer for [`format_name`](Self::format_name), if it names a known format
    pub fn renderer(&self) -> Option<&'static ImageRenderer> {
        registry::find(self.format_name.as_deref()?)
    }

    /// Render options with every value of this profile applied on top of the defaults
    pub fn to_options(&self) -> RenderOptions {
        self.apply_to(RenderOptions::default())
    }

    /// Apply every value of this profile on top of `options`
    pub fn apply_to(&self, mut options: RenderOptions) -> RenderOptions {
        if let Some(byte_order) = self.byte_order {
            options.byte_order = byte_order;
        }

        if let Some(bits) = self.bit_depth {
            options.bit_depth = Some(bits);
        }

        if let Some(color_space) = self.color_space {
            options.color_space = color_space;
        }

        if let Some(full_range) = self.full_range {
            options.full_range = full_range;
        }

        if let Some(strides) = &self.row_strides {
            options.row_strides = Some(strides.clone());
        }

        if let Some(orientation) = self.orientation {
            options.orientation = orientation;
        }

        options
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::BitmapFormat;

    #[test]
    fn empty_profile_keeps_defaults() {
        assert_eq!(RenderingProfile::new("empty").to_options(), RenderOptions::default());
    }

    #[test]
    fn values_override_options() {
        let profile = RenderingProfile {
            byte_order: Some(ByteOrder::BigEndian),
            bit_depth: Some(12),
            full_range: Some(true),
            orientation: Some(Orientation::Rotate270),
            ..RenderingProfile::new("test")
        };

        let options = profile.apply_to(RenderOptions::default().with_bitmap(BitmapFormat::Rgba64));

        assert_eq!(options.bitmap, BitmapFormat::Rgba64);
        assert_eq!(options.byte_order, ByteOrder::BigEndian);
        assert_eq!(options.bit_depth, Some(12));
        assert!(options.full_range);
        assert_eq!(options.orientation, Orientation::Rotate270);
        assert_eq!(options.color_space, ColorSpace::BT601);
    }

    #[test]
    fn resolves_renderer() {
        let profile = RenderingProfile {
            format_name: Some("i420".into()),
            ..RenderingProfile::new("test")
        };

        assert_eq!(profile.renderer().unwrap().format().name(), "I420");
        assert!(RenderingProfile::new("none").renderer().is_none());
    }
}
