//! EXIF style orientation of rendered frames.

/// How the stored pixels are transformed for display.
///
/// Values match the EXIF Orientation tag (TIFF tag 274).
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Orientation {
    /// No rotation or flip needed.
    #[default]
    Normal = 1,
    /// Flip horizontally (mirror left-right).
    FlipHorizontal = 2,
    /// Rotate 180 degrees.
    Rotate180 = 3,
    /// Flip vertically (mirror top-bottom).
    FlipVertical = 4,
    /// Transpose (rotate 90 CW then flip horizontally).
    Transpose = 5,
    /// Rotate 90 degrees clockwise.
    Rotate90 = 6,
    /// Transverse (rotate 90 CCW then flip horizontally).
    Transverse = 7,
    /// Rotate 270 degrees clockwise (= 90 CCW).
    Rotate270 = 8,
}

impl Orientation {
    /// Create from EXIF orientation value (1-8).
    ///
    /// Returns [`Normal`](Orientation::Normal) for out-of-range values.
    pub fn from_exif(value: u16) -> Self {
        match value {
            2 => Self::FlipHorizontal,
            3 => Self::Rotate180,
            4 => Self::FlipVertical,
            5 => Self::Transpose,
            6 => Self::Rotate90,
            7 => Self::Transverse,
            8 => Self::Rotate270,
            _ => Self::Normal,
        }
    }

    pub fn exif_value(self) -> u16 {
        self as u16
    }

    /// True for orientations involving a 90 or 270 degree rotation
    pub fn swaps_dimensions(self) -> bool {
        matches!(
            self,
            Self::Transpose | Self::Rotate90 | Self::Transverse | Self::Rotate270
        )
    }

    /// Display dimensions for the given stored dimensions
    pub fn display_dimensions(self, width: usize, height: usize) -> (usize, usize) {
        if self.swaps_dimensions() {
            (height, width)
        } else {
            (width, height)
        }
    }

    pub fn is_identity(self) -> bool {
        matches!(self, Self::Normal)
    }

    /// Map the stored pixel position `(x, y)` of a `width` x `height` frame to its display position
    #[inline(always)]
    pub fn map(self, x: usize, y: usize, width: usize, height: usize) -> (usize, usize) {
        match self {
            Self::Normal => (x, y),
            Self::FlipHorizontal => (width - 1 - x, y),
            Self::Rotate180 => (width - 1 - x, height - 1 - y),
            Self::FlipVertical => (x, height - 1 - y),
            Self::Transpose => (y, x),
            Self::Rotate90 => (height - 1 - y, x),
            Self::Transverse => (height - 1 - y, width - 1 - x),
            Self::Rotate270 => (y, width - 1 - x),
        }
    }
}

/// Rewrite `buf`, holding a `width` x `height` bitmap of `bytes_per_pixel` sized pixels, in display orientation
pub(crate) fn apply(
    orientation: Orientation,
    buf: &mut [u8],
    width: usize,
    height: usize,
    bytes_per_pixel: usize,
) {
    if orientation.is_identity() {
        return;
    }

    let len = width * height * bytes_per_pixel;
    let stored = buf[..len].to_vec();
    let (display_width, _) = orientation.display_dimensions(width, height);

    for (y, row) in stored.chunks_exact(width * bytes_per_pixel).enumerate() {
        for (x, px) in row.chunks_exact(bytes_per_pixel).enumerate() {
            let (dx, dy) = orientation.map(x, y, width, height);
            let offset = (dy * display_width + dx) * bytes_per_pixel;

            buf[offset..offset + bytes_per_pixel].copy_from_slice(px);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Orientation; 8] = [
        Orientation::Normal,
        Orientation::FlipHorizontal,
        Orientation::Rotate180,
        Orientation::FlipVertical,
        Orientation::Transpose,
        Orientation::Rotate90,
        Orientation::Transverse,
        Orientation::Rotate270,
    ];

    #[test]
    fn exif_round_trip() {
        for orientation in ALL {
            assert_eq!(Orientation::from_exif(orientation.exif_value()), orientation);
        }

        assert_eq!(Orientation::from_exif(0), Orientation::Normal);
        assert_eq!(Orientation::from_exif(9), Orientation::Normal);
    }

    #[test]
    fn map_stays_in_bounds_and_is_a_permutation() {
        let (w, h) = (3, 2);

        for orientation in ALL {
            let (dw, dh) = orientation.display_dimensions(w, h);
            let mut seen = vec![false; w * h];

            for y in 0..h {
                for x in 0..w {
                    let (dx, dy) = orientation.map(x, y, w, h);
                    assert!(dx < dw && dy < dh, "{orientation:?}");

                    assert!(!seen[dy * dw + dx], "{orientation:?} maps twice");
                    seen[dy * dw + dx] = true;
                }
            }
        }
    }

    #[test]
    fn rotate90_moves_top_left_to_top_right() {
        assert_eq!(Orientation::Rotate90.map(0, 0, 3, 2), (1, 0));
        assert_eq!(Orientation::Rotate270.map(0, 0, 3, 2), (0, 2));
    }

    #[test]
    fn apply_rotate90() {
        // 2x1 frame of 1 byte pixels: [a b] becomes a 1x2 column [a; b]
        let mut buf = vec![1u8, 2];
        apply(Orientation::Rotate90, &mut buf, 2, 1, 1);
        assert_eq!(buf, [1, 2]);

        // 2x2: [1 2; 3 4] rotated clockwise is [3 1; 4 2]
        let mut buf = vec![1u8, 2, 3, 4];
        apply(Orientation::Rotate90, &mut buf, 2, 2, 1);
        assert_eq!(buf, [3, 1, 4, 2]);

        let mut buf = vec![1u8, 2, 3, 4];
        apply(Orientation::FlipHorizontal, &mut buf, 2, 2, 1);
        assert_eq!(buf, [2, 1, 4, 3]);
    }
}
