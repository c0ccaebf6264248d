use crate::plane_desc::PlaneDesc;
use crate::{GeometryError, InvalidNumberOfPlanesError, RenderError};

/// Broad family of a pixel format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormatCategory {
    Rgb,
    Yuv,
    /// Single channel gray formats
    Luminance,
}

/// How the channels of a format are spread over memory planes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlaneLayout {
    /// All channels interleaved in one plane
    Packed,
    /// Luma plane followed by one plane of interleaved chroma pairs
    SemiPlanar,
    /// One plane per channel
    Planar,
}

impl PlaneLayout {
    pub const fn plane_count(self) -> usize {
        match self {
            PlaneLayout::Packed => 1,
            PlaneLayout::SemiPlanar => 2,
            PlaneLayout::Planar => 3,
        }
    }
}

/// Static description of a raw pixel format
#[derive(Debug, PartialEq, Eq)]
pub struct ImageFormat {
    category: FormatCategory,
    name: &'static str,
    display_name: &'static str,
    has_alpha: bool,
    has_multiple_byte_orderings: bool,
    is_compressed: bool,
    layout: PlaneLayout,
    planes: &'static [PlaneDesc],
}

impl ImageFormat {
    /// # Panics
    ///
    /// If the number of planes does not match `layout`. Formats are built in const context, so
    /// this is a compile time error for the built-in catalog.
    pub const fn new(
        category: FormatCategory,
        name: &'static str,
        display_name: &'static str,
        layout: PlaneLayout,
        planes: &'static [PlaneDesc],
    ) -> Self {
        assert!(
            planes.len() == layout.plane_count(),
            "plane count does not match the plane layout"
        );

        Self {
            category,
            name,
            display_name,
            has_alpha: false,
            has_multiple_byte_orderings: false,
            is_compressed: false,
            layout,
            planes,
        }
    }

    pub const fn with_alpha(mut self) -> Self {
        self.has_alpha = true;
        self
    }

    /// Samples wider than a byte, so the source byte order matters
    pub const fn with_multiple_byte_orderings(mut self) -> Self {
        self.has_multiple_byte_orderings = true;
        self
    }

    /// Samples are not byte aligned (e.g. RGB 5-6-5)
    pub const fn compressed(mut self) -> Self {
        self.is_compressed = true;
        self
    }

    pub fn category(&self) -> FormatCategory {
        self.category
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn display_name(&self) -> &'static str {
        self.display_name
    }

    pub fn has_alpha(&self) -> bool {
        self.has_alpha
    }

    pub fn has_multiple_byte_orderings(&self) -> bool {
        self.has_multiple_byte_orderings
    }

    pub fn is_compressed(&self) -> bool {
        self.is_compressed
    }

    pub fn layout(&self) -> PlaneLayout {
        self.layout
    }

    pub fn planes(&self) -> &'static [PlaneDesc] {
        self.planes
    }

    pub fn plane_count(&self) -> usize {
        self.planes.len()
    }

    /// Calculate the strides of an image in a packed buffer
    pub fn packed_strides(&self, width: usize) -> Option<Vec<usize>> {
        self.planes
            .iter()
            .map(|plane| plane.row_stride(width))
            .collect()
    }

    /// Size in bytes of one frame with packed strides and the planes stored back to back
    pub fn buffer_size(&self, width: usize, height: usize) -> Option<usize> {
        let mut size = 0usize;

        for plane in self.planes {
            let plane_size = plane.row_stride(width)?.checked_mul(plane.rows(height)?)?;
            size = size.checked_add(plane_size)?;
        }

        Some(size)
    }

    /// Resolve the byte geometry of every plane for the given dimensions.
    ///
    /// `row_strides` overrides the packed strides, each must be at least as large as the packed
    /// stride of its plane.
    pub fn plane_geometry(
        &self,
        width: usize,
        height: usize,
        row_strides: Option<&[usize]>,
    ) -> Result<Vec<PlaneGeometry>, RenderError> {
        if width == 0 || height == 0 {
            return Err(GeometryError::ZeroDimensions.into());
        }

        if let Some(strides) = row_strides {
            if strides.len() != self.planes.len() {
                return Err(InvalidNumberOfPlanesError {
                    expected: self.planes.len(),
                    got: strides.len(),
                }
                .into());
            }
        }

        let overflow = GeometryError::Overflow { width, height };

        let mut out = Vec::with_capacity(self.planes.len());

        for (i, plane) in self.planes.iter().enumerate() {
            let minimum = plane.row_stride(width).ok_or(overflow.clone())?;
            let rows = plane.rows(height).ok_or(overflow.clone())?;

            let stride = match row_strides {
                Some(strides) if strides[i] < minimum => {
                    return Err(GeometryError::InvalidStride {
                        plane: i,
                        minimum,
                        got: strides[i],
                    }
                    .into());
                }
                Some(strides) => strides[i],
                None => minimum,
            };

            if stride.checked_mul(rows).is_none() {
                return Err(overflow.into());
            }

            out.push(PlaneGeometry {
                stride,
                row_bytes: minimum,
                rows,
            });
        }

        Ok(out)
    }

    /// Check that every plane slice holds at least `stride * rows` bytes
    pub fn bounds_check(
        &self,
        planes: &[&[u8]],
        geometry: &[PlaneGeometry],
    ) -> Result<(), RenderError> {
        if planes.len() != geometry.len() {
            return Err(InvalidNumberOfPlanesError {
                expected: geometry.len(),
                got: planes.len(),
            }
            .into());
        }

        for (i, (slice, geometry)) in planes.iter().zip(geometry).enumerate() {
            if slice.len() < geometry.len() {
                return Err(RenderError::TruncatedSource {
                    plane: i,
                    needed: geometry.len(),
                    got: slice.len(),
                });
            }
        }

        Ok(())
    }
}

/// Byte geometry of one plane for a concrete image size
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaneGeometry {
    /// Distance between the starts of two rows in bytes
    pub stride: usize,
    /// Bytes of a row that carry samples
    pub row_bytes: usize,
    pub rows: usize,
}

impl PlaneGeometry {
    /// Bytes required to hold the whole plane
    pub fn len(&self) -> usize {
        // Checked in `ImageFormat::plane_geometry`
        self.stride * self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
