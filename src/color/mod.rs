pub(crate) mod space;

pub use space::ColorSpace;
pub(crate) use space::YuvToRgb;

pub(crate) mod mat_idxs {
    pub(crate) const Y: usize = 0;
    pub(crate) const U: usize = 1;
    pub(crate) const V: usize = 2;

    pub(crate) const R: usize = 0;
    pub(crate) const G: usize = 1;
    pub(crate) const B: usize = 2;
}
