use crate::{ImageRenderer, RenderError, RenderOptions};
use enough::Unstoppable;
use rayon::iter::{IndexedParallelIterator, ParallelIterator};
use rayon::slice::ParallelSliceMut;

/// Same as [`ImageRenderer::render_planes`], decoding bands of rows on the rayon thread pool
#[inline(never)]
pub fn render_multi_thread(
    renderer: &ImageRenderer,
    planes: &[&[u8]],
    dst: &mut [u8],
    width: usize,
    height: usize,
    options: &RenderOptions,
) -> Result<(), RenderError> {
    let threads = num_cpus::get();

    if threads == 1 {
        return renderer.render_planes(planes, dst, width, height, options);
    }

    let frame = renderer.prepare(dst.len(), width, height, options)?;
    renderer.format().bounds_check(planes, &frame.geometry)?;

    let rows_per_band = height.div_ceil(threads);
    let band_len = rows_per_band * frame.out_row_bytes();

    let dst = &mut dst[..frame.out_len()];

    dst.par_chunks_mut(band_len)
        .enumerate()
        .try_for_each(|(band, dst)| {
            renderer.decode_rows(&frame, planes, band * rows_per_band, dst, &Unstoppable)
        })?;

    frame.finish(dst);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{BitmapFormat, Orientation, registry};

    #[test]
    fn matches_single_thread() {
        let (width, height) = (37, 29);

        let y: Vec<u8> = (0..width * height).map(|i| (i * 7 % 256) as u8).collect();
        let u: Vec<u8> = (0..19 * 15).map(|i| (i * 13 % 256) as u8).collect();
        let v: Vec<u8> = (0..19 * 15).map(|i| (255 - i * 5 % 256) as u8).collect();

        let options = RenderOptions::default()
            .with_bitmap(BitmapFormat::Bgra32)
            .with_orientation(Orientation::Transpose);

        let size = options.bitmap.buffer_size(width, height).unwrap();
        let mut single = vec![0u8; size];
        let mut multi = vec![0u8; size];

        registry::I420
            .render_planes(&[&y, &u, &v], &mut single, width, height, &options)
            .unwrap();
        render_multi_thread(&registry::I420, &[&y, &u, &v], &mut multi, width, height, &options)
            .unwrap();

        assert_eq!(single, multi);
    }
}
