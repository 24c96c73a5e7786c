//! Minimal 8-bit grayscale buffers used by the rectified preview.

/// Borrowed row-major grayscale image.
#[derive(Clone, Copy, Debug)]
pub struct GrayImageView<'a> {
    pub width: usize,
    pub height: usize,
    pub data: &'a [u8], // row-major, len = w*h
}

/// Owned row-major grayscale image.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GrayImage {
    pub width: usize,
    pub height: usize,
    pub data: Vec<u8>,
}

impl GrayImage {
    pub fn view(&self) -> GrayImageView<'_> {
        GrayImageView {
            width: self.width,
            height: self.height,
            data: &self.data,
        }
    }
}

/// Pixel lookup with zero padding outside the image.
#[inline]
fn pixel_or_zero(src: &GrayImageView<'_>, x: i64, y: i64) -> f32 {
    if x < 0 || y < 0 || x >= src.width as i64 || y >= src.height as i64 {
        return 0.0;
    }
    src.data[y as usize * src.width + x as usize] as f32
}

#[inline]
pub fn sample_bilinear(src: &GrayImageView<'_>, x: f32, y: f32) -> f32 {
    if !x.is_finite() || !y.is_finite() {
        return 0.0;
    }
    let x0 = x.floor();
    let y0 = y.floor();
    let fx = x - x0;
    let fy = y - y0;
    let (xi, yi) = (x0 as i64, y0 as i64);

    let top = pixel_or_zero(src, xi, yi) * (1.0 - fx) + pixel_or_zero(src, xi + 1, yi) * fx;
    let bottom =
        pixel_or_zero(src, xi, yi + 1) * (1.0 - fx) + pixel_or_zero(src, xi + 1, yi + 1) * fx;
    top * (1.0 - fy) + bottom * fy
}

#[inline]
pub fn sample_bilinear_u8(src: &GrayImageView<'_>, x: f32, y: f32) -> u8 {
    sample_bilinear(src, x, y).round().clamp(0.0, 255.0) as u8
}
