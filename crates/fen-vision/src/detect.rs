//! Helpers over `image::GrayImage`: loading photographs and producing the
//! rectified board preview.

use crate::{core, BoardReader, BoardReading, CornerSource, PieceSource, ReadError};
use std::path::Path;

#[cfg(feature = "tracing")]
use tracing::instrument;

/// Errors produced by the image helpers.
#[derive(thiserror::Error, Debug)]
pub enum DetectError {
    #[error("invalid grayscale image dimensions (width={width}, height={height})")]
    InvalidGrayDimensions { width: u32, height: u32 },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Image(#[from] ::image::ImageError),

    #[error(transparent)]
    Read(#[from] ReadError),
}

/// Convert an `image::GrayImage` into the lightweight `fen-vision-core` view type.
pub fn gray_view(img: &::image::GrayImage) -> core::GrayImageView<'_> {
    core::GrayImageView {
        width: img.width() as usize,
        height: img.height() as usize,
        data: img.as_raw(),
    }
}

/// Decode a photograph from disk and convert it to 8-bit grayscale.
pub fn load_gray(path: impl AsRef<Path>) -> Result<::image::GrayImage, DetectError> {
    Ok(::image::ImageReader::open(path)?
        .with_guessed_format()?
        .decode()?
        .to_luma8())
}

/// Run `reader` on a grayscale photograph.
#[cfg_attr(
    feature = "tracing",
    instrument(level = "info", skip(reader, img), fields(width = img.width(), height = img.height()))
)]
pub fn read_gray<C, P>(
    reader: &BoardReader<C, P>,
    img: &::image::GrayImage,
) -> Result<BoardReading, DetectError>
where
    C: CornerSource<::image::GrayImage>,
    P: PieceSource<::image::GrayImage>,
{
    Ok(reader.read(img)?)
}

/// Resample the board region of `img` into its canonical rectangle.
pub fn rectified_preview(
    img: &::image::GrayImage,
    reading: &BoardReading,
) -> Result<::image::GrayImage, DetectError> {
    let rect = &reading.layout.rectification;
    let (w, h) = (rect.size.width, rect.size.height);
    let out = core::warp_perspective_gray(
        &gray_view(img),
        rect.h_img_from_rect,
        w as usize,
        h as usize,
    );
    ::image::GrayImage::from_raw(w, h, out.data)
        .ok_or(DetectError::InvalidGrayDimensions { width: w, height: h })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{read_detections, CornerCandidate, ReaderParams};
    use nalgebra::Point2;

    #[test]
    fn gray_view_shares_the_buffer() {
        let img = ::image::GrayImage::from_fn(4, 3, |x, y| ::image::Luma([(x + 10 * y) as u8]));
        let view = gray_view(&img);
        assert_eq!((view.width, view.height), (4, 3));
        assert_eq!(view.data[2 * 4 + 1], 21);
    }

    #[test]
    fn preview_of_an_axis_aligned_board_keeps_the_pattern() {
        // 8x8 checkerboard of 10 px squares inside a 100x100 frame at (10, 10).
        let img = ::image::GrayImage::from_fn(100, 100, |x, y| {
            let inside = (10..90).contains(&x) && (10..90).contains(&y);
            let dark = ((x.saturating_sub(10)) / 10 + (y.saturating_sub(10)) / 10) % 2 == 1;
            ::image::Luma([if inside && dark { 0 } else { 255 }])
        });
        let corners: Vec<CornerCandidate> = [(10.0, 10.0), (90.0, 10.0), (90.0, 90.0), (10.0, 90.0)]
            .into_iter()
            .map(|(x, y)| CornerCandidate::new(Point2::new(x, y)))
            .collect();
        let reading = read_detections(&corners, &[], &ReaderParams::default()).expect("read");

        let preview = rectified_preview(&img, &reading).expect("preview");
        assert_eq!(preview.dimensions(), (80, 80));
        // top-left square is light, the one to its right is dark
        assert_eq!(preview.get_pixel(5, 5).0[0], 255);
        assert_eq!(preview.get_pixel(15, 5).0[0], 0);
    }
}
