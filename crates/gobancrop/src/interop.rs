//! Conversions between the crate's RGBA buffers and the `image` crate,
//! plus file load/save helpers. Only compiled with the `image` feature; the
//! detection core itself never touches a file format.

use std::path::Path;

use gobancrop_core::{RgbaImage, RgbaImageView};

/// Borrow an `image::RgbaImage` buffer as a core view, no copy.
pub fn rgba_view(img: &image::RgbaImage) -> RgbaImageView<'_> {
    RgbaImageView {
        width: img.width() as usize,
        height: img.height() as usize,
        data: img.as_raw(),
    }
}

/// Copy an `image::RgbaImage` into an owned core image.
pub fn from_image(img: &image::RgbaImage) -> RgbaImage {
    RgbaImage {
        width: img.width() as usize,
        height: img.height() as usize,
        data: img.as_raw().clone(),
    }
}

/// Copy a core image into an `image::RgbaImage`.
pub fn to_image(img: &RgbaImage) -> image::RgbaImage {
    image::RgbaImage::from_raw(img.width as u32, img.height as u32, img.data.clone())
        .expect("core image buffer length is width*height*4")
}

/// Decode any supported image file into an owned RGBA core image.
pub fn load_rgba(path: impl AsRef<Path>) -> Result<RgbaImage, image::ImageError> {
    let img = image::ImageReader::open(path)?.decode()?.to_rgba8();
    Ok(from_image(&img))
}

/// Encode a core image to a file; the format follows the extension.
pub fn save_rgba(img: &RgbaImage, path: impl AsRef<Path>) -> Result<(), image::ImageError> {
    to_image(img).save(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use gobancrop_core::Rgba;

    #[test]
    fn buffers_round_trip() {
        let mut img = image::RgbaImage::new(3, 2);
        img.put_pixel(1, 1, image::Rgba([10, 20, 30, 255]));

        let core = from_image(&img);
        assert_eq!(core.get(1, 1), Rgba::new(10, 20, 30, 255));
        assert_eq!(rgba_view(&img).get(1, 1), Rgba::new(10, 20, 30, 255));

        let back = to_image(&core);
        assert_eq!(back, img);
    }
}
