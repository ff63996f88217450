use crate::quad::IntRect;

/// An RGBA pixel with 8-bit channels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    /// Fully transparent black, returned for out-of-bounds reads.
    pub const TRANSPARENT: Rgba = Rgba {
        r: 0,
        g: 0,
        b: 0,
        a: 0,
    };

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Color channels normalized into `[0, 1]`, alpha ignored.
    #[inline]
    pub fn rgb_unit(self) -> (f64, f64, f64) {
        (
            self.r as f64 / 255.0,
            self.g as f64 / 255.0,
            self.b as f64 / 255.0,
        )
    }

    /// Channel-average brightness in `0..=255`.
    #[inline]
    pub fn brightness(self) -> u8 {
        ((self.r as u16 + self.g as u16 + self.b as u16) / 3) as u8
    }
}

/// Borrowed view over row-major RGBA8 pixel data, len = w*h*4.
#[derive(Clone, Copy, Debug)]
pub struct RgbaImageView<'a> {
    pub width: usize,
    pub height: usize,
    pub data: &'a [u8],
}

/// Owned row-major RGBA8 image.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RgbaImage {
    pub width: usize,
    pub height: usize,
    pub data: Vec<u8>,
}

impl RgbaImage {
    /// Allocate a transparent-black image.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            data: vec![0u8; width * height * 4],
        }
    }

    /// Wrap a raw RGBA8 buffer; `None` if the length does not match.
    pub fn from_raw(width: usize, height: usize, data: Vec<u8>) -> Option<Self> {
        if data.len() != width * height * 4 {
            return None;
        }
        Some(Self {
            width,
            height,
            data,
        })
    }

    #[inline]
    pub fn view(&self) -> RgbaImageView<'_> {
        RgbaImageView {
            width: self.width,
            height: self.height,
            data: &self.data,
        }
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> Rgba {
        let i = (y * self.width + x) * 4;
        Rgba::new(self.data[i], self.data[i + 1], self.data[i + 2], self.data[i + 3])
    }

    #[inline]
    pub fn set(&mut self, x: usize, y: usize, px: Rgba) {
        let i = (y * self.width + x) * 4;
        self.data[i] = px.r;
        self.data[i + 1] = px.g;
        self.data[i + 2] = px.b;
        self.data[i + 3] = px.a;
    }
}

impl<'a> RgbaImageView<'a> {
    /// Pixel at `(x, y)`, transparent black outside the image bounds.
    #[inline]
    pub fn get(&self, x: i32, y: i32) -> Rgba {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return Rgba::TRANSPARENT;
        }
        let i = (y as usize * self.width + x as usize) * 4;
        Rgba::new(self.data[i], self.data[i + 1], self.data[i + 2], self.data[i + 3])
    }

    /// Copy the pixels under `rect` (clamped to the view) into a new image.
    pub fn crop(&self, rect: IntRect) -> RgbaImage {
        let rect = rect.intersect(IntRect::new(0, 0, self.width as i32, self.height as i32));
        let mut out = RgbaImage::new(rect.width(), rect.height());
        for y in 0..rect.height() {
            for x in 0..rect.width() {
                let px = self.get(rect.x0 + x as i32, rect.y0 + y as i32);
                out.set(x, y, px);
            }
        }
        out
    }
}

/// Bilinear sample at a fractional point, all four channels blended.
///
/// Neighbors outside the image contribute transparent black, so sampling
/// along the border fades out instead of clamping.
pub fn sample_bilinear(src: &RgbaImageView<'_>, x: f64, y: f64) -> Rgba {
    let x0 = x.floor() as i32;
    let y0 = y.floor() as i32;
    let fx = x - x0 as f64;
    let fy = y - y0 as f64;

    let c00 = src.get(x0, y0);
    let c10 = src.get(x0 + 1, y0);
    let c01 = src.get(x0, y0 + 1);
    let c11 = src.get(x0 + 1, y0 + 1);

    let blend = |a: u8, b: u8, c: u8, d: u8| -> u8 {
        let top = a as f64 * (1.0 - fx) + b as f64 * fx;
        let bot = c as f64 * (1.0 - fx) + d as f64 * fx;
        (top * (1.0 - fy) + bot * fy) as u8
    };

    Rgba::new(
        blend(c00.r, c10.r, c01.r, c11.r),
        blend(c00.g, c10.g, c01.g, c11.g),
        blend(c00.b, c10.b, c01.b, c11.b),
        blend(c00.a, c10.a, c01.a, c11.a),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_by_two() -> RgbaImage {
        let mut img = RgbaImage::new(2, 2);
        img.set(0, 0, Rgba::opaque(0, 0, 0));
        img.set(1, 0, Rgba::opaque(100, 0, 0));
        img.set(0, 1, Rgba::opaque(0, 100, 0));
        img.set(1, 1, Rgba::opaque(100, 100, 0));
        img
    }

    #[test]
    fn out_of_bounds_reads_are_transparent() {
        let img = two_by_two();
        let v = img.view();
        assert_eq!(v.get(-1, 0), Rgba::TRANSPARENT);
        assert_eq!(v.get(0, 2), Rgba::TRANSPARENT);
        assert_eq!(v.get(0, 0), Rgba::opaque(0, 0, 0));
    }

    #[test]
    fn bilinear_at_integer_points_is_exact() {
        let img = two_by_two();
        let v = img.view();
        assert_eq!(sample_bilinear(&v, 1.0, 0.0), Rgba::opaque(100, 0, 0));
        assert_eq!(sample_bilinear(&v, 0.0, 1.0), Rgba::opaque(0, 100, 0));
    }

    #[test]
    fn bilinear_blends_at_midpoints() {
        let img = two_by_two();
        let v = img.view();
        let mid = sample_bilinear(&v, 0.5, 0.0);
        assert_eq!(mid.r, 50);
        let center = sample_bilinear(&v, 0.5, 0.5);
        assert_eq!(center.r, 50);
        assert_eq!(center.g, 50);
        assert_eq!(center.a, 255);
    }

    #[test]
    fn crop_clamps_to_bounds() {
        let img = two_by_two();
        let cropped = img.view().crop(IntRect::new(1, 0, 5, 5));
        assert_eq!(cropped.width, 1);
        assert_eq!(cropped.height, 2);
        assert_eq!(cropped.get(0, 0), Rgba::opaque(100, 0, 0));
        assert_eq!(cropped.get(0, 1), Rgba::opaque(100, 100, 0));
    }

    #[test]
    fn from_raw_checks_length() {
        assert!(RgbaImage::from_raw(2, 2, vec![0u8; 16]).is_some());
        assert!(RgbaImage::from_raw(2, 2, vec![0u8; 15]).is_none());
    }

    #[test]
    fn brightness_is_channel_average() {
        assert_eq!(Rgba::opaque(30, 60, 90).brightness(), 60);
        assert_eq!(Rgba::TRANSPARENT.brightness(), 0);
    }
}
