use std::sync::Arc;

use egui::{Color32, ColorImage};
use image::{Rgba, RgbaImage};

/// Convert a UI color into a canvas pixel. Canvas pixels are always opaque.
pub fn to_pixel(color: Color32) -> Rgba<u8> {
    Rgba([color.r(), color.g(), color.b(), 255])
}

/// Inclusive pixel rectangle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelBounds {
    pub min_x: u32,
    pub min_y: u32,
    pub max_x: u32,
    pub max_y: u32,
}

impl PixelBounds {
    fn include(&mut self, x: u32, y: u32) {
        self.min_x = self.min_x.min(x);
        self.min_y = self.min_y.min(y);
        self.max_x = self.max_x.max(x);
        self.max_y = self.max_y.max(y);
    }
}

/// Immutable copy of the canvas pixels at one point in time.
///
/// Cloning a snapshot shares the pixels; the stroke session and the undo
/// stack hold the same allocation.
#[derive(Clone, Debug)]
pub struct Snapshot(Arc<RgbaImage>);

impl Snapshot {
    pub fn image(&self) -> &RgbaImage {
        &self.0
    }
}

impl PartialEq for Snapshot {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0) || *self.0 == *other.0
    }
}

/// The live canvas: the only buffer strokes are painted into
#[derive(Clone, Debug)]
pub struct RasterBuffer {
    image: RgbaImage,
}

impl RasterBuffer {
    /// Create a canvas filled with `background`
    pub fn new(width: u32, height: u32, background: Color32) -> Self {
        Self {
            image: RgbaImage::from_pixel(width, height, to_pixel(background)),
        }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    /// Read a pixel, `None` outside the canvas
    pub fn pixel(&self, x: u32, y: u32) -> Option<Color32> {
        self.image
            .get_pixel_checked(x, y)
            .map(|p| Color32::from_rgba_unmultiplied(p[0], p[1], p[2], p[3]))
    }

    /// Write a pixel. Coordinates outside the canvas are ignored.
    #[inline]
    pub fn put_pixel(&mut self, x: i32, y: i32, pixel: Rgba<u8>) {
        if x < 0 || y < 0 {
            return;
        }
        let (x, y) = (x as u32, y as u32);
        if x >= self.image.width() || y >= self.image.height() {
            return;
        }
        self.image.put_pixel(x, y, pixel);
    }

    pub fn fill(&mut self, color: Color32) {
        let pixel = to_pixel(color);
        for p in self.image.pixels_mut() {
            *p = pixel;
        }
    }

    /// Copy the current pixels into an immutable snapshot
    pub fn snapshot(&self) -> Snapshot {
        Snapshot(Arc::new(self.image.clone()))
    }

    /// Overwrite the canvas with a snapshot's pixels, keeping the snapshot alive
    pub fn restore_from(&mut self, snapshot: &Snapshot) {
        if self.image.dimensions() == snapshot.0.dimensions() {
            self.image.copy_from_slice(snapshot.0.as_raw());
        } else {
            self.image = (*snapshot.0).clone();
        }
    }

    /// Make a snapshot the live canvas, taking its buffer when nothing else
    /// shares it.
    pub fn replace_with(&mut self, snapshot: Snapshot) {
        self.image = Arc::unwrap_or_clone(snapshot.0);
    }

    /// True when the canvas holds exactly the snapshot's pixels
    pub fn matches(&self, snapshot: &Snapshot) -> bool {
        self.image == *snapshot.0
    }

    /// Smallest rectangle covering every pixel that differs from `earlier`.
    /// `None` when nothing changed or the sizes differ.
    pub fn changed_bounds(&self, earlier: &Snapshot) -> Option<PixelBounds> {
        if self.image.dimensions() != earlier.0.dimensions() {
            return None;
        }

        let mut bounds: Option<PixelBounds> = None;
        for (x, y, pixel) in self.image.enumerate_pixels() {
            if pixel != earlier.0.get_pixel(x, y) {
                match bounds.as_mut() {
                    Some(b) => b.include(x, y),
                    None => {
                        bounds = Some(PixelBounds { min_x: x, min_y: y, max_x: x, max_y: y })
                    }
                }
            }
        }
        bounds
    }

    /// Build the egui image uploaded to the canvas texture
    pub fn to_color_image(&self) -> ColorImage {
        ColorImage::from_rgba_unmultiplied(
            [self.image.width() as usize, self.image.height() as usize],
            self.image.as_raw(),
        )
    }
}
